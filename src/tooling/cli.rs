//! CLI Tooling
//!
//! Process-level arguments for the `inotree` binary and the context that
//! turns them into a configured shell.

use crate::config::{ConfigLoader, InotreeConfig};
use crate::error::ApiError;
use crate::hierarchy::Hierarchy;
use crate::listing::Painter;
use crate::store::DiskStorage;
use crate::tooling::shell::Shell;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Inotree - directory hierarchy mirrored on disk with an id index
#[derive(Parser, Debug, Default)]
#[command(name = "inotree")]
#[command(about = "Directory hierarchy mirrored on disk with a B-tree id index")]
pub struct Cli {
    /// Storage root to mirror (default: ./root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum degree of the id index (at least 2)
    #[arg(long)]
    pub min_degree: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Run these shell commands in order instead of reading stdin
    #[arg(short = 'c', long = "command")]
    pub commands: Vec<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut InotreeConfig) {
        if let Some(root) = &self.root {
            config.storage.root = root.clone();
        }
        if let Some(min_degree) = self.min_degree {
            config.index.min_degree = min_degree;
        }
        if self.no_color {
            config.shell.color = false;
            config.logging.color = false;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

/// Resolved configuration plus the directory relative paths are anchored to
pub struct CliContext {
    base_dir: PathBuf,
    config: InotreeConfig,
}

impl CliContext {
    pub fn new(base_dir: PathBuf, cli: &Cli) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load(&base_dir, cli.config.as_deref())?;
        cli.apply_overrides(&mut config);
        config.validate()?;
        Ok(Self { base_dir, config })
    }

    pub fn config(&self) -> &InotreeConfig {
        &self.config
    }

    pub fn storage_root(&self) -> PathBuf {
        self.config.storage.resolve_root(&self.base_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Open the storage root, map it, and wrap the hierarchy in a shell
    /// writing to `out`.
    pub fn open_shell<W: Write>(&self, out: W) -> Result<Shell<DiskStorage, W>, ApiError> {
        let storage = DiskStorage::open(self.storage_root())?;
        let hierarchy = Hierarchy::open(storage, self.config.index.min_degree)?;
        info!(
            nodes = hierarchy.len(),
            min_degree = self.config.index.min_degree,
            "Hierarchy ready"
        );
        Ok(Shell::new(
            hierarchy,
            out,
            Painter::new(self.config.shell.color),
        ))
    }
}
