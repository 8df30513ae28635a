//! Inotree CLI Binary
//!
//! Interactive shell over a directory hierarchy mirrored on disk.

use anyhow::Context;
use clap::Parser;
use inotree::logging::init_logging;
use inotree::tooling::{Cli, CliContext, Flow};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir().context("Failed to read current directory")?;
    let context = CliContext::new(base_dir, &cli).context("Failed to load configuration")?;

    if cli.print_config {
        println!("{}", context.config().to_toml()?);
        return Ok(());
    }

    init_logging(&context.config().logging).context("Failed to initialize logging")?;

    let stdout = io::stdout();
    let mut shell = context
        .open_shell(stdout.lock())
        .with_context(|| format!("Failed to open {}", context.storage_root().display()))?;

    if cli.commands.is_empty() {
        let stdin = io::stdin();
        shell.run(stdin.lock(), &context.config().shell.prompt)?;
    } else {
        for line in &cli.commands {
            if shell.execute_line(line)? == Flow::Exit {
                break;
            }
        }
    }
    Ok(())
}
