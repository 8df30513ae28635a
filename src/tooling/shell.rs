//! Interactive shell
//!
//! Parses one command per line and dispatches it onto the [`Hierarchy`].
//! Output goes to an injected writer; failed commands print an error and the
//! shell keeps accepting input.

use crate::error::HierarchyError;
use crate::hierarchy::Hierarchy;
use crate::listing::{
    format_consistency_report, format_entry, format_lookup, format_stats_table,
    format_tree_line, Painter,
};
use crate::store::StorageBackend;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::debug;

pub const HELP_TEXT: &str = "\
Available commands:
  createFile <name>          - Create a new file
  createDirectory <name>     - Create a new directory
  rename <old> <new>         - Rename a file or directory
  delete <name>              - Delete a file or directory
  chmod <name> <digit>       - Set owner permissions from one octal digit (0-7)
  ls                         - List the current directory
  ls -R                      - List the current directory recursively
  find <name>                - Find an entry in the current directory by name
  cd <name>                  - Enter a directory
  cd..                       - Go to the parent directory
  pwd                        - Show the current directory on disk
  lookup <id>                - Find any entry by id through the index
  ids                        - List every indexed id in ascending order
  stats [--json]             - Show index statistics
  verify                     - Check hierarchy and index consistency
  exit                       - Leave the shell
  help                       - Show this help";

/// One parsed shell line
#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    #[command(name = "createFile")]
    CreateFile { name: String },
    #[command(name = "createDirectory")]
    CreateDirectory { name: String },
    Rename { old: String, new: String },
    Delete { name: String },
    Chmod {
        name: String,
        #[arg(allow_hyphen_values = true)]
        permissions: String,
    },
    Ls {
        #[arg(short = 'R')]
        recursive: bool,
    },
    Find { name: String },
    Cd { name: String },
    #[command(name = "cd..")]
    CdUp,
    Pwd,
    Lookup { id: u64 },
    Ids,
    Stats {
        #[arg(long)]
        json: bool,
    },
    Verify,
    Help,
    Exit,
}

/// Split a line into words, honoring double quotes for names with spaces.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut has_word = false;
    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                has_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if has_word {
                    words.push(std::mem::take(&mut current));
                    has_word = false;
                }
            }
            c => {
                current.push(c);
                has_word = true;
            }
        }
    }
    if has_word {
        words.push(current);
    }
    words
}

/// Parse a shell line. `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words = split_words(line);
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

/// Whether the shell should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<S: StorageBackend, W: Write> {
    hierarchy: Hierarchy<S>,
    out: W,
    painter: Painter,
}

impl<S: StorageBackend, W: Write> Shell<S, W> {
    pub fn new(hierarchy: Hierarchy<S>, out: W, painter: Painter) -> Self {
        Self {
            hierarchy,
            out,
            painter,
        }
    }

    pub fn hierarchy(&self) -> &Hierarchy<S> {
        &self.hierarchy
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until `exit` or end of input. A line that is not valid
    /// UTF-8 is reported and skipped.
    pub fn run<R: BufRead>(&mut self, mut input: R, prompt: &str) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            writeln!(
                self.out,
                "{}",
                self.painter
                    .path("Current directory:", &self.hierarchy.current_path())
            )?;
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(self.out)?;
                return Ok(());
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim_end_matches(&['\n', '\r'][..]),
                Err(e) => {
                    debug!(error = %e, "Rejected non-UTF-8 input line");
                    writeln!(
                        self.out,
                        "{}",
                        self.painter.error("Error: input is not valid UTF-8")
                    )?;
                    continue;
                }
            };
            if self.execute_line(line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Parse and run a single line.
    pub fn execute_line(&mut self, line: &str) -> io::Result<Flow> {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                let message = match e.kind() {
                    ErrorKind::InvalidSubcommand | ErrorKind::MissingSubcommand => {
                        format!("Unknown command: {}", line.trim())
                    }
                    _ => {
                        let rendered = e.to_string();
                        let first = rendered.lines().next().unwrap_or_default();
                        format!(
                            "Invalid arguments: {}",
                            first.trim_start_matches("error: ")
                        )
                    }
                };
                writeln!(self.out, "{}", self.painter.error(&message))?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: ShellCommand) -> io::Result<Flow> {
        debug!(?command, "Executing shell command");
        let result = match command {
            ShellCommand::CreateFile { name } => self.hierarchy.create_file(&name).map(drop),
            ShellCommand::CreateDirectory { name } => {
                self.hierarchy.create_directory(&name).map(drop)
            }
            ShellCommand::Rename { old, new } => self.hierarchy.rename(&old, &new).map(drop),
            ShellCommand::Delete { name } => self.hierarchy.remove(&name).map(drop),
            ShellCommand::Chmod { name, permissions } => self
                .hierarchy
                .set_permissions(&name, &permissions)
                .map(drop),
            ShellCommand::Ls { recursive: false } => {
                writeln!(self.out, "{}", self.painter.heading("Entries in current directory:"))?;
                for node in self.hierarchy.list_direct() {
                    writeln!(self.out, "{}", format_entry(node, self.painter))?;
                }
                Ok(())
            }
            ShellCommand::Ls { recursive: true } => {
                for (depth, node) in self.hierarchy.list_recursive() {
                    writeln!(self.out, "{}", format_tree_line(depth, node, self.painter))?;
                }
                Ok(())
            }
            ShellCommand::Find { name } => {
                writeln!(self.out, "Searching for: {}", name)?;
                match self.hierarchy.find_by_name(&name) {
                    Ok(node) => {
                        writeln!(
                            self.out,
                            "{} {} id: {}",
                            self.painter.heading("Found:"),
                            name,
                            node.id
                        )?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                }
            }
            ShellCommand::Cd { name } if name == ".." => {
                self.hierarchy.change_to_parent();
                Ok(())
            }
            ShellCommand::Cd { name } => self.hierarchy.change_directory(&name).map(drop),
            ShellCommand::CdUp => {
                self.hierarchy.change_to_parent();
                Ok(())
            }
            ShellCommand::Pwd => {
                writeln!(
                    self.out,
                    "{}",
                    self.painter
                        .path("Current directory:", &self.hierarchy.current_path())
                )?;
                Ok(())
            }
            ShellCommand::Lookup { id } => match self.hierarchy.lookup(id) {
                Some(node) => {
                    let path = self.hierarchy.path_of(id).unwrap_or_default();
                    let attached = self.hierarchy.is_attached(id);
                    writeln!(self.out, "{}", format_lookup(node, &path, attached, self.painter))?;
                    Ok(())
                }
                None => Err(HierarchyError::NotFound(format!("no entry with id {}", id))),
            },
            ShellCommand::Ids => {
                let ids: Vec<String> = self
                    .hierarchy
                    .nodes_by_id()
                    .map(|node| node.id.to_string())
                    .collect();
                writeln!(self.out, "{}", ids.join(" "))?;
                Ok(())
            }
            ShellCommand::Stats { json } => {
                let stats = self.hierarchy.index_stats();
                let report = self.hierarchy.verify();
                if json {
                    let value = json!({
                        "index": stats,
                        "nodes": report.nodes,
                        "attached": report.attached,
                        "stale_index_entries": report.stale_index_entries,
                    });
                    writeln!(self.out, "{}", value)?;
                } else {
                    writeln!(
                        self.out,
                        "{}",
                        format_stats_table(&stats, report.nodes, report.attached)
                    )?;
                }
                Ok(())
            }
            ShellCommand::Verify => {
                let report = self.hierarchy.verify();
                writeln!(self.out, "{}", format_consistency_report(&report, self.painter))?;
                Ok(())
            }
            ShellCommand::Help => {
                writeln!(self.out, "{}", HELP_TEXT)?;
                Ok(())
            }
            ShellCommand::Exit => return Ok(Flow::Exit),
        };

        if let Err(e) = result {
            writeln!(self.out, "{}", self.painter.error(&format!("Error: {}", e)))?;
        }
        Ok(Flow::Continue)
    }
}
