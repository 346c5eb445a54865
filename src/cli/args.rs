//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Report types whose resource file overrides the default language
//! - `fix`: Remove the `$this.Language` marker from companion resource files
//! - `init`: Initialize relang configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Return the command, or print help and return None.
    pub fn into_command_or_help(self) -> Option<Command> {
        if self.command.is_none() {
            Self::command().print_help().ok();
        }
        self.command
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite resource files (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Only fix diagnostics reported in this source file
    #[arg(long, value_name = "PATH")]
    pub document: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check for resource files that override the default language
    Check(CheckCommand),
    /// Restore the default language of flagged resource files
    Fix(FixCommand),
    /// Initialize a new .relangrc.json configuration file
    Init,
}
