//! Command-line interface layer.

use anyhow::Result;

pub mod args;
mod commands;
pub mod exit_status;
pub mod report;

pub use args::{Arguments, Command, CommonArgs};
pub use exit_status::ExitStatus;

use commands::{check::check, fix::fix, init::init};

/// Dispatch to the command handler; no subcommand prints help.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(command) = args.into_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Command::Check(cmd) => check(cmd),
        Command::Fix(cmd) => fix(cmd),
        Command::Init => init(),
    }
}
