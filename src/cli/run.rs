use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, mark::mark, status::status, sync::sync},
    exit_status::ExitStatus,
};

/// Dispatch to the appropriate command handler based on the parsed arguments.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Mark(cmd)) => mark(cmd),
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
