//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `sync`: Diff the source catalog against the store and translate changes
//! - `mark`: Protect translations from the sync path (manual provenance)
//! - `status`: Summarize the store per locale
//! - `init`: Initialize a locsync configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Sync(cmd)) => cmd.args.common.verbose,
            Some(Command::Mark(cmd)) => cmd.args.common.verbose,
            Some(Command::Status(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory to operate in
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Retranslate every phrase regardless of the stored state
    #[arg(long)]
    pub force: bool,

    /// Restrict the run to a configured locale.
    /// Can be specified multiple times: --locale fr --locale de
    #[arg(long = "locale")]
    pub locales: Vec<String>,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,
}

#[derive(Debug, Parser)]
pub struct MarkArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Locale whose translations are being protected
    #[arg(long)]
    pub locale: String,

    /// Phrase keys to mark as manually maintained
    #[arg(required = true)]
    pub keys: Vec<String>,
}

#[derive(Debug, Args)]
pub struct MarkCommand {
    #[command(flatten)]
    pub args: MarkArgs,
}

#[derive(Debug, Parser)]
pub struct StatusArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub args: StatusArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate new or changed source phrases and export locale bundles
    Sync(SyncCommand),
    /// Mark translations as manual so sync never overwrites them
    Mark(MarkCommand),
    /// Show stored phrase and per-locale translation counts
    Status(StatusCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
}
