//! CLI command definitions for the `rdz` binary.

pub mod draft;
pub mod wizard;

use clap::{Parser, Subcommand};

/// Inspect and manage locally kept Rendizy drafts.
#[derive(Parser)]
#[command(name = "rdz", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Local draft records.
    Draft {
        #[command(subcommand)]
        command: draft::DraftCommand,
    },

    /// Property wizard structure.
    Wizard {
        #[command(subcommand)]
        command: wizard::WizardCommand,
    },
}
