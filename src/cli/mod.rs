//! CLI surface for the truth engine.
//!
//! Three subcommands, thin handlers: `run` processes events against the
//! persisted state, `replay` re-runs from empty and verifies the final hash,
//! `generate` writes a synthetic events file.

use clap::{ArgAction, Parser, Subcommand};

use crate::Result;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "truth-engine",
    version,
    about = "Deterministic pricing core for a construction-materials marketplace",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Debug output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process events and update the persisted state.
    Run(commands::run::RunArgs),

    /// Re-run events from an empty state and verify the final hash.
    Replay(commands::replay::ReplayArgs),

    /// Generate a synthetic events file.
    #[command(alias = "gen")]
    Generate(commands::generate::GenerateArgs),
}

/// Run the CLI (used by bin).
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => commands::run::handle(args),
        Commands::Replay(args) => commands::replay::handle(args),
        Commands::Generate(args) => commands::generate::handle(args),
    }
}
