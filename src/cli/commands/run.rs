use std::path::PathBuf;

use clap::Args;

use crate::pipeline;
use crate::Result;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to events.jsonl.
    #[arg(long, value_name = "PATH")]
    pub events: PathBuf,

    /// Path to rules_state.json (created if absent).
    #[arg(long, value_name = "PATH")]
    pub state: PathBuf,

    /// Path to audit_log.jsonl (truncated).
    #[arg(long, value_name = "PATH")]
    pub audit: PathBuf,
}

pub(crate) fn handle(args: RunArgs) -> Result<()> {
    let hash = pipeline::run_files(&args.events, &args.state, &args.audit)?;
    println!("{hash}");
    Ok(())
}
