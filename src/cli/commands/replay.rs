use std::path::PathBuf;

use clap::Args;

use crate::replay;
use crate::Result;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to events.jsonl.
    #[arg(long, value_name = "PATH")]
    pub events: PathBuf,

    /// Path the replayed rules_state.json is written to.
    #[arg(long, value_name = "PATH")]
    pub state: PathBuf,

    /// Path the replayed audit_log.jsonl is written to.
    #[arg(long, value_name = "PATH")]
    pub audit: PathBuf,

    /// File holding the expected final state hash.
    #[arg(long, value_name = "PATH")]
    pub verify: PathBuf,
}

pub(crate) fn handle(args: ReplayArgs) -> Result<()> {
    let hash = replay::replay_files(&args.events, &args.state, &args.audit, &args.verify)?;
    println!("{hash}");
    Ok(())
}
