use std::path::PathBuf;

use clap::Args;

use crate::synth;
use crate::Result;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path the events.jsonl is written to.
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Number of events to generate.
    #[arg(long, default_value_t = 1_000)]
    pub count: usize,

    /// Seed for the pseudorandom sequence.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub(crate) fn handle(args: GenerateArgs) -> Result<()> {
    let written = synth::generate(&args.output, args.count, args.seed)?;
    println!("{written}");
    Ok(())
}
