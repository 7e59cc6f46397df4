use clap::Parser;

use truth_engine::{cli, telemetry};

fn main() {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose);

    if let Err(e) = cli::run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
