use clap::Parser;
use crudgen::cli::{run_cli, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = crudgen::logging::init_logging() {
        eprintln!("warning: {err:#}");
    }
    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::FAILURE
        }
    }
}
