use clap::Parser;
use gridsync::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
