use clap::Parser;
use trendpick::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
