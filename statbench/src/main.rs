extern crate statbench;

use std::process;

use statbench::config::{AvgConfig, IterConfig, StatConfig};
use statbench::error::{Error, Result};

fn run() -> Result<()> {
    let matches = statbench::cli::parse_flags()?;

    statbench::utils::initialize_debug_from_args(&matches);

    match matches.subcommand() {
        ("stat", Some(cmd)) => statbench::stat::run(&StatConfig::from_matches(cmd)?),
        ("iter", Some(cmd)) => statbench::iter::run(&IterConfig::from_matches(cmd)?),
        ("avg", Some(cmd)) => statbench::avg::run(&AvgConfig::from_matches(cmd)?),
        _ => Err(Error::CliInputError(
            "No command specified or unknown command. Use --help for available commands.".to_string(),
        )),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
