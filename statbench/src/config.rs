//! Typed run configuration, built from the parsed command line.
use std::path::PathBuf;

use fstime::listing::ListMethod;
use fstime::query::QueryMethod;

use crate::error::{Error, Result};

/// What to print once a run has finished, besides the summary on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    /// Time per entry, in nanoseconds, on stdout.
    pub print_result: bool,
    /// Statistics as JSON on stdout.
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatConfig {
    pub query: QueryMethod,
    pub list_file: PathBuf,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterConfig {
    pub list: ListMethod,
    pub check: Option<QueryMethod>,
    pub print_level: u32,
    pub root: PathBuf,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvgConfig {
    pub sum: u64,
    pub count: u64,
}

fn required<'a>(matches: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .value_of(name)
        .ok_or_else(|| Error::CliInputError(format!("{} is required.", name)))
}

fn number<T: std::str::FromStr>(matches: &clap::ArgMatches, name: &str) -> Result<T> {
    let value = required(matches, name)?;
    value
        .parse()
        .map_err(|_| Error::CliInputError(format!("invalid {} '{}': expected a non-negative integer", name, value)))
}

impl OutputConfig {
    fn from_matches(matches: &clap::ArgMatches) -> OutputConfig {
        OutputConfig {
            print_result: matches.is_present("result"),
            json: matches.is_present("json"),
        }
    }
}

impl StatConfig {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<StatConfig> {
        Ok(StatConfig {
            query: required(matches, "query")?.parse()?,
            list_file: PathBuf::from(required(matches, "FILE")?),
            output: OutputConfig::from_matches(matches),
        })
    }
}

impl IterConfig {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<IterConfig> {
        let check = match matches.value_of("check") {
            Some(name) => Some(name.parse()?),
            None => None,
        };
        Ok(IterConfig {
            list: required(matches, "list")?.parse()?,
            check,
            print_level: number(matches, "print")?,
            root: PathBuf::from(required(matches, "DIR")?),
            output: OutputConfig::from_matches(matches),
        })
    }
}

impl AvgConfig {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<AvgConfig> {
        Ok(AvgConfig {
            sum: number(matches, "SUM")?,
            count: number(matches, "COUNT")?,
        })
    }
}
