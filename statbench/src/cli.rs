use fstime::listing::ListMethod;
use fstime::query::QueryMethod;

use crate::error::{Error, Result};

pub fn app<'a, 'b>() -> clap::App<'a, 'b> {
    clap::App::new("statbench")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("Measure and cross-check the cost of reading file modification and access times")
        .setting(clap::AppSettings::SubcommandRequiredElseHelp)
        .arg(
            clap::Arg::from_usage("-d --debug 'Enable debug output'")
                .global(true)
        )
        .subcommand(
            clap::SubCommand::with_name("stat")
                .about("Query the times of every path listed in a file, one path per line")
                .arg(
                    clap::Arg::from_usage("-q, --query <method> 'Query mechanism'")
                        .possible_values(&QueryMethod::NAMES),
                )
                .arg(clap::Arg::from_usage("-r, --result 'Print the time per entry in nanoseconds on stdout'"))
                .arg(clap::Arg::from_usage("--json 'Print the run statistics as JSON on stdout'"))
                .arg(clap::Arg::from_usage("<FILE> 'File listing the paths to query'")),
        )
        .subcommand(
            clap::SubCommand::with_name("iter")
                .about("Walk a directory tree, optionally cross-checking every entry's times")
                .arg(
                    clap::Arg::from_usage("-l, --list <method> 'Directory enumeration mechanism'")
                        .possible_values(&ListMethod::NAMES),
                )
                .arg(
                    clap::Arg::from_usage("-c, --check [method] 'Re-query every entry with this mechanism and compare'")
                        .possible_values(&QueryMethod::NAMES),
                )
                .arg(
                    clap::Arg::from_usage("-P, --print [level] 'Print entries: 1 paths, 2 paths with times'")
                        .default_value("0"),
                )
                .arg(clap::Arg::from_usage("-r, --result 'Print the time per entry in nanoseconds on stdout'"))
                .arg(clap::Arg::from_usage("--json 'Print the run statistics as JSON on stdout'"))
                .arg(clap::Arg::from_usage("<DIR> 'Directory to walk'")),
        )
        .subcommand(
            clap::SubCommand::with_name("avg")
                .about("Print the integer mean of a sum over a count")
                .arg(clap::Arg::from_usage("<SUM> 'Sum of the measurements'"))
                .arg(clap::Arg::from_usage("<COUNT> 'Number of measurements'")),
        )
}

/// Parses the command line. `--help` and `--version` print and exit here;
/// every other parse failure is returned as a CLI input error.
pub fn parse_flags<'a>() -> Result<clap::ArgMatches<'a>> {
    app().get_matches_safe().map_err(|e| match e.kind {
        clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => e.exit(),
        _ => Error::CliInputError(e.message.trim_start_matches("error: ").to_string()),
    })
}
