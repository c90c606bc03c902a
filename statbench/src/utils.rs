use log::LevelFilter;

/// Sets up logging on stderr: `warn` by default, `debug` with `--debug`,
/// and whatever `RUST_LOG` says on top of that.
pub fn initialize_debug_from_args(matches: &clap::ArgMatches) {
    let is_debug = matches.is_present("debug")
        || matches
            .subcommand()
            .1
            .is_some_and(|cmd| cmd.is_present("debug"));
    let level = if is_debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
