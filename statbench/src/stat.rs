use std::io;

use fstime::bench;

use crate::config::StatConfig;
use crate::error::Result;
use crate::report::{self, Report};

/// Times one query per path listed in the configured file.
pub fn run(config: &StatConfig) -> Result<()> {
    let stats = bench::stat_list(&config.query, &config.list_file)?;

    let report = Report {
        command: "stat",
        method: config.query.as_str(),
        check: None,
        stats,
    };
    report::write(&report, &config.output, &mut io::stdout().lock())
}
