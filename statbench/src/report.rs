use std::io::Write;

use fstime::bench::Stats;
use serde::Serialize;

use crate::config::OutputConfig;
use crate::error::Result;

/// JSON form of a finished run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub command: &'a str,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<&'a str>,
    #[serde(flatten)]
    pub stats: Stats,
}

/// Summary on stderr, then the requested results on `out`.
pub fn write<W: Write>(report: &Report, output: &OutputConfig, out: &mut W) -> Result<()> {
    eprintln!("{}", report.stats);

    if output.print_result {
        writeln!(out, "{}", report.stats.per_entry_nanos())?;
    }
    if output.json {
        serde_json::to_writer(&mut *out, report)?;
        writeln!(out)?;
    }
    Ok(())
}
