use std::io::{self, BufWriter, Write};

use fstime::bench;
use fstime::traversal::Traversal;

use crate::config::IterConfig;
use crate::error::Result;
use crate::report::{self, Report};

/// Times one walk over the configured directory tree.
pub fn run(config: &IterConfig) -> Result<()> {
    let mut traversal = Traversal::new(&config.list).print_level(config.print_level);
    if let Some(check) = &config.check {
        traversal = traversal.check_with(check);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = bench::iterate(&traversal, &config.root, &mut out)?;
    out.flush()?;

    let report = Report {
        command: "iter",
        method: config.list.as_str(),
        check: config.check.map(|q| q.as_str()),
        stats,
    };
    report::write(&report, &config.output, &mut out)?;
    out.flush()?;
    Ok(())
}
