//! Timing harness.
//!
//! Both invocation shapes read the clock immediately before the first host
//! call and immediately after the last one, and divide the elapsed time by
//! the number of entries processed:
//!
//! - `stat_list`: one query per line of a newline-delimited list of paths.
//! - `iterate`: one `Traversal` over a directory tree.
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::format::Elapsed;
use crate::query::EntryTimeQuery;
use crate::timestamp::Timestamp;
use crate::traversal::Traversal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub entries: u64,
    #[serde(rename = "elapsed_ns", serialize_with = "as_nanos")]
    pub elapsed: Duration,
    #[serde(rename = "per_entry_ns", serialize_with = "as_nanos")]
    pub per_entry: Duration,
}

fn as_nanos<S: Serializer>(d: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

impl Stats {
    /// Statistics for `entries` entries processed between `start` and `end`.
    /// `what` names the input in the error raised for zero entries.
    pub fn measured(start: Timestamp, end: Timestamp, entries: u64, what: &Path) -> Result<Stats> {
        if entries == 0 {
            return Err(Error::EmptyInput(what.display().to_string()));
        }
        let elapsed = end.duration_since(start).ok_or_else(|| {
            Error::host_call("clock", what, std::io::Error::other("system clock went backwards"))
        })?;
        let per_entry = elapsed.as_nanos() / u128::from(entries);
        Ok(Stats {
            entries,
            elapsed,
            per_entry: Duration::from_nanos(u64::try_from(per_entry).unwrap_or(u64::MAX)),
        })
    }

    pub fn per_entry_nanos(&self) -> u128 {
        self.per_entry.as_nanos()
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "entries: {}", self.entries)?;
        writeln!(f, "full time: {}", Elapsed(self.elapsed))?;
        write!(f, "time per entry: {}", Elapsed(self.per_entry))
    }
}

/// Queries every path listed in `list`, one per line.
///
/// Missing paths count as entries (the query reports them nonexistent); an
/// unreadable list or any other query failure aborts the run.
pub fn stat_list(query: &dyn EntryTimeQuery, list: &Path) -> Result<Stats> {
    let file = File::open(list).map_err(|e| Error::host_call("open", list, e))?;
    let reader = BufReader::new(file);
    debug!("querying paths from {} with {}", list.display(), query.name());

    let mut count = 0;
    let start = Timestamp::now();
    for line in reader.lines() {
        let line = line.map_err(|e| Error::host_call("read", list, e))?;
        query.query(Path::new(&line))?;
        count += 1;
    }
    let end = Timestamp::now();

    debug!("queried {count} paths");
    Stats::measured(start, end, count, list)
}

/// Runs `traversal` over `root`, per-entry output going to `out`.
pub fn iterate<W: Write>(traversal: &Traversal, root: &Path, out: &mut W) -> Result<Stats> {
    debug!(
        "iterating {} with {}{}",
        root.display(),
        traversal.lister_name(),
        traversal
            .check_name()
            .map_or(String::new(), |q| format!(", checking with {q}"))
    );

    let start = Timestamp::now();
    let count = traversal.run(root, out)?;
    let end = Timestamp::now();

    debug!("visited {count} entries");
    Stats::measured(start, end, count, root)
}
