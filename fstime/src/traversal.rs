//! # Traversal
//!
//! Walks a directory tree depth-first, once, counting every entry except `.`
//! and `..`. Each directory is counted (and cross-checked) before it is
//! descended into.
//!
//! When a cross-check query is configured every entry is queried a second
//! time, independently of the enumeration, and the two results must satisfy
//! `EntryTime::consistent_with`. The first disagreement aborts the walk with
//! `Error::Inconsistent`. Enumerations that don't report times (e.g.
//! `ListMethod::Readdir`) still get the query run against each entry, there
//! is just nothing to compare it with.
//!
//! The engine only knows about the `DirectoryLister` and `EntryTimeQuery`
//! traits, which is what lets the tests below drive it from memory.
use std::io::Write;
use std::path::{Path, MAIN_SEPARATOR_STR};

use log::{debug, trace};

use crate::entry::EntryTime;
use crate::error::{Error, Result};
use crate::listing::{DirectoryLister, ListedEntry};
use crate::query::EntryTimeQuery;

pub struct Traversal<'a> {
    lister: &'a dyn DirectoryLister,
    check: Option<&'a dyn EntryTimeQuery>,
    print_level: u32,
}

impl<'a> Traversal<'a> {
    pub fn new(lister: &'a dyn DirectoryLister) -> Traversal<'a> {
        Traversal {
            lister,
            check: None,
            print_level: 0,
        }
    }

    /// Re-query every entry with `query` and compare against the listing.
    pub fn check_with(mut self, query: &'a dyn EntryTimeQuery) -> Traversal<'a> {
        self.check = Some(query);
        self
    }

    /// 0: silent, 1: entry paths, 2 and up: paths with kind and times.
    pub fn print_level(mut self, level: u32) -> Traversal<'a> {
        self.print_level = level;
        self
    }

    pub fn lister_name(&self) -> &'static str {
        self.lister.name()
    }

    pub fn check_name(&self) -> Option<&'static str> {
        self.check.map(|q| q.name())
    }

    /// Walks everything below `root` and returns the number of entries seen.
    /// Per-entry lines (if any) go to `out`.
    pub fn run<W: Write>(&self, root: &Path, out: &mut W) -> Result<u64> {
        let mut count = 0;
        self.walk(root, true, &mut count, out)?;
        Ok(count)
    }

    fn walk(&self, dir: &Path, is_root: bool, count: &mut u64, out: &mut dyn Write) -> Result<()> {
        let listing = match self.lister.list(dir) {
            Ok(listing) => listing,
            Err(e) if !is_root && e.is_missing() => {
                debug!("{} vanished before it could be listed", dir.display());
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        debug!("listing {} with {}", dir.display(), self.lister.name());

        for entry in listing {
            let entry = entry?;
            if entry.name == "." || entry.name == ".." {
                continue;
            }
            *count += 1;

            let path = dir.join(&entry.name);
            trace!("entry #{count}: {}", path.display());

            let queried = match self.check {
                Some(query) => Some(query.query(&path)?),
                None => None,
            };
            if let (Some(query), Some(queried)) = (self.check, queried) {
                if entry.times.is_known() && !entry.times.consistent_with(&queried) {
                    return Err(Error::Inconsistent {
                        path: display_path(&path, entry.is_dir),
                        listed_by: self.lister.name(),
                        listed: entry.times,
                        queried_by: query.name(),
                        queried,
                    });
                }
            }

            if self.print_level > 0 {
                self.print_entry(out, &path, &entry, queried.as_ref())
                    .map_err(|e| Error::host_call("write", "<stdout>", e))?;
            }

            if entry.is_dir {
                self.walk(&path, false, count, out)?;
            }
        }
        Ok(())
    }

    fn print_entry(
        &self,
        out: &mut dyn Write,
        path: &Path,
        entry: &ListedEntry,
        queried: Option<&EntryTime>,
    ) -> std::io::Result<()> {
        write!(out, "{}", path.display())?;
        if self.print_level > 1 {
            write!(out, " {}", if entry.is_dir { "dir" } else { "reg" })?;
            if entry.times.is_known() {
                write!(out, " {}", entry.times)?;
            }
            if let Some(q) = queried {
                write!(out, " smod {} sacc {}", q.modification, q.access)?;
            }
        }
        writeln!(out)
    }
}

/// Path for diagnostics, with a trailing separator for directories.
fn display_path(path: &Path, is_dir: bool) -> String {
    let sep = if is_dir { MAIN_SEPARATOR_STR } else { "" };
    format!("{}{sep}", path.display())
}
