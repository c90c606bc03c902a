//! Directory enumeration.
//!
//! A `DirectoryLister` opens one directory level and hands out its entries
//! lazily, in whatever order the host returns them. The open directory handle
//! lives inside the returned iterator and is closed when the iterator is
//! dropped, whether the caller ran it to the end or bailed out early.
use std::ffi::OsString;
use std::fs::{self, DirEntry, ReadDir};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::EntryTime;
use crate::error::{Error, Result, UnknownMethod};
use crate::query::{entry_time_of, is_missing};

/// One entry of a directory as seen by the enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: OsString,
    pub is_dir: bool,
    /// `EntryTime::UNKNOWN` if the enumeration doesn't report times.
    pub times: EntryTime,
}

pub type Listing<'a> = Box<dyn Iterator<Item = Result<ListedEntry>> + 'a>;

pub trait DirectoryLister {
    fn name(&self) -> &'static str;

    fn list<'a>(&'a self, dir: &Path) -> Result<Listing<'a>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMethod {
    /// readdir(3) alone: names and entry types, no times.
    Readdir,
    /// readdir(3) plus fstatat(2) against the open directory for each entry.
    Bulk,
}

impl ListMethod {
    pub const NAMES: [&'static str; 2] = ["readdir", "bulk"];

    pub fn as_str(self) -> &'static str {
        match self {
            ListMethod::Readdir => "readdir",
            ListMethod::Bulk => "bulk",
        }
    }
}

impl FromStr for ListMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> std::result::Result<ListMethod, UnknownMethod> {
        match s {
            "readdir" => Ok(ListMethod::Readdir),
            "bulk" => Ok(ListMethod::Bulk),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl DirectoryLister for ListMethod {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn list<'a>(&'a self, dir: &Path) -> Result<Listing<'a>> {
        let entries = fs::read_dir(dir).map_err(|e| Error::host_call("opendir", dir, e))?;
        Ok(Box::new(DirListing {
            dir: dir.to_path_buf(),
            entries,
            with_times: *self == ListMethod::Bulk,
        }))
    }
}

struct DirListing {
    dir: PathBuf,
    entries: ReadDir,
    with_times: bool,
}

impl DirListing {
    fn describe(&self, entry: DirEntry) -> Result<ListedEntry> {
        let name = entry.file_name();

        if !self.with_times {
            let is_dir = match entry.file_type() {
                Ok(t) => t.is_dir(),
                Err(e) if is_missing(&e) => false,
                Err(e) => return Err(Error::host_call("lstat", entry.path(), e)),
            };
            return Ok(ListedEntry {
                name,
                is_dir,
                times: EntryTime::UNKNOWN,
            });
        }

        match entry.metadata() {
            Ok(metadata) => Ok(ListedEntry {
                name,
                is_dir: metadata.is_dir(),
                times: entry_time_of(&metadata)?,
            }),
            Err(e) if is_missing(&e) => Ok(ListedEntry {
                name,
                is_dir: false,
                times: EntryTime::NONEXISTENT,
            }),
            Err(e) => Err(Error::host_call("fstatat", entry.path(), e)),
        }
    }
}

impl Iterator for DirListing {
    type Item = Result<ListedEntry>;

    fn next(&mut self) -> Option<Result<ListedEntry>> {
        let entry = match self.entries.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(Error::host_call("readdir", &self.dir, e))),
        };
        Some(self.describe(entry))
    }
}
