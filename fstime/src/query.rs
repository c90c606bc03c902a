//! Per-entry metadata queries.
//!
//! Each `QueryMethod` obtains an entry's modification and access time through
//! a different host call. An entry that doesn't exist (or whose path runs
//! through something that isn't a directory) yields `EntryTime::NONEXISTENT`;
//! every other failure is returned as `Error::HostCall`.
use std::fs::{self, File, Metadata, OpenOptions};
use std::io;
use std::path::Path;
use std::str::FromStr;

use filetime::FileTime;
use serde::{Deserialize, Serialize};

use crate::entry::EntryTime;
use crate::error::{Error, Result, UnknownMethod};
use crate::timestamp::Timestamp;

/// Something that can tell the times of an entry given its path.
pub trait EntryTimeQuery {
    /// Short name used in diagnostics and reports.
    fn name(&self) -> &'static str;

    fn query(&self, path: &Path) -> Result<EntryTime>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMethod {
    /// stat(2), follows symlinks.
    Stat,
    /// lstat(2): the attributes of the entry itself.
    Attrs,
    /// open(2) + fstat(2) on the resulting handle.
    Handle,
}

impl QueryMethod {
    pub const NAMES: [&'static str; 3] = ["stat", "attrs", "handle"];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryMethod::Stat => "stat",
            QueryMethod::Attrs => "attrs",
            QueryMethod::Handle => "handle",
        }
    }
}

impl FromStr for QueryMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> std::result::Result<QueryMethod, UnknownMethod> {
        match s {
            "stat" => Ok(QueryMethod::Stat),
            "attrs" => Ok(QueryMethod::Attrs),
            "handle" => Ok(QueryMethod::Handle),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

impl EntryTimeQuery for QueryMethod {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn query(&self, path: &Path) -> Result<EntryTime> {
        match self {
            QueryMethod::Stat => from_result("stat", path, fs::metadata(path)),
            QueryMethod::Attrs => from_result("lstat", path, fs::symlink_metadata(path)),
            QueryMethod::Handle => {
                let file = match open_handle(path) {
                    Ok(file) => file,
                    Err(e) if is_missing(&e) => return Ok(EntryTime::NONEXISTENT),
                    Err(e) => return Err(Error::host_call("open", path, e)),
                };
                from_result("fstat", path, file.metadata())
            }
        }
    }
}

fn from_result(call: &'static str, path: &Path, result: io::Result<Metadata>) -> Result<EntryTime> {
    match result {
        Ok(metadata) => entry_time_of(&metadata),
        Err(e) if is_missing(&e) => Ok(EntryTime::NONEXISTENT),
        Err(e) => Err(Error::host_call(call, path, e)),
    }
}

/// Opens an entry for nothing but querying it. Non-blocking so that a FIFO
/// doesn't wait for a writer.
fn open_handle(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.custom_flags(libc::O_NONBLOCK);
    }
    options.open(path)
}

/// Converts host metadata into an `EntryTime`, keeping whatever sub-second
/// precision the host provides.
pub fn entry_time_of(metadata: &Metadata) -> Result<EntryTime> {
    Ok(EntryTime::new(
        Timestamp::from_file_time(FileTime::from_last_modification_time(metadata))?,
        Timestamp::from_file_time(FileTime::from_last_access_time(metadata))?,
    ))
}

/// The host's ways of saying "there is no such entry".
pub fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
