use std::path::PathBuf;

use crate::entry::EntryTime;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A host call failed for a reason other than the entry being missing.
    HostCall {
        call: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    /// Malformed `%[dN]` directive, a strftime directive chrono rejects, or
    /// padding requested together with nanoseconds.
    Format(String),
    /// Two independent mechanisms disagreed on an entry's timestamps.
    Inconsistent {
        path: String,
        listed_by: &'static str,
        listed: EntryTime,
        queried_by: &'static str,
        queried: EntryTime,
    },
    EmptyInput(String),
    TimeOutOfRange { secs: i64, nanos: u32 },
}

impl Error {
    /// A host call that failed because the entry it was about is gone.
    pub fn is_missing(&self) -> bool {
        match *self {
            Error::HostCall { ref source, .. } => crate::query::is_missing(source),
            _ => false,
        }
    }

    pub fn host_call<P: Into<PathBuf>>(call: &'static str, path: P, source: std::io::Error) -> Error {
        Error::HostCall {
            call,
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::HostCall {
                call,
                ref path,
                ref source,
            } => write!(f, "{call}() failed for {}: {source}", path.display()),
            Error::Format(ref msg) => write!(f, "unable to format time: {msg}"),
            Error::Inconsistent {
                ref path,
                listed_by,
                ref listed,
                queried_by,
                ref queried,
            } => write!(
                f,
                "times mismatch for {path}\n  {listed_by}: {listed}\n  {queried_by}: {queried}"
            ),
            Error::EmptyInput(ref what) => write!(f, "no entries in {what}"),
            Error::TimeOutOfRange { secs, nanos } => {
                write!(f, "time {secs}.{nanos:09} is out of range")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::HostCall { ref source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::convert::From<std::fmt::Error> for Error {
    fn from(_error: std::fmt::Error) -> Error {
        Error::Format("host formatter failed".to_string())
    }
}

/// A mechanism name that isn't one of the known ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl std::fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "unknown method '{}'", self.0)
    }
}

impl std::error::Error for UnknownMethod {}
