use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    FsTimeError(fstime::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    CliInputError(String),
    ZeroCount,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FsTimeError(err) => write!(f, "{}", err),
            Error::IoError(err) => write!(f, "IO error: {}", err),
            Error::JsonError(err) => write!(f, "JSON error: {}", err),
            Error::CliInputError(msg) => write!(f, "{}", msg),
            Error::ZeroCount => write!(f, "count must be non-zero"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FsTimeError(err) => Some(err),
            Error::IoError(err) => Some(err),
            Error::JsonError(err) => Some(err),
            Error::CliInputError(_) | Error::ZeroCount => None,
        }
    }
}

impl std::convert::From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::IoError(error)
    }
}

impl std::convert::From<fstime::Error> for Error {
    fn from(error: fstime::Error) -> Error {
        Error::FsTimeError(error)
    }
}

impl std::convert::From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::JsonError(error)
    }
}

impl std::convert::From<fstime::error::UnknownMethod> for Error {
    fn from(error: fstime::error::UnknownMethod) -> Error {
        Error::CliInputError(error.to_string())
    }
}
