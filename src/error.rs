//! Unified error type.

use std::fmt;
use std::net::AddrParseError;

/// The error type returned by onion's fallible operations.
///
/// Application-level failures (401, 404, 500, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures only: parsing the listen address and binding to it.
#[derive(Debug)]
pub enum Error {
    /// The listen address is not a valid `host:port` pair.
    Addr(AddrParseError),
    /// Binding or accepting on the socket failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addr(e) => write!(f, "invalid listen address: {e}"),
            Self::Io(e)   => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Addr(e) => Some(e),
            Self::Io(e)   => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<AddrParseError> for Error {
    fn from(e: AddrParseError) -> Self {
        Self::Addr(e)
    }
}
