//! HTTP method as a typed enum.
//!
//! Names the RFC 9110 standard methods. Everything else (WebDAV verbs,
//! `PURGE`, extension methods) is carried as [`Method::Other`], so such
//! requests still travel the whole middleware chain; the router answers
//! them with `405` or `404` unless a route was registered for them.

use std::fmt;
use std::str::FromStr;

/// An HTTP request method.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    /// Any syntactically valid method outside the list above.
    Other(http::Method),
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect  => "CONNECT",
            Self::Delete   => "DELETE",
            Self::Get      => "GET",
            Self::Head     => "HEAD",
            Self::Options  => "OPTIONS",
            Self::Patch    => "PATCH",
            Self::Post     => "POST",
            Self::Put      => "PUT",
            Self::Trace    => "TRACE",
            Self::Other(m) => m.as_str(),
        }
    }
}

/// Maps hyper's open-ended method type onto the named variants, keeping
/// anything unrecognised as [`Method::Other`].
impl From<&http::Method> for Method {
    fn from(m: &http::Method) -> Self {
        match m.as_str() {
            "CONNECT" => Self::Connect,
            "DELETE"  => Self::Delete,
            "GET"     => Self::Get,
            "HEAD"    => Self::Head,
            "OPTIONS" => Self::Options,
            "PATCH"   => Self::Patch,
            "POST"    => Self::Post,
            "PUT"     => Self::Put,
            "TRACE"   => Self::Trace,
            _         => Self::Other(m.clone()),
        }
    }
}

/// Parses a method token. Case-sensitive per RFC 9110 §9.1, so `"get"` is
/// an extension method, not `GET`. Fails only on invalid tokens.
impl FromStr for Method {
    type Err = http::method::InvalidMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let m = http::Method::from_bytes(s.as_bytes())?;
        Ok(Self::from(&m))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
