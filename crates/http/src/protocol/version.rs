//! HTTP version handling implementation.
//!
//! Only the exact tokens `HTTP/0.9`, `HTTP/1.0` and `HTTP/1.1` are accepted.
//! Anything else, including HTTP/2 and HTTP/3 prefaces, is refused with a
//! 505 outcome instead of being coerced to a near match.

use std::fmt::{self, Display, Formatter};

use crate::protocol::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    Http09,
    Http10,
    Http11,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http09 => "HTTP/0.9",
            Self::Http10 => "HTTP/1.0",
            Self::Http11 => "HTTP/1.1",
        }
    }
}

impl TryFrom<&str> for Version {
    type Error = ParseError;

    fn try_from(str: &str) -> Result<Self, Self::Error> {
        match str {
            "HTTP/0.9" => Ok(Self::Http09),
            "HTTP/1.0" => Ok(Self::Http10),
            "HTTP/1.1" => Ok(Self::Http11),
            _ => Err(ParseError::unsupported_version(str)),
        }
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
