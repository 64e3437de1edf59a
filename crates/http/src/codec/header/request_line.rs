//! Request line parsing.
//!
//! The request line is exactly three space separated tokens: method,
//! target, version. An empty token counts toward the token count, so
//! doubled spaces fail. There is no tolerance for leading empty lines
//! before the request line. The target is kept verbatim here; resolving it
//! into an absolute url needs the `Host` header and happens at the end of
//! the header block.

use crate::protocol::{Method, ParseError, Version};
use crate::ensure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestLine {
    pub(crate) method: Method,
    pub(crate) target: String,
    pub(crate) version: Version,
}

pub(crate) fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::malformed_request_line("request line is not valid utf-8"))?;

    let tokens: Vec<&str> = line.split(' ').collect();
    ensure!(tokens.len() == 3, ParseError::malformed_request_line(format!("expected 3 tokens, got {}", tokens.len())));
    ensure!(
        tokens.iter().all(|token| !token.is_empty()),
        ParseError::malformed_request_line(format!("empty token in request line {line:?}"))
    );

    let method = Method::try_from(tokens[0])?;
    let version = Version::try_from(tokens[2])?;

    Ok(RequestLine { method, target: tokens[1].to_string(), version })
}
