//! Error types for request parsing and response sending.
//!
//! Parsing failures carry enough context to build the rejection response:
//! every [`ParseError`] maps to exactly one HTTP status code through
//! [`ParseError::status_code`]. [`SendError`] covers the response path and
//! [`HttpError`] wraps both for the connection layer.

use std::io;

use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Reasons a request can be refused, one variant per rejection status.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request line: {reason}")]
    MalformedRequestLine { reason: String },

    #[error("method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("unsupported http version: {version}")]
    UnsupportedVersion { version: String },

    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    #[error("empty value for header {name}")]
    EmptyHeaderValue { name: String },

    #[error("missing host header")]
    MissingHostHeader,

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("conflicting body framing: content-length and transfer-encoding both present")]
    ConflictingBodyFraming,

    #[error("chunked transfer encoding not supported")]
    ChunkedNotSupported,

    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    #[error("invalid url: {reason}")]
    InvalidUrl { reason: String },

    #[error("malformed body: {reason}")]
    MalformedBody { reason: String },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("body size too large, declared: {length} exceed the limit {max_size}")]
    TooLargeBody { length: u64, max_size: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(str: S) -> Self {
        Self::MalformedRequestLine { reason: str.to_string() }
    }

    pub fn method_not_allowed<S: ToString>(str: S) -> Self {
        Self::MethodNotAllowed { method: str.to_string() }
    }

    pub fn unsupported_version<S: ToString>(str: S) -> Self {
        Self::UnsupportedVersion { version: str.to_string() }
    }

    pub fn malformed_header<S: ToString>(str: S) -> Self {
        Self::MalformedHeader { reason: str.to_string() }
    }

    pub fn empty_header_value<S: ToString>(str: S) -> Self {
        Self::EmptyHeaderValue { name: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn unsupported_content_type<S: ToString>(str: S) -> Self {
        Self::UnsupportedContentType { content_type: str.to_string() }
    }

    pub fn invalid_url<S: ToString>(str: S) -> Self {
        Self::InvalidUrl { reason: str.to_string() }
    }

    pub fn malformed_body<S: ToString>(str: S) -> Self {
        Self::MalformedBody { reason: str.to_string() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn too_large_body(length: u64, max_size: usize) -> Self {
        Self::TooLargeBody { length, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// The status code the rejection response carries for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequestLine { .. }
            | Self::MalformedHeader { .. }
            | Self::EmptyHeaderValue { .. }
            | Self::MissingHostHeader
            | Self::InvalidContentLength { .. }
            | Self::ConflictingBodyFraming
            | Self::InvalidUrl { .. }
            | Self::MalformedBody { .. }
            | Self::Io { .. } => StatusCode::BAD_REQUEST,

            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,

            Self::UnsupportedVersion { .. } => StatusCode::HTTP_VERSION_NOT_SUPPORTED,

            Self::ChunkedNotSupported | Self::UnsupportedContentType { .. } => StatusCode::NOT_IMPLEMENTED,

            Self::TooLargeHeader { .. } | Self::TooManyHeaders { .. } => StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE,

            Self::TooLargeBody { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
