//! Parse outcome and body framing types.
//!
//! [`ParseOutcome`] is what feeding bytes into the assembler yields: either
//! the parser needs more bytes, or it reached a terminal outcome, a complete
//! [`Request`] or a [`Rejection`]. [`BodyPlan`] carries the framing decision
//! made at the end of the header block into the body stage.

use http::StatusCode;

use crate::protocol::{ParseError, Request};

/// Result of advancing the parser with newly arrived bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The buffered bytes do not complete the current stage yet.
    NeedMoreData,
    /// A complete request was assembled.
    Request(Request),
    /// The request was refused; the connection should answer and close.
    Reject(Rejection),
}

impl ParseOutcome {
    pub fn is_need_more_data(&self) -> bool {
        matches!(self, Self::NeedMoreData)
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Self::Reject(_))
    }

    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Self::Request(request) => Some(request),
            _ => None,
        }
    }

    pub fn as_reject(&self) -> Option<&Rejection> {
        match self {
            Self::Reject(rejection) => Some(rejection),
            _ => None,
        }
    }

    pub fn into_request(self) -> Option<Request> {
        match self {
            Self::Request(request) => Some(request),
            _ => None,
        }
    }
}

/// A refused request: the status to answer with and a human readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    status: StatusCode,
    reason: String,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<&ParseError> for Rejection {
    fn from(error: &ParseError) -> Self {
        Self { status: error.status_code(), reason: error.to_string() }
    }
}

/// Body framing fixed at the end of the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPlan {
    /// No body follows the header block.
    Empty,
    /// `length` bytes of `application/x-www-form-urlencoded` data.
    Urlencoded { length: u64 },
    /// `length` bytes of `multipart/form-data` with the given boundary.
    Multipart { length: u64, boundary: String },
}

impl BodyPlan {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Declared body length in bytes.
    pub fn length(&self) -> u64 {
        match self {
            Self::Empty => 0,
            Self::Urlencoded { length } | Self::Multipart { length, .. } => *length,
        }
    }
}
