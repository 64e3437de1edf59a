//! Push-style request assembly over the streaming decoder
//!
//! This module provides functionality for assembling one request from bytes
//! that arrive in arbitrary slices, without owning the transport. Callers
//! feed whatever they have and get back a [`ParseOutcome`] telling them to
//! keep reading, to dispatch a complete request, or to answer a rejection.
//!
//! # Terminal outcomes
//!
//! Once a feed produced a request or a rejection, the assembler holds that
//! outcome and repeats it for every further feed. Later bytes cannot turn an
//! already refused request into an accepted one. [`reset`] starts the next
//! parse.
//!
//! # Example
//!
//! ```
//! use drip_http::codec::RequestAssembler;
//!
//! let mut assembler = RequestAssembler::new();
//! let outcome = assembler.feed(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
//! assert!(outcome.is_request());
//! ```
//!
//! [`reset`]: RequestAssembler::reset

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::debug;

use crate::codec::limits::Limits;
use crate::codec::request_decoder::RequestDecoder;
use crate::protocol::{ParseOutcome, Rejection};

/// Assembles one request at a time from incrementally fed bytes.
pub struct RequestAssembler {
    buffer: BytesMut,
    decoder: RequestDecoder,
    terminal: Option<ParseOutcome>,
}

impl RequestAssembler {
    /// Creates a new `RequestAssembler` instance with default limits
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a new `RequestAssembler` instance with the given limits
    pub fn with_limits(limits: Limits) -> Self {
        Self { buffer: BytesMut::new(), decoder: RequestDecoder::with_limits(limits), terminal: None }
    }

    /// Appends bytes and advances the parse as far as they allow.
    ///
    /// An empty slice is a valid feed and simply re-evaluates the current
    /// state. After a terminal outcome the fed bytes are ignored.
    pub fn feed(&mut self, bytes: &[u8]) -> ParseOutcome {
        if let Some(outcome) = &self.terminal {
            return outcome.clone();
        }

        self.buffer.extend_from_slice(bytes);
        match self.decoder.decode(&mut self.buffer) {
            Ok(Some(request)) => {
                let outcome = ParseOutcome::Request(request);
                self.terminal = Some(outcome.clone());
                outcome
            }
            Ok(None) => ParseOutcome::NeedMoreData,
            Err(error) => {
                debug!(cause = %error, "refusing request");
                let outcome = ParseOutcome::Reject(Rejection::from(&error));
                self.terminal = Some(outcome.clone());
                outcome
            }
        }
    }

    /// Prepares the assembler for the next request.
    ///
    /// Clears the terminal outcome together with any bytes fed beyond it.
    pub fn reset(&mut self) {
        self.terminal = None;
        self.decoder.reset();
        self.buffer.clear();
    }
}

impl Default for RequestAssembler {
    fn default() -> Self {
        Self::with_limits(Limits::default())
    }
}
