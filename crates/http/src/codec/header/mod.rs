//! HTTP header processing module for encoding and decoding heads
//!
//! This module provides functionality for the line-structured part of the
//! protocol: the request line and header block on the way in, the status line
//! and header block on the way out.
//!
//! # Components
//!
//! - [`HeaderDecoder`]: Decodes a request head from raw bytes
//!   - Parses the request line into typed method, target and version
//!   - Validates header lines and applies the duplicate policy
//!   - Runs the end-of-block checks and selects the body framing
//!   - Manages head size and header count limits
//!
//! - [`HeaderEncoder`]: Encodes a response head to bytes
//!   - Implements standard HTTP/1.1 header formatting
//!   - Adds the mandatory Content-Length, Content-Type and Server headers
//!   - Refuses header text containing line breaks

mod header_decoder;
mod header_encoder;
mod request_line;

pub use header_decoder::HeaderDecoder;
pub use header_encoder::HeaderEncoder;
