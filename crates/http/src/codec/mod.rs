//! HTTP codec module for encoding and decoding HTTP messages
//!
//! This module provides functionality for streaming HTTP message processing,
//! including request decoding and response encoding. It uses a state machine
//! pattern to process the head and the body of a request incrementally.
//!
//! # Architecture
//!
//! The codec module is organized into several components:
//!
//! - Request handling:
//!   - [`RequestAssembler`]: Push-style assembly with terminal outcomes
//!   - [`RequestDecoder`]: Decodes incoming HTTP requests
//!   - Header parsing via the `header` module
//!   - Body collection and form decoding via the `body` module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: Encodes outgoing HTTP responses
//!
//! - [`Limits`]: Caps on head size, header count and body size
//!
//! # Example
//!
//! ```no_run
//! use drip_http::codec::{RequestDecoder, ResponseEncoder};
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! // Decode incoming request
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::new();
//! let request = decoder.decode(&mut request_buffer);
//!
//! // Encode outgoing response
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! // ... encode response ...
//! ```
//!
//! # Features
//!
//! - Streaming processing of HTTP requests
//! - Content-Length based body handling
//! - Form decoding for urlencoded and multipart content
//! - Efficient header parsing and encoding
//! - Size limit enforcement

mod assembler;
mod body;
mod buffer;
mod header;
mod limits;
mod request_decoder;
mod response_encoder;

pub use assembler::RequestAssembler;
pub use limits::Limits;
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
