//! HTTP header encoder implementation for serializing HTTP response headers
//!
//! This module provides functionality for encoding the response status line and
//! header block into raw bytes. It guarantees the presence of the framing and
//! identification headers every response must carry.
//!
//! # Features
//!
//! - Efficient header serialization
//! - Automatic Content-Length, Content-Type and Server headers
//! - Refusal of header text that would break the line structure of the head
//!
//! All responses are serialized as HTTP/1.1.

use crate::protocol::{Response, SendError};
use crate::ensure;

use bytes::{BufMut, BytesMut};

use std::io;
use std::io::Write;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Value of the `Server` header added to responses that do not set their own.
const SERVER_VALUE: &str = concat!("drip-http/", env!("CARGO_PKG_VERSION"));

/// Encoder for the response status line and header block.
///
/// The encoder serializes the headers of a [`Response`] and appends the
/// mandatory headers the application did not set itself:
///
/// - `Content-Length` is always present, defaulting to the body size
/// - `Content-Type` defaults to `text/html; charset=UTF-8` when the body is
///   not empty
/// - `Server` defaults to the crate name and version
pub struct HeaderEncoder;

impl HeaderEncoder {
    /// Encodes the status line and header block into the provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::InvalidHeader`] if a header name is empty or if a
    /// name or value contains a carriage return or line feed.
    pub(crate) fn encode(&mut self, response: &Response, dst: &mut BytesMut) -> Result<(), SendError> {
        dst.reserve(INIT_HEADER_SIZE);
        write!(
            FastWrite(dst),
            "HTTP/1.1 {} {}\r\n",
            response.status().as_str(),
            response.status().canonical_reason().unwrap_or("Unknown")
        )?;

        let mut has_content_length = false;
        let mut has_content_type = false;
        let mut has_server = false;
        for header in response.headers().iter() {
            let name = header.name();
            ensure!(!name.is_empty(), SendError::invalid_header("empty header name"));
            ensure_header_text(name)?;
            has_content_length |= name.eq_ignore_ascii_case("content-length");
            has_content_type |= name.eq_ignore_ascii_case("content-type");
            has_server |= name.eq_ignore_ascii_case("server");

            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            for (index, value) in header.values().iter().enumerate() {
                ensure_header_text(value)?;
                if index > 0 {
                    dst.put_slice(b",");
                }
                dst.put_slice(value.as_bytes());
            }
            dst.put_slice(b"\r\n");
        }

        if !has_content_length {
            write!(FastWrite(dst), "Content-Length: {}\r\n", response.body().len())?;
        }
        if !has_content_type && !response.body().is_empty() {
            dst.put_slice(b"Content-Type: text/html; charset=UTF-8\r\n");
        }
        if !has_server {
            write!(FastWrite(dst), "Server: {SERVER_VALUE}\r\n")?;
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Refuses header text that would terminate a line early.
fn ensure_header_text(text: &str) -> Result<(), SendError> {
    ensure!(
        !text.contains(['\r', '\n']),
        SendError::invalid_header(format!("header text {text:?} contains a line break"))
    );
    Ok(())
}

/// Fast writer implementation for writing to BytesMut.
///
/// This is an optimization to avoid unnecessary bounds checking when writing
/// to the bytes buffer, since we've already reserved enough space.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    /// Writes a buffer into this writer, returning how many bytes were written.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    /// Flush this output stream, ensuring that all intermediately buffered contents reach their destination.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
