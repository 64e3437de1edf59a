//! HTTP request decoder module
//!
//! This module provides functionality for decoding HTTP requests using a streaming approach.
//! It coordinates header parsing and body collection through a state machine pattern and
//! yields one complete [`Request`] per decoded message.
//!
//! # Components
//!
//! - [`RequestDecoder`]: Main decoder that coordinates header and body parsing
//! - Header parsing: Uses [`HeaderDecoder`] for the request line and header block
//! - Body handling: Uses [`BodyDecoder`] to collect and decode the body if any
//!
//! # Example
//!
//! ```no_run
//! use drip_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::new();
//! // ... add request data to buffer ...
//! let result = decoder.decode(&mut buffer);
//! ```

use crate::codec::body::BodyDecoder;
use crate::codec::header::HeaderDecoder;
use crate::codec::limits::Limits;
use crate::protocol::{ParseError, Request, RequestHead};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for HTTP requests that handles both the head and the body
///
/// The decoder operates in two phases:
/// 1. Head parsing: Decodes the request line and headers using [`HeaderDecoder`]
/// 2. Body parsing: Collects and decodes the declared body using [`BodyDecoder`]
///
/// # State Machine
///
/// The decoder maintains its state through the `body` field:
/// - `None`: Currently parsing the head
/// - `Some(_)`: Head complete, currently collecting the body
///
/// After yielding a request the decoder re-arms itself, so pipelined
/// requests on the same buffer decode back to back.
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    body: Option<(RequestHead, BodyDecoder)>,
    consumed: usize,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance with default limits
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a new `RequestDecoder` instance with the given limits
    pub fn with_limits(limits: Limits) -> Self {
        Self { header_decoder: HeaderDecoder::new(limits), body: None, consumed: 0 }
    }

    /// Drops any partially decoded request.
    pub(crate) fn reset(&mut self) {
        self.header_decoder.reset();
        self.body = None;
        self.consumed = 0;
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_limits(Limits::default())
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode an HTTP request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: Successfully decoded a complete request
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    ///
    /// The returned request records how many raw bytes it occupied on the
    /// wire, line terminators included.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            // collect the body if the head is already complete
            if let Some((head, decoder)) = self.body.take() {
                let before = src.len();
                match decoder.decode(src)? {
                    Some(form) => {
                        self.consumed += before - src.len();
                        let raw_len = std::mem::take(&mut self.consumed);
                        return Ok(Some(head.into_request(form, raw_len)));
                    }
                    None => {
                        self.body = Some((head, decoder));
                        return Ok(None);
                    }
                }
            }

            let before = src.len();
            let decoded = self.header_decoder.decode(src)?;
            self.consumed += before - src.len();
            match decoded {
                Some((head, plan)) => {
                    self.body = Some((head, BodyDecoder::new(plan)));
                    // loop back into the body stage on the same buffer
                }
                None => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Method;
    use indoc::indoc;

    fn buffer_of(text: &str) -> BytesMut {
        BytesMut::from(text.replace('\n', "\r\n").as_bytes())
    }

    #[test]
    fn get_request_without_body() {
        let text = "GET /idx HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let mut buffer = BytesMut::from(text.as_bytes());
        let request = RequestDecoder::new().decode(&mut buffer).unwrap().unwrap();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), "/idx");
        assert!(request.form().is_empty());
        assert_eq!(request.raw_len(), text.len());
        assert!(buffer.is_empty());
    }

    #[test]
    fn post_request_with_urlencoded_body() {
        let text = indoc! {"
            POST /submit HTTP/1.1
            Host: example.com
            Content-Type: application/x-www-form-urlencoded
            Content-Length: 9

            "};
        let mut buffer = buffer_of(text);
        buffer.extend_from_slice(b"a=1&b=two");
        let total = buffer.len();

        let mut decoder = RequestDecoder::new();
        let request = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.form().get("a").unwrap().value_str(), "1");
        assert_eq!(request.form().get("b").unwrap().value_str(), "two");
        assert_eq!(request.raw_len(), total);
    }

    #[test]
    fn body_split_across_reads() {
        let mut decoder = RequestDecoder::new();
        let mut buffer = buffer_of(indoc! {"
            POST / HTTP/1.1
            Host: x
            Content-Type: application/x-www-form-urlencoded
            Content-Length: 7

            "});

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        buffer.extend_from_slice(b"a=1&");
        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        buffer.extend_from_slice(b"b=2");
        let request = decoder.decode(&mut buffer).unwrap().unwrap();

        assert_eq!(request.form().len(), 2);
    }

    #[test]
    fn pipelined_requests_decode_back_to_back() {
        let mut buffer = buffer_of("GET /a HTTP/1.1\nHost: x\n\nGET /b HTTP/1.1\nHost: x\n\n");
        let mut decoder = RequestDecoder::new();

        let first = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(first.path(), "/a");
        let second = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(second.path(), "/b");
        assert!(buffer.is_empty());
    }

    #[test]
    fn raw_len_resets_between_requests() {
        let first_text = "GET /first HTTP/1.1\r\nHost: x\r\n\r\n";
        let second_text = "GET /2 HTTP/1.1\r\nHost: x\r\n\r\n";
        let mut buffer = BytesMut::from(first_text.as_bytes());
        buffer.extend_from_slice(second_text.as_bytes());

        let mut decoder = RequestDecoder::new();
        assert_eq!(decoder.decode(&mut buffer).unwrap().unwrap().raw_len(), first_text.len());
        assert_eq!(decoder.decode(&mut buffer).unwrap().unwrap().raw_len(), second_text.len());
    }

    #[test]
    fn parse_errors_surface() {
        let mut buffer = buffer_of("FOO / HTTP/1.1\nHost: x\n\n");
        assert!(matches!(
            RequestDecoder::new().decode(&mut buffer).unwrap_err(),
            ParseError::MethodNotAllowed { .. }
        ));
    }
}
