//! HTTP header decoder implementation for parsing HTTP request heads
//!
//! This module consumes the request line and header block line by line and
//! turns them into a typed [`RequestHead`] plus the [`BodyPlan`] for the
//! body stage. Parsing is strict: every refusal maps to one variant of the
//! error taxonomy and therefore to one status code.
//!
//! # Per line rules
//!
//! - a header line without a colon is malformed (400)
//! - the name is the text before the first colon, trailing whitespace
//!   trimmed; the value is the text after it, surrounding whitespace
//!   trimmed
//! - a value that is empty after trimming is refused (400)
//! - duplicate names are first-wins, later occurrences are dropped
//!
//! # End of block rules, in order
//!
//! 1. `Host` must be present (400)
//! 2. `Content-Length` and `Transfer-Encoding` together are conflicting
//!    framing (400); `Transfer-Encoding` alone is unsupported chunked
//!    framing (501)
//! 3. the target is resolved into an absolute url (400 on failure)
//! 4. with a non-zero length, the `Content-Type` selects the body decoder;
//!    unknown or missing types are refused (501)
//!
//! # Limits
//!
//! The configured head size cap is enforced against partial data too, so a
//! peer cannot grow the buffer indefinitely by never sending the empty
//! line.

use bytes::BytesMut;
use http::Uri;
use mime::Mime;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::buffer::LineScanner;
use crate::codec::header::request_line::{RequestLine, parse_request_line};
use crate::codec::limits::Limits;
use crate::protocol::{BodyPlan, Header, HeaderMap, Method, ParseError, RequestHead, Version};
use crate::ensure;

/// Decoder for the request line and header block implementing [`Decoder`].
///
/// Yields the typed head together with the body framing decision. After a
/// successful decode the decoder is re-armed for the next request head.
pub struct HeaderDecoder {
    limits: Limits,
    scanner: LineScanner,
    partial: Option<PartialHead>,
    head_bytes: usize,
}

impl HeaderDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits, scanner: LineScanner::new(), partial: None, head_bytes: 0 }
    }

    /// Drops any partially parsed head.
    pub(crate) fn reset(&mut self) {
        self.scanner.reset();
        self.partial = None;
        self.head_bytes = 0;
    }
}

impl Decoder for HeaderDecoder {
    type Item = (RequestHead, BodyPlan);
    type Error = ParseError;

    /// Attempts to decode a request head from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((head, plan)))` if the head is complete and valid
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the request must be refused
    ///
    /// After an error the decoder state is undefined until `reset` is
    /// called.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let Some(line) = self.scanner.take_line(src) else {
                // the cap counts consumed head bytes plus whatever is
                // buffered without a line terminator yet
                ensure!(
                    self.head_bytes + src.len() <= self.limits.max_head_bytes(),
                    ParseError::too_large_header(self.head_bytes + src.len(), self.limits.max_head_bytes())
                );
                return Ok(None);
            };
            self.head_bytes += line.len() + 2;
            ensure!(
                self.head_bytes <= self.limits.max_head_bytes(),
                ParseError::too_large_header(self.head_bytes, self.limits.max_head_bytes())
            );

            match self.partial.take() {
                None => {
                    let request_line = parse_request_line(&line)?;
                    trace!(method = %request_line.method, target = %request_line.target, "parsed request line");
                    self.partial = Some(PartialHead::new(request_line));
                }
                Some(mut partial) => {
                    if line.is_empty() {
                        let item = partial.finish(&self.limits)?;
                        trace!(head_size = self.head_bytes, headers = item.0.headers().len(), "parsed request head");
                        self.head_bytes = 0;
                        return Ok(Some(item));
                    }
                    partial.header_line(&line, &self.limits)?;
                    self.partial = Some(partial);
                }
            }
        }
    }
}

/// A head being accumulated, between the request line and the empty line.
#[derive(Debug)]
struct PartialHead {
    method: Method,
    target: String,
    version: Version,
    headers: HeaderMap,
    content_length: Option<u64>,
    has_transfer_encoding: bool,
    content_type: Option<Mime>,
}

impl PartialHead {
    fn new(request_line: RequestLine) -> Self {
        Self {
            method: request_line.method,
            target: request_line.target,
            version: request_line.version,
            headers: HeaderMap::new(),
            content_length: None,
            has_transfer_encoding: false,
            content_type: None,
        }
    }

    /// Parses one non-empty header line and applies its side effects.
    fn header_line(&mut self, line: &[u8], limits: &Limits) -> Result<(), ParseError> {
        let line = std::str::from_utf8(line).map_err(|_| ParseError::malformed_header("header line is not valid utf-8"))?;
        ensure!(
            !line.starts_with(' ') && !line.starts_with('\t'),
            ParseError::malformed_header("obsolete line folding is not supported")
        );

        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::malformed_header(format!("no colon in header line {line:?}")));
        };
        let name = name.trim_end();
        ensure!(!name.is_empty(), ParseError::malformed_header("empty header name"));
        let value = value.trim();
        ensure!(!value.is_empty(), ParseError::empty_header_value(name));

        ensure!(
            self.headers.len() < limits.max_headers() || self.headers.contains(name),
            ParseError::too_many_headers(limits.max_headers())
        );

        if !self.headers.insert(Header::new(name, value)) {
            trace!(name, "dropped duplicate header");
            return Ok(());
        }

        if name.eq_ignore_ascii_case("content-length") {
            let length =
                value.parse::<u64>().map_err(|_| ParseError::invalid_content_length(format!("value {value} is not u64")))?;
            self.content_length = Some(length);
        } else if name.eq_ignore_ascii_case("transfer-encoding") {
            self.has_transfer_encoding = true;
        } else if name.eq_ignore_ascii_case("content-type") {
            self.content_type = value.parse::<Mime>().ok();
        }
        Ok(())
    }

    /// Runs the end-of-block checks and builds the typed head.
    fn finish(self, limits: &Limits) -> Result<(RequestHead, BodyPlan), ParseError> {
        let Some(host) = self.headers.get("host") else {
            return Err(ParseError::MissingHostHeader);
        };

        let length = match (self.content_length, self.has_transfer_encoding) {
            (Some(_), true) => return Err(ParseError::ConflictingBodyFraming),
            (None, true) => return Err(ParseError::ChunkedNotSupported),
            (Some(length), false) => length,
            (None, false) => 0,
        };
        ensure!(length <= limits.max_body_bytes() as u64, ParseError::too_large_body(length, limits.max_body_bytes()));

        let url = build_url(host, &self.target)?;
        let plan = self.body_plan(length)?;

        let head = RequestHead::new(self.method, url, self.version, self.headers);
        Ok((head, plan))
    }

    fn body_plan(&self, length: u64) -> Result<BodyPlan, ParseError> {
        if length == 0 {
            return Ok(BodyPlan::Empty);
        }
        match &self.content_type {
            Some(mime) if mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED => {
                Ok(BodyPlan::Urlencoded { length })
            }
            Some(mime) if mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA => {
                let boundary = mime
                    .get_param(mime::BOUNDARY)
                    .ok_or_else(|| ParseError::malformed_body("multipart content type without boundary parameter"))?;
                ensure!(!boundary.as_str().is_empty(), ParseError::malformed_body("empty multipart boundary"));
                Ok(BodyPlan::Multipart { length, boundary: boundary.as_str().to_string() })
            }
            _ => Err(ParseError::unsupported_content_type(self.headers.get("content-type").unwrap_or("<missing>"))),
        }
    }
}

/// Resolves the request target into an absolute url.
///
/// Absolute-form targets are parsed directly, origin-form targets are
/// joined with the `Host` header. Anything else, including authority-form
/// and asterisk-form targets, is refused.
fn build_url(host: &str, target: &str) -> Result<Uri, ParseError> {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.parse::<Uri>().map_err(|e| ParseError::invalid_url(e.to_string()));
    }
    ensure!(
        target.starts_with('/'),
        ParseError::invalid_url(format!("request target {target:?} is neither absolute nor origin form"))
    );
    format!("http://{host}{target}").parse::<Uri>().map_err(|e| ParseError::invalid_url(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use indoc::indoc;

    fn buffer_of(text: &str) -> BytesMut {
        BytesMut::from(text.replace('\n', "\r\n").as_bytes())
    }

    fn decode(text: &str) -> Result<Option<(RequestHead, BodyPlan)>, ParseError> {
        let mut buffer = buffer_of(text);
        HeaderDecoder::new(Limits::default()).decode(&mut buffer)
    }

    fn rejected_with(text: &str) -> StatusCode {
        decode(text).unwrap_err().status_code()
    }

    #[test]
    fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        123"##};

        let mut buffer = buffer_of(str);
        let mut decoder = HeaderDecoder::new(Limits::default());
        let (head, plan) = decoder.decode(&mut buffer).unwrap().unwrap();

        assert!(plan.is_empty());
        assert_eq!(head.method(), Method::Get);
        assert_eq!(head.version(), Version::Http11);
        assert_eq!(head.url().host(), Some("127.0.0.1"));
        assert_eq!(head.url().port_u16(), Some(8080));
        assert_eq!(head.url().path(), "/index.html");

        assert_eq!(head.headers().len(), 3);
        assert_eq!(head.headers().get("host"), Some("127.0.0.1:8080"));
        assert_eq!(head.headers().get("user-agent"), Some("curl/7.79.1"));
        assert_eq!(head.headers().get("accept"), Some("*/*"));

        // body bytes stay in the buffer for the next stage
        assert_eq!(buffer.as_ref(), b"123");
    }

    #[test]
    fn needs_more_data_until_empty_line() {
        let mut buffer = buffer_of("GET / HTTP/1.1\nHost: example.com\n");
        let mut decoder = HeaderDecoder::new(Limits::default());

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        buffer.extend_from_slice(b"Accept: */*\r\n");
        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        buffer.extend_from_slice(b"\r\n");
        let (head, _) = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(head.headers().len(), 2);
    }

    #[test]
    fn origin_form_joins_host() {
        let (head, _) = decode("GET /foo?x=1 HTTP/1.1\nHost: example.com\n\n").unwrap().unwrap();
        assert_eq!(head.url().to_string(), "http://example.com/foo?x=1");
    }

    #[test]
    fn absolute_form_is_used_verbatim() {
        let (head, _) = decode("GET https://other.example/p HTTP/1.1\nHost: example.com\n\n").unwrap().unwrap();
        assert_eq!(head.url().scheme_str(), Some("https"));
        assert_eq!(head.url().host(), Some("other.example"));
        assert_eq!(head.url().path(), "/p");
    }

    #[test]
    fn authority_form_target_is_rejected() {
        assert_eq!(rejected_with("CONNECT example.com:443 HTTP/1.1\nHost: example.com\n\n"), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_host_is_400() {
        assert_eq!(rejected_with("GET / HTTP/1.1\nAccept: */*\n\n"), StatusCode::BAD_REQUEST);
        let error = decode("GET / HTTP/1.1\n\n").unwrap_err();
        assert!(matches!(error, ParseError::MissingHostHeader));
    }

    #[test]
    fn header_without_colon_is_400() {
        assert_eq!(rejected_with("GET / HTTP/1.1\nHost example.com\n\n"), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_header_value_is_400() {
        let error = decode("GET / HTTP/1.1\nHost: example.com\nAccept:   \n\n").unwrap_err();
        assert!(matches!(error, ParseError::EmptyHeaderValue { .. }));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn value_whitespace_is_trimmed() {
        let (head, _) = decode("GET / HTTP/1.1\nHost:   example.com  \nX-Pad:\tpadded\t\n\n").unwrap().unwrap();
        assert_eq!(head.headers().get("host"), Some("example.com"));
        assert_eq!(head.headers().get("x-pad"), Some("padded"));
    }

    #[test]
    fn duplicate_headers_first_wins() {
        let (head, plan) = decode(indoc! {"
            POST / HTTP/1.1
            Host: first.example
            Host: second.example
            Content-Type: application/x-www-form-urlencoded
            Content-Length: 5
            Content-Length: 999

        "})
        .unwrap()
        .unwrap();

        assert_eq!(head.headers().get("host"), Some("first.example"));
        assert_eq!(head.url().host(), Some("first.example"));
        assert_eq!(plan, BodyPlan::Urlencoded { length: 5 });
    }

    #[test]
    fn invalid_content_length_is_400() {
        assert_eq!(
            rejected_with("POST / HTTP/1.1\nHost: x\nContent-Length: five\n\n"),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            rejected_with("POST / HTTP/1.1\nHost: x\nContent-Length: -5\n\n"),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn conflicting_framing_is_400_regardless_of_order() {
        let first = decode(indoc! {"
            POST / HTTP/1.1
            Host: x
            Content-Length: 5
            Transfer-Encoding: chunked

        "})
        .unwrap_err();
        assert!(matches!(first, ParseError::ConflictingBodyFraming));
        assert_eq!(first.status_code(), StatusCode::BAD_REQUEST);

        let second = decode(indoc! {"
            POST / HTTP/1.1
            Host: x
            Transfer-Encoding: chunked
            Content-Length: 5

        "})
        .unwrap_err();
        assert!(matches!(second, ParseError::ConflictingBodyFraming));
    }

    #[test]
    fn transfer_encoding_alone_is_501() {
        let error = decode("POST / HTTP/1.1\nHost: x\nTransfer-Encoding: chunked\n\n").unwrap_err();
        assert!(matches!(error, ParseError::ChunkedNotSupported));
        assert_eq!(error.status_code(), StatusCode::NOT_IMPLEMENTED);

        // any transfer coding is refused, not just chunked
        let error = decode("POST / HTTP/1.1\nHost: x\nTransfer-Encoding: gzip\n\n").unwrap_err();
        assert!(matches!(error, ParseError::ChunkedNotSupported));
    }

    #[test]
    fn unknown_content_type_with_body_is_501() {
        let error = decode(indoc! {"
            POST / HTTP/1.1
            Host: x
            Content-Type: application/json
            Content-Length: 2

        "})
        .unwrap_err();
        assert!(matches!(error, ParseError::UnsupportedContentType { .. }));
        assert_eq!(error.status_code(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn missing_content_type_with_body_is_501() {
        let error = decode("POST / HTTP/1.1\nHost: x\nContent-Length: 2\n\n").unwrap_err();
        assert!(matches!(error, ParseError::UnsupportedContentType { .. }));
    }

    #[test]
    fn zero_length_skips_content_type_strategy() {
        let (_, plan) = decode(indoc! {"
            POST / HTTP/1.1
            Host: x
            Content-Type: application/json
            Content-Length: 0

        "})
        .unwrap()
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn multipart_plan_extracts_boundary() {
        let (_, plan) = decode(indoc! {"
            POST /upload HTTP/1.1
            Host: x
            Content-Type: multipart/form-data; boundary=xYzZY
            Content-Length: 96

        "})
        .unwrap()
        .unwrap();
        assert_eq!(plan, BodyPlan::Multipart { length: 96, boundary: "xYzZY".to_string() });
    }

    #[test]
    fn multipart_without_boundary_is_400() {
        let error = decode(indoc! {"
            POST /upload HTTP/1.1
            Host: x
            Content-Type: multipart/form-data
            Content-Length: 96

        "})
        .unwrap_err();
        assert!(matches!(error, ParseError::MalformedBody { .. }));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn head_over_limit_is_431_even_while_partial() {
        let limits = Limits::default().with_max_head_bytes(64);
        let mut decoder = HeaderDecoder::new(limits);

        // no line terminator at all, just a growing buffer
        let mut buffer = BytesMut::from(vec![b'a'; 100].as_slice());
        let error = decoder.decode(&mut buffer).unwrap_err();
        assert!(matches!(error, ParseError::TooLargeHeader { .. }));
        assert_eq!(error.status_code(), StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE);
    }

    #[test]
    fn too_many_headers_is_431() {
        let limits = Limits::default().with_max_headers(2);
        let mut buffer = buffer_of("GET / HTTP/1.1\nHost: x\nA: 1\nB: 2\n\n");
        let error = HeaderDecoder::new(limits).decode(&mut buffer).unwrap_err();
        assert!(matches!(error, ParseError::TooManyHeaders { .. }));
    }

    #[test]
    fn declared_body_over_limit_is_413() {
        let limits = Limits::default().with_max_body_bytes(16);
        let mut buffer = buffer_of(indoc! {"
            POST / HTTP/1.1
            Host: x
            Content-Type: application/x-www-form-urlencoded
            Content-Length: 64

        "});
        let error = HeaderDecoder::new(limits).decode(&mut buffer).unwrap_err();
        assert!(matches!(error, ParseError::TooLargeBody { .. }));
        assert_eq!(error.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn obsolete_line_folding_is_400() {
        assert_eq!(rejected_with("GET / HTTP/1.1\nHost: x\n folded\n\n"), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn decoder_rearms_after_complete_head() {
        let mut decoder = HeaderDecoder::new(Limits::default());

        let mut buffer = buffer_of("GET /a HTTP/1.1\nHost: x\n\n");
        assert!(decoder.decode(&mut buffer).unwrap().is_some());

        let mut buffer = buffer_of("GET /b HTTP/1.1\nHost: x\n\n");
        let (head, _) = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(head.url().path(), "/b");
    }
}
