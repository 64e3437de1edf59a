//! HTTP response type.
//!
//! A response is a status code, a header collection and a fully buffered
//! body. The encoder fills in `Content-Length`, `Content-Type` and `Server`
//! when the application left them unset, and always serializes the status
//! line as HTTP/1.1.

use bytes::Bytes;
use http::StatusCode;

use crate::protocol::HeaderMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self { status, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Sets a header, replacing any previous value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_status_headers_and_body() {
        let response = Response::new(StatusCode::OK).with_header("Content-Type", "text/plain").with_body("hi");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("content-type"), Some("text/plain"));
        assert_eq!(response.body().as_ref(), b"hi");
    }

    #[test]
    fn with_header_replaces() {
        let response = Response::new(StatusCode::OK).with_header("X-A", "1").with_header("x-a", "2");
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers().get("X-A"), Some("2"));
    }
}
