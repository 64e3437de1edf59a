//! HTTP request types.
//!
//! [`RequestHead`] is everything known once the header block is complete:
//! method, absolute url, version and headers. [`Request`] attaches the
//! decoded body fields and the consumed byte count once the body stage
//! finished too. Both are immutable snapshots, cloning is cheap enough for
//! handing them across tasks.

use http::Uri;

use crate::protocol::{FormData, HeaderMap, Method, Version};

/// Head of a parsed request: everything before the body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestHead {
    method: Method,
    url: Uri,
    version: Version,
    headers: HeaderMap,
}

impl RequestHead {
    pub(crate) fn new(method: Method, url: Uri, version: Version, headers: HeaderMap) -> Self {
        Self { method, url, version, headers }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The absolute request url, resolved against the `Host` header for
    /// origin-form targets.
    pub fn url(&self) -> &Uri {
        &self.url
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn into_request(self, form: FormData, raw_len: usize) -> Request {
        Request { head: self, form, raw_len }
    }
}

/// A fully parsed request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    head: RequestHead,
    form: FormData,
    raw_len: usize,
}

impl Request {
    pub fn method(&self) -> Method {
        self.head.method
    }

    pub fn url(&self) -> &Uri {
        &self.head.url
    }

    pub fn path(&self) -> &str {
        self.head.url.path()
    }

    pub fn version(&self) -> Version {
        self.head.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    /// The decoded body fields, empty for bodyless requests.
    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// Total bytes this request consumed from the stream: request line,
    /// header block and body, CRLFs included.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }
}
