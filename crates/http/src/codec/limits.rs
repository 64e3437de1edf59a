//! Size limits for request parsing.
//!
//! Limits are plain data handed to the decoder at construction; there is no
//! global configuration. Exceeding a limit is a rejection with a 4xx status,
//! never a panic, and the head limit also applies while the header block is
//! still partial so a peer cannot grow the buffer without ever finishing.

/// Maximum size in bytes allowed for the request line plus header block
const MAX_HEAD_BYTES: usize = 8 * 1024;

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum declared body size in bytes
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Caps applied while parsing a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    max_head_bytes: usize,
    max_headers: usize,
    max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_head_bytes: MAX_HEAD_BYTES, max_headers: MAX_HEADER_NUM, max_body_bytes: MAX_BODY_BYTES }
    }
}

impl Limits {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_max_head_bytes(mut self, max_head_bytes: usize) -> Self {
        self.max_head_bytes = max_head_bytes;
        self
    }

    pub fn with_max_headers(mut self, max_headers: usize) -> Self {
        self.max_headers = max_headers;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn max_head_bytes(&self) -> usize {
        self.max_head_bytes
    }

    pub fn max_headers(&self) -> usize {
        self.max_headers
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}
