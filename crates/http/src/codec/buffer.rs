//! Byte accumulation primitives shared by the decoder stages.
//!
//! Bytes are appended at the tail of a [`BytesMut`] and only ever leave from
//! the head, and only when a stage fully commits: a whole CRLF terminated
//! line, or exactly the declared number of body bytes. Committed bytes are
//! split off and frozen, so no stage can re-examine them.

use bytes::{Buf, Bytes, BytesMut};

/// Extracts CRLF terminated lines from the head of a buffer.
///
/// The scanner remembers how far the last unsuccessful search got, so a
/// line arriving one byte at a time is not rescanned from the start on
/// every append. A bare LF does not terminate a line.
#[derive(Debug, Default)]
pub(crate) struct LineScanner {
    scanned: usize,
}

impl LineScanner {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    /// Takes the next line without its CRLF, consuming line and CRLF from
    /// the head. Returns `None` and leaves the buffer untouched when no
    /// complete line is buffered yet.
    pub(crate) fn take_line(&mut self, src: &mut BytesMut) -> Option<Bytes> {
        // Step one back in case the previous scan ended on a '\r' that now
        // pairs with a freshly arrived '\n'.
        let start = self.scanned.saturating_sub(1);
        match src[start..].windows(2).position(|window| window == b"\r\n") {
            Some(position) => {
                let line = src.split_to(start + position).freeze();
                src.advance(2);
                self.scanned = 0;
                Some(line)
            }
            None => {
                self.scanned = src.len();
                None
            }
        }
    }

    pub(crate) fn reset(&mut self) {
        self.scanned = 0;
    }
}

/// Takes exactly `length` bytes from the head once they are all buffered.
pub(crate) fn take_exact(src: &mut BytesMut, length: usize) -> Option<Bytes> {
    if src.len() < length {
        return None;
    }
    Some(src.split_to(length).freeze())
}
