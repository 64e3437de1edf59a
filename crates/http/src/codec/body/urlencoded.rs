//! Form decoding for `application/x-www-form-urlencoded` bodies
//!
//! The body is a sequence of `name=value` pairs separated by `&`. Within a
//! pair, `+` stands for a space and `%XX` for the byte with hex value `XX`.
//! Decoding is total: a pair without `=` becomes a field with an empty value,
//! an escape that is not followed by two hex digits is kept literally, and
//! empty segments are skipped.

use bytes::Bytes;

use crate::protocol::{FormData, FormField};

/// Decodes a complete urlencoded body into form fields, in body order.
pub(crate) fn decode(bytes: &[u8]) -> FormData {
    let mut form = FormData::new();
    for pair in bytes.split(|byte| *byte == b'&') {
        if pair.is_empty() {
            continue;
        }
        let (name, value) = match pair.iter().position(|byte| *byte == b'=') {
            Some(position) => (&pair[..position], &pair[position + 1..]),
            None => (pair, &[] as &[u8]),
        };
        let name = String::from_utf8_lossy(&percent_decode(name)).into_owned();
        let value = Bytes::from(percent_decode(value));
        form.push(FormField::new(name, value));
    }
    form
}

fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'+' => {
                output.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < input.len() => match (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                (Some(hi), Some(lo)) => {
                    output.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    output.push(b'%');
                    i += 1;
                }
            },
            byte => {
                output.push(byte);
                i += 1;
            }
        }
    }
    output
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
