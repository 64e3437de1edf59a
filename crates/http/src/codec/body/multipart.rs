//! Form decoding for `multipart/form-data` bodies
//!
//! A multipart body is a sequence of parts separated by a boundary delimiter
//! taken from the `Content-Type` header. Each part carries its own small
//! header block with at least a `Content-Disposition: form-data` line naming
//! the field, optionally a filename and a part content type.
//!
//! Unlike urlencoded decoding this one is fallible: a body that does not
//! follow the boundary structure is refused as malformed. Text after the
//! closing `--` delimiter is ignored.

use bytes::Bytes;
use mime::Mime;

use crate::protocol::{FormData, FormField, ParseError};
use crate::ensure;

/// Decodes a complete multipart body into form fields, in body order.
pub(crate) fn decode(bytes: &[u8], boundary: &str) -> Result<FormData, ParseError> {
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();
    let closing = [b"\r\n".as_slice(), delimiter].concat();

    let mut cursor = first_delimiter(bytes, delimiter)? + delimiter.len();
    let mut form = FormData::new();
    loop {
        // after a delimiter: either the final "--" or a CRLF and a part
        if bytes[cursor..].starts_with(b"--") {
            return Ok(form);
        }
        ensure!(
            bytes[cursor..].starts_with(b"\r\n"),
            ParseError::malformed_body("garbage after multipart boundary")
        );
        cursor += 2;

        let head_end = find(&bytes[cursor..], b"\r\n\r\n")
            .ok_or_else(|| ParseError::malformed_body("multipart part without header terminator"))?;
        let head = &bytes[cursor..cursor + head_end];
        cursor += head_end + 4;

        let body_end = find(&bytes[cursor..], &closing)
            .ok_or_else(|| ParseError::malformed_body("multipart part without closing boundary"))?;
        form.push(parse_part(head, &bytes[cursor..cursor + body_end])?);
        cursor += body_end + closing.len();
    }
}

/// Locates the first delimiter, which may omit the leading CRLF when the
/// body has no preamble.
fn first_delimiter(bytes: &[u8], delimiter: &[u8]) -> Result<usize, ParseError> {
    if bytes.starts_with(delimiter) {
        return Ok(0);
    }
    let needle = [b"\r\n".as_slice(), delimiter].concat();
    find(bytes, &needle)
        .map(|position| position + 2)
        .ok_or_else(|| ParseError::malformed_body("multipart body without first boundary"))
}

/// Parses one part, its header block already separated from its content.
fn parse_part(head: &[u8], body: &[u8]) -> Result<FormField, ParseError> {
    let head = std::str::from_utf8(head)
        .map_err(|_| ParseError::malformed_body("multipart part headers are not valid utf-8"))?;

    let mut disposition = None;
    let mut content_type = None;
    for line in head.split("\r\n") {
        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::malformed_body(format!("no colon in multipart part header {line:?}")));
        };
        let name = name.trim_end();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-disposition") {
            disposition = Some(value);
        } else if name.eq_ignore_ascii_case("content-type") {
            let mime = value.parse::<Mime>().map_err(|e| ParseError::malformed_body(e.to_string()))?;
            content_type = Some(mime);
        }
    }

    let Some(disposition) = disposition else {
        return Err(ParseError::malformed_body("multipart part without content disposition"));
    };
    ensure!(
        disposition.split(';').next().is_some_and(|kind| kind.trim().eq_ignore_ascii_case("form-data")),
        ParseError::malformed_body(format!("unsupported content disposition {disposition:?}"))
    );
    let Some(name) = disposition_param(disposition, "name") else {
        return Err(ParseError::malformed_body("multipart part without field name"));
    };

    let mut field = FormField::new(name, Bytes::copy_from_slice(body));
    if let Some(filename) = disposition_param(disposition, "filename") {
        field = field.with_filename(filename);
    }
    if let Some(content_type) = content_type {
        field = field.with_content_type(content_type);
    }
    Ok(field)
}

/// Extracts a `key=value` or `key="value"` parameter of the disposition.
fn disposition_param<'a>(disposition: &'a str, key: &str) -> Option<&'a str> {
    disposition.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim().eq_ignore_ascii_case(key).then(|| value.trim().trim_matches('"'))
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
