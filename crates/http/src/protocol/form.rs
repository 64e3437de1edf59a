//! Decoded form body representation.
//!
//! Both body formats decode into the same shape: an ordered list of named
//! fields. Values stay raw bytes so binary multipart uploads survive
//! untouched, [`FormField::value_str`] gives a lossy text view for the
//! common case. Repeated names are kept in order rather than collapsed.

use std::borrow::Cow;

use bytes::Bytes;
use mime::Mime;

/// One decoded field of a form body.
///
/// `filename` and `content_type` are only populated for multipart parts
/// that carried them.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    name: String,
    value: Bytes,
    filename: Option<String>,
    content_type: Option<Mime>,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self { name: name.into(), value: value.into(), filename: None, content_type: None }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: Mime) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Bytes {
        &self.value
    }

    /// Lossy text view of the value.
    pub fn value_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }
}

/// The ordered fields of a decoded request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Vec<FormField>,
}

impl FormData {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, field: FormField) {
        self.fields.push(field);
    }

    /// First field with this name. Field names compare case-sensitively.
    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// All fields with this name, in order.
    pub fn get_all(&self, name: &str) -> Vec<&FormField> {
        self.fields.iter().filter(|field| field.name == name).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }
}
