//! Header and header collection types.
//!
//! Names keep the case the peer sent them in, lookups compare
//! ASCII-case-insensitively. A header owns an ordered value list: the first
//! entry is the primary value, any further entries are secondary values the
//! response path attaches, serialized comma separated on one line. Request
//! parsing never splits incoming values on commas; [`Header::split_values`]
//! exposes the comma separated elements for headers like `Accept-Encoding`.

/// A single header with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    // invariant: never empty
    values: Vec<String>,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), values: vec![value.into()] }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The primary (first) value.
    pub fn value(&self) -> &str {
        &self.values[0]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Attaches a secondary value.
    pub fn push_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Splits all values on commas and trims the elements, dropping empty
    /// ones. Useful for list-valued headers such as `Accept-Encoding`.
    pub fn split_values(&self) -> Vec<&str> {
        self.values.iter().flat_map(|value| value.split(',')).map(str::trim).filter(|element| !element.is_empty()).collect()
    }
}

/// An insertion-ordered header collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: Vec<Header>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter()
    }

    /// Primary value of the first header with this name, case-insensitive.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_header(name).map(Header::value)
    }

    pub fn get_header(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|header| header.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// Inserts a header unless one with the same name already exists.
    /// The first occurrence wins, returns whether the header was stored.
    pub fn insert(&mut self, header: Header) -> bool {
        if self.contains(header.name()) {
            return false;
        }
        self.headers.push(header);
        true
    }

    /// Replaces the header with this name, or appends a new one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.headers.iter_mut().find(|header| header.name.eq_ignore_ascii_case(&name)) {
            Some(header) => header.values = vec![value.into()],
            None => self.headers.push(Header::new(name, value)),
        }
    }

    /// Attaches a secondary value to the header with this name, or appends
    /// a new header when none exists yet.
    pub fn append_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.headers.iter_mut().find(|header| header.name.eq_ignore_ascii_case(&name)) {
            Some(header) => header.push_value(value),
            None => self.headers.push(Header::new(name, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_case_preserving() {
        let mut headers = HeaderMap::new();
        headers.insert(Header::new("X-Custom-Header", "abc"));

        assert_eq!(headers.get("x-custom-header"), Some("abc"));
        assert_eq!(headers.get("X-CUSTOM-HEADER"), Some("abc"));
        assert_eq!(headers.get_header("x-custom-header").unwrap().name(), "X-Custom-Header");
        assert_eq!(headers.get("x-other"), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let mut headers = HeaderMap::new();
        assert!(headers.insert(Header::new("Accept", "text/html")));
        assert!(!headers.insert(Header::new("accept", "application/json")));

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Accept"), Some("text/html"));
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut headers = HeaderMap::new();
        headers.insert(Header::new("Host", "example.com"));
        headers.insert(Header::new("Accept", "*/*"));
        headers.insert(Header::new("User-Agent", "curl/7.79.1"));

        let names: Vec<&str> = headers.iter().map(Header::name).collect();
        assert_eq!(names, vec!["Host", "Accept", "User-Agent"]);
    }

    #[test]
    fn set_replaces_and_append_value_extends() {
        let mut headers = HeaderMap::new();
        headers.set("Cache-Control", "no-cache");
        headers.set("cache-control", "max-age=0");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Cache-Control"), Some("max-age=0"));

        headers.append_value("Vary", "Accept");
        headers.append_value("vary", "Accept-Encoding");
        let vary = headers.get_header("Vary").unwrap();
        assert_eq!(vary.values(), &["Accept".to_string(), "Accept-Encoding".to_string()]);
        assert_eq!(vary.value(), "Accept");
    }

    #[test]
    fn split_values_crosses_value_boundaries() {
        let mut header = Header::new("Accept-Encoding", "gzip, deflate");
        header.push_value("br");
        assert_eq!(header.split_values(), vec!["gzip", "deflate", "br"]);
    }
}
