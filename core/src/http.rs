//! HTTP transport types for the catalog client.
//!
//! # Design
//! Requests and responses are plain data. The dispatcher builds an
//! `HttpRequest`, hands it to a [`Transport`](crate::transport::Transport),
//! and parses the returned `HttpResponse`. Keeping the wire exchange as data
//! lets the build and parse halves be tested without a network.
//!
//! Every catalog call is a POST, so there is no method field.

/// Header carrying the entity token on every catalog call.
pub const ENTITY_TOKEN_HEADER: &str = "X-EntityToken";

/// An HTTP POST described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are ordinary responses here; only failures to reach the
/// server at all are transport errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            url: "http://localhost/Catalog/GetItem".to_string(),
            headers: vec![(ENTITY_TOKEN_HEADER.to_string(), "T".to_string())],
            body: "{}".to_string(),
        };
        assert_eq!(req.header("x-entitytoken"), Some("T"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let redirect = HttpResponse { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}
