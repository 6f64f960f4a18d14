//! HTTP request and response values exchanged with the transport.
//!
//! # Design
//! Requests and responses are plain data. `IgdbClient::build_*` methods
//! produce an `HttpRequest` with the query string already encoded into
//! `url`; a `Transport` (or the caller, when driving the round-trip by
//! hand) turns it into an `HttpResponse` that `parse_*` methods decode.
//! Every call the API accepts is a `GET`, so no method field is carried.
//!
//! All fields use owned types so values can be stored, logged and replayed
//! in tests without lifetime concerns.

/// A `GET` request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// A response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

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
            url: "http://localhost/games/".to_string(),
            headers: vec![("user-key".to_string(), "k".to_string())],
        };
        assert_eq!(req.header("User-Key"), Some("k"));
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(HttpResponse::new(200, "[]").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
