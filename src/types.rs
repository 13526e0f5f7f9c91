use axum::body::Bytes;
use axum::http::{HeaderMap, Method};

/// A slash-command callback as delivered by the HTTP layer.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IncomingRequest {
    pub fn new(method: Method, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            headers,
            body: body.into(),
        }
    }

    /// Returns a header value, treating empty or non-text values as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .filter(|v| !v.is_empty())
    }
}

/// An authenticated slash-command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-slack-signature", HeaderValue::from_static("v0=abc"));
        let request = IncomingRequest::new(Method::POST, headers, "");

        assert_eq!(request.header("X-Slack-Signature"), Some("v0=abc"));
        assert_eq!(request.header("X-SLACK-SIGNATURE"), Some("v0=abc"));
    }

    #[test]
    fn empty_header_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Slack-Request-Timestamp", HeaderValue::from_static(""));
        let request = IncomingRequest::new(Method::POST, headers, "text=foo");

        assert_eq!(request.header("X-Slack-Request-Timestamp"), None);
    }

    #[test]
    fn non_text_header_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Slack-Signature",
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );
        let request = IncomingRequest::new(Method::POST, headers, "text=foo");

        assert_eq!(request.header("X-Slack-Signature"), None);
    }
}
