use crate::http::HttpMethod;
use crate::http::headers::{HeaderSource, HttpHeaders};

/// Headers the parser and the detection code read by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestHeader {
    Host,
    UserAgent,
    AcceptEncoding,
}

impl RequestHeader {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestHeader::Host => "Host",
            RequestHeader::UserAgent => "User-Agent",
            RequestHeader::AcceptEncoding => "Accept-Encoding",
        }
    }
}

/// The head of an HTTP request: everything device detection looks at.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub http_version: (u8, u8),

    pub headers: HttpHeaders,
}

impl Default for HttpRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRequest {
    pub fn new() -> Self {
        Self {
            method: HttpMethod::Unknown,
            uri: String::new(),
            http_version: (0, 0),
            headers: HttpHeaders::new(),
        }
    }

    /// Convenience constructor for a `GET /` carrying `headers`.
    pub fn with_headers(headers: HttpHeaders) -> Self {
        Self {
            method: HttpMethod::Get,
            uri: "/".to_string(),
            http_version: (1, 1),
            headers,
        }
    }

    pub fn known_header(&self, h: RequestHeader) -> Option<&str> {
        self.headers.get(h.as_str())
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.known_header(RequestHeader::UserAgent)
    }
}

impl HeaderSource for HttpRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }
}
