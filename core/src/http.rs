//! HTTP transport types shared by the descriptor, the transport and the
//! completion handler.
//!
//! # Design
//! Requests and responses are plain data with owned fields. `HttpResponse`
//! is the transport-level response: status, headers and raw body bytes as
//! they came off the wire, with no body parsing applied.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    /// The method as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Produced by `RequestDescriptor::into_request` and handed to a
/// `Transport` for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// The transport-level response passed to a completion handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Final URL after any redirects the transport followed.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value matching `name`, compared ASCII case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Console rendering. The body is summarised by length, never decoded.
impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response {{ status: {}, ok: {}, url: {:?}, headers: {{",
            self.status,
            self.ok(),
            self.url
        )?;
        for (i, (key, value)) in self.headers.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {key:?}: {value:?}")?;
        }
        if !self.headers.is_empty() {
            f.write_str(" ")?;
        }
        write!(f, "}}, body: {} bytes }}", self.body.len())
    }
}
