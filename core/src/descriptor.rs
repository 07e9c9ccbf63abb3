//! Immutable description of the one request to issue.
//!
//! # Design
//! `RequestDescriptor` has no public fields and no setters. It can only be
//! produced by `RequestDescriptorBuilder::build`, which validates every part
//! up front, and `RequestInvoker::dispatch` takes it by value, so nothing can
//! change it once the call is issued.

use ureq::http::header::{HeaderName, HeaderValue};
use ureq::http::Uri;

use crate::error::InvokeError;
use crate::http::{HttpMethod, HttpRequest};

/// Header carrying the caller identity expected by the backend.
pub const USER_ID_HEADER: &str = "user_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    endpoint: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Start a descriptor for `endpoint`. The method defaults to `GET`.
    pub fn builder(endpoint: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder {
            endpoint: endpoint.into(),
            method: HttpMethod::Get,
            headers: Vec::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Headers in insertion order, with the casing they were given.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Lower to a plain request. Descriptors never carry a body.
    pub fn into_request(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.endpoint,
            headers: self.headers,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestDescriptorBuilder {
    endpoint: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
}

impl RequestDescriptorBuilder {
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set a header. A name already present (ignoring ASCII case) keeps its
    /// position and takes the new value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn build(self) -> Result<RequestDescriptor, InvokeError> {
        validate_endpoint(&self.endpoint)?;
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                InvokeError::InvalidDescriptor(format!("invalid header name: {name:?}"))
            })?;
            HeaderValue::from_str(value).map_err(|_| {
                InvokeError::InvalidDescriptor(format!("invalid value for header {name}"))
            })?;
        }
        Ok(RequestDescriptor {
            endpoint: self.endpoint,
            method: self.method,
            headers: self.headers,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), InvokeError> {
    if endpoint.is_empty() {
        return Err(InvokeError::InvalidDescriptor("endpoint is empty".to_string()));
    }
    let uri: Uri = endpoint
        .parse()
        .map_err(|e| InvokeError::InvalidDescriptor(format!("endpoint {endpoint:?}: {e}")))?;
    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => {
            return Err(InvokeError::InvalidDescriptor(format!(
                "endpoint {endpoint:?} must use http or https"
            )))
        }
    }
    if uri.authority().is_none() {
        return Err(InvokeError::InvalidDescriptor(format!(
            "endpoint {endpoint:?} has no host"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::builder("http://localhost:8080")
            .method(HttpMethod::Get)
            .header("Content-Type", "application/json")
            .header(USER_ID_HEADER, "your-user-id")
            .build()
            .unwrap()
    }

    #[test]
    fn builds_example_descriptor() {
        let desc = descriptor();
        assert_eq!(desc.endpoint(), "http://localhost:8080");
        assert_eq!(desc.method(), HttpMethod::Get);
        assert_eq!(
            desc.headers(),
            &[
                ("Content-Type".to_string(), "application/json".to_string()),
                ("user_id".to_string(), "your-user-id".to_string()),
            ]
        );
    }

    #[test]
    fn method_defaults_to_get() {
        let desc = RequestDescriptor::builder("http://localhost:8080").build().unwrap();
        assert_eq!(desc.method(), HttpMethod::Get);
        assert!(desc.headers().is_empty());
    }

    #[test]
    fn into_request_keeps_method_url_and_headers() {
        let req = descriptor().into_request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080");
        assert_eq!(req.headers.len(), 2);
    }

    #[test]
    fn repeated_header_replaces_value_in_place() {
        let desc = RequestDescriptor::builder("http://localhost:8080")
            .header("user_id", "first")
            .header("Accept", "*/*")
            .header("USER_ID", "second")
            .build()
            .unwrap();
        assert_eq!(
            desc.headers(),
            &[
                ("user_id".to_string(), "second".to_string()),
                ("Accept".to_string(), "*/*".to_string()),
            ]
        );
    }

    #[test]
    fn empty_endpoint_rejected() {
        let err = RequestDescriptor::builder("").build().unwrap_err();
        assert!(matches!(err, InvokeError::InvalidDescriptor(_)));
    }

    #[test]
    fn relative_or_foreign_endpoint_rejected() {
        for endpoint in ["/todos", "localhost", "ftp://localhost:21", "not a url"] {
            let err = RequestDescriptor::builder(endpoint).build().unwrap_err();
            assert!(
                matches!(err, InvokeError::InvalidDescriptor(_)),
                "{endpoint} should be rejected"
            );
        }
    }

    #[test]
    fn https_endpoint_accepted() {
        assert!(RequestDescriptor::builder("https://example.com/api/v1")
            .build()
            .is_ok());
    }

    #[test]
    fn invalid_header_name_rejected() {
        let err = RequestDescriptor::builder("http://localhost:8080")
            .header("bad header", "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, InvokeError::InvalidDescriptor(msg) if msg.contains("bad header")));
    }

    #[test]
    fn invalid_header_value_rejected() {
        let err = RequestDescriptor::builder("http://localhost:8080")
            .header(USER_ID_HEADER, "line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, InvokeError::InvalidDescriptor(_)));
    }

    #[test]
    fn clones_are_equal_and_independent() {
        let a = descriptor();
        let b = a.clone();
        assert_eq!(a, b);
        let _consumed = a.into_request();
        assert_eq!(b.endpoint(), "http://localhost:8080");
    }
}
