//! Blocking transports that execute an `HttpRequest`.
//!
//! # Design
//! The invoker only needs "send this, give me back the raw response", so the
//! seam is a one-method trait. `UreqTransport` is the real implementation;
//! tests substitute in-process fakes.

use ureq::{Agent, RequestBuilder, ResponseExt};

use crate::error::InvokeError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and returns the transport-level response.
///
/// Any HTTP status is a successful execution. `Err` is reserved for failures
/// where no response was received.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, InvokeError>;
}

/// `ureq`-backed transport.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Build an agent that hands 4xx/5xx responses back as data instead of
    /// turning them into errors.
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, InvokeError> {
        let url = request.url.as_str();
        let headers = request.headers.as_slice();

        let mut response = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), headers).call(),
            HttpMethod::Head => with_headers(self.agent.head(url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), headers).call(),
            HttpMethod::Options => with_headers(self.agent.options(url), headers).call(),
            HttpMethod::Trace => with_headers(self.agent.trace(url), headers).call(),
            HttpMethod::Connect => with_headers(self.agent.connect(url), headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url), headers).send_empty(),
            HttpMethod::Put => with_headers(self.agent.put(url), headers).send_empty(),
            HttpMethod::Patch => with_headers(self.agent.patch(url), headers).send_empty(),
        }?;

        let status = response.status().as_u16();
        let final_url = response.get_uri().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // The handler gets whatever arrived, however large.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
