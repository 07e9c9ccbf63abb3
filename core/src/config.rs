//! Environment-driven configuration for the `oneshot-fetch` binary.

use std::env;

use tracing::Level;

use crate::descriptor::{RequestDescriptor, USER_ID_HEADER};
use crate::error::InvokeError;
use crate::http::HttpMethod;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";
pub const DEFAULT_USER_ID: &str = "your-user-id";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvokerConfig {
    pub endpoint: String,
    pub user_id: String,
    pub log_level: String,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl InvokerConfig {
    /// Read `FETCH_ENDPOINT`, `FETCH_USER_ID` and `LOG_LEVEL`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            endpoint: lookup("FETCH_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            user_id: lookup("FETCH_USER_ID").unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Unrecognised levels fall back to `INFO`.
    pub fn tracing_level(&self) -> Level {
        self.log_level.trim().parse().unwrap_or(Level::INFO)
    }

    /// The GET descriptor with the JSON content type and the caller identity.
    pub fn descriptor(&self) -> Result<RequestDescriptor, InvokeError> {
        RequestDescriptor::builder(self.endpoint.as_str())
            .method(HttpMethod::Get)
            .header("Content-Type", "application/json")
            .header(USER_ID_HEADER, self.user_id.as_str())
            .build()
    }
}
