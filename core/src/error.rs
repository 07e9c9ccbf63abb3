//! Error types for request dispatch.
//!
//! # Design
//! Validation problems are caught while the descriptor is built, before any
//! I/O. Everything that can go wrong once the request is on its way lands in
//! `Transport`; HTTP error statuses are not errors at this layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvokeError {
    /// The descriptor (endpoint, method or a header) is not usable.
    #[error("invalid request descriptor: {0}")]
    InvalidDescriptor(String),

    /// Connection refused, DNS failure, or any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The blocking task running the call panicked or was cancelled.
    #[error("dispatch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
