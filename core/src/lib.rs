//! One-shot HTTP request invoker.
//!
//! # Overview
//! Builds an immutable `RequestDescriptor`, issues it once through a
//! `Transport`, and passes the transport-level `HttpResponse` to a
//! completion handler. The call is asynchronous: `RequestInvoker::dispatch`
//! returns a `Pending` immediately and the handler runs when the response
//! arrives.
//!
//! # Design
//! - Descriptors are validated when built and consumed by dispatch.
//! - Response bodies are handed over as raw bytes; nothing is parsed.
//! - Only transport failures are errors; HTTP statuses are data.
//! - No failure continuation is attached to a dispatch. Failures surface
//!   only through the `Pending` future.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod invoker;
pub mod sink;
pub mod transport;

pub use config::InvokerConfig;
pub use descriptor::{RequestDescriptor, RequestDescriptorBuilder, USER_ID_HEADER};
pub use error::InvokeError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use invoker::{Pending, RequestInvoker};
pub use sink::{log_to_console, write_response};
pub use transport::{Transport, UreqTransport};
