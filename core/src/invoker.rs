//! One-shot request dispatch with a single success continuation.
//!
//! # Design
//! `dispatch` moves the descriptor and the completion handler onto Tokio's
//! blocking pool and returns a `Pending` straight away. The handler runs
//! after the transport has produced a response, at most once, and never when
//! the transport fails. No failure continuation is attached: a failure is
//! only visible to whoever awaits the `Pending`, and dropping the `Pending`
//! discards it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::descriptor::RequestDescriptor;
use crate::error::InvokeError;
use crate::http::HttpResponse;
use crate::transport::{Transport, UreqTransport};

/// Issues descriptors through a shared transport.
#[derive(Debug)]
pub struct RequestInvoker<T = UreqTransport> {
    transport: Arc<T>,
}

impl<T> Clone for RequestInvoker<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport + 'static> RequestInvoker<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Issue `descriptor` and return without waiting for the response.
    ///
    /// `on_response` receives the transport-level response once it arrives.
    /// Each call issues its own request; nothing is cached or deduplicated.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn dispatch<F>(&self, descriptor: RequestDescriptor, on_response: F) -> Pending
    where
        F: FnOnce(HttpResponse) + Send + 'static,
    {
        let request_id = Uuid::new_v4();
        let transport = Arc::clone(&self.transport);
        let request = descriptor.into_request();
        debug!(%request_id, method = %request.method, url = %request.url, "dispatching request");

        let handle = tokio::task::spawn_blocking(move || {
            let response = match transport.execute(&request) {
                Ok(response) => response,
                Err(err) => {
                    debug!(%request_id, error = %err, "request failed");
                    return Err(err);
                }
            };
            info!(%request_id, status = response.status, "response received");
            on_response(response);
            Ok(())
        });

        Pending { request_id, handle }
    }
}

/// A dispatched request that has not necessarily resolved yet.
///
/// Resolves to `Ok(())` after the completion handler has returned, or to the
/// transport error when no response was received.
#[derive(Debug)]
#[must_use = "a dropped Pending discards the failure of its request"]
pub struct Pending {
    request_id: Uuid,
    handle: JoinHandle<Result<(), InvokeError>>,
}

impl Pending {
    /// Tracking id used in log fields for this dispatch.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn is_resolved(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Pending {
    type Output = Result<(), InvokeError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.map_err(InvokeError::from).and_then(|outcome| outcome))
    }
}
