//! Transport seams: the queue manager connection and destination handles.
//!
//! These traits are the only contact points between the producer and a
//! concrete queue manager. [`HandleGuard`] turns an opened handle into a
//! scoped resource that is closed exactly once, on every exit path.

use crate::descriptor::{MessageDescriptor, OpenOptions, PutMessageOptions};
use crate::error::TransportError;
use async_trait::async_trait;
use tracing::{debug, warn};

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;

/// Connection to a queue manager
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueManager: Send + Sync {
    /// Open a handle to the named queue
    async fn open(
        &self,
        queue_name: &str,
        options: OpenOptions,
    ) -> Result<Box<dyn DestinationHandle>, TransportError>;

    /// Commit the current unit of work
    async fn commit(&self) -> Result<(), TransportError>;

    /// Back out the current unit of work
    async fn backout(&self) -> Result<(), TransportError>;
}

/// Open handle to a single destination
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationHandle: Send {
    /// Put one message; output fields of `descriptor` are updated in place
    async fn put(
        &mut self,
        descriptor: &mut MessageDescriptor,
        options: &PutMessageOptions,
        payload: &[u8],
    ) -> Result<(), TransportError>;

    /// Release the handle
    fn close(&mut self) -> Result<(), TransportError>;
}

/// Scoped ownership of an open destination handle
///
/// Dropping the guard closes the handle. A close failure is logged and
/// otherwise ignored.
pub struct HandleGuard {
    queue_name: String,
    handle: Box<dyn DestinationHandle>,
}

impl HandleGuard {
    pub(crate) fn new(queue_name: impl Into<String>, handle: Box<dyn DestinationHandle>) -> Self {
        Self {
            queue_name: queue_name.into(),
            handle,
        }
    }

    /// Name of the queue this handle was opened on
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Put one message through the guarded handle
    pub async fn put(
        &mut self,
        descriptor: &mut MessageDescriptor,
        options: &PutMessageOptions,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        self.handle.put(descriptor, options, payload).await
    }
}

impl Drop for HandleGuard {
    fn drop(&mut self) {
        match self.handle.close() {
            Ok(()) => debug!(queue = %self.queue_name, "Closed destination handle"),
            Err(e) => warn!(
                queue = %self.queue_name,
                error = %e,
                "Failed to close destination handle"
            ),
        }
    }
}

impl std::fmt::Debug for HandleGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleGuard")
            .field("queue_name", &self.queue_name)
            .finish_non_exhaustive()
    }
}
