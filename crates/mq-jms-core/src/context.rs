//! Session context owning the queue manager connection.

use crate::descriptor::OpenOptions;
use crate::destination::Queue;
use crate::error::{JmsException, TransportError, ValidationError};
use crate::message::{BytesMessage, TextMessage};
use crate::producer::Producer;
use crate::transport::{HandleGuard, QueueManager};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Whether sends are grouped into a unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Every put is visible as soon as it completes
    #[default]
    AutoAcknowledge,
    /// Puts are made under syncpoint and become visible on commit
    Transacted,
}

impl SessionMode {
    pub fn is_transacted(&self) -> bool {
        matches!(self, Self::Transacted)
    }
}

/// Session context: message factory and owner of the connection
///
/// Producers borrow the context and never outlive it.
#[derive(Clone)]
pub struct JmsContext {
    queue_manager: Arc<dyn QueueManager>,
    session_mode: SessionMode,
}

impl JmsContext {
    /// Create a context over an established queue manager connection
    pub fn new(queue_manager: Arc<dyn QueueManager>, session_mode: SessionMode) -> Self {
        Self {
            queue_manager,
            session_mode,
        }
    }

    pub fn session_mode(&self) -> SessionMode {
        self.session_mode
    }

    /// Create a producer with default delivery options
    pub fn create_producer(&self) -> Producer<'_> {
        Producer::new(self)
    }

    pub fn create_queue(&self, name: &str) -> Result<Queue, ValidationError> {
        Queue::new(name)
    }

    pub fn create_text_message(&self) -> TextMessage {
        TextMessage::new()
    }

    pub fn create_text_message_with(&self, text: impl Into<String>) -> TextMessage {
        TextMessage::with_text(text)
    }

    pub fn create_bytes_message(&self) -> BytesMessage {
        BytesMessage::new()
    }

    /// Open a handle to the named destination
    ///
    /// The returned guard closes the handle when dropped.
    pub async fn open_destination(
        &self,
        queue_name: &str,
        options: OpenOptions,
    ) -> Result<HandleGuard, TransportError> {
        let handle = self.queue_manager.open(queue_name, options).await?;
        debug!(queue = %queue_name, ?options, "Opened destination handle");
        Ok(HandleGuard::new(queue_name, handle))
    }

    /// Commit messages sent since the last commit or rollback
    pub async fn commit(&self) -> Result<(), JmsException> {
        self.queue_manager.commit().await?;
        debug!("Committed unit of work");
        Ok(())
    }

    /// Discard messages sent since the last commit or rollback
    pub async fn rollback(&self) -> Result<(), JmsException> {
        self.queue_manager.backout().await?;
        debug!("Backed out unit of work");
        Ok(())
    }
}

impl std::fmt::Debug for JmsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JmsContext")
            .field("session_mode", &self.session_mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
