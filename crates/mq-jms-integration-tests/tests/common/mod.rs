//! Common test utilities for mq-jms integration tests
//!
//! This module provides:
//! - Builders for in-memory queue managers and contexts
//! - A queue manager wrapper whose handles fail to close
//! - Shared message fixtures

use async_trait::async_trait;
use mq_jms_core::{
    DestinationHandle, InMemoryConfig, InMemoryQueueManager, JmsContext, MessageDescriptor,
    OpenOptions, PutMessageOptions, QueueManager, ReasonCode, SessionMode, TransportError, Verb,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[allow(dead_code)]
pub const REQUEST_QUEUE: &str = "APP.REQUEST";
#[allow(dead_code)]
pub const REPLY_QUEUE: &str = "APP.REPLY";

// ============================================================================
// Builders
// ============================================================================

/// Queue manager with the request and reply queues defined
#[allow(dead_code)]
pub fn queue_manager() -> Arc<InMemoryQueueManager> {
    queue_manager_with(InMemoryConfig {
        name: "QM.TEST".to_string(),
        queues: vec![REQUEST_QUEUE.to_string(), REPLY_QUEUE.to_string()],
        ..InMemoryConfig::default()
    })
}

#[allow(dead_code)]
pub fn queue_manager_with(config: InMemoryConfig) -> Arc<InMemoryQueueManager> {
    Arc::new(InMemoryQueueManager::new(config))
}

/// Context over the given queue manager
#[allow(dead_code)]
pub fn context(queue_manager: &Arc<InMemoryQueueManager>, mode: SessionMode) -> JmsContext {
    JmsContext::new(queue_manager.clone(), mode)
}

// ============================================================================
// Close-Failing Queue Manager
// ============================================================================

/// Wraps an in-memory queue manager so that every close reports a failure
/// after releasing the underlying handle
#[allow(dead_code)]
pub struct CloseFailingQueueManager {
    inner: Arc<InMemoryQueueManager>,
    failed_closes: Arc<AtomicU64>,
}

impl CloseFailingQueueManager {
    #[allow(dead_code)]
    pub fn new(inner: Arc<InMemoryQueueManager>) -> Self {
        Self {
            inner,
            failed_closes: Arc::new(AtomicU64::new(0)),
        }
    }

    #[allow(dead_code)]
    pub fn failed_closes(&self) -> u64 {
        self.failed_closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueueManager for CloseFailingQueueManager {
    async fn open(
        &self,
        queue_name: &str,
        options: OpenOptions,
    ) -> Result<Box<dyn DestinationHandle>, TransportError> {
        let handle = self.inner.open(queue_name, options).await?;
        Ok(Box::new(CloseFailingHandle {
            inner: handle,
            failed_closes: Arc::clone(&self.failed_closes),
        }))
    }

    async fn commit(&self) -> Result<(), TransportError> {
        self.inner.commit().await
    }

    async fn backout(&self) -> Result<(), TransportError> {
        self.inner.backout().await
    }
}

struct CloseFailingHandle {
    inner: Box<dyn DestinationHandle>,
    failed_closes: Arc<AtomicU64>,
}

#[async_trait]
impl DestinationHandle for CloseFailingHandle {
    async fn put(
        &mut self,
        descriptor: &mut MessageDescriptor,
        options: &PutMessageOptions,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        self.inner.put(descriptor, options, payload).await
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.inner.close()?;
        self.failed_closes.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::failed(
            Verb::Close,
            ReasonCode::CONNECTION_BROKEN,
        ))
    }
}
