//! In-memory queue manager for testing and development.
//!
//! This module provides a functional queue manager that:
//! - Holds defined local queues with depth and message length limits
//! - Generates message identifiers and put timestamps
//! - Keeps syncpoint puts in a unit of work until commit or backout
//! - Reports the same reason codes a real queue manager would
//!
//! There is no receive path; messages can be inspected with
//! [`InMemoryQueueManager::browse`].

use crate::config::InMemoryConfig;
use crate::descriptor::{Expiry, MessageDescriptor, MessageId, OpenOptions, PutMessageOptions};
use crate::error::{TransportError, Verb};
use crate::reason::ReasonCode;
use crate::transport::{DestinationHandle, QueueManager};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

// ============================================================================
// Internal Storage Structures
// ============================================================================

/// Thread-safe storage for all queues
struct QueueStorage {
    config: InMemoryConfig,
    queues: HashMap<String, LocalQueue>,
    /// Syncpoint puts awaiting commit, in put order
    uncommitted: Vec<(String, StoredMessage)>,
    quiescing: bool,
    sequence: u64,
    statistics: Statistics,
}

impl QueueStorage {
    fn new(config: InMemoryConfig) -> Self {
        let queues = config
            .queues
            .iter()
            .map(|name| (name.clone(), LocalQueue::default()))
            .collect();

        Self {
            config,
            queues,
            uncommitted: Vec::new(),
            quiescing: false,
            sequence: 0,
            statistics: Statistics::default(),
        }
    }

    fn next_message_id(&mut self) -> MessageId {
        self.sequence += 1;
        MessageId::generate(self.sequence)
    }

    fn uncommitted_depth(&self, queue_name: &str) -> usize {
        self.uncommitted
            .iter()
            .filter(|(name, _)| name == queue_name)
            .count()
    }
}

/// State of a single local queue
#[derive(Default)]
struct LocalQueue {
    messages: VecDeque<StoredMessage>,
    put_inhibited: bool,
}

/// A message held by the queue manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub descriptor: MessageDescriptor,
    pub payload: Bytes,
}

/// Call counters for the queue manager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub opens: u64,
    pub closes: u64,
    pub puts: u64,
    pub commits: u64,
    pub backouts: u64,
}

impl Statistics {
    /// Handles opened and not yet closed
    pub fn open_handles(&self) -> u64 {
        self.opens - self.closes
    }
}

fn lock(
    storage: &RwLock<QueueStorage>,
    verb: Verb,
) -> Result<RwLockWriteGuard<'_, QueueStorage>, TransportError> {
    storage
        .write()
        .map_err(|_| TransportError::failed(verb, ReasonCode::RESOURCE_PROBLEM))
}

fn read(
    storage: &RwLock<QueueStorage>,
) -> Result<RwLockReadGuard<'_, QueueStorage>, TransportError> {
    storage
        .read()
        .map_err(|_| TransportError::failed(Verb::Open, ReasonCode::RESOURCE_PROBLEM))
}

// ============================================================================
// InMemoryQueueManager
// ============================================================================

/// In-memory queue manager implementation
#[derive(Clone)]
pub struct InMemoryQueueManager {
    name: String,
    storage: Arc<RwLock<QueueStorage>>,
}

impl InMemoryQueueManager {
    /// Create new queue manager with configuration
    pub fn new(config: InMemoryConfig) -> Self {
        info!(
            queue_manager = %config.name,
            queues = config.queues.len(),
            "Starting in-memory queue manager"
        );
        Self {
            name: config.name.clone(),
            storage: Arc::new(RwLock::new(QueueStorage::new(config))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Define a local queue; defining an existing queue is a no-op
    pub fn define_queue(&self, queue_name: &str) -> Result<(), TransportError> {
        let mut storage = lock(&self.storage, Verb::Open)?;
        storage.queues.entry(queue_name.to_string()).or_default();
        Ok(())
    }

    /// Allow or refuse puts to a queue
    pub fn set_put_inhibited(&self, queue_name: &str, inhibited: bool) -> Result<(), TransportError> {
        let mut storage = lock(&self.storage, Verb::Put)?;
        let queue = storage
            .queues
            .get_mut(queue_name)
            .ok_or_else(|| TransportError::failed(Verb::Put, ReasonCode::UNKNOWN_OBJECT_NAME))?;
        queue.put_inhibited = inhibited;
        Ok(())
    }

    /// Start quiescing: subsequent opens and puts fail
    pub fn quiesce(&self) -> Result<(), TransportError> {
        let mut storage = lock(&self.storage, Verb::Open)?;
        storage.quiescing = true;
        info!(queue_manager = %self.name, "Queue manager quiescing");
        Ok(())
    }

    /// Committed messages on a queue, oldest first
    pub fn browse(&self, queue_name: &str) -> Result<Vec<StoredMessage>, TransportError> {
        let storage = read(&self.storage)?;
        storage
            .queues
            .get(queue_name)
            .map(|queue| queue.messages.iter().cloned().collect())
            .ok_or_else(|| TransportError::failed(Verb::Open, ReasonCode::UNKNOWN_OBJECT_NAME))
    }

    /// Number of committed messages on a queue
    pub fn depth(&self, queue_name: &str) -> Result<usize, TransportError> {
        self.browse(queue_name).map(|messages| messages.len())
    }

    /// Number of syncpoint puts awaiting commit
    pub fn uncommitted_count(&self) -> Result<usize, TransportError> {
        read(&self.storage).map(|storage| storage.uncommitted.len())
    }

    pub fn statistics(&self) -> Result<Statistics, TransportError> {
        read(&self.storage).map(|storage| storage.statistics)
    }

    fn open_locked(&self, queue_name: &str, options: OpenOptions) -> Result<(), TransportError> {
        let mut storage = lock(&self.storage, Verb::Open)?;

        if storage.quiescing && options.fail_if_quiescing {
            return Err(TransportError::failed(Verb::Open, ReasonCode::Q_MGR_QUIESCING));
        }

        if !storage.queues.contains_key(queue_name) {
            if !storage.config.auto_define_queues {
                return Err(TransportError::failed(
                    Verb::Open,
                    ReasonCode::UNKNOWN_OBJECT_NAME,
                ));
            }
            debug!(queue = %queue_name, "Auto-defining queue on open");
            storage.queues.insert(queue_name.to_string(), LocalQueue::default());
        }

        storage.statistics.opens += 1;
        Ok(())
    }

    fn commit_locked(&self) -> Result<usize, TransportError> {
        let mut storage = lock(&self.storage, Verb::Commit)?;
        let pending = std::mem::take(&mut storage.uncommitted);
        let count = pending.len();

        for (queue_name, message) in pending {
            if let Some(queue) = storage.queues.get_mut(&queue_name) {
                queue.messages.push_back(message);
            }
        }

        storage.statistics.commits += 1;
        Ok(count)
    }

    fn backout_locked(&self) -> Result<usize, TransportError> {
        let mut storage = lock(&self.storage, Verb::Backout)?;
        let count = storage.uncommitted.len();
        storage.uncommitted.clear();
        storage.statistics.backouts += 1;
        Ok(count)
    }
}

impl Default for InMemoryQueueManager {
    fn default() -> Self {
        Self::new(InMemoryConfig::default())
    }
}

#[async_trait]
impl QueueManager for InMemoryQueueManager {
    async fn open(
        &self,
        queue_name: &str,
        options: OpenOptions,
    ) -> Result<Box<dyn DestinationHandle>, TransportError> {
        self.open_locked(queue_name, options)?;

        Ok(Box::new(InMemoryHandle {
            queue_name: queue_name.to_string(),
            options,
            storage: Arc::clone(&self.storage),
            closed: false,
        }))
    }

    async fn commit(&self) -> Result<(), TransportError> {
        let count = self.commit_locked()?;
        debug!(queue_manager = %self.name, messages = count, "Unit of work committed");
        Ok(())
    }

    async fn backout(&self) -> Result<(), TransportError> {
        let count = self.backout_locked()?;
        debug!(queue_manager = %self.name, messages = count, "Unit of work backed out");
        Ok(())
    }
}

// ============================================================================
// InMemoryHandle
// ============================================================================

/// Handle to one queue of an [`InMemoryQueueManager`]
struct InMemoryHandle {
    queue_name: String,
    options: OpenOptions,
    storage: Arc<RwLock<QueueStorage>>,
    closed: bool,
}

impl InMemoryHandle {
    fn put_locked(
        &self,
        descriptor: &mut MessageDescriptor,
        options: &PutMessageOptions,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        let fail = |reason| TransportError::failed(Verb::Put, reason);

        if self.closed {
            return Err(fail(ReasonCode::HOBJ_ERROR));
        }
        if !self.options.output {
            return Err(fail(ReasonCode::NOT_OPEN_FOR_OUTPUT));
        }
        if descriptor.expiry == Expiry::Tenths(0) {
            return Err(fail(ReasonCode::EXPIRY_ERROR));
        }

        let mut storage = lock(&self.storage, Verb::Put)?;

        if storage.quiescing {
            return Err(fail(ReasonCode::Q_MGR_QUIESCING));
        }
        if payload.len() > storage.config.max_message_length {
            return Err(fail(ReasonCode::MSG_TOO_BIG_FOR_Q));
        }

        let uncommitted = storage.uncommitted_depth(&self.queue_name);
        let max_depth = storage.config.max_queue_depth;
        let queue = storage
            .queues
            .get(&self.queue_name)
            .ok_or_else(|| fail(ReasonCode::UNKNOWN_OBJECT_NAME))?;
        if queue.put_inhibited {
            return Err(fail(ReasonCode::PUT_INHIBITED));
        }
        if queue.messages.len() + uncommitted >= max_depth {
            return Err(fail(ReasonCode::Q_FULL));
        }

        if options.new_message_id || descriptor.message_id.is_none() {
            descriptor.message_id = Some(storage.next_message_id());
        }
        descriptor.put_timestamp = Some(Utc::now());

        let stored = StoredMessage {
            descriptor: descriptor.clone(),
            payload: Bytes::copy_from_slice(payload),
        };

        if options.syncpoint {
            storage.uncommitted.push((self.queue_name.clone(), stored));
        } else if let Some(queue) = storage.queues.get_mut(&self.queue_name) {
            queue.messages.push_back(stored);
        }
        storage.statistics.puts += 1;

        Ok(())
    }
}

#[async_trait]
impl DestinationHandle for InMemoryHandle {
    async fn put(
        &mut self,
        descriptor: &mut MessageDescriptor,
        options: &PutMessageOptions,
        payload: &[u8],
    ) -> Result<(), TransportError> {
        self.put_locked(descriptor, options, payload)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::failed(Verb::Close, ReasonCode::HOBJ_ERROR));
        }

        let mut storage = lock(&self.storage, Verb::Close)?;
        storage.statistics.closes += 1;
        self.closed = true;
        Ok(())
    }
}
