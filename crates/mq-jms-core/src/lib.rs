//! # MQ JMS
//!
//! JMS-style message producer for MQ queue managers.
//!
//! This library provides:
//! - A producer that turns "send this message with these delivery options"
//!   into the open / put / close sequence a queue manager expects
//! - Text and bytes message variants with JMS header accessors
//! - Normalization of native reason codes into one exception type
//! - An in-memory queue manager for tests and local development
//!
//! ## Module Organization
//!
//! - [`error`] - Error types for all producer and transport operations
//! - [`reason`] - Native completion and reason codes
//! - [`descriptor`] - Message descriptor, delivery mode and put/open options
//! - [`destination`] - Destinations and validated queue names
//! - [`message`] - Message variants and header accessors
//! - [`transport`] - Queue manager and destination handle traits
//! - [`context`] - Session context and message factories
//! - [`producer`] - The send pipeline
//! - [`config`] - Configuration loading
//! - [`providers`] - Queue manager implementations
//!
//! ## Example
//!
//! ```no_run
//! use mq_jms_core::{InMemoryQueueManager, JmsContext, SessionMode};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let context = JmsContext::new(
//!     Arc::new(InMemoryQueueManager::default()),
//!     SessionMode::AutoAcknowledge,
//! );
//! let queue = context.create_queue("DEV.QUEUE.1")?;
//!
//! let mut producer = context.create_producer();
//! producer.set_time_to_live(60_000);
//! producer.send_string(&queue, "hello").await?;
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod config;
pub mod context;
pub mod descriptor;
pub mod destination;
pub mod error;
pub mod message;
pub mod producer;
pub mod providers;
pub mod reason;
pub mod transport;

// Re-export commonly used types at crate root for convenience
pub use config::{InMemoryConfig, MqJmsConfig, ProducerConfig};
pub use context::{JmsContext, SessionMode};
pub use descriptor::{
    DeliveryMode, Expiry, Format, MessageDescriptor, MessageId, OpenOptions, Persistence,
    PutMessageOptions,
};
pub use destination::{Destination, Queue};
pub use error::{ConfigurationError, JmsException, TransportError, ValidationError, Verb};
pub use message::{BytesMessage, JmsMessage, Message, TextMessage};
pub use producer::Producer;
pub use providers::{InMemoryQueueManager, Statistics, StoredMessage};
pub use reason::{CompletionCode, ReasonCode};
pub use transport::{DestinationHandle, HandleGuard, QueueManager};
