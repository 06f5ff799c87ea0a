//! Queue manager implementations.
//!
//! This module contains concrete implementations of the `QueueManager` and
//! `DestinationHandle` traits.

pub mod memory;

pub use memory::{InMemoryQueueManager, Statistics, StoredMessage};
