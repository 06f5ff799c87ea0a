//! Configuration for contexts, producers and the in-memory queue manager.
//!
//! Sources are applied in order, later ones overriding earlier ones:
//!  1. Built-in defaults (every field carries a serde default)
//!  2. An optional YAML file
//!  3. Environment variables prefixed `MQJMS__`, with `__` separating nested
//!     keys, e.g. `MQJMS__PRODUCER__TIME_TO_LIVE_MS=5000`

use crate::context::SessionMode;
use crate::descriptor::DeliveryMode;
use crate::destination::Queue;
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqJmsConfig {
    /// Session mode of contexts created from this configuration
    pub session_mode: SessionMode,

    /// Delivery options applied to new producers
    pub producer: ProducerConfig,

    /// In-memory queue manager settings
    pub queue_manager: InMemoryConfig,
}

/// Producer delivery options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    pub delivery_mode: DeliveryMode,

    /// Message time-to-live in milliseconds; 0 means unlimited
    pub time_to_live_ms: i64,
}

/// In-memory queue manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryConfig {
    /// Queue manager name
    pub name: String,

    /// Queues defined at startup
    pub queues: Vec<String>,

    /// Define unknown queues on first open instead of failing
    pub auto_define_queues: bool,

    /// Maximum number of messages per queue, committed and uncommitted
    pub max_queue_depth: usize,

    /// Maximum payload length in bytes
    pub max_message_length: usize,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        Self {
            name: "QM1".to_string(),
            queues: vec![
                "DEV.QUEUE.1".to_string(),
                "DEV.QUEUE.2".to_string(),
                "DEV.QUEUE.3".to_string(),
            ],
            auto_define_queues: false,
            max_queue_depth: 5000,
            max_message_length: 4 * 1024 * 1024, // 4MB
        }
    }
}

impl MqJmsConfig {
    /// Prefix of environment variable overrides
    pub const ENV_PREFIX: &'static str = "MQJMS";

    /// Load configuration from defaults, an optional YAML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("queue_manager.queues"),
            )
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.producer.time_to_live_ms < 0 {
            return Err(ConfigurationError::Invalid {
                message: format!(
                    "producer.time_to_live_ms must not be negative, got {}",
                    self.producer.time_to_live_ms
                ),
            });
        }

        self.queue_manager.validate()
    }
}

impl InMemoryConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::Missing {
                key: "queue_manager.name".to_string(),
            });
        }

        if self.max_queue_depth == 0 {
            return Err(ConfigurationError::Invalid {
                message: "queue_manager.max_queue_depth must be greater than zero".to_string(),
            });
        }

        if self.max_message_length == 0 {
            return Err(ConfigurationError::Invalid {
                message: "queue_manager.max_message_length must be greater than zero".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &self.queues {
            Queue::new(name.as_str()).map_err(|e| ConfigurationError::Invalid {
                message: format!("queue_manager.queues: '{}': {}", name, e),
            })?;

            if !seen.insert(name.as_str()) {
                return Err(ConfigurationError::Invalid {
                    message: format!("queue_manager.queues: '{}' is defined twice", name),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
