//! Destinations messages can be sent to.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a queue manager object name
pub const MAX_QUEUE_NAME_LENGTH: usize = 48;

/// Anything a producer can resolve to a queue name
pub trait Destination: Send + Sync {
    /// Name of the queue on the queue manager
    fn destination_name(&self) -> &str;
}

/// Validated queue name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Queue(String);

impl Queue {
    /// Create new queue with validation
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "queue_name".to_string(),
            });
        }

        if name.len() > MAX_QUEUE_NAME_LENGTH {
            return Err(ValidationError::OutOfRange {
                field: "queue_name".to_string(),
                message: format!("must be at most {} characters", MAX_QUEUE_NAME_LENGTH),
            });
        }

        // Object names are restricted to A-Z a-z 0-9 . / _ %
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '/' | '_' | '%'))
        {
            return Err(ValidationError::InvalidFormat {
                field: "queue_name".to_string(),
                message: "only ASCII alphanumeric, '.', '/', '_' and '%' allowed".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get queue name as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Destination for Queue {
    fn destination_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue:///{}", self.0)
    }
}

impl FromStr for Queue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim_start_matches("queue:///"))
    }
}

impl TryFrom<String> for Queue {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Queue> for String {
    fn from(queue: Queue) -> Self {
        queue.0
    }
}

#[cfg(test)]
#[path = "destination_tests.rs"]
mod tests;
