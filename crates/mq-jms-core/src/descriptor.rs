//! Message descriptor and the option records passed to open and put calls.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Delivery Mode and Persistence
// ============================================================================

/// JMS delivery mode of messages sent by a producer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMode {
    #[default]
    NonPersistent,
    Persistent,
}

impl DeliveryMode {
    /// JMS numeric constant for [`DeliveryMode::NonPersistent`]
    pub const NON_PERSISTENT: i32 = 1;
    /// JMS numeric constant for [`DeliveryMode::Persistent`]
    pub const PERSISTENT: i32 = 2;

    /// Descriptor persistence that implements this delivery mode
    pub fn persistence(&self) -> Persistence {
        match self {
            Self::NonPersistent => Persistence::NotPersistent,
            Self::Persistent => Persistence::Persistent,
        }
    }
}

impl TryFrom<i32> for DeliveryMode {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            Self::NON_PERSISTENT => Ok(Self::NonPersistent),
            Self::PERSISTENT => Ok(Self::Persistent),
            other => Err(ValidationError::OutOfRange {
                field: "delivery_mode".to_string(),
                message: format!(
                    "{} is neither PERSISTENT ({}) nor NON_PERSISTENT ({})",
                    other,
                    Self::PERSISTENT,
                    Self::NON_PERSISTENT
                ),
            }),
        }
    }
}

impl From<DeliveryMode> for i32 {
    fn from(mode: DeliveryMode) -> Self {
        match mode {
            DeliveryMode::NonPersistent => DeliveryMode::NON_PERSISTENT,
            DeliveryMode::Persistent => DeliveryMode::PERSISTENT,
        }
    }
}

/// Whether the queue manager keeps a message across restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Persistence {
    NotPersistent,
    Persistent,
    /// Defer to the default persistence attribute of the queue
    #[default]
    AsQueueDefault,
}

// ============================================================================
// Format and Expiry
// ============================================================================

/// Format tag describing how the payload is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Format {
    /// Unstructured bytes
    #[default]
    None,
    /// Character data in the message's coded character set
    String,
}

impl Format {
    /// Eight-character format name as carried in the descriptor
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "        ",
            Self::String => "MQSTR   ",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().trim_end())
    }
}

/// Message lifetime, in tenths of a second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Expiry {
    #[default]
    Unlimited,
    Tenths(u32),
}

impl Expiry {
    /// Largest expiry the descriptor field can hold
    pub const MAX_TENTHS: u32 = i32::MAX as u32;

    /// Convert a time-to-live in milliseconds
    ///
    /// Zero means the message never expires. Values below one tenth of a
    /// second round up to one tenth, since a zero expiry is rejected by the
    /// queue manager.
    pub fn from_time_to_live(millis: u64) -> Self {
        if millis == 0 {
            return Self::Unlimited;
        }

        let tenths = (millis / 100).clamp(1, Self::MAX_TENTHS as u64);
        Self::Tenths(tenths as u32)
    }

    /// Lifetime in milliseconds, `None` when unlimited
    pub fn as_millis(&self) -> Option<u64> {
        match self {
            Self::Unlimited => None,
            Self::Tenths(tenths) => Some(u64::from(*tenths) * 100),
        }
    }
}

// ============================================================================
// Message Identifier
// ============================================================================

/// Transport-assigned 24-byte message identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId([u8; 24]);

impl MessageId {
    pub const LENGTH: usize = 24;

    /// Wrap raw identifier bytes
    pub fn from_bytes(bytes: [u8; 24]) -> Self {
        Self(bytes)
    }

    /// Generate a new unique identifier
    ///
    /// The leading 16 bytes are random, the trailing 8 carry the issuing
    /// queue manager's put sequence number.
    pub fn generate(sequence: u64) -> Self {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[..16].copy_from_slice(uuid::Uuid::new_v4().as_bytes());
        bytes[16..].copy_from_slice(&sequence.to_be_bytes());
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 24] {
        &self.0
    }

    /// Check if this is the all-zero "none" identifier
    pub fn is_none(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Render in JMS form, `ID:` followed by lowercase hex
    pub fn to_jms_id(&self) -> String {
        format!("ID:{}", hex::encode(self.0))
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", hex::encode(self.0))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

// ============================================================================
// Message Descriptor
// ============================================================================

/// Per-message metadata record passed to, and updated by, a put
///
/// `message_id` and `put_timestamp` are output fields written by the queue
/// manager; the remaining fields are inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub format: Format,
    pub persistence: Persistence,
    pub expiry: Expiry,
    pub message_id: Option<MessageId>,
    pub correlation_id: Option<String>,
    pub reply_to_queue: Option<String>,
    pub reply_to_queue_manager: Option<String>,
    pub put_timestamp: Option<DateTime<Utc>>,
}

impl MessageDescriptor {
    /// Create a descriptor with all fields at their defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reply-to queue
    pub fn with_reply_to(mut self, queue: impl Into<String>) -> Self {
        self.reply_to_queue = Some(queue.into());
        self
    }

    /// Set the correlation identifier
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Absolute expiration time, once the message has been put with a finite expiry
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let put_at = self.put_timestamp?;
        let millis = self.expiry.as_millis()?;
        let millis = i64::try_from(millis).ok()?;
        put_at.checked_add_signed(chrono::Duration::milliseconds(millis))
    }
}

// ============================================================================
// Open and Put Options
// ============================================================================

/// Options for opening a destination handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenOptions {
    /// Open the queue for putting messages
    pub output: bool,
    /// Fail rather than block if the queue manager is quiescing
    pub fail_if_quiescing: bool,
    /// Use the queue's default input sharing mode
    pub input_as_queue_default: bool,
}

impl OpenOptions {
    /// Options a producer opens its destination with
    pub fn for_send() -> Self {
        Self {
            output: true,
            fail_if_quiescing: true,
            input_as_queue_default: true,
        }
    }
}

/// Options for a single put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PutMessageOptions {
    /// Put under syncpoint, visible only after the unit of work commits
    pub syncpoint: bool,
    /// Ask the queue manager to generate a fresh message identifier
    pub new_message_id: bool,
}

impl PutMessageOptions {
    /// Options for a producer put; a new message id is always requested
    pub fn new(syncpoint: bool) -> Self {
        Self {
            syncpoint,
            new_message_id: true,
        }
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
