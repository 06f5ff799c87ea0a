//! Message variants and the JMS header accessors they share.

use crate::descriptor::{DeliveryMode, Format, MessageDescriptor, Persistence};
use crate::destination::Queue;
use bytes::BytesMut;

// ============================================================================
// Header Access
// ============================================================================

/// Header access common to every message variant
///
/// Headers live in the message's descriptor. Reading a header never creates
/// a descriptor; setting one does, and that descriptor then becomes the base
/// for the next put so the metadata reaches the queue manager.
pub trait JmsMessage {
    /// Descriptor previously assigned to this message, if any
    fn descriptor(&self) -> Option<&MessageDescriptor>;

    /// Descriptor of this message, created on first use
    fn descriptor_mut(&mut self) -> &mut MessageDescriptor;

    /// Replace the descriptor
    fn set_descriptor(&mut self, descriptor: MessageDescriptor);

    /// Remove and return the descriptor
    fn take_descriptor(&mut self) -> Option<MessageDescriptor>;

    /// Transport-assigned identifier in `ID:<hex>` form
    fn jms_message_id(&self) -> Option<String> {
        self.descriptor()
            .and_then(|d| d.message_id)
            .map(|id| id.to_jms_id())
    }

    /// Put time in milliseconds since the epoch, 0 if never sent
    fn jms_timestamp(&self) -> i64 {
        self.descriptor()
            .and_then(|d| d.put_timestamp)
            .map(|t| t.timestamp_millis())
            .unwrap_or(0)
    }

    fn jms_correlation_id(&self) -> Option<&str> {
        self.descriptor().and_then(|d| d.correlation_id.as_deref())
    }

    fn set_jms_correlation_id(&mut self, correlation_id: String) {
        self.descriptor_mut().correlation_id = Some(correlation_id);
    }

    /// Queue replies should be sent to
    fn jms_reply_to(&self) -> Option<Queue> {
        self.descriptor()
            .and_then(|d| d.reply_to_queue.as_deref())
            .and_then(|name| Queue::new(name.trim_end()).ok())
    }

    fn set_jms_reply_to(&mut self, queue: &Queue) {
        let descriptor = self.descriptor_mut();
        descriptor.reply_to_queue = Some(queue.as_str().to_string());
        descriptor.reply_to_queue_manager = None;
    }

    /// Delivery mode the message was last sent with
    fn jms_delivery_mode(&self) -> DeliveryMode {
        match self.descriptor().map(|d| d.persistence) {
            Some(Persistence::Persistent) => DeliveryMode::Persistent,
            _ => DeliveryMode::NonPersistent,
        }
    }

    /// Expiration time in milliseconds since the epoch, 0 if it never expires
    fn jms_expiration(&self) -> i64 {
        self.descriptor()
            .and_then(MessageDescriptor::expires_at)
            .map(|t| t.timestamp_millis())
            .unwrap_or(0)
    }
}

macro_rules! impl_jms_message {
    ($variant:ty) => {
        impl JmsMessage for $variant {
            fn descriptor(&self) -> Option<&MessageDescriptor> {
                self.descriptor.as_ref()
            }

            fn descriptor_mut(&mut self) -> &mut MessageDescriptor {
                self.descriptor.get_or_insert_with(MessageDescriptor::new)
            }

            fn set_descriptor(&mut self, descriptor: MessageDescriptor) {
                self.descriptor = Some(descriptor);
            }

            fn take_descriptor(&mut self) -> Option<MessageDescriptor> {
                self.descriptor.take()
            }
        }
    };
}

// ============================================================================
// Message Variants
// ============================================================================

/// Message whose body is a string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMessage {
    text: Option<String>,
    descriptor: Option<MessageDescriptor>,
}

impl TextMessage {
    /// Create a message with no body
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a message with the given body
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            descriptor: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

impl_jms_message!(TextMessage);

/// Message whose body is an uninterpreted byte stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BytesMessage {
    body: BytesMut,
    descriptor: Option<MessageDescriptor>,
}

impl BytesMessage {
    /// Create a message with an empty body
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes to the body
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.body.extend_from_slice(bytes);
    }

    /// Get the full body
    pub fn read_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn body_length(&self) -> usize {
        self.body.len()
    }
}

impl_jms_message!(BytesMessage);

/// Closed set of message variants a producer can send
///
/// Each variant knows its payload encoding and format tag. Adding a variant
/// means adding its arm to [`Message::format`] and [`Message::payload`];
/// the exhaustive matches make a missing encoder a compile error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Text(TextMessage),
    Bytes(BytesMessage),
}

impl Message {
    /// Format tag the payload is put with
    pub fn format(&self) -> Format {
        match self {
            Self::Text(_) => Format::String,
            Self::Bytes(_) => Format::None,
        }
    }

    /// Raw payload bytes; a text message without a body has an empty payload
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Text(message) => message.text().map(str::as_bytes).unwrap_or_default(),
            Self::Bytes(message) => message.read_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&TextMessage> {
        match self {
            Self::Text(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&BytesMessage> {
        match self {
            Self::Bytes(message) => Some(message),
            _ => None,
        }
    }
}

impl JmsMessage for Message {
    fn descriptor(&self) -> Option<&MessageDescriptor> {
        match self {
            Self::Text(message) => message.descriptor(),
            Self::Bytes(message) => message.descriptor(),
        }
    }

    fn descriptor_mut(&mut self) -> &mut MessageDescriptor {
        match self {
            Self::Text(message) => message.descriptor_mut(),
            Self::Bytes(message) => message.descriptor_mut(),
        }
    }

    fn set_descriptor(&mut self, descriptor: MessageDescriptor) {
        match self {
            Self::Text(message) => message.set_descriptor(descriptor),
            Self::Bytes(message) => message.set_descriptor(descriptor),
        }
    }

    fn take_descriptor(&mut self) -> Option<MessageDescriptor> {
        match self {
            Self::Text(message) => message.take_descriptor(),
            Self::Bytes(message) => message.take_descriptor(),
        }
    }
}

impl From<TextMessage> for Message {
    fn from(message: TextMessage) -> Self {
        Self::Text(message)
    }
}

impl From<BytesMessage> for Message {
    fn from(message: BytesMessage) -> Self {
        Self::Bytes(message)
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
