//! Message producer: the send pipeline.
//!
//! Every send is a self-contained cycle: open the destination, build the
//! descriptor from producer options and the message, put, close. Native
//! failures from the open or the put are normalized into [`JmsException`].
//!
//! A [`Producer`] may be shared for concurrent sends (`send` takes `&self`),
//! but reconfiguring it requires `&mut self`, so options cannot change under
//! an in-flight send.

use crate::config::ProducerConfig;
use crate::context::JmsContext;
use crate::descriptor::{DeliveryMode, Expiry, OpenOptions, PutMessageOptions};
use crate::destination::Destination;
use crate::error::{JmsException, TransportError};
use crate::message::{JmsMessage, Message};
use std::fmt;
use tracing::{debug, warn};

#[cfg(test)]
#[path = "producer_tests.rs"]
mod tests;

/// Sends messages to destinations using a fixed set of delivery options
pub struct Producer<'ctx> {
    context: &'ctx JmsContext,
    delivery_mode: DeliveryMode,
    time_to_live: i64,
}

impl<'ctx> Producer<'ctx> {
    pub(crate) fn new(context: &'ctx JmsContext) -> Self {
        Self {
            context,
            delivery_mode: DeliveryMode::default(),
            time_to_live: 0,
        }
    }

    /// Send a message to the destination
    ///
    /// The descriptor used for the put is stored back on `message`, so after
    /// a successful send its generated fields (message id, timestamp) can be
    /// read through [`JmsMessage`].
    pub async fn send(
        &self,
        destination: &dyn Destination,
        message: &mut Message,
    ) -> Result<(), JmsException> {
        let queue_name = destination.destination_name();

        match self.put_message(queue_name, message).await {
            Ok(()) => {
                debug!(
                    queue = %queue_name,
                    message_id = ?message.jms_message_id(),
                    "Message sent"
                );
                Ok(())
            }
            Err(e) => {
                warn!(queue = %queue_name, error = %e, "Failed to send message");
                Err(JmsException::from(e))
            }
        }
    }

    /// Send a text message with the given body
    pub async fn send_string(
        &self,
        destination: &dyn Destination,
        body: impl Into<String>,
    ) -> Result<(), JmsException> {
        let mut message = Message::from(self.context.create_text_message_with(body));
        self.send(destination, &mut message).await
    }

    /// Send a bytes message with the given body
    pub async fn send_bytes(
        &self,
        destination: &dyn Destination,
        body: &[u8],
    ) -> Result<(), JmsException> {
        let mut bytes = self.context.create_bytes_message();
        bytes.write_bytes(body);

        let mut message = Message::from(bytes);
        self.send(destination, &mut message).await
    }

    async fn put_message(
        &self,
        queue_name: &str,
        message: &mut Message,
    ) -> Result<(), TransportError> {
        // Closed when `handle` goes out of scope, whatever the put returns
        let mut handle = self
            .context
            .open_destination(queue_name, OpenOptions::for_send())
            .await?;

        let options = PutMessageOptions::new(self.context.session_mode().is_transacted());

        // A descriptor already on the message (e.g. carrying reply-to) is the base
        let mut descriptor = message.take_descriptor().unwrap_or_default();
        descriptor.persistence = self.delivery_mode.persistence();
        descriptor.format = message.format();
        if self.time_to_live > 0 {
            descriptor.expiry = Expiry::from_time_to_live(self.time_to_live as u64);
        }

        let result = handle
            .put(&mut descriptor, &options, message.payload())
            .await;
        message.set_descriptor(descriptor);
        result
    }

    /// Set the delivery mode for subsequent sends
    ///
    /// Accepts a [`DeliveryMode`] or a JMS numeric constant. An unrecognized
    /// value is logged and ignored so calls can still be chained.
    pub fn set_delivery_mode<M>(&mut self, mode: M) -> &mut Self
    where
        M: TryInto<DeliveryMode>,
        M::Error: fmt::Display,
    {
        match mode.try_into() {
            Ok(mode) => self.delivery_mode = mode,
            Err(e) => warn!(
                error = %e,
                current = ?self.delivery_mode,
                "Invalid DeliveryMode specified; keeping current value"
            ),
        }
        self
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    /// Set the time-to-live, in milliseconds, for subsequent sends
    ///
    /// Zero means messages never expire. A negative value is logged and
    /// ignored so calls can still be chained.
    pub fn set_time_to_live(&mut self, time_to_live: i64) -> &mut Self {
        if time_to_live >= 0 {
            self.time_to_live = time_to_live;
        } else {
            warn!(
                time_to_live,
                current = self.time_to_live,
                "Invalid TimeToLive specified; keeping current value"
            );
        }
        self
    }

    pub fn time_to_live(&self) -> i64 {
        self.time_to_live
    }

    /// Apply configured delivery options
    pub fn configure(&mut self, config: &ProducerConfig) -> &mut Self {
        self.set_delivery_mode(config.delivery_mode)
            .set_time_to_live(config.time_to_live_ms)
    }
}

impl fmt::Debug for Producer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("delivery_mode", &self.delivery_mode)
            .field("time_to_live", &self.time_to_live)
            .finish_non_exhaustive()
    }
}
