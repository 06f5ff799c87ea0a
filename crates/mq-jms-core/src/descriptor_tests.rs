//! Tests for descriptor and option types.

use super::*;

#[test]
fn test_delivery_mode_from_jms_constants() {
    assert_eq!(DeliveryMode::try_from(1i32), Ok(DeliveryMode::NonPersistent));
    assert_eq!(DeliveryMode::try_from(2i32), Ok(DeliveryMode::Persistent));
    assert!(matches!(
        DeliveryMode::try_from(3i32),
        Err(ValidationError::OutOfRange { .. })
    ));
    assert_eq!(i32::from(DeliveryMode::Persistent), DeliveryMode::PERSISTENT);
}

#[test]
fn test_delivery_mode_maps_to_persistence() {
    assert_eq!(DeliveryMode::default(), DeliveryMode::NonPersistent);
    assert_eq!(
        DeliveryMode::Persistent.persistence(),
        Persistence::Persistent
    );
    assert_eq!(
        DeliveryMode::NonPersistent.persistence(),
        Persistence::NotPersistent
    );
}

#[test]
fn test_expiry_from_time_to_live() {
    assert_eq!(Expiry::from_time_to_live(0), Expiry::Unlimited);
    assert_eq!(Expiry::from_time_to_live(5000), Expiry::Tenths(50));
    assert_eq!(Expiry::from_time_to_live(150), Expiry::Tenths(1));
    assert_eq!(Expiry::from_time_to_live(1), Expiry::Tenths(1));
    assert_eq!(
        Expiry::from_time_to_live(u64::MAX),
        Expiry::Tenths(Expiry::MAX_TENTHS)
    );
    assert_eq!(Expiry::Tenths(50).as_millis(), Some(5000));
    assert_eq!(Expiry::Unlimited.as_millis(), None);
}

#[test]
fn test_format_names() {
    assert_eq!(Format::String.as_str(), "MQSTR   ");
    assert_eq!(Format::None.as_str().len(), 8);
    assert_eq!(Format::String.to_string(), "MQSTR");
    assert_eq!(Format::default(), Format::None);
}

#[test]
fn test_message_id_generation() {
    let id1 = MessageId::generate(1);
    let id2 = MessageId::generate(2);
    assert_ne!(id1, id2);
    assert!(!id1.is_none());
    assert_eq!(&id2.as_bytes()[16..], &2u64.to_be_bytes());

    let jms_id = id1.to_jms_id();
    assert!(jms_id.starts_with("ID:"));
    assert_eq!(jms_id.len(), 3 + 48);
    assert!(MessageId::from_bytes([0; 24]).is_none());
}

#[test]
fn test_descriptor_expiration_needs_put_time() {
    let mut descriptor = MessageDescriptor::new();
    descriptor.expiry = Expiry::Tenths(10);
    assert_eq!(descriptor.expires_at(), None);

    let put_at = Utc::now();
    descriptor.put_timestamp = Some(put_at);
    assert_eq!(
        descriptor.expires_at(),
        Some(put_at + chrono::Duration::seconds(1))
    );
}

#[test]
fn test_descriptor_expiration_beyond_calendar_range() {
    let mut descriptor = MessageDescriptor::new();
    descriptor.expiry = Expiry::Tenths(10);
    descriptor.put_timestamp = Some(DateTime::<Utc>::MAX_UTC);
    assert_eq!(descriptor.expires_at(), None);
}

#[test]
fn test_fresh_descriptor_defaults() {
    let descriptor = MessageDescriptor::new()
        .with_reply_to("REPLY.Q")
        .with_correlation_id("corr-1");
    assert_eq!(descriptor.persistence, Persistence::AsQueueDefault);
    assert_eq!(descriptor.expiry, Expiry::Unlimited);
    assert_eq!(descriptor.message_id, None);
    assert_eq!(descriptor.reply_to_queue.as_deref(), Some("REPLY.Q"));
    assert_eq!(descriptor.correlation_id.as_deref(), Some("corr-1"));
}

#[test]
fn test_send_options() {
    let open = OpenOptions::for_send();
    assert!(open.output && open.fail_if_quiescing && open.input_as_queue_default);

    let put = PutMessageOptions::new(true);
    assert!(put.syncpoint);
    assert!(put.new_message_id);
    assert!(!PutMessageOptions::new(false).syncpoint);
}
