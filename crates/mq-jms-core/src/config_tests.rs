//! Tests for configuration loading and validation.

use super::*;
use serial_test::serial;
use std::io::Write;

fn write_yaml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

// ============================================================================
// Defaults and Validation
// ============================================================================

mod defaults {
    use super::*;

    #[test]
    fn test_default_configuration_is_valid() {
        let config = MqJmsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.session_mode, SessionMode::AutoAcknowledge);
        assert_eq!(config.producer.delivery_mode, DeliveryMode::NonPersistent);
        assert_eq!(config.producer.time_to_live_ms, 0);
        assert_eq!(config.queue_manager.name, "QM1");
        assert_eq!(config.queue_manager.max_queue_depth, 5000);
    }

    #[test]
    fn test_negative_time_to_live_rejected() {
        let mut config = MqJmsConfig::default();
        config.producer.time_to_live_ms = -5;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::Invalid { .. })
        ));
    }

    #[test]
    fn test_invalid_queue_name_rejected() {
        let mut config = InMemoryConfig::default();
        config.queues.push("not-valid".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("not-valid"));
    }

    #[test]
    fn test_duplicate_queue_rejected() {
        let mut config = InMemoryConfig::default();
        config.queues.push("DEV.QUEUE.1".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = InMemoryConfig {
            max_queue_depth: 0,
            ..InMemoryConfig::default()
        };
        assert!(config.validate().is_err());

        let config = InMemoryConfig {
            max_message_length: 0,
            ..InMemoryConfig::default()
        };
        assert!(config.validate().is_err());

        let config = InMemoryConfig {
            name: "  ".to_string(),
            ..InMemoryConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::Missing { .. })
        ));
    }
}

// ============================================================================
// Loading
// ============================================================================

mod loading {
    use super::*;

    #[test]
    #[serial]
    fn test_load_without_sources_uses_defaults() {
        let config = MqJmsConfig::load(None).expect("defaults should load");
        assert_eq!(config, MqJmsConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_from_yaml_file() {
        let file = write_yaml(
            r#"
session_mode: transacted
producer:
  delivery_mode: PERSISTENT
  time_to_live_ms: 5000
queue_manager:
  name: QM2
  queues:
    - APP.REQUEST
    - APP.REPLY
  auto_define_queues: true
"#,
        );

        let config = MqJmsConfig::load(Some(file.path())).expect("file should load");
        assert_eq!(config.session_mode, SessionMode::Transacted);
        assert_eq!(config.producer.delivery_mode, DeliveryMode::Persistent);
        assert_eq!(config.producer.time_to_live_ms, 5000);
        assert_eq!(config.queue_manager.name, "QM2");
        assert_eq!(config.queue_manager.queues, vec!["APP.REQUEST", "APP.REPLY"]);
        assert!(config.queue_manager.auto_define_queues);
        // Unspecified fields keep their defaults
        assert_eq!(config.queue_manager.max_queue_depth, 5000);
    }

    #[test]
    #[serial]
    fn test_missing_file_is_an_error() {
        let result = MqJmsConfig::load(Some(Path::new("/nonexistent/mq-jms.yaml")));
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_file_contents_fail_validation() {
        let file = write_yaml(
            r#"
producer:
  time_to_live_ms: -1
"#,
        );

        let result = MqJmsConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigurationError::Invalid { .. })));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let file = write_yaml(
            r#"
producer:
  time_to_live_ms: 1000
"#,
        );

        std::env::set_var("MQJMS__PRODUCER__TIME_TO_LIVE_MS", "7000");
        std::env::set_var("MQJMS__QUEUE_MANAGER__QUEUES", "ENV.Q1,ENV.Q2");
        let result = MqJmsConfig::load(Some(file.path()));
        std::env::remove_var("MQJMS__PRODUCER__TIME_TO_LIVE_MS");
        std::env::remove_var("MQJMS__QUEUE_MANAGER__QUEUES");

        let config = result.expect("config should load");
        assert_eq!(config.producer.time_to_live_ms, 7000);
        assert_eq!(config.queue_manager.queues, vec!["ENV.Q1", "ENV.Q2"]);
    }
}
