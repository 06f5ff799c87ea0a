//! Error types for producer and transport operations.

use crate::reason::{CompletionCode, ReasonCode};
use std::fmt;
use thiserror::Error;

/// Queue manager call that produced a native failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Open,
    Put,
    Close,
    Commit,
    Backout,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "MQOPEN",
            Self::Put => "MQPUT",
            Self::Close => "MQCLOSE",
            Self::Commit => "MQCMIT",
            Self::Backout => "MQBACK",
        };
        f.write_str(name)
    }
}

/// Native failure reported by the queue manager
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{verb}: {completion_code} {reason_code}")]
pub struct TransportError {
    pub verb: Verb,
    pub completion_code: CompletionCode,
    pub reason_code: ReasonCode,
}

impl TransportError {
    /// Create a failed-completion error for the given call
    pub fn failed(verb: Verb, reason_code: ReasonCode) -> Self {
        Self {
            verb,
            completion_code: CompletionCode::Failed,
            reason_code,
        }
    }

    /// Check if error is transient and the call may be retried
    pub fn is_transient(&self) -> bool {
        self.reason_code.is_transient()
    }
}

/// Uniform exception surfaced by producer and context operations
///
/// Callers never see native codes directly: `reason` carries the symbolic
/// description, `error_code` the numeric reason code rendered as a string,
/// and the original [`TransportError`] is kept as the linked cause.
#[derive(Debug, Error)]
#[error("{reason} (error code {error_code})")]
pub struct JmsException {
    reason: String,
    error_code: String,
    #[source]
    linked: Option<TransportError>,
}

impl JmsException {
    /// Create a new exception
    pub fn new(
        reason: impl Into<String>,
        error_code: impl Into<String>,
        linked: Option<TransportError>,
    ) -> Self {
        Self {
            reason: reason.into(),
            error_code: error_code.into(),
            linked,
        }
    }

    /// Get the human-readable reason
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// Get the native failure this exception wraps
    pub fn linked_error(&self) -> Option<&TransportError> {
        self.linked.as_ref()
    }

    /// Get the native reason code, if a native failure is linked
    pub fn reason_code(&self) -> Option<ReasonCode> {
        self.linked.as_ref().map(|e| e.reason_code)
    }

    /// Check if the underlying failure is transient
    pub fn is_transient(&self) -> bool {
        self.linked
            .as_ref()
            .map(TransportError::is_transient)
            .unwrap_or(false)
    }
}

impl From<TransportError> for JmsException {
    fn from(err: TransportError) -> Self {
        let reason_code = err.reason_code;
        Self::new(
            reason_code.name(),
            reason_code.value().to_string(),
            Some(err),
        )
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {key}")]
    Missing { key: String },

    #[error("Configuration parsing failed: {message}")]
    Parsing { message: String },
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => Self::Missing { key },
            other => Self::Parsing {
                message: other.to_string(),
            },
        }
    }
}

/// Validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    Required { field: String },

    #[error("Invalid format for {field}: {message}")]
    InvalidFormat { field: String, message: String },

    #[error("Value out of range for {field}: {message}")]
    OutOfRange { field: String, message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
