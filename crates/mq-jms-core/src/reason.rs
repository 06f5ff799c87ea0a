//! Native completion and reason codes reported by the queue manager.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome class of a queue manager call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionCode {
    Ok,
    Warning,
    Failed,
}

impl CompletionCode {
    /// Numeric value as reported on the wire
    pub fn value(&self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Failed => 2,
        }
    }
}

impl fmt::Display for CompletionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ok => "MQCC_OK",
            Self::Warning => "MQCC_WARNING",
            Self::Failed => "MQCC_FAILED",
        };
        write!(f, "{} [{}]", name, self.value())
    }
}

/// Reason code qualifying a completion code
///
/// Kept as an open newtype rather than an enum: queue managers report codes
/// this crate has no name for, and those must still round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReasonCode(i32);

impl ReasonCode {
    pub const NONE: Self = Self(0);
    pub const BACKED_OUT: Self = Self(2003);
    pub const CONNECTION_BROKEN: Self = Self(2009);
    pub const EXPIRY_ERROR: Self = Self(2013);
    pub const HCONN_ERROR: Self = Self(2018);
    pub const HOBJ_ERROR: Self = Self(2019);
    pub const MSG_TOO_BIG_FOR_Q: Self = Self(2030);
    pub const NOT_AUTHORIZED: Self = Self(2035);
    pub const NOT_OPEN_FOR_OUTPUT: Self = Self(2039);
    pub const OBJECT_IN_USE: Self = Self(2042);
    pub const OPTIONS_ERROR: Self = Self(2046);
    pub const PERSISTENCE_ERROR: Self = Self(2047);
    pub const PUT_INHIBITED: Self = Self(2051);
    pub const Q_FULL: Self = Self(2053);
    pub const Q_MGR_NOT_AVAILABLE: Self = Self(2059);
    pub const STORAGE_NOT_AVAILABLE: Self = Self(2071);
    pub const SYNCPOINT_NOT_AVAILABLE: Self = Self(2072);
    pub const UNKNOWN_OBJECT_NAME: Self = Self(2085);
    pub const RESOURCE_PROBLEM: Self = Self(2102);
    pub const FORMAT_ERROR: Self = Self(2110);
    pub const Q_MGR_QUIESCING: Self = Self(2161);
    pub const Q_MGR_STOPPING: Self = Self(2162);

    const NAMES: &'static [(ReasonCode, &'static str)] = &[
        (Self::NONE, "MQRC_NONE"),
        (Self::BACKED_OUT, "MQRC_BACKED_OUT"),
        (Self::CONNECTION_BROKEN, "MQRC_CONNECTION_BROKEN"),
        (Self::EXPIRY_ERROR, "MQRC_EXPIRY_ERROR"),
        (Self::HCONN_ERROR, "MQRC_HCONN_ERROR"),
        (Self::HOBJ_ERROR, "MQRC_HOBJ_ERROR"),
        (Self::MSG_TOO_BIG_FOR_Q, "MQRC_MSG_TOO_BIG_FOR_Q"),
        (Self::NOT_AUTHORIZED, "MQRC_NOT_AUTHORIZED"),
        (Self::NOT_OPEN_FOR_OUTPUT, "MQRC_NOT_OPEN_FOR_OUTPUT"),
        (Self::OBJECT_IN_USE, "MQRC_OBJECT_IN_USE"),
        (Self::OPTIONS_ERROR, "MQRC_OPTIONS_ERROR"),
        (Self::PERSISTENCE_ERROR, "MQRC_PERSISTENCE_ERROR"),
        (Self::PUT_INHIBITED, "MQRC_PUT_INHIBITED"),
        (Self::Q_FULL, "MQRC_Q_FULL"),
        (Self::Q_MGR_NOT_AVAILABLE, "MQRC_Q_MGR_NOT_AVAILABLE"),
        (Self::STORAGE_NOT_AVAILABLE, "MQRC_STORAGE_NOT_AVAILABLE"),
        (Self::SYNCPOINT_NOT_AVAILABLE, "MQRC_SYNCPOINT_NOT_AVAILABLE"),
        (Self::UNKNOWN_OBJECT_NAME, "MQRC_UNKNOWN_OBJECT_NAME"),
        (Self::RESOURCE_PROBLEM, "MQRC_RESOURCE_PROBLEM"),
        (Self::FORMAT_ERROR, "MQRC_FORMAT_ERROR"),
        (Self::Q_MGR_QUIESCING, "MQRC_Q_MGR_QUIESCING"),
        (Self::Q_MGR_STOPPING, "MQRC_Q_MGR_STOPPING"),
    ];

    /// Wrap a raw reason code
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw numeric value
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Look up the symbolic `MQRC_*` name, if known
    pub fn lookup(&self) -> Option<&'static str> {
        Self::NAMES
            .iter()
            .find(|(code, _)| code == self)
            .map(|(_, name)| *name)
    }

    /// Human-readable description, falling back to the number for unknown codes
    pub fn name(&self) -> String {
        match self.lookup() {
            Some(name) => name.to_string(),
            None => format!("MQRC_UNKNOWN_{}", self.0),
        }
    }

    /// Check if the condition is expected to clear without intervention
    pub fn is_transient(&self) -> bool {
        matches!(
            *self,
            Self::CONNECTION_BROKEN
                | Self::OBJECT_IN_USE
                | Self::PUT_INHIBITED
                | Self::Q_FULL
                | Self::Q_MGR_NOT_AVAILABLE
                | Self::Q_MGR_QUIESCING
                | Self::Q_MGR_STOPPING
                | Self::STORAGE_NOT_AVAILABLE
                | Self::RESOURCE_PROBLEM
        )
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.0)
    }
}

impl From<i32> for ReasonCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[path = "reason_tests.rs"]
mod tests;
