//! Typed outcome of a record operation

use serde::{Deserialize, Serialize};

/// Result of a record operation the service answered.
///
/// `Failed` keeps the status and body so callers can decide how much detail
/// they need; [`RecordOutcome::ok`] collapses to a plain "got it or didn't".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordOutcome<T> {
    Success(T),
    Failed { status: u16, body: String },
}

impl<T> RecordOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failed(&self) -> bool {
        !self.is_success()
    }

    /// Status code of a failed outcome
    pub fn failed_status(&self) -> Option<u16> {
        match self {
            Self::Success(_) => None,
            Self::Failed { status, .. } => Some(*status),
        }
    }

    /// Drop the failure detail
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RecordOutcome<U> {
        match self {
            Self::Success(value) => RecordOutcome::Success(f(value)),
            Self::Failed { status, body } => RecordOutcome::Failed { status, body },
        }
    }

    /// Convert into a `Result`, failing with the status and body text
    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failed { status, body } => Err(format!("status {}: {}", status, body)),
        }
    }
}
