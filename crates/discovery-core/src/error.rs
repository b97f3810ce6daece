//! Error types for Discovery Core
//!
//! The taxonomy is narrow on purpose:
//! - storage failures are caught at the store boundary and only logged
//! - navigation refusals are returned to the wizard UI
//! - unknown fields in a partial update are rejected
//!
//! Missing required fields are not errors; they are reported as values by
//! the missing-field evaluator.

use discovery_model::StepId;

/// Main discovery error type
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Durable storage failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Navigation request refused
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Partial update named a field the record does not have
    #[error("unknown discovery field: {0}")]
    UnknownField(String),

    /// Partial update could not be applied to the record
    #[error("invalid patch: {0}")]
    InvalidPatch(String),

    /// Configuration could not be read
    #[error("configuration error: {0}")]
    Config(String),
}

impl DiscoveryError {
    /// Whether the wizard can carry on with its in-memory state
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// Whether the error came from the caller's input
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Navigation(_) | Self::UnknownField(_) | Self::InvalidPatch(_)
        )
    }
}

/// Durable key-value storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend refused the operation (quota, read-only, offline)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Navigation refusals
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// Target is not a wizard step
    #[error("step {0} is out of range")]
    StepOutOfRange(StepId),

    /// Target has not been unlocked yet
    #[error("step {target} is locked (current step {current})")]
    StepLocked {
        /// Requested step
        target: StepId,
        /// Step the wizard is on
        current: StepId,
    },
}
