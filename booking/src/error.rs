//! Error types for reservation operations.

use retiro_core::access::Role;
use retiro_core::types::{ReservationId, ReservationStatus};
use retiro_core::validation::ValidationErrors;
use thiserror::Error;

/// Result type alias for reservation operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Error taxonomy for the reservation lifecycle manager.
///
/// Validation and authorization failures are detected before any side
/// effect; persistence failures propagate directly. Notification failures
/// are deliberately absent — they never change a submission's outcome.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookingError {
    /// One or more submitted fields failed shape or range rules. Carries the
    /// full per-field list; nothing was persisted.
    #[error("{errors}")]
    ValidationFailed {
        /// Every field problem found in the submission.
        errors: ValidationErrors,
    },

    /// The principal's role ranks below the operation's requirement. No
    /// mutation occurred; retrying will not help.
    #[error("role `{role}` lacks the required `{required}` privileges")]
    Forbidden {
        /// The principal's raw role claim.
        role: String,
        /// The role the operation demands.
        required: Role,
    },

    /// The requested status change is not a legal edge from the current
    /// state. The stored record is unchanged; refresh before retrying.
    #[error("cannot move a {from} reservation to {requested}")]
    InvalidTransition {
        /// Status the reservation currently holds.
        from: ReservationStatus,
        /// Status that was requested.
        requested: ReservationStatus,
    },

    /// The referenced reservation does not exist in the store.
    #[error("reservation {id} not found")]
    NotFound {
        /// The identifier that resolved to nothing.
        id: ReservationId,
    },

    /// The underlying store failed. Retryable infrastructure error; for a
    /// submission this means nothing was created.
    #[error("persistence failure: {reason}")]
    Persistence {
        /// Backend description of the failure.
        reason: String,
    },
}

impl From<crate::providers::StoreError> for BookingError {
    fn from(error: crate::providers::StoreError) -> Self {
        Self::Persistence {
            reason: error.to_string(),
        }
    }
}

impl BookingError {
    /// Returns `true` if this error is the caller's to fix (bad input,
    /// missing privileges, stale state) rather than an infrastructure fault.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed { .. }
                | Self::Forbidden { .. }
                | Self::InvalidTransition { .. }
                | Self::NotFound { .. }
        )
    }

    /// Returns `true` if retrying the same call later could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}
