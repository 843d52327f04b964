//! Reservation store trait.

use chrono::{DateTime, Utc};
use retiro_core::types::{Reservation, ReservationId, ReservationNumber, ReservationStatus};
use std::future::Future;
use thiserror::Error;

/// Failure of a store operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Insert hit the unique constraint on the reservation number. The
    /// service handles this with one regenerate-and-retry cycle.
    #[error("reservation number already exists")]
    DuplicateReservationNumber,

    /// Any other backend failure (connectivity, constraint, corruption).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence collaborator for reservations.
///
/// The store's unique constraint on the reservation number is the final
/// uniqueness arbiter; [`ReservationStore::reservation_number_exists`] is
/// only a best-effort pre-check.
pub trait ReservationStore: Send + Sync {
    /// Insert a new reservation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateReservationNumber`] on a
    /// reservation-number collision, [`StoreError::Backend`] otherwise.
    fn insert(
        &self,
        reservation: &Reservation,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send;

    /// Fetch a reservation by identifier. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the lookup fails.
    fn find_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, StoreError>> + Send;

    /// Conditionally move a reservation from `expected` to `next`, stamping
    /// `updated_at`, in a single atomic update keyed by identifier and
    /// current status.
    ///
    /// Returns the refreshed record, or `None` if no row matched — either
    /// the id is unknown or the status changed underneath the caller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the update fails.
    fn update_status(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        next: ReservationStatus,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<Reservation>, StoreError>> + Send;

    /// Best-effort check whether a reservation number is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the lookup fails.
    fn reservation_number_exists(
        &self,
        number: &ReservationNumber,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
