//! Booking environment.
//!
//! This module defines the environment type for dependency injection into
//! the reservation service.

use crate::providers::{Clock, EmailProvider, ReservationStore};
use std::sync::Arc;

/// External dependencies of the reservation service.
///
/// # Type Parameters
///
/// - `S`: Reservation store
/// - `E`: Email provider
#[derive(Clone)]
pub struct BookingEnvironment<S, E>
where
    S: ReservationStore + Clone,
    E: EmailProvider + Clone,
{
    /// Reservation store (single source of truth for reservation state).
    pub store: S,

    /// Email provider (best-effort notifications).
    pub email: E,

    /// Clock for timestamps and age checks.
    pub clock: Arc<dyn Clock>,
}

impl<S, E> BookingEnvironment<S, E>
where
    S: ReservationStore + Clone,
    E: EmailProvider + Clone,
{
    /// Create a new booking environment.
    #[must_use]
    pub fn new(store: S, email: E, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            email,
            clock,
        }
    }
}
