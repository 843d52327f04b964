//! Mock reservation store for testing.

use crate::providers::{ReservationStore, StoreError};
use chrono::{DateTime, Utc};
use retiro_core::types::{Reservation, ReservationId, ReservationNumber, ReservationStatus};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    reservations: HashMap<ReservationId, Reservation>,
    numbers: HashSet<ReservationNumber>,
    /// Next N inserts fail with a backend error.
    fail_inserts: u32,
    /// Next N inserts fail with a duplicate-number violation.
    duplicate_inserts: u32,
    /// Next N `reservation_number_exists` calls report a hit.
    precheck_hits: u32,
    /// How many times `reservation_number_exists` was called.
    precheck_calls: u32,
}

/// Mock reservation store.
///
/// In-memory storage with the same uniqueness semantics as the real table,
/// plus failure injection for the insert and pre-check paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryReservationStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` inserts fail with a backend error.
    pub fn fail_next_inserts(&self, n: u32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_inserts = n;
        }
    }

    /// Make the next `n` inserts fail with a duplicate-number violation.
    pub fn duplicate_next_inserts(&self, n: u32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.duplicate_inserts = n;
        }
    }

    /// Make the next `n` number pre-checks report an existing number.
    pub fn report_existing_number(&self, n: u32) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.precheck_hits = n;
        }
    }

    /// How many times the number pre-check was consulted.
    #[must_use]
    pub fn precheck_calls(&self) -> u32 {
        self.inner.lock().map(|inner| inner.precheck_calls).unwrap_or(0)
    }

    /// Number of stored reservations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.reservations.len()).unwrap_or(0)
    }

    /// Whether the store holds no reservations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a stored reservation directly, bypassing the trait.
    #[must_use]
    pub fn get(&self, id: ReservationId) -> Option<Reservation> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.reservations.get(&id).cloned())
    }

    /// Place a reservation directly into storage, bypassing the trait.
    pub fn seed(&self, reservation: Reservation) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.numbers.insert(reservation.number.clone());
            inner.reservations.insert(reservation.id, reservation);
        }
    }
}

impl ReservationStore for InMemoryReservationStore {
    fn insert(
        &self,
        reservation: &Reservation,
    ) -> impl Future<Output = Result<Reservation, StoreError>> + Send {
        let inner = Arc::clone(&self.inner);
        let reservation = reservation.clone();

        async move {
            let mut guard = inner
                .lock()
                .map_err(|_| StoreError::Backend("mock store poisoned".to_string()))?;

            if guard.fail_inserts > 0 {
                guard.fail_inserts -= 1;
                return Err(StoreError::Backend("injected insert failure".to_string()));
            }
            if guard.duplicate_inserts > 0 {
                guard.duplicate_inserts -= 1;
                return Err(StoreError::DuplicateReservationNumber);
            }
            if !guard.numbers.insert(reservation.number.clone()) {
                return Err(StoreError::DuplicateReservationNumber);
            }

            guard.reservations.insert(reservation.id, reservation.clone());
            Ok(reservation)
        }
    }

    fn find_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, StoreError>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let guard = inner
                .lock()
                .map_err(|_| StoreError::Backend("mock store poisoned".to_string()))?;
            Ok(guard.reservations.get(&id).cloned())
        }
    }

    fn update_status(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        next: ReservationStatus,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<Reservation>, StoreError>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut guard = inner
                .lock()
                .map_err(|_| StoreError::Backend("mock store poisoned".to_string()))?;

            match guard.reservations.get_mut(&id) {
                Some(stored) if stored.status == expected => {
                    stored.status = next;
                    stored.updated_at = updated_at;
                    Ok(Some(stored.clone()))
                }
                _ => Ok(None),
            }
        }
    }

    fn reservation_number_exists(
        &self,
        number: &ReservationNumber,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send {
        let inner = Arc::clone(&self.inner);
        let number = number.clone();

        async move {
            let mut guard = inner
                .lock()
                .map_err(|_| StoreError::Backend("mock store poisoned".to_string()))?;

            guard.precheck_calls += 1;
            if guard.precheck_hits > 0 {
                guard.precheck_hits -= 1;
                return Ok(true);
            }
            Ok(guard.numbers.contains(&number))
        }
    }
}
