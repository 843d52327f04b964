//! Provider traits for the reservation lifecycle manager.
//!
//! Providers are **interfaces**, not implementations. The service depends on
//! these traits; the application wires in concrete implementations:
//!
//! - **Production**: [`crate::stores::PostgresReservationStore`] (behind the
//!   `postgres` feature) and [`SmtpEmailProvider`].
//! - **Testing**: the in-memory implementations in [`crate::mocks`], with
//!   programmable failure injection.
//!
//! The store is the single source of truth for reservation state; the
//! service keeps no cache, so every read re-fetches current state.

pub mod clock;
pub mod email;
pub mod smtp_email;
pub mod store;

// Re-export provider traits
pub use clock::{Clock, SystemClock};
pub use email::{EmailError, EmailProvider};
pub use smtp_email::SmtpEmailProvider;
pub use store::{ReservationStore, StoreError};
