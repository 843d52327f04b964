//! Concrete reservation-store implementations.
//!
//! The PostgreSQL store lives behind the `postgres` feature so the default
//! build (and the test suite) needs no database.

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresReservationStore;
