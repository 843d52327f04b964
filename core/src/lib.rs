//! # Retiro Core
//!
//! Pure domain logic for the Retiro retreat-booking system.
//!
//! This crate contains everything that can be computed without touching the
//! outside world:
//!
//! - **Access control** ([`access`]): the role hierarchy and the fail-closed
//!   evaluator that gates every admin-facing mutation.
//! - **Pricing** ([`pricing`]): deterministic total computation from a base
//!   offering price, a room-type surcharge, and selected add-ons.
//! - **Validation** ([`validation`]): booking-form validation that collects
//!   every field error in one pass instead of failing on the first.
//! - **Domain types** ([`types`]): identifiers, money, the reservation entity,
//!   and its lifecycle state machine.
//!
//! ## Architecture
//!
//! Every function here is pure and deterministic: time is a parameter, not an
//! ambient read, and nothing performs I/O. The `retiro-booking` crate layers
//! persistence and notification on top of these primitives.
//!
//! ## Example
//!
//! ```
//! use retiro_core::access::can_access;
//! use retiro_core::pricing::compute_total;
//! use retiro_core::types::Money;
//!
//! // A moderator may manage reservations, an editor may not.
//! assert!(can_access("moderator", Some("moderator")));
//! assert!(!can_access("editor", Some("moderator")));
//!
//! // Pricing is a pure lookup against fixed tables.
//! let total = compute_total(Money::from_euros(1299), "private", &["transport", "massage"]);
//! assert_eq!(total, Ok(Money::from_euros(1629)));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod access;
pub mod pricing;
pub mod types;
pub mod validation;

// Re-export the types callers touch on every request.
pub use access::{AccessRule, Role, RulePartition, can_access, visible_operations};
pub use pricing::{PricingError, compute_total};
pub use types::{
    Money, Principal, Reservation, ReservationId, ReservationNumber, ReservationStatus,
    RetreatId, RetreatOffering,
};
pub use validation::{BookingRequest, ValidatedBooking, ValidationErrors, validate_booking};
