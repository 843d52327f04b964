//! Domain types for the Retiro reservation system.
//!
//! This module contains the value objects and entities shared by the access
//! control evaluator, the pricing tables, and the reservation lifecycle:
//! identifiers, money, room and add-on catalogs, and the reservation entity
//! itself.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a reservation record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Creates a new random `ReservationId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `ReservationId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a retreat offering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetreatId(Uuid);

impl RetreatId {
    /// Creates a new random `RetreatId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `RetreatId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RetreatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RetreatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an authenticated principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    /// Creates a new random `PrincipalId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a `PrincipalId` from a `Uuid`.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable, store-unique reservation number.
///
/// Assigned once at creation and immutable afterwards. The generator in the
/// booking crate combines a date component with a random suffix; the
/// persistence layer's unique constraint is the final uniqueness arbiter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReservationNumber(String);

impl ReservationNumber {
    /// Wrap an already-formatted reservation number.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// The number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object (cents-based to avoid floating point errors)
// ============================================================================

/// Represents money in euro cents to avoid floating-point arithmetic errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a `Money` value from whole euros.
    ///
    /// # Panics
    ///
    /// Panics if the conversion would overflow (euros * 100 > `u64::MAX`).
    /// Use [`Money::checked_from_euros`] for non-panicking conversion.
    #[must_use]
    #[allow(clippy::panic)]
    pub const fn from_euros(euros: u64) -> Self {
        match euros.checked_mul(100) {
            Some(cents) => Self(cents),
            None => panic!("Money::from_euros overflow"),
        }
    }

    /// Creates a `Money` value from whole euros with overflow checking.
    #[must_use]
    pub const fn checked_from_euros(euros: u64) -> Option<Self> {
        match euros.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Adds two amounts, saturating at `u64::MAX` cents.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Whether this amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Money {
    /// Formats with standard currency precision, e.g. `1299.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ============================================================================
// Catalog enumerations (room types, add-ons, payment methods)
// ============================================================================

/// Room-type selection for a reservation.
///
/// Each room type carries a fixed surcharge over the offering's base price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Shared room, no surcharge.
    Shared,
    /// Private room.
    Private,
    /// Suite.
    Suite,
}

impl RoomType {
    /// Surcharge added on top of the offering's base price.
    #[must_use]
    pub const fn surcharge(self) -> Money {
        match self {
            Self::Shared => Money::from_cents(0),
            Self::Private => Money::from_cents(20_000),
            Self::Suite => Money::from_cents(40_000),
        }
    }

    /// The wire/storage identifier for this room type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Private => "private",
            Self::Suite => "suite",
        }
    }

    /// Parse a room-type identifier. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "shared" => Some(Self::Shared),
            "private" => Some(Self::Private),
            "suite" => Some(Self::Suite),
            _ => None,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional priced extra a booker may select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddOn {
    /// Airport transport.
    #[serde(rename = "transport")]
    Transport,
    /// Therapeutic massage.
    #[serde(rename = "massage")]
    Massage,
    /// Nutrition consult.
    #[serde(rename = "nutrition")]
    Nutrition,
    /// Materials kit.
    #[serde(rename = "materials")]
    Materials,
}

impl AddOn {
    /// Fixed price of this add-on.
    #[must_use]
    pub const fn price(self) -> Money {
        match self {
            Self::Transport => Money::from_cents(5_000),
            Self::Massage => Money::from_cents(8_000),
            Self::Nutrition => Money::from_cents(6_000),
            Self::Materials => Money::from_cents(4_000),
        }
    }

    /// The wire/storage identifier for this add-on.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Massage => "massage",
            Self::Nutrition => "nutrition",
            Self::Materials => "materials",
        }
    }

    /// Parse an add-on identifier. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "transport" => Some(Self::Transport),
            "massage" => Some(Self::Massage),
            "nutrition" => Some(Self::Nutrition),
            "materials" => Some(Self::Materials),
            _ => None,
        }
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment-method preference recorded with the reservation.
///
/// Payment itself is settled out-of-band (instructions go out by email), so
/// this is a preference, not a gateway integration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Bank transfer ahead of arrival.
    Transfer,
    /// Card on arrival.
    Card,
    /// Cash on arrival.
    Cash,
}

impl PaymentMethod {
    /// The wire/storage identifier for this payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }

    /// Parse a payment-method identifier. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "transfer" => Some(Self::Transfer),
            "card" => Some(Self::Card),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Reservation lifecycle
// ============================================================================

/// Lifecycle status of a reservation.
///
/// The legal edges are `Pending → Confirmed → Completed` plus
/// `Pending | Confirmed → Cancelled`. `Completed` and `Cancelled` are
/// terminal; no transition (including a self-transition) leaves them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Initial status assigned at creation.
    Pending,
    /// Accepted by an operator.
    Confirmed,
    /// The stay took place.
    Completed,
    /// Withdrawn before completion.
    Cancelled,
}

impl ReservationStatus {
    /// Whether no further transition is permitted out of this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the edge `self → next` is a legal lifecycle transition.
    ///
    /// Self-transitions are never legal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// The wire/storage identifier for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a status identifier. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Principals and offerings
// ============================================================================

/// An authenticated actor subject to access checks.
///
/// The role is kept as the raw claim string (as it arrives from the session
/// layer) so the evaluator's unknown-role fail-closed path stays real: a
/// corrupted or legacy role value ranks below `user`, it does not crash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity of the actor.
    pub id: PrincipalId,
    /// Raw role claim, e.g. `"moderator"`.
    pub role: String,
}

impl Principal {
    /// Create a principal with the given role claim.
    pub fn new(id: PrincipalId, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }
}

/// A retreat offering as resolved by the catalog: the published price always
/// comes from here, never from the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetreatOffering {
    /// Identity of the offering.
    pub id: RetreatId,
    /// Title, denormalized onto reservations for display.
    pub title: String,
    /// Published base price.
    pub base_price: Money,
}

impl RetreatOffering {
    /// Create an offering.
    pub fn new(id: RetreatId, title: impl Into<String>, base_price: Money) -> Self {
        Self {
            id,
            title: title.into(),
            base_price,
        }
    }
}

// ============================================================================
// Reservation entity
// ============================================================================

/// Personal details of the guest making the booking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Date of birth (guests must be adults at submission time).
    pub birth_date: NaiveDate,
    /// Nationality.
    pub nationality: String,
}

/// Mandatory emergency contact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Contact person's name.
    pub name: String,
    /// Contact person's phone number.
    pub phone: String,
}

/// One person's booking for one retreat offering.
///
/// The total is computed once at creation from the offering's base price,
/// the room-type surcharge, and the selected add-ons; it is never silently
/// recomputed. The reservation number is unique and immutable once assigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Record identity.
    pub id: ReservationId,
    /// Store-unique, human-readable reservation number.
    pub number: ReservationNumber,
    /// The booked offering.
    pub retreat_id: RetreatId,
    /// Offering title, denormalized for display.
    pub retreat_title: String,
    /// The guest's personal details.
    pub guest: GuestDetails,
    /// Emergency contact (mandatory).
    pub emergency_contact: EmergencyContact,
    /// Selected room type.
    pub room_type: RoomType,
    /// Dietary preferences, if any.
    pub dietary: Option<String>,
    /// Medical notes, if any.
    pub medical: Option<String>,
    /// Motivation text.
    pub motivation: String,
    /// Selected add-ons (deduplicated, stable order).
    pub add_ons: Vec<AddOn>,
    /// Payment-method preference.
    pub payment_method: PaymentMethod,
    /// Server-computed total price.
    pub total: Money,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Newsletter opt-in flag.
    pub newsletter_opt_in: bool,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Assemble a new `Pending` reservation from a validated booking.
    ///
    /// The caller supplies the already-computed total so that pricing happens
    /// exactly once, against the offering's published price.
    #[must_use]
    pub fn new(
        number: ReservationNumber,
        offering: &RetreatOffering,
        booking: &crate::validation::ValidatedBooking,
        total: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReservationId::new(),
            number,
            retreat_id: offering.id,
            retreat_title: offering.title.clone(),
            guest: booking.guest.clone(),
            emergency_contact: booking.emergency_contact.clone(),
            room_type: booking.room_type,
            dietary: booking.dietary.clone(),
            medical: booking.medical.clone(),
            motivation: booking.motivation.clone(),
            add_ons: booking.add_ons.clone(),
            payment_method: booking.payment_method,
            total,
            status: ReservationStatus::Pending,
            newsletter_opt_in: booking.newsletter_opt_in,
            created_at,
            updated_at: created_at,
        }
    }
}
