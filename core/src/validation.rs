//! Booking submission validation.
//!
//! [`validate_booking`] turns the raw form submission into a
//! [`ValidatedBooking`] or a complete list of field problems. All errors for
//! a submission are collected and returned together — never fail-fast — so a
//! client can surface everything at once. Validation is pure: the submission
//! time is a parameter, and nothing here performs I/O.

use crate::types::{AddOn, EmergencyContact, GuestDetails, PaymentMethod, RoomType};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum age of a guest at submission time. Minors are rejected, not
/// flagged.
const MINIMUM_AGE: i32 = 18;

/// Minimum length of the motivation text after trimming.
const MINIMUM_MOTIVATION_CHARS: usize = 10;

/// Minimum number of digits in a phone number.
const MINIMUM_PHONE_DIGITS: usize = 9;

/// A raw booking submission, exactly as it arrives from the form.
///
/// Everything is a string at this boundary; [`validate_booking`] produces
/// the typed counterpart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email address.
    pub email: String,
    /// Guest phone number.
    pub phone: String,
    /// Guest birth date, `YYYY-MM-DD`.
    pub birth_date: String,
    /// Guest nationality.
    pub nationality: String,
    /// Emergency contact name (mandatory).
    pub emergency_contact_name: String,
    /// Emergency contact phone (mandatory).
    pub emergency_contact_phone: String,
    /// Dietary preferences, free text.
    pub dietary: Option<String>,
    /// Medical notes, free text.
    pub medical: Option<String>,
    /// Motivation text.
    pub motivation: String,
    /// Selected room type identifier.
    pub room_type: String,
    /// Selected add-on identifiers.
    pub add_on_ids: Vec<String>,
    /// Payment-method preference identifier.
    pub payment_method: String,
    /// Newsletter opt-in flag.
    pub newsletter_opt_in: bool,
    /// Total the client believes it owes, in cents. Never trusted — the
    /// server recomputes and logs a mismatch.
    pub client_total_cents: Option<u64>,
}

/// A booking submission that passed every validation rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedBooking {
    /// The guest's personal details, trimmed.
    pub guest: GuestDetails,
    /// Emergency contact, trimmed.
    pub emergency_contact: EmergencyContact,
    /// Dietary preferences; empty input normalizes to `None`.
    pub dietary: Option<String>,
    /// Medical notes; empty input normalizes to `None`.
    pub medical: Option<String>,
    /// Motivation text, trimmed.
    pub motivation: String,
    /// Selected room type.
    pub room_type: RoomType,
    /// Selected add-ons, deduplicated, in catalog order.
    pub add_ons: Vec<AddOn>,
    /// Payment-method preference.
    pub payment_method: PaymentMethod,
    /// Newsletter opt-in flag.
    pub newsletter_opt_in: bool,
}

/// One problem with one submitted field.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// The offending field, e.g. `"email"`.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

/// Every field problem found in one submission, in field order.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Default)]
#[error("booking validation failed: {} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Number of field errors collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no errors were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate the collected errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Whether `field` has at least one recorded problem.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl ValidationErrors {
    /// Display adapter that prints each `field: message` pair, for logs.
    #[must_use]
    pub const fn detail(&self) -> FieldList<'_> {
        FieldList(self)
    }
}

/// Borrowing display adapter listing every error.
pub struct FieldList<'a>(&'a ValidationErrors);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validate a raw submission against every booking rule at once.
///
/// `now` is the submission time, injected for deterministic age checks.
///
/// # Errors
///
/// Returns [`ValidationErrors`] carrying one [`FieldError`] per problem;
/// a submission missing two fields gets two entries, not one.
pub fn validate_booking(
    request: &BookingRequest,
    now: DateTime<Utc>,
) -> Result<ValidatedBooking, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let first_name = required(&mut errors, "first_name", &request.first_name);
    let last_name = required(&mut errors, "last_name", &request.last_name);
    let nationality = required(&mut errors, "nationality", &request.nationality);
    let emergency_name = required(
        &mut errors,
        "emergency_contact_name",
        &request.emergency_contact_name,
    );

    let email = request.email.trim();
    if email.is_empty() {
        errors.push("email", "is required");
    } else if !is_valid_email(email) {
        errors.push("email", "is not a valid email address");
    }

    let phone = checked_phone(&mut errors, "phone", &request.phone);
    let emergency_phone = checked_phone(
        &mut errors,
        "emergency_contact_phone",
        &request.emergency_contact_phone,
    );

    let birth_date = checked_birth_date(&mut errors, &request.birth_date, now);

    let motivation = request.motivation.trim();
    if motivation.chars().count() < MINIMUM_MOTIVATION_CHARS {
        errors.push(
            "motivation",
            format!("must be at least {MINIMUM_MOTIVATION_CHARS} characters"),
        );
    }

    let room_type = RoomType::parse(request.room_type.trim());
    if room_type.is_none() {
        errors.push("room_type", "is not a recognized room type");
    }

    let mut add_ons = Vec::new();
    for id in &request.add_on_ids {
        match AddOn::parse(id.trim()) {
            Some(add_on) if !add_ons.contains(&add_on) => add_ons.push(add_on),
            Some(_) => {} // duplicate selection, set semantics
            None => errors.push("add_on_ids", format!("`{}` is not a recognized add-on", id.trim())),
        }
    }
    add_ons.sort_unstable();

    let payment_method = PaymentMethod::parse(request.payment_method.trim());
    if payment_method.is_none() {
        errors.push("payment_method", "is not a recognized payment method");
    }

    if let (true, Some(birth_date), Some(room_type), Some(payment_method)) =
        (errors.is_empty(), birth_date, room_type, payment_method)
    {
        Ok(ValidatedBooking {
            guest: GuestDetails {
                first_name,
                last_name,
                email: email.to_string(),
                phone,
                birth_date,
                nationality,
            },
            emergency_contact: EmergencyContact {
                name: emergency_name,
                phone: emergency_phone,
            },
            dietary: normalize_optional(request.dietary.as_deref()),
            medical: normalize_optional(request.medical.as_deref()),
            motivation: motivation.to_string(),
            room_type,
            add_ons,
            payment_method,
            newsletter_opt_in: request.newsletter_opt_in,
        })
    } else {
        Err(errors)
    }
}

/// Record a "required" error for an empty field; returns the trimmed value.
fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "is required");
    }
    trimmed.to_string()
}

/// Require a field and, when present, check its phone shape.
fn checked_phone(errors: &mut ValidationErrors, field: &'static str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "is required");
    } else if !is_valid_phone(trimmed) {
        errors.push(field, "is not a valid phone number");
    }
    trimmed.to_string()
}

/// Require, parse, and age-check the birth date.
fn checked_birth_date(
    errors: &mut ValidationErrors,
    value: &str,
    now: DateTime<Utc>,
) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push("birth_date", "is required");
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(birth_date) => {
            if age_on(now.date_naive(), birth_date) < MINIMUM_AGE {
                errors.push(
                    "birth_date",
                    format!("guests must be at least {MINIMUM_AGE} years old"),
                );
                None
            } else {
                Some(birth_date)
            }
        }
        Err(_) => {
            errors.push("birth_date", "is not a valid date (expected YYYY-MM-DD)");
            None
        }
    }
}

/// Age in whole years on `date` for someone born on `birth`.
fn age_on(date: NaiveDate, birth: NaiveDate) -> i32 {
    let mut age = date.year() - birth.year();
    if (date.month(), date.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Email shape check: a single `@`, a non-empty local part, and a dotted
/// domain. Deliverability is the mail provider's problem, not ours.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Permissive international phone shape: optional leading `+`, then digits,
/// spaces, hyphens, and parentheses, with at least nine digits overall.
fn is_valid_phone(value: &str) -> bool {
    let rest = value.strip_prefix('+').unwrap_or(value);
    if rest.contains('+') {
        return false;
    }
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return false;
    }
    rest.chars().filter(char::is_ascii_digit).count() >= MINIMUM_PHONE_DIGITS
}

/// Trim a free-text field, normalizing empty input to `None`.
fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
