//! Deterministic reservation pricing.
//!
//! The total of a booking is always `base price + room-type surcharge + sum
//! of selected add-on prices`, computed server-side against the fixed tables
//! in [`crate::types`]. Unknown room types or add-on identifiers are
//! rejected, never treated as a silent zero surcharge, to prevent
//! under- or over-charging from a stale or tampered form.

use crate::types::{AddOn, Money, RoomType};
use std::collections::BTreeSet;
use thiserror::Error;

/// Failure to price a booking from raw identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// The room-type identifier is not in the catalog.
    #[error("unknown room type `{value}`")]
    UnknownRoomType {
        /// The rejected identifier.
        value: String,
    },

    /// An add-on identifier is not in the catalog.
    #[error("unknown add-on `{value}`")]
    UnknownAddOn {
        /// The rejected identifier.
        value: String,
    },
}

/// Compute the authoritative total from raw identifiers.
///
/// Pure and idempotent: identical inputs always yield identical results.
/// Duplicate add-on identifiers collapse — the selection is a set, and an
/// add-on is charged at most once.
///
/// # Errors
///
/// Returns [`PricingError`] if the room type or any add-on identifier is
/// unrecognized.
///
/// # Examples
///
/// ```
/// use retiro_core::pricing::compute_total;
/// use retiro_core::types::Money;
///
/// let total = compute_total(Money::from_euros(1299), "private", &["transport", "massage"]);
/// assert_eq!(total, Ok(Money::from_euros(1629)));
///
/// assert!(compute_total(Money::from_euros(1299), "igloo", &[] as &[&str]).is_err());
/// ```
pub fn compute_total<S: AsRef<str>>(
    base_price: Money,
    room_type: &str,
    add_on_ids: &[S],
) -> Result<Money, PricingError> {
    let room = RoomType::parse(room_type).ok_or_else(|| PricingError::UnknownRoomType {
        value: room_type.to_string(),
    })?;

    let mut add_ons = Vec::with_capacity(add_on_ids.len());
    for id in add_on_ids {
        let add_on = AddOn::parse(id.as_ref()).ok_or_else(|| PricingError::UnknownAddOn {
            value: id.as_ref().to_string(),
        })?;
        add_ons.push(add_on);
    }

    Ok(total_for(base_price, room, &add_ons))
}

/// Compute the total for already-validated selections. Infallible by
/// construction.
///
/// Duplicate entries in `add_ons` collapse (set semantics).
#[must_use]
pub fn total_for(base_price: Money, room_type: RoomType, add_ons: &[AddOn]) -> Money {
    let selection: BTreeSet<AddOn> = add_ons.iter().copied().collect();
    selection
        .into_iter()
        .fold(base_price.saturating_add(room_type.surcharge()), |acc, add_on| {
            acc.saturating_add(add_on.price())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn private_room_with_transport_and_massage() {
        // 1299 + 200 + 50 + 80
        let total = compute_total(Money::from_euros(1299), "private", &["transport", "massage"]);
        assert_eq!(total, Ok(Money::from_euros(1629)));
    }

    #[test]
    fn shared_room_without_add_ons_is_the_base_price() {
        let total = compute_total(Money::from_euros(1299), "shared", &[] as &[&str]);
        assert_eq!(total, Ok(Money::from_euros(1299)));
    }

    #[test]
    fn suite_surcharge() {
        let total = compute_total(Money::from_euros(1299), "suite", &[] as &[&str]);
        assert_eq!(total, Ok(Money::from_euros(1699)));
    }

    #[test]
    fn unknown_room_type_is_rejected_not_zeroed() {
        let err = compute_total(Money::from_euros(1299), "igloo", &[] as &[&str]);
        assert_eq!(
            err,
            Err(PricingError::UnknownRoomType {
                value: "igloo".to_string()
            })
        );
    }

    #[test]
    fn unknown_add_on_is_rejected_not_ignored() {
        let err = compute_total(Money::from_euros(1299), "shared", &["transport", "skydiving"]);
        assert_eq!(
            err,
            Err(PricingError::UnknownAddOn {
                value: "skydiving".to_string()
            })
        );
    }

    #[test]
    fn duplicate_add_ons_are_charged_once() {
        let total = compute_total(
            Money::from_euros(1000),
            "shared",
            &["massage", "massage", "massage"],
        );
        assert_eq!(total, Ok(Money::from_euros(1080)));
    }

    #[test]
    fn identical_inputs_yield_identical_results() {
        let a = compute_total(Money::from_euros(1299), "private", &["nutrition", "materials"]);
        let b = compute_total(Money::from_euros(1299), "private", &["nutrition", "materials"]);
        assert_eq!(a, b);
    }

    fn any_room() -> impl Strategy<Value = RoomType> {
        prop_oneof![
            Just(RoomType::Shared),
            Just(RoomType::Private),
            Just(RoomType::Suite),
        ]
    }

    fn any_add_ons() -> impl Strategy<Value = Vec<AddOn>> {
        prop::collection::vec(
            prop_oneof![
                Just(AddOn::Transport),
                Just(AddOn::Massage),
                Just(AddOn::Nutrition),
                Just(AddOn::Materials),
            ],
            0..8,
        )
    }

    proptest! {
        #[test]
        fn total_never_undercuts_base_plus_surcharge(
            base in 0u64..10_000_000,
            room in any_room(),
            add_ons in any_add_ons(),
        ) {
            let base = Money::from_cents(base);
            let total = total_for(base, room, &add_ons);
            prop_assert!(total >= base.saturating_add(room.surcharge()));
        }

        #[test]
        fn total_is_order_independent(
            base in 0u64..10_000_000,
            room in any_room(),
            mut add_ons in any_add_ons(),
        ) {
            let base = Money::from_cents(base);
            let forward = total_for(base, room, &add_ons);
            add_ons.reverse();
            let reversed = total_for(base, room, &add_ons);
            prop_assert_eq!(forward, reversed);
        }
    }
}
