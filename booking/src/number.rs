//! Reservation number generation.
//!
//! Numbers look like `R260315-7F3KM9P2QT`: a date component plus a random
//! Crockford-alphabet suffix. The suffix is wide enough (10 characters, 50
//! bits) that collisions are astronomically unlikely in practice; the
//! store's unique constraint remains the final arbiter, and the service
//! retries once if it ever fires.

use chrono::{DateTime, Utc};
use rand::Rng;
use retiro_core::types::ReservationNumber;

/// Crockford base32: no `I`, `L`, `O`, or `U`, so numbers survive being
/// read over the phone.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 10;

/// Generate a fresh reservation number for a booking submitted at `now`.
#[must_use]
pub fn generate_reservation_number(now: DateTime<Utc>) -> ReservationNumber {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    ReservationNumber::new(format!("R{}-{suffix}", now.format("%y%m%d")))
}
