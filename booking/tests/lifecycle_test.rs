//! Reservation lifecycle transition tests.
//!
//! Exercises the role gate in front of every transition and the state
//! machine itself: from `pending`, `confirmed` and `cancelled` are
//! reachable; from `confirmed`, only `completed` and `cancelled`; the
//! terminal states permit nothing.
//!
//! Run with: `cargo test --test lifecycle_test`

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{DateTime, TimeZone, Utc};
use retiro_booking::config::BookingConfig;
use retiro_booking::environment::BookingEnvironment;
use retiro_booking::error::BookingError;
use retiro_booking::mocks::{FixedClock, InMemoryReservationStore, MockEmailProvider};
use retiro_booking::service::ReservationService;
use retiro_core::access::Role;
use retiro_core::types::{
    Money, Principal, PrincipalId, Reservation, ReservationId, ReservationStatus, RetreatId,
    RetreatOffering,
};
use retiro_core::validation::BookingRequest;
use std::sync::Arc;

type TestService = ReservationService<InMemoryReservationStore, MockEmailProvider>;

fn submission_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).single().unwrap()
}

fn principal(role: &str) -> Principal {
    Principal::new(PrincipalId::new(), role)
}

fn valid_request() -> BookingRequest {
    BookingRequest {
        first_name: "Maya".to_string(),
        last_name: "Lindqvist".to_string(),
        email: "maya@example.com".to_string(),
        phone: "+34 612 345 678".to_string(),
        birth_date: "1990-07-21".to_string(),
        nationality: "Swedish".to_string(),
        emergency_contact_name: "Erik Lindqvist".to_string(),
        emergency_contact_phone: "+46 70 123 45 67".to_string(),
        dietary: None,
        medical: None,
        motivation: "Looking for a quiet week to reset and breathe.".to_string(),
        room_type: "suite".to_string(),
        add_on_ids: Vec::new(),
        payment_method: "transfer".to_string(),
        newsletter_opt_in: false,
        client_total_cents: None,
    }
}

/// Build a service and submit one valid booking, returning the stored
/// reservation.
async fn service_with_reservation() -> (TestService, InMemoryReservationStore, Reservation) {
    let store = InMemoryReservationStore::new();
    let env = BookingEnvironment::new(
        store.clone(),
        MockEmailProvider::new(),
        Arc::new(FixedClock::at(submission_time())),
    );
    let service = ReservationService::new(env, BookingConfig::default());

    let offering =
        RetreatOffering::new(RetreatId::new(), "Mountain Silence", Money::from_euros(1299));
    let receipt = service
        .submit_reservation(&offering, &valid_request())
        .await
        .unwrap();

    (service, store, receipt.reservation)
}

#[tokio::test]
async fn an_admin_confirms_a_pending_reservation() {
    let (service, store, reservation) = service_with_reservation().await;

    let updated = service
        .transition_status(reservation.id, ReservationStatus::Confirmed, &principal("admin"))
        .await
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::Confirmed);
    assert_eq!(store.get(reservation.id).unwrap().status, ReservationStatus::Confirmed);
    // The number never changes across transitions.
    assert_eq!(updated.number, reservation.number);
}

#[tokio::test]
async fn repeating_a_confirmation_is_an_invalid_transition() {
    let (service, _store, reservation) = service_with_reservation().await;
    let admin = principal("admin");

    service
        .transition_status(reservation.id, ReservationStatus::Confirmed, &admin)
        .await
        .unwrap();

    let err = service
        .transition_status(reservation.id, ReservationStatus::Confirmed, &admin)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::Confirmed,
            requested: ReservationStatus::Confirmed,
        }
    );
}

#[tokio::test]
async fn an_editor_is_forbidden_and_nothing_moves() {
    let (service, store, reservation) = service_with_reservation().await;

    let err = service
        .transition_status(reservation.id, ReservationStatus::Confirmed, &principal("editor"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BookingError::Forbidden {
            role: "editor".to_string(),
            required: Role::Moderator,
        }
    );
    assert!(err.is_user_error());
    assert_eq!(store.get(reservation.id).unwrap().status, ReservationStatus::Pending);
}

#[tokio::test]
async fn a_moderator_clears_the_gate() {
    let (service, _store, reservation) = service_with_reservation().await;

    let updated = service
        .transition_status(reservation.id, ReservationStatus::Cancelled, &principal("moderator"))
        .await
        .unwrap();

    assert_eq!(updated.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn an_unrecognized_role_is_forbidden() {
    let (service, _store, reservation) = service_with_reservation().await;

    let err = service
        .transition_status(reservation.id, ReservationStatus::Confirmed, &principal("superuser"))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Forbidden { .. }));
}

#[tokio::test]
async fn a_missing_reservation_is_not_found() {
    let (service, _store, _reservation) = service_with_reservation().await;

    let ghost = ReservationId::new();
    let err = service
        .transition_status(ghost, ReservationStatus::Confirmed, &principal("admin"))
        .await
        .unwrap_err();

    assert_eq!(err, BookingError::NotFound { id: ghost });
}

#[tokio::test]
async fn pending_cannot_skip_straight_to_completed() {
    let (service, store, reservation) = service_with_reservation().await;

    let err = service
        .transition_status(reservation.id, ReservationStatus::Completed, &principal("admin"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BookingError::InvalidTransition {
            from: ReservationStatus::Pending,
            requested: ReservationStatus::Completed,
        }
    );
    assert_eq!(store.get(reservation.id).unwrap().status, ReservationStatus::Pending);
}

#[tokio::test]
async fn confirmed_reaches_completed_and_then_freezes() {
    let (service, _store, reservation) = service_with_reservation().await;
    let admin = principal("admin");

    service
        .transition_status(reservation.id, ReservationStatus::Confirmed, &admin)
        .await
        .unwrap();
    let completed = service
        .transition_status(reservation.id, ReservationStatus::Completed, &admin)
        .await
        .unwrap();
    assert_eq!(completed.status, ReservationStatus::Completed);

    for requested in [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ] {
        let err = service
            .transition_status(reservation.id, requested, &admin)
            .await
            .unwrap_err();
        assert!(
            matches!(err, BookingError::InvalidTransition { .. }),
            "completed must reject {requested}"
        );
    }
}

#[tokio::test]
async fn cancelled_is_terminal() {
    let (service, _store, reservation) = service_with_reservation().await;
    let admin = principal("admin");

    service
        .transition_status(reservation.id, ReservationStatus::Cancelled, &admin)
        .await
        .unwrap();

    for requested in [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ] {
        let err = service
            .transition_status(reservation.id, requested, &admin)
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn transitions_stamp_updated_at_but_preserve_created_at() {
    let (_service, store, reservation) = service_with_reservation().await;

    // Re-wire the same store behind a clock two days later for the operator
    // action.
    let later = Utc.with_ymd_and_hms(2026, 3, 17, 9, 0, 0).single().unwrap();
    let later_env = BookingEnvironment::new(
        store.clone(),
        MockEmailProvider::new(),
        Arc::new(FixedClock::at(later)),
    );
    let later_service = ReservationService::new(later_env, BookingConfig::default());

    let updated = later_service
        .transition_status(reservation.id, ReservationStatus::Confirmed, &principal("admin"))
        .await
        .unwrap();

    assert_eq!(updated.created_at, submission_time());
    assert_eq!(updated.updated_at, later);
}
