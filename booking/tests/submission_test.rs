//! Booking submission tests.
//!
//! Exercises the full submission contract: validation before any side
//! effect, server-side pricing, number-collision retry, and the
//! persistence-is-authoritative / notification-is-best-effort split.
//!
//! Run with: `cargo test --test submission_test`

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chrono::{DateTime, TimeZone, Utc};
use retiro_booking::config::BookingConfig;
use retiro_booking::environment::BookingEnvironment;
use retiro_booking::error::BookingError;
use retiro_booking::mocks::{FixedClock, InMemoryReservationStore, MockEmailProvider};
use retiro_booking::service::ReservationService;
use retiro_core::types::{Money, ReservationStatus, RetreatId, RetreatOffering};
use retiro_core::validation::BookingRequest;
use std::sync::Arc;

fn submission_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).single().unwrap()
}

fn offering() -> RetreatOffering {
    RetreatOffering::new(RetreatId::new(), "Mountain Silence", Money::from_euros(1299))
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
        dietary: Some("vegetarian".to_string()),
        medical: None,
        motivation: "Looking for a quiet week to reset and breathe.".to_string(),
        room_type: "suite".to_string(),
        add_on_ids: Vec::new(),
        payment_method: "transfer".to_string(),
        newsletter_opt_in: true,
        client_total_cents: None,
    }
}

fn service(
    store: &InMemoryReservationStore,
    email: &MockEmailProvider,
) -> ReservationService<InMemoryReservationStore, MockEmailProvider> {
    let env = BookingEnvironment::new(
        store.clone(),
        email.clone(),
        Arc::new(FixedClock::at(submission_time())),
    );
    ReservationService::new(env, BookingConfig::new("front-desk@retiro.example"))
}

#[tokio::test]
async fn a_valid_submission_is_stored_pending_with_the_server_total() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    let receipt = service
        .submit_reservation(&offering(), &valid_request())
        .await
        .unwrap();

    // 1299 base + 400 suite surcharge, no add-ons.
    let reservation = &receipt.reservation;
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.total, Money::from_euros(1699));
    assert!(reservation.number.as_str().starts_with("R260315-"));
    assert_eq!(reservation.created_at, submission_time());
    assert_eq!(reservation.updated_at, submission_time());

    assert_eq!(store.len(), 1);
    assert_eq!(store.get(reservation.id).unwrap(), *reservation);
    assert!(receipt.notifications.all_sent());
}

#[tokio::test]
async fn both_notifications_go_out_after_the_insert() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    let receipt = service
        .submit_reservation(&offering(), &valid_request())
        .await
        .unwrap();

    let sent = email.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "maya@example.com");
    assert!(sent[0].subject.contains(receipt.reservation.number.as_str()));
    assert!(sent[0].body.contains("Mountain Silence"));
    assert_eq!(sent[1].to, "front-desk@retiro.example");
    assert!(sent[1].body.contains("1699.00"));
}

#[tokio::test]
async fn an_invalid_submission_persists_and_sends_nothing() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    let mut request = valid_request();
    request.email = String::new();
    request.emergency_contact_phone = String::new();

    let err = service
        .submit_reservation(&offering(), &request)
        .await
        .unwrap_err();

    match err {
        BookingError::ValidationFailed { errors } => {
            assert_eq!(errors.len(), 2);
            assert!(errors.has("email"));
            assert!(errors.has("emergency_contact_phone"));
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
    assert!(store.is_empty());
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn an_insert_failure_creates_nothing_and_sends_nothing() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    store.fail_next_inserts(1);

    let err = service
        .submit_reservation(&offering(), &valid_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Persistence { .. }));
    assert!(err.is_retryable());
    assert!(store.is_empty());
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn notification_failure_never_fails_the_submission() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::failing();
    let service = service(&store, &email);

    let receipt = service
        .submit_reservation(&offering(), &valid_request())
        .await
        .unwrap();

    // The reservation is durably created; the receipt just flags the emails.
    assert_eq!(store.len(), 1);
    assert_eq!(receipt.reservation.status, ReservationStatus::Pending);
    assert!(!receipt.notifications.guest_confirmation_sent);
    assert!(!receipt.notifications.operator_alert_sent);
    assert!(!receipt.notifications.all_sent());
}

#[tokio::test]
async fn a_client_supplied_total_is_never_trusted() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    let mut request = valid_request();
    request.client_total_cents = Some(1); // one cent, nice try

    let receipt = service
        .submit_reservation(&offering(), &request)
        .await
        .unwrap();

    assert_eq!(receipt.reservation.total, Money::from_euros(1699));
}

#[tokio::test]
async fn a_precheck_collision_regenerates_the_number_and_succeeds() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    store.report_existing_number(1);

    let receipt = service
        .submit_reservation(&offering(), &valid_request())
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.precheck_calls(), 1);
    assert!(!receipt.reservation.number.as_str().is_empty());
}

#[tokio::test]
async fn an_insert_collision_retries_exactly_once_then_succeeds() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    store.duplicate_next_inserts(1);

    let receipt = service
        .submit_reservation(&offering(), &valid_request())
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get(receipt.reservation.id).unwrap().number,
        receipt.reservation.number
    );
}

#[tokio::test]
async fn a_second_insert_collision_escalates_to_a_persistence_error() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    store.duplicate_next_inserts(2);

    let err = service
        .submit_reservation(&offering(), &valid_request())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Persistence { .. }));
    assert!(store.is_empty());
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn add_ons_price_on_top_of_the_room_surcharge() {
    let store = InMemoryReservationStore::new();
    let email = MockEmailProvider::new();
    let service = service(&store, &email);

    let mut request = valid_request();
    request.room_type = "private".to_string();
    request.add_on_ids = vec!["transport".to_string(), "massage".to_string()];

    let receipt = service
        .submit_reservation(&offering(), &request)
        .await
        .unwrap();

    // 1299 + 200 + 50 + 80
    assert_eq!(receipt.reservation.total, Money::from_euros(1629));
}
