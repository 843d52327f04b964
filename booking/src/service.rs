//! The reservation lifecycle service.
//!
//! Orchestrates one submission or transition per call, re-fetching state
//! from the store every time (no in-process cache, no cross-request state).
//! Ordering inside [`ReservationService::submit_reservation`] is the
//! component's core contract: the insert must be durably acknowledged before
//! any notification goes out, and a notification failure never unwinds the
//! reservation.

use crate::config::BookingConfig;
use crate::environment::BookingEnvironment;
use crate::error::{BookingError, Result};
use crate::number::generate_reservation_number;
use crate::providers::{EmailProvider, ReservationStore, StoreError};
use chrono::{DateTime, Utc};
use retiro_core::access::{self, RESERVATION_MANAGEMENT_ROLE};
use retiro_core::pricing;
use retiro_core::types::{
    Money, Principal, Reservation, ReservationId, ReservationStatus, RetreatOffering,
};
use retiro_core::validation::{BookingRequest, ValidatedBooking, validate_booking};
use serde::Serialize;
use tracing::{error, info, warn};

/// Delivery outcome of the post-submission notifications.
///
/// A `false` here is advisory: the reservation exists regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationReport {
    /// Whether the guest confirmation was handed to the transport.
    pub guest_confirmation_sent: bool,
    /// Whether the operator alert was handed to the transport.
    pub operator_alert_sent: bool,
}

impl NotificationReport {
    /// Whether both notifications went out.
    #[must_use]
    pub const fn all_sent(self) -> bool {
        self.guest_confirmation_sent && self.operator_alert_sent
    }
}

/// Outcome of a successful submission: the durably stored reservation plus
/// the best-effort notification report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    /// The stored reservation, status `pending`.
    pub reservation: Reservation,
    /// What happened to the confirmation emails.
    pub notifications: NotificationReport,
}

/// The reservation lifecycle manager.
///
/// # Type Parameters
///
/// - `S`: Reservation store
/// - `E`: Email provider
#[derive(Clone)]
pub struct ReservationService<S, E>
where
    S: ReservationStore + Clone,
    E: EmailProvider + Clone,
{
    env: BookingEnvironment<S, E>,
    config: BookingConfig,
}

impl<S, E> ReservationService<S, E>
where
    S: ReservationStore + Clone,
    E: EmailProvider + Clone,
{
    /// Create a service over the given environment and configuration.
    #[must_use]
    pub const fn new(env: BookingEnvironment<S, E>, config: BookingConfig) -> Self {
        Self { env, config }
    }

    /// Validate, price, persist, and announce one booking submission.
    ///
    /// On validation failure nothing is persisted and nothing is sent. On
    /// success the reservation is stored with status `pending` before any
    /// email goes out; email failures are logged and reported in the
    /// receipt, never propagated.
    ///
    /// # Errors
    ///
    /// - [`BookingError::ValidationFailed`] with every field problem.
    /// - [`BookingError::Persistence`] if the insert fails — nothing was
    ///   created. A reservation-number collision is retried once internally
    ///   before escalating.
    pub async fn submit_reservation(
        &self,
        offering: &RetreatOffering,
        request: &BookingRequest,
    ) -> Result<SubmissionReceipt> {
        let now = self.env.clock.now();

        let booking = match validate_booking(request, now) {
            Ok(booking) => booking,
            Err(errors) => {
                info!(detail = %errors.detail(), "booking submission rejected by validation");
                return Err(BookingError::ValidationFailed { errors });
            }
        };

        let total = pricing::total_for(offering.base_price, booking.room_type, &booking.add_ons);
        if let Some(claimed) = request.client_total_cents {
            if claimed != total.cents() {
                warn!(
                    claimed,
                    computed = total.cents(),
                    retreat = %offering.id,
                    "client-supplied total disagrees with server pricing; using server total"
                );
            }
        }

        let reservation = self
            .insert_with_fresh_number(offering, &booking, total, now)
            .await?;
        info!(
            number = %reservation.number,
            retreat = %reservation.retreat_title,
            total = %reservation.total,
            "reservation created"
        );

        // The insert is durably acknowledged; nothing below fails the call.
        let notifications = self.notify(&reservation).await;

        Ok(SubmissionReceipt {
            reservation,
            notifications,
        })
    }

    /// Apply a guarded lifecycle transition on behalf of `principal`.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Forbidden`] if the principal ranks below
    ///   `moderator` — checked before any I/O.
    /// - [`BookingError::NotFound`] if the reservation does not exist.
    /// - [`BookingError::InvalidTransition`] if the requested edge is not in
    ///   the lifecycle table (the store is left untouched), or if the status
    ///   changed underneath the caller.
    /// - [`BookingError::Persistence`] if the store fails.
    pub async fn transition_status(
        &self,
        id: ReservationId,
        requested: ReservationStatus,
        principal: &Principal,
    ) -> Result<Reservation> {
        if !access::can_access(&principal.role, Some(RESERVATION_MANAGEMENT_ROLE.as_str())) {
            return Err(BookingError::Forbidden {
                role: principal.role.clone(),
                required: RESERVATION_MANAGEMENT_ROLE,
            });
        }

        let current = self
            .env
            .store
            .find_by_id(id)
            .await?
            .ok_or(BookingError::NotFound { id })?;

        if !current.status.can_transition_to(requested) {
            return Err(BookingError::InvalidTransition {
                from: current.status,
                requested,
            });
        }

        let now = self.env.clock.now();
        match self
            .env
            .store
            .update_status(id, current.status, requested, now)
            .await?
        {
            Some(updated) => {
                info!(
                    number = %updated.number,
                    from = %current.status,
                    to = %requested,
                    "reservation status updated"
                );
                Ok(updated)
            }
            None => {
                // Lost the conditional update; report against the fresh status.
                let fresh = self
                    .env
                    .store
                    .find_by_id(id)
                    .await?
                    .ok_or(BookingError::NotFound { id })?;
                Err(BookingError::InvalidTransition {
                    from: fresh.status,
                    requested,
                })
            }
        }
    }

    /// Insert a new reservation, regenerating the number once if the store's
    /// unique constraint fires.
    async fn insert_with_fresh_number(
        &self,
        offering: &RetreatOffering,
        booking: &ValidatedBooking,
        total: Money,
        now: DateTime<Utc>,
    ) -> Result<Reservation> {
        let mut number = generate_reservation_number(now);
        // Best-effort pre-check; the store constraint is the final arbiter.
        if self.env.store.reservation_number_exists(&number).await? {
            number = generate_reservation_number(now);
        }

        let mut reservation = Reservation::new(number, offering, booking, total, now);
        match self.env.store.insert(&reservation).await {
            Ok(stored) => Ok(stored),
            Err(StoreError::DuplicateReservationNumber) => {
                warn!(
                    number = %reservation.number,
                    "reservation number collided on insert; regenerating once"
                );
                reservation.number = generate_reservation_number(now);
                self.env.store.insert(&reservation).await.map_err(|e| {
                    error!(error = %e, "reservation insert failed after number retry");
                    BookingError::from(e)
                })
            }
            Err(e) => {
                error!(error = %e, "reservation insert failed");
                Err(BookingError::from(e))
            }
        }
    }

    /// Send the guest confirmation and the operator alert, best-effort.
    async fn notify(&self, reservation: &Reservation) -> NotificationReport {
        let subject = format!("Your reservation {} is pending", reservation.number);
        let guest_confirmation_sent = match self
            .env
            .email
            .send(
                &reservation.guest.email,
                &subject,
                &guest_confirmation_body(reservation),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    error = %e,
                    number = %reservation.number,
                    "guest confirmation email failed; reservation stands"
                );
                false
            }
        };

        let subject = format!("New reservation {}", reservation.number);
        let operator_alert_sent = match self
            .env
            .email
            .send(
                &self.config.operator_email,
                &subject,
                &operator_alert_body(reservation),
            )
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    error = %e,
                    number = %reservation.number,
                    "operator alert email failed; reservation stands"
                );
                false
            }
        };

        NotificationReport {
            guest_confirmation_sent,
            operator_alert_sent,
        }
    }
}

fn guest_confirmation_body(reservation: &Reservation) -> String {
    format!(
        "Hello {},\n\n\
         We received your reservation for \"{}\".\n\n\
         Reservation number: {}\n\
         Room type: {}\n\
         Total: EUR {}\n\
         Status: {}\n\n\
         We will review availability and send payment instructions ({}) shortly.\n",
        reservation.guest.first_name,
        reservation.retreat_title,
        reservation.number,
        reservation.room_type,
        reservation.total,
        reservation.status,
        reservation.payment_method,
    )
}

fn operator_alert_body(reservation: &Reservation) -> String {
    let add_ons = if reservation.add_ons.is_empty() {
        "none".to_string()
    } else {
        reservation
            .add_ons
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "New reservation {} for \"{}\".\n\n\
         Guest: {} {} <{}>\n\
         Phone: {}\n\
         Room type: {}\n\
         Add-ons: {}\n\
         Payment preference: {}\n\
         Total: EUR {}\n",
        reservation.number,
        reservation.retreat_title,
        reservation.guest.first_name,
        reservation.guest.last_name,
        reservation.guest.email,
        reservation.guest.phone,
        reservation.room_type,
        add_ons,
        reservation.payment_method,
        reservation.total,
    )
}
