//! Email provider trait.

use std::future::Future;
use thiserror::Error;

/// Failure to deliver an email.
///
/// These never surface from `submit_reservation` — notification is
/// best-effort once the reservation is durably stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// A recipient or sender address could not be parsed.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The transport failed to hand the message off.
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Email provider.
///
/// This trait abstracts over delivery transports (SMTP, an API-based
/// service, a console printer in development).
pub trait EmailProvider: Send + Sync {
    /// Send one plain-text message.
    ///
    /// # Arguments
    ///
    /// - `to`: Recipient email address
    /// - `subject`: Message subject
    /// - `body`: Plain-text body
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] if the address is invalid or the transport
    /// rejects the message.
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), EmailError>> + Send;
}
