//! Booking configuration.
//!
//! Configuration values are provided by the application, not hardcoded:
//! the operator recipient address, the sender identity, and the SMTP
//! credentials all arrive here.

/// Reservation-service configuration.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Address that receives the operator alert for every new reservation.
    pub operator_email: String,

    /// Sender address used on outbound mail.
    pub from_email: String,

    /// Sender display name used on outbound mail.
    pub from_name: String,
}

impl BookingConfig {
    /// Create a configuration with the given operator recipient.
    ///
    /// # Arguments
    ///
    /// * `operator_email` - Address alerted about every new reservation
    #[must_use]
    pub fn new(operator_email: impl Into<String>) -> Self {
        Self {
            operator_email: operator_email.into(),
            from_email: "reservations@retiro.example".to_string(),
            from_name: "Retiro Reservations".to_string(),
        }
    }

    /// Set the sender identity for outbound mail.
    #[must_use]
    pub fn with_sender(mut self, email: impl Into<String>, name: impl Into<String>) -> Self {
        self.from_email = email.into();
        self.from_name = name.into();
        self
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self::new("operator@retiro.example")
    }
}

/// SMTP connection parameters for the production email provider.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server address, e.g. `smtp.example.com`.
    pub server: String,

    /// SMTP server port (usually 587 for TLS).
    pub port: u16,

    /// SMTP authentication username.
    pub username: String,

    /// SMTP authentication password.
    pub password: String,
}

impl SmtpConfig {
    /// Create SMTP connection parameters.
    #[must_use]
    pub fn new(
        server: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self::new("localhost", 587, "", "")
    }
}
