//! SMTP email provider implementation using Lettre.

use crate::config::SmtpConfig;
use crate::providers::{EmailError, EmailProvider};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

/// SMTP email provider using Lettre.
///
/// Sends real mail via an SMTP relay, suitable for production use. All
/// connection parameters and credentials come from [`SmtpConfig`] — nothing
/// is embedded in the code.
///
/// # Examples
///
/// ```ignore
/// use retiro_booking::config::SmtpConfig;
/// use retiro_booking::providers::SmtpEmailProvider;
///
/// let provider = SmtpEmailProvider::new(
///     SmtpConfig::new("smtp.example.com", 587, "mailer", "app_password"),
///     "reservations@retiro.example".to_string(),
///     "Retiro Reservations".to_string(),
/// );
/// ```
#[derive(Clone)]
pub struct SmtpEmailProvider {
    /// SMTP connection parameters.
    config: SmtpConfig,

    /// SMTP credentials.
    credentials: Credentials,

    /// Sender email address.
    from_email: String,

    /// Sender display name.
    from_name: String,
}

impl SmtpEmailProvider {
    /// Create a new SMTP email provider.
    #[must_use]
    pub fn new(config: SmtpConfig, from_email: String, from_name: String) -> Self {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        Self {
            config,
            credentials,
            from_email,
            from_name,
        }
    }

    /// Build an SMTP transport for sending.
    ///
    /// Creates a new transport per email to avoid connection pooling issues.
    fn build_transport(&self) -> Result<SmtpTransport, EmailError> {
        Ok(SmtpTransport::relay(&self.config.server)
            .map_err(|e| EmailError::Delivery(format!("SMTP relay error: {e}")))?
            .port(self.config.port)
            .credentials(self.credentials.clone())
            .build())
    }

    /// Build the "From" header.
    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

impl EmailProvider for SmtpEmailProvider {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("to address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| EmailError::Delivery(format!("failed to build email: {e}")))?;

        let mailer = self.build_transport()?;

        // The sync transport blocks; keep it off the async worker threads.
        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map_err(|e| EmailError::Delivery(format!("failed to send email: {e}")))
        })
        .await
        .map_err(|e| EmailError::Delivery(format!("email task failed: {e}")))?
        .map(|_| ())
    }
}
