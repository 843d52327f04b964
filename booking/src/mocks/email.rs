//! Mock email provider for testing.

use crate::providers::{EmailError, EmailProvider};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// One message handed to the mock transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Mock email provider.
///
/// Records every send instead of delivering anything; can be constructed
/// failing to exercise the best-effort notification contract.
#[derive(Debug, Clone)]
pub struct MockEmailProvider {
    /// Whether sends succeed or report a delivery failure.
    should_succeed: bool,
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmailProvider {
    /// Create a mock provider whose sends succeed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            should_succeed: true,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider whose sends all fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_succeed: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Everything handed to the transport so far, in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl EmailProvider for MockEmailProvider {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), EmailError>> + Send {
        let sent = Arc::clone(&self.sent);
        let should_succeed = self.should_succeed;
        let message = SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };

        async move {
            if !should_succeed {
                return Err(EmailError::Delivery("mock transport failure".to_string()));
            }
            sent.lock()
                .map_err(|_| EmailError::Delivery("mock transport poisoned".to_string()))?
                .push(message);
            Ok(())
        }
    }
}
