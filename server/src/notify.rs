//! Admin notification for new pre-bookings.
//!
//! One fixed-format plain-text email per booking, sent to the
//! configured admin address. Sending is best-effort: the booking is
//! already durably stored before this runs, so the workflow logs
//! failures and never surfaces them to the customer.

use crate::config::MailConfig;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::future::Future;
use thiserror::Error;

/// Failures while building or sending a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The configured sender address does not parse as a mailbox.
    #[error("invalid mail address: {0}")]
    Address(String),

    /// Message assembly failed.
    #[error("failed to build message: {0}")]
    Message(String),

    /// The SMTP transport rejected or failed the send.
    #[error("smtp failure: {0}")]
    Smtp(String),
}

/// Details of a booking included in the admin alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingAlert {
    /// Customer name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer address, if supplied.
    pub customer_address: Option<String>,
    /// Customer state/region, if supplied.
    pub customer_state: Option<String>,
    /// Customer country, if supplied.
    pub customer_country: Option<String>,
    /// Pre-built "product - quantity" summary lines.
    pub product_summary: String,
}

impl BookingAlert {
    /// Render the fixed-format plain-text message body.
    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "New Pre-Booking Received\n\
             \n\
             Customer Details:\n\
             Name: {}\n\
             Email: {}\n\
             Address: {}\n\
             State: {}\n\
             Country: {}\n\
             \n\
             Products:\n\
             {}\n",
            self.customer_name,
            self.customer_email,
            self.customer_address.as_deref().unwrap_or(""),
            self.customer_state.as_deref().unwrap_or(""),
            self.customer_country.as_deref().unwrap_or(""),
            self.product_summary,
        )
    }
}

/// Outbound notification channel for new bookings.
///
/// Implementations send synchronously from the caller's perspective;
/// there is no queueing or retry.
pub trait BookingNotifier: Send + Sync {
    /// Send the admin alert for one booking.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the message cannot be built or
    /// the transport fails. Callers treat this as non-fatal.
    fn send_booking_alert(
        &self,
        alert: &BookingAlert,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// SMTP notifier backed by Lettre.
///
/// The admin address is both sender and recipient: the site mails
/// itself about every new booking.
#[derive(Clone)]
pub struct SmtpNotifier {
    /// SMTP server address.
    smtp_host: String,
    /// SMTP server port (implicit TLS).
    smtp_port: u16,
    /// SMTP credentials.
    credentials: Credentials,
    /// Sender and recipient address.
    admin_address: String,
}

impl SmtpNotifier {
    /// Create a notifier from the mail configuration.
    #[must_use]
    pub fn new(config: &MailConfig) -> Self {
        Self {
            smtp_host: config.smtp_host.clone(),
            smtp_port: config.smtp_port,
            credentials: Credentials::new(config.sender.clone(), config.password.clone()),
            admin_address: config.sender.clone(),
        }
    }

    /// Build an SMTP transport.
    ///
    /// A fresh transport per send avoids connection pooling issues
    /// with providers that drop idle connections.
    fn build_transport(&self) -> Result<SmtpTransport, NotifyError> {
        Ok(SmtpTransport::relay(&self.smtp_host)
            .map_err(|e| NotifyError::Smtp(format!("SMTP relay error: {e}")))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build())
    }
}

impl BookingNotifier for SmtpNotifier {
    async fn send_booking_alert(&self, alert: &BookingAlert) -> Result<(), NotifyError> {
        let mailbox: Mailbox = self
            .admin_address
            .parse()
            .map_err(|_| NotifyError::Address(self.admin_address.clone()))?;

        let message = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject("New Rhyno Pre-Booking")
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body())
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        self.build_transport()?
            .send(&message)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;

        tracing::info!(customer_email = %alert.customer_email, "Booking alert sent");
        Ok(())
    }
}

/// Console notifier used when mail is not configured.
///
/// Logs the alert instead of sending it, so local development works
/// without SMTP credentials.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    /// Create a console notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BookingNotifier for ConsoleNotifier {
    async fn send_booking_alert(&self, alert: &BookingAlert) -> Result<(), NotifyError> {
        tracing::info!(
            customer_email = %alert.customer_email,
            "Mail not configured; booking alert:\n{}",
            alert.body()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(summary: &str) -> BookingAlert {
        BookingAlert {
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@x.com".to_string(),
            customer_address: Some("12 MG Road".to_string()),
            customer_state: Some("Gujarat".to_string()),
            customer_country: Some("India".to_string()),
            product_summary: summary.to_string(),
        }
    }

    #[test]
    fn body_contains_customer_details_and_products() {
        let body = alert("SE03 - Qty: 2").body();

        assert!(body.starts_with("New Pre-Booking Received\n"));
        assert!(body.contains("Name: Jane Doe\n"));
        assert!(body.contains("Email: jane@x.com\n"));
        assert!(body.contains("Address: 12 MG Road\n"));
        assert!(body.contains("State: Gujarat\n"));
        assert!(body.contains("Country: India\n"));
        assert!(body.contains("Products:\nSE03 - Qty: 2\n"));
    }

    #[test]
    fn body_renders_missing_fields_as_empty() {
        let mut a = alert("No products selected");
        a.customer_address = None;
        a.customer_state = None;
        a.customer_country = None;

        let body = a.body();
        assert!(body.contains("Address: \n"));
        assert!(body.contains("State: \n"));
        assert!(body.contains("Country: \n"));
        assert!(body.contains("No products selected"));
    }
}
