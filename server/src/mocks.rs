//! Mock providers for testing.
//!
//! In-memory stand-ins for the mail and checkout channels, recording
//! what they were asked to send so tests can assert on it.

use crate::checkout::{CheckoutError, CheckoutProvider};
use crate::notify::{BookingAlert, BookingNotifier, NotifyError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock booking notifier.
///
/// Records every alert. Can be switched into a failing mode to
/// exercise the best-effort contract.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<BookingAlert>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockNotifier {
    /// Create a mock notifier that accepts every alert.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail.
    pub fn fail_sends(&self) {
        *lock(&self.fail) = true;
    }

    /// Alerts recorded so far.
    #[must_use]
    pub fn sent(&self) -> Vec<BookingAlert> {
        lock(&self.sent).clone()
    }
}

impl BookingNotifier for MockNotifier {
    async fn send_booking_alert(&self, alert: &BookingAlert) -> Result<(), NotifyError> {
        if *lock(&self.fail) {
            return Err(NotifyError::Smtp("mock send failure".to_string()));
        }
        lock(&self.sent).push(alert.clone());
        Ok(())
    }
}

/// Mock checkout provider.
///
/// Captures the amount and currency it was called with and returns a
/// fixed hosted-checkout URL.
#[derive(Debug, Clone, Default)]
pub struct MockCheckout {
    calls: Arc<Mutex<Vec<(i64, String)>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockCheckout {
    /// Create a mock checkout provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent session creation fail.
    pub fn fail_sessions(&self) {
        *lock(&self.fail) = true;
    }

    /// `(amount_minor, currency)` pairs received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(i64, String)> {
        lock(&self.calls).clone()
    }
}

impl CheckoutProvider for MockCheckout {
    async fn create_session(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, CheckoutError> {
        if *lock(&self.fail) {
            return Err(CheckoutError::Http("mock provider down".to_string()));
        }
        lock(&self.calls).push((amount_minor, currency.to_string()));
        Ok("https://checkout.example.com/session/mock".to_string())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
