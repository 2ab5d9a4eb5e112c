//! Hosted checkout session initiation.
//!
//! One outbound API call to the payment provider, no local state: the
//! provider hosts the checkout page and owns reconciliation. This
//! site only hands the customer a redirect URL. There is no webhook
//! handler; payment completion is only observable through the
//! customer reaching the success page.

use crate::config::{CheckoutConfig, ServerConfig};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use thiserror::Error;

/// Fixed product label shown on the hosted checkout page.
const PRODUCT_LABEL: &str = "Rhyno EV Pre-Booking";

/// Stripe Checkout Sessions endpoint.
const STRIPE_API_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

/// Failures while initiating a checkout session.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The submitted amount is not a usable decimal number.
    #[error("invalid amount: {0}")]
    Amount(String),

    /// The outbound request failed before a response arrived.
    #[error("checkout request failed: {0}")]
    Http(String),

    /// The provider answered with an error or an unusable body.
    #[error("checkout provider error ({status}): {detail}")]
    Provider {
        /// HTTP status returned by the provider.
        status: StatusCode,
        /// Provider error detail, as far as it could be read.
        detail: String,
    },
}

/// Convert a user-supplied decimal amount into minor currency units.
///
/// Multiplies by 100 and truncates, matching what the provider
/// expects for two-decimal currencies.
///
/// # Errors
///
/// Returns [`CheckoutError::Amount`] for non-numeric, negative, or
/// non-finite input.
#[allow(clippy::cast_possible_truncation)]
pub fn to_minor_units(amount: &str) -> Result<i64, CheckoutError> {
    let value: f64 = amount
        .trim()
        .parse()
        .map_err(|_| CheckoutError::Amount(amount.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(CheckoutError::Amount(amount.to_string()));
    }

    Ok((value * 100.0).trunc() as i64)
}

/// Payment provider capable of creating hosted checkout sessions.
pub trait CheckoutProvider: Send + Sync {
    /// Create a checkout session and return the hosted page URL.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] when the provider call fails. The
    /// caller propagates this as a fatal request failure.
    fn create_session(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> impl Future<Output = Result<String, CheckoutError>> + Send;
}

/// Successful session response; only the redirect URL matters here.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    url: String,
}

/// Stripe-hosted checkout.
#[derive(Clone)]
pub struct StripeCheckout {
    client: Client,
    secret_key: String,
    api_url: String,
    success_url: String,
    cancel_url: String,
}

impl StripeCheckout {
    /// Create a Stripe checkout client.
    ///
    /// Callback URLs are derived from the configured base URL:
    /// success lands on `/payment-success`, cancel returns to the
    /// booking form.
    #[must_use]
    pub fn new(checkout: &CheckoutConfig, server: &ServerConfig) -> Self {
        Self {
            client: Client::new(),
            secret_key: checkout.secret_key.clone(),
            api_url: STRIPE_API_URL.to_string(),
            success_url: format!("{}/payment-success", server.base_url),
            cancel_url: format!("{}/prebook", server.base_url),
        }
    }
}

impl CheckoutProvider for StripeCheckout {
    async fn create_session(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<String, CheckoutError> {
        let params = [
            ("payment_method_types[0]", "card".to_string()),
            ("mode", "payment".to_string()),
            (
                "line_items[0][price_data][currency]",
                currency.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                PRODUCT_LABEL.to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                amount_minor.to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| CheckoutError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CheckoutError::Provider { status, detail });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::Provider {
                status,
                detail: format!("unreadable session body: {e}"),
            })?;

        tracing::info!(amount_minor, currency, "Checkout session created");
        Ok(session.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_converts_to_minor_units_with_truncation() {
        assert_eq!(to_minor_units("499.50").unwrap(), 49_950);
        assert_eq!(to_minor_units("100").unwrap(), 10_000);
        assert_eq!(to_minor_units("0").unwrap(), 0);
        // Truncation, not rounding.
        assert_eq!(to_minor_units("1.999").unwrap(), 199);
        assert_eq!(to_minor_units(" 42.25 ").unwrap(), 4_225);
    }

    #[test]
    fn malformed_amounts_are_rejected() {
        assert!(to_minor_units("").is_err());
        assert!(to_minor_units("abc").is_err());
        assert!(to_minor_units("-1").is_err());
        assert!(to_minor_units("inf").is_err());
        assert!(to_minor_units("NaN").is_err());
    }
}
