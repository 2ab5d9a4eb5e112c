//! The pre-booking workflow: validate, persist, notify.
//!
//! Kept free of HTTP concerns so the full
//! form → validate → persist → notify pipeline is testable without a
//! server. The handler layer maps the outcome to flashes and
//! redirects.

use crate::notify::{BookingAlert, BookingNotifier};
use rhyno_store::{BookingStore, NewBooking, StoreError};
use serde::Deserialize;
use thiserror::Error;

/// Validation message for a missing name or email.
pub const MISSING_REQUIRED_FIELDS: &str = "Name and email are required.";

/// Validation message for unparseable quantity input.
pub const BAD_QUANTITY: &str = "Quantities must be non-negative whole numbers.";

/// Raw pre-booking form submission.
///
/// Everything arrives as optional text; quantities are parsed here
/// rather than trusting the form's input typing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrebookForm {
    /// Customer name (required).
    pub customer_name: Option<String>,
    /// Customer email (required).
    pub customer_email: Option<String>,
    /// Customer address (optional, email-only).
    pub customer_address: Option<String>,
    /// Customer state/region (optional).
    pub customer_state: Option<String>,
    /// Customer country (optional, email-only).
    pub customer_country: Option<String>,
    /// SE03 Lite quantity.
    pub se03lite_qty: Option<String>,
    /// SE03 quantity.
    pub se03_qty: Option<String>,
    /// SE03 Max quantity.
    pub se03max_qty: Option<String>,
}

/// Result of a successfully stored booking.
///
/// Notification failure is part of the contract, not a swallowed
/// exception: the booking is durable either way and callers can
/// assert on both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Stored and the admin alert went out.
    Notified(i64),
    /// Stored, but the admin alert failed. Logged, non-fatal.
    NotifyFailed(i64),
}

impl BookingOutcome {
    /// Id of the stored booking.
    #[must_use]
    pub const fn booking_id(self) -> i64 {
        match self {
            Self::Notified(id) | Self::NotifyFailed(id) => id,
        }
    }
}

/// Failures before or during persistence. Nothing was stored.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The submission failed validation; the user sees this message.
    #[error("{0}")]
    Validation(&'static str),

    /// The store rejected the insert. Fatal for the request.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse one quantity field: missing or empty means zero.
fn parse_qty(raw: Option<&str>) -> Result<i64, SubmitError> {
    let raw = raw.unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(0);
    }
    match raw.parse::<i64>() {
        Ok(qty) if qty >= 0 => Ok(qty),
        _ => Err(SubmitError::Validation(BAD_QUANTITY)),
    }
}

/// Build the newline-joined product summary.
///
/// Only products with a positive quantity are listed.
#[must_use]
pub fn product_summary(se03lite_qty: i64, se03_qty: i64, se03max_qty: i64) -> String {
    let mut products = Vec::new();
    if se03lite_qty > 0 {
        products.push(format!("SE03 Lite - Qty: {se03lite_qty}"));
    }
    if se03_qty > 0 {
        products.push(format!("SE03 - Qty: {se03_qty}"));
    }
    if se03max_qty > 0 {
        products.push(format!("SE03 Max - Qty: {se03max_qty}"));
    }

    if products.is_empty() {
        "No products selected".to_string()
    } else {
        products.join("\n")
    }
}

fn required(field: Option<&String>) -> Result<String, SubmitError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(SubmitError::Validation(MISSING_REQUIRED_FIELDS)),
    }
}

/// Treat absent and empty optional fields the same.
fn optional(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

/// Run the booking workflow for one submission.
///
/// Validates, persists exactly one record, then sends the admin
/// alert best-effort. A notification failure is reported in the
/// outcome but never rolls back the stored record.
///
/// # Errors
///
/// [`SubmitError::Validation`] when a required field is missing or a
/// quantity is malformed; [`SubmitError::Store`] when persistence
/// fails. In both cases nothing was stored.
pub async fn submit_booking<N: BookingNotifier>(
    store: &BookingStore,
    notifier: &N,
    form: PrebookForm,
) -> Result<BookingOutcome, SubmitError> {
    let customer_name = required(form.customer_name.as_ref())?;
    let customer_email = required(form.customer_email.as_ref())?;

    let se03lite_qty = parse_qty(form.se03lite_qty.as_deref())?;
    let se03_qty = parse_qty(form.se03_qty.as_deref())?;
    let se03max_qty = parse_qty(form.se03max_qty.as_deref())?;

    let customer_address = optional(form.customer_address);
    let customer_state = optional(form.customer_state);
    let customer_country = optional(form.customer_country);

    let id = store
        .create(NewBooking {
            customer_name: customer_name.clone(),
            customer_email: customer_email.clone(),
            customer_state: customer_state.clone(),
            se03lite_qty,
            se03_qty,
            se03max_qty,
        })
        .await?;

    let alert = BookingAlert {
        customer_name,
        customer_email,
        customer_address,
        customer_state,
        customer_country,
        product_summary: product_summary(se03lite_qty, se03_qty, se03max_qty),
    };

    // The record is durable at this point; a failed alert must not
    // fail the request.
    match notifier.send_booking_alert(&alert).await {
        Ok(()) => Ok(BookingOutcome::Notified(id)),
        Err(e) => {
            tracing::error!(booking_id = id, error = %e, "Booking alert failed");
            Ok(BookingOutcome::NotifyFailed(id))
        }
    }
}
