//! Booking form and checkout handlers.

use crate::checkout::{self, CheckoutProvider};
use crate::error::AppError;
use crate::notify::BookingNotifier;
use crate::session::{Flash, SessionHandle};
use crate::state::AppState;
use crate::views;
use crate::workflow::{self, BookingOutcome, PrebookForm, SubmitError};
use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

/// GET `/prebook`: render the booking form.
pub async fn prebook_form(session: SessionHandle) -> Html<String> {
    views::prebook_page(&session.take_flashes())
}

/// POST `/prebook`: run the booking workflow.
///
/// Validation failures flash and redirect back to the form; storage
/// failures are fatal for the request. A notification failure is
/// logged by the workflow and deliberately not distinguished in the
/// customer-facing message.
pub async fn prebook_submit<N, C>(
    State(state): State<AppState<N, C>>,
    session: SessionHandle,
    Form(form): Form<PrebookForm>,
) -> Result<Response, AppError>
where
    N: BookingNotifier + Clone + 'static,
    C: CheckoutProvider + Clone + 'static,
{
    match workflow::submit_booking(&state.store, &state.notifier, form).await {
        Ok(outcome) => {
            tracing::info!(booking_id = outcome.booking_id(), "Pre-booking stored");
            let message = match outcome {
                BookingOutcome::Notified(_) => "Pre-booking submitted successfully! Email sent.",
                BookingOutcome::NotifyFailed(_) => "Pre-booking submitted successfully!",
            };
            session.flash(Flash::success(message));
            Ok(Redirect::to("/").into_response())
        }
        Err(SubmitError::Validation(message)) => {
            session.flash(Flash::error(message));
            Ok(Redirect::to("/prebook").into_response())
        }
        Err(SubmitError::Store(e)) => Err(e.into()),
    }
}

/// POST body for checkout initiation.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    /// Decimal amount in major currency units.
    pub amount: String,
}

/// POST `/create-checkout-session`: hand off to hosted checkout.
///
/// Replies `303 See Other` pointing at the provider-hosted page.
pub async fn create_checkout_session<N, C>(
    State(state): State<AppState<N, C>>,
    Form(form): Form<CheckoutForm>,
) -> Result<Redirect, AppError>
where
    N: BookingNotifier + Clone + 'static,
    C: CheckoutProvider + Clone + 'static,
{
    let amount_minor = checkout::to_minor_units(&form.amount)
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let url = state
        .checkout
        .create_session(amount_minor, &state.config.checkout.currency)
        .await
        .map_err(|e| AppError::internal("Checkout initiation failed").with_source(e.into()))?;

    Ok(Redirect::to(&url))
}
