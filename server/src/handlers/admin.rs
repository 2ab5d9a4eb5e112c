//! Admin panel: login, dashboard, bookings list, delete.
//!
//! Every view except login requires the session's admin capability;
//! without it the handler redirects to the login form.

use crate::checkout::CheckoutProvider;
use crate::error::AppError;
use crate::notify::BookingNotifier;
use crate::session::{Flash, SessionHandle};
use crate::state::AppState;
use crate::views;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use constant_time_eq::constant_time_eq;
use serde::Deserialize;

/// How many recent bookings the dashboard shows.
const DASHBOARD_RECENT: i64 = 5;

/// Check the session's admin capability.
///
/// Returns the login redirect when the capability is missing, so
/// protected handlers can bail with `?`-free early returns.
fn require_admin(session: &SessionHandle) -> Result<(), Redirect> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(Redirect::to("/admin/login"))
    }
}

/// GET `/admin/login`
pub async fn login_form(session: SessionHandle) -> Html<String> {
    views::admin_login_page(&session.take_flashes())
}

/// Admin credential submission.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Submitted username.
    pub username: Option<String>,
    /// Submitted password.
    pub password: Option<String>,
}

/// POST `/admin/login`: exact-match credential check.
pub async fn login<N, C>(
    State(state): State<AppState<N, C>>,
    session: SessionHandle,
    Form(form): Form<LoginForm>,
) -> Redirect
where
    N: BookingNotifier + Clone + 'static,
    C: CheckoutProvider + Clone + 'static,
{
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();
    let admin = &state.config.admin;

    // Constant-time comparison; evaluate both halves regardless.
    let username_ok = constant_time_eq(username.as_bytes(), admin.username.as_bytes());
    let password_ok = constant_time_eq(password.as_bytes(), admin.password.as_bytes());

    if username_ok && password_ok {
        session.grant_admin();
        session.flash(Flash::success("Login successful"));
        tracing::info!("Admin login succeeded");
        Redirect::to("/admin/dashboard")
    } else {
        session.flash(Flash::error("Invalid credentials"));
        tracing::warn!("Admin login failed");
        Redirect::to("/admin/login")
    }
}

/// GET `/admin/dashboard`: total count and latest bookings.
pub async fn dashboard<N, C>(
    State(state): State<AppState<N, C>>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    N: BookingNotifier + Clone + 'static,
    C: CheckoutProvider + Clone + 'static,
{
    if let Err(redirect) = require_admin(&session) {
        return Ok(redirect.into_response());
    }

    let total = state.store.count().await?;
    let latest = state.store.list_recent(DASHBOARD_RECENT).await?;
    Ok(views::admin_dashboard_page(total, &latest, &session.take_flashes()).into_response())
}

/// GET `/admin/bookings`: all bookings, newest first.
pub async fn bookings<N, C>(
    State(state): State<AppState<N, C>>,
    session: SessionHandle,
) -> Result<Response, AppError>
where
    N: BookingNotifier + Clone + 'static,
    C: CheckoutProvider + Clone + 'static,
{
    if let Err(redirect) = require_admin(&session) {
        return Ok(redirect.into_response());
    }

    let records = state.store.list_all().await?;
    Ok(views::admin_bookings_page(&records, &session.take_flashes()).into_response())
}

/// GET/POST `/admin/delete/:id`: permanent delete.
///
/// Reports the outcome through a flash and redirects to the bookings
/// list either way.
pub async fn delete<N, C>(
    State(state): State<AppState<N, C>>,
    session: SessionHandle,
    Path(id): Path<i64>,
) -> Result<Response, AppError>
where
    N: BookingNotifier + Clone + 'static,
    C: CheckoutProvider + Clone + 'static,
{
    if let Err(redirect) = require_admin(&session) {
        return Ok(redirect.into_response());
    }

    if state.store.delete(id).await? {
        session.flash(Flash::success(format!("Deleted booking #{id}")));
    } else {
        session.flash(Flash::error("Booking not found"));
    }
    Ok(Redirect::to("/admin/bookings").into_response())
}

/// GET `/admin/logout`: revoke the admin capability.
pub async fn logout(session: SessionHandle) -> Redirect {
    session.revoke_admin();
    session.flash(Flash::info("Logged out"));
    Redirect::to("/admin/login")
}
