//! Router configuration.
//!
//! Builds the complete Axum router: informational pages, the booking
//! workflow, checkout hand-off, and the admin panel, with the session
//! middleware and request tracing layered on top.

use crate::checkout::CheckoutProvider;
use crate::handlers::{admin, booking, pages};
use crate::notify::BookingNotifier;
use crate::session::session_middleware;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::get,
};
use tower_http::trace::TraceLayer;

/// Build the complete router over the given state.
pub fn build_router<N, C>(state: AppState<N, C>) -> Router
where
    N: BookingNotifier + Clone + Send + Sync + 'static,
    C: CheckoutProvider + Clone + Send + Sync + 'static,
{
    let admin_routes = Router::new()
        .route(
            "/login",
            get(admin::login_form).post(admin::login::<N, C>),
        )
        .route("/dashboard", get(admin::dashboard::<N, C>))
        .route("/bookings", get(admin::bookings::<N, C>))
        .route(
            "/delete/:id",
            get(admin::delete::<N, C>).post(admin::delete::<N, C>),
        )
        .route("/logout", get(admin::logout));

    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        .route("/compare", get(pages::compare))
        .route("/rentals", get(pages::rentals))
        .route("/se03lite", get(pages::se03lite))
        .route("/se03", get(pages::se03))
        .route("/se03max", get(pages::se03max))
        .route(
            "/prebook",
            get(booking::prebook_form).post(booking::prebook_submit::<N, C>),
        )
        .route(
            "/create-checkout-session",
            axum::routing::post(booking::create_checkout_session::<N, C>),
        )
        .route("/payment-success", get(pages::payment_success))
        .nest("/admin", admin_routes)
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
