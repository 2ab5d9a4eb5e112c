//! Web server for the Rhyno EV marketing and pre-booking site.
//!
//! Static informational pages, a pre-booking form persisted through
//! [`rhyno_store`], a best-effort admin email per booking, a hand-off
//! to Stripe-hosted checkout, and a password-gated admin panel.
//!
//! # Request flow
//!
//! 1. Session middleware resolves the browser's session cookie.
//! 2. Handlers extract what they need ([`session::SessionHandle`],
//!    form bodies, [`state::AppState`]).
//! 3. The booking workflow validates, persists, then notifies
//!    best-effort; outcomes surface as flash messages on the next
//!    rendered page.
//!
//! External collaborators sit behind provider traits
//! ([`notify::BookingNotifier`], [`checkout::CheckoutProvider`]) so
//! tests run against mocks.

pub mod checkout;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mocks;
pub mod notify;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;
pub mod workflow;

pub use config::Config;
pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;
