//! Static informational pages.
//!
//! No logic beyond template selection; each handler drains pending
//! flash messages so redirects land with their notices visible.

use crate::session::SessionHandle;
use crate::views;
use axum::response::Html;

/// GET `/`
pub async fn home(session: SessionHandle) -> Html<String> {
    views::static_page(
        "Home",
        "Ride the Future with Rhyno",
        "Electric scooters built for Indian roads. Explore the SE03 line and \
         pre-book yours today.",
        &session.take_flashes(),
    )
}

/// GET `/about`
pub async fn about(session: SessionHandle) -> Html<String> {
    views::static_page(
        "About Us",
        "About Rhyno",
        "We build rugged, affordable electric scooters with safe LFP battery \
         technology and a service-first mindset.",
        &session.take_flashes(),
    )
}

/// GET `/contact`
pub async fn contact(session: SessionHandle) -> Html<String> {
    views::static_page(
        "Contact Us",
        "Contact",
        "Questions about the SE03 line, rentals, or your pre-booking? Write to \
         us and we will get back within a working day.",
        &session.take_flashes(),
    )
}

/// GET `/compare`
pub async fn compare(session: SessionHandle) -> Html<String> {
    views::static_page(
        "Compare",
        "Compare All Models",
        "SE03 Lite for the city commute, SE03 for range, SE03 Max for payload. \
         Side-by-side specs to pick yours.",
        &session.take_flashes(),
    )
}

/// GET `/rentals`
pub async fn rentals(session: SessionHandle) -> Html<String> {
    views::static_page(
        "Rentals",
        "Rhyno Rentals",
        "Daily and weekly rental plans for fleets and individuals in select \
         cities.",
        &session.take_flashes(),
    )
}

/// GET `/se03lite`
pub async fn se03lite(session: SessionHandle) -> Html<String> {
    views::static_page(
        "SE03 Lite",
        "Rhyno SE03 Lite",
        "The lightweight commuter: nimble, efficient, and easy on the wallet.",
        &session.take_flashes(),
    )
}

/// GET `/se03`
pub async fn se03(session: SessionHandle) -> Html<String> {
    views::static_page(
        "SE03",
        "Rhyno SE03",
        "The all-rounder: extended range and a comfortable two-seater frame.",
        &session.take_flashes(),
    )
}

/// GET `/se03max`
pub async fn se03max(session: SessionHandle) -> Html<String> {
    views::static_page(
        "SE03 Max",
        "Rhyno SE03 Max",
        "The workhorse: maximum payload and battery capacity for long hauls.",
        &session.take_flashes(),
    )
}

/// GET `/payment-success`
pub async fn payment_success(session: SessionHandle) -> Html<String> {
    views::static_page(
        "Payment Successful",
        "Payment Successful",
        "Thank you! Your pre-booking amount has been received. We will reach \
         out with delivery details.",
        &session.take_flashes(),
    )
}
