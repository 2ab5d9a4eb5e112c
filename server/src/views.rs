//! Inline HTML rendering.
//!
//! The informational pages are static copy; the forms and admin
//! tables are built here from a shared layout. No template engine,
//! just careful escaping of anything customer-supplied.

use crate::session::Flash;
use axum::response::Html;
use rhyno_store::BookingRecord;
use std::fmt::Write;

/// Escape text for safe interpolation into HTML.
#[must_use]
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn flash_banner(flashes: &[Flash]) -> String {
    let mut banner = String::new();
    for flash in flashes {
        let _ = write!(
            banner,
            r#"<div class="flash {}">{}</div>"#,
            flash.kind.css_class(),
            html_escape(&flash.message)
        );
    }
    banner
}

/// Wrap page content in the shared site layout, rendering any
/// pending flash messages at the top.
#[must_use]
pub fn layout(title: &str, flashes: &[Flash], body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Rhyno EV</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 0; color: #222; }}
nav {{ background: #1a1a2e; padding: 12px 24px; }}
nav a {{ color: #e0e0e0; margin-right: 16px; text-decoration: none; }}
main {{ max-width: 860px; margin: 0 auto; padding: 24px; }}
.flash {{ padding: 10px 14px; margin-bottom: 12px; border-radius: 4px; }}
.flash-success {{ background: #e6f7e6; color: #1b5e20; }}
.flash-error {{ background: #fdecea; color: #b71c1c; }}
.flash-info {{ background: #e8f0fe; color: #1a237e; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 6px 10px; text-align: left; }}
label {{ display: block; margin-top: 10px; }}
input {{ padding: 6px; }}
button {{ margin-top: 14px; padding: 8px 18px; }}
</style>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/about">About</a>
<a href="/contact">Contact</a>
<a href="/compare">Compare</a>
<a href="/rentals">Rentals</a>
<a href="/se03lite">SE03 Lite</a>
<a href="/se03">SE03</a>
<a href="/se03max">SE03 Max</a>
<a href="/prebook">Pre-Book</a>
</nav>
<main>
{banner}
{body}
</main>
</body>
</html>
"#,
        banner = flash_banner(flashes),
    ))
}

/// Render one of the static informational pages.
#[must_use]
pub fn static_page(title: &str, heading: &str, blurb: &str, flashes: &[Flash]) -> Html<String> {
    let body = format!("<h1>{heading}</h1>\n<p>{blurb}</p>");
    layout(title, flashes, &body)
}

/// Render the pre-booking form.
#[must_use]
pub fn prebook_page(flashes: &[Flash]) -> Html<String> {
    let body = r#"<h1>Pre-Book Your Rhyno</h1>
<form method="post" action="/prebook">
<label>Name <input type="text" name="customer_name"></label>
<label>Email <input type="email" name="customer_email"></label>
<label>Address <input type="text" name="customer_address"></label>
<label>State <input type="text" name="customer_state"></label>
<label>Country <input type="text" name="customer_country"></label>
<label>SE03 Lite quantity <input type="number" name="se03lite_qty" min="0" value="0"></label>
<label>SE03 quantity <input type="number" name="se03_qty" min="0" value="0"></label>
<label>SE03 Max quantity <input type="number" name="se03max_qty" min="0" value="0"></label>
<button type="submit">Submit Pre-Booking</button>
</form>
<h2>Pay the booking amount</h2>
<form method="post" action="/create-checkout-session">
<label>Amount (INR) <input type="text" name="amount" value="499.00"></label>
<button type="submit">Pay Now</button>
</form>
"#;
    layout("Pre-Book", flashes, body)
}

/// Render the admin login form.
#[must_use]
pub fn admin_login_page(flashes: &[Flash]) -> Html<String> {
    let body = r#"<h1>Admin Login</h1>
<form method="post" action="/admin/login">
<label>Username <input type="text" name="username"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Log In</button>
</form>
"#;
    layout("Admin Login", flashes, body)
}

fn booking_rows(bookings: &[BookingRecord]) -> String {
    let mut rows = String::new();
    for b in bookings {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"/admin/delete/{}\">Delete</a></td></tr>",
            b.id,
            html_escape(&b.customer_name),
            html_escape(&b.customer_email),
            html_escape(b.customer_state.as_deref().unwrap_or("-")),
            b.se03lite_qty,
            b.se03_qty,
            b.se03max_qty,
            b.created_at.format("%Y-%m-%d %H:%M UTC"),
            b.id,
        );
    }
    rows
}

const BOOKING_TABLE_HEADER: &str = "<tr><th>Id</th><th>Name</th><th>Email</th><th>State</th>\
     <th>SE03 Lite</th><th>SE03</th><th>SE03 Max</th><th>Created</th><th></th></tr>";

/// Render the admin dashboard: total count plus the latest bookings.
#[must_use]
pub fn admin_dashboard_page(total: i64, latest: &[BookingRecord], flashes: &[Flash]) -> Html<String> {
    let body = format!(
        "<h1>Dashboard</h1>\n\
         <p>Total pre-bookings: <strong>{total}</strong></p>\n\
         <p><a href=\"/admin/bookings\">All bookings</a> | <a href=\"/admin/logout\">Log out</a></p>\n\
         <h2>Latest</h2>\n<table>{}{}</table>",
        BOOKING_TABLE_HEADER,
        booking_rows(latest),
    );
    layout("Dashboard", flashes, &body)
}

/// Render the full bookings list.
#[must_use]
pub fn admin_bookings_page(bookings: &[BookingRecord], flashes: &[Flash]) -> Html<String> {
    let body = format!(
        "<h1>All Pre-Bookings</h1>\n\
         <p><a href=\"/admin/dashboard\">Dashboard</a> | <a href=\"/admin/logout\">Log out</a></p>\n\
         <table>{}{}</table>",
        BOOKING_TABLE_HEADER,
        booking_rows(bookings),
    );
    layout("Bookings", flashes, &body)
}
