//! Configuration management for the Rhyno site.
//!
//! Loads configuration from environment variables with sensible
//! defaults, constructed once at process start and passed by
//! reference to the components that need it.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// SQLite database configuration.
    pub database: DatabaseConfig,
    /// Outbound mail configuration, absent when `EMAIL_ADDRESS` is unset.
    pub mail: Option<MailConfig>,
    /// Hosted checkout configuration.
    pub checkout: CheckoutConfig,
    /// Admin panel credentials.
    pub admin: AdminConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Externally visible base URL, used for checkout callback URLs.
    pub base_url: String,
}

/// SQLite database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    pub url: String,
}

/// Outbound SMTP mail configuration.
///
/// The admin notification address doubles as the sender: the site
/// mails itself on every new pre-booking.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server address.
    pub smtp_host: String,
    /// SMTP server port (implicit TLS).
    pub smtp_port: u16,
    /// Sender address, also the notification recipient.
    pub sender: String,
    /// SMTP credential for the sender account.
    pub password: String,
}

/// Hosted checkout (Stripe) configuration.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Secret API key for the checkout provider.
    pub secret_key: String,
    /// ISO currency code for checkout sessions.
    pub currency: String,
}

/// Admin panel credentials.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Missing variables fall back to local-development defaults;
    /// mail is disabled entirely when `EMAIL_ADDRESS` is unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
                base_url: env::var("BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:rhyno.db".to_string()),
            },
            mail: env::var("EMAIL_ADDRESS").ok().map(|sender| MailConfig {
                smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                smtp_port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(465),
                sender,
                password: env::var("EMAIL_PASSWORD").unwrap_or_default(),
            }),
            checkout: CheckoutConfig {
                secret_key: env::var("STRIPE_SECRET_KEY").unwrap_or_default(),
                currency: env::var("CHECKOUT_CURRENCY").unwrap_or_else(|_| "inr".to_string()),
            },
            admin: AdminConfig {
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
                password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "1234".to_string()),
            },
        }
    }
}
