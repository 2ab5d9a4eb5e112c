//! Rhyno site HTTP server.

use rhyno_server::checkout::StripeCheckout;
use rhyno_server::notify::{BookingNotifier, ConsoleNotifier, SmtpNotifier};
use rhyno_server::{AppState, Config, build_router};
use rhyno_store::BookingStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rhyno_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rhyno site HTTP server");

    let config = Config::from_env();
    info!(
        database_url = %config.database.url,
        base_url = %config.server.base_url,
        mail_configured = config.mail.is_some(),
        "Configuration loaded"
    );

    if config.checkout.secret_key.is_empty() {
        tracing::warn!("STRIPE_SECRET_KEY is not set; checkout hand-off will fail");
    }

    match config.mail.clone() {
        Some(mail) => run(config, SmtpNotifier::new(&mail)).await,
        None => run(config, ConsoleNotifier::new()).await,
    }
}

async fn run<N>(config: Config, notifier: N) -> Result<(), Box<dyn std::error::Error>>
where
    N: BookingNotifier + Clone + Send + Sync + 'static,
{
    info!("Connecting to database...");
    let pool = SqlitePoolOptions::new()
        .connect_with(SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true))
        .await?;
    let store = BookingStore::new(pool);
    store.migrate().await?;
    info!("Database ready");

    let checkout = StripeCheckout::new(&config.checkout, &config.server);
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(store, notifier, checkout, Arc::new(config));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
