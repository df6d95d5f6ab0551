use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use tarot_core::{interpreter_for, HttpDeckSource, ReadingService, TarotConfig};

/// Main entry point for the tarot service
///
/// Serves the REST API: three-card draws on `/cards` and interpretation lookups on
/// `/cards/interpret/{request_id}`.
///
/// # Environment Variables
/// - `TAROT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TAROT_DECK_URL`: Card-data endpoint (default: tarotapi.dev)
/// - `TAROT_DECK_TIMEOUT_SECS`: Bound on each deck fetch (default: 10)
/// - `TAROT_COMPLETIONS_URL`, `TAROT_MODEL`, `TAROT_MAX_TOKENS`: text-completion settings
/// - `TAROT_INTERPRET_TIMEOUT_SECS`: Bound on each interpretation attempt (default: 30)
/// - `API_KEY`: Text-generation secret, required unless test mode is on
/// - `TESTING`: When true, interpretations are a fixed sentinel and no completion call is made
///
/// Variables may also be supplied through a `.env` file in the working directory.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tarot_run=info".parse()?)
                .add_directive("tarot_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = TarotConfig::from_lookup(|key| std::env::var(key).ok())?;

    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let interpreter = interpreter_for(&cfg, http.clone());
    let deck =
        Arc::new(HttpDeckSource::new(http, cfg.deck_url()).with_timeout(cfg.deck_timeout()));

    let readings = ReadingService::new(deck, interpreter);
    let app = router(AppState::new(readings));

    tracing::info!("++ Starting tarot REST on {}", cfg.rest_addr());
    tracing::info!("-- Card source: {}", cfg.deck_url());

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
