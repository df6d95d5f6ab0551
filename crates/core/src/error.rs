use std::time::Duration;

/// Failures fetching the deck from the card-data provider.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to request tarot cards: {0}")]
    Request(reqwest::Error),
    #[error("card source responded with status {0}")]
    Status(u16),
    #[error("failed to decode tarot cards: {0}")]
    Decode(reqwest::Error),
    #[error("card source returned an empty deck")]
    Empty,
    #[error("card source did not respond within {0:?}")]
    Timeout(Duration),
}

/// Failures drawing a spread from a deck.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("cannot draw {requested} distinct cards from a deck with {available} distinct names")]
    DeckTooSmall { requested: usize, available: usize },
}

/// Failures producing an interpretation from the text-generation service.
#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    #[error("no API key configured for the text-generation service")]
    MissingApiKey,
    #[error("failed to send completion request: {0}")]
    Request(reqwest::Error),
    #[error("completion service responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to read completion response body: {0}")]
    Body(reqwest::Error),
    #[error("failed to decode completion response: {0}")]
    Decode(serde_json::Error),
    #[error("no choices in completion response")]
    NoChoices,
    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),
}

impl InterpretationError {
    /// Connection failures and timeouts are worth one more attempt; the rest are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestIdError {
    #[error("invalid request ID '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: uuid::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("API_KEY must be set unless test mode is enabled")]
    MissingApiKey,
}

#[derive(Debug, thiserror::Error)]
pub enum TarotError {
    #[error("failed to fetch tarot cards: {0}")]
    Deck(#[from] DeckError),
    #[error("failed to draw cards: {0}")]
    Draw(#[from] DrawError),
}

pub type TarotResult<T> = std::result::Result<T, TarotError>;
