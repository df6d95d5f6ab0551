//! Card source adapters.
//!
//! The deck is fetched from the card-data provider on every draw; nothing is cached
//! between requests.

use crate::card::Card;
use crate::constants::DEFAULT_DECK_TIMEOUT;
use crate::error::DeckError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Supplies the full deck of card definitions.
#[async_trait]
pub trait DeckSource: Send + Sync {
    async fn fetch_deck(&self) -> Result<Vec<Card>, DeckError>;
}

#[derive(Deserialize)]
struct DeckResponse {
    cards: Vec<Card>,
}

/// Fetches the deck from an HTTP endpoint returning `{"cards": [...]}`.
///
/// The whole fetch, including reading the body, is bounded by a timeout.
#[derive(Clone, Debug)]
pub struct HttpDeckSource {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpDeckSource {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            timeout: DEFAULT_DECK_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch(&self) -> Result<Vec<Card>, DeckError> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(DeckError::Request)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DeckError::Status(status.as_u16()));
        }

        let body: DeckResponse = resp.json().await.map_err(DeckError::Decode)?;
        if body.cards.is_empty() {
            return Err(DeckError::Empty);
        }

        tracing::debug!(cards = body.cards.len(), "fetched tarot deck");
        Ok(body.cards)
    }
}

#[async_trait]
impl DeckSource for HttpDeckSource {
    async fn fetch_deck(&self) -> Result<Vec<Card>, DeckError> {
        tokio::time::timeout(self.timeout, self.fetch())
            .await
            .map_err(|_| DeckError::Timeout(self.timeout))?
    }
}

/// A fixed, in-memory deck.
#[derive(Clone, Debug)]
pub struct StaticDeck {
    cards: Vec<Card>,
}

impl StaticDeck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

#[async_trait]
impl DeckSource for StaticDeck {
    async fn fetch_deck(&self) -> Result<Vec<Card>, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(self.cards.clone())
    }
}
