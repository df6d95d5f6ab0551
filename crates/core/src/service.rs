//! Reading workflow.
//!
//! [`ReadingService`] composes the card source, the draw engine, the interpreter and the
//! correlation store. Drawing is awaited by the caller; interpretation runs in a detached
//! task whose only observable outcome is an entry appearing in the store.

use crate::card::DrawnCard;
use crate::constants::SPREAD_SIZE;
use crate::deck::DeckSource;
use crate::draw::CardDrawer;
use crate::error::TarotResult;
use crate::interpretation::{Interpreter, ReadingRequest};
use crate::request_id::RequestId;
use crate::store::InterpretationStore;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Draws spreads and produces their interpretations in the background.
///
/// Cloning is cheap; clones share the drawer, adapters and store.
#[derive(Clone)]
pub struct ReadingService {
    deck: Arc<dyn DeckSource>,
    drawer: Arc<CardDrawer>,
    interpreter: Arc<dyn Interpreter>,
    store: InterpretationStore,
}

impl ReadingService {
    /// Creates a service with an entropy-seeded drawer and an empty store.
    pub fn new(deck: Arc<dyn DeckSource>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self {
            deck,
            drawer: Arc::new(CardDrawer::from_entropy()),
            interpreter,
            store: InterpretationStore::new(),
        }
    }

    pub fn with_drawer(mut self, drawer: CardDrawer) -> Self {
        self.drawer = Arc::new(drawer);
        self
    }

    pub fn store(&self) -> &InterpretationStore {
        &self.store
    }

    /// Fetches the deck and draws a past/present/future spread.
    ///
    /// # Errors
    ///
    /// Returns `TarotError::Deck` if the deck cannot be fetched and `TarotError::Draw`
    /// if it holds too few distinct cards.
    pub async fn draw_spread(&self) -> TarotResult<Vec<DrawnCard>> {
        let deck = self.deck.fetch_deck().await?;
        let spread = self.drawer.draw(&deck, SPREAD_SIZE)?;
        Ok(spread)
    }

    /// Interprets `request` in a detached task and stores the result under `id`.
    ///
    /// Failures are logged and leave no entry, so later lookups report "not found".
    /// The returned handle may be dropped without cancelling the task.
    pub fn spawn_interpretation(&self, id: RequestId, request: ReadingRequest) -> JoinHandle<()> {
        let interpreter = Arc::clone(&self.interpreter);
        let store = self.store.clone();

        tokio::spawn(async move {
            match interpreter.interpret(&request).await {
                Ok(interpretation) => {
                    store.put(id, interpretation);
                    tracing::info!(request_id = %id, "interpretation stored");
                }
                Err(e) => {
                    tracing::error!(request_id = %id, error = %e, "failed to interpret tarot cards");
                }
            }
        })
    }

    /// Looks up a finished interpretation.
    pub fn interpretation(&self, id: &RequestId) -> Option<String> {
        self.store.get(id)
    }
}
