//! # Tarot Core
//!
//! Core logic for the tarot reading service.
//!
//! This crate contains the domain types and operations:
//! - Card records and orientation-aware display names
//! - Duplicate-free three-card draws from a fetched deck
//! - Correlation IDs and the process-wide interpretation store
//! - Adapters for the card-data provider and the text-completion service
//!
//! **No API concerns**: HTTP routing and JSON response shapes belong in `api-rest` and
//! `api-shared`.

pub mod card;
pub mod config;
pub mod constants;
pub mod deck;
pub mod draw;
pub mod error;
pub mod interpretation;
pub mod request_id;
pub mod service;
pub mod store;

pub use card::{Card, DrawnCard, Position};
pub use config::TarotConfig;
pub use deck::{DeckSource, HttpDeckSource, StaticDeck};
pub use draw::{draw, CardDrawer};
pub use error::{
    ConfigError, DeckError, DrawError, InterpretationError, RequestIdError, TarotError,
    TarotResult,
};
pub use interpretation::{
    interpreter_for, CompletionsClient, FixedInterpreter, Interpreter, ReadingRequest,
};
pub use request_id::RequestId;
pub use service::ReadingService;
pub use store::InterpretationStore;
