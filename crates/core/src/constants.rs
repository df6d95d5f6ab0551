//! Constants used throughout the tarot core crate.
//!
//! Upstream endpoints, prompt defaults and the strings that shape drawn cards
//! for clients live here so the adapters and handlers agree on them.

use std::time::Duration;

/// Number of cards in a reading: past, present and future.
pub const SPREAD_SIZE: usize = 3;

/// Card-data endpoint used when no explicit URL is configured.
pub const DEFAULT_DECK_URL: &str = "https://tarotapi.dev/api/v1/cards";

/// Text-completion endpoint used when no explicit URL is configured.
pub const DEFAULT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/completions";

/// Completion model requested from the text-generation service.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Upper bound on completion tokens requested per interpretation.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Bound on fetching the deck from the card-data provider.
pub const DEFAULT_DECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound on a single interpretation attempt.
pub const DEFAULT_INTERPRET_TIMEOUT: Duration = Duration::from_secs(30);

/// Interpretation written in test mode instead of calling the text-generation service.
pub const TEST_INTERPRETATION: &str = "This is a test interpretation";

/// Suffix appended to a reversed card's display name.
pub const REVERSED_MARKER: &str = "(Reversed)";

/// Extension appended to a card's short name to form its image file name.
pub const IMAGE_EXTENSION: &str = ".jpg";

/// Default bind address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";
