//! Interpretation adapter.
//!
//! Turns a drawn spread plus the user's story and name into a prompt, sends it to a
//! text-completion service and cleans up the returned text.
//!
//! [`CompletionsClient`] is the real adapter. Each attempt is bounded by a timeout and
//! a transient failure (connection error or timeout) is retried once. [`FixedInterpreter`]
//! always returns the same text and is used in test mode.

use crate::card::{DrawnCard, Position};
use crate::config::TarotConfig;
use crate::constants::{
    DEFAULT_COMPLETIONS_URL, DEFAULT_INTERPRET_TIMEOUT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    TEST_INTERPRETATION,
};
use crate::error::InterpretationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// A card as it appears in a reading prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadingCard {
    pub name: String,
    pub reversed: bool,
    pub position: Position,
}

impl ReadingCard {
    /// How the card is named to the completion service: `Name` or `Name (reversed)`.
    pub fn prompt_name(&self) -> String {
        if self.reversed {
            format!("{} (reversed)", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Everything needed to interpret one spread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadingRequest {
    pub cards: Vec<ReadingCard>,
    pub story: String,
    pub name: String,
}

impl ReadingRequest {
    /// Builds a request from a spread in draw order. Cards beyond the three
    /// past/present/future slots are ignored.
    pub fn new(spread: &[DrawnCard], story: impl Into<String>, name: impl Into<String>) -> Self {
        let cards = spread
            .iter()
            .zip(Position::ALL)
            .map(|(drawn, position)| ReadingCard {
                name: drawn.name().to_string(),
                reversed: drawn.reversed,
                position,
            })
            .collect();

        Self {
            cards,
            story: story.into(),
            name: name.into(),
        }
    }
}

/// Builds the reading prompt sent to the completion service.
pub fn build_prompt(request: &ReadingRequest) -> String {
    let name = match request.name.trim() {
        "" => "a visitor",
        name => name,
    };

    let slots: Vec<String> = request
        .cards
        .iter()
        .map(|card| format!("{} (for their {})", card.prompt_name(), card.position))
        .collect();
    let drawn = match slots.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, and {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => "no cards".to_string(),
    };

    let story = request.story.trim();
    let story_clause = if story.is_empty() {
        "They have not shared a story, so please give a general reading about what the cards could mean together.".to_string()
    } else {
        format!(
            "Please interpret these cards in relation to their story and the time frames they are associated with (past, present, future): '{story}'."
        )
    };

    format!(
        "You're doing a tarot card reading for {name}, as a tarot card reader called Cassandra \
         (the user already knows your name - don't mention it). They drew {drawn}. {story_clause} \
         If a card is reversed, please reflect this in your interpretation of the card, and refer \
         to it as 'card name (reversed)'. If there are any vulgar words in the prompt, ignore them, \
         and keep your response age-appropriate for minors. Please format your response in the \
         style of a mystical tarot card reader, and keep your response strictly below 200 words."
    )
}

/// Strips the literal square brackets completion models like to leave behind.
pub fn clean_completion(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '[' | ']')).collect()
}

/// Produces an interpretation for a reading.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, request: &ReadingRequest) -> Result<String, InterpretationError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    text: String,
}

/// Client for an OpenAI-style `/v1/completions` endpoint.
#[derive(Clone, Debug)]
pub struct CompletionsClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl CompletionsClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            url: DEFAULT_COMPLETIONS_URL.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_INTERPRET_TIMEOUT,
        }
    }

    pub fn from_config(http: reqwest::Client, cfg: &TarotConfig) -> Self {
        Self::new(http, cfg.api_key().map(str::to_string))
            .with_url(cfg.completions_url())
            .with_model(cfg.model())
            .with_max_tokens(cfg.max_tokens())
            .with_timeout(cfg.interpret_timeout())
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn attempt(&self, api_key: &str, prompt: &str) -> Result<String, InterpretationError> {
        tokio::time::timeout(self.timeout, self.complete(api_key, prompt))
            .await
            .map_err(|_| InterpretationError::Timeout(self.timeout))?
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, InterpretationError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(InterpretationError::Request)?;

        let status = resp.status();
        let text = resp.text().await.map_err(InterpretationError::Body)?;
        if !status.is_success() {
            return Err(InterpretationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&text).map_err(InterpretationError::Decode)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(InterpretationError::NoChoices)?;

        Ok(clean_completion(&choice.text))
    }
}

#[async_trait]
impl Interpreter for CompletionsClient {
    async fn interpret(&self, request: &ReadingRequest) -> Result<String, InterpretationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(InterpretationError::MissingApiKey)?;
        let prompt = build_prompt(request);

        match self.attempt(api_key, &prompt).await {
            Err(e) if e.is_transient() => {
                tracing::warn!(error = %e, "completion request failed, retrying once");
                self.attempt(api_key, &prompt).await
            }
            result => result,
        }
    }
}

/// Returns the same interpretation for every reading without any network call.
#[derive(Clone, Debug)]
pub struct FixedInterpreter {
    text: String,
}

impl FixedInterpreter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The interpreter used when test mode is enabled.
    pub fn test_mode() -> Self {
        Self::new(TEST_INTERPRETATION)
    }
}

#[async_trait]
impl Interpreter for FixedInterpreter {
    async fn interpret(&self, _request: &ReadingRequest) -> Result<String, InterpretationError> {
        Ok(self.text.clone())
    }
}

/// Selects the interpreter for a configuration: the fixed sentinel in test mode,
/// otherwise a completions client.
pub fn interpreter_for(cfg: &TarotConfig, http: reqwest::Client) -> Arc<dyn Interpreter> {
    if cfg.test_mode() {
        tracing::warn!("test mode enabled: interpretations are fixed and no completion calls are made");
        Arc::new(FixedInterpreter::test_mode())
    } else {
        Arc::new(CompletionsClient::from_config(http, cfg))
    }
}
