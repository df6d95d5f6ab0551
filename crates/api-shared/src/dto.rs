//! Request and response bodies exchanged with clients.
//!
//! Field names are part of the public contract and match what the browser client reads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A drawn card as rendered by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JsonCard {
    /// Card name, suffixed with ` (Reversed)` when reversed.
    #[schema(example = "The Tower (Reversed)")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "major")]
    pub card_type: String,
    pub meaning_up: String,
    pub meaning_rev: String,
    pub desc: String,
    #[schema(example = "ar16.jpg")]
    pub image_file_name: String,
    pub reversed: bool,
}

/// Response to a draw: three cards in past/present/future order and the ID to poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DrawCardsRes {
    pub cards: Vec<JsonCard>,
    #[serde(rename = "requestID")]
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub request_id: String,
}

/// Optional context forwarded into the interpretation prompt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DrawCardsQuery {
    /// What the user wants the reading to be about.
    #[serde(default)]
    pub userstory: Option<String>,
    /// The user's name.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InterpretationRes {
    pub interpretation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}
