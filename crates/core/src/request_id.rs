//! Correlation identifiers for readings.
//!
//! Every draw is assigned a fresh [`RequestId`]. The client receives it alongside the
//! cards and uses it as the only key for fetching the interpretation later.
//!
//! ## Text form
//! A request ID is a version 4 UUID in its hyphenated lowercase form, for example
//! `550e8400-e29b-41d4-a716-446655440000`. [`RequestId::parse`] also accepts the other
//! forms understood by the `uuid` crate (simple, braced, urn) and normalises them.

use crate::error::RequestIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque token correlating a draw with its eventual interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new, globally unique request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a request ID supplied by a client.
    ///
    /// # Errors
    ///
    /// Returns [`RequestIdError::Invalid`] if `input` is not a UUID.
    pub fn parse(input: &str) -> Result<Self, RequestIdError> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|source| RequestIdError::Invalid {
                input: input.to_string(),
                source,
            })
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RequestId {
    type Err = RequestIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
