//! Tarot card records.
//!
//! A [`Card`] is sourced verbatim from the card-data provider and never mutated.
//! A [`DrawnCard`] pairs a card with the orientation chosen at draw time.

use crate::constants::{IMAGE_EXTENSION, REVERSED_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tarot card definition as returned by the card-data provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    /// Arcana of the card (`major` or `minor`).
    #[serde(rename = "type")]
    pub arcana: String,
    pub meaning_up: String,
    pub meaning_rev: String,
    pub desc: String,
    /// Short key, also the stem of the card's image file.
    pub name_short: String,
}

/// A card together with the orientation it was drawn in.
///
/// The orientation is decided once by the draw engine and is never recomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawnCard {
    pub card: Card,
    pub reversed: bool,
}

impl DrawnCard {
    pub fn new(card: Card, reversed: bool) -> Self {
        Self { card, reversed }
    }

    /// Name of the underlying card, without any orientation marker.
    pub fn name(&self) -> &str {
        &self.card.name
    }

    /// Name shown to clients: the card name, suffixed with ` (Reversed)` when reversed.
    pub fn display_name(&self) -> String {
        if self.reversed {
            format!("{} {}", self.card.name, REVERSED_MARKER)
        } else {
            self.card.name.clone()
        }
    }

    pub fn image_file_name(&self) -> String {
        format!("{}{}", self.card.name_short, IMAGE_EXTENSION)
    }
}

/// Slot a card occupies in a three-card spread, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Past,
    Present,
    Future,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Past, Position::Present, Position::Future];

    /// Position of the card at `index` in draw order, if the spread has one.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Past => "past",
            Position::Present => "present",
            Position::Future => "future",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
pub(crate) fn test_card(name: &str) -> Card {
    Card {
        name: name.to_string(),
        arcana: "major".to_string(),
        meaning_up: format!("{name} upright"),
        meaning_rev: format!("{name} reversed"),
        desc: format!("{name} description"),
        name_short: name.to_lowercase().replace(' ', "_"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_marks_reversed_cards() {
        let upright = DrawnCard::new(test_card("The Fool"), false);
        let reversed = DrawnCard::new(test_card("The Fool"), true);

        assert_eq!(upright.display_name(), "The Fool");
        assert_eq!(reversed.display_name(), "The Fool (Reversed)");
        assert_eq!(reversed.name(), "The Fool");
    }

    #[test]
    fn image_file_name_uses_short_name() {
        let mut card = test_card("The Magician");
        card.name_short = "ar01".into();

        assert_eq!(DrawnCard::new(card, true).image_file_name(), "ar01.jpg");
    }

    #[test]
    fn card_deserialises_provider_field_names() {
        let json = r#"{
            "type": "major",
            "name_short": "ar00",
            "name": "The Fool",
            "value": "zero",
            "value_int": 0,
            "meaning_up": "Folly, mania",
            "meaning_rev": "Negligence, absence",
            "desc": "With light step"
        }"#;

        let card: Card = serde_json::from_str(json).expect("card should deserialise");
        assert_eq!(card.name, "The Fool");
        assert_eq!(card.arcana, "major");
        assert_eq!(card.name_short, "ar00");
        assert_eq!(card.meaning_rev, "Negligence, absence");
    }

    #[test]
    fn positions_follow_draw_order() {
        assert_eq!(Position::from_index(0), Some(Position::Past));
        assert_eq!(Position::from_index(1), Some(Position::Present));
        assert_eq!(Position::from_index(2), Some(Position::Future));
        assert_eq!(Position::from_index(3), None);
        assert_eq!(Position::Future.to_string(), "future");
    }
}
