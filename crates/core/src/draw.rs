//! Draw engine.
//!
//! Cards are chosen by rejection sampling: a uniformly random index is sampled and the
//! card is accepted only if no card with the same name has been accepted yet. Each
//! accepted card then gets an independent fair coin toss for its orientation.
//!
//! The number of distinct names is checked up front, so a deck that cannot supply
//! enough distinct cards fails with [`DrawError::DeckTooSmall`] instead of sampling
//! forever.

use crate::card::{Card, DrawnCard};
use crate::error::DrawError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Draws `n` cards with pairwise-distinct names from `deck`, in draw order.
///
/// # Errors
///
/// Returns [`DrawError::DeckTooSmall`] if `deck` is empty or holds fewer than `n`
/// distinct card names.
pub fn draw<R: Rng + ?Sized>(
    deck: &[Card],
    n: usize,
    rng: &mut R,
) -> Result<Vec<DrawnCard>, DrawError> {
    let available = deck
        .iter()
        .map(|card| card.name.as_str())
        .collect::<HashSet<_>>()
        .len();
    if deck.is_empty() || available < n {
        return Err(DrawError::DeckTooSmall {
            requested: n,
            available,
        });
    }

    let mut accepted: HashSet<&str> = HashSet::with_capacity(n);
    let mut drawn = Vec::with_capacity(n);
    while drawn.len() < n {
        let candidate = &deck[rng.gen_range(0..deck.len())];
        if !accepted.insert(candidate.name.as_str()) {
            continue;
        }
        let reversed = rng.gen_bool(0.5);
        drawn.push(DrawnCard::new(candidate.clone(), reversed));
    }

    Ok(drawn)
}

/// Process-wide card drawer owning a single random generator.
///
/// The generator is seeded once, when the drawer is built, and shared by every
/// request. Draws are short and synchronous, so a plain mutex is sufficient.
#[derive(Debug)]
pub struct CardDrawer {
    rng: Mutex<StdRng>,
}

impl CardDrawer {
    /// Creates a drawer seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a drawer with a fixed seed, giving reproducible draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn draw(&self, deck: &[Card], n: usize) -> Result<Vec<DrawnCard>, DrawError> {
        // A panic mid-draw cannot leave the generator in an invalid state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw(deck, n, &mut *rng)
    }
}

impl Default for CardDrawer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::test_card;
    use crate::constants::SPREAD_SIZE;

    fn deck(names: &[&str]) -> Vec<Card> {
        names.iter().map(|name| test_card(name)).collect()
    }

    fn full_deck() -> Vec<Card> {
        (0..78).map(|i| test_card(&format!("Card {i}"))).collect()
    }

    #[test]
    fn draws_three_distinct_cards() {
        let deck = full_deck();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let drawn = draw(&deck, SPREAD_SIZE, &mut rng).expect("draw should succeed");

            assert_eq!(drawn.len(), SPREAD_SIZE);
            let names: HashSet<_> = drawn.iter().map(|c| c.name()).collect();
            assert_eq!(names.len(), SPREAD_SIZE, "names must be distinct (seed {seed})");
        }
    }

    #[test]
    fn draws_every_card_when_deck_is_exactly_large_enough() {
        let deck = deck(&["The Fool", "The Magician", "The High Priestess"]);
        let mut rng = StdRng::seed_from_u64(7);

        let drawn = draw(&deck, 3, &mut rng).expect("draw should succeed");

        let mut names: Vec<_> = drawn.iter().map(|c| c.name().to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["The Fool", "The High Priestess", "The Magician"]);
    }

    #[test]
    fn duplicate_names_count_once() {
        let deck = deck(&["The Fool", "The Fool", "The Magician", "The Magician"]);
        let mut rng = StdRng::seed_from_u64(1);

        let err = draw(&deck, 3, &mut rng).expect_err("two distinct names cannot fill three slots");
        assert!(matches!(
            err,
            DrawError::DeckTooSmall {
                requested: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn empty_deck_fails() {
        let mut rng = StdRng::seed_from_u64(1);

        let err = draw(&[], 0, &mut rng).expect_err("empty deck should fail");
        assert!(matches!(
            err,
            DrawError::DeckTooSmall {
                requested: 0,
                available: 0
            }
        ));
    }

    #[test]
    fn orientation_takes_both_values() {
        let deck = full_deck();
        let drawer = CardDrawer::seeded(42);
        let mut upright = 0;
        let mut reversed = 0;

        for _ in 0..100 {
            for card in drawer.draw(&deck, SPREAD_SIZE).expect("draw should succeed") {
                if card.reversed {
                    reversed += 1;
                } else {
                    upright += 1;
                }
            }
        }

        assert!(upright > 0, "some cards should be upright");
        assert!(reversed > 0, "some cards should be reversed");
    }

    #[test]
    fn seeded_drawers_are_reproducible() {
        let deck = full_deck();
        let a = CardDrawer::seeded(99).draw(&deck, SPREAD_SIZE).unwrap();
        let b = CardDrawer::seeded(99).draw(&deck, SPREAD_SIZE).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn drawn_cards_are_copied_verbatim() {
        let deck = full_deck();
        let drawn = CardDrawer::seeded(3).draw(&deck, SPREAD_SIZE).unwrap();

        for card in drawn {
            assert!(deck.contains(&card.card));
        }
    }
}
