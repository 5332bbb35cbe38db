//! Study session over a parsed chapter: shuffle order plus a circular cursor.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::CardRecord;

/// Shuffled card order with a wrapping cursor.
///
/// A fresh navigator is created whenever the selected chapter changes. An
/// empty card set is a valid state; [`current`](Self::current) returns `None`.
#[derive(Clone, Debug)]
pub struct Navigator<R = StdRng> {
    order: Vec<CardRecord>,
    cursor: usize,
    rng: R,
}

impl Navigator<StdRng> {
    /// Create a navigator seeded from the platform entropy source.
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self::with_rng(cards, StdRng::from_entropy())
    }
}

impl<R: Rng> Navigator<R> {
    /// Create a navigator with an explicit random source.
    pub fn with_rng(cards: Vec<CardRecord>, rng: R) -> Self {
        let mut navigator = Self {
            order: Vec::new(),
            cursor: 0,
            rng,
        };
        navigator.reset(cards);
        navigator
    }

    /// Replace the card set, reshuffling and rewinding.
    pub fn reset(&mut self, cards: Vec<CardRecord>) {
        self.order = cards;
        self.shuffle();
    }

    /// New random permutation of the current cards; cursor back to 0.
    pub fn shuffle(&mut self) {
        self.order.shuffle(&mut self.rng);
        self.cursor = 0;
    }

    /// Advance one card, wrapping to the first after the last.
    pub fn next(&mut self) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + 1) % self.order.len();
        }
    }

    /// Go back one card, wrapping to the last before the first.
    pub fn previous(&mut self) {
        if !self.order.is_empty() {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(self.order.len() - 1);
        }
    }

    pub fn current(&self) -> Option<&CardRecord> {
        self.order.get(self.cursor)
    }

    /// Zero-based cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cards in their current order.
    #[cfg(test)]
    pub fn order(&self) -> &[CardRecord] {
        &self.order
    }
}
