use crate::cards::{Card, Suit};

/// Result of flush detection over a five card hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushInfo {
    /// Shared suit of all five cards, `None` when suits are mixed.
    pub suit: Option<Suit>,
}

impl FlushInfo {
    /// Detect whether all five cards share one suit.
    pub fn detect(cards: &[Card; 5]) -> Self {
        let first = cards[0].suit();
        if cards.iter().all(|card| card.suit() == first) {
            Self { suit: Some(first) }
        } else {
            Self { suit: None }
        }
    }

    pub fn is_flush(&self) -> bool {
        self.suit.is_some()
    }
}
