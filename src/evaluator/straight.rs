use crate::cards::Rank;

/// The wheel (A-2-3-4-5) plays as a five-high straight, so an ace-led rank
/// array maps to a [`Rank::Five`] top card.
const WHEEL: [Rank; 5] = [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two];

/// Result of straight detection over a five card hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    /// Highest card of the straight, `None` when the hand is not one.
    pub top: Option<Rank>,
}

impl StraightInfo {
    /// Detect a straight in ranks sorted descending.
    pub fn detect(ranks: &[Rank; 5]) -> Self {
        let consecutive = ranks.windows(2).all(|w| w[0].value() == w[1].value() + 1);
        if consecutive {
            return Self { top: Some(ranks[0]) };
        }
        if *ranks == WHEEL {
            return Self { top: Some(Rank::Five) };
        }
        Self { top: None }
    }

    pub fn is_straight(&self) -> bool {
        self.top.is_some()
    }
}
