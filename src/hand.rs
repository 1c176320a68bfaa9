use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("hole cards must be distinct")]
    DuplicateHoleCards,
    #[error("board holds at most five cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("board contains duplicate cards")]
    DuplicateBoardCards,
    #[error("hole cards overlap the board")]
    Overlap,
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private cards, fixed for the duration of a hand.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(cards: &[Card]) -> Result<Self, HandError> {
        match cards {
            [a, b] => Self::try_new(*a, *b),
            other => Err(HandError::HoleCount(other.len())),
        }
    }

    /// Pairs two cards dealt off the same deck, already distinct.
    pub(crate) fn dealt(a: Card, b: Card) -> Self {
        Self(a, b)
    }

    /// First card in deal order.
    pub fn first(&self) -> Card {
        self.0
    }

    /// Second card in deal order.
    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// The shared community cards: empty preflop, then 3/4/5 as streets reveal.
/// Rebuilt empty at the start of every hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > 5 {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        let distinct: HashSet<Card> = cards.iter().copied().collect();
        if distinct.len() != cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn extend<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.extend(cards);
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

/// Check that hole cards and board together form a consistent hold'em state:
/// at most five board cards, no duplicates anywhere, no hole/board overlap.
/// Partial boards (0..=5 cards) are allowed mid-hand.
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > 5 {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    let board_set: HashSet<Card> = board.as_slice().iter().copied().collect();
    if board_set.len() != board.len() {
        return Err(HandError::DuplicateBoardCards);
    }
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    if board_set.contains(&hole.first()) || board_set.contains(&hole.second()) {
        return Err(HandError::Overlap);
    }
    Ok(())
}
