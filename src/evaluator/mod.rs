pub(crate) mod analysis;
pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod rank_groups;
pub(crate) mod straight;
pub(crate) mod suits;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use std::cmp::Ordering;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// How many leading tiebreak ranks order hands within the category.
    ///
    /// A straight is fully ordered by its top card, a pair by the pair rank
    /// plus three kickers, flushes and unpaired hands by all five cards.
    pub const fn kicker_count(self) -> usize {
        match self {
            Category::HighCard | Category::Flush | Category::RoyalFlush => 5,
            Category::Pair => 4,
            Category::TwoPair | Category::ThreeOfAKind => 3,
            Category::FullHouse | Category::FourOfAKind => 2,
            Category::Straight | Category::StraightFlush => 1,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        };
        f.write_str(name)
    }
}

/// Detailed evaluation result. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    pub best_five: [Card; 5],
    tiebreak: [Rank; 5],
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Tiebreak ranks that matter for this category, most significant first.
    ///
    /// Length follows [`Category::kicker_count`]: one rank for a straight,
    /// pair rank plus three kickers for a pair, and so on.
    pub fn kickers(&self) -> &[Rank] {
        &self.tiebreak[..self.category.kicker_count()]
    }
}

/// Renders as the category name followed by its tiebreak ranks,
/// e.g. `"Full House, T 2"`.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},", self.category)?;
        for rank in self.kickers() {
            write!(f, " {rank}")?;
        }
        Ok(())
    }
}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and its five tiebreak ranks, most significant
    /// first, into a single comparable word.
    pub fn from_parts(category: Category, ranks_desc: &[Rank; 5]) -> Self {
        // High to low: an 8-bit category field at bit 48, then five
        // 6-bit rank fields; the low bits stay zero. Comparing packed
        // words matches comparing hands.
        const CAT_SHIFT: u32 = 48;
        const RANK_BITS: u32 = 6;
        let packed = ranks_desc.iter().enumerate().fold(
            (category as u64) << CAT_SHIFT,
            |acc, (i, rank)| acc | (*rank as u64) << (CAT_SHIFT - RANK_BITS * (i as u32 + 1)),
        );
        HandValue(packed)
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("need at least five cards to evaluate, got {0}")]
    NotEnoughCards(usize),
    #[error("pools larger than seven cards are not evaluated, got {0}")]
    TooManyCards(usize),
}

/// Evaluate a Hold'em hand given hole cards and the current board.
/// Validates inputs, pools the cards, and returns the best five-card
/// evaluation with category and tiebreaks.
///
/// Works from the flop onward: with 3, 4 or 5 board cards the pool holds
/// 5, 6 or 7 cards. Before the flop there is no five-card hand yet and the
/// call fails with [`EvalError::NotEnoughCards`].
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::evaluator::{evaluate_holdem, Category};
/// use holdem_engine::hand::{Board, HoleCards};
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
/// ).unwrap();
/// let board = Board::try_new(vec![
///     Card::new(Rank::Queen, Suit::Clubs),
///     Card::new(Rank::Jack, Suit::Diamonds),
///     Card::new(Rank::Nine, Suit::Hearts),
/// ]).unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let mut pool = Vec::with_capacity(2 + board.len());
    pool.extend_from_slice(&hole.as_array());
    pool.extend_from_slice(board.as_slice());
    evaluate_best(&pool)
}

/// Evaluate exactly five cards; detects category and encodes tie-breakers.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    use analysis::HandAnalysis;
    use detector::DETECTORS;

    // Build analysis once (sorted cards, rank groups, flush/straight info)
    let analysis = HandAnalysis::new(cards);

    // Check categories in priority order (highest to lowest)
    for detector in DETECTORS.iter() {
        if let Some(evaluation) = detector.try_build(&analysis) {
            return evaluation;
        }
    }

    // No grouping, straight or flush fired: the bare ranks decide.
    analysis.build_evaluation(Category::HighCard, analysis.ranks)
}

/// Evaluate the best five-card hand in a pool of 5 to 7 cards.
/// Iterates every five-card combination and returns the best by value.
pub fn evaluate_best(cards: &[Card]) -> Result<Evaluation, EvalError> {
    use combinations::ChooseFive;

    match cards.len() {
        n if n < 5 => Err(EvalError::NotEnoughCards(n)),
        n if n > 7 => Err(EvalError::TooManyCards(n)),
        n => {
            let mut best: Option<Evaluation> = None;
            for indices in ChooseFive::new(n) {
                let eval = evaluate_five(&indices.map(|i| cards[i]));
                if best.as_ref().map_or(true, |b| eval > *b) {
                    best = Some(eval);
                }
            }
            // The length was range-checked, so at least one combination ran.
            best.ok_or(EvalError::NotEnoughCards(n))
        }
    }
}

/// Evaluate seven cards (helper for Hold'em style 7-card evaluation).
/// Iterate all 21 five-card combinations from 7 and return the best by value.
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    use combinations::ChooseFive;

    // The first combination is [0, 1, 2, 3, 4]; seed with it and fold in
    // the remaining twenty.
    let mut best = evaluate_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for indices in ChooseFive::new(7).skip(1) {
        let eval = evaluate_five(&indices.map(|i| cards[i]));
        if eval > best {
            best = eval;
        }
    }
    best
}

/// Compare two Hold'em hands on a shared board. Returns the ordering or a validation error.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::evaluator::compare_holdem;
/// use holdem_engine::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board = Board::try_new(vec![
///     Card::new(Rank::Queen, Suit::Clubs),
///     Card::new(Rank::Jack, Suit::Diamonds),
///     Card::new(Rank::Nine, Suit::Hearts),
///     Card::new(Rank::Three, Suit::Spades),
///     Card::new(Rank::Two, Suit::Clubs),
/// ]).unwrap();
/// let a = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
/// ).unwrap();
/// let b = HoleCards::try_new(
///     Card::new(Rank::King, Suit::Spades),
///     Card::new(Rank::King, Suit::Hearts),
/// ).unwrap();
/// let ord = compare_holdem(&a, &b, &board).unwrap();
/// assert_eq!(ord, Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}
