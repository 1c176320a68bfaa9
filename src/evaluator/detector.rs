use super::analysis::HandAnalysis;
use super::{Category, Evaluation};
use crate::cards::Rank;

/// One category probe. Returns the finished evaluation when the analyzed
/// hand belongs to the category, `None` otherwise.
///
/// Probes assume they run strongest first, so none re-checks the categories
/// above it. A flush probe claiming a straight flush is prevented by order,
/// not by its own logic.
pub trait CategoryDetector {
    fn try_build(&self, analysis: &HandAnalysis) -> Option<Evaluation>;
}

/// All probes, strongest category first. High card is the fall-through in
/// [`super::evaluate_five`] rather than a probe of its own.
pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
];

/// Right-pad a tiebreak prefix out to the five fixed slots.
fn pad<const N: usize>(prefix: [Rank; N]) -> [Rank; 5] {
    let mut out = [Rank::Two; 5];
    out[..N].copy_from_slice(&prefix);
    out
}

/// Ace-high straight flush, the one hand ranked above all straight flushes.
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        if a.flush.is_flush() && a.straight.top == Some(Rank::Ace) {
            Some(a.build_evaluation(Category::RoyalFlush, a.ranks))
        } else {
            None
        }
    }
}

/// Five consecutive ranks, all one suit.
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        if !a.flush.is_flush() {
            return None;
        }
        let top = a.straight.top?;
        Some(a.build_evaluation(Category::StraightFlush, pad([top])))
    }
}

/// Four cards of one rank.
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let quad = a.groups.quad()?;
        let kicker = *a.groups.kickers().first()?;
        Some(a.build_evaluation(Category::FourOfAKind, pad([quad, kicker])))
    }
}

/// Trips plus a pair.
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        if !a.groups.has_full_house() {
            return None;
        }
        let trips = a.groups.trips()?;
        let pair = *a.groups.pairs().first()?;
        Some(a.build_evaluation(Category::FullHouse, pad([trips, pair])))
    }
}

/// Five cards of one suit, ranked by all five cards.
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        if a.flush.is_flush() {
            Some(a.build_evaluation(Category::Flush, a.ranks))
        } else {
            None
        }
    }
}

/// Five consecutive ranks, ranked by the top card alone.
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let top = a.straight.top?;
        Some(a.build_evaluation(Category::Straight, pad([top])))
    }
}

/// Three of one rank plus two kickers.
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let trips = a.groups.trips()?;
        match a.groups.kickers()[..] {
            [k1, k2] => Some(a.build_evaluation(Category::ThreeOfAKind, pad([trips, k1, k2]))),
            _ => None,
        }
    }
}

/// Two pairs plus a kicker, ranked high pair then low pair then kicker.
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let kicker = *a.groups.kickers().first()?;
        match a.groups.pairs()[..] {
            [high, low] => Some(a.build_evaluation(Category::TwoPair, pad([high, low, kicker]))),
            _ => None,
        }
    }
}

/// One pair plus three kickers.
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn try_build(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let pair = match a.groups.pairs()[..] {
            [p] => p,
            _ => return None,
        };
        match a.groups.kickers()[..] {
            [k1, k2, k3] => Some(a.build_evaluation(Category::Pair, pad([pair, k1, k2, k3]))),
            _ => None,
        }
    }
}
