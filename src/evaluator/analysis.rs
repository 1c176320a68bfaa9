use super::rank_groups::RankGroups;
use super::straight::StraightInfo;
use super::suits::FlushInfo;
use super::{Category, Evaluation, HandValue};
use crate::cards::{Card, Rank};

/// Shared precomputation over one five card hand.
///
/// Every category probe needs some mix of sorted ranks, multiplicity groups,
/// flush and straight facts. Computing them once here keeps the detectors to
/// a few lines each.
pub struct HandAnalysis {
    /// Cards sorted by rank descending, suit breaking ties so equal inputs
    /// in any order produce identical output.
    pub sorted: [Card; 5],
    /// Ranks of `sorted`, same order.
    pub ranks: [Rank; 5],
    pub groups: RankGroups,
    pub flush: FlushInfo,
    pub straight: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted = *cards;
        sorted.sort_by(|a, b| b.rank().cmp(&a.rank()).then_with(|| b.suit().cmp(&a.suit())));

        let ranks = sorted.map(Card::rank);
        let groups = RankGroups::new(&ranks);
        let flush = FlushInfo::detect(&sorted);
        let straight = StraightInfo::detect(&ranks);

        Self { sorted, ranks, groups, flush, straight }
    }

    /// Assemble the final evaluation for a detected category.
    ///
    /// `tiebreak` holds the comparison ranks most significant first, padded
    /// with [`Rank::Two`] when the category orders on fewer than five.
    pub fn build_evaluation(&self, category: Category, tiebreak: [Rank; 5]) -> Evaluation {
        Evaluation {
            category,
            best_five: self.sorted,
            tiebreak,
            value: HandValue::from_parts(category, &tiebreak),
        }
    }
}
