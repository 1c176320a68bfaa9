use crate::evaluator::HandValue;
use crate::player::PlayerId;
use std::collections::{BTreeMap, BTreeSet};

/// Errors surfaced by the pot ledger. Both variants mean bookkeeping went
/// wrong somewhere upstream; the current hand is voided but later hands
/// must not be affected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("pot out of balance: total {total}, contributions sum to {contributed}")]
    OutOfBalance { total: u64, contributed: u64 },
    #[error("settlement left {leftover} chips unawarded")]
    UnawardedChips { leftover: u64 },
}

/// One pot slice awarded at settlement.
///
/// `winners` are listed in seating order starting at the small blind; the
/// players in `odd_chips` (a prefix of `winners`) receive one extra chip
/// each when the slice does not divide evenly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotAward {
    pub winners: Vec<PlayerId>,
    pub amount_each: u64,
    pub odd_chips: Vec<PlayerId>,
}

impl PotAward {
    /// Total chips in this slice.
    pub fn amount(&self) -> u64 {
        self.amount_each * self.winners.len() as u64 + self.odd_chips.len() as u64
    }
}

/// Outcome of settling one hand: the awarded pot slices (main pot first)
/// and the per-player payout totals.
#[derive(Debug, Clone, Default)]
pub struct Settlement {
    pub awards: Vec<PotAward>,
    payouts: BTreeMap<PlayerId, u64>,
}

impl Settlement {
    pub fn payout_for(&self, id: &PlayerId) -> u64 {
        self.payouts.get(id).copied().unwrap_or(0)
    }

    pub fn payouts(&self) -> impl Iterator<Item = (&PlayerId, u64)> {
        self.payouts.iter().map(|(id, amount)| (id, *amount))
    }

    pub fn total_awarded(&self) -> u64 {
        self.payouts.values().sum()
    }
}

/// Tracks the pot for one hand: the running total and every player's
/// cumulative contribution.
///
/// Side pots are not stored. They are derived at settlement from the
/// contribution map, so the ledger cannot disagree with itself about pot
/// boundaries mid-hand.
#[derive(Debug, Clone, Default)]
pub struct PotLedger {
    total: u64,
    contributions: BTreeMap<PlayerId, u64>,
}

impl PotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn contribution(&self, id: &PlayerId) -> u64 {
        self.contributions.get(id).copied().unwrap_or(0)
    }

    pub fn contributors(&self) -> impl Iterator<Item = (&PlayerId, u64)> {
        self.contributions.iter().map(|(id, amount)| (id, *amount))
    }

    /// The only mutation path: chips enter the pot here and nowhere else,
    /// which is what keeps `total == sum(contributions)` an invariant
    /// rather than a hope.
    pub fn add_contribution(&mut self, id: &PlayerId, amount: u64) {
        if amount == 0 {
            return;
        }
        self.total += amount;
        *self.contributions.entry(id.clone()).or_insert(0) += amount;
    }

    pub fn check_balance(&self) -> Result<(), LedgerError> {
        let contributed: u64 = self.contributions.values().sum();
        if contributed == self.total {
            Ok(())
        } else {
            Err(LedgerError::OutOfBalance { total: self.total, contributed })
        }
    }

    /// Distribute the pot at showdown.
    ///
    /// `results` holds the evaluated strength of every player still in
    /// contention (folded players are absent but their chips stay
    /// claimable). `seat_order` lists the seats starting at the small
    /// blind; it fixes both the order winners are reported in and who
    /// collects odd chips.
    ///
    /// The distinct contribution levels slice the pot into layers. Each
    /// layer spans `level - prev_level` chips from every contributor at or
    /// above it, and goes to the best hand among contenders at or above it,
    /// floor-split on ties. A player whose contribution nobody matched wins
    /// their own top layer back. Chips left over after all layers mean the
    /// books are wrong and the whole settlement is refused.
    pub fn settle(
        &self,
        seat_order: &[PlayerId],
        results: &BTreeMap<PlayerId, HandValue>,
    ) -> Result<Settlement, LedgerError> {
        self.check_balance()?;

        let levels: BTreeSet<u64> = self.contributions.values().copied().filter(|&c| c > 0).collect();

        let mut settlement = Settlement::default();
        let mut awarded = 0u64;
        let mut prev = 0u64;

        for &level in &levels {
            let depth = level - prev;
            let contributors = self.contributions.values().filter(|&&c| c >= level).count() as u64;
            let amount = depth * contributors;
            prev = level;

            // Contenders deep enough to claim this layer, in seat order.
            let eligible: Vec<(&PlayerId, HandValue)> = seat_order
                .iter()
                .filter(|id| self.contribution(id) >= level)
                .filter_map(|id| results.get(id).map(|value| (id, *value)))
                .collect();

            let best = match eligible.iter().map(|(_, value)| *value).max() {
                Some(best) => best,
                // Everyone this deep folded; the leftover check below
                // reports the stranded chips.
                None => continue,
            };

            let winners: Vec<PlayerId> =
                eligible.iter().filter(|(_, value)| *value == best).map(|(id, _)| (*id).clone()).collect();

            let share = amount / winners.len() as u64;
            let odd = (amount % winners.len() as u64) as usize;
            for (i, winner) in winners.iter().enumerate() {
                let payout = share + u64::from(i < odd);
                *settlement.payouts.entry(winner.clone()).or_insert(0) += payout;
            }

            awarded += amount;
            settlement.awards.push(PotAward {
                odd_chips: winners[..odd].to_vec(),
                winners,
                amount_each: share,
            });
        }

        if awarded != self.total {
            return Err(LedgerError::UnawardedChips { leftover: self.total - awarded });
        }

        Ok(settlement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;
    use crate::evaluator::Category;

    fn id(s: &str) -> PlayerId {
        PlayerId::from(s)
    }

    // Distinct strengths ordered by the leading rank.
    fn strength(top: Rank) -> HandValue {
        HandValue::from_parts(Category::Pair, &[top, Rank::Five, Rank::Four, Rank::Three, Rank::Two])
    }

    #[test]
    fn test_total_tracks_contributions() {
        let mut ledger = PotLedger::new();
        ledger.add_contribution(&id("a"), 10);
        ledger.add_contribution(&id("b"), 25);
        ledger.add_contribution(&id("a"), 5);

        assert_eq!(ledger.total(), 40);
        assert_eq!(ledger.contribution(&id("a")), 15);
        assert_eq!(ledger.contribution(&id("b")), 25);
        assert!(ledger.check_balance().is_ok());
    }

    #[test]
    fn test_single_winner_takes_everything() {
        let mut ledger = PotLedger::new();
        ledger.add_contribution(&id("a"), 20);
        ledger.add_contribution(&id("b"), 20);

        let seat_order = [id("a"), id("b")];
        let mut results = BTreeMap::new();
        results.insert(id("a"), strength(Rank::Ace));
        results.insert(id("b"), strength(Rank::King));

        let settlement = ledger.settle(&seat_order, &results).unwrap();
        assert_eq!(settlement.awards.len(), 1);
        assert_eq!(settlement.awards[0].winners, vec![id("a")]);
        assert_eq!(settlement.payout_for(&id("a")), 40);
        assert_eq!(settlement.payout_for(&id("b")), 0);
    }

    #[test]
    fn test_layered_side_pots_with_folded_contributor() {
        // a:100, b:50, c:50 (folded), d:200. Main pot 200 for everyone in
        // contention, 100 side pot for the two deep stacks, and d's
        // unmatched 100 comes straight back.
        let mut ledger = PotLedger::new();
        ledger.add_contribution(&id("a"), 100);
        ledger.add_contribution(&id("b"), 50);
        ledger.add_contribution(&id("c"), 50);
        ledger.add_contribution(&id("d"), 200);

        let seat_order = [id("a"), id("b"), id("c"), id("d")];
        let mut results = BTreeMap::new();
        results.insert(id("a"), strength(Rank::King));
        results.insert(id("b"), strength(Rank::Ace));
        results.insert(id("d"), strength(Rank::Queen));

        let settlement = ledger.settle(&seat_order, &results).unwrap();
        assert_eq!(settlement.awards.len(), 3);

        assert_eq!(settlement.awards[0].winners, vec![id("b")]);
        assert_eq!(settlement.awards[0].amount(), 200);

        assert_eq!(settlement.awards[1].winners, vec![id("a")]);
        assert_eq!(settlement.awards[1].amount(), 100);

        assert_eq!(settlement.awards[2].winners, vec![id("d")]);
        assert_eq!(settlement.awards[2].amount(), 100);

        assert_eq!(settlement.total_awarded(), ledger.total());
    }

    #[test]
    fn test_tie_floor_split_grants_odd_chips_in_seat_order() {
        let mut ledger = PotLedger::new();
        for seat in ["a", "b", "c", "d"] {
            ledger.add_contribution(&id(seat), 1);
        }

        let seat_order = [id("a"), id("b"), id("c"), id("d")];
        let mut results = BTreeMap::new();
        results.insert(id("a"), strength(Rank::Ace));
        results.insert(id("b"), strength(Rank::Ace));
        results.insert(id("c"), strength(Rank::Ace));
        results.insert(id("d"), strength(Rank::Two));

        let settlement = ledger.settle(&seat_order, &results).unwrap();
        let award = &settlement.awards[0];
        assert_eq!(award.winners, vec![id("a"), id("b"), id("c")]);
        assert_eq!(award.amount_each, 1);
        assert_eq!(award.odd_chips, vec![id("a")]);

        assert_eq!(settlement.payout_for(&id("a")), 2);
        assert_eq!(settlement.payout_for(&id("b")), 1);
        assert_eq!(settlement.payout_for(&id("c")), 1);
    }

    #[test]
    fn test_folded_chips_are_claimable_by_the_winner() {
        let mut ledger = PotLedger::new();
        ledger.add_contribution(&id("x"), 10);
        ledger.add_contribution(&id("y"), 10);
        ledger.add_contribution(&id("z"), 10);

        let seat_order = [id("x"), id("y"), id("z")];
        let mut results = BTreeMap::new();
        results.insert(id("y"), strength(Rank::Nine));
        results.insert(id("z"), strength(Rank::Three));

        let settlement = ledger.settle(&seat_order, &results).unwrap();
        assert_eq!(settlement.payout_for(&id("y")), 30);
    }

    #[test]
    fn test_stranded_chips_are_refused() {
        // The deepest contributor folded, so the 50 chips above everyone
        // else's level have no eligible claimant.
        let mut ledger = PotLedger::new();
        ledger.add_contribution(&id("x"), 100);
        ledger.add_contribution(&id("y"), 50);

        let seat_order = [id("x"), id("y")];
        let mut results = BTreeMap::new();
        results.insert(id("y"), strength(Rank::Ten));

        let err = ledger.settle(&seat_order, &results).unwrap_err();
        assert_eq!(err, LedgerError::UnawardedChips { leftover: 50 });
    }

    #[test]
    fn test_two_way_tie_on_main_pot_only() {
        // b is all-in short; a and c tie, splitting both the main pot and
        // the side pot b cannot reach.
        let mut ledger = PotLedger::new();
        ledger.add_contribution(&id("a"), 30);
        ledger.add_contribution(&id("b"), 10);
        ledger.add_contribution(&id("c"), 30);

        let seat_order = [id("a"), id("b"), id("c")];
        let mut results = BTreeMap::new();
        results.insert(id("a"), strength(Rank::Ace));
        results.insert(id("b"), strength(Rank::Seven));
        results.insert(id("c"), strength(Rank::Ace));

        let settlement = ledger.settle(&seat_order, &results).unwrap();
        assert_eq!(settlement.awards.len(), 2);

        let main = &settlement.awards[0];
        assert_eq!(main.winners, vec![id("a"), id("c")]);
        assert_eq!(main.amount(), 30);
        assert_eq!(main.amount_each, 15);
        assert!(main.odd_chips.is_empty());

        let side = &settlement.awards[1];
        assert_eq!(side.winners, vec![id("a"), id("c")]);
        assert_eq!(side.amount(), 40);

        assert_eq!(settlement.payout_for(&id("a")), 35);
        assert_eq!(settlement.payout_for(&id("c")), 35);
    }
}
