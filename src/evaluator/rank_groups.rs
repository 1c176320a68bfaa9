use crate::cards::Rank;

/// Ranks of a five card hand grouped by multiplicity, sorted by
/// (count desc, rank desc).
///
/// Example: A A A K Q groups as [(Ace, 3), (King, 1), (Queen, 1)].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Count and group the given ranks.
    pub fn new(ranks: &[Rank; 5]) -> Self {
        let mut counts = [0u8; 15];
        for rank in ranks {
            counts[rank.value() as usize] += 1;
        }

        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .filter_map(|rank| {
                let count = counts[rank.value() as usize];
                (count > 0).then_some((rank, count))
            })
            .collect();

        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Self { groups }
    }

    /// Rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.rank_with_count(4)
    }

    /// Rank of a three-of-a-kind, if present.
    pub fn trips(&self) -> Option<Rank> {
        self.rank_with_count(3)
    }

    /// All pair ranks, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.ranks_with_count(2)
    }

    /// All singleton ranks, highest first.
    pub fn kickers(&self) -> Vec<Rank> {
        self.ranks_with_count(1)
    }

    /// True when the hand holds both trips and a pair.
    pub fn has_full_house(&self) -> bool {
        self.trips().is_some() && !self.pairs().is_empty()
    }

    fn rank_with_count(&self, n: u8) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count == n).map(|(rank, _)| *rank)
    }

    fn ranks_with_count(&self, n: u8) -> Vec<Rank> {
        self.groups.iter().filter(|(_, count)| *count == n).map(|(rank, _)| *rank).collect()
    }
}
