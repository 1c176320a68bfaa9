use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::evaluator::{evaluate_five, evaluate_seven, Category};
use proptest::prelude::*;

fn rank(v: u8) -> Rank {
    Rank::from_value(v).unwrap()
}

fn arb_rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

fn arb_suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

fn arb_card() -> impl Strategy<Value = Card> {
    (arb_rank(), arb_suit()).prop_map(|(rank, suit)| Card::new(rank, suit))
}

fn hand5() -> impl Strategy<Value = [Card; 5]> {
    prop::array::uniform5(arb_card())
}

fn hand7() -> impl Strategy<Value = [Card; 7]> {
    prop::array::uniform7(arb_card())
}

/// Five distinct ranks that stay a plain flush once suited, so no run
/// and no wheel.
fn five_flush_ranks() -> impl Strategy<Value = Vec<Rank>> {
    prop::sample::subsequence(Rank::ALL.to_vec(), 5).prop_filter(
        "suited run would be a straight flush",
        |ranks| {
            let run = ranks.windows(2).all(|w| w[1].value() == w[0].value() + 1);
            let wheel = *ranks == [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Ace];
            !run && !wheel
        },
    )
}

/// Ranks of the straight topping out at `top`, highest first. `top == 5`
/// builds the wheel.
fn straight_ranks(top: u8) -> [Rank; 5] {
    if top == 5 {
        [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]
    } else {
        std::array::from_fn(|i| rank(top - i as u8))
    }
}

fn offsuit_straight(top: u8) -> [Card; 5] {
    let ranks = straight_ranks(top);
    std::array::from_fn(|i| Card::new(ranks[i], Suit::ALL[i % 4]))
}

fn suited_straight(top: u8, suit: Suit) -> [Card; 5] {
    straight_ranks(top).map(|r| Card::new(r, suit))
}

fn suited(ranks: &[Rank], suit: Suit) -> [Card; 5] {
    std::array::from_fn(|i| Card::new(ranks[i], suit))
}

fn high_to_low(ranks: &[Rank]) -> Vec<Rank> {
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
}

proptest! {
    #[test]
    fn evaluation_ignores_input_order(cards in hand5(), i in 0usize..5, j in 0usize..5) {
        let mut swapped = cards;
        swapped.swap(i, j);
        prop_assert_eq!(evaluate_five(&cards), evaluate_five(&swapped));
    }

    #[test]
    fn evaluation_ordering_obeys_comparison_laws(x in hand5(), y in hand5(), z in hand5()) {
        let ex = evaluate_five(&x);
        let ey = evaluate_five(&y);
        let ez = evaluate_five(&z);

        // Swapping the operands must flip the verdict, and a chain
        // through the middle hand must hold up.
        prop_assert_eq!(ex.cmp(&ey), ey.cmp(&ex).reverse());
        if ex >= ey && ey >= ez {
            prop_assert!(ex >= ez);
        }
    }

    #[test]
    fn best_of_seven_dominates_each_five_card_subset(cards in hand7()) {
        let best = evaluate_seven(&cards);
        // Leaving out each pair of cards walks all 21 subsets.
        for skip_a in 0..6 {
            for skip_b in (skip_a + 1)..7 {
                let kept: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip_a && *i != skip_b)
                    .map(|(_, c)| *c)
                    .collect();
                let subset: [Card; 5] = kept.try_into().unwrap();
                prop_assert!(best >= evaluate_five(&subset));
            }
        }
    }

    #[test]
    fn higher_straights_beat_lower_straights(hi in 6u8..=14u8, lo in 5u8..=13u8) {
        prop_assume!(hi > lo);
        let taller = evaluate_five(&offsuit_straight(hi));
        let lower = evaluate_five(&offsuit_straight(lo));
        prop_assert_eq!(taller.category, Category::Straight);
        prop_assert_eq!(lower.category, Category::Straight);
        prop_assert!(taller > lower);
    }

    #[test]
    fn the_wheel_loses_to_every_taller_straight(top in 6u8..=14u8) {
        let wheel = evaluate_five(&offsuit_straight(5));
        let taller = evaluate_five(&offsuit_straight(top));
        prop_assert_eq!(wheel.category, Category::Straight);
        prop_assert_eq!(wheel.kickers(), &[Rank::Five][..]);
        prop_assert!(taller > wheel);
    }

    #[test]
    fn royal_beats_every_other_straight_flush(top in 5u8..=13u8) {
        let royal = evaluate_five(&suited_straight(14, Suit::Hearts));
        let lesser = evaluate_five(&suited_straight(top, Suit::Spades));
        prop_assert_eq!(royal.category, Category::RoyalFlush);
        prop_assert_eq!(lesser.category, Category::StraightFlush);
        prop_assert!(royal > lesser);
    }

    #[test]
    fn flushes_compare_card_by_card_from_the_top(a in five_flush_ranks(), b in five_flush_ranks()) {
        let ea = evaluate_five(&suited(&a, Suit::Clubs));
        let eb = evaluate_five(&suited(&b, Suit::Clubs));
        prop_assert_eq!(ea.category, Category::Flush);
        prop_assert_eq!(eb.category, Category::Flush);
        prop_assert_eq!(ea.cmp(&eb), high_to_low(&a).cmp(&high_to_low(&b)));
    }
}
