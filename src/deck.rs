use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A dealing deck. Starts as the standard 52-card set and refills itself
/// when it runs dry, so [`Deck::draw`] never fails.
///
/// ```
/// use holdem_engine::deck::Deck;
///
/// let mut deck = Deck::standard();
/// deck.shuffle_seeded(42);
/// assert_eq!(deck.len(), 52);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A full 52-card deck in rank-major order (unshuffled).
    pub fn standard() -> Self {
        Self { cards: Self::full_set() }
    }

    fn full_set() -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Uniformly permute the remaining cards with the caller's RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deterministic shuffle from a seed. Handy for reproducible games and
    /// tests.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Deal the top card. When the deck is exhausted it rebuilds and
    /// reshuffles a fresh 52-card set first, so this always succeeds.
    ///
    /// Cards already dealt are not excluded from the refill, so a card held
    /// in a hand can re-enter play after an exhaustion. Known limitation,
    /// kept from the original table rules.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            self.cards = Self::full_set();
            self.shuffle_with(rng);
        }
    }

    /// Deal `n` cards.
    pub fn draw_n<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) -> Vec<Card> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}
