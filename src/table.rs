//! Table orchestration: seats, deals, streets, showdown, payouts.
//!
//! [`Table`] drives whole games. It owns the players, the deck, one
//! [`TurnEngine`] and one [`PotLedger`] per hand, and reports every
//! observable event through the host's [`Notifier`]. Hands chain
//! automatically: as soon as one settles the next is dealt, until a
//! single player holds all the chips.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use log::{debug, error, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, TableConfig};
use crate::deck::Deck;
use crate::engine::{ActionError, ActionOutcome, HandEnd, Phase, Street, TurnEngine};
use crate::evaluator::{self, HandValue};
use crate::hand::{Board, HoleCards};
use crate::notify::Notifier;
use crate::player::{Player, PlayerId};
use crate::pot::{PotLedger, Settlement};

/// A rejected table operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("the game has already started")]
    GameStarted,
    #[error("that id is already seated")]
    AlreadySeated,
    #[error("no such player at the table")]
    UnknownPlayer,
    #[error("need at least two players to start")]
    NotEnoughPlayers,
}

/// A table running hold'em hands for its seated players.
///
/// Seating order is joining order and stays stable; seats disappear
/// only between hands, when a player busts or has asked to leave.
pub struct Table<N: Notifier> {
    config: TableConfig,
    notifier: N,
    players: Vec<Player>,
    deck: Deck,
    rng: ChaCha8Rng,
    engine: TurnEngine,
    ledger: PotLedger,
    board: Board,
    sb_seat: usize,
    house_take: u64,
    hand_no: u64,
    started: bool,
    departing: BTreeSet<PlayerId>,
}

impl<N: Notifier> Table<N> {
    pub fn new(config: TableConfig, notifier: N) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::with_rng(config, notifier, ChaCha8Rng::from_os_rng()))
    }

    /// A table whose deals are reproducible from `seed`. For tests and
    /// replays.
    pub fn with_seed(config: TableConfig, notifier: N, seed: u64) -> Result<Self, TableError> {
        config.validate()?;
        Ok(Self::with_rng(config, notifier, ChaCha8Rng::seed_from_u64(seed)))
    }

    fn with_rng(config: TableConfig, notifier: N, rng: ChaCha8Rng) -> Self {
        let engine = TurnEngine::new(config.small_blind, config.turn_timeout);
        Self {
            config,
            notifier,
            players: Vec::new(),
            deck: Deck::standard(),
            rng,
            engine,
            ledger: PotLedger::new(),
            board: Board::default(),
            sb_seat: 0,
            house_take: 0,
            hand_no: 0,
            started: false,
            departing: BTreeSet::new(),
        }
    }

    /// Seats a new player with the configured starting stack. Rejected
    /// once the game has started or when the id is already seated.
    pub fn join(
        &mut self,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> Result<(), TableError> {
        if self.started {
            return Err(TableError::GameStarted);
        }
        let id = id.into();
        if self.players.iter().any(|p| p.id() == &id) {
            return Err(TableError::AlreadySeated);
        }
        let name = name.into();
        let line = format!("{name} takes a seat");
        self.players.push(Player::new(id, name, self.config.starting_stack));
        self.notifier.on_table_message(&line);
        Ok(())
    }

    /// Removes a player. Mid-hand the seat is folded right away (which
    /// may end the hand) and disappears before the next deal.
    pub fn leave(&mut self, id: &PlayerId) -> Result<(), TableError> {
        let seat = self.seat_of(id)?;
        let line = format!("{} leaves the table", self.players[seat].name());
        self.notifier.on_table_message(&line);
        if !self.started {
            self.players.remove(seat);
            return Ok(());
        }
        self.departing.insert(id.clone());
        if let Some(outcome) = self.engine.force_fold(&mut self.players, seat) {
            self.resolve(outcome);
            self.prompt_turn();
        }
        Ok(())
    }

    /// Deals the first hand. Requires at least two seated players.
    pub fn start_game(&mut self) -> Result<(), TableError> {
        if self.started {
            return Err(TableError::GameStarted);
        }
        if self.players.len() < 2 {
            return Err(TableError::NotEnoughPlayers);
        }
        self.started = true;
        self.sb_seat = 0;
        let line = format!("game on: {} players", self.players.len());
        self.notifier.on_table_message(&line);
        let outcome = self.deal_hand();
        self.resolve(outcome);
        self.prompt_turn();
        Ok(())
    }

    pub fn fold(&mut self, id: &PlayerId) -> Result<(), TableError> {
        let seat = self.seat_of(id)?;
        let outcome = self.engine.fold(&mut self.players, seat)?;
        let line = format!("{} folds", self.players[seat].name());
        self.notifier.on_table_message(&line);
        self.resolve(outcome);
        self.prompt_turn();
        Ok(())
    }

    pub fn check(&mut self, id: &PlayerId) -> Result<(), TableError> {
        let seat = self.seat_of(id)?;
        let outcome = self.engine.check(&mut self.players, seat)?;
        let line = format!("{} checks", self.players[seat].name());
        self.notifier.on_table_message(&line);
        self.resolve(outcome);
        self.prompt_turn();
        Ok(())
    }

    pub fn call(&mut self, id: &PlayerId) -> Result<(), TableError> {
        let seat = self.seat_of(id)?;
        let owed = match self.engine.phase() {
            Phase::Acting(_) => self.engine.to_call(seat).min(self.players[seat].chips()),
            _ => 0,
        };
        let outcome = self.engine.call(&mut self.players, &mut self.ledger, seat)?;
        let name = self.players[seat].name();
        let line = if self.players[seat].all_in() {
            format!("{name} calls {owed} and is all-in")
        } else if owed == 0 {
            format!("{name} checks")
        } else {
            format!("{name} calls {owed}")
        };
        self.notifier.on_table_message(&line);
        self.resolve(outcome);
        self.prompt_turn();
        Ok(())
    }

    /// Raises by `amount` chips on top of what the player already has
    /// in this round. Must beat the call and fit the stack; betting
    /// the whole stack is the all-in.
    pub fn raise(&mut self, id: &PlayerId, amount: u64) -> Result<(), TableError> {
        let seat = self.seat_of(id)?;
        let outcome = self.engine.raise(&mut self.players, &mut self.ledger, seat, amount)?;
        let name = self.players[seat].name();
        let line = if self.players[seat].all_in() {
            format!("{name} raises {amount} and is all-in")
        } else {
            format!("{name} raises {amount}")
        };
        self.notifier.on_table_message(&line);
        self.resolve(outcome);
        self.prompt_turn();
        Ok(())
    }

    /// Fires the turn clock carrying `seq`. True when the auto-fold
    /// was applied; false for stale or mistimed fires.
    pub fn timeout(&mut self, seq: u64) -> bool {
        let name = match self.engine.phase() {
            Phase::Acting(_) => {
                self.players.get(self.engine.current()).map(|p| p.name().to_string())
            }
            _ => None,
        };
        match self.engine.timeout(&mut self.players, seq) {
            Some(outcome) => {
                if let Some(name) = name {
                    let line = format!("{name} ran out of time and folds");
                    self.notifier.on_table_message(&line);
                }
                self.resolve(outcome);
                self.prompt_turn();
                true
            }
            None => false,
        }
    }

    /// Host tick: expires the live turn once its deadline has passed.
    pub fn poll_timeout(&mut self) -> bool {
        match self.engine.deadline() {
            Some(deadline) if Instant::now() >= deadline => self.timeout(self.engine.turn_seq()),
            _ => false,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Chips in the pot for the hand in flight.
    pub fn pot(&self) -> u64 {
        self.ledger.total()
    }

    /// Rake and forfeited pots accumulated by the house.
    pub fn house_take(&self) -> u64 {
        self.house_take
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.started && self.players.len() <= 1
    }

    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn street(&self) -> Option<Street> {
        self.engine.street()
    }

    /// The player whose turn it is, while a betting round is open.
    pub fn current_player(&self) -> Option<&Player> {
        match self.engine.phase() {
            Phase::Acting(_) => self.players.get(self.engine.current()),
            _ => None,
        }
    }

    pub fn to_call(&self, id: &PlayerId) -> Result<u64, TableError> {
        let seat = self.seat_of(id)?;
        Ok(match self.engine.phase() {
            Phase::Acting(_) => self.engine.to_call(seat),
            _ => 0,
        })
    }

    pub fn turn_seq(&self) -> u64 {
        self.engine.turn_seq()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.engine.deadline()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn seat_of(&self, id: &PlayerId) -> Result<usize, TableError> {
        self.players.iter().position(|p| p.id() == id).ok_or(TableError::UnknownPlayer)
    }

    /// Drives the table forward until it either waits on a player or
    /// the game ends. Hands chain here: a settled hand rolls straight
    /// into the next deal.
    fn resolve(&mut self, mut outcome: ActionOutcome) {
        loop {
            outcome = match outcome {
                ActionOutcome::Continue => return,
                ActionOutcome::RoundSettled => match self.settle_street() {
                    Some(next) => next,
                    None => match self.next_hand() {
                        Some(first) => first,
                        None => return,
                    },
                },
                ActionOutcome::HandEnded(HandEnd::FoldWin(seat)) => {
                    self.award_fold_win(seat);
                    match self.next_hand() {
                        Some(first) => first,
                        None => return,
                    }
                }
                ActionOutcome::HandEnded(HandEnd::Abort) => {
                    self.abort_hand();
                    match self.next_hand() {
                        Some(first) => first,
                        None => return,
                    }
                }
            };
        }
    }

    /// A betting round just closed: run the showdown after the river,
    /// run the board out when at most one player can still bet, or
    /// reveal the next street and reopen betting.
    fn settle_street(&mut self) -> Option<ActionOutcome> {
        let street = self.engine.street()?;
        if street == Street::River {
            self.showdown();
            return None;
        }
        let live = self.players.iter().filter(|p| p.can_act()).count();
        if live <= 1 {
            let missing = 5usize.saturating_sub(self.board.len());
            let cards = self.deck.draw_n(&mut self.rng, missing);
            self.board.extend(cards);
            let line = format!("board runs out: {}", self.board_line());
            self.notifier.on_table_message(&line);
            self.showdown();
            return None;
        }
        let next = street.next()?;
        let cards = self.deck.draw_n(&mut self.rng, next.reveal_count());
        self.board.extend(cards);
        let line = format!("{next}: {}", self.board_line());
        self.notifier.on_table_message(&line);
        Some(self.engine.advance_street(&self.players, next))
    }

    /// Evaluates every live hand against the board, revealing in seat
    /// order from the small blind, and pays the pots out. A settlement
    /// that cannot balance voids the hand instead of corrupting the
    /// next one.
    fn showdown(&mut self) {
        self.engine.complete();
        let order = self.seat_order_from_sb();
        let mut seat_ids = Vec::with_capacity(order.len());
        let mut results: BTreeMap<PlayerId, HandValue> = BTreeMap::new();
        for seat in order {
            let p = &self.players[seat];
            seat_ids.push(p.id().clone());
            if !p.in_hand() {
                continue;
            }
            let hole = match p.hole() {
                Some(hole) => hole,
                None => continue,
            };
            match evaluator::evaluate_holdem(hole, &self.board) {
                Ok(eval) => {
                    let line = format!(
                        "{} shows {} {} ({})",
                        p.name(),
                        hole.first(),
                        hole.second(),
                        eval.category
                    );
                    results.insert(p.id().clone(), eval.value());
                    self.notifier.on_table_message(&line);
                }
                Err(err) => {
                    error!("hand evaluation failed for {}: {err}", p.id());
                    self.void_hand();
                    return;
                }
            }
        }
        match self.ledger.settle(&seat_ids, &results) {
            Ok(settlement) => self.apply_settlement(settlement),
            Err(err) => {
                error!("pot settlement failed: {err}");
                self.void_hand();
            }
        }
    }

    fn apply_settlement(&mut self, settlement: Settlement) {
        debug!(
            "hand {} settled: {} chips across {} pots",
            self.hand_no,
            settlement.total_awarded(),
            settlement.awards.len()
        );
        for award in &settlement.awards {
            self.notifier.on_hand_complete(&award.winners, award.amount_each);
        }
        for (id, amount) in settlement.payouts() {
            if let Some(p) = self.players.iter_mut().find(|p| p.id() == id) {
                p.collect(amount);
            }
        }
    }

    fn award_fold_win(&mut self, seat: usize) {
        let total = self.ledger.total();
        let p = &mut self.players[seat];
        p.collect(total);
        let line = format!("{} wins {total} uncontested", p.name());
        let winner = p.id().clone();
        self.notifier.on_table_message(&line);
        self.notifier.on_hand_complete(&[winner], total);
    }

    /// Nobody left to win: the pot goes to the house.
    fn abort_hand(&mut self) {
        let total = self.ledger.total();
        self.house_take += total;
        warn!("hand aborted with no survivors; {total} chips forfeited");
        self.notifier.on_table_message("hand aborted; pot forfeited");
    }

    /// Invariant violation during settlement. The pot is withheld so
    /// later hands start from clean books.
    fn void_hand(&mut self) {
        let total = self.ledger.total();
        self.house_take += total;
        self.notifier.on_table_message("hand voided; pot withheld");
    }

    /// Sweeps busted and departing seats, rotates the blind marker,
    /// and deals again; `None` ends the chain with the game decided
    /// (or abandoned).
    fn next_hand(&mut self) -> Option<ActionOutcome> {
        self.engine.complete();
        self.sweep_and_rotate();
        if self.players.len() < 2 {
            if let Some(winner) = self.players.first() {
                let name = winner.name().to_string();
                self.notifier.on_game_over(&name);
            }
            return None;
        }
        Some(self.deal_hand())
    }

    fn sweep_and_rotate(&mut self) {
        // Pick the next small blind in the old seating order before any
        // seat disappears; busts and leavers cannot take the marker.
        let n = self.players.len();
        let mut next_sb: Option<PlayerId> = None;
        for offset in 1..=n {
            let p = &self.players[(self.sb_seat + offset) % n];
            if p.chips() > 0 && !self.departing.contains(p.id()) {
                next_sb = Some(p.id().clone());
                break;
            }
        }

        let eliminated: Vec<String> = self
            .players
            .iter()
            .filter(|p| p.chips() == 0 && !self.departing.contains(p.id()))
            .map(|p| p.name().to_string())
            .collect();
        for name in eliminated {
            let line = format!("{name} is eliminated");
            self.notifier.on_table_message(&line);
        }

        let departing = std::mem::take(&mut self.departing);
        self.players.retain(|p| p.chips() > 0 && !departing.contains(p.id()));
        self.sb_seat = next_sb
            .and_then(|id| self.players.iter().position(|p| p.id() == &id))
            .unwrap_or(0);
    }

    /// One fresh hand: new deck and books, rake off the top, blinds,
    /// two hole cards each.
    fn deal_hand(&mut self) -> ActionOutcome {
        self.hand_no += 1;
        debug!(
            "hand {} dealt to {} players, small blind at seat {}",
            self.hand_no,
            self.players.len(),
            self.sb_seat
        );
        self.board = Board::default();
        self.ledger = PotLedger::new();
        self.deck = Deck::standard();
        self.deck.shuffle_with(&mut self.rng);
        for p in &mut self.players {
            p.clear_hand();
        }
        let line = format!(
            "hand #{}: blinds {}/{}",
            self.hand_no,
            self.config.small_blind,
            self.config.big_blind()
        );
        self.notifier.on_table_message(&line);
        self.collect_rake();
        let outcome = self.engine.begin_hand(&mut self.players, &mut self.ledger, self.sb_seat);
        self.deal_hole_cards();
        outcome
    }

    /// The per-player house cut, taken from stacks before the blinds.
    /// Never enters the pot, so settlement books stay balanced.
    fn collect_rake(&mut self) {
        if self.config.rake_per_player == 0 {
            return;
        }
        let mut taken = 0;
        for p in &mut self.players {
            taken += p.pay(self.config.rake_per_player);
        }
        self.house_take += taken;
        if taken > 0 {
            let line = format!("house takes {taken}");
            self.notifier.on_table_message(&line);
        }
    }

    fn deal_hole_cards(&mut self) {
        for seat in 0..self.players.len() {
            let a = self.deck.draw(&mut self.rng);
            let b = self.deck.draw(&mut self.rng);
            let hole = HoleCards::dealt(a, b);
            self.players[seat].deal(hole);
            let id = self.players[seat].id().clone();
            self.notifier.on_private_hand(&id, &hole);
        }
    }

    fn prompt_turn(&mut self) {
        if let Phase::Acting(_) = self.engine.phase() {
            let seat = self.engine.current();
            let to_call = self.engine.to_call(seat);
            let name = self.players[seat].name();
            let line = if to_call > 0 {
                format!("{name} to act, {to_call} to call")
            } else {
                format!("{name} to act")
            };
            self.notifier.on_table_message(&line);
        }
    }

    fn seat_order_from_sb(&self) -> Vec<usize> {
        let n = self.players.len();
        (0..n).map(|i| (self.engine.sb_seat() + i) % n).collect()
    }

    fn board_line(&self) -> String {
        let cards: Vec<String> = self.board.as_slice().iter().map(|c| c.to_string()).collect();
        cards.join(" ")
    }
}
