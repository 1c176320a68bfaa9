//! Betting-round state machine.
//!
//! [`TurnEngine`] owns turn order, blind posting, action legality, and
//! round/hand termination for a single hand. Chips live on [`Player`]
//! stacks and in the [`PotLedger`]; the engine moves them but never
//! holds them. Dealing cards and settling pots belong to the table.

use std::fmt;
use std::time::{Duration, Instant};

use crate::player::Player;
use crate::pot::PotLedger;

/// Betting streets in deal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// The street after this one, or `None` past the river.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards revealed when this street opens.
    pub fn reveal_count(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "Pre-Flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        };
        f.write_str(name)
    }
}

/// Lifecycle of a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No hand in flight.
    Idle,
    /// Forced blinds going in; transient within [`TurnEngine::begin_hand`].
    PostingBlinds,
    /// A betting round is open on the given street.
    Acting(Street),
    /// The given street's betting round has closed.
    Settled(Street),
    /// The hand is over; awaiting settlement or the next deal.
    HandOver,
}

/// How a hand ended without reaching a contested showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandEnd {
    /// Every other player folded; the seat wins the pot uncontested.
    FoldWin(usize),
    /// No survivor remained; the pot is forfeit.
    Abort,
}

/// What an accepted action did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Betting continues; the turn has moved to the next actor.
    Continue,
    /// The betting round closed.
    RoundSettled,
    /// The hand is over without showdown.
    HandEnded(HandEnd),
}

/// A rejected player action. State is unchanged and the player may act
/// again; the turn clock keeps running.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no betting round is in progress")]
    NoBettingRound,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("cannot check, {to_call} to call")]
    CheckOwesCall { to_call: u64 },
    #[error("a raise must exceed the {to_call} to call, got {got}")]
    RaiseTooSmall { to_call: u64, got: u64 },
    #[error("raise of {got} exceeds remaining stack of {chips}")]
    InsufficientChips { chips: u64, got: u64 },
}

/// The betting-round state machine for one hand at a time.
///
/// Seats are indices into the player slice handed to each operation;
/// the slice must keep the same order for the whole hand. Callers
/// provide at least two seated players to [`TurnEngine::begin_hand`].
#[derive(Debug, Clone)]
pub struct TurnEngine {
    phase: Phase,
    current: usize,
    highest_bet: u64,
    round_bets: Vec<u64>,
    last_aggressor: Option<usize>,
    round_starter: usize,
    sb_seat: usize,
    bb_seat: usize,
    dealt_in: usize,
    remaining: usize,
    turn_seq: u64,
    deadline: Option<Instant>,
    small_blind: u64,
    turn_timeout: Duration,
}

impl TurnEngine {
    pub fn new(small_blind: u64, turn_timeout: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            current: 0,
            highest_bet: 0,
            round_bets: Vec::new(),
            last_aggressor: None,
            round_starter: 0,
            sb_seat: 0,
            bb_seat: 0,
            dealt_in: 0,
            remaining: 0,
            turn_seq: 0,
            deadline: None,
            small_blind,
            turn_timeout,
        }
    }

    /// Starts a hand: posts the small blind from `sb_seat` and the big
    /// blind (twice the small) from the next seat, both capped at the
    /// poster's stack, then opens pre-flop betting with the seat after
    /// the big blind (heads-up, the small blind itself).
    ///
    /// The big blind seat is recorded as the opening aggressor, so an
    /// unraised round closes as soon as the action returns to it. If
    /// the blinds leave nobody able to act the round settles at once.
    pub fn begin_hand(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        sb_seat: usize,
    ) -> ActionOutcome {
        let n = players.len();
        self.phase = Phase::PostingBlinds;
        self.round_bets = vec![0; n];
        self.highest_bet = 0;
        self.last_aggressor = None;
        self.sb_seat = sb_seat % n;
        self.bb_seat = (self.sb_seat + 1) % n;
        self.dealt_in = n;
        self.remaining = n;

        self.post_blind(players, ledger, self.sb_seat, self.small_blind);
        self.post_blind(players, ledger, self.bb_seat, self.small_blind * 2);
        // The price to play is the nominal big blind even when a short
        // stack posted less.
        self.highest_bet = self.small_blind * 2;
        self.last_aggressor = Some(self.bb_seat);

        self.phase = Phase::Acting(Street::Preflop);
        match self.first_actor_preflop(players) {
            Some(seat) => {
                self.current = seat;
                self.round_starter = seat;
                self.arm_turn();
                ActionOutcome::Continue
            }
            None => self.settle_round(),
        }
    }

    fn post_blind(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        seat: usize,
        blind: u64,
    ) {
        let paid = players[seat].pay(blind);
        self.round_bets[seat] += paid;
        ledger.add_contribution(players[seat].id(), paid);
    }

    /// First to act pre-flop: the seat after the big blind, skipping
    /// seats the blinds (or the rake) already emptied. Hole cards are
    /// not dealt yet, so only the stack decides eligibility here.
    fn first_actor_preflop(&self, players: &[Player]) -> Option<usize> {
        let n = players.len();
        let mut candidate = (self.bb_seat + 1) % n;
        for _ in 0..n {
            if candidate == self.bb_seat {
                return None;
            }
            if players[candidate].chips() > 0 {
                return Some(candidate);
            }
            candidate = (candidate + 1) % n;
        }
        None
    }

    /// Folds the acting player. When only one player is left in the
    /// hand it short-circuits to [`HandEnd::FoldWin`] with no showdown.
    pub fn fold(
        &mut self,
        players: &mut [Player],
        seat: usize,
    ) -> Result<ActionOutcome, ActionError> {
        self.ensure_turn(seat)?;
        Ok(self.fold_current(players))
    }

    /// Checks: a call of zero. Rejected while a call is owed.
    pub fn check(
        &mut self,
        players: &mut [Player],
        seat: usize,
    ) -> Result<ActionOutcome, ActionError> {
        self.ensure_turn(seat)?;
        let to_call = self.to_call(seat);
        if to_call > 0 {
            return Err(ActionError::CheckOwesCall { to_call });
        }
        Ok(self.advance_turn(players))
    }

    /// Matches the highest bet. A short stack contributes what it has
    /// and is all-in; the highest bet never drops to meet it.
    pub fn call(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        seat: usize,
    ) -> Result<ActionOutcome, ActionError> {
        self.ensure_turn(seat)?;
        let paid = players[seat].pay(self.to_call(seat));
        self.round_bets[seat] += paid;
        ledger.add_contribution(players[seat].id(), paid);
        Ok(self.advance_turn(players))
    }

    /// Pushes `amount` chips on top of the player's bets so far this
    /// round. Legal iff `amount` exceeds the call and fits the stack;
    /// `amount == chips` is the all-in case. The raiser's new round
    /// total becomes the highest bet and the raiser the aggressor the
    /// round must come back around to.
    pub fn raise(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        seat: usize,
        amount: u64,
    ) -> Result<ActionOutcome, ActionError> {
        self.ensure_turn(seat)?;
        let chips = players[seat].chips();
        if amount > chips {
            return Err(ActionError::InsufficientChips { chips, got: amount });
        }
        let to_call = self.to_call(seat);
        if amount <= to_call {
            return Err(ActionError::RaiseTooSmall { to_call, got: amount });
        }
        let paid = players[seat].pay(amount);
        self.round_bets[seat] += paid;
        ledger.add_contribution(players[seat].id(), paid);
        self.highest_bet = self.round_bets[seat];
        self.last_aggressor = Some(seat);
        Ok(self.advance_turn(players))
    }

    /// Opens betting on `street`: round bets reset, no aggressor, and
    /// the first actor is the big-blind seat when exactly two players
    /// were dealt in, otherwise the small-blind seat, skipping folded
    /// and all-in seats. Settles immediately when nobody can bet.
    pub fn advance_street(&mut self, players: &[Player], street: Street) -> ActionOutcome {
        self.highest_bet = 0;
        for bet in &mut self.round_bets {
            *bet = 0;
        }
        self.last_aggressor = None;
        self.phase = Phase::Acting(street);

        let n = players.len();
        let anchor = if self.dealt_in == 2 { self.bb_seat } else { self.sb_seat };
        let mut candidate = anchor;
        for _ in 0..n {
            if players[candidate].can_act() {
                self.current = candidate;
                self.round_starter = candidate;
                self.arm_turn();
                return ActionOutcome::Continue;
            }
            candidate = (candidate + 1) % n;
        }
        self.settle_round()
    }

    /// Auto-folds the acting player, but only while `seq` still names
    /// the live turn and the round is open. A timer that fires after
    /// the turn moved on (or the round closed) is a stale no-op, so a
    /// single turn can expire at most once.
    pub fn timeout(&mut self, players: &mut [Player], seq: u64) -> Option<ActionOutcome> {
        if !matches!(self.phase, Phase::Acting(_)) || seq != self.turn_seq {
            return None;
        }
        Some(self.fold_current(players))
    }

    /// Folds `seat` regardless of whose turn it is, for a player who
    /// leaves the table mid-hand. `None` when no round is open or the
    /// seat is already out of the hand.
    pub(crate) fn force_fold(
        &mut self,
        players: &mut [Player],
        seat: usize,
    ) -> Option<ActionOutcome> {
        if !matches!(self.phase, Phase::Acting(_)) || !players[seat].in_hand() {
            return None;
        }
        if seat == self.current {
            return Some(self.fold_current(players));
        }
        players[seat].fold();
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining <= 1 {
            return Some(self.end_hand(players));
        }
        Some(ActionOutcome::Continue)
    }

    /// Marks the hand finished after settlement. Idempotent.
    pub fn complete(&mut self) {
        self.phase = Phase::HandOver;
        self.disarm();
    }

    fn ensure_turn(&self, seat: usize) -> Result<(), ActionError> {
        if !matches!(self.phase, Phase::Acting(_)) {
            return Err(ActionError::NoBettingRound);
        }
        if seat != self.current {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }

    fn fold_current(&mut self, players: &mut [Player]) -> ActionOutcome {
        players[self.current].fold();
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining <= 1 {
            return self.end_hand(players);
        }
        self.advance_turn(players)
    }

    /// Moves the turn to the next seat that can still bet. The round
    /// closes when the walk reaches the aggressor (or, unraised, wraps
    /// back to the round starter); that seat is checked before any
    /// eligibility skip so a folded or all-in aggressor still closes
    /// the round. A full wrap with no eligible seat settles the round,
    /// or aborts the hand when nobody survives at all.
    fn advance_turn(&mut self, players: &[Player]) -> ActionOutcome {
        let n = players.len();
        let mut candidate = (self.current + 1) % n;
        for _ in 0..n {
            let closes = match self.last_aggressor {
                Some(aggressor) => candidate == aggressor,
                None => candidate == self.round_starter,
            };
            if closes {
                return self.settle_round();
            }
            if players[candidate].can_act() {
                self.current = candidate;
                self.arm_turn();
                return ActionOutcome::Continue;
            }
            candidate = (candidate + 1) % n;
        }
        if self.remaining == 0 {
            return self.end_hand(players);
        }
        self.settle_round()
    }

    fn settle_round(&mut self) -> ActionOutcome {
        if let Phase::Acting(street) = self.phase {
            self.phase = Phase::Settled(street);
        }
        self.disarm();
        ActionOutcome::RoundSettled
    }

    fn end_hand(&mut self, players: &[Player]) -> ActionOutcome {
        self.phase = Phase::HandOver;
        self.disarm();
        let end = match players.iter().position(Player::in_hand) {
            Some(survivor) => HandEnd::FoldWin(survivor),
            None => HandEnd::Abort,
        };
        ActionOutcome::HandEnded(end)
    }

    /// Starts a fresh turn: new sequence number, fresh deadline.
    fn arm_turn(&mut self) {
        self.turn_seq = self.turn_seq.wrapping_add(1);
        self.deadline = Some(Instant::now() + self.turn_timeout);
    }

    /// Invalidates any outstanding timer along with the deadline.
    fn disarm(&mut self) {
        self.turn_seq = self.turn_seq.wrapping_add(1);
        self.deadline = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The street whose betting round is open or just settled.
    pub fn street(&self) -> Option<Street> {
        match self.phase {
            Phase::Acting(street) | Phase::Settled(street) => Some(street),
            _ => None,
        }
    }

    /// Seat index whose turn it is. Meaningful only while `Acting`.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Chips `seat` still owes to match the highest bet this round.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.highest_bet.saturating_sub(self.round_bets[seat])
    }

    pub fn highest_bet(&self) -> u64 {
        self.highest_bet
    }

    pub fn round_bet(&self, seat: usize) -> u64 {
        self.round_bets[seat]
    }

    /// Players still in the hand (dealt in and not folded).
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn sb_seat(&self) -> usize {
        self.sb_seat
    }

    pub fn bb_seat(&self) -> usize {
        self.bb_seat
    }

    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    /// Sequence number of the live turn; stale timers carry an old one.
    pub fn turn_seq(&self) -> u64 {
        self.turn_seq
    }

    /// When the live turn expires, while one is open.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
