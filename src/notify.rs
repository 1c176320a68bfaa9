//! Host-facing notification seam.
//!
//! The table reports everything observable through a [`Notifier`].
//! Transport and presentation (chat, sockets, rendering) belong to the
//! host; the table only emits short plain-text lines and raw data.

use crate::hand::HoleCards;
use crate::player::PlayerId;

/// Receives table events as they happen.
///
/// Every method has an empty default body, so hosts implement only
/// what they deliver.
pub trait Notifier {
    /// A public line everyone at the table should see.
    fn on_table_message(&mut self, message: &str) {
        let _ = message;
    }

    /// A player's freshly dealt hole cards. For that player's eyes only.
    fn on_private_hand(&mut self, player: &PlayerId, hole: &HoleCards) {
        let _ = (player, hole);
    }

    /// One awarded pot. Fired once per pot, main pot first when side
    /// pots exist; `amount_each` is the per-winner share.
    fn on_hand_complete(&mut self, winners: &[PlayerId], amount_each: u64) {
        let _ = (winners, amount_each);
    }

    /// The game is over; one player holds all the chips in play.
    fn on_game_over(&mut self, winner_name: &str) {
        let _ = winner_name;
    }
}

/// Discards every event. Useful for simulations and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {}
