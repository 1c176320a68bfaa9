use crate::hand::HoleCards;
use std::fmt;

/// Host-supplied player identity, e.g. a chat user id. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One seat at the table. Chips persist across hands; hole cards and the
/// folded flag are reset every deal.
#[derive(Debug, Clone)]
pub struct Player {
    id: PlayerId,
    name: String,
    chips: u64,
    hole: Option<HoleCards>,
    folded: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, chips: u64) -> Self {
        Self { id, name: name.into(), chips, hole: None, folded: false }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    pub fn hole(&self) -> Option<&HoleCards> {
        self.hole.as_ref()
    }

    pub fn folded(&self) -> bool {
        self.folded
    }

    /// Dealt in and not folded: still eligible to win this hand.
    pub fn in_hand(&self) -> bool {
        self.hole.is_some() && !self.folded
    }

    /// In the hand with an empty stack: every chip is committed and the
    /// player no longer acts, but still shows down.
    pub fn all_in(&self) -> bool {
        self.in_hand() && self.chips == 0
    }

    /// In the hand and still holding chips to bet.
    pub fn can_act(&self) -> bool {
        self.in_hand() && self.chips > 0
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }

    pub(crate) fn deal(&mut self, hole: HoleCards) {
        self.hole = Some(hole);
        self.folded = false;
    }

    pub(crate) fn clear_hand(&mut self) {
        self.hole = None;
        self.folded = false;
    }

    /// Debit up to `amount`, clamped at the stack. Returns what was actually
    /// paid; a short stack pays everything it has (the all-in conversion).
    pub(crate) fn pay(&mut self, amount: u64) -> u64 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        paid
    }

    /// Credit winnings (or refunds) onto the stack.
    pub(crate) fn collect(&mut self, amount: u64) {
        self.chips += amount;
    }
}
