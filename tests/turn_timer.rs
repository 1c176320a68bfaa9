use std::time::Duration;

use holdem_engine::config::TableConfig;
use holdem_engine::notify::{Notifier, NullNotifier};
use holdem_engine::player::PlayerId;
use holdem_engine::table::Table;

#[derive(Default)]
struct Recorder {
    messages: Vec<String>,
    game_over: Option<String>,
}

impl Notifier for Recorder {
    fn on_table_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
    fn on_game_over(&mut self, winner_name: &str) {
        self.game_over = Some(winner_name.to_string());
    }
}

fn pid(s: &str) -> PlayerId {
    PlayerId::new(s)
}

#[test]
fn deadline_rearms_on_each_accepted_action() {
    let mut t = Table::with_seed(TableConfig::default(), NullNotifier, 1).unwrap();
    t.join("a", "Ann").unwrap();
    t.join("b", "Bob").unwrap();
    t.join("c", "Cyd").unwrap();
    t.start_game().unwrap();

    let seq_before = t.turn_seq();
    let deadline_before = t.deadline().expect("first turn is armed");

    t.call(&pid("c")).unwrap();

    assert_ne!(t.turn_seq(), seq_before, "a new turn carries a new sequence");
    let deadline_after = t.deadline().expect("next turn is armed");
    assert!(deadline_after >= deadline_before);
}

#[test]
fn rejected_actions_do_not_touch_the_clock() {
    let mut t = Table::with_seed(TableConfig::default(), NullNotifier, 2).unwrap();
    t.join("a", "Ann").unwrap();
    t.join("b", "Bob").unwrap();
    t.join("c", "Cyd").unwrap();
    t.start_game().unwrap();

    let seq = t.turn_seq();
    let deadline = t.deadline();

    assert!(t.check(&pid("c")).is_err(), "a call is owed");
    assert!(t.raise(&pid("c"), 1).is_err());
    assert!(t.call(&pid("a")).is_err(), "not Ann's turn");

    assert_eq!(t.turn_seq(), seq, "failed actions cannot stall the clock");
    assert_eq!(t.deadline(), deadline);
}

#[test]
fn timeout_chain_can_end_the_hand() {
    let config = TableConfig { turn_timeout: Duration::ZERO, ..TableConfig::default() };
    let mut t = Table::with_seed(config, Recorder::default(), 3).unwrap();
    t.join("a", "Ann").unwrap();
    t.join("b", "Bob").unwrap();
    t.join("c", "Cyd").unwrap();
    t.start_game().unwrap();

    // Cyd then Ann time out, Bob wins the blinds, and the next hand is
    // armed straight away.
    assert!(t.poll_timeout());
    assert!(t.poll_timeout());

    assert_eq!(t.hand_no(), 2);
    assert!(t.deadline().is_some(), "hand two's first turn is already armed");
    let timeouts =
        t.notifier().messages.iter().filter(|m| m.contains("ran out of time")).count();
    assert_eq!(timeouts, 2);
    assert_eq!(t.player(&pid("b")).unwrap().chips(), 50, "won 3, posted hand two's sb 1");
}

#[test]
fn manual_timeout_requires_the_live_sequence() {
    let mut t = Table::with_seed(TableConfig::default(), NullNotifier, 4).unwrap();
    t.join("a", "Ann").unwrap();
    t.join("b", "Bob").unwrap();
    t.start_game().unwrap();

    let live = t.turn_seq();
    assert!(!t.timeout(live.wrapping_add(5)), "future sequences are not honored");
    assert!(!t.player(&pid("a")).unwrap().folded());

    assert!(t.timeout(live));
    assert_eq!(t.hand_no(), 2, "heads-up fold ends the hand");
}

#[test]
fn clock_disarms_once_the_game_is_over() {
    let mut t = Table::with_seed(TableConfig::default(), Recorder::default(), 5).unwrap();
    t.join("a", "Ann").unwrap();
    t.join("b", "Bob").unwrap();
    t.start_game().unwrap();

    t.leave(&pid("a")).unwrap();

    assert!(t.game_over());
    assert_eq!(t.notifier().game_over.as_deref(), Some("Bob"));
    assert_eq!(t.deadline(), None);
    assert!(!t.poll_timeout());
}
