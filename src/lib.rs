//! holdem-engine: Texas Hold'em betting engine and hand evaluator
//!
//! Goals:
//! - Deterministic, fast evaluation for Texas Hold'em hands
//! - A full betting state machine: blinds, turn order, raises, side
//!   pots, showdown settlement
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::evaluator::{evaluate_holdem, Category};
//! use holdem_engine::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## Quick start: run a table
//! ```
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::notify::NullNotifier;
//! use holdem_engine::table::Table;
//!
//! let mut table = Table::with_seed(TableConfig::default(), NullNotifier, 7).unwrap();
//! table.join("alice", "Alice").unwrap();
//! table.join("bob", "Bob").unwrap();
//! table.start_game().unwrap();
//!
//! // Blinds are posted and the first hand waits on the small blind.
//! assert_eq!(table.pot(), 3);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod hand;
pub mod notify;
pub mod player;
pub mod pot;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
