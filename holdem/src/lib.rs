//! # Holdem
//!
//! A single game of no-limit Texas Hold'em run by one coordinator task.
//!
//! Players register with a [`Table`], get a [`PlayerHandle`] each, and from
//! then on only talk to the coordinator through channels: plays go into a
//! shared inbox, notifications come back on a private one. The coordinator
//! is the only thing that ever writes chips, folded flags or the pot.
//!
//! ## Game flow
//!
//! - **Deal**: two hole cards per player, one card per pass
//! - **Betting rounds**: preflop, flop, turn and river, each opened by the
//!   seat after the dealer and closed when action returns to the last
//!   bettor
//! - **Board**: burn and deal three cards after the first round, then one
//!   card after each of the next two
//! - **Showdown**: best category takes the pot, ties split it
//!
//! A game also ends early once everybody but one player has folded.
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, betting rules, hand classification and the FSM
//! - [`table`]: Coordinator actor, player endpoints and setup
//!
//! ## Example
//!
//! ```
//! use holdem::{Action, GameConfig, Table, Turn};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), holdem::GameError> {
//! let mut table = Table::with_seed(GameConfig::default(), 42)?;
//! table.register("alice")?;
//! table.register("bob")?;
//!
//! let mut game = table.start()?;
//! for player in game.players.drain(..) {
//!     tokio::spawn(player.run(|_: &Turn<'_>| Action::Check));
//! }
//!
//! let outcome = game.finish().await?;
//! assert_eq!(outcome.pot(), 0);
//! # Ok(())
//! # }
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Category, GameError, GameState, Outcome, Result,
    constants::{self, DEFAULT_STARTING_CHIPS, MAX_PLAYERS},
    entities::{self, Action, ActionChoices, ActionKind, Card, Chips, Deck, PlayerId, Suit},
};

/// Async coordinator and player endpoints.
pub mod table;
pub use table::{Game, GameConfig, Notification, Play, PlayerHandle, Strategy, Table, Turn};
