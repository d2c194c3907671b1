//! Poker game engine - cards, betting rules and the coordinator FSM.
//!
//! Nothing in here does I/O. [`state_machine::GameState`] takes plays one
//! at a time and returns the notifications they produce, which makes the
//! whole game drivable from plain unit tests.

pub mod constants;
pub mod entities;
pub mod errors;
pub mod evaluator;
pub mod normalize;
pub mod sequencer;
pub mod state_machine;

pub use errors::{GameError, Result};
pub use evaluator::{Category, classify};
pub use state_machine::{Dispatch, GameState, Outcome, Phase, ShowdownHand, Step};
