//! Table module running one game as an async actor.
//!
//! This module implements:
//! - Coordinator: the single writer of the game state
//! - PlayerHandle: a player's end of the channels
//! - Table: registration and startup
//!
//! ## Architecture
//!
//! The coordinator runs in its own Tokio task with one shared mpsc inbox
//! that every player submits plays to. Each player gets a private mpsc
//! channel for notifications and a watch channel carrying their chips and
//! folded flag. Players never touch the game state directly.

pub mod actor;
pub mod config;
pub mod messages;
pub mod player;
pub mod setup;

pub use actor::Coordinator;
pub use config::GameConfig;
pub use messages::{Notification, Play};
pub use player::{PlayerHandle, Strategy, Turn};
pub use setup::{Game, Table};
