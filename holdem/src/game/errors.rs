//! Game error types.

use thiserror::Error;

use super::entities::PlayerId;

/// Errors raised while setting up or running a game.
///
/// Setup errors are returned to the caller. Invariant breaches abort the
/// coordinator and leave the game unusable.
#[derive(Debug, Error)]
pub enum GameError {
    /// Start was called before anyone registered
    #[error("can't start a game without players")]
    NoPlayers,

    /// Registration past the table's capacity
    #[error("table is full ({max} players)")]
    TableFull { max: usize },

    /// Rejected configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Lookup of an identity that isn't seated at the table
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    /// Drew from an empty deck
    #[error("deck exhausted")]
    DeckExhausted,

    /// Every sender into the coordinator's inbox was dropped mid game
    #[error("game abandoned by every player")]
    Abandoned,

    /// The coordinator is no longer receiving plays
    #[error("coordinator is gone")]
    CoordinatorGone,

    /// The coordinator task panicked or was cancelled
    #[error("coordinator aborted: {0}")]
    Aborted(String),
}

impl GameError {
    /// Whether the error breaks a game invariant rather than being a
    /// recoverable caller mistake.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::PlayerNotFound(_)
                | GameError::DeckExhausted
                | GameError::Abandoned
                | GameError::Aborted(_)
        )
    }
}

/// Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
