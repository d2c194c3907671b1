//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::game::{
    constants::{DEFAULT_STARTING_CHIPS, MAX_PLAYERS},
    entities::Chips,
    errors::{GameError, Result},
};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Chip stack every registered player starts with
    pub starting_chips: Chips,

    /// Maximum number of registered players (default: 22, what one deck
    /// can serve)
    pub max_players: usize,

    /// Capacity of the coordinator's shared inbox
    pub inbox_capacity: usize,

    /// Capacity of each player's private channel
    pub outbox_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_chips: DEFAULT_STARTING_CHIPS,
            max_players: MAX_PLAYERS,
            inbox_capacity: 32,
            outbox_capacity: 64,
        }
    }
}

impl GameConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.starting_chips == 0 {
            return Err(GameError::InvalidConfig(
                "Starting chips must be positive".to_string(),
            ));
        }

        if self.max_players == 0 || self.max_players > MAX_PLAYERS {
            return Err(GameError::InvalidConfig(format!(
                "Max players must be between 1 and {MAX_PLAYERS}"
            )));
        }

        // Every pot has to fit in a chip count.
        if self.total_chips(self.max_players) > u64::from(Chips::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "{} players with {} chips each overflows the pot",
                self.max_players, self.starting_chips
            )));
        }

        if self.inbox_capacity == 0 || self.outbox_capacity == 0 {
            return Err(GameError::InvalidConfig(
                "Channel capacities must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Chips in play once `players` have registered.
    pub fn total_chips(&self, players: usize) -> u64 {
        u64::from(self.starting_chips) * players as u64
    }
}
