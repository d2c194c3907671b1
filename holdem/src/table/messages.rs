//! Coordinator message types.

use serde::{Deserialize, Serialize};

use crate::game::{
    entities::{Action, ActionChoices, Card, Chips, PlayerId},
    state_machine::Outcome,
};

/// A player's submission on the coordinator's shared inbox.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Play {
    /// Player making the play
    pub player: PlayerId,
    /// What they want to do and how much they want to put in. The
    /// coordinator normalizes this before acting on it.
    pub action: Action,
}

/// Messages delivered on a player's private channel
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Notification {
    /// It's the recipient's turn. Exactly one play is expected back.
    YourTurn {
        legal: ActionChoices,
        high_bet: Chips,
    },

    /// Another player acted. Informational only.
    Played { player: PlayerId, action: Action },

    /// Community cards after a round boundary
    Board { round: usize, cards: Vec<Card> },

    /// The game is over
    Finished(Outcome),
}

impl Notification {
    /// Player whose action is being reported. `None` means the notification
    /// isn't about someone else's play.
    pub fn acting_player(&self) -> Option<PlayerId> {
        match self {
            Notification::Played { player, .. } => Some(*player),
            _ => None,
        }
    }

    /// Legal actions offered to the recipient. Empty unless it's their
    /// turn.
    pub fn legal_actions(&self) -> ActionChoices {
        match self {
            Notification::YourTurn { legal, .. } => legal.clone(),
            _ => ActionChoices::default(),
        }
    }

    /// Whether the recipient has to reply with a play.
    pub fn expects_reply(&self) -> bool {
        matches!(self, Notification::YourTurn { .. })
    }
}
