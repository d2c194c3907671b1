//! Player endpoints and the decision seam.

use super::messages::{Notification, Play};
use crate::game::{
    entities::{Action, ActionChoices, Card, Chips, PlayerId, SeatStatus},
    errors::{GameError, Result},
    state_machine::Outcome,
};
use tokio::sync::{mpsc, watch};

/// What a strategy gets to look at when it's asked to act.
#[derive(Clone, Debug)]
pub struct Turn<'a> {
    pub legal: &'a ActionChoices,
    pub high_bet: Chips,
    pub chips: Chips,
    pub cards: &'a [Card; 2],
    pub board: &'a [Card],
}

/// Decision-making for a seated player.
///
/// The coordinator doesn't trust the decision: whatever is returned is
/// normalized against the player's stack and the round's high bet.
pub trait Strategy: Send {
    /// Pick an action for the current turn
    fn decide(&mut self, turn: &Turn<'_>) -> Action;

    /// See every notification, including the ones that don't need a reply
    fn observe(&mut self, _notification: &Notification) {}
}

impl<F> Strategy for F
where
    F: FnMut(&Turn<'_>) -> Action + Send,
{
    fn decide(&mut self, turn: &Turn<'_>) -> Action {
        self(turn)
    }
}

/// A registered player's end of the coordinator's channels.
#[derive(Debug)]
pub struct PlayerHandle {
    id: PlayerId,
    name: String,
    cards: [Card; 2],
    board: Vec<Card>,
    notifications: mpsc::Receiver<Notification>,
    plays: mpsc::Sender<Play>,
    status: watch::Receiver<SeatStatus>,
}

impl PlayerHandle {
    pub(crate) fn new(
        id: PlayerId,
        name: String,
        cards: [Card; 2],
        notifications: mpsc::Receiver<Notification>,
        plays: mpsc::Sender<Play>,
        status: watch::Receiver<SeatStatus>,
    ) -> Self {
        Self {
            id,
            name,
            cards,
            board: Vec::new(),
            notifications,
            plays,
            status,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card; 2] {
        &self.cards
    }

    /// Community cards seen so far.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Latest chip count published by the coordinator.
    pub fn chips(&self) -> Chips {
        self.status.borrow().chips
    }

    pub fn folded(&self) -> bool {
        self.status.borrow().folded
    }

    /// Separate subscription to the chips and folded snapshot, still
    /// readable after the handle has been consumed by [`run`](Self::run).
    pub fn status(&self) -> watch::Receiver<SeatStatus> {
        self.status.clone()
    }

    /// Wait for the next notification. `None` once the coordinator is gone
    /// and every queued notification has been read.
    pub async fn recv(&mut self) -> Option<Notification> {
        let notification = self.notifications.recv().await?;
        if let Notification::Board { cards, .. } = &notification {
            self.board.clone_from(cards);
        }
        Some(notification)
    }

    /// Submit a play to the coordinator's inbox.
    ///
    /// # Errors
    ///
    /// [`GameError::CoordinatorGone`] if the coordinator has stopped.
    pub async fn play(&self, action: Action) -> Result<()> {
        self.plays
            .send(Play {
                player: self.id,
                action,
            })
            .await
            .map_err(|_| GameError::CoordinatorGone)
    }

    /// Answer every turn with `strategy` until the game finishes.
    pub async fn run<S: Strategy>(mut self, mut strategy: S) -> Result<Outcome> {
        while let Some(notification) = self.recv().await {
            strategy.observe(&notification);
            match notification {
                Notification::YourTurn { legal, high_bet } => {
                    let turn = Turn {
                        legal: &legal,
                        high_bet,
                        chips: self.chips(),
                        cards: &self.cards,
                        board: &self.board,
                    };
                    let action = strategy.decide(&turn);
                    log::debug!("{} chooses {action} from {legal}", self.name);
                    self.play(action).await?;
                }
                Notification::Finished(outcome) => return Ok(outcome),
                Notification::Played { .. } | Notification::Board { .. } => {}
            }
        }
        Err(GameError::CoordinatorGone)
    }
}
