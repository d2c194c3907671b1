//! Coordinator actor driving one game to completion.

use super::messages::{Notification, Play};
use crate::game::{
    entities::{PlayerId, SeatStatus},
    errors::{GameError, Result},
    state_machine::{GameState, Outcome, Step},
};
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};

/// Coordinator side of one player's channels.
#[derive(Debug)]
pub(crate) struct SeatLink {
    /// Private notification channel
    pub(crate) outbox: mpsc::Sender<Notification>,

    /// Chips and folded snapshot, written only by the coordinator
    pub(crate) status: watch::Sender<SeatStatus>,
}

/// Single writer of the game state.
///
/// Plays arrive on one shared inbox and are processed strictly one at a
/// time. Notifications produced by a play are delivered in order, each send
/// awaited before the next, so a broadcast always lands before the next
/// player is asked to act.
pub struct Coordinator {
    /// Game state (FSM)
    state: GameState,

    /// Shared inbox for every player's plays
    inbox: mpsc::Receiver<Play>,

    /// Player ID to channels mapping
    links: HashMap<PlayerId, SeatLink>,
}

impl Coordinator {
    pub(crate) fn new(
        state: GameState,
        inbox: mpsc::Receiver<Play>,
        links: HashMap<PlayerId, SeatLink>,
    ) -> Self {
        Self {
            state,
            inbox,
            links,
        }
    }

    /// Game state as the coordinator currently sees it
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run the coordinator event loop until the game ends.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Abandoned`] if every player handle is dropped
    /// before the game finishes, or the fatal error that aborted it.
    pub async fn run(mut self) -> Result<Outcome> {
        log::info!(
            "Coordinator starting with {} players, {} chips in play",
            self.state.seats().len(),
            self.state.total_chips()
        );

        let step = self.state.open();
        if let Some(outcome) = self.handle(step).await? {
            return Ok(outcome);
        }

        while let Some(play) = self.inbox.recv().await {
            log::debug!("Received {} from {}", play.action, play.player);
            let step = self.state.apply(play);
            if let Some(outcome) = self.handle(step).await? {
                return Ok(outcome);
            }
        }

        log::error!(
            "Inbox closed during {} (round {}), abandoning game",
            self.state.phase(),
            self.state.round_number()
        );
        Err(GameError::Abandoned)
    }

    /// Publish statuses and deliver the step's notifications.
    async fn handle(&mut self, step: Result<Step>) -> Result<Option<Outcome>> {
        let step = step.inspect_err(|e| log::error!("Aborting game: {e}"))?;
        if step.is_empty() {
            return Ok(None);
        }

        self.publish();
        for dispatch in step.dispatches {
            let Some(link) = self.links.get(&dispatch.to) else {
                log::error!("No channel for {}", dispatch.to);
                return Err(GameError::PlayerNotFound(dispatch.to));
            };
            if link.outbox.send(dispatch.notification).await.is_err() {
                log::warn!("Player {} disconnected, dropping notification", dispatch.to);
            }
        }

        if let Some(outcome) = &step.outcome {
            log::info!(
                "Game finished, {} chips to {}",
                outcome.pot(),
                outcome
                    .winners()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(step.outcome)
    }

    /// Refresh every seat's chips and folded snapshot.
    fn publish(&self) {
        for seat in self.state.seats() {
            if let Some(link) = self.links.get(&seat.id) {
                link.status.send_if_modified(|status| {
                    let fresh = seat.status();
                    let changed = *status != fresh;
                    *status = fresh;
                    changed
                });
            }
        }
    }
}
