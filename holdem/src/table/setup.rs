//! Registration and startup.

use super::{
    actor::{Coordinator, SeatLink},
    config::GameConfig,
    player::PlayerHandle,
};
use crate::game::{
    entities::{Deck, PlayerId},
    errors::{GameError, Result},
    state_machine::{GameState, Outcome},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashMap;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

/// A table collecting registrations before the game starts.
///
/// The deck is shuffled when the table is built, so every source of
/// randomness is fixed before the first player sits down.
#[derive(Debug)]
pub struct Table {
    config: GameConfig,
    deck: Deck,
    players: Vec<(PlayerId, String)>,
}

impl Table {
    /// Table with a deck shuffled by the thread-local RNG.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::rng())
    }

    /// Table with a deck shuffled by `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        Self::with_deck(config, Deck::shuffled(rng))
    }

    /// Reproducible table: the same seed always deals the same cards.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    /// Table dealing from a prepared deck.
    pub fn with_deck(config: GameConfig, deck: Deck) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            deck,
            players: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of registered players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Register a player. Seats follow registration order, the first player
    /// registered holds the dealer button.
    pub fn register(&mut self, name: impl Into<String>) -> Result<PlayerId> {
        if self.players.len() >= self.config.max_players {
            return Err(GameError::TableFull {
                max: self.config.max_players,
            });
        }

        let id = PlayerId::generate();
        let name = name.into();
        log::debug!("Registered {name} as {id}");
        self.players.push((id, name));
        Ok(id)
    }

    /// Deal and wire up the channels without spawning anything.
    ///
    /// # Errors
    ///
    /// [`GameError::NoPlayers`] if nobody registered.
    pub fn prepare(self) -> Result<(Coordinator, Vec<PlayerHandle>)> {
        let Self {
            config,
            deck,
            players,
        } = self;

        let state = GameState::deal(deck, players, config.starting_chips)?;
        let (plays, inbox) = mpsc::channel(config.inbox_capacity);

        let mut links = HashMap::with_capacity(state.seats().len());
        let mut handles = Vec::with_capacity(state.seats().len());
        for seat in state.seats() {
            let (outbox, notifications) = mpsc::channel(config.outbox_capacity);
            let (status, status_rx) = watch::channel(seat.status());
            links.insert(seat.id, SeatLink { outbox, status });
            handles.push(PlayerHandle::new(
                seat.id,
                seat.name.clone(),
                seat.cards,
                notifications,
                plays.clone(),
                status_rx,
            ));
        }

        Ok((Coordinator::new(state, inbox, links), handles))
    }

    /// Deal and spawn the coordinator on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// [`GameError::NoPlayers`] if nobody registered. Nothing is spawned.
    pub fn start(self) -> Result<Game> {
        let (coordinator, players) = self.prepare()?;
        let coordinator = tokio::spawn(coordinator.run());
        Ok(Game {
            players,
            coordinator,
        })
    }
}

/// A running game.
#[derive(Debug)]
pub struct Game {
    /// One handle per registered player, in seat order
    pub players: Vec<PlayerHandle>,

    /// The coordinator task
    pub coordinator: JoinHandle<Result<Outcome>>,
}

impl Game {
    /// Wait for the coordinator to finish.
    ///
    /// # Errors
    ///
    /// Whatever ended the game early, or [`GameError::Aborted`] if the task
    /// panicked or was cancelled.
    pub async fn finish(self) -> Result<Outcome> {
        self.coordinator
            .await
            .map_err(|e| GameError::Aborted(e.to_string()))?
    }
}
