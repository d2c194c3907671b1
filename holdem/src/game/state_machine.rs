//! Coordinator state machine.
//!
//! [`GameState`] owns every piece of mutable game state: the deck, the
//! board, the seats' chips and folded flags, the table pot, and the current
//! betting round. It consumes one [`Play`] at a time and answers with the
//! notifications to deliver, in order. The async coordinator in
//! [`crate::table`] is its only caller during a game.

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    constants::{BETTING_ROUNDS, FLOP_SIZE},
    entities::{
        Action, ActionChoices, BettingRound, Card, Chips, Deck, PlayerId, Seat, SeatIndex,
    },
    errors::{GameError, Result},
    evaluator::{Category, classify},
    normalize::adjust_play,
    sequencer::{closes_round, eligible, legal_actions, next_eligible, opening_actions, remaining},
};
use crate::table::messages::{Notification, Play};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    AwaitingFirstAction,
    AwaitingPlayerResponse,
    Processing,
    RoundBoundary,
    Showdown,
    Terminal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::AwaitingFirstAction => "awaiting first action",
            Self::AwaitingPlayerResponse => "awaiting player response",
            Self::Processing => "processing",
            Self::RoundBoundary => "round boundary",
            Self::Showdown => "showdown",
            Self::Terminal => "terminal",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShowdownHand {
    pub player: PlayerId,
    pub category: Category,
}

/// How a game ended.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Outcome {
    /// Everybody else folded.
    WonByDefault {
        winner: PlayerId,
        pot: Chips,
        round: usize,
    },
    /// Hands were classified after the river. The pot is split between
    /// the holders of the best category.
    Showdown {
        hands: Vec<ShowdownHand>,
        winners: Vec<PlayerId>,
        pot: Chips,
    },
}

impl Outcome {
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            Self::WonByDefault { winner, .. } => vec![*winner],
            Self::Showdown { winners, .. } => winners.clone(),
        }
    }

    #[must_use]
    pub fn pot(&self) -> Chips {
        match self {
            Self::WonByDefault { pot, .. } | Self::Showdown { pot, .. } => *pot,
        }
    }
}

/// A notification addressed to one player.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatch {
    pub to: PlayerId,
    pub notification: Notification,
}

/// Everything that came out of processing one message.
#[derive(Debug, Default)]
pub struct Step {
    /// Notifications in the order they must be delivered.
    pub dispatches: Vec<Dispatch>,
    /// Set once the game reaches its terminal state.
    pub outcome: Option<Outcome>,
}

impl Step {
    fn send(&mut self, to: PlayerId, notification: Notification) {
        self.dispatches.push(Dispatch { to, notification });
    }

    /// Whether the message was discarded without effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty() && self.outcome.is_none()
    }
}

#[derive(Debug)]
pub struct GameState {
    deck: Deck,
    board: Vec<Card>,
    seats: Vec<Seat>,
    pot: Chips,
    round_number: usize,
    round: BettingRound,
    phase: Phase,
    to_act: Option<SeatIndex>,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Seat the players in registration order and deal them two hole cards
    /// each, one card per pass.
    pub fn deal(
        mut deck: Deck,
        players: Vec<(PlayerId, String)>,
        starting_chips: Chips,
    ) -> Result<Self> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if u64::from(starting_chips) * players.len() as u64 > u64::from(Chips::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "{} stacks of {starting_chips} chips overflow the pot",
                players.len()
            )));
        }

        let mut first = Vec::with_capacity(players.len());
        for _ in &players {
            first.push(deck.deal()?);
        }
        let mut seats = Vec::with_capacity(players.len());
        for ((id, name), first) in players.into_iter().zip(first) {
            let cards = [first, deck.deal()?];
            seats.push(Seat::new(id, name, cards, starting_chips));
        }

        Ok(Self {
            deck,
            board: Vec::new(),
            seats,
            pot: 0,
            round_number: 0,
            round: BettingRound::default(),
            phase: Phase::AwaitingFirstAction,
            to_act: None,
            outcome: None,
        })
    }

    /// Open the first betting round by asking the seat after the dealer to
    /// act.
    pub fn open(&mut self) -> Result<Step> {
        let mut step = Step::default();
        if self.phase != Phase::AwaitingFirstAction {
            warn!("game already opened ({})", self.phase);
            return Ok(step);
        }

        let dealer = 0;
        let bidder = next_eligible(&self.seats, dealer);
        self.round = BettingRound::new(dealer, bidder);
        info!(
            "opening game with {} players, {} to act",
            self.seats.len(),
            self.seats[bidder].name
        );

        if remaining(&self.seats) < 2 {
            self.win_by_default(bidder, &mut step);
            return Ok(step);
        }

        self.ask(bidder, opening_actions(), &mut step);
        Ok(step)
    }

    /// Process one play from the shared inbox.
    ///
    /// Plays from folded players, or from anyone who isn't being asked to
    /// act, are discarded and produce an empty step. A play from an identity
    /// that isn't seated is an invariant breach.
    pub fn apply(&mut self, play: Play) -> Result<Step> {
        let mut step = Step::default();
        let idx = self
            .position(&play.player)
            .ok_or(GameError::PlayerNotFound(play.player))?;

        if self.phase != Phase::AwaitingPlayerResponse {
            warn!(
                "{}: play arrived while {}, ignoring",
                self.seats[idx].name, self.phase
            );
            return Ok(step);
        }
        if self.seats[idx].folded {
            warn!("{}: folded player tried to play, ignoring", self.seats[idx].name);
            return Ok(step);
        }
        if self.to_act != Some(idx) {
            warn!("{}: not their turn, ignoring", self.seats[idx].name);
            return Ok(step);
        }

        self.set_phase(Phase::Processing);
        self.to_act = None;
        let action = adjust_play(&mut self.seats[idx], idx, &mut self.round, play.action);
        debug!(
            "{} {action} (submitted {:?}), round pot ${}, high bet ${}",
            self.seats[idx].name, play.action, self.round.pot, self.round.high_bet
        );

        if action == Action::Fold
            && let Some(winner) = self.sole_survivor()
        {
            self.win_by_default(winner, &mut step);
            return Ok(step);
        }

        let player = self.seats[idx].id;
        for (i, seat) in self.seats.iter().enumerate() {
            if i != idx && !seat.folded {
                step.send(seat.id, Notification::Played { player, action });
            }
        }

        let next = next_eligible(&self.seats, idx);
        if closes_round(idx, next, self.round.bidder, self.seats.len()) {
            debug!(
                "action back to {}, round {} closes",
                self.seats[self.round.bidder].name, self.round_number
            );
            self.end_round(&mut step)?;
        } else {
            let legal = legal_actions(self.seats[next].chips, self.round.high_bet);
            self.ask(next, legal, &mut step);
        }

        Ok(step)
    }

    fn ask(&mut self, idx: SeatIndex, legal: ActionChoices, step: &mut Step) {
        debug!("{} to act: {legal}", self.seats[idx].name);
        self.to_act = Some(idx);
        self.set_phase(Phase::AwaitingPlayerResponse);
        step.send(
            self.seats[idx].id,
            Notification::YourTurn {
                legal,
                high_bet: self.round.high_bet,
            },
        );
    }

    fn end_round(&mut self, step: &mut Step) -> Result<()> {
        self.set_phase(Phase::RoundBoundary);
        loop {
            let dealer = next_eligible(&self.seats, self.round.dealer);
            self.pot += self.round.pot;
            let bidder = next_eligible(&self.seats, dealer);
            self.round = BettingRound::new(dealer, bidder);
            self.round_number += 1;

            if self.round_number >= BETTING_ROUNDS {
                return self.showdown(step);
            }

            self.deal_street()?;
            info!(
                "round {}: board {:?}, pot ${}",
                self.round_number, self.board, self.pot
            );
            for seat in self.seats.iter().filter(|seat| !seat.folded) {
                step.send(
                    seat.id,
                    Notification::Board {
                        round: self.round_number,
                        cards: self.board.clone(),
                    },
                );
            }

            if eligible(&self.seats) >= 2 {
                self.ask(bidder, opening_actions(), step);
                return Ok(());
            }
            debug!("fewer than two players can bet, dealing on");
        }
    }

    /// Burn one, then reveal three cards for the flop or one for the turn
    /// and river.
    fn deal_street(&mut self) -> Result<()> {
        self.deck.burn()?;
        let count = if self.round_number == 1 { FLOP_SIZE } else { 1 };
        for _ in 0..count {
            let card = self.deck.deal()?;
            self.board.push(card);
        }
        Ok(())
    }

    fn showdown(&mut self, step: &mut Step) -> Result<()> {
        self.set_phase(Phase::Showdown);

        let mut hands = Vec::new();
        for seat in self.seats.iter().filter(|seat| !seat.folded) {
            let mut cards = seat.cards.to_vec();
            cards.extend_from_slice(&self.board);
            let category = classify(&cards);
            info!("{} shows {:?}: {category}", seat.name, cards);
            hands.push(ShowdownHand {
                player: seat.id,
                category,
            });
        }

        let best = hands.iter().map(|hand| hand.category).max();
        let n = self.seats.len();
        let winners: Vec<SeatIndex> = (1..=n)
            .map(|offset| (self.round.dealer + offset) % n)
            .filter(|&idx| {
                let seat = &self.seats[idx];
                !seat.folded && hands.iter().any(|h| h.player == seat.id && Some(h.category) == best)
            })
            .collect();
        if winners.is_empty() {
            return Err(GameError::Aborted("showdown without players".to_string()));
        }

        let pot = self.pot;
        let share = pot / winners.len() as Chips;
        let odd = pot as usize % winners.len();
        for (k, &idx) in winners.iter().enumerate() {
            let extra = Chips::from(k < odd);
            self.seats[idx].chips += share + extra;
        }
        self.pot = 0;

        let outcome = Outcome::Showdown {
            hands,
            winners: winners.iter().map(|&idx| self.seats[idx].id).collect(),
            pot,
        };
        self.finish(outcome, step);
        Ok(())
    }

    fn win_by_default(&mut self, winner: SeatIndex, step: &mut Step) {
        self.pot += self.round.pot;
        self.round.pot = 0;
        let pot = self.pot;
        self.seats[winner].chips += pot;
        self.pot = 0;
        info!(
            "{} wins ${pot} by default in round {}",
            self.seats[winner].name, self.round_number
        );

        let outcome = Outcome::WonByDefault {
            winner: self.seats[winner].id,
            pot,
            round: self.round_number,
        };
        self.finish(outcome, step);
    }

    fn finish(&mut self, outcome: Outcome, step: &mut Step) {
        self.to_act = None;
        self.set_phase(Phase::Terminal);
        for seat in &self.seats {
            step.send(seat.id, Notification::Finished(outcome.clone()));
        }
        step.outcome = Some(outcome.clone());
        self.outcome = Some(outcome);
    }

    /// The only seat left in the hand, once everybody else has folded.
    fn sole_survivor(&self) -> Option<SeatIndex> {
        if remaining(&self.seats) != 1 {
            return None;
        }
        self.seats.iter().position(|seat| !seat.folded)
    }

    fn set_phase(&mut self, phase: Phase) {
        trace!("{} -> {phase}", self.phase);
        self.phase = phase;
    }

    #[must_use]
    pub fn position(&self, player: &PlayerId) -> Option<SeatIndex> {
        self.seats.iter().position(|seat| &seat.id == player)
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Chips merged into the table pot from closed rounds.
    #[must_use]
    pub fn pot(&self) -> Chips {
        self.pot
    }

    #[must_use]
    pub fn round_pot(&self) -> Chips {
        self.round.pot
    }

    #[must_use]
    pub fn high_bet(&self) -> Chips {
        self.round.high_bet
    }

    #[must_use]
    pub fn bidder(&self) -> SeatIndex {
        self.round.bidder
    }

    #[must_use]
    pub fn dealer(&self) -> SeatIndex {
        self.round.dealer
    }

    /// Seat currently being asked to act.
    #[must_use]
    pub fn to_act(&self) -> Option<SeatIndex> {
        self.to_act
    }

    #[must_use]
    pub fn round_number(&self) -> usize {
        self.round_number
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Chips in stacks plus both pots. Constant for the whole game.
    #[must_use]
    pub fn total_chips(&self) -> u64 {
        let stacks: u64 = self.seats.iter().map(|seat| u64::from(seat.chips)).sum();
        stacks + u64::from(self.pot) + u64::from(self.round.pot)
    }
}
