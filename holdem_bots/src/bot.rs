//! Random bot decision-making.

use holdem::{Action, ActionKind, Notification, Strategy, Turn};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IteratorRandom};

/// Chips put in by any bet, call or raise that isn't an all-in.
pub const DEFAULT_WAGER: u32 = 15;

/// Bot that picks uniformly among the legal actions.
///
/// The amount is a flat wager except on all-in, where the whole stack goes
/// in. The coordinator tops up or clamps whatever the bot asks for.
pub struct RandomBot {
    name: String,
    wager: u32,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(name: &str, wager: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            name: name.to_string(),
            wager,
            rng,
        }
    }
}

impl Strategy for RandomBot {
    fn decide(&mut self, turn: &Turn<'_>) -> Action {
        let kind = turn
            .legal
            .iter()
            .choose(&mut self.rng)
            .unwrap_or(ActionKind::Fold);
        let action = match kind {
            ActionKind::Fold => Action::Fold,
            ActionKind::AllIn => Action::AllIn(turn.chips),
            ActionKind::Check => Action::Check,
            ActionKind::Bet => Action::Bet(self.wager),
            ActionKind::Call => Action::Call(self.wager),
            ActionKind::Raise => Action::Raise(self.wager),
        };
        log::info!(
            "{}: holding {}{}, {} chips, choosing {action} from {}",
            self.name,
            turn.cards[0],
            turn.cards[1],
            turn.chips,
            turn.legal
        );
        action
    }

    fn observe(&mut self, notification: &Notification) {
        match notification {
            Notification::Played { player, action } => {
                log::info!("{}: {player} played {action}", self.name);
            }
            Notification::Board { round, cards } => {
                let board: Vec<String> = cards.iter().map(ToString::to_string).collect();
                log::info!("{}: round {round} board{}", self.name, board.join(""));
            }
            Notification::YourTurn { .. } | Notification::Finished(_) => {}
        }
    }
}
