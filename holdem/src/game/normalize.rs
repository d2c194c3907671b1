//! Turns whatever a player submitted into the canonical action and
//! moves the chips it costs.
//!
//! Submissions are never rejected. Oversized amounts are clamped to the
//! player's stack, an under-call is topped up to the high bet, and checking
//! while facing a bet becomes a fold.

use log::debug;

use super::entities::{Action, BettingRound, Seat, SeatIndex};

/// Normalize `action` for the seat at `seat_idx` against the current round,
/// updating the seat's chips, the round pot, the high bet, and the bidder.
///
/// Returns the action as it was actually taken.
pub fn adjust_play(
    seat: &mut Seat,
    seat_idx: SeatIndex,
    round: &mut BettingRound,
    action: Action,
) -> Action {
    match action {
        Action::Fold => return fold(seat),
        Action::Check if round.high_bet > 0 => return fold(seat),
        Action::Check => return Action::Check,
        Action::Bet(_) | Action::Raise(_) | Action::Call(_) | Action::AllIn(_) => {}
    }

    let mut amount = action.amount().min(seat.chips);
    if amount == 0 {
        if round.high_bet > 0 {
            return fold(seat);
        }
        return Action::Check;
    }

    if amount < round.high_bet {
        debug!(
            "{}: under-call of ${amount} topped up against ${}",
            seat.name, round.high_bet
        );
        amount = round.high_bet.min(seat.chips);
    }

    let normalized = if amount == seat.chips {
        Action::AllIn(amount)
    } else if amount == round.high_bet {
        Action::Call(amount)
    } else if round.high_bet == 0 {
        Action::Bet(amount)
    } else {
        Action::Raise(amount)
    };

    if amount > round.high_bet {
        round.high_bet = amount;
        round.bidder = seat_idx;
    }
    seat.chips -= amount;
    round.pot += amount;

    normalized
}

fn fold(seat: &mut Seat) -> Action {
    seat.folded = true;
    Action::Fold
}
