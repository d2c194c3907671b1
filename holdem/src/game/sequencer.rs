//! Turn order, round closure, and legal action sets.

use super::entities::{ActionChoices, ActionKind, Chips, Seat, SeatIndex};

/// Nearest seat after `from` that can still act (not folded, chips left),
/// wrapping around the table. Returns `from` when nobody else can act.
pub fn next_eligible(seats: &[Seat], from: SeatIndex) -> SeatIndex {
    let n = seats.len();
    (1..n)
        .map(|offset| (from + offset) % n)
        .find(|&idx| seats[idx].is_eligible())
        .unwrap_or(from)
}

/// Number of seats that haven't folded.
pub fn remaining(seats: &[Seat]) -> usize {
    seats.iter().filter(|seat| !seat.folded).count()
}

/// Number of seats that can still be asked to act.
pub fn eligible(seats: &[Seat]) -> usize {
    seats.iter().filter(|seat| seat.is_eligible()).count()
}

/// Whether advancing the action from `from` to `to` brings it back to the
/// bidder, closing the round.
///
/// Landing on the bidder is the usual case. Passing over the bidder's seat
/// also closes the round, since a bidder who has folded or gone all-in is
/// skipped by [`next_eligible`]. `to == from` means nobody else can act.
pub fn closes_round(from: SeatIndex, to: SeatIndex, bidder: SeatIndex, num_seats: usize) -> bool {
    if to == bidder || to == from {
        return true;
    }
    let distance = |idx: SeatIndex| (idx + num_seats - from) % num_seats;
    let bidder_distance = distance(bidder);
    bidder_distance != 0 && bidder_distance < distance(to)
}

/// Actions offered to a player holding `chips` while facing `high_bet`.
pub fn legal_actions(chips: Chips, high_bet: Chips) -> ActionChoices {
    let mut choices = ActionChoices::from([ActionKind::Fold, ActionKind::AllIn]);
    if high_bet == 0 {
        choices.0.insert(ActionKind::Check);
    } else if chips > high_bet {
        choices.0.insert(ActionKind::Call);
        choices.0.insert(ActionKind::Raise);
    }
    choices
}

/// Actions offered to whoever opens a betting round.
pub fn opening_actions() -> ActionChoices {
    ActionChoices::from([
        ActionKind::Fold,
        ActionKind::AllIn,
        ActionKind::Check,
        ActionKind::Bet,
    ])
}
