use super::entities::{Chips, Suit, Value};

pub const SUITS: [Suit; 4] = [Suit::Diamond, Suit::Spade, Suit::Heart, Suit::Club];
pub const VALUES: [Value; 13] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14];
pub const DECK_SIZE: usize = SUITS.len() * VALUES.len();

pub const ACE: Value = 14;
/// Value an ace takes when it completes the wheel (A-2-3-4-5).
pub const LOW_ACE: Value = 1;

/// Preflop, flop, turn, and river.
pub const BETTING_ROUNDS: usize = 4;
pub const FLOP_SIZE: usize = 3;
pub const MAX_BOARD_SIZE: usize = 5;
pub const HOLE_CARDS: usize = 2;

pub const DEFAULT_STARTING_CHIPS: Chips = 50;

/// Two hole cards each, three burns and five board cards must fit in
/// one deck.
pub const MAX_PLAYERS: usize = (DECK_SIZE - (BETTING_ROUNDS - 1) - MAX_BOARD_SIZE) / HOLE_CARDS;
