use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{self},
};
use uuid::Uuid;

use super::{
    constants::{DECK_SIZE, SUITS, VALUES},
    errors::{GameError, Result},
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Spade,
    Club,
    Diamond,
    Heart,
}

impl Suit {
    /// Ordering weight used when a hand is sorted by suit.
    #[must_use]
    pub fn weight(self) -> u8 {
        match self {
            Self::Spade => 0,
            Self::Club => 1,
            Self::Diamond => 2,
            Self::Heart => 3,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a value (2u8 ... ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            1 | 14 => "A",
            11 => "J",
            12 => "Q",
            13 => "K",
            v => &v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

/// An ordered pile of unique cards. Cards are dealt from the end.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Fresh, unshuffled 52 card deck.
    #[must_use]
    pub fn standard() -> Self {
        let cards = SUITS
            .into_iter()
            .flat_map(|suit| VALUES.map(|value| Card(value, suit)))
            .collect();
        Self { cards }
    }

    /// Standard deck put through one uniform permutation drawn from `rng`.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    /// A stacked deck. The last card of `cards` is the first one dealt.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn deal(&mut self) -> Result<Card> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn burn(&mut self) -> Result<()> {
        self.deal().map(|_| ())
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn dealt(&self) -> usize {
        DECK_SIZE.saturating_sub(self.cards.len())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

/// Type alias for whole chips. Bets and stacks can't go negative, so
/// a malformed negative submission can't even be expressed.
pub type Chips = u32;

/// Type alias for seat positions during the game.
pub type SeatIndex = usize;

/// Opaque player identity handed out at registration.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self.0.simple().to_string();
        write!(f, "{}", &repr[..8])
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Action {
    Bet(Chips),
    Check,
    Fold,
    Raise(Chips),
    Call(Chips),
    AllIn(Chips),
}

impl Action {
    /// Chips carried by the action. Checks and folds carry none.
    #[must_use]
    pub fn amount(&self) -> Chips {
        match self {
            Self::Bet(amount) | Self::Raise(amount) | Self::Call(amount) | Self::AllIn(amount) => {
                *amount
            }
            Self::Check | Self::Fold => 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Bet(_) => ActionKind::Bet,
            Self::Check => ActionKind::Check,
            Self::Fold => ActionKind::Fold,
            Self::Raise(_) => ActionKind::Raise,
            Self::Call(_) => ActionKind::Call,
            Self::AllIn(_) => ActionKind::AllIn,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Bet(amount) => format!("bets ${amount}"),
            Self::Check => "checks".to_string(),
            Self::Fold => "folds".to_string(),
            Self::Raise(amount) => format!("raises ${amount}"),
            Self::Call(amount) => format!("calls ${amount}"),
            Self::AllIn(amount) => format!("goes all-in for ${amount}"),
        };
        write!(f, "{repr}")
    }
}

/// Action without an amount, as offered in a set of legal actions.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ActionKind {
    Fold,
    AllIn,
    Check,
    Bet,
    Call,
    Raise,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "fold",
            Self::AllIn => "all-in",
            Self::Check => "check",
            Self::Bet => "bet",
            Self::Call => "call",
            Self::Raise => "raise",
        };
        write!(f, "{repr}")
    }
}

/// Set of actions a player is offered on their turn. An empty set means
/// the notification is informational only.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ActionChoices(pub BTreeSet<ActionKind>);

impl ActionChoices {
    #[must_use]
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.0.contains(&kind)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.0.iter().copied()
    }
}

/// Reads as "a", "a or b", or "a, b, or c". The backing `BTreeSet` keeps
/// the kinds in declaration order (fold, all-in, check, bet, call, raise),
/// so the same set always prints the same way whatever order it was built in.
impl fmt::Display for ActionChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.len().saturating_sub(1);
        for (i, kind) in self.iter().enumerate() {
            match i {
                0 => {}
                1 if last == 1 => f.write_str(" or ")?,
                i if i == last => f.write_str(", or ")?,
                _ => f.write_str(", ")?,
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

impl<I> From<I> for ActionChoices
where
    I: IntoIterator<Item = ActionKind>,
{
    fn from(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A player at the table as the coordinator sees them. Chips and the
/// folded flag are only ever written by the coordinator.
#[derive(Clone, Debug)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub cards: [Card; 2],
    pub chips: Chips,
    pub folded: bool,
}

impl Seat {
    #[must_use]
    pub fn new(id: PlayerId, name: String, cards: [Card; 2], chips: Chips) -> Self {
        Self {
            id,
            name,
            cards,
            chips,
            folded: false,
        }
    }

    /// Whether the seat can still be asked to act.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.folded && self.chips > 0
    }

    #[must_use]
    pub fn status(&self) -> SeatStatus {
        SeatStatus {
            chips: self.chips,
            folded: self.folded,
        }
    }
}

/// Read-only snapshot of a seat's finances published to its player.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeatStatus {
    pub chips: Chips,
    pub folded: bool,
}

/// Per-round betting state. Discarded once merged into the table pot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BettingRound {
    pub high_bet: Chips,
    pub pot: Chips,
    pub dealer: SeatIndex,
    /// Seat that last bet or raised. The round closes when action gets
    /// back here without another raise.
    pub bidder: SeatIndex,
}

impl BettingRound {
    #[must_use]
    pub fn new(dealer: SeatIndex, bidder: SeatIndex) -> Self {
        Self {
            high_bet: 0,
            pot: 0,
            dealer,
            bidder,
        }
    }
}
