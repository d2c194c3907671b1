//! Hand classification.
//!
//! Each player's hole cards plus the board are classified into their best
//! category. Hands of equal category aren't compared against each other,
//! so there's no kicker resolution here.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use super::{
    constants::{ACE, LOW_ACE},
    entities::{Card, Suit, Value},
};

const HAND_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Category {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "a pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "a straight",
            Self::Flush => "a flush",
            Self::FullHouse => "a full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "a straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Best category the cards make.
#[must_use]
pub fn classify(cards: &[Card]) -> Category {
    if let Some(suit) = flush_suit(cards) {
        let suited: Vec<Card> = cards.iter().copied().filter(|c| c.1 == suit).collect();
        if is_straight(&suited) {
            return Category::StraightFlush;
        }
    }

    let (c1, c2) = count_kind(cards);
    match (c1, c2) {
        (4, _) => return Category::FourOfAKind,
        (3, c2) if c2 >= 2 => return Category::FullHouse,
        _ => {}
    }

    if is_flush(cards) {
        return Category::Flush;
    }
    if is_straight(cards) {
        return Category::Straight;
    }

    match (c1, c2) {
        (3, _) => Category::ThreeOfAKind,
        (2, 2) => Category::TwoPair,
        (2, _) => Category::OnePair,
        _ => Category::HighCard,
    }
}

/// Whether five of the cards share a suit.
#[must_use]
pub fn is_flush(cards: &[Card]) -> bool {
    flush_suit(cards).is_some()
}

/// Sort by suit weight, then scan every run of five for a single suit.
/// Scanning each window covers both the ascending and the descending end
/// of the suit order, as well as a flush in the middle of it.
fn flush_suit(cards: &[Card]) -> Option<Suit> {
    let mut hand = cards.to_vec();
    hand.sort_by(|a, b| b.1.weight().cmp(&a.1.weight()).then(b.0.cmp(&a.0)));
    hand.windows(HAND_SIZE)
        .find(|window| window.iter().all(|c| c.1 == window[0].1))
        .map(|window| window[0].1)
}

/// Whether the cards hold five consecutive values. An ace also plays low
/// to make the wheel (A-2-3-4-5).
#[must_use]
pub fn is_straight(cards: &[Card]) -> bool {
    let mut values: Vec<Value> = cards.iter().map(|c| c.0).collect();
    if values.contains(&ACE) {
        values.push(LOW_ACE);
    }
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();

    values
        .windows(HAND_SIZE)
        .any(|window| window.windows(2).all(|pair| pair[0] - pair[1] == 1))
}

/// Sizes of the two largest groups of equal values, largest first.
#[must_use]
pub fn count_kind(cards: &[Card]) -> (usize, usize) {
    let mut counts: BTreeMap<Value, usize> = BTreeMap::new();
    for card in cards {
        *counts.entry(card.0).or_default() += 1;
    }

    let mut groups: Vec<usize> = counts.into_values().collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let c1 = groups.first().copied().unwrap_or(0);
    let c2 = groups.get(1).copied().unwrap_or(0);
    (c1, c2)
}
