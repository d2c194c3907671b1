//! Hand Classification Example
//!
//! Shows how hole cards and a board are classified at showdown.

use holdem::{
    Card, Suit,
    game::evaluator::{classify, is_flush, is_straight},
};

fn show(label: &str, cards: &[Card]) {
    let repr: Vec<String> = cards.iter().map(ToString::to_string).collect();
    println!("{label}:{}", repr.join(""));
    println!(
        "  {} (flush: {}, straight: {})\n",
        classify(cards),
        is_flush(cards),
        is_straight(cards)
    );
}

fn main() {
    println!("=== Hand Classification Example ===\n");

    let board = [
        Card(12, Suit::Heart),
        Card(11, Suit::Heart),
        Card(10, Suit::Heart),
        Card(5, Suit::Spade),
        Card(4, Suit::Club),
    ];

    let hands = [
        ("alice", [Card(14, Suit::Heart), Card(13, Suit::Heart)]),
        ("bob", [Card(14, Suit::Club), Card(13, Suit::Diamond)]),
        ("carol", [Card(12, Suit::Club), Card(12, Suit::Diamond)]),
        ("dave", [Card(14, Suit::Spade), Card(2, Suit::Diamond)]),
    ];

    for (name, hole) in hands {
        let mut cards = hole.to_vec();
        cards.extend_from_slice(&board);
        show(name, &cards);
    }

    // Equal categories split the pot, there's no kicker comparison.
    let best = hands
        .iter()
        .map(|(name, hole)| {
            let mut cards = hole.to_vec();
            cards.extend_from_slice(&board);
            (classify(&cards), *name)
        })
        .max();
    if let Some((category, name)) = best {
        println!("Best hand: {name} with {category}");
    }
}
