//! Property-based tests for whole games and their building blocks.
//!
//! Games are driven with arbitrary submissions, including nonsense amounts
//! and plays from players who aren't being asked, and the coordinator has to
//! keep its books straight regardless.

use holdem::{
    Action, Card, Category, Deck, GameState, Notification, Outcome, PlayerId, Play, Suit,
    entities::{BettingRound, Seat},
    game::{
        Phase,
        evaluator::{classify, count_kind, is_flush, is_straight},
        normalize::adjust_play,
    },
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeSet;

const STARTING_CHIPS: u32 = 50;

// Strategy to generate any submission, amounts well past a full stack
fn action_strategy() -> impl Strategy<Value = Action> {
    (0u8..6, 0u32..80).prop_map(|(kind, amount)| match kind {
        0 => Action::Bet(amount),
        1 => Action::Check,
        2 => Action::Fold,
        3 => Action::Raise(amount),
        4 => Action::Call(amount),
        _ => Action::AllIn(amount),
    })
}

// Strategy to generate a valid card (values 2-14, aces high)
fn card_strategy() -> impl Strategy<Value = Card> {
    (2u8..=14, 0u8..=3).prop_map(|(value, suit_idx)| {
        let suit = match suit_idx {
            0 => Suit::Spade,
            1 => Suit::Club,
            2 => Suit::Diamond,
            _ => Suit::Heart,
        };
        Card(value, suit)
    })
}

// Strategy to generate 7 unique cards (2 hole + 5 board)
fn seven_card_hand_strategy() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), 7).prop_filter("Cards must be unique", |cards| {
        let set: BTreeSet<_> = cards.iter().collect();
        set.len() == cards.len()
    })
}

fn deal(n: usize, seed: u64) -> GameState {
    let players = (0..n)
        .map(|i| (PlayerId::generate(), format!("player{i}")))
        .collect();
    let deck = Deck::shuffled(&mut StdRng::seed_from_u64(seed));
    GameState::deal(deck, players, STARTING_CHIPS).unwrap()
}

fn expected_board(round_number: usize) -> usize {
    match round_number {
        0 => 0,
        1 => 3,
        2 => 4,
        _ => 5,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_random_games_conserve_chips_and_respect_turns(
        n in 2usize..=6,
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 1..64),
        strays in prop::collection::vec(any::<prop::sample::Index>(), 64),
    ) {
        let mut game = deal(n, seed);
        let total = u64::from(STARTING_CHIPS) * n as u64;
        let mut step = game.open().unwrap();
        let mut board = 0;

        for i in 0..2_000 {
            prop_assert_eq!(game.total_chips(), total);

            // Broadcasts first, at most one turn request, and it goes last
            // to the seat that's actually up.
            let turns: Vec<usize> = step
                .dispatches
                .iter()
                .enumerate()
                .filter(|(_, d)| d.notification.expects_reply())
                .map(|(pos, _)| pos)
                .collect();
            prop_assert!(turns.len() <= 1);
            if let Some(&pos) = turns.first() {
                prop_assert_eq!(pos, step.dispatches.len() - 1);
                let idx = game.to_act().unwrap();
                let seat = &game.seats()[idx];
                prop_assert_eq!(step.dispatches[pos].to, seat.id);
                prop_assert!(!seat.folded);
                prop_assert!(seat.chips > 0);
            }

            // Community cards only grow, by the flop then one at a time.
            let len = game.board().len();
            prop_assert!(len >= board);
            prop_assert!(len <= 5);
            prop_assert!(matches!(len, 0 | 3 | 4 | 5));
            board = len;

            let Some(idx) = game.to_act() else {
                break;
            };

            // Every so often someone who isn't up tries to play.
            let stray = strays[i % strays.len()].index(n);
            if stray != idx {
                let before = game.total_chips();
                let player = game.seats()[stray].id;
                let discarded = game
                    .apply(Play { player, action: Action::AllIn(50) })
                    .unwrap();
                prop_assert!(discarded.is_empty());
                prop_assert_eq!(game.total_chips(), before);
            }

            let player = game.seats()[idx].id;
            let action = actions[i % actions.len()];
            step = game.apply(Play { player, action }).unwrap();
        }

        prop_assert_eq!(game.phase(), Phase::Terminal);
        prop_assert_eq!(game.pot(), 0);
        prop_assert_eq!(game.round_pot(), 0);
        let stacks: u64 = game.seats().iter().map(|s| u64::from(s.chips)).sum();
        prop_assert_eq!(stacks, total);

        let outcome = game.outcome().unwrap();
        prop_assert!(!outcome.winners().is_empty());
        if matches!(outcome, Outcome::Showdown { .. }) {
            prop_assert_eq!(game.board().len(), 5);
        }
    }

    #[test]
    fn test_board_matches_round_number(
        seed in any::<u64>(),
        bets in prop::collection::vec(0u32..20, 1..16),
    ) {
        let mut game = deal(3, seed);
        game.open().unwrap();

        let mut i = 0;
        while let Some(idx) = game.to_act() {
            let player = game.seats()[idx].id;
            // Small bets, then calls of whatever's outstanding.
            let action = if game.high_bet() == 0 {
                Action::Bet(bets[i % bets.len()])
            } else {
                Action::Call(game.high_bet())
            };
            let step = game.apply(Play { player, action }).unwrap();
            if game.phase() != Phase::Terminal {
                prop_assert_eq!(game.board().len(), expected_board(game.round_number()));
            }
            for dispatch in &step.dispatches {
                if let Notification::Board { round, cards } = &dispatch.notification {
                    prop_assert_eq!(cards.len(), expected_board(*round));
                }
            }
            i += 1;
            prop_assert!(i < 200);
        }
    }

    #[test]
    fn test_all_in_normalizes_deterministically(
        chips in 1u32..200,
        high_bet in 0u32..200,
        amount in 0u32..400,
    ) {
        let run = || {
            let cards = [Card(2, Suit::Club), Card(9, Suit::Heart)];
            let mut seat = Seat::new(PlayerId::generate(), "alice".to_string(), cards, chips);
            let mut round = BettingRound { high_bet, ..BettingRound::new(0, 0) };
            let action = adjust_play(&mut seat, 1, &mut round, Action::AllIn(amount));
            (action, seat.chips, seat.folded, round)
        };

        let (action, left, folded, round) = run();
        prop_assert_eq!(run(), (action, left, folded, round.clone()));

        // Whatever happened, no chips were created or lost.
        prop_assert_eq!(left + round.pot, chips);
        if action == Action::Fold {
            prop_assert!(folded);
            prop_assert_eq!(left, chips);
        } else {
            prop_assert!(action.amount() <= chips);
        }
        if amount >= chips {
            prop_assert_eq!(action, Action::AllIn(chips));
            prop_assert_eq!(left, 0);
        }
    }

    #[test]
    fn test_oversized_submissions_clamp_to_stack(
        chips in 1u32..100,
        extra in 1u32..100,
    ) {
        let cards = [Card(2, Suit::Club), Card(9, Suit::Heart)];
        let mut seat = Seat::new(PlayerId::generate(), "bob".to_string(), cards, chips);
        let mut round = BettingRound::new(0, 0);
        let action = adjust_play(&mut seat, 1, &mut round, Action::Bet(chips + extra));
        prop_assert_eq!(action, Action::AllIn(chips));
        prop_assert_eq!(round.high_bet, chips);
        prop_assert_eq!(round.bidder, 1);
    }

    #[test]
    fn test_classify_deterministic_and_order_independent(cards in seven_card_hand_strategy()) {
        let category = classify(&cards);
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(classify(&reversed), category);
    }

    #[test]
    fn test_classify_agrees_with_detectors(cards in seven_card_hand_strategy()) {
        let category = classify(&cards);
        let (c1, c2) = count_kind(&cards);

        if is_flush(&cards) {
            prop_assert!(category >= Category::Flush);
        }
        if is_straight(&cards) {
            prop_assert!(category >= Category::Straight);
        }
        if c1 == 4 {
            prop_assert!(category >= Category::FourOfAKind);
        }
        if c1 == 3 && c2 >= 2 {
            prop_assert!(category >= Category::FullHouse);
        }
        if c1 >= 2 {
            prop_assert!(category >= Category::OnePair);
        }
        if category == Category::HighCard {
            prop_assert_eq!(c1, 1);
            prop_assert!(!is_flush(&cards));
            prop_assert!(!is_straight(&cards));
        }
    }
}
