//! End-to-end games through the coordinator task and player handles.

use holdem::{
    Action, ActionKind, Card, GameConfig, GameError, Notification, Outcome, PlayerHandle,
    Strategy, Table, Turn,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{task::JoinHandle, time::timeout};

const DEADLINE: Duration = Duration::from_secs(5);

/// Picks uniformly among the legal actions.
struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomBot {
    fn decide(&mut self, turn: &Turn<'_>) -> Action {
        let legal: Vec<ActionKind> = turn.legal.iter().collect();
        match legal[self.rng.random_range(0..legal.len())] {
            ActionKind::Fold => Action::Fold,
            ActionKind::AllIn => Action::AllIn(turn.chips),
            ActionKind::Check => Action::Check,
            ActionKind::Bet => Action::Bet(15),
            ActionKind::Call => Action::Call(turn.high_bet),
            ActionKind::Raise => Action::Raise(turn.high_bet + 15),
        }
    }
}

/// Always checks, counting what it hears.
struct Listener {
    heard: Arc<AtomicUsize>,
}

impl Strategy for Listener {
    fn decide(&mut self, _turn: &Turn<'_>) -> Action {
        Action::Check
    }

    fn observe(&mut self, _notification: &Notification) {
        self.heard.fetch_add(1, Ordering::SeqCst);
    }
}

fn table(names: &[&str], seed: u64) -> Table {
    let mut table = Table::with_seed(GameConfig::default(), seed).unwrap();
    for name in names {
        table.register(*name).unwrap();
    }
    table
}

type PlayerTask = JoinHandle<holdem::Result<Outcome>>;

fn spawn_all<S>(players: Vec<PlayerHandle>, strategy: impl Fn(usize) -> S) -> Vec<PlayerTask>
where
    S: Strategy + 'static,
{
    players
        .into_iter()
        .enumerate()
        .map(|(i, player)| tokio::spawn(player.run(strategy(i))))
        .collect()
}

// ============================================================================
// Complete games
// ============================================================================

#[tokio::test]
async fn test_checked_down_game_ends_in_showdown() {
    let mut game = table(&["alice", "bob", "carol"], 1).start().unwrap();
    let players = spawn_all(game.players.drain(..).collect(), |_| {
        |_: &Turn<'_>| Action::Check
    });

    let outcome = timeout(DEADLINE, game.finish()).await.unwrap().unwrap();
    match &outcome {
        Outcome::Showdown { hands, winners, pot } => {
            assert_eq!(hands.len(), 3);
            assert!(!winners.is_empty());
            assert_eq!(*pot, 0);
        }
        other => panic!("expected showdown, got {other:?}"),
    }

    // Every player saw the same ending.
    for player in players {
        assert_eq!(player.await.unwrap().unwrap(), outcome);
    }
}

#[tokio::test]
async fn test_everyone_folds_to_last_player() {
    let mut game = table(&["alice", "bob", "carol", "dave"], 2).start().unwrap();
    let last = game.players[0].id();
    spawn_all(game.players.drain(..).collect(), |_| {
        |_: &Turn<'_>| Action::Fold
    });

    let outcome = timeout(DEADLINE, game.finish()).await.unwrap().unwrap();
    assert_eq!(
        outcome,
        Outcome::WonByDefault {
            winner: last,
            pot: 0,
            round: 0,
        }
    );
}

#[tokio::test]
async fn test_random_bots_conserve_chips() {
    for seed in 0..20 {
        let names = ["alice", "bob", "carol", "dave", "erin"];
        let (coordinator, handles) = table(&names, seed).prepare().unwrap();
        let total = coordinator.state().total_chips();
        assert_eq!(total, 250);
        assert_eq!(handles.len(), names.len());

        let task = tokio::spawn(coordinator.run());
        let players = spawn_all(handles, |i| RandomBot::new(seed * 10 + i as u64));

        let outcome = timeout(DEADLINE, task).await.unwrap().unwrap().unwrap();
        assert!(outcome.pot() as u64 <= total);
        assert!(!outcome.winners().is_empty());
        for player in players {
            assert_eq!(player.await.unwrap().unwrap(), outcome);
        }
    }
}

#[tokio::test]
async fn test_strategy_observes_every_notification() {
    let mut game = table(&["alice", "bob"], 9).start().unwrap();
    let heard = Arc::new(AtomicUsize::new(0));
    let alice = game.players.remove(0);
    let listener = tokio::spawn(alice.run(Listener {
        heard: Arc::clone(&heard),
    }));
    spawn_all(game.players.drain(..).collect(), |_| {
        |_: &Turn<'_>| Action::Check
    });

    timeout(DEADLINE, game.finish()).await.unwrap().unwrap();
    listener.await.unwrap().unwrap();

    // Alice hears bob once per round, her own four turns, three boards and
    // the result.
    assert_eq!(heard.load(Ordering::SeqCst), 4 + 4 + 3 + 1);
}

// ============================================================================
// Player views
// ============================================================================

#[tokio::test]
async fn test_statuses_follow_the_game() {
    let mut game = table(&["alice", "bob"], 3).start().unwrap();
    let mut bob = game.players.pop().unwrap();
    let mut alice = game.players.pop().unwrap();

    // Seat 1 acts first heads up.
    let turn = timeout(DEADLINE, bob.recv()).await.unwrap().unwrap();
    assert!(turn.expects_reply());
    assert!(turn.legal_actions().contains(ActionKind::Bet));
    bob.play(Action::Bet(20)).await.unwrap();

    let seen = timeout(DEADLINE, alice.recv()).await.unwrap().unwrap();
    assert_eq!(
        seen,
        Notification::Played {
            player: bob.id(),
            action: Action::Bet(20),
        }
    );
    let turn = timeout(DEADLINE, alice.recv()).await.unwrap().unwrap();
    assert!(turn.legal_actions().contains(ActionKind::Call));
    assert_eq!(bob.chips(), 30);

    alice.play(Action::Fold).await.unwrap();
    let outcome = timeout(DEADLINE, game.finish()).await.unwrap().unwrap();
    assert_eq!(outcome.winners(), vec![bob.id()]);
    assert_eq!(outcome.pot(), 20);
    assert_eq!(bob.chips(), 50);
    assert_eq!(alice.chips(), 50);
    assert!(alice.folded());
}

#[tokio::test]
async fn test_players_track_the_board() {
    let mut game = table(&["alice", "bob"], 4).start().unwrap();
    let mut bob = game.players.pop().unwrap();
    let mut alice = game.players.pop().unwrap();
    let alice_cards: [Card; 2] = *alice.cards();

    // Preflop: bob checks, alice checks.
    timeout(DEADLINE, bob.recv()).await.unwrap().unwrap();
    bob.play(Action::Check).await.unwrap();
    timeout(DEADLINE, alice.recv()).await.unwrap().unwrap(); // bob's check
    timeout(DEADLINE, alice.recv()).await.unwrap().unwrap(); // alice's turn
    alice.play(Action::Check).await.unwrap();

    let flop = timeout(DEADLINE, alice.recv()).await.unwrap().unwrap();
    assert!(matches!(&flop, Notification::Board { round: 1, cards } if cards.len() == 3));
    assert_eq!(alice.board().len(), 3);
    assert!(!alice.board().contains(&alice_cards[0]));
    assert!(!alice.board().contains(&alice_cards[1]));
}

// ============================================================================
// Misbehaving players
// ============================================================================

#[tokio::test]
async fn test_silent_player_stalls_game() {
    let mut game = table(&["alice", "bob"], 5).start().unwrap();
    let mut bob = game.players.pop().unwrap();

    // Bob is asked and never answers.
    let turn = timeout(DEADLINE, bob.recv()).await.unwrap().unwrap();
    assert!(turn.expects_reply());

    let stalled = timeout(Duration::from_millis(200), &mut game.coordinator).await;
    assert!(stalled.is_err());
    assert!(!game.coordinator.is_finished());
    game.coordinator.abort();
}

#[tokio::test]
async fn test_out_of_turn_play_is_ignored() {
    let mut game = table(&["alice", "bob"], 6).start().unwrap();
    let mut bob = game.players.pop().unwrap();
    let alice = game.players.pop().unwrap();

    timeout(DEADLINE, bob.recv()).await.unwrap().unwrap();
    // Alice jumps the queue, nothing happens.
    alice.play(Action::AllIn(50)).await.unwrap();
    bob.play(Action::Fold).await.unwrap();

    let outcome = timeout(DEADLINE, game.finish()).await.unwrap().unwrap();
    assert_eq!(outcome.winners(), vec![alice.id()]);
    assert_eq!(outcome.pot(), 0);
    assert_eq!(alice.chips(), 50);
}

#[tokio::test]
async fn test_dropping_every_player_abandons_game() {
    let mut game = table(&["alice", "bob"], 7).start().unwrap();
    game.players.clear();
    let result = timeout(DEADLINE, game.finish()).await.unwrap();
    assert!(matches!(result, Err(GameError::Abandoned)));
}

#[tokio::test]
async fn test_start_without_players() {
    let table = Table::new(GameConfig::default()).unwrap();
    assert!(matches!(table.start(), Err(GameError::NoPlayers)));
}
