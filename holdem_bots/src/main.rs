//! Random bots playing one game of holdem against each other.
//!
//! Every bot runs in its own task and only talks to the coordinator through
//! its player handle, exactly like a remote client would.

mod bot;

use anyhow::Error;
use bot::{DEFAULT_WAGER, RandomBot};
use ctrlc::set_handler;
use holdem::{DEFAULT_STARTING_CHIPS, GameConfig, Outcome, Table};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Play one game of holdem between random bots

USAGE:
  holdem_bots [OPTIONS]

OPTIONS:
  --players    N           Number of bots              [default: env HOLDEM_PLAYERS or 4]
  --chips      N           Starting chips per bot      [default: env HOLDEM_STARTING_CHIPS or 50]
  --wager      N           Chips per bet/call/raise    [default: env HOLDEM_WAGER or 15]
  --seed       N           Seed for the deck and bots  [default: env HOLDEM_SEED or random]

FLAGS:
  -h, --help               Print help information
  --json                   Print the outcome as JSON

ENVIRONMENT:
  RUST_LOG                 Log filter (e.g., info, holdem=debug)
";

const BOT_NAMES: [&str; 4] = ["bob", "jane", "max", "liz"];

struct Args {
    players: usize,
    starting_chips: u32,
    wager: u32,
    seed: Option<u64>,
    json: bool,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn bot_name(i: usize) -> String {
    match BOT_NAMES.get(i) {
        Some(name) => (*name).to_string(),
        None => format!("bot{i}"),
    }
}

fn report(outcome: &Outcome, table: &[(holdem::PlayerId, String, u32)]) {
    let name = |id: &holdem::PlayerId| {
        table
            .iter()
            .find(|(player, ..)| player == id)
            .map_or_else(|| id.to_string(), |(_, name, _)| name.clone())
    };

    match outcome {
        Outcome::WonByDefault { winner, pot, round } => {
            println!("{} wins {pot} chips in round {round}, everyone else folded", name(winner));
        }
        Outcome::Showdown { hands, winners, pot } => {
            for hand in hands {
                println!("{:>8} shows {}", name(&hand.player), hand.category);
            }
            let winners: Vec<String> = winners.iter().map(&name).collect();
            println!("{} split {pot} chips", winners.join(" and "));
        }
    }

    for (_, name, chips) in table {
        println!("{name:>8}: {chips} chips");
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        json: pargs.contains("--json"),
        players: pargs
            .value_from_str("--players")
            .unwrap_or_else(|_| env_or("HOLDEM_PLAYERS", BOT_NAMES.len())),
        starting_chips: pargs
            .value_from_str("--chips")
            .unwrap_or_else(|_| env_or("HOLDEM_STARTING_CHIPS", DEFAULT_STARTING_CHIPS)),
        wager: pargs
            .value_from_str("--wager")
            .unwrap_or_else(|_| env_or("HOLDEM_WAGER", DEFAULT_WAGER)),
        seed: pargs.opt_value_from_str("--seed")?.or_else(|| {
            std::env::var("HOLDEM_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
        }),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = GameConfig {
        starting_chips: args.starting_chips,
        ..GameConfig::default()
    };
    let mut table = match args.seed {
        Some(seed) => Table::with_seed(config, seed)?,
        None => Table::new(config)?,
    };
    for i in 0..args.players {
        table.register(bot_name(i))?;
    }
    info!("Starting a game with {} bots", table.len());

    let mut game = table.start()?;
    let mut bots = Vec::with_capacity(game.players.len());
    for (i, player) in game.players.drain(..).enumerate() {
        let seed = args.seed.map(|seed| seed.wrapping_add(i as u64 + 1));
        let bot = RandomBot::new(player.name(), args.wager, seed);
        bots.push(tokio::spawn(async move {
            let id = player.id();
            let name = player.name().to_string();
            let status = player.status();
            let result = player.run(bot).await;
            (id, name, status, result)
        }));
    }

    let outcome = game.finish().await?;

    let mut table = Vec::with_capacity(bots.len());
    for bot in bots {
        let (id, name, status, result) = bot.await?;
        result?;
        table.push((id, name, status.borrow().chips));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        report(&outcome, &table);
    }

    Ok(())
}
