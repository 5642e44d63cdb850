use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use runner::{play_game, Config, GameResult, Recorder, Strategy, Summary};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::Tile;

#[derive(Parser)]
struct Args {
    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// How to pick moves
    #[arg(long, value_enum, default_value_t = Strategy::Auto)]
    strategy: Strategy,

    /// The tile value that wins the game
    #[arg(long, default_value_t = 2048)]
    winning_tile: u32,

    /// Stop a game after this many moves
    #[arg(long, default_value_t = 100_000)]
    max_moves: usize,

    /// Record every game as a JSON file into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let winning_tile = Tile::new(args.winning_tile)?;
    if winning_tile.is_empty() {
        anyhow::bail!("The winning tile must not be 0");
    }

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, strategy = %args.strategy);

    let recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut config = Config {
        rng: StdRng::seed_from_u64(seed),
        recorder,
        strategy: args.strategy,
        winning_tile,
        max_moves: args.max_moves,
    };

    let mut summary = Summary::default();
    for game_idx in 0..args.num_games {
        let report = play_game(&mut config)?;
        match report.result {
            GameResult::Won => debug!(game_idx, score = report.score, moves = report.moves, "Won"),
            GameResult::Lost => debug!(
                game_idx,
                score = report.score,
                max_tile = report.max_tile.value(),
                "Lost"
            ),
            GameResult::MoveLimitReached => info!(
                game_idx,
                seed = report.seed,
                moves = report.moves,
                "Stopped at the move limit"
            ),
        }
        summary.record(&report);
    }

    eprint!("{}", summary);
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
