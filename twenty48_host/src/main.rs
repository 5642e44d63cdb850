use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use twenty48::{GameState, Tile};

/// Plays one game driven by JSON requests on stdin, answering on stdout.
#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// The tile value that wins the game
    #[arg(long, default_value_t = 2048)]
    winning_tile: u32,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let winning_tile = Tile::new(args.winning_tile)?;
    if winning_tile.is_empty() {
        anyhow::bail!("The winning tile must not be 0");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut state = GameState::with_winning_tile(StdRng::seed_from_u64(seed), winning_tile);

    // Communication happens through stdin/stdout.
    // Stderr is used for logging.
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    twenty48_host::serve(&mut state, stdin, stdout)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
