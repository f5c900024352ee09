//! Arena CLI: generate many levels and auto-play them to check solvability.
//!
//! Usage:
//!   cargo run --release --bin arena -- --preset impossible --games 1000
//!   cargo run --release --bin arena -- --radius 2 --pieces 15 --strategy random --max-steps 2000

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hex_flip_engine::engine::arena::run_arena;
use hex_flip_engine::engine::presets::{load_default_presets, load_presets, PresetsFile};
use hex_flip_engine::engine::strategy::strategy_by_name;
use hex_flip_engine::games::hex_flip::types::{Difficulty, GameSettings};

#[derive(Parser)]
#[command(name = "arena", about = "Run level generation and auto-solve experiments for Hex Flip")]
struct Cli {
    /// Number of levels to generate (default from config, else 100)
    #[arg(long)]
    games: Option<usize>,

    /// Base random seed; level i uses seed + i
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Path to hex_flip.toml
    #[arg(long, env = "HEX_FLIP_CONFIG")]
    config: Option<PathBuf>,

    /// Preset name; ignored when --radius and --pieces are both given
    #[arg(long)]
    preset: Option<String>,

    /// Board radius (no range limit here)
    #[arg(long, requires = "pieces")]
    radius: Option<u32>,

    /// Piece count (no range limit here)
    #[arg(long, requires = "radius")]
    pieces: Option<usize>,

    /// Solve strategy: "hint" or "random"
    #[arg(long)]
    strategy: Option<String>,

    /// Give up on a level after this many actions
    #[arg(long)]
    max_steps: Option<usize>,

    /// Run every preset in the config instead of a single one
    #[arg(long)]
    all_presets: bool,
}

fn resolve_settings(cli: &Cli, presets: &PresetsFile) -> Vec<(String, GameSettings)> {
    if let (Some(radius), Some(pieces)) = (cli.radius, cli.pieces) {
        let settings = GameSettings::new(radius, pieces);
        return vec![(Difficulty::from_settings(&settings).to_string(), settings)];
    }

    if cli.all_presets {
        return presets
            .names()
            .into_iter()
            .filter_map(|name| presets.get(name).map(|p| (name.to_string(), p.settings())))
            .collect();
    }

    let name = cli.preset.as_deref().unwrap_or("easy");
    match presets.get(name) {
        Some(p) => vec![(name.to_string(), p.settings())],
        None => {
            eprintln!("Error: preset '{}' not found", name);
            eprintln!("Available presets: {:?}", presets.names());
            std::process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let presets = match &cli.config {
        Some(path) => load_presets(path).unwrap_or_else(|e| {
            eprintln!("Error loading presets: {}", e);
            std::process::exit(1);
        }),
        None => load_default_presets(),
    };

    let games = cli.games.unwrap_or(presets.arena.games);
    let max_steps = cli.max_steps.unwrap_or(presets.arena.max_steps);
    let strategy_name = cli
        .strategy
        .clone()
        .unwrap_or_else(|| presets.arena.strategy.clone());
    let strategy = strategy_by_name(&strategy_name).unwrap_or_else(|| {
        eprintln!("Error: unknown strategy '{}' (expected \"hint\" or \"random\")", strategy_name);
        std::process::exit(1);
    });

    for (label, settings) in resolve_settings(&cli, &presets) {
        eprintln!(
            "Arena: {} ({} levels, radius={}, pieces={}, seed={}, strategy={}, max_steps={})",
            label, games, settings.radius, settings.num_pieces, cli.seed, strategy_name, max_steps
        );

        let progress_cb = |done: usize, total: usize| {
            eprint!("\r  [{}/{}] levels completed", done, total);
        };

        let result = run_arena(
            settings,
            strategy.as_ref(),
            games,
            cli.seed,
            max_steps,
            Some(&progress_cb),
        );

        eprintln!("\r                                    "); // clear progress line
        println!("{}\n", result.summary());
    }
}
