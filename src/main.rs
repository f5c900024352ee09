use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hex_flip_engine::engine::models::PlayerAction;
use hex_flip_engine::engine::presets::{load_default_presets, load_presets, validate_custom};
use hex_flip_engine::engine::simulator::PlaySession;
use hex_flip_engine::games::hex_flip::completion::{find_achievement, unlocked_by};
use hex_flip_engine::games::hex_flip::state::GameState;
use hex_flip_engine::games::hex_flip::types::GameSettings;

#[derive(Parser)]
#[command(name = "hex-flip", about = "Play Hex Flip from the terminal")]
struct Cli {
    /// Preset name: easy, medium, hard, extreme, impossible (or one from the config)
    #[arg(short, long, default_value = "easy")]
    difficulty: String,

    /// Custom board radius (2-8), used together with --pieces
    #[arg(long, requires = "pieces")]
    radius: Option<i64>,

    /// Custom piece count (3-15), used together with --radius
    #[arg(long, requires = "radius")]
    pieces: Option<i64>,

    /// Seed for a reproducible level
    #[arg(long)]
    seed: Option<u64>,

    /// Path to hex_flip.toml (default: auto-discover)
    #[arg(long, env = "HEX_FLIP_CONFIG")]
    config: Option<PathBuf>,

    /// Print a JSON snapshot after each command instead of the text board
    #[arg(long)]
    json: bool,
}

const HELP: &str = "commands: place <q> <r> | undo | redo | next | prev | select <i> | hint | restart | show | help | quit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let presets = match &cli.config {
        Some(path) => load_presets(path)?,
        None => load_default_presets(),
    };

    let settings = match (cli.radius, cli.pieces) {
        (Some(radius), Some(pieces)) => validate_custom(radius, pieces)?,
        _ => presets
            .get(&cli.difficulty)
            .map(|p| p.settings())
            .ok_or_else(|| {
                format!(
                    "Unknown difficulty '{}'. Available: {}",
                    cli.difficulty,
                    presets.names().join(", ")
                )
            })?,
    };

    let state = new_game(settings, cli.seed);
    tracing::info!(
        radius = settings.radius,
        pieces = settings.num_pieces,
        difficulty = %state.difficulty(),
        "new game"
    );

    let mut session = PlaySession::new(state);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}")?;
    print_state(&mut out, session.state(), cli.json)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = line.trim();
        match command {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "show" => {
                print_state(&mut out, session.state(), cli.json)?;
                continue;
            }
            "help" | "?" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            _ => {}
        }

        let action = match command.parse::<PlayerAction>() {
            Ok(action) => action,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        let outcome = session.apply(&action);
        if !outcome.applied {
            writeln!(out, "'{action}' not possible")?;
            continue;
        }
        if let Some(hint) = outcome.hint {
            writeln!(out, "hint: place piece {} at {}", session.state().current_piece_index() + 1, hint)?;
            continue;
        }

        print_state(&mut out, session.state(), cli.json)?;

        if let Some(data) = outcome.completion {
            writeln!(
                out,
                "Solved! difficulty={} moves={} undos={} hints={}",
                data.difficulty, data.move_count, data.undo_count, data.hint_count
            )?;
            for id in unlocked_by(&data) {
                if let Some(a) = find_achievement(id) {
                    writeln!(out, "  achievement: {} ({}) - {}", a.name, id, a.description)?;
                }
            }
        }
    }

    Ok(())
}

fn new_game(settings: GameSettings, seed: Option<u64>) -> GameState {
    match seed {
        Some(seed) => GameState::with_seed(settings.radius, settings.num_pieces, seed),
        None => GameState::new(settings.radius, settings.num_pieces),
    }
}

fn print_state(out: &mut impl Write, state: &GameState, json: bool) -> io::Result<()> {
    if json {
        let snapshot = serde_json::to_string(&state.snapshot()).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        return writeln!(out, "{snapshot}");
    }
    write!(out, "{}", render_board(state))
}

/// Rows of constant r, shifted so neighboring rows interleave. Empty cells
/// print as '.'.
fn render_board(state: &GameState) -> String {
    let grid = state.grid();
    let radius = grid.radius() as i32;
    let mut text = String::new();

    for r in -radius..=radius {
        text.push_str(&" ".repeat(r.unsigned_abs() as usize * 2));
        let q_min = (-radius).max(-r - radius);
        let q_max = radius.min(-r + radius);
        for q in q_min..=q_max {
            let cell = match grid.height((q, r).into()) {
                Some(0) | None => ".".to_string(),
                Some(h) => h.to_string(),
            };
            text.push_str(&format!("{cell:>4}"));
        }
        text.push('\n');
    }

    let index = state.current_piece_index();
    if let Some(piece) = state.current_piece() {
        let tiles: Vec<String> = piece.tiles.iter().map(|t| format!("({t})")).collect();
        text.push_str(&format!(
            "piece {} of {}{}: {}\n",
            index + 1,
            state.pieces().len(),
            if state.is_piece_placed(index) { " (placed)" } else { "" },
            tiles.join(" ")
        ));
    }
    text.push_str(&format!(
        "moves={} undos={} hints={} remaining={}\n",
        state.move_count(),
        state.undo_count(),
        state.hint_count(),
        state.remaining_height()
    ));
    text
}
