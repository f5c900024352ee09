//! Batch runner: generate many levels and let a strategy play each one.
//!
//! Level `i` of a run uses seed `base_seed + i` for generation and for the
//! strategy's RNG, so a run is reproducible regardless of thread scheduling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::engine::models::PlayResult;
use crate::engine::simulator::PlaySession;
use crate::engine::strategy::SolveStrategy;
use crate::games::hex_flip::state::GameState;
use crate::games::hex_flip::types::GameSettings;

/// Aggregated results from an arena run.
pub struct ArenaResult {
    pub settings: GameSettings,
    pub strategy: String,
    pub results: Vec<PlayResult>,
}

impl ArenaResult {
    pub fn num_games(&self) -> usize {
        self.results.len()
    }

    pub fn solved(&self) -> usize {
        self.results.iter().filter(|r| r.solved).count()
    }

    pub fn solve_rate(&self) -> f64 {
        self.solved() as f64 / self.num_games().max(1) as f64
    }

    /// Mean moves over solved games.
    pub fn avg_moves(&self) -> f64 {
        let solved: Vec<&PlayResult> = self.results.iter().filter(|r| r.solved).collect();
        if solved.is_empty() {
            return 0.0;
        }
        solved.iter().map(|r| r.move_count as f64).sum::<f64>() / solved.len() as f64
    }

    pub fn avg_undos(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.results.iter().map(|r| r.undo_count as f64).sum::<f64>() / self.results.len() as f64
    }

    /// Levels with at least one piece the generator could not place.
    pub fn levels_with_unhinted_pieces(&self) -> usize {
        self.results.iter().filter(|r| r.unhinted_pieces > 0).count()
    }

    /// Wilson score interval for the solve rate.
    pub fn confidence_interval_95(&self) -> (f64, f64) {
        let n = self.num_games();
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.solve_rate();
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let (ci_lo, ci_hi) = self.confidence_interval_95();
        let mut lines = vec![format!(
            "Arena Results ({} levels, radius={}, pieces={}, strategy={})",
            self.num_games(),
            self.settings.radius,
            self.settings.num_pieces,
            self.strategy
        )];
        lines.push("=".repeat(60));
        lines.push(format!(
            "  {:>12}: {:4} ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]",
            "Solved",
            self.solved(),
            self.solve_rate() * 100.0,
            ci_lo * 100.0,
            ci_hi * 100.0,
        ));
        lines.push(format!("  {:>12}: {:6.1}", "Avg moves", self.avg_moves()));
        lines.push(format!("  {:>12}: {:6.1}", "Avg undos", self.avg_undos()));
        lines.push(format!(
            "  {:>12}: {}",
            "Unhinted",
            self.levels_with_unhinted_pieces()
        ));
        if !self.results.is_empty() {
            let total_ms: f64 = self.results.iter().map(|r| r.duration_ms).sum();
            lines.push(format!(
                "  Avg level: {:.2}ms  |  Total: {:.1}s",
                total_ms / self.results.len() as f64,
                total_ms / 1000.0
            ));
        }
        lines.join("\n")
    }
}

/// Play one level until it is won, the strategy gives up, or `max_steps`
/// actions have been issued.
pub fn play_level(
    state: GameState,
    strategy: &dyn SolveStrategy,
    max_steps: usize,
    seed: u64,
) -> PlayResult {
    let t0 = Instant::now();
    let unhinted_pieces = state.pieces().len() - state.solution().len();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = PlaySession::new(state);

    let mut steps = 0;
    while steps < max_steps && !session.state().is_game_won() {
        let Some(action) = strategy.choose_action(session.state(), &mut rng) else {
            break;
        };
        session.apply(&action);
        steps += 1;
    }

    let state = session.state();
    PlayResult {
        solved: state.is_game_won(),
        steps,
        move_count: state.move_count(),
        undo_count: state.undo_count(),
        hint_count: state.hint_count(),
        unhinted_pieces,
        duration_ms: t0.elapsed().as_secs_f64() * 1000.0,
    }
}

/// Generate and play `num_games` levels in parallel.
pub fn run_arena(
    settings: GameSettings,
    strategy: &dyn SolveStrategy,
    num_games: usize,
    base_seed: u64,
    max_steps: usize,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ArenaResult {
    let completed = AtomicUsize::new(0);

    let results: Vec<PlayResult> = (0..num_games)
        .into_par_iter()
        .map(|game_idx| {
            let seed = base_seed.wrapping_add(game_idx as u64);
            let mut gen_rng = StdRng::seed_from_u64(seed);
            let state = GameState::generate(settings, &mut gen_rng);
            let result = play_level(state, strategy, max_steps, seed);

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress_callback {
                cb(done, num_games);
            }
            result
        })
        .collect();

    tracing::debug!(
        games = num_games,
        solved = results.iter().filter(|r| r.solved).count(),
        "arena finished"
    );

    ArenaResult {
        settings,
        strategy: strategy.name().to_string(),
        results,
    }
}
