//! Reverse-scramble puzzle generation with per-step backtracking.
//!
//! Generation starts from the unique solved board and applies randomized
//! reverse moves, validating after every accepted step that the accumulated
//! forward sequence still solves the scrambled board. A step that breaks the
//! sequence is popped and its snapshot restored, so wasted work is bounded
//! to one step rather than one attempt. Attempts that run out of step budget
//! restart with fresh walls; running out of attempts is the only fatal
//! outcome, and only for that configuration.

use log::debug;
use smallvec::SmallVec;
use thiserror::Error;

use crate::puzzle::{BoardState, Direction, Move, Puzzle};
use crate::rng::{derive_seed, RandomSource};
use crate::rules::{replay_solves, MoveRule};
use crate::walls::place_random_walls;

/// Tunable knobs for one generation configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub cols: usize,
    /// Walls placed before scrambling.
    pub wall_count: usize,
    /// Reverse-scramble depth; also the length of the solution.
    pub reverse_steps: usize,
    pub seed: u64,
    /// Whole-attempt restarts before generation fails.
    pub max_attempts: u32,
    /// Per-attempt step budget is `reverse_steps * step_budget_multiplier`.
    pub step_budget_multiplier: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            wall_count: 2,
            reverse_steps: 12,
            seed: 12345,
            max_attempts: 1000,
            step_budget_multiplier: 200,
        }
    }
}

/// Fatal generation outcome for one configuration.
///
/// Per-step failures are recovered internally and never surface here.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(
        "no solvable {rows}x{cols} puzzle with {wall_count} walls and \
         {reverse_steps} reverse steps found in {attempts} attempts"
    )]
    AttemptsExhausted {
        rows: usize,
        cols: usize,
        wall_count: usize,
        reverse_steps: usize,
        attempts: u32,
    },
}

/// Generate one solvable puzzle for `config` under `rule`.
///
/// The returned puzzle's solution has exactly `config.reverse_steps` moves;
/// replaying it from the start state reaches the all-ones board. With
/// `reverse_steps == 0` the solved board itself is returned.
pub fn generate(config: &GeneratorConfig, rule: &dyn MoveRule) -> Result<Puzzle, GenerateError> {
    let mut rng = RandomSource::new(config.seed);
    for attempt in 1..=config.max_attempts {
        if let Some(puzzle) = scramble_attempt(config, rule, &mut rng) {
            debug!(
                "generated {}x{} puzzle with {} moves on attempt {}",
                config.rows,
                config.cols,
                puzzle.solution.len(),
                attempt
            );
            return Ok(puzzle);
        }
        debug!("attempt {attempt} exhausted its step budget, restarting");
    }
    Err(GenerateError::AttemptsExhausted {
        rows: config.rows,
        cols: config.cols,
        wall_count: config.wall_count,
        reverse_steps: config.reverse_steps,
        attempts: config.max_attempts,
    })
}

/// One scramble attempt: fresh solved board, fresh walls, then reverse moves
/// until the target count or the step budget is reached.
fn scramble_attempt(
    config: &GeneratorConfig,
    rule: &dyn MoveRule,
    rng: &mut RandomSource,
) -> Option<Puzzle> {
    let mut board = BoardState::solved(config.rows, config.cols);
    place_random_walls(&mut board, rng, config.wall_count);

    let mut reverse: Vec<Move> = Vec::with_capacity(config.reverse_steps);
    let step_budget = config.reverse_steps * config.step_budget_multiplier;
    let mut step_attempts = 0;

    while reverse.len() < config.reverse_steps && step_attempts < step_budget {
        step_attempts += 1;

        // Snapshot before touching the board; both failure paths restore it.
        let before = board.clone();
        let row = rng.below(config.rows) as i32;
        let col = rng.below(config.cols) as i32;

        let mut dirs: SmallVec<[Direction; 4]> = SmallVec::from_slice(&Direction::ALL);
        rng.shuffle(&mut dirs);

        let mut applied = None;
        for &dir in &dirs {
            if let Some(mv) = rule.apply_reverse(&mut board, row, col, dir) {
                applied = Some(mv);
                break;
            }
        }
        let Some(mv) = applied else {
            // No direction worked for this cell; the board is untouched.
            continue;
        };
        reverse.push(mv);

        // Validate the entire accumulated sequence: the reverse list played
        // backward must still drive the scrambled board to all ones.
        let forward: Vec<Move> = reverse.iter().rev().copied().collect();
        if !replay_solves(rule, &board, &forward) {
            reverse.pop();
            board = before;
        }
    }

    if reverse.len() == config.reverse_steps {
        let solution: Vec<Move> = reverse.iter().rev().copied().collect();
        Some(Puzzle {
            start: board,
            solution,
        })
    } else {
        None
    }
}

/// Generate `count` independent puzzles for one configuration.
///
/// Puzzle `i` runs from the seed `derive_seed(config.seed, i)`, so a batch
/// is reproducible as a whole and each member independently.
pub fn generate_many(
    count: usize,
    config: &GeneratorConfig,
    rule: &dyn MoveRule,
) -> Result<Vec<Puzzle>, GenerateError> {
    let mut batch = Vec::with_capacity(count);
    for i in 0..count {
        let mut member = config.clone();
        member.seed = derive_seed(config.seed, i as u64);
        batch.push(generate(&member, rule)?);
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{FarthestEmpty, OrthogonalShift, RuleVariant};

    fn config(
        rows: usize,
        cols: usize,
        wall_count: usize,
        reverse_steps: usize,
        seed: u64,
    ) -> GeneratorConfig {
        GeneratorConfig {
            rows,
            cols,
            wall_count,
            reverse_steps,
            seed,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn default_config_generates_solvable_6x6() {
        // rows=6, cols=6, walls=2, steps=12, seed=12345
        let cfg = GeneratorConfig::default();
        let puzzle = generate(&cfg, &FarthestEmpty).expect("generation");
        assert_eq!(puzzle.start.sum(), 36);
        assert_eq!(puzzle.solution.len(), 12);
        assert!(replay_solves(&FarthestEmpty, &puzzle.start, &puzzle.solution));
    }

    #[test]
    fn two_by_two_single_step() {
        let cfg = config(2, 2, 0, 1, 7);
        let puzzle = generate(&cfg, &FarthestEmpty).expect("generation");
        assert_eq!(puzzle.solution.len(), 1);
        assert_eq!(puzzle.start.sum(), 4);

        // One unit of weight moved out of one cell: a 2, an empty, two 1s.
        let weights: Vec<u32> = (0..2)
            .flat_map(|r| (0..2).map(move |c| (r, c)))
            .map(|(r, c)| puzzle.start.get(r, c))
            .collect();
        assert_eq!(weights.iter().filter(|&&w| w == 2).count(), 1);
        assert_eq!(weights.iter().filter(|&&w| w == 0).count(), 1);
        assert_eq!(weights.iter().filter(|&&w| w == 1).count(), 2);
        assert_eq!(puzzle.solution[0].split, 1);
        assert!(replay_solves(&FarthestEmpty, &puzzle.start, &puzzle.solution));
    }

    #[test]
    fn zero_steps_returns_solved_board() {
        let cfg = config(4, 4, 2, 0, 5);
        let puzzle = generate(&cfg, &FarthestEmpty).expect("generation");
        assert!(puzzle.start.is_all_ones());
        assert!(puzzle.solution.is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let cfg = config(5, 5, 2, 8, 4242);
        let a = generate(&cfg, &FarthestEmpty).expect("generation");
        let b = generate(&cfg, &FarthestEmpty).expect("generation");
        assert_eq!(a.start, b.start);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn solution_never_crosses_walls_or_bounds() {
        let cfg = config(5, 5, 4, 10, 99);
        let puzzle = generate(&cfg, &FarthestEmpty).expect("generation");
        let mut board = puzzle.start.clone();
        for &mv in &puzzle.solution {
            assert!(!board.edge_blocked(mv.row, mv.col, mv.dir));
            let before_sum = board.sum();
            assert!(FarthestEmpty.apply_forward(&mut board, mv));
            assert_eq!(board.sum(), before_sum);
        }
        assert!(board.is_all_ones());
    }

    #[test]
    fn orthogonal_rule_generates_too() {
        let cfg = config(4, 4, 1, 4, 2024);
        let rule = RuleVariant::Orthogonal.rule();
        let puzzle = generate(&cfg, rule).expect("generation");
        assert_eq!(puzzle.solution.len(), 4);
        assert_eq!(puzzle.start.sum(), 16);
        assert!(replay_solves(rule, &puzzle.start, &puzzle.solution));
    }

    #[test]
    fn orthogonal_solution_never_displaces_weight_one() {
        let cfg = config(4, 4, 1, 5, 31);
        let puzzle = generate(&cfg, &OrthogonalShift).expect("generation");
        let mut board = puzzle.start.clone();
        for &mv in &puzzle.solution {
            // Every split targets an empty cell, so no weight-1 cell is ever
            // the destination of a split.
            let (dr, dc) = mv.dir.delta();
            assert_eq!(board.get(mv.row + dr, mv.col + dc), 0);
            assert!(OrthogonalShift.apply_forward(&mut board, mv));
        }
        assert!(board.is_all_ones());
    }

    #[test]
    fn batch_is_reproducible_and_independent() {
        let cfg = config(4, 4, 1, 6, 777);
        let batch_a = generate_many(3, &cfg, &FarthestEmpty).expect("batch");
        let batch_b = generate_many(3, &cfg, &FarthestEmpty).expect("batch");
        assert_eq!(batch_a.len(), 3);
        for (a, b) in batch_a.iter().zip(&batch_b) {
            assert_eq!(a.start, b.start);
            assert_eq!(a.solution, b.solution);
        }

        // Member i is exactly a standalone run from its derived seed.
        let mut solo_cfg = cfg.clone();
        solo_cfg.seed = derive_seed(cfg.seed, 2);
        let solo = generate(&solo_cfg, &FarthestEmpty).expect("generation");
        assert_eq!(solo.start, batch_a[2].start);
        assert_eq!(solo.solution, batch_a[2].solution);
    }

    #[test]
    fn impossible_configuration_exhausts_attempts() {
        // A single cell has no legal reverse move in any direction.
        let cfg = GeneratorConfig {
            rows: 1,
            cols: 1,
            wall_count: 0,
            reverse_steps: 1,
            seed: 1,
            max_attempts: 3,
            step_budget_multiplier: 10,
        };
        let err = generate(&cfg, &FarthestEmpty).unwrap_err();
        let GenerateError::AttemptsExhausted { attempts, .. } = err;
        assert_eq!(attempts, 3);
    }
}
