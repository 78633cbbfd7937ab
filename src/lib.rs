//! SplitShift puzzle generator library.
//!
//! This crate builds solvable instances of the SplitShift tile-splitting
//! puzzle by scrambling the solved all-ones board with randomized reverse
//! moves, validating after every step that the accumulated forward sequence
//! still solves the result. Solvability is guaranteed by construction: the
//! solution shipped with each puzzle is the exact forward inverse of the
//! scramble.

pub mod export;
pub mod generate;
pub mod puzzle;
pub mod render;
pub mod rng;
pub mod rules;
pub mod walls;

// Re-export main types
pub use export::{to_record, to_records, write_ndjson, write_ndjson_file, PuzzleRecord};
pub use generate::{generate, generate_many, GenerateError, GeneratorConfig};
pub use puzzle::{BoardState, Direction, Move, Puzzle};
pub use rng::{derive_seed, RandomSource};
pub use rules::{replay_solves, FarthestEmpty, MoveRule, OrthogonalShift, RuleVariant};
pub use walls::place_random_walls;
