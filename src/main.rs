//! CLI entry point for the SplitShift puzzle generator.
//!
//! Usage:
//!   splitshift-generator generate [options]
//!   splitshift-generator sweep --rows 4,6 --cols 4,6 --walls 0,2 [options]
//!
//! `generate` produces one batch of puzzles for a single configuration and
//! writes them as NDJSON. `sweep` runs a grid of configurations and writes
//! one file per configuration, skipping configurations the bounded search
//! cannot satisfy.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{info, warn};

use splitshift_generator::{
    export, generate_many, render, replay_solves, GeneratorConfig, Puzzle, RuleVariant,
};

#[derive(Parser)]
#[command(name = "splitshift-generator")]
#[command(about = "Reverse-move generator for solvable SplitShift puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of puzzles for one configuration
    Generate {
        /// Grid rows
        #[arg(long, default_value = "6")]
        rows: usize,

        /// Grid columns
        #[arg(long, default_value = "6")]
        cols: usize,

        /// Number of interior walls
        #[arg(long, default_value = "2")]
        walls: usize,

        /// Reverse-scramble depth (also the solution length)
        #[arg(long, default_value = "12")]
        steps: usize,

        /// Base seed; puzzle i derives its own seed from it
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Number of puzzles to generate
        #[arg(long, default_value = "10")]
        count: usize,

        /// Generator restarts before giving up on the configuration
        #[arg(long, default_value = "1000")]
        attempts: u32,

        /// Move rule variant
        #[arg(long, value_enum, default_value_t = RuleVariant::Farthest)]
        rule: RuleVariant,

        /// Output NDJSON path (default: splitshift_{rows}x{cols}_{count}.ndjson)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print each board, its solution, and a per-move replay
        #[arg(long)]
        show: bool,
    },

    /// Generate batches across a grid of configurations, skipping failures
    Sweep {
        /// Row counts to sweep
        #[arg(long, value_delimiter = ',', default_value = "6")]
        rows: Vec<usize>,

        /// Column counts to sweep
        #[arg(long, value_delimiter = ',', default_value = "6")]
        cols: Vec<usize>,

        /// Wall counts to sweep
        #[arg(long, value_delimiter = ',', default_value = "2")]
        walls: Vec<usize>,

        /// Reverse-scramble depth for every configuration
        #[arg(long, default_value = "12")]
        steps: usize,

        /// Base seed, shared by every configuration
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Puzzles per configuration
        #[arg(long, default_value = "10")]
        count: usize,

        /// Generator restarts per configuration
        #[arg(long, default_value = "1000")]
        attempts: u32,

        /// Move rule variant
        #[arg(long, value_enum, default_value_t = RuleVariant::Farthest)]
        rule: RuleVariant,

        /// Directory receiving one NDJSON file per configuration
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            rows,
            cols,
            walls,
            steps,
            seed,
            count,
            attempts,
            rule,
            output,
            show,
        } => run_generate(
            rows, cols, walls, steps, seed, count, attempts, rule, output, show,
        ),
        Commands::Sweep {
            rows,
            cols,
            walls,
            steps,
            seed,
            count,
            attempts,
            rule,
            out_dir,
        } => run_sweep(rows, cols, walls, steps, seed, count, attempts, rule, out_dir),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    rows: usize,
    cols: usize,
    walls: usize,
    steps: usize,
    seed: u64,
    count: usize,
    attempts: u32,
    rule: RuleVariant,
    output: Option<PathBuf>,
    show: bool,
) -> ExitCode {
    let config = GeneratorConfig {
        rows,
        cols,
        wall_count: walls,
        reverse_steps: steps,
        seed,
        max_attempts: attempts,
        ..GeneratorConfig::default()
    };

    let batch = match generate_many(count, &config, rule.rule()) {
        Ok(batch) => batch,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for (i, puzzle) in batch.iter().enumerate() {
        print_puzzle(i + 1, puzzle, rule, show);
    }

    let path = output.unwrap_or_else(|| {
        PathBuf::from(format!("splitshift_{rows}x{cols}_{count}.ndjson"))
    });
    let records = export::to_records(&batch, 1);
    if let Err(err) = export::write_ndjson_file(&path, &records) {
        eprintln!("Error: NDJSON write failed: {err}");
        return ExitCode::FAILURE;
    }
    println!("NDJSON written to: {}", path.display());
    ExitCode::SUCCESS
}

fn print_puzzle(index: usize, puzzle: &Puzzle, rule: RuleVariant, show: bool) {
    let rows = puzzle.start.rows();
    let cols = puzzle.start.cols();
    println!(
        "== Puzzle {} == Size: {}x{} | Sum={} (must equal {}) | Moves={}",
        index,
        rows,
        cols,
        puzzle.start.sum(),
        rows * cols,
        puzzle.solution.len()
    );
    if !show {
        return;
    }

    println!("Board:");
    println!("{}", render::render_pretty(&puzzle.start));
    println!("Solution moves (execute in this order):");
    for (step, mv) in puzzle.solution.iter().enumerate() {
        println!("{:2}) {}", step + 1, mv);
    }

    let solved = replay_solves(rule.rule(), &puzzle.start, &puzzle.solution);
    println!(
        "Verification: {}",
        if solved {
            "SUCCESS - all cells are 1"
        } else {
            "FAILED"
        }
    );

    // Board after each move.
    println!("Replay:");
    let mut sim = puzzle.start.clone();
    for (step, &mv) in puzzle.solution.iter().enumerate() {
        if !rule.rule().apply_forward(&mut sim, mv) {
            println!("After move {}: {} -> MOVE FAILED", step + 1, mv);
            break;
        }
        println!("After move {}: {}", step + 1, mv);
        println!("{}", render::render_pretty(&sim));
    }
}

#[allow(clippy::too_many_arguments)]
fn run_sweep(
    rows: Vec<usize>,
    cols: Vec<usize>,
    walls: Vec<usize>,
    steps: usize,
    seed: u64,
    count: usize,
    attempts: u32,
    rule: RuleVariant,
    out_dir: PathBuf,
) -> ExitCode {
    let mut written = 0usize;
    let mut skipped = 0usize;

    for &r in &rows {
        for &c in &cols {
            for &w in &walls {
                let config = GeneratorConfig {
                    rows: r,
                    cols: c,
                    wall_count: w,
                    reverse_steps: steps,
                    seed,
                    max_attempts: attempts,
                    ..GeneratorConfig::default()
                };
                // A configuration the bounded search cannot satisfy is
                // skipped, not fatal: the sweep still yields partial results.
                let batch = match generate_many(count, &config, rule.rule()) {
                    Ok(batch) => batch,
                    Err(err) => {
                        warn!("skipping configuration: {err}");
                        skipped += 1;
                        continue;
                    }
                };
                let path = out_dir.join(format!("splitshift_{r}x{c}_w{w}_{count}.ndjson"));
                let records = export::to_records(&batch, 1);
                if let Err(err) = export::write_ndjson_file(&path, &records) {
                    eprintln!("Error: NDJSON write failed for {}: {err}", path.display());
                    return ExitCode::FAILURE;
                }
                info!("wrote {} puzzles to {}", count, path.display());
                println!("{}", path.display());
                written += 1;
            }
        }
    }

    println!("Sweep complete: {written} configuration(s) written, {skipped} skipped");
    if written == 0 && skipped > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
