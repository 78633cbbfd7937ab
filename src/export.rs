//! Wire records and NDJSON serialization.
//!
//! One puzzle per line, newline-delimited UTF-8 JSON. Each cell carries its
//! weight and a 4-bit wall mask: bit0=top, bit1=right, bit2=bottom,
//! bit3=left, set when the edge is a boundary or a wall.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::puzzle::{BoardState, Puzzle};

/// Current wire schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Per-cell wire record: wall mask plus weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub w: u8,
    pub v: u32,
}

/// One puzzle as stored on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    pub schema_version: u32,
    pub id: u64,
    pub rows: usize,
    pub cols: usize,
    /// Row-major cell grid.
    pub cells: Vec<Vec<CellRecord>>,
}

fn wall_mask(top: bool, right: bool, bottom: bool, left: bool) -> u8 {
    u8::from(top) | u8::from(right) << 1 | u8::from(bottom) << 2 | u8::from(left) << 3
}

impl PuzzleRecord {
    /// Build the wire record for a board. Boundary edges count as walls.
    pub fn from_board(board: &BoardState, id: u64) -> Self {
        let rows = board.rows();
        let cols = board.cols();
        let mut cells = Vec::with_capacity(rows);
        for r in 0..rows as i32 {
            let mut row = Vec::with_capacity(cols);
            for c in 0..cols as i32 {
                let top = r == 0 || board.v_wall(r - 1, c);
                let right = c == cols as i32 - 1 || board.h_wall(r, c);
                let bottom = r == rows as i32 - 1 || board.v_wall(r, c);
                let left = c == 0 || board.h_wall(r, c - 1);
                row.push(CellRecord {
                    w: wall_mask(top, right, bottom, left),
                    v: board.get(r, c),
                });
            }
            cells.push(row);
        }
        Self {
            schema_version: SCHEMA_VERSION,
            id,
            rows,
            cols,
            cells,
        }
    }
}

/// Convert a puzzle's start state to its wire record.
pub fn to_record(puzzle: &Puzzle, id: u64) -> PuzzleRecord {
    PuzzleRecord::from_board(&puzzle.start, id)
}

/// Convert a batch, assigning sequential ids from `start_id`.
pub fn to_records(batch: &[Puzzle], start_id: u64) -> Vec<PuzzleRecord> {
    batch
        .iter()
        .enumerate()
        .map(|(i, p)| to_record(p, start_id + i as u64))
        .collect()
}

/// Write records as NDJSON: one compact JSON object per line.
pub fn write_ndjson<W: Write>(mut writer: W, records: &[PuzzleRecord]) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(io::Error::from)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Write records as NDJSON to a file, truncating any existing content.
pub fn write_ndjson_file(path: &Path, records: &[PuzzleRecord]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ndjson(&mut writer, records)?;
    writer.flush()
}
