//! Move legality and application: the forward/reverse duality the generator
//! is built on.
//!
//! Two incompatible rule variants exist under the SplitShift name. Both are
//! provided behind the [`MoveRule`] trait and selected by [`RuleVariant`]:
//! [`FarthestEmpty`] is the default (a split slides the ray ahead of it
//! toward the farthest empty cell), [`OrthogonalShift`] the alternate
//! interpretation (a split drags the whole orthogonal line one step and may
//! only target an empty neighbor). The generator works with either.

use clap::ValueEnum;
use smallvec::SmallVec;

use crate::puzzle::{BoardState, Direction, Move};

/// A puzzle rule: forward move application and its generation-time reverse.
pub trait MoveRule {
    /// Apply `mv` to `board`. Returns `false` and leaves the board untouched
    /// if any precondition fails; a failed move never partially mutates.
    fn apply_forward(&self, board: &mut BoardState, mv: Move) -> bool;

    /// Try one reverse step at (row, col) toward `dir`, returning the
    /// forward move it is the inverse of. On `None` the board is unchanged.
    fn apply_reverse(
        &self,
        board: &mut BoardState,
        row: i32,
        col: i32,
        dir: Direction,
    ) -> Option<Move>;

    /// Pure legality check: would `apply_forward` succeed on this board?
    fn is_legal_forward(&self, board: &BoardState, mv: Move) -> bool {
        let mut probe = board.clone();
        self.apply_forward(&mut probe, mv)
    }
}

/// Which move rule the generator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RuleVariant {
    /// Orthogonal line shift; a split may only target an empty neighbor.
    Orthogonal,
    /// Slide toward the farthest empty cell on the ray (default).
    #[default]
    Farthest,
}

impl RuleVariant {
    pub fn rule(self) -> &'static dyn MoveRule {
        match self {
            RuleVariant::Orthogonal => &OrthogonalShift,
            RuleVariant::Farthest => &FarthestEmpty,
        }
    }
}

/// Replay `moves` from a copy of `start`; true iff every move applies and
/// the final board is all ones.
pub fn replay_solves(rule: &dyn MoveRule, start: &BoardState, moves: &[Move]) -> bool {
    let mut board = start.clone();
    for &mv in moves {
        if !rule.apply_forward(&mut board, mv) {
            return false;
        }
    }
    board.is_all_ones()
}

/// Variant A: splitting at (r, c) also shifts every other cell of the
/// source's row (vertical moves) or column (horizontal moves) one step in
/// the move direction, and the split target must be empty.
pub struct OrthogonalShift;

/// Shift every other cell in the source's orthogonal line one step toward
/// `dir`. Only cells with weight > 1 move, only through an unblocked edge,
/// and only into a cell that is empty on the pre-shift board. Destinations
/// are written before any vacated source is cleared, so the shifts land as
/// one simultaneous step.
fn orthogonal_shift(board: &mut BoardState, row: i32, col: i32, dir: Direction) {
    let (dr, dc) = dir.delta();
    let line: SmallVec<[(i32, i32); 8]> = match dir {
        Direction::Up | Direction::Down => (0..board.cols() as i32)
            .filter(|&c| c != col)
            .map(|c| (row, c))
            .collect(),
        Direction::Left | Direction::Right => (0..board.rows() as i32)
            .filter(|&r| r != row)
            .map(|r| (r, col))
            .collect(),
    };

    let mut shifts: SmallVec<[((i32, i32), (i32, i32), u32); 8]> = SmallVec::new();
    for (r, c) in line {
        let weight = board.get(r, c);
        if weight <= 1 || board.edge_blocked(r, c, dir) {
            continue;
        }
        let dest = (r + dr, c + dc);
        if board.get(dest.0, dest.1) != 0 {
            continue;
        }
        shifts.push(((r, c), dest, weight));
    }

    for &(_, (tr, tc), weight) in &shifts {
        board.set(tr, tc, weight);
    }
    for &((fr, fc), _, _) in &shifts {
        board.set(fr, fc, 0);
    }
}

impl MoveRule for OrthogonalShift {
    fn apply_forward(&self, board: &mut BoardState, mv: Move) -> bool {
        if board.edge_blocked(mv.row, mv.col, mv.dir) {
            return false;
        }
        let v = board.get(mv.row, mv.col);
        if v < 2 || mv.split == 0 || mv.split >= v {
            return false;
        }
        let (dr, dc) = mv.dir.delta();
        let (nr, nc) = (mv.row + dr, mv.col + dc);
        // The split target must be empty; in particular a weight-1 cell can
        // never be split onto or displaced.
        if board.get(nr, nc) != 0 {
            return false;
        }

        orthogonal_shift(board, mv.row, mv.col, mv.dir);
        board.set(nr, nc, mv.split);
        board.set(mv.row, mv.col, v - mv.split);
        true
    }

    fn apply_reverse(
        &self,
        board: &mut BoardState,
        row: i32,
        col: i32,
        dir: Direction,
    ) -> Option<Move> {
        if board.edge_blocked(row, col, dir) {
            return None;
        }
        let (dr, dc) = dir.delta();
        let (nr, nc) = (row + dr, col + dc);
        let split = board.get(nr, nc);
        if split == 0 {
            return None;
        }

        let before = board.clone();
        board.set(nr, nc, 0);
        let merged = board.get(row, col) + split;
        board.set(row, col, merged);
        orthogonal_shift(board, row, col, dir.opposite());

        // The shift logic is not its own inverse, so a reverse step only
        // counts if the forward move reproduces the pre-reverse board
        // cell for cell.
        let mv = Move::new(row, col, dir, split);
        let mut replay = board.clone();
        if self.apply_forward(&mut replay, mv) && replay == before {
            Some(mv)
        } else {
            *board = before;
            None
        }
    }
}

/// Variant B: the move direction defines a ray from the neighbor outward to
/// the first wall or boundary; applying a split slides every cell between
/// the neighbor and the farthest empty one position outward, freeing the
/// neighbor slot for the split amount.
pub struct FarthestEmpty;

impl MoveRule for FarthestEmpty {
    fn apply_forward(&self, board: &mut BoardState, mv: Move) -> bool {
        if board.edge_blocked(mv.row, mv.col, mv.dir) {
            return false;
        }
        let v = board.get(mv.row, mv.col);
        if mv.split == 0 || v <= mv.split {
            return false;
        }
        let ray = board.ray_positions(mv.row, mv.col, mv.dir);
        let (nr, nc) = ray[0];
        // A lone 1 blocks the split.
        if board.get(nr, nc) == 1 {
            return false;
        }
        let Some(empty_idx) = ray.iter().rposition(|&(r, c)| board.get(r, c) == 0) else {
            return false;
        };

        // Slide toward the farthest empty, working backward so nothing is
        // clobbered before it is read.
        for i in (1..=empty_idx).rev() {
            let (fr, fc) = ray[i - 1];
            let (tr, tc) = ray[i];
            let weight = board.get(fr, fc);
            board.set(tr, tc, weight);
        }
        board.set(nr, nc, mv.split);
        board.set(mv.row, mv.col, v - mv.split);
        true
    }

    fn apply_reverse(
        &self,
        board: &mut BoardState,
        row: i32,
        col: i32,
        dir: Direction,
    ) -> Option<Move> {
        if board.edge_blocked(row, col, dir) {
            return None;
        }
        let ray = board.ray_positions(row, col, dir);
        let &(nr, nc) = ray.first()?;
        let split = board.get(nr, nc);
        // The forward move must be able to produce split >= 1.
        if split == 0 {
            return None;
        }

        // Pull the ray one step toward the source; the far end becomes the
        // empty slot the forward move will slide into.
        for i in 0..ray.len() - 1 {
            let (tr, tc) = ray[i];
            let (fr, fc) = ray[i + 1];
            let weight = board.get(fr, fc);
            board.set(tr, tc, weight);
        }
        let (lr, lc) = ray[ray.len() - 1];
        board.set(lr, lc, 0);
        let merged = board.get(row, col) + split;
        board.set(row, col, merged);
        Some(Move::new(row, col, dir, split))
    }
}
