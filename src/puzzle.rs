//! Core puzzle state types: directions, moves, the board, and the finished
//! puzzle container.
//!
//! A board holds a grid of non-negative cell weights plus a fixed wall
//! layout. Walls gate which adjacent-cell transitions are legal and never
//! change after generation places them.

use std::fmt;

use smallvec::SmallVec;

/// Movement direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit (row, column) delta for this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The fixed involution Up<->Down, Left<->Right.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// A single move: split the source cell's weight `v` into `v - split`
/// staying and `split` pushed into the neighbor toward `dir`.
///
/// When legal, `1 <= split < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: i32,
    pub col: i32,
    pub dir: Direction,
    pub split: u32,
}

impl Move {
    pub fn new(row: i32, col: i32, dir: Direction, split: u32) -> Self {
        Self {
            row,
            col,
            dir,
            split,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 0-based coordinates in all printouts
        write!(
            f,
            "(r={},c={}) split b={} {}",
            self.row, self.col, self.split, self.dir
        )
    }
}

/// Grid of cell weights plus the wall layout for one rows x cols board.
///
/// `clone()` produces a fully independent deep copy; the generator relies on
/// that for its snapshot-and-restore backtracking. Cell accessors take
/// signed coordinates so that neighbor arithmetic can go out of bounds and
/// be caught by [`BoardState::in_bounds`] rather than by wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    rows: usize,
    cols: usize,
    /// Row-major weights, 0 = empty.
    grid: Vec<u32>,
    /// (rows-1) x cols, wall between row r and r+1 at column c.
    v_walls: Vec<bool>,
    /// rows x (cols-1), wall between column c and c+1 at row r.
    h_walls: Vec<bool>,
}

impl BoardState {
    /// Create a board with every cell empty and no walls.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board needs at least one cell");
        Self {
            rows,
            cols,
            grid: vec![0; rows * cols],
            v_walls: vec![false; (rows - 1) * cols],
            h_walls: vec![false; rows * (cols - 1)],
        }
    }

    /// Create the solved board: every cell holds weight 1.
    pub fn solved(rows: usize, cols: usize) -> Self {
        let mut board = Self::new(rows, cols);
        board.grid.fill(1);
        board
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, r: i32, c: i32) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.cols
    }

    fn idx(&self, r: i32, c: i32) -> usize {
        debug_assert!(self.in_bounds(r, c));
        r as usize * self.cols + c as usize
    }

    /// Weight at (r, c). Callers bounds-check first.
    pub fn get(&self, r: i32, c: i32) -> u32 {
        self.grid[self.idx(r, c)]
    }

    pub fn set(&mut self, r: i32, c: i32, weight: u32) {
        let i = self.idx(r, c);
        self.grid[i] = weight;
    }

    /// Wall between row `r` and `r + 1` at column `c`.
    pub fn v_wall(&self, r: i32, c: i32) -> bool {
        self.v_walls[r as usize * self.cols + c as usize]
    }

    pub fn set_v_wall(&mut self, r: i32, c: i32, present: bool) {
        self.v_walls[r as usize * self.cols + c as usize] = present;
    }

    /// Wall between column `c` and `c + 1` at row `r`.
    pub fn h_wall(&self, r: i32, c: i32) -> bool {
        self.h_walls[r as usize * (self.cols - 1) + c as usize]
    }

    pub fn set_h_wall(&mut self, r: i32, c: i32, present: bool) {
        self.h_walls[r as usize * (self.cols - 1) + c as usize] = present;
    }

    /// True if the neighbor of (r, c) toward `dir` is out of bounds or
    /// separated from it by a wall.
    pub fn edge_blocked(&self, r: i32, c: i32, dir: Direction) -> bool {
        let (dr, dc) = dir.delta();
        if !self.in_bounds(r, c) || !self.in_bounds(r + dr, c + dc) {
            return true;
        }
        match dir {
            Direction::Up => self.v_wall(r - 1, c),
            Direction::Down => self.v_wall(r, c),
            Direction::Left => self.h_wall(r, c - 1),
            Direction::Right => self.h_wall(r, c),
        }
    }

    /// Cells from the neighbor of (r, c) outward along `dir`, stopping at
    /// the first walled or boundary edge. The cell whose far edge stops the
    /// walk is still included.
    pub fn ray_positions(&self, r: i32, c: i32, dir: Direction) -> SmallVec<[(i32, i32); 8]> {
        let (dr, dc) = dir.delta();
        let mut positions = SmallVec::new();
        let mut pr = r + dr;
        let mut pc = c + dc;
        while self.in_bounds(pr, pc) {
            positions.push((pr, pc));
            if self.edge_blocked(pr, pc, dir) {
                break;
            }
            pr += dr;
            pc += dc;
        }
        positions
    }

    /// Total weight on the board; conserved by every legal move.
    pub fn sum(&self) -> u64 {
        self.grid.iter().map(|&w| u64::from(w)).sum()
    }

    /// True when every cell holds exactly weight 1 (the solved state).
    pub fn is_all_ones(&self) -> bool {
        self.grid.iter().all(|&w| w == 1)
    }
}

/// A generated puzzle: the scrambled start state plus the forward move
/// sequence that solves it.
///
/// Both parts are produced once at generation time and read-only afterward.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub start: BoardState,
    pub solution: Vec<Move>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn solved_board_sums_to_cell_count() {
        let board = BoardState::solved(6, 6);
        assert_eq!(board.sum(), 36);
        assert!(board.is_all_ones());
    }

    #[test]
    fn edge_blocked_at_boundary() {
        let board = BoardState::new(2, 3);
        assert!(board.edge_blocked(0, 0, Direction::Up));
        assert!(board.edge_blocked(0, 0, Direction::Left));
        assert!(!board.edge_blocked(0, 0, Direction::Down));
        assert!(!board.edge_blocked(0, 0, Direction::Right));
        assert!(board.edge_blocked(1, 2, Direction::Down));
        assert!(board.edge_blocked(1, 2, Direction::Right));
    }

    #[test]
    fn edge_blocked_by_walls() {
        let mut board = BoardState::new(3, 3);
        board.set_v_wall(0, 1, true); // between (0,1) and (1,1)
        board.set_h_wall(2, 0, true); // between (2,0) and (2,1)

        assert!(board.edge_blocked(0, 1, Direction::Down));
        assert!(board.edge_blocked(1, 1, Direction::Up));
        assert!(board.edge_blocked(2, 0, Direction::Right));
        assert!(board.edge_blocked(2, 1, Direction::Left));
        assert!(!board.edge_blocked(1, 1, Direction::Down));
    }

    #[test]
    fn ray_stops_at_wall_and_boundary() {
        let mut board = BoardState::new(1, 4);
        let full: Vec<(i32, i32)> = board.ray_positions(0, 0, Direction::Right).to_vec();
        assert_eq!(full, vec![(0, 1), (0, 2), (0, 3)]);

        board.set_h_wall(0, 1, true); // between (0,1) and (0,2)
        let cut: Vec<(i32, i32)> = board.ray_positions(0, 0, Direction::Right).to_vec();
        assert_eq!(cut, vec![(0, 1)]);

        // Neighbor out of bounds: empty ray.
        assert!(board.ray_positions(0, 3, Direction::Right).is_empty());
    }

    #[test]
    fn clone_is_deep() {
        let mut original = BoardState::solved(2, 2);
        let copy = original.clone();
        original.set(0, 0, 9);
        original.set_v_wall(0, 1, true);
        assert_eq!(copy.get(0, 0), 1);
        assert!(!copy.v_wall(0, 1));
    }

    #[test]
    fn move_display_is_zero_based() {
        let mv = Move::new(0, 1, Direction::Right, 2);
        assert_eq!(mv.to_string(), "(r=0,c=1) split b=2 right");
    }
}
