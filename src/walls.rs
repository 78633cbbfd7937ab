//! Random wall placement.
//!
//! Walls are drawn without replacement from the combined pool of vertical
//! and horizontal wall slots, so a request can never place duplicates.

use crate::puzzle::BoardState;
use crate::rng::RandomSource;

/// One assignable wall slot on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WallSlot {
    /// Between row `row` and `row + 1` at column `col`.
    Vertical { row: i32, col: i32 },
    /// Between column `col` and `col + 1` at row `row`.
    Horizontal { row: i32, col: i32 },
}

/// Place up to `count` walls on `board`, drawn uniformly without replacement
/// from every vertical and horizontal slot. Returns the number actually
/// placed, which is smaller than `count` only when the board has fewer
/// slots than requested.
pub fn place_random_walls(board: &mut BoardState, rng: &mut RandomSource, count: usize) -> usize {
    let rows = board.rows() as i32;
    let cols = board.cols() as i32;

    let mut slots: Vec<WallSlot> = Vec::with_capacity(
        board.rows().saturating_sub(1) * board.cols() + board.rows() * board.cols().saturating_sub(1),
    );
    for row in 0..rows - 1 {
        for col in 0..cols {
            slots.push(WallSlot::Vertical { row, col });
        }
    }
    for row in 0..rows {
        for col in 0..cols - 1 {
            slots.push(WallSlot::Horizontal { row, col });
        }
    }

    rng.shuffle(&mut slots);
    let placed = count.min(slots.len());
    for slot in slots.into_iter().take(placed) {
        match slot {
            WallSlot::Vertical { row, col } => board.set_v_wall(row, col, true),
            WallSlot::Horizontal { row, col } => board.set_h_wall(row, col, true),
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_count(board: &BoardState) -> usize {
        let rows = board.rows() as i32;
        let cols = board.cols() as i32;
        let mut total = 0;
        for r in 0..rows - 1 {
            for c in 0..cols {
                if board.v_wall(r, c) {
                    total += 1;
                }
            }
        }
        for r in 0..rows {
            for c in 0..cols - 1 {
                if board.h_wall(r, c) {
                    total += 1;
                }
            }
        }
        total
    }

    #[test]
    fn places_exactly_requested_count() {
        let mut board = BoardState::solved(4, 4);
        let mut rng = RandomSource::new(11);
        let placed = place_random_walls(&mut board, &mut rng, 5);
        assert_eq!(placed, 5);
        assert_eq!(wall_count(&board), 5);
    }

    #[test]
    fn caps_at_available_slots() {
        // A 2x2 board has 2 vertical and 2 horizontal slots.
        let mut board = BoardState::solved(2, 2);
        let mut rng = RandomSource::new(3);
        let placed = place_random_walls(&mut board, &mut rng, 10);
        assert_eq!(placed, 4);
        assert_eq!(wall_count(&board), 4);
    }

    #[test]
    fn zero_walls_leaves_board_open() {
        let mut board = BoardState::solved(3, 3);
        let mut rng = RandomSource::new(8);
        assert_eq!(place_random_walls(&mut board, &mut rng, 0), 0);
        assert_eq!(wall_count(&board), 0);
    }

    #[test]
    fn placement_is_deterministic() {
        let mut a = BoardState::solved(5, 5);
        let mut b = BoardState::solved(5, 5);
        let mut rng_a = RandomSource::new(21);
        let mut rng_b = RandomSource::new(21);
        place_random_walls(&mut a, &mut rng_a, 6);
        place_random_walls(&mut b, &mut rng_b, 6);
        assert_eq!(a, b);
    }

    #[test]
    fn single_row_board_has_only_horizontal_slots() {
        let mut board = BoardState::solved(1, 4);
        let mut rng = RandomSource::new(2);
        let placed = place_random_walls(&mut board, &mut rng, 10);
        assert_eq!(placed, 3);
    }
}
