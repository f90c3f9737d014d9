//! Win detection for gomoku.
//!
//! The check is local: it only scans the four lines through the cell
//! that was just played, so it costs at most 4 axes x 8 probes per move
//! regardless of how full the board is.

use super::super::position::Cell;
use super::super::types::{Board, Stone};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Stones in a row needed to win. Longer lines also win.
pub const WIN_LENGTH: usize = 5;

/// A line direction through a cell.
///
/// Iteration order is the tie-break when one move completes several
/// lines at once: the first axis that qualifies is reported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    DiagonalDown,
    /// Bottom-left to top-right.
    DiagonalUp,
}

impl Axis {
    /// Unit step `(dx, dy)` in the positive direction.
    pub fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
            Axis::DiagonalDown => (1, 1),
            Axis::DiagonalUp => (1, -1),
        }
    }
}

/// A qualifying line of same-coloured stones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    axis: Axis,
    cells: Vec<Cell>,
}

impl WinningLine {
    /// Axis the line runs along.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Cells in scan order: the seed, then the positive walk, then the negative walk.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of stones in the line.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a line returned by [`check_win`].
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the line, returning its cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Checks whether `stone` at `cell` completes five or more in a row.
///
/// Walks up to four steps each way along every axis, stopping at the board
/// edge or the first cell not holding `stone`. The seed cell is always part
/// of the line.
#[instrument(skip_all, fields(cell = %cell, stone = %stone))]
pub fn check_win(board: &Board, cell: Cell, stone: Stone) -> Option<WinningLine> {
    let reach = WIN_LENGTH as isize;

    for axis in Axis::iter() {
        let (dx, dy) = axis.step();
        let mut cells = vec![cell];

        for direction in [1, -1] {
            for i in 1..reach {
                match cell.offset(dx * i * direction, dy * i * direction) {
                    Some(next) if board.get(next) == Some(stone) => cells.push(next),
                    _ => break,
                }
            }
        }

        if cells.len() >= WIN_LENGTH {
            debug!(%axis, length = cells.len(), "Winning line found");
            return Some(WinningLine { axis, cells });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: usize, y: usize) -> Cell {
        Cell::from_coords(x, y).unwrap()
    }

    fn board_with(stones: &[((usize, usize), Stone)]) -> Board {
        let mut board = Board::new();
        for ((x, y), stone) in stones {
            board.place(cell(*x, *y), *stone);
        }
        board
    }

    #[test]
    fn test_no_win_lone_stone() {
        let board = board_with(&[((7, 7), Stone::Black)]);
        assert_eq!(check_win(&board, cell(7, 7), Stone::Black), None);
    }

    #[test]
    fn test_seed_in_middle_walks_both_ways() {
        let board = board_with(&[
            ((3, 7), Stone::Black),
            ((4, 7), Stone::Black),
            ((5, 7), Stone::Black),
            ((6, 7), Stone::Black),
            ((7, 7), Stone::Black),
        ]);
        let line = check_win(&board, cell(5, 7), Stone::Black).unwrap();
        assert_eq!(line.axis(), Axis::Horizontal);
        assert_eq!(
            line.cells(),
            &[cell(5, 7), cell(6, 7), cell(7, 7), cell(4, 7), cell(3, 7)]
        );
    }

    #[test]
    fn test_up_right_diagonal() {
        let board = board_with(&[
            ((0, 14), Stone::White),
            ((1, 13), Stone::White),
            ((2, 12), Stone::White),
            ((3, 11), Stone::White),
            ((4, 10), Stone::White),
        ]);
        let line = check_win(&board, cell(0, 14), Stone::White).unwrap();
        assert_eq!(line.axis(), Axis::DiagonalUp);
        assert_eq!(line.len(), 5);
    }

    #[test]
    fn test_line_does_not_wrap_rows() {
        // Three at the end of row 0 and two at the start of row 1 are
        // contiguous indices but not a line.
        let board = board_with(&[
            ((12, 0), Stone::Black),
            ((13, 0), Stone::Black),
            ((14, 0), Stone::Black),
            ((0, 1), Stone::Black),
            ((1, 1), Stone::Black),
        ]);
        assert_eq!(check_win(&board, cell(14, 0), Stone::Black), None);
        assert_eq!(check_win(&board, cell(0, 1), Stone::Black), None);
    }

    #[test]
    fn test_horizontal_reported_before_vertical() {
        let mut stones = Vec::new();
        for i in 3..8 {
            stones.push(((i, 7), Stone::Black));
            stones.push(((7, i), Stone::Black));
        }
        let board = board_with(&stones);
        let line = check_win(&board, cell(7, 7), Stone::Black).unwrap();
        assert_eq!(line.axis(), Axis::Horizontal);
    }

    #[test]
    fn test_walk_is_capped_at_four_steps() {
        // Nine in a row with the seed in the middle: four each way plus the seed.
        let stones: Vec<_> = (2..11).map(|x| ((x, 0), Stone::Black)).collect();
        let board = board_with(&stones);
        let line = check_win(&board, cell(6, 0), Stone::Black).unwrap();
        assert_eq!(line.len(), 9);

        // Ten in a row seeded at the end: only four more are collected.
        let stones: Vec<_> = (0..10).map(|x| ((x, 1), Stone::Black)).collect();
        let board = board_with(&stones);
        let line = check_win(&board, cell(0, 1), Stone::Black).unwrap();
        assert_eq!(line.len(), 5);
    }
}
