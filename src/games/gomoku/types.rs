//! Core domain types for gomoku.

use super::position::{BOARD_SIZE, CELL_COUNT, Cell};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stone a player places.
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
)]
pub enum Stone {
    /// Black stone (moves first).
    Black,
    /// White stone (moves second).
    White,
}

impl Stone {
    /// Returns the opponent's stone.
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Stone that plays the move at position `ply` in the history (zero-based).
    pub fn for_ply(ply: usize) -> Self {
        if ply % 2 == 0 { Stone::Black } else { Stone::White }
    }

    fn symbol(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
        }
    }
}

/// 15x15 board as a sparse map from cell to stone.
///
/// A cell with no entry is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    stones: BTreeMap<Cell, Stone>,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the stone at the given cell, if any.
    pub fn get(&self, cell: Cell) -> Option<Stone> {
        self.stones.get(&cell).copied()
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        !self.stones.contains_key(&cell)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.stones.len()
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.stones.len() == CELL_COUNT
    }

    /// Iterates over occupied cells in index order.
    pub fn stones(&self) -> impl Iterator<Item = (Cell, Stone)> + '_ {
        self.stones.iter().map(|(cell, stone)| (*cell, *stone))
    }

    /// Places a stone on an empty cell. Returns `false` if the cell was occupied.
    pub(super) fn place(&mut self, cell: Cell, stone: Stone) -> bool {
        if self.stones.contains_key(&cell) {
            return false;
        }
        self.stones.insert(cell, stone);
        true
    }

    /// Clears a cell, returning the stone that was there.
    pub(super) fn clear(&mut self, cell: Cell) -> Option<Stone> {
        self.stones.remove(&cell)
    }

    /// Formats the board as a human-readable grid with lettered columns.
    ///
    /// `X` is Black, `O` is White, `.` is empty. Cells in `highlight`
    /// are drawn in lowercase.
    pub fn display(&self, highlight: &[Cell]) -> String {
        let mut result = String::new();
        for y in 0..BOARD_SIZE {
            result.push_str(&format!("{:>2} ", BOARD_SIZE - y));
            for x in 0..BOARD_SIZE {
                let Ok(cell) = Cell::from_coords(x, y) else {
                    continue;
                };
                let symbol = match self.get(cell) {
                    None => '.',
                    Some(stone) if highlight.contains(&cell) => stone.symbol().to_ascii_lowercase(),
                    Some(stone) => stone.symbol(),
                };
                result.push(symbol);
                if x + 1 < BOARD_SIZE {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        result.push_str("   ");
        let letters: Vec<String> = (0..BOARD_SIZE)
            .map(|x| ((b'A' + x as u8) as char).to_string())
            .collect();
        result.push_str(&letters.join(" "));
        result
    }
}

/// Complete game state as seen by callers.
///
/// Only the engine mutates this; callers get clones or shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Stone to move. Stays on the winner once the game is won.
    turn: Stone,
    /// Winning stone, once a line of five is made.
    winner: Option<Stone>,
    /// Cells of the winning line; empty while there is no winner.
    winning_line: Vec<Cell>,
    /// Cells played, in order.
    history: Vec<Cell>,
}

impl GameState {
    /// Creates a fresh game: empty board, Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Stone::Black,
            winner: None,
            winning_line: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the stone to move.
    pub fn turn(&self) -> Stone {
        self.turn
    }

    /// Returns the winner, if the game is over.
    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    /// Returns the winning line (empty while there is no winner).
    pub fn winning_line(&self) -> &[Cell] {
        &self.winning_line
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Cell] {
        &self.history
    }

    /// Returns the most recently played cell.
    pub fn last_move(&self) -> Option<Cell> {
        self.history.last().copied()
    }

    /// Checks if a winner has been recorded.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Records a stone on the board and in the history (unchecked - use the engine for validation).
    pub(super) fn apply_move(&mut self, cell: Cell, stone: Stone) {
        if self.board.place(cell, stone) {
            self.history.push(cell);
        }
    }

    /// Removes the last move from the board and history.
    pub(super) fn pop_move(&mut self) -> Option<(Cell, Stone)> {
        let cell = self.history.pop()?;
        let stone = self.board.clear(cell)?;
        Some((cell, stone))
    }

    /// Sets the stone to move.
    pub(super) fn set_turn(&mut self, stone: Stone) {
        self.turn = stone;
    }

    /// Records the winner and their line.
    pub(super) fn set_winner(&mut self, stone: Stone, line: Vec<Cell>) {
        self.winner = Some(stone);
        self.winning_line = line;
    }

    #[cfg(test)]
    pub(super) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(super) fn history_mut(&mut self) -> &mut Vec<Cell> {
        &mut self.history
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
