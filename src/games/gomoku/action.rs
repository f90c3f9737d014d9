//! Results and errors of engine transitions.

use super::position::Cell;
use super::rules::WinningLine;
use super::types::Stone;
use serde::{Deserialize, Serialize};

/// What a successful placement led to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Game continues with the given stone to move.
    Continue {
        /// Stone due to move next.
        next: Stone,
    },
    /// The placement completed a winning line.
    Won {
        /// The line that won.
        line: WinningLine,
    },
}

/// A stone that was accepted onto the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Where the stone went.
    pub cell: Cell,
    /// Who played it.
    pub stone: Stone,
    /// What happened next.
    pub outcome: Outcome,
}

impl Placement {
    /// Returns the winning line if this placement ended the game.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        match &self.outcome {
            Outcome::Won { line } => Some(line),
            Outcome::Continue { .. } => None,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.stone, self.cell)
    }
}

/// Why an engine operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Index is not a cell on the board.
    #[display("Cell index {} is off the board", _0)]
    OutOfBounds(usize),

    /// The cell already holds a stone.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Cell),

    /// The game was won; restart to play again.
    #[display("Game is already over ({} won)", _0)]
    GameOver(Stone),

    /// There is no move to take back.
    #[display("No moves to undo")]
    NothingToUndo,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
