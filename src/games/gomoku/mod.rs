mod action;
mod contracts;
mod engine;
mod invariants;
mod position;
mod rules;
mod types;

pub use action::{MoveError, Outcome, Placement};
pub use contracts::{
    CellIsEmpty, Contract, GameNotOver, HasHistory, LegalPlacement, PlaceContract, UndoContract,
};
pub use engine::GameEngine;
pub use invariants::{
    AlternatingTurnInvariant, GomokuInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, MonotonicBoardInvariant, WinnerConsistentInvariant,
};
pub use position::{BOARD_SIZE, CELL_COUNT, Cell, CellError};
pub use rules::{Axis, WIN_LENGTH, WinningLine, check_win};
pub use types::{Board, GameState, Stone};
