//! Monotonic board invariant: the board is exactly the replay of its history.

use super::super::{Board, GameState, Stone};
use super::Invariant;

/// Invariant: Replaying the history onto an empty board reproduces the board.
///
/// Every replayed move must land on an empty cell, so an occupant is never
/// overwritten; cells are only ever cleared by taking back the last move.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let mut reconstructed = Board::new();

        for (ply, cell) in state.history().iter().enumerate() {
            if !reconstructed.place(*cell, Stone::for_ply(ply)) {
                return false;
            }
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board equals the replay of its move history"
    }
}
