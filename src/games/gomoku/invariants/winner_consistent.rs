//! Winner consistency invariant: a recorded win is backed by a real line.

use super::super::rules::WIN_LENGTH;
use super::super::GameState;
use super::Invariant;

/// Invariant: The winner and winning line are set together.
///
/// With no winner the line is empty. With a winner the line holds at least
/// five of the winner's stones and includes the last move played.
pub struct WinnerConsistentInvariant;

impl Invariant<GameState> for WinnerConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let line = state.winning_line();

        match state.winner() {
            None => line.is_empty(),
            Some(winner) => {
                line.len() >= WIN_LENGTH
                    && line.iter().all(|cell| state.board().get(*cell) == Some(winner))
                    && state.last_move().is_some_and(|last| line.contains(&last))
            }
        }
    }

    fn description() -> &'static str {
        "Winner is recorded with a line of five through the last move"
    }
}
