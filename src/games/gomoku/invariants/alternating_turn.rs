//! Alternating turn invariant: Black, White, Black, White, ...

use super::super::{GameState, Stone};
use super::Invariant;

/// Invariant: Stones alternate, starting with Black.
///
/// The stone at `history[i]` is Black iff `i` is even. While the game is
/// open the stone to move follows the same rule; once won, the turn stays
/// with the winner, who also made the last move.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let alternates = state
            .history()
            .iter()
            .enumerate()
            .all(|(ply, cell)| state.board().get(*cell) == Some(Stone::for_ply(ply)));

        if !alternates {
            return false;
        }

        match state.winner() {
            None => state.turn() == Stone::for_ply(state.history().len()),
            Some(winner) => {
                let last_player = state
                    .history()
                    .len()
                    .checked_sub(1)
                    .map(Stone::for_ply);
                state.turn() == winner && last_player == Some(winner)
            }
        }
    }

    fn description() -> &'static str {
        "Stones alternate Black, White, ... with Black first"
    }
}
