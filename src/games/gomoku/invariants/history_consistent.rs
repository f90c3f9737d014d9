//! History consistency invariant: one history entry per occupied cell.

use super::super::GameState;
use super::Invariant;
use std::collections::BTreeSet;

/// Invariant: History length equals the number of occupied cells, and no
/// cell appears twice in the history.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        let history = state.history();
        let distinct: BTreeSet<_> = history.iter().collect();

        distinct.len() == history.len() && history.len() == state.board().occupied()
    }

    fn description() -> &'static str {
        "History length matches occupied cells with no repeated cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::gomoku::{Cell, GameEngine, Stone};

    #[test]
    fn test_empty_game_holds() {
        assert!(HistoryConsistentInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_moves_and_undo_hold() {
        let mut engine = GameEngine::new();
        engine.place_stone(0);
        engine.place_stone(1);
        engine.place_stone(2);
        assert!(HistoryConsistentInvariant::holds(engine.state()));
        assert_eq!(engine.state().history().len(), 3);

        engine.undo();
        assert!(HistoryConsistentInvariant::holds(engine.state()));
        assert_eq!(engine.state().history().len(), 2);
    }

    #[test]
    fn test_stone_without_history_violates() {
        let mut state = GameState::new();
        state.board_mut().place(Cell::new(10).unwrap(), Stone::Black);
        assert!(!HistoryConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_duplicate_history_violates() {
        let mut state = GameState::new();
        let cell = Cell::new(10).unwrap();
        state.board_mut().place(cell, Stone::Black);
        state.board_mut().place(Cell::new(11).unwrap(), Stone::White);
        state.history_mut().extend([cell, cell]);
        assert!(!HistoryConsistentInvariant::holds(&state));
    }
}
