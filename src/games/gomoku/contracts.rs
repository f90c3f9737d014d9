//! Contract-based validation for gomoku.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}.

use super::action::MoveError;
use super::invariants::{GomokuInvariants, InvariantSet};
use super::position::Cell;
use super::types::GameState;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: No winner has been recorded.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] once a winner exists.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        match state.winner() {
            Some(winner) => Err(MoveError::GameOver(winner)),
            None => Ok(()),
        }
    }
}

/// Precondition: The target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`MoveError::CellOccupied`] if a stone is already there.
    #[instrument(skip(state))]
    pub fn check(cell: Cell, state: &GameState) -> Result<(), MoveError> {
        if state.board().is_empty(cell) {
            Ok(())
        } else {
            Err(MoveError::CellOccupied(cell))
        }
    }
}

/// Precondition: There is a move to take back.
pub struct HasHistory;

impl HasHistory {
    /// Fails with [`MoveError::NothingToUndo`] on an empty history.
    #[instrument(skip(state))]
    pub fn check(state: &GameState) -> Result<(), MoveError> {
        if state.history().is_empty() {
            Err(MoveError::NothingToUndo)
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: a placement is legal if the game is open and the cell is empty.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    #[instrument(skip(state))]
    pub fn check(cell: Cell, state: &GameState) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        CellIsEmpty::check(cell, state)?;
        Ok(())
    }
}

fn check_invariants(after: &GameState) -> Result<(), MoveError> {
    GomokuInvariants::check_all(after).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

// ─────────────────────────────────────────────────────────────
//  Transition Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for placing a stone.
///
/// Preconditions:
/// - Game not over
/// - Cell empty
///
/// Postconditions:
/// - All [`GomokuInvariants`] hold
pub struct PlaceContract;

impl Contract<GameState, Cell> for PlaceContract {
    fn pre(state: &GameState, cell: &Cell) -> Result<(), MoveError> {
        LegalPlacement::check(*cell, state)
    }

    fn post(after: &GameState) -> Result<(), MoveError> {
        check_invariants(after)
    }
}

/// Contract for taking back the last move.
///
/// Undo is refused once the game is won: a finished game is terminal and
/// has to be restarted.
pub struct UndoContract;

impl Contract<GameState, ()> for UndoContract {
    fn pre(state: &GameState, _action: &()) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        HasHistory::check(state)?;
        Ok(())
    }

    fn post(after: &GameState) -> Result<(), MoveError> {
        check_invariants(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::gomoku::{GameEngine, Stone};

    #[test]
    fn test_precondition_empty_cell() {
        let state = GameState::new();
        assert!(PlaceContract::pre(&state, &Cell::new(112).unwrap()).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let mut engine = GameEngine::new();
        engine.place_stone(112);
        let center = Cell::new(112).unwrap();
        assert_eq!(
            PlaceContract::pre(engine.state(), &center),
            Err(MoveError::CellOccupied(center))
        );
    }

    #[test]
    fn test_precondition_game_over() {
        let mut engine = GameEngine::new();
        for x in 0..4 {
            engine.place_stone(x);
            engine.place_stone(30 + x);
        }
        engine.place_stone(4);

        assert_eq!(
            PlaceContract::pre(engine.state(), &Cell::new(200).unwrap()),
            Err(MoveError::GameOver(Stone::Black))
        );
        assert_eq!(
            UndoContract::pre(engine.state(), &()),
            Err(MoveError::GameOver(Stone::Black))
        );
    }

    #[test]
    fn test_undo_needs_history() {
        assert_eq!(
            UndoContract::pre(&GameState::new(), &()),
            Err(MoveError::NothingToUndo)
        );
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let mut state = GameState::new();
        state.board_mut().place(Cell::new(3).unwrap(), Stone::Black);
        assert!(matches!(
            PlaceContract::post(&state),
            Err(MoveError::InvariantViolation(_))
        ));
    }
}
