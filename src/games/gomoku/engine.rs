//! The gomoku state machine.
//!
//! [`GameEngine`] is the sole mutator of a [`GameState`]. It offers two
//! flavours of each transition: `place_stone`/`undo` silently ignore
//! illegal requests, the way a board UI ignores clicks on occupied cells,
//! while `try_place_stone`/`try_undo` report why a request was refused.

use super::action::{MoveError, Outcome, Placement};
use super::contracts::{Contract, PlaceContract, UndoContract};
use super::position::Cell;
use super::rules::check_win;
use super::types::GameState;
use tracing::{debug, info, instrument, warn};

/// Owner of a single live game.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: GameState,
    revision: u64,
}

impl GameEngine {
    /// Creates an engine holding a fresh game.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns an owned copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Counter bumped by every accepted transition, including restarts.
    ///
    /// Anything computed from an earlier revision describes a stale board.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Places the current player's stone at `index`, ignoring illegal requests.
    ///
    /// Out-of-range indices, occupied cells and moves after a win leave the
    /// state untouched.
    #[instrument(skip(self))]
    pub fn place_stone(&mut self, index: usize) {
        if let Err(e) = self.try_place_stone(index) {
            debug!(error = %e, "Placement ignored");
        }
    }

    /// Takes back the last move, ignoring the request if there is none or the game is won.
    #[instrument(skip(self))]
    pub fn undo(&mut self) {
        if let Err(e) = self.try_undo() {
            debug!(error = %e, "Undo ignored");
        }
    }

    /// Discards the current game and starts a fresh one with Black to move.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!(moves = self.state.history().len(), "Restarting game");
        self.state = GameState::new();
        self.revision += 1;
    }

    /// Places the current player's stone at `index`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::OutOfBounds`] if `index` is not on the board
    /// - [`MoveError::GameOver`] if a winner was already recorded
    /// - [`MoveError::CellOccupied`] if the cell holds a stone
    /// - [`MoveError::InvariantViolation`] if the transition broke an invariant
    ///   (debug builds only; the state is rolled back)
    #[instrument(skip(self), fields(turn = %self.state.turn()))]
    pub fn try_place_stone(&mut self, index: usize) -> Result<Placement, MoveError> {
        let cell = Cell::new(index).map_err(|_| MoveError::OutOfBounds(index))?;
        PlaceContract::pre(&self.state, &cell)?;

        let before = self.checkpoint();
        let stone = self.state.turn();
        self.state.apply_move(cell, stone);

        let outcome = match check_win(self.state.board(), cell, stone) {
            Some(line) => {
                info!(%stone, %cell, length = line.len(), "Game won");
                self.state.set_winner(stone, line.cells().to_vec());
                Outcome::Won { line }
            }
            None => {
                let next = stone.opponent();
                self.state.set_turn(next);
                Outcome::Continue { next }
            }
        };

        self.verify::<PlaceContract, Cell>(before)?;

        self.revision += 1;
        debug!(%stone, %cell, revision = self.revision, "Stone placed");
        Ok(Placement {
            cell,
            stone,
            outcome,
        })
    }

    /// Takes back the last move and returns the cell it occupied.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if a winner was recorded
    /// - [`MoveError::NothingToUndo`] if no moves have been played
    #[instrument(skip(self))]
    pub fn try_undo(&mut self) -> Result<Cell, MoveError> {
        UndoContract::pre(&self.state, &())?;

        let before = self.checkpoint();
        let (cell, stone) = self.state.pop_move().ok_or(MoveError::NothingToUndo)?;
        self.state.set_turn(stone);

        self.verify::<UndoContract, ()>(before)?;

        self.revision += 1;
        debug!(%stone, %cell, revision = self.revision, "Move undone");
        Ok(cell)
    }

    /// Copy of the state to roll back to, taken only when postconditions are checked.
    fn checkpoint(&self) -> Option<GameState> {
        cfg!(debug_assertions).then(|| self.state.clone())
    }

    /// Checks `C`'s postconditions and restores `before` if they fail.
    ///
    /// Release builds skip the sweep, leaving each move at the cost of the
    /// local win check.
    fn verify<C: Contract<GameState, A>, A>(
        &mut self,
        before: Option<GameState>,
    ) -> Result<(), MoveError> {
        let Some(before) = before else {
            return Ok(());
        };
        if let Err(e) = C::post(&self.state) {
            warn!(error = %e, "Postcondition failed, rolling back");
            self.state = before;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::gomoku::Stone;

    #[test]
    fn test_first_move_is_black() {
        let mut engine = GameEngine::new();
        let placement = engine.try_place_stone(112).unwrap();
        assert_eq!(placement.stone, Stone::Black);
        assert_eq!(
            placement.outcome,
            Outcome::Continue {
                next: Stone::White
            }
        );
        assert_eq!(engine.state().turn(), Stone::White);
    }

    #[test]
    fn test_rejections_do_not_bump_revision() {
        let mut engine = GameEngine::new();
        engine.place_stone(112);
        let revision = engine.revision();

        assert_eq!(
            engine.try_place_stone(112),
            Err(MoveError::CellOccupied(Cell::new(112).unwrap()))
        );
        assert_eq!(engine.try_place_stone(225), Err(MoveError::OutOfBounds(225)));
        assert_eq!(engine.revision(), revision);
    }

    #[test]
    fn test_undo_returns_cell_and_restores_turn() {
        let mut engine = GameEngine::new();
        engine.place_stone(112);
        engine.place_stone(113);
        assert_eq!(engine.try_undo(), Ok(Cell::new(113).unwrap()));
        assert_eq!(engine.state().turn(), Stone::White);
        assert_eq!(engine.try_undo(), Ok(Cell::new(112).unwrap()));
        assert_eq!(engine.state().turn(), Stone::Black);
        assert_eq!(engine.try_undo(), Err(MoveError::NothingToUndo));
    }

    #[test]
    #[cfg(debug_assertions)]
    fn test_broken_invariant_rolls_back() {
        let mut engine = GameEngine::new();
        // A stone with no matching history entry.
        engine
            .state
            .board_mut()
            .place(Cell::new(0).unwrap(), Stone::White);
        let before = engine.snapshot();

        assert!(matches!(
            engine.try_place_stone(112),
            Err(MoveError::InvariantViolation(_))
        ));
        assert_eq!(*engine.state(), before);
        assert_eq!(engine.revision(), 0);
    }

    #[test]
    fn test_restart_bumps_revision() {
        let mut engine = GameEngine::new();
        engine.place_stone(0);
        let revision = engine.revision();
        engine.restart();
        assert_eq!(engine.revision(), revision + 1);
        assert_eq!(*engine.state(), GameState::new());
    }
}
