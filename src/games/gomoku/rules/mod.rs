//! Game rules for gomoku.
//!
//! Pure functions over the board, kept apart from board storage so the
//! engine and the contracts can share them.

pub mod win;

pub use win::{Axis, WIN_LENGTH, WinningLine, check_win};
