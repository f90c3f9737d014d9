//! Cell addressing for the 15x15 gomoku board.
//!
//! A cell is a row-major index `y * BOARD_SIZE + x`. The index is the
//! canonical move identifier; coordinates and the lettered notation are
//! derived views of it.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const BOARD_SIZE: usize = 15;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A validated cell on the board.
///
/// Constructed only through checked constructors, so every `Cell`
/// in circulation addresses a real square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Cell(usize);

impl Cell {
    /// Creates a cell from a row-major index.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::OutOfBounds`] if `index >= CELL_COUNT`.
    pub fn new(index: usize) -> Result<Self, CellError> {
        if index < CELL_COUNT {
            Ok(Self(index))
        } else {
            Err(CellError::OutOfBounds(index))
        }
    }

    /// Creates a cell from column `x` and row `y` (both zero-based, `y = 0` at the top).
    ///
    /// # Errors
    ///
    /// Returns [`CellError::CoordinatesOutOfBounds`] if either coordinate is off the board.
    pub fn from_coords(x: usize, y: usize) -> Result<Self, CellError> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Ok(Self(y * BOARD_SIZE + x))
        } else {
            Err(CellError::CoordinatesOutOfBounds { x, y })
        }
    }

    /// Parses lettered notation such as `H8` or `a15`.
    ///
    /// The column letter starts at `A` for `x = 0`. The row number counts
    /// from the bottom: row 1 is `y = 14`, row 15 is `y = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidNotation`] if the text is not a cell on the board.
    #[instrument]
    pub fn parse(notation: &str) -> Result<Self, CellError> {
        let invalid = || CellError::InvalidNotation(notation.to_string());
        let trimmed = notation.trim();

        let mut chars = trimmed.chars();
        let column = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
        if !column.is_ascii_uppercase() {
            return Err(invalid());
        }
        let x = (column as u8 - b'A') as usize;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 || row > BOARD_SIZE {
            return Err(invalid());
        }

        Self::from_coords(x, BOARD_SIZE - row).map_err(|_| invalid())
    }

    /// Returns the row-major index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the zero-based column.
    pub fn x(self) -> usize {
        self.0 % BOARD_SIZE
    }

    /// Returns the zero-based row, counted from the top.
    pub fn y(self) -> usize {
        self.0 / BOARD_SIZE
    }

    /// Column letter, `A` for `x = 0`.
    pub fn column_letter(self) -> char {
        (b'A' + self.x() as u8) as char
    }

    /// Row number as displayed, `1` at the bottom edge.
    pub fn row_number(self) -> usize {
        BOARD_SIZE - self.y()
    }

    /// Formats the cell in lettered notation (e.g. `H8`).
    pub fn notation(self) -> String {
        format!("{}{}", self.column_letter(), self.row_number())
    }

    /// Returns the cell displaced by `(dx, dy)`, or `None` if that leaves the board.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let x = self.x().checked_add_signed(dx)?;
        let y = self.y().checked_add_signed(dy)?;
        Self::from_coords(x, y).ok()
    }

    /// Iterates over every cell in index order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT).map(Cell)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl FromStr for Cell {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<usize> for Cell {
    type Error = CellError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Cell> for usize {
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

/// Error constructing a [`Cell`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CellError {
    /// Index is not below `CELL_COUNT`.
    #[display("Cell index {} is off the board", _0)]
    OutOfBounds(usize),

    /// Coordinates are not both below `BOARD_SIZE`.
    #[display("Coordinates ({}, {}) are off the board", x, y)]
    CoordinatesOutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// Text is not a cell in lettered notation.
    #[display("Invalid cell notation: {:?}", _0)]
    InvalidNotation(String),
}

impl std::error::Error for CellError {}
