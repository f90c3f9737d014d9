//! Zen Gomoku library - five-in-a-row with history, undo, and sage commentary
//!
//! # Architecture
//!
//! - **Games**: the gomoku state machine (board, win detection, history/undo)
//! - **Advisory**: optional LLM commentary on a position, isolated from game state
//! - **Session**: one engine plus the advisory text displayed beside it
//! - **Console**: line-oriented terminal host
//!
//! # Example
//!
//! ```
//! use zen_gomoku::{GameEngine, Stone};
//!
//! let mut engine = GameEngine::new();
//! for x in 0..4 {
//!     engine.place_stone(7 * 15 + x); // Black along row 8
//!     engine.place_stone(8 * 15 + x); // White along row 7
//! }
//! engine.place_stone(7 * 15 + 4);
//!
//! assert_eq!(engine.state().winner(), Some(Stone::Black));
//! assert_eq!(engine.state().winning_line().len(), 5);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod advisor_config;
mod advisory;
mod games;
mod llm_client;
mod session;

pub mod console;

// Crate-level exports - Advisor configuration
pub use advisor_config::{AdvisorConfig, ConfigError};

// Crate-level exports - Advisory
pub use advisory::{
    Advisor, AdvisoryRequest, EMPTY_BOARD_MESSAGE, MISSING_CREDENTIALS_MESSAGE, PENDING_MESSAGE,
    PlacedStone, SILENT_MESSAGE, SYSTEM_PROMPT, UNAVAILABLE_MESSAGE, build_advisor, consult,
};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Session management
pub use session::{AdvisoryPanel, AdvisoryResponse, AdvisoryStatus, GameSession};

// Crate-level exports - Game types (gomoku)
pub use games::gomoku::{
    AlternatingTurnInvariant, Axis, BOARD_SIZE, Board, CELL_COUNT, Cell, CellError, CellIsEmpty,
    Contract, GameEngine, GameNotOver, GameState, GomokuInvariants, HasHistory,
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation, LegalPlacement,
    MonotonicBoardInvariant, MoveError, Outcome, PlaceContract, Placement, Stone, UndoContract,
    WIN_LENGTH, WinnerConsistentInvariant, WinningLine, check_win,
};
