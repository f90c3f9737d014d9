//! Sage commentary on the current position.
//!
//! The game hands the advisor a plain description of the stones on the
//! board and gets back a line of text for display. Nothing here can touch
//! game state; every failure turns into a fixed message.

use crate::advisor_config::AdvisorConfig;
use crate::games::gomoku::{Cell, GameEngine, GameState, Stone};
use crate::llm_client::{LlmClient, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Shown when asked about an empty board. The advisor is not contacted.
pub const EMPTY_BOARD_MESSAGE: &str = "The board is empty. Go ahead and make the first move!";

/// Shown when no API key is configured.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "API Key not found. Cannot perform AI analysis.";

/// Shown when the advisor fails or takes too long.
pub const UNAVAILABLE_MESSAGE: &str = "The sage is currently meditating (AI service unavailable).";

/// Shown when the advisor answers with nothing.
pub const SILENT_MESSAGE: &str = "The spirits of the board are silent.";

/// Shown while a request is in flight.
pub const PENDING_MESSAGE: &str = "Consulting the sage...";

/// System prompt framing the advisor's role.
pub const SYSTEM_PROMPT: &str = "You are a grandmaster referee of Gomoku (Five-in-a-Row). \
Keep it Zen, wise, and encouraging.";

/// A stone on the board as the advisor sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedStone {
    /// Owner of the stone.
    pub stone: Stone,
    /// Zero-based column.
    pub x: usize,
    /// Zero-based row, counted from the top.
    pub y: usize,
}

impl PlacedStone {
    /// Lettered notation: column from `A`, row counted up from the bottom edge.
    ///
    /// Coordinates off the board (only reachable through deserialization)
    /// are shown as `(x, y)`.
    pub fn notation(&self) -> String {
        Cell::from_coords(self.x, self.y)
            .map(Cell::notation)
            .unwrap_or_else(|_| format!("({}, {})", self.x, self.y))
    }
}

impl std::fmt::Display for PlacedStone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.stone, self.notation())
    }
}

/// Everything the advisor is told about a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    stones: Vec<PlacedStone>,
    to_move: Stone,
    revision: u64,
}

impl AdvisoryRequest {
    /// Builds a request from a state snapshot and the engine revision it came from.
    pub fn from_state(state: &GameState, revision: u64) -> Self {
        let stones = state
            .board()
            .stones()
            .map(|(cell, stone)| PlacedStone {
                stone,
                x: cell.x(),
                y: cell.y(),
            })
            .collect();

        Self {
            stones,
            to_move: state.turn(),
            revision,
        }
    }

    /// Builds a request describing the engine's current position.
    pub fn from_engine(engine: &GameEngine) -> Self {
        Self::from_state(engine.state(), engine.revision())
    }

    /// Occupied cells in index order.
    pub fn stones(&self) -> &[PlacedStone] {
        &self.stones
    }

    /// Stone due to move.
    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    /// Engine revision the request describes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Checks if there is anything to analyse.
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Occupied positions as `"Black at H8, White at J9, ..."`.
    pub fn positions(&self) -> String {
        self.stones
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// User message sent to the advisor.
    pub fn prompt(&self) -> String {
        format!(
            "Analyze the current board state.\n\
             Current Player to move: {}.\n\n\
             Occupied positions:\n{}\n\n\
             Provide a brief, 2-sentence commentary.\n\
             1. Who has the initiative/advantage?\n\
             2. A subtle strategic tip for the current player without giving the exact coordinate.",
            self.to_move,
            self.positions()
        )
    }
}

/// Something that can comment on a position.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Produces commentary for the request.
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, LlmError>;
}

#[async_trait]
impl Advisor for LlmClient {
    #[instrument(skip(self, request), fields(revision = request.revision(), stones = request.stones().len()))]
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, LlmError> {
        self.generate(SYSTEM_PROMPT, &request.prompt()).await
    }
}

/// Builds the advisor described by `config`.
///
/// Returns `None` when the advisor is disabled or no API key is available;
/// [`consult`] then answers with [`MISSING_CREDENTIALS_MESSAGE`].
#[instrument(skip(config), fields(provider = %config.llm_provider()))]
pub fn build_advisor(config: &AdvisorConfig) -> Option<Arc<dyn Advisor>> {
    if !*config.enabled() {
        info!("Advisor disabled by configuration");
        return None;
    }

    match config.create_llm_config() {
        Ok(llm_config) => Some(Arc::new(LlmClient::new(llm_config))),
        Err(e) => {
            warn!(error = %e, "Advisor unavailable");
            None
        }
    }
}

/// Asks `advisor` about the position, never failing.
///
/// - Empty board: [`EMPTY_BOARD_MESSAGE`], without contacting the advisor
/// - No advisor: [`MISSING_CREDENTIALS_MESSAGE`]
/// - Error or no answer within `timeout`: [`UNAVAILABLE_MESSAGE`]
/// - Blank answer: [`SILENT_MESSAGE`]
#[instrument(skip(advisor, request), fields(revision = request.revision()))]
pub async fn consult(
    advisor: Option<&dyn Advisor>,
    request: &AdvisoryRequest,
    timeout: Duration,
) -> String {
    if request.is_empty() {
        debug!("Board is empty, skipping advisor");
        return EMPTY_BOARD_MESSAGE.to_string();
    }

    let Some(advisor) = advisor else {
        return MISSING_CREDENTIALS_MESSAGE.to_string();
    };

    match tokio::time::timeout(timeout, advisor.advise(request)).await {
        Ok(Ok(text)) if text.trim().is_empty() => SILENT_MESSAGE.to_string(),
        Ok(Ok(text)) => {
            info!(length = text.len(), "Advisor answered");
            text.trim().to_string()
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Advisor failed");
            UNAVAILABLE_MESSAGE.to_string()
        }
        Err(_) => {
            warn!(?timeout, "Advisor timed out");
            UNAVAILABLE_MESSAGE.to_string()
        }
    }
}
