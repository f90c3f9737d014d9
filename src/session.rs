//! A hosted game: one engine plus the advisory text shown beside it.

use crate::advisory::{Advisor, AdvisoryRequest, PENDING_MESSAGE, consult};
use crate::games::gomoku::{Cell, GameEngine, GameState, MoveError, Placement};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Commentary produced for a specific engine revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryResponse {
    /// Revision of the board the text describes.
    pub revision: u64,
    /// Text to show.
    pub text: String,
}

/// Advisory display state.
///
/// This is UI state only. It is cleared whenever the board changes, and a
/// response is accepted only while it still describes the current board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AdvisoryPanel {
    /// Nothing requested since the last change.
    #[default]
    Idle,
    /// Waiting on commentary for `revision`.
    Pending {
        /// Revision the request was made for.
        revision: u64,
    },
    /// Commentary for `revision`.
    Ready {
        /// Revision the text describes.
        revision: u64,
        /// The commentary.
        text: String,
    },
}

impl AdvisoryPanel {
    /// Text to display, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            AdvisoryPanel::Idle => None,
            AdvisoryPanel::Pending { .. } => Some(PENDING_MESSAGE),
            AdvisoryPanel::Ready { text, .. } => Some(text),
        }
    }

    /// Checks if a request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, AdvisoryPanel::Pending { .. })
    }

    /// Accepts `response` if it answers the pending request for `current_revision`.
    ///
    /// Returns `false` (and leaves the panel alone) for stale responses.
    pub fn merge(&mut self, response: AdvisoryResponse, current_revision: u64) -> bool {
        match self {
            AdvisoryPanel::Pending { revision }
                if *revision == response.revision && response.revision == current_revision =>
            {
                *self = AdvisoryPanel::Ready {
                    revision: response.revision,
                    text: response.text,
                };
                true
            }
            _ => false,
        }
    }
}

/// What happened when commentary was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryStatus {
    /// A request is running in the background.
    Requested,
    /// The answer was known immediately (empty board).
    Answered(String),
    /// A request for this board is already running.
    AlreadyPending,
    /// The game is over; there is nothing left to advise on.
    GameOver,
}

/// A game hosted for a UI.
///
/// Owns the engine, forwards moves to it, and keeps the advisory panel in
/// step with the board. Advisory requests run on the tokio runtime and
/// report back through the channel given at construction; the host feeds
/// those responses to [`GameSession::accept_advisory`].
pub struct GameSession {
    engine: GameEngine,
    panel: AdvisoryPanel,
    advisor: Option<Arc<dyn Advisor>>,
    timeout: Duration,
    advisory_tx: mpsc::UnboundedSender<AdvisoryResponse>,
}

impl GameSession {
    /// Creates a session with a fresh game.
    #[instrument(skip(advisor, advisory_tx), fields(has_advisor = advisor.is_some()))]
    pub fn new(
        advisor: Option<Arc<dyn Advisor>>,
        timeout: Duration,
        advisory_tx: mpsc::UnboundedSender<AdvisoryResponse>,
    ) -> Self {
        info!("Creating game session");
        Self {
            engine: GameEngine::new(),
            panel: AdvisoryPanel::Idle,
            advisor,
            timeout,
            advisory_tx,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    /// Returns the advisory panel.
    pub fn panel(&self) -> &AdvisoryPanel {
        &self.panel
    }

    /// Places the current player's stone, clearing any advisory text.
    #[instrument(skip(self))]
    pub fn place_stone(&mut self, cell: Cell) -> Result<Placement, MoveError> {
        let placement = self.engine.try_place_stone(cell.index())?;
        self.invalidate_advisory();
        Ok(placement)
    }

    /// Takes back the last move, clearing any advisory text.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Cell, MoveError> {
        let cell = self.engine.try_undo()?;
        self.invalidate_advisory();
        Ok(cell)
    }

    /// Starts a fresh game, clearing any advisory text.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.engine.restart();
        self.invalidate_advisory();
    }

    fn invalidate_advisory(&mut self) {
        if self.panel != AdvisoryPanel::Idle {
            debug!("Clearing stale advisory");
        }
        self.panel = AdvisoryPanel::Idle;
    }

    /// Asks the advisor about the current board.
    ///
    /// Must be called from within a tokio runtime. An empty board is
    /// answered immediately without contacting the advisor.
    #[instrument(skip(self), fields(revision = self.engine.revision()))]
    pub fn request_advisory(&mut self) -> AdvisoryStatus {
        if self.engine.state().is_over() {
            debug!("Game over, advisory not requested");
            return AdvisoryStatus::GameOver;
        }
        if self.panel.is_pending() {
            return AdvisoryStatus::AlreadyPending;
        }

        let request = AdvisoryRequest::from_engine(&self.engine);
        let revision = request.revision();

        if request.is_empty() {
            let text = crate::advisory::EMPTY_BOARD_MESSAGE.to_string();
            self.panel = AdvisoryPanel::Ready {
                revision,
                text: text.clone(),
            };
            return AdvisoryStatus::Answered(text);
        }

        self.panel = AdvisoryPanel::Pending { revision };

        let advisor = self.advisor.clone();
        let timeout = self.timeout;
        let tx = self.advisory_tx.clone();
        tokio::spawn(async move {
            let text = consult(advisor.as_deref(), &request, timeout).await;
            if tx.send(AdvisoryResponse { revision, text }).is_err() {
                debug!(revision, "Session gone, dropping advisory");
            }
        });

        info!(revision, "Advisory requested");
        AdvisoryStatus::Requested
    }

    /// Merges a finished advisory into the panel.
    ///
    /// Returns the text if it was accepted, or `None` if it described a
    /// board that has since changed.
    #[instrument(skip(self, response), fields(response_revision = response.revision, revision = self.engine.revision()))]
    pub fn accept_advisory(&mut self, response: AdvisoryResponse) -> Option<&str> {
        if self.panel.merge(response, self.engine.revision()) {
            self.panel.text()
        } else {
            warn!("Discarding stale advisory");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_rejects_other_revision() {
        let mut panel = AdvisoryPanel::Pending { revision: 3 };
        let stale = AdvisoryResponse {
            revision: 2,
            text: "old".to_string(),
        };
        assert!(!panel.merge(stale, 3));
        assert!(panel.is_pending());

        let fresh = AdvisoryResponse {
            revision: 3,
            text: "new".to_string(),
        };
        assert!(panel.merge(fresh, 3));
        assert_eq!(panel.text(), Some("new"));
    }

    #[test]
    fn test_merge_rejects_when_board_moved_on() {
        let mut panel = AdvisoryPanel::Pending { revision: 3 };
        let response = AdvisoryResponse {
            revision: 3,
            text: "late".to_string(),
        };
        assert!(!panel.merge(response, 4));
    }

    #[test]
    fn test_idle_panel_ignores_responses() {
        let mut panel = AdvisoryPanel::Idle;
        let response = AdvisoryResponse {
            revision: 0,
            text: "unasked".to_string(),
        };
        assert!(!panel.merge(response, 0));
        assert_eq!(panel.text(), None);
    }
}
