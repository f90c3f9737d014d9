//! Line-oriented console host for a [`GameSession`].

use crate::games::gomoku::{Cell, CellError, GameEngine, GameState, Outcome, Stone};
use crate::session::{AdvisoryResponse, AdvisoryStatus, GameSession};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// A command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Play at a cell, e.g. `H8`.
    Place(Cell),
    /// Take back the last move.
    Undo,
    /// Start over.
    Restart,
    /// Ask the sage about the position.
    Analyze,
    /// Print the board.
    Board,
    /// Print the move list.
    History,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

impl ConsoleCommand {
    /// Parses a line of input.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidNotation`] if the line is neither a
    /// keyword nor a cell.
    pub fn parse(line: &str) -> Result<Self, CellError> {
        let command = match line.trim().to_ascii_lowercase().as_str() {
            "undo" | "u" => Self::Undo,
            "restart" | "reset" | "r" => Self::Restart,
            "analyze" | "analyse" | "a" => Self::Analyze,
            "board" | "b" => Self::Board,
            "history" | "h" => Self::History,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Place(Cell::parse(line)?),
        };
        Ok(command)
    }
}

/// Command summary shown by `help`.
pub const HELP: &str = "Commands:
  <cell>    place a stone, e.g. H8 (columns A-O, rows 1-15 from the bottom)
  undo      take back the last move
  restart   start a new game
  analyze   ask the sage about the position
  board     show the board
  history   list the moves played
  quit      leave";

/// Renders the board with the turn or result underneath.
pub fn render(state: &GameState) -> String {
    let mut out = state.board().display(state.winning_line());
    out.push('\n');
    match state.winner() {
        Some(winner) => out.push_str(&format!("{} wins! Type `restart` to play again.", winner)),
        None if state.board().is_full() => out.push_str("The board is full."),
        None => out.push_str(&format!("{} to move.", state.turn())),
    }
    out
}

/// Lists the moves played as `1. Black H8` lines.
pub fn render_history(state: &GameState) -> String {
    if state.history().is_empty() {
        return "No moves yet".to_string();
    }
    state
        .history()
        .iter()
        .enumerate()
        .map(|(ply, cell)| format!("{:>3}. {} {}", ply + 1, Stone::for_ply(ply), cell))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Applies one command to the session, returning text to print and
/// whether to keep going.
#[instrument(skip(session))]
pub fn execute(session: &mut GameSession, command: ConsoleCommand) -> (String, bool) {
    let output = match command {
        ConsoleCommand::Place(cell) => match session.place_stone(cell) {
            Ok(placement) => {
                let mut out = render(session.state());
                if let Outcome::Won { line } = &placement.outcome {
                    let cells: Vec<String> = line.cells().iter().map(ToString::to_string).collect();
                    out.push_str(&format!("\nWinning line: {}", cells.join(" ")));
                }
                out
            }
            Err(e) => e.to_string(),
        },
        ConsoleCommand::Undo => match session.undo() {
            Ok(cell) => format!("Took back {}.\n{}", cell, render(session.state())),
            Err(e) => e.to_string(),
        },
        ConsoleCommand::Restart => {
            session.restart();
            render(session.state())
        }
        ConsoleCommand::Analyze => match session.request_advisory() {
            AdvisoryStatus::Requested => crate::advisory::PENDING_MESSAGE.to_string(),
            AdvisoryStatus::Answered(text) => format!("Sage: {}", text),
            AdvisoryStatus::AlreadyPending => "The sage is still thinking.".to_string(),
            AdvisoryStatus::GameOver => "The game is over.".to_string(),
        },
        ConsoleCommand::Board => render(session.state()),
        ConsoleCommand::History => render_history(session.state()),
        ConsoleCommand::Help => HELP.to_string(),
        ConsoleCommand::Quit => return ("Goodbye.".to_string(), false),
    };
    (output, true)
}

/// Plays `moves` (lettered notation) on a fresh engine.
///
/// Illegal moves are logged and skipped.
///
/// # Errors
///
/// Fails if a move is not a cell in lettered notation.
#[instrument(skip(moves), fields(count = moves.len()))]
pub fn replay<S: AsRef<str>>(moves: &[S]) -> Result<GameEngine> {
    let mut engine = GameEngine::new();

    for (ply, notation) in moves.iter().enumerate() {
        let notation = notation.as_ref();
        let cell = Cell::parse(notation)
            .with_context(|| format!("Move {} is not a cell: {}", ply + 1, notation))?;
        if let Err(e) = engine.try_place_stone(cell.index()) {
            warn!(ply = ply + 1, %cell, error = %e, "Move ignored");
        }
    }

    Ok(engine)
}

/// Runs the interactive loop on stdin/stdout until `quit` or end of input.
///
/// Advisory answers are printed as they arrive, between commands.
#[instrument(skip_all)]
pub async fn run(
    mut session: GameSession,
    mut advisory_rx: mpsc::UnboundedReceiver<AdvisoryResponse>,
) -> Result<()> {
    info!("Starting console session");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n\n{}", HELP, render(session.state()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let (output, keep_going) = match ConsoleCommand::parse(&line) {
                    Ok(command) => execute(&mut session, command),
                    Err(e) => (format!("{}. Type `help` for commands.", e), true),
                };
                println!("{}", output);
                if !keep_going {
                    break;
                }
            }
            Some(response) = advisory_rx.recv() => {
                if let Some(text) = session.accept_advisory(response) {
                    println!("Sage: {}", text);
                }
            }
        }
    }

    info!(moves = session.state().history().len(), "Console session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keywords_and_cells() {
        assert_eq!(ConsoleCommand::parse("undo").unwrap(), ConsoleCommand::Undo);
        assert_eq!(ConsoleCommand::parse(" Q ").unwrap(), ConsoleCommand::Quit);
        assert_eq!(
            ConsoleCommand::parse("h8").unwrap(),
            ConsoleCommand::Place(Cell::new(112).unwrap())
        );
        assert!(ConsoleCommand::parse("z99").is_err());
    }

    fn session() -> GameSession {
        let (tx, _rx) = mpsc::unbounded_channel();
        GameSession::new(None, std::time::Duration::from_secs(1), tx)
    }

    fn play(session: &mut GameSession, notation: &str) -> String {
        let command = ConsoleCommand::parse(notation).unwrap();
        let (output, keep_going) = execute(session, command);
        assert!(keep_going);
        output
    }

    #[test]
    fn test_five_in_a_row_announces_winner() {
        let mut session = session();
        for (black, white) in [("H8", "H9"), ("I8", "I9"), ("J8", "J9"), ("K8", "K9")] {
            play(&mut session, black);
            play(&mut session, white);
        }

        let output = play(&mut session, "L8");
        assert!(output.contains("Black wins! Type `restart` to play again."));
        assert!(output.ends_with("Winning line: L8 K8 J8 I8 H8"));

        assert_eq!(play(&mut session, "A1"), "Game is already over (Black won)");
        assert_eq!(play(&mut session, "undo"), "Game is already over (Black won)");
        assert_eq!(play(&mut session, "analyze"), "The game is over.");

        let output = play(&mut session, "restart");
        assert!(output.ends_with("Black to move."));
    }

    #[test]
    fn test_rejected_commands_explain_why() {
        let mut session = session();
        assert_eq!(play(&mut session, "undo"), "No moves to undo");

        play(&mut session, "H8");
        assert_eq!(play(&mut session, "h8"), "Cell H8 is already occupied");

        let output = play(&mut session, "undo");
        assert!(output.starts_with("Took back H8."));

        let (output, keep_going) = execute(&mut session, ConsoleCommand::Quit);
        assert_eq!(output, "Goodbye.");
        assert!(!keep_going);
    }

    #[test]
    fn test_replay_skips_illegal_moves() {
        let engine = replay(&["H8", "J9", "H8", "H9"]).unwrap();
        let history: Vec<String> = engine
            .state()
            .history()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(history, ["H8", "J9", "H9"]);
        assert_eq!(engine.state().turn(), Stone::White);
    }

    #[test]
    fn test_replay_rejects_bad_notation() {
        let err = replay(&["H8", "Z99"]).unwrap_err();
        assert!(err.to_string().contains("Move 2 is not a cell: Z99"));
    }

    #[test]
    fn test_history_uses_lettered_notation() {
        let mut engine = crate::games::gomoku::GameEngine::new();
        engine.place_stone(112);
        engine.place_stone(0);
        assert_eq!(
            render_history(engine.state()),
            "  1. Black H8\n  2. White A15"
        );
    }
}
