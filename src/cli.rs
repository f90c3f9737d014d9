//! Command-line interface for zen_gomoku.

use clap::{Parser, Subcommand};
use zen_gomoku::LlmProvider;

/// Zen Gomoku - five-in-a-row for two players, with an optional sage
#[derive(Parser, Debug)]
#[command(name = "zen_gomoku")]
#[command(about = "Two-player five-in-a-row with undo and LLM commentary", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Path to advisor config (TOML). Defaults are used if it doesn't exist.
        #[arg(short, long, default_value = "advisor.toml")]
        config: std::path::PathBuf,

        /// Override the LLM provider (gemini, openai, anthropic)
        #[arg(long)]
        provider: Option<LlmProvider>,

        /// Never contact the advisor
        #[arg(long)]
        offline: bool,
    },

    /// Replay a sequence of moves and print the resulting position
    Replay {
        /// Moves in lettered notation, e.g. H8 J9 H9
        #[arg(required = true)]
        moves: Vec<String>,

        /// Print the final state as JSON instead of a board
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_parses_provider_override() {
        let cli = Cli::try_parse_from(["zen_gomoku", "play", "--provider", "openai", "--offline"])
            .unwrap();
        match cli.command {
            Command::Play {
                config,
                provider,
                offline,
            } => {
                assert_eq!(config, std::path::PathBuf::from("advisor.toml"));
                assert_eq!(provider, Some(LlmProvider::OpenAI));
                assert!(offline);
            }
            other => panic!("expected play, got {:?}", other),
        }
    }

    #[test]
    fn test_replay_requires_moves() {
        assert!(Cli::try_parse_from(["zen_gomoku", "replay"]).is_err());
        let cli = Cli::try_parse_from(["zen_gomoku", "replay", "H8", "J9", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Replay { json: true, ref moves } if moves.len() == 2));
    }
}
