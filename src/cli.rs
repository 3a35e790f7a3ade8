//! CLI - Command line interface for filmtui
//!
//! Run without arguments for the interactive TUI; the subcommands expose
//! the same operations for scripting, with JSON-parseable output and
//! semantic exit codes.
//!
//! # Examples
//!
//! ```bash
//! # Print the categorized feed
//! filmtui feed --json
//!
//! # Detail for one title, by path or by href
//! filmtui info /filmer/kon-tiki
//! filmtui info /movie/%2Ffilmer%2Fkon-tiki
//!
//! # Sized poster URL
//! filmtui poster "https://img.example/p.jpg" --width 600 --height 900
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

use crate::route::{decode_path, DecodeError, Route};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Nothing to show (valid, empty result)
    NoContent = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// filmtui - terminal client for the TV 2 Play film catalogue
///
/// Run without arguments to launch the interactive TUI.
/// Use subcommands for automation and scripting.
#[derive(Parser, Debug)]
#[command(
    name = "filmtui",
    version,
    about = "Terminal client for the TV 2 Play film catalogue",
    after_help = "EXAMPLES:\n\
                  filmtui                              Launch interactive TUI\n\
                  filmtui feed --flat                  Print the feed as one list\n\
                  filmtui info /filmer/kon-tiki        Detail for one title\n\
                  filmtui poster https://x/p.jpg       Sized poster URL"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Content API base URL override
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the collection feed, normalized into categories
    #[command(visible_alias = "f")]
    Feed(FeedCmd),

    /// Print detail for one title
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Print a sized poster URL for an image source
    #[command(visible_alias = "p")]
    Poster(PosterCmd),
}

/// Print the normalized collection feed
#[derive(Args, Debug)]
pub struct FeedCmd {
    /// Flatten into one list instead of categories
    #[arg(long, short = 'f')]
    pub flat: bool,

    /// Maximum number of items per category (0 = no limit)
    #[arg(long, short = 'l', default_value = "0")]
    pub limit: usize,
}

/// Print detail for one title
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// Identifying path (e.g. /filmer/kon-tiki) or an href (/movie/{encoded})
    #[arg(required = true)]
    pub path: String,
}

/// Print a sized poster URL
#[derive(Args, Debug)]
pub struct PosterCmd {
    /// Absolute image source URL
    #[arg(required = true)]
    pub url: String,

    /// Poster width in pixels
    #[arg(long, short = 'W', default_value = "300")]
    pub width: u32,

    /// Poster height in pixels
    #[arg(long, short = 'H', default_value = "450")]
    pub height: u32,
}

// =============================================================================
// Path Argument Resolution
// =============================================================================

/// Resolve a CLI path argument into an identifying path
///
/// Accepts either a raw path (passed through unchanged) or a detail href
/// like `/movie/%2Fm%2F1`, which is decoded through the navigation codec so
/// malformed hrefs fail loudly instead of hitting the API garbled.
pub fn resolve_path_arg(arg: &str) -> Result<String, DecodeError> {
    match Route::parse(arg) {
        Some(Route::Film(segment)) => decode_path(&segment),
        _ => Ok(arg.to_string()),
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a plain line (non-JSON mode only)
    pub fn line(&self, text: impl std::fmt::Display) {
        if !self.json {
            println!("{}", text);
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet and JSON modes)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>(["filmtui"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_feed_command() {
        let cli = Cli::parse_from(["filmtui", "feed", "--flat", "-l", "10"]);
        assert!(cli.is_cli_mode());
        if let Some(Command::Feed(cmd)) = cli.command {
            assert!(cmd.flat);
            assert_eq!(cmd.limit, 10);
        } else {
            panic!("Expected Feed command");
        }
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["filmtui", "info", "/filmer/kon-tiki"]);
        if let Some(Command::Info(cmd)) = cli.command {
            assert_eq!(cmd.path, "/filmer/kon-tiki");
        } else {
            panic!("Expected Info command");
        }
    }

    #[test]
    fn test_poster_command_defaults() {
        let cli = Cli::parse_from(["filmtui", "poster", "https://x/p.jpg"]);
        if let Some(Command::Poster(cmd)) = cli.command {
            assert_eq!(cmd.width, 300);
            assert_eq!(cmd.height, 450);
        } else {
            panic!("Expected Poster command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "filmtui",
            "--json",
            "--quiet",
            "--base-url",
            "http://localhost:4000",
            "feed",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:4000"));
    }

    #[test]
    fn test_resolve_path_arg() {
        assert_eq!(resolve_path_arg("/filmer/x").unwrap(), "/filmer/x");
        assert_eq!(resolve_path_arg("/movie/%2Fm%2F1").unwrap(), "/m/1");
        assert!(resolve_path_arg("/movie/%zz").is_err());
    }
}
