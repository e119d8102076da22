//! Process command-line options.
//!
//! Without `--solve`, `--hint` or `--list-patterns`, the board is played interactively.
//!
//! # Examples
//!
//! Print the presses that clear a board:
//!
//! ```txt
//! $ lightsout --solve --board ".#. ### .#."
//! .#.
//! ###
//! .#.
//! 1 press (unique solution):
//! 1 1
//! ```
//!
//! Play the cross pattern on a 7x7 board, keeping statistics in `~/.lightsout`:
//!
//! ```txt
//! $ lightsout --size 7 --pattern cross --data-dir ~/.lightsout
//! ```

use std::path::PathBuf;

use clap::Parser;
use lights_out::{pattern::Pattern, settings::Settings, Board, BoardSize};
use log::warn;

/// Board sizes offered by the game; custom boards may use any size.
pub const SIZES: [usize; 3] = [3, 5, 7];

/// Play, solve or get hints for Lights Out.
#[derive(Debug, Parser)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Side length of generated boards (3, 5 or 7)
    #[arg(short, long, value_parser = parse_size)]
    pub size: Option<BoardSize>,

    /// Pattern of generated boards; see --list-patterns
    #[arg(short, long)]
    pub pattern: Option<Pattern>,

    /// Use this board instead of a generated one, e.g. "#.. .#. ..#"
    #[arg(short, long)]
    pub board: Option<Board>,

    /// Print the presses that clear the board and exit
    #[arg(long, conflicts_with_all = ["hint", "list_patterns"])]
    pub solve: bool,

    /// Print the next press towards clearing the board and exit
    #[arg(long, conflicts_with = "list_patterns")]
    pub hint: bool,

    /// List the available patterns and exit
    #[arg(short, long)]
    pub list_patterns: bool,

    /// Seed for generating boards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds between two presses while auto-solving
    #[arg(long)]
    pub delay: Option<u64>,

    /// Directory to keep settings and statistics in
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Overrides stored settings with whatever was given on the command line.
    ///
    /// A `--board` also determines the size.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(size) = self.size {
            settings.size = size;
        }
        if let Some(board) = &self.board {
            settings.size = board.size();
        }
        if let Some(pattern) = self.pattern {
            settings.pattern = pattern;
        }
        if let Some(delay) = self.delay {
            settings.move_delay_ms = delay;
        }
    }
}

fn parse_size(s: &str) -> Result<BoardSize, String> {
    let side = s
        .parse::<usize>()
        .map_err(|error| format!("{s:?} is not a number: {error}"))?;
    if !SIZES.contains(&side) {
        return Err(format!("size must be one of {SIZES:?}"));
    }
    BoardSize::try_new(side).ok_or_else(|| "size must not be zero".to_owned())
}

/// Replaces a stored size the game does not offer with the default size.
pub fn restrict_size(settings: &mut Settings) {
    if !SIZES.contains(&settings.size.side()) {
        warn!(
            "Board size {} is not supported, using {}",
            settings.size,
            BoardSize::default()
        );
        settings.size = BoardSize::default();
    }
}

/// Sets up logging; `--debug` overrides `RUST_LOG`.
pub fn init_logger(args: &Args) {
    let mut builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}
