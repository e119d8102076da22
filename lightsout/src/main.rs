mod cli_options;
mod play;
mod saver;

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use lights_out::{
    game_state::GameState, pattern::Pattern, settings::Settings, Board, Solution,
    Unsolvable,
};
use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use self::{
    cli_options::{init_logger, restrict_size, Args},
    play::Session,
    saver::Saver,
};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("no solution found for current configuration: {0}")]
    Unsolvable(#[from] Unsolvable),
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut out = io::stdout().lock();

    if args.list_patterns {
        for pattern in Pattern::ALL {
            writeln!(out, "{:<13} {}", pattern.key(), pattern.description())?;
        }
        return Ok(());
    }

    let saver = args.data_dir.as_deref().map(Saver::new);
    let mut settings = load_settings(saver.as_ref());
    args.apply_to(&mut settings);
    info!("Settings: {settings:?}");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let game = match args.board.clone() {
        Some(board) => GameState::new(board, None),
        None => GameState::generate(&settings.generator(), &mut rng),
    };

    if args.solve {
        return print_solution(game.board(), &mut out);
    }
    if args.hint {
        return print_hint(&game, &settings, &mut out);
    }

    let statistics = match &saver {
        Some(saver) => saver.load_statistics().unwrap_or_else(|error| {
            warn!("Starting with empty statistics: {error}");
            None
        }),
        None => None,
    };
    if let Some(saver) = &saver {
        if let Err(error) = saver.save_settings(&settings) {
            warn!("Failed to save settings: {error}");
        }
    }

    let mut session = Session {
        game,
        settings,
        statistics: statistics.unwrap_or_default(),
        saver,
        rng,
    };
    session.run(io::stdin().lock(), &mut out)?;
    Ok(())
}

/// Loads stored settings, falling back to defaults for missing or unreadable files.
fn load_settings(saver: Option<&Saver>) -> Settings {
    let mut settings = saver
        .and_then(|saver| {
            saver.load_settings().unwrap_or_else(|error| {
                warn!("Using default settings: {error}");
                None
            })
        })
        .unwrap_or_default();
    restrict_size(&mut settings);
    settings
}

fn print_hint(
    game: &GameState,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<(), AppError> {
    write!(out, "{}", game.board())?;
    if !settings.show_hints {
        writeln!(out, "hints are disabled")?;
        return Ok(());
    }
    match game.hint()? {
        Some(pos) => writeln!(out, "{} {}", pos.row, pos.col)?,
        None => writeln!(out, "all lights are already off")?,
    }
    Ok(())
}

fn print_solution(board: &Board, out: &mut impl Write) -> Result<(), AppError> {
    write!(out, "{board}")?;
    let solution = Solution::find(board)?;

    let presses = match solution.moves().len() {
        1 => "press",
        _ => "presses",
    };
    if solution.is_unique() {
        writeln!(
            out,
            "{} {presses} (unique solution):",
            solution.moves().len()
        )?;
    } else {
        writeln!(
            out,
            "{} {presses} (one of 2^{} solutions):",
            solution.moves().len(),
            solution.nullity()
        )?;
    }
    for pos in solution.moves() {
        writeln!(out, "{} {}", pos.row, pos.col)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lights_out::BoardSize;

    use super::*;

    fn solution_text(board: &str) -> String {
        let mut out = Vec::new();
        print_solution(&board.parse().unwrap(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_unique_solution() {
        assert_eq!(
            solution_text(".#. ### .#."),
            ".#.\n###\n.#.\n1 press (unique solution):\n1 1\n"
        );
    }

    #[test]
    fn counts_alternative_solutions() {
        let text = solution_text("..... ..... ..... ..... .....");
        assert!(text.contains("0 presses (one of 2^2 solutions):"), "{text}");
    }

    #[test]
    fn unsolvable_board_is_an_error() {
        let mut out = Vec::new();
        let board = "#.... ..... ..... ..... .....".parse().unwrap();
        assert!(matches!(
            print_solution(&board, &mut out),
            Err(AppError::Unsolvable(Unsolvable))
        ));
    }

    #[test]
    fn hint_respects_setting() {
        let game = GameState::new(".#. ### .#.".parse().unwrap(), None);
        let mut settings = Settings::default();

        let mut out = Vec::new();
        print_hint(&game, &settings, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("1 1\n"));

        settings.show_hints = false;
        let mut out = Vec::new();
        print_hint(&game, &settings, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("hints are disabled\n"), "{text}");
        assert!(!text.contains("1 1"), "{text}");
    }

    #[test]
    fn unsupported_stored_size_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.json"),
            r#"{"size": 4, "show_hints": false}"#,
        )
        .unwrap();
        let settings = load_settings(Some(&Saver::new(dir.path())));
        assert_eq!(settings.size, BoardSize::default());
        assert!(!settings.show_hints);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        assert_eq!(
            load_settings(Some(&Saver::new(dir.path()))),
            Settings::default()
        );
        assert_eq!(load_settings(None), Settings::default());
    }
}
