//! Interactive play on the terminal.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
    thread,
};

use lights_out::{
    game_state::{GameState, PlaybackStep, PressOutcome},
    pattern::Pattern,
    settings::Settings,
    statistics::Statistics,
    GridPos,
};
use log::{info, warn};
use rand::Rng;
use thiserror::Error;

use crate::saver::Saver;

const HELP: &str = "\
commands:
  <row> <col>      press the light at row and column, counted from 0
  hint             show the next light to press
  solve            let the computer press the remaining lights
  new              start a new game
  reset            turn all lights off and stop the game
  pattern <name>   switch to another pattern and start a new game
  patterns         list the available patterns
  stats            show statistics
  help             show this help
  quit             leave the game";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Press(GridPos),
    Hint,
    Solve,
    New,
    Reset,
    Pattern(Pattern),
    Patterns,
    Stats,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("unknown command {0:?}; type \"help\" for a list of commands")]
    Unknown(String),
    #[error("expected a row and a column, e.g. \"2 3\"")]
    InvalidPosition,
    #[error(transparent)]
    Pattern(#[from] lights_out::pattern::ParsePatternError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words = s.split_whitespace().collect::<Vec<_>>();
        let command = match words.as_slice() {
            ["hint" | "h"] => Self::Hint,
            ["solve"] => Self::Solve,
            ["new" | "n"] => Self::New,
            ["reset" | "r"] => Self::Reset,
            ["pattern", name] => Self::Pattern(name.parse()?),
            ["patterns"] => Self::Patterns,
            ["stats"] => Self::Stats,
            ["help" | "?"] => Self::Help,
            ["quit" | "q" | "exit"] => Self::Quit,
            [row, col] if row.starts_with(|c: char| c.is_ascii_digit()) => {
                let (Ok(row), Ok(col)) = (row.parse(), col.parse()) else {
                    return Err(ParseCommandError::InvalidPosition);
                };
                Self::Press(GridPos::new(row, col))
            }
            _ => return Err(ParseCommandError::Unknown(s.trim().to_owned())),
        };
        Ok(command)
    }
}

/// A game played through text commands, keeping statistics across games.
pub struct Session<R: Rng> {
    pub game: GameState,
    pub settings: Settings,
    pub statistics: Statistics,
    pub saver: Option<Saver>,
    pub rng: R,
}

impl<R: Rng> Session<R> {
    /// Reads commands line by line until `quit` or the end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Turn all the lights off! Type \"help\" for commands.")?;
        self.print_board(out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, out)?,
                Err(error) => writeln!(out, "{error}")?,
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<()> {
        match command {
            Command::Press(pos) => {
                if pos.to_field_index(self.game.size()).is_none() {
                    writeln!(out, "{pos} is outside of the {} board", self.game.size())?;
                    return Ok(());
                }
                match self.game.press(pos) {
                    PressOutcome::Ignored => {
                        writeln!(out, "the game is over; type \"new\" to play again")?;
                    }
                    PressOutcome::Toggled => self.print_board(out)?,
                    outcome @ PressOutcome::Won { .. } => {
                        self.print_board(out)?;
                        self.finish(outcome, out)?;
                    }
                }
            }
            Command::Hint => {
                if !self.settings.show_hints {
                    writeln!(out, "hints are disabled")?;
                    return Ok(());
                }
                match self.game.hint() {
                    Ok(Some(pos)) => writeln!(out, "try pressing {} {}", pos.row, pos.col)?,
                    Ok(None) => writeln!(out, "all lights are already off")?,
                    Err(error) => writeln!(out, "no solution found: {error}")?,
                }
            }
            Command::Solve => self.auto_solve(out)?,
            Command::New => {
                self.game.new_game(&self.settings.generator(), &mut self.rng);
                self.print_board(out)?;
            }
            Command::Reset => {
                self.game.reset();
                self.print_board(out)?;
            }
            Command::Pattern(pattern) => {
                self.settings.pattern = pattern;
                self.save_settings();
                self.game.new_game(&self.settings.generator(), &mut self.rng);
                self.print_board(out)?;
            }
            Command::Patterns => {
                for pattern in Pattern::ALL {
                    writeln!(
                        out,
                        "{:<13} {}: {}",
                        pattern.key(),
                        pattern.name(),
                        pattern.description()
                    )?;
                }
            }
            Command::Stats => self.print_statistics(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn auto_solve(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.game.is_active() {
            writeln!(out, "the game is not running")?;
            return Ok(());
        }
        let mut playback = match self.game.auto_solve() {
            Ok(playback) => playback,
            Err(error) => {
                writeln!(out, "no solution found for current configuration: {error}")?;
                return Ok(());
            }
        };
        writeln!(out, "solving in {} presses", playback.remaining())?;

        loop {
            thread::sleep(self.settings.move_delay());
            match playback.step(&mut self.game) {
                PlaybackStep::Applied { pos, outcome } => {
                    writeln!(out, "pressing {} {}", pos.row, pos.col)?;
                    self.print_board(out)?;
                    if let PressOutcome::Won { .. } = outcome {
                        self.finish(outcome, out)?;
                    }
                }
                PlaybackStep::Finished => break,
                PlaybackStep::Cancelled => {
                    writeln!(out, "auto-solve cancelled")?;
                    break;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, outcome: PressOutcome, out: &mut impl Write) -> io::Result<()> {
        let PressOutcome::Won {
            moves,
            elapsed,
            assisted,
        } = outcome
        else {
            return Ok(());
        };

        if assisted {
            writeln!(out, "solved by the computer; this game does not count")?;
            return Ok(());
        }

        writeln!(
            out,
            "all lights out in {moves} moves and {} seconds!",
            elapsed.as_secs()
        )?;
        self.statistics.record_win(self.game.size(), moves, elapsed);
        info!("recorded win on {} board", self.game.size());
        if let Some(saver) = &self.saver {
            if let Err(error) = saver.save_statistics(&self.statistics) {
                warn!("Failed to save statistics: {error}");
            }
        }
        Ok(())
    }

    fn save_settings(&self) {
        if let Some(saver) = &self.saver {
            if let Err(error) = saver.save_settings(&self.settings) {
                warn!("Failed to save settings: {error}");
            }
        }
    }

    fn print_board(&self, out: &mut impl Write) -> io::Result<()> {
        let pattern = self
            .game
            .pattern()
            .map_or("custom", |pattern| pattern.name());
        writeln!(
            out,
            "{} {}, {} moves",
            self.game.size(),
            pattern,
            self.game.moves()
        )?;
        write!(out, "{}", self.game.board())
    }

    fn print_statistics(&self, out: &mut impl Write) -> io::Result<()> {
        let stats = &self.statistics;
        writeln!(out, "games won: {}", stats.games_won)?;
        if let Some(average) = stats.average_moves() {
            writeln!(out, "average moves: {average:.1}")?;
        }
        for (side, record) in &stats.by_size {
            let best_moves = record
                .best_moves
                .map_or_else(|| "-".to_owned(), |moves| moves.to_string());
            let best_time = record
                .best_time_secs
                .map_or_else(|| "-".to_owned(), |secs| format!("{secs}s"));
            writeln!(
                out,
                "{side}x{side}: {} won, best {best_moves} moves, best {best_time}",
                record.games_won
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lights_out::{Board, BoardSize};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn session(board: &str) -> Session<StdRng> {
        let board: Board = board.parse().unwrap();
        let settings = Settings {
            size: board.size(),
            move_delay_ms: 0,
            ..Settings::default()
        };
        Session {
            game: GameState::new(board, None),
            settings,
            statistics: Statistics::default(),
            saver: None,
            rng: StdRng::seed_from_u64(0),
        }
    }

    fn run(session: &mut Session<StdRng>, input: &str) -> String {
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("2 3".parse(), Ok(Command::Press(GridPos::new(2, 3))));
        assert_eq!(" hint ".parse(), Ok(Command::Hint));
        assert_eq!("pattern cross".parse(), Ok(Command::Pattern(Pattern::Cross)));
        assert_eq!("q".parse(), Ok(Command::Quit));
        assert_eq!(
            "2 x".parse::<Command>(),
            Err(ParseCommandError::InvalidPosition)
        );
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(ParseCommandError::Unknown(_))
        ));
        assert!(matches!(
            "pattern stripes".parse::<Command>(),
            Err(ParseCommandError::Pattern(_))
        ));
    }

    #[test]
    fn winning_records_statistics() {
        let mut session = session(".#. ### .#.");
        let output = run(&mut session, "1 1\nquit\n");
        assert!(output.contains("all lights out in 1 moves"), "{output}");
        assert_eq!(session.statistics.games_won, 1);
        assert_eq!(
            session
                .statistics
                .for_size(BoardSize::try_new(3).unwrap())
                .unwrap()
                .best_moves,
            Some(1)
        );
    }

    #[test]
    fn auto_solve_does_not_count() {
        let mut session = session("#.. ... ...");
        let output = run(&mut session, "solve\n");
        assert!(output.contains("solving in 5 presses"), "{output}");
        assert!(output.contains("does not count"), "{output}");
        assert!(session.game.is_won());
        assert_eq!(session.statistics.games_won, 0);
    }

    #[test]
    fn hint_names_a_position() {
        let mut session = session(".#. ### .#.");
        let output = run(&mut session, "hint\n");
        assert!(output.contains("try pressing 1 1"), "{output}");
        assert_eq!(session.game.moves(), 0);
    }

    #[test]
    fn unsolvable_board_is_reported() {
        let mut session = session("#.... ..... ..... ..... .....");
        let output = run(&mut session, "solve\nhint\n");
        assert!(output.contains("no solution found for current configuration"));
        assert!(!session.game.board().is_all_off());
    }

    #[test]
    fn out_of_bounds_press_is_rejected() {
        let mut session = session(".#. ### .#.");
        let output = run(&mut session, "3 0\n");
        assert!(output.contains("outside"), "{output}");
        assert_eq!(session.game.moves(), 0);
    }

    #[test]
    fn switching_pattern_starts_new_game() {
        let mut session = session(".#. ### .#.");
        run(&mut session, "1 0\npattern corners\n");
        assert_eq!(session.game.pattern(), Some(Pattern::Corners));
        assert_eq!(session.game.moves(), 0);
        assert_eq!(session.settings.pattern, Pattern::Corners);
    }
}
