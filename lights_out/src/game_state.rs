use std::{
    time::{Duration, Instant},
    vec,
};

use log::{debug, warn};
use rand::Rng;
use thiserror::Error;

use crate::{
    board::{
        grid::{BoardSize, GridPos},
        Board,
    },
    generator::Generator,
    pattern::Pattern,
    solver::{Solution, Unsolvable},
};

/// A running game of Lights Out.
///
/// - Owns the live board; the solver only ever sees it through a shared reference.
/// - Counts moves and detects the win.
/// - Bumps a generation counter every time the board is replaced, so an auto-solve [`Playback`]
///   started on an older board stops instead of pressing stale positions.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    /// [`None`] for boards drawn by the player.
    pattern: Option<Pattern>,
    moves: usize,
    active: bool,
    auto_solving: bool,
    generation: u64,
    started: Instant,
}

impl GameState {
    /// Starts a game on the given board.
    pub fn new(board: Board, pattern: Option<Pattern>) -> Self {
        let active = !board.is_all_off();
        Self {
            board,
            pattern,
            moves: 0,
            active,
            auto_solving: false,
            generation: 0,
            started: Instant::now(),
        }
    }

    /// Starts a game with a board built by `generator`.
    pub fn generate(generator: &Generator, rng: &mut impl Rng) -> Self {
        Self::new(generator.generate(rng), Some(generator.pattern))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    /// The pattern the current board was built from, [`None`] for custom designs.
    pub fn pattern(&self) -> Option<Pattern> {
        self.pattern
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Whether the player can press lights.
    ///
    /// Games become inactive once won, after a [`Self::reset`] and while auto-solve is playing.
    pub fn is_active(&self) -> bool {
        self.active && !self.auto_solving
    }

    pub fn is_auto_solving(&self) -> bool {
        self.auto_solving
    }

    pub fn is_won(&self) -> bool {
        self.board.is_all_off()
    }

    /// Changes every time the board gets replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Presses a light on behalf of the player.
    ///
    /// Does nothing unless the game [`is_active`](Self::is_active).
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn press(&mut self, pos: GridPos) -> PressOutcome {
        if !self.is_active() {
            return PressOutcome::Ignored;
        }
        self.apply_press(pos)
    }

    fn apply_press(&mut self, pos: GridPos) -> PressOutcome {
        self.board.toggle(pos);
        self.moves += 1;

        if !self.board.is_all_off() {
            return PressOutcome::Toggled;
        }

        self.active = false;
        let outcome = PressOutcome::Won {
            moves: self.moves,
            elapsed: self.elapsed(),
            assisted: self.auto_solving,
        };
        debug!("game won: {outcome:?}");
        outcome
    }

    /// Replaces the board with a fresh one from `generator`.
    ///
    /// The generator's pattern becomes the game's pattern; its size may differ from the current one.
    pub fn new_game(&mut self, generator: &Generator, rng: &mut impl Rng) {
        self.replace_board(generator.generate(rng), Some(generator.pattern));
    }

    /// Turns every light off and stops the game.
    pub fn reset(&mut self) {
        let mut board = self.board.clone();
        board.clear();
        self.replace_board(board, self.pattern);
    }

    /// Starts a game on a board drawn by the player.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SizeMismatch`] if the design does not match the current board size.
    pub fn apply_custom(&mut self, board: Board) -> Result<(), GameError> {
        if board.size() != self.size() {
            return Err(GameError::SizeMismatch {
                expected: self.size(),
                found: board.size(),
            });
        }
        self.replace_board(board, None);
        Ok(())
    }

    fn replace_board(&mut self, board: Board, pattern: Option<Pattern>) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::new(board, pattern)
        };
        debug!(
            "new board (generation {}):\n{}",
            self.generation, self.board
        );
    }

    /// Suggests the next light to press without touching the board.
    ///
    /// Returns [`None`] if the board is already solved.
    ///
    /// # Errors
    ///
    /// Returns [`Unsolvable`] for boards no combination of presses can clear.
    pub fn hint(&self) -> Result<Option<GridPos>, Unsolvable> {
        self.solution().map(|solution| solution.first_move())
    }

    /// Solves the current board and queues the presses for playback.
    ///
    /// Until the playback finishes, the player cannot press lights.
    ///
    /// Inactive games get an empty playback that finishes right away.
    ///
    /// # Errors
    ///
    /// Returns [`Unsolvable`] for boards no combination of presses can clear; the game is left
    /// unchanged in that case.
    pub fn auto_solve(&mut self) -> Result<Playback, Unsolvable> {
        if !self.is_active() {
            return Ok(Playback {
                moves: Vec::new().into_iter(),
                generation: self.generation,
            });
        }
        let moves = self.solution()?.into_moves();
        self.auto_solving = true;
        Ok(Playback {
            moves: moves.into_iter(),
            generation: self.generation,
        })
    }

    fn solution(&self) -> Result<Solution, Unsolvable> {
        Solution::find(&self.board).map_err(|error| {
            warn!("no solution found for current board:\n{}", self.board);
            error
        })
    }
}

/// What happened when a light got pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// The game was not active; nothing changed.
    Ignored,
    /// The lights toggled but some are still on.
    Toggled,
    /// The last light went out.
    Won {
        moves: usize,
        elapsed: Duration,
        /// Whether the final press came from auto-solve.
        assisted: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("design is {found} but the board is {expected}")]
    SizeMismatch {
        expected: BoardSize,
        found: BoardSize,
    },
}

/// Presses queued by [`GameState::auto_solve`], applied one at a time.
///
/// Stepping is left to the caller so it can pause between presses for display purposes.
#[derive(Clone, Debug)]
pub struct Playback {
    moves: vec::IntoIter<GridPos>,
    generation: u64,
}

impl Playback {
    /// The number of presses not yet applied.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }

    /// The press the next [`Self::step`] applies.
    pub fn peek(&self) -> Option<GridPos> {
        self.moves.as_slice().first().copied()
    }

    /// Applies the next press.
    ///
    /// Checks the game's generation first: if the board got replaced since the playback started,
    /// no press is applied and every later step keeps returning [`PlaybackStep::Cancelled`].
    pub fn step(&mut self, game: &mut GameState) -> PlaybackStep {
        if game.generation != self.generation {
            self.moves = Vec::new().into_iter();
            return PlaybackStep::Cancelled;
        }

        match self.moves.next() {
            Some(pos) => {
                let outcome = game.apply_press(pos);
                if self.moves.len() == 0 {
                    game.auto_solving = false;
                }
                PlaybackStep::Applied { pos, outcome }
            }
            None => {
                game.auto_solving = false;
                PlaybackStep::Finished
            }
        }
    }
}

/// The result of a single [`Playback::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackStep {
    Applied { pos: GridPos, outcome: PressOutcome },
    Finished,
    /// The board was replaced; nothing was applied.
    Cancelled,
}
