use log::{debug, warn};
use rand::Rng;

use crate::{
    board::{
        grid::{BoardSize, GridPos},
        Board,
    },
    pattern::Pattern,
    solver::is_solvable,
};

/// Builds starting boards for new games.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Generator {
    pub size: BoardSize,
    pub pattern: Pattern,
}

impl Generator {
    pub fn new(size: BoardSize, pattern: Pattern) -> Self {
        Self { size, pattern }
    }

    /// Generates a board that has at least one light on.
    ///
    /// Random patterns are regenerated until they are solvable. Fixed patterns are returned as they
    /// are, even if they cannot be solved on this size.
    pub fn generate(&self, rng: &mut impl Rng) -> Board {
        if !self.pattern.is_random() {
            let board = self.lit(rng);
            if !is_solvable(&board) {
                warn!("{} pattern is not solvable on a {} board", self.pattern, self.size);
            }
            return board;
        }

        let mut attempts = 0_usize;
        loop {
            attempts += 1;
            if let Some(board) = self.try_generate(rng) {
                debug!("generated solvable {} board after {attempts} attempt(s)", self.size);
                break board;
            }
        }
    }

    /// Generates a single board, returning [`None`] if it turned out unsolvable.
    pub fn try_generate(&self, rng: &mut impl Rng) -> Option<Board> {
        let board = self.lit(rng);
        is_solvable(&board).then_some(board)
    }

    /// Applies the pattern and lights the center if that left every light off.
    fn lit(&self, rng: &mut impl Rng) -> Board {
        let mut board = self.pattern.generate(self.size, rng);
        if board.is_all_off() {
            board.set_lit(self.size.center(), true);
        }
        board
    }
}

/// Presses `presses` random fields on an empty board.
///
/// The result is always solvable since pressing the same fields again undoes it. It can still end
/// up all off, e.g. when a field gets pressed twice.
pub fn scramble(size: BoardSize, presses: usize, rng: &mut impl Rng) -> Board {
    let mut board = Board::new(size);
    for _ in 0..presses {
        let pos = GridPos::new(rng.gen_range(0..size.side()), rng.gen_range(0..size.side()));
        board.toggle(pos);
    }
    board
}
