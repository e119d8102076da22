mod gf2;

use bitvec::slice::BitSlice;
use log::debug;
use thiserror::Error;

use crate::board::{
    grid::{BoardSize, GridPos},
    Board,
};

use self::gf2::LinearSystem;

/// Returns the presses that turn every light on the board off.
///
/// Pressing a light twice is the same as not pressing it at all and the order of presses does not
/// matter, so the result contains every position at most once, in row-major order.
///
/// An empty list means the board is already solved.
///
/// # Errors
///
/// Returns [`Unsolvable`] if no combination of presses clears the board. Boards built by pressing
/// lights on an empty board are always solvable, but arbitrary patterns are not on sizes like 4x4
/// or 5x5.
pub fn solve(board: &Board) -> Result<Vec<GridPos>, Unsolvable> {
    Solution::find(board).map(Solution::into_moves)
}

/// Whether any combination of presses clears the board.
pub fn is_solvable(board: &Board) -> bool {
    let mut system = LinearSystem::from_board(board);
    system.eliminate();
    system.is_consistent()
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Error)]
#[error("board cannot be cleared by any combination of presses")]
pub struct Unsolvable;

/// A set of presses that clears a board along with some facts about the solution space.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Solution {
    moves: Vec<GridPos>,
    rank: usize,
    field_count: usize,
}

impl Solution {
    /// Solves the board without modifying it.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    pub fn find(board: &Board) -> Result<Self, Unsolvable> {
        let system = LinearSystem::from_board(board);
        let field_count = system.cols();

        let Some(solution) = system.solve() else {
            debug!(
                "{} board with {} lit fields is unsolvable",
                board.size(),
                board.lit_count()
            );
            return Err(Unsolvable);
        };

        let moves = extract_moves(&solution.values, board.size());
        debug!(
            "solved {} board with {} presses (rank {}, {} free variables)",
            board.size(),
            moves.len(),
            solution.rank,
            field_count - solution.rank
        );

        Ok(Self {
            moves,
            rank: solution.rank,
            field_count,
        })
    }

    /// The presses in row-major order.
    pub fn moves(&self) -> &[GridPos] {
        &self.moves
    }

    pub fn into_moves(self) -> Vec<GridPos> {
        self.moves
    }

    /// The press to suggest as a hint, [`None`] if the board is already solved.
    pub fn first_move(&self) -> Option<GridPos> {
        self.moves.first().copied()
    }

    /// The number of independent press equations for the board's size.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The number of free variables.
    ///
    /// There are `2^nullity` distinct press sets that solve the board, all differing by presses
    /// that leave every light unchanged. The returned set is the one with all free variables
    /// unpressed.
    pub fn nullity(&self) -> usize {
        self.field_count - self.rank
    }

    /// Whether this is the only press set that solves the board.
    pub fn is_unique(&self) -> bool {
        self.nullity() == 0
    }
}

/// Converts one bit per field into the positions to press.
fn extract_moves(presses: &BitSlice, size: BoardSize) -> Vec<GridPos> {
    presses
        .iter_ones()
        .map(|field_index| {
            GridPos::from_field_index(field_index, size).expect("solution should fit the board")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use bitvec::{bitvec, order::Lsb0};

    use super::*;

    #[test]
    fn extracts_moves_row_major() {
        let size = BoardSize::try_new(3).unwrap();
        let presses = bitvec![0, 1, 0, 0, 0, 0, 1, 0, 1];
        assert_eq!(
            extract_moves(&presses, size),
            [GridPos::new(0, 1), GridPos::new(2, 0), GridPos::new(2, 2)]
        );
    }

    #[test]
    fn no_presses_for_empty_solution() {
        let size = BoardSize::try_new(2).unwrap();
        assert!(extract_moves(&bitvec![0; 4], size).is_empty());
    }

    #[test]
    fn cross_is_solved_by_its_center() {
        let board: Board = ".#. ### .#.".parse().unwrap();
        let solution = Solution::find(&board).unwrap();
        assert_eq!(solution.moves(), [GridPos::new(1, 1)]);
        assert_eq!(solution.first_move(), Some(GridPos::new(1, 1)));
        assert!(solution.is_unique());
    }

    #[test]
    fn solved_board_needs_no_presses() {
        let board = Board::new(BoardSize::try_new(3).unwrap());
        let solution = Solution::find(&board).unwrap();
        assert!(solution.moves().is_empty());
        assert_eq!(solution.first_move(), None);
    }

    #[test]
    fn classic_board_has_two_free_variables() {
        let board = Board::new(BoardSize::default());
        let solution = Solution::find(&board).unwrap();
        assert_eq!(solution.rank(), 23);
        assert_eq!(solution.nullity(), 2);
        assert!(!solution.is_unique());
    }

    #[test]
    fn single_corner_on_classic_board_is_unsolvable() {
        let mut board = Board::new(BoardSize::default());
        board.set_lit(GridPos::new(0, 0), true);
        assert_eq!(solve(&board), Err(Unsolvable));
        assert!(!is_solvable(&board));
    }

    #[test]
    fn solving_leaves_board_untouched() {
        let board: Board = "#.. .#. ..#".parse().unwrap();
        let snapshot = board.clone();
        solve(&board).unwrap();
        assert_eq!(board, snapshot);
    }
}
