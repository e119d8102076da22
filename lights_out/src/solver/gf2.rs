use bitvec::{bitbox, boxed::BitBox, slice::BitSlice};

use crate::board::Board;

/// A system of linear equations over GF(2), stored as an augmented matrix.
///
/// Every row holds [`Self::cols`] coefficient bits followed by a single bit for the rhs. Addition
/// in GF(2) is XOR and multiplication is AND, so adding one equation to another is a plain XOR of
/// the two rows.
///
/// For a Lights Out board, row `i` states which presses affect field `i`:
///
/// ```txt
/// x0 + x1      + x3                = lit(0)
/// x0 + x1 + x2      + x4           = lit(1)
/// ...
/// ```
///
/// A solution assigns `1` to every field that has to be pressed an odd number of times.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LinearSystem {
    /// The number of unknowns.
    ///
    /// Each row in [`Self::rows`] is one bit longer to fit the rhs.
    cols: usize,
    rows: Vec<BitBox>,
}

impl LinearSystem {
    /// Builds the system whose solutions are exactly the press sets that turn the board off.
    ///
    /// Since pressing is symmetric (see [`BoardSize::toggled_fields`]), the presses affecting a
    /// field are the same fields it would toggle itself.
    ///
    /// [`BoardSize::toggled_fields`]: crate::BoardSize::toggled_fields
    pub(crate) fn from_board(board: &Board) -> Self {
        let size = board.size();
        let cols = size.field_count().get();
        let rows = (0..cols)
            .map(|field_index| {
                let mut row = bitbox![0; cols + 1];
                for affecting in size.toggled_fields(field_index) {
                    row.set(affecting, true);
                }
                row.set(cols, board.lights().is_lit(field_index));
                row
            })
            .collect();
        Self { cols, rows }
    }

    /// Creates a system from already augmented rows.
    ///
    /// # Panics
    ///
    /// Panics if any row is not exactly `cols + 1` bits long.
    #[cfg(test)]
    pub(crate) fn from_rows(cols: usize, rows: Vec<BitBox>) -> Self {
        assert!(rows.iter().all(|row| row.len() == cols + 1));
        Self { cols, rows }
    }

    /// The number of unknowns.
    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    fn coefficients(row: &BitBox, cols: usize) -> &BitSlice {
        &row[..cols]
    }

    /// Reduces the matrix with Gauss-Jordan elimination, returning its rank.
    ///
    /// Each pivot column ends up with a single `1` in its pivot row and `0` in every other row.
    /// Columns without a pivot belong to free variables and are skipped without consuming a row.
    pub(crate) fn eliminate(&mut self) -> usize {
        let mut pivot_row = 0;
        for pivot_col in 0..self.cols {
            if pivot_row == self.rows.len() {
                break;
            }

            let Some(found) = (pivot_row..self.rows.len()).find(|&row| self.rows[row][pivot_col])
            else {
                continue;
            };
            self.rows.swap(pivot_row, found);

            let pivot = self.rows[pivot_row].clone();
            for (index, row) in self.rows.iter_mut().enumerate() {
                if index != pivot_row && row[pivot_col] {
                    *row ^= pivot.as_bitslice();
                }
            }

            pivot_row += 1;
        }
        pivot_row
    }

    /// Whether no row reads `0 = 1`.
    ///
    /// Only meaningful after [`Self::eliminate`]; before that a contradiction can hide in a
    /// combination of rows.
    pub(crate) fn is_consistent(&self) -> bool {
        !self
            .rows
            .iter()
            .any(|row| Self::coefficients(row, self.cols).not_any() && row[self.cols])
    }

    /// Assigns values to all unknowns, walking the rows from last to first.
    ///
    /// Free variables are never assigned by a row and stay `0`.
    ///
    /// Must only be called on an eliminated, consistent system.
    pub(crate) fn back_substitute(&self) -> BitBox {
        let mut solution = bitbox![0; self.cols];
        for row in self.rows.iter().rev() {
            let coefficients = Self::coefficients(row, self.cols);
            let Some(pivot_col) = coefficients.first_one() else {
                continue;
            };
            let value = coefficients[pivot_col + 1..]
                .iter_ones()
                .fold(row[self.cols], |value, offset| {
                    value ^ solution[pivot_col + 1 + offset]
                });
            solution.set(pivot_col, value);
        }
        solution
    }

    /// Runs elimination and back-substitution.
    ///
    /// Returns [`None`] if the system is inconsistent.
    pub(crate) fn solve(mut self) -> Option<Gf2Solution> {
        let rank = self.eliminate();
        self.is_consistent().then(|| Gf2Solution {
            values: self.back_substitute(),
            rank,
        })
    }
}

/// A particular solution of a [`LinearSystem`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Gf2Solution {
    /// One bit per unknown.
    pub(crate) values: BitBox,
    /// The number of pivots found during elimination.
    ///
    /// Unknowns minus rank gives the number of free variables.
    pub(crate) rank: usize,
}

#[cfg(test)]
mod tests {
    use bitvec::{bitbox, order::Lsb0};

    use super::*;
    use crate::board::grid::GridPos;

    fn system(cols: usize, rows: Vec<BitBox>) -> LinearSystem {
        LinearSystem::from_rows(cols, rows)
    }

    #[test]
    fn builds_one_equation_per_field() {
        let mut board = Board::from_rows(&[[false; 3]; 3]);
        board.set_lit(GridPos::new(0, 0), true);
        let system = LinearSystem::from_board(&board);

        assert_eq!(system.cols(), 9);
        assert_eq!(system.rows.len(), 9);
        // corner: itself, right and below; lit
        assert_eq!(system.rows[0], bitbox![1, 1, 0, 1, 0, 0, 0, 0, 0, 1]);
        // center: itself and all four neighbors; unlit
        assert_eq!(system.rows[4], bitbox![0, 1, 0, 1, 1, 1, 0, 1, 0, 0]);
        // edge
        assert_eq!(system.rows[7], bitbox![0, 0, 0, 0, 1, 0, 1, 1, 1, 0]);
    }

    #[test]
    fn solves_identity() {
        let solution = system(2, vec![bitbox![1, 0, 1], bitbox![0, 1, 0]])
            .solve()
            .unwrap();
        assert_eq!(solution.values, bitbox![1, 0]);
        assert_eq!(solution.rank, 2);
    }

    #[test]
    fn swaps_rows_to_find_pivot() {
        // x1 = 1, x0 + x1 = 0
        let solution = system(2, vec![bitbox![0, 1, 1], bitbox![1, 1, 0]])
            .solve()
            .unwrap();
        assert_eq!(solution.values, bitbox![1, 1]);
    }

    #[test]
    fn detects_contradiction() {
        // x0 + x1 = 1, x0 + x1 = 0
        let system = system(2, vec![bitbox![1, 1, 1], bitbox![1, 1, 0]]);
        assert_eq!(system.solve(), None);
    }

    #[test]
    fn contradiction_is_only_visible_after_elimination() {
        let mut system = system(2, vec![bitbox![1, 1, 1], bitbox![1, 1, 0]]);
        assert!(system.is_consistent());
        system.eliminate();
        assert!(!system.is_consistent());
    }

    #[test]
    fn free_variables_default_to_zero() {
        // x0 + x1 + x2 = 1
        let solution = system(3, vec![bitbox![1, 1, 1, 1]]).solve().unwrap();
        assert_eq!(solution.values, bitbox![1, 0, 0]);
        assert_eq!(solution.rank, 1);
    }

    #[test]
    fn free_column_between_pivots() {
        // x0 + x1 = 1, x2 = 1, x0 + x1 + x2 = 0
        let solution = system(
            3,
            vec![bitbox![1, 1, 0, 1], bitbox![0, 0, 1, 1], bitbox![1, 1, 1, 0]],
        )
        .solve()
        .unwrap();
        assert_eq!(solution.rank, 2);
        assert_eq!(solution.values, bitbox![1, 0, 1]);
    }

    #[test]
    fn elimination_clears_pivot_columns_above_and_below() {
        let mut system = system(
            3,
            vec![bitbox![1, 1, 0, 1], bitbox![1, 0, 1, 0], bitbox![0, 1, 1, 1]],
        );
        let rank = system.eliminate();
        assert_eq!(rank, 2);
        assert_eq!(system.rows[0], bitbox![1, 0, 1, 0]);
        assert_eq!(system.rows[1], bitbox![0, 1, 1, 1]);
        assert_eq!(system.rows[2], bitbox![0, 0, 0, 0]);
    }

    #[test]
    fn zero_rhs_gives_zero_solution() {
        let board = Board::from_rows(&[[false; 4]; 4]);
        let solution = LinearSystem::from_board(&board).solve().unwrap();
        assert!(solution.values.not_any());
        // 4x4 Lights Out has four independent quiet patterns
        assert_eq!(solution.rank, 12);
    }
}
