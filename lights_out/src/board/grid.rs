use std::{fmt, num::NonZeroUsize};

use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// A position on a [`Board`](crate::Board), counted from the top left corner.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts a flattened, row-major field index back into a position.
    ///
    /// Returns [`None`] if the index lies outside of a board of the given size.
    pub fn from_field_index(field_index: usize, size: BoardSize) -> Option<Self> {
        let row = field_index / size.side();
        (row < size.side()).then(|| Self {
            row,
            col: field_index % size.side(),
        })
    }

    /// Flattens the position into a row-major field index.
    ///
    /// Returns [`None`] if the position lies outside of a board of the given size.
    pub fn to_field_index(self, size: BoardSize) -> Option<usize> {
        (self.row < size.side() && self.col < size.side())
            .then(|| self.row * size.side() + self.col)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The side length of a square board.
///
/// Defaults to the classic 5x5 board.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSize(NonZeroUsize);

impl BoardSize {
    pub const fn new(side: NonZeroUsize) -> Self {
        Self(side)
    }

    /// Returns [`None`] for a side length of `0`.
    pub fn try_new(side: usize) -> Option<Self> {
        NonZeroUsize::new(side).map(Self)
    }

    /// The number of rows, which is also the number of columns.
    pub fn side(self) -> usize {
        self.0.get()
    }

    /// The total number of fields on the board.
    pub fn field_count(self) -> NonZeroUsize {
        self.0
            .checked_mul(self.0)
            .expect("field count should not overflow")
    }

    /// The middle field, rounding towards the top left on boards with an even side length.
    pub fn center(self) -> GridPos {
        let middle = self.side() / 2;
        GridPos::new(middle, middle)
    }

    /// Returns all positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = GridPos> {
        iproduct!(0..self.side(), 0..self.side()).map(|(row, col)| GridPos { row, col })
    }

    /// Returns the column to the left of the given column, if any.
    fn left(self, col: usize) -> Option<usize> {
        assert!(col < self.side());
        col.checked_sub(1)
    }

    /// Returns the column to the right of the given column, if any.
    fn right(self, col: usize) -> Option<usize> {
        assert!(col < self.side());
        (col < self.side() - 1).then(|| col + 1)
    }

    /// Returns the row above the given row, if any.
    fn above(self, row: usize) -> Option<usize> {
        assert!(row < self.side());
        row.checked_sub(1)
    }

    /// Returns the row below the given row, if any.
    fn below(self, row: usize) -> Option<usize> {
        assert!(row < self.side());
        (row < self.side() - 1).then(|| row + 1)
    }

    /// Returns the fields that get toggled when pressing the given field.
    ///
    /// That is the field itself and its orthogonal neighbors that lie within the board. Edges do
    /// not wrap around, so corners toggle three fields and other edge fields four.
    ///
    /// The relation is symmetric: if pressing `a` toggles `b`, pressing `b` also toggles `a`.
    /// Fields are returned in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `field_index` is out of bounds.
    pub fn toggled_fields(self, field_index: usize) -> impl DoubleEndedIterator<Item = usize> {
        let GridPos { row, col } =
            GridPos::from_field_index(field_index, self).expect("field_index should be valid");

        [
            self.above(row).map(|row| (row, col)),
            self.left(col).map(|col| (row, col)),
            Some((row, col)),
            self.right(col).map(|col| (row, col)),
            self.below(row).map(|row| (row, col)),
        ]
        .into_iter()
        .flatten()
        .map(move |(row, col)| {
            GridPos { row, col }
                .to_field_index(self)
                .expect("adjacent grid pos should be within bounds")
        })
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(5).expect("5 is not zero"))
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}
