pub mod grid;

use std::{fmt, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::light_map::LightMap;

use self::grid::{BoardSize, GridPos};

/// A square grid of lights.
///
/// The only way to change a board during play is [`Board::toggle`], which implements the Lights Out
/// move: the pressed light and its orthogonal neighbors flip. [`Board::set_lit`] exists to build
/// starting positions.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    lights: LightMap,
}

impl Board {
    /// Creates a board of the given size with all lights off.
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            lights: LightMap::new(size.field_count()),
        }
    }

    /// Creates a board from rows of lights, `true` meaning lit.
    ///
    /// # Panics
    ///
    /// Panics if there are no rows or if any row's length differs from the number of rows.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let size = BoardSize::try_new(rows.len()).expect("board should have at least one row");
        let mut board = Self::new(size);
        for (row, lights) in rows.iter().enumerate() {
            let lights = lights.as_ref();
            assert_eq!(lights.len(), size.side(), "board should be square");
            for (col, &lit) in lights.iter().enumerate() {
                board.set_lit(GridPos { row, col }, lit);
            }
        }
        board
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// The underlying lights, indexed by row-major field index.
    pub fn lights(&self) -> &LightMap {
        &self.lights
    }

    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn is_lit(&self, pos: GridPos) -> bool {
        self.lights.is_lit(self.field_index(pos))
    }

    /// Turns a single light on or off without affecting its neighbors.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn set_lit(&mut self, pos: GridPos, lit: bool) {
        let field_index = self.field_index(pos);
        self.lights.set_lit(field_index, lit);
    }

    /// Presses the light at `pos`, flipping it and all of its orthogonal neighbors.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn toggle(&mut self, pos: GridPos) {
        for field_index in self.size.toggled_fields(self.field_index(pos)) {
            self.lights.toggle(field_index);
        }
    }

    /// Presses each of the given positions in order.
    pub fn apply_moves<'a>(&mut self, moves: impl IntoIterator<Item = &'a GridPos>) {
        for &pos in moves {
            self.toggle(pos);
        }
    }

    pub fn lit_count(&self) -> usize {
        self.lights.lit_count()
    }

    /// Whether the puzzle is solved.
    pub fn is_all_off(&self) -> bool {
        self.lights.is_all_off()
    }

    /// Turns every light off.
    pub fn clear(&mut self) {
        self.lights.reset();
    }

    /// Returns all positions with their state in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, bool)> + '_ {
        self.size.positions().map(|pos| (pos, self.is_lit(pos)))
    }

    fn field_index(&self, pos: GridPos) -> usize {
        pos.to_field_index(self.size)
            .unwrap_or_else(|| panic!("{pos} should lie within a {} board", self.size))
    }
}

/// Renders one line per row, `#` for lit and `.` for unlit lights.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.size.side();
        for row in 0..side {
            let line = (0..side)
                .map(|col| if self.is_lit(GridPos { row, col }) { '#' } else { '.' })
                .join("");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("board is empty")]
    Empty,
    #[error("row {row} has {len} lights, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("invalid light {found:?}; use '#', 'x' or '1' for lit and '.', 'o' or '0' for unlit")]
    InvalidLight { found: char },
}

/// Parses the format written by [`Display`](fmt::Display).
///
/// Rows are separated by any whitespace, so `"#.. .#. ..#"` works as well as one row per line.
/// Besides `#` and `.`, `x`/`1` are accepted for lit and `o`/`0` for unlit lights.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split_whitespace()
            .map(|row| {
                row.chars()
                    .map(|light| match light {
                        '#' | 'x' | 'X' | '1' => Ok(true),
                        '.' | 'o' | 'O' | '0' => Ok(false),
                        found => Err(ParseBoardError::InvalidLight { found }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Err(ParseBoardError::Empty);
        }
        let expected = rows.len();
        if let Some((row, lights)) = rows
            .iter()
            .enumerate()
            .find(|(_, lights)| lights.len() != expected)
        {
            return Err(ParseBoardError::NotSquare {
                row,
                len: lights.len(),
                expected,
            });
        }

        Ok(Self::from_rows(&rows))
    }
}
