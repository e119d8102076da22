use std::{fmt, str::FromStr};

use rand::{seq::IteratorRandom, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{
    grid::{BoardSize, GridPos},
    Board,
};

/// The shapes a new game can start with.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Roughly a third of the lights, picked at random.
    #[default]
    Random,
    /// The middle row and middle column.
    Cross,
    /// The four corners.
    Corners,
    /// The outermost ring.
    Border,
    /// Every other light, starting with the top left.
    Checkerboard,
    /// Two nested diamonds around the center.
    Diamond,
    /// A square spiral winding outwards from the center.
    ///
    /// The walk keeps going well past the edges, so on boards of side 3 and up it ends up lighting
    /// every field.
    Spiral,
}

impl Pattern {
    pub const ALL: [Self; 7] = [
        Self::Random,
        Self::Cross,
        Self::Corners,
        Self::Border,
        Self::Checkerboard,
        Self::Diamond,
        Self::Spiral,
    ];

    /// The lowercase identifier used by [`Display`](fmt::Display) and [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Cross => "cross",
            Self::Corners => "corners",
            Self::Border => "border",
            Self::Checkerboard => "checkerboard",
            Self::Diamond => "diamond",
            Self::Spiral => "spiral",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "Random Pattern",
            Self::Cross => "Cross Pattern",
            Self::Corners => "Four Corners",
            Self::Border => "Border Pattern",
            Self::Checkerboard => "Checkerboard",
            Self::Diamond => "Diamond Shape",
            Self::Spiral => "Spiral Pattern",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Random => "Completely random configuration",
            Self::Cross => "Cross shape in center",
            Self::Corners => "Lights in corners only",
            Self::Border => "Lights around the border",
            Self::Checkerboard => "Alternating pattern",
            Self::Diamond => "Diamond pattern in center",
            Self::Spiral => "Spiral from center outward",
        }
    }

    /// Whether [`Self::generate`] depends on the random number generator.
    pub fn is_random(self) -> bool {
        self == Self::Random
    }

    /// Lights up a fresh board in this pattern.
    ///
    /// Only [`Pattern::Random`] consumes randomness; all other patterns are fixed for a given size.
    /// The result may be all off on tiny boards or may not be solvable; see
    /// [`Generator`](crate::generator::Generator) for boards that are guaranteed to be playable.
    pub fn generate(self, size: BoardSize, rng: &mut impl Rng) -> Board {
        let mut board = Board::new(size);
        let side = size.side();
        let last = side - 1;
        let middle = side / 2;

        match self {
            Self::Random => {
                let field_count = size.field_count().get();
                let light_count =
                    (field_count * 3 / 10 + rng.gen_range(0..side)).min(field_count);
                for field_index in (0..field_count).choose_multiple(rng, light_count) {
                    let pos = GridPos::from_field_index(field_index, size)
                        .expect("field index should be in range");
                    board.set_lit(pos, true);
                }
            }
            Self::Cross => {
                for i in 0..side {
                    board.set_lit(GridPos::new(middle, i), true);
                    board.set_lit(GridPos::new(i, middle), true);
                }
            }
            Self::Corners => {
                for (row, col) in [(0, 0), (0, last), (last, 0), (last, last)] {
                    board.set_lit(GridPos::new(row, col), true);
                }
            }
            Self::Border => {
                for i in 0..side {
                    board.set_lit(GridPos::new(0, i), true);
                    board.set_lit(GridPos::new(last, i), true);
                    board.set_lit(GridPos::new(i, 0), true);
                    board.set_lit(GridPos::new(i, last), true);
                }
            }
            Self::Checkerboard => {
                for pos in size.positions() {
                    board.set_lit(pos, (pos.row + pos.col) % 2 == 0);
                }
            }
            Self::Diamond => {
                for pos in size.positions() {
                    let distance = pos.row.abs_diff(middle) + pos.col.abs_diff(middle);
                    board.set_lit(pos, distance == side / 4 || distance == side / 2);
                }
            }
            Self::Spiral => spiral(&mut board),
        }

        board
    }
}

/// Walks right, down, left and up from the center, turning after every run and growing the run
/// length after every second turn. Steps that leave the board are skipped but still walked.
fn spiral(board: &mut Board) {
    const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

    let size = board.size();
    let side = size.side() as isize;
    let center = size.center();
    let (mut row, mut col) = (center.row as isize, center.col as isize);
    let mut direction = 0;
    let mut steps = 1;

    board.set_lit(center, true);

    for _ in 0..size.field_count().get() / 3 {
        for _ in 0..2 {
            let (row_step, col_step) = DIRECTIONS[direction];
            for _ in 0..steps {
                row += row_step;
                col += col_step;
                if (0..side).contains(&row) && (0..side).contains(&col) {
                    board.set_lit(GridPos::new(row as usize, col as usize), true);
                }
            }
            direction = (direction + 1) % DIRECTIONS.len();
        }
        steps += 1;
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown pattern {0:?}")]
pub struct ParsePatternError(String);

impl FromStr for Pattern {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePatternError(s.to_owned()))
    }
}
