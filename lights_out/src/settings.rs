use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{board::grid::BoardSize, generator::Generator, pattern::Pattern};

/// User preferences that outlive a single game.
///
/// Missing fields fall back to their defaults when deserializing, so older settings files keep
/// loading after new fields are added.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The side length of new boards.
    pub size: BoardSize,
    /// The pattern new games start with.
    pub pattern: Pattern,
    /// How long auto-solve waits between two presses.
    pub move_delay_ms: u64,
    /// Whether hints may be requested.
    pub show_hints: bool,
}

impl Settings {
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    pub fn generator(&self) -> Generator {
        Generator::new(self.size, self.pattern)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: BoardSize::default(),
            pattern: Pattern::default(),
            move_delay_ms: 600,
            show_hints: true,
        }
    }
}
