use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::board::grid::BoardSize;

/// Results of won games, overall and per board size.
///
/// Only games the player solved on their own count; auto-solved games are never recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub games_won: u64,
    pub total_moves: u64,
    pub best_time_secs: Option<u64>,
    pub best_moves: Option<usize>,
    /// Records keyed by side length.
    pub by_size: BTreeMap<usize, SizeRecord>,
}

/// Best results for a single board size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeRecord {
    pub games_won: u64,
    pub best_time_secs: Option<u64>,
    pub best_moves: Option<usize>,
}

impl SizeRecord {
    fn record(&mut self, moves: usize, secs: u64) {
        self.games_won += 1;
        self.best_time_secs = Some(self.best_time_secs.map_or(secs, |best| best.min(secs)));
        self.best_moves = Some(self.best_moves.map_or(moves, |best| best.min(moves)));
    }
}

impl Statistics {
    /// Records a won game, updating totals and best results.
    ///
    /// Times are tracked in whole seconds.
    pub fn record_win(&mut self, size: BoardSize, moves: usize, elapsed: Duration) {
        let secs = elapsed.as_secs();

        self.games_won += 1;
        self.total_moves += moves as u64;
        self.best_time_secs = Some(self.best_time_secs.map_or(secs, |best| best.min(secs)));
        self.best_moves = Some(self.best_moves.map_or(moves, |best| best.min(moves)));

        self.by_size
            .entry(size.side())
            .or_default()
            .record(moves, secs);
    }

    /// The mean number of moves per won game, [`None`] before the first win.
    pub fn average_moves(&self) -> Option<f64> {
        (self.games_won > 0).then(|| self.total_moves as f64 / self.games_won as f64)
    }

    pub fn for_size(&self, size: BoardSize) -> Option<&SizeRecord> {
        self.by_size.get(&size.side())
    }

    /// Forgets everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(side: usize) -> BoardSize {
        BoardSize::try_new(side).unwrap()
    }

    #[test]
    fn starts_empty() {
        let stats = Statistics::default();
        assert_eq!(stats.games_won, 0);
        assert_eq!(stats.average_moves(), None);
        assert_eq!(stats.for_size(size(5)), None);
    }

    #[test]
    fn keeps_best_results_per_size() {
        let mut stats = Statistics::default();
        stats.record_win(size(5), 20, Duration::from_secs(90));
        stats.record_win(size(5), 14, Duration::from_secs(120));
        stats.record_win(size(3), 3, Duration::from_millis(4500));

        assert_eq!(stats.games_won, 3);
        assert_eq!(stats.total_moves, 37);
        assert_eq!(stats.best_moves, Some(3));
        assert_eq!(stats.best_time_secs, Some(4));
        assert_eq!(
            stats.for_size(size(5)),
            Some(&SizeRecord {
                games_won: 2,
                best_time_secs: Some(90),
                best_moves: Some(14),
            })
        );
        assert_eq!(stats.for_size(size(3)).unwrap().best_moves, Some(3));
    }

    #[test]
    fn averages_moves_over_wins() {
        let mut stats = Statistics::default();
        stats.record_win(size(5), 10, Duration::ZERO);
        stats.record_win(size(5), 15, Duration::ZERO);
        assert_eq!(stats.average_moves(), Some(12.5));
    }

    #[test]
    fn reset_forgets_everything() {
        let mut stats = Statistics::default();
        stats.record_win(size(7), 30, Duration::from_secs(300));
        stats.reset();
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn loads_from_json_with_size_keys() {
        let json = r#"{"games_won": 1, "total_moves": 4, "by_size": {"3": {"games_won": 1}}}"#;
        let stats: Statistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.for_size(size(3)).unwrap().games_won, 1);
        assert_eq!(stats.best_moves, None);
    }
}
