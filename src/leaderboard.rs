//! Best-score and leaderboard persistence.
//!
//! A single JSON document under the platform config directory holds the best
//! score and the top-20 run list. Reads that fail for any reason yield an
//! empty board; the game never refuses to start over a bad store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::config::{BOARD_CAP, DEFAULT_NAME, NAME_MAX};

/// One finished run on the leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub score: u32,
    pub date: DateTime<Utc>,
}

/// Best score plus the ranked run list. Kept sorted (score descending, then
/// recency descending) and capped at [`BOARD_CAP`] after every insert.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub best: u32,
    pub entries: Vec<Entry>,
}

impl ScoreBoard {
    /// Fold a finished run into the best score. Returns whether it improved.
    pub fn record_best(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// A score qualifies while the board has room, or when it beats the
    /// current lowest of the top 20.
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < BOARD_CAP {
            return true;
        }
        match self.entries.last() {
            Some(lowest) => score > lowest.score,
            None => true,
        }
    }

    /// Insert a run, re-sort and truncate. The name is trimmed, capped at
    /// [`NAME_MAX`] chars and defaults to [`DEFAULT_NAME`] when empty.
    pub fn insert(&mut self, name: &str, score: u32, date: DateTime<Utc>) {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            trimmed.chars().take(NAME_MAX).collect()
        };
        self.entries.push(Entry { name, score, date });
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(b.date.cmp(&a.date)));
        self.entries.truncate(BOARD_CAP);
    }

    pub fn top(&self, n: usize) -> &[Entry] {
        &self.entries[..self.entries.len().min(n)]
    }
}

/// File-backed store for a [`ScoreBoard`].
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Store under the platform config directory (`floppy-tui/scores.json`).
    pub fn open() -> io::Result<Self> {
        let dirs = ProjectDirs::from("", "", "floppy-tui").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine config directory")
        })?;
        fs::create_dir_all(dirs.config_dir())?;
        Ok(Self {
            path: dirs.config_dir().join("scores.json"),
        })
    }

    /// Store at an explicit path.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Absent or unreadable stores load as the empty board.
    pub fn load(&self) -> ScoreBoard {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, board: &ScoreBoard) -> io::Result<()> {
        let text = serde_json::to_string_pretty(board).map_err(io::Error::other)?;
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn is_sorted(board: &ScoreBoard) -> bool {
        board
            .entries
            .windows(2)
            .all(|w| w[0].score > w[1].score || (w[0].score == w[1].score && w[0].date >= w[1].date))
    }

    #[test]
    fn insert_keeps_board_sorted_and_capped() {
        let mut board = ScoreBoard::default();
        for i in 0..30u32 {
            board.insert(&format!("p{i}"), (i * 7) % 23, date(i as i64));
            assert!(is_sorted(&board));
            assert!(board.entries.len() <= BOARD_CAP);
        }
        assert_eq!(board.entries.len(), BOARD_CAP);
    }

    #[test]
    fn ties_rank_recent_first() {
        let mut board = ScoreBoard::default();
        board.insert("old", 10, date(100));
        board.insert("new", 10, date(200));
        assert_eq!(board.entries[0].name, "new");
        assert_eq!(board.entries[1].name, "old");
    }

    #[test]
    fn full_board_evicts_lowest() {
        let mut board = ScoreBoard::default();
        // 20 entries, lowest score 40.
        for i in 0..BOARD_CAP as u32 {
            board.insert(&format!("p{i}"), 40 + i, date(i as i64));
        }
        assert!(!board.qualifies(40));
        assert!(board.qualifies(50));

        board.insert("ace", 50, date(999));
        assert_eq!(board.entries.len(), BOARD_CAP);
        assert!(board.entries.iter().any(|e| e.name == "ace"));
        assert!(board.entries.iter().all(|e| e.score > 40));
        assert!(is_sorted(&board));
    }

    #[test]
    fn partial_board_always_qualifies() {
        let mut board = ScoreBoard::default();
        assert!(board.qualifies(0));
        board.insert("a", 99, date(0));
        assert!(board.qualifies(0));
    }

    #[test]
    fn names_are_sanitized() {
        let mut board = ScoreBoard::default();
        board.insert("   ", 1, date(0));
        board.insert("a-very-long-player-name", 2, date(1));
        assert_eq!(board.entries[1].name, DEFAULT_NAME);
        assert_eq!(board.entries[0].name.chars().count(), NAME_MAX);
    }

    #[test]
    fn record_best_only_improves() {
        let mut board = ScoreBoard::default();
        assert!(board.record_best(5));
        assert!(!board.record_best(3));
        assert_eq!(board.best, 5);
    }

    #[test]
    fn store_round_trips() {
        let path = std::env::temp_dir().join(format!("floppy-scores-{}.json", std::process::id()));
        let store = ScoreStore::at(&path);

        let mut board = ScoreBoard::default();
        board.record_best(12);
        board.insert("ace", 12, date(42));
        store.save(&board).expect("save score board");

        let loaded = store.load();
        assert_eq!(loaded.best, 12);
        assert_eq!(loaded.entries, board.entries);

        fs::remove_file(&path).expect("remove score file");
    }

    #[test]
    fn missing_or_corrupt_store_loads_empty() {
        let missing = ScoreStore::at("/nonexistent/floppy/scores.json");
        assert_eq!(missing.load().best, 0);
        assert!(missing.load().entries.is_empty());

        let path = std::env::temp_dir().join(format!("floppy-corrupt-{}.json", std::process::id()));
        fs::write(&path, "{ not json").expect("write corrupt file");
        let store = ScoreStore::at(&path);
        assert!(store.load().entries.is_empty());
        fs::remove_file(&path).expect("remove corrupt file");
    }
}
