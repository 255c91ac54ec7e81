//! High-score table.
//!
//! Finished games are recorded as [`ScoreEntry`] values in a bounded table
//! ranked by score (highest first). Entries with equal scores keep the order in
//! which they were added.
//!
//! Two backends implement [`ScoreRepository`]:
//!
//! - [`MemoryScoreRepository`]: process-local, used by tests and as a fallback.
//! - [`JsonFileScoreRepository`]: rewrites a JSON document on every add.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tui_blocks_types::GameStats;

pub use tui_blocks_types as types;

pub const DEFAULT_MAX_HIGH_SCORES: usize = 5;
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// One finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_name: String,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    /// Unix seconds when the game started (0 if unknown)
    pub timestamp: u64,
}

impl ScoreEntry {
    /// Build an entry from final game stats. An empty name becomes "Player".
    pub fn from_stats(player_name: &str, stats: &GameStats) -> Self {
        let name = player_name.trim();
        Self {
            player_name: if name.is_empty() {
                DEFAULT_PLAYER_NAME.to_string()
            } else {
                name.to_string()
            },
            score: stats.score,
            level: stats.level,
            lines_cleared: stats.lines_cleared,
            timestamp: stats.start_time.unwrap_or(0),
        }
    }
}

/// Storage for the high-score table
pub trait ScoreRepository {
    /// Record a finished game; entries that do not rank are discarded.
    fn add(&mut self, entry: ScoreEntry) -> Result<()>;

    /// Best `n` entries, highest score first.
    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>>;

    /// Whether `score` would enter the table.
    fn is_high_score(&self, score: u32) -> Result<bool>;
}

/// Ranked, bounded list shared by both backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ScoreTable {
    high_scores: Vec<ScoreEntry>,
}

impl ScoreTable {
    fn insert(&mut self, entry: ScoreEntry, max_entries: usize) {
        // After every existing entry with the same or higher score
        let pos = self
            .high_scores
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.high_scores.len());
        self.high_scores.insert(pos, entry);
        self.high_scores.truncate(max_entries);
    }

    fn top_n(&self, n: usize) -> Vec<ScoreEntry> {
        self.high_scores.iter().take(n).cloned().collect()
    }

    fn qualifies(&self, score: u32, max_entries: usize) -> bool {
        if max_entries == 0 {
            return false;
        }
        if self.high_scores.len() < max_entries {
            return true;
        }
        self.high_scores
            .last()
            .is_some_and(|lowest| score > lowest.score)
    }

    /// Re-rank entries loaded from disk and drop the overflow.
    fn normalize(&mut self, max_entries: usize) {
        // Stable: equal scores keep file order
        self.high_scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.high_scores.truncate(max_entries);
    }
}

/// In-memory high-score table
#[derive(Debug, Clone)]
pub struct MemoryScoreRepository {
    table: ScoreTable,
    max_entries: usize,
}

impl MemoryScoreRepository {
    pub fn new(max_entries: usize) -> Self {
        Self {
            table: ScoreTable::default(),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.table.high_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.high_scores.is_empty()
    }
}

impl Default for MemoryScoreRepository {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HIGH_SCORES)
    }
}

impl ScoreRepository for MemoryScoreRepository {
    fn add(&mut self, entry: ScoreEntry) -> Result<()> {
        self.table.insert(entry, self.max_entries);
        Ok(())
    }

    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        Ok(self.table.top_n(n))
    }

    fn is_high_score(&self, score: u32) -> Result<bool> {
        Ok(self.table.qualifies(score, self.max_entries))
    }
}

/// High-score table persisted as a JSON document
#[derive(Debug, Clone)]
pub struct JsonFileScoreRepository {
    path: PathBuf,
    table: ScoreTable,
    max_entries: usize,
}

impl JsonFileScoreRepository {
    /// Load the table at `path`. A missing file starts an empty table.
    pub fn open(path: impl Into<PathBuf>, max_entries: usize) -> Result<Self> {
        let path = path.into();
        let mut table = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read score file {}", path.display()))?;
            serde_json::from_str::<ScoreTable>(&text)
                .with_context(|| format!("failed to parse score file {}", path.display()))?
        } else {
            ScoreTable::default()
        };
        table.normalize(max_entries);

        Ok(Self {
            path,
            table,
            max_entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.table)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write score file {}", self.path.display()))
    }
}

impl ScoreRepository for JsonFileScoreRepository {
    fn add(&mut self, entry: ScoreEntry) -> Result<()> {
        self.table.insert(entry, self.max_entries);
        self.save()
    }

    fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        Ok(self.table.top_n(n))
    }

    fn is_high_score(&self, score: u32) -> Result<bool> {
        Ok(self.table.qualifies(score, self.max_entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            player_name: name.to_string(),
            score,
            level: 1,
            lines_cleared: 0,
            timestamp: 0,
        }
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tui-blocks-scores-{}-{}", tag, std::process::id()))
            .join("scores.json")
    }

    #[test]
    fn test_ranked_highest_first() {
        let mut repo = MemoryScoreRepository::new(5);
        repo.add(entry("a", 100)).unwrap();
        repo.add(entry("b", 300)).unwrap();
        repo.add(entry("c", 200)).unwrap();

        let scores: Vec<u32> = repo.top_n(5).unwrap().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut repo = MemoryScoreRepository::new(5);
        repo.add(entry("first", 100)).unwrap();
        repo.add(entry("second", 100)).unwrap();

        let names: Vec<String> = repo
            .top_n(5)
            .unwrap()
            .into_iter()
            .map(|e| e.player_name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_table_is_bounded() {
        let mut repo = MemoryScoreRepository::new(3);
        for score in [10, 50, 20, 40, 30] {
            repo.add(entry("p", score)).unwrap();
        }
        let scores: Vec<u32> = repo.top_n(10).unwrap().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 40, 30]);
    }

    #[test]
    fn test_is_high_score() {
        let mut repo = MemoryScoreRepository::new(2);
        assert!(repo.is_high_score(0).unwrap());
        repo.add(entry("a", 100)).unwrap();
        repo.add(entry("b", 200)).unwrap();
        assert!(!repo.is_high_score(100).unwrap());
        assert!(repo.is_high_score(101).unwrap());
    }

    #[test]
    fn test_from_stats_defaults_name() {
        let stats = GameStats {
            score: 420,
            level: 3,
            lines_cleared: 21,
            start_time: Some(1_700_000_000),
            ..GameStats::default()
        };
        let e = ScoreEntry::from_stats("  ", &stats);
        assert_eq!(e.player_name, DEFAULT_PLAYER_NAME);
        assert_eq!(e.score, 420);
        assert_eq!(e.level, 3);
        assert_eq!(e.lines_cleared, 21);
        assert_eq!(e.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_json_file_persists_between_opens() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        {
            let mut repo = JsonFileScoreRepository::open(&path, 5).unwrap();
            repo.add(entry("ann", 500)).unwrap();
            repo.add(entry("bob", 700)).unwrap();
        }

        let repo = JsonFileScoreRepository::open(&path, 5).unwrap();
        let top = repo.top_n(5).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].player_name, "bob");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_json_file_missing_starts_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_dir_all(path.parent().unwrap());

        let repo = JsonFileScoreRepository::open(&path, 5).unwrap();
        assert!(repo.top_n(5).unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_json_file_rejects_garbage() {
        let path = temp_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = JsonFileScoreRepository::open(&path, 5).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse score file"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
