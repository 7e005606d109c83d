use crate::core::scoring::BattleSummary;
use crate::core::state::BattleResult;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const RECENT_LIMIT: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub trainer_name: String,
    pub score: u32,
    pub leader_name: String,
    pub opponent_name: String,
    // boards saved before results were recorded only held wins
    #[serde(default = "won")]
    pub result: BattleResult,
    pub timestamp: DateTime<Utc>,
}

fn won() -> BattleResult {
    BattleResult::Win
}

impl LeaderboardEntry {
    /// Only won battles are ranked.
    pub fn from_summary(trainer_name: &str, summary: &BattleSummary, now: DateTime<Utc>) -> Option<Self> {
        if summary.result != BattleResult::Win {
            return None;
        }
        Some(Self {
            trainer_name: trainer_name.to_string(),
            score: summary.score,
            leader_name: summary.leader_name.clone(),
            opponent_name: summary.opponent_name.clone(),
            result: summary.result,
            timestamp: now,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LeaderboardStats {
    pub total_battles: usize,
    pub victories: usize,
    pub highest_score: u32,
}

/// Finished-battle scores kept in a CSV file, ranked by score.
#[derive(Clone, Debug)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut entries = Vec::new();
        if path.exists() {
            let mut reader = csv::Reader::from_path(&path)?;
            for record in reader.deserialize() {
                let entry: LeaderboardEntry = record?;
                entries.push(entry);
            }
        }
        let mut board = Self { path, entries };
        board.rank();
        Ok(board)
    }

    /// Saves the board and returns the 1-based rank the entry landed on.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> Result<usize> {
        tracing::info!(trainer = %entry.trainer_name, score = entry.score, "leaderboard submission");
        self.entries.push(entry.clone());
        self.rank();
        self.save()?;
        Ok(self.rank_of(&entry).unwrap_or(self.entries.len()))
    }

    /// Highest score first; equal scores keep the earlier submission ahead.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn rank_of(&self, entry: &LeaderboardEntry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry).map(|i| i + 1)
    }

    /// Newest first.
    pub fn recent(&self, n: usize) -> Vec<&LeaderboardEntry> {
        let mut recent: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(n);
        recent
    }

    pub fn stats(&self) -> LeaderboardStats {
        LeaderboardStats {
            total_battles: self.entries.len(),
            victories: self.entries.iter().filter(|e| e.result == BattleResult::Win).count(),
            highest_score: self.entries.iter().map(|e| e.score).max().unwrap_or(0),
        }
    }

    fn rank(&mut self) {
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.timestamp.cmp(&b.timestamp))
        });
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        for entry in &self.entries {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("leaderboard-{}.csv", uuid::Uuid::new_v4()))
    }

    fn entry(trainer: &str, score: u32, second: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            trainer_name: trainer.to_string(),
            score,
            leader_name: "charmander".to_string(),
            opponent_name: "bulbasaur".to_string(),
            result: BattleResult::Win,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap(),
        }
    }

    #[test]
    fn ranks_by_score_then_time_and_persists() {
        let path = temp_path();
        let mut board = Leaderboard::open(&path).expect("open");
        assert_eq!(board.submit(entry("ash", 380, 0)).expect("submit"), 1);
        assert_eq!(board.submit(entry("misty", 780, 1)).expect("submit"), 1);
        assert_eq!(board.submit(entry("brock", 380, 2)).expect("submit"), 3);

        let names: Vec<&str> = board.entries().iter().map(|e| e.trainer_name.as_str()).collect();
        assert_eq!(names, vec!["misty", "ash", "brock"]);
        assert_eq!(board.top(1)[0].score, 780);
        assert_eq!(board.top(10).len(), 3);

        let reopened = Leaderboard::open(&path).expect("reopen");
        assert_eq!(reopened.entries(), board.entries());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn losses_are_not_submitted() {
        let summary = BattleSummary {
            result: BattleResult::Lose,
            score: 0,
            leader_name: "a".to_string(),
            opponent_name: "b".to_string(),
        };
        assert!(LeaderboardEntry::from_summary("ash", &summary, Utc::now()).is_none());

        let won = BattleSummary {
            result: BattleResult::Win,
            ..summary
        };
        let entry = LeaderboardEntry::from_summary("ash", &won, Utc::now()).expect("win entry");
        assert_eq!(entry.leader_name, "a");
    }

    #[test]
    fn rank_lookup_recent_view_and_stats() {
        let mut board = Leaderboard::open(temp_path()).expect("open");
        assert_eq!(board.stats(), LeaderboardStats::default());

        let early_high = entry("misty", 780, 0);
        let late_low = entry("ash", 200, 30);
        let mid = entry("brock", 500, 15);
        let mut loss = entry("gary", 0, 45);
        loss.result = BattleResult::Lose;
        for e in [&early_high, &late_low, &mid, &loss] {
            board.submit(e.clone()).expect("submit");
        }

        assert_eq!(board.rank_of(&mid), Some(2));
        assert_eq!(board.rank_of(&entry("nobody", 1, 59)), None);

        let recent: Vec<&str> = board.recent(3).iter().map(|e| e.trainer_name.as_str()).collect();
        assert_eq!(recent, vec!["gary", "ash", "brock"]);
        assert_eq!(board.recent(RECENT_LIMIT).len(), 4);

        assert_eq!(
            board.stats(),
            LeaderboardStats {
                total_battles: 4,
                victories: 3,
                highest_score: 780,
            }
        );

        let _ = fs::remove_file(&board.path);
    }
}
