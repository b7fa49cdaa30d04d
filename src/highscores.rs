//! Session leaderboard
//!
//! In-memory only: tracks the top 10 match scores and the most recent one
//! (shown on the menu screen between matches).

use serde::{Deserialize, Serialize};

use crate::sim::{MatchObserver, MatchReport};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Dots depleted across both sides
    pub respawns: u32,
    /// Match length including time bonuses (ms)
    pub duration_ms: f64,
    /// Position of the match in this session (1-indexed)
    pub match_number: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    /// Score of the most recently finished match
    pub last_score: Option<u32>,
    /// Matches finished this session
    pub matches_played: u32,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished match; returns the rank achieved, if any
    pub fn record(&mut self, report: &MatchReport) -> Option<usize> {
        self.matches_played += 1;
        self.last_score = Some(report.score);

        if !self.qualifies(report.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: report.score,
            respawns: report.respawns,
            duration_ms: report.duration_ms,
            match_number: self.matches_played,
        };

        // Sorted descending; ties keep the earlier match first
        let pos = self.entries.iter().position(|e| report.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Menu line for the previous match
    pub fn last_score_label(&self) -> Option<String> {
        self.last_score.map(|score| format!("Last Score: {score}"))
    }
}

impl MatchObserver for HighScores {
    fn match_ended(&mut self, report: &MatchReport) {
        match self.record(report) {
            Some(rank) => log::info!("Score {} ranked #{rank}", report.score),
            None => log::debug!("Score {} did not place", report.score),
        }
    }
}
