//! The session aggregate: score, streak, badges and the goal registry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::goal::Goal;
use crate::progression::{level_for_score, title_for_level, BadgeSet, ProgressCounters};

/// All state of one player run.
///
/// Only [`crate::GoalManager`] mutates a session; everything else gets a
/// shared reference. The level is not stored, it is always derived from the
/// score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Session {
    pub(crate) score: u64,
    pub(crate) streak: u32,
    pub(crate) last_login: Option<NaiveDate>,
    pub(crate) total_goals_completed: u32,
    pub(crate) badges: BadgeSet,
    pub(crate) goals: Vec<Goal>,
}

impl Session {
    /// An empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    pub fn title(&self) -> &'static str {
        title_for_level(self.level())
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_login(&self) -> Option<NaiveDate> {
        self.last_login
    }

    pub fn total_goals_completed(&self) -> u32 {
        self.total_goals_completed
    }

    pub fn badges(&self) -> &BadgeSet {
        &self.badges
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Snapshot of the counters badge rules are evaluated against.
    pub fn counters(&self) -> ProgressCounters {
        ProgressCounters {
            level: self.level(),
            goals_created: self.goals.len(),
            goals_completed: self.total_goals_completed,
            score: self.score,
            streak: self.streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_starts_at_level_one() {
        let session = Session::new();
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.title(), "Goal Beginner");
        assert_eq!(session.streak(), 0);
        assert!(session.last_login().is_none());
        assert!(session.goals().is_empty());
        assert!(session.badges().is_empty());
    }

    #[test]
    fn level_follows_score() {
        let session = Session {
            score: 2600,
            ..Default::default()
        };
        assert_eq!(session.level(), 6);
        assert_eq!(session.title(), "Quest Adventurer");
        assert_eq!(session.counters().level, 6);
    }
}
