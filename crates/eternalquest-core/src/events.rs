use serde::{Deserialize, Serialize};

use crate::goal::GoalVariant;
use crate::progression::LoginOutcome;

/// Every state change in a session produces an Event.
/// Drivers drain them after each call to render feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GoalCreated {
        index: usize,
        name: String,
        variant: GoalVariant,
    },
    /// Points were awarded for a goal event (possibly zero).
    GoalRecorded {
        index: usize,
        name: String,
        base_points: u64,
        bonus_points: u64,
        score: u64,
    },
    /// A simple or checklist goal just became complete.
    GoalCompleted {
        index: usize,
        name: String,
    },
    LevelUp {
        from: u32,
        to: u32,
        title: String,
    },
    BadgeUnlocked {
        name: String,
    },
    /// Login streak was recomputed at session start.
    StreakUpdated {
        outcome: LoginOutcome,
        streak: u32,
        bonus_points: u64,
    },
    /// The whole session was replaced from a save file.
    SessionLoaded {
        goals: usize,
        score: u64,
    },
}
