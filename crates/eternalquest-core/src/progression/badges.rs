//! Badge rule table.
//!
//! Every badge is unlocked by exactly one rule. Rules are checked in table
//! order after each mutation, and a badge already in the set is never added
//! again, so evaluation can be repeated freely.

use serde::{Deserialize, Serialize};

/// Session counters the badge rules look at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProgressCounters {
    pub level: u32,
    pub goals_created: usize,
    pub goals_completed: u32,
    pub score: u64,
    pub streak: u32,
}

/// Threshold a counter must reach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "counter", content = "at_least", rename_all = "snake_case")]
pub enum BadgeRequirement {
    Level(u32),
    GoalsCreated(usize),
    GoalsCompleted(u32),
    Score(u64),
    Streak(u32),
}

impl BadgeRequirement {
    pub fn is_met(&self, counters: &ProgressCounters) -> bool {
        match *self {
            BadgeRequirement::Level(n) => counters.level >= n,
            BadgeRequirement::GoalsCreated(n) => counters.goals_created >= n,
            BadgeRequirement::GoalsCompleted(n) => counters.goals_completed >= n,
            BadgeRequirement::Score(n) => counters.score >= n,
            BadgeRequirement::Streak(n) => counters.streak >= n,
        }
    }

    /// Human-readable unlock condition.
    pub fn describe(&self) -> String {
        match *self {
            BadgeRequirement::Level(n) => format!("Reach level {n}"),
            BadgeRequirement::GoalsCreated(n) => format!("Create {n} goals"),
            BadgeRequirement::GoalsCompleted(n) => format!("Complete {n} goals"),
            BadgeRequirement::Score(n) => format!("Earn {n} points"),
            BadgeRequirement::Streak(n) => format!("Log in {n} days in a row"),
        }
    }
}

/// A named badge and the requirement that unlocks it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BadgeRule {
    pub name: &'static str,
    pub requirement: BadgeRequirement,
}

/// All badges, in unlock-check order. Names are unique.
pub const BADGE_RULES: &[BadgeRule] = &[
    BadgeRule { name: "Rising Star", requirement: BadgeRequirement::Level(5) },
    BadgeRule { name: "Seasoned Quester", requirement: BadgeRequirement::Level(10) },
    BadgeRule { name: "Elite Champion", requirement: BadgeRequirement::Level(15) },
    BadgeRule { name: "Living Legend", requirement: BadgeRequirement::Level(20) },
    BadgeRule { name: "Goal Setter", requirement: BadgeRequirement::GoalsCreated(3) },
    BadgeRule { name: "Grand Planner", requirement: BadgeRequirement::GoalsCreated(10) },
    BadgeRule { name: "Achiever", requirement: BadgeRequirement::GoalsCompleted(5) },
    BadgeRule { name: "Unstoppable", requirement: BadgeRequirement::GoalsCompleted(20) },
    BadgeRule { name: "Point Collector", requirement: BadgeRequirement::Score(1000) },
    BadgeRule { name: "Point Hoarder", requirement: BadgeRequirement::Score(5000) },
    BadgeRule { name: "Weekly Warrior", requirement: BadgeRequirement::Streak(7) },
];

/// Insertion-ordered set of unlocked badge names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct BadgeSet(Vec<String>);

impl BadgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a badge. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|b| b == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl FromIterator<String> for BadgeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = BadgeSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Add every badge whose rule is satisfied and return the newly unlocked names.
pub fn evaluate_badges(counters: &ProgressCounters, badges: &mut BadgeSet) -> Vec<&'static str> {
    BADGE_RULES
        .iter()
        .filter(|rule| rule.requirement.is_met(counters))
        .filter(|rule| badges.insert(rule.name))
        .map(|rule| rule.name)
        .collect()
}
