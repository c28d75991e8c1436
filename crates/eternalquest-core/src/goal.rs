//! Goal types and their completion semantics.
//!
//! A goal is a named unit of progress worth a fixed number of points per
//! recorded event. What happens on each event depends on the goal's kind:
//!
//! | Kind      | Per event                              | Completes            |
//! |-----------|----------------------------------------|----------------------|
//! | Simple    | `points` once, then 0                  | on the first event   |
//! | Eternal   | `points` forever                       | never                |
//! | Checklist | `points`, `points + bonus` at target   | when target reached  |
//!
//! Recording against a completed goal is not an error; it simply earns nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Persisted record tag for simple goals.
pub const SIMPLE_TAG: &str = "SimpleGoal";
/// Persisted record tag for eternal goals.
pub const ETERNAL_TAG: &str = "EternalGoal";
/// Persisted record tag for checklist goals.
pub const CHECKLIST_TAG: &str = "ChecklistGoal";

/// Field separator of persisted goal records.
pub const FIELD_SEPARATOR: char = '|';

/// Which of the three goal behaviors to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalVariant {
    Simple,
    Eternal,
    Checklist,
}

impl GoalVariant {
    /// Tag written as the first field of a persisted goal record.
    pub fn tag(&self) -> &'static str {
        match self {
            GoalVariant::Simple => SIMPLE_TAG,
            GoalVariant::Eternal => ETERNAL_TAG,
            GoalVariant::Checklist => CHECKLIST_TAG,
        }
    }

    /// Look up a variant by its persisted tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            SIMPLE_TAG => Some(GoalVariant::Simple),
            ETERNAL_TAG => Some(GoalVariant::Eternal),
            CHECKLIST_TAG => Some(GoalVariant::Checklist),
            _ => None,
        }
    }

    /// Human-readable label, as shown in the goal type menu.
    pub fn label(&self) -> &'static str {
        match self {
            GoalVariant::Simple => "Simple Goal",
            GoalVariant::Eternal => "Eternal Goal",
            GoalVariant::Checklist => "Checklist Goal",
        }
    }
}

impl fmt::Display for GoalVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalVariant {
    type Err = ValidationError;

    /// Accepts menu numbers (`1`-`3`), lowercase names and persisted tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(variant) = GoalVariant::from_tag(trimmed) {
            return Ok(variant);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "1" | "simple" => Ok(GoalVariant::Simple),
            "2" | "eternal" => Ok(GoalVariant::Eternal),
            "3" | "checklist" => Ok(GoalVariant::Checklist),
            _ => Err(ValidationError::UnknownVariant(trimmed.to_string())),
        }
    }
}

/// Variant-specific progress of a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalKind {
    Simple {
        is_complete: bool,
    },
    Eternal,
    Checklist {
        target: u32,
        bonus: u32,
        amount_completed: u32,
    },
}

impl GoalKind {
    pub fn variant(&self) -> GoalVariant {
        match self {
            GoalKind::Simple { .. } => GoalVariant::Simple,
            GoalKind::Eternal => GoalVariant::Eternal,
            GoalKind::Checklist { .. } => GoalVariant::Checklist,
        }
    }
}

/// A trackable goal.
///
/// Fields are private so progress can only move forward through
/// [`Goal::record_event`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    name: String,
    description: String,
    points: u32,
    #[serde(flatten)]
    kind: GoalKind,
}

impl Goal {
    /// A goal that completes on its first event.
    pub fn simple(name: impl Into<String>, description: impl Into<String>, points: u32) -> Self {
        Self::from_parts(name, description, points, GoalKind::Simple { is_complete: false })
    }

    /// A goal that never completes and pays out on every event.
    pub fn eternal(name: impl Into<String>, description: impl Into<String>, points: u32) -> Self {
        Self::from_parts(name, description, points, GoalKind::Eternal)
    }

    /// A goal that completes after `target` events, paying `bonus` on the last one.
    pub fn checklist(
        name: impl Into<String>,
        description: impl Into<String>,
        points: u32,
        target: u32,
        bonus: u32,
    ) -> Self {
        Self::from_parts(
            name,
            description,
            points,
            GoalKind::Checklist {
                target,
                bonus,
                amount_completed: 0,
            },
        )
    }

    /// Rebuild a goal with existing progress. The caller guarantees
    /// `amount_completed <= target` for checklists.
    pub(crate) fn from_parts(
        name: impl Into<String>,
        description: impl Into<String>,
        points: u32,
        kind: GoalKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points,
            kind,
        }
    }

    /// Record one accomplishment and return the points it earned.
    pub fn record_event(&mut self) -> u32 {
        match &mut self.kind {
            GoalKind::Simple { is_complete } => {
                if *is_complete {
                    0
                } else {
                    *is_complete = true;
                    self.points
                }
            }
            GoalKind::Eternal => self.points,
            GoalKind::Checklist {
                target,
                bonus,
                amount_completed,
            } => {
                if *amount_completed >= *target {
                    return 0;
                }
                *amount_completed += 1;
                if *amount_completed == *target {
                    self.points.saturating_add(*bonus)
                } else {
                    self.points
                }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        match &self.kind {
            GoalKind::Simple { is_complete } => *is_complete,
            GoalKind::Eternal => false,
            GoalKind::Checklist {
                target,
                amount_completed,
                ..
            } => amount_completed >= target,
        }
    }

    pub fn short_name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn kind(&self) -> &GoalKind {
        &self.kind
    }

    pub fn variant(&self) -> GoalVariant {
        self.kind.variant()
    }

    /// Status line, e.g. `[ ] Read Scriptures (daily) -- Currently completed: 1/3`.
    pub fn details_string(&self) -> String {
        let marker = if self.is_complete() { "[X]" } else { "[ ]" };
        match &self.kind {
            GoalKind::Checklist {
                target,
                amount_completed,
                ..
            } => format!(
                "{} {} ({}) -- Currently completed: {}/{}",
                marker, self.name, self.description, amount_completed, target
            ),
            _ => format!("{} {} ({})", marker, self.name, self.description),
        }
    }

    /// Pipe-delimited persisted record, tag first.
    ///
    /// Names and descriptions are written as-is; a `|` inside them will not
    /// survive a reload.
    pub fn to_record(&self) -> String {
        let tag = self.variant().tag();
        match &self.kind {
            GoalKind::Simple { is_complete } => format!(
                "{tag}|{}|{}|{}|{}",
                self.name,
                self.description,
                self.points,
                if *is_complete { "True" } else { "False" }
            ),
            GoalKind::Eternal => {
                format!("{tag}|{}|{}|{}", self.name, self.description, self.points)
            }
            GoalKind::Checklist {
                target,
                bonus,
                amount_completed,
            } => format!(
                "{tag}|{}|{}|{}|{}|{}|{}",
                self.name, self.description, self.points, bonus, target, amount_completed
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn simple_goal_pays_once() {
        let mut goal = Goal::simple("Run a marathon", "42km", 1000);
        assert!(!goal.is_complete());
        assert_eq!(goal.record_event(), 1000);
        assert!(goal.is_complete());
        assert_eq!(goal.record_event(), 0);
        assert_eq!(goal.record_event(), 0);
        assert!(goal.is_complete());
    }

    #[test]
    fn eternal_goal_never_completes() {
        let mut goal = Goal::eternal("Pray", "every morning", 50);
        for _ in 0..10 {
            assert_eq!(goal.record_event(), 50);
            assert!(!goal.is_complete());
        }
    }

    #[test]
    fn checklist_goal_pays_bonus_on_target() {
        let mut goal = Goal::checklist("Read Scriptures", "daily", 100, 3, 50);
        assert_eq!(goal.record_event(), 100);
        assert_eq!(goal.record_event(), 100);
        assert!(!goal.is_complete());
        assert_eq!(goal.record_event(), 150);
        assert!(goal.is_complete());
        assert_eq!(goal.record_event(), 0);
        assert_eq!(
            goal.kind(),
            &GoalKind::Checklist {
                target: 3,
                bonus: 50,
                amount_completed: 3
            }
        );
    }

    #[test]
    fn details_string_marks_completion() {
        let mut goal = Goal::simple("Run", "5k", 10);
        assert_eq!(goal.details_string(), "[ ] Run (5k)");
        goal.record_event();
        assert_eq!(goal.details_string(), "[X] Run (5k)");

        let mut checklist = Goal::checklist("Temple", "visit", 50, 2, 100);
        checklist.record_event();
        assert_eq!(
            checklist.details_string(),
            "[ ] Temple (visit) -- Currently completed: 1/2"
        );
    }

    #[test]
    fn records_are_tag_first() {
        let mut simple = Goal::simple("Run", "5k", 10);
        assert_eq!(simple.to_record(), "SimpleGoal|Run|5k|10|False");
        simple.record_event();
        assert_eq!(simple.to_record(), "SimpleGoal|Run|5k|10|True");

        assert_eq!(
            Goal::eternal("Pray", "daily", 5).to_record(),
            "EternalGoal|Pray|daily|5"
        );

        let mut checklist = Goal::checklist("Read", "daily", 100, 3, 50);
        checklist.record_event();
        assert_eq!(checklist.to_record(), "ChecklistGoal|Read|daily|100|50|3|1");
    }

    #[test]
    fn variant_parses_menu_spellings() {
        assert_eq!("1".parse::<GoalVariant>().unwrap(), GoalVariant::Simple);
        assert_eq!("Eternal".parse::<GoalVariant>().unwrap(), GoalVariant::Eternal);
        assert_eq!(
            "ChecklistGoal".parse::<GoalVariant>().unwrap(),
            GoalVariant::Checklist
        );
        assert!(matches!(
            "weekly".parse::<GoalVariant>(),
            Err(ValidationError::UnknownVariant(_))
        ));
    }

    proptest! {
        #[test]
        fn simple_pays_points_exactly_once(points in 0u32..10_000, events in 1usize..20) {
            let mut goal = Goal::simple("g", "d", points);
            let total: u64 = (0..events).map(|_| u64::from(goal.record_event())).sum();
            prop_assert_eq!(total, u64::from(points));
            prop_assert!(goal.is_complete());
        }

        #[test]
        fn checklist_pays_points_times_target_plus_bonus(
            points in 0u32..1_000,
            target in 1u32..30,
            bonus in 0u32..1_000,
        ) {
            let mut goal = Goal::checklist("g", "d", points, target, bonus);
            let total: u64 = (0..target).map(|_| u64::from(goal.record_event())).sum();
            prop_assert_eq!(total, u64::from(points) * u64::from(target) + u64::from(bonus));
            prop_assert!(goal.is_complete());
            prop_assert_eq!(goal.record_event(), 0);
        }

        #[test]
        fn eternal_pays_every_time(points in 0u32..10_000, events in 0usize..50) {
            let mut goal = Goal::eternal("g", "d", points);
            let total: u64 = (0..events).map(|_| u64::from(goal.record_event())).sum();
            prop_assert_eq!(total, u64::from(points) * events as u64);
            prop_assert!(!goal.is_complete());
        }
    }
}
