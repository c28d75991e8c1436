//! Progression rules: levels, titles, streaks and badges.
//!
//! Everything here is a pure function over session counters. The session
//! manager decides when to call them; nothing in this module keeps state of
//! its own.

mod badges;
mod level;
mod streak;

pub use badges::{
    evaluate_badges, BadgeRequirement, BadgeRule, BadgeSet, ProgressCounters, BADGE_RULES,
};
pub use level::{level_for_score, points_to_next_level, title_for_level, POINTS_PER_LEVEL};
pub use streak::{
    apply_streak_multiplier, streak_multiplier, update_login_streak, LoginOutcome, LoginUpdate,
    PointsAward, STREAK_WEEK, WEEKLY_STREAK_BONUS,
};
