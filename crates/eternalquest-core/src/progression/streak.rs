//! Daily login streak and the point multiplier it grants.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of a streak week in days.
pub const STREAK_WEEK: u32 = 7;

/// Bonus per completed streak week, paid on every 7th consecutive day.
pub const WEEKLY_STREAK_BONUS: u64 = 100;

/// Multiplier applied to points earned at a given streak.
pub fn streak_multiplier(streak: u32) -> f64 {
    multiplier_percent(streak) as f64 / 100.0
}

// Integer percentages keep the truncation exact (150 * 1.2 must be 180, not 179).
fn multiplier_percent(streak: u32) -> u64 {
    match streak {
        14.. => 150,
        7..=13 => 120,
        _ => 100,
    }
}

/// Points earned by one event, split into raw and streak bonus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PointsAward {
    /// Points the goal itself paid out
    pub base: u64,
    /// Extra points from the streak multiplier
    pub bonus: u64,
}

impl PointsAward {
    pub fn total(&self) -> u64 {
        self.base + self.bonus
    }
}

/// Apply the streak multiplier to raw points, truncating toward zero.
pub fn apply_streak_multiplier(raw: u32, streak: u32) -> PointsAward {
    let base = u64::from(raw);
    let total = base * multiplier_percent(streak) / 100;
    PointsAward {
        base,
        bonus: total - base,
    }
}

/// How a login changed the streak.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    /// No previous login on record
    FirstLogin,
    /// Logged in the day after the previous login
    Continued,
    /// A day or more was missed
    Reset,
    /// Already logged in today
    SameDay,
}

/// Result of a login streak update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginUpdate {
    pub outcome: LoginOutcome,
    pub previous_streak: u32,
    pub streak: u32,
    /// Weekly bonus earned by this login (0 unless the streak hit a multiple of 7)
    pub bonus_points: u64,
}

/// Compute the streak after logging in on `today`.
pub fn update_login_streak(
    last_login: Option<NaiveDate>,
    streak: u32,
    today: NaiveDate,
) -> LoginUpdate {
    let (outcome, new_streak) = match last_login {
        None => (LoginOutcome::FirstLogin, 1),
        Some(last) if last == today => (LoginOutcome::SameDay, streak),
        Some(last) if last.checked_add_days(Days::new(1)) == Some(today) => {
            (LoginOutcome::Continued, streak.saturating_add(1))
        }
        Some(_) => (LoginOutcome::Reset, 1),
    };

    let bonus_points = if outcome != LoginOutcome::SameDay && new_streak % STREAK_WEEK == 0 {
        WEEKLY_STREAK_BONUS * u64::from(new_streak / STREAK_WEEK)
    } else {
        0
    };

    LoginUpdate {
        outcome,
        previous_streak: streak,
        streak: new_streak,
        bonus_points,
    }
}
