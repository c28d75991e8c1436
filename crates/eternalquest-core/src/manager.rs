//! Session manager: the only entry point that mutates a session.
//!
//! Every mutating call runs the same pipeline: apply the change, detect a
//! level change, then re-evaluate the badge table. Failed calls leave the
//! session untouched.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::codec;
use crate::error::{CoreError, IndexError, NotFoundError, ValidationError};
use crate::events::Event;
use crate::goal::{Goal, GoalVariant};
use crate::progression::{
    apply_streak_multiplier, evaluate_badges, points_to_next_level, streak_multiplier,
    title_for_level, update_login_streak, LoginUpdate, BADGE_RULES,
};
use crate::session::Session;

/// Raw goal fields as typed by the user.
///
/// Numeric fields stay text until [`GoalInput::into_goal`] validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalInput {
    pub name: String,
    pub description: String,
    pub points: Option<String>,
    /// Checklist only
    pub target: Option<String>,
    /// Checklist only
    pub bonus: Option<String>,
}

impl GoalInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        points: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points: Some(points.into()),
            target: None,
            bonus: None,
        }
    }

    pub fn with_checklist(mut self, target: impl Into<String>, bonus: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self.bonus = Some(bonus.into());
        self
    }

    /// Validate the numeric fields and build the goal.
    pub fn into_goal(self, variant: GoalVariant) -> Result<Goal, ValidationError> {
        let points = parse_count("points", self.points.as_deref())?;
        let goal = match variant {
            GoalVariant::Simple => Goal::simple(self.name, self.description, points),
            GoalVariant::Eternal => Goal::eternal(self.name, self.description, points),
            GoalVariant::Checklist => {
                let target = parse_count("target", self.target.as_deref())?;
                if target == 0 {
                    return Err(ValidationError::InvalidValue {
                        field: "target".to_string(),
                        message: "must be at least 1".to_string(),
                    });
                }
                let bonus = parse_count("bonus", self.bonus.as_deref())?;
                Goal::checklist(self.name, self.description, points, target, bonus)
            }
        };
        Ok(goal)
    }
}

fn parse_count(field: &str, value: Option<&str>) -> Result<u32, ValidationError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
        ValidationError::MissingField {
            field: field.to_string(),
        }
    })?;
    raw.parse::<u32>().map_err(|_| match raw.parse::<i64>() {
        Ok(n) if n < 0 => ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{n} is negative"),
        },
        _ => ValidationError::NotANumber {
            field: field.to_string(),
            value: raw.to_string(),
        },
    })
}

/// Result of recording an event against a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub goal_index: usize,
    /// Points the goal paid out
    pub raw_points: u64,
    /// Extra points from the streak multiplier
    pub bonus_points: u64,
    /// Score after the event
    pub total_score: u64,
    /// True only on the call that completed the goal
    pub goal_completed: bool,
    pub unlocked_badges: Vec<String>,
}

/// One row of the goal list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSummary {
    /// 1-based number shown to the user
    pub number: usize,
    pub name: String,
    pub variant: GoalVariant,
    pub complete: bool,
    pub details: String,
}

/// Score, level, title and streak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub score: u64,
    pub level: u32,
    pub title: String,
    pub streak: u32,
    pub streak_multiplier: f64,
    pub points_to_next_level: u64,
    pub last_login: Option<NaiveDate>,
}

/// A badge that has not been unlocked yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedBadge {
    pub name: String,
    pub requirement: String,
}

/// Counters shown next to the badge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestones {
    pub goals_created: usize,
    pub goals_completed: u32,
    pub score: u64,
    pub level: u32,
    pub streak: u32,
}

/// Unlocked badges in unlock order, locked badges in rule order, and counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementsSummary {
    pub unlocked: Vec<String>,
    pub locked: Vec<LockedBadge>,
    pub milestones: Milestones,
}

/// Owns a [`Session`] and applies every mutation to it.
#[derive(Debug, Default)]
pub struct GoalManager {
    session: Session,
    events: Vec<Event>,
}

impl GoalManager {
    /// Manager over an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Take all events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Update the login streak for `today`. Call once per session start.
    pub fn start_session(&mut self, today: NaiveDate) -> LoginUpdate {
        let level_before = self.session.level();
        let update = update_login_streak(self.session.last_login, self.session.streak, today);

        self.session.streak = update.streak;
        self.session.last_login = Some(today);
        self.session.score = self.session.score.saturating_add(update.bonus_points);

        info!(
            outcome = ?update.outcome,
            streak = update.streak,
            bonus = update.bonus_points,
            "login streak updated"
        );
        self.events.push(Event::StreakUpdated {
            outcome: update.outcome,
            streak: update.streak,
            bonus_points: update.bonus_points,
        });

        self.note_level_change(level_before);
        self.check_achievements();
        update
    }

    /// Validate `input` and append a goal of `variant`. Returns its index.
    pub fn create_goal(
        &mut self,
        variant: GoalVariant,
        input: GoalInput,
    ) -> Result<usize, CoreError> {
        let goal = input.into_goal(variant)?;
        Ok(self.add_goal(goal))
    }

    /// Append an already-built goal. Returns its index.
    pub fn add_goal(&mut self, goal: Goal) -> usize {
        let index = self.session.goals.len();
        debug!(index, name = goal.short_name(), variant = ?goal.variant(), "goal created");
        self.events.push(Event::GoalCreated {
            index,
            name: goal.short_name().to_string(),
            variant: goal.variant(),
        });
        self.session.goals.push(goal);
        self.check_achievements();
        index
    }

    /// Record an accomplishment of the goal at `index` (0-based).
    pub fn record_event(&mut self, index: usize) -> Result<EventOutcome, CoreError> {
        let len = self.session.goals.len();
        let level_before = self.session.level();
        let streak = self.session.streak;

        let goal = self
            .session
            .goals
            .get_mut(index)
            .ok_or(IndexError::IndexOutOfRange { index, len })?;

        let was_complete = goal.is_complete();
        let raw = goal.record_event();
        let goal_completed = !was_complete && goal.is_complete();
        let name = goal.short_name().to_string();

        let award = apply_streak_multiplier(raw, streak);
        self.session.score = self.session.score.saturating_add(award.total());
        if goal_completed {
            self.session.total_goals_completed =
                self.session.total_goals_completed.saturating_add(1);
        }

        debug!(
            index,
            raw = award.base,
            bonus = award.bonus,
            score = self.session.score,
            "event recorded"
        );
        self.events.push(Event::GoalRecorded {
            index,
            name: name.clone(),
            base_points: award.base,
            bonus_points: award.bonus,
            score: self.session.score,
        });
        if goal_completed {
            info!(index, name = %name, "goal completed");
            self.events.push(Event::GoalCompleted { index, name });
        }

        self.note_level_change(level_before);
        let unlocked_badges = self.check_achievements();

        Ok(EventOutcome {
            goal_index: index,
            raw_points: award.base,
            bonus_points: award.bonus,
            total_score: self.session.score,
            goal_completed,
            unlocked_badges,
        })
    }

    /// Numbered goal names, for picking a goal to record.
    pub fn goal_names(&self) -> Vec<String> {
        self.session
            .goals
            .iter()
            .enumerate()
            .map(|(i, goal)| format!("{}. {}", i + 1, goal.short_name()))
            .collect()
    }

    pub fn list_goals(&self) -> Vec<GoalSummary> {
        self.session
            .goals
            .iter()
            .enumerate()
            .map(|(i, goal)| GoalSummary {
                number: i + 1,
                name: goal.short_name().to_string(),
                variant: goal.variant(),
                complete: goal.is_complete(),
                details: goal.details_string(),
            })
            .collect()
    }

    /// Numbered detail lines, e.g. `1. [ ] Pray (daily)`.
    pub fn goal_details(&self) -> Vec<String> {
        self.session
            .goals
            .iter()
            .enumerate()
            .map(|(i, goal)| format!("{}. {}", i + 1, goal.details_string()))
            .collect()
    }

    pub fn player_summary(&self) -> PlayerSummary {
        let session = &self.session;
        PlayerSummary {
            score: session.score(),
            level: session.level(),
            title: session.title().to_string(),
            streak: session.streak(),
            streak_multiplier: streak_multiplier(session.streak()),
            points_to_next_level: points_to_next_level(session.score()),
            last_login: session.last_login(),
        }
    }

    pub fn achievements_summary(&self) -> AchievementsSummary {
        let session = &self.session;
        let counters = session.counters();
        AchievementsSummary {
            unlocked: session.badges().as_slice().to_vec(),
            locked: BADGE_RULES
                .iter()
                .filter(|rule| !session.badges().contains(rule.name))
                .map(|rule| LockedBadge {
                    name: rule.name.to_string(),
                    requirement: rule.requirement.describe(),
                })
                .collect(),
            milestones: Milestones {
                goals_created: counters.goals_created,
                goals_completed: counters.goals_completed,
                score: counters.score,
                level: counters.level,
                streak: counters.streak,
            },
        }
    }

    /// Write the session in the persisted text format.
    pub fn save<W: Write>(&self, sink: W) -> Result<(), CoreError> {
        codec::write_session(&self.session, sink)?;
        info!(goals = self.session.goals.len(), "session saved");
        Ok(())
    }

    /// Replace the session with one read from `source`.
    ///
    /// The new session is fully parsed before anything is replaced; on error
    /// the current session is kept as is.
    pub fn load<R: Read>(&mut self, source: R) -> Result<(), CoreError> {
        let session = codec::read_session(source)?;
        info!(goals = session.goals.len(), score = session.score, "session loaded");
        self.events.push(Event::SessionLoaded {
            goals: session.goals.len(),
            score: session.score,
        });
        self.session = session;
        Ok(())
    }

    /// Save to `path`, replacing the file only once the write succeeded.
    ///
    /// The session is written to a uniquely named file next to `path` and
    /// renamed over it. The partial file is removed if any step fails.
    pub fn save_to_path(&self, path: &Path) -> Result<(), CoreError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        self.save(io::BufWriter::new(&mut tmp))?;
        tmp.persist(path).map_err(|e| CoreError::Io(e.error))?;
        Ok(())
    }

    /// Load from `path`. A missing file is a [`NotFoundError`].
    pub fn load_from_path(&mut self, path: &Path) -> Result<(), CoreError> {
        let file = fs::File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CoreError::NotFound(NotFoundError {
                path: path.to_path_buf(),
            }),
            _ => CoreError::Io(e),
        })?;
        self.load(io::BufReader::new(file))
    }

    fn note_level_change(&mut self, before: u32) {
        let after = self.session.level();
        if after != before {
            let title = title_for_level(after).to_string();
            info!(from = before, to = after, title = %title, "level up");
            self.events.push(Event::LevelUp {
                from: before,
                to: after,
                title,
            });
        }
    }

    fn check_achievements(&mut self) -> Vec<String> {
        let counters = self.session.counters();
        let unlocked: Vec<String> = evaluate_badges(&counters, &mut self.session.badges)
            .into_iter()
            .map(String::from)
            .collect();
        for name in &unlocked {
            info!(badge = %name, "badge unlocked");
            self.events.push(Event::BadgeUnlocked { name: name.clone() });
        }
        unlocked
    }
}
