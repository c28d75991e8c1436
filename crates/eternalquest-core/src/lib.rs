//! # Eternal Quest Core Library
//!
//! This library provides the goal-tracking engine behind Eternal Quest.
//! All operations are available through the standalone CLI binary, which is a
//! thin driver over the same library.
//!
//! ## Architecture
//!
//! - **Goals**: simple (once), eternal (forever) and checklist (N times plus a
//!   bonus) goals with their completion rules
//! - **Progression**: levels, titles, login streaks, streak multipliers and
//!   the badge rule table
//! - **Session Manager**: the single mutation point for a session
//! - **Codec**: line-oriented, pipe-delimited save file format
//! - **Storage**: data directory and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`GoalManager`]: Creates goals, records events, saves and loads
//! - [`Session`]: Score, streak, badges and goals of one run
//! - [`Goal`]: A trackable goal
//! - [`Config`]: Application configuration management

pub mod codec;
pub mod error;
pub mod events;
pub mod goal;
pub mod manager;
pub mod progression;
pub mod session;
pub mod storage;

pub use error::{
    ConfigError, CoreError, FormatError, IndexError, NotFoundError, Result, ValidationError,
};
pub use events::Event;
pub use goal::{Goal, GoalKind, GoalVariant};
pub use manager::{
    AchievementsSummary, EventOutcome, GoalInput, GoalManager, GoalSummary, LockedBadge,
    Milestones, PlayerSummary,
};
pub use progression::{BadgeSet, LoginOutcome, LoginUpdate, PointsAward};
pub use session::Session;
pub use storage::Config;
