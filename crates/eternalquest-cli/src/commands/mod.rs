pub mod config;
pub mod file;
pub mod goal;
pub mod player;

use std::path::PathBuf;

use chrono::NaiveDate;
use eternalquest_core::storage::data_dir;
use eternalquest_core::{Config, CoreError, GoalManager};
use tracing::{debug, warn};

/// A loaded session plus where it goes back to.
pub struct Workspace {
    pub config: Config,
    pub save_path: PathBuf,
    pub manager: GoalManager,
}

impl Workspace {
    /// Load config and the saved session, then start today's session.
    ///
    /// A missing save file starts a fresh session.
    pub fn open(today: NaiveDate) -> Result<Self, Box<dyn std::error::Error>> {
        Self::open_with(today, false)
    }

    /// Like [`Workspace::open`], but a corrupt save file is discarded with a
    /// warning. Used by commands that replace the whole session.
    pub fn open_replacing(today: NaiveDate) -> Result<Self, Box<dyn std::error::Error>> {
        Self::open_with(today, true)
    }

    /// Resolve config and the save file path without touching the session.
    pub fn locate() -> Result<(Config, PathBuf), Box<dyn std::error::Error>> {
        let dir = data_dir()?;
        let config = Config::load_from(&dir)?;
        let save_path = config.save_path(&dir);
        Ok((config, save_path))
    }

    fn open_with(
        today: NaiveDate,
        discard_corrupt: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let (config, save_path) = Self::locate()?;

        let mut manager = GoalManager::new();
        match manager.load_from_path(&save_path) {
            Ok(()) => {}
            Err(CoreError::NotFound(_)) => {
                debug!(path = %save_path.display(), "no save file yet, starting fresh");
            }
            Err(CoreError::Format(e)) if discard_corrupt => {
                warn!(
                    path = %save_path.display(),
                    error = %e,
                    "discarding unreadable save file"
                );
            }
            Err(e) => return Err(e.into()),
        }

        if config.session.track_login_streak {
            manager.start_session(today);
        }

        Ok(Self {
            config,
            save_path,
            manager,
        })
    }

    /// Write the session back if auto-save is enabled.
    pub fn persist(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.config.storage.auto_save {
            self.manager.save_to_path(&self.save_path)?;
        } else {
            debug!("auto_save disabled, session not written");
        }
        Ok(())
    }
}
