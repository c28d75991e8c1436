use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use super::Workspace;

#[derive(Subcommand)]
pub enum FileAction {
    /// Print the configured save file path
    Path,
    /// Write the session to another file
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Replace the session with the contents of another file
    Import {
        /// Source file
        path: PathBuf,
    },
}

pub fn run(action: FileAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FileAction::Path => {
            let (_, save_path) = Workspace::locate()?;
            println!("{}", save_path.display());
        }
        FileAction::Export { path } => {
            let ws = Workspace::open(today)?;
            ws.persist()?;
            ws.manager.save_to_path(&path)?;
            println!("Goals saved to {}", path.display());
        }
        FileAction::Import { path } => {
            let mut ws = Workspace::open_replacing(today)?;
            ws.manager.load_from_path(&path)?;
            ws.persist()?;
            let summary = ws.manager.session();
            println!(
                "Loaded {} goals ({} points) from {}",
                summary.goals().len(),
                summary.score(),
                path.display()
            );
        }
    }
    Ok(())
}
