use chrono::NaiveDate;

use super::Workspace;

pub fn run_player(today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::open(today)?;
    ws.persist()?;
    let summary = ws.manager.player_summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn run_achievements(today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::open(today)?;
    ws.persist()?;
    let summary = ws.manager.achievements_summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
