//! Save/load integration tests against real files.

use chrono::NaiveDate;
use eternalquest_core::{
    CoreError, Event, GoalInput, GoalKind, GoalManager, GoalVariant, NotFoundError,
};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn played_manager() -> GoalManager {
    let mut manager = GoalManager::new();
    manager.start_session(date(2024, 3, 1));
    manager
        .create_goal(
            GoalVariant::Checklist,
            GoalInput::new("Read Scriptures", "daily", "100").with_checklist("3", "50"),
        )
        .unwrap();
    manager
        .create_goal(GoalVariant::Simple, GoalInput::new("Marathon", "run 42km", "1000"))
        .unwrap();
    manager
        .create_goal(GoalVariant::Eternal, GoalInput::new("Pray", "every morning", "50"))
        .unwrap();
    for index in [0, 0, 1, 2, 2] {
        manager.record_event(index).unwrap();
    }
    manager
}

#[test]
fn save_and_load_through_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("goals.txt");

    let manager = played_manager();
    manager.save_to_path(&path).unwrap();
    assert!(!dir.path().join("goals.tmp").exists());

    let mut restored = GoalManager::new();
    restored.load_from_path(&path).unwrap();

    let original = manager.session();
    let loaded = restored.session();
    assert_eq!(loaded.score(), original.score());
    assert_eq!(loaded.level(), original.level());
    assert_eq!(loaded.streak(), original.streak());
    assert_eq!(loaded.last_login(), Some(date(2024, 3, 1)));
    assert_eq!(loaded.total_goals_completed(), 1);
    assert_eq!(loaded.badges(), original.badges());
    assert_eq!(loaded.goals(), original.goals());
    assert_eq!(
        loaded.goals()[0].kind(),
        &GoalKind::Checklist {
            target: 3,
            bonus: 50,
            amount_completed: 2
        }
    );
}

#[test]
fn saved_file_matches_documented_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("goals.txt");
    played_manager().save_to_path(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    // 200 + 1000 + 50 + 50
    assert_eq!(lines[0], "1300");
    assert_eq!(lines[1], "3");
    assert_eq!(lines[2], "1");
    assert_eq!(lines[3], "2024-03-01");
    assert_eq!(lines[4], "1");
    assert_eq!(lines[5], "Goal Setter|Point Collector");
    assert_eq!(lines[6], "ChecklistGoal|Read Scriptures|daily|100|50|3|2");
    assert_eq!(lines[7], "SimpleGoal|Marathon|run 42km|1000|True");
    assert_eq!(lines[8], "EternalGoal|Pray|every morning|50");
    assert_eq!(lines.len(), 9);
}

#[test]
fn missing_file_is_not_found_and_keeps_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.txt");

    let mut manager = played_manager();
    let before = manager.session().clone();

    let err = manager.load_from_path(&path).unwrap_err();
    match err {
        CoreError::NotFound(NotFoundError { path: missing }) => assert_eq!(missing, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(manager.session(), &before);
}

#[test]
fn corrupt_file_keeps_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("goals.txt");
    std::fs::write(&path, "100\n1\n0\n").unwrap();

    let mut manager = played_manager();
    let before = manager.session().clone();
    assert!(matches!(
        manager.load_from_path(&path),
        Err(CoreError::Format(_))
    ));
    assert_eq!(manager.session(), &before);
}

#[test]
fn loading_emits_session_loaded_event() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("goals.txt");
    played_manager().save_to_path(&path).unwrap();

    let mut manager = GoalManager::new();
    manager.load_from_path(&path).unwrap();
    assert_eq!(
        manager.drain_events(),
        vec![Event::SessionLoaded {
            goals: 3,
            score: 1300
        }]
    );
}
