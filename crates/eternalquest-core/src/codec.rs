//! Line-oriented text format for persisted sessions.
//!
//! ```text
//! line 1: score
//! line 2: level
//! line 3: streak
//! line 4: last login date (yyyy-MM-dd, empty if never logged in)
//! line 5: total goals completed
//! line 6: badges joined by "|" (empty if none)
//! line 7+: one goal record per line (see [`Goal::to_record`])
//! ```
//!
//! Fields are not escaped. A `|` inside a goal name, description or badge
//! name splits the field on reload.

use std::io::{Read, Write};

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{CoreError, FormatError};
use crate::goal::{Goal, GoalKind, GoalVariant, FIELD_SEPARATOR};
use crate::progression::{level_for_score, BadgeSet};
use crate::session::Session;

/// Number of lines before the first goal record.
pub const HEADER_LINES: usize = 6;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a session in the persisted format.
pub fn encode(session: &Session) -> String {
    let mut out = String::new();
    let badges: Vec<&str> = session.badges().iter().collect();
    let header = [
        session.score().to_string(),
        session.level().to_string(),
        session.streak().to_string(),
        session
            .last_login()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        session.total_goals_completed().to_string(),
        badges.join("|"),
    ];
    for line in header {
        out.push_str(&line);
        out.push('\n');
    }
    for goal in session.goals() {
        out.push_str(&goal.to_record());
        out.push('\n');
    }
    out
}

/// Write a session to `sink`.
pub fn write_session<W: Write>(session: &Session, mut sink: W) -> Result<(), CoreError> {
    sink.write_all(encode(session).as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Read a whole session from `source`.
pub fn read_session<R: Read>(mut source: R) -> Result<Session, CoreError> {
    let mut content = String::new();
    source.read_to_string(&mut content)?;
    Ok(decode(&content)?)
}

/// Parse a persisted session. Nothing is returned unless every line parsed.
pub fn decode(input: &str) -> Result<Session, FormatError> {
    let lines: Vec<&str> = input.lines().collect();
    if lines.len() < HEADER_LINES {
        return Err(FormatError::TruncatedHeader {
            expected: HEADER_LINES,
            found: lines.len(),
        });
    }

    let score: u64 = parse_number(lines[0], 1, "score")?;
    let stored_level: u32 = parse_number(lines[1], 2, "level")?;
    let streak: u32 = parse_number(lines[2], 3, "streak")?;
    let last_login = parse_date(lines[3], 4)?;
    let total_goals_completed: u32 = parse_number(lines[4], 5, "total goals completed")?;
    let badges: BadgeSet = lines[5]
        .split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from)
        .collect();

    let derived_level = level_for_score(score);
    if stored_level != derived_level {
        warn!(
            stored_level,
            derived_level, "stored level does not match score, using derived level"
        );
    }

    let mut goals = Vec::with_capacity(lines.len() - HEADER_LINES);
    for (offset, line) in lines[HEADER_LINES..].iter().enumerate() {
        let line_no = HEADER_LINES + offset + 1;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(goal) = decode_goal(line, line_no)? {
            goals.push(goal);
        }
    }

    Ok(Session {
        score,
        streak,
        last_login,
        total_goals_completed,
        badges,
        goals,
    })
}

/// Parse one goal record. Unknown tags yield `Ok(None)`.
fn decode_goal(line: &str, line_no: usize) -> Result<Option<Goal>, FormatError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let tag = fields[0].trim();
    let Some(variant) = GoalVariant::from_tag(tag) else {
        warn!(line = line_no, tag, "skipping goal record with unknown tag");
        return Ok(None);
    };

    let expected = match variant {
        GoalVariant::Simple => 5,
        GoalVariant::Eternal => 4,
        GoalVariant::Checklist => 7,
    };
    if fields.len() != expected {
        return Err(FormatError::at(
            line_no,
            format!(
                "{} record needs {} fields, found {}",
                variant.tag(),
                expected,
                fields.len()
            ),
        ));
    }

    let name = fields[1];
    let description = fields[2];
    let points: u32 = parse_number(fields[3], line_no, "points")?;

    let kind = match variant {
        GoalVariant::Simple => GoalKind::Simple {
            is_complete: parse_bool(fields[4], line_no)?,
        },
        GoalVariant::Eternal => GoalKind::Eternal,
        GoalVariant::Checklist => {
            let bonus: u32 = parse_number(fields[4], line_no, "bonus")?;
            let target: u32 = parse_number(fields[5], line_no, "target")?;
            let amount_completed: u32 = parse_number(fields[6], line_no, "amount completed")?;
            if amount_completed > target {
                return Err(FormatError::at(
                    line_no,
                    format!("amount completed {amount_completed} exceeds target {target}"),
                ));
            }
            GoalKind::Checklist {
                target,
                bonus,
                amount_completed,
            }
        }
    };

    Ok(Some(Goal::from_parts(name, description, points, kind)))
}

fn parse_number<T: std::str::FromStr>(
    field: &str,
    line_no: usize,
    what: &str,
) -> Result<T, FormatError> {
    field
        .trim()
        .parse()
        .map_err(|_| FormatError::at(line_no, format!("invalid {what} '{}'", field.trim())))
}

fn parse_bool(field: &str, line_no: usize) -> Result<bool, FormatError> {
    match field.trim() {
        f if f.eq_ignore_ascii_case("true") => Ok(true),
        f if f.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(FormatError::at(line_no, format!("invalid completion flag '{other}'"))),
    }
}

fn parse_date(field: &str, line_no: usize) -> Result<Option<NaiveDate>, FormatError> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(field, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FormatError::at(line_no, format!("invalid date '{field}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use proptest::prelude::*;

    fn sample_session() -> Session {
        let mut read = Goal::checklist("Read Scriptures", "daily", 100, 3, 50);
        read.record_event();
        let mut marathon = Goal::simple("Marathon", "run 42km", 1000);
        marathon.record_event();
        Session {
            score: 1250,
            streak: 8,
            last_login: NaiveDate::from_ymd_opt(2024, 3, 14),
            total_goals_completed: 1,
            badges: ["Weekly Warrior".to_string(), "Point Collector".to_string()]
                .into_iter()
                .collect(),
            goals: vec![marathon, Goal::eternal("Pray", "every morning", 50), read],
        }
    }

    #[test]
    fn encodes_fields_in_order() {
        let expected = indoc! {"
            1250
            3
            8
            2024-03-14
            1
            Weekly Warrior|Point Collector
            SimpleGoal|Marathon|run 42km|1000|True
            EternalGoal|Pray|every morning|50
            ChecklistGoal|Read Scriptures|daily|100|50|3|1
        "};
        assert_eq!(encode(&sample_session()), expected);
    }

    #[test]
    fn empty_session_writes_blank_badges_and_date() {
        assert_eq!(encode(&Session::new()), "0\n1\n0\n\n0\n\n");
        assert_eq!(decode("0\n1\n0\n\n0\n\n").unwrap(), Session::new());
    }

    #[test]
    fn round_trip_preserves_session() {
        let session = sample_session();
        let decoded = decode(&encode(&session)).unwrap();
        assert_eq!(decoded, session);
        assert_eq!(decoded.level(), 3);
    }

    #[test]
    fn rejects_short_header() {
        let err = decode("10\n1\n0\n2024-01-01\n0\n").unwrap_err();
        assert_eq!(err, FormatError::TruncatedHeader { expected: 6, found: 5 });
    }

    #[test]
    fn skips_unknown_goal_tags() {
        let input = indoc! {"
            0
            1
            0

            0

            NegativeGoal|Procrastinate|don't|10
            EternalGoal|Pray|daily|5
        "};
        let session = decode(input).unwrap();
        assert_eq!(session.goals().len(), 1);
        assert_eq!(session.goals()[0].short_name(), "Pray");
    }

    #[test]
    fn reports_line_of_malformed_goal() {
        let input = indoc! {"
            0
            1
            0

            0

            EternalGoal|Pray|daily|5
            ChecklistGoal|Read|daily|lots|50|3|1
        "};
        assert!(matches!(
            decode(input),
            Err(FormatError::InvalidLine { line: 8, .. })
        ));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let input = "0\n1\n0\n\n0\n\nSimpleGoal|Run|5k|10\n";
        assert!(matches!(
            decode(input),
            Err(FormatError::InvalidLine { line: 7, .. })
        ));
    }

    #[test]
    fn rejects_checklist_past_target() {
        let input = "0\n1\n0\n\n0\n\nChecklistGoal|Read|daily|100|50|3|4\n";
        assert!(matches!(decode(input), Err(FormatError::InvalidLine { line: 7, .. })));
    }

    #[test]
    fn rejects_bad_header_values() {
        assert!(matches!(
            decode("abc\n1\n0\n\n0\n\n"),
            Err(FormatError::InvalidLine { line: 1, .. })
        ));
        assert!(matches!(
            decode("0\n1\n0\n14/03/2024\n0\n\n"),
            Err(FormatError::InvalidLine { line: 4, .. })
        ));
        assert!(matches!(
            decode("0\n1\n-3\n\n0\n\n"),
            Err(FormatError::InvalidLine { line: 3, .. })
        ));
    }

    #[test]
    fn stored_level_is_rederived_from_score() {
        let session = decode("600\n9\n0\n\n0\n\n").unwrap();
        assert_eq!(session.level(), 2);
    }

    #[test]
    fn accepts_lowercase_booleans_and_crlf() {
        let session = decode("0\r\n1\r\n0\r\n\r\n0\r\n\r\nSimpleGoal|Run|5k|10|true\r\n").unwrap();
        assert!(session.goals()[0].is_complete());
    }

    #[test]
    fn write_and_read_through_io() {
        let session = sample_session();
        let mut buffer = Vec::new();
        write_session(&session, &mut buffer).unwrap();
        let restored = read_session(buffer.as_slice()).unwrap();
        assert_eq!(restored, session);
    }

    fn text_field() -> impl Strategy<Value = String> {
        "[A-Za-z0-9 ,.'!-]{1,20}".prop_filter("no surrounding blanks", |s| s.trim() == s.as_str())
    }

    fn any_goal() -> impl Strategy<Value = Goal> {
        (text_field(), text_field(), 0u32..5_000, 0u32..3, 1u32..10, 0u32..500, 0u32..12)
            .prop_map(|(name, description, points, variant, target, bonus, events)| {
                let mut goal = match variant {
                    0 => Goal::simple(name, description, points),
                    1 => Goal::eternal(name, description, points),
                    _ => Goal::checklist(name, description, points, target, bonus),
                };
                for _ in 0..events {
                    goal.record_event();
                }
                goal
            })
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            score in 0u64..1_000_000,
            streak in 0u32..400,
            days in 0i64..20_000,
            completed in 0u32..100,
            goals in proptest::collection::vec(any_goal(), 0..8),
        ) {
            let last_login = NaiveDate::from_ymd_opt(1990, 1, 1)
                .and_then(|d| d.checked_add_signed(chrono::Duration::days(days)));
            let session = Session {
                score,
                streak,
                last_login,
                total_goals_completed: completed,
                badges: ["Goal Setter".to_string()].into_iter().collect(),
                goals,
            };
            prop_assert_eq!(decode(&encode(&session)).unwrap(), session);
        }
    }
}
