use chrono::NaiveDate;
use clap::Subcommand;
use eternalquest_core::{GoalInput, GoalVariant};

use super::Workspace;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    Create {
        /// Goal type: simple, eternal or checklist
        variant: GoalVariant,
        /// Goal name
        #[arg(long)]
        name: String,
        /// Short description
        #[arg(long, default_value = "")]
        description: String,
        /// Points per accomplishment
        #[arg(long)]
        points: Option<String>,
        /// Accomplishments needed (checklist only)
        #[arg(long)]
        target: Option<String>,
        /// Bonus on reaching the target (checklist only)
        #[arg(long)]
        bonus: Option<String>,
    },
    /// List goals with their status
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List goal names only
    Names,
    /// Record an accomplishment
    Record {
        /// Goal number as shown by `goal list`
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },
}

pub fn run(action: GoalAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let mut ws = Workspace::open(today)?;

    match action {
        GoalAction::Create {
            variant,
            name,
            description,
            points,
            target,
            bonus,
        } => {
            let input = GoalInput {
                name,
                description,
                points,
                target,
                bonus,
            };
            let index = ws.manager.create_goal(variant, input)?;
            ws.persist()?;
            let events = ws.manager.drain_events();
            let goal = &ws.manager.session().goals()[index];
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "number": index + 1,
                    "goal": goal,
                    "events": events,
                }))?
            );
        }
        GoalAction::List { json } => {
            ws.persist()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ws.manager.list_goals())?);
            } else if ws.manager.session().goals().is_empty() {
                println!("No goals available. Create some goals first!");
            } else {
                println!("The goals are:");
                for line in ws.manager.goal_details() {
                    println!("{line}");
                }
            }
        }
        GoalAction::Names => {
            ws.persist()?;
            for line in ws.manager.goal_names() {
                println!("{line}");
            }
        }
        GoalAction::Record { number } => {
            let index = usize::try_from(number - 1)?;
            let outcome = ws.manager.record_event(index)?;
            ws.persist()?;
            let events = ws.manager.drain_events();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "outcome": outcome,
                    "events": events,
                }))?
            );
        }
    }
    Ok(())
}
