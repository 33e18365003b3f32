use anyhow::anyhow;
use tracing::info;

use tarushiru_core::goals::{
    add_goal, goals_in_category, remove_goal, rename_goal, toggle_goal, Goal, GoalCategory,
};
use tarushiru_core::ViewController;

use super::confirm;
use crate::config::Config;
use crate::main_lib::annotation_service;
use crate::opt::GoalsCommand;

pub(crate) async fn run(
    vc: &mut ViewController,
    config: &Config,
    cmd: GoalsCommand,
) -> anyhow::Result<()> {
    match cmd {
        GoalsCommand::List { category } => {
            let goals = &vc.data().goals;
            match category {
                Some(category) => print_goals(&goals_in_category(goals, category.into())),
                None => {
                    for category in GoalCategory::ALL {
                        let in_category = goals_in_category(goals, category);
                        if !in_category.is_empty() {
                            println!("[{}]", category.as_str());
                            print_goals(&in_category);
                        }
                    }
                }
            }
            Ok(())
        }
        GoalsCommand::Add { title, category } => {
            let goals = add_goal(&vc.data().goals, &title, category.into())?;
            vc.set_goals(goals)?;
            println!("Added goal '{}'", title.trim());
            Ok(())
        }
        GoalsCommand::Toggle { id } => {
            let goals = toggle_goal(&vc.data().goals, &id)?;
            vc.set_goals(goals)?;
            println!("Toggled goal {}", id);
            Ok(())
        }
        GoalsCommand::Rename { id, title } => {
            let goals = rename_goal(&vc.data().goals, &id, &title)?;
            vc.set_goals(goals)?;
            println!("Renamed goal {}", id);
            Ok(())
        }
        GoalsCommand::Delete { id, confirm: c } => {
            let goals = remove_goal(&vc.data().goals, &id)?;
            if !confirm("Delete this goal?", c.yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            vc.set_goals(goals)?;
            info!("Deleted goal {}", id);
            println!("Deleted goal {}", id);
            Ok(())
        }
        GoalsCommand::Coach => {
            let service = annotation_service(config);
            let advice = service
                .coach_goals(&vc.data().goals)
                .await
                .map_err(|e| anyhow!("Coaching failed: {}", e))?;
            println!("{}", advice);
            Ok(())
        }
    }
}

fn print_goals(goals: &[&Goal]) {
    for goal in goals {
        let mark = if goal.is_done() { "x" } else { " " };
        println!("  [{}] {}  ({})", mark, goal.title, goal.id);
    }
}
