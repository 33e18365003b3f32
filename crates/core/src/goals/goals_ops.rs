use uuid::Uuid;

use super::goals_model::{Goal, GoalCategory};
use crate::constants::GOAL_DONE_PROGRESS;
use crate::errors::{Error, Result, ValidationError};

fn require_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "title".to_string(),
        )));
    }
    Ok(title.to_string())
}

fn position(goals: &[Goal], id: &str) -> Result<usize> {
    goals
        .iter()
        .position(|g| g.id == id)
        .ok_or_else(|| Error::NotFound(format!("Goal {}", id)))
}

/// Appends a new open goal.
pub fn add_goal(goals: &[Goal], title: &str, category: GoalCategory) -> Result<Vec<Goal>> {
    let title = require_title(title)?;
    let mut next = goals.to_vec();
    next.push(Goal {
        id: Uuid::now_v7().to_string(),
        title,
        description: String::new(),
        deadline: String::new(),
        progress: 0,
        category,
    });
    Ok(next)
}

/// Flips a goal between open (0) and done (100).
pub fn toggle_goal(goals: &[Goal], id: &str) -> Result<Vec<Goal>> {
    let index = position(goals, id)?;
    let mut next = goals.to_vec();
    let goal = &mut next[index];
    goal.progress = if goal.is_done() { 0 } else { GOAL_DONE_PROGRESS };
    Ok(next)
}

pub fn rename_goal(goals: &[Goal], id: &str, title: &str) -> Result<Vec<Goal>> {
    let title = require_title(title)?;
    let index = position(goals, id)?;
    let mut next = goals.to_vec();
    next[index].title = title;
    Ok(next)
}

pub fn remove_goal(goals: &[Goal], id: &str) -> Result<Vec<Goal>> {
    position(goals, id)?;
    Ok(goals.iter().filter(|g| g.id != id).cloned().collect())
}

pub fn goals_in_category(goals: &[Goal], category: GoalCategory) -> Vec<&Goal> {
    goals.iter().filter(|g| g.category == category).collect()
}
