//! Goals domain models.

use serde::{Deserialize, Serialize};

use crate::constants::GOAL_DONE_PROGRESS;

/// The four perspectives goals are grouped under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    /// Who the user wants to be
    Being,
    /// Private life
    Life,
    /// Long-term work goals; also the category of legacy goals
    #[default]
    Work,
    /// Short-term work goals
    WorkShort,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 4] = [
        GoalCategory::Being,
        GoalCategory::Life,
        GoalCategory::Work,
        GoalCategory::WorkShort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Being => "being",
            GoalCategory::Life => "life",
            GoalCategory::Work => "work",
            GoalCategory::WorkShort => "work_short",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: String,
    /// 0-100; in practice 0 (open) or 100 (done)
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub category: GoalCategory,
}

impl Goal {
    pub fn is_done(&self) -> bool {
        self.progress >= GOAL_DONE_PROGRESS
    }
}
