//! Goals module - domain models and copy-on-write helpers.

mod goals_model;
mod goals_ops;

pub use goals_model::{Goal, GoalCategory};
pub use goals_ops::*;
