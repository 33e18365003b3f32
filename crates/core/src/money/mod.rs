//! Money module - asset records, budget profile, helpers and derived figures.

mod aggregates;
mod amount;
mod money_model;
mod money_ops;
mod month;

pub use aggregates::*;
pub use amount::{parse_amount, parse_non_negative_amount};
pub use money_model::{
    default_asset_categories, AssetRecord, BudgetProfile, FixedCostItem, MoneyConfig,
};
pub use money_ops::*;
pub use month::MonthKey;
