//! Asset and budget domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::month::MonthKey;
use crate::constants::DEFAULT_ASSET_CATEGORIES;

/// Balances of every asset category for one calendar month.
///
/// At most one record exists per month; the helpers in `money_ops` keep it
/// that way by replacing on write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Month key, `YYYY-MM`
    pub month: String,
    /// Category name -> balance
    #[serde(default)]
    pub values: BTreeMap<String, i64>,
}

impl AssetRecord {
    pub fn empty(month: &MonthKey) -> Self {
        Self {
            month: month.to_string(),
            values: BTreeMap::new(),
        }
    }

    /// Balance of a category; categories without a value count as 0.
    pub fn value_of(&self, category: &str) -> i64 {
        self.values.get(category).copied().unwrap_or(0)
    }

    /// Sum of every category balance in this record.
    pub fn total(&self) -> i64 {
        self.values
            .values()
            .fold(0i64, |acc, value| acc.saturating_add(*value))
    }
}

/// User-defined asset categories, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyConfig {
    #[serde(default = "default_asset_categories")]
    pub asset_categories: Vec<String>,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            asset_categories: default_asset_categories(),
        }
    }
}

pub fn default_asset_categories() -> Vec<String> {
    DEFAULT_ASSET_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// A recurring monthly cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixedCostItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: i64,
}

/// Monthly income and spending plan.
///
/// The surplus is never stored; see `aggregates::budget_summary`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetProfile {
    /// Take-home monthly income
    pub monthly_income: i64,
    pub fixed_costs: Vec<FixedCostItem>,
    /// Planned variable spending
    pub variable_budget: i64,
}
