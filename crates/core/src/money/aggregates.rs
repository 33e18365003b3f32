//! Derived asset and budget figures.
//!
//! Nothing here is cached or stored: every figure is recomputed from the
//! current records on each call.

use serde::Serialize;

use super::money_model::{AssetRecord, BudgetProfile, MoneyConfig};
use super::month::MonthKey;

/// Comparison of a month's total against an earlier month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDelta {
    /// Month compared against
    pub baseline_month: String,
    pub baseline_total: i64,
    pub current_total: i64,
    /// current_total - baseline_total
    pub delta: i64,
}

/// Share of one category in a month's total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub value: i64,
    /// Fraction of the month total, 0 when the total is 0
    pub share: f64,
}

/// A single point of the asset trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: String,
    pub total: i64,
}

/// Income versus planned spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub monthly_income: i64,
    pub total_fixed_costs: i64,
    pub variable_budget: i64,
    pub total_expenses: i64,
    /// May be negative
    pub surplus: i64,
}

/// Everything the asset screen shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverview {
    pub month: String,
    pub has_record: bool,
    pub total: i64,
    pub month_over_month: Option<PeriodDelta>,
    pub year_over_year: Option<PeriodDelta>,
    pub breakdown: Vec<CategoryShare>,
}

pub fn find_record<'a>(assets: &'a [AssetRecord], month: &MonthKey) -> Option<&'a AssetRecord> {
    let key = month.to_string();
    assets.iter().find(|r| r.month == key)
}

pub fn record_total(record: &AssetRecord) -> i64 {
    record.total()
}

/// Total of all categories for a month; a month without a record totals 0.
pub fn total_for_month(assets: &[AssetRecord], month: &MonthKey) -> i64 {
    find_record(assets, month).map(record_total).unwrap_or(0)
}

fn delta_against(
    assets: &[AssetRecord],
    month: &MonthKey,
    baseline: Option<MonthKey>,
) -> Option<PeriodDelta> {
    let baseline = baseline?;
    let baseline_record = find_record(assets, &baseline)?;
    let baseline_total = record_total(baseline_record);
    let current_total = total_for_month(assets, month);
    Some(PeriodDelta {
        baseline_month: baseline.to_string(),
        baseline_total,
        current_total,
        delta: current_total.saturating_sub(baseline_total),
    })
}

/// Change against the calendar month before `month`.
///
/// Returns `None` when that month has no record; a missing month is never
/// compared as if it were 0.
pub fn month_over_month(assets: &[AssetRecord], month: &MonthKey) -> Option<PeriodDelta> {
    delta_against(assets, month, month.previous_month())
}

/// Change against the same month of the previous year, with the same
/// absence handling as [`month_over_month`].
pub fn year_over_year(assets: &[AssetRecord], month: &MonthKey) -> Option<PeriodDelta> {
    delta_against(assets, month, month.previous_year())
}

/// Non-zero categories of a month with their share of the total.
///
/// Configured categories come first in display order, followed by any
/// category still present in the record but no longer configured.
pub fn category_breakdown(
    assets: &[AssetRecord],
    config: &MoneyConfig,
    month: &MonthKey,
) -> Vec<CategoryShare> {
    let Some(record) = find_record(assets, month) else {
        return Vec::new();
    };
    let total = record_total(record);

    let unconfigured = record
        .values
        .keys()
        .filter(|k| !config.asset_categories.contains(k));

    config
        .asset_categories
        .iter()
        .chain(unconfigured)
        .filter_map(|category| {
            let value = record.value_of(category);
            if value == 0 {
                return None;
            }
            let share = if total == 0 {
                0.0
            } else {
                value as f64 / total as f64
            };
            Some(CategoryShare {
                category: category.clone(),
                value,
                share,
            })
        })
        .collect()
}

/// Monthly totals in ascending month order.
pub fn trend_series(assets: &[AssetRecord]) -> Vec<TrendPoint> {
    let mut sorted: Vec<&AssetRecord> = assets.iter().collect();
    sorted.sort_by(|a, b| a.month.cmp(&b.month));
    sorted
        .into_iter()
        .map(|record| TrendPoint {
            month: record.month.clone(),
            total: record_total(record),
        })
        .collect()
}

/// The most recent `limit` records, oldest first.
pub fn recent_asset_history(assets: &[AssetRecord], limit: usize) -> Vec<AssetRecord> {
    let mut sorted = assets.to_vec();
    sorted.sort_by(|a, b| a.month.cmp(&b.month));
    let skip = sorted.len().saturating_sub(limit);
    sorted.into_iter().skip(skip).collect()
}

pub fn budget_summary(budget: &BudgetProfile) -> BudgetSummary {
    let total_fixed_costs = budget
        .fixed_costs
        .iter()
        .fold(0i64, |acc, item| acc.saturating_add(item.amount));
    let total_expenses = total_fixed_costs.saturating_add(budget.variable_budget);
    BudgetSummary {
        monthly_income: budget.monthly_income,
        total_fixed_costs,
        variable_budget: budget.variable_budget,
        total_expenses,
        surplus: budget.monthly_income.saturating_sub(total_expenses),
    }
}

/// income - (fixed costs + variable budget)
pub fn budget_surplus(budget: &BudgetProfile) -> i64 {
    budget_summary(budget).surplus
}

pub fn month_overview(
    assets: &[AssetRecord],
    config: &MoneyConfig,
    month: &MonthKey,
) -> MonthOverview {
    MonthOverview {
        month: month.to_string(),
        has_record: find_record(assets, month).is_some(),
        total: total_for_month(assets, month),
        month_over_month: month_over_month(assets, month),
        year_over_year: year_over_year(assets, month),
        breakdown: category_breakdown(assets, config, month),
    }
}
