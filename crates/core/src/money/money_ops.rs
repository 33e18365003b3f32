//! Copy-on-write helpers for asset records, categories and the budget.
//!
//! Each helper takes the current slice of the document and returns the full
//! next value; the caller swaps it in through a `Mutation`.

use log::debug;
use uuid::Uuid;

use super::money_model::{AssetRecord, BudgetProfile, FixedCostItem, MoneyConfig};
use super::month::MonthKey;
use crate::errors::{Error, Result, ValidationError};

/// Sets one category balance for a month.
///
/// The result holds every record of other months followed by the updated
/// record for `month`, so a month never appears twice.
pub fn set_asset_value(
    assets: &[AssetRecord],
    month: &MonthKey,
    category: &str,
    value: i64,
) -> Vec<AssetRecord> {
    let key = month.to_string();
    let mut record = assets
        .iter()
        .find(|r| r.month == key)
        .cloned()
        .unwrap_or_else(|| AssetRecord::empty(month));
    record.values.insert(category.to_string(), value);

    let mut next: Vec<AssetRecord> = assets.iter().filter(|r| r.month != key).cloned().collect();
    next.push(record);
    next
}

/// Appends a category unless it is blank or already configured.
pub fn add_asset_category(config: &MoneyConfig, name: &str) -> MoneyConfig {
    let name = name.trim();
    let mut next = config.clone();
    if name.is_empty() || config.asset_categories.iter().any(|c| c == name) {
        debug!("Skipping asset category '{}': blank or duplicate", name);
        return next;
    }
    next.asset_categories.push(name.to_string());
    next
}

/// Removes a category from the configuration.
///
/// Balances already recorded under the category are left in the records.
pub fn remove_asset_category(config: &MoneyConfig, name: &str) -> Result<MoneyConfig> {
    if !config.asset_categories.iter().any(|c| c == name) {
        return Err(Error::NotFound(format!("Asset category '{}'", name)));
    }
    Ok(MoneyConfig {
        asset_categories: config
            .asset_categories
            .iter()
            .filter(|c| c.as_str() != name)
            .cloned()
            .collect(),
    })
}

pub fn add_fixed_cost(budget: &BudgetProfile, name: &str, amount: i64) -> Result<BudgetProfile> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    let mut next = budget.clone();
    next.fixed_costs.push(FixedCostItem {
        id: Uuid::now_v7().to_string(),
        name: name.to_string(),
        amount,
    });
    Ok(next)
}

pub fn remove_fixed_cost(budget: &BudgetProfile, id: &str) -> Result<BudgetProfile> {
    if !budget.fixed_costs.iter().any(|item| item.id == id) {
        return Err(Error::NotFound(format!("Fixed cost {}", id)));
    }
    let mut next = budget.clone();
    next.fixed_costs.retain(|item| item.id != id);
    Ok(next)
}

pub fn with_monthly_income(budget: &BudgetProfile, monthly_income: i64) -> BudgetProfile {
    BudgetProfile {
        monthly_income,
        ..budget.clone()
    }
}

pub fn with_variable_budget(budget: &BudgetProfile, variable_budget: i64) -> BudgetProfile {
    BudgetProfile {
        variable_budget,
        ..budget.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(raw: &str) -> MonthKey {
        MonthKey::parse(raw).unwrap()
    }

    #[test]
    fn test_set_asset_value_creates_record() {
        let assets = set_asset_value(&[], &month("2024-06"), "cash", 100);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].month, "2024-06");
        assert_eq!(assets[0].value_of("cash"), 100);
    }

    #[test]
    fn test_set_asset_value_replaces_same_month() {
        let first = set_asset_value(&[], &month("2024-06"), "cash", 100);
        let second = set_asset_value(&first, &month("2024-06"), "cash", 150);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].value_of("cash"), 150);
    }

    #[test]
    fn test_set_asset_value_keeps_other_categories_and_months() {
        let assets = set_asset_value(&[], &month("2024-05"), "cash", 10);
        let assets = set_asset_value(&assets, &month("2024-06"), "cash", 20);
        let assets = set_asset_value(&assets, &month("2024-06"), "stocks", 30);

        assert_eq!(assets.len(), 2);
        let june = assets.iter().find(|r| r.month == "2024-06").unwrap();
        assert_eq!(june.value_of("cash"), 20);
        assert_eq!(june.value_of("stocks"), 30);
        // The updated record moves to the end
        assert_eq!(assets.last().unwrap().month, "2024-06");
    }

    #[test]
    fn test_add_category_skips_blank_and_duplicates() {
        let config = MoneyConfig::default();
        let same = add_asset_category(&config, "  ");
        assert_eq!(same, config);
        let dup = add_asset_category(&config, &config.asset_categories[0].clone());
        assert_eq!(dup, config);

        let next = add_asset_category(&config, "iDeCo");
        assert_eq!(next.asset_categories.last().unwrap(), "iDeCo");
        assert_eq!(next.asset_categories.len(), config.asset_categories.len() + 1);
    }

    #[test]
    fn test_remove_category() {
        let config = add_asset_category(&MoneyConfig::default(), "iDeCo");
        let next = remove_asset_category(&config, "iDeCo").unwrap();
        assert_eq!(next, MoneyConfig::default());
        assert!(remove_asset_category(&next, "iDeCo").is_err());
    }

    #[test]
    fn test_fixed_costs_add_and_remove() {
        let budget = add_fixed_cost(&BudgetProfile::default(), "rent", 100_000).unwrap();
        assert_eq!(budget.fixed_costs.len(), 1);
        let id = budget.fixed_costs[0].id.clone();

        let budget = remove_fixed_cost(&budget, &id).unwrap();
        assert!(budget.fixed_costs.is_empty());
        assert!(remove_fixed_cost(&budget, &id).is_err());
        assert!(add_fixed_cost(&budget, " ", 1).is_err());
    }

    #[test]
    fn test_income_and_variable_budget() {
        let budget = with_monthly_income(&BudgetProfile::default(), 300_000);
        let budget = with_variable_budget(&budget, 50_000);
        assert_eq!(budget.monthly_income, 300_000);
        assert_eq!(budget.variable_budget, 50_000);
    }
}
