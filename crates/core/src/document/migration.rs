//! Normalization of stored documents into the current schema.
//!
//! A stored document may come from any earlier version of the application,
//! or may be damaged. It is repaired by an ordered list of small named steps
//! that work on the raw JSON, and only then typed into [`AppData`]. Nothing
//! in here returns an error: content that cannot be repaired degrades to the
//! default document.

use log::{debug, warn};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::app_data::AppData;
use crate::goals::GoalCategory;
use crate::money::{default_asset_categories, BudgetProfile, MoneyConfig};

/// Profile text fields introduced after the first release.
const PROFILE_TEXT_FIELDS: [&str; 8] = [
    "name",
    "email",
    "mbti",
    "history",
    "careerStrengths",
    "interests",
    "values",
    "environment",
];

/// Optional generated profile texts.
const PROFILE_OPTIONAL_FIELDS: [&str; 4] = [
    "password",
    "resumeMarkdown",
    "personalityAnalysis",
    "careerSummary",
];

const EMOTION_KEYS: [&str; 5] = ["joy", "anger", "sadness", "anxiety", "calm"];

/// A single named repair applied to the raw document.
pub struct MigrationStep {
    pub name: &'static str,
    pub apply: fn(&mut Map<String, Value>),
}

/// Steps in the order they run.
pub const MIGRATION_STEPS: &[MigrationStep] = &[
    MigrationStep {
        name: "merge_over_defaults",
        apply: merge_over_defaults,
    },
    MigrationStep {
        name: "user_strengths_to_list",
        apply: user_strengths_to_list,
    },
    MigrationStep {
        name: "user_profile_fields",
        apply: user_profile_fields,
    },
    MigrationStep {
        name: "goal_default_category",
        apply: goal_default_category,
    },
    MigrationStep {
        name: "money_config_defaults",
        apply: money_config_defaults,
    },
    MigrationStep {
        name: "budget_profile_defaults",
        apply: budget_profile_defaults,
    },
    MigrationStep {
        name: "collection_shapes",
        apply: collection_shapes,
    },
    MigrationStep {
        name: "numeric_fields",
        apply: numeric_fields,
    },
];

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing was stored
    Empty,
    /// Stored content was normalized
    Stored,
    /// Stored content could not be parsed; defaults are in use
    Corrupt,
}

/// Result of loading the persisted text.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub data: AppData,
    pub source: LoadSource,
}

/// Normalizes persisted text (or its absence) into a document.
pub fn normalize_document(raw: Option<&str>) -> LoadOutcome {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return LoadOutcome {
            data: AppData::default(),
            source: LoadSource::Empty,
        };
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => LoadOutcome {
            data: normalize_value(value),
            source: LoadSource::Stored,
        },
        Ok(other) => {
            warn!(
                "Stored document is not a JSON object ({}), using defaults",
                json_kind(&other)
            );
            LoadOutcome {
                data: AppData::default(),
                source: LoadSource::Corrupt,
            }
        }
        Err(e) => {
            warn!("Failed to parse stored document, using defaults: {}", e);
            LoadOutcome {
                data: AppData::default(),
                source: LoadSource::Corrupt,
            }
        }
    }
}

/// Normalizes an already-parsed document.
pub fn normalize_value(value: Value) -> AppData {
    let Value::Object(mut doc) = value else {
        warn!("Document root is {}, using defaults", json_kind(&value));
        return AppData::default();
    };

    for step in MIGRATION_STEPS {
        debug!("Applying migration step {}", step.name);
        (step.apply)(&mut doc);
    }

    match serde_json::from_value::<AppData>(Value::Object(doc)) {
        Ok(data) => data,
        Err(e) => {
            warn!("Normalized document does not fit the schema, using defaults: {}", e);
            AppData::default()
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

/// Top-level keys missing from the stored document take their default value.
pub fn merge_over_defaults(doc: &mut Map<String, Value>) {
    for (key, value) in object_of(&AppData::default()) {
        doc.entry(key).or_insert(value);
    }
}

/// A legacy single-string `strengths` becomes a one-element list.
pub fn user_strengths_to_list(doc: &mut Map<String, Value>) {
    let Some(Value::Object(user)) = doc.get_mut("user") else {
        return;
    };
    let strengths = match user.remove("strengths") {
        Some(Value::String(single)) => vec![Value::String(single)],
        Some(Value::Array(items)) => items.into_iter().filter(Value::is_string).collect(),
        _ => Vec::new(),
    };
    user.insert("strengths".to_string(), Value::Array(strengths));
}

/// Profile fields added over time get their defaults.
pub fn user_profile_fields(doc: &mut Map<String, Value>) {
    match doc.get_mut("user") {
        Some(Value::Object(user)) => {
            for key in PROFILE_TEXT_FIELDS {
                ensure_string(user, key);
            }
            for key in PROFILE_OPTIONAL_FIELDS {
                ensure_optional_string(user, key);
            }
            ensure_string_list(user, "skills");
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            warn!("Dropping user of unexpected type {}", json_kind(other));
            doc.insert("user".to_string(), Value::Null);
        }
    }
}

/// Goals saved before categories existed are filed under `work`.
pub fn goal_default_category(doc: &mut Map<String, Value>) {
    let Some(Value::Array(goals)) = doc.get_mut("goals") else {
        return;
    };
    for goal in goals.iter_mut().filter_map(Value::as_object_mut) {
        let known = goal
            .get("category")
            .and_then(Value::as_str)
            .and_then(GoalCategory::parse)
            .is_some();
        if !known {
            goal.insert(
                "category".to_string(),
                Value::String(GoalCategory::Work.as_str().to_string()),
            );
        }
    }
}

/// `moneyConfig` is merged key by key so new keys never go missing.
pub fn money_config_defaults(doc: &mut Map<String, Value>) {
    let mut merged = merge_keys(object_of(&MoneyConfig::default()), doc.get("moneyConfig"));

    let categories: Option<Vec<Value>> = match merged.get("assetCategories") {
        Some(Value::Array(items)) => Some(items.iter().filter(|v| v.is_string()).cloned().collect()),
        _ => None,
    };
    let categories = categories.unwrap_or_else(|| {
        default_asset_categories()
            .into_iter()
            .map(Value::String)
            .collect()
    });
    merged.insert("assetCategories".to_string(), Value::Array(categories));

    doc.insert("moneyConfig".to_string(), Value::Object(merged));
}

/// `budgetProfile` is merged key by key so new keys never go missing.
pub fn budget_profile_defaults(doc: &mut Map<String, Value>) {
    let merged = merge_keys(object_of(&BudgetProfile::default()), doc.get("budgetProfile"));
    doc.insert("budgetProfile".to_string(), Value::Object(merged));
}

/// Collections are lists of objects with string ids.
pub fn collection_shapes(doc: &mut Map<String, Value>) {
    for key in ["journal", "goals", "assets"] {
        let items = match doc.remove(key) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!("Replacing {} of type {} with an empty list", key, json_kind(&other));
                Vec::new()
            }
        };
        let objects: Vec<Map<String, Value>> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(obj) => Some(obj),
                _ => None,
            })
            .collect();

        let repaired: Vec<Value> = match key {
            "journal" => objects.into_iter().map(repair_journal_entry).collect(),
            "goals" => objects.into_iter().map(repair_goal).collect(),
            _ => objects.into_iter().filter_map(repair_asset_record).collect(),
        };
        doc.insert(key.to_string(), Value::Array(repaired));
    }

    if let Some(Value::Object(budget)) = doc.get_mut("budgetProfile") {
        let items = match budget.remove("fixedCosts") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        let repaired: Vec<Value> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(mut obj) => {
                    ensure_id(&mut obj);
                    ensure_string(&mut obj, "name");
                    Some(Value::Object(obj))
                }
                _ => None,
            })
            .collect();
        budget.insert("fixedCosts".to_string(), Value::Array(repaired));
    }
}

/// Amounts, balances, progress and scores are numbers.
///
/// Values that were saved as text or as `null` (a `NaN` in the browser)
/// are parsed when possible and become 0 otherwise.
pub fn numeric_fields(doc: &mut Map<String, Value>) {
    if let Some(Value::Object(budget)) = doc.get_mut("budgetProfile") {
        for key in ["monthlyIncome", "variableBudget"] {
            let value = coerce_integer(budget.get(key));
            budget.insert(key.to_string(), Value::from(value));
        }
        if let Some(Value::Array(items)) = budget.get_mut("fixedCosts") {
            for item in items.iter_mut().filter_map(Value::as_object_mut) {
                let amount = coerce_integer(item.get("amount"));
                item.insert("amount".to_string(), Value::from(amount));
            }
        }
    }

    if let Some(Value::Array(records)) = doc.get_mut("assets") {
        for record in records.iter_mut().filter_map(Value::as_object_mut) {
            if let Some(Value::Object(values)) = record.get_mut("values") {
                for value in values.values_mut() {
                    let amount = coerce_integer(Some(&*value));
                    *value = Value::from(amount);
                }
            }
        }
    }

    if let Some(Value::Array(goals)) = doc.get_mut("goals") {
        for goal in goals.iter_mut().filter_map(Value::as_object_mut) {
            let progress = coerce_integer(goal.get("progress")).clamp(0, 100);
            goal.insert("progress".to_string(), Value::from(progress));
        }
    }

    if let Some(Value::Array(entries)) = doc.get_mut("journal") {
        for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
            let Some(Value::Object(analysis)) = entry.get_mut("analysis") else {
                continue;
            };
            let mut emotions = match analysis.remove("emotions") {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            };
            for key in EMOTION_KEYS {
                let score = coerce_float(emotions.get(key));
                emotions.insert(key.to_string(), Value::from(score));
            }
            analysis.insert("emotions".to_string(), Value::Object(emotions));
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn repair_journal_entry(mut entry: Map<String, Value>) -> Value {
    ensure_id(&mut entry);
    ensure_string(&mut entry, "date");
    ensure_string(&mut entry, "content");
    ensure_optional_string(&mut entry, "aiComment");
    match entry.get_mut("analysis") {
        Some(Value::Object(analysis)) => {
            ensure_string_list(analysis, "themes");
            ensure_string_list(analysis, "actions");
        }
        Some(_) => {
            entry.remove("analysis");
        }
        None => {}
    }
    Value::Object(entry)
}

fn repair_goal(mut goal: Map<String, Value>) -> Value {
    ensure_id(&mut goal);
    for key in ["title", "description", "deadline"] {
        ensure_string(&mut goal, key);
    }
    Value::Object(goal)
}

fn repair_asset_record(mut record: Map<String, Value>) -> Option<Value> {
    if !record.get("month").is_some_and(Value::is_string) {
        warn!("Dropping asset record without a month key");
        return None;
    }
    if !record.get("values").is_some_and(Value::is_object) {
        record.insert("values".to_string(), Value::Object(Map::new()));
    }
    Some(Value::Object(record))
}

fn object_of<T: serde::Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Defaults overlaid with whichever keys the stored object has.
fn merge_keys(defaults: Map<String, Value>, stored: Option<&Value>) -> Map<String, Value> {
    let mut merged = defaults;
    if let Some(Value::Object(stored)) = stored {
        for (key, value) in stored {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Missing, `null`, empty or non-text values become `""`.
fn ensure_string(obj: &mut Map<String, Value>, key: &str) {
    if !obj.get(key).is_some_and(Value::is_string) {
        obj.insert(key.to_string(), Value::String(String::new()));
    }
}

/// Non-text values are dropped.
fn ensure_optional_string(obj: &mut Map<String, Value>, key: &str) {
    if obj.get(key).is_some_and(|v| !v.is_string()) {
        obj.remove(key);
    }
}

/// Anything but a list becomes an empty list; non-text items are dropped.
fn ensure_string_list(obj: &mut Map<String, Value>, key: &str) {
    let items = match obj.remove(key) {
        Some(Value::Array(items)) => items.into_iter().filter(Value::is_string).collect(),
        _ => Vec::new(),
    };
    obj.insert(key.to_string(), Value::Array(items));
}

fn ensure_id(obj: &mut Map<String, Value>) {
    let id = match obj.get("id") {
        Some(Value::String(id)) if !id.is_empty() => return,
        Some(Value::Number(n)) => n.to_string(),
        _ => Uuid::now_v7().to_string(),
    };
    obj.insert("id".to_string(), Value::String(id));
}

fn coerce_integer(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn coerce_float(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
