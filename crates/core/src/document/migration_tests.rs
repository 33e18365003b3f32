use serde_json::{json, Map, Value};

use super::migration::*;
use super::AppData;
use crate::constants::DEFAULT_ASSET_CATEGORIES;
use crate::goals::GoalCategory;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not an object: {}", other),
    }
}

// ============================================================================
// normalize_document
// ============================================================================

#[test]
fn test_absent_document_is_default() {
    let outcome = normalize_document(None);
    assert_eq!(outcome.source, LoadSource::Empty);
    assert_eq!(outcome.data, AppData::default());
    assert_eq!(
        outcome.data.money_config.asset_categories,
        DEFAULT_ASSET_CATEGORIES.to_vec()
    );
}

#[test]
fn test_blank_document_is_default() {
    let outcome = normalize_document(Some("   "));
    assert_eq!(outcome.source, LoadSource::Empty);
}

#[test]
fn test_unparseable_document_is_corrupt() {
    let outcome = normalize_document(Some("{not json"));
    assert_eq!(outcome.source, LoadSource::Corrupt);
    assert_eq!(outcome.data, AppData::default());
}

#[test]
fn test_non_object_document_is_corrupt() {
    for raw in ["[]", "42", "\"text\"", "null"] {
        let outcome = normalize_document(Some(raw));
        assert_eq!(outcome.source, LoadSource::Corrupt, "input {}", raw);
        assert_eq!(outcome.data, AppData::default());
    }
}

#[test]
fn test_legacy_document_is_upgraded() {
    let raw = json!({
        "user": {
            "name": "Kana",
            "email": "kana@example.com",
            "mbti": "INFJ",
            "strengths": "Learner",
            "history": "Five years in sales"
        },
        "journal": [
            { "id": "j1", "date": "2024-06-01T10:00:00.000Z", "content": "Good day" }
        ],
        "goals": [
            { "id": "g1", "title": "Run a marathon", "progress": 0 }
        ],
        "assets": [
            { "month": "2024-05", "values": { "現金・預金": 100000 } }
        ]
    })
    .to_string();

    let outcome = normalize_document(Some(&raw));
    assert_eq!(outcome.source, LoadSource::Stored);

    let data = outcome.data;
    let user = data.user.expect("user kept");
    assert_eq!(user.name, "Kana");
    assert_eq!(user.strengths, vec!["Learner".to_string()]);
    assert!(user.skills.is_empty());
    assert_eq!(user.career_strengths, "");
    assert_eq!(user.resume_markdown, None);

    assert_eq!(data.journal.len(), 1);
    assert_eq!(data.goals[0].category, GoalCategory::Work);
    assert_eq!(data.assets[0].value_of("現金・預金"), 100_000);
    assert_eq!(
        data.money_config.asset_categories,
        DEFAULT_ASSET_CATEGORIES.to_vec()
    );
    assert_eq!(data.budget_profile.monthly_income, 0);
    assert!(data.budget_profile.fixed_costs.is_empty());
}

#[test]
fn test_current_document_is_unchanged() {
    let data = normalize_document(Some(
        &json!({
            "user": { "name": "Kana", "email": "k@example.com", "strengths": ["Focus", "Input"] },
            "goals": [{ "id": "g1", "title": "Ship", "progress": 100, "category": "work_short" }],
            "moneyConfig": { "assetCategories": ["Cash"] },
            "budgetProfile": {
                "monthlyIncome": 300000,
                "fixedCosts": [{ "id": "f1", "name": "Rent", "amount": 80000 }],
                "variableBudget": 70000
            }
        })
        .to_string(),
    ))
    .data;

    let again = normalize_value(serde_json::to_value(&data).unwrap());
    assert_eq!(again, data);
    assert_eq!(data.money_config.asset_categories, vec!["Cash".to_string()]);
    assert_eq!(data.goals[0].category, GoalCategory::WorkShort);
}

// ============================================================================
// Individual steps
// ============================================================================

#[test]
fn test_merge_over_defaults_fills_missing_keys() {
    let mut doc = object(json!({ "goals": [{ "id": "g" }] }));
    merge_over_defaults(&mut doc);

    for key in ["user", "journal", "goals", "assets", "moneyConfig", "budgetProfile"] {
        assert!(doc.contains_key(key), "missing {}", key);
    }
    assert_eq!(doc["goals"], json!([{ "id": "g" }]));
    assert_eq!(doc["user"], Value::Null);
}

#[test]
fn test_strengths_variants() {
    let cases = [
        (json!("Learner"), json!(["Learner"])),
        (json!(["A", 3, "B", null]), json!(["A", "B"])),
        (json!(null), json!([])),
        (json!({ "x": 1 }), json!([])),
    ];
    for (input, expected) in cases {
        let mut doc = object(json!({ "user": { "strengths": input } }));
        user_strengths_to_list(&mut doc);
        assert_eq!(doc["user"]["strengths"], expected);
    }

    let mut doc = object(json!({ "user": {} }));
    user_strengths_to_list(&mut doc);
    assert_eq!(doc["user"]["strengths"], json!([]));
}

#[test]
fn test_strengths_without_user_is_noop() {
    let mut doc = object(json!({ "user": null }));
    user_strengths_to_list(&mut doc);
    assert_eq!(doc["user"], Value::Null);
}

#[test]
fn test_profile_fields_defaults() {
    let mut doc = object(json!({
        "user": {
            "name": 12,
            "interests": null,
            "values": false,
            "skills": "Rust",
            "resumeMarkdown": 5,
            "careerSummary": "Summary"
        }
    }));
    user_profile_fields(&mut doc);

    let user = &doc["user"];
    assert_eq!(user["name"], json!(""));
    assert_eq!(user["interests"], json!(""));
    assert_eq!(user["values"], json!(""));
    assert_eq!(user["environment"], json!(""));
    assert_eq!(user["skills"], json!([]));
    assert!(user.get("resumeMarkdown").is_none());
    assert_eq!(user["careerSummary"], json!("Summary"));
}

#[test]
fn test_profile_of_wrong_type_is_dropped() {
    let mut doc = object(json!({ "user": "someone" }));
    user_profile_fields(&mut doc);
    assert_eq!(doc["user"], Value::Null);
}

#[test]
fn test_goal_default_category() {
    let mut doc = object(json!({
        "goals": [
            { "id": "1" },
            { "id": "2", "category": null },
            { "id": "3", "category": "hobby" },
            { "id": "4", "category": "being" }
        ]
    }));
    goal_default_category(&mut doc);

    let categories: Vec<&str> = doc["goals"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["work", "work", "work", "being"]);
}

#[test]
fn test_money_config_defaults() {
    let mut doc = object(json!({}));
    money_config_defaults(&mut doc);
    assert_eq!(
        doc["moneyConfig"]["assetCategories"],
        json!(DEFAULT_ASSET_CATEGORIES)
    );

    let mut doc = object(json!({ "moneyConfig": { "assetCategories": "Cash" } }));
    money_config_defaults(&mut doc);
    assert_eq!(
        doc["moneyConfig"]["assetCategories"],
        json!(DEFAULT_ASSET_CATEGORIES)
    );

    let mut doc = object(json!({ "moneyConfig": { "assetCategories": [] } }));
    money_config_defaults(&mut doc);
    assert_eq!(doc["moneyConfig"]["assetCategories"], json!([]));
}

#[test]
fn test_budget_profile_defaults_keeps_stored_keys() {
    let mut doc = object(json!({ "budgetProfile": { "monthlyIncome": 250000 } }));
    budget_profile_defaults(&mut doc);
    assert_eq!(doc["budgetProfile"]["monthlyIncome"], json!(250000));
    assert_eq!(doc["budgetProfile"]["variableBudget"], json!(0));
    assert_eq!(doc["budgetProfile"]["fixedCosts"], json!([]));
}

#[test]
fn test_collection_shapes() {
    let mut doc = object(json!({
        "journal": [
            "junk",
            { "id": 7, "content": "hi", "analysis": "bad", "aiComment": 3 },
            { "date": "2024-01-01T00:00:00.000Z", "analysis": { "themes": "work" } }
        ],
        "goals": { "id": "g" },
        "assets": [
            { "month": 202401, "values": {} },
            { "month": "2024-02" }
        ],
        "budgetProfile": { "fixedCosts": "rent" }
    }));
    collection_shapes(&mut doc);

    let journal = doc["journal"].as_array().unwrap();
    assert_eq!(journal.len(), 2);
    assert_eq!(journal[0]["id"], json!("7"));
    assert_eq!(journal[0]["date"], json!(""));
    assert!(journal[0].get("analysis").is_none());
    assert!(journal[0].get("aiComment").is_none());
    assert!(journal[1]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(journal[1]["analysis"]["themes"], json!([]));
    assert_eq!(journal[1]["analysis"]["actions"], json!([]));

    assert_eq!(doc["goals"], json!([]));

    let assets = doc["assets"].as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["values"], json!({}));

    assert_eq!(doc["budgetProfile"]["fixedCosts"], json!([]));
}

#[test]
fn test_numeric_fields() {
    let mut doc = object(json!({
        "budgetProfile": {
            "monthlyIncome": "300000",
            "variableBudget": null,
            "fixedCosts": [{ "id": "f", "name": "Rent", "amount": 80000.9 }]
        },
        "assets": [{ "month": "2024-01", "values": { "Cash": "12", "Stocks": "abc" } }],
        "goals": [{ "id": "a", "progress": 250 }, { "id": "b", "progress": -3 }],
        "journal": [{ "id": "j", "analysis": { "emotions": { "joy": "0.5", "calm": 1 } } }]
    }));
    numeric_fields(&mut doc);

    assert_eq!(doc["budgetProfile"]["monthlyIncome"], json!(300000));
    assert_eq!(doc["budgetProfile"]["variableBudget"], json!(0));
    assert_eq!(doc["budgetProfile"]["fixedCosts"][0]["amount"], json!(80000));
    assert_eq!(doc["assets"][0]["values"]["Cash"], json!(12));
    assert_eq!(doc["assets"][0]["values"]["Stocks"], json!(0));
    assert_eq!(doc["goals"][0]["progress"], json!(100));
    assert_eq!(doc["goals"][1]["progress"], json!(0));

    let emotions = &doc["journal"][0]["analysis"]["emotions"];
    assert_eq!(emotions["joy"], json!(0.5));
    assert_eq!(emotions["calm"], json!(1.0));
    assert_eq!(emotions["anger"], json!(0.0));
}

#[test]
fn test_step_order() {
    let names: Vec<&str> = MIGRATION_STEPS.iter().map(|s| s.name).collect();
    assert_eq!(names.first(), Some(&"merge_over_defaults"));
    assert_eq!(names.last(), Some(&"numeric_fields"));
    assert_eq!(names.len(), 8);
}
