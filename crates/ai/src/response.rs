//! Parsing of provider answers.

use serde::Deserialize;

use tarushiru_core::journal::{EmotionScores, EntryAnalysis};

use crate::error::AiError;

/// Result of a single-entry analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedEntry {
    pub analysis: EntryAnalysis,
    pub ai_comment: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    emotions: EmotionScores,
    #[serde(default)]
    themes: Vec<String>,
    #[serde(default)]
    actions: Vec<String>,
    #[serde(default)]
    ai_comment: Option<String>,
}

/// Parses the JSON object returned for an entry analysis.
///
/// Markdown code fences around the object are tolerated. Scores are taken
/// as returned and not range-checked.
pub fn parse_entry_analysis(raw: &str) -> Result<AnalyzedEntry, AiError> {
    let body = strip_code_fence(raw);
    let parsed: RawAnalysis =
        serde_json::from_str(body).map_err(|e| AiError::malformed(e.to_string()))?;
    let ai_comment = parsed
        .ai_comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    Ok(AnalyzedEntry {
        analysis: EntryAnalysis {
            emotions: parsed.emotions,
            themes: parsed.themes,
            actions: parsed.actions,
        },
        ai_comment,
    })
}

/// Trims a free-text answer; an empty answer is `None`.
pub fn clean_text_response(raw: &str) -> Option<String> {
    let text = raw.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening line, e.g. ```json
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_object() {
        let parsed = parse_entry_analysis(
            r#"{"emotions":{"joy":0.8,"anger":0,"sadness":0.1,"anxiety":0.2,"calm":0.6},
                "themes":["仕事"],"actions":["散歩"],"aiComment":"いい一日でしたね"}"#,
        )
        .unwrap();

        assert_eq!(parsed.analysis.emotions.joy, 0.8);
        assert_eq!(parsed.analysis.themes, vec!["仕事".to_string()]);
        assert_eq!(parsed.ai_comment.as_deref(), Some("いい一日でしたね"));
    }

    #[test]
    fn test_parse_fenced_object() {
        let raw = "```json\n{\"emotions\":{\"joy\":1.0},\"themes\":[]}\n```";
        let parsed = parse_entry_analysis(raw).unwrap();
        assert_eq!(parsed.analysis.emotions.joy, 1.0);
        assert_eq!(parsed.analysis.emotions.calm, 0.0);
        assert!(parsed.analysis.actions.is_empty());
        assert_eq!(parsed.ai_comment, None);
    }

    #[test]
    fn test_out_of_range_scores_are_kept() {
        let parsed = parse_entry_analysis(r#"{"emotions":{"anger":3.5}}"#).unwrap();
        assert_eq!(parsed.analysis.emotions.anger, 3.5);
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_entry_analysis("I could not analyze this").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_RESPONSE");
    }

    #[test]
    fn test_blank_comment_is_dropped() {
        let parsed = parse_entry_analysis(r#"{"aiComment":"  "}"#).unwrap();
        assert_eq!(parsed.ai_comment, None);
    }

    #[test]
    fn test_clean_text_response() {
        assert_eq!(clean_text_response("  \n"), None);
        assert_eq!(clean_text_response(" # Report \n").as_deref(), Some("# Report"));
    }
}
