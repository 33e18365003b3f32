//! User profile domain model.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_STRENGTHS;

/// Identity and career profile of the single local user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// Stored in plain form; only a soft gate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// MBTI type code, e.g. "INFJ"
    pub mbti: String,
    /// Up to five StrengthsFinder themes, in rank order
    pub strengths: Vec<String>,
    pub skills: Vec<String>,
    /// Free-form career history notes
    pub history: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality_analysis: Option<String>,

    pub career_strengths: String,
    pub interests: String,
    pub values: String,
    pub environment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_summary: Option<String>,
}

impl UserProfile {
    /// Profile created on first login; the name is the local part of the email.
    pub fn from_login(email: &str, password: &str) -> Self {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            name,
            email: email.to_string(),
            password: (!password.is_empty()).then(|| password.to_string()),
            ..Default::default()
        }
    }

    /// A profile without a password accepts any input.
    pub fn check_password(&self, candidate: &str) -> bool {
        match self.password.as_deref() {
            None | Some("") => true,
            Some(stored) => stored == candidate,
        }
    }

    /// Non-blank strengths, capped at five.
    pub fn valid_strengths(&self) -> Vec<String> {
        self.strengths
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .take(MAX_STRENGTHS)
            .map(str::to_string)
            .collect()
    }

    pub fn with_strengths<I, S>(&self, strengths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let strengths = strengths
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .take(MAX_STRENGTHS)
            .collect();
        Self {
            strengths,
            ..self.clone()
        }
    }

    /// Replaces the skills with a comma-separated list.
    pub fn with_skills_csv(&self, csv: &str) -> Self {
        Self {
            skills: parse_tag_list(csv),
            ..self.clone()
        }
    }
}

/// Splits a comma-separated tag list (ASCII or full-width commas).
pub fn parse_tag_list(csv: &str) -> Vec<String> {
    csv.split([',', '、', '，'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
