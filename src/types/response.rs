// src/types/response.rs
//! Scoring API response types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ===== Success Response =====

/// Body of a 2xx reply from `POST /match/`.
///
/// `missing_context` and `rewritten_bullets` are optional in the wire
/// contract and default to empty when the backend omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_percentage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub missing_context: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub rewritten_bullets: Vec<String>,
    pub suggestions: Vec<String>,
}

/// One missing skill together with the JD sentences that mention it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillContext<'a> {
    pub skill: &'a str,
    pub sentences: &'a [String],
}

impl MatchResult {
    /// Missing skills paired with their context, in `missing_skills` order.
    /// Skills that only appear as context keys follow in the order received.
    pub fn missing_with_context(&self) -> Vec<SkillContext<'_>> {
        if self.missing_context.is_empty() {
            return Vec::new();
        }

        let mut entries: Vec<SkillContext<'_>> = self
            .missing_skills
            .iter()
            .map(|skill| SkillContext {
                skill: skill.as_str(),
                sentences: self
                    .missing_context
                    .get(skill)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
            })
            .collect();

        entries.extend(
            self.missing_context
                .iter()
                .filter(|(skill, _)| !self.missing_skills.contains(*skill))
                .map(|(skill, sentences)| SkillContext {
                    skill: skill.as_str(),
                    sentences: sentences.as_slice(),
                }),
        );

        entries
    }

    /// Percentage as the backend sent it, without a trailing `.0`.
    pub fn percentage_label(&self) -> String {
        format!("{}%", self.match_percentage)
    }

    pub fn is_percentage_in_range(&self) -> bool {
        (0.0..=100.0).contains(&self.match_percentage)
    }
}

// ===== Error Response =====

/// Body of a non-2xx reply. Rendered as-is, never interpreted. Object keys
/// keep the server's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPayload(pub serde_json::Value);

impl ErrorPayload {
    /// Two-space indented JSON, matching what a browser console shows.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}
