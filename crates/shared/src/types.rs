//! Core types shared across the workspace.
//!
//! An [`Utterance`] is one user submission; a [`SimplificationResult`] is what
//! the engine hands back to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Languages the simplifier understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Urdu,
    Punjabi,
    RomanUrdu,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Urdu => "urdu",
            Language::Punjabi => "punjabi",
            Language::RomanUrdu => "roman-urdu",
            Language::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Urdu => "اردو (Urdu)",
            Language::Punjabi => "پنجابی (Punjabi)",
            Language::RomanUrdu => "Roman Urdu",
            Language::Unknown => "Unknown",
        }
    }

    /// Written right-to-left?
    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Urdu | Language::Punjabi)
    }
}

/// Which path actually produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimplifyMode {
    Online,
    Offline,
}

impl SimplifyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimplifyMode::Online => "online",
            SimplifyMode::Offline => "offline",
        }
    }
}

/// One user submission. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    pub id: Uuid,
    pub text: String,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            language,
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of one simplification request.
///
/// `mode` records the path that actually ran: a request that attempted the
/// online call and fell back reports `Offline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplificationResult {
    pub utterance: Utterance,
    pub output: String,
    pub mode: SimplifyMode,
    pub success: bool,
    /// Why the online path was skipped or abandoned, when it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::RomanUrdu.as_str(), "roman-urdu");
        assert_eq!(Language::Unknown.as_str(), "unknown");
        assert!(Language::Urdu.is_rtl());
        assert!(!Language::RomanUrdu.is_rtl());
    }

    #[test]
    fn test_result_serializes_without_empty_reason() {
        let r = SimplificationResult {
            utterance: Utterance::new("chai", Language::RomanUrdu),
            output: "chai".to_string(),
            mode: SimplifyMode::Offline,
            success: true,
            error_reason: None,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("error_reason"));
        assert!(json.contains("\"Offline\""));
    }
}
