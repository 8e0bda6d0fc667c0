//! Rule-based offline simplifier.
//!
//! Three steps in fixed order, each idempotent on its own output:
//! 1. phrase-table substitution, longest match first;
//! 2. redundant-intensifier removal (the only step for `Unknown`);
//! 3. structural trim of over-long sentences at clause boundaries.
//!
//! Never fails: the worst case returns the input unchanged.

use crate::rules::{RuleSet, RuleTable, EMPHASIS_WORDS, REDUNDANT_PAIRS};
use shared::types::Language;
use std::collections::HashSet;
use std::sync::Arc;

/// Sentences longer than this, with a clause boundary, get trimmed.
const TRIM_WORD_THRESHOLD: usize = 24;

const ROMAN_VERB_MARKERS: &[&str] = &[
    "hai", "hain", "tha", "thi", "ho", "hun", "raha", "rahi", "rahe", "ga", "gi", "ge", "karo",
    "karna", "kiya", "ko", "ne",
];

const URDU_VERB_MARKERS: &[&str] = &[
    "ہے", "ہیں", "تھا", "تھی", "تھے", "گا", "گی", "گے", "کو", "نے", "رہا", "رہی", "رہے",
];

pub struct OfflineSimplifier {
    rules: Arc<RuleSet>,
}

impl OfflineSimplifier {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// Simplify `text` for the detected `language`. Deterministic and
    /// idempotent; returns non-empty output for non-empty input.
    pub fn simplify(&self, text: &str, language: Language) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return text.to_string();
        }

        let substituted = match self.rules.table(language) {
            Some(table) if language == Language::RomanUrdu => apply_roman(table, trimmed),
            Some(table) => apply_substring(table, trimmed),
            None => trimmed.to_string(),
        };

        let stripped = strip_intensifiers(&substituted);

        let result = match language {
            Language::Unknown => stripped,
            _ => trim_structure(&stripped, language),
        };

        let result = result.trim().to_string();
        if result.is_empty() {
            trimmed.to_string()
        } else {
            result
        }
    }
}

/// Substring replacement in table order, for the Arabic-script languages
/// where word boundaries are not reliably whitespace.
fn apply_substring(table: &RuleTable, text: &str) -> String {
    let mut result = text.to_string();
    for (key, value) in table.rules() {
        if result.contains(key.as_str()) {
            tracing::debug!("rule: {} -> {}", key, value);
            result = result.replace(key.as_str(), value);
        }
    }
    result
}

/// Token-window replacement for Roman text: longest key first at each
/// position, preserving capitalisation and surrounding punctuation.
fn apply_roman(table: &RuleTable, text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    'tokens: while i < tokens.len() {
        for (key, value) in table.rules() {
            let key_tokens: Vec<&str> = key.split_whitespace().collect();
            let n = key_tokens.len();
            if i + n > tokens.len() {
                continue;
            }
            if window_matches(&tokens[i..i + n], &key_tokens) {
                tracing::debug!("rule: {} -> {}", key, value);
                out.push(shape_replacement(tokens[i], tokens[i + n - 1], value));
                i += n;
                continue 'tokens;
            }
        }
        out.push(tokens[i].to_string());
        i += 1;
    }

    out.join(" ")
}

fn core_of(token: &str) -> String {
    token
        .to_lowercase()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

fn trailing_punct(token: &str) -> String {
    let stripped = token.trim_end_matches(|c: char| !c.is_alphanumeric());
    token[stripped.len()..].to_string()
}

fn leading_punct(token: &str) -> String {
    let stripped = token.trim_start_matches(|c: char| !c.is_alphanumeric());
    token[..token.len() - stripped.len()].to_string()
}

fn window_matches(window: &[&str], key_tokens: &[&str]) -> bool {
    for (idx, (token, key)) in window.iter().zip(key_tokens).enumerate() {
        if core_of(token) != *key {
            return false;
        }
        // Punctuation inside the window breaks the phrase.
        if idx + 1 < window.len() && !trailing_punct(token).is_empty() {
            return false;
        }
    }
    true
}

fn shape_replacement(first: &str, last: &str, value: &str) -> String {
    let bare = first.trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut replacement = leading_punct(first);
    if bare.chars().next().is_some_and(|c| c.is_uppercase()) {
        replacement.push_str(&capitalize(value));
    } else {
        replacement.push_str(value);
    }
    replacement.push_str(&trailing_punct(last));
    replacement
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop filler intensifiers whose same-meaning partner already appears, and
/// collapse immediately repeated emphasis words. Language-agnostic.
fn strip_intensifiers(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let norms: Vec<String> = tokens.iter().map(|t| core_of(t)).collect();
    let mut keep = vec![true; tokens.len()];

    for i in 0..tokens.len() {
        if let Some((_, partner)) = REDUNDANT_PAIRS.iter().find(|(f, _)| *f == norms[i]) {
            if norms
                .iter()
                .enumerate()
                .any(|(j, w)| j != i && w == partner)
            {
                keep[i] = false;
                continue;
            }
        }
        // Keep the later duplicate: it carries any trailing punctuation.
        if i + 1 < tokens.len()
            && norms[i] == norms[i + 1]
            && EMPHASIS_WORDS.contains(&norms[i].as_str())
        {
            keep[i] = false;
        }
    }

    if keep.iter().all(|k| *k) {
        return text.to_string();
    }

    let kept: Vec<&str> = tokens
        .iter()
        .zip(&keep)
        .filter(|(_, k)| **k)
        .map(|(t, _)| *t)
        .collect();
    let mut result = kept.join(" ");

    // If the dropped word opened the sentence, restore the capital.
    if !keep[0] && text.chars().next().is_some_and(|c| c.is_uppercase()) {
        result = capitalize(&result);
    }
    result
}

/// Drop clauses without verb/object markers from over-long sentences. When
/// every clause (or none) carries markers there is nothing safe to drop.
fn trim_structure(text: &str, language: Language) -> String {
    let word_count = text.split_whitespace().count();
    if word_count <= TRIM_WORD_THRESHOLD {
        return text.to_string();
    }

    let delim = if language.is_rtl() { '،' } else { ',' };
    if !text.contains(delim) {
        return text.to_string();
    }

    let clauses: Vec<&str> = text
        .split(delim)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if clauses.len() < 2 {
        return text.to_string();
    }

    let markers: HashSet<&str> = if language.is_rtl() {
        URDU_VERB_MARKERS.iter().copied().collect()
    } else {
        ROMAN_VERB_MARKERS.iter().copied().collect()
    };
    let informative: Vec<bool> = clauses
        .iter()
        .map(|c| {
            c.split_whitespace()
                .any(|w| markers.contains(core_of(w).as_str()))
        })
        .collect();

    if informative.iter().all(|b| *b) || !informative.iter().any(|b| *b) {
        return text.to_string();
    }

    let kept: Vec<&str> = clauses
        .iter()
        .zip(&informative)
        .filter(|(_, keep)| **keep)
        .map(|(c, _)| *c)
        .collect();
    tracing::debug!("trimmed {} clause(s)", clauses.len() - kept.len());
    kept.join(&format!("{} ", delim))
}
