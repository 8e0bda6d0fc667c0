//! Script-range and keyword heuristics for Urdu / Punjabi / Roman Urdu.
//!
//! Pure and deterministic: ambiguity degrades to `Unknown`, never to an error.
//! Ties between the Arabic-script languages resolve to Urdu, the more common
//! case. The keyword lists are tunable heuristics, not a contract.

use shared::types::Language;
use std::collections::HashSet;

/// Characters specific to Urdu orthography, rare in Punjabi Shahmukhi.
const URDU_SPECIFIC: &[char] = &['ٹ', 'ڈ', 'ڑ', 'ے', 'ۓ'];

/// Shahmukhi function words that mark Punjabi rather than Urdu.
const PUNJABI_SHAHMUKHI_TOKENS: &[&str] = &["نوں", "وچ", "تسی", "ساڈے", "تہاڈا", "کیویں"];

/// Common Roman-Urdu tokens (transliterated function words and everyday
/// vocabulary). Very common English words are deliberately left out so plain
/// English text does not trip the threshold.
const ROMAN_URDU_WORDS: &[&str] = &[
    "hai", "hain", "ho", "tha", "thi", "tho", "kya", "kia", "kyun", "kyon", "kaisa", "kaise",
    "mein", "main", "hum", "tum", "aap", "ap", "acha", "achchha", "theek", "thik", "nahi",
    "nahin", "mat", "aur", "ya", "lekin", "magar", "se", "ko", "ka", "ki", "ke", "ne", "pe",
    "woh", "wo", "yeh", "ye", "ab", "jab", "tab", "kab", "phir", "fir", "bahut", "bohot",
    "bohat", "zyada", "ziada", "sab", "kuch", "koi", "kaun", "kon", "wala", "wali", "wale",
    "raha", "rahi", "rahe", "rhe", "kar", "karo", "karna", "karein", "jao", "jana", "chalo",
    "chalna", "bolo", "bolna", "kaho", "kehna", "dekho", "dekhna", "suno", "sunna", "khaana",
    "khana", "peena", "pina", "ghar", "kaam", "kam", "pyaar", "pyar", "mohabbat", "dost",
    "bhai", "behen", "behan", "shukriya", "meherbani", "khuda", "allah", "inshallah",
    "mashallah", "subhanallah", "assalam", "walaikum", "khudahafiz", "bilkul", "zaroor",
    "shayad",
];

/// Roman Punjabi tokens, distinct from the Urdu set.
const PUNJABI_ROMAN_WORDS: &[&str] = &[
    "kiven", "kiddan", "kithe", "kithon", "hun", "ohna", "ehna", "tuhada", "sadda", "munda",
    "kudi", "kudiye", "chal", "changa", "changey", "vadiya", "wadiya", "paaji", "paji",
    "veere", "veer", "bhaji", "bhabhi", "tayi", "chacha", "sat", "sri", "akal", "waheguru",
    "oye", "yaar", "yaara", "gaddi", "gadi", "lassi", "makki", "roti", "jatt", "jatti",
    "gabru", "punjab", "lahore", "amritsar", "bhangra", "gidda",
];

fn is_arabic_script(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{FB50}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}')
}

fn is_gurmukhi(c: char) -> bool {
    matches!(c, '\u{0A00}'..='\u{0A7F}')
}

/// Detect the language of `text`. Empty or whitespace-only input is `Unknown`.
pub fn detect(text: &str) -> Language {
    detect_with_confidence(text).0
}

/// Detection plus a heuristic confidence score, used for logging only.
pub fn detect_with_confidence(text: &str) -> (Language, f32) {
    let text = text.trim();
    if text.is_empty() {
        return (Language::Unknown, 0.0);
    }

    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return (Language::Unknown, 0.0);
    }

    let arabic_count = chars.iter().filter(|c| is_arabic_script(**c)).count();
    let arabic_ratio = arabic_count as f32 / chars.len() as f32;

    if arabic_ratio > 0.5 {
        return detect_urdu_or_punjabi(text, arabic_ratio);
    }

    if chars.iter().any(|c| is_gurmukhi(*c)) {
        return (Language::Punjabi, 0.9);
    }

    detect_roman(text)
}

fn detect_urdu_or_punjabi(text: &str, arabic_ratio: f32) -> (Language, f32) {
    // Whole-word match: some markers appear as letter sequences inside
    // ordinary Urdu words.
    let has_punjabi_marker = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|w| PUNJABI_SHAHMUKHI_TOKENS.contains(&w));
    if has_punjabi_marker {
        return (Language::Punjabi, 0.9);
    }

    let urdu_specific = text.chars().filter(|c| URDU_SPECIFIC.contains(c)).count();
    if urdu_specific > 0 {
        return (Language::Urdu, (arabic_ratio + 0.1).min(0.95));
    }

    // Arabic script with no distinguishing marker: Urdu by default.
    (Language::Urdu, arabic_ratio)
}

fn detect_roman(text: &str) -> (Language, f32) {
    let words: HashSet<String> = text
        .split_whitespace()
        .map(|w| {
            w.to_lowercase()
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return (Language::Unknown, 0.0);
    }

    let urdu_matches = words
        .iter()
        .filter(|w| ROMAN_URDU_WORDS.contains(&w.as_str()))
        .count();
    let punjabi_matches = words
        .iter()
        .filter(|w| PUNJABI_ROMAN_WORDS.contains(&w.as_str()))
        .count();

    let total = words.len() as f32;
    let urdu_ratio = urdu_matches as f32 / total;
    let punjabi_ratio = punjabi_matches as f32 / total;

    if punjabi_ratio > urdu_ratio && punjabi_ratio > 0.1 {
        return (Language::Punjabi, (punjabi_ratio * 2.0).min(0.8));
    }

    if urdu_ratio > 0.1 || urdu_matches >= 2 {
        return (Language::RomanUrdu, (urdu_ratio * 2.0 + 0.3).min(0.85));
    }

    if urdu_matches > 0 || punjabi_matches > 0 {
        return (Language::RomanUrdu, 0.5);
    }

    // Plain Latin text with no curated tokens: not a language we handle.
    (Language::Unknown, 0.0)
}
