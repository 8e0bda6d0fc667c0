//! Static simplification rule tables, one per supported language.
//!
//! Built once at startup and shared read-only. The tables are curated so the
//! pipeline stays idempotent and never grows the text:
//! - no replacement value is itself a key (no rule re-triggers another),
//! - every value is equal-or-shorter than its key.

use shared::types::Language;

/// Roman Urdu: complex or English loanwords to everyday Roman Urdu.
const ROMAN_PAIRS: &[(&str, &str)] = &[
    ("definitely", "zaroor"),
    ("absolutely", "bilkul"),
    ("approximately", "lagbhag"),
    ("taqreeban", "lagbhag"),
    ("however", "lekin"),
    ("moreover", "aur"),
    ("nevertheless", "phir bhi"),
    ("therefore", "isliye"),
    ("lehaza", "isliye"),
    ("impossible", "namumkin"),
    ("excellent", "acha"),
    ("wonderful", "acha"),
    ("information", "jaankari"),
    ("maloomat", "jaankari"),
    ("education", "parhai"),
    ("taleem", "parhai"),
    ("immediately", "abhi"),
    ("foran", "abhi"),
    ("currently", "abhi"),
    ("filhaal", "abhi"),
    ("perhaps", "shayad"),
    ("probably", "shayad"),
    ("difficult", "mushkil"),
    ("dushwar", "mushkil"),
    ("purchase", "kharidna"),
    ("beautiful", "khubsurat"),
    ("extremely", "bohat"),
    ("intehai", "bohat"),
    ("available", "milta hai"),
    ("understand", "samajhna"),
    ("comprehend", "samajhna"),
    ("significant", "ahem"),
    ("important", "zaroori"),
    ("essential", "zaroori"),
    ("necessary", "zaroori"),
    ("conversation", "baat cheet"),
    ("guftagu", "baat"),
    ("circumstances", "halaat"),
    ("situation", "haalat"),
    ("opportunity", "mauka"),
    ("sufficient", "kaafi"),
    ("adequate", "kaafi"),
    ("previously", "pehle"),
    ("subsequently", "baad mein"),
    ("assistance", "madad"),
    ("assist", "madad"),
    ("require", "chahiye"),
    ("additional", "aur"),
    ("mazeed", "aur"),
    ("different", "alag"),
    ("mukhtalif", "alag"),
    ("particular", "khaas"),
    ("specific", "khaas"),
    ("makhsoos", "khaas"),
    ("consider", "sochna"),
    ("contemplate", "sochna"),
    ("is waqt", "abhi"),
    ("kis tarah", "kaise"),
];

/// Urdu: literary or formal vocabulary to everyday words.
const URDU_PAIRS: &[(&str, &str)] = &[
    ("بہترین", "اچھا"),
    ("شاندار", "اچھا"),
    ("عمدہ", "اچھا"),
    ("ممتاز", "اچھا"),
    ("اہم", "ضروری"),
    ("دشوار", "مشکل"),
    ("صعوبت", "مشکل"),
    ("سہل", "آسان"),
    ("تصور", "خیال"),
    ("مطالعہ", "پڑھنا"),
    ("معلومات", "جانکاری"),
    ("واضح", "صاف"),
    ("مکمل", "پورا"),
    ("لہٰذا", "اس لیے"),
    ("تاہم", "مگر"),
    ("البتہ", "مگر"),
    ("باوجود", "پھر بھی"),
    ("فوری", "ابھی"),
    ("تقریباً", "لگ بھگ"),
    ("یقیناً", "ضرور"),
    ("انتہائی", "بہت"),
    ("خصوصی", "خاص"),
    ("مخصوص", "خاص"),
    ("عمومی", "عام"),
    ("مقام", "جگہ"),
    ("علاقہ", "جگہ"),
    ("خوبصورت", "پیاری"),
    ("حسین", "پیاری"),
];

/// Punjabi overrides on top of the Urdu table (shared vocabulary, Punjabi
/// everyday forms). Applied as rewrites so chains stay closed.
const PUNJABI_OVERRIDES: &[(&str, &str)] = &[
    ("مشکل", "اوکھا"),
    ("آسان", "سوکھا"),
    ("خوبصورت", "سوہنا"),
    ("حسین", "سوہنا"),
    ("ضروری", "لازمی"),
    ("بہت", "بوہت"),
];

/// Emphasis words whose immediate repetition is redundant.
pub const EMPHASIS_WORDS: &[&str] = &[
    "zaroor", "bilkul", "bohat", "bohot", "bahut", "very", "really", "بہت", "بوہت", "ضرور",
    "بالکل",
];

/// Filler intensifiers that add nothing when their same-meaning partner is
/// already in the sentence.
pub const REDUNDANT_PAIRS: &[(&str, &str)] = &[
    ("definitely", "zaroor"),
    ("certainly", "zaroor"),
    ("surely", "zaroor"),
    ("absolutely", "bilkul"),
    ("really", "bohat"),
    ("very", "bohat"),
];

/// One language's ordered phrase table, longest key first so overlapping
/// patterns resolve to the longest match.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<(String, String)>,
}

impl RuleTable {
    fn new(pairs: Vec<(String, String)>) -> Self {
        let mut rules = pairs;
        rules.sort_by(|a, b| {
            let tokens_a = a.0.split_whitespace().count();
            let tokens_b = b.0.split_whitespace().count();
            tokens_b
                .cmp(&tokens_a)
                .then(b.0.chars().count().cmp(&a.0.chars().count()))
                .then(a.0.cmp(&b.0))
        });
        Self { rules }
    }

    fn from_static(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    pub fn rules(&self) -> &[(String, String)] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// All rule tables, built once and shared by reference.
#[derive(Debug)]
pub struct RuleSet {
    urdu: RuleTable,
    punjabi: RuleTable,
    roman: RuleTable,
}

impl RuleSet {
    pub fn builtin() -> Self {
        Self {
            urdu: RuleTable::from_static(URDU_PAIRS),
            punjabi: RuleTable::new(punjabi_pairs()),
            roman: RuleTable::from_static(ROMAN_PAIRS),
        }
    }

    /// Table for a detected language. `Unknown` has none: wrong-language
    /// substitutions are worse than no substitutions.
    pub fn table(&self, language: Language) -> Option<&RuleTable> {
        match language {
            Language::Urdu => Some(&self.urdu),
            Language::Punjabi => Some(&self.punjabi),
            Language::RomanUrdu => Some(&self.roman),
            Language::Unknown => None,
        }
    }
}

/// Punjabi table: Urdu pairs with the Punjabi overrides folded in. Override
/// values also rewrite matching Urdu values so no pass output re-triggers.
fn punjabi_pairs() -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = URDU_PAIRS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for (key, value) in PUNJABI_OVERRIDES {
        for (_, v) in pairs.iter_mut() {
            if v == key {
                *v = value.to_string();
            }
        }
        if let Some(pair) = pairs.iter_mut().find(|(k, _)| k == key) {
            pair.1 = value.to_string();
        } else {
            pairs.push((key.to_string(), value.to_string()));
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_longest_match_ordering() {
        let rules = RuleSet::builtin();
        let roman = rules.table(Language::RomanUrdu).unwrap();
        let first = &roman.rules()[0].0;
        assert!(first.split_whitespace().count() > 1, "multi-word keys sort first");
    }

    #[test]
    fn test_unknown_has_no_table() {
        let rules = RuleSet::builtin();
        assert!(rules.table(Language::Unknown).is_none());
    }

    #[test]
    fn test_no_value_is_a_key() {
        // A value that is also a key would make a second pass re-trigger.
        let rules = RuleSet::builtin();
        for lang in [Language::Urdu, Language::Punjabi, Language::RomanUrdu] {
            let table = rules.table(lang).unwrap();
            let keys: HashSet<&str> = table.rules().iter().map(|(k, _)| k.as_str()).collect();
            for (_, value) in table.rules() {
                assert!(
                    !keys.contains(value.as_str()),
                    "{:?}: value {:?} is also a key",
                    lang,
                    value
                );
            }
        }
    }

    #[test]
    fn test_values_never_longer_than_keys() {
        let rules = RuleSet::builtin();
        let roman = rules.table(Language::RomanUrdu).unwrap();
        for (key, value) in roman.rules() {
            assert!(
                value.chars().count() <= key.chars().count(),
                "{:?} -> {:?} expands",
                key,
                value
            );
        }
    }

    #[test]
    fn test_punjabi_inherits_and_overrides() {
        let rules = RuleSet::builtin();
        let punjabi = rules.table(Language::Punjabi).unwrap();
        // Override applies to the shared key...
        assert!(punjabi
            .rules()
            .iter()
            .any(|(k, v)| k == "خوبصورت" && v == "سوہنا"));
        // ...and rewrites Urdu values that would otherwise chain into it.
        assert!(punjabi
            .rules()
            .iter()
            .any(|(k, v)| k == "دشوار" && v == "اوکھا"));
        // Untouched Urdu entries carry over.
        assert!(punjabi.rules().iter().any(|(k, v)| k == "تاہم" && v == "مگر"));
    }
}
