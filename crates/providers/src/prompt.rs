//! Prompt construction for the hosted simplifier.

use shared::types::Language;

/// Build the simplification prompt. The model must answer in the input's
/// language and output only the simplified text, no labels or quotes.
pub fn build_prompt(text: &str, language: Language) -> String {
    let hint = match language {
        Language::Unknown => String::new(),
        lang => format!(
            "The input is most likely {}; treat that as the language hint.\n\n",
            lang.display_name()
        ),
    };

    format!(
        "You are a multilingual text simplifier for Urdu, Punjabi (Shahmukhi), \
and Roman Urdu.\n\n{hint}SIMPLIFY the text by:\n\
- Keeping the EXACT same meaning\n\
- Replacing difficult words with simpler everyday words\n\
- Breaking long sentences into shorter, clearer ones\n\n\
RESPOND IN THE SAME LANGUAGE AND SCRIPT as the input.\n\n\
CRITICAL RULES:\n\
- Reply with ONLY the simplified text\n\
- Do NOT add explanations, labels, or quotes\n\
- Do NOT add any prefix like \"Simplified:\"\n\n\
Input text:\n{text}\n\nSimplified output:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_and_hint() {
        let p = build_prompt("Mausam bohat acha hai", Language::RomanUrdu);
        assert!(p.contains("Mausam bohat acha hai"));
        assert!(p.contains("Roman Urdu"));
    }

    #[test]
    fn test_unknown_language_has_no_hint() {
        let p = build_prompt("hello", Language::Unknown);
        assert!(!p.contains("language hint"));
        assert!(p.contains("hello"));
    }
}
