use crate::core::orthography::{replace_text, OrthographyRules, Token};

#[derive(Debug, Default)]
pub struct EnglishOrthography;

/// Words spelled with a vowel but spoken with a consonant, and the reverse.
const CONSONANT_SOUND: [&str; 9] = ["uni", "use", "usu", "ura", "ure", "one", "once", "eu", "ewe"];
const VOWEL_SOUND: [&str; 5] = ["hour", "honest", "honour", "honor", "heir"];

/// Whether a word is spoken starting with a vowel ("an hour", "a union").
pub fn vowel_sound(word: &str) -> bool {
    let word = word.to_lowercase();
    if VOWEL_SOUND.iter().any(|p| word.starts_with(p)) {
        return true;
    }
    if CONSONANT_SOUND.iter().any(|p| word.starts_with(p)) {
        return false;
    }
    if word.starts_with('8') || word.starts_with("11") || word.starts_with("18") {
        return true;
    }
    matches!(word.chars().next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

impl OrthographyRules for EnglishOrthography {
    fn adjust(&self, left: &mut Token, right: &mut Token) {
        if right.is_punctuation() {
            return;
        }
        let article = match left.lowercase().as_str() {
            "a" if vowel_sound(&right.text) => "an",
            "an" if !vowel_sound(&right.text) => "a",
            _ => return,
        };
        tracing::trace!("indefinite article '{}' before '{}'", article, right.text);
        replace_text(left, article);
    }
}
