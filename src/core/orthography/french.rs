/// French morphophonology: elision, preposition + article contraction and
/// the liaison forms of determiners and adjectives.
use crate::core::morphology::is_vowel;
use crate::core::orthography::{replace_text, OrthographyRules, Token};
use crate::schema::category::LexicalCategory;

#[derive(Debug, Default)]
pub struct FrenchOrthography;

const ELIDING: [&str; 9] = ["le", "la", "de", "que", "ne", "me", "te", "se", "je"];

/// Starts with a vowel or a mute h.
fn vowel_initial(token: &Token) -> bool {
    let aspirated = token.origin.as_ref().map(|o| o.aspirated_h).unwrap_or(false);
    match token.text.chars().next() {
        Some('h' | 'H') => !aspirated,
        Some(c) => is_vowel(c),
        None => false,
    }
}

fn elides(left: &Token, right: &Token) -> bool {
    if left.elided || left.hyphenated() || right.hyphenated() || right.is_punctuation() {
        return false;
    }
    if !vowel_initial(right) {
        return false;
    }
    let word = left.lowercase();
    match word.as_str() {
        w if ELIDING.contains(&w) => true,
        // "ce" the determiner takes "cet" instead
        "ce" => left.category() != Some(LexicalCategory::Determiner),
        // s'il, s'ils; but "si elle"
        "si" => matches!(right.lowercase().as_str(), "il" | "ils"),
        _ => false,
    }
}

fn elide(token: &mut Token) {
    let mut text: String = token.text.clone();
    text.pop();
    text.push('\'');
    tracing::trace!("elided '{}' to '{}'", token.text, text);
    token.text = text;
    token.elided = true;
}

/// de + le → du, à + les → aux; de + des → de.
fn contraction(left: &Token, right: &Token) -> Option<&'static str> {
    if right.elided || right.category() != Some(LexicalCategory::Determiner) {
        return None;
    }
    let base = right.origin.as_ref().map(|o| o.base.as_str());
    let contracted = match (left.lowercase().as_str(), right.lowercase().as_str(), base) {
        ("de", "le", Some("le")) => "du",
        ("de", "les", Some("le")) => "des",
        ("à", "le", Some("le")) => "au",
        ("à", "les", Some("le")) => "aux",
        ("de", "des", Some("un" | "du")) => "de",
        _ => return None,
    };
    Some(contracted)
}

/// ce → cet, beau → bel, ma → mon before a vowel.
fn liaison_form(left: &Token) -> Option<String> {
    let origin = left.origin.as_ref()?;
    if let (Some(liaison), true) = (&origin.liaison, left.is_base_form()) {
        return Some(liaison.clone());
    }
    if origin.category != LexicalCategory::Determiner {
        return None;
    }
    match left.lowercase().as_str() {
        "ma" => Some("mon".into()),
        "ta" => Some("ton".into()),
        "sa" => Some("son".into()),
        _ => None,
    }
}

impl OrthographyRules for FrenchOrthography {
    fn adjust(&self, left: &mut Token, right: &mut Token) {
        if let Some(contracted) = contraction(left, right) {
            tracing::trace!("contracted '{} {}' to '{}'", left.text, right.text, contracted);
            replace_text(left, contracted);
            right.text.clear();
            return;
        }
        if elides(left, right) {
            elide(left);
            return;
        }
        if vowel_initial(right) && !right.is_punctuation() {
            if let Some(form) = liaison_form(left) {
                tracing::trace!("liaison form '{}' for '{}'", form, left.text);
                replace_text(left, &form);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::feature::{Feature, Gender};
    use crate::schema::language::Language;
    use crate::schema::word::WordEntry;
    use std::sync::Arc;

    fn token(text: &str, origin: Option<(&str, LexicalCategory)>) -> Token {
        let mut t = Token::new(text, Language::French);
        if let Some((base, category)) = origin {
            t.origin = Some(Arc::new(WordEntry::new(base, category)));
        }
        t
    }

    fn run(mut left: Token, mut right: Token) -> (Token, Token) {
        FrenchOrthography.adjust(&mut left, &mut right);
        (left, right)
    }

    #[test]
    fn elision_before_vowel_and_mute_h() {
        let (l, _) = run(token("le", Some(("le", LexicalCategory::Determiner))), token("homme", None));
        assert_eq!(l.text, "l'");
        assert!(l.elided);
        let (l, _) = run(token("que", None), token("il", None));
        assert_eq!(l.text, "qu'");
        let (l, _) = run(token("si", None), token("il", None));
        assert_eq!(l.text, "s'");
        let (l, _) = run(token("si", None), token("elle", None));
        assert_eq!(l.text, "si");
    }

    #[test]
    fn aspirated_h_blocks_elision() {
        let mut heros = WordEntry::new("héros", LexicalCategory::Noun);
        heros.aspirated_h = true;
        let right = token("héros", None).with_origin(Arc::new(heros));
        let (l, _) = run(token("le", Some(("le", LexicalCategory::Determiner))), right);
        assert_eq!(l.text, "le");
    }

    #[test]
    fn contractions() {
        let le = || token("le", Some(("le", LexicalCategory::Determiner)));
        let les = || token("les", Some(("le", LexicalCategory::Determiner)));
        let (l, r) = run(token("de", None), le());
        assert_eq!((l.text.as_str(), r.text.as_str()), ("du", ""));
        let (l, _) = run(token("à", None), les());
        assert_eq!(l.text, "aux");
        let (l, _) = run(token("À", None), le());
        assert_eq!(l.text, "Au");
        // the clitic pronoun never contracts
        let (l, r) = run(token("à", None), token("le", Some(("le", LexicalCategory::Pronoun))));
        assert_eq!((l.text.as_str(), r.text.as_str()), ("à", "le"));
    }

    #[test]
    fn liaison_forms() {
        let mut ce = WordEntry::new("ce", LexicalCategory::Determiner);
        ce.liaison = Some("cet".into());
        let (l, _) = run(token("ce", None).with_origin(Arc::new(ce)), token("arbre", None));
        assert_eq!(l.text, "cet");
        let (l, _) = run(token("ma", Some(("mon", LexicalCategory::Determiner))), token("amie", None));
        assert_eq!(l.text, "mon");
        let mut beau = WordEntry::new("beau", LexicalCategory::Adjective);
        beau.liaison = Some("bel".into());
        let mut feminine = token("belle", None).with_origin(Arc::new(beau));
        feminine.features.set(Feature::Gender, Gender::Feminine);
        let (l, _) = run(feminine, token("amie", None));
        assert_eq!(l.text, "belle");
    }

    #[test]
    fn hyphenated_ce_keeps_its_vowel() {
        let mut ce = token("ce", None);
        ce.features.set(Feature::Hyphenated, true);
        let (l, _) = run(token("est", None), ce);
        assert_eq!(l.text, "est");
        let (l, _) = run(token("que", Some(("que", LexicalCategory::Pronoun))), token("est", None));
        assert_eq!(l.text, "qu'");
    }
}
