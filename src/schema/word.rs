/// Lexicon entries: the typed record of what a word knows about itself.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::category::LexicalCategory;
use crate::schema::feature::{Gender, Inflection, NumberAgreement, Person, PronounCase};

/// A lexicon entry. Shared (behind `Arc`) between the lexicon and every
/// element that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub base: String,
    pub category: LexicalCategory,
    #[serde(default)]
    pub id: Option<String>,

    // agreement-bearing properties
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub number: Option<NumberAgreement>,
    #[serde(default)]
    pub case: Option<PronounCase>,
    #[serde(default)]
    pub reflexive: bool,
    /// `y` / `en`: clitics with no person or case of their own.
    #[serde(default)]
    pub adverbial: bool,

    // lexical classes
    #[serde(default)]
    pub inflection: Inflection,
    #[serde(default)]
    pub proper: bool,
    #[serde(default)]
    pub animate: bool,
    #[serde(default)]
    pub copular: bool,
    /// Negative-polarity word (personne, rien, aucun, nobody …).
    #[serde(default)]
    pub negative: bool,
    #[serde(default)]
    pub aspirated_h: bool,
    /// French adjective placed before the noun.
    #[serde(default)]
    pub preposed: bool,
    /// French verb conjugated with être in compound tenses.
    #[serde(default)]
    pub auxiliary_etre: bool,
    /// French pronominal verb (se souvenir, se référer …).
    #[serde(default)]
    pub pronominal: bool,
    /// French conjugation group (1, 2 or 3); inferred from the ending when absent.
    #[serde(default)]
    pub group: Option<u8>,

    // spelled-out variants
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub feminine: Option<String>,
    #[serde(default)]
    pub feminine_plural: Option<String>,
    /// Pre-vocalic masculine form (beau → bel, ce → cet).
    #[serde(default)]
    pub liaison: Option<String>,
    #[serde(default)]
    pub past: Option<String>,
    #[serde(default)]
    pub past_participle: Option<String>,
    #[serde(default)]
    pub present_participle: Option<String>,
    #[serde(default)]
    pub present3s: Option<String>,
    #[serde(default)]
    pub comparative: Option<String>,
    #[serde(default)]
    pub superlative: Option<String>,
    #[serde(default)]
    pub future_radical: Option<String>,
    #[serde(default)]
    pub imperfect_radical: Option<String>,
    /// Irregular conjugated forms keyed `<tense>_<person><s|p>`, e.g. `present_1s`.
    #[serde(default)]
    pub forms: BTreeMap<String, String>,
}

impl WordEntry {
    pub fn new(base: impl Into<String>, category: LexicalCategory) -> Self {
        Self {
            base: base.into(),
            category,
            id: None,
            gender: None,
            person: None,
            number: None,
            case: None,
            reflexive: false,
            adverbial: false,
            inflection: Inflection::Regular,
            proper: false,
            animate: false,
            copular: false,
            negative: false,
            aspirated_h: false,
            preposed: false,
            auxiliary_etre: false,
            pronominal: false,
            group: None,
            plural: None,
            feminine: None,
            feminine_plural: None,
            liaison: None,
            past: None,
            past_participle: None,
            present_participle: None,
            present3s: None,
            comparative: None,
            superlative: None,
            future_radical: None,
            imperfect_radical: None,
            forms: BTreeMap::new(),
        }
    }

    /// Irregular form stored under `key`, if any.
    pub fn form(&self, key: &str) -> Option<&str> {
        self.forms.get(key).map(String::as_str)
    }

    pub fn is(&self, base: &str) -> bool {
        self.base == base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_entry_with_defaults() {
        let src = r#"#![enable(implicit_some)]
            (base: "aller", category: Verb, auxiliary_etre: true,
             forms: {"present_1s": "vais"}, future_radical: "ir")"#;
        let entry: WordEntry = ron::from_str(src).unwrap();
        assert_eq!(entry.base, "aller");
        assert!(entry.auxiliary_etre);
        assert_eq!(entry.form("present_1s"), Some("vais"));
        assert_eq!(entry.future_radical.as_deref(), Some("ir"));
        assert_eq!(entry.inflection, Inflection::Regular);
        assert!(entry.plural.is_none());
    }
}
