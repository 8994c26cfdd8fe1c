/// Orthography stage: adjacency rewrites between neighbouring words, then
/// linearisation into one trimmed string.
///
/// The rewrites run over pairs of tokens from right to left, so a word
/// that was already elided ("l'") is seen as such by the word before it
/// ("de l'homme", never "du homme").
pub mod english;
pub mod french;

use std::sync::Arc;

use crate::core::lexicon::Lexicon;
use crate::core::registry::HelperRegistry;
use crate::schema::category::LexicalCategory;
use crate::schema::element::{ElementId, ElementKind, ElementTree};
use crate::schema::feature::{Feature, FeatureMap, Gender};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

/// One surface word between morphology and the final string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    /// Attaches to the next token without a space.
    pub elided: bool,
    pub origin: Option<Arc<WordEntry>>,
    pub features: FeatureMap,
    pub language: Language,
}

impl Token {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            elided: false,
            origin: None,
            features: FeatureMap::new(),
            language,
        }
    }

    pub fn with_origin(mut self, origin: Arc<WordEntry>) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_punctuation(&self) -> bool {
        !self.text.is_empty()
            && self
                .text
                .chars()
                .all(|c| matches!(c, ',' | '.' | ';' | ':' | '!' | '?' | ')' | '…'))
    }

    /// Joined to the previous token with a hyphen ("est-ce").
    pub fn hyphenated(&self) -> bool {
        self.features.bool(Feature::Hyphenated)
    }

    pub fn lowercase(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn category(&self) -> Option<LexicalCategory> {
        self.origin.as_ref().map(|o| o.category)
    }

    /// Uninflected masculine singular form of its entry.
    pub fn is_base_form(&self) -> bool {
        let Some(origin) = &self.origin else {
            return false;
        };
        origin.base == self.text
            && self.features.gender() != Some(Gender::Feminine)
            && !self.features.is_plural()
    }

    pub fn starts_uppercase(&self) -> bool {
        self.text.chars().next().map(char::is_uppercase).unwrap_or(false)
    }
}

/// Copy `replacement` onto `token`, keeping an initial capital.
pub(crate) fn replace_text(token: &mut Token, replacement: &str) {
    let capital = token.starts_uppercase();
    token.text = if capital {
        capitalise(replacement)
    } else {
        replacement.to_string()
    };
}

/// Per-language rewrites of two adjacent tokens.
pub trait OrthographyRules: Send + Sync {
    fn adjust(&self, left: &mut Token, right: &mut Token);
}

/// Tokens for the string leaves produced by morphology.
pub fn tokens_from(tree: &ElementTree, leaves: &[ElementId]) -> Vec<Token> {
    leaves
        .iter()
        .filter_map(|id| {
            let element = tree.get(*id)?;
            match &element.kind {
                ElementKind::String {
                    text,
                    elided,
                    origin,
                } => Some(Token {
                    text: text.trim().to_string(),
                    elided: *elided,
                    origin: origin.clone(),
                    features: element.features.clone(),
                    language: tree.language_of(*id),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Run the pairwise rewrites, each pair under the left token's language.
pub fn apply(registry: &HelperRegistry, tokens: &mut [Token]) {
    let mut right = None;
    for left in (0..tokens.len()).rev() {
        if tokens[left].is_empty() {
            continue;
        }
        if let Some(r) = right {
            let (head, tail) = tokens.split_at_mut(r);
            let language = head[left].language;
            registry
                .orthography(language)
                .adjust(&mut head[left], &mut tail[0]);
        }
        right = Some(left);
    }
}

/// Single-spaced text: no space after elided forms or before punctuation,
/// a hyphen before hyphenated tokens.
pub fn linearise(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut glue = false;
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        if !out.is_empty() {
            if token.hyphenated() {
                out.push('-');
            } else if !glue && !token.is_punctuation() {
                out.push(' ');
            }
        }
        out.push_str(&token.text);
        glue = token.elided;
    }
    out.trim().to_string()
}

pub fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Sentence-level finish: capital first letter and a closing "." or "?".
/// Text that already ends in terminal punctuation keeps it.
pub fn finish_sentence(text: &str, interrogative: bool, capitalise_first: bool, punctuate: bool) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let mut out = if capitalise_first {
        capitalise(text)
    } else {
        text.to_string()
    };
    if punctuate && !out.ends_with(['.', '?', '!']) {
        out.push(if interrogative { '?' } else { '.' });
    }
    out
}

/// Split free text into tokens, recovering each word's entry from the
/// lexicon. Apostrophes end an elided token and trailing punctuation is
/// split off.
pub fn tokenise(text: &str, language: Language, lexicon: &dyn Lexicon) -> Vec<Token> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let trimmed = word.trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | ':' | '!' | '?'));
        let punctuation = &word[trimmed.len()..];
        let mut rest = trimmed;
        while let Some(i) = rest.find('\'') {
            let (elided, tail) = rest.split_at(i + 1);
            let mut token = Token::new(elided, language);
            token.elided = true;
            tokens.push(token);
            rest = tail;
        }
        if !rest.is_empty() {
            let mut token = Token::new(rest, language);
            token.origin = origin_of(lexicon, &rest.to_lowercase());
            tokens.push(token);
        }
        if !punctuation.is_empty() {
            tokens.push(Token::new(punctuation, language));
        }
    }
    tokens
}

/// Determiner reading first, so "le" before a noun contracts. Inflected
/// determiners ("les", "ma") resolve to their base entry.
fn origin_of(lexicon: &dyn Lexicon, word: &str) -> Option<Arc<WordEntry>> {
    let entries = lexicon.get_words(word, None);
    entries
        .iter()
        .find(|e| e.category == LexicalCategory::Determiner)
        .cloned()
        .or_else(|| {
            lexicon
                .get_words_by_form(word, Some(LexicalCategory::Determiner))
                .into_iter()
                .next()
        })
        .or_else(|| entries.first().cloned())
}

/// Re-apply the adjacency rules to already linear text.
pub fn respell(text: &str, language: Language, lexicon: &dyn Lexicon, registry: &HelperRegistry) -> String {
    let mut tokens = tokenise(text, language, lexicon);
    apply(registry, &mut tokens);
    linearise(&tokens)
}
