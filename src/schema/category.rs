/// Lexical, phrasal and structural categories.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Part of speech of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalCategory {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Complementiser,
    Modal,
    Symbol,
    Any,
}

/// Category of a phrase element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhraseCategory {
    Clause,
    NounPhrase,
    VerbPhrase,
    AdjectivePhrase,
    AdverbPhrase,
    PrepositionalPhrase,
    CannedText,
}

/// Structural units above the clause. Only the parts a sentence realiser
/// needs are modelled; layout belongs to the caller's formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Document,
    Paragraph,
    Sentence,
}

/// The category of any element, split by namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Lexical(LexicalCategory),
    Phrase(PhraseCategory),
    Document(DocumentKind),
    Coordination,
    List,
}

impl Category {
    /// Identity test within the matching namespace. `Any` matches every
    /// lexical category but nothing outside the lexical namespace.
    pub fn is_a(self, other: Category) -> bool {
        match (self, other) {
            (Category::Lexical(_), Category::Lexical(LexicalCategory::Any)) => true,
            (Category::Lexical(a), Category::Lexical(b)) => a == b,
            (Category::Phrase(a), Category::Phrase(b)) => a == b,
            (Category::Document(a), Category::Document(b)) => a == b,
            (Category::Coordination, Category::Coordination) => true,
            (Category::List, Category::List) => true,
            _ => false,
        }
    }

    pub fn lexical(self) -> Option<LexicalCategory> {
        match self {
            Category::Lexical(c) => Some(c),
            _ => None,
        }
    }

    pub fn phrase(self) -> Option<PhraseCategory> {
        match self {
            Category::Phrase(c) => Some(c),
            _ => None,
        }
    }
}

impl From<LexicalCategory> for Category {
    fn from(c: LexicalCategory) -> Self {
        Category::Lexical(c)
    }
}

impl From<PhraseCategory> for Category {
    fn from(c: PhraseCategory) -> Self {
        Category::Phrase(c)
    }
}

impl From<DocumentKind> for Category {
    fn from(c: DocumentKind) -> Self {
        Category::Document(c)
    }
}

impl fmt::Display for LexicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexicalCategory::Noun => "noun",
            LexicalCategory::Verb => "verb",
            LexicalCategory::Adjective => "adjective",
            LexicalCategory::Adverb => "adverb",
            LexicalCategory::Pronoun => "pronoun",
            LexicalCategory::Determiner => "determiner",
            LexicalCategory::Preposition => "preposition",
            LexicalCategory::Conjunction => "conjunction",
            LexicalCategory::Complementiser => "complementiser",
            LexicalCategory::Modal => "modal",
            LexicalCategory::Symbol => "symbol",
            LexicalCategory::Any => "any",
        };
        f.write_str(name)
    }
}

impl fmt::Display for PhraseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhraseCategory::Clause => "clause",
            PhraseCategory::NounPhrase => "noun phrase",
            PhraseCategory::VerbPhrase => "verb phrase",
            PhraseCategory::AdjectivePhrase => "adjective phrase",
            PhraseCategory::AdverbPhrase => "adverb phrase",
            PhraseCategory::PrepositionalPhrase => "prepositional phrase",
            PhraseCategory::CannedText => "canned text",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lexical(c) => write!(f, "{}", c),
            Category::Phrase(c) => write!(f, "{}", c),
            Category::Document(c) => write!(f, "{:?}", c),
            Category::Coordination => f.write_str("coordination"),
            Category::List => f.write_str("list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_a_respects_namespace() {
        let noun = Category::Lexical(LexicalCategory::Noun);
        assert!(noun.is_a(LexicalCategory::Noun.into()));
        assert!(noun.is_a(LexicalCategory::Any.into()));
        assert!(!noun.is_a(PhraseCategory::NounPhrase.into()));
        assert!(!Category::Phrase(PhraseCategory::Clause).is_a(LexicalCategory::Any.into()));
    }

    #[test]
    fn namespace_projections() {
        assert_eq!(
            Category::Phrase(PhraseCategory::VerbPhrase).phrase(),
            Some(PhraseCategory::VerbPhrase)
        );
        assert_eq!(Category::List.lexical(), None);
    }
}
