/// Phrase factory. Builds element trees for one language from base forms.
///
/// A factory owns the `ElementTree` it builds and dereferences to it, so
/// the arena's slot setters are available for anything the shortcuts
/// here do not cover.
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::core::lexicon::Lexicon;
use crate::schema::category::{DocumentKind, LexicalCategory, PhraseCategory};
use crate::schema::element::{ElementId, ElementKind, ElementTree};
use crate::schema::feature::{DiscourseFunction, Feature};
use crate::schema::language::Language;

pub struct Factory {
    lexicon: Arc<dyn Lexicon>,
    tree: ElementTree,
}

impl Factory {
    pub fn new(language: Language, lexicon: Arc<dyn Lexicon>) -> Self {
        Self {
            lexicon,
            tree: ElementTree::new(language),
        }
    }

    pub fn language(&self) -> Language {
        self.tree.language()
    }

    pub fn lexicon(&self) -> &dyn Lexicon {
        self.lexicon.as_ref()
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn into_tree(self) -> ElementTree {
        self.tree
    }

    /// A lexicon word, made up as a regular entry when unknown.
    pub fn word(&mut self, base: &str, category: LexicalCategory) -> ElementId {
        let entry = self.lexicon.lookup_word(base, Some(category));
        self.tree.insert_word(entry)
    }

    /// Literal text, passed through morphology unchanged.
    pub fn string(&mut self, text: &str) -> ElementId {
        self.tree.insert_string(text)
    }

    pub fn canned_text(&mut self, text: &str) -> ElementId {
        let phrase = self.tree.insert_phrase(PhraseCategory::CannedText);
        let head = self.tree.insert_string(text);
        self.tree.set_head(phrase, head);
        phrase
    }

    /// "the woman", "a book", "Mary" (empty specifier). The noun may carry
    /// adjectives before it: "the old man".
    pub fn noun_phrase(&mut self, specifier: &str, noun: &str) -> ElementId {
        let np = self.tree.insert_phrase(PhraseCategory::NounPhrase);
        let mut words: Vec<&str> = noun.split_whitespace().collect();
        let head = words.pop().unwrap_or_default();
        let head = self.word(head, LexicalCategory::Noun);
        self.tree.set_head(np, head);
        for adjective in words {
            let adjective = self.adjective_phrase(adjective);
            self.tree.add_premodifier(np, adjective);
        }
        if !specifier.trim().is_empty() {
            let determiner = self.word(specifier.trim(), LexicalCategory::Determiner);
            self.tree.set_specifier(np, determiner);
        }
        np
    }

    /// A noun phrase headed by a pronoun ("she", "je").
    pub fn pronoun(&mut self, base: &str) -> ElementId {
        let np = self.tree.insert_phrase(PhraseCategory::NounPhrase);
        let head = self.word(base, LexicalCategory::Pronoun);
        self.tree.set_head(np, head);
        np
    }

    /// "chase"; "pick up" keeps its particle apart from the head verb.
    pub fn verb_phrase(&mut self, verb: &str) -> ElementId {
        let vp = self.tree.insert_phrase(PhraseCategory::VerbPhrase);
        let mut parts = verb.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let head = self.word(head, LexicalCategory::Verb);
        self.tree.set_head(vp, head);
        let particle: Vec<&str> = parts.collect();
        if !particle.is_empty() {
            self.tree.set(vp, Feature::Particle, particle.join(" "));
        }
        vp
    }

    /// Subject, verb and optional direct object.
    pub fn clause(
        &mut self,
        subject: impl Into<Option<ElementId>>,
        verb: &str,
        object: impl Into<Option<ElementId>>,
    ) -> ElementId {
        let vp = self.verb_phrase(verb);
        let clause = self.clause_with(vp);
        if let Some(subject) = subject.into() {
            self.set_subject(clause, subject);
        }
        if let Some(object) = object.into() {
            self.set_object(clause, object);
        }
        clause
    }

    /// A clause headed by an existing verb phrase or coordination of them.
    pub fn clause_with(&mut self, verb_phrase: ElementId) -> ElementId {
        let clause = self.tree.insert_phrase(PhraseCategory::Clause);
        self.tree.set_head(clause, verb_phrase);
        self.tree.set(verb_phrase, Feature::DiscourseFunction, DiscourseFunction::VerbPhrase);
        clause
    }

    pub fn adjective_phrase(&mut self, adjective: &str) -> ElementId {
        let phrase = self.tree.insert_phrase(PhraseCategory::AdjectivePhrase);
        let head = self.word(adjective, LexicalCategory::Adjective);
        self.tree.set_head(phrase, head);
        phrase
    }

    pub fn adverb_phrase(&mut self, adverb: &str) -> ElementId {
        let phrase = self.tree.insert_phrase(PhraseCategory::AdverbPhrase);
        let head = self.word(adverb, LexicalCategory::Adverb);
        self.tree.set_head(phrase, head);
        phrase
    }

    pub fn prepositional_phrase(&mut self, preposition: &str, object: ElementId) -> ElementId {
        let phrase = self.tree.insert_phrase(PhraseCategory::PrepositionalPhrase);
        let head = self.word(preposition, LexicalCategory::Preposition);
        self.tree.set_head(phrase, head);
        self.tree.set(object, Feature::DiscourseFunction, DiscourseFunction::Object);
        self.tree.add_complement(phrase, object);
        phrase
    }

    /// Coordination of `items`; the language's "and" unless a conjunction
    /// is given.
    pub fn coordinate(&mut self, items: &[ElementId], conjunction: Option<&str>) -> ElementId {
        let coordination = self.tree.insert_kind(ElementKind::Coordinated);
        self.tree.set_slot(coordination, Feature::Coordinates, items.to_vec());
        if let Some(conjunction) = conjunction {
            self.tree.set(coordination, Feature::Conjunction, conjunction);
        }
        coordination
    }

    fn document_of(&mut self, kind: DocumentKind, components: &[ElementId]) -> ElementId {
        let document = self.tree.insert_kind(ElementKind::Document(kind));
        self.tree.set_slot(document, Feature::Components, components.to_vec());
        document
    }

    pub fn sentence(&mut self, components: &[ElementId]) -> ElementId {
        self.document_of(DocumentKind::Sentence, components)
    }

    pub fn paragraph(&mut self, sentences: &[ElementId]) -> ElementId {
        self.document_of(DocumentKind::Paragraph, sentences)
    }

    pub fn document(&mut self, paragraphs: &[ElementId]) -> ElementId {
        self.document_of(DocumentKind::Document, paragraphs)
    }

    /// Replace the clause's subjects with one.
    pub fn set_subject(&mut self, clause: ElementId, subject: ElementId) {
        self.tree.set_slot(clause, Feature::Subjects, Vec::new());
        self.add_subject(clause, subject);
    }

    pub fn add_subject(&mut self, clause: ElementId, subject: ElementId) {
        self.tree
            .push_slot(clause, Feature::Subjects, subject, Some(DiscourseFunction::Subject));
    }

    fn set_argument(&mut self, clause: ElementId, argument: ElementId, function: DiscourseFunction) {
        let Some(vp) = self.tree.head(clause) else {
            tracing::warn!("clause #{} has no verb phrase, argument dropped", clause.0);
            return;
        };
        for old in self.tree.complements_with(vp, function) {
            self.tree.remove_from_slot(vp, Feature::Complements, old);
        }
        self.tree.set(argument, Feature::DiscourseFunction, function);
        self.tree.add_complement(vp, argument);
    }

    pub fn set_object(&mut self, clause: ElementId, object: ElementId) {
        self.set_argument(clause, object, DiscourseFunction::Object);
    }

    pub fn set_indirect_object(&mut self, clause: ElementId, object: ElementId) {
        self.set_argument(clause, object, DiscourseFunction::IndirectObject);
    }

    /// Attach `clause` to `np` as a relative clause whose gap plays
    /// `function` ("the man who kissed Mary", "the book that Mary read").
    pub fn relative_clause(&mut self, np: ElementId, clause: ElementId, function: DiscourseFunction) {
        self.tree.set(clause, Feature::RelativeFunction, function);
        self.tree.add_postmodifier(np, clause);
    }
}

impl Deref for Factory {
    type Target = ElementTree;

    fn deref(&self) -> &ElementTree {
        &self.tree
    }
}

impl DerefMut for Factory {
    fn deref_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::MemoryLexicon;

    fn factory() -> Factory {
        let lexicon = MemoryLexicon::builtin(Language::English).unwrap();
        Factory::new(Language::English, Arc::new(lexicon))
    }

    #[test]
    fn noun_phrase_slots() {
        let mut f = factory();
        let np = f.noun_phrase("the", "old man");
        assert_eq!(f.base_form(f.head(np).unwrap()), Some("man"));
        assert_eq!(f.base_form(f.specifier(np).unwrap()), Some("the"));
        assert_eq!(f.slot(np, Feature::Premodifiers).len(), 1);
        let bare = f.noun_phrase("", "Mary");
        assert!(f.specifier(bare).is_none());
    }

    #[test]
    fn verb_phrase_splits_particle() {
        let mut f = factory();
        let vp = f.verb_phrase("pick up");
        assert_eq!(f.base_form(f.head(vp).unwrap()), Some("pick"));
        assert_eq!(f.features(vp).text(Feature::Particle), Some("up"));
    }

    #[test]
    fn clause_arguments_take_functions() {
        let mut f = factory();
        let mary = f.noun_phrase("", "Mary");
        let george = f.noun_phrase("", "George");
        let clause = f.clause(mary, "chase", george);
        let vp = f.head(clause).unwrap();
        assert_eq!(f.slot(clause, Feature::Subjects), vec![mary]);
        assert_eq!(f.complements_with(vp, DiscourseFunction::Object), vec![george]);
        let book = f.noun_phrase("a", "book");
        f.set_object(clause, book);
        assert_eq!(f.complements_with(vp, DiscourseFunction::Object), vec![book]);
        assert_eq!(f.parent(book), Some(vp));
    }
}
