/// Element arena holding the phrase tree a realisation run operates on.
///
/// Elements live in a flat `Vec` and refer to each other by `ElementId`.
/// Parent links are plain indices used for navigation only.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::schema::category::{Category, DocumentKind, LexicalCategory, PhraseCategory};
use crate::schema::feature::{DiscourseFunction, Feature, FeatureMap, FeatureValue};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

/// Index of an element in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

static EMPTY_FEATURES: Lazy<FeatureMap> = Lazy::new(FeatureMap::new);

/// The variant part of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A lexicon word used as-is.
    Word(Arc<WordEntry>),
    /// A per-occurrence copy of a word carrying its own inflection features.
    InflectedWord(Arc<WordEntry>),
    /// Literal text. `elided` marks a form that attaches to the next word
    /// without a space (l', qu'); `origin` remembers the word it came from.
    String {
        text: String,
        elided: bool,
        origin: Option<Arc<WordEntry>>,
    },
    List(Vec<ElementId>),
    Phrase(PhraseCategory),
    Coordinated,
    Document(DocumentKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub features: FeatureMap,
    pub parent: Option<ElementId>,
    pub language: Option<Language>,
    pub realisation: Option<String>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            features: FeatureMap::new(),
            parent: None,
            language: None,
            realisation: None,
        }
    }

    pub fn category(&self) -> Category {
        match &self.kind {
            ElementKind::Word(entry) | ElementKind::InflectedWord(entry) => {
                Category::Lexical(entry.category)
            }
            ElementKind::String { origin, .. } => match origin {
                Some(entry) => Category::Lexical(entry.category),
                None => Category::Phrase(PhraseCategory::CannedText),
            },
            ElementKind::List(_) => Category::List,
            ElementKind::Phrase(cat) => Category::Phrase(*cat),
            ElementKind::Coordinated => Category::Coordination,
            ElementKind::Document(kind) => Category::Document(*kind),
        }
    }

    /// The lexicon entry behind a word, inflected word or derived string.
    pub fn entry(&self) -> Option<&Arc<WordEntry>> {
        match &self.kind {
            ElementKind::Word(entry) | ElementKind::InflectedWord(entry) => Some(entry),
            ElementKind::String { origin, .. } => origin.as_ref(),
            _ => None,
        }
    }
}

/// Arena owning every element of one phrase tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementTree {
    nodes: Vec<Element>,
    language: Language,
}

impl ElementTree {
    pub fn new(language: Language) -> Self {
        Self {
            nodes: Vec::new(),
            language,
        }
    }

    /// Language of the factory that owns this tree.
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len() as u32);
        self.nodes.push(element);
        id
    }

    pub fn insert_kind(&mut self, kind: ElementKind) -> ElementId {
        self.insert(Element::new(kind))
    }

    pub fn insert_phrase(&mut self, category: PhraseCategory) -> ElementId {
        self.insert_kind(ElementKind::Phrase(category))
    }

    pub fn insert_word(&mut self, entry: Arc<WordEntry>) -> ElementId {
        self.insert_kind(ElementKind::Word(entry))
    }

    pub fn insert_inflected(&mut self, entry: Arc<WordEntry>) -> ElementId {
        self.insert_kind(ElementKind::InflectedWord(entry))
    }

    pub fn insert_string(&mut self, text: impl Into<String>) -> ElementId {
        self.insert_kind(ElementKind::String {
            text: text.into(),
            elided: false,
            origin: None,
        })
    }

    /// Insert a list and adopt its items.
    pub fn insert_list(&mut self, items: Vec<ElementId>) -> ElementId {
        let id = self.insert_kind(ElementKind::List(items.clone()));
        for item in items {
            self.set_parent(item, id);
        }
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn kind(&self, id: ElementId) -> Option<&ElementKind> {
        self.get(id).map(|e| &e.kind)
    }

    /// Feature map of an element; a dangling id reads as an empty map.
    pub fn features(&self, id: ElementId) -> &FeatureMap {
        self.get(id).map(|e| &e.features).unwrap_or(&EMPTY_FEATURES)
    }

    pub fn features_mut(&mut self, id: ElementId) -> Option<&mut FeatureMap> {
        self.get_mut(id).map(|e| &mut e.features)
    }

    pub fn set(&mut self, id: ElementId, feature: Feature, value: impl Into<FeatureValue>) {
        if let Some(e) = self.get_mut(id) {
            e.features.set(feature, value);
        }
    }

    pub fn unset(&mut self, id: ElementId, feature: Feature) {
        if let Some(e) = self.get_mut(id) {
            e.features.remove(feature);
        }
    }

    pub fn bool(&self, id: ElementId, feature: Feature) -> bool {
        self.features(id).bool(feature)
    }

    pub fn category(&self, id: ElementId) -> Option<Category> {
        self.get(id).map(Element::category)
    }

    pub fn is_a(&self, id: ElementId, category: impl Into<Category>) -> bool {
        let category = category.into();
        self.category(id).map(|c| c.is_a(category)).unwrap_or(false)
    }

    pub fn phrase_category(&self, id: ElementId) -> Option<PhraseCategory> {
        match self.kind(id)? {
            ElementKind::Phrase(cat) => Some(*cat),
            _ => None,
        }
    }

    pub fn lexical_category(&self, id: ElementId) -> Option<LexicalCategory> {
        self.category(id).and_then(Category::lexical)
    }

    pub fn entry(&self, id: ElementId) -> Option<&Arc<WordEntry>> {
        self.get(id).and_then(Element::entry)
    }

    pub fn base_form(&self, id: ElementId) -> Option<&str> {
        self.entry(id).map(|e| e.base.as_str())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    pub fn set_parent(&mut self, child: ElementId, parent: ElementId) {
        if child == parent {
            return;
        }
        if let Some(e) = self.get_mut(child) {
            e.parent = Some(parent);
        }
    }

    /// Ancestors from the direct parent upwards. Bounded by the tree size
    /// so a malformed parent cycle cannot loop forever.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            if out.len() >= self.nodes.len() || out.contains(&p) {
                break;
            }
            out.push(p);
            current = self.parent(p);
        }
        out
    }

    /// Nearest ancestor (excluding `id`) of the given phrase category.
    pub fn ancestor_of(&self, id: ElementId, category: PhraseCategory) -> Option<ElementId> {
        self.ancestors(id)
            .into_iter()
            .find(|a| self.phrase_category(*a) == Some(category))
    }

    pub fn set_language(&mut self, id: ElementId, language: Language) {
        if let Some(e) = self.get_mut(id) {
            e.language = Some(language);
        }
    }

    /// Language of an element: its own, else the nearest ancestor's, else
    /// the tree's.
    pub fn language_of(&self, id: ElementId) -> Language {
        if let Some(lang) = self.get(id).and_then(|e| e.language) {
            return lang;
        }
        self.ancestors(id)
            .into_iter()
            .find_map(|a| self.get(a).and_then(|e| e.language))
            .unwrap_or(self.language)
    }

    pub fn realisation(&self, id: ElementId) -> Option<&str> {
        self.get(id).and_then(|e| e.realisation.as_deref())
    }

    pub fn set_realisation(&mut self, id: ElementId, text: String) {
        if let Some(e) = self.get_mut(id) {
            e.realisation = Some(text);
        }
    }

    // --- slots ---------------------------------------------------------

    pub fn head(&self, id: ElementId) -> Option<ElementId> {
        self.features(id).element(Feature::Head)
    }

    pub fn set_head(&mut self, phrase: ElementId, head: ElementId) {
        self.set(phrase, Feature::Head, head);
        self.set(head, Feature::DiscourseFunction, DiscourseFunction::Head);
        self.set_parent(head, phrase);
    }

    pub fn specifier(&self, id: ElementId) -> Option<ElementId> {
        self.features(id).element(Feature::Specifier)
    }

    pub fn set_specifier(&mut self, phrase: ElementId, specifier: ElementId) {
        self.set(phrase, Feature::Specifier, specifier);
        self.set(specifier, Feature::DiscourseFunction, DiscourseFunction::Specifier);
        self.set_parent(specifier, phrase);
    }

    pub fn slot(&self, id: ElementId, slot: Feature) -> Vec<ElementId> {
        self.features(id).elements(slot)
    }

    /// Append `child` to a list-valued slot, tagging its discourse function.
    pub fn push_slot(
        &mut self,
        phrase: ElementId,
        slot: Feature,
        child: ElementId,
        function: Option<DiscourseFunction>,
    ) {
        if let Some(fm) = self.features_mut(phrase) {
            fm.push_element(slot, child);
        }
        if let Some(function) = function {
            self.set(child, Feature::DiscourseFunction, function);
        }
        self.set_parent(child, phrase);
    }

    /// Replace the whole content of a list-valued slot.
    pub fn set_slot(&mut self, phrase: ElementId, slot: Feature, children: Vec<ElementId>) {
        for child in &children {
            self.set_parent(*child, phrase);
        }
        self.set(phrase, slot, children);
    }

    pub fn remove_from_slot(&mut self, phrase: ElementId, slot: Feature, child: ElementId) {
        let remaining: Vec<ElementId> = self
            .slot(phrase, slot)
            .into_iter()
            .filter(|c| *c != child)
            .collect();
        self.set(phrase, slot, remaining);
    }

    pub fn add_premodifier(&mut self, phrase: ElementId, child: ElementId) {
        self.push_slot(phrase, Feature::Premodifiers, child, Some(DiscourseFunction::PreModifier));
    }

    pub fn add_postmodifier(&mut self, phrase: ElementId, child: ElementId) {
        self.push_slot(phrase, Feature::Postmodifiers, child, Some(DiscourseFunction::PostModifier));
    }

    pub fn add_front_modifier(&mut self, phrase: ElementId, child: ElementId) {
        self.push_slot(phrase, Feature::FrontModifiers, child, Some(DiscourseFunction::FrontModifier));
    }

    pub fn add_complement(&mut self, phrase: ElementId, child: ElementId) {
        let function = self
            .features(child)
            .function()
            .unwrap_or(DiscourseFunction::Complement);
        self.push_slot(phrase, Feature::Complements, child, Some(function));
    }

    /// Complements of `phrase` carrying the given discourse function.
    pub fn complements_with(&self, phrase: ElementId, function: DiscourseFunction) -> Vec<ElementId> {
        self.slot(phrase, Feature::Complements)
            .into_iter()
            .filter(|c| self.features(*c).function() == Some(function))
            .collect()
    }

    /// Children in surface order, derived from the category and slots.
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        let Some(kind) = self.kind(id) else {
            return Vec::new();
        };
        match kind {
            ElementKind::List(items) => items.clone(),
            ElementKind::Coordinated => self.slot(id, Feature::Coordinates),
            ElementKind::Document(_) => self.slot(id, Feature::Components),
            ElementKind::Phrase(cat) => {
                let mut out = Vec::new();
                out.extend(self.features(id).element(Feature::CuePhrase));
                out.extend(self.slot(id, Feature::FrontModifiers));
                if *cat == PhraseCategory::Clause {
                    out.extend(self.slot(id, Feature::Premodifiers));
                    out.extend(self.slot(id, Feature::Subjects));
                } else {
                    out.extend(self.specifier(id));
                    out.extend(self.slot(id, Feature::Premodifiers));
                }
                out.extend(self.head(id));
                out.extend(self.slot(id, Feature::Complements));
                out.extend(self.slot(id, Feature::Postmodifiers));
                out
            }
            _ => Vec::new(),
        }
    }

    /// Best-effort surface text without running the pipeline: a settled
    /// realisation, else literal text, else base forms of the leaves.
    pub fn surface_text(&self, id: ElementId) -> String {
        if let Some(text) = self.realisation(id) {
            return text.to_string();
        }
        match self.kind(id) {
            Some(ElementKind::String { text, .. }) => text.clone(),
            Some(ElementKind::Word(entry)) | Some(ElementKind::InflectedWord(entry)) => {
                entry.base.clone()
            }
            Some(_) => self
                .children(id)
                .into_iter()
                .map(|c| self.surface_text(c))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            None => String::new(),
        }
    }

    /// String view of a feature: scalar values by name, elements by their
    /// surface text, lists joined with spaces.
    pub fn feature_text(&self, id: ElementId, feature: Feature) -> Option<String> {
        match self.features(id).get(feature)? {
            FeatureValue::Element(e) => Some(self.surface_text(*e)),
            FeatureValue::Elements(es) => Some(
                es.iter()
                    .map(|e| self.surface_text(*e))
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            other => other.surface_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(base: &str, cat: LexicalCategory) -> Arc<WordEntry> {
        Arc::new(WordEntry::new(base, cat))
    }

    #[test]
    fn phrase_children_follow_slot_order() {
        let mut tree = ElementTree::new(Language::English);
        let np = tree.insert_phrase(PhraseCategory::NounPhrase);
        let det = tree.insert_word(word("the", LexicalCategory::Determiner));
        let adj = tree.insert_word(word("red", LexicalCategory::Adjective));
        let noun = tree.insert_word(word("ball", LexicalCategory::Noun));
        tree.set_head(np, noun);
        tree.add_premodifier(np, adj);
        tree.set_specifier(np, det);
        assert_eq!(tree.children(np), vec![det, adj, noun]);
        assert_eq!(tree.parent(adj), Some(np));
        assert_eq!(tree.surface_text(np), "the red ball");
    }

    #[test]
    fn language_walks_parents_then_tree() {
        let mut tree = ElementTree::new(Language::English);
        let clause = tree.insert_phrase(PhraseCategory::Clause);
        let np = tree.insert_phrase(PhraseCategory::NounPhrase);
        tree.add_complement(clause, np);
        assert_eq!(tree.language_of(np), Language::English);
        tree.set_language(clause, Language::French);
        assert_eq!(tree.language_of(np), Language::French);
    }

    #[test]
    fn dangling_ids_degrade() {
        let tree = ElementTree::new(Language::English);
        let ghost = ElementId(99);
        assert!(tree.features(ghost).is_empty());
        assert!(tree.children(ghost).is_empty());
        assert_eq!(tree.surface_text(ghost), "");
        assert!(!tree.is_a(ghost, PhraseCategory::Clause));
    }

    #[test]
    fn parent_cycles_terminate() {
        let mut tree = ElementTree::new(Language::French);
        let a = tree.insert_phrase(PhraseCategory::NounPhrase);
        let b = tree.insert_phrase(PhraseCategory::NounPhrase);
        tree.set_parent(a, b);
        tree.set_parent(b, a);
        assert_eq!(tree.ancestors(a), vec![b, a]);
        assert_eq!(tree.language_of(a), Language::French);
    }

    #[test]
    fn feature_text_dispatches_by_variant() {
        let mut tree = ElementTree::new(Language::English);
        let vp = tree.insert_phrase(PhraseCategory::VerbPhrase);
        let adv = tree.insert_string("quickly");
        tree.add_premodifier(vp, adv);
        tree.set(vp, Feature::Modal, "can");
        assert_eq!(tree.feature_text(vp, Feature::Premodifiers).as_deref(), Some("quickly"));
        assert_eq!(tree.feature_text(vp, Feature::Modal).as_deref(), Some("can"));
        assert_eq!(tree.feature_text(vp, Feature::Tense), None);
    }

    #[test]
    fn complements_filtered_by_function() {
        let mut tree = ElementTree::new(Language::English);
        let vp = tree.insert_phrase(PhraseCategory::VerbPhrase);
        let obj = tree.insert_string("George");
        let io = tree.insert_string("Mary");
        tree.set(obj, Feature::DiscourseFunction, DiscourseFunction::Object);
        tree.set(io, Feature::DiscourseFunction, DiscourseFunction::IndirectObject);
        tree.add_complement(vp, obj);
        tree.add_complement(vp, io);
        assert_eq!(tree.complements_with(vp, DiscourseFunction::Object), vec![obj]);
        assert_eq!(tree.complements_with(vp, DiscourseFunction::IndirectObject), vec![io]);
    }
}
