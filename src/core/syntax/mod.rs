/// Syntax stage: recursive phrase rewriting into ordered element lists.
///
/// `SyntaxContext::realise` dispatches on the element kind to the helper
/// registered for the element's language. Helpers hand back a `List` of
/// leaves (inflected words and strings) in surface order, or `None` when
/// the element realises to nothing.
pub mod english;
pub mod french;
mod phrase;

use std::sync::Arc;

use crate::core::config::RealiserConfig;
use crate::core::lexicon::{Lexicon, LexiconSet};
use crate::core::realiser::RealiseError;
use crate::core::registry::HelperRegistry;
use crate::schema::category::{Category, LexicalCategory, PhraseCategory};
use crate::schema::element::{ElementId, ElementKind, ElementTree};
use crate::schema::feature::{
    ClauseStatus, DiscourseFunction, Feature, FeatureMap, Form, Gender, InterrogativeType,
    NumberAgreement, Person, PronounCase,
};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

pub(crate) use phrase::{realise_coordination, realise_generic_phrase};

/// Nesting limit for `realise`; deeper trees are treated as malformed.
const MAX_DEPTH: usize = 256;

/// Features a clause hands down to its verb phrase.
const VERB_FEATURES: [Feature; 9] = [
    Feature::Tense,
    Feature::Form,
    Feature::Perfect,
    Feature::Progressive,
    Feature::Passive,
    Feature::Negated,
    Feature::Modal,
    Feature::NegationAuxiliary,
    Feature::Reflexive,
];

/// Marks a clause whose passive subject/object swap has been done.
const PASSIVE_RAISED: &str = "passive-raised";

/// Mutable state of one syntax pass over an owned tree.
pub struct SyntaxContext<'a> {
    pub tree: &'a mut ElementTree,
    pub lexicons: &'a LexiconSet,
    pub registry: &'a HelperRegistry,
    pub config: &'a RealiserConfig,
    depth: usize,
}

impl<'a> SyntaxContext<'a> {
    pub fn new(
        tree: &'a mut ElementTree,
        lexicons: &'a LexiconSet,
        registry: &'a HelperRegistry,
        config: &'a RealiserConfig,
    ) -> Self {
        Self {
            tree,
            lexicons,
            registry,
            config,
            depth: 0,
        }
    }

    pub fn lexicon(&self, language: Language) -> &'a dyn Lexicon {
        self.lexicons.get(language)
    }

    pub fn require(
        &self,
        language: Language,
        base: &str,
        category: LexicalCategory,
    ) -> Result<Arc<WordEntry>, RealiseError> {
        Ok(self.lexicon(language).require(base, category)?)
    }

    /// Realise one element. Dangling ids and elided elements give `None`.
    pub fn realise(&mut self, id: ElementId) -> Result<Option<ElementId>, RealiseError> {
        let Some(element) = self.tree.get(id) else {
            return Ok(None);
        };
        if element.features.bool(Feature::Elided) {
            return Ok(None);
        }
        if self.depth >= MAX_DEPTH {
            tracing::warn!("element #{} nested too deeply, dropped", id.0);
            return Ok(None);
        }
        let kind = element.kind.clone();
        let language = self.tree.language_of(id);
        self.depth += 1;
        let result = self.dispatch(id, kind, language);
        self.depth -= 1;
        result
    }

    fn dispatch(
        &mut self,
        id: ElementId,
        kind: ElementKind,
        language: Language,
    ) -> Result<Option<ElementId>, RealiseError> {
        let registry = self.registry;
        match kind {
            ElementKind::Word(entry) => Ok(Some(self.inflect_copy(id, entry, language))),
            ElementKind::InflectedWord(_) | ElementKind::String { .. } => {
                if self.tree.get(id).and_then(|e| e.language).is_none() {
                    self.tree.set_language(id, language);
                }
                Ok(Some(id))
            }
            ElementKind::List(items) => {
                let out = self.realise_all(&items)?;
                Ok(self.list(out, language))
            }
            ElementKind::Phrase(category) => match category {
                PhraseCategory::Clause => registry.clause(language).realise(self, id),
                PhraseCategory::NounPhrase => registry.noun_phrase(language).realise(self, id),
                PhraseCategory::VerbPhrase => registry.verb_phrase(language).realise(self, id),
                PhraseCategory::AdjectivePhrase
                | PhraseCategory::AdverbPhrase
                | PhraseCategory::PrepositionalPhrase
                | PhraseCategory::CannedText => registry.phrase(language).realise(self, id),
            },
            ElementKind::Coordinated => registry.phrase(language).realise_coordinated(self, id),
            ElementKind::Document(_) => {
                let components = self.tree.slot(id, Feature::Components);
                let out = self.realise_all(&components)?;
                Ok(self.list(out, language))
            }
        }
    }

    pub fn realise_all(&mut self, ids: &[ElementId]) -> Result<Vec<ElementId>, RealiseError> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(done) = self.realise(*id)? {
                out.push(done);
            }
        }
        Ok(out)
    }

    /// Per-occurrence copy of a word, carrying the word's features.
    pub fn inflect_copy(
        &mut self,
        id: ElementId,
        entry: Arc<WordEntry>,
        language: Language,
    ) -> ElementId {
        let features = self.tree.features(id).clone();
        let parent = self.tree.parent(id);
        let copy = self.tree.insert_inflected(entry);
        if let Some(element) = self.tree.get_mut(copy) {
            element.features = features;
            element.parent = parent;
            element.language = Some(language);
        }
        copy
    }

    /// Fresh inflected word for an entry.
    pub fn word(&mut self, entry: Arc<WordEntry>, language: Language) -> ElementId {
        let id = self.tree.insert_inflected(entry);
        self.tree.set_language(id, language);
        id
    }

    /// Inflected word for a closed-class entry; missing entries are errors.
    pub fn required_word(
        &mut self,
        language: Language,
        base: &str,
        category: LexicalCategory,
    ) -> Result<ElementId, RealiseError> {
        let entry = self.require(language, base, category)?;
        Ok(self.word(entry, language))
    }

    /// Inflected word for any entry, made up on the spot when unknown.
    pub fn lexical_word(
        &mut self,
        language: Language,
        base: &str,
        category: LexicalCategory,
    ) -> ElementId {
        let entry = self.lexicon(language).lookup_word(base, Some(category));
        self.word(entry, language)
    }

    /// Literal text that skips morphology.
    pub fn canned(&mut self, text: &str, language: Language) -> ElementId {
        let id = self.tree.insert_string(text);
        self.tree.set_language(id, language);
        id
    }

    pub fn list(&mut self, items: Vec<ElementId>, language: Language) -> Option<ElementId> {
        if items.is_empty() {
            return None;
        }
        let id = self.tree.insert_kind(ElementKind::List(items));
        self.tree.set_language(id, language);
        Some(id)
    }

    /// Mark clause complements as subordinate before they are realised.
    pub fn subordinate(&mut self, ids: &[ElementId]) {
        for id in ids {
            if self.tree.phrase_category(*id) == Some(PhraseCategory::Clause) {
                self.tree.set(*id, Feature::ClauseStatus, ClauseStatus::Subordinate);
            }
        }
    }
}

/// Ordered verb-group stacks built by a verb-phrase helper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerbGroup {
    /// Up to and including the finite element (plus its negation particle).
    pub auxiliaries: Vec<ElementId>,
    /// The rest of the group, ending with the main verb.
    pub main: Vec<ElementId>,
}

impl VerbGroup {
    /// Take the first element of the group for subject-auxiliary inversion.
    pub fn front(&mut self) -> Option<ElementId> {
        if !self.auxiliaries.is_empty() {
            Some(self.auxiliaries.remove(0))
        } else if !self.main.is_empty() {
            Some(self.main.remove(0))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.auxiliaries.is_empty() && self.main.is_empty()
    }
}

/// Person, number and gender a subject imposes on its verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agreement {
    pub person: Person,
    pub number: NumberAgreement,
    pub gender: Gender,
}

impl Default for Agreement {
    fn default() -> Self {
        Self {
            person: Person::Third,
            number: NumberAgreement::Singular,
            gender: Gender::Masculine,
        }
    }
}

impl Agreement {
    pub fn from_features(features: &FeatureMap) -> Self {
        Self {
            person: features.person(),
            number: features.number(),
            gender: features.gender().unwrap_or_default(),
        }
    }

    pub fn write_to(self, tree: &mut ElementTree, id: ElementId) {
        tree.set(id, Feature::Person, self.person);
        tree.set(id, Feature::Number, self.number);
        tree.set(id, Feature::Gender, self.gender);
    }

    pub fn is_plural(self) -> bool {
        self.number == NumberAgreement::Plural
    }

    /// Several agreement sources joined by a conjunction.
    pub fn combine(parts: &[Agreement], conjunctive: bool) -> Agreement {
        let Some(last) = parts.last() else {
            return Agreement::default();
        };
        let number = if conjunctive && parts.len() > 1 {
            NumberAgreement::Plural
        } else {
            last.number
        };
        let person = parts
            .iter()
            .map(|p| p.person)
            .min_by_key(|p| p.digit())
            .unwrap_or(Person::Third);
        let gender = if parts.iter().all(|p| p.gender == Gender::Feminine) {
            Gender::Feminine
        } else if parts.iter().all(|p| p.gender == Gender::Neuter) {
            Gender::Neuter
        } else {
            Gender::Masculine
        };
        Agreement {
            person,
            number,
            gender,
        }
    }
}

/// Agreement features of a subject-like element.
pub fn agreement_of(tree: &ElementTree, id: ElementId) -> Agreement {
    agreement_at(tree, id, 0)
}

fn agreement_at(tree: &ElementTree, id: ElementId, depth: usize) -> Agreement {
    let mut agreement = Agreement::default();
    if depth > MAX_DEPTH {
        return agreement;
    }
    match tree.kind(id) {
        Some(ElementKind::Coordinated) => {
            let parts: Vec<Agreement> = tree
                .slot(id, Feature::Coordinates)
                .into_iter()
                .map(|c| agreement_at(tree, c, depth + 1))
                .collect();
            agreement = Agreement::combine(&parts, is_conjunctive(tree, id));
        }
        Some(ElementKind::Phrase(PhraseCategory::NounPhrase)) => {
            if let Some(head) = tree.head(id) {
                agreement = agreement_at(tree, head, depth + 1);
            }
        }
        Some(ElementKind::Word(entry)) | Some(ElementKind::InflectedWord(entry)) => {
            if let Some(person) = entry.person {
                agreement.person = person;
            }
            if let Some(number) = entry.number {
                agreement.number = number;
            }
            if let Some(gender) = entry.gender {
                agreement.gender = gender;
            }
        }
        _ => {}
    }
    let features = tree.features(id);
    if let Some(person) = features.typed(Feature::Person) {
        agreement.person = person;
    }
    if let Some(number) = features.typed(Feature::Number) {
        agreement.number = number;
    }
    if let Some(gender) = features.gender() {
        agreement.gender = gender;
    }
    agreement
}

/// Gender stated by the element or its head word, if any.
pub fn gender_of(tree: &ElementTree, id: ElementId) -> Option<Gender> {
    if let Some(gender) = tree.features(id).gender() {
        return Some(gender);
    }
    match tree.kind(id)? {
        ElementKind::Phrase(PhraseCategory::NounPhrase) => gender_of(tree, tree.head(id)?),
        ElementKind::Word(entry) | ElementKind::InflectedWord(entry) => entry.gender,
        _ => None,
    }
}

/// "and"/"et" coordinations (the default) are plural; "or"/"ou" are not.
pub fn is_conjunctive(tree: &ElementTree, coordination: ElementId) -> bool {
    match tree.feature_text(coordination, Feature::Conjunction) {
        None => true,
        Some(text) => matches!(text.trim().to_lowercase().as_str(), "" | "and" | "et" | "ni"),
    }
}

/// Personal pronoun heading a noun phrase (or the element itself).
pub fn personal_pronoun(tree: &ElementTree, id: ElementId) -> Option<Arc<WordEntry>> {
    let word = match tree.kind(id)? {
        ElementKind::Phrase(PhraseCategory::NounPhrase) => tree.head(id)?,
        _ => id,
    };
    let entry = tree.entry(word)?;
    (entry.category == LexicalCategory::Pronoun && (entry.person.is_some() || entry.reflexive))
        .then(|| entry.clone())
}

/// A noun phrase to be realised as a pronoun.
pub fn is_pronominal(tree: &ElementTree, id: ElementId) -> bool {
    tree.bool(id, Feature::Pronominal) || personal_pronoun(tree, id).is_some()
}

/// Negative-polarity argument: personne, rien, aucun …, nobody.
pub fn is_negative(tree: &ElementTree, id: ElementId) -> bool {
    let negative = |e: Option<&Arc<WordEntry>>| e.map(|e| e.negative).unwrap_or(false);
    match tree.kind(id) {
        Some(ElementKind::Phrase(PhraseCategory::NounPhrase)) => {
            tree.head(id).map(|h| negative(tree.entry(h))).unwrap_or(false)
                || tree.specifier(id).map(|s| negative(tree.entry(s))).unwrap_or(false)
        }
        Some(ElementKind::Coordinated) => tree
            .slot(id, Feature::Coordinates)
            .into_iter()
            .any(|c| is_negative(tree, c)),
        _ => negative(tree.entry(id)),
    }
}

pub fn is_animate(tree: &ElementTree, id: ElementId) -> bool {
    let head = match tree.kind(id) {
        Some(ElementKind::Phrase(PhraseCategory::NounPhrase)) => tree.head(id),
        _ => Some(id),
    };
    head.and_then(|h| tree.entry(h))
        .map(|e| e.animate || (e.category == LexicalCategory::Pronoun && e.person.is_some()))
        .unwrap_or(false)
}

/// Pronoun case implied by a discourse function.
pub fn case_for(function: Option<DiscourseFunction>, language: Language) -> PronounCase {
    match (function, language) {
        (Some(DiscourseFunction::Subject), _) => PronounCase::Nominative,
        (Some(DiscourseFunction::Specifier), _) => PronounCase::Possessive,
        (Some(DiscourseFunction::Object), _) => PronounCase::Accusative,
        (Some(DiscourseFunction::IndirectObject), Language::English) => PronounCase::Accusative,
        (Some(DiscourseFunction::IndirectObject), Language::French) => PronounCase::Dative,
        (_, Language::English) => PronounCase::Accusative,
        (_, Language::French) => PronounCase::Stressed,
    }
}

/// Wrap a bare noun or pronoun in a noun phrase, keeping its function.
pub fn coerce_to_noun_phrase(tree: &mut ElementTree, id: ElementId) -> ElementId {
    let is_nominal = matches!(
        tree.kind(id),
        Some(ElementKind::Word(entry)) | Some(ElementKind::InflectedWord(entry))
            if matches!(entry.category, LexicalCategory::Noun | LexicalCategory::Pronoun)
    );
    if !is_nominal {
        return id;
    }
    let np = tree.insert_phrase(PhraseCategory::NounPhrase);
    let function = tree.features(id).function();
    let parent = tree.parent(id);
    let language = tree.get(id).and_then(|e| e.language);
    tree.set_head(np, id);
    if let Some(function) = function {
        tree.set(np, Feature::DiscourseFunction, function);
    }
    if let Some(parent) = parent {
        tree.set_parent(np, parent);
    }
    if let Some(language) = language {
        tree.set_language(np, language);
    }
    np
}

/// Remove and return the complements of `phrase` with the given function.
pub fn take_complements(
    tree: &mut ElementTree,
    phrase: ElementId,
    function: DiscourseFunction,
) -> Vec<ElementId> {
    let taken = tree.complements_with(phrase, function);
    for id in &taken {
        tree.remove_from_slot(phrase, Feature::Complements, *id);
    }
    taken
}

/// Complements reordered so the given functions come first, in order.
pub fn ordered_complements(
    tree: &ElementTree,
    phrase: ElementId,
    first: &[DiscourseFunction],
) -> Vec<ElementId> {
    let complements = tree.slot(phrase, Feature::Complements);
    let mut out = Vec::with_capacity(complements.len());
    for function in first {
        out.extend(
            complements
                .iter()
                .filter(|c| tree.features(**c).function() == Some(*function)),
        );
    }
    out.extend(complements.iter().filter(|c| {
        tree.features(**c)
            .function()
            .map(|f| !first.contains(&f))
            .unwrap_or(true)
    }));
    out
}

/// What a clause helper needs after the language-neutral preparation.
#[derive(Debug, Clone, Default)]
pub struct ClauseFrame {
    pub verb_phrase: Option<ElementId>,
    pub subjects: Vec<ElementId>,
    pub interrogative: Option<InterrogativeType>,
    pub relative: Option<DiscourseFunction>,
    pub antecedent: Option<ElementId>,
    pub imperative: bool,
    pub subordinate: bool,
    pub agreement: Agreement,
}

/// Language-neutral clause preparation: coercion of bare arguments,
/// feature propagation to the verb phrase, the passive swap (agent in a
/// `by_agent` phrase) and subject agreement.
pub fn prepare_clause(
    cx: &mut SyntaxContext<'_>,
    clause: ElementId,
    language: Language,
    agent_preposition: &str,
) -> Result<ClauseFrame, RealiseError> {
    let features = cx.tree.features(clause).clone();

    let relative = match features.get(Feature::RelativeFunction) {
        None => None,
        Some(value) => match features.typed::<DiscourseFunction>(Feature::RelativeFunction) {
            Some(
                f @ (DiscourseFunction::Subject
                | DiscourseFunction::Object
                | DiscourseFunction::IndirectObject),
            ) => Some(f),
            _ => {
                return Err(RealiseError::UnsupportedCombination(format!(
                    "relative clause with function {}",
                    value
                )))
            }
        },
    };

    let subjects: Vec<ElementId> = features
        .elements(Feature::Subjects)
        .into_iter()
        .map(|s| coerce_to_noun_phrase(cx.tree, s))
        .collect();
    for subject in &subjects {
        cx.tree.set(*subject, Feature::DiscourseFunction, DiscourseFunction::Subject);
    }
    cx.tree.set_slot(clause, Feature::Subjects, subjects);

    let verb_phrase = cx.tree.head(clause);
    let verb_phrases = match verb_phrase {
        Some(vp) if cx.tree.category(vp) == Some(Category::Coordination) => {
            cx.tree.slot(vp, Feature::Coordinates)
        }
        Some(vp) => vec![vp],
        None => Vec::new(),
    };
    for vp in &verb_phrases {
        for feature in VERB_FEATURES {
            if let Some(value) = features.get(feature) {
                cx.tree.set(*vp, feature, value.clone());
            }
        }
        let complements: Vec<ElementId> = cx
            .tree
            .slot(*vp, Feature::Complements)
            .into_iter()
            .map(|c| coerce_to_noun_phrase(cx.tree, c))
            .collect();
        cx.tree.set_slot(*vp, Feature::Complements, complements);
    }

    // passive: objects become subjects, the logical subject an agent phrase
    let passive = features.bool(Feature::Passive)
        || verb_phrases.iter().any(|vp| cx.tree.bool(*vp, Feature::Passive));
    if passive && features.get_extra(PASSIVE_RAISED).is_none() {
        if let [vp] = verb_phrases.as_slice() {
            let objects = take_complements(cx.tree, *vp, DiscourseFunction::Object);
            let logical = cx.tree.slot(clause, Feature::Subjects);
            for object in &objects {
                cx.tree.set(*object, Feature::DiscourseFunction, DiscourseFunction::Subject);
            }
            cx.tree.set_slot(clause, Feature::Subjects, objects);
            if !logical.is_empty() {
                let agent = cx.tree.insert_phrase(PhraseCategory::PrepositionalPhrase);
                cx.tree.set_language(agent, language);
                let preposition = cx.require(language, agent_preposition, LexicalCategory::Preposition)?;
                let head = cx.tree.insert_word(preposition);
                cx.tree.set_head(agent, head);
                let argument = if let [single] = logical.as_slice() {
                    *single
                } else {
                    let coordination = cx.tree.insert_kind(ElementKind::Coordinated);
                    cx.tree.set_slot(coordination, Feature::Coordinates, logical);
                    coordination
                };
                cx.tree.set(argument, Feature::DiscourseFunction, DiscourseFunction::Complement);
                cx.tree.add_complement(agent, argument);
                cx.tree.push_slot(*vp, Feature::Complements, agent, Some(DiscourseFunction::Complement));
            }
            tracing::trace!("passive swap on clause #{}", clause.0);
        }
        if let Some(fm) = cx.tree.features_mut(clause) {
            fm.set_extra(PASSIVE_RAISED, true);
        }
    }

    let subjects = cx.tree.slot(clause, Feature::Subjects);
    let form = features.typed::<Form>(Feature::Form).unwrap_or_default();
    let imperative = form == Form::Imperative;
    let antecedent = features.element(Feature::Antecedent);

    let mut agreement = if !subjects.is_empty() {
        let parts: Vec<Agreement> = subjects.iter().map(|s| agreement_of(cx.tree, *s)).collect();
        Agreement::combine(&parts, true)
    } else if let (Some(DiscourseFunction::Subject), Some(antecedent)) = (relative, antecedent) {
        agreement_of(cx.tree, antecedent)
    } else if imperative {
        Agreement {
            person: Person::Second,
            ..Agreement::default()
        }
    } else {
        Agreement::default()
    };
    if let Some(person) = features.typed(Feature::Person) {
        agreement.person = person;
    }
    if let Some(number) = features.typed(Feature::Number) {
        agreement.number = number;
    }
    if let Some(gender) = features.gender() {
        agreement.gender = gender;
    }
    for vp in &verb_phrases {
        agreement.write_to(cx.tree, *vp);
    }

    let interrogative = features.typed(Feature::InterrogativeType);
    if features.get(Feature::InterrogativeType).is_some() && interrogative.is_none() {
        tracing::warn!("clause #{} has a malformed interrogative type, ignored", clause.0);
        cx.tree.unset(clause, Feature::InterrogativeType);
    }

    Ok(ClauseFrame {
        verb_phrase,
        subjects,
        interrogative,
        relative,
        antecedent,
        imperative,
        subordinate: features.typed(Feature::ClauseStatus) == Some(ClauseStatus::Subordinate),
        agreement,
    })
}

/// A single subject as is; several subjects joined in a coordination.
pub fn join_subjects(
    tree: &mut ElementTree,
    clause: ElementId,
    subjects: &[ElementId],
) -> Option<ElementId> {
    match subjects {
        [] => None,
        [single] => Some(*single),
        several => {
            let coordination = tree.insert_kind(ElementKind::Coordinated);
            tree.set_slot(coordination, Feature::Coordinates, several.to_vec());
            tree.set(coordination, Feature::DiscourseFunction, DiscourseFunction::Subject);
            tree.set_parent(coordination, clause);
            Some(coordination)
        }
    }
}

/// Tie relative clauses among `ids` to their antecedent noun phrase.
pub fn attach_relatives(tree: &mut ElementTree, np: ElementId, ids: &[ElementId]) {
    for id in ids {
        if tree.phrase_category(*id) == Some(PhraseCategory::Clause)
            && tree.features(*id).has(Feature::RelativeFunction)
        {
            tree.set(*id, Feature::Antecedent, np);
            tree.set(*id, Feature::ClauseStatus, ClauseStatus::Subordinate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(base: &str, category: LexicalCategory) -> Arc<WordEntry> {
        Arc::new(WordEntry::new(base, category))
    }

    fn noun_phrase(tree: &mut ElementTree, entry: Arc<WordEntry>) -> ElementId {
        let np = tree.insert_phrase(PhraseCategory::NounPhrase);
        let head = tree.insert_word(entry);
        tree.set_head(np, head);
        np
    }

    #[test]
    fn coordinated_subjects_are_plural_with_lowest_person() {
        let mut tree = ElementTree::new(Language::French);
        let mut moi = WordEntry::new("moi", LexicalCategory::Pronoun);
        moi.person = Some(Person::First);
        moi.number = Some(NumberAgreement::Singular);
        let mut marie = WordEntry::new("Marie", LexicalCategory::Noun);
        marie.gender = Some(Gender::Feminine);
        let a = noun_phrase(&mut tree, Arc::new(moi));
        let b = noun_phrase(&mut tree, Arc::new(marie));
        let coord = tree.insert_kind(ElementKind::Coordinated);
        tree.set_slot(coord, Feature::Coordinates, vec![a, b]);
        let agreement = agreement_of(&tree, coord);
        assert_eq!(agreement.person, Person::First);
        assert_eq!(agreement.number, NumberAgreement::Plural);
        assert_eq!(agreement.gender, Gender::Masculine);
    }

    #[test]
    fn disjunction_takes_last_number() {
        let mut tree = ElementTree::new(Language::English);
        let a = noun_phrase(&mut tree, entry("cat", LexicalCategory::Noun));
        let b = noun_phrase(&mut tree, entry("dog", LexicalCategory::Noun));
        let coord = tree.insert_kind(ElementKind::Coordinated);
        tree.set_slot(coord, Feature::Coordinates, vec![a, b]);
        tree.set(coord, Feature::Conjunction, "or");
        assert_eq!(agreement_of(&tree, coord).number, NumberAgreement::Singular);
        tree.set(b, Feature::Number, NumberAgreement::Plural);
        assert_eq!(agreement_of(&tree, coord).number, NumberAgreement::Plural);
    }

    #[test]
    fn feminine_only_when_all_feminine() {
        let f = Agreement {
            gender: Gender::Feminine,
            ..Agreement::default()
        };
        let m = Agreement::default();
        assert_eq!(Agreement::combine(&[f, f], true).gender, Gender::Feminine);
        assert_eq!(Agreement::combine(&[f, m], true).gender, Gender::Masculine);
    }

    #[test]
    fn verb_group_fronts_auxiliary_first() {
        let mut group = VerbGroup {
            auxiliaries: vec![ElementId(1), ElementId(2)],
            main: vec![ElementId(3)],
        };
        assert_eq!(group.front(), Some(ElementId(1)));
        assert_eq!(group.auxiliaries, vec![ElementId(2)]);
        let mut copula = VerbGroup {
            auxiliaries: vec![],
            main: vec![ElementId(5), ElementId(6)],
        };
        assert_eq!(copula.front(), Some(ElementId(5)));
        assert_eq!(copula.main, vec![ElementId(6)]);
    }

    #[test]
    fn bare_words_become_noun_phrases() {
        let mut tree = ElementTree::new(Language::English);
        let word = tree.insert_word(entry("Mary", LexicalCategory::Noun));
        tree.set(word, Feature::DiscourseFunction, DiscourseFunction::Object);
        let np = coerce_to_noun_phrase(&mut tree, word);
        assert_ne!(np, word);
        assert_eq!(tree.head(np), Some(word));
        assert_eq!(tree.features(np).function(), Some(DiscourseFunction::Object));
        let text = tree.insert_string("George");
        assert_eq!(coerce_to_noun_phrase(&mut tree, text), text);
    }

    #[test]
    fn complement_order_puts_listed_functions_first() {
        let mut tree = ElementTree::new(Language::English);
        let vp = tree.insert_phrase(PhraseCategory::VerbPhrase);
        let pp = tree.insert_string("on Monday");
        let obj = tree.insert_string("the book");
        let io = tree.insert_string("Mary");
        tree.add_complement(vp, pp);
        tree.set(obj, Feature::DiscourseFunction, DiscourseFunction::Object);
        tree.add_complement(vp, obj);
        tree.set(io, Feature::DiscourseFunction, DiscourseFunction::IndirectObject);
        tree.add_complement(vp, io);
        let order = ordered_complements(
            &tree,
            vp,
            &[DiscourseFunction::IndirectObject, DiscourseFunction::Object],
        );
        assert_eq!(order, vec![io, obj, pp]);
    }

    #[test]
    fn cases_follow_function() {
        assert_eq!(case_for(Some(DiscourseFunction::Subject), Language::English), PronounCase::Nominative);
        assert_eq!(case_for(Some(DiscourseFunction::IndirectObject), Language::French), PronounCase::Dative);
        assert_eq!(case_for(None, Language::French), PronounCase::Stressed);
        assert_eq!(case_for(None, Language::English), PronounCase::Accusative);
    }
}
