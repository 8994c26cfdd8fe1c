/// French noun phrases: determiner and adjective agreement, adjective
/// placement, partitive "de" under negation, possessives.
use std::sync::Arc;

use crate::core::lexicon::WordQuery;
use crate::core::realiser::RealiseError;
use crate::core::registry::NounPhraseHelper;
use crate::core::syntax::{
    agreement_of, attach_relatives, case_for, gender_of, is_pronominal, personal_pronoun, Agreement,
    SyntaxContext,
};
use crate::schema::category::{Category, LexicalCategory, PhraseCategory};
use crate::schema::element::{ElementId, ElementTree};
use crate::schema::feature::{DiscourseFunction, Feature, Gender, Person, PronounCase};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

const FR: Language = Language::French;

/// Determiners that turn into "de" under negation: "pas de pomme".
const INDEFINITES: [&str; 3] = ["un", "du", "des"];

#[derive(Debug, Default)]
pub struct NounPhraseRules;

/// Lexicon entry of a word or of the head of a modifier phrase.
fn modifier_entry(tree: &ElementTree, id: ElementId) -> Option<&Arc<WordEntry>> {
    match tree.phrase_category(id) {
        Some(_) => tree.entry(tree.head(id)?),
        None => tree.entry(id),
    }
}

fn is_preposed(tree: &ElementTree, id: ElementId) -> bool {
    modifier_entry(tree, id)
        .map(|e| e.category != LexicalCategory::Adjective || e.preposed)
        .unwrap_or(true)
}

/// Object of a negated verb other than "être".
fn under_negation(tree: &ElementTree, np: ElementId) -> bool {
    if tree.features(np).function() != Some(DiscourseFunction::Object) {
        return false;
    }
    let Some(vp) = tree.ancestor_of(np, PhraseCategory::VerbPhrase) else {
        return false;
    };
    let copular = tree
        .head(vp)
        .and_then(|h| tree.entry(h))
        .map(|e| e.copular)
        .unwrap_or(false);
    tree.bool(vp, Feature::Negated) && !copular
}

impl NounPhraseRules {
    fn pronoun(&self, cx: &mut SyntaxContext<'_>, np: ElementId) -> Option<ElementId> {
        let features = cx.tree.features(np).clone();
        let agreement = agreement_of(cx.tree, np);
        let case = features
            .typed(Feature::Case)
            .unwrap_or_else(|| case_for(features.function(), FR));
        let mut query = WordQuery::new()
            .person(agreement.person)
            .number(agreement.number);
        query = if features.bool(Feature::Reflexive) && agreement.person == Person::Third {
            query.reflexive(true)
        } else {
            query.case(case)
        };
        if agreement.person == Person::Third {
            query = query.gender(gender_of(cx.tree, np).unwrap_or(Gender::Masculine));
        }
        let entry = cx.lexicon(FR).get_word(LexicalCategory::Pronoun, &query)?;
        tracing::trace!("pronoun '{}' for noun phrase #{}", entry.base, np.0);
        Some(cx.word(entry, FR))
    }

    /// Possessive determiner for a pronoun possessor: "il" → "son/sa/ses".
    fn possessive_determiner(
        &self,
        cx: &mut SyntaxContext<'_>,
        possessor: &WordEntry,
    ) -> Option<ElementId> {
        let mut query = WordQuery::new()
            .person(possessor.person.unwrap_or_default())
            .case(PronounCase::Possessive);
        if let Some(number) = possessor.number {
            query = query.number(number);
        }
        let entry = cx.lexicon(FR).get_word(LexicalCategory::Determiner, &query)?;
        (entry.case == Some(PronounCase::Possessive)).then(|| cx.word(entry, FR))
    }

    /// The determiner, plus a "de" phrase when the possessor is a noun phrase.
    fn specifier(
        &self,
        cx: &mut SyntaxContext<'_>,
        np: ElementId,
        specifier: ElementId,
        agreement: Agreement,
    ) -> Result<(Option<ElementId>, Vec<ElementId>), RealiseError> {
        let possessor_phrase = matches!(
            cx.tree.category(specifier),
            Some(Category::Phrase(PhraseCategory::NounPhrase)) | Some(Category::Coordination)
        );
        if possessor_phrase && !is_pronominal(cx.tree, specifier) {
            // "le livre de Marie"
            cx.tree
                .set(specifier, Feature::DiscourseFunction, DiscourseFunction::Complement);
            let mut tail = vec![cx.required_word(FR, "de", LexicalCategory::Preposition)?];
            tail.extend(cx.realise(specifier)?);
            let article = cx.required_word(FR, "le", LexicalCategory::Determiner)?;
            self.agree(cx, article, agreement);
            return Ok((Some(article), tail));
        }

        let indefinite = cx
            .tree
            .entry(specifier)
            .map(|e| INDEFINITES.iter().any(|i| e.is(i)))
            .unwrap_or(false);
        let determiner = if let Some(possessor) = personal_pronoun(cx.tree, specifier) {
            self.possessive_determiner(cx, &possessor)
        } else if indefinite && under_negation(cx.tree, np) {
            tracing::trace!("indefinite article of #{} becomes 'de' under negation", np.0);
            Some(cx.lexical_word(FR, "de", LexicalCategory::Determiner))
        } else {
            None
        };

        match determiner {
            Some(id) => {
                self.agree(cx, id, agreement);
                Ok((Some(id), Vec::new()))
            }
            None => {
                self.agree(cx, specifier, agreement);
                Ok((cx.realise(specifier)?, Vec::new()))
            }
        }
    }

    fn agree(&self, cx: &mut SyntaxContext<'_>, id: ElementId, agreement: Agreement) {
        cx.tree.set(id, Feature::Gender, agreement.gender);
        cx.tree.set(id, Feature::Number, agreement.number);
    }
}

impl NounPhraseHelper for NounPhraseRules {
    fn realise(
        &self,
        cx: &mut SyntaxContext<'_>,
        np: ElementId,
    ) -> Result<Option<ElementId>, RealiseError> {
        if is_pronominal(cx.tree, np) {
            if let Some(pronoun) = self.pronoun(cx, np) {
                return Ok(cx.list(vec![pronoun], FR));
            }
            tracing::warn!("no pronoun for noun phrase #{}, realised in full", np.0);
        }

        let features = cx.tree.features(np).clone();
        let mut agreement = agreement_of(cx.tree, np);
        agreement.gender = gender_of(cx.tree, np).unwrap_or(Gender::Masculine);

        let mut out = Vec::new();
        let mut possessor_tail = Vec::new();
        if let Some(specifier) = cx.tree.specifier(np) {
            let (determiner, tail) = self.specifier(cx, np, specifier, agreement)?;
            out.extend(determiner);
            possessor_tail = tail;
        }

        let (before, after): (Vec<ElementId>, Vec<ElementId>) = features
            .elements(Feature::Premodifiers)
            .into_iter()
            .partition(|m| is_preposed(cx.tree, *m));
        for modifier in before.iter().chain(after.iter()) {
            self.agree(cx, *modifier, agreement);
        }
        out.extend(cx.realise_all(&before)?);
        if let Some(head) = cx.tree.head(np) {
            cx.tree.set(head, Feature::Number, agreement.number);
            out.extend(cx.realise(head)?);
        }
        out.extend(cx.realise_all(&after)?);

        let complements = features.elements(Feature::Complements);
        let postmodifiers = features.elements(Feature::Postmodifiers);
        for modifier in &postmodifiers {
            if modifier_entry(cx.tree, *modifier)
                .map(|e| e.category == LexicalCategory::Adjective)
                .unwrap_or(false)
            {
                self.agree(cx, *modifier, agreement);
            }
        }
        attach_relatives(cx.tree, np, &complements);
        attach_relatives(cx.tree, np, &postmodifiers);
        out.extend(cx.realise_all(&complements)?);
        out.extend(cx.realise_all(&postmodifiers)?);
        out.extend(possessor_tail);
        Ok(cx.list(out, FR))
    }
}
