/// English noun phrases: determiner agreement, possessives, pronouns.
use crate::core::lexicon::WordQuery;
use crate::core::realiser::RealiseError;
use crate::core::registry::NounPhraseHelper;
use crate::core::syntax::{
    agreement_of, attach_relatives, case_for, gender_of, is_pronominal, personal_pronoun,
    Agreement, SyntaxContext,
};
use crate::schema::category::{Category, LexicalCategory, PhraseCategory};
use crate::schema::element::ElementId;
use crate::schema::feature::{
    DiscourseFunction, Feature, Gender, NumberAgreement, Person, PronounCase,
};
use crate::schema::language::Language;

const EN: Language = Language::English;

#[derive(Debug, Default)]
pub struct NounPhraseRules;

impl NounPhraseRules {
    /// The personal pronoun standing for `np`, if the lexicon has one.
    fn pronoun(&self, cx: &mut SyntaxContext<'_>, np: ElementId) -> Option<ElementId> {
        let features = cx.tree.features(np).clone();
        let agreement = agreement_of(cx.tree, np);
        let case = features.typed(Feature::Case).unwrap_or_else(|| {
            if features.bool(Feature::Possessive) {
                PronounCase::Possessive
            } else {
                case_for(features.function(), EN)
            }
        });
        let mut query = WordQuery::new()
            .person(agreement.person)
            .number(agreement.number);
        query = if features.bool(Feature::Reflexive) {
            query.reflexive(true)
        } else {
            query.case(case)
        };
        if agreement.person == Person::Third && agreement.number == NumberAgreement::Singular {
            query = query.gender(gender_of(cx.tree, np).unwrap_or(Gender::Neuter));
        }
        let entry = cx.lexicon(EN).get_word(LexicalCategory::Pronoun, &query)?;
        tracing::trace!("pronoun '{}' for noun phrase #{}", entry.base, np.0);
        Some(cx.word(entry, EN))
    }

    fn specifier(
        &self,
        cx: &mut SyntaxContext<'_>,
        specifier: ElementId,
        agreement: Agreement,
    ) -> Result<Option<ElementId>, RealiseError> {
        match cx.tree.category(specifier) {
            Some(Category::Phrase(PhraseCategory::NounPhrase)) | Some(Category::Coordination) => {
                cx.tree.set(specifier, Feature::Possessive, true);
                cx.tree
                    .set(specifier, Feature::DiscourseFunction, DiscourseFunction::Specifier);
                return cx.realise(specifier);
            }
            _ => {}
        }
        if let Some(entry) = cx.tree.entry(specifier).cloned() {
            if entry.category == LexicalCategory::Determiner
                && entry.is("a")
                && agreement.is_plural()
            {
                let some = cx.require(EN, "some", LexicalCategory::Determiner)?;
                return Ok(Some(cx.word(some, EN)));
            }
            if entry.category == LexicalCategory::Pronoun && entry.person.is_some() {
                // "he" as a specifier means "his"
                let mut query = WordQuery::new()
                    .person(entry.person.unwrap_or_default())
                    .case(PronounCase::Possessive);
                if let Some(number) = entry.number {
                    query = query.number(number);
                }
                if let Some(gender) = entry.gender {
                    query = query.gender(gender);
                }
                if let Some(possessive) = cx.lexicon(EN).get_word(LexicalCategory::Pronoun, &query) {
                    return Ok(Some(cx.word(possessive, EN)));
                }
            }
        }
        cx.tree.set(specifier, Feature::Number, agreement.number);
        cx.realise(specifier)
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
                return Ok(cx.list(vec![pronoun], EN));
            }
            if personal_pronoun(cx.tree, np).is_none() {
                tracing::warn!("no pronoun for noun phrase #{}, realised in full", np.0);
            }
        }

        let features = cx.tree.features(np).clone();
        let agreement = agreement_of(cx.tree, np);
        let mut out = Vec::new();
        if let Some(specifier) = cx.tree.specifier(np) {
            out.extend(self.specifier(cx, specifier, agreement)?);
        }
        out.extend(cx.realise_all(&features.elements(Feature::Premodifiers))?);
        if let Some(head) = cx.tree.head(np) {
            cx.tree.set(head, Feature::Number, agreement.number);
            if features.bool(Feature::Possessive) {
                cx.tree.set(head, Feature::Possessive, true);
            }
            out.extend(cx.realise(head)?);
        }
        let complements = features.elements(Feature::Complements);
        let postmodifiers = features.elements(Feature::Postmodifiers);
        attach_relatives(cx.tree, np, &complements);
        attach_relatives(cx.tree, np, &postmodifiers);
        out.extend(cx.realise_all(&complements)?);
        out.extend(cx.realise_all(&postmodifiers)?);
        Ok(cx.list(out, EN))
    }
}
