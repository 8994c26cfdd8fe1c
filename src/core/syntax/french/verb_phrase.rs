/// French verb group: compound-tense auxiliary → modal → "être en train de"
/// → passive "être" → main verb, with the clitic block, discontinuous
/// negation and past-participle agreement.
use std::sync::Arc;

use crate::core::lexicon::WordQuery;
use crate::core::realiser::RealiseError;
use crate::core::registry::VerbPhraseHelper;
use crate::core::syntax::{
    agreement_of, gender_of, is_negative, is_pronominal, ordered_complements, personal_pronoun,
    Agreement, SyntaxContext, VerbGroup,
};
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::{ElementId, ElementKind, ElementTree};
use crate::schema::feature::{
    DiscourseFunction, Feature, Form, Gender, NumberAgreement, Person, PronounCase,
};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

const FR: Language = Language::French;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Perfect,
    Modal,
    Progressive,
    Passive,
    Main,
}

impl Link {
    fn next_form(self) -> Form {
        match self {
            Link::Perfect | Link::Passive => Form::PastParticiple,
            Link::Modal | Link::Progressive | Link::Main => Form::Infinitive,
        }
    }

    /// Clitics climb no higher than the verb after one of these.
    fn is_infinitival_boundary(self) -> bool {
        matches!(self, Link::Modal | Link::Progressive)
    }
}

/// Pronoun clitics of a verb group, already in surface order.
#[derive(Debug, Default)]
struct Clitics {
    words: Vec<ElementId>,
    reflexive: bool,
    /// The noun phrase behind a direct-object clitic.
    direct_object: Option<ElementId>,
}

/// Clitic ranks: me/te/se/nous/vous, le/la/les, lui/leur, y, en.
/// Affirmative imperatives put the direct object first instead.
fn rank(person: Person, case: PronounCase, reflexive: bool, imperative: bool) -> u8 {
    match (imperative, case) {
        (true, PronounCase::Dative) => 1,
        (true, _) => 0,
        _ if reflexive || person != Person::Third => 0,
        (false, PronounCase::Dative) => 2,
        (false, _) => 1,
    }
}

fn pronoun_query(agreement: Agreement, gender: Gender, case: PronounCase, reflexive: bool) -> WordQuery {
    let mut query = WordQuery::new()
        .person(agreement.person)
        .number(agreement.number);
    query = if reflexive && agreement.person == Person::Third {
        query.reflexive(true)
    } else {
        query.case(case)
    };
    if agreement.person == Person::Third {
        query = query.gender(gender);
    }
    query
}

/// "y" or "en" standing as a complement.
fn adverbial_clitic(tree: &ElementTree, id: ElementId) -> Option<Arc<WordEntry>> {
    let word = match tree.kind(id)? {
        ElementKind::Phrase(PhraseCategory::NounPhrase) => tree.head(id)?,
        _ => id,
    };
    tree.entry(word).filter(|e| e.adverbial).cloned()
}

#[derive(Debug, Default)]
pub struct VerbPhraseRules;

impl VerbPhraseRules {
    fn clitics(
        &self,
        cx: &mut SyntaxContext<'_>,
        vp: ElementId,
        subject: Agreement,
        main: &WordEntry,
        imperative: bool,
    ) -> Clitics {
        let mut clitics = Clitics::default();
        let mut found: Vec<(u8, ElementId)> = Vec::new();
        let lexicon = cx.lexicon(FR);
        let stressed_or = |person: Person, case: PronounCase| {
            if imperative && person != Person::Third {
                PronounCase::Stressed
            } else {
                case
            }
        };

        if main.pronominal || cx.tree.bool(vp, Feature::Reflexive) {
            let query = pronoun_query(
                subject,
                subject.gender,
                stressed_or(subject.person, PronounCase::Accusative),
                true,
            );
            if let Some(entry) = lexicon.get_word(LexicalCategory::Pronoun, &query) {
                clitics.reflexive = true;
                found.push((0, cx.word(entry, FR)));
            }
        }

        let complements = cx.tree.slot(vp, Feature::Complements);
        let pronominal_with = |tree: &ElementTree, function| {
            complements.iter().copied().find(|c| {
                tree.features(*c).function() == Some(function)
                    && !tree.bool(*c, Feature::Elided)
                    && is_pronominal(tree, *c)
            })
        };
        let object = pronominal_with(cx.tree, DiscourseFunction::Object);
        let indirect = pronominal_with(cx.tree, DiscourseFunction::IndirectObject);

        let mut blocks_indirect = clitics.reflexive;
        let reflexive_object = object.filter(|np| {
            cx.tree.bool(*np, Feature::Reflexive)
                || personal_pronoun(cx.tree, *np).map(|e| e.reflexive).unwrap_or(false)
        });
        if let Some(np) = reflexive_object {
            // "se" agrees with the subject: "je me lave", "Marie se lave"
            if !clitics.reflexive {
                let query = pronoun_query(
                    subject,
                    subject.gender,
                    stressed_or(subject.person, PronounCase::Accusative),
                    true,
                );
                if let Some(entry) = lexicon.get_word(LexicalCategory::Pronoun, &query) {
                    clitics.reflexive = true;
                    found.push((0, cx.word(entry, FR)));
                }
            }
            if clitics.reflexive {
                blocks_indirect = true;
                cx.tree.set(np, Feature::Elided, true);
            }
        } else if let Some(np) = object {
            let agreement = agreement_of(cx.tree, np);
            let gender = gender_of(cx.tree, np).unwrap_or(Gender::Masculine);
            let case = stressed_or(agreement.person, PronounCase::Accusative);
            let query = pronoun_query(agreement, gender, case, false);
            if let Some(entry) = lexicon.get_word(LexicalCategory::Pronoun, &query) {
                blocks_indirect |= agreement.person != Person::Third;
                let rank = rank(agreement.person, PronounCase::Accusative, false, imperative);
                found.push((rank, cx.word(entry, FR)));
                cx.tree.set(np, Feature::Elided, true);
                clitics.direct_object = Some(np);
            }
        }
        if let Some(np) = indirect {
            if blocks_indirect {
                // "je me réfère à toi"
                tracing::trace!("indirect clitic of #{} blocked, kept as a stressed pronoun", vp.0);
                cx.tree.set(np, Feature::Case, PronounCase::Stressed);
            } else {
                let agreement = agreement_of(cx.tree, np);
                let gender = gender_of(cx.tree, np).unwrap_or(Gender::Masculine);
                let case = stressed_or(agreement.person, PronounCase::Dative);
                let query = pronoun_query(agreement, gender, case, false);
                if let Some(entry) = lexicon.get_word(LexicalCategory::Pronoun, &query) {
                    let rank = rank(agreement.person, PronounCase::Dative, false, imperative);
                    found.push((rank, cx.word(entry, FR)));
                    cx.tree.set(np, Feature::Elided, true);
                }
            }
        }
        for complement in complements {
            if cx.tree.bool(complement, Feature::Elided) {
                continue;
            }
            if let Some(entry) = adverbial_clitic(cx.tree, complement) {
                let rank = match (entry.is("y"), imperative) {
                    (true, true) => 2,
                    (true, false) => 3,
                    (false, true) => 3,
                    (false, false) => 4,
                };
                found.push((rank, cx.word(entry, FR)));
                cx.tree.set(complement, Feature::Elided, true);
            }
        }

        found.sort_by_key(|(rank, _)| *rank);
        clitics.words = found.into_iter().map(|(_, id)| id).collect();
        if !clitics.words.is_empty() {
            tracing::trace!("{} clitic(s) on verb phrase #{}", clitics.words.len(), vp.0);
        }
        clitics
    }

    /// A negative-polarity argument licenses "ne" without "pas".
    fn negative_argument(&self, tree: &ElementTree, vp: ElementId) -> bool {
        let subjects = tree
            .ancestor_of(vp, PhraseCategory::Clause)
            .map(|clause| tree.slot(clause, Feature::Subjects))
            .unwrap_or_default();
        subjects
            .into_iter()
            .chain(tree.slot(vp, Feature::Complements))
            .any(|id| is_negative(tree, id))
    }
}

impl VerbPhraseHelper for VerbPhraseRules {
    fn verb_group(
        &self,
        cx: &mut SyntaxContext<'_>,
        vp: ElementId,
        _inverted: bool,
    ) -> Result<VerbGroup, RealiseError> {
        let features = cx.tree.features(vp).clone();
        let head = cx.tree.head(vp);
        let Some((head, main_entry)) = head.and_then(|h| cx.tree.entry(h).cloned().map(|e| (h, e)))
        else {
            let main: Vec<ElementId> = match head {
                Some(h) => cx.realise(h)?.into_iter().collect(),
                None => Vec::new(),
            };
            return Ok(VerbGroup {
                auxiliaries: Vec::new(),
                main,
            });
        };

        let form = features.form();
        let tense = features.tense();
        let agreement = Agreement::from_features(&features);
        let negated = features.bool(Feature::Negated);
        let modal = cx
            .tree
            .feature_text(vp, Feature::Modal)
            .filter(|m| !m.trim().is_empty());
        if modal.is_some() && form == Form::Subjunctive {
            return Err(RealiseError::UnsupportedCombination(
                "modal verb in the subjunctive".to_string(),
            ));
        }
        let positive_imperative = form == Form::Imperative && !negated;
        let clitics = self.clitics(cx, vp, agreement, &main_entry, positive_imperative);

        let mut kinds = Vec::with_capacity(5);
        if features.bool(Feature::Perfect) {
            kinds.push(Link::Perfect);
        }
        if modal.is_some() {
            kinds.push(Link::Modal);
        }
        if features.bool(Feature::Progressive) {
            kinds.push(Link::Progressive);
        }
        if features.bool(Feature::Passive) {
            kinds.push(Link::Passive);
        }
        kinds.push(Link::Main);

        // "être" for unaccusative and pronominal verbs in compound tenses
        let perfect_etre = kinds.get(1) == Some(&Link::Main)
            && (main_entry.auxiliary_etre || clitics.reflexive);
        let object_agreement = clitics
            .direct_object
            .or_else(|| features.element(Feature::ParticipleAgreement))
            .map(|id| {
                let mut a = agreement_of(cx.tree, id);
                a.gender = gender_of(cx.tree, id).unwrap_or(Gender::Masculine);
                a
            });

        let mut verbs: Vec<(ElementId, Link)> = Vec::with_capacity(kinds.len());
        for (i, link) in kinds.iter().copied().enumerate() {
            let entry = match link {
                Link::Perfect if perfect_etre => cx.require(FR, "être", LexicalCategory::Verb)?,
                Link::Perfect => cx.require(FR, "avoir", LexicalCategory::Verb)?,
                Link::Modal => cx
                    .lexicon(FR)
                    .lookup_word(modal.as_deref().unwrap_or_default().trim(), Some(LexicalCategory::Verb)),
                Link::Progressive | Link::Passive => cx.require(FR, "être", LexicalCategory::Verb)?,
                Link::Main => main_entry.clone(),
            };
            let id = if link == Link::Main {
                cx.inflect_copy(head, entry, FR)
            } else {
                cx.word(entry, FR)
            };
            match i.checked_sub(1).map(|p| kinds[p]) {
                None => {
                    let first_form = match form {
                        Form::Gerund => Form::PresentParticiple,
                        Form::BareInfinitive => Form::Infinitive,
                        other => other,
                    };
                    cx.tree.set(id, Feature::Form, first_form);
                    cx.tree.set(id, Feature::Tense, tense);
                    cx.tree.set(id, Feature::Person, agreement.person);
                    cx.tree.set(id, Feature::Number, agreement.number);
                }
                Some(previous) => {
                    cx.tree.set(id, Feature::Form, previous.next_form());
                    if previous.next_form() == Form::PastParticiple {
                        let agrees_with = match (previous, link) {
                            (Link::Passive, _) => Some(agreement),
                            (Link::Perfect, Link::Main) if perfect_etre => Some(agreement),
                            (Link::Perfect, Link::Main) => object_agreement,
                            _ => None,
                        };
                        let (gender, number) = agrees_with
                            .map(|a| (a.gender, a.number))
                            .unwrap_or((Gender::Masculine, NumberAgreement::Singular));
                        cx.tree.set(id, Feature::Gender, gender);
                        cx.tree.set(id, Feature::Number, number);
                    }
                }
            }
            verbs.push((id, link));
        }
        tracing::trace!(
            "french verb group of {} for #{} ({})",
            verbs.len(),
            vp.0,
            if perfect_etre { "être" } else { "avoir" }
        );

        let ne_only = negated && self.negative_argument(cx.tree, vp);
        let particle = cx
            .tree
            .feature_text(vp, Feature::NegationAuxiliary)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "pas".to_string());
        let host = verbs
            .iter()
            .rposition(|(_, link)| link.is_infinitival_boundary())
            .map(|i| i + 1)
            .unwrap_or(0);
        let split_negation = form.is_finite() || form == Form::Gerund;

        let mut sequence = Vec::with_capacity(verbs.len() + clitics.words.len() + 5);
        if form == Form::Gerund {
            sequence.push(cx.required_word(FR, "en", LexicalCategory::Preposition)?);
        }
        if negated {
            sequence.push(cx.required_word(FR, "ne", LexicalCategory::Adverb)?);
            if !split_negation && !ne_only {
                sequence.push(cx.lexical_word(FR, particle.trim(), LexicalCategory::Adverb));
            }
        }
        let mut split = 0;
        for (i, (id, link)) in verbs.iter().copied().enumerate() {
            if i == host && !positive_imperative {
                sequence.extend(clitics.words.iter().copied());
            }
            sequence.push(id);
            if i == 0 {
                if positive_imperative {
                    // "donne-le-moi"
                    for clitic in &clitics.words {
                        cx.tree.set(*clitic, Feature::Hyphenated, true);
                        sequence.push(*clitic);
                    }
                }
                if negated && split_negation && !ne_only {
                    sequence.push(cx.lexical_word(FR, particle.trim(), LexicalCategory::Adverb));
                }
                if split_negation {
                    split = sequence.len();
                }
            }
            if link == Link::Progressive {
                sequence.push(cx.required_word(FR, "en", LexicalCategory::Preposition)?);
                sequence.push(cx.lexical_word(FR, "train", LexicalCategory::Noun));
                sequence.push(cx.required_word(FR, "de", LexicalCategory::Preposition)?);
            }
        }

        let main = sequence.split_off(split);
        Ok(VerbGroup {
            auxiliaries: sequence,
            main,
        })
    }

    fn assemble(
        &self,
        cx: &mut SyntaxContext<'_>,
        vp: ElementId,
        group: VerbGroup,
    ) -> Result<Option<ElementId>, RealiseError> {
        let features = cx.tree.features(vp).clone();
        let mut out = group.auxiliaries;
        out.extend(cx.realise_all(&features.elements(Feature::Premodifiers))?);
        out.extend(group.main);
        let complements = ordered_complements(
            cx.tree,
            vp,
            &[DiscourseFunction::Object, DiscourseFunction::IndirectObject],
        );
        cx.subordinate(&complements);
        for complement in complements {
            let indirect =
                cx.tree.features(complement).function() == Some(DiscourseFunction::IndirectObject);
            if let Some(done) = cx.realise(complement)? {
                if indirect {
                    out.push(cx.required_word(FR, "à", LexicalCategory::Preposition)?);
                }
                out.push(done);
            }
        }
        out.extend(cx.realise_all(&features.elements(Feature::Postmodifiers))?);
        Ok(cx.list(out, FR))
    }
}
