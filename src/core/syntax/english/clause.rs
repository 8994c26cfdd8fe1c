/// English clauses: complementisers, relative pronouns, subject-auxiliary
/// inversion for questions.
use crate::core::config::ComplementiserPolicy;
use crate::core::realiser::RealiseError;
use crate::core::registry::ClauseHelper;
use crate::core::syntax::{
    is_animate, join_subjects, prepare_clause, take_complements, Agreement, ClauseFrame,
    SyntaxContext,
};
use crate::schema::category::{Category, LexicalCategory};
use crate::schema::element::ElementId;
use crate::schema::feature::{
    DiscourseFunction, Feature, InterrogativeType, NumberAgreement,
};
use crate::schema::language::Language;

const EN: Language = Language::English;

#[derive(Debug, Default)]
pub struct ClauseRules;

/// What an interrogative adds around the declarative clause.
#[derive(Debug, Default)]
struct Question {
    lead: Vec<ElementId>,
    trailing: Vec<ElementId>,
    inverted: bool,
}

/// Questioned constituents leave the verb phrase.
fn taken(
    cx: &mut SyntaxContext<'_>,
    vp: Option<ElementId>,
    function: DiscourseFunction,
) -> Vec<ElementId> {
    match vp {
        Some(vp) => take_complements(cx.tree, vp, function),
        None => Vec::new(),
    }
}

impl ClauseRules {
    fn complementiser(
        &self,
        cx: &mut SyntaxContext<'_>,
        clause: ElementId,
        frame: &ClauseFrame,
    ) -> Result<Option<ElementId>, RealiseError> {
        if !frame.subordinate
            || frame.relative.is_some()
            || cx.tree.bool(clause, Feature::SuppressedComplementiser)
        {
            return Ok(None);
        }
        if let Some(text) = cx
            .tree
            .feature_text(clause, Feature::Complementiser)
            .filter(|t| !t.trim().is_empty())
        {
            return Ok(Some(cx.lexical_word(EN, text.trim(), LexicalCategory::Complementiser)));
        }
        match frame.interrogative {
            Some(InterrogativeType::YesNo) => Ok(Some(cx.required_word(
                EN,
                "whether",
                LexicalCategory::Complementiser,
            )?)),
            // embedded wh-questions are introduced by their wh-word
            Some(_) => Ok(None),
            None if cx.config.complementiser == ComplementiserPolicy::Always => Ok(Some(
                cx.required_word(EN, "that", LexicalCategory::Complementiser)?,
            )),
            None => Ok(None),
        }
    }

    /// Relative pronoun for the relativised constituent, which is removed.
    fn relative_pronoun(
        &self,
        cx: &mut SyntaxContext<'_>,
        frame: &mut ClauseFrame,
        function: DiscourseFunction,
    ) -> Result<Vec<ElementId>, RealiseError> {
        let animate = frame
            .antecedent
            .map(|a| is_animate(cx.tree, a))
            .unwrap_or(false);
        let pronoun = if animate { "who" } else { "that" };
        match function {
            DiscourseFunction::IndirectObject => {
                if let Some(vp) = frame.verb_phrase {
                    take_complements(cx.tree, vp, DiscourseFunction::IndirectObject);
                }
                let to = cx.required_word(EN, "to", LexicalCategory::Preposition)?;
                let which = if animate { "whom" } else { "which" };
                Ok(vec![to, cx.lexical_word(EN, which, LexicalCategory::Pronoun)])
            }
            DiscourseFunction::Object => {
                if let Some(vp) = frame.verb_phrase {
                    take_complements(cx.tree, vp, DiscourseFunction::Object);
                }
                Ok(vec![cx.lexical_word(EN, pronoun, LexicalCategory::Pronoun)])
            }
            _ => {
                frame.subjects.clear();
                Ok(vec![cx.lexical_word(EN, pronoun, LexicalCategory::Pronoun)])
            }
        }
    }

    fn question(
        &self,
        cx: &mut SyntaxContext<'_>,
        frame: &mut ClauseFrame,
        kind: InterrogativeType,
    ) -> Result<Question, RealiseError> {
        let mut question = Question::default();
        let vp = frame.verb_phrase;
        let passive = vp.map(|v| cx.tree.bool(v, Feature::Passive)).unwrap_or(false);
        // under the passive the questioned object already sits in subject position
        let kind = match kind {
            InterrogativeType::WhoObject if passive => InterrogativeType::WhoSubject,
            InterrogativeType::WhatObject if passive => InterrogativeType::WhatSubject,
            other => other,
        };

        match kind {
            InterrogativeType::YesNo => question.inverted = true,
            InterrogativeType::WhoSubject | InterrogativeType::WhatSubject => {
                let base = if kind == InterrogativeType::WhoSubject { "who" } else { "what" };
                let wh = cx.required_word(EN, base, LexicalCategory::Pronoun)?;
                cx.tree.set(wh, Feature::DiscourseFunction, DiscourseFunction::Subject);
                frame.subjects = vec![wh];
                if let Some(vp) = vp {
                    Agreement::default().write_to(cx.tree, vp);
                }
            }
            InterrogativeType::WhoObject | InterrogativeType::WhatObject => {
                if taken(cx, vp, DiscourseFunction::Object).is_empty() {
                    tracing::warn!("{:?} question without an object, left declarative", kind);
                    frame.interrogative = None;
                    return Ok(question);
                }
                let base = if kind == InterrogativeType::WhoObject { "who" } else { "what" };
                question.lead.push(cx.required_word(EN, base, LexicalCategory::Pronoun)?);
                question.inverted = true;
            }
            InterrogativeType::WhoIndirectObject => {
                if taken(cx, vp, DiscourseFunction::IndirectObject).is_empty() {
                    tracing::warn!("indirect-object question without one, left declarative");
                    frame.interrogative = None;
                    return Ok(question);
                }
                question.lead.push(cx.required_word(EN, "who", LexicalCategory::Pronoun)?);
                question.trailing.push(cx.required_word(EN, "to", LexicalCategory::Preposition)?);
                question.inverted = true;
            }
            InterrogativeType::Where | InterrogativeType::Why | InterrogativeType::How => {
                let base = match kind {
                    InterrogativeType::Where => "where",
                    InterrogativeType::Why => "why",
                    _ => "how",
                };
                question.lead.push(cx.lexical_word(EN, base, LexicalCategory::Adverb));
                question.inverted = true;
            }
            InterrogativeType::HowMany => {
                let questioned = if passive {
                    std::mem::take(&mut frame.subjects)
                } else {
                    taken(cx, vp, DiscourseFunction::Object)
                };
                let Some(&questioned) = questioned.first() else {
                    tracing::warn!("how-many question without an object, left declarative");
                    frame.interrogative = None;
                    return Ok(question);
                };
                cx.tree.set(questioned, Feature::Number, NumberAgreement::Plural);
                cx.tree.unset(questioned, Feature::Specifier);
                question.lead.push(cx.lexical_word(EN, "how", LexicalCategory::Adverb));
                question.lead.push(cx.lexical_word(EN, "many", LexicalCategory::Determiner));
                question.lead.extend(cx.realise(questioned)?);
                if passive {
                    if let Some(vp) = vp {
                        Agreement {
                            number: NumberAgreement::Plural,
                            ..Agreement::default()
                        }
                        .write_to(cx.tree, vp);
                    }
                } else {
                    question.inverted = true;
                }
            }
            InterrogativeType::HowPredicate => {
                if let Some(vp) = vp {
                    cx.tree.set_slot(vp, Feature::Complements, Vec::new());
                }
                question.lead.push(cx.lexical_word(EN, "how", LexicalCategory::Adverb));
                question.inverted = true;
            }
        }
        tracing::trace!("english {:?} question", kind);
        Ok(question)
    }
}

impl ClauseHelper for ClauseRules {
    fn realise(
        &self,
        cx: &mut SyntaxContext<'_>,
        clause: ElementId,
    ) -> Result<Option<ElementId>, RealiseError> {
        let mut frame = prepare_clause(cx, clause, EN, "by")?;
        let features = cx.tree.features(clause).clone();
        let mut out = Vec::new();

        out.extend(self.complementiser(cx, clause, &frame)?);
        if let Some(cue) = features.element(Feature::CuePhrase) {
            if let Some(done) = cx.realise(cue)? {
                out.push(done);
                if cx.config.cue_phrase_comma {
                    out.push(cx.canned(",", EN));
                }
            }
        }
        out.extend(cx.realise_all(&features.elements(Feature::FrontModifiers))?);

        let mut question = Question::default();
        if let Some(function) = frame.relative {
            out.extend(self.relative_pronoun(cx, &mut frame, function)?);
        } else if let Some(kind) = frame.interrogative {
            question = self.question(cx, &mut frame, kind)?;
            if frame.interrogative.is_none() {
                cx.tree.unset(clause, Feature::InterrogativeType);
            }
            if frame.subordinate {
                question.inverted = false;
            }
        }
        out.append(&mut question.lead);
        out.extend(cx.realise_all(&features.elements(Feature::Premodifiers))?);

        if frame.imperative {
            frame.subjects.clear();
        }
        let subject = join_subjects(cx.tree, clause, &frame.subjects);

        match frame.verb_phrase {
            Some(vp) if cx.tree.category(vp) != Some(Category::Coordination) => {
                let registry = cx.registry;
                let helper = registry.verb_phrase(EN);
                let mut group = helper.verb_group(cx, vp, question.inverted)?;
                if question.inverted {
                    out.extend(group.front());
                }
                if let Some(subject) = subject {
                    out.extend(cx.realise(subject)?);
                }
                out.extend(helper.assemble(cx, vp, group)?);
            }
            other => {
                if let Some(subject) = subject {
                    out.extend(cx.realise(subject)?);
                }
                if let Some(vp) = other {
                    out.extend(cx.realise(vp)?);
                }
            }
        }

        let complements = features.elements(Feature::Complements);
        cx.subordinate(&complements);
        out.extend(cx.realise_all(&complements)?);
        out.extend(cx.realise_all(&features.elements(Feature::Postmodifiers))?);
        out.append(&mut question.trailing);
        Ok(cx.list(out, EN))
    }
}
