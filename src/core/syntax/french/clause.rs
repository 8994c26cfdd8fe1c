/// French clauses: "que"/"si" complementisers, relative "qui/que/à qui",
/// and questions built on "est-ce que".
use crate::core::realiser::RealiseError;
use crate::core::registry::ClauseHelper;
use crate::core::syntax::{
    join_subjects, prepare_clause, take_complements, Agreement, ClauseFrame, SyntaxContext,
};
use crate::schema::category::LexicalCategory;
use crate::schema::element::ElementId;
use crate::schema::feature::{DiscourseFunction, Feature, InterrogativeType, NumberAgreement};
use crate::schema::language::Language;

const FR: Language = Language::French;

#[derive(Debug, Default)]
pub struct ClauseRules;

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
    /// "est-ce" with the hyphen carried by "ce".
    fn est_ce(&self, cx: &mut SyntaxContext<'_>) -> Vec<ElementId> {
        let est = cx.canned("est", FR);
        let ce = cx.canned("ce", FR);
        cx.tree.set(ce, Feature::Hyphenated, true);
        vec![est, ce]
    }

    /// "est-ce que"; "est-ce qui" when the questioned word is the subject.
    fn est_ce_que(
        &self,
        cx: &mut SyntaxContext<'_>,
        subject: bool,
    ) -> Result<Vec<ElementId>, RealiseError> {
        let mut out = self.est_ce(cx);
        out.push(if subject {
            cx.required_word(FR, "qui", LexicalCategory::Pronoun)?
        } else {
            cx.required_word(FR, "que", LexicalCategory::Complementiser)?
        });
        Ok(out)
    }

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
            return Ok(Some(cx.lexical_word(FR, text.trim(), LexicalCategory::Complementiser)));
        }
        match frame.interrogative {
            Some(InterrogativeType::YesNo) => {
                Ok(Some(cx.required_word(FR, "si", LexicalCategory::Complementiser)?))
            }
            Some(_) => Ok(None),
            None => Ok(Some(cx.required_word(FR, "que", LexicalCategory::Complementiser)?)),
        }
    }

    fn relative_pronoun(
        &self,
        cx: &mut SyntaxContext<'_>,
        frame: &mut ClauseFrame,
        function: DiscourseFunction,
    ) -> Result<Vec<ElementId>, RealiseError> {
        match function {
            DiscourseFunction::IndirectObject => {
                taken(cx, frame.verb_phrase, DiscourseFunction::IndirectObject);
                Ok(vec![
                    cx.required_word(FR, "à", LexicalCategory::Preposition)?,
                    cx.required_word(FR, "qui", LexicalCategory::Pronoun)?,
                ])
            }
            DiscourseFunction::Object => {
                taken(cx, frame.verb_phrase, DiscourseFunction::Object);
                // "la pomme que Marie a mangée"
                if let (Some(vp), Some(antecedent)) = (frame.verb_phrase, frame.antecedent) {
                    cx.tree.set(vp, Feature::ParticipleAgreement, antecedent);
                }
                Ok(vec![cx.required_word(FR, "que", LexicalCategory::Pronoun)?])
            }
            _ => {
                frame.subjects.clear();
                Ok(vec![cx.required_word(FR, "qui", LexicalCategory::Pronoun)?])
            }
        }
    }

    fn question(
        &self,
        cx: &mut SyntaxContext<'_>,
        frame: &mut ClauseFrame,
        kind: InterrogativeType,
    ) -> Result<Vec<ElementId>, RealiseError> {
        let vp = frame.verb_phrase;
        let passive = vp.map(|v| cx.tree.bool(v, Feature::Passive)).unwrap_or(false);
        let embedded = frame.subordinate;
        let kind = match kind {
            InterrogativeType::WhoObject if passive => InterrogativeType::WhoSubject,
            InterrogativeType::WhatObject if passive => InterrogativeType::WhatSubject,
            other => other,
        };
        let mut lead = Vec::new();

        match kind {
            InterrogativeType::YesNo => {
                if !embedded {
                    lead.extend(self.est_ce_que(cx, false)?);
                }
            }
            InterrogativeType::WhoSubject => {
                let qui = cx.required_word(FR, "qui", LexicalCategory::Pronoun)?;
                cx.tree.set(qui, Feature::DiscourseFunction, DiscourseFunction::Subject);
                frame.subjects = vec![qui];
                if let Some(vp) = vp {
                    Agreement::default().write_to(cx.tree, vp);
                }
            }
            InterrogativeType::WhatSubject => {
                // "qu'est-ce qui"
                lead.push(cx.required_word(FR, "que", LexicalCategory::Pronoun)?);
                lead.extend(self.est_ce_que(cx, true)?);
                frame.subjects.clear();
                if let Some(vp) = vp {
                    Agreement::default().write_to(cx.tree, vp);
                }
            }
            InterrogativeType::WhoObject | InterrogativeType::WhatObject => {
                if taken(cx, vp, DiscourseFunction::Object).is_empty() {
                    tracing::warn!("{:?} question without an object, left declarative", kind);
                    frame.interrogative = None;
                    return Ok(lead);
                }
                let base = if kind == InterrogativeType::WhoObject { "qui" } else { "que" };
                lead.push(cx.required_word(FR, base, LexicalCategory::Pronoun)?);
                if !embedded {
                    lead.extend(self.est_ce_que(cx, false)?);
                }
            }
            InterrogativeType::WhoIndirectObject => {
                if taken(cx, vp, DiscourseFunction::IndirectObject).is_empty() {
                    tracing::warn!("indirect-object question without one, left declarative");
                    frame.interrogative = None;
                    return Ok(lead);
                }
                lead.push(cx.required_word(FR, "à", LexicalCategory::Preposition)?);
                lead.push(cx.required_word(FR, "qui", LexicalCategory::Pronoun)?);
                if !embedded {
                    lead.extend(self.est_ce_que(cx, false)?);
                }
            }
            InterrogativeType::Where
            | InterrogativeType::Why
            | InterrogativeType::How
            | InterrogativeType::HowPredicate => {
                let base = match kind {
                    InterrogativeType::Where => "où",
                    InterrogativeType::Why => "pourquoi",
                    _ => "comment",
                };
                if kind == InterrogativeType::HowPredicate {
                    if let Some(vp) = vp {
                        cx.tree.set_slot(vp, Feature::Complements, Vec::new());
                    }
                }
                lead.push(cx.lexical_word(FR, base, LexicalCategory::Adverb));
                if !embedded {
                    lead.extend(self.est_ce_que(cx, false)?);
                }
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
                    return Ok(lead);
                };
                cx.tree.set(questioned, Feature::Number, NumberAgreement::Plural);
                cx.tree.unset(questioned, Feature::Specifier);
                lead.push(cx.lexical_word(FR, "combien", LexicalCategory::Adverb));
                lead.push(cx.required_word(FR, "de", LexicalCategory::Preposition)?);
                lead.extend(cx.realise(questioned)?);
                if passive {
                    if let Some(vp) = vp {
                        let mut plural = Agreement::from_features(cx.tree.features(vp));
                        plural.number = NumberAgreement::Plural;
                        plural.write_to(cx.tree, vp);
                    }
                } else if !embedded {
                    lead.extend(self.est_ce_que(cx, false)?);
                }
            }
        }
        tracing::trace!("french {:?} question", kind);
        Ok(lead)
    }
}

impl ClauseHelper for ClauseRules {
    fn realise(
        &self,
        cx: &mut SyntaxContext<'_>,
        clause: ElementId,
    ) -> Result<Option<ElementId>, RealiseError> {
        let mut frame = prepare_clause(cx, clause, FR, "par")?;
        let features = cx.tree.features(clause).clone();
        let mut out = Vec::new();

        out.extend(self.complementiser(cx, clause, &frame)?);
        if let Some(cue) = features.element(Feature::CuePhrase) {
            if let Some(done) = cx.realise(cue)? {
                out.push(done);
                if cx.config.cue_phrase_comma {
                    out.push(cx.canned(",", FR));
                }
            }
        }
        out.extend(cx.realise_all(&features.elements(Feature::FrontModifiers))?);

        if let Some(function) = frame.relative {
            out.extend(self.relative_pronoun(cx, &mut frame, function)?);
        } else if let Some(kind) = frame.interrogative {
            out.extend(self.question(cx, &mut frame, kind)?);
            if frame.interrogative.is_none() {
                cx.tree.unset(clause, Feature::InterrogativeType);
            }
        }
        out.extend(cx.realise_all(&features.elements(Feature::Premodifiers))?);

        if frame.imperative {
            frame.subjects.clear();
        }
        if let Some(subject) = join_subjects(cx.tree, clause, &frame.subjects) {
            out.extend(cx.realise(subject)?);
        }
        if let Some(vp) = frame.verb_phrase {
            out.extend(cx.realise(vp)?);
        }

        let complements = features.elements(Feature::Complements);
        cx.subordinate(&complements);
        out.extend(cx.realise_all(&complements)?);
        out.extend(cx.realise_all(&features.elements(Feature::Postmodifiers))?);
        Ok(cx.list(out, FR))
    }
}
