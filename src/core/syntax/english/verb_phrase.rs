/// English verb group: modal → perfect "have" → progressive "be" →
/// passive "be" → main verb, each link fixing its successor's form.
use std::sync::Arc;

use crate::core::realiser::RealiseError;
use crate::core::registry::VerbPhraseHelper;
use crate::core::syntax::{ordered_complements, Agreement, SyntaxContext, VerbGroup};
use crate::schema::category::LexicalCategory;
use crate::schema::element::ElementId;
use crate::schema::feature::{DiscourseFunction, Feature, Form, Tense};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

const EN: Language = Language::English;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Modal,
    Support,
    Perfect,
    Progressive,
    Passive,
    Main,
}

impl Link {
    /// Form the next verb of the chain takes.
    fn next_form(self) -> Form {
        match self {
            Link::Modal | Link::Support | Link::Main => Form::BareInfinitive,
            Link::Perfect | Link::Passive => Form::PastParticiple,
            Link::Progressive => Form::PresentParticiple,
        }
    }
}

fn is_be(entry: &WordEntry) -> bool {
    entry.copular || entry.is("be")
}

#[derive(Debug, Default)]
pub struct VerbPhraseRules;

impl VerbPhraseRules {
    fn modal_entry(cx: &SyntaxContext<'_>, text: &str) -> Result<Arc<WordEntry>, RealiseError> {
        if text == "will" || text == "would" {
            return cx.require(EN, text, LexicalCategory::Modal);
        }
        let lexicon = cx.lexicon(EN);
        Ok(lexicon
            .get_words(text, Some(LexicalCategory::Modal))
            .into_iter()
            .next()
            .unwrap_or_else(|| lexicon.lookup_word(text, Some(LexicalCategory::Verb))))
    }
}

impl VerbPhraseHelper for VerbPhraseRules {
    fn verb_group(
        &self,
        cx: &mut SyntaxContext<'_>,
        vp: ElementId,
        inverted: bool,
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
        let mut tense = features.tense();
        let agreement = Agreement::from_features(&features);
        let negated = features.bool(Feature::Negated);
        let mut perfect = features.bool(Feature::Perfect);

        let mut links: Vec<(Arc<WordEntry>, Link)> = Vec::new();
        if form == Form::Normal {
            let modal = cx
                .tree
                .feature_text(vp, Feature::Modal)
                .filter(|m| !m.trim().is_empty())
                .or_else(|| match tense {
                    Tense::Future => Some("will".to_string()),
                    Tense::Conditional => Some("would".to_string()),
                    _ => None,
                });
            if let Some(modal) = modal {
                let entry = Self::modal_entry(cx, modal.trim())?;
                // past modality: "could" where the modal has a past form, else "must have"
                let past = tense == Tense::Past;
                if past && entry.past.is_none() {
                    perfect = true;
                }
                tense = if past && entry.past.is_some() {
                    Tense::Past
                } else {
                    Tense::Present
                };
                links.push((entry, Link::Modal));
            }
        } else if features.has(Feature::Modal) {
            tracing::debug!("modal ignored on non-finite verb phrase #{}", vp.0);
        }
        if perfect {
            links.push((cx.require(EN, "have", LexicalCategory::Verb)?, Link::Perfect));
        }
        if features.bool(Feature::Progressive) {
            links.push((cx.require(EN, "be", LexicalCategory::Verb)?, Link::Progressive));
        }
        if features.bool(Feature::Passive) {
            links.push((cx.require(EN, "be", LexicalCategory::Verb)?, Link::Passive));
        }
        links.push((main_entry.clone(), Link::Main));

        let needs_support = links.len() == 1
            && (negated || inverted)
            && (form == Form::Imperative || (form == Form::Normal && !is_be(&main_entry)))
            && matches!(tense, Tense::Present | Tense::Past);
        if needs_support {
            links.insert(0, (cx.require(EN, "do", LexicalCategory::Verb)?, Link::Support));
        }

        let mut verbs = Vec::with_capacity(links.len());
        let mut main_id = None;
        let mut previous: Option<Link> = None;
        for (entry, link) in links {
            let id = if link == Link::Main {
                let id = cx.inflect_copy(head, entry, EN);
                main_id = Some(id);
                id
            } else {
                cx.word(entry, EN)
            };
            match previous {
                None => {
                    let first_form = match form {
                        Form::Infinitive => Form::BareInfinitive,
                        Form::Gerund => Form::PresentParticiple,
                        other => other,
                    };
                    cx.tree.set(id, Feature::Form, first_form);
                    cx.tree.set(id, Feature::Tense, tense);
                    cx.tree.set(id, Feature::Person, agreement.person);
                    cx.tree.set(id, Feature::Number, agreement.number);
                }
                Some(prev) => cx.tree.set(id, Feature::Form, prev.next_form()),
            }
            previous = Some(link);
            verbs.push(id);
        }
        tracing::trace!("english verb group of {} for #{}", verbs.len(), vp.0);

        let not = if negated {
            Some(cx.required_word(EN, "not", LexicalCategory::Adverb)?)
        } else {
            None
        };
        let non_finite = !form.is_finite();
        let mut sequence = Vec::with_capacity(verbs.len() + 2);
        if non_finite {
            sequence.extend(not);
        }
        if form == Form::Infinitive {
            sequence.push(cx.required_word(EN, "to", LexicalCategory::Preposition)?);
        }
        for (i, id) in verbs.iter().enumerate() {
            sequence.push(*id);
            if i == 0 && !non_finite {
                sequence.extend(not);
            }
        }

        let split = main_id
            .and_then(|m| sequence.iter().position(|id| *id == m))
            .unwrap_or(sequence.len());
        let mut main = sequence.split_off(split);
        if let Some(particle) = cx.tree.feature_text(vp, Feature::Particle) {
            main.push(cx.lexical_word(EN, &particle, LexicalCategory::Adverb));
        }
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
            &[DiscourseFunction::IndirectObject, DiscourseFunction::Object],
        );
        cx.subordinate(&complements);
        out.extend(cx.realise_all(&complements)?);
        out.extend(cx.realise_all(&features.elements(Feature::Postmodifiers))?);
        Ok(cx.list(out, EN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RealiserConfig;
    use crate::core::lexicon::LexiconSet;
    use crate::core::registry::HelperRegistry;
    use crate::schema::category::PhraseCategory;
    use crate::schema::element::ElementTree;

    fn verb_phrase(tree: &mut ElementTree, lexicons: &LexiconSet, verb: &str) -> ElementId {
        let vp = tree.insert_phrase(PhraseCategory::VerbPhrase);
        let entry = lexicons
            .get(EN)
            .lookup_word(verb, Some(LexicalCategory::Verb));
        let head = tree.insert_word(entry);
        tree.set_head(vp, head);
        vp
    }

    fn bases(tree: &ElementTree, ids: &[ElementId]) -> Vec<String> {
        ids.iter()
            .map(|id| tree.base_form(*id).unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn inversion_brings_in_do() {
        let lexicons = LexiconSet::builtin().unwrap();
        let registry = HelperRegistry::new();
        let config = RealiserConfig::default();
        let mut tree = ElementTree::new(EN);
        let vp = verb_phrase(&mut tree, &lexicons, "chase");
        tree.set(vp, Feature::Tense, Tense::Past);
        let mut cx = SyntaxContext::new(&mut tree, &lexicons, &registry, &config);
        let group = VerbPhraseRules.verb_group(&mut cx, vp, true).unwrap();
        assert_eq!(bases(cx.tree, &group.auxiliaries), vec!["do"]);
        assert_eq!(bases(cx.tree, &group.main), vec!["chase"]);
        assert_eq!(cx.tree.features(group.main[0]).form(), Form::BareInfinitive);
        assert_eq!(cx.tree.features(group.auxiliaries[0]).tense(), Tense::Past);
    }

    #[test]
    fn full_chain_order_and_forms() {
        let lexicons = LexiconSet::builtin().unwrap();
        let registry = HelperRegistry::new();
        let config = RealiserConfig::default();
        let mut tree = ElementTree::new(EN);
        let vp = verb_phrase(&mut tree, &lexicons, "chase");
        tree.set(vp, Feature::Modal, "must");
        tree.set(vp, Feature::Perfect, true);
        tree.set(vp, Feature::Progressive, true);
        tree.set(vp, Feature::Passive, true);
        let mut cx = SyntaxContext::new(&mut tree, &lexicons, &registry, &config);
        let group = VerbPhraseRules.verb_group(&mut cx, vp, false).unwrap();
        assert_eq!(
            bases(cx.tree, &group.auxiliaries),
            vec!["must", "have", "be", "be"]
        );
        let forms: Vec<Form> = group
            .auxiliaries
            .iter()
            .chain(group.main.iter())
            .map(|id| cx.tree.features(*id).form())
            .collect();
        assert_eq!(
            forms,
            vec![
                Form::Normal,
                Form::BareInfinitive,
                Form::PastParticiple,
                Form::PresentParticiple,
                Form::PastParticiple
            ]
        );
    }

    #[test]
    fn negated_copula_needs_no_support() {
        let lexicons = LexiconSet::builtin().unwrap();
        let registry = HelperRegistry::new();
        let config = RealiserConfig::default();
        let mut tree = ElementTree::new(EN);
        let vp = verb_phrase(&mut tree, &lexicons, "be");
        tree.set(vp, Feature::Negated, true);
        let mut cx = SyntaxContext::new(&mut tree, &lexicons, &registry, &config);
        let group = VerbPhraseRules.verb_group(&mut cx, vp, false).unwrap();
        assert!(group.auxiliaries.is_empty());
        assert_eq!(bases(cx.tree, &group.main), vec!["be", "not"]);
    }
}
