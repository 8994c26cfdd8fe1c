use crate::core::realiser::RealiseError;
use crate::core::registry::PhraseHelper;
use crate::core::syntax::{realise_coordination, realise_generic_phrase, SyntaxContext};
use crate::schema::category::{LexicalCategory, PhraseCategory};
use crate::schema::element::ElementId;
use crate::schema::feature::Feature;
use crate::schema::language::Language;

const FR: Language = Language::French;

/// French modifier phrases and coordination. Degree is analytic:
/// "plus grand", "la plus grande".
#[derive(Debug, Default)]
pub struct PhraseRules;

impl PhraseHelper for PhraseRules {
    fn realise(
        &self,
        cx: &mut SyntaxContext<'_>,
        phrase: ElementId,
    ) -> Result<Option<ElementId>, RealiseError> {
        if cx.tree.phrase_category(phrase) != Some(PhraseCategory::AdjectivePhrase) {
            return realise_generic_phrase(cx, phrase, FR);
        }
        let features = cx.tree.features(phrase).clone();
        let superlative = features.bool(Feature::Superlative);
        let comparative = superlative || features.bool(Feature::Comparative);
        let mut out = Vec::new();
        if superlative {
            let article = cx.required_word(FR, "le", LexicalCategory::Determiner)?;
            if let Some(fm) = cx.tree.features_mut(article) {
                fm.inherit(&features, Feature::Gender);
                fm.inherit(&features, Feature::Number);
            }
            out.push(article);
        }
        if comparative {
            out.push(cx.lexical_word(FR, "plus", LexicalCategory::Adverb));
            // degree is spelled out here, not by the adjective's morphology
            if let Some(fm) = cx.tree.features_mut(phrase) {
                fm.remove(Feature::Comparative);
                fm.remove(Feature::Superlative);
            }
        }
        out.extend(realise_generic_phrase(cx, phrase, FR)?);
        Ok(cx.list(out, FR))
    }

    fn realise_coordinated(
        &self,
        cx: &mut SyntaxContext<'_>,
        phrase: ElementId,
    ) -> Result<Option<ElementId>, RealiseError> {
        realise_coordination(cx, phrase, FR, "et")
    }
}
