use crate::core::realiser::RealiseError;
use crate::core::registry::PhraseHelper;
use crate::core::syntax::{realise_coordination, realise_generic_phrase, SyntaxContext};
use crate::schema::element::ElementId;
use crate::schema::language::Language;

/// English modifier phrases and coordination. Comparative and superlative
/// degrees are left to morphology ("bigger", "more beautiful").
#[derive(Debug, Default)]
pub struct PhraseRules;

impl PhraseHelper for PhraseRules {
    fn realise(
        &self,
        cx: &mut SyntaxContext<'_>,
        phrase: ElementId,
    ) -> Result<Option<ElementId>, RealiseError> {
        realise_generic_phrase(cx, phrase, Language::English)
    }

    fn realise_coordinated(
        &self,
        cx: &mut SyntaxContext<'_>,
        phrase: ElementId,
    ) -> Result<Option<ElementId>, RealiseError> {
        realise_coordination(cx, phrase, Language::English, "and")
    }
}
