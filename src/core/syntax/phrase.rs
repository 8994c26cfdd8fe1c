/// Shared realisation of adjective, adverb, prepositional and canned-text
/// phrases, and of coordinations.
use crate::core::realiser::RealiseError;
use crate::core::syntax::SyntaxContext;
use crate::schema::category::LexicalCategory;
use crate::schema::element::ElementId;
use crate::schema::feature::Feature;
use crate::schema::language::Language;

/// Features a modifier phrase passes on to its head word.
const HEAD_FEATURES: [Feature; 4] = [
    Feature::Gender,
    Feature::Number,
    Feature::Comparative,
    Feature::Superlative,
];

/// Premodifiers, head, complements, postmodifiers.
pub(crate) fn realise_generic_phrase(
    cx: &mut SyntaxContext<'_>,
    phrase: ElementId,
    language: Language,
) -> Result<Option<ElementId>, RealiseError> {
    let features = cx.tree.features(phrase).clone();
    let head = cx.tree.head(phrase);
    if let Some(head) = head {
        for feature in HEAD_FEATURES {
            if let Some(value) = features.get(feature) {
                cx.tree.set(head, feature, value.clone());
            }
        }
    }

    let mut out = cx.realise_all(&features.elements(Feature::Premodifiers))?;
    if let Some(head) = head {
        out.extend(cx.realise(head)?);
    }
    let complements = features.elements(Feature::Complements);
    cx.subordinate(&complements);
    out.extend(cx.realise_all(&complements)?);
    out.extend(cx.realise_all(&features.elements(Feature::Postmodifiers))?);
    Ok(cx.list(out, language))
}

/// `a, b and c`: commas between coordinates, the conjunction before the last.
pub(crate) fn realise_coordination(
    cx: &mut SyntaxContext<'_>,
    coordination: ElementId,
    language: Language,
    default_conjunction: &str,
) -> Result<Option<ElementId>, RealiseError> {
    let coordinates = cx.tree.slot(coordination, Feature::Coordinates);
    let function = cx.tree.features(coordination).function();
    for coordinate in &coordinates {
        if let Some(function) = function {
            cx.tree.set(*coordinate, Feature::DiscourseFunction, function);
        }
    }
    let parts = cx.realise_all(&coordinates)?;
    if parts.len() < 2 {
        return Ok(cx.list(parts, language));
    }

    let conjunction = cx
        .tree
        .feature_text(coordination, Feature::Conjunction)
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| default_conjunction.to_string());
    let last = parts.len() - 1;
    let mut out = Vec::with_capacity(parts.len() * 2);
    for (i, part) in parts.into_iter().enumerate() {
        if i == last {
            out.push(cx.lexical_word(language, &conjunction, LexicalCategory::Conjunction));
        } else if i > 0 {
            out.push(cx.canned(",", language));
        }
        out.push(part);
    }
    Ok(cx.list(out, language))
}
