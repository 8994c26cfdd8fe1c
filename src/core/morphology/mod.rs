/// Morphology stage. Turns the leaves of the syntax output into spelled
/// strings.
///
/// Every inflected word becomes a `String` element that keeps its lexicon
/// entry as `origin` and a copy of its features, so orthography can still
/// ask what a token was (a determiner, a word with an aspirated h).
pub mod english;
pub mod french;

use crate::core::registry::HelperRegistry;
use crate::schema::element::{Element, ElementId, ElementKind, ElementTree};
use crate::schema::feature::{Feature, FeatureMap, NumberAgreement};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

/// Nesting limit of the syntax output lists.
const MAX_DEPTH: usize = 256;

/// Per-language inflection of one word.
pub trait MorphologyRules: Send + Sync {
    /// Final spelling of `entry` under `features`. Words without an
    /// applicable rule come back as their base form.
    fn inflect(&self, entry: &WordEntry, features: &FeatureMap) -> String;
}

/// Flatten the syntax output under `root` into inflected string leaves, in
/// surface order.
pub fn inflect_leaves(
    tree: &mut ElementTree,
    registry: &HelperRegistry,
    root: ElementId,
) -> Vec<ElementId> {
    let mut out = Vec::new();
    let language = tree.language_of(root);
    walk(tree, registry, root, language, &mut out, 0);
    tracing::debug!("morphology produced {} leaves", out.len());
    out
}

fn walk(
    tree: &mut ElementTree,
    registry: &HelperRegistry,
    id: ElementId,
    inherited: Language,
    out: &mut Vec<ElementId>,
    depth: usize,
) {
    if depth > MAX_DEPTH {
        tracing::warn!("syntax output nested too deeply at #{}, truncated", id.0);
        return;
    }
    let Some(element) = tree.get(id) else {
        return;
    };
    let language = element.language.unwrap_or(inherited);
    match element.kind.clone() {
        ElementKind::List(items) => {
            for item in items {
                walk(tree, registry, item, language, out, depth + 1);
            }
        }
        ElementKind::Word(entry) | ElementKind::InflectedWord(entry) => {
            let features = element.features.clone();
            let text = if features.bool(Feature::NonMorph) {
                entry.base.clone()
            } else {
                registry.morphology(language).inflect(&entry, &features)
            };
            tracing::trace!("inflected '{}' as '{}'", entry.base, text);
            let mut leaf = Element::new(ElementKind::String {
                text,
                elided: false,
                origin: Some(entry),
            });
            leaf.features = features;
            leaf.language = Some(language);
            leaf.parent = element.parent;
            out.push(tree.insert(leaf));
        }
        ElementKind::String { .. } => {
            tree.set_language(id, language);
            out.push(id);
        }
        other => {
            tracing::warn!("unrealised {:?} element #{} skipped by morphology", other, id.0);
        }
    }
}

/// Index into a six-cell person × number paradigm (1s 2s 3s 1p 2p 3p).
pub(crate) fn paradigm_cell(features: &FeatureMap) -> usize {
    let person = match features.person().digit() {
        '1' => 0,
        '2' => 1,
        _ => 2,
    };
    match features.number() {
        NumberAgreement::Singular => person,
        NumberAgreement::Plural => person + 3,
    }
}

/// Lexicon key suffix for a paradigm cell: `1s` … `3p`.
pub(crate) fn cell_key(cell: usize) -> String {
    let number = if cell < 3 { 's' } else { 'p' };
    format!("{}{}", cell % 3 + 1, number)
}

pub(crate) fn is_vowel(c: char) -> bool {
    matches!(
        c.to_lowercase().next().unwrap_or(c),
        'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'à' | 'â' | 'ä' | 'é' | 'è' | 'ê' | 'ë' | 'î' | 'ï'
            | 'ô' | 'ö' | 'ù' | 'û' | 'ü' | 'œ' | 'æ'
    )
}

/// `word` without its last `n` characters.
pub(crate) fn drop_chars(word: &str, n: usize) -> &str {
    match word.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((i, _)) if n > 0 => &word[..i],
        _ if n == 0 => word,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::category::LexicalCategory;
    use crate::schema::feature::Person;
    use std::sync::Arc;

    #[test]
    fn cells_cover_the_paradigm() {
        let mut features = FeatureMap::new();
        assert_eq!(paradigm_cell(&features), 2);
        features.set(Feature::Person, Person::First);
        features.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(paradigm_cell(&features), 3);
        assert_eq!(cell_key(3), "1p");
        assert_eq!(cell_key(1), "2s");
    }

    #[test]
    fn drop_chars_is_char_aware() {
        assert_eq!(drop_chars("créer", 2), "cré");
        assert_eq!(drop_chars("été", 1), "ét");
        assert_eq!(drop_chars("a", 3), "");
        assert_eq!(drop_chars("mot", 0), "mot");
    }

    #[test]
    fn leaves_keep_origin_and_language() {
        let registry = HelperRegistry::new();
        let mut tree = ElementTree::new(Language::French);
        let mut chat = WordEntry::new("chat", LexicalCategory::Noun);
        chat.gender = Some(crate::schema::feature::Gender::Masculine);
        let word = tree.insert_inflected(Arc::new(chat));
        tree.set(word, Feature::Number, NumberAgreement::Plural);
        let comma = tree.insert_string(",");
        let list = tree.insert_list(vec![word, comma]);
        let leaves = inflect_leaves(&mut tree, &registry, list);
        assert_eq!(leaves.len(), 2);
        match tree.kind(leaves[0]) {
            Some(ElementKind::String { text, origin, .. }) => {
                assert_eq!(text, "chats");
                assert_eq!(origin.as_ref().map(|e| e.base.as_str()), Some("chat"));
            }
            other => panic!("unexpected leaf {:?}", other),
        }
        assert_eq!(tree.language_of(leaves[0]), Language::French);
        assert_eq!(leaves[1], comma);
    }
}
