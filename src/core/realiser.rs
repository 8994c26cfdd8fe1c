/// The realiser: syntax → morphology → orthography over a working copy
/// of the caller's tree.
///
/// Built via `Realiser::builder()`. Holds the lexicons, the helper
/// registry and the house-style configuration; nothing else is global.
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::core::config::{ConfigError, LexiconSource, RealiserConfig};
use crate::core::factory::Factory;
use crate::core::lexicon::{Lexicon, LexiconError, LexiconSet, MemoryLexicon};
use crate::core::morphology;
use crate::core::orthography;
use crate::core::registry::HelperRegistry;
use crate::core::syntax::SyntaxContext;
use crate::schema::category::{DocumentKind, PhraseCategory};
use crate::schema::element::{Element, ElementId, ElementKind, ElementTree};
use crate::schema::feature::{ClauseStatus, Feature};
use crate::schema::language::Language;

#[derive(Debug, Error)]
pub enum RealiseError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("unsupported combination: {0}")]
    UnsupportedCombination(String),
    #[error("element not in tree: {0:?}")]
    DanglingElement(ElementId),
}

pub struct Realiser {
    lexicons: LexiconSet,
    registry: HelperRegistry,
    config: RealiserConfig,
}

/// Builder for constructing a `Realiser`.
pub struct RealiserBuilder {
    language: Option<Language>,
    lexicon_paths: Vec<LexiconSource>,
    /// Directly provided lexicons (for testing without files).
    lexicons: Vec<(Language, Arc<dyn Lexicon>)>,
    config_file: Option<PathBuf>,
    config: Option<RealiserConfig>,
}

impl Realiser {
    pub fn builder() -> RealiserBuilder {
        RealiserBuilder {
            language: None,
            lexicon_paths: Vec::new(),
            lexicons: Vec::new(),
            config_file: None,
            config: None,
        }
    }

    pub fn config(&self) -> &RealiserConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    pub fn lexicon(&self, language: Language) -> &dyn Lexicon {
        self.lexicons.get(language)
    }

    pub fn registry(&self) -> &HelperRegistry {
        &self.registry
    }

    /// A factory over this realiser's lexicon for `language`.
    pub fn factory(&self, language: Language) -> Factory {
        Factory::new(language, self.lexicons.shared(language))
    }

    /// A factory in the configured default language.
    pub fn default_factory(&self) -> Factory {
        self.factory(self.config.language)
    }

    /// Realise `id` on a snapshot of `tree`. The returned element is the
    /// snapshot's copy with its realisation set; `tree` is left untouched.
    pub fn realise(&self, tree: &ElementTree, id: ElementId) -> Result<Element, RealiseError> {
        let (work, text) = self.realise_snapshot(tree, id)?;
        let mut element = work.get(id).cloned().ok_or(RealiseError::DanglingElement(id))?;
        element.realisation = Some(text);
        Ok(element)
    }

    /// Realised text of `id`, without sentence finishing.
    pub fn realise_text(&self, tree: &ElementTree, id: ElementId) -> Result<String, RealiseError> {
        let element = self.realise(tree, id)?;
        Ok(element.realisation.unwrap_or_default())
    }

    /// Realised text of `id` as a sentence: capitalised and punctuated per
    /// the configuration, "?" for questions.
    pub fn realise_sentence(&self, tree: &ElementTree, id: ElementId) -> Result<String, RealiseError> {
        let (work, text) = self.realise_snapshot(tree, id)?;
        if matches!(work.kind(id), Some(ElementKind::Document(_))) {
            return Ok(text);
        }
        // a question the syntax stage dropped is a statement
        Ok(orthography::finish_sentence(
            &text,
            is_question(&work, id),
            self.config.capitalise,
            self.config.punctuate,
        ))
    }

    fn realise_snapshot(
        &self,
        tree: &ElementTree,
        id: ElementId,
    ) -> Result<(ElementTree, String), RealiseError> {
        if !tree.contains(id) {
            return Err(RealiseError::DanglingElement(id));
        }
        let mut work = tree.clone();
        let text = self.realise_in(&mut work, id)?;
        Ok((work, text))
    }

    /// Re-apply the orthography rules of `language` to free text.
    pub fn respell(&self, text: &str, language: Language) -> String {
        orthography::respell(text, language, self.lexicons.get(language), &self.registry)
    }

    fn realise_in(&self, tree: &mut ElementTree, id: ElementId) -> Result<String, RealiseError> {
        let text = match tree.kind(id) {
            Some(ElementKind::Document(DocumentKind::Document)) => {
                self.join_components(tree, id, "\n\n")?
            }
            Some(ElementKind::Document(DocumentKind::Paragraph)) => {
                self.join_components(tree, id, " ")?
            }
            Some(ElementKind::Document(DocumentKind::Sentence)) => {
                let text = self.pipeline(tree, id)?;
                orthography::finish_sentence(
                    &text,
                    is_question(tree, id),
                    self.config.capitalise,
                    self.config.punctuate,
                )
            }
            Some(_) => self.pipeline(tree, id)?,
            None => return Err(RealiseError::DanglingElement(id)),
        };
        tree.set_realisation(id, text.clone());
        Ok(text)
    }

    fn join_components(
        &self,
        tree: &mut ElementTree,
        id: ElementId,
        separator: &str,
    ) -> Result<String, RealiseError> {
        let mut parts = Vec::new();
        for component in tree.slot(id, Feature::Components) {
            let text = match tree.kind(component) {
                Some(ElementKind::Document(_)) => self.realise_in(tree, component)?,
                // a bare clause in a paragraph still reads as a sentence
                Some(_) => {
                    let text = self.pipeline(tree, component)?;
                    let finished = orthography::finish_sentence(
                        &text,
                        is_question(tree, component),
                        self.config.capitalise,
                        self.config.punctuate,
                    );
                    tree.set_realisation(component, finished.clone());
                    finished
                }
                None => return Err(RealiseError::DanglingElement(component)),
            };
            if !text.is_empty() {
                parts.push(text);
            }
        }
        Ok(parts.join(separator))
    }

    fn pipeline(&self, tree: &mut ElementTree, id: ElementId) -> Result<String, RealiseError> {
        let root = {
            let mut cx = SyntaxContext::new(tree, &self.lexicons, &self.registry, &self.config);
            cx.realise(id)?
        };
        let Some(root) = root else {
            tracing::debug!("element #{} realised to nothing", id.0);
            return Ok(String::new());
        };
        tracing::debug!("syntax done for #{}, {} elements in tree", id.0, tree.len());

        let leaves = morphology::inflect_leaves(tree, &self.registry, root);
        let mut tokens = orthography::tokens_from(tree, &leaves);
        orthography::apply(&self.registry, &mut tokens);
        let text = orthography::linearise(&tokens);
        tracing::debug!("orthography produced '{}'", text);
        Ok(text)
    }
}

/// A matrix clause with an interrogative type, or a sentence holding one.
fn is_question(tree: &ElementTree, id: ElementId) -> bool {
    match tree.kind(id) {
        Some(ElementKind::Phrase(PhraseCategory::Clause)) => {
            let features = tree.features(id);
            features.has(Feature::InterrogativeType)
                && features.typed(Feature::ClauseStatus) != Some(ClauseStatus::Subordinate)
        }
        Some(ElementKind::Document(DocumentKind::Sentence)) => tree
            .slot(id, Feature::Components)
            .iter()
            .any(|c| is_question(tree, *c)),
        _ => false,
    }
}

impl RealiserBuilder {
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Merge a RON lexicon file over the built-in lexicon of `language`.
    pub fn lexicon_path(mut self, language: Language, path: impl AsRef<Path>) -> Self {
        self.lexicon_paths.push(LexiconSource {
            language,
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    /// Provide a lexicon directly (for testing without files).
    pub fn with_lexicon(mut self, language: Language, lexicon: Arc<dyn Lexicon>) -> Self {
        self.lexicons.push((language, lexicon));
        self
    }

    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide a configuration directly (for testing without files).
    pub fn config(mut self, config: RealiserConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<Realiser, RealiseError> {
        let mut config = match (self.config, &self.config_file) {
            (Some(config), _) => config,
            (None, Some(path)) => RealiserConfig::load_from_ron(path)?,
            (None, None) => RealiserConfig::default(),
        };
        if let Some(language) = self.language {
            config.language = language;
        }

        let mut lexicons = LexiconSet::builtin()?;

        // Lexicon files extend the built-in data, later files first
        let mut extended: [Option<MemoryLexicon>; Language::COUNT] = Default::default();
        for source in config.lexicons.iter().chain(self.lexicon_paths.iter()) {
            let extra = MemoryLexicon::load_from_ron(source.language, &source.path)?;
            let slot = &mut extended[source.language.index()];
            let mut base = match slot.take() {
                Some(lexicon) => lexicon,
                None => MemoryLexicon::builtin(source.language)?,
            };
            base.merge(extra);
            tracing::debug!("merged lexicon {}", source.path.display());
            *slot = Some(base);
        }
        for language in Language::ALL {
            if let Some(lexicon) = extended[language.index()].take() {
                lexicons.set(language, Arc::new(lexicon));
            }
        }
        for (language, lexicon) in self.lexicons {
            lexicons.set(language, lexicon);
        }

        for language in Language::ALL {
            let mut missing = lexicons.get(language).missing_closed_class();
            for error in &missing {
                tracing::warn!("{}", error);
            }
            if !missing.is_empty() {
                return Err(missing.remove(0).into());
            }
        }

        Ok(Realiser {
            lexicons,
            registry: HelperRegistry::new(),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::category::LexicalCategory;

    #[test]
    fn builds_with_builtin_lexicons() {
        let realiser = Realiser::builder().language(Language::French).build().unwrap();
        assert_eq!(realiser.language(), Language::French);
        assert!(realiser.lexicon(Language::English).has_word("be", Some(LexicalCategory::Verb)));
    }

    #[test]
    fn lexicon_without_closed_class_words_is_rejected() {
        let empty = Arc::new(MemoryLexicon::new(Language::English));
        let result = Realiser::builder().with_lexicon(Language::English, empty).build();
        assert!(matches!(
            result,
            Err(RealiseError::Lexicon(LexiconError::MissingClosedClassWord { .. }))
        ));
    }

    #[test]
    fn dangling_ids_are_errors() {
        let realiser = Realiser::builder().build().unwrap();
        let tree = ElementTree::new(Language::English);
        assert!(matches!(
            realiser.realise(&tree, ElementId(3)),
            Err(RealiseError::DanglingElement(ElementId(3)))
        ));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let result = Realiser::builder().config_file("does/not/exist.ron").build();
        assert!(matches!(result, Err(RealiseError::Config(ConfigError::Io(_)))));
    }

    #[test]
    fn caller_tree_is_not_mutated() {
        let realiser = Realiser::builder().build().unwrap();
        let mut factory = realiser.factory(Language::English);
        let np = factory.noun_phrase("the", "woman");
        let before = factory.tree().clone();
        let element = realiser.realise(factory.tree(), np).unwrap();
        assert_eq!(element.realisation.as_deref(), Some("the woman"));
        assert_eq!(factory.tree(), &before);
    }
}
