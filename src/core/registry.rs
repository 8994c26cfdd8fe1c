/// Helper registry: per-language strategy dispatch for the six rule roles.
///
/// Each (language, role) slot is built on first use and kept for the life of
/// the registry. The registry is an ordinary value owned by the realiser and
/// passed down by reference.
use once_cell::sync::OnceCell;
use std::fmt;

use crate::core::morphology::MorphologyRules;
use crate::core::orthography::OrthographyRules;
use crate::core::realiser::RealiseError;
use crate::core::syntax::{english, french, SyntaxContext, VerbGroup};
use crate::schema::element::ElementId;
use crate::schema::language::Language;

pub trait ClauseHelper: Send + Sync {
    fn realise(&self, cx: &mut SyntaxContext<'_>, clause: ElementId)
        -> Result<Option<ElementId>, RealiseError>;
}

pub trait NounPhraseHelper: Send + Sync {
    fn realise(&self, cx: &mut SyntaxContext<'_>, phrase: ElementId)
        -> Result<Option<ElementId>, RealiseError>;
}

pub trait VerbPhraseHelper: Send + Sync {
    /// Build the ordered verb group. `inverted` asks for a group whose first
    /// element can be fronted before the subject.
    fn verb_group(
        &self,
        cx: &mut SyntaxContext<'_>,
        phrase: ElementId,
        inverted: bool,
    ) -> Result<VerbGroup, RealiseError>;

    /// Wrap what is left of a verb group with complements and modifiers.
    fn assemble(
        &self,
        cx: &mut SyntaxContext<'_>,
        phrase: ElementId,
        group: VerbGroup,
    ) -> Result<Option<ElementId>, RealiseError>;

    fn realise(&self, cx: &mut SyntaxContext<'_>, phrase: ElementId)
        -> Result<Option<ElementId>, RealiseError> {
        let group = self.verb_group(cx, phrase, false)?;
        self.assemble(cx, phrase, group)
    }
}

/// Adjective, adverb, prepositional and canned-text phrases, plus coordination.
pub trait PhraseHelper: Send + Sync {
    fn realise(&self, cx: &mut SyntaxContext<'_>, phrase: ElementId)
        -> Result<Option<ElementId>, RealiseError>;

    fn realise_coordinated(&self, cx: &mut SyntaxContext<'_>, phrase: ElementId)
        -> Result<Option<ElementId>, RealiseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Clause,
    NounPhrase,
    VerbPhrase,
    GenericPhrase,
    Morphology,
    Orthography,
}

/// A borrowed helper of one role.
#[derive(Clone, Copy)]
pub enum Helper<'r> {
    Clause(&'r dyn ClauseHelper),
    NounPhrase(&'r dyn NounPhraseHelper),
    VerbPhrase(&'r dyn VerbPhraseHelper),
    GenericPhrase(&'r dyn PhraseHelper),
    Morphology(&'r dyn MorphologyRules),
    Orthography(&'r dyn OrthographyRules),
}

impl fmt::Debug for Helper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self {
            Helper::Clause(_) => Role::Clause,
            Helper::NounPhrase(_) => Role::NounPhrase,
            Helper::VerbPhrase(_) => Role::VerbPhrase,
            Helper::GenericPhrase(_) => Role::GenericPhrase,
            Helper::Morphology(_) => Role::Morphology,
            Helper::Orthography(_) => Role::Orthography,
        };
        write!(f, "Helper({:?})", role)
    }
}

#[derive(Default)]
struct LanguageHelpers {
    clause: OnceCell<Box<dyn ClauseHelper>>,
    noun_phrase: OnceCell<Box<dyn NounPhraseHelper>>,
    verb_phrase: OnceCell<Box<dyn VerbPhraseHelper>>,
    phrase: OnceCell<Box<dyn PhraseHelper>>,
    morphology: OnceCell<Box<dyn MorphologyRules>>,
    orthography: OnceCell<Box<dyn OrthographyRules>>,
}

/// Lazily populated table of helpers, one slot per language and role.
#[derive(Default)]
pub struct HelperRegistry {
    languages: [LanguageHelpers; Language::COUNT],
}

impl fmt::Debug for HelperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut built = Vec::new();
        for lang in Language::ALL {
            let slots = &self.languages[lang.index()];
            let count = [
                slots.clause.get().is_some(),
                slots.noun_phrase.get().is_some(),
                slots.verb_phrase.get().is_some(),
                slots.phrase.get().is_some(),
                slots.morphology.get().is_some(),
                slots.orthography.get().is_some(),
            ]
            .iter()
            .filter(|b| **b)
            .count();
            built.push((lang, count));
        }
        f.debug_struct("HelperRegistry").field("built", &built).finish()
    }
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self, language: Language) -> &LanguageHelpers {
        &self.languages[language.index()]
    }

    pub fn helper_for(&self, language: Language, role: Role) -> Helper<'_> {
        match role {
            Role::Clause => Helper::Clause(self.clause(language)),
            Role::NounPhrase => Helper::NounPhrase(self.noun_phrase(language)),
            Role::VerbPhrase => Helper::VerbPhrase(self.verb_phrase(language)),
            Role::GenericPhrase => Helper::GenericPhrase(self.phrase(language)),
            Role::Morphology => Helper::Morphology(self.morphology(language)),
            Role::Orthography => Helper::Orthography(self.orthography(language)),
        }
    }

    pub fn clause(&self, language: Language) -> &dyn ClauseHelper {
        self.slots(language)
            .clause
            .get_or_init(|| {
                tracing::trace!("building {} clause helper", language);
                let helper: Box<dyn ClauseHelper> = match language {
                    Language::English => Box::new(english::ClauseRules),
                    Language::French => Box::new(french::ClauseRules),
                };
                helper
            })
            .as_ref()
    }

    pub fn noun_phrase(&self, language: Language) -> &dyn NounPhraseHelper {
        self.slots(language)
            .noun_phrase
            .get_or_init(|| {
                tracing::trace!("building {} noun phrase helper", language);
                let helper: Box<dyn NounPhraseHelper> = match language {
                    Language::English => Box::new(english::NounPhraseRules),
                    Language::French => Box::new(french::NounPhraseRules),
                };
                helper
            })
            .as_ref()
    }

    pub fn verb_phrase(&self, language: Language) -> &dyn VerbPhraseHelper {
        self.slots(language)
            .verb_phrase
            .get_or_init(|| {
                tracing::trace!("building {} verb phrase helper", language);
                let helper: Box<dyn VerbPhraseHelper> = match language {
                    Language::English => Box::new(english::VerbPhraseRules),
                    Language::French => Box::new(french::VerbPhraseRules),
                };
                helper
            })
            .as_ref()
    }

    pub fn phrase(&self, language: Language) -> &dyn PhraseHelper {
        self.slots(language)
            .phrase
            .get_or_init(|| {
                tracing::trace!("building {} phrase helper", language);
                let helper: Box<dyn PhraseHelper> = match language {
                    Language::English => Box::new(english::PhraseRules),
                    Language::French => Box::new(french::PhraseRules),
                };
                helper
            })
            .as_ref()
    }

    pub fn morphology(&self, language: Language) -> &dyn MorphologyRules {
        self.slots(language)
            .morphology
            .get_or_init(|| {
                tracing::trace!("building {} morphology rules", language);
                let helper: Box<dyn MorphologyRules> = match language {
                    Language::English => Box::new(crate::core::morphology::english::EnglishMorphology),
                    Language::French => Box::new(crate::core::morphology::french::FrenchMorphology),
                };
                helper
            })
            .as_ref()
    }

    pub fn orthography(&self, language: Language) -> &dyn OrthographyRules {
        self.slots(language)
            .orthography
            .get_or_init(|| {
                tracing::trace!("building {} orthography rules", language);
                let helper: Box<dyn OrthographyRules> = match language {
                    Language::English => Box::new(crate::core::orthography::english::EnglishOrthography),
                    Language::French => Box::new(crate::core::orthography::french::FrenchOrthography),
                };
                helper
            })
            .as_ref()
    }

    /// Number of helpers constructed so far for a language.
    pub fn built_count(&self, language: Language) -> usize {
        let slots = self.slots(language);
        [
            slots.clause.get().is_some(),
            slots.noun_phrase.get().is_some(),
            slots.verb_phrase.get().is_some(),
            slots.phrase.get().is_some(),
            slots.morphology.get().is_some(),
            slots.orthography.get().is_some(),
        ]
        .iter()
        .filter(|b| **b)
        .count()
    }
}
