/// Lexicon collaborator: word lookup by base form or features, and RON loading.
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::schema::category::LexicalCategory;
use crate::schema::feature::{Gender, NumberAgreement, Person, PronounCase};
use crate::schema::language::Language;
use crate::schema::word::WordEntry;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("{language} lexicon is missing required {category} '{word}'")]
    MissingClosedClassWord {
        word: String,
        category: LexicalCategory,
        language: Language,
    },
}

/// Closed-class words each language's grammar cannot do without.
pub fn closed_class_words(language: Language) -> &'static [(&'static str, LexicalCategory)] {
    use LexicalCategory::*;
    match language {
        Language::English => &[
            ("be", Verb),
            ("have", Verb),
            ("do", Verb),
            ("not", Adverb),
            ("will", Modal),
            ("would", Modal),
            ("to", Preposition),
            ("by", Preposition),
            ("that", Complementiser),
            ("whether", Complementiser),
            ("and", Conjunction),
            ("some", Determiner),
            ("who", Pronoun),
            ("what", Pronoun),
        ],
        Language::French => &[
            ("être", Verb),
            ("avoir", Verb),
            ("ne", Adverb),
            ("pas", Adverb),
            ("que", Complementiser),
            ("si", Complementiser),
            ("de", Preposition),
            ("à", Preposition),
            ("par", Preposition),
            ("en", Preposition),
            ("et", Conjunction),
            ("le", Determiner),
            ("qui", Pronoun),
            ("que", Pronoun),
        ],
    }
}

/// Feature constraints for `Lexicon::get_word`. Unset fields match
/// anything; an entry field left unset matches any requested value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordQuery {
    pub person: Option<Person>,
    pub number: Option<NumberAgreement>,
    pub gender: Option<Gender>,
    pub case: Option<PronounCase>,
    pub reflexive: Option<bool>,
}

impl WordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(mut self, person: Person) -> Self {
        self.person = Some(person);
        self
    }

    pub fn number(mut self, number: NumberAgreement) -> Self {
        self.number = Some(number);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn case(mut self, case: PronounCase) -> Self {
        self.case = Some(case);
        self
    }

    pub fn reflexive(mut self, reflexive: bool) -> Self {
        self.reflexive = Some(reflexive);
        self
    }

    /// Match score: `None` when the entry contradicts the query, otherwise
    /// the number of constraints it satisfies exactly.
    pub fn score(&self, entry: &WordEntry) -> Option<u32> {
        if entry.adverbial {
            return None;
        }
        let mut score = 0;
        score += field_score(self.person, entry.person)?;
        score += field_score(self.number, entry.number)?;
        score += field_score(self.gender, entry.gender)?;
        score += field_score(self.case, entry.case)?;
        match self.reflexive {
            Some(reflexive) if entry.reflexive != reflexive => return None,
            Some(_) => score += 1,
            // reflexive forms are only handed out on request
            None if entry.reflexive => return None,
            None => {}
        }
        Some(score)
    }
}

fn field_score<T: PartialEq>(wanted: Option<T>, have: Option<T>) -> Option<u32> {
    match (wanted, have) {
        (Some(w), Some(h)) if w == h => Some(1),
        (Some(_), Some(_)) => None,
        _ => Some(0),
    }
}

/// Word lookup interface consulted by the syntax and morphology stages.
pub trait Lexicon: Send + Sync + fmt::Debug {
    fn language(&self) -> Language;

    /// All entries with this base form, optionally restricted to a category.
    fn get_words(&self, base: &str, category: Option<LexicalCategory>) -> Vec<Arc<WordEntry>>;

    /// Best entry of `category` matching `query`.
    fn get_word(&self, category: LexicalCategory, query: &WordQuery) -> Option<Arc<WordEntry>>;

    /// Entries whose spelled-out feminine, plural or liaison form is `form`
    /// ("la", "les", "ma" → their determiner entries).
    fn get_words_by_form(&self, _form: &str, _category: Option<LexicalCategory>) -> Vec<Arc<WordEntry>> {
        Vec::new()
    }

    fn has_word(&self, base: &str, category: Option<LexicalCategory>) -> bool {
        !self.get_words(base, category).is_empty()
    }

    /// The entry for `base`, or a fresh regular entry when the lexicon has
    /// none. Never fails.
    fn lookup_word(&self, base: &str, category: Option<LexicalCategory>) -> Arc<WordEntry> {
        if let Some(entry) = self.get_words(base, category).into_iter().next() {
            return entry;
        }
        tracing::warn!("'{}' not in {} lexicon, using a regular entry", base, self.language());
        Arc::new(WordEntry::new(base, category.unwrap_or(LexicalCategory::Any)))
    }

    /// Every closed-class word this lexicon lacks.
    fn missing_closed_class(&self) -> Vec<LexiconError> {
        closed_class_words(self.language())
            .iter()
            .filter_map(|(word, category)| self.require(word, *category).err())
            .collect()
    }

    /// A closed-class word the grammar cannot do without.
    fn require(&self, base: &str, category: LexicalCategory) -> Result<Arc<WordEntry>, LexiconError> {
        self.get_words(base, Some(category))
            .into_iter()
            .next()
            .ok_or_else(|| LexiconError::MissingClosedClassWord {
                word: base.to_string(),
                category,
                language: self.language(),
            })
    }
}

/// Lexicon held in memory, loaded from a RON list of entries.
#[derive(Debug, Clone)]
pub struct MemoryLexicon {
    language: Language,
    entries: Vec<Arc<WordEntry>>,
    by_base: FxHashMap<String, Vec<usize>>,
    by_form: FxHashMap<String, Vec<usize>>,
    by_category: FxHashMap<LexicalCategory, Vec<usize>>,
}

const ENGLISH_DATA: &str = include_str!("../../data/lexicon/english.ron");
const FRENCH_DATA: &str = include_str!("../../data/lexicon/french.ron");

impl MemoryLexicon {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            entries: Vec::new(),
            by_base: FxHashMap::default(),
            by_form: FxHashMap::default(),
            by_category: FxHashMap::default(),
        }
    }

    /// The built-in lexicon for a language.
    pub fn builtin(language: Language) -> Result<Self, LexiconError> {
        let data = match language {
            Language::English => ENGLISH_DATA,
            Language::French => FRENCH_DATA,
        };
        Self::parse_ron(language, data)
    }

    pub fn load_from_ron(language: Language, path: &Path) -> Result<Self, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(language, &contents)
    }

    pub fn parse_ron(language: Language, input: &str) -> Result<Self, LexiconError> {
        let raw: Vec<WordEntry> = ron::from_str(input)?;
        let mut lexicon = Self::new(language);
        for entry in raw {
            lexicon.add(entry);
        }
        tracing::debug!("loaded {} {} lexicon entries", lexicon.len(), language);
        Ok(lexicon)
    }

    pub fn add(&mut self, entry: WordEntry) {
        let index = self.entries.len();
        self.by_base.entry(entry.base.clone()).or_default().push(index);
        let forms = [&entry.feminine, &entry.plural, &entry.feminine_plural, &entry.liaison];
        for form in forms.into_iter().flatten() {
            if *form != entry.base {
                self.by_form.entry(form.clone()).or_default().push(index);
            }
        }
        self.by_category.entry(entry.category).or_default().push(index);
        self.entries.push(Arc::new(entry));
    }

    /// Merge another lexicon; its entries are consulted first.
    pub fn merge(&mut self, other: MemoryLexicon) {
        let mut merged = Self::new(self.language);
        for entry in other.entries.iter().chain(self.entries.iter()) {
            merged.add(entry.as_ref().clone());
        }
        *self = merged;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Arc<WordEntry>> {
        self.entries.iter()
    }
}

impl Lexicon for MemoryLexicon {
    fn language(&self) -> Language {
        self.language
    }

    fn get_words(&self, base: &str, category: Option<LexicalCategory>) -> Vec<Arc<WordEntry>> {
        let Some(indices) = self.by_base.get(base) else {
            return Vec::new();
        };
        indices
            .iter()
            .map(|i| &self.entries[*i])
            .filter(|e| match category {
                None | Some(LexicalCategory::Any) => true,
                Some(c) => e.category == c,
            })
            .cloned()
            .collect()
    }

    fn get_words_by_form(&self, form: &str, category: Option<LexicalCategory>) -> Vec<Arc<WordEntry>> {
        let Some(indices) = self.by_form.get(form) else {
            return Vec::new();
        };
        indices
            .iter()
            .map(|i| &self.entries[*i])
            .filter(|e| match category {
                None | Some(LexicalCategory::Any) => true,
                Some(c) => e.category == c,
            })
            .cloned()
            .collect()
    }

    fn get_word(&self, category: LexicalCategory, query: &WordQuery) -> Option<Arc<WordEntry>> {
        let indices = self.by_category.get(&category)?;
        let mut best: Option<(u32, usize)> = None;
        for i in indices {
            if let Some(score) = query.score(&self.entries[*i]) {
                if best.map(|(s, _)| score > s).unwrap_or(true) {
                    best = Some((score, *i));
                }
            }
        }
        best.map(|(_, i)| self.entries[i].clone())
    }
}

/// One lexicon per supported language.
#[derive(Debug, Clone)]
pub struct LexiconSet {
    lexicons: [Arc<dyn Lexicon>; Language::COUNT],
}

impl LexiconSet {
    /// The embedded lexicons of every language.
    pub fn builtin() -> Result<Self, LexiconError> {
        Ok(Self {
            lexicons: [
                Arc::new(MemoryLexicon::builtin(Language::English)?),
                Arc::new(MemoryLexicon::builtin(Language::French)?),
            ],
        })
    }

    pub fn get(&self, language: Language) -> &dyn Lexicon {
        self.lexicons[language.index()].as_ref()
    }

    pub fn shared(&self, language: Language) -> Arc<dyn Lexicon> {
        self.lexicons[language.index()].clone()
    }

    pub fn set(&mut self, language: Language, lexicon: Arc<dyn Lexicon>) {
        self.lexicons[language.index()] = lexicon;
    }
}
