//! French syntax rules.
mod clause;
mod noun_phrase;
mod phrase;
mod verb_phrase;

pub use clause::ClauseRules;
pub use noun_phrase::NounPhraseRules;
pub use phrase::PhraseRules;
pub use verb_phrase::VerbPhraseRules;
