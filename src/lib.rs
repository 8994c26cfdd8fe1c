//! NLG Realiser: rule-based surface realisation for English and French.
//!
//! Turns a tree of typed, feature-tagged elements into text through three
//! stages: syntax (phrase ordering, auxiliaries, clitics, agreement),
//! morphology (inflection), and orthography (elision, contraction,
//! punctuation). Each language plugs in its own rule set through the
//! helper registry.

pub mod core;
pub mod schema;

pub use crate::core::factory::Factory;
pub use crate::core::realiser::{RealiseError, Realiser};
