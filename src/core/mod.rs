pub mod config;
pub mod factory;
pub mod lexicon;
pub mod morphology;
pub mod orthography;
pub mod realiser;
pub mod registry;
pub mod syntax;
