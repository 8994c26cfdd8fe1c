pub mod category;
pub mod element;
pub mod feature;
pub mod language;
pub mod word;
