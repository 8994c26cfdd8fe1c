/// Grammatical features: a closed key set with typed values and lenient accessors.
///
/// Every accessor degrades to a neutral answer on absence or type mismatch:
/// booleans read as `false`, numbers and typed values as `None`, element
/// lists as empty. Nothing here panics or returns an error.
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::element::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tense {
    Past,
    #[default]
    Present,
    Future,
    Conditional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Form {
    #[default]
    Normal,
    Infinitive,
    BareInfinitive,
    Gerund,
    PresentParticiple,
    PastParticiple,
    Imperative,
    Subjunctive,
}

impl Form {
    /// Forms that carry tense and subject agreement.
    pub fn is_finite(self) -> bool {
        matches!(self, Form::Normal | Form::Imperative | Form::Subjunctive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NumberAgreement {
    #[default]
    Singular,
    Plural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Person {
    First,
    Second,
    #[default]
    Third,
}

impl Person {
    pub fn digit(self) -> char {
        match self {
            Person::First => '1',
            Person::Second => '2',
            Person::Third => '3',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Masculine,
    Feminine,
    Neuter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterrogativeType {
    YesNo,
    WhoSubject,
    WhatSubject,
    WhoObject,
    WhatObject,
    WhoIndirectObject,
    Where,
    Why,
    How,
    HowMany,
    HowPredicate,
}

impl InterrogativeType {
    /// Questions about the subject keep declarative word order.
    pub fn is_subject_question(self) -> bool {
        matches!(self, InterrogativeType::WhoSubject | InterrogativeType::WhatSubject)
    }

    pub fn is_object_question(self) -> bool {
        matches!(
            self,
            InterrogativeType::WhoObject | InterrogativeType::WhatObject | InterrogativeType::HowMany
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscourseFunction {
    Subject,
    Object,
    IndirectObject,
    Complement,
    Specifier,
    PreModifier,
    PostModifier,
    FrontModifier,
    CuePhrase,
    Head,
    VerbPhrase,
    Auxiliary,
    Conjunction,
    Complementiser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClauseStatus {
    #[default]
    Matrix,
    Subordinate,
}

/// Pronoun case, chosen from the discourse function of the pronominal phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PronounCase {
    Nominative,
    Accusative,
    Dative,
    Genitive,
    Possessive,
    Reflexive,
    Stressed,
}

/// Inflection class of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Inflection {
    #[default]
    Regular,
    /// Doubles the final consonant before a vowel suffix (stop → stopped).
    RegularDouble,
    Uncountable,
    Invariant,
}

/// Closed set of feature keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    // phrase slots
    Specifier,
    FrontModifiers,
    Premodifiers,
    Head,
    Complements,
    Postmodifiers,
    Subjects,
    CuePhrase,
    Coordinates,
    Components,
    Conjunction,
    Complementiser,
    // grammatical
    Tense,
    Form,
    Number,
    Person,
    Gender,
    Negated,
    Passive,
    Perfect,
    Progressive,
    Modal,
    InterrogativeType,
    Pronominal,
    Possessive,
    Reflexive,
    Comparative,
    Superlative,
    Particle,
    NegationAuxiliary,
    SuppressedComplementiser,
    Elided,
    RelativeFunction,
    // internal
    DiscourseFunction,
    ClauseStatus,
    Case,
    NonMorph,
    Hyphenated,
    Antecedent,
    ParticipleAgreement,
}

/// A typed feature value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Element(ElementId),
    Elements(Vec<ElementId>),
    Tense(Tense),
    Form(Form),
    Number(NumberAgreement),
    Person(Person),
    Gender(Gender),
    Interrogative(InterrogativeType),
    Function(DiscourseFunction),
    Status(ClauseStatus),
    Case(PronounCase),
}

impl FeatureValue {
    /// Surface name of a non-element value; element values need the tree.
    pub fn surface_name(&self) -> Option<String> {
        let s = match self {
            FeatureValue::Bool(b) => b.to_string(),
            FeatureValue::Int(i) => i.to_string(),
            FeatureValue::Text(s) => s.clone(),
            FeatureValue::Element(_) | FeatureValue::Elements(_) => return None,
            FeatureValue::Tense(v) => format!("{:?}", v),
            FeatureValue::Form(v) => format!("{:?}", v),
            FeatureValue::Number(v) => format!("{:?}", v),
            FeatureValue::Person(v) => format!("{:?}", v),
            FeatureValue::Gender(v) => format!("{:?}", v),
            FeatureValue::Interrogative(v) => format!("{:?}", v),
            FeatureValue::Function(v) => format!("{:?}", v),
            FeatureValue::Status(v) => format!("{:?}", v),
            FeatureValue::Case(v) => format!("{:?}", v),
        };
        Some(s)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Element(id) => write!(f, "#{}", id.0),
            FeatureValue::Elements(ids) => {
                let parts: Vec<String> = ids.iter().map(|id| format!("#{}", id.0)).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            other => f.write_str(&other.surface_name().unwrap_or_default()),
        }
    }
}

/// Conversion from a stored value into a typed feature, `None` on mismatch.
pub trait FromFeature: Sized {
    fn from_feature(value: &FeatureValue) -> Option<Self>;
}

macro_rules! typed_feature {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for FeatureValue {
            fn from(v: $ty) -> Self {
                FeatureValue::$variant(v)
            }
        }

        impl FromFeature for $ty {
            fn from_feature(value: &FeatureValue) -> Option<Self> {
                match value {
                    FeatureValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }
    };
}

typed_feature!(Tense, Tense);
typed_feature!(Form, Form);
typed_feature!(NumberAgreement, Number);
typed_feature!(Person, Person);
typed_feature!(Gender, Gender);
typed_feature!(InterrogativeType, Interrogative);
typed_feature!(DiscourseFunction, Function);
typed_feature!(ClauseStatus, Status);
typed_feature!(PronounCase, Case);

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Bool(v)
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

impl From<ElementId> for FeatureValue {
    fn from(v: ElementId) -> Self {
        FeatureValue::Element(v)
    }
}

impl From<Vec<ElementId>> for FeatureValue {
    fn from(v: Vec<ElementId>) -> Self {
        FeatureValue::Elements(v)
    }
}

/// Feature map of one element: closed keys plus a small open map for
/// caller-defined flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureMap {
    values: FxHashMap<Feature, FeatureValue>,
    #[serde(default)]
    extra: FxHashMap<String, FeatureValue>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, feature: Feature) -> Option<&FeatureValue> {
        self.values.get(&feature)
    }

    pub fn set(&mut self, feature: Feature, value: impl Into<FeatureValue>) {
        self.values.insert(feature, value.into());
    }

    pub fn has(&self, feature: Feature) -> bool {
        self.values.contains_key(&feature)
    }

    pub fn remove(&mut self, feature: Feature) -> Option<FeatureValue> {
        self.values.remove(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.extra.is_empty()
    }

    /// Boolean view: `Bool` as is, `"true"`/`"yes"` text as true, all else false.
    pub fn bool(&self, feature: Feature) -> bool {
        match self.values.get(&feature) {
            Some(FeatureValue::Bool(b)) => *b,
            Some(FeatureValue::Text(s)) => {
                matches!(s.trim().to_lowercase().as_str(), "true" | "yes")
            }
            _ => false,
        }
    }

    /// Numeric view: integers as is, numeric strings parsed, otherwise unset.
    pub fn int(&self, feature: Feature) -> Option<i64> {
        match self.values.get(&feature)? {
            FeatureValue::Int(i) => Some(*i),
            FeatureValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Typed view of a feature, `None` when absent or of another type.
    pub fn typed<T: FromFeature>(&self, feature: Feature) -> Option<T> {
        self.values.get(&feature).and_then(T::from_feature)
    }

    pub fn text(&self, feature: Feature) -> Option<&str> {
        match self.values.get(&feature)? {
            FeatureValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Single element view. A one-element list counts as that element.
    pub fn element(&self, feature: Feature) -> Option<ElementId> {
        match self.values.get(&feature)? {
            FeatureValue::Element(id) => Some(*id),
            FeatureValue::Elements(ids) if ids.len() == 1 => Some(ids[0]),
            _ => None,
        }
    }

    /// Element-list view: wraps a single element, copies a list.
    pub fn elements(&self, feature: Feature) -> Vec<ElementId> {
        match self.values.get(&feature) {
            Some(FeatureValue::Element(id)) => vec![*id],
            Some(FeatureValue::Elements(ids)) => ids.clone(),
            _ => Vec::new(),
        }
    }

    /// Append to an element list, promoting a single element to a list.
    pub fn push_element(&mut self, feature: Feature, id: ElementId) {
        let mut ids = self.elements(feature);
        ids.push(id);
        self.values.insert(feature, FeatureValue::Elements(ids));
    }

    pub fn tense(&self) -> Tense {
        self.typed(Feature::Tense).unwrap_or_default()
    }

    pub fn form(&self) -> Form {
        self.typed(Feature::Form).unwrap_or_default()
    }

    pub fn number(&self) -> NumberAgreement {
        self.typed(Feature::Number).unwrap_or_default()
    }

    pub fn person(&self) -> Person {
        self.typed(Feature::Person).unwrap_or_default()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.typed(Feature::Gender)
    }

    pub fn function(&self) -> Option<DiscourseFunction> {
        self.typed(Feature::DiscourseFunction)
    }

    pub fn is_plural(&self) -> bool {
        self.number() == NumberAgreement::Plural
    }

    /// Copy a feature from another map if present there.
    pub fn inherit(&mut self, other: &FeatureMap, feature: Feature) {
        if let Some(v) = other.get(feature) {
            self.values.insert(feature, v.clone());
        }
    }

    pub fn get_extra(&self, key: &str) -> Option<&FeatureValue> {
        self.extra.get(key)
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: impl Into<FeatureValue>) {
        self.extra.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Feature, &FeatureValue)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_features_use_defaults() {
        let map = FeatureMap::new();
        assert_eq!(map.tense(), Tense::Present);
        assert_eq!(map.number(), NumberAgreement::Singular);
        assert_eq!(map.person(), Person::Third);
        assert!(!map.bool(Feature::Negated));
        assert!(map.elements(Feature::Complements).is_empty());
    }

    #[test]
    fn mismatched_types_degrade() {
        let mut map = FeatureMap::new();
        map.set(Feature::Tense, "yesterday");
        map.set(Feature::Negated, 3i64);
        map.set(Feature::Person, true);
        assert_eq!(map.tense(), Tense::Present);
        assert!(!map.bool(Feature::Negated));
        assert_eq!(map.typed::<Person>(Feature::Person), None);
        assert_eq!(map.int(Feature::Person), None);
    }

    #[test]
    fn numeric_strings_parse() {
        let mut map = FeatureMap::new();
        map.set(Feature::Modal, " 42 ");
        assert_eq!(map.int(Feature::Modal), Some(42));
        map.set(Feature::Modal, "can");
        assert_eq!(map.int(Feature::Modal), None);
    }

    #[test]
    fn text_booleans() {
        let mut map = FeatureMap::new();
        map.set(Feature::Passive, "TRUE");
        assert!(map.bool(Feature::Passive));
    }

    #[test]
    fn element_list_wraps_single() {
        let mut map = FeatureMap::new();
        map.set(Feature::Complements, ElementId(4));
        assert_eq!(map.elements(Feature::Complements), vec![ElementId(4)]);
        map.push_element(Feature::Complements, ElementId(7));
        assert_eq!(
            map.elements(Feature::Complements),
            vec![ElementId(4), ElementId(7)]
        );
        assert_eq!(map.element(Feature::Complements), None);
    }

    #[test]
    fn surface_names() {
        assert_eq!(
            FeatureValue::Tense(Tense::Past).surface_name().as_deref(),
            Some("Past")
        );
        assert_eq!(FeatureValue::Element(ElementId(1)).surface_name(), None);
        assert_eq!(FeatureValue::Elements(vec![ElementId(1), ElementId(2)]).to_string(), "[#1, #2]");
    }

    #[test]
    fn extension_flags() {
        let mut map = FeatureMap::new();
        map.set_extra("house_style", true);
        assert_eq!(map.get_extra("house_style"), Some(&FeatureValue::Bool(true)));
        assert!(!map.is_empty());
    }
}
