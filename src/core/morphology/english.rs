/// English inflection: noun plurals and possessives, verb conjugation,
/// degrees of comparison.
use crate::core::morphology::{cell_key, drop_chars, is_vowel, paradigm_cell, MorphologyRules};
use crate::schema::category::LexicalCategory;
use crate::schema::feature::{Feature, FeatureMap, Form, Inflection, Tense};
use crate::schema::word::WordEntry;

#[derive(Debug, Default)]
pub struct EnglishMorphology;

fn ends_consonant_y(word: &str) -> bool {
    let mut rev = word.chars().rev();
    matches!((rev.next(), rev.next()), (Some('y'), Some(c)) if !is_vowel(c))
}

fn sibilant(word: &str) -> bool {
    ["s", "x", "z", "ch", "sh"].iter().any(|end| word.ends_with(end))
}

/// Final consonant doubled before a vowel suffix (stop → stopp).
fn doubled(entry: &WordEntry) -> String {
    let base = &entry.base;
    match base.chars().last() {
        Some(c) if entry.inflection == Inflection::RegularDouble => format!("{}{}", base, c),
        _ => base.clone(),
    }
}

/// cat → cats, box → boxes, city → cities.
pub fn regular_plural(word: &str) -> String {
    if ends_consonant_y(word) {
        format!("{}ies", drop_chars(word, 1))
    } else if sibilant(word) {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

fn third_singular(entry: &WordEntry) -> String {
    if let Some(form) = &entry.present3s {
        return form.clone();
    }
    let base = &entry.base;
    if ends_consonant_y(base) {
        format!("{}ies", drop_chars(base, 1))
    } else if sibilant(base) || base.ends_with('o') {
        format!("{}es", base)
    } else {
        format!("{}s", base)
    }
}

fn regular_past(entry: &WordEntry) -> String {
    let base = &entry.base;
    if base.ends_with('e') {
        format!("{}d", base)
    } else if ends_consonant_y(base) {
        format!("{}ied", drop_chars(base, 1))
    } else {
        format!("{}ed", doubled(entry))
    }
}

fn present_participle(entry: &WordEntry) -> String {
    if let Some(form) = &entry.present_participle {
        return form.clone();
    }
    let base = &entry.base;
    if base.ends_with("ie") {
        format!("{}ying", drop_chars(base, 2))
    } else if base.ends_with('e')
        && base.len() > 2
        && !["ee", "ye", "oe"].iter().any(|e| base.ends_with(e))
    {
        format!("{}ing", drop_chars(base, 1))
    } else {
        format!("{}ing", doubled(entry))
    }
}

fn past(entry: &WordEntry, features: &FeatureMap) -> String {
    let key = format!("past_{}", cell_key(paradigm_cell(features)));
    entry
        .form(&key)
        .map(str::to_string)
        .or_else(|| entry.past.clone())
        .unwrap_or_else(|| regular_past(entry))
}

fn past_participle(entry: &WordEntry) -> String {
    entry
        .past_participle
        .clone()
        .or_else(|| entry.past.clone())
        .unwrap_or_else(|| regular_past(entry))
}

fn present(entry: &WordEntry, features: &FeatureMap) -> String {
    let cell = paradigm_cell(features);
    if let Some(form) = entry.form(&format!("present_{}", cell_key(cell))) {
        return form.to_string();
    }
    if cell == 2 {
        third_singular(entry)
    } else {
        entry.base.clone()
    }
}

fn verb(entry: &WordEntry, features: &FeatureMap) -> String {
    match features.form() {
        Form::Infinitive | Form::BareInfinitive | Form::Imperative => entry.base.clone(),
        Form::Gerund | Form::PresentParticiple => present_participle(entry),
        Form::PastParticiple => past_participle(entry),
        Form::Subjunctive => entry
            .form("subjunctive")
            .map(str::to_string)
            .unwrap_or_else(|| entry.base.clone()),
        Form::Normal => match features.tense() {
            Tense::Past => past(entry, features),
            Tense::Present => present(entry, features),
            // future and conditional are carried by "will"/"would"
            Tense::Future | Tense::Conditional => entry.base.clone(),
        },
    }
}

fn noun(entry: &WordEntry, features: &FeatureMap) -> String {
    let countable = !matches!(entry.inflection, Inflection::Uncountable | Inflection::Invariant);
    let mut text = if features.is_plural() && countable && !entry.proper {
        entry
            .plural
            .clone()
            .unwrap_or_else(|| regular_plural(&entry.base))
    } else {
        entry.base.clone()
    };
    if features.bool(Feature::Possessive) {
        text.push_str(if text.ends_with('s') { "'" } else { "'s" });
    }
    text
}

/// Short adjectives take -er/-est, long ones "more"/"most".
fn degree(entry: &WordEntry, features: &FeatureMap) -> String {
    let base = &entry.base;
    let short = base.chars().count() <= 6 || (ends_consonant_y(base) && !base.ends_with("ly"));
    if features.bool(Feature::Superlative) {
        if let Some(form) = &entry.superlative {
            return form.clone();
        }
        return match (short, ends_consonant_y(base), base.ends_with('e')) {
            (false, _, _) => format!("most {}", base),
            (true, true, _) => format!("{}iest", drop_chars(base, 1)),
            (true, false, true) => format!("{}st", base),
            (true, false, false) => format!("{}est", doubled(entry)),
        };
    }
    if features.bool(Feature::Comparative) {
        if let Some(form) = &entry.comparative {
            return form.clone();
        }
        return match (short, ends_consonant_y(base), base.ends_with('e')) {
            (false, _, _) => format!("more {}", base),
            (true, true, _) => format!("{}ier", drop_chars(base, 1)),
            (true, false, true) => format!("{}r", base),
            (true, false, false) => format!("{}er", doubled(entry)),
        };
    }
    base.clone()
}

impl MorphologyRules for EnglishMorphology {
    fn inflect(&self, entry: &WordEntry, features: &FeatureMap) -> String {
        match entry.category {
            LexicalCategory::Noun => noun(entry, features),
            LexicalCategory::Verb => verb(entry, features),
            LexicalCategory::Modal if features.tense() == Tense::Past => {
                entry.past.clone().unwrap_or_else(|| entry.base.clone())
            }
            LexicalCategory::Adjective | LexicalCategory::Adverb => degree(entry, features),
            LexicalCategory::Determiner if features.is_plural() => {
                entry.plural.clone().unwrap_or_else(|| entry.base.clone())
            }
            _ => entry.base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::feature::{NumberAgreement, Person};

    fn features(pairs: &[(Feature, crate::schema::feature::FeatureValue)]) -> FeatureMap {
        let mut map = FeatureMap::new();
        for (feature, value) in pairs {
            map.set(*feature, value.clone());
        }
        map
    }

    fn verb_entry(base: &str) -> WordEntry {
        WordEntry::new(base, LexicalCategory::Verb)
    }

    #[test]
    fn regular_verb_paradigm() {
        let m = EnglishMorphology;
        let kiss = verb_entry("kiss");
        assert_eq!(m.inflect(&kiss, &FeatureMap::new()), "kisses");
        let past = features(&[(Feature::Tense, Tense::Past.into())]);
        assert_eq!(m.inflect(&kiss, &past), "kissed");
        let first = features(&[(Feature::Person, Person::First.into())]);
        assert_eq!(m.inflect(&kiss, &first), "kiss");
        let ing = features(&[(Feature::Form, Form::PresentParticiple.into())]);
        assert_eq!(m.inflect(&verb_entry("chase"), &ing), "chasing");
        assert_eq!(m.inflect(&verb_entry("carry"), &past), "carried");
    }

    #[test]
    fn doubling_verbs() {
        let m = EnglishMorphology;
        let mut stop = verb_entry("stop");
        stop.inflection = Inflection::RegularDouble;
        let past = features(&[(Feature::Tense, Tense::Past.into())]);
        assert_eq!(m.inflect(&stop, &past), "stopped");
        let ing = features(&[(Feature::Form, Form::Gerund.into())]);
        assert_eq!(m.inflect(&stop, &ing), "stopping");
    }

    #[test]
    fn be_uses_its_table() {
        let m = EnglishMorphology;
        let mut be = verb_entry("be");
        be.forms.insert("present_1s".into(), "am".into());
        be.forms.insert("present_3s".into(), "is".into());
        be.forms.insert("past_3p".into(), "were".into());
        be.past = Some("was".into());
        be.past_participle = Some("been".into());
        assert_eq!(m.inflect(&be, &FeatureMap::new()), "is");
        let plural_past = features(&[
            (Feature::Tense, Tense::Past.into()),
            (Feature::Number, NumberAgreement::Plural.into()),
        ]);
        assert_eq!(m.inflect(&be, &plural_past), "were");
        let singular_past = features(&[(Feature::Tense, Tense::Past.into())]);
        assert_eq!(m.inflect(&be, &singular_past), "was");
        let pp = features(&[(Feature::Form, Form::PastParticiple.into())]);
        assert_eq!(m.inflect(&be, &pp), "been");
    }

    #[test]
    fn nouns_pluralise_and_take_possessive() {
        let m = EnglishMorphology;
        let plural = features(&[(Feature::Number, NumberAgreement::Plural.into())]);
        assert_eq!(m.inflect(&WordEntry::new("city", LexicalCategory::Noun), &plural), "cities");
        assert_eq!(m.inflect(&WordEntry::new("box", LexicalCategory::Noun), &plural), "boxes");
        let mut rice = WordEntry::new("rice", LexicalCategory::Noun);
        rice.inflection = Inflection::Uncountable;
        assert_eq!(m.inflect(&rice, &plural), "rice");
        let possessive = features(&[(Feature::Possessive, true.into())]);
        assert_eq!(m.inflect(&WordEntry::new("Mary", LexicalCategory::Noun), &possessive), "Mary's");
        let both = features(&[
            (Feature::Possessive, true.into()),
            (Feature::Number, NumberAgreement::Plural.into()),
        ]);
        assert_eq!(m.inflect(&WordEntry::new("dog", LexicalCategory::Noun), &both), "dogs'");
    }

    #[test]
    fn degrees_of_comparison() {
        let m = EnglishMorphology;
        let comparative = features(&[(Feature::Comparative, true.into())]);
        let superlative = features(&[(Feature::Superlative, true.into())]);
        let adj = |base: &str| WordEntry::new(base, LexicalCategory::Adjective);
        assert_eq!(m.inflect(&adj("happy"), &comparative), "happier");
        assert_eq!(m.inflect(&adj("large"), &superlative), "largest");
        assert_eq!(m.inflect(&adj("beautiful"), &comparative), "more beautiful");
        let mut good = adj("good");
        good.comparative = Some("better".into());
        assert_eq!(m.inflect(&good, &comparative), "better");
    }
}
