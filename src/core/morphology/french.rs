/// French inflection: conjugation by group with the spelling changes of
/// the first group, gender and number of nouns, adjectives, determiners
/// and past participles.
use crate::core::morphology::{cell_key, drop_chars, is_vowel, paradigm_cell, MorphologyRules};
use crate::schema::category::LexicalCategory;
use crate::schema::feature::{FeatureMap, Form, Gender, Inflection, Tense};
use crate::schema::word::WordEntry;

#[derive(Debug, Default)]
pub struct FrenchMorphology;

const FIRST_PRESENT: [&str; 6] = ["e", "es", "e", "ons", "ez", "ent"];
const SECOND_PRESENT: [&str; 6] = ["is", "is", "it", "issons", "issez", "issent"];
const THIRD_PRESENT: [&str; 6] = ["s", "s", "t", "ons", "ez", "ent"];
const IMPERFECT: [&str; 6] = ["ais", "ais", "ait", "ions", "iez", "aient"];
const FUTURE: [&str; 6] = ["ai", "as", "a", "ons", "ez", "ont"];
const SUBJUNCTIVE: [&str; 6] = ["e", "es", "e", "ions", "iez", "ent"];

/// Conjugation group: lexicon value, else inferred from the ending.
fn group(entry: &WordEntry) -> u8 {
    if let Some(group) = entry.group {
        return group;
    }
    if entry.base.ends_with("er") {
        1
    } else if entry.base.ends_with("ir") {
        2
    } else {
        3
    }
}

/// Infinitive without its -er/-ir/-re ending.
fn stem(entry: &WordEntry) -> &str {
    drop_chars(&entry.base, 2)
}

/// Endings that leave the stem's last syllable unstressed: e, es, ent.
fn mute_ending(ending: &str) -> bool {
    matches!(ending, "e" | "es" | "ent")
}

/// -eler/-eter stems that take "è" instead of doubling their consonant.
const GRAVE_STEMS: [&str; 14] = [
    "achet", "rachet", "crochet", "furet", "halet", "corset", "gel", "congel", "dégel",
    "surgel", "pel", "model", "martel", "harcel",
];

/// Stem before a mute syllable: "achèt", "appell", "jett", and with
/// `acute` also "préfèr".
fn mute_stem(stem: &str, acute: bool) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let Some(i) = chars.iter().rposition(|c| is_vowel(*c)) else {
        return stem.to_string();
    };
    let tail = &chars[i + 1..];
    // one consonant (achet, préfér), or a consonant + r/l cluster after é (célébr)
    let open = match tail {
        [_] => true,
        [c, 'r' | 'l'] => chars[i] == 'é' && !matches!(c, 'r' | 'l'),
        _ => false,
    };
    if !open || i == 0 {
        return stem.to_string();
    }
    match (chars[i], tail) {
        ('e', ['l' | 't']) if !GRAVE_STEMS.contains(&stem) => {
            // appeler: appelle, jeter: jette
            format!("{}{}", stem, tail[0])
        }
        ('e', _) => {
            let mut changed: String = chars[..i].iter().collect();
            changed.push('è');
            changed.extend(tail);
            changed
        }
        ('é', _) if acute => {
            let mut changed: String = chars[..i].iter().collect();
            changed.push('è');
            changed.extend(tail);
            changed
        }
        _ => stem.to_string(),
    }
}

/// First-group spelling changes: "commençons", "mangeons", "préfère",
/// "achète", "appelle".
fn first_group_stem(stem: &str, ending: &str) -> String {
    let mut stem = stem.to_string();
    let hard_vowel = ending.starts_with('a') || ending.starts_with('o');
    if hard_vowel && stem.ends_with('c') {
        stem.pop();
        stem.push('ç');
    } else if hard_vowel && stem.ends_with('g') {
        stem.push('e');
    }
    if mute_ending(ending) {
        stem = mute_stem(&stem, true);
    }
    stem
}

/// Present tense built from the group's endings.
fn regular_present(entry: &WordEntry, cell: usize) -> String {
    let stem = stem(entry);
    match group(entry) {
        1 => {
            let ending = FIRST_PRESENT[cell];
            format!("{}{}", first_group_stem(stem, ending), ending)
        }
        2 => format!("{}{}", stem, SECOND_PRESENT[cell]),
        _ => {
            let ending = THIRD_PRESENT[cell];
            if entry.base.ends_with("ir") && cell < 3 {
                // partir: je pars, il part
                format!("{}{}", drop_chars(stem, 1), ending)
            } else if entry.base.ends_with("re") && cell == 2 {
                // vendre: il vend
                stem.to_string()
            } else {
                format!("{}{}", stem, ending)
            }
        }
    }
}

fn present(entry: &WordEntry, cell: usize) -> String {
    entry
        .form(&format!("present_{}", cell_key(cell)))
        .map(str::to_string)
        .unwrap_or_else(|| regular_present(entry, cell))
}

/// Stem of the imperfect and present participle: "nous finissons" → "finiss".
fn imperfect_radical(entry: &WordEntry) -> String {
    if let Some(radical) = &entry.imperfect_radical {
        return radical.clone();
    }
    let first_plural = present(entry, 3);
    match first_plural.strip_suffix("ons") {
        Some(radical) => radical.to_string(),
        None => stem(entry).to_string(),
    }
}

fn future_radical(entry: &WordEntry) -> String {
    if let Some(radical) = &entry.future_radical {
        return radical.clone();
    }
    if group(entry) == 1 {
        // achèterai, appellerai, but préférerai
        return format!("{}er", mute_stem(stem(entry), false));
    }
    match entry.base.strip_suffix("re") {
        Some(radical) => format!("{}r", radical),
        None => entry.base.clone(),
    }
}

fn subjunctive(entry: &WordEntry, cell: usize) -> String {
    if let Some(form) = entry.form(&format!("subjunctive_{}", cell_key(cell))) {
        return form.to_string();
    }
    let third_plural = present(entry, 5);
    let radical = third_plural.strip_suffix("ent").unwrap_or(&third_plural);
    let ending = SUBJUNCTIVE[cell];
    if group(entry) == 1 {
        format!("{}{}", first_group_stem(stem(entry), ending), ending)
    } else if cell == 3 || cell == 4 {
        format!("{}{}", imperfect_radical(entry), ending)
    } else {
        format!("{}{}", radical, ending)
    }
}

fn tensed(entry: &WordEntry, tense: Tense, cell: usize) -> String {
    let (key, radical, endings) = match tense {
        Tense::Present => return present(entry, cell),
        Tense::Past => ("imperfect", imperfect_radical(entry), &IMPERFECT),
        Tense::Future => ("future", future_radical(entry), &FUTURE),
        Tense::Conditional => ("conditional", future_radical(entry), &IMPERFECT),
    };
    entry
        .form(&format!("{}_{}", key, cell_key(cell)))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}{}", radical, endings[cell]))
}

fn imperative(entry: &WordEntry, cell: usize) -> String {
    if let Some(form) = entry.form(&format!("imperative_{}", cell_key(cell))) {
        return form.to_string();
    }
    let form = present(entry, cell);
    // mange, not manges
    if group(entry) == 1 && cell == 1 {
        form.strip_suffix('s').map(str::to_string).unwrap_or(form)
    } else {
        form
    }
}

fn past_participle(entry: &WordEntry, features: &FeatureMap) -> String {
    let masculine = entry.past_participle.clone().unwrap_or_else(|| {
        let stem = stem(entry);
        match group(entry) {
            1 => format!("{}é", stem),
            2 => format!("{}i", stem),
            _ if entry.base.ends_with("ir") => format!("{}i", stem),
            _ => format!("{}u", stem),
        }
    });
    let mut text = masculine;
    if features.gender() == Some(Gender::Feminine) && !text.ends_with('e') {
        text.push('e');
    }
    if features.is_plural() && !text.ends_with('s') && !text.ends_with('x') {
        text.push('s');
    }
    text
}

fn present_participle(entry: &WordEntry) -> String {
    entry
        .present_participle
        .clone()
        .unwrap_or_else(|| format!("{}ant", imperfect_radical(entry)))
}

fn verb(entry: &WordEntry, features: &FeatureMap) -> String {
    let cell = paradigm_cell(features);
    match features.form() {
        Form::Infinitive | Form::BareInfinitive => entry.base.clone(),
        Form::PastParticiple => past_participle(entry, features),
        Form::PresentParticiple | Form::Gerund => present_participle(entry),
        Form::Imperative => imperative(entry, cell),
        Form::Subjunctive => subjunctive(entry, cell),
        Form::Normal => tensed(entry, features.tense(), cell),
    }
}

/// cheval → chevaux, bateau → bateaux, prix → prix, pomme → pommes.
pub fn regular_plural(word: &str) -> String {
    if word.ends_with('s') || word.ends_with('x') || word.ends_with('z') {
        word.to_string()
    } else if word.ends_with("al") {
        format!("{}aux", drop_chars(word, 2))
    } else if word.ends_with("au") || word.ends_with("eu") {
        format!("{}x", word)
    } else {
        format!("{}s", word)
    }
}

/// petit → petite, heureux → heureuse, premier → première, actif → active.
pub fn regular_feminine(word: &str) -> String {
    const PAIRS: [(&str, &str); 6] = [
        ("eux", "euse"),
        ("er", "ère"),
        ("if", "ive"),
        ("el", "elle"),
        ("en", "enne"),
        ("on", "onne"),
    ];
    if word.ends_with('e') {
        return word.to_string();
    }
    for (masculine, feminine) in PAIRS {
        if let Some(radical) = word.strip_suffix(masculine) {
            return format!("{}{}", radical, feminine);
        }
    }
    format!("{}e", word)
}

/// Gender and number forms of adjectives and determiners.
fn agreeing(entry: &WordEntry, features: &FeatureMap, regular: bool) -> String {
    let feminine = features.gender() == Some(Gender::Feminine);
    let plural = features.is_plural();
    let feminine_form = || {
        entry.feminine.clone().unwrap_or_else(|| {
            if regular {
                regular_feminine(&entry.base)
            } else {
                entry.base.clone()
            }
        })
    };
    match (feminine, plural) {
        (false, false) => entry.base.clone(),
        (true, false) => feminine_form(),
        (false, true) => entry.plural.clone().unwrap_or_else(|| {
            if regular {
                regular_plural(&entry.base)
            } else {
                entry.base.clone()
            }
        }),
        (true, true) => entry.feminine_plural.clone().unwrap_or_else(|| {
            match (&entry.plural, regular) {
                // les, des, ces: one plural for both genders
                (Some(plural), false) => plural.clone(),
                _ => regular_plural(&feminine_form()),
            }
        }),
    }
}

fn noun(entry: &WordEntry, features: &FeatureMap) -> String {
    let invariable = matches!(entry.inflection, Inflection::Uncountable | Inflection::Invariant);
    if features.is_plural() && !invariable && !entry.proper {
        entry
            .plural
            .clone()
            .unwrap_or_else(|| regular_plural(&entry.base))
    } else {
        entry.base.clone()
    }
}

impl MorphologyRules for FrenchMorphology {
    fn inflect(&self, entry: &WordEntry, features: &FeatureMap) -> String {
        match entry.category {
            LexicalCategory::Verb | LexicalCategory::Modal => verb(entry, features),
            LexicalCategory::Noun => noun(entry, features),
            LexicalCategory::Adjective if entry.inflection != Inflection::Invariant => {
                agreeing(entry, features, true)
            }
            LexicalCategory::Determiner => agreeing(entry, features, false),
            _ => entry.base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::feature::{Feature, NumberAgreement, Person};

    fn with(tense: Tense, person: Person, number: NumberAgreement) -> FeatureMap {
        let mut map = FeatureMap::new();
        map.set(Feature::Tense, tense);
        map.set(Feature::Person, person);
        map.set(Feature::Number, number);
        map
    }

    fn verb_entry(base: &str) -> WordEntry {
        WordEntry::new(base, LexicalCategory::Verb)
    }

    #[test]
    fn first_group_present_and_spelling_changes() {
        let m = FrenchMorphology;
        let parler = verb_entry("parler");
        assert_eq!(m.inflect(&parler, &with(Tense::Present, Person::First, NumberAgreement::Singular)), "parle");
        assert_eq!(m.inflect(&parler, &with(Tense::Present, Person::Third, NumberAgreement::Plural)), "parlent");
        let manger = verb_entry("manger");
        assert_eq!(m.inflect(&manger, &with(Tense::Present, Person::First, NumberAgreement::Plural)), "mangeons");
        assert_eq!(m.inflect(&manger, &with(Tense::Past, Person::Third, NumberAgreement::Singular)), "mangeait");
        let commencer = verb_entry("commencer");
        assert_eq!(m.inflect(&commencer, &with(Tense::Present, Person::First, NumberAgreement::Plural)), "commençons");
        let referer = verb_entry("référer");
        assert_eq!(m.inflect(&referer, &with(Tense::Present, Person::First, NumberAgreement::Singular)), "réfère");
        assert_eq!(m.inflect(&referer, &with(Tense::Present, Person::Second, NumberAgreement::Plural)), "référez");
    }

    #[test]
    fn second_and_third_groups() {
        let m = FrenchMorphology;
        let finir = verb_entry("finir");
        assert_eq!(m.inflect(&finir, &with(Tense::Present, Person::Third, NumberAgreement::Plural)), "finissent");
        assert_eq!(m.inflect(&finir, &with(Tense::Past, Person::First, NumberAgreement::Singular)), "finissais");
        let vendre = verb_entry("vendre");
        assert_eq!(m.inflect(&vendre, &with(Tense::Present, Person::Third, NumberAgreement::Singular)), "vend");
        assert_eq!(m.inflect(&vendre, &with(Tense::Future, Person::First, NumberAgreement::Plural)), "vendrons");
        let mut partir = verb_entry("partir");
        partir.group = Some(3);
        assert_eq!(m.inflect(&partir, &with(Tense::Present, Person::First, NumberAgreement::Singular)), "pars");
        assert_eq!(m.inflect(&partir, &with(Tense::Present, Person::First, NumberAgreement::Plural)), "partons");
    }

    #[test]
    fn future_and_conditional_share_a_radical() {
        let m = FrenchMorphology;
        let mut etre = verb_entry("être");
        etre.future_radical = Some("ser".into());
        assert_eq!(m.inflect(&etre, &with(Tense::Future, Person::Third, NumberAgreement::Plural)), "seront");
        assert_eq!(m.inflect(&etre, &with(Tense::Conditional, Person::First, NumberAgreement::Singular)), "serais");
        let donner = verb_entry("donner");
        assert_eq!(m.inflect(&donner, &with(Tense::Future, Person::Second, NumberAgreement::Singular)), "donneras");
    }

    #[test]
    fn mute_syllables_change_the_stem_in_every_tense() {
        let m = FrenchMorphology;
        let cases = [
            ("acheter", Tense::Future, Person::First, NumberAgreement::Singular, "achèterai"),
            ("acheter", Tense::Present, Person::Third, NumberAgreement::Plural, "achètent"),
            ("appeler", Tense::Future, Person::First, NumberAgreement::Singular, "appellerai"),
            ("appeler", Tense::Present, Person::Third, NumberAgreement::Plural, "appellent"),
            ("appeler", Tense::Present, Person::First, NumberAgreement::Plural, "appelons"),
            ("jeter", Tense::Present, Person::Third, NumberAgreement::Plural, "jettent"),
            ("jeter", Tense::Conditional, Person::First, NumberAgreement::Plural, "jetterions"),
            ("lever", Tense::Conditional, Person::Third, NumberAgreement::Singular, "lèverait"),
            ("geler", Tense::Present, Person::Third, NumberAgreement::Singular, "gèle"),
            ("référer", Tense::Future, Person::First, NumberAgreement::Singular, "référerai"),
            ("manger", Tense::Future, Person::Third, NumberAgreement::Plural, "mangeront"),
        ];
        for (base, tense, person, number, expected) in cases {
            assert_eq!(m.inflect(&verb_entry(base), &with(tense, person, number)), expected, "{}", base);
        }

        let mut subjunctive = with(Tense::Present, Person::Third, NumberAgreement::Singular);
        subjunctive.set(Feature::Form, Form::Subjunctive);
        assert_eq!(m.inflect(&verb_entry("jeter"), &subjunctive), "jette");
    }

    #[test]
    fn participles_agree() {
        let m = FrenchMorphology;
        let mut pp = FeatureMap::new();
        pp.set(Feature::Form, Form::PastParticiple);
        assert_eq!(m.inflect(&verb_entry("manger"), &pp), "mangé");
        pp.set(Feature::Gender, Gender::Feminine);
        pp.set(Feature::Number, NumberAgreement::Plural);
        assert_eq!(m.inflect(&verb_entry("manger"), &pp), "mangées");
        let mut prendre = verb_entry("prendre");
        prendre.past_participle = Some("pris".into());
        assert_eq!(m.inflect(&prendre, &pp), "prises");
        let mut ppr = FeatureMap::new();
        ppr.set(Feature::Form, Form::PresentParticiple);
        assert_eq!(m.inflect(&verb_entry("finir"), &ppr), "finissant");
    }

    #[test]
    fn imperative_drops_first_group_s() {
        let m = FrenchMorphology;
        let mut features = FeatureMap::new();
        features.set(Feature::Form, Form::Imperative);
        features.set(Feature::Person, Person::Second);
        assert_eq!(m.inflect(&verb_entry("donner"), &features), "donne");
        assert_eq!(m.inflect(&verb_entry("finir"), &features), "finis");
    }

    #[test]
    fn adjectives_and_determiners_agree() {
        let m = FrenchMorphology;
        let mut fp = FeatureMap::new();
        fp.set(Feature::Gender, Gender::Feminine);
        fp.set(Feature::Number, NumberAgreement::Plural);
        let heureux = WordEntry::new("heureux", LexicalCategory::Adjective);
        assert_eq!(m.inflect(&heureux, &fp), "heureuses");
        let mut le = WordEntry::new("le", LexicalCategory::Determiner);
        le.feminine = Some("la".into());
        le.plural = Some("les".into());
        assert_eq!(m.inflect(&le, &fp), "les");
        let mut f = FeatureMap::new();
        f.set(Feature::Gender, Gender::Feminine);
        assert_eq!(m.inflect(&le, &f), "la");
        let plural = {
            let mut map = FeatureMap::new();
            map.set(Feature::Number, NumberAgreement::Plural);
            map
        };
        assert_eq!(m.inflect(&WordEntry::new("cheval", LexicalCategory::Noun), &plural), "chevaux");
        assert_eq!(m.inflect(&WordEntry::new("bateau", LexicalCategory::Noun), &plural), "bateaux");
    }
}
