/// Pipeline integration tests: documents, configuration and lexicon files,
/// respelling, and determinism over many feature combinations.

use nlg_realiser::core::lexicon::{LexiconError, MemoryLexicon};
use nlg_realiser::schema::element::ElementId;
use nlg_realiser::schema::feature::{Feature, InterrogativeType, NumberAgreement, Tense};
use nlg_realiser::schema::language::Language;
use nlg_realiser::{Factory, RealiseError, Realiser};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn mary_chases_george(f: &mut Factory) -> ElementId {
    let mary = f.noun_phrase("", "Mary");
    let george = f.noun_phrase("", "George");
    f.clause(mary, "chase", george)
}

#[test]
fn documents_join_sentences_and_paragraphs() {
    let realiser = Realiser::builder().build().unwrap();
    let mut f = realiser.factory(Language::English);

    let first = mary_chases_george(&mut f);
    let first = f.sentence(&[first]);
    let george = f.noun_phrase("", "George");
    let sleeps = f.clause(george, "sleep", None::<ElementId>);
    let second = f.sentence(&[sleeps]);
    let opening = f.paragraph(&[first, second]);

    // a bare clause in a paragraph is still finished as a sentence
    let question = mary_chases_george(&mut f);
    f.set(question, Feature::Tense, Tense::Past);
    f.set(question, Feature::InterrogativeType, InterrogativeType::YesNo);
    let closing = f.paragraph(&[question]);
    let document = f.document(&[opening, closing]);

    let text = realiser.realise_text(f.tree(), document).unwrap();
    assert_eq!(text, "Mary chases George. George sleeps.\n\nDid Mary chase George?");
    // documents are already finished
    assert_eq!(realiser.realise_sentence(f.tree(), document).unwrap(), text);
}

#[test]
fn realising_leaves_the_tree_untouched() {
    let realiser = Realiser::builder().build().unwrap();
    let mut f = realiser.factory(Language::English);
    let clause = mary_chases_george(&mut f);
    f.set(clause, Feature::Passive, true);
    let before = f.tree().clone();

    let element = realiser.realise(f.tree(), clause).unwrap();
    assert_eq!(element.realisation.as_deref(), Some("George is chased by Mary"));
    assert_eq!(f.tree(), &before);
    assert!(f.realisation(clause).is_none());

    // a second pass sees the same input and gives the same text
    let again = realiser.realise_text(f.tree(), clause).unwrap();
    assert_eq!(again, "George is chased by Mary");
}

#[test]
fn config_file_sets_style_and_lexicons() {
    let realiser = Realiser::builder()
        .config_file("tests/fixtures/config.ron")
        .build()
        .unwrap();
    assert_eq!(realiser.language(), Language::French);
    assert!(!realiser.config().capitalise);

    // French by default, without sentence finishing
    let mut f = realiser.default_factory();
    let je = f.pronoun("je");
    let pomme = f.noun_phrase("le", "pomme");
    let clause = f.clause(je, "manger", pomme);
    assert_eq!(
        realiser.realise_sentence(f.tree(), clause).unwrap(),
        "je mange la pomme"
    );

    // the extra English words sit next to the built-in ones
    let mut en = realiser.factory(Language::English);
    let cacti = en.noun_phrase("the", "cactus");
    en.set(cacti, Feature::Number, NumberAgreement::Plural);
    assert_eq!(realiser.realise_text(en.tree(), cacti).unwrap(), "the cacti");
    let women = en.noun_phrase("the", "woman");
    en.set(women, Feature::Number, NumberAgreement::Plural);
    assert_eq!(realiser.realise_text(en.tree(), women).unwrap(), "the women");

    // "that" is dropped under this house style
    let george = en.noun_phrase("", "George");
    let left = en.clause(george, "leave", None::<ElementId>);
    en.set(left, Feature::Tense, Tense::Past);
    let mary = en.noun_phrase("", "Mary");
    let thinks = en.clause(mary, "think", None::<ElementId>);
    en.set_object(thinks, left);
    assert_eq!(
        realiser.realise_text(en.tree(), thinks).unwrap(),
        "Mary thinks George left"
    );
}

#[test]
fn lexicon_path_extends_builtin_lexicon() {
    let realiser = Realiser::builder()
        .lexicon_path(Language::English, "tests/fixtures/extra_english.ron")
        .build()
        .unwrap();
    let lexicon = realiser.lexicon(Language::English);
    assert!(lexicon.has_word("octopus", None));
    assert!(lexicon.has_word("be", None));
    assert!(!realiser.lexicon(Language::French).has_word("octopus", None));

    let mut f = realiser.factory(Language::English);
    let octopus = f.noun_phrase("a", "octopus");
    let child = f.noun_phrase("the", "child");
    let clause = f.clause(octopus, "water", child);
    f.set(clause, Feature::Tense, Tense::Past);
    assert_eq!(
        realiser.realise_sentence(f.tree(), clause).unwrap(),
        "An octopus watered the child."
    );
}

#[test]
fn missing_lexicon_file_is_an_error() {
    let result = Realiser::builder()
        .lexicon_path(Language::French, "tests/fixtures/nowhere.ron")
        .build();
    assert!(matches!(result, Err(RealiseError::Lexicon(LexiconError::Io(_)))));
}

#[test]
fn french_lexicon_without_closed_class_words_is_rejected() {
    let empty = Arc::new(MemoryLexicon::new(Language::French));
    let result = Realiser::builder().with_lexicon(Language::French, empty).build();
    assert!(matches!(
        result,
        Err(RealiseError::Lexicon(LexiconError::MissingClosedClassWord {
            language: Language::French,
            ..
        }))
    ));
}

#[test]
fn respelling_is_idempotent() {
    let realiser = Realiser::builder().build().unwrap();

    let french = realiser.respell("le homme mange de le pain", Language::French);
    assert_eq!(french, "l'homme mange du pain");
    assert_eq!(realiser.respell(&french, Language::French), french);

    // inflected articles contract like the ones the pipeline produces
    let cases = [
        ("de les enfants", "des enfants"),
        ("à les hommes", "aux hommes"),
        ("ma amie", "mon amie"),
        ("de la maison", "de la maison"),
    ];
    for (raw, expected) in cases {
        let respelled = realiser.respell(raw, Language::French);
        assert_eq!(respelled, expected);
        assert_eq!(realiser.respell(&respelled, Language::French), respelled);
    }

    let english = realiser.respell("a apple and a hour.", Language::English);
    assert_eq!(english, "an apple and an hour.");
    assert_eq!(realiser.respell(&english, Language::English), english);
}

#[test]
fn random_feature_combinations_are_deterministic() {
    let first = Realiser::builder().build().unwrap();
    let second = Realiser::builder().build().unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let tenses = [Tense::Past, Tense::Present, Tense::Future, Tense::Conditional];
    let questions = [
        InterrogativeType::YesNo,
        InterrogativeType::WhoSubject,
        InterrogativeType::WhoObject,
        InterrogativeType::WhatObject,
    ];

    for _ in 0..64 {
        let mut f = first.factory(Language::English);
        let clause = mary_chases_george(&mut f);
        f.set(clause, Feature::Tense, tenses[rng.gen_range(0..tenses.len())]);
        for feature in [Feature::Perfect, Feature::Progressive, Feature::Passive, Feature::Negated] {
            if rng.gen_bool(0.4) {
                f.set(clause, feature, true);
            }
        }
        let interrogative = rng.gen_bool(0.5);
        if interrogative {
            f.set(
                clause,
                Feature::InterrogativeType,
                questions[rng.gen_range(0..questions.len())],
            );
        }

        let text = first.realise_sentence(f.tree(), clause).unwrap();
        assert_eq!(second.realise_sentence(f.tree(), clause).unwrap(), text);
        assert_eq!(first.realise_sentence(f.tree(), clause).unwrap(), text);
        assert!(!text.contains("  "), "double space in {:?}", text);
        assert!(text.chars().next().map(char::is_uppercase).unwrap_or(false));
        assert_eq!(text.ends_with('?'), interrogative, "{:?}", text);
        assert!(text.ends_with('?') || text.ends_with('.'));
    }
}
