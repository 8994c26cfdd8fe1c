//! Realises the same small story in English and French.
//!
//! Run with `cargo run --example bilingual`.

use nlg_realiser::schema::element::ElementId;
use nlg_realiser::schema::feature::{
    DiscourseFunction, Feature, InterrogativeType, NumberAgreement, Tense,
};
use nlg_realiser::schema::language::Language;
use nlg_realiser::{Factory, RealiseError, Realiser};

/// Content words for one language.
struct Words {
    woman: &'static str,
    apple: &'static str,
    child: &'static str,
    the: &'static str,
    a: &'static str,
    eat: &'static str,
    give: &'static str,
    sleep: &'static str,
    red: &'static str,
    however: &'static str,
}

const ENGLISH: Words = Words {
    woman: "woman",
    apple: "apple",
    child: "child",
    the: "the",
    a: "a",
    eat: "eat",
    give: "give",
    sleep: "sleep",
    red: "red",
    however: "however",
};

const FRENCH: Words = Words {
    woman: "femme",
    apple: "pomme",
    child: "enfant",
    the: "le",
    a: "un",
    eat: "manger",
    give: "donner",
    sleep: "dormir",
    red: "rouge",
    however: "cependant",
};

fn story(f: &mut Factory, w: &Words) -> ElementId {
    // the woman eats a red apple
    let woman = f.noun_phrase(w.the, w.woman);
    let apple = f.noun_phrase(w.a, &format!("{} {}", w.red, w.apple));
    let eats = f.clause(woman, w.eat, apple);
    let first = f.sentence(&[eats]);

    // the woman gave the apples to the child
    let woman = f.noun_phrase(w.the, w.woman);
    let apples = f.noun_phrase(w.the, w.apple);
    f.set(apples, Feature::Number, NumberAgreement::Plural);
    let child = f.noun_phrase(w.the, w.child);
    let gave = f.clause(woman, w.give, apples);
    f.set_indirect_object(gave, child);
    f.set(gave, Feature::Perfect, true);
    let second = f.sentence(&[gave]);

    // however, the child who ate the apple does not sleep
    let child = f.noun_phrase(w.the, w.child);
    let apple = f.noun_phrase(w.the, w.apple);
    let ate = f.clause(None::<ElementId>, w.eat, apple);
    f.set(ate, Feature::Perfect, true);
    f.relative_clause(child, ate, DiscourseFunction::Subject);
    let sleeps = f.clause(child, w.sleep, None::<ElementId>);
    f.set(sleeps, Feature::Negated, true);
    let however = f.canned_text(w.however);
    f.set(sleeps, Feature::CuePhrase, however);
    let third = f.sentence(&[sleeps]);

    // will the child eat the apple?
    let child = f.noun_phrase(w.the, w.child);
    let apple = f.noun_phrase(w.the, w.apple);
    let question = f.clause(child, w.eat, apple);
    f.set(question, Feature::Tense, Tense::Future);
    f.set(question, Feature::InterrogativeType, InterrogativeType::YesNo);
    let fourth = f.sentence(&[question]);

    let opening = f.paragraph(&[first, second]);
    let closing = f.paragraph(&[third, fourth]);
    f.document(&[opening, closing])
}

fn main() -> Result<(), RealiseError> {
    let realiser = Realiser::builder().build()?;

    for (language, words) in [(Language::English, &ENGLISH), (Language::French, &FRENCH)] {
        let mut f = realiser.factory(language);
        let document = story(&mut f, words);
        println!("== {} ==", language);
        println!("{}\n", realiser.realise_text(f.tree(), document)?);
    }

    Ok(())
}
