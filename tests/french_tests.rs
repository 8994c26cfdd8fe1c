/// French integration tests: clitics, participle agreement, negation,
/// questions and the elision/contraction rules seen through whole phrases.

use nlg_realiser::schema::element::ElementId;
use nlg_realiser::schema::feature::{
    DiscourseFunction, Feature, Form, InterrogativeType, NumberAgreement, Tense,
};
use nlg_realiser::schema::language::Language;
use nlg_realiser::{Factory, RealiseError, Realiser};

fn setup() -> (Realiser, Factory) {
    let realiser = Realiser::builder().language(Language::French).build().unwrap();
    let factory = realiser.default_factory();
    (realiser, factory)
}

/// "Marie mange la pomme" with the clause id.
fn marie_mange_la_pomme(f: &mut Factory) -> ElementId {
    let marie = f.noun_phrase("", "Marie");
    let pomme = f.noun_phrase("le", "pomme");
    f.clause(marie, "manger", pomme)
}

#[test]
fn declarative_clause() {
    let (realiser, mut f) = setup();
    assert_eq!(f.language(), Language::French);
    let clause = marie_mange_la_pomme(&mut f);
    assert_eq!(
        realiser.realise_sentence(f.tree(), clause).unwrap(),
        "Marie mange la pomme."
    );
}

#[test]
fn object_clitics_precede_the_verb_in_order() {
    let (realiser, mut f) = setup();
    let marie = f.noun_phrase("", "Marie");
    let la = f.pronoun("la");
    let lui = f.pronoun("lui");
    let clause = f.clause(marie, "donner", la);
    f.set_indirect_object(clause, lui);
    assert_eq!(realiser.realise_text(f.tree(), clause).unwrap(), "Marie la lui donne");
}

#[test]
fn reflexive_blocks_a_second_clitic() {
    let (realiser, mut f) = setup();
    let je = f.pronoun("je");
    let toi = f.pronoun("toi");
    let clause = f.clause(je, "référer", None::<ElementId>);
    f.set_indirect_object(clause, toi);
    assert_eq!(realiser.realise_text(f.tree(), clause).unwrap(), "je me réfère à toi");
}

#[test]
fn clitics_stay_below_a_modal() {
    let (realiser, mut f) = setup();
    let marie = f.noun_phrase("", "Marie");
    let la = f.pronoun("la");
    let clause = f.clause(marie, "manger", la);
    f.set(clause, Feature::Modal, "vouloir");
    assert_eq!(realiser.realise_text(f.tree(), clause).unwrap(), "Marie veut la manger");
}

#[test]
fn positive_imperative_hyphenates_its_clitics() {
    let (realiser, mut f) = setup();
    let le = f.pronoun("le");
    let moi = f.pronoun("moi");
    let clause = f.clause(None::<ElementId>, "donner", le);
    f.set_indirect_object(clause, moi);
    f.set(clause, Feature::Form, Form::Imperative);
    assert_eq!(realiser.realise_text(f.tree(), clause).unwrap(), "donne-le-moi");
}

#[test]
fn passive_participle_agrees_with_the_subject() {
    let (realiser, mut f) = setup();
    let marie = f.noun_phrase("", "Marie");
    let pommes = f.noun_phrase("le", "pomme");
    f.set(pommes, Feature::Number, NumberAgreement::Plural);
    let clause = f.clause(marie, "manger", pommes);
    f.set(clause, Feature::Passive, true);
    assert_eq!(
        realiser.realise_text(f.tree(), clause).unwrap(),
        "les pommes sont mangées par Marie"
    );
}

#[test]
fn compound_past_participle_agreement() {
    let (realiser, mut f) = setup();
    // no preceding direct object: the participle stays unmarked
    let clause = marie_mange_la_pomme(&mut f);
    f.set(clause, Feature::Perfect, true);
    assert_eq!(
        realiser.realise_text(f.tree(), clause).unwrap(),
        "Marie a mangé la pomme"
    );

    // a clitic object before "avoir" is agreed with
    let marie = f.noun_phrase("", "Marie");
    let la = f.pronoun("la");
    let with_clitic = f.clause(marie, "manger", la);
    f.set(with_clitic, Feature::Perfect, true);
    assert_eq!(
        realiser.realise_text(f.tree(), with_clitic).unwrap(),
        "Marie l'a mangée"
    );

    // "être" verbs agree with their subject
    let elle = f.noun_phrase("", "Marie");
    let arrived = f.clause(elle, "arriver", None::<ElementId>);
    f.set(arrived, Feature::Perfect, true);
    assert_eq!(
        realiser.realise_text(f.tree(), arrived).unwrap(),
        "Marie est arrivée"
    );
}

#[test]
fn reflexive_verbs_take_se_and_etre() {
    let (realiser, mut f) = setup();
    let marie = f.noun_phrase("", "Marie");
    let se = f.pronoun("se");
    let washes = f.clause(marie, "laver", se);
    assert_eq!(realiser.realise_text(f.tree(), washes).unwrap(), "Marie se lave");
    f.set(washes, Feature::Perfect, true);
    assert_eq!(realiser.realise_text(f.tree(), washes).unwrap(), "Marie s'est lavée");

    // reflexive marked on the clause, no object given
    let marie = f.noun_phrase("", "Marie");
    let washed = f.clause(marie, "laver", None::<ElementId>);
    f.set(washed, Feature::Reflexive, true);
    f.set(washed, Feature::Perfect, true);
    assert_eq!(realiser.realise_text(f.tree(), washed).unwrap(), "Marie s'est lavée");

    let elles = f.pronoun("elles");
    let they_washed = f.clause(elles, "laver", None::<ElementId>);
    f.set(they_washed, Feature::Reflexive, true);
    f.set(they_washed, Feature::Perfect, true);
    assert_eq!(
        realiser.realise_text(f.tree(), they_washed).unwrap(),
        "elles se sont lavées"
    );
}

#[test]
fn mute_e_verbs_change_their_stem() {
    let (realiser, mut f) = setup();
    let je = f.pronoun("je");
    let buy = f.clause(je, "acheter", None::<ElementId>);
    f.set(buy, Feature::Tense, Tense::Future);
    assert_eq!(realiser.realise_text(f.tree(), buy).unwrap(), "j'achèterai");

    let ils = f.pronoun("ils");
    let call = f.clause(ils, "appeler", None::<ElementId>);
    assert_eq!(realiser.realise_text(f.tree(), call).unwrap(), "ils appellent");

    let nous = f.pronoun("nous");
    let throw = f.clause(nous, "jeter", None::<ElementId>);
    f.set(throw, Feature::Tense, Tense::Conditional);
    assert_eq!(realiser.realise_text(f.tree(), throw).unwrap(), "nous jetterions");
}

#[test]
fn relative_object_agrees_with_its_antecedent() {
    let (realiser, mut f) = setup();
    let pomme = f.noun_phrase("le", "pomme");
    let marie = f.noun_phrase("", "Marie");
    let eaten = f.clause(marie, "manger", None::<ElementId>);
    f.set(eaten, Feature::Perfect, true);
    f.relative_clause(pomme, eaten, DiscourseFunction::Object);
    assert_eq!(
        realiser.realise_text(f.tree(), pomme).unwrap(),
        "la pomme que Marie a mangée"
    );

    let homme = f.noun_phrase("le", "homme");
    let target = f.noun_phrase("", "Marie");
    let watches = f.clause(None::<ElementId>, "regarder", target);
    f.relative_clause(homme, watches, DiscourseFunction::Subject);
    assert_eq!(
        realiser.realise_text(f.tree(), homme).unwrap(),
        "l'homme qui regarde Marie"
    );
}

#[test]
fn negation_surrounds_the_finite_verb() {
    let (realiser, mut f) = setup();
    let clause = marie_mange_la_pomme(&mut f);
    f.set(clause, Feature::Negated, true);
    assert_eq!(
        realiser.realise_text(f.tree(), clause).unwrap(),
        "Marie ne mange pas la pomme"
    );

    // indefinite objects become "de" under negation
    let marie = f.noun_phrase("", "Marie");
    let une = f.noun_phrase("un", "pomme");
    let none = f.clause(marie, "manger", une);
    f.set(none, Feature::Negated, true);
    assert_eq!(
        realiser.realise_text(f.tree(), none).unwrap(),
        "Marie ne mange pas de pomme"
    );
}

#[test]
fn questions_use_est_ce_que() {
    let (realiser, mut f) = setup();
    let clause = marie_mange_la_pomme(&mut f);
    f.set(clause, Feature::InterrogativeType, InterrogativeType::YesNo);
    assert_eq!(
        realiser.realise_sentence(f.tree(), clause).unwrap(),
        "Est-ce que Marie mange la pomme?"
    );

    let marie = f.noun_phrase("", "Marie");
    let jean = f.noun_phrase("", "Jean");
    let watches = f.clause(marie, "regarder", jean);
    f.set(watches, Feature::InterrogativeType, InterrogativeType::WhoObject);
    assert_eq!(
        realiser.realise_text(f.tree(), watches).unwrap(),
        "qui est-ce que Marie regarde"
    );

    f.set(watches, Feature::InterrogativeType, InterrogativeType::WhoSubject);
    assert_eq!(
        realiser.realise_text(f.tree(), watches).unwrap(),
        "qui regarde Jean"
    );
}

#[test]
fn modal_in_the_subjunctive_is_rejected() {
    let (realiser, mut f) = setup();
    let clause = marie_mange_la_pomme(&mut f);
    f.set(clause, Feature::Modal, "pouvoir");
    f.set(clause, Feature::Form, Form::Subjunctive);
    assert!(matches!(
        realiser.realise(f.tree(), clause),
        Err(RealiseError::UnsupportedCombination(_))
    ));
}

#[test]
fn coordinated_subjects_take_plural_verbs() {
    let (realiser, mut f) = setup();
    let marie = f.noun_phrase("", "Marie");
    let jean = f.noun_phrase("", "Jean");
    let both = f.coordinate(&[marie, jean], None);
    let clause = f.clause(both, "manger", None::<ElementId>);
    assert_eq!(realiser.realise_text(f.tree(), clause).unwrap(), "Marie et Jean mangent");
}

#[test]
fn elision_before_vowels_and_mute_h() {
    let (realiser, mut f) = setup();
    let homme = f.noun_phrase("le", "homme");
    assert_eq!(realiser.realise_text(f.tree(), homme).unwrap(), "l'homme");

    let heros = f.noun_phrase("le", "héros");
    assert_eq!(realiser.realise_text(f.tree(), heros).unwrap(), "le héros");

    let je = f.pronoun("je");
    let marie = f.noun_phrase("", "Marie");
    let loves = f.clause(je, "aimer", marie);
    assert_eq!(realiser.realise_text(f.tree(), loves).unwrap(), "j'aime Marie");
}

#[test]
fn prepositions_contract_with_articles() {
    let (realiser, mut f) = setup();
    let cases = [
        ("de", "le", "pain", false, "du pain"),
        ("de", "le", "maison", false, "de la maison"),
        ("à", "le", "homme", false, "à l'homme"),
        ("à", "le", "enfant", true, "aux enfants"),
    ];
    for (preposition, determiner, noun, plural, expected) in cases {
        let np = f.noun_phrase(determiner, noun);
        if plural {
            f.set(np, Feature::Number, NumberAgreement::Plural);
        }
        let pp = f.prepositional_phrase(preposition, np);
        assert_eq!(realiser.realise_text(f.tree(), pp).unwrap(), expected);
    }
}

#[test]
fn adjectives_agree_and_place() {
    let (realiser, mut f) = setup();
    let chat = f.noun_phrase("un", "petit chat");
    assert_eq!(realiser.realise_text(f.tree(), chat).unwrap(), "un petit chat");

    let pommes = f.noun_phrase("le", "rouge pomme");
    f.set(pommes, Feature::Number, NumberAgreement::Plural);
    assert_eq!(realiser.realise_text(f.tree(), pommes).unwrap(), "les pommes rouges");

    let homme = f.noun_phrase("ce", "homme");
    assert_eq!(realiser.realise_text(f.tree(), homme).unwrap(), "cet homme");
}
