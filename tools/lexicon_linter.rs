/// Lexicon Linter: validates a RON lexicon file before it is merged over a
/// built-in lexicon.
///
/// Usage: lexicon_linter <lexicon.ron> [--language en|fr] [--standalone]
///
/// Without `--standalone` the file is checked as an extension of the
/// built-in lexicon, so closed-class words may come from either.

use nlg_realiser::core::lexicon::{closed_class_words, Lexicon, MemoryLexicon};
use nlg_realiser::schema::category::LexicalCategory;
use nlg_realiser::schema::language::Language;
use nlg_realiser::schema::word::WordEntry;
use std::collections::HashSet;
use std::path::Path;
use std::process;

/// Tense prefixes of the `forms` table.
const FORM_PREFIXES: [&str; 7] = [
    "present",
    "past",
    "imperfect",
    "future",
    "conditional",
    "subjunctive",
    "imperative",
];

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: lexicon_linter <lexicon.ron> [--language en|fr] [--standalone]");
        process::exit(0);
    }

    let path = &args[1];
    let mut language = Language::English;
    let mut standalone = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--language" if i + 1 < args.len() => {
                i += 1;
                language = match args[i].parse() {
                    Ok(language) => language,
                    Err(e) => {
                        eprintln!("ERROR: {}", e);
                        process::exit(1);
                    }
                };
            }
            "--standalone" => standalone = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let lexicon = match MemoryLexicon::load_from_ron(language, Path::new(path)) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("ERROR: Failed to load lexicon file: {}", e);
            process::exit(1);
        }
    };
    println!("Loaded {} {} entries from {}", lexicon.len(), language, path);

    let (errors, warnings) = lint_lexicon(&lexicon, language, standalone);

    println!("\n=== Lexicon Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_lexicon(
    lexicon: &MemoryLexicon,
    language: Language,
    standalone: bool,
) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Closed-class words the grammar requires
    if standalone {
        for error in lexicon.missing_closed_class() {
            errors.push(error.to_string());
        }
    } else {
        let builtin = match MemoryLexicon::builtin(language) {
            Ok(builtin) => builtin,
            Err(e) => {
                errors.push(format!("built-in {} lexicon failed to load: {}", language, e));
                return (errors, warnings);
            }
        };
        for (word, category) in closed_class_words(language) {
            if lexicon.has_word(word, Some(*category)) && builtin.has_word(word, Some(*category)) {
                warnings.push(format!(
                    "'{}' ({}) overrides a closed-class word of the built-in lexicon",
                    word, category
                ));
            }
        }
    }

    // Exact duplicates shadow each other
    let mut seen = HashSet::new();
    for entry in lexicon.entries() {
        let key = format!(
            "{}|{:?}|{:?}|{:?}|{:?}|{:?}|{}",
            entry.base,
            entry.category,
            entry.person,
            entry.number,
            entry.gender,
            entry.case,
            entry.reflexive
        );
        if !seen.insert(key) {
            warnings.push(format!("duplicate entry '{}' ({})", entry.base, entry.category));
        }
    }

    for entry in lexicon.entries() {
        if entry.base.trim().is_empty() {
            errors.push(format!("{} entry with an empty base form", entry.category));
            continue;
        }
        lint_forms(entry, &mut warnings);
        lint_flags(entry, &mut warnings);
        if language == Language::French {
            lint_french(entry, &mut warnings);
        }
    }

    (errors, warnings)
}

fn lint_forms(entry: &WordEntry, warnings: &mut Vec<String>) {
    for key in entry.forms.keys() {
        let known = match key.split_once('_') {
            Some((tense, cell)) => {
                FORM_PREFIXES.contains(&tense)
                    && matches!(cell, "1s" | "2s" | "3s" | "1p" | "2p" | "3p")
            }
            None => FORM_PREFIXES.contains(&key.as_str()),
        };
        if !known {
            warnings.push(format!("'{}' has unknown form key '{}'", entry.base, key));
        }
    }
    if !entry.forms.is_empty() && !matches!(entry.category, LexicalCategory::Verb | LexicalCategory::Modal) {
        warnings.push(format!(
            "'{}' is a {} but carries conjugated forms",
            entry.base, entry.category
        ));
    }
}

fn lint_flags(entry: &WordEntry, warnings: &mut Vec<String>) {
    let verb_only = [
        ("auxiliary_etre", entry.auxiliary_etre),
        ("pronominal", entry.pronominal),
        ("copular", entry.copular),
    ];
    for (flag, set) in verb_only {
        if set && entry.category != LexicalCategory::Verb {
            warnings.push(format!("'{}' sets {} but is a {}", entry.base, flag, entry.category));
        }
    }
    if entry.preposed && entry.category != LexicalCategory::Adjective {
        warnings.push(format!("'{}' is preposed but not an adjective", entry.base));
    }
    if (entry.reflexive || entry.adverbial) && entry.category != LexicalCategory::Pronoun {
        warnings.push(format!("'{}' is reflexive/adverbial but not a pronoun", entry.base));
    }
    if entry.aspirated_h && !entry.base.to_lowercase().starts_with('h') {
        warnings.push(format!("'{}' has an aspirated h but does not start with h", entry.base));
    }
    if entry.comparative.is_some() != entry.superlative.is_some() {
        warnings.push(format!(
            "'{}' has only one of comparative/superlative",
            entry.base
        ));
    }
}

fn lint_french(entry: &WordEntry, warnings: &mut Vec<String>) {
    match entry.category {
        LexicalCategory::Noun if entry.gender.is_none() && !entry.proper => {
            warnings.push(format!("noun '{}' has no gender, masculine assumed", entry.base));
        }
        LexicalCategory::Verb => {
            let inferable = ["er", "ir", "re"].iter().any(|end| entry.base.ends_with(end));
            if entry.group.is_none() && !inferable {
                warnings.push(format!(
                    "verb '{}' has no group and an ending it cannot be inferred from",
                    entry.base
                ));
            }
            if matches!(entry.group, Some(g) if !(1..=3).contains(&g)) {
                warnings.push(format!("verb '{}' has an invalid group", entry.base));
            }
        }
        _ => {}
    }
}
