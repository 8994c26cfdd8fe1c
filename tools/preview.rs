/// Preview: interactive realisation shell for trying out clauses and lexicons.
///
/// Usage: preview [--language en|fr] [--config <path>] [--lexicon <lang>=<path>]
///
/// Commands:
///   lang <en|fr>                       switch the working language
///   clause <subj> <verb> [obj] [flags] realise a clause
///   np <det> <noun...>                 realise a noun phrase
///   respell <text>                     run the orthography rules over raw text
///   help                               list commands
///   quit                               exit
///
/// Arguments are single tokens: `Mary`, `the+dog`, a pronoun such as `she`,
/// or `-` for none. Verbs with a particle are joined with `+` (`pick+up`).

use nlg_realiser::schema::category::LexicalCategory;
use nlg_realiser::schema::element::ElementId;
use nlg_realiser::schema::feature::{Feature, Form, InterrogativeType, NumberAgreement, Tense};
use nlg_realiser::schema::language::Language;
use nlg_realiser::{Factory, Realiser};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut builder = Realiser::builder();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--language" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(language) => builder = builder.language(language),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                builder = builder.config_file(&args[i]);
            }
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                let parsed = args[i]
                    .split_once('=')
                    .and_then(|(lang, path)| lang.parse::<Language>().ok().map(|l| (l, path)));
                match parsed {
                    Some((language, path)) => builder = builder.lexicon_path(language, path),
                    None => {
                        eprintln!("Expected --lexicon <lang>=<path>, got {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let realiser = match builder.build() {
        Ok(realiser) => realiser,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let mut language = realiser.language();
    println!("Language: {}", language);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "lang" => match parts.get(1).map(|s| s.parse::<Language>()) {
                Some(Ok(l)) => {
                    language = l;
                    println!("Language: {}", language);
                }
                Some(Err(e)) => println!("{}", e),
                None => println!("Usage: lang <en|fr>"),
            },
            "clause" => {
                if parts.len() < 3 {
                    println!("Usage: clause <subj> <verb> [obj] [flags]");
                    println!("  flags: past, future, conditional, perfect, progressive, passive,");
                    println!("         negated, plural, imperative, subjunctive, modal=<verb>,");
                    println!("         yesno, who-subject, who-object, what-object, where, why, how");
                    continue;
                }
                let mut f = realiser.factory(language);
                let subject = argument(&mut f, parts[1]);
                let verb = parts[2].replace('+', " ");
                let (object, flags) = match parts.get(3) {
                    Some(token) if !is_flag(token) => (argument(&mut f, token), &parts[4..]),
                    _ => (None, &parts[3..]),
                };
                let clause = f.clause(subject, &verb, object);

                let mut ok = true;
                for flag in flags {
                    if !apply_flag(&mut f, clause, flag) {
                        println!("Unknown flag: {}", flag);
                        ok = false;
                    }
                }
                if ok {
                    print_result(realiser.realise_sentence(f.tree(), clause));
                }
            }
            "np" => {
                if parts.len() < 3 {
                    println!("Usage: np <det> <noun...>  (use - for no determiner)");
                    continue;
                }
                let mut f = realiser.factory(language);
                let determiner = if parts[1] == "-" { "" } else { parts[1] };
                let np = f.noun_phrase(determiner, &parts[2..].join(" "));
                print_result(realiser.realise_text(f.tree(), np));
            }
            "respell" => {
                let text = line["respell".len()..].trim();
                println!("{}", realiser.respell(text, language));
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for commands.", cmd);
            }
        }
    }
}

fn argument(f: &mut Factory, token: &str) -> Option<ElementId> {
    if token == "-" {
        return None;
    }
    if f.lexicon().has_word(token, Some(LexicalCategory::Pronoun)) {
        return Some(f.pronoun(token));
    }
    let np = match token.split_once('+') {
        Some((determiner, noun)) => f.noun_phrase(determiner, &noun.replace('+', " ")),
        None => f.noun_phrase("", token),
    };
    Some(np)
}

fn is_flag(token: &str) -> bool {
    token.starts_with("modal=")
        || matches!(
            token,
            "past"
                | "future"
                | "conditional"
                | "perfect"
                | "progressive"
                | "passive"
                | "negated"
                | "plural"
                | "imperative"
                | "subjunctive"
                | "yesno"
                | "who-subject"
                | "who-object"
                | "what-object"
                | "where"
                | "why"
                | "how"
        )
}

fn apply_flag(f: &mut Factory, clause: ElementId, flag: &str) -> bool {
    if let Some(modal) = flag.strip_prefix("modal=") {
        f.set(clause, Feature::Modal, modal);
        return true;
    }
    match flag {
        "past" => f.set(clause, Feature::Tense, Tense::Past),
        "future" => f.set(clause, Feature::Tense, Tense::Future),
        "conditional" => f.set(clause, Feature::Tense, Tense::Conditional),
        "perfect" => f.set(clause, Feature::Perfect, true),
        "progressive" => f.set(clause, Feature::Progressive, true),
        "passive" => f.set(clause, Feature::Passive, true),
        "negated" => f.set(clause, Feature::Negated, true),
        "plural" => f.set(clause, Feature::Number, NumberAgreement::Plural),
        "imperative" => f.set(clause, Feature::Form, Form::Imperative),
        "subjunctive" => f.set(clause, Feature::Form, Form::Subjunctive),
        _ => match parse_question(flag) {
            Some(kind) => f.set(clause, Feature::InterrogativeType, kind),
            None => return false,
        },
    }
    true
}

fn parse_question(s: &str) -> Option<InterrogativeType> {
    match s {
        "yesno" => Some(InterrogativeType::YesNo),
        "who-subject" => Some(InterrogativeType::WhoSubject),
        "who-object" => Some(InterrogativeType::WhoObject),
        "what-object" => Some(InterrogativeType::WhatObject),
        "where" => Some(InterrogativeType::Where),
        "why" => Some(InterrogativeType::Why),
        "how" => Some(InterrogativeType::How),
        _ => None,
    }
}

fn print_result<E: std::fmt::Display>(result: Result<String, E>) {
    match result {
        Ok(text) => println!("\n  {}\n", text),
        Err(e) => println!("ERROR: {}", e),
    }
}

fn print_usage() {
    println!("Usage: preview [--language en|fr] [--config <path>] [--lexicon <lang>=<path>]");
}

fn print_help() {
    println!("Commands:");
    println!("  lang <en|fr>                        Switch the working language");
    println!("  clause <subj> <verb> [obj] [flags]  Realise a clause as a sentence");
    println!("  np <det> <noun...>                  Realise a noun phrase");
    println!("  respell <text>                      Apply elision, contraction and a/an");
    println!("  help                                Show this help");
    println!("  quit                                Exit");
    println!();
    println!("Arguments: Mary, the+dog, a+big+dog, she, - (none)");
}
