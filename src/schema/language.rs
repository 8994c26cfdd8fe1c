use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages with a registered rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    pub const COUNT: usize = 2;
    pub const ALL: [Language; Self::COUNT] = [Language::English, Language::French];

    /// Dense index used by per-language tables.
    pub fn index(self) -> usize {
        match self {
            Language::English => 0,
            Language::French => 1,
        }
    }

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::French => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "fr" | "french" | "français" | "francais" => Ok(Language::French),
            other => Err(format!("unknown language '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes_and_names() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn indices_are_dense() {
        for (i, lang) in Language::ALL.iter().enumerate() {
            assert_eq!(lang.index(), i);
        }
    }
}
