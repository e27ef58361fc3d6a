//! Language utilities
//!
//! Parsing of ISO 639-1 / 639-2 codes and English language names into the two
//! languages the translator handles, plus the language pair and direction types.

use anyhow::{Result, anyhow};
use isolang::Language as IsoLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the translator can read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    English,
}

impl Language {
    /// English name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arabic => "Arabic",
            Self::English => "English",
        }
    }

    /// ISO 639-1 (2-letter) code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::English => "en",
        }
    }

    fn from_iso(lang: IsoLanguage) -> Option<Self> {
        match lang.to_639_3() {
            "ara" => Some(Self::Arabic),
            "eng" => Some(Self::English),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_language(s)
    }
}

/// Look up an ISO 639-1 / 639-3 code or an English language name
fn lookup_iso(input: &str) -> Option<IsoLanguage> {
    let lowered = input.to_lowercase();
    let by_code = match lowered.len() {
        2 => IsoLanguage::from_639_1(&lowered),
        3 => IsoLanguage::from_639_3(&lowered),
        _ => None,
    };
    by_code.or_else(|| IsoLanguage::from_name(input))
}

/// Parse a language code or name into one of the supported languages
///
/// Accepts "ar", "ara", "Arabic", "en", "eng", "English" (case-insensitive).
/// Valid ISO languages other than Arabic and English are rejected with their name.
pub fn parse_language(input: &str) -> Result<Language> {
    let trimmed = input.trim();

    match trimmed.to_lowercase().as_str() {
        "arabic" => return Ok(Language::Arabic),
        "english" => return Ok(Language::English),
        _ => {}
    }

    match lookup_iso(trimmed) {
        Some(lang) => Language::from_iso(lang)
            .ok_or_else(|| anyhow!("Unsupported language: {} ({})", lang.to_name(), trimmed)),
        None => Err(anyhow!("Invalid language code: {}", input)),
    }
}

/// Get the English name for any ISO language code or name
pub fn get_language_name(code: &str) -> Result<String> {
    lookup_iso(code.trim())
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// One of the two translation directions a backend exists for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    ArabicToEnglish,
    EnglishToArabic,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::ArabicToEnglish, Direction::EnglishToArabic];

    pub fn source(&self) -> Language {
        match self {
            Self::ArabicToEnglish => Language::Arabic,
            Self::EnglishToArabic => Language::English,
        }
    }

    pub fn target(&self) -> Language {
        match self {
            Self::ArabicToEnglish => Language::English,
            Self::EnglishToArabic => Language::Arabic,
        }
    }

    pub fn pair(&self) -> LanguagePair {
        LanguagePair::new(self.source(), self.target())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source().code(), self.target().code())
    }
}

/// Ordered (source, target) selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    pub fn new(source: Language, target: Language) -> Self {
        Self { source, target }
    }

    /// Parse a pair from two codes or names
    pub fn parse(source: &str, target: &str) -> Result<Self> {
        Ok(Self::new(parse_language(source)?, parse_language(target)?))
    }

    /// The translation direction, or `None` when the pair has no backend
    pub fn direction(&self) -> Option<Direction> {
        match (self.source, self.target) {
            (Language::Arabic, Language::English) => Some(Direction::ArabicToEnglish),
            (Language::English, Language::Arabic) => Some(Direction::EnglishToArabic),
            _ => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.direction().is_some()
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
