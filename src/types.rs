use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, io, path::PathBuf, str::FromStr};
use strum_macros::{Display, EnumIs};
use thiserror::Error;

pub type ChapterId = u8;

/// Raw key -> text table of one language in one chapter.
///
/// `None` marks text that's intentionally absent, which differs from an empty string.
pub type LangTable = IndexMap<String, Option<String>>;
pub type ChapterText = IndexMap<Language, LangTable>;
pub type LangData = IndexMap<ChapterId, ChapterText>;

pub type ChapterSourceMap = IndexMap<String, SourceLocation>;
pub type SourceMap = IndexMap<ChapterId, ChapterSourceMap>;

pub type RenderedGroup = IndexMap<String, RenderedEntry>;
pub type RenderedChapter = IndexMap<String, RenderedGroup>;
pub type Rendered = IndexMap<ChapterId, RenderedChapter>;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIs,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
/// Languages the game ships text for.
///
/// Japanese is the only language with translation files for every chapter. English is scraped from the game code,
/// and Korean comes from separate fan-made tables.
pub enum Language {
    En,
    Ja,
    Ko,
}

impl Language {
    pub const ALL: [Language; 3] = [Self::En, Self::Ja, Self::Ko];

    /// Name of the plain-text transcript file for this language.
    #[must_use]
    pub const fn transcript_filename(self) -> &'static str {
        match self {
            Self::En => "DELTARUNE.txt",
            Self::Ja => "DELTARUNE_ja.txt",
            Self::Ko => "DELTARUNE_ko.txt",
        }
    }
}

/// Where a key's text was found in the decompiled code. Serialized as `filename:line`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
}

impl SourceLocation {
    #[must_use]
    pub fn new(filename: impl Into<String>, line: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)
    }
}

impl FromStr for SourceLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (filename, line) = s
            .rsplit_once(':')
            .ok_or_else(|| Error::InvalidSourceLocation(s.to_owned()))?;

        let line = line
            .parse()
            .map_err(|_| Error::InvalidSourceLocation(s.to_owned()))?;

        Ok(Self::new(filename, line))
    }
}

impl From<SourceLocation> for String {
    fn from(value: SourceLocation) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for SourceLocation {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Rendered text of one key in every language. Absent languages are serialized as `null`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEntry {
    pub en: Option<String>,
    pub ja: Option<String>,
    pub ko: Option<String>,
}

impl RenderedEntry {
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.en.as_deref(),
            Language::Ja => self.ja.as_deref(),
            Language::Ko => self.ko.as_deref(),
        }
    }

    pub fn set(&mut self, language: Language, text: Option<String>) {
        match language {
            Language::En => self.en = text,
            Language::Ja => self.ja = text,
            Language::Ko => self.ko = text,
        }
    }

    /// Whether any language has text that isn't only whitespace.
    #[must_use]
    pub fn has_content(&self) -> bool {
        Language::ALL.into_iter().any(|language| {
            self.get(language)
                .is_some_and(|text| !text.trim().is_empty())
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}: IO error occurred: {1}")]
    Io(PathBuf, io::Error),
    #[error("Parsing JSON data failed with: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("Source location `{0}` is not in `filename:line` format.")]
    InvalidSourceLocation(String),
    #[error("Parameter placeholder `~{digit}` is out of the 1-5 range in {key}.")]
    ParameterOutOfRange { key: String, digit: char },
    #[error("Malformed stretch markup `{piece}` in {key}: {reason}.")]
    MalformedStretch {
        key: String,
        piece: String,
        reason: &'static str,
    },
    #[error("Unknown escape `\\{escape}` in function arguments: {text}")]
    InvalidArgumentEscape { escape: char, text: String },
    #[error("Unterminated string in function arguments: {0}")]
    UnterminatedString(String),
    #[error("Unexpected `{function}` call with arguments {args:?} in line: {line}")]
    UnexpectedCall {
        function: String,
        args: Vec<Option<String>>,
        line: String,
    },
    #[error("Translation key `{0}` contains a space.")]
    KeyContainsSpace(String),
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
