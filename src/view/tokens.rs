//! Token tree consumed by the renderer
//!
//! The analysis server hands out a nested structure: a list of paragraphs,
//! each a list of sentences, each a list of tokens. Tokens use the server's
//! compact keys:
//!
//! | key   | field       | notes                                              |
//! |-------|-------------|----------------------------------------------------|
//! | `x`   | text        | surface string                                     |
//! | `k`   | kind        | numeric token code or descriptive name, absent = WORD |
//! | `t`   | terminal    | grammar terminal, e.g. `sérnafn_þf`                |
//! | `m`   | meaning     | `[lemma, category, subcategory, inflection]`       |
//! | `v`   | auxiliary   | kind dependent, e.g. nominative name of a person   |
//! | `err` | is_error    | bool or integer                                    |
//!
//! Tokens serialize back to the same keys so an index of rendered tokens can be
//! handed to a collaborator unchanged.

use crate::view::error::ViewError;
use crate::view::names::NameRegistry;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lexical category of a token.
///
/// Mirrors the tokenizer's token codes. `Word` is the default when the kind
/// is left out of the JSON; codes outside the table decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    Punctuation,
    Time,
    Date,
    Year,
    Number,
    #[default]
    Word,
    Telno,
    Percent,
    Url,
    Ordinal,
    Timestamp,
    Currency,
    Amount,
    Person,
    Email,
    Entity,
    Unknown,
    DateAbs,
    DateRel,
    TimestampAbs,
    TimestampRel,
    Measurement,
}

impl TokenKind {
    pub const ALL: [TokenKind; 22] = [
        TokenKind::Punctuation,
        TokenKind::Time,
        TokenKind::Date,
        TokenKind::Year,
        TokenKind::Number,
        TokenKind::Word,
        TokenKind::Telno,
        TokenKind::Percent,
        TokenKind::Url,
        TokenKind::Ordinal,
        TokenKind::Timestamp,
        TokenKind::Currency,
        TokenKind::Amount,
        TokenKind::Person,
        TokenKind::Email,
        TokenKind::Entity,
        TokenKind::Unknown,
        TokenKind::DateAbs,
        TokenKind::DateRel,
        TokenKind::TimestampAbs,
        TokenKind::TimestampRel,
        TokenKind::Measurement,
    ];

    /// The tokenizer's numeric code for this kind (1-based).
    pub fn code(self) -> u16 {
        match self {
            TokenKind::Punctuation => 1,
            TokenKind::Time => 2,
            TokenKind::Date => 3,
            TokenKind::Year => 4,
            TokenKind::Number => 5,
            TokenKind::Word => 6,
            TokenKind::Telno => 7,
            TokenKind::Percent => 8,
            TokenKind::Url => 9,
            TokenKind::Ordinal => 10,
            TokenKind::Timestamp => 11,
            TokenKind::Currency => 12,
            TokenKind::Amount => 13,
            TokenKind::Person => 14,
            TokenKind::Email => 15,
            TokenKind::Entity => 16,
            TokenKind::Unknown => 17,
            TokenKind::DateAbs => 18,
            TokenKind::DateRel => 19,
            TokenKind::TimestampAbs => 20,
            TokenKind::TimestampRel => 21,
            TokenKind::Measurement => 22,
        }
    }

    /// Look up a kind by numeric code. Code 0 is treated as an absent kind.
    pub fn from_code(code: u64) -> Option<TokenKind> {
        if code == 0 {
            return Some(TokenKind::Word);
        }
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| u64::from(kind.code()) == code)
    }

    /// Descriptive name, as the tokenizer prints it.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Punctuation => "PUNCTUATION",
            TokenKind::Time => "TIME",
            TokenKind::Date => "DATE",
            TokenKind::Year => "YEAR",
            TokenKind::Number => "NUMBER",
            TokenKind::Word => "WORD",
            TokenKind::Telno => "TELNO",
            TokenKind::Percent => "PERCENT",
            TokenKind::Url => "URL",
            TokenKind::Ordinal => "ORDINAL",
            TokenKind::Timestamp => "TIMESTAMP",
            TokenKind::Currency => "CURRENCY",
            TokenKind::Amount => "AMOUNT",
            TokenKind::Person => "PERSON",
            TokenKind::Email => "EMAIL",
            TokenKind::Entity => "ENTITY",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::DateAbs => "DATEABS",
            TokenKind::DateRel => "DATEREL",
            TokenKind::TimestampAbs => "TIMESTAMPABS",
            TokenKind::TimestampRel => "TIMESTAMPREL",
            TokenKind::Measurement => "MEASUREMENT",
        }
    }

    pub fn from_name(name: &str) -> Option<TokenKind> {
        TokenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn is_word(&self) -> bool {
        *self == TokenKind::Word
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// Kind as it appears on the wire, before validation
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKind {
    Code(u64),
    Name(String),
    Other(serde_json::Value),
}

// Kinds this crate does not know degrade to `Unknown` instead of failing the
// whole document.
impl<'de> Deserialize<'de> for TokenKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawKind>::deserialize(deserializer)?;
        Ok(match raw {
            None => TokenKind::Word,
            Some(RawKind::Code(code)) => TokenKind::from_code(code).unwrap_or_else(|| {
                tracing::warn!(code, "unrecognized token kind code, treating as unknown");
                TokenKind::Unknown
            }),
            Some(RawKind::Name(name)) => TokenKind::from_name(&name).unwrap_or_else(|| {
                tracing::warn!(name = %name, "unrecognized token kind name, treating as unknown");
                TokenKind::Unknown
            }),
            Some(RawKind::Other(value)) => {
                tracing::warn!(%value, "malformed token kind, treating as unknown");
                TokenKind::Unknown
            }
        })
    }
}

/// Lexical meaning of a recognized dictionary word.
///
/// On the wire this is a four element array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    from = "(String, String, String, String)",
    into = "(String, String, String, String)"
)]
pub struct Meaning {
    pub lemma: String,
    /// Word category (`kk`, `so`, `lo`, ...). Doubles as the visual class.
    pub category: String,
    pub subcategory: String,
    pub inflection: String,
}

impl Meaning {
    pub fn new(
        lemma: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        inflection: impl Into<String>,
    ) -> Self {
        Meaning {
            lemma: lemma.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            inflection: inflection.into(),
        }
    }
}

impl From<(String, String, String, String)> for Meaning {
    fn from((lemma, category, subcategory, inflection): (String, String, String, String)) -> Self {
        Meaning {
            lemma,
            category,
            subcategory,
            inflection,
        }
    }
}

impl From<Meaning> for (String, String, String, String) {
    fn from(m: Meaning) -> Self {
        (m.lemma, m.category, m.subcategory, m.inflection)
    }
}

/// Marker for proper noun grammar terminals (`sérnafn_nf`, `sérnafn_þf`, ...)
pub const PROPER_NOUN_TERMINAL: &str = "sérnafn";

/// The atomic unit of rendered text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "x")]
    pub text: String,

    #[serde(rename = "k", default, skip_serializing_if = "TokenKind::is_word")]
    pub kind: TokenKind,

    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,

    #[serde(
        rename = "m",
        default,
        deserialize_with = "deserialize_meaning",
        skip_serializing_if = "Option::is_none"
    )]
    pub meaning: Option<Meaning>,

    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<serde_json::Value>,

    #[serde(
        rename = "err",
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "is_false"
    )]
    pub is_error: bool,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            kind,
            terminal: None,
            meaning: None,
            auxiliary: None,
            is_error: false,
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Word, text)
    }

    pub fn punctuation(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Punctuation, text)
    }

    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = Some(terminal.into());
        self
    }

    pub fn with_meaning(mut self, meaning: Meaning) -> Self {
        self.meaning = Some(meaning);
        self
    }

    pub fn with_auxiliary(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.auxiliary = Some(value.into());
        self
    }

    pub fn with_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    pub fn is_punctuation(&self) -> bool {
        self.kind == TokenKind::Punctuation
    }

    /// True when the first underscore-delimited segment of the terminal is the
    /// proper noun marker.
    pub fn has_proper_noun_terminal(&self) -> bool {
        self.terminal
            .as_deref()
            .and_then(|t| t.split('_').next())
            .is_some_and(|first| first == PROPER_NOUN_TERMINAL)
    }

    /// The nominative full name carried by a person token.
    pub fn person_name(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Person => self.auxiliary.as_ref().and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
}

/// A meaning that is not a four element string array is dropped, so the
/// token falls through to the classes for words without a meaning.
fn deserialize_meaning<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Meaning>, D::Error> {
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value::<Meaning>(value) {
        Ok(meaning) => Ok(Some(meaning)),
        Err(e) => {
            tracing::warn!(error = %e, "malformed meaning, ignoring it");
            Ok(None)
        }
    }
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<RawFlag>::deserialize(deserializer)? {
        None => false,
        Some(RawFlag::Bool(b)) => b,
        Some(RawFlag::Int(n)) => n != 0,
    })
}

/// Ordered sequence of tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Sentence { tokens }
    }

    /// True iff no token is marked as an error. Vacuously true when empty.
    pub fn is_fully_parsed(&self) -> bool {
        !self.tokens.iter().any(|t| t.is_error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paragraph {
    pub sentences: Vec<Sentence>,
}

impl Paragraph {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Paragraph { sentences }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Document { paragraphs }
    }

    /// All tokens in document order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.sentences.iter())
            .flat_map(|s| s.tokens.iter())
    }

    /// Decode a bare document (`null` yields `None`)
    pub fn from_json(source: &str) -> Result<Option<Document>, ViewError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// The analysis server's response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub result: Option<Document>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<NameRegistry>,
}

impl Analysis {
    /// Decode either a full envelope or a bare document array.
    pub fn from_json(source: &str) -> Result<Analysis, ViewError> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        if value.is_object() {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(Analysis {
                result: serde_json::from_value(value)?,
                register: None,
            })
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.result.as_ref()
    }

    pub fn names(&self) -> NameRegistry {
        self.register.clone().unwrap_or_default()
    }
}
