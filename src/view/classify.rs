//! Token classification
//!
//! Each token gets exactly one [`TokenClass`], decided by a fixed precedence:
//!
//! 1. punctuation
//! 2. words (kind WORD, the default):
//!    a. inside a sentence the parser rejected: neutral, no class
//!    b. with a dictionary meaning: the meaning's category
//!    c. with a proper noun terminal: `entity`
//!    d. otherwise: `nf` (not found)
//! 3. every other kind: the fixed class for that kind
//!
//! Error marking is orthogonal: an error token keeps its class and is wrapped
//! in an error marker by the renderer.

use crate::view::spacing;
use crate::view::tokens::{Token, TokenKind};
use std::borrow::Cow;

pub const PUNCTUATION_CLASS: &str = "p";
pub const ENTITY_CLASS: &str = "entity";
pub const NOT_FOUND_CLASS: &str = "nf";

/// Visual category of a rendered token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass<'a> {
    /// Punctuation, not interactive
    Punctuation,
    /// Word inside an errored sentence
    Neutral,
    /// Dictionary word, classed by the category of its meaning
    Category(&'a str),
    /// Word whose terminal marks it as a proper noun
    ProperNoun,
    /// Word absent from the lexical lookup
    NotFound,
    /// Any other kind, classed by the kind table
    Kind(TokenKind),
}

impl<'a> TokenClass<'a> {
    /// CSS class for the rendered element. `None` means no class attribute.
    pub fn css_class(&self) -> Option<&'a str> {
        match self {
            TokenClass::Punctuation => Some(PUNCTUATION_CLASS),
            TokenClass::Neutral => None,
            TokenClass::Category(category) => Some(*category),
            TokenClass::ProperNoun => Some(ENTITY_CLASS),
            TokenClass::NotFound => Some(NOT_FOUND_CLASS),
            TokenClass::Kind(kind) => Some(kind_class(*kind)),
        }
    }

    /// Whether the token is stamped with an identifier and indexed
    pub fn is_interactive(&self) -> bool {
        !matches!(self, TokenClass::Punctuation)
    }

    /// Whether `" - "` in the text is collapsed to `"-"`
    pub fn collapses_hyphens(&self) -> bool {
        matches!(
            self,
            TokenClass::ProperNoun | TokenClass::Kind(TokenKind::Entity)
        )
    }
}

/// Fixed kind → class table.
pub fn kind_class(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Punctuation => PUNCTUATION_CLASS,
        TokenKind::Time => "time",
        TokenKind::Date | TokenKind::DateAbs | TokenKind::DateRel => "date",
        TokenKind::Year => "year",
        TokenKind::Number => "number",
        TokenKind::Telno => "telno",
        TokenKind::Percent => "percent",
        TokenKind::Url => "url",
        TokenKind::Ordinal => "ordinal",
        TokenKind::Timestamp | TokenKind::TimestampAbs | TokenKind::TimestampRel => "timestamp",
        TokenKind::Currency => "currency",
        TokenKind::Amount => "amount",
        TokenKind::Measurement => "measurement",
        TokenKind::Person => "person",
        TokenKind::Email => "email",
        TokenKind::Entity => ENTITY_CLASS,
        // A bare word with nothing else known about it
        TokenKind::Word | TokenKind::Unknown => NOT_FOUND_CLASS,
    }
}

/// Classify a token. `sentence_parsed` is the fully-parsed flag of the
/// enclosing sentence, computed before any of its tokens are rendered.
pub fn classify(token: &Token, sentence_parsed: bool) -> TokenClass<'_> {
    match token.kind {
        TokenKind::Punctuation => TokenClass::Punctuation,
        TokenKind::Word => match (&token.meaning, token.has_proper_noun_terminal()) {
            _ if !sentence_parsed => TokenClass::Neutral,
            (Some(meaning), _) => TokenClass::Category(&meaning.category),
            (None, true) => TokenClass::ProperNoun,
            (None, false) => TokenClass::NotFound,
        },
        kind => TokenClass::Kind(kind),
    }
}

/// Rejoin a hyphenated proper name that was tokenized as `"A - B"`.
pub fn collapse_hyphens(text: &str) -> Cow<'_, str> {
    if text.contains(" - ") {
        Cow::Owned(text.replace(" - ", "-"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Text shown for a token of the given class
pub fn display_text<'t>(token: &'t Token, class: &TokenClass<'_>) -> Cow<'t, str> {
    if *class == TokenClass::Punctuation {
        Cow::Borrowed(spacing::punctuation_text(&token.text))
    } else if class.collapses_hyphens() {
        collapse_hyphens(&token.text)
    } else {
        Cow::Borrowed(&token.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tokens::Meaning;

    fn meaning(category: &str) -> Meaning {
        Meaning::new("lemma", category, "alm", "NFET")
    }

    #[test]
    fn test_meaning_wins_over_terminal() {
        let token = Token::word("Jón - Jónsson")
            .with_terminal("sérnafn_nf")
            .with_meaning(meaning("kk"));
        let class = classify(&token, true);
        assert_eq!(class, TokenClass::Category("kk"));
        assert_eq!(display_text(&token, &class), "Jón - Jónsson");
    }

    #[test]
    fn test_proper_noun_terminal_collapses() {
        let token = Token::word("Jón - Jónsson").with_terminal("sérnafn_nf");
        let class = classify(&token, true);
        assert_eq!(class, TokenClass::ProperNoun);
        assert_eq!(class.css_class(), Some("entity"));
        assert_eq!(display_text(&token, &class), "Jón-Jónsson");
    }

    #[test]
    fn test_entity_kind_collapses() {
        let token = Token::new(TokenKind::Entity, "Jón - Jónsson");
        let class = classify(&token, true);
        assert_eq!(class, TokenClass::Kind(TokenKind::Entity));
        assert_eq!(display_text(&token, &class), "Jón-Jónsson");
    }

    #[test]
    fn test_other_terminal_is_not_found() {
        let token = Token::word("blabla").with_terminal("so_0");
        assert_eq!(classify(&token, true), TokenClass::NotFound);
    }

    #[test]
    fn test_errored_sentence_words_are_neutral() {
        let token = Token::word("hestur").with_meaning(meaning("kk"));
        let class = classify(&token, false);
        assert_eq!(class, TokenClass::Neutral);
        assert_eq!(class.css_class(), None);
        assert!(class.is_interactive());
    }

    #[test]
    fn test_errored_sentence_keeps_kind_classes() {
        let token = Token::new(TokenKind::Number, "42");
        assert_eq!(classify(&token, false).css_class(), Some("number"));
    }

    #[test]
    fn test_punctuation_is_not_interactive() {
        let token = Token::punctuation("—");
        let class = classify(&token, true);
        assert!(!class.is_interactive());
        assert_eq!(display_text(&token, &class), " — ");
    }

    #[test]
    fn test_number_kind_keeps_hyphen_spacing() {
        let token = Token::new(TokenKind::Number, "1 - 2");
        let class = classify(&token, true);
        assert_eq!(display_text(&token, &class), "1 - 2");
    }

    #[test]
    fn test_collapse_all_occurrences() {
        assert_eq!(collapse_hyphens("A - B - C"), "A-B-C");
        assert!(matches!(collapse_hyphens("ABC"), Cow::Borrowed(_)));
    }
}
