//! Spacing between adjacent tokens
//!
//! The tokenizer discards the original whitespace, so it has to be
//! reconstructed from token adjacency alone. Every token gets a [`PunctClass`];
//! words are always [`PunctClass::Word`], punctuation is classified by its
//! first character. [`needs_space`] then reads a fixed 5×5 table indexed by the
//! classes of the previous and the current token.
//!
//!     prev \ curr   LEFT  CENTER  RIGHT  TIGHT  WORD
//!     LEFT           .      x       .      .      .
//!     CENTER         x      x       x      x      x
//!     RIGHT          x      x       .      .      x
//!     TIGHT          .      x       .      .      .
//!     WORD           x      x       .      .      x
//!
//! The em dash is the exception: it is always shown with a single space on
//! each side (see [`EM_DASH_SPACED`]), which is a text substitution done by
//! whoever emits the dash, not a table entry.

use crate::view::tokens::Token;

/// Opening brackets and quotes, and a few prefix symbols
pub const LEFT_PUNCTUATION: &str = "([„‚«#$€<°";

/// Closing brackets and quotes, sentence punctuation
pub const RIGHT_PUNCTUATION: &str = ".,:;)]!%?“»”’‛‘…>–";

/// Dashes and slashes glued to both neighbours
pub const TIGHT_PUNCTUATION: &str = "—–-/'~\\";

pub const EM_DASH: &str = "—";

/// Literal text shown for an em dash token
pub const EM_DASH_SPACED: &str = " — ";

/// Spacing behaviour of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctClass {
    /// No space after (opening brackets)
    Left,
    /// Space on both sides
    Center,
    /// No space before (closing brackets, sentence punctuation)
    Right,
    /// No space on either side
    Tight,
    /// Ordinary word
    Word,
}

impl PunctClass {
    pub const ALL: [PunctClass; 5] = [
        PunctClass::Left,
        PunctClass::Center,
        PunctClass::Right,
        PunctClass::Tight,
        PunctClass::Word,
    ];

    fn ordinal(self) -> usize {
        match self {
            PunctClass::Left => 0,
            PunctClass::Center => 1,
            PunctClass::Right => 2,
            PunctClass::Tight => 3,
            PunctClass::Word => 4,
        }
    }
}

const T: bool = true;
const F: bool = false;

// Rows: previous class. Columns: current class.
const NEEDS_SPACE: [[bool; 5]; 5] = [
    // LEFT CENTER RIGHT TIGHT WORD
    [F, T, F, F, F], // LEFT
    [T, T, T, T, T], // CENTER
    [T, T, F, F, T], // RIGHT
    [F, T, F, F, F], // TIGHT
    [T, T, F, F, T], // WORD
];

/// Classify a punctuation string by its first character.
///
/// Sets are checked in the order left, right, tight, so the en dash (which
/// appears in both the right and tight sets) is a right punctuation mark.
/// Characters in none of the sets are [`PunctClass::Center`].
pub fn punctuation_class(text: &str) -> PunctClass {
    let Some(first) = text.chars().next() else {
        return PunctClass::Center;
    };
    if LEFT_PUNCTUATION.contains(first) {
        PunctClass::Left
    } else if RIGHT_PUNCTUATION.contains(first) {
        PunctClass::Right
    } else if TIGHT_PUNCTUATION.contains(first) {
        PunctClass::Tight
    } else {
        PunctClass::Center
    }
}

/// Spacing class of a token. Non-punctuation tokens are always words.
pub fn spacing_class(token: &Token) -> PunctClass {
    if token.is_punctuation() {
        punctuation_class(&token.text)
    } else {
        PunctClass::Word
    }
}

/// Whether a space separates a token of class `current` from its predecessor
pub fn needs_space(previous: PunctClass, current: PunctClass) -> bool {
    NEEDS_SPACE[previous.ordinal()][current.ordinal()]
}

/// Running spacing state across one sentence.
///
/// Starts out tight, and the first token never gets a leading space
/// regardless of the table. An em dash carries its own spaces, so no table
/// space is added on either side of one.
#[derive(Debug, Clone)]
pub struct SpacingCursor {
    previous: PunctClass,
    previous_em_dash: bool,
    first: bool,
}

impl SpacingCursor {
    pub fn new() -> Self {
        SpacingCursor {
            previous: PunctClass::Tight,
            previous_em_dash: false,
            first: true,
        }
    }

    /// Advance past `token`, returning whether a space goes before it.
    pub fn advance(&mut self, token: &Token) -> bool {
        let current = spacing_class(token);
        let em_dash = is_em_dash(token);
        let space = !self.first
            && !em_dash
            && !self.previous_em_dash
            && needs_space(self.previous, current);
        self.previous = current;
        self.previous_em_dash = em_dash;
        self.first = false;
        space
    }
}

fn is_em_dash(token: &Token) -> bool {
    token.is_punctuation() && token.text == EM_DASH
}

impl Default for SpacingCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown for a punctuation token
pub fn punctuation_text(text: &str) -> &str {
    if text == EM_DASH {
        EM_DASH_SPACED
    } else {
        text
    }
}

/// Join a sentence's tokens into plain text with reconstructed spacing.
pub fn join_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    let mut cursor = SpacingCursor::new();
    let mut out = String::new();
    for token in tokens {
        if cursor.advance(token) {
            out.push(' ');
        }
        if token.is_punctuation() {
            out.push_str(punctuation_text(&token.text));
        } else {
            out.push_str(&token.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tokens::{Token, TokenKind};

    fn words(items: &[(&str, bool)]) -> Vec<Token> {
        items
            .iter()
            .map(|(text, punct)| {
                if *punct {
                    Token::punctuation(*text)
                } else {
                    Token::word(*text)
                }
            })
            .collect()
    }

    #[test]
    fn test_punctuation_sets() {
        assert_eq!(punctuation_class("("), PunctClass::Left);
        assert_eq!(punctuation_class("„"), PunctClass::Left);
        assert_eq!(punctuation_class("."), PunctClass::Right);
        assert_eq!(punctuation_class("“"), PunctClass::Right);
        assert_eq!(punctuation_class("-"), PunctClass::Tight);
        assert_eq!(punctuation_class("/"), PunctClass::Tight);
        assert_eq!(punctuation_class("—"), PunctClass::Tight);
        assert_eq!(punctuation_class("*"), PunctClass::Center);
        assert_eq!(punctuation_class("\""), PunctClass::Center);
    }

    #[test]
    fn test_en_dash_is_right() {
        assert_eq!(punctuation_class("–"), PunctClass::Right);
    }

    #[test]
    fn test_words_are_always_word_class() {
        for kind in TokenKind::ALL {
            let token = Token::new(kind, "(");
            let expected = if kind == TokenKind::Punctuation {
                PunctClass::Left
            } else {
                PunctClass::Word
            };
            assert_eq!(spacing_class(&token), expected, "{kind}");
        }
    }

    #[test]
    fn test_empty_punctuation_is_center() {
        assert_eq!(punctuation_class(""), PunctClass::Center);
    }

    #[test]
    fn test_cursor_never_spaces_first_token() {
        let mut cursor = SpacingCursor::new();
        assert!(!cursor.advance(&Token::punctuation("*")));
        assert!(cursor.advance(&Token::word("a")));
    }

    #[test]
    fn test_join_tokens() {
        let tokens = words(&[
            ("Hann", false),
            ("sagði", false),
            ("(", true),
            ("í", false),
            ("gær", false),
            (")", true),
            ("að", false),
            ("Reykjavík", false),
            ("-", true),
            ("Akureyri", false),
            ("væri", false),
            ("góð", false),
            ("leið", false),
            (".", true),
        ]);
        assert_eq!(
            join_tokens(&tokens),
            "Hann sagði (í gær) að Reykjavík-Akureyri væri góð leið."
        );
    }

    #[test]
    fn test_join_tokens_em_dash() {
        let tokens = words(&[("Já", false), ("—", true), ("nei", false), (".", true)]);
        assert_eq!(join_tokens(&tokens), "Já — nei.");
    }

    #[test]
    fn test_em_dash_overrides_table() {
        // CENTER before TIGHT would otherwise add a space
        let tokens = words(&[("*", true), ("—", true), ("(", true), ("a", false)]);
        assert_eq!(join_tokens(&tokens), "* — (a");
    }

    #[test]
    fn test_join_tokens_quotes() {
        let tokens = words(&[
            ("Hún", false),
            ("sagði", false),
            ("„", true),
            ("halló", false),
            ("“", true),
            (".", true),
        ]);
        assert_eq!(join_tokens(&tokens), "Hún sagði „halló“.");
    }
}
