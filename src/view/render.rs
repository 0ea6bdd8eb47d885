//! Token renderer
//!
//! Walks a document once, strictly left to right, and produces a
//! [`RenderModel`]:
//!
//! - per paragraph, a container of sentences
//! - per sentence, a parsed/error flag computed before any token is rendered,
//!   and a run of fragments (tokens and the spaces between them)
//! - a flat [`TokenIndex`] of every interactive token, whose positions are the
//!   identifiers stamped into the markup
//!
//! Spacing comes from [`spacing`](crate::view::spacing), classes from
//! [`classify`](crate::view::classify). The model is a plain value: nothing
//! survives between calls to [`render`].

use crate::view::classify::{self, TokenClass};
use crate::view::error::ViewError;
use crate::view::formats::html;
use crate::view::names::NameRegistry;
use crate::view::query::{self, Query};
use crate::view::spacing::{self, SpacingCursor};
use crate::view::tokens::{Document, Sentence, Token};
use serde::Serialize;

/// A rendered token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedToken {
    /// Position in the token index. `None` for punctuation.
    pub id: Option<usize>,
    /// CSS class. `None` means no class attribute.
    pub class: Option<String>,
    /// Displayed text, after em dash and hyphen substitution
    pub text: String,
    /// Wrapped in an error marker
    pub error: bool,
    /// What clicking the token asks, for persons and entities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "token", rename_all = "lowercase")]
pub enum Fragment {
    /// A single separating space
    Space,
    Token(RenderedToken),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedSentence {
    /// No token in the sentence is an error token
    pub parsed: bool,
    pub fragments: Vec<Fragment>,
}

impl RenderedSentence {
    pub fn tokens(&self) -> impl Iterator<Item = &RenderedToken> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Token(t) => Some(t),
            Fragment::Space => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedParagraph {
    pub sentences: Vec<RenderedSentence>,
}

/// Where an indexed token sits in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub paragraph: usize,
    pub sentence: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct IndexEntry {
    #[serde(flatten)]
    token: Token,
    #[serde(skip)]
    position: Position,
}

/// Interactive tokens in document order.
///
/// The position of a token in the index is the identifier stamped on its
/// element. Owned by the render that built it; a new render builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenIndex {
    entries: Vec<IndexEntry>,
}

impl TokenIndex {
    fn push(&mut self, token: &Token, position: Position) -> usize {
        self.entries.push(IndexEntry {
            token: token.clone(),
            position,
        });
        self.entries.len() - 1
    }

    /// The token stamped with identifier `id`
    pub fn get(&self, id: usize) -> Option<&Token> {
        self.entries.get(id).map(|e| &e.token)
    }

    pub fn position(&self, id: usize) -> Option<Position> {
        self.entries.get(id).map(|e| e.position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.entries.iter().map(|e| &e.token)
    }
}

/// Raw counts over a render. Formatting them is up to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub paragraphs: usize,
    pub sentences: usize,
    pub parsed_sentences: usize,
    pub tokens: usize,
    pub interactive_tokens: usize,
}

/// Output of [`render`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderModel {
    pub paragraphs: Vec<RenderedParagraph>,
    pub index: TokenIndex,
}

impl RenderModel {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn sentence(&self, paragraph: usize, sentence: usize) -> Option<&RenderedSentence> {
        self.paragraphs
            .get(paragraph)
            .and_then(|p| p.sentences.get(sentence))
    }

    pub fn stats(&self) -> RenderStats {
        let mut stats = RenderStats {
            paragraphs: self.paragraphs.len(),
            interactive_tokens: self.index.len(),
            ..RenderStats::default()
        };
        for sentence in self.paragraphs.iter().flat_map(|p| p.sentences.iter()) {
            stats.sentences += 1;
            if sentence.parsed {
                stats.parsed_sentences += 1;
            }
            stats.tokens += sentence.tokens().count();
        }
        stats
    }

    /// The markup as an HTML fragment
    pub fn to_html(&self) -> Result<String, ViewError> {
        html::render_fragment(self)
    }
}

/// Render a document. An absent document renders as an empty model.
pub fn render(document: Option<&Document>, names: &NameRegistry) -> RenderModel {
    let mut model = RenderModel::default();
    let Some(document) = document else {
        tracing::debug!("no document to render");
        return model;
    };

    for (p, paragraph) in document.paragraphs.iter().enumerate() {
        let mut rendered = RenderedParagraph::default();
        for (s, sentence) in paragraph.sentences.iter().enumerate() {
            let position = Position {
                paragraph: p,
                sentence: s,
            };
            rendered.sentences.push(render_sentence(
                sentence,
                position,
                names,
                &mut model.index,
            ));
        }
        model.paragraphs.push(rendered);
    }

    let stats = model.stats();
    tracing::debug!(
        paragraphs = stats.paragraphs,
        sentences = stats.sentences,
        parsed = stats.parsed_sentences,
        indexed = stats.interactive_tokens,
        "rendered document"
    );
    model
}

fn render_sentence(
    sentence: &Sentence,
    position: Position,
    names: &NameRegistry,
    index: &mut TokenIndex,
) -> RenderedSentence {
    // Error styling is decided before any token is rendered
    let parsed = sentence.is_fully_parsed();
    let mut cursor = SpacingCursor::new();
    let mut fragments = Vec::with_capacity(sentence.tokens.len() * 2);

    for token in &sentence.tokens {
        if cursor.advance(token) {
            fragments.push(Fragment::Space);
        }
        fragments.push(Fragment::Token(render_token(
            token, parsed, position, names, index,
        )));
    }

    RenderedSentence { parsed, fragments }
}

fn render_token(
    token: &Token,
    sentence_parsed: bool,
    position: Position,
    names: &NameRegistry,
    index: &mut TokenIndex,
) -> RenderedToken {
    let class = classify::classify(token, sentence_parsed);
    tracing::trace!(text = %token.text, class = ?class, "classified token");

    let id = class
        .is_interactive()
        .then(|| index.push(token, position));
    let query = match class {
        TokenClass::Punctuation => None,
        _ => query::query_for(token, names),
    };

    RenderedToken {
        id,
        class: class.css_class().map(str::to_string),
        text: classify::display_text(token, &class).into_owned(),
        error: token.is_error,
        query,
    }
}

/// Plain text of a sentence with reconstructed spacing
pub fn sentence_text(sentence: &Sentence) -> String {
    spacing::join_tokens(&sentence.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tokens::{Meaning, Paragraph, TokenKind};

    fn doc(sentences: Vec<Vec<Token>>) -> Document {
        Document::new(vec![Paragraph::new(
            sentences.into_iter().map(Sentence::new).collect(),
        )])
    }

    fn texts(sentence: &RenderedSentence) -> Vec<String> {
        sentence
            .fragments
            .iter()
            .map(|f| match f {
                Fragment::Space => " ".to_string(),
                Fragment::Token(t) => t.text.clone(),
            })
            .collect()
    }

    #[test]
    fn test_absent_document_is_empty() {
        let model = render(None, &NameRegistry::new());
        assert!(model.is_empty());
        assert!(model.index.is_empty());
    }

    #[test]
    fn test_empty_sentence_is_parsed() {
        let model = render(Some(&doc(vec![vec![]])), &NameRegistry::new());
        let sentence = model.sentence(0, 0).unwrap();
        assert!(sentence.parsed);
        assert!(sentence.fragments.is_empty());
    }

    #[test]
    fn test_scenario_sentence() {
        let document = doc(vec![vec![
            Token::word("Ég"),
            Token::word("sá"),
            Token::word("Jón").with_terminal("sérnafn_þf"),
            Token::punctuation("."),
        ]]);
        let model = render(Some(&document), &NameRegistry::new());
        let sentence = model.sentence(0, 0).unwrap();
        assert!(sentence.parsed);
        assert_eq!(texts(sentence), vec!["Ég", " ", "sá", " ", "Jón", "."]);
        assert_eq!(model.index.len(), 3);

        let jon = sentence.tokens().nth(2).unwrap();
        assert_eq!(jon.class.as_deref(), Some("entity"));
        assert_eq!(jon.id, Some(2));
        assert_eq!(jon.query, Some(Query::Entity("Jón".into())));

        let period = sentence.tokens().nth(3).unwrap();
        assert_eq!(period.id, None);
        assert_eq!(period.class.as_deref(), Some("p"));
    }

    #[test]
    fn test_no_leading_space_before_center_punctuation() {
        let document = doc(vec![vec![Token::punctuation("*"), Token::word("a")]]);
        let model = render(Some(&document), &NameRegistry::new());
        assert_eq!(texts(model.sentence(0, 0).unwrap()), vec!["*", " ", "a"]);
    }

    #[test]
    fn test_error_token_marks_whole_sentence() {
        let meaning = Meaning::new("hestur", "kk", "alm", "NFET");
        let document = doc(vec![vec![
            Token::word("hestur").with_meaning(meaning.clone()),
            Token::word("xyz").with_error(),
            Token::new(TokenKind::Number, "5"),
        ]]);
        let model = render(Some(&document), &NameRegistry::new());
        let sentence = model.sentence(0, 0).unwrap();
        assert!(!sentence.parsed);
        let tokens: Vec<_> = sentence.tokens().collect();
        assert_eq!(tokens[0].class, None);
        assert!(!tokens[0].error);
        assert_eq!(tokens[1].class, None);
        assert!(tokens[1].error);
        assert_eq!(tokens[2].class.as_deref(), Some("number"));
    }

    #[test]
    fn test_ids_continue_across_sentences_and_paragraphs() {
        let document = Document::new(vec![
            Paragraph::new(vec![
                Sentence::new(vec![Token::word("a"), Token::punctuation(".")]),
                Sentence::new(vec![Token::word("b")]),
            ]),
            Paragraph::new(vec![Sentence::new(vec![Token::word("c")])]),
        ]);
        let model = render(Some(&document), &NameRegistry::new());
        let ids: Vec<_> = model
            .paragraphs
            .iter()
            .flat_map(|p| p.sentences.iter())
            .flat_map(|s| s.tokens())
            .filter_map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(model.index.get(2).map(|t| t.text.as_str()), Some("c"));
        assert_eq!(
            model.index.position(1),
            Some(Position {
                paragraph: 0,
                sentence: 1
            })
        );
    }

    #[test]
    fn test_index_keeps_original_text() {
        let token = Token::new(TokenKind::Entity, "Jón - Jónsson");
        let model = render(Some(&doc(vec![vec![token.clone()]])), &NameRegistry::new());
        let rendered = model.sentence(0, 0).unwrap().tokens().next().unwrap();
        assert_eq!(rendered.text, "Jón-Jónsson");
        assert_eq!(model.index.get(0), Some(&token));
    }

    #[test]
    fn test_stats() {
        let document = doc(vec![
            vec![Token::word("a"), Token::punctuation(".")],
            vec![Token::word("b").with_error()],
        ]);
        let stats = render(Some(&document), &NameRegistry::new()).stats();
        assert_eq!(
            stats,
            RenderStats {
                paragraphs: 1,
                sentences: 2,
                parsed_sentences: 1,
                tokens: 3,
                interactive_tokens: 2,
            }
        );
    }

    #[test]
    fn test_sentence_text() {
        let sentence = Sentence::new(vec![
            Token::word("Ég"),
            Token::word("sá"),
            Token::word("Jón"),
            Token::punctuation("."),
        ]);
        assert_eq!(sentence_text(&sentence), "Ég sá Jón.");
    }
}
