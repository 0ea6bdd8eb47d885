//! Plain text output
//!
//! One sentence per line, paragraphs separated by a blank line. The text is
//! what the markup displays: spacing, em dashes and collapsed hyphens
//! included, element structure dropped.

use crate::view::error::ViewError;
use crate::view::formats::registry::Formatter;
use crate::view::names::NameRegistry;
use crate::view::render::{Fragment, RenderModel, RenderedSentence};

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn description(&self) -> &'static str {
        "Displayed text, one sentence per line"
    }

    fn serialize(&self, model: &RenderModel, _names: &NameRegistry) -> Result<String, ViewError> {
        let paragraphs: Vec<String> = model
            .paragraphs
            .iter()
            .map(|p| {
                p.sentences
                    .iter()
                    .map(displayed_text)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect();
        let mut out = paragraphs.join("\n\n");
        if !out.is_empty() {
            out.push('\n');
        }
        Ok(out)
    }
}

fn displayed_text(sentence: &RenderedSentence) -> String {
    let mut out = String::new();
    for fragment in &sentence.fragments {
        match fragment {
            Fragment::Space => out.push(' '),
            Fragment::Token(token) => out.push_str(&token.text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render::render;
    use crate::view::tokens::{Document, Paragraph, Sentence, Token};

    #[test]
    fn test_sentences_and_paragraphs() {
        let doc = Document::new(vec![
            Paragraph::new(vec![
                Sentence::new(vec![
                    Token::word("Halló"),
                    Token::punctuation(","),
                    Token::word("heimur"),
                    Token::punctuation("!"),
                ]),
                Sentence::new(vec![Token::word("Já"), Token::punctuation("—"), Token::word("nei")]),
            ]),
            Paragraph::new(vec![Sentence::new(vec![
                Token::punctuation("("),
                Token::word("svigi"),
                Token::punctuation(")"),
            ])]),
        ]);
        let model = render(Some(&doc), &NameRegistry::new());
        let text = TextFormatter.serialize(&model, &NameRegistry::new()).unwrap();
        assert_eq!(text, "Halló, heimur!\nJá — nei\n\n(svigi)\n");
    }

    #[test]
    fn test_empty_model_is_empty_text() {
        let text = TextFormatter
            .serialize(&RenderModel::default(), &NameRegistry::new())
            .unwrap();
        assert_eq!(text, "");
    }
}
