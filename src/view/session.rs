//! Render session
//!
//! Owns the name register and the most recent render. Collaborators that bind
//! DOM events resolve the identifiers stamped into the markup through the
//! session: `token` for the raw token, `hover` for popup facts, `click` for
//! the question a token asks.
//!
//! Identifiers are only meaningful for the render that produced them. After a
//! new render, an old identifier either misses or names a different token.

use crate::view::categories;
use crate::view::classify;
use crate::view::error::ViewError;
use crate::view::names::NameRegistry;
use crate::view::query::{self, Query};
use crate::view::render::{self, RenderModel};
use crate::view::tokens::{Analysis, Document, Token, TokenKind};
use serde::Serialize;

/// What a hover popup shows for a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub text: String,
    pub kind: TokenKind,
    pub class: Option<String>,
    pub terminal: Option<String>,
    pub lemma: Option<String>,
    pub category: Option<String>,
    /// Icelandic name of the word category, or of the token class
    pub description: Option<&'static str>,
    pub inflection: Option<String>,
    /// Title of the person or definition of the entity, from the register
    pub title: Option<String>,
    pub query: Option<Query>,
    pub error: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RenderSession {
    names: NameRegistry,
    document: Option<Document>,
    model: RenderModel,
}

impl RenderSession {
    pub fn new(names: NameRegistry) -> Self {
        RenderSession {
            names,
            ..RenderSession::default()
        }
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    /// Replace the register. Takes effect on the next render.
    pub fn set_names(&mut self, names: NameRegistry) {
        self.names = names;
    }

    /// Render `document`, replacing the previous model entirely.
    pub fn render(&mut self, document: Option<&Document>) -> &RenderModel {
        self.model = render::render(document, &self.names);
        self.document = document.cloned();
        &self.model
    }

    /// Decode an analysis response and render it. A register in the response
    /// replaces the session's register.
    pub fn render_json(&mut self, source: &str) -> Result<&RenderModel, ViewError> {
        let analysis = Analysis::from_json(source)?;
        if let Some(names) = analysis.register {
            self.names = names;
        }
        Ok(self.render(analysis.result.as_ref()))
    }

    pub fn model(&self) -> &RenderModel {
        &self.model
    }

    /// The token stamped with identifier `id` in the current render
    pub fn token(&self, id: usize) -> Option<&Token> {
        self.model.index.get(id)
    }

    /// The question clicking token `id` asks, if it asks one
    pub fn click(&self, id: usize) -> Option<Query> {
        let query = query::query_for(self.token(id)?, &self.names);
        tracing::debug!(id, query = ?query, "token clicked");
        query
    }

    pub fn hover(&self, id: usize) -> Option<TokenInfo> {
        let token = self.token(id)?;
        let position = self.model.index.position(id)?;
        let parsed = self
            .model
            .sentence(position.paragraph, position.sentence)
            .map_or(true, |s| s.parsed);

        let class = classify::classify(token, parsed);
        let css_class = class.css_class();
        let meaning = token.meaning.as_ref();
        let description = meaning
            .and_then(|m| categories::describe(&m.category))
            .or_else(|| css_class.and_then(categories::describe));

        let query = query::query_for(token, &self.names);
        let title = query
            .as_ref()
            .and_then(|q| self.names.lookup(q.name()))
            .filter(|entry| !entry.title.is_empty())
            .map(|entry| entry.title.clone());

        Some(TokenInfo {
            text: classify::display_text(token, &class).into_owned(),
            kind: token.kind,
            class: css_class.map(str::to_string),
            terminal: token.terminal.clone(),
            lemma: meaning.map(|m| m.lemma.clone()),
            category: meaning.map(|m| m.category.clone()),
            description,
            inflection: meaning.map(|m| m.inflection.clone()),
            title,
            query,
            error: token.is_error,
        })
    }

    /// Plain text of a sentence of the current render
    pub fn sentence_text(&self, paragraph: usize, sentence: usize) -> Option<String> {
        let sentence = self
            .document
            .as_ref()?
            .paragraphs
            .get(paragraph)?
            .sentences
            .get(sentence)?;
        Some(render::sentence_text(sentence))
    }
}
