//! # reynir-view
//!
//! Renders pre-tokenized, pre-parsed Icelandic text as interactive HTML.
//!
//! The input is the analysis server's token tree (paragraphs of sentences of
//! tokens, each token optionally carrying a grammar terminal and a lexical
//! meaning). The output is a [`RenderModel`](view::render::RenderModel): a
//! structured sequence of rendered spans plus a flat index that maps the
//! identifiers stamped into the markup back to the original tokens.
//!
//! The interesting parts are:
//!
//! - [`view::spacing`]: the punctuation adjacency table that decides where
//!   whitespace goes between tokens whose original spacing was discarded.
//! - [`view::classify`]: the single-pass classification that gives each token
//!   a visual class and decides whether it is interactive.
//! - [`view::names`]: the name register used to resolve surnames to full names.
//!
//! Fetching the token JSON, binding DOM events and painting popups are left to
//! collaborators. [`view::session::RenderSession`] is the state those
//! collaborators talk to.

pub mod view;

pub use view::error::ViewError;
pub use view::names::{NameEntry, NameKind, NameRegistry};
pub use view::render::{render, RenderModel};
pub use view::session::RenderSession;
pub use view::tokens::{Document, Token, TokenKind};
