//! Main module for the token rendering pipeline
//!
//! The pipeline is consumed in this order:
//!
//!     tokens    (decoded token tree)
//!     spacing   (punctuation adjacency)
//!     classify  (visual class per token)
//!     render    (RenderModel + token index)
//!     formats   (html, page, text, json)
//!
//! `names` and `session` sit beside the pipeline: the register is an input to
//! rendering and to interaction, and the session owns both between renders.

pub mod categories;
pub mod classify;
pub mod config;
pub mod error;
pub mod formats;
pub mod names;
pub mod query;
pub mod render;
pub mod session;
pub mod spacing;
pub mod tokens;
