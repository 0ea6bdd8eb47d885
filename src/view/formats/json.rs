//! JSON output of a render model
//!
//! Carries the rendered sentences, the token index in identifier order and
//! the render stats, so a client can build its own markup and still look
//! tokens up by identifier.

use crate::view::error::ViewError;
use crate::view::formats::registry::Formatter;
use crate::view::names::NameRegistry;
use crate::view::render::{RenderModel, RenderStats, RenderedParagraph, TokenIndex};
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    paragraphs: &'a [RenderedParagraph],
    index: &'a TokenIndex,
    stats: RenderStats,
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "Rendered sentences, token index and stats as JSON"
    }

    fn serialize(&self, model: &RenderModel, _names: &NameRegistry) -> Result<String, ViewError> {
        let output = JsonOutput {
            paragraphs: &model.paragraphs,
            index: &model.index,
            stats: model.stats(),
        };
        serde_json::to_string_pretty(&output)
            .map_err(|e| ViewError::Serialization(format!("JSON serialization failed: {}", e)))
    }
}
