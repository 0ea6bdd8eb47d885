//! Output formats for render models
//!
//! - `html`: the interactive markup fragment
//! - `page`: the fragment inside a complete HTML document with CSS
//! - `text`: plain text, one sentence per line
//! - `json`: sentence flags and the token index

pub mod html;
pub mod json;
pub mod registry;
pub mod text;

pub use html::{HtmlFormatter, PageFormatter};
pub use json::JsonFormatter;
pub use registry::{FormatRegistry, Formatter};
pub use text::TextFormatter;
