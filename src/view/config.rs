//! Configuration loading
//!
//! `defaults/reynir-view.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. User files are
//! layered on top of it via [`Loader`] before deserializing into
//! [`ViewConfig`].

use crate::view::names::DEFAULT_LOCALE;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/reynir-view.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    pub html: HtmlConfig,
    pub names: NamesConfig,
}

/// Knobs for HTML output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HtmlConfig {
    pub standalone: bool,
    pub title: String,
    pub lang: String,
    pub include_register: bool,
}

// Mirrors the [html] table of the embedded defaults
impl Default for HtmlConfig {
    fn default() -> Self {
        HtmlConfig {
            standalone: false,
            title: "Greining".to_string(),
            lang: DEFAULT_LOCALE.to_string(),
            include_register: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamesConfig {
    pub locale: String,
}

impl Default for NamesConfig {
    fn default() -> Self {
        NamesConfig {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<ViewConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ViewConfig, ConfigError> {
    Loader::new().build()
}
