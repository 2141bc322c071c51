//! Shared configuration loader for the slidemark tools.
//!
//! `defaults/slidemark.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`SlidemarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use slidemark_patch::{DeckOptions, StyleOptions};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/slidemark.default.toml");

/// Name of the optional per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "slidemark.toml";

/// Top-level configuration consumed by slidemark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SlidemarkConfig {
    pub style: StyleConfig,
    pub slides: SlidesConfig,
    pub logging: LoggingConfig,
}

/// Which tags the style engine wraps, and how.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    pub inner_wrap_tags: Vec<String>,
    pub outer_wrap_tags: Vec<String>,
}

impl From<&StyleConfig> for StyleOptions {
    fn from(config: &StyleConfig) -> Self {
        StyleOptions {
            inner_wrap_tags: config.inner_wrap_tags.iter().cloned().collect(),
            outer_wrap_tags: config.outer_wrap_tags.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlidesConfig {
    pub scope_class_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl SlidemarkConfig {
    /// Deck options built from the style and slides sections.
    pub fn deck_options(&self) -> DeckOptions {
        DeckOptions {
            scope_class_prefix: self.slides.scope_class_prefix.clone(),
            style: StyleOptions::from(&self.style),
        }
    }
}

impl From<&SlidesConfig> for DeckOptions {
    fn from(config: &SlidesConfig) -> Self {
        DeckOptions {
            scope_class_prefix: config.scope_class_prefix.clone(),
            ..DeckOptions::default()
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SlidemarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SlidemarkConfig, ConfigError> {
    Loader::new().build()
}
