//! Shared configuration loader for the quire toolchain.
//!
//! `defaults/quire.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QuireConfig`].

use std::collections::HashMap;
use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use quire_format::format::font::{self, Font, FontRole, FontWeight};
use serde::Deserialize;

const DEFAULT_TOML: &str = include_str!("../defaults/quire.default.toml");

/// Top-level configuration consumed by quire applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QuireConfig {
    pub fonts: FontsConfig,
    pub export: ExportConfig,
    pub inspect: InspectConfig,
}

/// Default font per role.
#[derive(Debug, Clone, Deserialize)]
pub struct FontsConfig {
    pub text: FontConfig,
    pub math: FontConfig,
    pub math_identifier: FontConfig,
    pub math_function: FontConfig,
}

impl FontsConfig {
    pub fn get(&self, role: FontRole) -> &FontConfig {
        match role {
            FontRole::Text => &self.text,
            FontRole::Math => &self.math,
            FontRole::MathIdentifier => &self.math_identifier,
            FontRole::MathFunction => &self.math_function,
        }
    }

    /// Install these fonts as the default fonts of the calling thread.
    pub fn apply(&self) {
        for role in FontRole::ALL {
            font::set_default_font(role, self.get(role).into());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: f32,
    pub weight: u16,
    pub italic: bool,
}

impl From<&FontConfig> for Font {
    fn from(config: &FontConfig) -> Self {
        Font::new(
            &config.family,
            config.size,
            FontWeight::from_number(config.weight),
            config.italic,
        )
    }
}

/// Exporter-specific knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub html: HtmlConfig,
    pub latex: LatexConfig,
}

impl ExportConfig {
    /// Options for the exporter called `exporter`, as passed to
    /// `Exporter::export_with_options`.
    pub fn options(&self, exporter: &str) -> HashMap<String, String> {
        let mut options = HashMap::new();
        match exporter {
            "html" => {
                options.insert("style".to_string(), self.html.style.clone());
                options.insert("title".to_string(), self.html.title.clone());
            }
            "latex" => {
                options.insert(
                    "document_class".to_string(),
                    self.latex.document_class.clone(),
                );
            }
            _ => {}
        }
        options
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub style: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatexConfig {
    pub document_class: String,
}

/// Controls `quire inspect` output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_css: bool,
    pub show_string: bool,
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
    pub fn build(self) -> Result<QuireConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuireConfig, ConfigError> {
    Loader::new().build()
}
