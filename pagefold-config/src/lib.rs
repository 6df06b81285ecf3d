//! Shared configuration loader for pagefold.
//!
//! `defaults/pagefold.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`PagefoldConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use pagefold_babel::{FooterConfig, FooterError, PageSize, SerializeOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pagefold.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "pagefold.toml";

/// Top-level configuration consumed by pagefold applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PagefoldConfig {
    pub footer: FooterSettings,
    pub convert: ConvertSettings,
}

/// Raw footer settings. Validated when turned into a [`FooterConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct FooterSettings {
    pub enabled: bool,
    pub layout: String,
    pub left: String,
    pub right: String,
    pub date_format: String,
}

impl TryFrom<&FooterSettings> for FooterConfig {
    type Error = FooterError;

    fn try_from(settings: &FooterSettings) -> Result<Self, Self::Error> {
        FooterConfig::new(
            settings.enabled,
            &settings.layout,
            settings.left.as_str(),
            settings.right.as_str(),
            settings.date_format.as_str(),
        )
    }
}

impl TryFrom<FooterSettings> for FooterConfig {
    type Error = FooterError;

    fn try_from(settings: FooterSettings) -> Result<Self, Self::Error> {
        FooterConfig::new(
            settings.enabled,
            &settings.layout,
            settings.left,
            settings.right,
            settings.date_format,
        )
    }
}

/// Conversion knobs shared by every output format.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertSettings {
    pub page_size: PageSizeSetting,
    pub overwrite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PageSizeSetting {
    #[serde(rename = "letter")]
    Letter,
    #[serde(rename = "a4")]
    A4,
}

impl From<PageSizeSetting> for PageSize {
    fn from(setting: PageSizeSetting) -> Self {
        match setting {
            PageSizeSetting::Letter => PageSize::Letter,
            PageSizeSetting::A4 => PageSize::A4,
        }
    }
}

impl PagefoldConfig {
    /// Writer options described by this configuration.
    pub fn serialize_options(&self) -> Result<SerializeOptions, FooterError> {
        Ok(SerializeOptions {
            footer: FooterConfig::try_from(&self.footer)?,
            page_size: self.convert.page_size.into(),
        })
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
    pub fn build(self) -> Result<PagefoldConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PagefoldConfig, ConfigError> {
    Loader::new().build()
}
