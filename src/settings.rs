//! Settings read through the `config` crate.
//!
//! Sources are layered: an optional file first, then environment variables
//! prefixed with `FIELDKIT__`, nested keys separated by `__`
//! (for instance `FIELDKIT__SERIES__PREFIX=INV-`).

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use tracing::debug;

use crate::date::{DATE_LAYOUTS, parse_date};
use crate::datatype::Timestamp;
use crate::error::{FieldkitError, Result};
use crate::optional::contains;
use crate::series::{SeriesOptions, build_series};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Layout tried instead of the full list when parsing dates.
    pub date_layout: Option<String>,
    pub series: SeriesOptions,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_layout: None,
            series: SeriesOptions::default(),
            log_filter: "info".to_owned(),
        }
    }
}

impl Settings {
    /// Loads from `path` (when given and present) and the environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        Self::finish(builder)
    }
    /// Loads from an in-memory TOML document and the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::finish(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }
    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("FIELDKIT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }
    pub fn validate(&self) -> Result<()> {
        match &self.date_layout {
            Some(layout) if !contains(&layout.as_str(), &DATE_LAYOUTS) => {
                Err(FieldkitError::LayoutNotSupported(layout.clone()))
            }
            _ => Ok(()),
        }
    }
    pub fn parse_date(&self, text: &str) -> Result<(Timestamp, &'static str)> {
        parse_date(text, self.date_layout.as_deref())
    }
    pub fn build_series(&self, counter: i64) -> String {
        build_series(counter, &self.series)
    }
}
