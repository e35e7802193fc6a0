//! Render configuration.
//!
//! YAML configuration with precedence: explicit file > `FIGURE_GRAMMAR_CONFIG`
//! > `<config dir>/figure-grammar/config.yaml` > defaults.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::compose::LayoutSpec;
use crate::error::{Error, Result};
use crate::grammar::{DatasetProvider, Renderer, Theme};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "FIGURE_GRAMMAR_CONFIG";

/// Settings for one rendering pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    /// Width of one panel in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Height of one panel in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Theme preset name.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Point diameter when size is not mapped.
    #[serde(default = "default_point_size")]
    pub point_size: f32,

    /// Directory searched for `<name>.csv` datasets.
    #[serde(default)]
    pub dataset_dir: Option<PathBuf>,

    /// Layout used when composing panels.
    #[serde(default)]
    pub layout: LayoutSpec,
}

fn default_width() -> u32 {
    400
}
fn default_height() -> u32 {
    300
}
fn default_theme() -> String {
    "grey".to_string()
}
fn default_point_size() -> f32 {
    3.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            theme: default_theme(),
            point_size: default_point_size(),
            dataset_dir: None,
            layout: LayoutSpec::default(),
        }
    }
}

impl RenderConfig {
    /// Parse configuration from a YAML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] with the line number if parsing fails, or if
    /// the values do not validate.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config(format!("line {line}: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a parse error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!("loading render config from {}", path.display());
        Self::parse(&content)
    }

    /// Load following the precedence order. Only an explicit path, or one
    /// named by the environment, must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(PathBuf::from(path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/figure-grammar/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("figure-grammar").join("config.yaml"))
    }

    /// Check value ranges and the theme name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero width or height, and
    /// [`Error::Config`] for an unknown theme or a non-positive point size.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }
        if self.point_size.is_nan() || self.point_size <= 0.0 {
            return Err(Error::Config(format!("point_size must be positive, got {}", self.point_size)));
        }
        Theme::by_name(&self.theme).map(|_| ())
    }

    /// The configured theme.
    pub fn theme(&self) -> Result<Theme> {
        Theme::by_name(&self.theme)
    }

    /// A dataset provider reading from the configured directory.
    #[must_use]
    pub fn provider(&self) -> DatasetProvider {
        match &self.dataset_dir {
            Some(dir) => DatasetProvider::new().with_directory(dir),
            None => DatasetProvider::new(),
        }
    }

    /// A renderer using the configured point size.
    #[must_use]
    pub fn renderer(&self) -> Renderer {
        Renderer::new().with_point_size(self.point_size)
    }
}
