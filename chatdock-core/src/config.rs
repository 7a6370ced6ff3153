//! Widget configuration
//!
//! Every field has a default, so an embedding host may pass nothing at all,
//! a partial JSON object (browser), or a TOML file (terminal harness).

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_HEIGHT, DEFAULT_PLACEHOLDER, DEFAULT_STORAGE_KEY, DEFAULT_TITLE,
    DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH, VIEWPORT_MARGIN,
};
use crate::error::ConfigError;
use crate::geometry::Size;
use crate::state::PanelState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// POST target for chat messages
    pub endpoint: String,
    /// Key of the persisted panel record
    pub storage_key: String,
    pub title: String,
    pub placeholder: String,
    /// Bot row shown once when the panel shell is built
    pub greeting: Option<String>,
    pub default_width: f64,
    pub default_height: f64,
    pub margin: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            title: DEFAULT_TITLE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            greeting: None,
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            margin: VIEWPORT_MARGIN,
        }
    }
}

impl WidgetConfig {
    /// Parse an inline JSON object supplied by the host page.
    /// Blank input means "all defaults".
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Self = serde_json::from_str(raw)?;
        parsed.validate()
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Reading widget configuration file");

        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let parsed: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        parsed.validate()
    }

    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.endpoint = self.endpoint.trim().to_string();
        if self.endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if !(self.default_width >= MIN_WIDTH && self.default_height >= MIN_HEIGHT) {
            return Err(ConfigError::DefaultBelowMinimum {
                width: self.default_width,
                height: self.default_height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ConfigError::InvalidMargin(self.margin));
        }
        self.greeting = self.greeting.filter(|g| !g.trim().is_empty());
        Ok(self)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn min_size(&self) -> Size {
        Size::new(MIN_WIDTH, MIN_HEIGHT)
    }

    /// State used when nothing decodable is persisted.
    pub fn default_state(&self) -> PanelState {
        PanelState {
            w: self.default_width,
            h: self.default_height,
            ..PanelState::default()
        }
    }
}
