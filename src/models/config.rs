use crate::error::MapError;
use quad_paint::DEFAULT_GRID_SIZE;
use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Required edge length of the source image, in cells
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,

    /// Largest quad painted as a single rectangle
    #[serde(default = "default_detail_limit")]
    pub detail_limit: usize,

    /// Run the priority merger after extraction
    #[serde(default = "default_optimize")]
    pub optimize: bool,

    /// Block namespace used in `/fill` commands
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Relative y coordinate of every `/fill` command
    #[serde(default = "default_y_offset")]
    pub y_offset: i32,

    /// Preview pixels per grid cell
    #[serde(default = "default_preview_scale")]
    pub preview_scale: u32,
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_detail_limit() -> usize {
    1
}

fn default_optimize() -> bool {
    true
}

fn default_namespace() -> String {
    "minecraft".to_string()
}

fn default_y_offset() -> i32 {
    -1
}

fn default_preview_scale() -> u32 {
    2
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, MapError> {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .map_err(|e| MapError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            grid_size = config.grid_size,
            detail_limit = config.detail_limit,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, MapError> {
        // An empty document deserializes to unit, not to an all-default map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| MapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), MapError> {
        if !self.grid_size.is_power_of_two() {
            return Err(MapError::Config(format!(
                "grid_size must be a power of two, got {}",
                self.grid_size
            )));
        }
        if self.detail_limit == 0 {
            return Err(MapError::Config("detail_limit must be at least 1".into()));
        }
        if self.preview_scale == 0 {
            return Err(MapError::Config("preview_scale must be at least 1".into()));
        }
        if self.namespace.is_empty() {
            return Err(MapError::Config("namespace must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            detail_limit: default_detail_limit(),
            optimize: default_optimize(),
            namespace: default_namespace(),
            y_offset: default_y_offset(),
            preview_scale: default_preview_scale(),
        }
    }
}
