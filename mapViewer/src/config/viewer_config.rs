use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::constants::*;
use crate::models::poi::Coordinate;
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// What happens to the selected POI when the ranking is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// The nearest POI becomes selected on every recompute.
    FollowNearest,
    /// A marker-clicked selection survives recomputes.
    KeepManual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: LINE_COLOR.to_string(),
            weight: LINE_WEIGHT,
            opacity: LINE_OPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub default_center: Coordinate,
    pub default_zoom: u8,
    pub line_count: usize,
    pub line_count_options: Vec<usize>,
    pub selection_policy: SelectionPolicy,
    pub tile_url: String,
    pub attribution: String,
    pub line_style: LineStyle,
    pub catalog_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinate::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON),
            default_zoom: DEFAULT_ZOOM,
            line_count: DEFAULT_LINE_COUNT,
            line_count_options: LINE_COUNT_OPTIONS.to_vec(),
            selection_policy: SelectionPolicy::FollowNearest,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            line_style: LineStyle::default(),
            catalog_path: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    InvalidValue(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonError(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::JsonError(e) => write!(f, "JSON error: {}", e),
            ConfigError::InvalidValue(s) => write!(f, "Invalid config value: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ViewerConfig {
    /// Reads a JSON config; omitted fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let _timing = logging::start_timing("load_config",
            OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

        let file = File::open(path)?;
        let config: ViewerConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_count == 0 {
            return Err(ConfigError::InvalidValue("line_count must be at least 1".to_string()));
        }
        if self.line_count_options.iter().any(|&n| n == 0) {
            return Err(ConfigError::InvalidValue("line_count_options must all be at least 1".to_string()));
        }
        if !self.line_count_options.is_empty() && !self.line_count_options.contains(&self.line_count) {
            warn!(line_count = self.line_count, options = ?self.line_count_options,
                "Default line count is not one of the filter options");
        }
        if !self.default_center.is_in_range() {
            return Err(ConfigError::InvalidValue(format!(
                "default_center ({}, {}) is outside the valid lat/lon range",
                self.default_center.lat, self.default_center.lon
            )));
        }
        if !(0.0..=1.0).contains(&self.line_style.opacity) {
            return Err(ConfigError::InvalidValue("line_style.opacity must be within [0, 1]".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_viewer() {
        let config = ViewerConfig::default();
        assert_eq!(config.default_center, Coordinate::new(51.5074, -0.1278));
        assert_eq!(config.default_zoom, 13);
        assert_eq!(config.line_count, 10);
        assert_eq!(config.line_count_options, vec![1, 5, 10, 15]);
        assert_eq!(config.selection_policy, SelectionPolicy::FollowNearest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"line_count": 5, "selection_policy": "keep_manual"}}"#).unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.line_count, 5);
        assert_eq!(config.selection_policy, SelectionPolicy::KeepManual);
        assert_eq!(config.default_zoom, 13);
        assert_eq!(config.line_style, LineStyle::default());
    }

    #[test]
    fn zero_line_count_is_rejected() {
        let config = ViewerConfig { line_count: 0, ..ViewerConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn bad_center_is_rejected() {
        let config = ViewerConfig {
            default_center: Coordinate::new(120.0, 0.0),
            ..ViewerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
