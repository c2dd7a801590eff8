use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::contour::{Quantizer, RoundingPolicy};

/// Fixed tuning constants of the contour pipeline
pub mod defaults {
    /// Topology-preserving simplify tolerance applied to merged lines
    pub const MERGE_TOLERANCE: f64 = 0.1;
    /// Douglas-Peucker tolerance applied between the smoothing passes
    pub const SMOOTH_TOLERANCE: f64 = crate::geometry::smooth::SMOOTH_TOLERANCE;
    /// Lines with fewer coordinates than this are not smoothed
    pub const MIN_SMOOTH_LEN: usize = 4;
    /// Decimal places kept by coordinate quantization
    pub const PRECISION: u32 = 3;
    /// Web-Mercator style polar cutoff
    pub const MIN_LATITUDE: f64 = -85.0;
    pub const MAX_LATITUDE: f64 = 85.0;
}

/// What happens to merged lines too short to smooth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShortLinePolicy {
    /// Emit them unsmoothed
    #[default]
    Keep,
    /// Leave them out of the output
    Drop,
}

fn default_merge_tolerance() -> f64 {
    defaults::MERGE_TOLERANCE
}
fn default_smooth_tolerance() -> f64 {
    defaults::SMOOTH_TOLERANCE
}
fn default_min_smooth_len() -> usize {
    defaults::MIN_SMOOTH_LEN
}
fn default_precision() -> u32 {
    defaults::PRECISION
}
fn default_min_latitude() -> f64 {
    defaults::MIN_LATITUDE
}
fn default_max_latitude() -> f64 {
    defaults::MAX_LATITUDE
}

/// Tuning for contour extraction and post-processing
#[derive(Debug, Clone, Deserialize)]
pub struct ContourConfig {
    #[serde(default = "default_merge_tolerance")]
    pub merge_tolerance: f64,
    #[serde(default = "default_smooth_tolerance")]
    pub smooth_tolerance: f64,
    #[serde(default = "default_min_smooth_len")]
    pub min_smooth_len: usize,
    #[serde(default)]
    pub short_lines: ShortLinePolicy,
    #[serde(default)]
    pub rounding: RoundingPolicy,
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// Tag every output feature with its threshold
    #[serde(default)]
    pub threshold_property: bool,
    #[serde(default = "default_min_latitude")]
    pub min_latitude: f64,
    #[serde(default = "default_max_latitude")]
    pub max_latitude: f64,
    /// Worker threads; rayon's global pool when unset
    #[serde(default)]
    pub threads: Option<usize>,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            merge_tolerance: defaults::MERGE_TOLERANCE,
            smooth_tolerance: defaults::SMOOTH_TOLERANCE,
            min_smooth_len: defaults::MIN_SMOOTH_LEN,
            short_lines: ShortLinePolicy::default(),
            rounding: RoundingPolicy::default(),
            precision: defaults::PRECISION,
            threshold_property: false,
            min_latitude: defaults::MIN_LATITUDE,
            max_latitude: defaults::MAX_LATITUDE,
            threads: None,
        }
    }
}

impl ContourConfig {
    pub fn quantizer(&self) -> Quantizer {
        Quantizer::new(self.rounding, self.precision)
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_short_lines(mut self, policy: ShortLinePolicy) -> Self {
        self.short_lines = policy;
        self
    }

    pub fn with_threshold_property(mut self, enabled: bool) -> Self {
        self.threshold_property = enabled;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}

/// Settings read from `isolines.toml`
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub thresholds: Option<Vec<f64>>,
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub contour: Option<ContourConfig>,
}

impl FileConfig {
    /// Load the first config file found in the usual locations
    pub fn load() -> Option<Self> {
        get_config_paths().iter().find_map(|path| Self::load_from(path))
    }

    /// Load one config file, warning and skipping it when it does not parse
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("failed to parse config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Parse a config file from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("isolines.toml"));
    paths.push(PathBuf::from(".isolines.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("isolines").join("config.toml"));
        paths.push(config_dir.join("isolines.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".isolines.toml"));
        paths.push(home.join(".config").join("isolines").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_contour_defaults() {
        let config = ContourConfig::default();
        assert_eq!(config.merge_tolerance, 0.1);
        assert_eq!(config.smooth_tolerance, 0.3);
        assert_eq!(config.min_smooth_len, 4);
        assert_eq!(config.rounding, RoundingPolicy::Ceil);
        assert_eq!(config.short_lines, ShortLinePolicy::Keep);
        assert!(!config.threshold_property);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert!(config.input.is_none());
        assert!(config.contour.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_parse_contour_table() {
        let config = FileConfig::from_toml(
            r#"
            thresholds = [100.0, 200.0]

            [contour]
            rounding = "nearest"
            short_lines = "drop"
            smooth_tolerance = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.thresholds, Some(vec![100.0, 200.0]));
        let contour = config.contour.unwrap();
        assert_eq!(contour.rounding, RoundingPolicy::Nearest);
        assert_eq!(contour.short_lines, ShortLinePolicy::Drop);
        assert_eq!(contour.smooth_tolerance, 0.5);
        assert_eq!(contour.merge_tolerance, 0.1);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("isolines.toml");
        fs::write(
            &path,
            "input = \"heights.geojson\"\ninterval = 50.0\n\n[contour]\nthreads = 2\n",
        )
        .unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.input, Some(PathBuf::from("heights.geojson")));
        assert_eq!(config.interval, Some(50.0));
        assert_eq!(config.contour.unwrap().threads, Some(2));
    }

    #[test]
    fn test_load_from_skips_bad_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "interval = [not toml").unwrap();

        assert!(FileConfig::load_from(&path).is_none());
        assert!(FileConfig::load_from(&dir.path().join("missing.toml")).is_none());
    }

    #[test]
    fn test_config_paths_prefer_working_dir() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("isolines.toml"));
    }
}
