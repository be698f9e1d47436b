//! Configuration module.
//!
//! Handles loading, validating, and merging `sprite-cutter.toml`. Stock
//! defaults (threshold, padding, the stock UI region table) are overridden by
//! whatever the user file sets; everything else keeps its default.
//!
//! ## Config File Location
//!
//! `sprite-cutter.toml` in the working directory is picked up automatically.
//! Pass `--config <file>` to use another file.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [extract]
//! threshold = 10      # alpha must be > threshold to count as content (0-255)
//! padding = 20        # pixels added around each region before trimming
//! atlas = true        # also write atlas.json for the source sheet
//!
//! [processing]
//! max_workers = 4     # Max parallel workers (omit for auto = CPU cores)
//!
//! [[regions]]         # replaces the whole stock table when present
//! name = "icon_heart"
//! box = [0.37, 0.05, 0.04, 0.12]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Tables merge
//! key by key, arrays replace, so a file with a `[[regions]]` entry replaces
//! the stock region table rather than appending to it.
//!
//! Unknown keys are rejected to catch typos early.

use crate::regions::{Region, stock_ui_regions, validate_regions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in a directory by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "sprite-cutter.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `sprite-cutter.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CutterConfig {
    /// Cropping settings.
    pub extract: ExtractSettings,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
    /// Named regions to cut out of the sheet.
    pub regions: Vec<Region>,
}

impl Default for CutterConfig {
    fn default() -> Self {
        Self {
            extract: ExtractSettings::default(),
            processing: ProcessingConfig::default(),
            regions: stock_ui_regions(),
        }
    }
}

impl CutterConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::Validation("regions must not be empty".into()));
        }
        if self.processing.max_workers == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_workers must be at least 1".into(),
            ));
        }
        validate_regions(&self.regions).map_err(ConfigError::Validation)
    }
}

/// Cropping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractSettings {
    /// Alpha cutoff (0-255). Pixels with alpha above it are content.
    pub threshold: u8,
    /// Margin in pixels added around each region before trimming.
    pub padding: u32,
    /// Write `atlas.json` next to the sprites.
    pub atlas: bool,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            threshold: 10,
            padding: crate::imaging::DEFAULT_PADDING,
            atlas: true,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel extraction workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CutterConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (including arrays) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CutterConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CutterConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<CutterConfig, ConfigError> {
    let overlay = load_raw_config_file(path)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Load config from `sprite-cutter.toml` in the given directory.
///
/// Falls back to stock defaults when the file does not exist.
pub fn load_config(dir: &Path) -> Result<CutterConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let overlay = if config_path.exists() {
        Some(load_raw_config_file(&config_path)?)
    } else {
        None
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `sprite-cutter.toml`.
///
/// Used by the `gen-config` CLI command. The region table is rendered from
/// [`stock_ui_regions`] so the two never drift apart.
pub fn stock_config_toml() -> String {
    let mut out = String::from(
        r##"# sprite-cutter configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Cropping
# ---------------------------------------------------------------------------
[extract]
# Alpha cutoff on the 0-255 scale. A pixel is content when alpha > threshold.
threshold = 10

# Pixels added on every side of a region before trimming, so anti-aliased
# edges that spill past a hand-measured box are not clipped.
padding = 20

# Write atlas.json (Phaser JSON-hash format) for the source sheet.
atlas = true

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel extraction workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4

# ---------------------------------------------------------------------------
# Regions
# ---------------------------------------------------------------------------
# Each region becomes <name>.png. `box` is [x, y, width, height].
# With the default unit = "fraction" the values are fractions of the sheet
# width/height; set unit = "px" for absolute pixels.
# Defining any [[regions]] replaces this whole table.
"##,
    );

    for region in stock_ui_regions() {
        let [x, y, w, h] = region.bounds;
        out.push_str(&format!(
            "\n[[regions]]\nname = \"{}\"\nbox = [{x:?}, {y:?}, {w:?}, {h:?}]\n",
            region.name
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::Unit;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CutterConfig::default();
        assert_eq!(config.extract.threshold, 10);
        assert_eq!(config.extract.padding, 20);
        assert!(config.extract.atlas);
        assert_eq!(config.processing.max_workers, None);
        assert_eq!(config.regions.len(), 26);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[extract]
padding = 4
"#;
        let config: CutterConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.extract.padding, 4);
        // Defaults preserved
        assert_eq!(config.extract.threshold, 10);
        assert_eq!(config.regions, stock_ui_regions());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, CutterConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
[extract]
threshold = 0
atlas = false
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.extract.threshold, 0);
        assert!(!config.extract.atlas);
        assert_eq!(config.extract.padding, 20);
    }

    #[test]
    fn regions_in_file_replace_stock_table() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(
            &path,
            r#"
[[regions]]
name = "logo"
unit = "px"
box = [10, 10, 200, 80]

[[regions]]
name = "play_button"
box = [0.5, 0.5, 0.1, 0.1]
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.regions[0].name, "logo");
        assert_eq!(config.regions[0].unit, Unit::Px);
        assert_eq!(config.regions[1].unit, Unit::Fraction);
    }

    #[test]
    fn load_config_file_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config_file(&tmp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn threshold_out_of_range_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[extract]\nthreshold = 300\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        CutterConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_empty_regions() {
        let config = CutterConfig {
            regions: vec![],
            ..CutterConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zero_workers() {
        let config = CutterConfig {
            processing: ProcessingConfig {
                max_workers: Some(0),
            },
            ..CutterConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_duplicate_region_via_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
[[regions]]
name = "a"
box = [0.1, 0.1, 0.1, 0.1]

[[regions]]
name = "a"
box = [0.2, 0.2, 0.1, 0.1]
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = "[extract]\npadingg = 5\n";
        let result: Result<CutterConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let toml = "[thumbnails]\nsize = 5\n";
        let result: Result<CutterConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig { max_workers: None };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_workers: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_workers: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("padding = 20").unwrap();
        let overlay: toml::Value = toml::from_str("padding = 5").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("padding").unwrap().as_integer(), Some(5));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str("[extract]\nthreshold = 10\npadding = 20").unwrap();
        let overlay: toml::Value = toml::from_str("[extract]\npadding = 0").unwrap();
        let merged = merge_toml(base, overlay);
        let extract = merged.get("extract").unwrap();
        assert_eq!(extract.get("threshold").unwrap().as_integer(), Some(10));
        assert_eq!(extract.get("padding").unwrap().as_integer(), Some(0));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value = toml::from_str("list = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("list = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("list").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: CutterConfig = toml::from_str(&content).expect("stock config must parse");
        assert_eq!(config, CutterConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[extract]"));
        assert!(content.contains("[processing]"));
        assert!(content.contains("[[regions]]"));
        assert!(content.contains("name = \"decoration_grass_right\""));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("extract").is_some());
        assert!(val.get("processing").is_some());
        assert_eq!(val.get("regions").unwrap().as_array().unwrap().len(), 26);
    }
}
