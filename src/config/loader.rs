//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and a disbursement curve from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::DisbursementCurve;

use super::types::{CurveConfig, EngineSettings};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── settings.yaml   # Minimum target, selectable days, display units
/// └── curve.yaml      # Disbursement curve periods and percentages
/// ```
///
/// # Example
///
/// ```no_run
/// use disbursement_projection::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded curve: {}", loader.curve_name());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    curve_name: String,
    curve: DisbursementCurve,
    settings: EngineSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The curve or the settings fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load settings.yaml
        let settings_path = path.join("settings.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&settings_path)?;
        settings.validate()?;

        // Load curve.yaml
        let curve_path = path.join("curve.yaml");
        let curve_config = Self::load_yaml::<CurveConfig>(&curve_path)?;
        let curve_name = curve_config.name.clone();
        let curve = curve_config.into_curve()?;
        warn_if_curve_total_drifts(&curve_name, &curve);

        info!(
            path = %path.display(),
            curve = %curve_name,
            periods = curve.periods().len(),
            "Loaded projection configuration"
        );

        Ok(Self {
            curve_name,
            curve,
            settings,
        })
    }

    /// Loads a single curve file, for substituting an alternate curve.
    pub fn load_curve<P: AsRef<Path>>(path: P) -> EngineResult<DisbursementCurve> {
        let curve_config = Self::load_yaml::<CurveConfig>(path.as_ref())?;
        let curve_name = curve_config.name.clone();
        let curve = curve_config.into_curve()?;
        warn_if_curve_total_drifts(&curve_name, &curve);
        Ok(curve)
    }

    /// Creates a loader backed by the built-in curve and default settings.
    pub fn standard() -> Self {
        Self {
            curve_name: "standard".to_string(),
            curve: DisbursementCurve::standard().clone(),
            settings: EngineSettings::default(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the name the curve was given in its file.
    pub fn curve_name(&self) -> &str {
        &self.curve_name
    }

    /// Returns the loaded curve.
    pub fn curve(&self) -> &DisbursementCurve {
        &self.curve
    }

    /// Returns the loaded engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::standard()
    }
}

fn warn_if_curve_total_drifts(name: &str, curve: &DisbursementCurve) {
    let total = curve.total_percent();
    if (total - Decimal::ONE_HUNDRED).abs() > Decimal::ONE {
        warn!(curve = %name, total = %total, "Curve percentages do not sum to 100");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Writes the given files into a fresh directory under the system temp dir.
    fn temp_config_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "disbursement-projection-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            fs::write(dir.join(file), content).unwrap();
        }
        dir
    }

    const VALID_SETTINGS: &str = "min_target_amount: \"0.1\"\nallowed_days: [0, 15, 31]\n";

    const VALID_CURVE: &str = r#"
name: halves
periods:
  - start_day: 1
    end_day: 15
    percent: "40"
  - start_day: 16
    end_day: 31
    percent: "60"
"#;

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.curve_name(), "standard");
        assert_eq!(loader.curve(), DisbursementCurve::standard());
    }

    #[test]
    fn test_default_settings_file_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.settings(), &EngineSettings::default());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_curve_returns_error() {
        let dir = temp_config_dir("missing-curve", &[("settings.yaml", VALID_SETTINGS)]);

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("curve.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_custom_directory() {
        let dir = temp_config_dir(
            "custom",
            &[("settings.yaml", VALID_SETTINGS), ("curve.yaml", VALID_CURVE)],
        );

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.curve_name(), "halves");
        assert_eq!(loader.curve().periods().len(), 2);
        assert_eq!(loader.curve().total_percent(), dec("100"));
        assert_eq!(loader.settings().allowed_days, vec![0, 15, 31]);
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = temp_config_dir(
            "malformed",
            &[
                ("settings.yaml", VALID_SETTINGS),
                ("curve.yaml", "name: [unclosed\nperiods: 3"),
            ],
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("curve.yaml"));
            }
            other => panic!("Expected ConfigParseError error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_curve_returns_invalid_curve() {
        let curve = r#"
name: short
periods:
  - start_day: 1
    end_day: 30
    percent: "100"
"#;
        let dir = temp_config_dir(
            "short-curve",
            &[("settings.yaml", VALID_SETTINGS), ("curve.yaml", curve)],
        );

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidCurve { .. })
        ));
    }

    #[test]
    fn test_invalid_settings_returns_invalid_settings() {
        let dir = temp_config_dir(
            "bad-settings",
            &[
                ("settings.yaml", "min_target_amount: \"-1\"\n"),
                ("curve.yaml", VALID_CURVE),
            ],
        );

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn test_load_curve_file() {
        let curve = ConfigLoader::load_curve("./config/default/curve.yaml").unwrap();
        assert_eq!(&curve, DisbursementCurve::standard());
    }

    #[test]
    fn test_standard_loader() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.curve_name(), "standard");
        assert_eq!(loader.curve(), DisbursementCurve::standard());
        assert_eq!(loader.settings(), &EngineSettings::default());
    }
}
