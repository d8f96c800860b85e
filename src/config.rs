//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.nutrilens/config.toml` (user)
//! 3. `/etc/nutrilens/config.toml` (system)
//!
//! Every field has a default, so running without any file is valid.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::features::FeatureConfig;
use crate::model::{Device, ModelArtifacts};
use crate::types::GoalKind;
use crate::{NutrilensError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Model artifact locations and the inference device.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Device to use: "cpu", "cuda" or "cuda:<id>" (default: "cpu").
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(flatten)]
    pub artifacts: ModelArtifacts,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            artifacts: ModelArtifacts::default(),
        }
    }
}

fn default_device() -> String {
    "cpu".to_string()
}

/// Defaults applied when a request leaves something out.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Dietary goal (default: "maintenance").
    #[serde(default = "default_goal")]
    pub goal: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            goal: default_goal(),
        }
    }
}

fn default_goal() -> String {
    GoalKind::Maintenance.name().to_string()
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first of
    /// `~/.nutrilens/config.toml` and `/etc/nutrilens/config.toml` that exists
    /// is used, falling back to built-in defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => {
                tracing::debug!(path = ?path, "loading config");
                Self::from_file(&path)
            }
            None => {
                tracing::debug!("no config file found, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NutrilensError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            NutrilensError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(NutrilensError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".nutrilens").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/nutrilens/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Check values that deserialize but cannot be used.
    pub fn validate(&self) -> Result<()> {
        self.features.validate()?;
        self.device()?;
        self.default_goal()?;
        Ok(())
    }

    pub fn device(&self) -> Result<Device> {
        self.models.device.parse()
    }

    /// The configured default goal. Unlike request goals, an unknown name
    /// here is an error.
    pub fn default_goal(&self) -> Result<GoalKind> {
        self.defaults.goal.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.models.device, "cpu");
        assert_eq!(config.models.artifacts.classifier, "food_classifier.onnx");
        assert_eq!(config.features.feature_len(), 1866);
        assert_eq!(config.default_goal().unwrap(), GoalKind::Maintenance);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_minimal_config() {
        let toml = r#"
            [defaults]
            goal = "weight-loss"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default_goal().unwrap(), GoalKind::WeightLoss);
        // Defaults preserved
        assert_eq!(config.features.width, 128);
        assert_eq!(config.device().unwrap(), Device::Cpu);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [models]
            dir = "/var/lib/nutrilens"
            device = "cpu"
            regressor = "calories.onnx"

            [models.tensors]
            classifier_output = "output_probability"

            [features]
            width = 64
            height = 64
            color_bins = 16

            [defaults]
            goal = "muscle_gain"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.models.artifacts.dir, PathBuf::from("/var/lib/nutrilens"));
        assert_eq!(
            config.models.artifacts.regressor_path(),
            PathBuf::from("/var/lib/nutrilens/calories.onnx")
        );
        assert_eq!(
            config.models.artifacts.tensors.classifier_output,
            "output_probability"
        );
        assert_eq!(config.features.feature_len(), 3 * 3 * 36 + 48 + 6);
        assert_eq!(config.default_goal().unwrap(), GoalKind::MuscleGain);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_values_fail_validation() {
        let config: Config = toml::from_str("[models]\ndevice = \"tpu\"").unwrap();
        assert!(config.validate().is_err());

        let config: Config = toml::from_str("[defaults]\ngoal = \"bulk\"").unwrap();
        assert!(config.validate().is_err());

        let config: Config = toml::from_str("[features]\npixels_per_cell = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/nutrilens.toml"))).unwrap_err();
        assert!(matches!(err, NutrilensError::Configuration(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[features]\norientations = 12\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.features.orientations, 12);

        fs::write(&path, "[features\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
