//! Locations of the persisted model artifacts.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding the models directory.
pub const MODELS_DIR_ENV: &str = "NUTRILENS_MODELS_DIR";

/// Where the four artifacts live and what their files are called.
///
/// Each stage is optional: a missing file means the stage is not available,
/// not that loading failed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelArtifacts {
    /// Directory holding the artifacts.
    #[serde(default = "default_models_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_classifier")]
    pub classifier: String,
    #[serde(default = "default_label_encoder")]
    pub label_encoder: String,
    #[serde(default = "default_regressor")]
    pub regressor: String,
    #[serde(default = "default_food_encoder")]
    pub food_encoder: String,
    #[serde(default)]
    pub tensors: TensorNames,
}

impl Default for ModelArtifacts {
    fn default() -> Self {
        Self::in_dir(default_models_dir())
    }
}

/// `$NUTRILENS_MODELS_DIR`, else `<data_dir>/nutrilens/models`, else `./models`.
pub fn default_models_dir() -> PathBuf {
    std::env::var(MODELS_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_dir()
                .map(|d| d.join("nutrilens").join("models"))
                .unwrap_or_else(|| PathBuf::from("models"))
        })
}

fn default_classifier() -> String {
    "food_classifier.onnx".to_string()
}

fn default_label_encoder() -> String {
    "label_encoder.json".to_string()
}

fn default_regressor() -> String {
    "calorie_regressor.onnx".to_string()
}

fn default_food_encoder() -> String {
    "food_encoder.json".to_string()
}

impl ModelArtifacts {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            classifier: default_classifier(),
            label_encoder: default_label_encoder(),
            regressor: default_regressor(),
            food_encoder: default_food_encoder(),
            tensors: TensorNames::default(),
        }
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(&self.classifier)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.dir.join(&self.label_encoder)
    }

    pub fn regressor_path(&self) -> PathBuf {
        self.dir.join(&self.regressor)
    }

    pub fn food_encoder_path(&self) -> PathBuf {
        self.dir.join(&self.food_encoder)
    }

    /// Both classifier files exist.
    pub fn has_classifier(&self) -> bool {
        exists(&self.classifier_path()) && exists(&self.label_encoder_path())
    }

    /// Both regressor files exist.
    pub fn has_regressor(&self) -> bool {
        exists(&self.regressor_path()) && exists(&self.food_encoder_path())
    }
}

fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Input and output tensor names of the exported graphs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TensorNames {
    #[serde(default = "default_input")]
    pub classifier_input: String,
    #[serde(default = "default_probabilities")]
    pub classifier_output: String,
    #[serde(default = "default_input")]
    pub regressor_input: String,
    #[serde(default = "default_variable")]
    pub regressor_output: String,
}

impl Default for TensorNames {
    fn default() -> Self {
        Self {
            classifier_input: default_input(),
            classifier_output: default_probabilities(),
            regressor_input: default_input(),
            regressor_output: default_variable(),
        }
    }
}

fn default_input() -> String {
    "float_input".to_string()
}

fn default_probabilities() -> String {
    "probabilities".to_string()
}

fn default_variable() -> String {
    "variable".to_string()
}
