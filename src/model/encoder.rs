//! Label encoders persisted next to the models.
//!
//! An encoder maps class names to the dense integer ids a model was fit on.
//! On disk it is JSON: `{"classes": ["apple", "banana", ...]}`, optionally
//! with `"n_features"` recording the input width of the classifier.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NutrilensError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    n_features: Option<usize>,
}

impl LabelEncoder {
    /// Build an encoder over distinct, non-empty class names.
    pub fn new<I, S>(classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let encoder = Self {
            classes: classes.into_iter().map(Into::into).collect(),
            n_features: None,
        };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Record the feature width the paired classifier expects.
    pub fn with_n_features(mut self, n_features: usize) -> Self {
        self.n_features = Some(n_features);
        self
    }

    /// Read an encoder from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NutrilensError::Configuration(format!("Failed to read encoder {path:?}: {e}"))
        })?;
        let encoder: Self = serde_json::from_str(&content).map_err(|e| {
            NutrilensError::Configuration(format!("Failed to parse encoder {path:?}: {e}"))
        })?;
        encoder.validate()?;
        Ok(encoder)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(NutrilensError::Configuration(
                "label encoder has no classes".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.classes.len());
        for class in &self.classes {
            if class.is_empty() {
                return Err(NutrilensError::Configuration(
                    "label encoder contains an empty class name".to_string(),
                ));
            }
            if !seen.insert(class.as_str()) {
                return Err(NutrilensError::Configuration(format!(
                    "label encoder lists {class:?} twice"
                )));
            }
        }
        Ok(())
    }

    /// Integer id of a class, or `None` if the encoder never saw it.
    pub fn transform(&self, class: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == class)
    }

    /// Class name of an id.
    pub fn inverse_transform(&self, id: usize) -> Option<&str> {
        self.classes.get(id).map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_round_trip() {
        let enc = LabelEncoder::new(["apple", "pizza", "steak"]).unwrap();
        assert_eq!(enc.transform("pizza"), Some(1));
        assert_eq!(enc.inverse_transform(2), Some("steak"));
        assert_eq!(enc.transform("tofu"), None);
        assert_eq!(enc.inverse_transform(3), None);
        assert_eq!(enc.len(), 3);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(LabelEncoder::new(["a", "a"]).is_err());
        assert!(LabelEncoder::new(Vec::<String>::new()).is_err());
        assert!(LabelEncoder::new([""]).is_err());
    }

    #[test]
    fn parse_with_width() {
        let enc: LabelEncoder =
            serde_json::from_str(r#"{"classes": ["apple", "banana"], "n_features": 1866}"#)
                .unwrap();
        assert_eq!(enc.n_features(), Some(1866));
        assert_eq!(enc.classes(), ["apple", "banana"]);
    }

    #[test]
    fn from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_encoder.json");
        std::fs::write(&path, r#"{"classes": []}"#).unwrap();
        let err = LabelEncoder::from_file(&path).unwrap_err();
        assert!(matches!(err, NutrilensError::Configuration(_)));

        std::fs::write(&path, r#"{"classes": ["rice"]}"#).unwrap();
        let enc = LabelEncoder::from_file(&path).unwrap();
        assert_eq!(enc.n_features(), None);
    }
}
