//! Image feature extraction.
//!
//! An image is normalized to a fixed-resolution RGB representation, then
//! described by a gradient-orientation histogram over its luminance followed
//! by per-channel color histograms, means and standard deviations.

mod color;
mod hog;
mod input;

use serde::Deserialize;
use tracing::instrument;

use crate::error::{NutrilensError, Result};

pub use hog::HogParams;
pub use input::{ImageInput, NormalizedImage, normalize};

/// Parameters of the feature extractor.
///
/// Changing any of these changes the descriptor width, so they must match
/// what the loaded classifier was fit on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeatureConfig {
    /// Target width in pixels (default: 128).
    #[serde(default = "default_size")]
    pub width: u32,
    /// Target height in pixels (default: 128).
    #[serde(default = "default_size")]
    pub height: u32,
    /// Orientation bins over [0, 180) degrees (default: 9).
    #[serde(default = "default_orientations")]
    pub orientations: usize,
    /// Cell edge in pixels (default: 16).
    #[serde(default = "default_pixels_per_cell")]
    pub pixels_per_cell: usize,
    /// Block edge in cells (default: 2).
    #[serde(default = "default_cells_per_block")]
    pub cells_per_block: usize,
    /// Histogram bins per color channel (default: 32).
    #[serde(default = "default_color_bins")]
    pub color_bins: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            orientations: default_orientations(),
            pixels_per_cell: default_pixels_per_cell(),
            cells_per_block: default_cells_per_block(),
            color_bins: default_color_bins(),
        }
    }
}

fn default_size() -> u32 {
    128
}

fn default_orientations() -> usize {
    9
}

fn default_pixels_per_cell() -> usize {
    16
}

fn default_cells_per_block() -> usize {
    2
}

fn default_color_bins() -> usize {
    32
}

impl FeatureConfig {
    /// Reject parameter combinations that cannot produce a descriptor.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(NutrilensError::Configuration(msg));
        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.orientations == 0 || self.pixels_per_cell == 0 || self.cells_per_block == 0 {
            return invalid(
                "orientations, pixels_per_cell and cells_per_block must be positive".to_string(),
            );
        }
        if self.color_bins == 0 {
            return invalid("color_bins must be positive".to_string());
        }
        let params = self.hog_params();
        let (cells_row, cells_col) = (
            params.cells(self.height as usize),
            params.cells(self.width as usize),
        );
        if cells_row < self.cells_per_block || cells_col < self.cells_per_block {
            return invalid(format!(
                "a {}x{} image holds {cells_col}x{cells_row} cells of {} pixels, fewer than one block of {} cells",
                self.width, self.height, self.pixels_per_cell, self.cells_per_block
            ));
        }
        Ok(())
    }

    pub fn hog_params(&self) -> HogParams {
        HogParams {
            orientations: self.orientations,
            pixels_per_cell: self.pixels_per_cell,
            cells_per_block: self.cells_per_block,
        }
    }

    /// Width of the gradient descriptor segment.
    pub fn hog_len(&self) -> usize {
        self.hog_params()
            .descriptor_len(self.height as usize, self.width as usize)
    }

    /// Total descriptor width.
    pub fn feature_len(&self) -> usize {
        self.hog_len() + 3 * self.color_bins + 6
    }
}

/// Turns images into fixed-length descriptors.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            config: FeatureConfig::default(),
        }
    }
}

impl FeatureExtractor {
    /// Create an extractor, validating its parameters.
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Width of every descriptor this extractor produces.
    pub fn feature_len(&self) -> usize {
        self.config.feature_len()
    }

    /// Describe an image.
    ///
    /// Unreadable or malformed input yields an input error
    /// ([`NutrilensError::is_input_error`]).
    #[instrument(skip_all)]
    pub fn extract(&self, input: &ImageInput) -> Result<Vec<f32>> {
        let image = normalize(input, self.config.width, self.config.height)?;
        self.extract_normalized(&image)
    }

    /// Describe an already normalized image at this extractor's resolution.
    pub fn extract_normalized(&self, image: &NormalizedImage) -> Result<Vec<f32>> {
        let (width, height) = (self.config.width as usize, self.config.height as usize);
        if image.width() != width || image.height() != height {
            return Err(NutrilensError::InvalidImage(format!(
                "image is {}x{}, extractor expects {width}x{height}",
                image.width(),
                image.height()
            )));
        }

        let pixels = image.pixels();
        let gray = hog::luminance(pixels);

        let mut features = hog::descriptor(&gray, &self.config.hog_params());
        features.extend(color::channel_histograms(pixels, self.config.color_bins));
        features.extend(color::channel_moments(pixels));

        tracing::trace!(len = features.len(), "extracted features");
        Ok(features.into_iter().map(|v| v as f32).collect())
    }
}
