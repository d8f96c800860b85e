//! Image inputs and their canonical normalized form.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, Rgb32FImage, RgbImage};
use ndarray::{Array2, Array3, ArrayD, ArrayView3, Axis, Ix2, Ix3};

use crate::error::{NutrilensError, Result};

/// An image handed to the pipeline.
///
/// Every variant is resolved into a [`NormalizedImage`] at the extractor
/// boundary; nothing past that point branches on the input kind.
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// An image file on disk (PNG, JPEG or BMP).
    Path(PathBuf),
    /// An already decoded image.
    Decoded(DynamicImage),
    /// Raw pixels shaped `(H, W)`, `(H, W, 1)` or `(H, W, 3)`.
    ///
    /// Values in `[0, 255]` are rescaled when the maximum exceeds 1.
    Array(ArrayD<f32>),
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<DynamicImage> for ImageInput {
    fn from(image: DynamicImage) -> Self {
        Self::Decoded(image)
    }
}

impl From<RgbImage> for ImageInput {
    fn from(image: RgbImage) -> Self {
        Self::Decoded(DynamicImage::ImageRgb8(image))
    }
}

impl From<ArrayD<f32>> for ImageInput {
    fn from(array: ArrayD<f32>) -> Self {
        Self::Array(array)
    }
}

impl From<Array2<f32>> for ImageInput {
    fn from(array: Array2<f32>) -> Self {
        Self::Array(array.into_dyn())
    }
}

impl From<Array3<f32>> for ImageInput {
    fn from(array: Array3<f32>) -> Self {
        Self::Array(array.into_dyn())
    }
}

/// A 3-channel image at the extractor's resolution with values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pixels: Array3<f64>,
}

impl NormalizedImage {
    /// Wrap pixels shaped `(height, width, 3)`, clamping them to `[0, 1]`.
    pub fn from_pixels(mut pixels: Array3<f64>) -> Result<Self> {
        let (h, w, c) = pixels.dim();
        if h == 0 || w == 0 || c != 3 {
            return Err(NutrilensError::InvalidImage(format!(
                "expected (height, width, 3) pixels, got ({h}, {w}, {c})"
            )));
        }
        pixels.mapv_inplace(|v| v.clamp(0.0, 1.0));
        Ok(Self { pixels })
    }

    /// Pixels shaped `(height, width, 3)`.
    pub fn pixels(&self) -> &Array3<f64> {
        &self.pixels
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }
}

/// Resolve any input into a `width` x `height` RGB image in `[0, 1]`.
pub fn normalize(input: &ImageInput, width: u32, height: u32) -> Result<NormalizedImage> {
    match input {
        ImageInput::Path(path) => {
            let decoded = image::open(path).map_err(|e| NutrilensError::ImageDecode {
                path: path.clone(),
                message: e.to_string(),
            })?;
            from_decoded(&decoded, width, height)
        }
        ImageInput::Decoded(decoded) => from_decoded(decoded, width, height),
        ImageInput::Array(array) => from_array(array, width, height),
    }
}

fn from_decoded(decoded: &DynamicImage, width: u32, height: u32) -> Result<NormalizedImage> {
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(NutrilensError::InvalidImage("image has no pixels".to_string()));
    }

    let rgb = decoded.to_rgb8();
    let rgb = if rgb.dimensions() == (width, height) {
        rgb
    } else {
        imageops::resize(&rgb, width, height, FilterType::CatmullRom)
    };

    let pixels = Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
        f64::from(rgb.get_pixel(x as u32, y as u32)[c]) / 255.0
    });
    NormalizedImage::from_pixels(pixels)
}

fn from_array(array: &ArrayD<f32>, width: u32, height: u32) -> Result<NormalizedImage> {
    let view: ArrayView3<f32> = match array.ndim() {
        2 => array
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| NutrilensError::InvalidImage(e.to_string()))?
            .insert_axis(Axis(2)),
        3 => array
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| NutrilensError::InvalidImage(e.to_string()))?,
        n => {
            return Err(NutrilensError::InvalidImage(format!(
                "expected a 2-D or 3-D pixel array, got {n} dimensions"
            )));
        }
    };

    let (h, w, channels) = view.dim();
    if h == 0 || w == 0 {
        return Err(NutrilensError::InvalidImage("pixel array is empty".to_string()));
    }
    if channels != 1 && channels != 3 {
        return Err(NutrilensError::InvalidImage(format!(
            "expected 1 or 3 channels, got {channels}"
        )));
    }
    if view.iter().any(|v| !v.is_finite()) {
        return Err(NutrilensError::InvalidImage(
            "pixel array contains non-finite values".to_string(),
        ));
    }

    let max = view.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let scale = if max > 1.0 { 1.0 / 255.0 } else { 1.0 };
    // Single-channel input is broadcast to all three channels.
    let sample = |y: usize, x: usize, c: usize| -> f32 {
        let c = if channels == 1 { 0 } else { c };
        view[[y, x, c]] * scale
    };

    let pixels = if (w, h) == (width as usize, height as usize) {
        Array3::from_shape_fn((h, w, 3), |(y, x, c)| f64::from(sample(y, x, c)))
    } else {
        let source = Rgb32FImage::from_fn(w as u32, h as u32, |x, y| {
            let (x, y) = (x as usize, y as usize);
            Rgb([sample(y, x, 0), sample(y, x, 1), sample(y, x, 2)])
        });
        let resized = imageops::resize(&source, width, height, FilterType::Triangle);
        Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
            f64::from(resized.get_pixel(x as u32, y as u32)[c])
        })
    };

    NormalizedImage::from_pixels(pixels)
}
