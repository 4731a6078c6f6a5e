//! Output size selection for generated images.
//!
//! The image model supports three fixed sizes; a requested canvas is mapped
//! to the closest one by aspect ratio.

use serde::Serialize;

/// Aspect ratio above which the wide size is used (exclusive).
pub const WIDE_RATIO_THRESHOLD: f64 = 1.5;

/// Aspect ratio below which the tall size is used (exclusive).
pub const TALL_RATIO_THRESHOLD: f64 = 0.7;

/// Output sizes accepted by the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageSize {
    #[serde(rename = "1792x1024")]
    Wide,
    #[serde(rename = "1024x1792")]
    Tall,
    #[serde(rename = "1024x1024")]
    Square,
}

impl ImageSize {
    /// Wire value sent to the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Wide => "1792x1024",
            ImageSize::Tall => "1024x1792",
            ImageSize::Square => "1024x1024",
        }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a requested canvas by `width / height`.
///
/// The thresholds are strict, so ratios of exactly 1.5 and 0.7 are square.
/// A zero height gives an infinite ratio (wide); `0 / 0` is NaN, matches
/// neither comparison and falls back to square.
pub fn determine_image_size(width: f64, height: f64) -> ImageSize {
    let ratio = width / height;
    if ratio > WIDE_RATIO_THRESHOLD {
        ImageSize::Wide
    } else if ratio < TALL_RATIO_THRESHOLD {
        ImageSize::Tall
    } else {
        ImageSize::Square
    }
}
