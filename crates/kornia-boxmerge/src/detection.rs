use crate::{error::BoxMergeError, rect::Rect};

/// Image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
}

impl ImageSize {
    /// The number of pixels in the image, saturating at `usize::MAX`.
    #[inline]
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }
}

/// An external contour reduced to its area and bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContourCandidate {
    /// Area enclosed by the contour in pixels.
    pub area: f64,
    /// Axis-aligned bounding rectangle of the contour.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub rect: Rect,
}

/// Discards contours too small to be an object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionFilter {
    /// Minimum contour area as a fraction of the image area.
    pub min_area_ratio: f64,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            min_area_ratio: 0.001,
        }
    }
}

impl DetectionFilter {
    /// Create a new detection filter.
    ///
    /// # Errors
    ///
    /// Returns [`BoxMergeError::InvalidConfig`] if `min_area_ratio` is negative or not finite.
    pub fn new(min_area_ratio: f64) -> Result<Self, BoxMergeError> {
        if !min_area_ratio.is_finite() || min_area_ratio < 0.0 {
            return Err(BoxMergeError::InvalidConfig {
                name: "min_area_ratio",
                value: min_area_ratio,
            });
        }
        Ok(Self { min_area_ratio })
    }

    /// The minimum contour area in pixels for an image of the given size.
    pub fn min_area(&self, image_size: ImageSize) -> f64 {
        image_size.width as f64 * image_size.height as f64 * self.min_area_ratio
    }

    /// Keep the bounding rectangles of the contours that reach the minimum area.
    ///
    /// The discovery order of the contours is preserved. Rectangles with a zero
    /// extent are dropped as well since they cannot bound an object.
    pub fn filter(&self, candidates: &[ContourCandidate], image_size: ImageSize) -> Vec<Rect> {
        let min_area = self.min_area(image_size);
        candidates
            .iter()
            .filter(|candidate| candidate.area >= min_area && !candidate.rect.is_empty())
            .map(|candidate| candidate.rect)
            .collect()
    }
}

/// Number the merged boxes for annotation, starting at one.
///
/// # Example
///
/// ```
/// use kornia_boxmerge::{label_objects, Rect};
///
/// let labels = label_objects(&[Rect::new(0, 0, 5, 5)], "Tomate");
/// assert_eq!(labels[0].0, "Tomate 1");
/// ```
pub fn label_objects(merged: &[Rect], prefix: &str) -> Vec<(String, Rect)> {
    merged
        .iter()
        .enumerate()
        .map(|(i, rect)| (format!("{} {}", prefix, i + 1), *rect))
        .collect()
}
