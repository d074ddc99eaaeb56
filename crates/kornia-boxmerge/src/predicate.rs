use crate::{error::BoxMergeError, rect::Rect};

/// Parameters of the merge predicate.
///
/// The defaults were tuned on images of tomatoes partially hidden by branches
/// and are not expected to generalize to every kind of imagery.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeConfig {
    /// Maximum center distance, relative to the average characteristic size,
    /// for two rectangles to be merged.
    pub threshold: f64,
    /// Size ratio under which the smaller rectangle is considered a separate
    /// object unless it lies close to the larger one.
    pub min_size_ratio: f64,
    /// Distance, relative to the average characteristic size, beyond which a
    /// rectangle below `min_size_ratio` is never merged.
    pub guard_distance_factor: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            min_size_ratio: 0.2,
            guard_distance_factor: 0.8,
        }
    }
}

impl MergeConfig {
    /// Set the merge distance threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the size ratio guard.
    pub fn with_min_size_ratio(mut self, min_size_ratio: f64) -> Self {
        self.min_size_ratio = min_size_ratio;
        self
    }

    /// Set the distance factor of the size ratio guard.
    pub fn with_guard_distance_factor(mut self, guard_distance_factor: f64) -> Self {
        self.guard_distance_factor = guard_distance_factor;
        self
    }

    /// Check that every parameter is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`BoxMergeError::InvalidConfig`] naming the first offending parameter.
    pub fn validate(&self) -> Result<(), BoxMergeError> {
        for (name, value) in [
            ("threshold", self.threshold),
            ("min_size_ratio", self.min_size_ratio),
            ("guard_distance_factor", self.guard_distance_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BoxMergeError::InvalidConfig { name, value });
            }
        }
        Ok(())
    }
}

/// Decide whether two rectangles are fragments of the same object.
///
/// Overlapping rectangles always merge. Otherwise the rectangles merge when
/// their centers are closer than `threshold` times their average
/// characteristic size, unless one is much smaller than the other
/// (`min_size_ratio`) and not close to it (`guard_distance_factor`).
///
/// # Arguments
///
/// * `a` - The first rectangle.
/// * `b` - The second rectangle.
/// * `config` - The merge parameters.
pub fn should_merge(a: &Rect, b: &Rect, config: &MergeConfig) -> bool {
    if a.overlaps(b) {
        return true;
    }

    let distance = a.center_distance(b);

    let size_a = a.characteristic_size();
    let size_b = b.characteristic_size();
    let avg_size = (size_a + size_b) / 2.0;

    let max_size = size_a.max(size_b);
    let size_ratio = if max_size > 0.0 {
        size_a.min(size_b) / max_size
    } else {
        0.0
    };

    if size_ratio < config.min_size_ratio && distance > config.guard_distance_factor * avg_size {
        return false;
    }

    distance < config.threshold * avg_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() -> Result<(), BoxMergeError> {
        let config = MergeConfig::default();
        assert_eq!(config.threshold, 0.6);
        assert_eq!(config.min_size_ratio, 0.2);
        assert_eq!(config.guard_distance_factor, 0.8);
        config.validate()?;
        Ok(())
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = MergeConfig::default().with_threshold(-0.1);
        assert_eq!(
            config.validate(),
            Err(BoxMergeError::InvalidConfig {
                name: "threshold",
                value: -0.1
            })
        );

        let config = MergeConfig::default().with_min_size_ratio(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(BoxMergeError::InvalidConfig {
                name: "min_size_ratio",
                ..
            })
        ));

        let config = MergeConfig::default().with_guard_distance_factor(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlap_always_merges() {
        let a = Rect::new(10, 10, 20, 20);
        let b = Rect::new(25, 25, 20, 20);
        let config = MergeConfig::default().with_threshold(0.0);
        assert!(should_merge(&a, &b, &config));

        // a tiny box overlapping a large one bypasses the size guard
        let large = Rect::new(0, 0, 100, 100);
        let tiny = Rect::new(99, 99, 2, 2);
        assert!(should_merge(&large, &tiny, &MergeConfig::default()));
    }

    #[test]
    fn test_far_apart_similar_size() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(100, 100, 10, 10);
        assert!(!should_merge(&a, &b, &MergeConfig::default()));
    }

    #[test]
    fn test_close_similar_size() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(0, 12, 10, 10);
        // distance 12, avg size 10
        assert!(!should_merge(&a, &b, &MergeConfig::default()));
        assert!(should_merge(&a, &b, &MergeConfig::default().with_threshold(1.3)));

        // touching edges: distance 10, threshold 1.2 * 10 = 12
        let c = Rect::new(10, 0, 10, 10);
        assert!(!should_merge(&a, &c, &MergeConfig::default()));
        assert!(should_merge(
            &a,
            &c,
            &MergeConfig::default().with_threshold(1.2)
        ));
    }

    #[test]
    fn test_size_ratio_guard() {
        let large = Rect::new(0, 0, 100, 100);
        let tiny = Rect::new(500, 500, 5, 5);
        let permissive = MergeConfig::default().with_threshold(100.0);
        // the guard wins over any threshold when the small box is far away
        assert!(!should_merge(&large, &tiny, &permissive));
        assert!(!should_merge(&tiny, &large, &permissive));

        // disabling the guard lets the threshold decide
        let unguarded = permissive.with_min_size_ratio(0.0);
        assert!(should_merge(&large, &tiny, &unguarded));
    }

    #[test]
    fn test_size_ratio_guard_close_fragment() {
        // ratio 0.1, avg size 55, guard distance 44, threshold distance 33
        let large = Rect::new(0, 0, 100, 100);
        let tiny = Rect::new(100, 45, 10, 10);
        // distance 55 -> rejected by the guard
        assert!(!should_merge(&large, &tiny, &MergeConfig::default()));

        // a wider threshold cannot bypass the guard
        let wide = MergeConfig::default().with_threshold(1.5);
        assert!(!should_merge(&large, &tiny, &wide));

        // once within the guard distance the threshold decides again
        let relaxed = wide.with_guard_distance_factor(1.1);
        assert!(should_merge(&large, &tiny, &relaxed));
    }

    #[test]
    fn test_degenerate_rects_do_not_panic() {
        let a = Rect::new(0, 0, 0, 0);
        let b = Rect::new(0, 0, 0, 0);
        // zero sizes: ratio 0, distance 0, 0 < 0 is false
        assert!(!should_merge(&a, &b, &MergeConfig::default()));

        let c = Rect::new(50, 50, 0, 10);
        let d = Rect::new(0, 0, 10, 10);
        assert!(!should_merge(&c, &d, &MergeConfig::default()));
    }

    #[test]
    fn test_symmetric() {
        let rects = [
            Rect::new(0, 0, 10, 10),
            Rect::new(13, 0, 8, 9),
            Rect::new(40, 40, 3, 3),
            Rect::new(5, 11, 20, 4),
        ];
        let config = MergeConfig::default();
        for a in &rects {
            for b in &rects {
                assert_eq!(should_merge(a, b, &config), should_merge(b, a, &config));
            }
        }
    }
}
