#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the box merging module.
pub mod error;

/// axis-aligned rectangle geometry.
pub mod rect;

/// pairwise merge decision between two rectangles.
pub mod predicate;

/// greedy agglomerative clustering of detections.
pub mod cluster;

/// contour to detection filtering and labeling utilities.
pub mod detection;

pub use crate::cluster::{cluster_boxes, merge_boxes, BoxMerger, Cluster};
pub use crate::detection::{label_objects, ContourCandidate, DetectionFilter, ImageSize};
pub use crate::error::BoxMergeError;
pub use crate::predicate::{should_merge, MergeConfig};
pub use crate::rect::{fuse_all, Rect};
