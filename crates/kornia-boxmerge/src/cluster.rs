use log::debug;

use crate::{
    error::BoxMergeError,
    predicate::{should_merge, MergeConfig},
    rect::Rect,
};

/// A group of detections judged to be the same physical object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// The minimal rectangle enclosing every member.
    pub bbox: Rect,
    /// Indices of the member detections in absorption order, seed first.
    pub members: Vec<usize>,
}

impl Cluster {
    fn seed(index: usize, rect: Rect) -> Self {
        Self {
            bbox: rect,
            members: vec![index],
        }
    }

    // false when the fused box would not be representable
    fn absorb(&mut self, index: usize, rect: &Rect) -> bool {
        let Some(bbox) = self.bbox.checked_union(rect) else {
            return false;
        };
        self.bbox = bbox;
        self.members.push(index);
        true
    }

    /// The number of detections in the cluster.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members. Never true for clusters returned
    /// by [`cluster_boxes`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition the detections into clusters of fragments of the same object.
///
/// Detections are visited in input order. Each unconsumed detection seeds a
/// cluster whose fused box then absorbs every unconsumed detection for which
/// [`should_merge`] holds against the *current* fused box. Passes over the
/// remaining detections repeat until one absorbs nothing, then the cluster is
/// closed and the next unconsumed detection seeds a new one.
///
/// Because the predicate is evaluated against the growing envelope and not
/// against the seed, the result depends on the input order. A detection whose
/// fusion with the envelope would exceed `u32::MAX` pixels in extent is left
/// for a later cluster.
///
/// # Arguments
///
/// * `detections` - The candidate rectangles in discovery order.
/// * `config` - The merge parameters.
///
/// # Returns
///
/// The clusters in the order they were closed. Every detection index appears
/// in exactly one cluster.
pub fn cluster_boxes(detections: &[Rect], config: &MergeConfig) -> Vec<Cluster> {
    let mut consumed = vec![false; detections.len()];
    let mut clusters = Vec::new();

    for (seed_idx, seed) in detections.iter().enumerate() {
        if consumed[seed_idx] {
            continue;
        }
        consumed[seed_idx] = true;

        let mut cluster = Cluster::seed(seed_idx, *seed);
        grow_cluster(&mut cluster, detections, &mut consumed, config);

        debug!(
            "closed cluster {} with {} members: {:?}",
            clusters.len(),
            cluster.len(),
            cluster.bbox
        );
        clusters.push(cluster);
    }

    debug!(
        "merged {} detections into {} objects",
        detections.len(),
        clusters.len()
    );

    clusters
}

// repeat full passes until one absorbs nothing
fn grow_cluster(
    cluster: &mut Cluster,
    detections: &[Rect],
    consumed: &mut [bool],
    config: &MergeConfig,
) {
    let mut changed = true;
    while changed {
        changed = false;
        for (idx, candidate) in detections.iter().enumerate() {
            if consumed[idx] {
                continue;
            }
            if should_merge(&cluster.bbox, candidate, config) && cluster.absorb(idx, candidate) {
                consumed[idx] = true;
                changed = true;
            }
        }
    }
}

/// Fuse the detections into one rectangle per object.
///
/// Same as [`cluster_boxes`] but only the fused boxes are returned.
pub fn merge_boxes(detections: &[Rect], config: &MergeConfig) -> Vec<Rect> {
    cluster_boxes(detections, config)
        .into_iter()
        .map(|cluster| cluster.bbox)
        .collect()
}

/// A box merger holding a validated configuration.
///
/// # Example
///
/// ```
/// use kornia_boxmerge::{BoxMerger, MergeConfig, Rect};
///
/// let merger = BoxMerger::new(MergeConfig::default()).unwrap();
/// let merged = merger.merge(&[Rect::new(10, 10, 20, 20), Rect::new(25, 25, 20, 20)]);
/// assert_eq!(merged, vec![Rect::new(10, 10, 35, 35)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoxMerger {
    config: MergeConfig,
}

impl BoxMerger {
    /// Create a new box merger.
    ///
    /// # Errors
    ///
    /// Returns [`BoxMergeError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: MergeConfig) -> Result<Self, BoxMergeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns a reference to the merge configuration.
    #[inline]
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Partition the detections into clusters. See [`cluster_boxes`].
    pub fn cluster(&self, detections: &[Rect]) -> Vec<Cluster> {
        cluster_boxes(detections, &self.config)
    }

    /// Fuse the detections into one rectangle per object. See [`merge_boxes`].
    pub fn merge(&self, detections: &[Rect]) -> Vec<Rect> {
        merge_boxes(detections, &self.config)
    }
}
