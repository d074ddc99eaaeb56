use std::path::Path;

use kornia_boxmerge::{label_objects, BoxMerger, ContourCandidate, DetectionFilter, ImageSize, Rect};
use serde::{Deserialize, Serialize};

/// Contours extracted from one image.
#[derive(Debug, Deserialize)]
pub struct Scene {
    /// size of the source image.
    pub image_size: ImageSize,
    /// external contours in discovery order.
    pub contours: Vec<ContourCandidate>,
}

/// One counted object.
#[derive(Debug, Serialize, PartialEq)]
pub struct CountedObject {
    /// annotation label, e.g. "Tomate 1".
    pub label: String,
    /// fused bounding box.
    #[serde(flatten)]
    pub rect: Rect,
}

/// Result of counting the objects of a scene.
#[derive(Debug, Serialize)]
pub struct Report {
    /// contours received.
    pub num_contours: usize,
    /// contours surviving the area filter.
    pub num_detections: usize,
    /// objects after merging.
    pub objects: Vec<CountedObject>,
}

/// Read a scene from a json file.
pub fn read_scene(path: impl AsRef<Path>) -> Result<Scene, Box<dyn std::error::Error>> {
    let file = std::fs::File::open(path)?;
    let scene = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(scene)
}

/// Filter the contours, merge the fragments and label the objects.
pub fn count_objects(
    scene: &Scene,
    filter: &DetectionFilter,
    merger: &BoxMerger,
    label: &str,
) -> Report {
    let detections = filter.filter(&scene.contours, scene.image_size);
    log::debug!(
        "min area {:.1} px, kept {}/{} contours",
        filter.min_area(scene.image_size),
        detections.len(),
        scene.contours.len()
    );

    let merged = merger.merge(&detections);

    Report {
        num_contours: scene.contours.len(),
        num_detections: detections.len(),
        objects: label_objects(&merged, label)
            .into_iter()
            .map(|(label, rect)| CountedObject { label, rect })
            .collect(),
    }
}
