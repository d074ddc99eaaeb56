use kornia_boxmerge::{
    label_objects, should_merge, BoxMergeError, BoxMerger, ContourCandidate, DetectionFilter,
    ImageSize, MergeConfig, Rect,
};

#[test]
fn overlapping_boxes_fuse() -> Result<(), BoxMergeError> {
    let merger = BoxMerger::new(MergeConfig::default())?;
    let merged = merger.merge(&[Rect::new(10, 10, 20, 20), Rect::new(25, 25, 20, 20)]);
    assert_eq!(merged, vec![Rect::new(10, 10, 35, 35)]);
    Ok(())
}

#[test]
fn distant_boxes_stay_apart() -> Result<(), BoxMergeError> {
    let merger = BoxMerger::new(MergeConfig::default())?;
    let detections = [Rect::new(0, 0, 10, 10), Rect::new(100, 100, 10, 10)];
    assert_eq!(merger.merge(&detections), detections.to_vec());
    Ok(())
}

#[test]
fn tiny_distant_box_stays_apart() -> Result<(), BoxMergeError> {
    let merger = BoxMerger::new(MergeConfig::default())?;
    let detections = [Rect::new(0, 0, 100, 100), Rect::new(500, 500, 5, 5)];
    assert_eq!(merger.merge(&detections), detections.to_vec());
    Ok(())
}

#[test]
fn colinear_chain_fuses_through_envelope() -> Result<(), BoxMergeError> {
    let config = MergeConfig::default();
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(8, 0, 10, 10);
    let c = Rect::new(16, 0, 10, 10);

    assert!(should_merge(&a, &b, &config));
    assert!(should_merge(&b, &c, &config));
    assert!(!should_merge(&a, &c, &config));

    let merger = BoxMerger::new(config)?;
    for detections in [[a, b, c], [a, c, b], [c, b, a], [b, a, c]] {
        assert_eq!(merger.merge(&detections), vec![Rect::new(0, 0, 26, 10)]);
    }
    Ok(())
}

#[test]
fn split_fruit_behind_branch() -> Result<(), BoxMergeError> {
    // a fruit cut in two by a thin vertical branch plus a second fruit
    let image_size = ImageSize {
        width: 640,
        height: 480,
    };
    let contours = [
        ContourCandidate {
            area: 2000.0,
            rect: Rect::new(100, 100, 24, 96),
        },
        ContourCandidate {
            area: 120.0,
            rect: Rect::new(10, 400, 12, 12),
        },
        ContourCandidate {
            area: 2100.0,
            rect: Rect::new(127, 98, 24, 96),
        },
        ContourCandidate {
            area: 5000.0,
            rect: Rect::new(400, 200, 80, 80),
        },
    ];

    // min area is 307.2, the 120 pixel blob is noise
    let detections = DetectionFilter::default().filter(&contours, image_size);
    assert_eq!(detections.len(), 3);

    let merger = BoxMerger::new(MergeConfig::default())?;
    let merged = merger.merge(&detections);
    assert_eq!(
        merged,
        vec![Rect::new(100, 98, 51, 98), Rect::new(400, 200, 80, 80)]
    );

    let labels = label_objects(&merged, "Tomate");
    assert_eq!(labels[0].0, "Tomate 1");
    assert_eq!(labels[1].0, "Tomate 2");
    Ok(())
}
