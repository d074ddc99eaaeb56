use argh::FromArgs;
use std::path::PathBuf;

use kornia_boxmerge::{BoxMerger, DetectionFilter, MergeConfig};
use tomato_count::{count_objects, read_scene};

#[derive(FromArgs)]
/// Merge fragmented fruit contours into one bounding box per fruit
struct Args {
    /// path to a json file with the image size and the extracted contours
    #[argh(option, short = 'i')]
    input_path: PathBuf,

    /// path to write the json report to, stdout if not set
    #[argh(option, short = 'o')]
    output_path: Option<PathBuf>,

    /// center distance threshold relative to the average box size
    #[argh(option, default = "0.6")]
    threshold: f64,

    /// size ratio under which a far away small box is kept apart
    #[argh(option, default = "0.2")]
    min_size_ratio: f64,

    /// distance factor of the size ratio guard
    #[argh(option, default = "0.8")]
    guard_distance_factor: f64,

    /// minimum contour area as a fraction of the image area
    #[argh(option, default = "0.001")]
    min_area_ratio: f64,

    /// prefix of the object labels
    #[argh(option, default = "String::from(\"Tomate\")")]
    label: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = MergeConfig::default()
        .with_threshold(args.threshold)
        .with_min_size_ratio(args.min_size_ratio)
        .with_guard_distance_factor(args.guard_distance_factor);
    let merger = BoxMerger::new(config)?;
    let filter = DetectionFilter::new(args.min_area_ratio)?;

    // read the contours
    let scene = read_scene(&args.input_path)?;
    log::info!(
        "read {} contours from {}",
        scene.contours.len(),
        args.input_path.display()
    );

    let report = count_objects(&scene, &filter, &merger, &args.label);
    log::info!(
        "counted {} objects from {} detections",
        report.objects.len(),
        report.num_detections
    );

    let json = serde_json::to_string_pretty(&report)?;
    match args.output_path {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
