use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;
use tracing::info;

use shapelab::detection::preprocessing::{flatten_on_white, INK_THRESHOLD, SAMPLE_STRIDE};
use shapelab::{logger, render_reference, Classification, OutlineOrder, ReferenceShape, ShapeClassifier};

/// Canvas used when rendering reference shapes
const CANVAS_WIDTH: u32 = 400;
const CANVAS_HEIGHT: u32 = 300;
const REFERENCE_SIZE: f32 = 60.0;

#[derive(Parser)]
#[command(name = "shapelab")]
#[command(about = "Recognise hand-drawn shapes in images")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE", required_unless_present = "reference")]
    image_path: Option<PathBuf>,

    /// Report a pre-selected reference shape instead of analysing an image
    #[arg(long, value_enum, conflicts_with = "image_path")]
    reference: Option<ReferenceShape>,

    /// Render the reference shape to an image file
    #[arg(long, value_name = "FILE", requires = "reference")]
    render: Option<PathBuf>,

    /// Sample every N-th pixel in both directions
    #[arg(long, default_value_t = SAMPLE_STRIDE)]
    stride: u32,

    /// Mean RGB value below which a sample counts as ink
    #[arg(long, default_value_t = INK_THRESHOLD)]
    threshold: f64,

    /// Order in which outline points are walked for corner detection
    #[arg(long, value_enum, default_value_t = OutlineOrder::Scan)]
    outline_order: OutlineOrder,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Save debug outputs to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logger::init(args.verbose);

    if let Some(shape) = args.reference {
        if let Some(path) = &args.render {
            render_reference(shape, CANVAS_WIDTH, CANVAS_HEIGHT, REFERENCE_SIZE)
                .save(path)
                .map_err(|e| anyhow::anyhow!("Failed to save rendered shape: {}", e))?;
            info!("Rendered {} to {}", shape.name(), path.display());
        }
        return print_result(&shape.classification(), args.json);
    }

    let image_path = args
        .image_path
        .ok_or_else(|| anyhow::anyhow!("No input image given"))?;
    info!("Loading image: {}", image_path.display());

    let img = ImageReader::open(&image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    info!("Image loaded: {}x{}", img.width(), img.height());

    let mut classifier = ShapeClassifier::new()
        .with_stride(args.stride)
        .with_ink_threshold(args.threshold)
        .with_outline_order(args.outline_order);

    if let Some(debug_dir) = args.debug_out {
        classifier = classifier.with_debug(debug_dir)?;
    }

    let result = classifier.run(&flatten_on_white(&img))?;
    print_result(&result, args.json)
}

fn print_result(result: &Classification, json: bool) -> anyhow::Result<()> {
    if json {
        let output = serde_json::json!({
            "name": result.shape.name(),
            "classification": result,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let d = &result.descriptor;
    println!("\n=== Shape Recognition Result ===");
    println!("Shape: {} (confidence: {}%)", result.shape, result.confidence);
    println!("  Roundness: {:.0}%", d.roundness * 100.0);
    println!("  Symmetry:  {:.0}%", d.symmetry * 100.0);
    println!("  Corners:   {}", d.corners);
    println!("  Closed:    {}", if d.closed { "yes" } else { "no" });

    Ok(())
}
