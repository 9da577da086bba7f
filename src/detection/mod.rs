pub mod preprocessing;
pub mod outline;
pub mod descriptors;
pub mod rules;
pub mod render;

use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_cross_mut;
use crate::models::{Classification, InkGrid, Point};
pub use outline::OutlineOrder;

const OUTLINE_MARK: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Everything the classifier produced for one bitmap
#[derive(Debug, Clone)]
pub struct ShapeAnalysis {
    pub grid: InkGrid,
    pub outline: Vec<Point>,
    pub classification: Classification,
}

/// Debug configuration for classifier runs
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Hand-drawn shape classifier
#[derive(Debug, Clone)]
pub struct ShapeClassifier {
    // Sampling parameters
    pub stride: u32,
    pub ink_threshold: f64,
    pub outline_order: OutlineOrder,
    debug: Option<DebugConfig>,
}

impl ShapeClassifier {
    pub fn new() -> Self {
        Self {
            stride: preprocessing::SAMPLE_STRIDE,
            ink_threshold: preprocessing::INK_THRESHOLD,
            outline_order: OutlineOrder::Scan,
            debug: None,
        }
    }

    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride.max(1);
        self
    }

    pub fn with_ink_threshold(mut self, threshold: f64) -> Self {
        self.ink_threshold = threshold;
        self
    }

    pub fn with_outline_order(mut self, order: OutlineOrder) -> Self {
        self.outline_order = order;
        self
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> anyhow::Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Classify a bitmap. Pure: the same bitmap always gives the same result.
    pub fn classify(&self, img: &RgbaImage) -> Classification {
        self.analyze(img).classification
    }

    /// Classify a raw RGBA buffer of the given dimensions
    pub fn classify_raw(&self, width: u32, height: u32, data: &[u8]) -> anyhow::Result<Classification> {
        let bitmap = preprocessing::bitmap_from_raw(width, height, data)?;
        Ok(self.classify(&bitmap))
    }

    /// Run the full analysis, keeping the intermediate grid and outline
    pub fn analyze(&self, img: &RgbaImage) -> ShapeAnalysis {
        let grid = self.sample(img);
        tracing::debug!(
            columns = grid.width(),
            rows = grid.height(),
            ink = grid.ink_count(),
            "Sampled ink grid"
        );

        let outline = outline::extract_outline(&grid, self.stride.max(1), self.outline_order);
        tracing::debug!(points = outline.len(), order = ?self.outline_order, "Extracted outline");

        let classification = if outline.len() < descriptors::MIN_OUTLINE_POINTS {
            tracing::debug!("Outline too short, shape unknown");
            Classification::unknown()
        } else {
            let descriptor = descriptors::describe(&outline, &grid);
            tracing::debug!(
                roundness = descriptor.roundness,
                symmetry = descriptor.symmetry,
                corners = descriptor.corners,
                closed = descriptor.closed,
                "Computed descriptor"
            );
            rules::determine_shape(&descriptor)
        };

        ShapeAnalysis {
            grid,
            outline,
            classification,
        }
    }

    /// Classify and, in debug mode, write the intermediate images
    pub fn run(&self, img: &RgbaImage) -> anyhow::Result<Classification> {
        let analysis = self.analyze(img);

        if let Some(debug_config) = &self.debug {
            self.save_debug_output(&debug_config.output_dir, img, &analysis)?;
        }

        Ok(analysis.classification)
    }

    /// Get the sampled ink grid (for debugging)
    pub fn sample(&self, img: &RgbaImage) -> InkGrid {
        preprocessing::sample_ink_grid(img, self.stride, self.ink_threshold)
    }

    /// Get the outline points (for debugging)
    pub fn outline(&self, img: &RgbaImage) -> Vec<Point> {
        outline::extract_outline(&self.sample(img), self.stride.max(1), self.outline_order)
    }

    fn save_debug_output(&self, dir: &Path, img: &RgbaImage, analysis: &ShapeAnalysis) -> anyhow::Result<()> {
        save_stage(dir, 0, "Input", &DynamicImage::ImageRgba8(img.clone()))?;

        // Blow the grid back up to bitmap size so it overlays the input
        let mask = analysis.grid.to_mask();
        let grid_image = imageops::resize(
            &mask,
            mask.width() * self.stride.max(1),
            mask.height() * self.stride.max(1),
            imageops::FilterType::Nearest,
        );
        save_stage(dir, 1, "Ink Grid", &DynamicImage::ImageLuma8(grid_image))?;

        let mut marked = img.clone();
        for point in &analysis.outline {
            draw_cross_mut(&mut marked, OUTLINE_MARK, point.x as i32, point.y as i32);
        }
        save_stage(dir, 2, "Outline Extraction", &DynamicImage::ImageRgba8(marked))?;

        tracing::debug!("Saved debug images to {}", dir.display());
        Ok(())
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Save one stage image as `{index:02}_{name}/01.png`
fn save_stage(dir: &Path, index: usize, name: &str, image: &DynamicImage) -> anyhow::Result<()> {
    let step_dir = dir.join(format!("{:02}_{}", index, name.to_lowercase().replace(' ', "_")));
    std::fs::create_dir_all(&step_dir)?;

    image
        .save(step_dir.join("01.png"))
        .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))
}
