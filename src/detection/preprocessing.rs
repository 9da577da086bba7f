use image::{DynamicImage, Rgba, RgbaImage};
use crate::models::InkGrid;

/// Sample every `SAMPLE_STRIDE`-th pixel in both axes
pub const SAMPLE_STRIDE: u32 = 5;

/// Cells darker than this mean-RGB value count as ink
pub const INK_THRESHOLD: f64 = 128.0;

/// Unweighted mean of the colour channels; alpha is ignored
pub fn luminance(pixel: &Rgba<u8>) -> f64 {
    (pixel[0] as f64 + pixel[1] as f64 + pixel[2] as f64) / 3.0
}

/// Sample the bitmap at a fixed stride and threshold each sample into ink or blank
pub fn sample_ink_grid(img: &RgbaImage, stride: u32, threshold: f64) -> InkGrid {
    let stride = stride.max(1);
    let columns = img.width().div_ceil(stride);
    let rows = img.height().div_ceil(stride);

    InkGrid::from_fn(columns, rows, |gx, gy| {
        luminance(img.get_pixel(gx * stride, gy * stride)) < threshold
    })
}

/// Wrap a raw RGBA buffer, checking that its length matches the dimensions
pub fn bitmap_from_raw(width: u32, height: u32, data: &[u8]) -> anyhow::Result<RgbaImage> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        anyhow::bail!(
            "RGBA buffer has {} bytes, expected {} for {}x{}",
            data.len(),
            expected,
            width,
            height
        );
    }

    RgbaImage::from_raw(width, height, data.to_vec())
        .ok_or_else(|| anyhow::anyhow!("Failed to build {}x{} bitmap", width, height))
}

/// Composite the image over a white background so transparent areas read as blank
pub fn flatten_on_white(img: &DynamicImage) -> RgbaImage {
    let mut rgba = img.to_rgba8();
    for pixel in rgba.pixels_mut() {
        let alpha = pixel[3] as f32 / 255.0;
        for channel in 0..3 {
            let value = pixel[channel] as f32 * alpha + 255.0 * (1.0 - alpha);
            pixel[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        pixel[3] = 255;
    }
    rgba
}
