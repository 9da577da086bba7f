use std::f32::consts::PI;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_polygon_mut};
use imageproc::point::Point as PixelPoint;
use crate::models::ReferenceShape;

pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Number of segments used to flatten each heart lobe
const BEZIER_STEPS: usize = 24;

/// Draw a reference shape in ink, centred on a white canvas.
/// `size` is the outer radius in pixels.
pub fn render_reference(shape: ReferenceShape, width: u32, height: u32, size: f32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, PAPER);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;

    match shape {
        ReferenceShape::Star => {
            let vertices: Vec<(f32, f32)> = (0..10)
                .map(|i| {
                    let angle = i as f32 * PI / 5.0;
                    let radius = if i % 2 == 0 { size } else { size * 0.5 };
                    (cx + angle.cos() * radius, cy + angle.sin() * radius)
                })
                .collect();
            fill_polygon(&mut canvas, &vertices);
        }
        ReferenceShape::Diamond => {
            let vertices = [(cx, cy - size), (cx + size, cy), (cx, cy + size), (cx - size, cy)];
            fill_polygon(&mut canvas, &vertices);
        }
        ReferenceShape::Heart => {
            // Two cubic lobes meeting at the notch and the tip, shifted up to stay centred
            let cy = cy - size * 0.45;
            let notch = (cx, cy + size * 0.3);
            let tip = (cx, cy + size * 1.2);
            let mut vertices = cubic_bezier(
                notch,
                (cx - size, cy - size * 0.3),
                (cx - size, cy + size * 0.8),
                tip,
            );
            vertices.extend(
                cubic_bezier(tip, (cx + size, cy + size * 0.8), (cx + size, cy - size * 0.3), notch)
                    .into_iter()
                    .skip(1),
            );
            fill_polygon(&mut canvas, &vertices);
        }
        ReferenceShape::Crescent => {
            let center = (cx.round() as i32, cy.round() as i32);
            draw_filled_circle_mut(&mut canvas, center, size.round() as i32, INK);
            let bite = ((cx + size * 0.3).round() as i32, center.1);
            draw_filled_circle_mut(&mut canvas, bite, (size * 0.7).round() as i32, PAPER);
        }
    }

    canvas
}

fn cubic_bezier(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), p3: (f32, f32)) -> Vec<(f32, f32)> {
    (0..=BEZIER_STEPS)
        .map(|step| {
            let t = step as f32 / BEZIER_STEPS as f32;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            (
                a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
                a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
            )
        })
        .collect()
}

/// Round vertices to pixels, drop repeats and close-the-loop duplicates, then fill
fn fill_polygon(canvas: &mut RgbaImage, vertices: &[(f32, f32)]) {
    let mut points: Vec<PixelPoint<i32>> = Vec::with_capacity(vertices.len());
    for &(x, y) in vertices {
        let point = PixelPoint::new(x.round() as i32, y.round() as i32);
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() >= 3 {
        draw_polygon_mut(canvas, &points, INK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_ink(img: &RgbaImage, x: u32, y: u32) -> bool {
        img.get_pixel(x, y) == &INK
    }

    #[test]
    fn shapes_are_centred() {
        for shape in ReferenceShape::ALL {
            let img = render_reference(shape, 400, 300, 60.0);
            assert!(!is_ink(&img, 0, 0), "{:?} touches the corner", shape);
        }
        assert!(is_ink(&render_reference(ReferenceShape::Star, 400, 300, 60.0), 200, 150));
        assert!(is_ink(&render_reference(ReferenceShape::Diamond, 400, 300, 60.0), 200, 150));
        assert!(is_ink(&render_reference(ReferenceShape::Heart, 400, 300, 60.0), 200, 150));
    }

    #[test]
    fn crescent_has_a_bite() {
        let img = render_reference(ReferenceShape::Crescent, 400, 300, 60.0);
        // Left edge of the disc stays, the right side is cut away
        assert!(is_ink(&img, 145, 150));
        assert!(!is_ink(&img, 230, 150));
    }

    #[test]
    fn diamond_leaves_its_corners_blank() {
        let img = render_reference(ReferenceShape::Diamond, 400, 300, 60.0);
        assert!(!is_ink(&img, 150, 100));
        assert!(!is_ink(&img, 250, 200));
    }
}
