use image::{Rgba, RgbaImage};
use shapelab::{InkGrid, Point};

pub const WIDTH: u32 = 400;
pub const HEIGHT: u32 = 300;

pub const INK: Rgba<u8> = Rgba([20, 20, 20, 255]);
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A 400x300 white canvas with ink wherever `is_ink` holds
pub fn canvas(is_ink: impl Fn(i64, i64) -> bool) -> RgbaImage {
    RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| {
        if is_ink(x as i64, y as i64) { INK } else { PAPER }
    })
}

pub fn blank_canvas() -> RgbaImage {
    canvas(|_, _| false)
}

pub fn filled_circle(cx: i64, cy: i64, radius: i64) -> RgbaImage {
    canvas(|x, y| (x - cx).pow(2) + (y - cy).pow(2) <= radius * radius)
}

/// Circle stroke of the given half-thickness
pub fn ring(cx: i64, cy: i64, radius: i64, half_width: i64) -> RgbaImage {
    canvas(|x, y| {
        let d2 = (x - cx).pow(2) + (y - cy).pow(2);
        (radius - half_width).pow(2) <= d2 && d2 <= (radius + half_width).pow(2)
    })
}

/// Inclusive pixel rectangle
pub fn filled_rect(x0: i64, y0: i64, x1: i64, y1: i64) -> RgbaImage {
    canvas(|x, y| (x0..=x1).contains(&x) && (y0..=y1).contains(&y))
}

/// Deterministic speckle so the tests do not need a random number generator
pub fn speckle(seed: u64) -> RgbaImage {
    let mut state = seed;
    RgbaImage::from_fn(WIDTH, HEIGHT, |_, _| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        if (state >> 33) % 3 == 0 { INK } else { PAPER }
    })
}

/// Points spaced evenly around a circle, in walking order
pub fn circle_outline(count: usize, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = std::f64::consts::TAU * i as f64 / count as f64;
            Point::new(200.0 + radius * t.cos(), 150.0 + radius * t.sin())
        })
        .collect()
}

/// Clockwise walk around the square (140, 90)-(260, 210), starting at its top-left corner
pub fn square_outline() -> Vec<Point> {
    let mut points = Vec::new();
    for i in 0..24 {
        points.push(Point::new(140.0 + 5.0 * i as f64, 90.0));
    }
    for i in 0..24 {
        points.push(Point::new(260.0, 90.0 + 5.0 * i as f64));
    }
    for i in 0..24 {
        points.push(Point::new(260.0 - 5.0 * i as f64, 210.0));
    }
    for i in 0..24 {
        points.push(Point::new(140.0, 210.0 - 5.0 * i as f64));
    }
    points
}

/// The 80x60 grid a canvas sampled at stride 5 would produce
pub fn grid_of(is_ink: impl Fn(i64, i64) -> bool) -> InkGrid {
    InkGrid::from_fn(WIDTH / 5, HEIGHT / 5, |gx, gy| is_ink(gx as i64 * 5, gy as i64 * 5))
}
