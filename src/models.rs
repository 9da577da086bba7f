use std::fmt;

use image::{GrayImage, Luma};
use serde::Serialize;

/// A point in bitmap coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Sampled ink/blank grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkGrid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl InkGrid {
    /// Build a grid by evaluating `is_ink(x, y)` for every cell
    pub fn from_fn(width: u32, height: u32, mut is_ink: impl FnMut(u32, u32) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(is_ink(x, y));
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells outside the grid read as blank
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[(y * self.width + x) as usize]
    }

    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|&&ink| ink).count()
    }

    /// Grayscale mask with ink = 255 and blank = 0
    pub fn to_mask(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_ink(x, y) { Luma([255u8]) } else { Luma([0u8]) }
        })
    }
}

/// Geometric descriptors computed from an outline
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShapeDescriptor {
    /// 1.0 when every outline point sits at the same distance from the centroid
    pub roundness: f64,
    /// Mirror-match magnitude; bounded by 1 but not a calibrated probability
    pub symmetry: f64,
    pub corners: u32,
    pub closed: bool,
}

/// The pre-selected demo shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceShape {
    Star,
    Heart,
    Diamond,
    Crescent,
}

impl ReferenceShape {
    pub const ALL: [ReferenceShape; 4] = [
        ReferenceShape::Star,
        ReferenceShape::Heart,
        ReferenceShape::Diamond,
        ReferenceShape::Crescent,
    ];

    pub fn descriptor(&self) -> ShapeDescriptor {
        let (roundness, symmetry, corners) = match self {
            ReferenceShape::Star => (0.2, 1.0, 10),
            ReferenceShape::Heart => (0.6, 1.0, 0),
            ReferenceShape::Diamond => (0.0, 1.0, 4),
            ReferenceShape::Crescent => (0.7, 0.3, 0),
        };
        ShapeDescriptor {
            roundness,
            symmetry,
            corners,
            closed: true,
        }
    }

    /// Reference shapes skip pixel analysis and are always fully confident
    pub fn classification(&self) -> Classification {
        Classification {
            shape: ShapeKind::Reference(*self),
            confidence: 100,
            descriptor: self.descriptor(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ReferenceShape::Star => "Star",
            ReferenceShape::Heart => "Heart",
            ReferenceShape::Diamond => "Diamond",
            ReferenceShape::Crescent => "Crescent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Triangle,
    Square,
    Rectangle,
    Circle,
    Line,
    ComplexPolygon,
    RoundedCircle,
    Rectangular,
    ApproximateTriangle,
    Geometric,
    Unknown,
    Reference(ReferenceShape),
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Square => "Square",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Line => "Line",
            ShapeKind::ComplexPolygon => "Complex polygon",
            ShapeKind::RoundedCircle => "Circle (rounded)",
            ShapeKind::Rectangular => "Rectangular shape",
            ShapeKind::ApproximateTriangle => "Triangle (approximate)",
            ShapeKind::Geometric => "Geometric shape",
            ShapeKind::Unknown => "Unknown shape",
            ShapeKind::Reference(shape) => shape.name(),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub shape: ShapeKind,
    /// Percentage in 0..=100
    pub confidence: u8,
    pub descriptor: ShapeDescriptor,
}

impl Classification {
    pub fn unknown() -> Self {
        Self {
            shape: ShapeKind::Unknown,
            confidence: 0,
            descriptor: ShapeDescriptor::default(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.shape == ShapeKind::Unknown
    }
}
