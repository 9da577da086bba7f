pub mod detection;
pub mod logger;
pub mod models;

pub use detection::{OutlineOrder, ShapeAnalysis, ShapeClassifier};
pub use detection::render::render_reference;
pub use models::{Classification, InkGrid, Point, ReferenceShape, ShapeDescriptor, ShapeKind};
