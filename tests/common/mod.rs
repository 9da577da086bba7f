mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from shapelab for tests
pub use shapelab::detection::{descriptors, rules};
pub use shapelab::{
    Classification, InkGrid, OutlineOrder, Point, ReferenceShape, ShapeClassifier,
    ShapeDescriptor, ShapeKind,
};
