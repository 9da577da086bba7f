mod common;

use common::*;
use shapelab::render_reference;

#[test]
fn reference_shapes_are_fully_confident() {
    for shape in ReferenceShape::ALL {
        let result = shape.classification();
        assert_eq!(result.confidence, 100);
        assert_eq!(result.shape, ShapeKind::Reference(shape));
        assert_eq!(result.descriptor, shape.descriptor());
        assert!(result.descriptor.closed);
    }
}

#[test]
fn reference_lookup_ignores_drawing_state() {
    let classifier = ShapeClassifier::new();
    let before = ReferenceShape::Star.classification();
    let _ = classifier.classify(&filled_circle(200, 150, 60));
    let _ = classifier.classify(&blank_canvas());
    assert_eq!(ReferenceShape::Star.classification(), before);
}

#[test]
fn reference_descriptors() {
    let star = ReferenceShape::Star.descriptor();
    assert_eq!((star.roundness, star.symmetry, star.corners), (0.2, 1.0, 10));

    let heart = ReferenceShape::Heart.descriptor();
    assert_eq!((heart.roundness, heart.symmetry, heart.corners), (0.6, 1.0, 0));

    let diamond = ReferenceShape::Diamond.descriptor();
    assert_eq!((diamond.roundness, diamond.symmetry, diamond.corners), (0.0, 1.0, 4));

    let crescent = ReferenceShape::Crescent.descriptor();
    assert_eq!((crescent.roundness, crescent.symmetry, crescent.corners), (0.7, 0.3, 0));
}

#[test]
fn reference_names() {
    let names: Vec<_> = ReferenceShape::ALL
        .iter()
        .map(|s| ShapeKind::Reference(*s).to_string())
        .collect();
    assert_eq!(names, ["Star", "Heart", "Diamond", "Crescent"]);
}

#[test]
fn rendered_references_can_be_analysed() {
    let classifier = ShapeClassifier::new();
    for shape in ReferenceShape::ALL {
        let img = render_reference(shape, WIDTH, HEIGHT, 60.0);
        let analysis = classifier.analyze(&img);
        assert!(analysis.grid.ink_count() > 0, "{:?} rendered no ink", shape);
        assert!(analysis.outline.len() >= descriptors::MIN_OUTLINE_POINTS);
        assert!(analysis.classification.confidence <= 100);
    }
}

#[test]
fn serialises_reference_kind() -> anyhow::Result<()> {
    let json = serde_json::to_value(ReferenceShape::Diamond.classification())?;
    assert_eq!(json["shape"]["reference"], "diamond");
    assert_eq!(json["confidence"], 100);
    assert_eq!(json["descriptor"]["corners"], 4);
    Ok(())
}
