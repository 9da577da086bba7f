use crate::models::{Classification, ShapeDescriptor, ShapeKind};

/// Map descriptors to a shape label and confidence. Rules are tried in order
/// and the first match wins.
pub fn determine_shape(descriptor: &ShapeDescriptor) -> Classification {
    let (shape, confidence) = match_rules(descriptor);

    tracing::debug!(
        shape = shape.name(),
        confidence,
        triangle = is_triangle(descriptor),
        square = is_square(descriptor),
        circle = is_circle(descriptor),
        "Rule evaluation"
    );

    Classification {
        shape,
        confidence: to_percentage(confidence),
        descriptor: *descriptor,
    }
}

fn match_rules(d: &ShapeDescriptor) -> (ShapeKind, f64) {
    let corners = d.corners as f64;

    if is_triangle(d) {
        let mut confidence = (100.0 - (corners - 3.0).abs() * 15.0).max(70.0);
        if d.closed {
            confidence += 10.0;
        }
        if d.symmetry > 0.3 {
            confidence += 5.0;
        }
        return (ShapeKind::Triangle, confidence);
    }

    if is_square(d) {
        let shape = if d.corners <= 5 { ShapeKind::Square } else { ShapeKind::Rectangle };
        let mut confidence = (d.symmetry * 100.0).round();
        if d.closed {
            confidence += 15.0;
        }
        if d.corners == 4 {
            confidence += 10.0;
        }
        return (shape, confidence);
    }

    if is_circle(d) {
        let mut confidence = (d.roundness * 100.0).round();
        if d.closed {
            confidence += 10.0;
        }
        if d.symmetry > 0.5 {
            confidence += 5.0;
        }
        return (ShapeKind::Circle, confidence);
    }

    if d.corners < 2 && d.roundness < 0.5 {
        return (ShapeKind::Line, 80.0);
    }

    if d.corners > 6 && d.roundness < 0.6 {
        return (ShapeKind::ComplexPolygon, (corners * 8.0).min(80.0));
    }

    // Nothing clear-cut; pick the closest family
    if d.roundness > 0.7 {
        (ShapeKind::RoundedCircle, (d.roundness * 100.0 - corners * 5.0).round())
    } else if d.symmetry > 0.5 {
        (ShapeKind::Rectangular, (d.symmetry * 100.0).round())
    } else if (2..=5).contains(&d.corners) {
        (
            ShapeKind::ApproximateTriangle,
            (80.0 - (corners - 3.0).abs() * 10.0).max(50.0),
        )
    } else {
        (ShapeKind::Geometric, ((d.roundness + d.symmetry) * 60.0).max(40.0))
    }
}

fn is_triangle(d: &ShapeDescriptor) -> bool {
    (2..=6).contains(&d.corners) && d.roundness < 0.8
}

fn is_square(d: &ShapeDescriptor) -> bool {
    d.symmetry > 0.4 && (3..=8).contains(&d.corners) && d.roundness < 0.7
}

fn is_circle(d: &ShapeDescriptor) -> bool {
    d.roundness > 0.75 && d.corners < 3
}

fn to_percentage(confidence: f64) -> u8 {
    confidence.round().clamp(0.0, 100.0) as u8
}
