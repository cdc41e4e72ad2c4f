//! Reflection rules for the eight-way heading model
//!
//! A hit is classified once into a `HitKind`, then the kind alone decides how
//! the heading turns. Rules are tried in priority order; the first match wins.

use serde::{Deserialize, Serialize};

use super::collision::HitSample;
use super::heading::Heading;

/// How a wall contact affects the heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    /// Matched no rule; heading stays as it is
    None,
    /// Axis-aligned heading hit anything: full reversal
    Direct,
    /// Diagonal heading hit the left/right midpoint it was moving toward
    AngleX,
    /// Diagonal heading hit the top/bottom midpoint it was moving toward
    AngleY,
    /// Diagonal heading hit a corner on the side it was moving toward vertically
    Corner,
}

/// Classify a contact given the heading at the time of the hit
pub fn classify(heading: Heading, sample: HitSample) -> HitKind {
    let (x_dir, y_dir) = heading.step();

    if x_dir == 0 || y_dir == 0 {
        return HitKind::Direct;
    }

    match (sample, x_dir, y_dir) {
        (HitSample::Left, -1, _) | (HitSample::Right, 1, _) => HitKind::AngleX,
        (HitSample::Top, _, -1) | (HitSample::Bottom, _, 1) => HitKind::AngleY,
        // A corner counts when its vertical side leads the motion
        (corner, _, y) if corner.is_corner() && corner.offset().1 == y => HitKind::Corner,
        _ => HitKind::None,
    }
}

/// Heading after a hit of the given kind
pub fn apply(heading: Heading, kind: HitKind) -> Heading {
    let (x_dir, y_dir) = heading.step();
    match kind {
        HitKind::Direct | HitKind::Corner => heading.reversed(),
        // Flipping x is a quarter turn whose sense depends on the quadrant
        HitKind::AngleX if x_dir == y_dir => heading.rotate(Heading::QUARTER),
        HitKind::AngleX => heading.rotate(-Heading::QUARTER),
        HitKind::AngleY if x_dir == y_dir => heading.rotate(-Heading::QUARTER),
        HitKind::AngleY => heading.rotate(Heading::QUARTER),
        HitKind::None => heading,
    }
}

/// Resolve a hit: classify it, then turn the heading accordingly
pub fn resolve(heading: Heading, sample: HitSample) -> (Heading, HitKind) {
    let kind = classify(heading, sample);
    (apply(heading, kind), kind)
}
