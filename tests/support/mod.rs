//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use gearprofile::{CurveSegment, float_types::Real};
use nalgebra::Point2;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Euclidean distance between two profile points.
pub fn dist(a: &Point2<Real>, b: &Point2<Real>) -> Real {
    (a - b).norm()
}

/// Polar angle of a profile point.
pub fn angle_of(p: &Point2<Real>) -> Real {
    p.y.atan2(p.x)
}

/// Asserts that each non-empty segment starts where the previous non-empty one ended.
pub fn assert_chained(segments: &[&CurveSegment], eps: Real, context: &str) {
    let mut previous: Option<&Point2<Real>> = None;
    for (i, segment) in segments.iter().enumerate() {
        let (Some(first), Some(last)) = (segment.first(), segment.last()) else {
            continue;
        };
        if let Some(prev) = previous {
            let gap = dist(prev, first);
            assert!(gap < eps, "{context}: gap of {gap} before segment {i}");
        }
        previous = Some(last);
    }
}

/// A handful of external gear parameter sets covering undercut and no undercut,
/// shifted and unshifted.
pub fn external_sweep() -> Vec<(u32, Real, Real, Real)> {
    let mut cases = Vec::new();
    for teeth in [6, 9, 12, 17, 20, 25, 40, 80] {
        for pressure_angle in [14.5, 20.0, 25.0] {
            for shift in [-0.5, 0.0, 1.0] {
                cases.push((teeth, 2.0, pressure_angle, shift));
            }
        }
    }
    cases
}
