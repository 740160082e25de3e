//! `geo` views of a tooth profile: per-segment line strings, the closed contour
//! of one tooth, and the full gear outline obtained by repeating the tooth
//! around the axis.

use crate::float_types::{Real, tolerance};
use crate::involute::rotate;
use crate::profile::{ExternalToothProfile, InternalToothProfile, ToothProfile};
use crate::segments::CurveSegment;
use geo::{Coord, LineString, Orient, Polygon as GeoPolygon, orient::Direction};
use nalgebra::Point2;

impl CurveSegment {
    /// The segment as an open `geo` line string.
    pub fn to_line_string(&self) -> LineString<Real> {
        LineString::from(
            self.points
                .iter()
                .map(|p| Coord { x: p.x, y: p.y })
                .collect::<Vec<_>>(),
        )
    }
}

/// Collects points, dropping any that repeat the previous one within tolerance.
struct Ring {
    coords: Vec<Coord<Real>>,
    eps: Real,
}

impl Ring {
    fn new(eps: Real) -> Self {
        Self {
            coords: Vec::new(),
            eps,
        }
    }

    fn push(&mut self, p: Point2<Real>) {
        if let Some(last) = self.coords.last() {
            if (last.x - p.x).hypot(last.y - p.y) <= self.eps {
                return;
            }
        }
        self.coords.push(Coord { x: p.x, y: p.y });
    }

    fn extend(&mut self, segment: &CurveSegment, angle: Real) {
        for p in segment {
            self.push(rotate(p, angle));
        }
    }

    /// Closed line string; a trailing copy of the first point is folded in.
    fn close(mut self) -> LineString<Real> {
        if self.coords.len() > 1 {
            let first = self.coords[0];
            if let Some(last) = self.coords.last() {
                if (last.x - first.x).hypot(last.y - first.y) <= self.eps {
                    self.coords.pop();
                }
            }
        }
        let mut ring = LineString::from(self.coords);
        ring.close();
        ring
    }
}

fn ring_tolerance(module: Real) -> Real {
    tolerance() * module
}

/// Closed contour of a single tooth, including the caller-side closing lines.
///
/// External: a wedge through the gear centre. Internal: one pitch of the rim
/// with the tooth space cut out of its inner side.
pub fn tooth_contour(profile: &ToothProfile) -> LineString<Real> {
    let mut ring = Ring::new(ring_tolerance(profile.geometry().module));
    if let ToothProfile::External(_) = profile {
        ring.push(Point2::origin());
    }
    for (_, segment) in profile.contour() {
        ring.extend(segment, 0.0);
    }
    ring.close()
}

/// Full 2D outline of the gear as a polygon.
///
/// External gears give a solid toothed disc. Internal gears give the rim disc
/// with the toothed bore as a hole.
pub fn gear_outline(profile: &ToothProfile) -> GeoPolygon<Real> {
    match profile {
        ToothProfile::External(tooth) => external_gear_outline(tooth),
        ToothProfile::Internal(tooth) => internal_gear_outline(tooth),
    }
}

/// Repeat the tooth walk once per tooth. Each walk ends where the next one begins.
pub fn external_gear_outline(tooth: &ExternalToothProfile) -> GeoPolygon<Real> {
    let geometry = &tooth.geometry;
    let pitch = geometry.angular_pitch();
    let mut ring = Ring::new(ring_tolerance(geometry.module));

    for k in 0..geometry.teeth_count {
        let angle = -(k as Real) * pitch;
        for (_, segment) in tooth.contour() {
            ring.extend(segment, angle);
        }
    }

    GeoPolygon::new(ring.close(), vec![]).orient(Direction::Default)
}

/// Rim circle outside, toothed bore inside.
///
/// The bore walk of one pitch is `involute_1 → upper_arc → involute_2 →
/// lower_arc_1`, and the next pitch's `lower_arc_2` carries it on to the
/// following `involute_1`.
pub fn internal_gear_outline(tooth: &InternalToothProfile) -> GeoPolygon<Real> {
    let geometry = &tooth.geometry;
    let pitch = geometry.angular_pitch();
    let eps = ring_tolerance(geometry.module);

    let mut rim = Ring::new(eps);
    let mut bore = Ring::new(eps);
    for k in 0..geometry.teeth_count {
        // external_arc runs counter-clockwise across one pitch
        rim.extend(&tooth.external_arc, (k as Real) * pitch);

        let angle = -(k as Real) * pitch;
        bore.extend(&tooth.involute_1, angle);
        bore.extend(&tooth.upper_arc, angle);
        bore.extend(&tooth.involute_2, angle);
        bore.extend(&tooth.lower_arc_1, angle);
        bore.extend(&tooth.lower_arc_2, angle - pitch);
    }

    GeoPolygon::new(rim.close(), vec![bore.close()]).orient(Direction::Default)
}
