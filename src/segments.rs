//! Curve segments of one tooth, sampled from closed-form equations.
//!
//! All points are in the gear's local frame with the origin on the gear axis.
//! The first flank lies just below the x axis (its involute is mirrored), the
//! second flank is the unmirrored involute turned by the tooth rotation angle.

use crate::float_types::Real;
use crate::involute::{
    FlankBound, involute, involute_xy, linspace, mirror_x_axis, polar, rotate, trochoid_xy,
};
use crate::params::ResolvedGearGeometry;
use nalgebra::Point2;

/// An ordered run of points in the cross-section plane.
///
/// Consumers stitch segments end-to-start, so point order matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSegment {
    pub points: Vec<Point2<Real>>,
}

impl CurveSegment {
    pub const fn new(points: Vec<Point2<Real>>) -> Self {
        Self { points }
    }

    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2<Real>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2<Real>> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point2<Real>> {
        self.points.iter()
    }

    /// Same points, opposite direction.
    pub fn reversed(mut self) -> Self {
        self.points.reverse();
        self
    }

    /// Copy turned about the gear axis.
    pub fn rotated(&self, angle: Real) -> Self {
        Self::new(self.points.iter().map(|p| rotate(p, angle)).collect())
    }

    /// `[x0, y0, x1, y1, ...]`, the layout spline primitives take.
    pub fn flattened_xy(&self) -> Vec<Real> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }
}

impl FromIterator<Point2<Real>> for CurveSegment {
    fn from_iter<I: IntoIterator<Item = Point2<Real>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CurveSegment {
    type Item = &'a Point2<Real>;
    type IntoIter = std::slice::Iter<'a, Point2<Real>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Circular arc about the gear axis, sampled from `start_angle` to `end_angle`.
pub fn circular_arc(radius: Real, start_angle: Real, end_angle: Real, count: usize) -> CurveSegment {
    linspace(start_angle, end_angle, count)
        .map(|theta| polar(radius, theta))
        .collect()
}

/// Both involute flanks, sampled between two flank bounds.
///
/// Returns `(first, second)`, each running from `from` to `to`. The first flank
/// is the involute mirrored across the x axis, the second is the plain involute
/// turned by the tooth rotation angle.
pub fn involute_flanks(
    geometry: &ResolvedGearGeometry,
    from: FlankBound,
    to: FlankBound,
    count: usize,
) -> (CurveSegment, CurveSegment) {
    let rb = geometry.base_radius;
    let rotation = geometry.tooth_rotation_angle;

    let (first, second) = linspace(from.roll_angle(), to.roll_angle(), count)
        .map(|phi| {
            let p = involute_xy(rb, phi);
            (mirror_x_axis(&p), rotate(&p, rotation))
        })
        .unzip::<_, _, Vec<_>, Vec<_>>();

    (CurveSegment::new(first), CurveSegment::new(second))
}

/// Trochoid root fillet traced by the generating tool's tip corner when the base
/// circle reaches past the root circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrochoidFillet {
    /// How far the root circle sits below the base circle.
    pub depth: Real,
    /// Roll angle at which the trochoid meets the base circle.
    pub sweep: Real,
    /// Rotation that puts the trochoid's base-circle end onto the flank start.
    pub beta: Real,
}

impl TrochoidFillet {
    /// `None` when the base circle is on or inside the root circle: no undercut,
    /// the involute runs straight down to the root.
    pub fn for_geometry(geometry: &ResolvedGearGeometry) -> Option<Self> {
        let rb = geometry.base_radius;
        let rf = geometry.dedendum_radius;
        if rb <= rf {
            return None;
        }

        let depth = rb - rf;
        let b = (rb.powi(4) / (rb - depth).powi(2) - rb * rb).sqrt();
        let h = b * (1.0 - depth / rb);
        let alpha = (h / rb).atan();
        let sweep = alpha + involute(alpha);
        let beta = (b / rb).atan() - sweep;

        Some(Self { depth, sweep, beta })
    }

    /// Both fillets, each running from the root circle up to the base circle.
    ///
    /// The first sits against the first flank, the second is its mirror turned by
    /// the tooth rotation angle.
    pub fn flanks(
        &self,
        geometry: &ResolvedGearGeometry,
        count: usize,
    ) -> (CurveSegment, CurveSegment) {
        let rb = geometry.base_radius;
        let rotation = geometry.tooth_rotation_angle;

        let (first, second) = linspace(0.0, self.sweep, count)
            .map(|theta| {
                let p = rotate(&trochoid_xy(rb, self.depth, theta), self.beta);
                (p, rotate(&mirror_x_axis(&p), rotation))
            })
            .unzip::<_, _, Vec<_>, Vec<_>>();

        (CurveSegment::new(first), CurveSegment::new(second))
    }
}

// -------------------------------------------------------------------------------------------------
// External tooth                                                                                 //
// -------------------------------------------------------------------------------------------------

/// Tip arc joining the two flank ends on the addendum circle, first flank to second.
pub fn addendum_arc(geometry: &ResolvedGearGeometry, count: usize) -> CurveSegment {
    let inv_tip = geometry.addendum_bound().polar_angle();
    circular_arc(
        geometry.addendum_radius,
        -inv_tip,
        geometry.tooth_rotation_angle + inv_tip,
        count,
    )
}

/// Root arc on the dedendum circle, from the second flank's foot to the first
/// flank's foot one pitch further on.
///
/// With a fillet the feet are the trochoid ends, otherwise the involute ends.
pub fn dedendum_arc(
    geometry: &ResolvedGearGeometry,
    fillet: Option<&TrochoidFillet>,
    count: usize,
) -> CurveSegment {
    let rotation = geometry.tooth_rotation_angle;
    let pitch = geometry.angular_pitch();
    let (start, end) = match fillet {
        Some(fillet) => (rotation - fillet.beta, -pitch + fillet.beta),
        None => {
            let inv_root = geometry.dedendum_bound().polar_angle();
            (rotation + inv_root, -pitch - inv_root)
        }
    };
    circular_arc(geometry.dedendum_radius, start, end, count)
}

// -------------------------------------------------------------------------------------------------
// Internal tooth                                                                                 //
// -------------------------------------------------------------------------------------------------

/// Bottom of the tooth space: arc on the (outer) dedendum circle joining the
/// flank ends, first flank to second.
pub fn root_arc(geometry: &ResolvedGearGeometry, count: usize) -> CurveSegment {
    let inv_root = geometry.dedendum_bound().polar_angle();
    circular_arc(
        geometry.dedendum_radius,
        -inv_root,
        geometry.tooth_rotation_angle + inv_root,
        count,
    )
}

/// Angles of the tip land between the second flank and the next tooth's first flank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipLand {
    /// Where the second flank leaves the tip circle.
    pub start: Real,
    /// Signed angular width of the land (negative: it runs clockwise).
    pub width: Real,
    /// Polar angle of the first flank on the tip circle.
    pub first_flank: Real,
    /// Radius the land is drawn at; never inside the base circle.
    pub radius: Real,
}

impl TipLand {
    pub fn for_geometry(geometry: &ResolvedGearGeometry) -> Self {
        let inv_tip = geometry.addendum_bound().polar_angle();
        let start = geometry.tooth_rotation_angle + inv_tip;
        let end = -geometry.angular_pitch() - inv_tip;
        Self {
            start,
            width: end - start,
            first_flank: -inv_tip,
            radius: geometry.addendum_radius.max(geometry.base_radius),
        }
    }

    /// Angle halfway along the land, seen from the second flank.
    pub fn middle(&self) -> Real {
        self.start + self.width / 2.0
    }

    /// The same middle seen from the first flank, one pitch back.
    pub fn middle_behind_first_flank(&self) -> Real {
        self.first_flank - self.width / 2.0
    }
}

/// The two tip half-arcs of an internal tooth.
///
/// Returns `(from second flank to land middle, from land middle to first flank)`.
pub fn tip_half_arcs(land: &TipLand, count: usize) -> (CurveSegment, CurveSegment) {
    (
        circular_arc(land.radius, land.start, land.middle(), count),
        circular_arc(
            land.radius,
            land.middle_behind_first_flank(),
            land.first_flank,
            count,
        ),
    )
}

/// Outer rim boundary spanning one pitch, between the two land middles.
pub fn rim_arc(
    geometry: &ResolvedGearGeometry,
    land: &TipLand,
    rim_thickness: Real,
    count: usize,
) -> CurveSegment {
    circular_arc(
        geometry.dedendum_radius + rim_thickness,
        land.middle(),
        land.middle_behind_first_flank(),
        count,
    )
}
