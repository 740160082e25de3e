//! Tooth profile assembly and the two generation entry points.
//!
//! Segments are published oriented along one walk of the tooth contour, so the
//! last point of each segment in [`ExternalToothProfile::contour`] /
//! [`InternalToothProfile::contour`] order is the first point of the next one.
//! The only gaps are the [`ClosingLine`]s the caller adds itself.

use crate::errors::GearError;
use crate::float_types::Real;
use crate::params::{GearKind, GearSpecification, ResolvedGearGeometry, resolve};
use crate::segments::{
    CurveSegment, TipLand, TrochoidFillet, addendum_arc, dedendum_arc, involute_flanks, rim_arc,
    root_arc, tip_half_arcs,
};
use nalgebra::Point2;
use tracing::debug;

/// Name of a segment within a tooth profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentRole {
    Trochoid1,
    Involute1,
    UpperArc,
    Involute2,
    Trochoid2,
    LowerArc,
    LowerArc1,
    LowerArc2,
    ExternalArc,
}

impl SegmentRole {
    pub const fn name(&self) -> &'static str {
        match self {
            SegmentRole::Trochoid1 => "trochoid_1",
            SegmentRole::Involute1 => "involute_1",
            SegmentRole::UpperArc => "upper_arc",
            SegmentRole::Involute2 => "involute_2",
            SegmentRole::Trochoid2 => "trochoid_2",
            SegmentRole::LowerArc => "lower_arc",
            SegmentRole::LowerArc1 => "lower_arc_1",
            SegmentRole::LowerArc2 => "lower_arc_2",
            SegmentRole::ExternalArc => "external_arc",
        }
    }

    /// Circular arcs about the gear axis, as opposed to flank curves.
    pub const fn is_arc(&self) -> bool {
        matches!(
            self,
            SegmentRole::UpperArc
                | SegmentRole::LowerArc
                | SegmentRole::LowerArc1
                | SegmentRole::LowerArc2
                | SegmentRole::ExternalArc
        )
    }
}

/// Straight line the caller draws to close the contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosingLine {
    pub start: Point2<Real>,
    pub end: Point2<Real>,
}

/// One external (spur) tooth and the root gap after it.
///
/// Walk: `trochoid_1` (root → base circle), `involute_1` (→ tip), `upper_arc`,
/// `involute_2` (tip →), `trochoid_2` (→ root), `lower_arc` (→ the next
/// tooth's root). Without undercut both trochoids are empty and the involutes
/// meet `lower_arc` directly. Two lines through the gear centre close the wedge.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalToothProfile {
    pub geometry: ResolvedGearGeometry,
    pub trochoid_1: CurveSegment,
    pub involute_1: CurveSegment,
    pub upper_arc: CurveSegment,
    pub involute_2: CurveSegment,
    pub trochoid_2: CurveSegment,
    pub lower_arc: CurveSegment,
}

impl ExternalToothProfile {
    /// Segments in walk order. Empty trochoids are included.
    pub fn contour(&self) -> [(SegmentRole, &CurveSegment); 6] {
        [
            (SegmentRole::Trochoid1, &self.trochoid_1),
            (SegmentRole::Involute1, &self.involute_1),
            (SegmentRole::UpperArc, &self.upper_arc),
            (SegmentRole::Involute2, &self.involute_2),
            (SegmentRole::Trochoid2, &self.trochoid_2),
            (SegmentRole::LowerArc, &self.lower_arc),
        ]
    }

    /// Centre → contour start, contour end → centre.
    pub fn closing_lines(&self) -> [ClosingLine; 2] {
        let centre = Point2::origin();
        let start = self
            .trochoid_1
            .first()
            .or_else(|| self.involute_1.first())
            .copied()
            .unwrap_or(centre);
        let end = self.lower_arc.last().copied().unwrap_or(centre);
        [
            ClosingLine { start: centre, end: start },
            ClosingLine { start: end, end: centre },
        ]
    }

    pub fn has_trochoid(&self) -> bool {
        !self.trochoid_1.is_empty()
    }
}

/// One internal (ring) tooth space and the rim material around it.
///
/// Walk: `involute_1` (tip → root circle), `upper_arc` along the root circle,
/// `involute_2` (→ tip), `lower_arc_1` along the tip circle to the middle of
/// the tip land, a caller line out to the rim, `external_arc` back across one
/// pitch, a caller line in, and `lower_arc_2` home to the start of `involute_1`.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalToothProfile {
    pub geometry: ResolvedGearGeometry,
    pub rim_thickness: Real,
    pub involute_1: CurveSegment,
    pub upper_arc: CurveSegment,
    pub involute_2: CurveSegment,
    pub lower_arc_1: CurveSegment,
    pub lower_arc_2: CurveSegment,
    pub external_arc: CurveSegment,
}

impl InternalToothProfile {
    /// Segments in walk order, closing lines left out.
    pub fn contour(&self) -> [(SegmentRole, &CurveSegment); 6] {
        [
            (SegmentRole::Involute1, &self.involute_1),
            (SegmentRole::UpperArc, &self.upper_arc),
            (SegmentRole::Involute2, &self.involute_2),
            (SegmentRole::LowerArc1, &self.lower_arc_1),
            (SegmentRole::ExternalArc, &self.external_arc),
            (SegmentRole::LowerArc2, &self.lower_arc_2),
        ]
    }

    /// Tip land → rim, rim → tip land.
    pub fn closing_lines(&self) -> [ClosingLine; 2] {
        let centre = Point2::origin();
        let endpoint = |p: Option<&Point2<Real>>| p.copied().unwrap_or(centre);
        [
            ClosingLine {
                start: endpoint(self.lower_arc_1.last()),
                end: endpoint(self.external_arc.first()),
            },
            ClosingLine {
                start: endpoint(self.external_arc.last()),
                end: endpoint(self.lower_arc_2.first()),
            },
        ]
    }

    /// Radius of `external_arc`.
    pub fn rim_radius(&self) -> Real {
        self.geometry.dedendum_radius + self.rim_thickness
    }
}

/// Either tooth profile.
#[derive(Debug, Clone, PartialEq)]
pub enum ToothProfile {
    External(ExternalToothProfile),
    Internal(InternalToothProfile),
}

impl ToothProfile {
    pub const fn kind(&self) -> GearKind {
        match self {
            ToothProfile::External(_) => GearKind::External,
            ToothProfile::Internal(_) => GearKind::Internal,
        }
    }

    pub const fn geometry(&self) -> &ResolvedGearGeometry {
        match self {
            ToothProfile::External(profile) => &profile.geometry,
            ToothProfile::Internal(profile) => &profile.geometry,
        }
    }

    pub fn contour(&self) -> [(SegmentRole, &CurveSegment); 6] {
        match self {
            ToothProfile::External(profile) => profile.contour(),
            ToothProfile::Internal(profile) => profile.contour(),
        }
    }

    pub fn closing_lines(&self) -> [ClosingLine; 2] {
        match self {
            ToothProfile::External(profile) => profile.closing_lines(),
            ToothProfile::Internal(profile) => profile.closing_lines(),
        }
    }

    /// Look a segment up by role. `None` for roles the gear kind does not have.
    pub fn segment(&self, role: SegmentRole) -> Option<&CurveSegment> {
        self.contour()
            .into_iter()
            .find(|(r, _)| *r == role)
            .map(|(_, segment)| segment)
    }
}

impl From<ExternalToothProfile> for ToothProfile {
    fn from(profile: ExternalToothProfile) -> Self {
        ToothProfile::External(profile)
    }
}

impl From<InternalToothProfile> for ToothProfile {
    fn from(profile: InternalToothProfile) -> Self {
        ToothProfile::Internal(profile)
    }
}

/// Generate one external tooth.
///
/// `spec.point_counts` slots: `[involute, trochoid, addendum arc, dedendum arc]`
/// (see [`PointCounts::external`](crate::params::PointCounts::external)).
///
/// # Example
/// ```
/// use gearprofile::{GearSpecification, generate_external_tooth_profile};
/// let tooth = generate_external_tooth_profile(&GearSpecification::external(20, 2.0, 20.0)).unwrap();
/// assert_eq!(tooth.geometry.addendum_radius, 22.0);
/// assert!(tooth.has_trochoid());
/// ```
pub fn generate_external_tooth_profile(
    spec: &GearSpecification,
) -> Result<ExternalToothProfile, GearError> {
    let geometry = resolve(spec, GearKind::External)?;
    let counts = spec.point_counts;

    let (involute_1, involute_2) = involute_flanks(
        &geometry,
        geometry.dedendum_bound(),
        geometry.addendum_bound(),
        counts.involute(),
    );

    let fillet = TrochoidFillet::for_geometry(&geometry);
    let (trochoid_1, trochoid_2) = match &fillet {
        Some(fillet) => fillet.flanks(&geometry, counts.trochoid()),
        None => (CurveSegment::empty(), CurveSegment::empty()),
    };

    let profile = ExternalToothProfile {
        upper_arc: addendum_arc(&geometry, counts.addendum_arc()),
        lower_arc: dedendum_arc(&geometry, fillet.as_ref(), counts.dedendum_arc()),
        trochoid_1,
        involute_1,
        involute_2: involute_2.reversed(),
        trochoid_2: trochoid_2.reversed(),
        geometry,
    };

    debug!(
        teeth = geometry.teeth_count,
        trochoid = profile.has_trochoid(),
        involute_points = profile.involute_1.len(),
        trochoid_points = profile.trochoid_1.len(),
        "assembled external tooth profile"
    );
    Ok(profile)
}

/// Generate one internal tooth space.
///
/// `spec.point_counts` slots: `[involute, root arc, tip half-arcs, rim arc]`
/// (see [`PointCounts::internal`](crate::params::PointCounts::internal)).
pub fn generate_internal_tooth_profile(
    spec: &GearSpecification,
) -> Result<InternalToothProfile, GearError> {
    let geometry = resolve(spec, GearKind::Internal)?;
    let counts = spec.point_counts;

    let (involute_1, involute_2) = involute_flanks(
        &geometry,
        geometry.addendum_bound(),
        geometry.dedendum_bound(),
        counts.involute(),
    );

    let land = TipLand::for_geometry(&geometry);
    let (lower_arc_1, lower_arc_2) = tip_half_arcs(&land, counts.tip_half_arc());

    let profile = InternalToothProfile {
        upper_arc: root_arc(&geometry, counts.root_arc()),
        external_arc: rim_arc(&geometry, &land, spec.rim_thickness, counts.rim_arc()),
        rim_thickness: spec.rim_thickness,
        involute_1,
        involute_2: involute_2.reversed(),
        lower_arc_1,
        lower_arc_2,
        geometry,
    };

    debug!(
        teeth = geometry.teeth_count,
        rim_radius = profile.rim_radius(),
        involute_points = profile.involute_1.len(),
        "assembled internal tooth profile"
    );
    Ok(profile)
}

/// Generate a tooth of either kind.
pub fn generate_tooth_profile(
    spec: &GearSpecification,
    kind: GearKind,
) -> Result<ToothProfile, GearError> {
    match kind {
        GearKind::External => generate_external_tooth_profile(spec).map(ToothProfile::from),
        GearKind::Internal => generate_internal_tooth_profile(spec).map(ToothProfile::from),
    }
}
