//! Gear parameter resolution: raw gear inputs to validated radii and angles.

use crate::errors::{ArgumentError, GearError};
use crate::float_types::{PI, Real};
use crate::involute::{FlankBound, involute};
use tracing::debug;

/// Dedendum circle never shrinks below this fraction of the module.
pub const DEDENDUM_FLOOR: Real = 0.01;

/// Addendum (tip height) in modules.
pub const ADDENDUM_COEFFICIENT: Real = 1.0;

/// Dedendum (root depth) in modules.
pub const DEDENDUM_COEFFICIENT: Real = 1.25;

/// Spur (external) or ring (internal) gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GearKind {
    External,
    Internal,
}

/// Number of samples per curve-segment family.
///
/// The four slots mean different things per gear kind:
///
/// | slot | external          | internal                        |
/// |------|-------------------|---------------------------------|
/// | 0    | involute flanks   | involute flanks                 |
/// | 1    | trochoid fillets  | root arc (`upper_arc`)          |
/// | 2    | addendum arc      | tip half-arcs (split in two)    |
/// | 3    | dedendum arc      | rim arc (`external_arc`)        |
///
/// Every slot needs at least 2 points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointCounts(pub [usize; 4]);

impl PointCounts {
    pub const EXTERNAL_DEFAULT: Self = Self::external(10, 10, 5, 5);
    pub const INTERNAL_DEFAULT: Self = Self::internal(10, 5, 5, 10);

    /// Slots for an external gear.
    pub const fn external(
        involute: usize,
        trochoid: usize,
        addendum_arc: usize,
        dedendum_arc: usize,
    ) -> Self {
        Self([involute, trochoid, addendum_arc, dedendum_arc])
    }

    /// Slots for an internal gear. The tip half-arcs get `tip_arcs / 2` points each.
    pub const fn internal(
        involute: usize,
        root_arc: usize,
        tip_arcs: usize,
        rim_arc: usize,
    ) -> Self {
        Self([involute, root_arc, tip_arcs, rim_arc])
    }

    pub const fn default_for(kind: GearKind) -> Self {
        match kind {
            GearKind::External => Self::EXTERNAL_DEFAULT,
            GearKind::Internal => Self::INTERNAL_DEFAULT,
        }
    }

    pub const fn involute(&self) -> usize {
        self.0[0]
    }
    pub const fn trochoid(&self) -> usize {
        self.0[1]
    }
    pub const fn addendum_arc(&self) -> usize {
        self.0[2]
    }
    pub const fn dedendum_arc(&self) -> usize {
        self.0[3]
    }
    pub const fn root_arc(&self) -> usize {
        self.0[1]
    }
    pub const fn tip_arcs(&self) -> usize {
        self.0[2]
    }
    pub const fn rim_arc(&self) -> usize {
        self.0[3]
    }

    /// Points in each of the two internal tip half-arcs.
    pub fn tip_half_arc(&self) -> usize {
        (self.tip_arcs() / 2).max(2)
    }

    fn validate(&self) -> Result<(), ArgumentError> {
        match self.0.iter().position(|&count| count < 2) {
            Some(slot) => Err(ArgumentError::PointCount {
                slot,
                count: self.0[slot],
            }),
            None => Ok(()),
        }
    }
}

/// Macroscopic gear inputs. Immutable once built.
///
/// # Example
/// ```
/// use gearprofile::params::GearSpecification;
/// let spec = GearSpecification::external(20, 2.0, 20.0).with_profile_shift(0.5);
/// assert_eq!(spec.teeth_count, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearSpecification {
    pub teeth_count: u32,
    pub module: Real,
    pub pressure_angle_deg: Real,
    /// Signed radial tool offset, in length units (not a coefficient).
    pub profile_shift: Real,
    pub undercut_auto_suppress: bool,
    /// Material outside the root circle of an internal gear. Ignored for external gears.
    pub rim_thickness: Real,
    pub point_counts: PointCounts,
}

impl GearSpecification {
    /// External gear with no shift, no suppression and default sampling.
    pub const fn external(teeth_count: u32, module: Real, pressure_angle_deg: Real) -> Self {
        Self {
            teeth_count,
            module,
            pressure_angle_deg,
            profile_shift: 0.0,
            undercut_auto_suppress: false,
            rim_thickness: 0.0,
            point_counts: PointCounts::EXTERNAL_DEFAULT,
        }
    }

    /// Internal gear with no shift, no suppression and default sampling.
    pub const fn internal(
        teeth_count: u32,
        module: Real,
        pressure_angle_deg: Real,
        rim_thickness: Real,
    ) -> Self {
        Self {
            teeth_count,
            module,
            pressure_angle_deg,
            profile_shift: 0.0,
            undercut_auto_suppress: false,
            rim_thickness,
            point_counts: PointCounts::INTERNAL_DEFAULT,
        }
    }

    pub const fn with_profile_shift(mut self, profile_shift: Real) -> Self {
        self.profile_shift = profile_shift;
        self
    }

    pub const fn with_undercut_suppression(mut self, enabled: bool) -> Self {
        self.undercut_auto_suppress = enabled;
        self
    }

    pub const fn with_point_counts(mut self, point_counts: PointCounts) -> Self {
        self.point_counts = point_counts;
        self
    }

    /// Reject bad inputs before any geometry is computed.
    pub fn validate(&self, kind: GearKind) -> Result<(), GearError> {
        if self.teeth_count == 0 {
            return Err(ArgumentError::TeethCount(self.teeth_count).into());
        }
        if !self.module.is_finite() || self.module <= 0.0 {
            return Err(ArgumentError::Module(self.module).into());
        }
        if !self.pressure_angle_deg.is_finite()
            || !(0.0..90.0).contains(&self.pressure_angle_deg)
        {
            return Err(ArgumentError::PressureAngle(self.pressure_angle_deg).into());
        }
        if !self.profile_shift.is_finite() {
            return Err(ArgumentError::ProfileShift(self.profile_shift).into());
        }
        if kind == GearKind::Internal
            && (!self.rim_thickness.is_finite() || self.rim_thickness <= 0.0)
        {
            return Err(ArgumentError::RimThickness(self.rim_thickness).into());
        }
        self.point_counts.validate()?;
        Ok(())
    }
}

/// Radii and angles derived once per generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGearGeometry {
    pub kind: GearKind,
    pub teeth_count: u32,
    pub module: Real,
    pub pressure_angle_deg: Real,
    /// Effective shift, raised by undercut suppression when enabled.
    pub profile_shift: Real,
    pub pitch_radius: Real,
    pub base_radius: Real,
    /// Tip circle. Inside the pitch circle for internal gears.
    pub addendum_radius: Real,
    /// Root circle. Outside the pitch circle for internal gears.
    pub dedendum_radius: Real,
    pub offset_angle: Real,
    pub tooth_angular_half_width: Real,
    /// Rotation that carries the mirrored first flank onto the second flank.
    pub tooth_rotation_angle: Real,
}

impl ResolvedGearGeometry {
    /// Angle between two neighbouring teeth.
    pub fn angular_pitch(&self) -> Real {
        2.0 * self.tooth_angular_half_width
    }

    /// Where the flanks meet the tip circle.
    pub fn addendum_bound(&self) -> FlankBound {
        FlankBound::at_radius(self.base_radius, self.addendum_radius)
    }

    /// Where the flanks meet the root circle.
    pub fn dedendum_bound(&self) -> FlankBound {
        FlankBound::at_radius(self.base_radius, self.dedendum_radius)
    }

    /// An external tooth gets a trochoid root fillet when the base circle reaches
    /// past the root circle.
    pub fn has_undercut_fillet(&self) -> bool {
        self.kind == GearKind::External && self.base_radius > self.dedendum_radius
    }
}

/// Resolve `spec` into radii and angles for a gear of `kind`.
///
/// Fails with [`GearError::InvalidArgument`] on bad inputs and with
/// [`GearError::InvalidGeometry`] when the base circle ends up outside the
/// shifted pitch circle.
pub fn resolve(
    spec: &GearSpecification,
    kind: GearKind,
) -> Result<ResolvedGearGeometry, GearError> {
    spec.validate(kind)?;

    let module = spec.module;
    let teeth = spec.teeth_count as Real;
    let pressure_angle = spec.pressure_angle_deg.to_radians();

    let standard_pitch_radius = module * teeth / 2.0;
    let base_radius = standard_pitch_radius * pressure_angle.cos();

    let profile_shift = if spec.undercut_auto_suppress {
        undercut_free_shift(spec.profile_shift, base_radius, standard_pitch_radius, module)
    } else {
        spec.profile_shift
    };

    let pitch_radius = standard_pitch_radius + profile_shift;
    let (addendum_radius, dedendum_radius) = match kind {
        GearKind::External => (
            pitch_radius + ADDENDUM_COEFFICIENT * module,
            pitch_radius - DEDENDUM_COEFFICIENT * module,
        ),
        GearKind::Internal => (
            pitch_radius - ADDENDUM_COEFFICIENT * module,
            pitch_radius + DEDENDUM_COEFFICIENT * module,
        ),
    };
    let dedendum_radius = dedendum_radius.max(DEDENDUM_FLOOR * module);

    if base_radius > pitch_radius {
        return Err(GearError::InvalidGeometry {
            base_radius,
            pitch_radius,
        });
    }

    let offset_angle = (base_radius / pitch_radius).acos();
    let phi = involute(offset_angle);
    let tooth_angular_half_width = PI / teeth;
    let tooth_rotation_angle = -tooth_angular_half_width - 2.0 * phi;

    debug!(
        ?kind,
        teeth = spec.teeth_count,
        module,
        profile_shift,
        pitch_radius,
        base_radius,
        addendum_radius,
        dedendum_radius,
        "resolved gear geometry"
    );

    Ok(ResolvedGearGeometry {
        kind,
        teeth_count: spec.teeth_count,
        module,
        pressure_angle_deg: spec.pressure_angle_deg,
        profile_shift,
        pitch_radius,
        base_radius,
        addendum_radius,
        dedendum_radius,
        offset_angle,
        tooth_angular_half_width,
        tooth_rotation_angle,
    })
}

/// Smallest shift at or above `requested` that keeps the base circle inside the
/// circle one module below the pitch circle.
///
/// For an external gear that circle is where the generating rack's tip line
/// runs; for an internal gear it is the tooth tip circle. Either way the base
/// circle poking past it is what produces undercut.
fn undercut_free_shift(
    requested: Real,
    base_radius: Real,
    standard_pitch_radius: Real,
    module: Real,
) -> Real {
    let required = base_radius - (standard_pitch_radius - ADDENDUM_COEFFICIENT * module);
    if required > requested {
        debug!(requested, required, "undercut suppression raised profile shift");
        required
    } else {
        requested
    }
}
