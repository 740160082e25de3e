//! Generation errors

use crate::float_types::Real;

/// Everything that can stop a tooth profile from being generated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GearError {
    /// (InvalidGeometry) The base circle ends up outside the (shifted) pitch circle.
    ///
    /// The combination of pressure angle, module, tooth count and profile shift
    /// cannot produce a physical tooth. This is never clamped away.
    #[error(
        "(InvalidGeometry) base radius exceeds pitch radius: base {base_radius} > pitch {pitch_radius}"
    )]
    InvalidGeometry {
        base_radius: Real,
        pitch_radius: Real,
    },
    /// (InvalidArgument) An input was rejected before any geometry was computed.
    #[error("(InvalidArgument) {0}")]
    InvalidArgument(#[from] ArgumentError),
}

/// The input that failed validation, with the offending value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    #[error("teeth count must be at least 1, got {0}")]
    TeethCount(u32),
    #[error("module must be finite and positive, got {0}")]
    Module(Real),
    #[error("pressure angle must be finite and within [0°, 90°), got {0}°")]
    PressureAngle(Real),
    #[error("profile shift must be finite, got {0}")]
    ProfileShift(Real),
    #[error("rim thickness must be finite and positive, got {0}")]
    RimThickness(Real),
    #[error("point count slot {slot} must be at least 2, got {count}")]
    PointCount { slot: usize, count: usize },
}

impl GearError {
    /// `true` for [`GearError::InvalidGeometry`].
    pub const fn is_invalid_geometry(&self) -> bool {
        matches!(self, GearError::InvalidGeometry { .. })
    }

    /// `true` for [`GearError::InvalidArgument`].
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, GearError::InvalidArgument(_))
    }
}
