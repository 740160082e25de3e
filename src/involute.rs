//! Closed-form involute and trochoid equations.
//!
//! Everything here works in the gear's cross-section plane with the origin on the
//! gear axis. Angles are radians.

use crate::float_types::Real;
use nalgebra::{Point2, Rotation2};

/// The involute function `inv(θ) = tan(θ) − θ`.
///
/// Maps the pressure angle at some radius to the polar angle of the involute
/// point sitting on that radius.
#[inline]
pub fn involute(angle: Real) -> Real {
    angle.tan() - angle
}

/// Classic parametric involute of a circle.
///
/// # Parameters
/// - `rb`: base-circle radius
/// - `phi`: roll angle
///
/// x = rb( cosφ + φ·sinφ )
/// y = rb( sinφ – φ·cosφ )
#[inline]
pub fn involute_xy(rb: Real, phi: Real) -> Point2<Real> {
    Point2::new(
        rb * (phi.cos() + phi * phi.sin()),
        rb * (phi.sin() - phi * phi.cos()),
    )
}

/// Root trochoid traced by the corner of the generating tool.
///
/// Same roll as [`involute_xy`], with the tracing point sitting `depth` below the
/// base circle, so `θ = 0` lands on radius `rb − depth`.
#[inline]
pub fn trochoid_xy(rb: Real, depth: Real, theta: Real) -> Point2<Real> {
    let p = involute_xy(rb, theta);
    Point2::new(p.x - depth * theta.cos(), p.y - depth * theta.sin())
}

/// Where a flank meets a boundary circle (tip, root or dedendum circle).
///
/// The involute only exists outside the base circle, so a boundary circle either
/// lies beyond the base circle and the flank reaches it at a definite pressure
/// angle, or lies on/inside the base circle and the flank simply starts on the
/// base circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlankBound {
    /// Base circle intersects the flank below this circle: `acos(rb / r)` is defined.
    BeyondBaseCircle { pressure_angle: Real },
    /// Circle is on or inside the base circle: the flank starts at the base circle.
    OnBaseCircle,
}

impl FlankBound {
    /// Classify the circle of `radius` against the base circle of `base_radius`.
    pub fn at_radius(base_radius: Real, radius: Real) -> Self {
        if base_radius < radius {
            FlankBound::BeyondBaseCircle {
                pressure_angle: (base_radius / radius).acos(),
            }
        } else {
            FlankBound::OnBaseCircle
        }
    }

    /// Pressure angle of the flank at the bound, `0` on the base circle.
    pub const fn pressure_angle(&self) -> Real {
        match *self {
            FlankBound::BeyondBaseCircle { pressure_angle } => pressure_angle,
            FlankBound::OnBaseCircle => 0.0,
        }
    }

    /// Polar angle of the flank point at the bound, `inv(pressure_angle)`.
    pub fn polar_angle(&self) -> Real {
        involute(self.pressure_angle())
    }

    /// Roll angle to feed [`involute_xy`] to land on the bound.
    ///
    /// `α + inv(α)`, which collapses to `tan(α)`.
    pub fn roll_angle(&self) -> Real {
        let alpha = self.pressure_angle();
        alpha + involute(alpha)
    }
}

/// Rotate `p` about the gear axis.
#[inline]
pub fn rotate(p: &Point2<Real>, angle: Real) -> Point2<Real> {
    Rotation2::new(angle) * *p
}

/// Reflect `p` across the x axis.
#[inline]
pub fn mirror_x_axis(p: &Point2<Real>) -> Point2<Real> {
    Point2::new(p.x, -p.y)
}

/// Point on the circle of `radius` at polar `angle`.
#[inline]
pub fn polar(radius: Real, angle: Real) -> Point2<Real> {
    Point2::new(radius * angle.cos(), radius * angle.sin())
}

/// `count` values spread uniformly over `[start, end]`, both ends included.
///
/// Callers validate `count >= 2`; a single sample lands on `start`.
pub fn linspace(start: Real, end: Real, count: usize) -> impl Iterator<Item = Real> {
    let last = count.saturating_sub(1).max(1) as Real;
    (0..count).map(move |i| {
        let t = i as Real / last;
        start + t * (end - start)
    })
}
