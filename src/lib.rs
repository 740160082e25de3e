//! Involute **tooth profiles** for spur (external) and ring (internal) gears.
//!
//! From a handful of gear parameters (tooth count, module, pressure angle,
//! profile shift, optional undercut suppression and, for ring gears, rim
//! thickness) the crate computes the boundary of one tooth as ordered 2D point
//! sequences: involute flanks, trochoid root fillets, tip and root arcs. The
//! result is a pure function of the inputs; nothing is cached or shared.
//!
//! ```
//! use gearprofile::{GearSpecification, generate_external_tooth_profile};
//!
//! let spec = GearSpecification::external(20, 2.0, 20.0);
//! let tooth = generate_external_tooth_profile(&spec)?;
//! assert_eq!(tooth.geometry.pitch_radius, 20.0);
//! # Ok::<(), gearprofile::GearError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **svg-io**: render a tooth profile to SVG
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod involute;
pub mod io;
pub mod outline;
pub mod params;
pub mod profile;
pub mod segments;
pub mod sketch;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{ArgumentError, GearError};
pub use params::{GearKind, GearSpecification, PointCounts, ResolvedGearGeometry, resolve};
pub use profile::{
    ExternalToothProfile, InternalToothProfile, SegmentRole, ToothProfile,
    generate_external_tooth_profile, generate_internal_tooth_profile, generate_tooth_profile,
};
pub use segments::CurveSegment;
