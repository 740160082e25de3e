//! Drawing a tooth profile onto a host sketch.
//!
//! The engine never draws by itself. A host (a CAD document, an SVG writer, a
//! test recorder) implements [`SketchSurface`] and [`draw_tooth_profile`] feeds
//! it lines, centre/start/end arcs and splines in a fixed order.

use crate::float_types::{Real, tolerance};
use crate::params::ResolvedGearGeometry;
use crate::profile::{ClosingLine, ExternalToothProfile, InternalToothProfile, ToothProfile};
use crate::segments::CurveSegment;
use nalgebra::Point2;
use std::convert::Infallible;
use tracing::warn;

/// Value recorded against a named parameter of the drawn feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Distance(Real),
    Count(u32),
}

/// The host's drawing primitives.
pub trait SketchSurface {
    type Handle;
    type Error: std::error::Error;

    fn add_line(
        &mut self,
        start: Point2<Real>,
        end: Point2<Real>,
    ) -> Result<Self::Handle, Self::Error>;

    /// Circular arc about `center`, running counter-clockwise from `start` to `end`.
    fn add_arc_center_start_end(
        &mut self,
        center: Point2<Real>,
        start: Point2<Real>,
        end: Point2<Real>,
    ) -> Result<Self::Handle, Self::Error>;

    /// Spline through `[x0, y0, x1, y1, ...]`.
    fn add_bspline(&mut self, flattened_xy: &[Real]) -> Result<Self::Handle, Self::Error>;

    fn add_parameter(&mut self, name: &str, value: ParameterValue) -> Result<(), Self::Error>;
}

/// Handles of everything drawn for one tooth, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnTooth<H> {
    pub handles: Vec<H>,
    pub geometry: ResolvedGearGeometry,
}

/// Draw one tooth, following the contour walk so every piece starts where the
/// previous one ended.
///
/// External: centre line, `trochoid_1`, `involute_1`, tip arc, `involute_2`,
/// `trochoid_2`, root arc, return line. Empty trochoids are skipped.
///
/// Internal: `involute_1`, root arc, `involute_2`, first tip half-arc, line out
/// to the rim, rim arc, line back in, second tip half-arc.
pub fn draw_tooth_profile<S: SketchSurface>(
    surface: &mut S,
    profile: &ToothProfile,
) -> Result<DrawnTooth<S::Handle>, S::Error> {
    match profile {
        ToothProfile::External(tooth) => draw_external_tooth(surface, tooth),
        ToothProfile::Internal(tooth) => draw_internal_tooth(surface, tooth),
    }
}

pub fn draw_external_tooth<S: SketchSurface>(
    surface: &mut S,
    tooth: &ExternalToothProfile,
) -> Result<DrawnTooth<S::Handle>, S::Error> {
    let [to_contour, to_centre] = tooth.closing_lines();
    let mut pen = Pen::new(surface, tooth.geometry.module);

    pen.line(&to_contour)?;
    pen.spline(&tooth.trochoid_1)?;
    pen.spline(&tooth.involute_1)?;
    pen.arc(&tooth.upper_arc)?;
    pen.spline(&tooth.involute_2)?;
    pen.spline(&tooth.trochoid_2)?;
    pen.arc(&tooth.lower_arc)?;
    pen.line(&to_centre)?;

    Ok(DrawnTooth {
        handles: pen.handles,
        geometry: tooth.geometry,
    })
}

pub fn draw_internal_tooth<S: SketchSurface>(
    surface: &mut S,
    tooth: &InternalToothProfile,
) -> Result<DrawnTooth<S::Handle>, S::Error> {
    let [out_to_rim, back_from_rim] = tooth.closing_lines();
    let mut pen = Pen::new(surface, tooth.geometry.module);

    pen.spline(&tooth.involute_1)?;
    pen.arc(&tooth.upper_arc)?;
    pen.spline(&tooth.involute_2)?;
    pen.arc(&tooth.lower_arc_1)?;
    pen.line(&out_to_rim)?;
    pen.arc(&tooth.external_arc)?;
    pen.line(&back_from_rim)?;
    pen.arc(&tooth.lower_arc_2)?;

    Ok(DrawnTooth {
        handles: pen.handles,
        geometry: tooth.geometry,
    })
}

/// Record `<name>_pitch_radius` and `<name>_z` on the surface.
pub fn attach_gear_parameters<S: SketchSurface>(
    surface: &mut S,
    name: &str,
    geometry: &ResolvedGearGeometry,
) -> Result<(), S::Error> {
    surface.add_parameter(
        &format!("{name}_pitch_radius"),
        ParameterValue::Distance(geometry.pitch_radius),
    )?;
    surface.add_parameter(
        &format!("{name}_z"),
        ParameterValue::Count(geometry.teeth_count),
    )
}

/// Endpoints of a sampled arc about the origin, ordered counter-clockwise.
pub fn ccw_endpoints(arc: &CurveSegment) -> Option<(Point2<Real>, Point2<Real>)> {
    let first = *arc.first()?;
    let last = *arc.last()?;
    let second = arc.points.get(1).copied().unwrap_or(last);
    // z of first × second: positive when the samples turn counter-clockwise
    let turn = first.x * second.y - first.y * second.x;
    Some(if turn >= 0.0 { (first, last) } else { (last, first) })
}

/// Wraps a surface, collecting handles and checking that consecutive pieces of
/// a flank walk meet.
struct Pen<'s, S: SketchSurface> {
    surface: &'s mut S,
    handles: Vec<S::Handle>,
    cursor: Option<Point2<Real>>,
    eps: Real,
}

impl<'s, S: SketchSurface> Pen<'s, S> {
    fn new(surface: &'s mut S, module: Real) -> Self {
        Self {
            surface,
            handles: Vec::new(),
            cursor: None,
            eps: tolerance() * module,
        }
    }

    /// Bridge a gap between the previous piece and `start` if there is one.
    fn join(&mut self, start: Point2<Real>) -> Result<(), S::Error> {
        if let Some(cursor) = self.cursor {
            let gap = (start - cursor).norm();
            if gap > self.eps {
                warn!(gap, "tooth profile pieces do not meet, bridging with a line");
                let handle = self.surface.add_line(cursor, start)?;
                self.handles.push(handle);
            }
        }
        Ok(())
    }

    fn line(&mut self, line: &ClosingLine) -> Result<(), S::Error> {
        self.join(line.start)?;
        let handle = self.surface.add_line(line.start, line.end)?;
        self.handles.push(handle);
        self.cursor = Some(line.end);
        Ok(())
    }

    fn spline(&mut self, segment: &CurveSegment) -> Result<(), S::Error> {
        let (Some(&start), Some(&end)) = (segment.first(), segment.last()) else {
            return Ok(());
        };
        self.join(start)?;
        let handle = self.surface.add_bspline(&segment.flattened_xy())?;
        self.handles.push(handle);
        self.cursor = Some(end);
        Ok(())
    }

    /// Arcs are handed over counter-clockwise; the cursor follows the walk order.
    fn arc(&mut self, segment: &CurveSegment) -> Result<(), S::Error> {
        let Some((ccw_start, ccw_end)) = ccw_endpoints(segment) else {
            return Ok(());
        };
        let (Some(&start), Some(&end)) = (segment.first(), segment.last()) else {
            return Ok(());
        };
        self.join(start)?;
        let handle = self
            .surface
            .add_arc_center_start_end(Point2::origin(), ccw_start, ccw_end)?;
        self.handles.push(handle);
        self.cursor = Some(end);
        Ok(())
    }
}

/// A primitive captured by [`RecordingSketch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        start: Point2<Real>,
        end: Point2<Real>,
    },
    Arc {
        center: Point2<Real>,
        start: Point2<Real>,
        end: Point2<Real>,
    },
    Spline {
        points: Vec<Point2<Real>>,
    },
}

/// In-memory [`SketchSurface`] that keeps every primitive and parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSketch {
    pub primitives: Vec<Primitive>,
    pub parameters: Vec<(String, ParameterValue)>,
}

impl RecordingSketch {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, primitive: Primitive) -> usize {
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }
}

impl SketchSurface for RecordingSketch {
    type Handle = usize;
    type Error = Infallible;

    fn add_line(&mut self, start: Point2<Real>, end: Point2<Real>) -> Result<usize, Infallible> {
        Ok(self.record(Primitive::Line { start, end }))
    }

    fn add_arc_center_start_end(
        &mut self,
        center: Point2<Real>,
        start: Point2<Real>,
        end: Point2<Real>,
    ) -> Result<usize, Infallible> {
        Ok(self.record(Primitive::Arc { center, start, end }))
    }

    fn add_bspline(&mut self, flattened_xy: &[Real]) -> Result<usize, Infallible> {
        let points = flattened_xy
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect();
        Ok(self.record(Primitive::Spline { points }))
    }

    fn add_parameter(&mut self, name: &str, value: ParameterValue) -> Result<(), Infallible> {
        self.parameters.push((name.to_owned(), value));
        Ok(())
    }
}
