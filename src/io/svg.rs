//! SVG output: an [`SketchSurface`] that turns drawing primitives into SVG paths.

use crate::float_types::{Real, TAU};
use crate::io::IoError;
use crate::profile::ToothProfile;
use crate::sketch::{ParameterValue, SketchSurface, attach_gear_parameters, draw_tooth_profile};
use ::svg::Document;
use ::svg::node::element::{Group, Path};
use nalgebra::Point2;
use std::convert::Infallible;
use std::fmt::Write as _;

/// Render a value into SVG.
pub trait ToSVG {
    fn to_svg(&self) -> String;
}

/// Collects primitives as SVG `<path>` elements in gear coordinates (y up).
#[derive(Debug, Clone)]
pub struct SvgSketch {
    paths: Vec<Path>,
    parameters: Vec<(String, ParameterValue)>,
    bounds: Option<(Point2<Real>, Point2<Real>)>,
    stroke_width: Real,
}

impl Default for SvgSketch {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgSketch {
    pub const fn new() -> Self {
        Self {
            paths: Vec::new(),
            parameters: Vec::new(),
            bounds: None,
            stroke_width: 0.05,
        }
    }

    /// Line width in drawing units.
    pub fn with_stroke_width(mut self, stroke_width: Real) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn include(&mut self, p: Point2<Real>) {
        self.bounds = Some(match self.bounds {
            None => (p, p),
            Some((min, max)) => (
                Point2::new(min.x.min(p.x), min.y.min(p.y)),
                Point2::new(max.x.max(p.x), max.y.max(p.y)),
            ),
        });
    }

    fn push(&mut self, d: String) -> usize {
        self.paths.push(Path::new().set("d", d));
        self.paths.len() - 1
    }

    /// The finished document. The view box hugs the drawing with a small margin;
    /// parameters become `data-*` attributes on the root element.
    pub fn to_document(&self) -> Document {
        let (min, max) = self
            .bounds
            .unwrap_or((Point2::origin(), Point2::new(1.0, 1.0)));
        let width = (max.x - min.x).max(self.stroke_width);
        let height = (max.y - min.y).max(self.stroke_width);
        let pad = 0.05 * width.max(height);

        // y is flipped by the group transform, so the box is mirrored too
        let view_box = format!(
            "{} {} {} {}",
            min.x - pad,
            -(max.y + pad),
            width + 2.0 * pad,
            height + 2.0 * pad
        );

        let mut group = Group::new()
            .set("transform", "scale(1,-1)")
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", self.stroke_width.to_string());
        for path in &self.paths {
            group = group.add(path.clone());
        }

        let mut document = Document::new().set("viewBox", view_box);
        for (name, value) in &self.parameters {
            let value = match value {
                ParameterValue::Distance(distance) => distance.to_string(),
                ParameterValue::Count(count) => count.to_string(),
            };
            document = document.set(format!("data-{name}"), value);
        }
        document.add(group)
    }

    /// Write the document to `path`.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), IoError> {
        std::fs::write(path, self.to_document().to_string())?;
        Ok(())
    }
}

impl SketchSurface for SvgSketch {
    type Handle = usize;
    type Error = Infallible;

    fn add_line(&mut self, start: Point2<Real>, end: Point2<Real>) -> Result<usize, Infallible> {
        self.include(start);
        self.include(end);
        Ok(self.push(format!("M {} {} L {} {}", start.x, start.y, end.x, end.y)))
    }

    fn add_arc_center_start_end(
        &mut self,
        center: Point2<Real>,
        start: Point2<Real>,
        end: Point2<Real>,
    ) -> Result<usize, Infallible> {
        let radius = (start - center).norm();
        let a0 = (start.y - center.y).atan2(start.x - center.x);
        let a1 = (end.y - center.y).atan2(end.x - center.x);
        let sweep = (a1 - a0).rem_euclid(TAU);
        let large_arc = u8::from(sweep > TAU / 2.0);

        let mid = a0 + sweep / 2.0;
        self.include(start);
        self.include(end);
        self.include(Point2::new(
            center.x + radius * mid.cos(),
            center.y + radius * mid.sin(),
        ));

        // sweep-flag 1: positive angle direction, counter-clockwise with y up
        Ok(self.push(format!(
            "M {} {} A {radius} {radius} 0 {large_arc} 1 {} {}",
            start.x, start.y, end.x, end.y
        )))
    }

    fn add_bspline(&mut self, flattened_xy: &[Real]) -> Result<usize, Infallible> {
        let mut d = String::new();
        for (i, xy) in flattened_xy.chunks_exact(2).enumerate() {
            self.include(Point2::new(xy[0], xy[1]));
            let command = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{command} {} {} ", xy[0], xy[1]);
        }
        Ok(self.push(d.trim_end().to_owned()))
    }

    fn add_parameter(&mut self, name: &str, value: ParameterValue) -> Result<(), Infallible> {
        self.parameters.push((name.to_owned(), value));
        Ok(())
    }
}

/// Draw `profile` on a fresh sketch and attach the `<name>_pitch_radius` /
/// `<name>_z` parameters.
pub fn profile_sketch(profile: &ToothProfile, name: &str) -> SvgSketch {
    let mut sketch = SvgSketch::new().with_stroke_width(profile.geometry().module / 40.0);
    let Ok(drawn) = draw_tooth_profile(&mut sketch, profile);
    let Ok(()) = attach_gear_parameters(&mut sketch, name, &drawn.geometry);
    sketch
}

impl ToSVG for ToothProfile {
    fn to_svg(&self) -> String {
        profile_sketch(self, "gear").to_document().to_string()
    }
}

/// Write `profile` to an `.svg` file; the parameters are named after the file stem.
pub fn write_svg<P: AsRef<std::path::Path>>(profile: &ToothProfile, path: P) -> Result<(), IoError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| IoError::MalformedPath(path.display().to_string()))?;
    profile_sketch(profile, name).save(path)
}
