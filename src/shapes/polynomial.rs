use glam::{Vec2, Vec3};

use crate::{
    render::vertex::Vertex,
    utils::mesh::{MeshData, Topology},
};

use super::{check_mesh_size, ShapeError};

/// Stored `y` of a sample that lands on the pole of `r/x` or `s/x²`.
pub const POLE_SENTINEL: f32 = f32::MAX;

const POLE_EPSILON: f32 = 1e-5;
const CURVE_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Coefficients of `y = a x⁴ + b x³ + c x² + d x + e + r/x + s/x²`.
#[derive(Clone, Copy, Debug)]
pub struct PolynomialSettings {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub r: f32,
    pub s: f32,
    pub low: f32,
    pub high: f32,
    pub samples: u32,
    /// Plot `y² = f(x)` instead, keeping the non-negative root.
    pub y_squared: bool,
    pub scale: f32,
}

impl Default for PolynomialSettings {
    fn default() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 0.0,
            r: 1.0,
            s: 0.0,
            low: -10.0,
            high: 10.0,
            samples: 100,
            y_squared: false,
            scale: 0.15,
        }
    }
}

/// Outcome of evaluating the curve at one `x`.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Sample {
    Value(f32),
    /// `x` sits on the pole of `r/x` or `s/x²`.
    Pole,
    /// `f(x) < 0` in `y²` mode, so the curve has no point here.
    OutsideDomain,
}

impl PolynomialSettings {
    fn has_pole(&self) -> bool {
        self.r != 0.0 || self.s != 0.0
    }

    fn evaluate(&self, x: f32) -> Sample {
        if self.has_pole() && x.abs() <= POLE_EPSILON {
            return Sample::Pole;
        }

        let mut y = (((self.a * x + self.b) * x + self.c) * x + self.d) * x + self.e;
        if self.r != 0.0 {
            y += self.r / x;
        }
        if self.s != 0.0 {
            y += self.s / (x * x);
        }

        if self.y_squared {
            if y < 0.0 {
                return Sample::OutsideDomain;
            }
            y = y.sqrt();
        }

        Sample::Value(y)
    }
}

/// Polyline through `samples` evenly spaced points in `[low, high]`, drawn as
/// independent line segments in the XY plane.
///
/// In `y²` mode, samples where `f(x) < 0` emit no vertex, and the curve
/// breaks there instead of bridging the gap.
pub fn generate_polynomial(settings: &PolynomialSettings) -> Result<MeshData, ShapeError> {
    if settings.samples < 2 {
        return Err(ShapeError::TooFewSegments {
            shape: "polynomial",
            segments: settings.samples,
            min: 2,
        });
    }
    if !settings.low.is_finite() || !settings.high.is_finite() || settings.low >= settings.high {
        return Err(ShapeError::InvalidRange {
            low: settings.low,
            high: settings.high,
        });
    }
    if !settings.scale.is_finite() || settings.scale <= 0.0 {
        return Err(ShapeError::InvalidDimension {
            name: "polynomial scale",
            value: settings.scale,
        });
    }

    let n = settings.samples;
    let span = settings.high - settings.low;
    let last = (n - 1) as f32;
    let (vertex_capacity, index_capacity) = check_mesh_size(
        "polynomial",
        Some(u64::from(n)),
        Some(2 * (u64::from(n) - 1)),
    )?;

    let mut vertices = Vec::with_capacity(vertex_capacity);
    let mut indices = Vec::with_capacity(index_capacity);
    // Vertex of the previous sample while the curve is unbroken.
    let mut previous: Option<u32> = None;

    for i in 0..n {
        let x = settings.low + span * i as f32 / last;
        let y = match settings.evaluate(x) {
            Sample::Value(y) => settings.scale * y,
            Sample::Pole => POLE_SENTINEL,
            Sample::OutsideDomain => {
                previous = None;
                continue;
            }
        };

        let index = vertices.len() as u32;
        vertices.push(Vertex::new(
            Vec3::new(settings.scale * x, y, 0.0),
            CURVE_COLOR,
            Vec2::new(0.0, 1.0),
            Vec3::Z,
        ));
        if let Some(previous) = previous {
            indices.extend_from_slice(&[previous, index]);
        }
        previous = Some(index);
    }

    if indices.is_empty() {
        return Err(ShapeError::EmptyDomain {
            low: settings.low,
            high: settings.high,
        });
    }

    MeshData::new(vertices, indices, Topology::Lines)
}
