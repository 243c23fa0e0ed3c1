//! Procedural shape generators.
//!
//! Every generator validates its settings, fills a vertex array in the
//! [`Vertex`] layout, builds the index list for its topology and returns an
//! immutable [`MeshData`]. Upload to the GPU happens separately through
//! [`crate::render::mesh::Mesh::new`].

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::utils::mesh::{MeshData, Topology};

pub mod flat;
pub mod polynomial;
pub mod radial;
pub mod surface;

pub use flat::{
    generate_axes, generate_cuboid, generate_rectangle, AxesSettings, CuboidSettings,
    RectangleSettings,
};
pub use polynomial::{generate_polynomial, PolynomialSettings};
pub use radial::{
    generate_circle, generate_cone, generate_cylinder, CircleSettings, ConeSettings,
    CylinderSettings,
};
pub use surface::{
    generate_sphere, generate_star_torus, generate_torus, SphereSettings, StarTorusSettings,
    TorusSettings,
};

/// Smallest resolution that still closes a ring or a fan.
pub const MIN_RING_SEGMENTS: u32 = 3;

/// Largest vertex or index count a `u32` index buffer can address.
pub const MAX_ELEMENTS: u64 = u32::MAX as u64;

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("{shape} needs at least {min} segments, got {segments}")]
    TooFewSegments {
        shape: &'static str,
        segments: u32,
        min: u32,
    },
    #[error("{name} must be finite and greater than zero, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    #[error("sample range [{low}, {high}] is empty or not finite")]
    InvalidRange { low: f32, high: f32 },
    #[error("star torus step {points} shares a factor with {segments} tube segments")]
    StarStepNotCoprime { points: u32, segments: u32 },
    #[error("{shape} at this resolution needs more vertices or indices than a u32 index can address")]
    TooManyElements { shape: &'static str },
    #[error("no part of [{low}, {high}] lies inside the curve's domain")]
    EmptyDomain { low: f32, high: f32 },
    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("{element_count} elements do not form whole {topology:?} primitives")]
    IncompletePrimitive {
        element_count: usize,
        topology: Topology,
    },
}

/// Per-vertex debug coloring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tint {
    Solid(Vec3),
    /// Uniform random colors from a seeded stream, reproducible per seed.
    Random { seed: u64 },
}

impl Default for Tint {
    fn default() -> Self {
        Tint::Random { seed: 0 }
    }
}

pub(crate) struct Palette {
    tint: Tint,
    rng: Pcg32,
}

impl Palette {
    pub(crate) fn new(tint: Tint) -> Palette {
        let seed = match tint {
            Tint::Random { seed } => seed,
            Tint::Solid(_) => 0,
        };

        Palette {
            tint,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub(crate) fn next_color(&mut self) -> Vec3 {
        match self.tint {
            Tint::Solid(color) => color,
            Tint::Random { .. } => Vec3::new(
                self.rng.random::<f32>(),
                self.rng.random::<f32>(),
                self.rng.random::<f32>(),
            ),
        }
    }
}

pub(crate) fn check_segments(shape: &'static str, segments: u32) -> Result<(), ShapeError> {
    if segments < MIN_RING_SEGMENTS {
        return Err(ShapeError::TooFewSegments {
            shape,
            segments,
            min: MIN_RING_SEGMENTS,
        });
    }

    Ok(())
}

/// Checks the vertex and index counts a generator is about to emit and
/// returns them as capacities. `None` stands for a count that overflowed
/// while being computed.
pub(crate) fn check_mesh_size(
    shape: &'static str,
    vertices: Option<u64>,
    indices: Option<u64>,
) -> Result<(usize, usize), ShapeError> {
    match (vertices, indices) {
        (Some(vertices), Some(indices)) if vertices <= MAX_ELEMENTS && indices <= MAX_ELEMENTS => {
            Ok((vertices as usize, indices as usize))
        }
        _ => Err(ShapeError::TooManyElements { shape }),
    }
}

pub(crate) fn check_dimension(name: &'static str, value: f32) -> Result<(), ShapeError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ShapeError::InvalidDimension { name, value });
    }

    Ok(())
}

/// One shape choice together with its parameters.
#[derive(Clone, Debug)]
pub enum ShapeKind {
    Axes(AxesSettings),
    Rectangle(RectangleSettings),
    Cuboid(CuboidSettings),
    Circle(CircleSettings),
    Cone(ConeSettings),
    Cylinder(CylinderSettings),
    Sphere(SphereSettings),
    Torus(TorusSettings),
    StarTorus(StarTorusSettings),
    Polynomial(PolynomialSettings),
}

impl ShapeKind {
    pub fn generate(&self) -> Result<MeshData, ShapeError> {
        match self {
            ShapeKind::Axes(settings) => generate_axes(settings),
            ShapeKind::Rectangle(settings) => generate_rectangle(settings),
            ShapeKind::Cuboid(settings) => generate_cuboid(settings),
            ShapeKind::Circle(settings) => generate_circle(settings),
            ShapeKind::Cone(settings) => generate_cone(settings),
            ShapeKind::Cylinder(settings) => generate_cylinder(settings),
            ShapeKind::Sphere(settings) => generate_sphere(settings),
            ShapeKind::Torus(settings) => generate_torus(settings),
            ShapeKind::StarTorus(settings) => generate_star_torus(settings),
            ShapeKind::Polynomial(settings) => generate_polynomial(settings),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Axes(_) => "axes",
            ShapeKind::Rectangle(_) => "rectangle",
            ShapeKind::Cuboid(_) => "cuboid",
            ShapeKind::Circle(_) => "circle",
            ShapeKind::Cone(_) => "cone",
            ShapeKind::Cylinder(_) => "cylinder",
            ShapeKind::Sphere(_) => "sphere",
            ShapeKind::Torus(_) => "torus",
            ShapeKind::StarTorus(_) => "star torus",
            ShapeKind::Polynomial(_) => "polynomial",
        }
    }
}
