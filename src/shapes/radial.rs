use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::{
    render::vertex::Vertex,
    utils::mesh::{MeshData, Topology},
};

use super::{check_dimension, check_mesh_size, check_segments, Palette, ShapeError, Tint};

const CENTER_TEX_COORDS: Vec2 = Vec2::new(0.5, 0.5);

#[derive(Clone, Copy, Debug)]
pub struct CircleSettings {
    pub segments: u32,
    pub radius: f32,
    pub tint: Tint,
}

impl Default for CircleSettings {
    fn default() -> Self {
        Self {
            segments: 30,
            radius: 1.0,
            tint: Tint::default(),
        }
    }
}

/// Filled disc in the XY plane facing +Z, fanned from the center vertex.
pub fn generate_circle(settings: &CircleSettings) -> Result<MeshData, ShapeError> {
    check_segments("circle", settings.segments)?;
    check_dimension("circle radius", settings.radius)?;

    let n = settings.segments;
    let r = settings.radius;
    let (vertex_capacity, index_capacity) =
        check_mesh_size("circle", Some(u64::from(n) + 1), Some(3 * u64::from(n)))?;
    let mut palette = Palette::new(settings.tint);

    let mut vertices = Vec::with_capacity(vertex_capacity);
    vertices.push(Vertex::new(
        Vec3::ZERO,
        palette.next_color(),
        CENTER_TEX_COORDS,
        Vec3::Z,
    ));
    for j in 0..n {
        let (sin, cos) = rim_angle(j, n).sin_cos();
        vertices.push(Vertex::new(
            Vec3::new(r * cos, r * sin, 0.0),
            palette.next_color(),
            disc_tex_coords(cos, sin),
            Vec3::Z,
        ));
    }

    let mut indices = Vec::with_capacity(index_capacity);
    push_fan(&mut indices, 0, 1, n, false);

    MeshData::new(vertices, indices, Topology::Triangles)
}

#[derive(Clone, Copy, Debug)]
pub struct ConeSettings {
    pub segments: u32,
    pub radius: f32,
    /// Half of the apex-to-base distance; the apex sits at `+half_height`.
    pub half_height: f32,
    pub capped: bool,
    pub tint: Tint,
}

impl Default for ConeSettings {
    fn default() -> Self {
        Self {
            segments: 20,
            radius: 1.0,
            half_height: 1.0,
            capped: false,
            tint: Tint::default(),
        }
    }
}

/// Cone along Y with its apex at `+h` and its rim at `-h`. With `capped`, a
/// base center vertex closes the bottom.
pub fn generate_cone(settings: &ConeSettings) -> Result<MeshData, ShapeError> {
    check_segments("cone", settings.segments)?;
    check_dimension("cone radius", settings.radius)?;
    check_dimension("cone half height", settings.half_height)?;

    let n = settings.segments;
    let r = settings.radius;
    let h = settings.half_height;
    let (vertex_capacity, index_capacity) =
        check_mesh_size("cone", Some(u64::from(n) + 2), Some(6 * u64::from(n)))?;
    let mut palette = Palette::new(settings.tint);

    let mut vertices = Vec::with_capacity(vertex_capacity);
    vertices.push(Vertex::new(
        Vec3::new(0.0, h, 0.0),
        palette.next_color(),
        CENTER_TEX_COORDS,
        Vec3::Y,
    ));
    for j in 0..n {
        let (sin, cos) = rim_angle(j, n).sin_cos();
        let slant_normal = Vec3::new(2.0 * h * cos, r, -2.0 * h * sin).normalize();
        vertices.push(Vertex::new(
            ring_point(cos, sin, r, -h),
            palette.next_color(),
            disc_tex_coords(cos, -sin),
            slant_normal,
        ));
    }

    let mut indices = Vec::with_capacity(index_capacity);
    push_fan(&mut indices, 0, 1, n, false);

    if settings.capped {
        let base = vertices.len() as u32;
        vertices.push(Vertex::new(
            Vec3::new(0.0, -h, 0.0),
            palette.next_color(),
            CENTER_TEX_COORDS,
            Vec3::NEG_Y,
        ));
        push_fan(&mut indices, base, 1, n, true);
    }

    MeshData::new(vertices, indices, Topology::Triangles)
}

#[derive(Clone, Copy, Debug)]
pub struct CylinderSettings {
    pub segments: u32,
    pub radius: f32,
    pub half_height: f32,
    pub tint: Tint,
}

impl Default for CylinderSettings {
    fn default() -> Self {
        Self {
            segments: 40,
            radius: 0.8,
            half_height: 1.0,
            tint: Tint::default(),
        }
    }
}

/// Closed cylinder along Y.
///
/// Vertex 0 is the bottom center, `1..=n` the bottom rim, `n+1..=2n` the top
/// rim and `2n+1` the top center. Indices are laid out as bottom cap (`3n`),
/// side wall (`6n`) and top cap (`3n`). Rim vertices are shared between cap and
/// wall, so they carry the radial wall normal.
pub fn generate_cylinder(settings: &CylinderSettings) -> Result<MeshData, ShapeError> {
    check_segments("cylinder", settings.segments)?;
    check_dimension("cylinder radius", settings.radius)?;
    check_dimension("cylinder half height", settings.half_height)?;

    let n = settings.segments;
    let r = settings.radius;
    let h = settings.half_height;
    let (vertex_capacity, index_capacity) =
        check_mesh_size("cylinder", Some(2 * u64::from(n) + 2), Some(12 * u64::from(n)))?;
    let mut palette = Palette::new(settings.tint);

    let mut vertices = Vec::with_capacity(vertex_capacity);
    vertices.push(Vertex::new(
        Vec3::new(0.0, -h, 0.0),
        palette.next_color(),
        CENTER_TEX_COORDS,
        Vec3::NEG_Y,
    ));
    for y in [-h, h] {
        for j in 0..n {
            let (sin, cos) = rim_angle(j, n).sin_cos();
            vertices.push(Vertex::new(
                ring_point(cos, sin, r, y),
                palette.next_color(),
                disc_tex_coords(cos, -sin),
                Vec3::new(cos, 0.0, -sin),
            ));
        }
    }
    vertices.push(Vertex::new(
        Vec3::new(0.0, h, 0.0),
        palette.next_color(),
        CENTER_TEX_COORDS,
        Vec3::Y,
    ));

    let bottom_center = 0;
    let top_center = 2 * n + 1;
    let mut indices = Vec::with_capacity(index_capacity);

    push_fan(&mut indices, bottom_center, 1, n, true);

    for l in 1..n {
        indices.extend_from_slice(&[n + l, l, l + 1]);
        indices.extend_from_slice(&[l + 1, n + l + 1, n + l]);
    }
    // Seam: the last quad joins rim vertex n back to rim vertex 1.
    indices.extend_from_slice(&[2 * n, n, 1]);
    indices.extend_from_slice(&[1, n + 1, 2 * n]);

    push_fan(&mut indices, top_center, n + 1, n, false);

    MeshData::new(vertices, indices, Topology::Triangles)
}

fn rim_angle(j: u32, segments: u32) -> f32 {
    TAU * j as f32 / segments as f32
}

/// Point on a horizontal ring. The angle grows counter-clockwise when seen
/// from +Y.
fn ring_point(cos: f32, sin: f32, radius: f32, y: f32) -> Vec3 {
    Vec3::new(radius * cos, y, -radius * sin)
}

fn disc_tex_coords(cos: f32, sin: f32) -> Vec2 {
    Vec2::new((cos + 1.0) * 0.5, (sin + 1.0) * 0.5)
}

/// Triangle fan from `center` over `segments` rim vertices starting at
/// `first`. The closing triangle reuses `first` instead of indexing past the
/// rim. `reversed` flips the winding.
fn push_fan(indices: &mut Vec<u32>, center: u32, first: u32, segments: u32, reversed: bool) {
    let mut push = |a: u32, b: u32| {
        if reversed {
            indices.extend_from_slice(&[center, b, a]);
        } else {
            indices.extend_from_slice(&[center, a, b]);
        }
    };

    for j in 0..segments - 1 {
        push(first + j, first + j + 1);
    }
    push(first + segments - 1, first);
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::shapes::test_support::{assert_outward, assert_well_formed, face_normal, triangles};

    #[test]
    fn circle_has_center_and_rim() {
        let mesh = generate_circle(&CircleSettings {
            segments: 30,
            ..Default::default()
        })
        .unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 31);
        assert_eq!(mesh.indices().len(), 90);
        assert_eq!(mesh.primitive_count(), 30);

        for j in 0..30 {
            let angle = TAU * j as f32 / 30.0;
            let position = mesh.vertices()[j + 1].position;
            assert_abs_diff_eq!(position.x, angle.cos(), epsilon = 1e-5);
            assert_abs_diff_eq!(position.y, angle.sin(), epsilon = 1e-5);
            assert_abs_diff_eq!(position.z, 0.0);
        }
    }

    #[test]
    fn circle_fan_closes_on_first_rim_vertex() {
        let mesh = generate_circle(&CircleSettings {
            segments: 5,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(&mesh.indices()[..3], &[0, 1, 2]);
        assert_eq!(&mesh.indices()[12..], &[0, 5, 1]);
        assert!(triangles(&mesh).all(|t| face_normal(t).z > 0.0));
    }

    #[test]
    fn cone_fans_from_apex() {
        let mesh = generate_cone(&ConeSettings {
            segments: 8,
            ..Default::default()
        })
        .unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.indices().len(), 24);
        assert_eq!(mesh.vertices()[0].position, Vec3::new(0.0, 1.0, 0.0));
        assert!(mesh.vertices()[1..]
            .iter()
            .all(|v| v.position.y == -1.0));
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn capped_cone_closes_base() {
        let mesh = generate_cone(&ConeSettings {
            segments: 6,
            capped: true,
            ..Default::default()
        })
        .unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.indices().len(), 36);
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn cylinder_regions_have_expected_sizes() {
        let n = 6;
        let mesh = generate_cylinder(&CylinderSettings {
            segments: n,
            ..Default::default()
        })
        .unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 2 * n as usize + 2);
        assert_eq!(mesh.indices().len(), 12 * n as usize);

        let n = n as usize;
        assert!(mesh.indices()[..3 * n].chunks(3).all(|t| t[0] == 0));
        assert!(mesh.indices()[9 * n..]
            .chunks(3)
            .all(|t| t[0] as usize == 2 * n + 1));
    }

    #[test]
    fn cylinder_seam_joins_first_and_last_rim_vertices() {
        let mesh = generate_cylinder(&CylinderSettings {
            segments: 4,
            ..Default::default()
        })
        .unwrap();

        let wall = &mesh.indices()[12..36];
        assert_eq!(&wall[18..], &[8, 4, 1, 1, 5, 8]);

        let mut faces: Vec<[u32; 3]> = wall
            .chunks_exact(3)
            .map(|t| {
                let mut sorted = [t[0], t[1], t[2]];
                sorted.sort_unstable();
                sorted
            })
            .collect();
        faces.sort_unstable();
        faces.dedup();
        assert_eq!(faces.len(), 8);
    }

    #[test]
    fn cylinder_winds_outward() {
        let mesh = generate_cylinder(&CylinderSettings {
            segments: 12,
            ..Default::default()
        })
        .unwrap();

        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn rejects_negative_radius() {
        let err = generate_cylinder(&CylinderSettings {
            radius: -1.0,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, ShapeError::InvalidDimension { .. }));
    }

    #[test]
    fn huge_cylinder_is_rejected_before_allocating() {
        let err = generate_cylinder(&CylinderSettings {
            segments: u32::MAX / 2,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ShapeError::TooManyElements { shape: "cylinder" }
        ));
    }

    #[test]
    fn circle_rim_cannot_exceed_index_range() {
        let err = generate_circle(&CircleSettings {
            segments: u32::MAX,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, ShapeError::TooManyElements { shape: "circle" }));
    }
}
