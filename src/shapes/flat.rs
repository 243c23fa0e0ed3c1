use glam::{Vec2, Vec3};

use crate::{
    render::vertex::Vertex,
    utils::mesh::{MeshData, Topology},
};

use super::{check_dimension, ShapeError};

/// Corner colors in top-left, bottom-left, top-right, bottom-right order.
const CORNER_COLORS: [Vec3; 4] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0),
];

const CORNER_TEX_COORDS: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];

/// Two counter-clockwise triangles over a TL, BL, TR, BR quad.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 3, 2];

#[derive(Clone, Copy, Debug)]
pub struct AxesSettings {
    pub length: f32,
}

impl Default for AxesSettings {
    fn default() -> Self {
        Self { length: 10.0 }
    }
}

/// Three colored line segments from the origin along +X, +Y and +Z.
pub fn generate_axes(settings: &AxesSettings) -> Result<MeshData, ShapeError> {
    check_dimension("axis length", settings.length)?;
    let r = settings.length;

    let vertices = vec![
        Vertex::new(Vec3::ZERO, Vec3::ONE, Vec2::new(0.0, 1.0), Vec3::Z),
        Vertex::new(Vec3::X * r, Vec3::X, Vec2::new(0.0, 1.0), Vec3::Z),
        Vertex::new(Vec3::Y * r, Vec3::Y, Vec2::new(0.0, 0.0), Vec3::Z),
        Vertex::new(Vec3::Z * r, Vec3::Z, Vec2::new(1.0, 1.0), Vec3::Z),
    ];

    MeshData::new(vertices, vec![0, 1, 0, 2, 0, 3], Topology::Lines)
}

#[derive(Clone, Copy, Debug)]
pub struct RectangleSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for RectangleSettings {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 2.0,
        }
    }
}

/// Axis-aligned rectangle in the XY plane facing +Z.
pub fn generate_rectangle(settings: &RectangleSettings) -> Result<MeshData, ShapeError> {
    check_dimension("rectangle width", settings.width)?;
    check_dimension("rectangle height", settings.height)?;

    let half = Vec3::new(settings.width / 2.0, settings.height / 2.0, 0.0);
    let mut vertices = Vec::with_capacity(4);
    push_face(&mut vertices, Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, half);

    MeshData::new(vertices, QUAD_INDICES.to_vec(), Topology::Triangles)
}

#[derive(Clone, Copy, Debug)]
pub struct CuboidSettings {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for CuboidSettings {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

/// Face normal and the in-plane right/up axes as seen from outside the box.
const CUBOID_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
];

/// Box centered at the origin. Each face has its own four vertices so it can
/// carry its own normal and texture coordinates.
pub fn generate_cuboid(settings: &CuboidSettings) -> Result<MeshData, ShapeError> {
    check_dimension("cuboid width", settings.width)?;
    check_dimension("cuboid height", settings.height)?;
    check_dimension("cuboid depth", settings.depth)?;

    let half = Vec3::new(settings.width, settings.height, settings.depth) / 2.0;
    let mut vertices = Vec::with_capacity(4 * CUBOID_FACES.len());
    let mut indices = Vec::with_capacity(6 * CUBOID_FACES.len());

    for (normal, right, up) in CUBOID_FACES {
        let base = vertices.len() as u32;
        push_face(&mut vertices, normal, right, up, normal, half);
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    MeshData::new(vertices, indices, Topology::Triangles)
}

fn push_face(
    vertices: &mut Vec<Vertex>,
    offset: Vec3,
    right: Vec3,
    up: Vec3,
    normal: Vec3,
    half: Vec3,
) {
    let corners = [-right + up, -right - up, right + up, right - up];

    for ((corner, color), tex_coords) in corners
        .into_iter()
        .zip(CORNER_COLORS)
        .zip(CORNER_TEX_COORDS)
    {
        vertices.push(Vertex::new(
            (offset + corner) * half,
            color,
            tex_coords,
            normal,
        ));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::shapes::test_support::{assert_outward, assert_well_formed, face_normal, triangles};

    #[test]
    fn rectangle_has_two_positive_triangles() {
        let mesh = generate_rectangle(&RectangleSettings {
            width: 2.0,
            height: 2.0,
        })
        .unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices().len(), 6);
        assert_eq!(mesh.primitive_count(), 2);
        for triangle in triangles(&mesh) {
            let signed_area = face_normal(triangle).z / 2.0;
            assert_relative_eq!(signed_area, 2.0);
        }
    }

    #[test]
    fn rectangle_corners_span_extent() {
        let mesh = generate_rectangle(&RectangleSettings {
            width: 4.0,
            height: 1.0,
        })
        .unwrap();

        assert_eq!(mesh.vertices()[0].position, Vec3::new(-2.0, 0.5, 0.0));
        assert_eq!(mesh.vertices()[3].position, Vec3::new(2.0, -0.5, 0.0));
    }

    #[test]
    fn cuboid_duplicates_vertices_per_face() {
        let mesh = generate_cuboid(&CuboidSettings::default()).unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices().len(), 36);
    }

    #[test]
    fn cuboid_faces_wind_outward_along_their_normal() {
        let mesh = generate_cuboid(&CuboidSettings {
            width: 2.0,
            height: 3.0,
            depth: 4.0,
        })
        .unwrap();

        assert_outward(&mesh, Vec3::ZERO);
        for t in mesh.indices().chunks_exact(3) {
            let normal = mesh.vertices()[t[0] as usize].normal;
            let geometric = face_normal([
                mesh.vertices()[t[0] as usize].position,
                mesh.vertices()[t[1] as usize].position,
                mesh.vertices()[t[2] as usize].position,
            ]);
            assert_relative_eq!(geometric.normalize().dot(normal), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn cuboid_vertices_lie_on_their_face() {
        let mesh = generate_cuboid(&CuboidSettings {
            width: 2.0,
            height: 3.0,
            depth: 4.0,
        })
        .unwrap();
        let half = Vec3::new(1.0, 1.5, 2.0);

        for vertex in mesh.vertices() {
            let extent = (half * vertex.normal).abs().dot(Vec3::ONE);
            assert_relative_eq!(vertex.position.dot(vertex.normal), extent);
            assert!(vertex.position.abs().cmple(half).all());
        }
    }

    #[test]
    fn axes_are_three_line_segments() {
        let mesh = generate_axes(&AxesSettings { length: 2.0 }).unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.topology(), Topology::Lines);
        assert_eq!(mesh.primitive_count(), 3);
        assert_eq!(mesh.vertices()[2].position, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn rejects_flat_cuboid() {
        let err = generate_cuboid(&CuboidSettings {
            depth: 0.0,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ShapeError::InvalidDimension {
                name: "cuboid depth",
                ..
            }
        ));
    }
}
