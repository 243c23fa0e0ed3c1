use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::{
    render::vertex::Vertex,
    utils::mesh::{MeshData, Topology},
};

use super::{check_dimension, check_mesh_size, check_segments, Palette, ShapeError, Tint};

#[derive(Clone, Copy, Debug)]
pub struct SphereSettings {
    pub segments: u32,
    pub radius: f32,
    pub tint: Tint,
}

impl Default for SphereSettings {
    fn default() -> Self {
        Self {
            segments: 20,
            radius: 1.0,
            tint: Tint::default(),
        }
    }
}

/// Latitude/longitude sphere around the Z axis.
///
/// Rings `k = 0..=n` run from the +Z pole to the -Z pole, each holding `n`
/// longitude samples, so vertex `k * n + j` sits at `θ = 2πj/n`, `φ = πk/n`.
/// Both pole rings collapse to a single point.
pub fn generate_sphere(settings: &SphereSettings) -> Result<MeshData, ShapeError> {
    check_segments("sphere", settings.segments)?;
    check_dimension("sphere radius", settings.radius)?;

    let n = settings.segments;
    let r = settings.radius;
    let segments = u64::from(n);
    let (vertex_capacity, index_capacity) = check_mesh_size(
        "sphere",
        segments.checked_mul(segments + 1),
        segments.checked_mul(segments).and_then(|cells| cells.checked_mul(6)),
    )?;
    let mut palette = Palette::new(settings.tint);

    let mut vertices = Vec::with_capacity(vertex_capacity);
    for k in 0..=n {
        let (sin_phi, cos_phi) = (k as f32 * PI / n as f32).sin_cos();
        for j in 0..n {
            let (sin_theta, cos_theta) = (j as f32 * TAU / n as f32).sin_cos();
            let direction = Vec3::new(cos_theta * sin_phi, sin_theta * sin_phi, cos_phi);
            vertices.push(Vertex::new(
                direction * r,
                palette.next_color(),
                Vec2::new((direction.x + 1.0) * 0.5, (direction.y + 1.0) * 0.5),
                direction,
            ));
        }
    }

    let mut indices = Vec::with_capacity(index_capacity);
    for k in 0..n {
        stitch_band(&mut indices, n, k * n, (k + 1) * n);
    }

    MeshData::new(vertices, indices, Topology::Triangles)
}

#[derive(Clone, Copy, Debug)]
pub struct TorusSettings {
    pub tube_segments: u32,
    pub sweep_segments: u32,
    /// Major radius; the tube radius is half of it.
    pub radius: f32,
    /// Stitch the last sweep ring back to the first.
    pub closed: bool,
    pub tint: Tint,
}

impl Default for TorusSettings {
    fn default() -> Self {
        Self {
            tube_segments: 15,
            sweep_segments: 15,
            radius: 0.5,
            closed: true,
            tint: Tint::default(),
        }
    }
}

pub fn generate_torus(settings: &TorusSettings) -> Result<MeshData, ShapeError> {
    build_torus(
        "torus",
        settings.tube_segments,
        settings.sweep_segments,
        settings.radius,
        1,
        settings.closed,
        settings.tint,
    )
}

#[derive(Clone, Copy, Debug)]
pub struct StarTorusSettings {
    pub tube_segments: u32,
    pub sweep_segments: u32,
    pub radius: f32,
    /// Tube samples skipped per step. Must share no factor with
    /// `tube_segments` so every sample is visited once.
    pub points: u32,
    pub closed: bool,
    pub tint: Tint,
}

impl Default for StarTorusSettings {
    fn default() -> Self {
        Self {
            tube_segments: 20,
            sweep_segments: 20,
            radius: 0.5,
            points: 11,
            closed: false,
            tint: Tint::default(),
        }
    }
}

/// Torus whose tube cross-section is traced as a star polygon: consecutive
/// tube samples are `points` steps apart around the tube.
pub fn generate_star_torus(settings: &StarTorusSettings) -> Result<MeshData, ShapeError> {
    if gcd(settings.points, settings.tube_segments) != 1 {
        return Err(ShapeError::StarStepNotCoprime {
            points: settings.points,
            segments: settings.tube_segments,
        });
    }

    build_torus(
        "star torus",
        settings.tube_segments,
        settings.sweep_segments,
        settings.radius,
        settings.points,
        settings.closed,
        settings.tint,
    )
}

fn build_torus(
    shape: &'static str,
    tube_segments: u32,
    sweep_segments: u32,
    radius: f32,
    step: u32,
    closed: bool,
    tint: Tint,
) -> Result<MeshData, ShapeError> {
    check_segments(shape, tube_segments)?;
    check_segments(shape, sweep_segments)?;
    check_dimension("torus radius", radius)?;

    let n = tube_segments;
    let m = sweep_segments;
    let major = radius;
    let minor = radius / 2.0;
    let bands = if closed { m } else { m - 1 };
    let (vertex_capacity, index_capacity) = check_mesh_size(
        shape,
        u64::from(n).checked_mul(u64::from(m)),
        u64::from(n)
            .checked_mul(u64::from(bands))
            .and_then(|cells| cells.checked_mul(6)),
    )?;
    let mut palette = Palette::new(tint);

    let mut vertices = Vec::with_capacity(vertex_capacity);
    for k in 0..m {
        let (sin_beta, cos_beta) = (k as f32 * TAU / m as f32).sin_cos();
        for i in 0..n {
            let sample = (u64::from(i) * u64::from(step) % u64::from(n)) as f32;
            let (sin_alpha, cos_alpha) = (sample * TAU / n as f32).sin_cos();
            let reach = minor * cos_alpha + major;
            vertices.push(Vertex::new(
                Vec3::new(reach * cos_beta, minor * sin_alpha, reach * sin_beta),
                palette.next_color(),
                Vec2::new(i as f32 / n as f32, k as f32 / m as f32),
                Vec3::new(cos_alpha * cos_beta, sin_alpha, cos_alpha * sin_beta),
            ));
        }
    }

    let mut indices = Vec::with_capacity(index_capacity);
    for k in 0..bands {
        let next = (k + 1) % m;
        stitch_band(&mut indices, n, next * n, k * n);
    }

    MeshData::new(vertices, indices, Topology::Triangles)
}

/// Two triangles per cell between two rings of `columns` vertices. The last
/// column closes onto column 0 with its own pair.
fn stitch_band(indices: &mut Vec<u32>, columns: u32, upper: u32, lower: u32) {
    for i in 0..columns - 1 {
        indices.extend_from_slice(&[upper + i, lower + i, lower + i + 1]);
        indices.extend_from_slice(&[upper + i, lower + i + 1, upper + i + 1]);
    }

    let last = columns - 1;
    indices.extend_from_slice(&[upper + last, lower + last, lower]);
    indices.extend_from_slice(&[upper + last, lower, upper]);
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::shapes::test_support::{assert_outward, assert_well_formed, face_normal, triangles};

    #[test]
    fn sphere_grid_sizes() {
        let mesh = generate_sphere(&SphereSettings {
            segments: 4,
            ..Default::default()
        })
        .unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.indices().len(), 6 * 4 * 4);
    }

    #[test]
    fn sphere_poles_collapse_and_rings_stay_distinct() {
        let n = 4;
        let mesh = generate_sphere(&SphereSettings {
            segments: n,
            radius: 2.0,
            ..Default::default()
        })
        .unwrap();
        let ring = |k: usize| &mesh.vertices()[k * n as usize..(k + 1) * n as usize];

        for (k, pole) in [(0, Vec3::new(0.0, 0.0, 2.0)), (4, Vec3::new(0.0, 0.0, -2.0))] {
            for vertex in ring(k) {
                assert_abs_diff_eq!(vertex.position.distance(pole), 0.0, epsilon = 1e-5);
            }
        }

        for k in 1..n as usize {
            let positions: Vec<Vec3> = ring(k).iter().map(|v| v.position).collect();
            for a in 0..positions.len() {
                for b in a + 1..positions.len() {
                    assert!(positions[a].distance(positions[b]) > 1e-3);
                }
            }
        }
    }

    #[test]
    fn sphere_seam_closes_each_band() {
        let mesh = generate_sphere(&SphereSettings {
            segments: 4,
            ..Default::default()
        })
        .unwrap();

        let first_band = &mesh.indices()[..24];
        assert_eq!(&first_band[18..], &[3, 7, 4, 3, 4, 0]);
    }

    #[test]
    fn sphere_winds_outward() {
        let mesh = generate_sphere(&SphereSettings {
            segments: 12,
            ..Default::default()
        })
        .unwrap();

        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn torus_follows_parameterization() {
        let settings = TorusSettings {
            tube_segments: 6,
            sweep_segments: 8,
            radius: 1.0,
            ..Default::default()
        };
        let mesh = generate_torus(&settings).unwrap();

        let (k, i) = (3, 2);
        let alpha = TAU * i as f32 / 6.0;
        let beta = TAU * k as f32 / 8.0;
        let reach = 0.5 * alpha.cos() + 1.0;
        let expected = Vec3::new(reach * beta.cos(), 0.5 * alpha.sin(), reach * beta.sin());
        let position = mesh.vertices()[k * 6 + i].position;
        assert_abs_diff_eq!(position.distance(expected), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn closed_torus_stitches_every_band() {
        let mesh = generate_torus(&TorusSettings {
            tube_segments: 8,
            sweep_segments: 6,
            ..Default::default()
        })
        .unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 48);
        assert_eq!(mesh.indices().len(), 6 * 8 * 6);
    }

    #[test]
    fn closed_torus_winds_away_from_tube_center() {
        let major = 0.5;
        let mesh = generate_torus(&TorusSettings {
            tube_segments: 10,
            sweep_segments: 12,
            radius: major,
            ..Default::default()
        })
        .unwrap();

        for triangle in triangles(&mesh) {
            let centroid = (triangle[0] + triangle[1] + triangle[2]) / 3.0;
            let core = Vec3::new(centroid.x, 0.0, centroid.z).normalize() * major;
            assert!(face_normal(triangle).dot(centroid - core) > 0.0);
        }
    }

    #[test]
    fn open_torus_leaves_sweep_seam() {
        let (n, m) = (5, 7);
        let mesh = generate_torus(&TorusSettings {
            tube_segments: n,
            sweep_segments: m,
            closed: false,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(mesh.indices().len(), (6 * n * (m - 1)) as usize);

        let first_ring = 0..n;
        let last_ring = (m - 1) * n..m * n;
        for t in mesh.indices().chunks_exact(3) {
            let touches_first = t.iter().any(|i| first_ring.contains(i));
            let touches_last = t.iter().any(|i| last_ring.contains(i));
            assert!(!(touches_first && touches_last));
        }
    }

    #[test]
    fn star_torus_visits_every_tube_sample() {
        let mesh = generate_star_torus(&StarTorusSettings::default()).unwrap();

        assert_well_formed(&mesh);
        assert_eq!(mesh.vertex_count(), 400);
        assert_eq!(mesh.indices().len(), 6 * 20 * 19);

        let mut heights: Vec<i32> = mesh.vertices()[..20]
            .iter()
            .map(|v| (v.position.y * 1e4).round() as i32)
            .collect();
        heights.sort_unstable();
        heights.dedup();
        assert!(heights.len() > 10);
    }

    #[test]
    fn star_torus_rejects_shared_factor() {
        let err = generate_star_torus(&StarTorusSettings {
            tube_segments: 20,
            points: 4,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ShapeError::StarStepNotCoprime {
                points: 4,
                segments: 20
            }
        ));
    }

    #[test]
    fn huge_sphere_is_rejected_before_allocating() {
        let err = generate_sphere(&SphereSettings {
            segments: 70_000,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, ShapeError::TooManyElements { shape: "sphere" }));
    }

    #[test]
    fn sphere_index_count_is_bounded_too() {
        // 30 000 segments fit 9e8 vertices but need 5.4e9 indices.
        let err = generate_sphere(&SphereSettings {
            segments: 30_000,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, ShapeError::TooManyElements { shape: "sphere" }));
    }

    #[test]
    fn huge_torus_is_rejected_before_allocating() {
        let err = generate_torus(&TorusSettings {
            tube_segments: 70_000,
            sweep_segments: 70_000,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, ShapeError::TooManyElements { shape: "torus" }));
    }

    #[test]
    fn huge_star_torus_is_rejected_before_allocating() {
        let err = generate_star_torus(&StarTorusSettings {
            tube_segments: 70_001,
            sweep_segments: 70_000,
            points: 2,
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ShapeError::TooManyElements {
                shape: "star torus"
            }
        ));
    }

    #[test]
    fn gcd_of_common_pairs() {
        assert_eq!(gcd(11, 20), 1);
        assert_eq!(gcd(4, 20), 4);
        assert_eq!(gcd(0, 7), 7);
    }
}
