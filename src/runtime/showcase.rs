use glam::Vec3;
use log::info;
use wgpu::Device;

use crate::{
    render::{
        mesh::Mesh,
        mesh_renderer::{Material, MeshRenderer, Placement},
    },
    shapes::{
        AxesSettings, CircleSettings, ConeSettings, CylinderSettings, PolynomialSettings,
        ShapeError, ShapeKind, SphereSettings, StarTorusSettings, Tint, TorusSettings,
    },
    utils::mesh::MeshData,
};

use super::app::AppError;

const SPIN_AXIS: Vec3 = Vec3::new(1.0, 1.0, 0.0);
const SPIN_SPEED: f32 = 0.6;
const CYLINDER_COLOR: Vec3 = Vec3::new(0.85, 0.55, 0.25);

#[derive(Clone, Debug)]
pub struct ShowcaseEntry {
    pub kind: ShapeKind,
    pub placement: Placement,
    /// Lines are drawn unlit and untextured.
    pub material: Material,
}

impl ShowcaseEntry {
    pub fn new(kind: ShapeKind, placement: Placement) -> ShowcaseEntry {
        ShowcaseEntry {
            kind,
            placement,
            material: Material::default(),
        }
    }

    pub fn unlit(self) -> ShowcaseEntry {
        ShowcaseEntry {
            material: Material::UNLIT,
            ..self
        }
    }

    pub fn textured(self, texture_weight: f32, texture_mix: f32) -> ShowcaseEntry {
        ShowcaseEntry {
            material: self.material.textured(texture_weight, texture_mix),
            ..self
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShowcaseSettings {
    pub entries: Vec<ShowcaseEntry>,
}

impl Default for ShowcaseSettings {
    fn default() -> Self {
        let spinning = |x: f32, y: f32| {
            Placement::at(Vec3::new(x, y, 0.0)).spinning(SPIN_AXIS, SPIN_SPEED)
        };

        let entries = vec![
            ShowcaseEntry::new(
                ShapeKind::Rectangle(Default::default()),
                Placement::at(Vec3::new(-6.0, 3.0, 0.0)),
            ),
            ShowcaseEntry::new(ShapeKind::Cuboid(Default::default()), spinning(-2.0, 3.0))
                .textured(0.8, 0.0),
            ShowcaseEntry::new(
                ShapeKind::Circle(CircleSettings {
                    segments: 30,
                    ..Default::default()
                }),
                Placement::at(Vec3::new(2.0, 3.0, 0.0)),
            ),
            ShowcaseEntry::new(
                ShapeKind::Cone(ConeSettings {
                    segments: 20,
                    capped: true,
                    ..Default::default()
                }),
                spinning(6.0, 3.0),
            ),
            ShowcaseEntry::new(
                ShapeKind::Cylinder(CylinderSettings {
                    segments: 40,
                    tint: Tint::Solid(CYLINDER_COLOR),
                    ..Default::default()
                }),
                spinning(-6.0, 0.0),
            ),
            ShowcaseEntry::new(
                ShapeKind::Sphere(SphereSettings {
                    segments: 20,
                    ..Default::default()
                }),
                spinning(-2.0, 0.0),
            )
            .textured(1.0, 0.5),
            ShowcaseEntry::new(
                ShapeKind::Torus(TorusSettings {
                    tube_segments: 15,
                    sweep_segments: 15,
                    radius: 1.0,
                    ..Default::default()
                }),
                spinning(2.0, 0.0),
            ),
            ShowcaseEntry::new(
                ShapeKind::StarTorus(StarTorusSettings {
                    tube_segments: 20,
                    sweep_segments: 20,
                    radius: 1.0,
                    ..Default::default()
                }),
                spinning(6.0, 0.0),
            ),
            ShowcaseEntry::new(
                ShapeKind::Polynomial(PolynomialSettings::default()),
                Placement::at(Vec3::new(-3.0, -4.0, 0.0)),
            )
            .unlit(),
            ShowcaseEntry::new(
                ShapeKind::Polynomial(PolynomialSettings {
                    b: 1.0,
                    e: 7.0,
                    r: 0.0,
                    low: -2.0,
                    high: 5.0,
                    samples: 100,
                    y_squared: true,
                    ..Default::default()
                }),
                Placement::at(Vec3::new(3.0, -4.5, 0.0)),
            )
            .unlit(),
            ShowcaseEntry::new(
                ShapeKind::Axes(AxesSettings { length: 1.0 }),
                Placement::at(Vec3::new(-8.0, -5.5, 0.0)),
            )
            .unlit(),
        ];

        Self { entries }
    }
}

impl ShowcaseSettings {
    /// Runs every generator without touching the GPU.
    pub fn generate(&self) -> Result<Vec<MeshData>, ShapeError> {
        self.entries.iter().map(|entry| entry.kind.generate()).collect()
    }

    /// Uploads every shape and hands it to `renderer`.
    pub fn populate(&self, renderer: &mut MeshRenderer, device: &Device) -> Result<(), AppError> {
        for (entry, data) in self.entries.iter().zip(self.generate()?) {
            let mesh = Mesh::new(device, entry.kind.label(), data)?;
            renderer.add_instance(device, mesh, entry.placement, entry.material);
        }

        info!("showcase holds {} shapes", self.entries.len());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::mesh::Topology;

    #[test]
    fn default_showcase_builds_every_kind() {
        let settings = ShowcaseSettings::default();
        let meshes = settings.generate().unwrap();

        assert_eq!(meshes.len(), settings.entries.len());

        let mut labels: Vec<&str> = settings.entries.iter().map(|e| e.kind.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 10);
    }

    #[test]
    fn lines_are_unlit() {
        let settings = ShowcaseSettings::default();
        let meshes = settings.generate().unwrap();

        for (entry, mesh) in settings.entries.iter().zip(&meshes) {
            if mesh.topology() == Topology::Lines {
                assert_eq!(
                    entry.material,
                    Material::UNLIT,
                    "{} should be unlit",
                    entry.kind.label()
                );
            }
        }
    }

    #[test]
    fn sphere_blends_both_textures() {
        let settings = ShowcaseSettings::default();
        let sphere = settings
            .entries
            .iter()
            .find(|entry| entry.kind.label() == "sphere")
            .unwrap();

        assert_eq!(sphere.material.texture_weight, 1.0);
        assert_eq!(sphere.material.texture_mix, 0.5);
    }

    #[test]
    fn cylinder_keeps_one_solid_color() {
        let settings = ShowcaseSettings::default();
        let meshes = settings.generate().unwrap();
        let (_, cylinder) = settings
            .entries
            .iter()
            .zip(&meshes)
            .find(|(entry, _)| entry.kind.label() == "cylinder")
            .unwrap();

        assert!(cylinder
            .vertices()
            .iter()
            .all(|vertex| vertex.color == CYLINDER_COLOR));
    }

    #[test]
    fn showcase_uses_demo_resolutions() {
        let settings = ShowcaseSettings::default();
        let meshes = settings.generate().unwrap();
        let count = |label: &str| {
            settings
                .entries
                .iter()
                .zip(&meshes)
                .find(|(entry, _)| entry.kind.label() == label)
                .map(|(_, mesh)| mesh.vertex_count())
        };

        assert_eq!(count("circle"), Some(31));
        assert_eq!(count("cylinder"), Some(82));
        assert_eq!(count("sphere"), Some(420));
        assert_eq!(count("torus"), Some(225));
        assert_eq!(count("star torus"), Some(400));
    }
}
