use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue};

use crate::utils::{create_uniform_init, create_uniform_layout};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GlobalLight {
    pub light_direction: Vec3,
    _padding1: f32,
    pub light_color: Vec3,
    _padding2: f32,
}

impl Default for GlobalLight {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(-1.0, -1.0, -1.0),
            _padding1: Default::default(),
            light_color: Vec3::new(0.9, 0.9, 0.85),
            _padding2: Default::default(),
        }
    }
}

/// Per-frame values shared by every shader, bound at group 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    pub view_proj_matrix: Mat4,
    pub camera_pos: Vec3,
    pub time: f32,
    pub global_light: GlobalLight,
    pub ambient_light: Vec3,
    _padding: f32,
}

impl SceneUniform {
    pub fn new(global_light: GlobalLight, ambient_light: Vec3) -> SceneUniform {
        SceneUniform {
            global_light,
            ambient_light,
            ..Default::default()
        }
    }
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self {
            view_proj_matrix: Mat4::IDENTITY,
            camera_pos: Vec3::ZERO,
            time: 0.0,
            global_light: Default::default(),
            ambient_light: Vec3::splat(0.25),
            _padding: 0.0,
        }
    }
}

pub struct SceneBindGroup {
    uniform: SceneUniform,
    buffer: Buffer,
    layout: BindGroupLayout,
    bind_group: BindGroup,
}

impl SceneBindGroup {
    pub fn new(device: &Device, uniform: SceneUniform) -> SceneBindGroup {
        let layout = create_uniform_layout(device, "scene");
        let (buffer, bind_group) = create_uniform_init(&uniform, &layout, device);

        SceneBindGroup {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    pub fn uniform(&self) -> &SceneUniform {
        &self.uniform
    }

    pub fn update_uniform(&mut self, queue: &Queue, uniform: &SceneUniform) {
        self.uniform = *uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }

    pub fn layout(&self) -> &BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }
}

/// Perspective camera looking from `position` at `target`.
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov: f32,
    aspect_ratio: f32,
    near_plane: f32,
    far_plane: f32,
    is_dirty: bool,
    view_proj_matrix: Mat4,
}

impl Camera {
    pub fn new(
        position: Vec3,
        target: Vec3,
        fov: f32,
        aspect_ratio: f32,
        near_plane: f32,
        far_plane: f32,
    ) -> Camera {
        Camera {
            position,
            target,
            up: Vec3::Y,
            fov,
            aspect_ratio,
            near_plane,
            far_plane,
            is_dirty: true,
            view_proj_matrix: Mat4::IDENTITY,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
        self.is_dirty = true;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.is_dirty = true;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn proj_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        )
    }

    pub fn view_proj_matrix(&mut self) -> Mat4 {
        if self.is_dirty {
            self.view_proj_matrix = self.proj_matrix() * self.view_matrix();
            self.is_dirty = false;
        }

        self.view_proj_matrix
    }
}
