use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use wgpu::{vertex_attr_array, VertexAttribute, VertexBufferLayout, VertexStepMode};

/// Number of `f32` fields in one vertex record.
pub const FLOATS_PER_VERTEX: usize = 11;

/// One vertex record: position, debug color, texture coordinates and normal,
/// in that order. Every shape writes exactly this layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    pub tex_coords: Vec2,
    pub normal: Vec3,
}

static VERTEX_ATTRIBUTES: [VertexAttribute; 4] = vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x2,
    3 => Float32x3
];

impl Vertex {
    pub fn new(position: Vec3, color: Vec3, tex_coords: Vec2, normal: Vec3) -> Vertex {
        Vertex {
            position,
            color,
            tex_coords,
            normal,
        }
    }

    pub fn attributes() -> &'static [VertexAttribute] {
        &VERTEX_ATTRIBUTES
    }

    pub fn buffer_layout() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: (FLOATS_PER_VERTEX * size_of::<f32>()) as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: Self::attributes(),
        }
    }
}
