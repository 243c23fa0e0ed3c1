//! Owned GPU resources behind a mesh: the vertex buffer, the index buffer and
//! the layout descriptor that picks a pipeline for them.
//!
//! wgpu keeps no global binding state, so `bind` records state on a render
//! pass and the binding ends together with the pass.

use wgpu::{
    util::{BufferInitDescriptor, DeviceExt},
    Buffer, BufferUsages, Device, Face, FrontFace, IndexFormat, PolygonMode, PrimitiveState,
    PrimitiveTopology, RenderPass, VertexBufferLayout,
};

use crate::utils::mesh::Topology;

use super::{
    mesh_renderer::MeshPipelines,
    vertex::{Vertex, FLOATS_PER_VERTEX},
};

impl From<Topology> for PrimitiveTopology {
    fn from(topology: Topology) -> Self {
        match topology {
            Topology::Triangles => PrimitiveTopology::TriangleList,
            Topology::Lines => PrimitiveTopology::LineList,
        }
    }
}

pub struct VertexBuffer {
    buffer: Buffer,
    len: u32,
}

impl VertexBuffer {
    /// Uploads a flat vertex array, [`FLOATS_PER_VERTEX`] floats per vertex.
    pub fn new(device: &Device, label: &str, floats: &[f32]) -> VertexBuffer {
        let buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(floats),
            usage: BufferUsages::VERTEX,
        });

        VertexBuffer {
            buffer,
            len: vertex_count(floats),
        }
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn bind<'a>(&'a self, pass: &mut RenderPass<'a>) {
        pass.set_vertex_buffer(0, self.buffer.slice(..));
    }
}

fn vertex_count(floats: &[f32]) -> u32 {
    (floats.len() / FLOATS_PER_VERTEX) as u32
}

pub struct IndexBuffer {
    buffer: Buffer,
    len: u32,
}

impl IndexBuffer {
    pub const FORMAT: IndexFormat = IndexFormat::Uint32;

    /// Returns `None` for an empty index list; such meshes draw their vertices
    /// in order.
    pub fn new(device: &Device, label: &str, indices: &[u32]) -> Option<IndexBuffer> {
        if indices.is_empty() {
            return None;
        }

        let buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: BufferUsages::INDEX,
        });

        Some(IndexBuffer {
            buffer,
            len: indices.len() as u32,
        })
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn bind<'a>(&'a self, pass: &mut RenderPass<'a>) {
        pass.set_index_buffer(self.buffer.slice(..), Self::FORMAT);
    }
}

/// Layout descriptor of a mesh: the vertex format plus the primitive rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexArray {
    topology: Topology,
}

impl VertexArray {
    pub fn new(topology: Topology) -> VertexArray {
        VertexArray { topology }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn buffer_layout(&self) -> VertexBufferLayout<'static> {
        Vertex::buffer_layout()
    }

    pub fn primitive_state(&self) -> PrimitiveState {
        let cull_mode = match self.topology {
            Topology::Triangles => Some(Face::Back),
            Topology::Lines => None,
        };

        PrimitiveState {
            topology: self.topology.into(),
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode,
            unclipped_depth: false,
            polygon_mode: PolygonMode::Fill,
            conservative: false,
        }
    }

    /// Selects the pipeline compiled for this layout and topology.
    pub fn bind<'a>(&self, pass: &mut RenderPass<'a>, pipelines: &'a MeshPipelines) {
        pass.set_pipeline(pipelines.get(self.topology));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangles_cull_back_faces() {
        let state = VertexArray::new(Topology::Triangles).primitive_state();

        assert_eq!(state.topology, PrimitiveTopology::TriangleList);
        assert_eq!(state.front_face, FrontFace::Ccw);
        assert_eq!(state.cull_mode, Some(Face::Back));
    }

    #[test]
    fn lines_are_never_culled() {
        let state = VertexArray::new(Topology::Lines).primitive_state();

        assert_eq!(state.topology, PrimitiveTopology::LineList);
        assert_eq!(state.cull_mode, None);
    }

    #[test]
    fn layout_matches_vertex_stride() {
        let layout = VertexArray::new(Topology::Lines).buffer_layout();

        assert_eq!(layout.array_stride, 44);
        assert_eq!(layout.attributes.len(), 4);
    }

    #[test]
    fn flat_vertex_array_counts_whole_vertices() {
        assert_eq!(vertex_count(&[0.0; 3 * FLOATS_PER_VERTEX]), 3);
        assert_eq!(vertex_count(&[]), 0);
    }
}
