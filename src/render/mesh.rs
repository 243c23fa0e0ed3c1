use log::debug;
use wgpu::{Device, ErrorFilter, RenderPass};

use crate::utils::mesh::{MeshData, Topology};

use super::{
    buffer::{IndexBuffer, VertexArray, VertexBuffer},
    mesh_renderer::MeshPipelines,
    RenderError,
};

/// A shape uploaded to the GPU. The buffers are created once from the
/// complete arrays and freed when the mesh is dropped.
pub struct Mesh {
    label: String,
    data: MeshData,
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    index_buffer: Option<IndexBuffer>,
}

impl Mesh {
    pub fn new(device: &Device, label: &str, data: MeshData) -> Result<Mesh, RenderError> {
        let (vertex_buffer, index_buffer) = Self::upload(device, label, &data)?;

        debug!(
            "uploaded {label}: {} vertices, {} indices, {:?}",
            data.vertex_count(),
            data.indices().len(),
            data.topology()
        );

        Ok(Mesh {
            label: label.to_owned(),
            vertex_array: VertexArray::new(data.topology()),
            data,
            vertex_buffer,
            index_buffer,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &MeshData {
        &self.data
    }

    pub fn topology(&self) -> Topology {
        self.vertex_array.topology()
    }

    /// Binds layout, vertex buffer and index buffer in that order, then issues
    /// one draw call over the whole mesh.
    pub fn draw<'a>(&'a self, pass: &mut RenderPass<'a>, pipelines: &'a MeshPipelines) {
        self.vertex_array.bind(pass, pipelines);
        self.vertex_buffer.bind(pass);

        match &self.index_buffer {
            Some(index_buffer) => {
                index_buffer.bind(pass);
                pass.draw_indexed(0..index_buffer.len(), 0, 0..1);
            }
            None => pass.draw(0..self.vertex_buffer.len(), 0..1),
        }
    }

    fn upload(
        device: &Device,
        label: &str,
        data: &MeshData,
    ) -> Result<(VertexBuffer, Option<IndexBuffer>), RenderError> {
        device.push_error_scope(ErrorFilter::OutOfMemory);
        device.push_error_scope(ErrorFilter::Validation);

        let vertex_buffer = VertexBuffer::new(device, label, data.as_floats());
        let index_buffer = IndexBuffer::new(device, label, data.indices());

        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());

        match validation.or(out_of_memory) {
            Some(source) => Err(RenderError::BufferCreation {
                label: label.to_owned(),
                source,
            }),
            None => Ok((vertex_buffer, index_buffer)),
        }
    }
}
