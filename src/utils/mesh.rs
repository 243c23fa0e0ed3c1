use crate::{render::vertex::Vertex, shapes::ShapeError};

/// Primitive assembly rule used to read the index sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
}

impl Topology {
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        }
    }
}

/// CPU-side geometry of one shape. Built once and never modified.
#[derive(Clone, Debug)]
pub struct MeshData {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    topology: Topology,
}

impl MeshData {
    /// Checks that every index references an existing vertex and that the
    /// element count is a whole number of primitives.
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        topology: Topology,
    ) -> Result<MeshData, ShapeError> {
        let vertex_count = vertices.len();

        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(ShapeError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        let element_count = if indices.is_empty() {
            vertex_count
        } else {
            indices.len()
        };
        if element_count == 0 || element_count % topology.vertices_per_primitive() != 0 {
            return Err(ShapeError::IncompletePrimitive {
                element_count,
                topology,
            });
        }

        Ok(MeshData {
            vertices,
            indices,
            topology,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of vertices the draw call consumes.
    pub fn element_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len()
        } else {
            self.vertices.len()
        }
    }

    pub fn primitive_count(&self) -> usize {
        self.element_count() / self.topology.vertices_per_primitive()
    }

    /// Flat view of the vertex array, eleven floats per vertex.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}
