//! CPU-side mesh representation used by the generators.

/// How the index buffer is to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Lines,
    Triangles,
}

impl Topology {
    /// Indices per primitive.
    pub fn stride(self) -> usize {
        match self {
            Topology::Lines => 2,
            Topology::Triangles => 3,
        }
    }
}

/// Vertex with position and RGBA color. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ColorVertex {
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Indexed mesh with tightly-packed vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ColorVertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshData {
    pub fn new(vertices: Vec<ColorVertex>, indices: Vec<u32>, topology: Topology) -> Self {
        Self {
            vertices,
            indices,
            topology,
        }
    }

    /// Returns `true` if both buffers are non-empty, every index is in
    /// bounds, and the index count is whole primitives for the topology.
    pub fn is_valid(&self) -> bool {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return false;
        }
        if self.indices.len() % self.topology.stride() != 0 {
            return false;
        }
        let n = self.vertices.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(
            vec![ColorVertex::default(), ColorVertex::default()],
            vec![0, 1],
            Topology::Lines,
        );
        assert!(data.is_valid());
    }

    #[test]
    fn out_of_bounds_index_is_invalid() {
        let data = MeshData::new(vec![ColorVertex::default()], vec![0, 1], Topology::Lines);
        assert!(!data.is_valid());
    }

    #[test]
    fn partial_primitive_is_invalid() {
        let verts = vec![ColorVertex::default(); 4];
        let data = MeshData::new(verts, vec![0, 1, 2, 3], Topology::Triangles);
        assert!(!data.is_valid());
    }
}
