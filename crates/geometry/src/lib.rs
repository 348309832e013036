//! Procedural geometry producing CPU-friendly mesh data.
//! Generators for the coordination triad and the instanced triangle.

pub mod axes;
pub mod mesh;

pub use axes::{coordination_axes, unit_triangle};
pub use mesh::{ColorVertex, MeshData, Topology};
