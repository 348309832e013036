//! Generators for the coordination triad and the instanced triangle.

use glam::Vec3;

use crate::mesh::{ColorVertex, MeshData, Topology};

const X_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const Y_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const Z_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Arrowhead length as a fraction of the axis radius.
const HEAD_LEN_FRAC: f32 = 0.2;
/// Vane half-width as a fraction of the arrowhead length.
const HEAD_WIDTH_FRAC: f32 = 0.4;

/// Generate the 3D coordinate triad: one shaft plus a four-vane arrowhead
/// per axis, as a line list with unshared endpoints. X is red, Y green,
/// Z blue. For any radius this yields 10 vertices and 5 segments per axis
/// (30 vertices / 30 indices total).
pub fn coordination_axes(radius: f32) -> MeshData {
    let mut vertices = Vec::with_capacity(30);
    let mut indices = Vec::with_capacity(30);

    let axes = [
        (Vec3::X, Vec3::Y, Vec3::Z, X_COLOR),
        (Vec3::Y, Vec3::Z, Vec3::X, Y_COLOR),
        (Vec3::Z, Vec3::X, Vec3::Y, Z_COLOR),
    ];

    for (dir, u, v, color) in axes {
        let tip = dir * radius;
        let head_len = radius * HEAD_LEN_FRAC;
        let half_width = head_len * HEAD_WIDTH_FRAC;
        let base = dir * (radius - head_len);

        let mut segment = |a: Vec3, b: Vec3| {
            let start = vertices.len() as u32;
            vertices.push(ColorVertex::new(a.to_array(), color));
            vertices.push(ColorVertex::new(b.to_array(), color));
            indices.push(start);
            indices.push(start + 1);
        };

        // shaft, then the four vanes fanning back from the tip
        segment(Vec3::ZERO, tip);
        segment(tip, base + u * half_width);
        segment(tip, base - u * half_width);
        segment(tip, base + v * half_width);
        segment(tip, base - v * half_width);
    }

    MeshData::new(vertices, indices, Topology::Lines)
}

/// One triangle centered on the origin in the XY plane, corners colored
/// red/green/blue, fitting inside the unit circle.
pub fn unit_triangle() -> MeshData {
    let vertices = vec![
        ColorVertex::new([0.0, 0.5, 0.0], X_COLOR),
        ColorVertex::new([-0.5, -0.5, 0.0], Y_COLOR),
        ColorVertex::new([0.5, -0.5, 0.0], Z_COLOR),
    ];
    MeshData::new(vertices, vec![0, 1, 2], Topology::Triangles)
}
