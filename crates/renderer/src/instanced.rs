//! The instanced-triangles demo: one triangle mesh drawn N times in a
//! centered grid with a single instanced draw call. Each instance carries
//! its own tint and MVP as per-instance vertex attributes; per-entity
//! animation state lives in a corelib World.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{
    Buffer, BufferDescriptor, BufferUsages, PrimitiveTopology, RenderPipeline,
    VertexBufferLayout, VertexStepMode,
};

use glam::{Vec3, vec3};

use corelib::camera::Camera;
use corelib::transform::Transform;
use corelib::world::World;
use corelib::{SceneError, SceneResult};

use crate::scene::{Scene, Viewport};
use crate::{GpuState, Vertex};

const TRIANGLE_SCALE: f32 = 0.35;
const GRID_SPACING: f32 = 1.0;
/// Mean spin rate; per-instance rates are staggered around this.
const BASE_SPIN_DEG_PER_SEC: f32 = 40.0;
const FOV_Y_DEG: f32 = 100.0;
const Z_NEAR: f32 = 1.0;
const Z_FAR_MIN: f32 = 20.0;

const PALETTE: [[f32; 4]; 8] = [
    [1.0, 0.3, 0.3, 1.0],
    [0.3, 1.0, 0.3, 1.0],
    [0.3, 0.5, 1.0, 1.0],
    [1.0, 1.0, 0.3, 1.0],
    [1.0, 0.3, 1.0, 1.0],
    [0.3, 1.0, 1.0, 1.0],
    [1.0, 0.6, 0.2, 1.0],
    [0.9, 0.9, 0.9, 1.0],
];

/// Per-instance tint (location 2) + mat4 columns (locations 3..6).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub(crate) struct TriangleInstance {
    pub tint: [f32; 4],
    pub mvp: [[f32; 4]; 4],
}

impl TriangleInstance {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<TriangleInstance>() as u64,
        step_mode: VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4
        ],
    };
}

struct TrianglesGpu {
    pipeline: RenderPipeline,
    vertex_buf: Buffer,
    index_buf: Buffer,
    instance_buf: Buffer,
    index_count: u32,
}

/// Grid of spinning tinted triangles.
pub struct TrianglesScene {
    world: World,
    camera: Camera,
    instance_data: Vec<TriangleInstance>,
    instance_count: u32,
    gpu: Option<TrianglesGpu>,
}

impl TrianglesScene {
    pub fn new(instances: u32) -> Self {
        let n = instances.max(1);
        let cols = grid_columns(n);
        let depth = grid_depth(cols);

        let mut world = World::new();
        for i in 0..n {
            let mut pos = grid_position(i, n);
            pos.z = depth;
            world.spawn(
                Transform::from_trs(pos, Vec3::ZERO, Vec3::splat(TRIANGLE_SCALE)),
                vec3(0.0, 0.0, spin_rate(i)),
                tint(i),
            );
        }

        // Keep the whole grid inside the far plane.
        let z_far = (depth.abs() + 5.0).max(Z_FAR_MIN);
        Self {
            world,
            camera: Camera::origin_facing_neg_z(FOV_Y_DEG.to_radians(), Z_NEAR, z_far),
            instance_data: Vec::with_capacity(n as usize),
            instance_count: n,
            gpu: None,
        }
    }

    fn rebuild_instances(&mut self, aspect: f32) {
        let pv = self.camera.with_aspect(aspect).proj_view();
        self.instance_data.clear();
        for (transform, tint) in self.world.iter() {
            self.instance_data.push(TriangleInstance {
                tint: *tint,
                mvp: (pv * transform.matrix()).to_cols_array_2d(),
            });
        }
    }
}

impl Scene for TrianglesScene {
    fn label(&self) -> &'static str {
        "instanced triangles"
    }

    fn init(&mut self, gpu: &GpuState) -> SceneResult<()> {
        let mesh = geometry::unit_triangle();
        if !mesh.is_valid() {
            return Err(SceneError::InvalidGeometry("unit triangle".into()));
        }

        let vertices: Vec<Vertex> = mesh.vertices.iter().copied().map(Vertex::from).collect();
        let vertex_buf = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Triangles VB"),
                contents: bytemuck::cast_slice(&vertices),
                usage: BufferUsages::VERTEX,
            });
        let index_buf = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Triangles IB"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: BufferUsages::INDEX,
            });

        // Dynamic instance buffer, rewritten every frame.
        let instance_buf = gpu.device().create_buffer(&BufferDescriptor {
            label: Some("Triangles Instances"),
            size: self.instance_count as u64
                * std::mem::size_of::<TriangleInstance>() as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let pipeline = gpu.create_scene_pipeline(
            "Triangles Pipeline",
            include_str!("shaders/instanced.wgsl"),
            PrimitiveTopology::TriangleList,
            &[Vertex::LAYOUT, TriangleInstance::LAYOUT],
        );

        log::info!("Triangles scene ready: {} instances", self.instance_count);

        self.gpu = Some(TrianglesGpu {
            pipeline,
            vertex_buf,
            index_buf,
            instance_buf,
            index_count: mesh.indices.len() as u32,
        });
        Ok(())
    }

    fn update(&mut self, gpu: &GpuState, viewport: Viewport, dt: f32) {
        if self.gpu.is_none() {
            return;
        }
        self.world.system_spin(dt);
        self.rebuild_instances(viewport.aspect());
        if let Some(res) = &self.gpu {
            gpu.queue()
                .write_buffer(&res.instance_buf, 0, bytemuck::cast_slice(&self.instance_data));
        }
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let Some(res) = &self.gpu else {
            return;
        };
        rpass.set_pipeline(&res.pipeline);
        rpass.set_vertex_buffer(0, res.vertex_buf.slice(..));
        rpass.set_vertex_buffer(1, res.instance_buf.slice(..));
        rpass.set_index_buffer(res.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..res.index_count, 0, 0..self.instance_count);
    }
}

/// Columns of the near-square grid.
fn grid_columns(n: u32) -> u32 {
    (n as f32).sqrt().ceil() as u32
}

/// XY position of instance `i` in a centered grid (z left to the caller).
fn grid_position(i: u32, n: u32) -> Vec3 {
    let cols = grid_columns(n);
    let rows = n.div_ceil(cols);
    let col = i % cols;
    let row = i / cols;
    let x_off = (cols - 1) as f32 * 0.5 * GRID_SPACING;
    let y_off = (rows - 1) as f32 * 0.5 * GRID_SPACING;
    vec3(
        col as f32 * GRID_SPACING - x_off,
        row as f32 * GRID_SPACING - y_off,
        0.0,
    )
}

/// How far back the grid sits so the whole of it fits the 100-degree FOV.
/// A single instance lands at z = -2, like the one-off triad.
fn grid_depth(cols: u32) -> f32 {
    -((cols as f32 * 0.9).max(2.0))
}

/// Per-instance spin about Z, staggered in [20, 60] deg/s.
fn spin_rate(i: u32) -> f32 {
    (BASE_SPIN_DEG_PER_SEC + ((i * 7) % 41) as f32 - 20.0).to_radians()
}

/// Per-instance tint cycling a fixed palette.
fn tint(i: u32) -> [f32; 4] {
    PALETTE[(i as usize) % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_near_square() {
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(64), 8);
        assert_eq!(grid_columns(65), 9);
    }

    #[test]
    fn full_grid_is_centered() {
        let n = 16;
        let sum: Vec3 = (0..n).map(|i| grid_position(i, n)).sum();
        assert!(sum.length() < 1e-4);
    }

    #[test]
    fn single_instance_sits_at_classic_depth() {
        assert!((grid_depth(grid_columns(1)) + 2.0).abs() < 1e-6);
    }

    #[test]
    fn spin_rates_are_staggered_and_bounded() {
        let rates: Vec<f32> = (0..32).map(spin_rate).collect();
        for r in &rates {
            assert!(*r >= 20f32.to_radians() - 1e-6);
            assert!(*r <= 60f32.to_radians() + 1e-6);
        }
        assert!(rates.windows(2).any(|w| (w[0] - w[1]).abs() > 1e-6));
    }

    #[test]
    fn tints_cycle_the_palette() {
        assert_eq!(tint(0), tint(8));
        assert_ne!(tint(0), tint(1));
    }

    #[test]
    fn instance_layout_matches_pod_size() {
        assert_eq!(TriangleInstance::LAYOUT.array_stride, 80);
        assert_eq!(TriangleInstance::LAYOUT.attributes.len(), 5);
    }

    #[test]
    fn scene_clamps_to_at_least_one_instance() {
        let scene = TrianglesScene::new(0);
        assert_eq!(scene.instance_count, 1);
        assert_eq!(scene.world.len(), 1);
    }

    #[test]
    fn rebuild_packs_one_instance_per_entity() {
        let mut scene = TrianglesScene::new(9);
        scene.rebuild_instances(4.0 / 3.0);
        assert_eq!(scene.instance_data.len(), 9);
        // every entity keeps its palette tint
        assert_eq!(scene.instance_data[0].tint, tint(0));
        assert_eq!(scene.instance_data[8].tint, tint(8));
    }
}
