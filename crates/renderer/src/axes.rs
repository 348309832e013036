//! The coordination-axes demo: a tumbling triad (X red, Y green, Z blue)
//! drawn as a line list with the MVP delivered through a one-element
//! instance buffer (mat4 split over four per-instance vec4 attributes).

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{
    Buffer, BufferUsages, PrimitiveTopology, RenderPipeline, VertexBufferLayout, VertexStepMode,
};

use glam::{Mat4, vec3};

use corelib::camera::Camera;
use corelib::transform::Transform;
use corelib::{SceneError, SceneResult};

use crate::scene::{Scene, Viewport};
use crate::{GpuState, Vertex};

const AXIS_RADIUS: f32 = 0.5;
const SPIN_DEG_PER_SEC: f32 = 40.0;
const FOV_Y_DEG: f32 = 100.0;
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 20.0;
const TRIAD_OFFSET_Z: f32 = -2.0;

/// Per-instance mat4, one vec4 attribute per column (locations 2..5).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub(crate) struct MvpInstance {
    pub mvp: [[f32; 4]; 4],
}

impl MvpInstance {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<MvpInstance>() as u64,
        step_mode: VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4
        ],
    };

    pub fn from_mat4(m: Mat4) -> Self {
        Self {
            mvp: m.to_cols_array_2d(),
        }
    }
}

struct AxesGpu {
    pipeline: RenderPipeline,
    vertex_buf: Buffer,
    index_buf: Buffer,
    instance_buf: Buffer,
    index_count: u32,
}

/// Rotating coordinate-axes scene.
pub struct AxesScene {
    pose: Transform,
    camera: Camera,
    gpu: Option<AxesGpu>,
}

impl AxesScene {
    pub fn new() -> Self {
        let mut pose = Transform::identity();
        pose.translation = vec3(0.0, 0.0, TRIAD_OFFSET_Z);
        Self {
            pose,
            camera: Camera::origin_facing_neg_z(FOV_Y_DEG.to_radians(), Z_NEAR, Z_FAR),
            gpu: None,
        }
    }

    /// Advance the tumble: equal rate about X and Y, wrapped to [0, TAU).
    fn advance(&mut self, dt: f32) {
        let rate = SPIN_DEG_PER_SEC.to_radians();
        self.pose.spin(vec3(rate, rate, 0.0), dt);
    }

    fn mvp(&self, aspect: f32) -> Mat4 {
        self.camera.with_aspect(aspect).proj_view() * self.pose.matrix()
    }
}

impl Default for AxesScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for AxesScene {
    fn label(&self) -> &'static str {
        "coordination axes"
    }

    fn init(&mut self, gpu: &GpuState) -> SceneResult<()> {
        let mesh = geometry::coordination_axes(AXIS_RADIUS);
        if !mesh.is_valid() {
            return Err(SceneError::InvalidGeometry("coordination axes".into()));
        }

        let vertices: Vec<Vertex> = mesh.vertices.iter().copied().map(Vertex::from).collect();
        let vertex_buf = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Axes VB"),
                contents: bytemuck::cast_slice(&vertices),
                usage: BufferUsages::VERTEX,
            });
        let index_buf = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Axes IB"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: BufferUsages::INDEX,
            });

        // Dynamic one-element instance buffer, rewritten every frame.
        let instance_init = MvpInstance::from_mat4(Mat4::IDENTITY);
        let instance_buf = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Axes MVP"),
                contents: bytemuck::bytes_of(&instance_init),
                usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            });

        let pipeline = gpu.create_scene_pipeline(
            "Axes Pipeline",
            include_str!("shaders/axes.wgsl"),
            PrimitiveTopology::LineList,
            &[Vertex::LAYOUT, MvpInstance::LAYOUT],
        );

        log::info!(
            "Axes scene ready: {} vertices, {} indices",
            vertices.len(),
            mesh.indices.len()
        );

        self.gpu = Some(AxesGpu {
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
        self.advance(dt);
        let instance = MvpInstance::from_mat4(self.mvp(viewport.aspect()));
        if let Some(res) = &self.gpu {
            gpu.queue()
                .write_buffer(&res.instance_buf, 0, bytemuck::bytes_of(&instance));
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
        rpass.draw_indexed(0..res.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::TAU;

    #[test]
    fn advance_spins_at_forty_degrees_per_second() {
        let mut scene = AxesScene::new();
        scene.advance(1.0);
        let expected = 40f32.to_radians();
        assert!((scene.pose.rotation_euler.x - expected).abs() < 1e-5);
        assert!((scene.pose.rotation_euler.y - expected).abs() < 1e-5);
        assert!(scene.pose.rotation_euler.z.abs() < 1e-6);
    }

    #[test]
    fn angles_stay_wrapped_over_long_runs() {
        let mut scene = AxesScene::new();
        for _ in 0..10_000 {
            scene.advance(0.016);
        }
        let r = scene.pose.rotation_euler;
        assert!(r.x >= 0.0 && r.x < TAU);
        assert!(r.y >= 0.0 && r.y < TAU);
    }

    #[test]
    fn triad_origin_projects_to_screen_center() {
        let scene = AxesScene::new();
        let clip = scene.mvp(640.0 / 480.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        // model origin sits at z = -2 in view space
        assert!((clip.w - 2.0).abs() < 1e-5);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);
        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn instance_layout_is_one_mat4() {
        assert_eq!(MvpInstance::LAYOUT.array_stride, 64);
        assert_eq!(MvpInstance::LAYOUT.attributes.len(), 4);
        assert_eq!(MvpInstance::LAYOUT.step_mode, VertexStepMode::Instance);
    }
}
