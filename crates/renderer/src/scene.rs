//! Scene lifecycle: every demo implements init (one-time shader compile and
//! static buffer upload), update (rewrite the dynamic per-instance MVP data)
//! and draw (bind and issue one indexed draw).

use corelib::SceneResult;

use crate::GpuState;
use crate::axes::AxesScene;
use crate::instanced::TrianglesScene;

/// Current framebuffer size as seen by scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Width over height, both clamped away from zero.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Per-frame lifecycle hooks shared by all demos.
///
/// `update` and `draw` before a successful `init` must be no-ops; scenes
/// track their own initialized state.
pub trait Scene {
    fn label(&self) -> &'static str;

    /// One-time GPU setup. Called after the device and surface exist.
    fn init(&mut self, gpu: &GpuState) -> SceneResult<()>;

    /// Advance animation by `dt` seconds and rewrite dynamic buffers.
    fn update(&mut self, gpu: &GpuState, viewport: Viewport, dt: f32);

    /// Record the scene's single indexed draw into an open render pass.
    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>);
}

/// Which demo to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoKind {
    Axes,
    Triangles,
}

impl DemoKind {
    pub fn label(self) -> &'static str {
        match self {
            DemoKind::Axes => "coordination axes",
            DemoKind::Triangles => "instanced triangles",
        }
    }
}

/// Construct the scene for a demo kind. `instances` only affects the
/// instanced demo and is clamped to at least one.
pub fn create_scene(kind: DemoKind, instances: u32) -> Box<dyn Scene> {
    match kind {
        DemoKind::Axes => Box::new(AxesScene::new()),
        DemoKind::Triangles => Box::new(TrianglesScene::new(instances)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height() {
        let vp = Viewport {
            width: 640,
            height: 480,
        };
        assert!((vp.aspect() - 640.0 / 480.0).abs() < 1e-6);
    }

    #[test]
    fn aspect_survives_degenerate_sizes() {
        let vp = Viewport {
            width: 0,
            height: 0,
        };
        assert!((vp.aspect() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn create_scene_picks_the_right_demo() {
        assert_eq!(
            create_scene(DemoKind::Axes, 1).label(),
            DemoKind::Axes.label()
        );
        assert_eq!(
            create_scene(DemoKind::Triangles, 16).label(),
            DemoKind::Triangles.label()
        );
    }
}
