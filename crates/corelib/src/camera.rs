use crate::{Mat4, Vec3};

/// Simple perspective camera (right-handed).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
        }
    }

    /// Camera at the origin looking down -Z, the fixed viewpoint both demo
    /// scenes use; scenes place their geometry at negative Z instead of
    /// moving the eye.
    pub fn origin_facing_neg_z(fov_y_rad: f32, z_near: f32, z_far: f32) -> Self {
        Self::new_perspective(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            fov_y_rad,
            z_near,
            z_far,
            1.0,
        )
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Perspective projection with wgpu depth range (z in [0, 1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vec4, vec3};

    #[test]
    fn origin_camera_view_is_identity() {
        let cam = Camera::origin_facing_neg_z(100f32.to_radians(), 1.0, 20.0);
        let v = cam.view();
        let d = (v - Mat4::IDENTITY).to_cols_array();
        assert!(d.iter().all(|f| f.abs() < 1e-6));
    }

    #[test]
    fn proj_maps_near_plane_to_zero_depth() {
        let cam = Camera::origin_facing_neg_z(100f32.to_radians(), 1.0, 20.0).with_aspect(1.0);
        let p = cam.proj() * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!((p.z / p.w).abs() < 1e-5);
    }

    #[test]
    fn point_in_front_projects_inside_clip_volume() {
        let cam = Camera::origin_facing_neg_z(100f32.to_radians(), 1.0, 20.0)
            .with_aspect(640.0 / 480.0);
        let clip = cam.proj_view() * vec3(0.25, 0.25, -2.0).extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
        assert!(ndc.z >= 0.0 && ndc.z <= 1.0);
    }
}
