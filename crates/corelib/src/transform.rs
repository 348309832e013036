use std::f32::consts::TAU;

use crate::{EulerRot, Mat4, Quat, Vec3};

/// Rigid transform with uniform or non-uniform scale (Euler XYZ).
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }

    /// Advance the Euler angles by `velocity * dt`, keeping them in [0, TAU).
    #[inline]
    pub fn spin(&mut self, velocity: Vec3, dt: f32) {
        self.rotation_euler.x = wrap_angle(self.rotation_euler.x + velocity.x * dt);
        self.rotation_euler.y = wrap_angle(self.rotation_euler.y + velocity.y * dt);
        self.rotation_euler.z = wrap_angle(self.rotation_euler.z + velocity.z * dt);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Wrap an angle into [0, TAU).
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let r = a.rem_euclid(TAU);
    if r.is_finite() { r } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn spin_advances_and_wraps() {
        let mut t = Transform::identity();
        t.spin(vec3(TAU, 0.0, 0.0), 1.5);
        assert!((t.rotation_euler.x - TAU * 0.5).abs() < 1e-5);
        assert!(t.rotation_euler.x >= 0.0 && t.rotation_euler.x < TAU);
    }

    #[test]
    fn wrap_angle_handles_negatives() {
        let w = wrap_angle(-0.25 * TAU);
        assert!((w - 0.75 * TAU).abs() < 1e-6);
    }
}
