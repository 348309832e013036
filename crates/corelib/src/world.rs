//! Tiny world of animated instances: dense parallel arrays of
//! Transform + spin velocity + tint.

use crate::Vec3;
use crate::transform::Transform;

/// Entity id (dense, index into component arrays).
pub type Entity = u32;

/// Very small world with dense parallel arrays.
/// No allocations per-frame; spawn may allocate to grow capacity.
#[derive(Default)]
pub struct World {
    transforms: Vec<Transform>,
    /// Euler angular velocity in rad/s, applied by `system_spin`.
    spins: Vec<Vec3>,
    tints: Vec<[f32; 4]>,
    alive: Vec<bool>,
    len: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity with its transform, spin velocity and tint.
    pub fn spawn(&mut self, t: Transform, spin: Vec3, tint: [f32; 4]) -> Entity {
        let id = self.len;
        let idx = id as usize;
        self.len += 1;

        if idx >= self.transforms.len() {
            // grow all arrays equally
            let new_len = (idx + 1).next_power_of_two().max(8);
            self.transforms.resize(new_len, Transform::identity());
            self.spins.resize(new_len, Vec3::ZERO);
            self.tints.resize(new_len, [1.0; 4]);
            self.alive.resize(new_len, false);
        }

        self.transforms[idx] = t;
        self.spins[idx] = spin;
        self.tints[idx] = tint;
        self.alive[idx] = true;
        id
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_alive(&self, e: Entity) -> bool {
        let i = e as usize;
        i < self.alive.len() && self.alive[i]
    }

    /// Mutable access to a transform (for animation).
    #[inline]
    pub fn transform_mut(&mut self, e: Entity) -> Option<&mut Transform> {
        let i = e as usize;
        if self.is_alive(e) {
            Some(&mut self.transforms[i])
        } else {
            None
        }
    }

    /// Iterate over (Transform, tint) pairs of alive entities.
    pub fn iter(&self) -> impl Iterator<Item = (&Transform, &[f32; 4])> {
        (0..self.len as usize).filter_map(move |i| {
            if self.alive.get(i).copied().unwrap_or(false) {
                Some((&self.transforms[i], &self.tints[i]))
            } else {
                None
            }
        })
    }

    /// System: advance every alive transform by its own spin velocity * dt.
    /// Angles wrap, so long runs never accumulate unbounded values.
    pub fn system_spin(&mut self, dt: f32) {
        for i in 0..(self.len as usize) {
            if self.alive[i] {
                let spin = self.spins[i];
                self.transforms[i].spin(spin, dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn spawn_preserves_ids_across_growth() {
        let mut w = World::new();
        let ids: Vec<Entity> = (0..20)
            .map(|i| {
                w.spawn(
                    Transform::from_trs(vec3(i as f32, 0.0, 0.0), Vec3::ZERO, Vec3::ONE),
                    Vec3::ZERO,
                    [1.0; 4],
                )
            })
            .collect();
        assert_eq!(w.len(), 20);
        for (i, id) in ids.iter().enumerate() {
            assert!(w.is_alive(*id));
            assert!(
                (w.transform_mut(*id).unwrap().translation.x - i as f32).abs() < 1e-6
            );
        }
    }

    #[test]
    fn system_spin_rotates_each_entity_at_its_own_rate() {
        let mut w = World::new();
        let slow = w.spawn(Transform::identity(), vec3(0.0, 0.0, 0.5), [1.0; 4]);
        let fast = w.spawn(Transform::identity(), vec3(0.0, 0.0, 2.0), [1.0; 4]);
        w.system_spin(0.5);
        let a = w.transform_mut(slow).unwrap().rotation_euler.z;
        let b = w.transform_mut(fast).unwrap().rotation_euler.z;
        assert!((a - 0.25).abs() < 1e-6);
        assert!((b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn iter_yields_alive_entities_with_tints() {
        let mut w = World::new();
        w.spawn(Transform::identity(), Vec3::ZERO, [1.0, 0.0, 0.0, 1.0]);
        w.spawn(Transform::identity(), Vec3::ZERO, [0.0, 1.0, 0.0, 1.0]);
        let tints: Vec<[f32; 4]> = w.iter().map(|(_, c)| *c).collect();
        assert_eq!(tints.len(), 2);
        assert_eq!(tints[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(tints[1], [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn dead_ids_are_rejected() {
        let w = World::new();
        assert!(!w.is_alive(3));
    }
}
