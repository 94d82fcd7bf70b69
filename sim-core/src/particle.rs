use crate::types::GroupId;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub group: GroupId,
}

/// The fixed particle population of a world.
///
/// Created once and mutated in place every frame; particles are never
/// added or removed during a run.
#[derive(Clone, Debug)]
pub struct ParticleSet {
    pub particles: Vec<Particle>,
}

impl Particle {
    pub fn at_rest(pos: Vec2, group: GroupId) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            group,
        }
    }
}

impl ParticleSet {
    pub fn from_parts(parts: Vec<(Vec2, GroupId)>) -> Self {
        let particles = parts
            .into_iter()
            .map(|(pos, group)| Particle::at_rest(pos, group))
            .collect();

        Self { particles }
    }

    /// Scatters `count` particles uniformly over `[0, world.x) × [0, world.y)`.
    ///
    /// Velocity components are drawn from `[-max_speed, max_speed]` (zero
    /// when `max_speed` is zero) and groups uniformly from `0..=groups - 1`.
    pub fn random(
        count: usize,
        groups: usize,
        world: Vec2,
        max_speed: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let last_group = groups.saturating_sub(1);
        let particles = (0..count)
            .map(|_| {
                let pos = Vec2::new(
                    rng.random_range(0.0..world.x),
                    rng.random_range(0.0..world.y),
                );
                let vel = if max_speed > 0.0 {
                    Vec2::new(
                        rng.random_range(-max_speed..=max_speed),
                        rng.random_range(-max_speed..=max_speed),
                    )
                } else {
                    Vec2::ZERO
                };
                let group = rng.random_range(0..=last_group);
                Particle { pos, vel, group }
            })
            .collect();

        Self { particles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of particles in each of `groups` color groups.
    pub fn group_counts(&self, groups: usize) -> Vec<usize> {
        let mut counts = vec![0; groups];
        for p in &self.particles {
            if let Some(c) = counts.get_mut(p.group) {
                *c += 1;
            }
        }
        counts
    }
}
