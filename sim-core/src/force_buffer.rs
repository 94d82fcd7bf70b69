use crate::types::ParticleId;
use glam::Vec2;

/// A per-frame scratch buffer that accumulates force per particle.
///
/// For each `ParticleId`, this buffer stores:
///
/// - The sum of all force vectors exerted on the particle this frame.
/// - The number of neighbors that contributed to that sum.
///
/// Forces for the whole population are gathered here first, from the
/// frame-start positions, and only then applied by the integrator. This
/// keeps the update independent of the order particles are visited in.
#[derive(Debug)]
pub struct ForceBuffer {
    /// Accumulated force for each particle.
    force: Vec<Vec2>,
    /// Number of contributing neighbors for each particle.
    count: Vec<u32>,
}

impl ForceBuffer {
    /// Creates a zeroed buffer for `len` particles.
    pub fn with_len(len: usize) -> Self {
        Self {
            force: vec![Vec2::ZERO; len],
            count: vec![0; len],
        }
    }

    /// Resizes the buffer to `len` entries and clears every entry.
    pub fn ensure_len(&mut self, len: usize) {
        if self.force.len() != len {
            self.force.resize(len, Vec2::ZERO);
            self.count.resize(len, 0);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        self.force.fill(Vec2::ZERO);
        self.count.fill(0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.force.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.force.is_empty()
    }

    /// Adds one neighbor's force to particle `id`.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    pub fn add(&mut self, id: ParticleId, force: Vec2) {
        self.force[id] += force;
        self.count[id] += 1;
    }

    /// Summed force on particle `id`, `Vec2::ZERO` if nothing contributed.
    #[inline]
    pub fn total(&self, id: ParticleId) -> Vec2 {
        self.force[id]
    }

    #[inline]
    pub fn contributions(&self, id: ParticleId) -> u32 {
        self.count[id]
    }

    /// Average number of contributing neighbors per particle.
    pub fn mean_contributions(&self) -> f32 {
        if self.count.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.count.iter().map(|&c| c as u64).sum();
        sum as f32 / self.count.len() as f32
    }
}
