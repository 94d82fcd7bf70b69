/// Identifier for a particle in a [`crate::particle::ParticleSet`].
///
/// This is an index into `ParticleSet::particles`. Particles are never
/// created or destroyed during a run, so an id stays valid for the
/// lifetime of the set.
pub type ParticleId = usize;

/// Index of a color group, i.e. a row/column of the
/// [`crate::attraction::AttractionMatrix`].
pub type GroupId = usize;
