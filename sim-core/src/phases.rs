//! Per-frame simulation phases for the particle-life world.
//!
//! The update loop looks like:
//! 1. [`grid_phase`] — bucket every particle into the [`SpatialGrid`].
//! 2. [`force_phase`] — for each particle, sum the forces exerted by the
//!    particles in its 3×3 toroidal neighborhood into a [`ForceBuffer`].
//! 3. [`integrate_phase`] — apply friction and the accumulated force to
//!    each velocity, advance positions and wrap them back into the world.
//!
//! [`step`] runs the three phases in order.

use crate::{
    attraction::{AttractionMatrix, force_magnitude},
    config::Physics,
    force_buffer::ForceBuffer,
    grid::SpatialGrid,
    neighbors::neighbor_cells,
    particle::Particle,
};
use glam::Vec2;

/// Rebuilds the grid from current positions.
///
/// ### Returns
/// The number of particles left out because their cell was full.
pub fn grid_phase(particles: &[Particle], grid: &mut SpatialGrid) -> usize {
    grid.rebuild(particles)
}

/// Accumulates the force on every gridded particle from its neighbors.
///
/// For each cell and each particle `i` in it (the subject):
///
/// 1. Enumerate the cell's 3×3 neighborhood with [`neighbor_cells`].
/// 2. For every particle `j` in those cells, `j != i`, shift its position by
///    the slot's wrap offset to get where `i` perceives it.
/// 3. If the perceived distance is in `(0, interaction_radius)`, evaluate
///    [`force_magnitude`] with `matrix.get(group_i, group_j)` and add the
///    force along the line from `j` to `i` (positive magnitude pulls `i`
///    toward `j`).
///
/// Only positions are read; `acc` is resized and cleared first. Particles
/// that were dropped from the grid neither exert nor receive force.
///
/// ### Parameters
/// - `particles` - Particle array, indexed by the ids stored in `grid`.
/// - `grid` - Grid rebuilt from the same `particles` by [`grid_phase`].
/// - `matrix` - Attraction coefficients, indexed `(subject, object)`.
/// - `physics` - World size, interaction radius and too-close threshold.
/// - `acc` - Output buffer; holds each particle's summed force afterwards.
pub fn force_phase(
    particles: &[Particle],
    grid: &SpatialGrid,
    matrix: &AttractionMatrix,
    physics: &Physics,
    acc: &mut ForceBuffer,
) {
    acc.ensure_len(particles.len());

    let radius = physics.interaction_radius;
    let (rows, cols) = (grid.rows(), grid.cols());

    for row in 0..rows {
        for col in 0..cols {
            let subjects = grid.cell(row, col);
            if subjects.is_empty() {
                continue;
            }
            let neighborhood = neighbor_cells(row, col, rows, cols);

            for &i in subjects {
                let subject = &particles[i];

                for slot in &neighborhood {
                    let offset = slot.wrap.offset(physics.world);

                    for &j in grid.cell(slot.row, slot.col) {
                        if j == i {
                            continue;
                        }
                        let object = &particles[j];
                        let delta = subject.pos - (object.pos + offset);
                        let distance = delta.length();

                        if distance > 0.0 && distance < radius {
                            let mag = force_magnitude(
                                distance / radius,
                                matrix.get(subject.group, object.group),
                                physics.too_close,
                            );
                            acc.add(i, delta * (-mag / distance));
                        }
                    }
                }
            }
        }
    }
}

/// Applies accumulated forces and advances every particle by `dt` seconds.
///
/// `velocity = velocity * friction + force * radius * force_factor * dt`,
/// then `position += velocity * dt`, then each axis is wrapped with
/// [`wrap_position`].
///
/// ### Parameters
/// - `particles` - Particles to advance in place.
/// - `acc` - Forces from [`force_phase`], one entry per particle.
/// - `physics` - Friction, force factor, radius and wrap settings.
/// - `dt` - Frame duration in seconds; negative or non-finite values count as `0`.
pub fn integrate_phase(particles: &mut [Particle], acc: &ForceBuffer, physics: &Physics, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let friction = physics.friction.factor(dt);
    let scale = physics.interaction_radius * physics.force_factor;

    for (i, p) in particles.iter_mut().enumerate() {
        let force = acc.total(i) * scale;
        p.vel = p.vel * friction + force * dt;
        p.pos += p.vel * dt;
        p.pos = wrap_position(p.pos, physics.world, physics.wrap_margin);
    }
}

/// Folds a position back into `[0, world.x) × [0, world.y)`.
///
/// Each axis is handled independently: a coordinate closer than `margin`
/// to zero (or below it) is snapped to `extent - margin`, and one at or past
/// `extent` is snapped to `margin`. Snapping inside the margin keeps a
/// particle from sitting exactly on the seam.
#[inline]
pub fn wrap_position(pos: Vec2, world: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, world.x, margin),
        wrap_axis(pos.y, world.y, margin),
    )
}

#[inline]
fn wrap_axis(v: f32, extent: f32, margin: f32) -> f32 {
    if v.is_nan() {
        margin
    } else if v < margin {
        extent - margin
    } else if v >= extent {
        margin
    } else {
        v
    }
}

/// Runs [`grid_phase`], [`force_phase`] and [`integrate_phase`] in order.
///
/// ### Returns
/// The number of particles dropped from the grid this frame.
pub fn step(
    particles: &mut [Particle],
    grid: &mut SpatialGrid,
    matrix: &AttractionMatrix,
    physics: &Physics,
    acc: &mut ForceBuffer,
    dt: f32,
) -> usize {
    let dropped = grid_phase(particles, grid);
    force_phase(particles, grid, matrix, physics, acc);
    integrate_phase(particles, acc, physics, dt);
    dropped
}
