//! Uniform spatial grid used to bound neighbor search.
//!
//! The grid tiles the toroidal world with square cells whose edge is twice
//! the interaction radius. Any two particles close enough to interact are
//! therefore in the same cell or in adjacent cells (see
//! [`crate::neighbors`]). The grid is rebuilt from scratch every frame and
//! carries no state between frames.

use crate::{particle::Particle, types::ParticleId};
use glam::Vec2;

/// Shape of a [`SpatialGrid`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
    /// Edge length of one (square) cell in world units.
    pub cell_size: f32,
    /// Maximum number of particle ids a single cell holds per frame.
    pub capacity: usize,
}

#[derive(Debug)]
pub struct SpatialGrid {
    dims: GridDims,
    cells: Vec<Vec<ParticleId>>,
}

impl SpatialGrid {
    pub fn new(dims: GridDims) -> Self {
        let cells = (0..dims.rows * dims.cols)
            .map(|_| Vec::with_capacity(dims.capacity))
            .collect();
        Self { dims, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Particle ids stored in cell `(row, col)`, in particle-array order.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &[ParticleId] {
        &self.cells[row * self.dims.cols + col]
    }

    /// Cell coordinate `(row, col)` containing `pos`.
    ///
    /// Positions are expected to be wrapped into the world already. Anything
    /// outside (including NaN) is clamped onto the nearest edge cell rather
    /// than indexing out of bounds.
    #[inline]
    pub fn cell_of(&self, pos: Vec2) -> (usize, usize) {
        // `as usize` saturates negatives and NaN to 0.
        let row = ((pos.y / self.dims.cell_size) as usize).min(self.dims.rows - 1);
        let col = ((pos.x / self.dims.cell_size) as usize).min(self.dims.cols - 1);
        (row, col)
    }

    /// Clears every cell and re-inserts all particles by position.
    ///
    /// A particle landing in a cell that is already at capacity is left out
    /// of the grid for this frame.
    ///
    /// ### Returns
    /// The number of particles that were dropped because their cell was full.
    pub fn rebuild(&mut self, particles: &[Particle]) -> usize {
        for cell in &mut self.cells {
            cell.clear();
        }

        let mut dropped = 0;
        for (id, p) in particles.iter().enumerate() {
            let (row, col) = self.cell_of(p.pos);
            let cell = &mut self.cells[row * self.dims.cols + col];
            if cell.len() < self.dims.capacity {
                cell.push(id);
            } else {
                dropped += 1;
            }
        }
        dropped
    }

    /// Number of particles currently stored in each cell, row-major.
    pub fn occupancy(&self) -> Vec<usize> {
        self.cells.iter().map(Vec::len).collect()
    }
}
