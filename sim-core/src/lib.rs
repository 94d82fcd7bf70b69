//! Core 2-D particle-life simulation library.
//!
//! Main components:
//! - [`world`] — the simulation state and its per-frame pipeline.
//! - [`phases`] — grid rebuild, force accumulation and integration.
//! - [`grid`] — the spatial grid particles are bucketed into.
//! - [`neighbors`] — toroidal 3×3 neighborhood enumeration with wrap flags.
//! - [`attraction`] — the group-to-group attraction matrix and force law.
//! - [`particle`] — particles and particle sets.
//! - [`force_buffer`] — per-frame accumulated forces.
//! - [`raster`] — sub-pixel point rendering.
//! - [`display`] — pixel sink and display traits, plus an in-memory framebuffer.
//! - [`clock`] — frame time steps from a millisecond counter.
//! - [`config`] — world configuration and presets.
//! - [`color`], [`error`], [`types`] — shared types.

pub mod attraction;
pub mod clock;
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod force_buffer;
pub mod grid;
pub mod neighbors;
pub mod particle;
pub mod phases;
pub mod raster;
pub mod types;
pub mod world;
