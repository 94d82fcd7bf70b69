//! The simulation state and its per-frame pipeline.

use crate::{
    attraction::AttractionMatrix,
    clock::FrameClock,
    color::Rgb,
    config::{Config, Physics},
    display::{Display, PixelSink},
    error::ConfigError,
    force_buffer::ForceBuffer,
    grid::SpatialGrid,
    particle::ParticleSet,
    phases,
    raster::draw_point,
    types::GroupId,
};
use glam::Vec2;
use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info};

/// Counters describing the most recent step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Steps taken since the world was created or reset.
    pub frames: u64,
    /// Particles left out of the grid last step because their cell was full.
    pub dropped: usize,
    /// Average number of neighbors that exerted force on a particle.
    pub mean_neighbors: f32,
    /// Most particles held by a single grid cell last step.
    pub peak_occupancy: usize,
    /// Time step of the last frame, in seconds.
    pub dt: f32,
}

/// A particle-life world: particles, attraction matrix and the scratch
/// structures needed to advance them.
///
/// The world owns its particles exclusively. Per frame it runs
/// grid rebuild, force accumulation and integration, then rasterizes
/// every particle into a [`PixelSink`].
#[derive(Debug)]
pub struct World {
    cfg: Config,
    physics: Physics,
    particles: ParticleSet,
    matrix: AttractionMatrix,
    grid: SpatialGrid,
    acc: ForceBuffer,
    clock: FrameClock,
    rng: SmallRng,
    stats: FrameStats,
}

impl World {
    /// Validates `cfg`, seeds the RNG and scatters the initial population.
    ///
    /// The attraction matrix comes from `cfg.attraction`, or is drawn at
    /// random when that is `None`.
    ///
    /// ### Parameters
    /// - `cfg` - World configuration; `cfg.rng_seed` makes the world
    ///   reproducible, otherwise a seed is drawn and logged.
    ///
    /// ### Errors
    /// Any [`ConfigError`] raised by [`Config::validate`].
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        let dims = cfg.validate()?;
        let seed = cfg.rng_seed.unwrap_or_else(rand::random);
        let mut rng = SmallRng::seed_from_u64(seed);

        let particles = scatter(&cfg, &mut rng);
        let matrix = match cfg.initial_matrix()? {
            Some(m) => m,
            None => AttractionMatrix::random(cfg.group_count, &mut rng),
        };

        info!(
            particles = particles.len(),
            groups = cfg.group_count,
            rows = dims.rows,
            cols = dims.cols,
            seed,
            "Created particle-life world"
        );

        Ok(Self {
            physics: cfg.physics(),
            acc: ForceBuffer::with_len(particles.len()),
            grid: SpatialGrid::new(dims),
            clock: FrameClock::new(cfg.max_dt),
            stats: FrameStats::default(),
            particles,
            matrix,
            rng,
            cfg,
        })
    }

    /// Builds a world around an explicit population instead of a random one.
    ///
    /// Positions outside the world are wrapped in. `cfg.particle_count` is
    /// ignored in favor of `particles.len()`.
    ///
    /// ### Errors
    /// Fails if the config is invalid or a particle's group is not below
    /// `cfg.group_count`.
    pub fn with_particles(cfg: Config, mut particles: ParticleSet) -> Result<Self, ConfigError> {
        if particles.particles.iter().any(|p| p.group >= cfg.group_count) {
            return Err(ConfigError::Invalid("particle group out of range"));
        }
        let world = cfg.world_size();
        for p in &mut particles.particles {
            let inside = (0.0..world.x).contains(&p.pos.x) && (0.0..world.y).contains(&p.pos.y);
            if !inside {
                p.pos = phases::wrap_position(p.pos, world, cfg.wrap_margin);
            }
        }

        let mut w = Self::new(Config {
            particle_count: 0,
            ..cfg
        })?;
        w.cfg.particle_count = particles.len();
        w.acc = ForceBuffer::with_len(particles.len());
        w.particles = particles;
        Ok(w)
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let dropped = phases::step(
            &mut self.particles.particles,
            &mut self.grid,
            &self.matrix,
            &self.physics,
            &mut self.acc,
            dt,
        );
        if dropped > 0 {
            debug!(dropped, "cells at capacity, particles skipped this frame");
        }

        self.stats = FrameStats {
            frames: self.stats.frames + 1,
            dropped,
            mean_neighbors: self.acc.mean_contributions(),
            peak_occupancy: self.grid.occupancy().into_iter().max().unwrap_or(0),
            dt,
        };
    }

    /// Draws every particle into `sink`, scaling world coordinates to the
    /// sink's pixel size.
    ///
    /// The world `[0, W) × [0, H)` maps onto the pixel squares exactly, so
    /// pixel `(x, y)` shows world cell `[x, x + 1) × [y, y + 1)` in canvas
    /// units and particles near either edge lose the same share of color.
    pub fn render(&self, sink: &mut impl PixelSink) {
        let (w, h) = sink.size();
        let world = self.physics.world;
        let scale = Vec2::new(w as f32 / world.x, h as f32 / world.y);

        for p in &self.particles.particles {
            let canvas_pos = p.pos * scale - Vec2::splat(0.5);
            draw_point(sink, canvas_pos, self.group_color(p.group));
        }
    }

    /// Runs one full frame: derive `dt` from `now_ms`, step, clear, render
    /// and present.
    ///
    /// ### Returns
    /// The time step that was applied, in seconds.
    pub fn frame(&mut self, now_ms: u64, display: &mut impl Display) -> f32 {
        let dt = self.clock.tick(now_ms);
        self.step(dt);
        self.draw(display);
        dt
    }

    /// Clears `display` to the background, renders and presents without
    /// advancing the simulation.
    pub fn draw(&self, display: &mut impl Display) {
        display.clear(self.cfg.background);
        self.render(display);
        display.present();
    }

    /// Makes the next [`World::frame`] start measuring time afresh, e.g.
    /// after the simulation was paused.
    pub fn restart_clock(&mut self) {
        self.clock.reset();
    }

    /// Replaces the attraction matrix with a freshly randomized one.
    pub fn randomize_matrix(&mut self) {
        self.matrix = AttractionMatrix::random(self.cfg.group_count, &mut self.rng);
        info!(matrix = ?self.matrix.to_rows(), "Randomized attraction matrix");
    }

    /// Swaps in a new attraction matrix; it applies from the next step on.
    pub fn replace_matrix(&mut self, matrix: AttractionMatrix) -> Result<(), ConfigError> {
        if matrix.group_count() != self.cfg.group_count {
            return Err(ConfigError::Invalid(
                "attraction matrix size must equal group_count",
            ));
        }
        self.matrix = matrix;
        Ok(())
    }

    /// Updates the physics tunables. World extent, interaction radius and
    /// wrap margin are tied to the grid and must stay as configured.
    pub fn set_physics(&mut self, physics: Physics) -> Result<(), ConfigError> {
        if physics.world != self.physics.world
            || physics.interaction_radius != self.physics.interaction_radius
            || physics.wrap_margin != self.physics.wrap_margin
        {
            return Err(ConfigError::Invalid(
                "world size, interaction radius and wrap margin are fixed after creation",
            ));
        }
        let candidate = Config {
            too_close: physics.too_close,
            force_factor: physics.force_factor,
            friction: physics.friction,
            ..self.cfg.clone()
        };
        candidate.validate()?;
        self.cfg = candidate;
        self.physics = physics;
        Ok(())
    }

    /// Scatters a fresh population with the same config, keeping the matrix.
    pub fn reset(&mut self) {
        self.particles = scatter(&self.cfg, &mut self.rng);
        self.acc = ForceBuffer::with_len(self.particles.len());
        self.clock.reset();
        self.stats = FrameStats::default();
        info!(particles = self.particles.len(), "Reset particle-life world");
    }

    #[inline]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    #[inline]
    pub fn matrix(&self) -> &AttractionMatrix {
        &self.matrix
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Draw color of a group.
    #[inline]
    pub fn group_color(&self, group: GroupId) -> Rgb {
        self.cfg.palette[group]
    }
}

fn scatter(cfg: &Config, rng: &mut SmallRng) -> ParticleSet {
    ParticleSet::random(
        cfg.particle_count,
        cfg.group_count,
        cfg.world_size(),
        cfg.initial_speed,
        rng,
    )
}
