//! World configuration.
//!
//! A [`Config`] is fixed when a [`crate::world::World`] is created. Only the
//! physics tunables in [`Physics`] may be adjusted afterwards, because they
//! do not affect the grid layout.

use crate::{
    attraction::AttractionMatrix,
    color::{DEFAULT_PALETTE, Rgb},
    error::ConfigError,
    grid::GridDims,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative tolerance when checking that cells are twice the interaction radius.
const CELL_SIZE_TOLERANCE: f32 = 1e-4;

/// How velocity decays between frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Friction {
    /// Fixed multiplier applied once per frame, independent of `dt`.
    Factor(f32),
    /// Velocity halves every this many seconds: the per-frame multiplier is
    /// `0.5^(dt / half_life)`.
    HalfLife(f32),
}

impl Friction {
    /// Multiplier applied to velocity for a frame lasting `dt` seconds.
    #[inline]
    pub fn factor(self, dt: f32) -> f32 {
        match self {
            Friction::Factor(f) => f,
            Friction::HalfLife(half_life) => 0.5f32.powf(dt / half_life),
        }
    }

    fn is_valid(self) -> bool {
        match self {
            Friction::Factor(f) => f.is_finite() && f > 0.0 && f <= 1.0,
            Friction::HalfLife(h) => h.is_finite() && h > 0.0,
        }
    }
}

/// Parameters read by the force and integration phases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    /// World extent; positions live in `[0, world.x) × [0, world.y)`.
    pub world: Vec2,
    /// Distance beyond which particles do not interact.
    pub interaction_radius: f32,
    /// Normalized distance below which every pair repels.
    pub too_close: f32,
    /// Global force intensity.
    pub force_factor: f32,
    pub friction: Friction,
    /// Distance from an edge at which a particle is snapped to the far side.
    pub wrap_margin: f32,
}

/// Static configuration for a particle-life world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width of the world in world units.
    pub world_width: f32,
    /// Height of the world in world units.
    pub world_height: f32,
    /// Width of the pixel canvas the world is rendered onto.
    pub canvas_width: u32,
    /// Height of the pixel canvas the world is rendered onto.
    pub canvas_height: u32,
    pub particle_count: usize,
    pub group_count: usize,
    /// Radius of the sphere of influence in world units.
    pub interaction_radius: f32,
    /// Normalized distance below which every pair repels, in `[0, 1)`.
    pub too_close: f32,
    pub force_factor: f32,
    pub friction: Friction,
    pub wrap_margin: f32,
    /// Grid columns; `world_width / grid_cols` must equal `2 * interaction_radius`.
    pub grid_cols: usize,
    /// Grid rows; `world_height / grid_rows` must equal `2 * interaction_radius`.
    pub grid_rows: usize,
    /// Particles stored per cell before further ones are dropped for the frame.
    pub cell_capacity: usize,
    /// Initial velocity components are drawn from `[-initial_speed, initial_speed]`.
    pub initial_speed: f32,
    /// Initial attraction matrix, subject-major. `None` draws one at random.
    pub attraction: Option<Vec<Vec<f32>>>,
    /// Color per group; must have at least `group_count` entries.
    pub palette: Vec<Rgb>,
    pub background: Rgb,
    /// Upper bound on the frame delta fed to the integrator, in seconds.
    pub max_dt: f32,
    /// Optional RNG seed for reproducible worlds.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    /// Desktop preview: a 160×120 canvas over a 4×3 world.
    fn default() -> Self {
        Self {
            world_width: 4.0,
            world_height: 3.0,
            canvas_width: 160,
            canvas_height: 120,
            particle_count: 500,
            group_count: 2,
            interaction_radius: 0.25,
            too_close: 0.3,
            force_factor: 10.0,
            friction: Friction::HalfLife(0.04),
            wrap_margin: 0.01,
            grid_cols: 8,
            grid_rows: 6,
            cell_capacity: 80,
            initial_speed: 0.0,
            attraction: Some(vec![vec![1.0, -1.0], vec![0.2, 0.0]]),
            palette: DEFAULT_PALETTE.to_vec(),
            background: Rgb::BLACK,
            max_dt: 0.1,
            rng_seed: None,
        }
    }
}

impl Config {
    /// 64×32 LED panel over a 2×1 world split into a 4×2 grid.
    pub fn led_matrix() -> Self {
        Self {
            world_width: 2.0,
            world_height: 1.0,
            canvas_width: 64,
            canvas_height: 32,
            particle_count: 12,
            too_close: 0.4,
            friction: Friction::Factor(0.99),
            grid_cols: 4,
            grid_rows: 2,
            initial_speed: 10.0,
            background: Rgb::new(0, 10, 60),
            ..Self::default()
        }
    }

    /// Parses a JSON config and validates it. Missing fields take their
    /// [`Config::default`] values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    pub fn physics(&self) -> Physics {
        Physics {
            world: self.world_size(),
            interaction_radius: self.interaction_radius,
            too_close: self.too_close,
            force_factor: self.force_factor,
            friction: self.friction,
            wrap_margin: self.wrap_margin,
        }
    }

    /// Builds the initial attraction matrix, or `None` if it should be random.
    pub fn initial_matrix(&self) -> Result<Option<AttractionMatrix>, ConfigError> {
        let Some(rows) = &self.attraction else {
            return Ok(None);
        };
        if rows.len() != self.group_count {
            return Err(ConfigError::Invalid(
                "attraction matrix size must equal group_count",
            ));
        }
        AttractionMatrix::from_rows(rows).map(Some)
    }

    /// Validates the configuration, returning the derived grid shape.
    pub fn validate(&self) -> Result<GridDims, ConfigError> {
        if !(self.world_width.is_finite() && self.world_width > 0.0)
            || !(self.world_height.is_finite() && self.world_height > 0.0)
        {
            return Err(ConfigError::Invalid("world dimensions must be positive"));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid("canvas dimensions must be non-zero"));
        }
        if self.group_count == 0 {
            return Err(ConfigError::Invalid("group_count must be non-zero"));
        }
        if self.palette.len() < self.group_count {
            return Err(ConfigError::Palette {
                colors: self.palette.len(),
                groups: self.group_count,
            });
        }
        if !(self.interaction_radius.is_finite() && self.interaction_radius > 0.0) {
            return Err(ConfigError::Invalid("interaction_radius must be positive"));
        }
        if !(0.0..1.0).contains(&self.too_close) {
            return Err(ConfigError::Invalid("too_close must be in [0, 1)"));
        }
        if !(self.force_factor.is_finite() && self.force_factor >= 0.0) {
            return Err(ConfigError::Invalid("force_factor must be non-negative"));
        }
        if !self.friction.is_valid() {
            return Err(ConfigError::Invalid(
                "friction factor must be in (0, 1] and half-life positive",
            ));
        }
        if !(self.wrap_margin > 0.0
            && self.wrap_margin < 0.5 * self.world_width.min(self.world_height))
        {
            return Err(ConfigError::Invalid(
                "wrap_margin must be positive and below half the smaller world extent",
            ));
        }
        if !(self.initial_speed.is_finite() && self.initial_speed >= 0.0) {
            return Err(ConfigError::Invalid("initial_speed must be non-negative"));
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(ConfigError::Invalid("max_dt must be positive"));
        }
        if self.cell_capacity == 0 {
            return Err(ConfigError::Invalid("cell_capacity must be non-zero"));
        }
        if self.grid_cols == 0 || self.grid_rows == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be non-zero"));
        }

        let expected = 2.0 * self.interaction_radius;
        check_axis("columns", self.grid_cols, self.world_width, expected)?;
        check_axis("rows", self.grid_rows, self.world_height, expected)?;

        self.initial_matrix()?;

        Ok(GridDims {
            rows: self.grid_rows,
            cols: self.grid_cols,
            cell_size: expected,
            capacity: self.cell_capacity,
        })
    }
}

fn check_axis(
    axis: &'static str,
    cells: usize,
    extent: f32,
    expected: f32,
) -> Result<(), ConfigError> {
    let cell_size = extent / cells as f32;
    if (cell_size - expected).abs() > CELL_SIZE_TOLERANCE * expected {
        return Err(ConfigError::GridMismatch {
            axis,
            cells,
            extent,
            cell_size,
            expected,
        });
    }
    Ok(())
}
