//! Beam Puzzle - A light-ray grid puzzle
//!
//! Core modules:
//! - `optics`: Ray tracing core (geometry, cells, grid traversal)
//! - `sim`: Puzzle state, gauge and level progression
//! - `level`: JSON level definitions
//! - `renderer`: Vertex export for host renderers
//! - `settings`: Data-driven tuning

pub mod level;
pub mod optics;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use level::{Level, LevelError, LevelSet};
pub use settings::Settings;

use glam::{DVec2, Vec2};

/// Built-in level set shipped with the game
pub const DEFAULT_LEVELS: &str = include_str!("../levels/default.json");

/// Game configuration constants
pub mod consts {
    /// Host simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Max ray-cell interactions per beam before it is dropped
    pub const INTERACTION_BUDGET: u32 = 100;
    /// Max internal bounces while searching for a glass exit face
    pub const GLASS_BOUNCE_LIMIT: u32 = 100;

    /// Gauge fill per second while every target is lit
    pub const GAUGE_FILL_RATE: f64 = 0.5;
    /// Gauge drain per second while any target is dark
    pub const GAUGE_DECAY_RATE: f64 = 0.5;
    /// Seconds between clearing a level and loading the next one
    pub const CLEAR_DELAY: f64 = 2.0;

    /// Rotatable mirrors extend this far from the cell center on each side
    pub const MIRROR_HALF_LENGTH: f64 = 0.5;
    /// Radius of the cross cell's circular body
    pub const CROSS_RADIUS: f64 = 0.5;
    /// Default half-width of the cross slot (cell units)
    pub const DEFAULT_CROSS_WIDTH: f64 = 0.1;
    /// Default rotatable mirror angle in degrees
    pub const DEFAULT_MIRROR_ROTATION_DEG: f64 = 45.0;

    /// Refractive index of the surrounding air
    pub const AIR_INDEX: f64 = 1.0;
    /// Default glass indices per beam color
    pub const GLASS_INDEX_RED: f64 = 1.3;
    pub const GLASS_INDEX_YELLOW: f64 = 1.5;
    pub const GLASS_INDEX_BLUE: f64 = 1.7;

    /// Below this cross product magnitude a ray and segment are parallel
    pub const PARALLEL_EPSILON: f64 = 1e-9;
}

/// Normalized angle to [-π, π)
///
/// Non-finite input stays non-finite (NaN).
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if (-PI..PI).contains(&angle) {
        return angle;
    }
    (angle + PI).rem_euclid(TAU) - PI
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: DVec2, angle: f64) -> DVec2 {
    DVec2::from_angle(angle).rotate(v)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
