//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::optics::BeamColor;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for puzzle elements
pub mod colors {
    pub const BEAM_YELLOW: [f32; 4] = [1.0, 0.9, 0.2, 0.9];
    pub const BEAM_RED: [f32; 4] = [1.0, 0.25, 0.2, 0.9];
    pub const BEAM_BLUE: [f32; 4] = [0.25, 0.5, 1.0, 0.9];
    pub const BLOCK_NEUTRAL: [f32; 4] = [0.35, 0.35, 0.4, 1.0];
    pub const TARGET_DARK: [f32; 4] = [0.4, 0.2, 0.5, 1.0];
    pub const TARGET_LIT: [f32; 4] = [0.95, 0.7, 1.0, 1.0];
    pub const MIRROR: [f32; 4] = [0.85, 0.9, 0.95, 1.0];
    pub const MIRROR_ACTIVE: [f32; 4] = [0.5, 1.0, 0.6, 1.0];
    pub const GLASS: [f32; 4] = [0.6, 0.85, 1.0, 0.35];
    pub const CROSS_BODY: [f32; 4] = [0.3, 0.3, 0.35, 1.0];
    pub const CROSS_SLOT: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const GAUGE_BACK: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
    pub const GAUGE_FILL: [f32; 4] = [0.3, 0.9, 0.5, 1.0];
    pub const GAUGE_CLEARED: [f32; 4] = [1.0, 0.85, 0.3, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}

/// Color used for a beam (and for blocks that let it through)
pub fn beam_color(color: BeamColor) -> [f32; 4] {
    match color {
        BeamColor::Yellow => colors::BEAM_YELLOW,
        BeamColor::Red => colors::BEAM_RED,
        BeamColor::Blue => colors::BEAM_BLUE,
    }
}
