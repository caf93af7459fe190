//! Render data export
//!
//! Builds plain triangle lists from the puzzle state. Hosts upload them with
//! whatever graphics API they use; nothing here talks to a GPU.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::sim::PuzzleState;

/// Height of the gauge bar drawn under the grid, in cells
const GAUGE_HEIGHT_CELLS: f32 = 0.25;

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    /// Cells, then beams, then the gauge (draw in order)
    pub triangles: Vec<Vertex>,
    /// Total size in pixels (grid plus gauge)
    pub size: Vec2,
    pub gauge: f64,
    pub cleared: bool,
}

impl RenderFrame {
    /// Build a frame from the latest traced state
    pub fn build(state: &PuzzleState, cell_size: f32) -> Self {
        let grid_size = Vec2::new(state.grid.width() as f32, state.grid.height() as f32) * cell_size;
        let drag = state.drag.map(|c| (c.x as usize, c.y as usize));

        let mut triangles = shapes::grid_cells(&state.grid, cell_size, drag);
        triangles.extend(shapes::beam_paths(&state.beams, cell_size));

        let gauge_height = GAUGE_HEIGHT_CELLS * cell_size;
        triangles.extend(shapes::gauge_bar(
            state.gauge,
            state.is_cleared(),
            Vec2::new(0.0, grid_size.y + gauge_height * 0.5),
            Vec2::new(grid_size.x, gauge_height),
        ));

        Self {
            triangles,
            size: grid_size + Vec2::new(0.0, gauge_height * 2.0),
            gauge: state.gauge,
            cleared: state.is_cleared(),
        }
    }

    /// Vertex data as raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}
