//! Triangle-list generation for grid cells, beams and the gauge
//!
//! All output is in pixels: grid space scaled by `cell_size`.

use glam::{DVec2, Vec2};
use std::f32::consts::PI;

use super::vertex::{Vertex, beam_color, colors};
use crate::consts::{CROSS_RADIUS, DEFAULT_CROSS_WIDTH, MIRROR_HALF_LENGTH};
use crate::optics::{BeamTrace, CellKind, CellView, Grid};
use crate::polar_to_cartesian;

const CIRCLE_SEGMENTS: u32 = 24;

#[inline]
fn to_screen(p: DVec2, cell_size: f32) -> Vec2 {
    p.as_vec2() * cell_size
}

/// Two triangles covering the axis-aligned rectangle `min..max`
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// A line of the given width as two triangles
pub fn thick_line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let (a1, a2, b1, b2) = (a + perp, a - perp, b + perp, b - perp);
    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let p1 = center + polar_to_cartesian(radius, theta1);
        let p2 = center + polar_to_cartesian(radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Beam legs as thick lines, in beam color
pub fn beam_paths(beams: &[BeamTrace], cell_size: f32) -> Vec<Vertex> {
    let width = (cell_size * 0.06).max(1.0);
    let mut vertices = Vec::new();

    for beam in beams {
        let color = beam_color(beam.color);
        for leg in beam.path.windows(2) {
            let a = to_screen(leg[0], cell_size);
            let b = to_screen(leg[1], cell_size);
            vertices.extend(thick_line(a, b, width, color));
        }
    }

    vertices
}

/// Geometry for one non-empty cell
pub fn cell_shape(view: &CellView, cell_size: f32, dragging: bool) -> Vec<Vertex> {
    let min = Vec2::new(view.col as f32, view.row as f32) * cell_size;
    let max = min + Vec2::splat(cell_size);
    let center = (min + max) * 0.5;
    let inset = Vec2::splat(cell_size * 0.08);
    let rotation = view.rotation.unwrap_or(0.0) as f32;

    match view.kind {
        CellKind::Empty => Vec::new(),
        CellKind::Block => {
            let color = view.color.map_or(colors::BLOCK_NEUTRAL, beam_color);
            rect(min + inset, max - inset, color)
        }
        CellKind::Target => {
            let color = if view.lit {
                colors::TARGET_LIT
            } else {
                colors::TARGET_DARK
            };
            circle(center, cell_size * 0.35, color, CIRCLE_SEGMENTS)
        }
        CellKind::FixedMirror => rect(min + inset, max - inset, colors::MIRROR),
        CellKind::RotatableMirror => {
            let half = polar_to_cartesian(MIRROR_HALF_LENGTH as f32 * cell_size, rotation);
            let color = if dragging {
                colors::MIRROR_ACTIVE
            } else {
                colors::MIRROR
            };
            thick_line(center - half, center + half, cell_size * 0.08, color)
        }
        CellKind::GlassBlock => rect(min, max, colors::GLASS),
        CellKind::Cross => {
            let radius = CROSS_RADIUS as f32 * cell_size;
            let slot = 2.0 * view.width.unwrap_or(DEFAULT_CROSS_WIDTH) as f32 * cell_size;
            let along = polar_to_cartesian(radius, rotation);
            let across = polar_to_cartesian(radius, rotation + PI / 2.0);

            let mut vertices = circle(center, radius, colors::CROSS_BODY, CIRCLE_SEGMENTS);
            vertices.extend(thick_line(center - along, center + along, slot, colors::CROSS_SLOT));
            vertices.extend(thick_line(center - across, center + across, slot, colors::CROSS_SLOT));
            vertices
        }
    }
}

/// Every non-empty cell of the grid
pub fn grid_cells(grid: &Grid, cell_size: f32, drag: Option<(usize, usize)>) -> Vec<Vertex> {
    grid.views()
        .iter()
        .flat_map(|view| cell_shape(view, cell_size, drag == Some((view.col, view.row))))
        .collect()
}

/// Horizontal progress bar for the gauge
pub fn gauge_bar(gauge: f64, cleared: bool, origin: Vec2, size: Vec2) -> Vec<Vertex> {
    let fill = gauge.clamp(0.0, 1.0) as f32;
    let color = if cleared {
        colors::GAUGE_CLEARED
    } else {
        colors::GAUGE_FILL
    };

    let mut vertices = rect(origin, origin + size, colors::GAUGE_BACK);
    if fill > 0.0 {
        vertices.extend(rect(origin, origin + Vec2::new(size.x * fill, size.y), color));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{Beam, BeamColor, Cell, TraceOutcome};
    use glam::IVec2;

    #[test]
    fn test_beam_paths_one_quad_per_leg() {
        let mut trace = Beam {
            start: DVec2::new(0.5, 0.0),
            direction: DVec2::Y,
            cell: IVec2::ZERO,
            color: BeamColor::Red,
        }
        .instantiate();
        trace.path = vec![DVec2::new(0.5, 0.0), DVec2::new(0.5, 1.5), DVec2::new(2.0, 1.5)];
        trace.outcome = TraceOutcome::Exited;

        let vertices = beam_paths(&[trace], 40.0);
        assert_eq!(vertices.len(), 12);
        assert!(vertices.iter().all(|v| v.color == colors::BEAM_RED));
    }

    #[test]
    fn test_grid_cells_skip_empty() {
        let mut grid = Grid::new(2, 2);
        grid.set(IVec2::new(1, 1), Cell::Block { color: None });
        let vertices = grid_cells(&grid, 32.0, None);
        assert_eq!(vertices.len(), 6);
        // Inset block stays inside its cell
        assert!(vertices.iter().all(|v| v.position[0] > 32.0 && v.position[1] > 32.0));
    }

    #[test]
    fn test_target_color_follows_lit_flag() {
        let mut grid = Grid::new(1, 1);
        grid.set(IVec2::ZERO, Cell::Target { receive: true });
        let vertices = grid_cells(&grid, 10.0, None);
        assert!(vertices.iter().all(|v| v.color == colors::TARGET_LIT));
    }

    #[test]
    fn test_cross_slot_matches_level_width() {
        let mut grid = Grid::new(1, 1);
        grid.set(
            IVec2::ZERO,
            Cell::Cross {
                rotation: 0.0,
                width: 0.12,
            },
        );
        let vertices = grid_cells(&grid, 100.0, None);
        let body = (CIRCLE_SEGMENTS * 3) as usize;
        assert_eq!(vertices.len(), body + 12);

        // Horizontal arm spans y = 50 ± 12
        let arm = &vertices[body..body + 6];
        let min_y = arm.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        let max_y = arm.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        assert!((min_y - 38.0).abs() < 1e-3);
        assert!((max_y - 62.0).abs() < 1e-3);
    }

    #[test]
    fn test_gauge_bar_fill() {
        let empty = gauge_bar(0.0, false, Vec2::ZERO, Vec2::new(100.0, 10.0));
        assert_eq!(empty.len(), 6);

        let half = gauge_bar(0.5, false, Vec2::ZERO, Vec2::new(100.0, 10.0));
        assert_eq!(half.len(), 12);
        let max_x = half[6..].iter().map(|v| v.position[0]).fold(0.0, f32::max);
        assert!((max_x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let vertices = rect(Vec2::ZERO, Vec2::ONE, colors::GLASS);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * std::mem::size_of::<Vertex>());
    }
}
