//! Grid traversal for light beams
//!
//! Each beam alternates between resolving the current cell's interaction and
//! stepping (DDA) to the next cell boundary along its direction, until it
//! leaves the grid, is stopped by a cell, or runs out of interactions.

use glam::{DVec2, IVec2};

use super::beam::{BeamTrace, TraceOutcome};
use super::geometry::{Axis, boundary_normal};
use super::grid::Grid;

/// Result of one DDA step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryStep {
    /// Distance along the direction to the crossing
    pub t: f64,
    /// Cell index offset (one axis is ±1, the other 0)
    pub offset: IVec2,
    /// Normal of the crossed line, facing back against the ray
    pub normal: DVec2,
}

/// Next grid-line crossing from `pos` inside `cell`
///
/// Ties (corners) cross the horizontal line. `None` for a zero direction.
pub fn next_boundary(pos: DVec2, dir: DVec2, cell: IVec2) -> Option<BoundaryStep> {
    let tx = line_distance(pos.x, dir.x, cell.x);
    let ty = line_distance(pos.y, dir.y, cell.y);

    let axis = match (tx, ty) {
        (Some(tx), Some(ty)) if tx < ty => Axis::X,
        (_, Some(_)) => Axis::Y,
        (Some(_), None) => Axis::X,
        (None, None) => return None,
    };

    let (t, offset) = match axis {
        Axis::X => (tx?, IVec2::new(dir.x.signum() as i32, 0)),
        Axis::Y => (ty?, IVec2::new(0, dir.y.signum() as i32)),
    };
    Some(BoundaryStep {
        t,
        offset,
        normal: boundary_normal(dir, axis),
    })
}

fn line_distance(pos: f64, vel: f64, cell: i32) -> Option<f64> {
    if vel == 0.0 {
        return None;
    }
    let line = f64::from(if vel > 0.0 { cell + 1 } else { cell });
    Some(((line - pos) / vel).max(0.0))
}

/// Trace one beam through the grid, filling its path
pub fn trace_beam(grid: &mut Grid, beam: &mut BeamTrace, budget: u32) {
    let mut pos = beam.start;
    let mut dir = beam.direction;
    let mut cell = beam.cell;
    let mut normal = DVec2::Y;

    beam.path.clear();
    beam.path.push(pos);
    beam.interactions = 0;

    while beam.interactions < budget {
        let center = Grid::cell_center(cell);
        let Some(current) = grid.get_mut(cell) else {
            beam.outcome = TraceOutcome::Exited;
            return;
        };

        let result = current.interact(pos - center, dir, normal, beam.color);
        beam.interactions += 1;

        for segment in &result.segments {
            pos = segment.start + center;
            dir = segment.direction;
            beam.path.push(pos);
        }
        if result.terminate {
            beam.outcome = TraceOutcome::Terminated;
            return;
        }

        let Some(step) = next_boundary(pos, dir, cell) else {
            log::warn!("beam stalled with zero direction in cell {cell}");
            beam.outcome = TraceOutcome::Terminated;
            return;
        };
        pos += dir * step.t;
        cell += step.offset;
        normal = step.normal;

        if !grid.contains(cell) {
            beam.path.push(pos);
            beam.outcome = TraceOutcome::Exited;
            return;
        }
    }

    beam.outcome = TraceOutcome::BudgetExhausted;
}

/// Trace every beam; returns how many ended on the budget
pub fn track_rays(grid: &mut Grid, beams: &mut [BeamTrace], budget: u32) -> usize {
    for beam in beams.iter_mut() {
        trace_beam(grid, beam, budget);
    }

    let exhausted = beams
        .iter()
        .filter(|b| b.outcome == TraceOutcome::BudgetExhausted)
        .count();
    if exhausted > 0 {
        log::debug!("{exhausted} beam(s) hit the interaction budget");
    }
    exhausted
}
