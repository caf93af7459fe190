//! Per-frame puzzle update
//!
//! Applies pointer input, retraces when the grid changed, and drives the
//! gauge and the NotRunning -> Running -> Cleared phase machine.

use glam::{DVec2, IVec2};

use super::state::{PuzzleEvent, PuzzlePhase, PuzzleState};
use crate::optics::Grid;
use crate::settings::Settings;

/// Input commands for a single tick
///
/// Pointer positions are in grid space (screen pixels divided by the cell
/// size, relative to the grid origin).
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer pressed at this position
    pub pointer_down: Option<DVec2>,
    /// Pointer moved to this position
    pub pointer_move: Option<DVec2>,
    /// Pointer released
    pub pointer_up: bool,
    /// Reload the current level
    pub restart: bool,
    /// Skip to next level (debug/testing)
    pub skip_level: bool,
}

/// True only when there is at least one target and every target is lit
pub fn check_win_condition(grid: &Grid, targets: &[IVec2]) -> bool {
    grid.all_lit(targets)
}

/// Gauge after `dt` seconds of targets being lit (or not)
pub fn update_gauge(gauge: f64, lit: bool, dt: f64, settings: &Settings) -> f64 {
    if lit {
        (gauge + settings.gauge_fill_rate * dt).min(1.0)
    } else {
        (gauge - settings.gauge_decay_rate * dt).max(0.0)
    }
}

/// Advance the puzzle by `dt` seconds
pub fn tick(state: &mut PuzzleState, input: &TickInput, dt: f64) {
    if input.restart {
        let index = state.level_index;
        state.load_level(index);
        state.phase = PuzzlePhase::Running;
        return;
    }

    if input.skip_level {
        advance_level(state);
        return;
    }

    match state.phase {
        PuzzlePhase::Cleared => {
            if state.finished {
                return;
            }
            state.clear_timer -= dt;
            if state.clear_timer <= 0.0 {
                advance_level(state);
            }
        }
        PuzzlePhase::NotRunning => {
            handle_pointer(state, input);
            if state.dirty {
                state.retrace();
            }
        }
        PuzzlePhase::Running => {
            handle_pointer(state, input);
            if state.dirty {
                state.retrace();
            }

            state.gauge = update_gauge(state.gauge, state.all_lit, dt, &state.settings);
            if state.gauge >= 1.0 {
                state.phase = PuzzlePhase::Cleared;
                state.clear_timer = state.settings.clear_delay;
                state.drag = None;
                log::info!("Level {} cleared", state.level_index + 1);
                state.push_event(PuzzleEvent::LevelCleared {
                    index: state.level_index,
                });
            }
        }
    }
}

/// Drag-to-rotate handling
fn handle_pointer(state: &mut PuzzleState, input: &TickInput) {
    if let Some(pos) = input.pointer_down {
        state.drag = state
            .grid
            .cell_at(pos)
            .filter(|&cell| state.grid.get(cell).is_some_and(|c| c.is_rotatable()));
    }

    if let (Some(pos), Some(cell)) = (input.pointer_move, state.drag) {
        let offset = pos - Grid::cell_center(cell);
        if offset != DVec2::ZERO {
            state.rotate_cell(cell, offset.y.atan2(offset.x));
        }
    }

    if input.pointer_up {
        state.drag = None;
    }
}

/// Load the next level, or finish the run after the last one
fn advance_level(state: &mut PuzzleState) {
    let next = state.level_index + 1;
    if next < state.levels().len() {
        state.load_level(next);
        state.phase = PuzzlePhase::Running;
    } else if state.settings.loop_levels {
        state.load_level(0);
        state.phase = PuzzlePhase::Running;
    } else if !state.finished {
        log::info!("All {} levels complete", state.levels().len());
        state.phase = PuzzlePhase::Cleared;
        state.finished = true;
        state.push_event(PuzzleEvent::AllLevelsComplete);
    }
}
