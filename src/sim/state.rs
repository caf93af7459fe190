//! Puzzle state and level lifecycle
//!
//! `PuzzleState` is the single context object hosts thread through
//! load/tick/render. It owns the working copy of the current level's grid;
//! level templates stay untouched so a restart is a plain reload.

use glam::IVec2;

use crate::level::{Level, LevelSet};
use crate::optics::{BeamTrace, Grid, track_rays};
use crate::settings::Settings;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzlePhase {
    /// Level loaded, gauge not ticking yet
    NotRunning,
    /// Active play: gauge follows the targets
    Running,
    /// Gauge filled; waiting out the delay before the next level
    Cleared,
}

/// Notifications for the host (sound, UI), drained each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleEvent {
    LevelLoaded { index: usize },
    LevelCleared { index: usize },
    AllLevelsComplete,
}

#[derive(Debug, Clone)]
pub struct PuzzleState {
    pub settings: Settings,
    levels: LevelSet,
    /// Index of the current level
    pub level_index: usize,
    /// Working grid (rotations change during play)
    pub grid: Grid,
    /// Target positions in the working grid
    pub targets: Vec<IVec2>,
    /// Beams from the latest trace pass
    pub beams: Vec<BeamTrace>,
    /// Progress toward clearing, in [0, 1]
    pub gauge: f64,
    pub phase: PuzzlePhase,
    /// Every target was lit in the latest trace pass
    pub all_lit: bool,
    /// Grid changed since the last trace
    pub dirty: bool,
    /// Rotatable cell currently being dragged
    pub drag: Option<IVec2>,
    /// Seconds left before the next level loads (while cleared)
    pub clear_timer: f64,
    /// The last level has been cleared
    pub finished: bool,
    events: Vec<PuzzleEvent>,
}

impl PuzzleState {
    /// Create a state with the first level loaded, not yet running
    pub fn new(levels: LevelSet, settings: Settings) -> Self {
        let first = levels
            .get(0)
            .map(|l| l.grid.clone())
            .unwrap_or_else(|| Grid::new(0, 0));
        let mut state = Self {
            settings,
            levels,
            level_index: 0,
            grid: first,
            targets: Vec::new(),
            beams: Vec::new(),
            gauge: 0.0,
            phase: PuzzlePhase::NotRunning,
            all_lit: false,
            dirty: true,
            drag: None,
            clear_timer: 0.0,
            finished: false,
            events: Vec::new(),
        };
        state.load_level(0);
        state
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    /// Template of the current level
    pub fn level(&self) -> Option<&Level> {
        self.levels.get(self.level_index)
    }

    /// Replace the working grid with a fresh copy of a level
    ///
    /// Keeps the current phase unless it was `Cleared`, which resumes play.
    pub fn load_level(&mut self, index: usize) -> bool {
        let Some(level) = self.levels.get(index) else {
            log::warn!("No level at index {index}");
            return false;
        };

        self.grid = level.grid.clone();
        self.targets = self.grid.target_positions();
        self.level_index = index;
        self.beams.clear();
        self.gauge = 0.0;
        self.all_lit = false;
        self.dirty = true;
        self.drag = None;
        self.clear_timer = 0.0;
        self.finished = false;
        if self.phase == PuzzlePhase::Cleared {
            self.phase = PuzzlePhase::Running;
        }

        log::info!(
            "Level {} ({}): {}x{} grid, {} beams, {} targets",
            index + 1,
            level.name.as_deref().unwrap_or("untitled"),
            self.grid.width(),
            self.grid.height(),
            level.beams.len(),
            self.targets.len()
        );
        self.events.push(PuzzleEvent::LevelLoaded { index });
        true
    }

    /// Begin ticking the gauge
    pub fn start(&mut self) {
        if self.phase == PuzzlePhase::NotRunning {
            self.phase = PuzzlePhase::Running;
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.phase == PuzzlePhase::Cleared
    }

    /// Rotate a cell of the working grid; marks the state dirty on success
    pub fn rotate_cell(&mut self, cell: IVec2, angle: f64) -> bool {
        let rotated = self.grid.set_rotation(cell, angle);
        if rotated {
            self.dirty = true;
        }
        rotated
    }

    /// Reset targets and trace fresh copies of the level's beams
    pub fn retrace(&mut self) {
        self.grid.reset_targets();

        let Some(level) = self.levels.get(self.level_index) else {
            self.beams.clear();
            self.all_lit = false;
            return;
        };
        self.beams = level.beams.iter().map(|b| b.instantiate()).collect();
        track_rays(&mut self.grid, &mut self.beams, self.settings.interaction_budget);

        self.all_lit = self.grid.all_lit(&self.targets);
        self.dirty = false;
        log::debug!(
            "Traced {} beams, {} of {} targets lit",
            self.beams.len(),
            self.lit_count(),
            self.targets.len()
        );
    }

    /// Number of targets lit in the latest pass
    pub fn lit_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|&&pos| self.grid.get(pos).is_some_and(|c| c.is_lit()))
            .count()
    }

    pub(crate) fn push_event(&mut self, event: PuzzleEvent) {
        self.events.push(event);
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }
}
