//! Browser binding
//!
//! The page owns the canvas, the animation frame loop and DOM events; it
//! forwards them here and draws the returned vertex buffers.

use glam::DVec2;
use wasm_bindgen::prelude::*;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::level::LevelSet;
use crate::renderer::RenderFrame;
use crate::settings::Settings;
use crate::sim::{PuzzleEvent, PuzzlePhase, PuzzleState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Beam Puzzle starting...");
}

/// Puzzle instance driven by the page
#[wasm_bindgen]
pub struct WebPuzzle {
    state: PuzzleState,
    input: TickInput,
    accumulator: f64,
    cell_size: f32,
}

#[wasm_bindgen]
impl WebPuzzle {
    /// Create from a level set JSON document (`{"levels": [...]}`)
    #[wasm_bindgen(constructor)]
    pub fn new(levels_json: &str, cell_size: f32) -> Result<WebPuzzle, JsValue> {
        let levels =
            LevelSet::from_json(levels_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut state = PuzzleState::new(levels, Settings::load());
        state.start();
        Ok(Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            cell_size,
        })
    }

    /// Run fixed-step ticks for `dt` seconds of wall time
    pub fn update(&mut self, dt: f64) {
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input = TickInput::default();
        }
    }

    /// Pixel coordinates relative to the grid's top-left corner
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.input.pointer_down = Some(self.to_grid(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.input.pointer_move = Some(self.to_grid(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer_up = true;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn skip_level(&mut self) {
        self.input.skip_level = true;
    }

    /// Toggle wrapping to the first level after the last, persisted
    pub fn set_loop_levels(&mut self, enabled: bool) {
        self.state.settings.loop_levels = enabled;
        self.state.settings.save();
    }

    pub fn gauge(&self) -> f64 {
        self.state.gauge
    }

    pub fn cleared(&self) -> bool {
        self.state.phase == PuzzlePhase::Cleared
    }

    pub fn finished(&self) -> bool {
        self.state.finished
    }

    pub fn level_index(&self) -> usize {
        self.state.level_index
    }

    pub fn level_name(&self) -> Option<String> {
        self.state.level().and_then(|l| l.name.clone())
    }

    /// Interleaved `[x, y, r, g, b, a]` triangle list for the current frame
    pub fn vertices(&self) -> Vec<f32> {
        let frame = RenderFrame::build(&self.state, self.cell_size);
        bytemuck::cast_slice(&frame.triangles).to_vec()
    }

    /// Names of events since the last call (e.g. "cleared")
    pub fn take_events(&mut self) -> Vec<JsValue> {
        self.state
            .drain_events()
            .into_iter()
            .map(|e| {
                JsValue::from_str(match e {
                    PuzzleEvent::LevelLoaded { .. } => "loaded",
                    PuzzleEvent::LevelCleared { .. } => "cleared",
                    PuzzleEvent::AllLevelsComplete => "complete",
                })
            })
            .collect()
    }
}

impl WebPuzzle {
    fn to_grid(&self, x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y) / self.cell_size as f64
    }
}
