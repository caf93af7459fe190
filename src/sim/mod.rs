//! Puzzle simulation module
//!
//! Game-side logic on top of the optical core:
//! - Level lifecycle and the working grid
//! - Gauge and win condition
//! - Drag-to-rotate input
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{PuzzleEvent, PuzzlePhase, PuzzleState};
pub use tick::{TickInput, check_win_condition, tick, update_gauge};
