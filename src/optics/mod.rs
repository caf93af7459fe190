//! Optical core: geometry, cells, grid and beam tracing
//!
//! Pure and synchronous: no rendering or platform dependencies. A trace pass
//! mutates only the beams it is given and the targets' lit flags.

pub mod beam;
pub mod cell;
pub mod cross;
pub mod geometry;
pub mod glass;
pub mod grid;
pub mod tracer;

pub use beam::{Beam, BeamColor, BeamTrace, TraceOutcome};
pub use cell::{Cell, CellKind, Interaction, RefractiveIndices};
pub use geometry::{RaySegment, dot, line_segment_intersection, reflect, refract};
pub use grid::{CellView, Grid};
pub use tracer::{next_boundary, trace_beam, track_rays};
