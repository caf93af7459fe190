//! Beam templates and per-pass trace instances

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

/// Light color carried by a beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeamColor {
    #[default]
    Yellow,
    Red,
    Blue,
}

impl BeamColor {
    pub const ALL: [BeamColor; 3] = [BeamColor::Yellow, BeamColor::Red, BeamColor::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeamColor::Yellow => "yellow",
            BeamColor::Red => "red",
            BeamColor::Blue => "blue",
        }
    }
}

/// Beam as defined by a level (never mutated by tracing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    /// Emission point in grid space
    pub start: DVec2,
    /// Unit direction
    pub direction: DVec2,
    /// Cell containing `start`
    pub cell: IVec2,
    pub color: BeamColor,
}

impl Beam {
    /// Fresh trace state for one pass
    pub fn instantiate(&self) -> BeamTrace {
        BeamTrace {
            start: self.start,
            direction: self.direction,
            cell: self.cell,
            color: self.color,
            path: Vec::new(),
            outcome: TraceOutcome::Pending,
            interactions: 0,
        }
    }
}

/// How a traced beam came to a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceOutcome {
    /// Not traced yet
    #[default]
    Pending,
    /// Left the grid
    Exited,
    /// Stopped by a cell (blocker, target, cross body)
    Terminated,
    /// Hit the interaction budget (bounce loop)
    BudgetExhausted,
}

/// A beam being traced, with its accumulated waypoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamTrace {
    pub start: DVec2,
    pub direction: DVec2,
    pub cell: IVec2,
    pub color: BeamColor,
    /// Waypoints in grid space, starting at `start`
    pub path: Vec<DVec2>,
    pub outcome: TraceOutcome,
    /// Cell interactions used
    pub interactions: u32,
}

impl BeamTrace {
    /// Final waypoint, if traced
    pub fn end(&self) -> Option<DVec2> {
        self.path.last().copied()
    }

    /// Direction of the last leg
    pub fn final_direction(&self) -> Option<DVec2> {
        match self.path.as_slice() {
            [.., a, b] => Some((*b - *a).normalize_or_zero()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_leaves_template_untouched() {
        let template = Beam {
            start: DVec2::new(1.5, 0.0),
            direction: DVec2::Y,
            cell: IVec2::new(1, 0),
            color: BeamColor::Red,
        };
        let mut trace = template.instantiate();
        trace.path.push(DVec2::new(1.5, 3.0));
        trace.direction = DVec2::X;

        assert_eq!(template.direction, DVec2::Y);
        assert_eq!(trace.outcome, TraceOutcome::Pending);
        assert_eq!(template.instantiate().path.len(), 0);
    }

    #[test]
    fn test_color_serde_lowercase() {
        let c: BeamColor = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(c, BeamColor::Blue);
        assert_eq!(serde_json::to_string(&BeamColor::Red).unwrap(), "\"red\"");
    }
}
