//! Level definitions
//!
//! Levels are JSON documents: a list of beams and a grid of cell specs
//! (rows of columns). Rotations are given in degrees.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_CROSS_WIDTH, DEFAULT_MIRROR_ROTATION_DEG};
use crate::optics::{Beam, BeamColor, Cell, CellKind, Grid, RefractiveIndices};

/// Errors raised while loading level data
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level grid has no cells")]
    EmptyGrid,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("beam {index} has a zero direction")]
    DegenerateBeam { index: usize },

    #[error("level set contains no levels")]
    NoLevels,
}

/// Beam entry as written in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamDef {
    pub start: [f64; 2],
    pub direction: [f64; 2],
    pub cell: [i32; 2],
    #[serde(default)]
    pub color: BeamColor,
}

/// Cell entry as written in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<BeamColor>,
    /// Degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Cross slot half-width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Glass indices per color; missing colors use the defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<RefractiveIndices>,
}

impl CellDef {
    /// Build the cell; unknown types degrade to `Empty`
    pub fn to_cell(&self) -> Cell {
        let Some(kind) = CellKind::from_str(&self.kind) else {
            log::warn!("Unknown cell type {:?}, using Empty", self.kind);
            return Cell::Empty;
        };

        match kind {
            CellKind::Empty => Cell::Empty,
            CellKind::Block => Cell::Block { color: self.color },
            CellKind::Target => Cell::target(),
            CellKind::FixedMirror => Cell::FixedMirror,
            CellKind::RotatableMirror => {
                Cell::rotatable_mirror_degrees(self.rotation.unwrap_or(DEFAULT_MIRROR_ROTATION_DEG))
            }
            CellKind::GlassBlock => Cell::GlassBlock {
                indices: self.indices.unwrap_or_default(),
            },
            CellKind::Cross => Cell::Cross {
                rotation: self.rotation.unwrap_or(0.0).to_radians(),
                width: self.width.unwrap_or(DEFAULT_CROSS_WIDTH),
            },
        }
    }
}

/// A level as written in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub beams: Vec<BeamDef>,
    pub grid: Vec<Vec<CellDef>>,
}

impl LevelDef {
    pub fn build(&self) -> Result<Level, LevelError> {
        let expected = self.grid.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::EmptyGrid);
        }
        if let Some((row, cells)) = self
            .grid
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(LevelError::RaggedGrid {
                row,
                expected,
                found: cells.len(),
            });
        }

        let rows = self
            .grid
            .iter()
            .map(|row| row.iter().map(CellDef::to_cell).collect())
            .collect();
        let grid = Grid::from_rows(rows).ok_or(LevelError::EmptyGrid)?;

        let beams = self
            .beams
            .iter()
            .enumerate()
            .map(|(index, def)| {
                let direction = DVec2::from(def.direction)
                    .try_normalize()
                    .ok_or(LevelError::DegenerateBeam { index })?;
                let cell = IVec2::from(def.cell);
                if !grid.contains(cell) {
                    log::warn!("Beam {index} starts outside the grid at {cell}");
                }
                Ok(Beam {
                    start: DVec2::from(def.start),
                    direction,
                    cell,
                    color: def.color,
                })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        Ok(Level {
            name: self.name.clone(),
            beams,
            grid,
        })
    }
}

/// A loaded, validated level (template; never mutated during play)
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: Option<String>,
    pub beams: Vec<Beam>,
    pub grid: Grid,
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        serde_json::from_str::<LevelDef>(json)?.build()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelSetDef {
    levels: Vec<LevelDef>,
}

/// Ordered list of levels
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    levels: Vec<Level>,
}

impl LevelSet {
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        Ok(Self { levels })
    }

    /// Parse `{"levels": [...]}`
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let def: LevelSetDef = serde_json::from_str(json)?;
        let levels = def
            .levels
            .iter()
            .map(LevelDef::build)
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} levels", levels.len());
        Self::new(levels)
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_LEVELS;

    const SIMPLE: &str = r#"{
        "beams": [
            { "start": [1.5, 0.0], "direction": [0, 2], "cell": [1, 0], "color": "red" }
        ],
        "grid": [
            [{ "type": "Empty" }, { "type": "RotatableMirror" }, { "type": "Cross", "rotation": 90 }],
            [{ "type": "Block", "color": "blue" }, { "type": "Target" }, { "type": "GlassBlock", "indices": { "red": 1.2 } }]
        ]
    }"#;

    #[test]
    fn test_parse_level() {
        let level = Level::from_json(SIMPLE).unwrap();
        assert_eq!(level.grid.width(), 3);
        assert_eq!(level.grid.height(), 2);

        let beam = &level.beams[0];
        assert_eq!(beam.color, BeamColor::Red);
        assert_eq!(beam.direction, DVec2::Y);
        assert_eq!(beam.cell, IVec2::new(1, 0));

        let mirror = level.grid.get(IVec2::new(1, 0)).unwrap();
        assert!((mirror.rotation().unwrap() - 45f64.to_radians()).abs() < 1e-12);

        match level.grid.get(IVec2::new(2, 0)).unwrap() {
            Cell::Cross { rotation, width } => {
                assert!((rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
                assert_eq!(*width, DEFAULT_CROSS_WIDTH);
            }
            other => panic!("expected cross, got {other:?}"),
        }

        match level.grid.get(IVec2::new(2, 1)).unwrap() {
            Cell::GlassBlock { indices } => {
                assert_eq!(indices.red, 1.2);
                assert_eq!(indices.blue, RefractiveIndices::default().blue);
            }
            other => panic!("expected glass, got {other:?}"),
        }

        assert_eq!(
            level.grid.get(IVec2::new(0, 1)).unwrap().color(),
            Some(BeamColor::Blue)
        );
    }

    #[test]
    fn test_unknown_cell_type_is_empty() {
        let json = r#"{ "beams": [], "grid": [[{ "type": "Wormhole" }, { "type": "Target" }]] }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.grid.get(IVec2::new(0, 0)), Some(&Cell::Empty));
        assert!(level.grid.get(IVec2::new(1, 0)).unwrap().is_target());
    }

    #[test]
    fn test_default_beam_color_is_yellow() {
        let json = r#"{
            "beams": [{ "start": [0.5, 0], "direction": [0, 1], "cell": [0, 0] }],
            "grid": [[{ "type": "Empty" }]]
        }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.beams[0].color, BeamColor::Yellow);
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let json = r#"{ "beams": [], "grid": [[{ "type": "Empty" }], [{ "type": "Empty" }, { "type": "Empty" }]] }"#;
        assert!(matches!(
            Level::from_json(json),
            Err(LevelError::RaggedGrid {
                row: 1,
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let json = r#"{ "beams": [], "grid": [] }"#;
        assert!(matches!(Level::from_json(json), Err(LevelError::EmptyGrid)));
    }

    #[test]
    fn test_zero_direction_rejected() {
        let json = r#"{
            "beams": [{ "start": [0.5, 0], "direction": [0, 0], "cell": [0, 0] }],
            "grid": [[{ "type": "Empty" }]]
        }"#;
        assert!(matches!(
            Level::from_json(json),
            Err(LevelError::DegenerateBeam { index: 0 })
        ));
    }

    #[test]
    fn test_bad_json_reports_error() {
        let err = Level::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LevelError::Json(_)));
        assert!(err.to_string().starts_with("invalid level JSON"));
    }

    #[test]
    fn test_empty_level_set_rejected() {
        assert!(matches!(
            LevelSet::from_json(r#"{ "levels": [] }"#),
            Err(LevelError::NoLevels)
        ));
    }

    #[test]
    fn test_default_levels_load() {
        let set = LevelSet::from_json(DEFAULT_LEVELS).unwrap();
        assert!(set.len() >= 3);
        for i in 0..set.len() {
            let level = set.get(i).unwrap();
            assert!(!level.beams.is_empty());
            assert!(!level.grid.target_positions().is_empty());
        }
    }
}
