//! Grid cell variants and their ray interaction
//!
//! Every cell receives the ray in cell-local coordinates (origin at the cell
//! center, roughly [-0.5, 0.5] per axis) and answers with the legs the ray
//! takes inside it plus whether the ray stops there.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::beam::BeamColor;
use super::cross::cross_interact;
use super::geometry::{RaySegment, line_segment_intersection, reflect};
use super::glass::glass_interact;
use crate::consts::*;
use crate::normalize_angle;

/// Result of a ray entering a cell
///
/// - no segments, not terminated: the ray passes through untouched
/// - segments, terminated: the ray ends at the last segment
/// - segments, not terminated: the ray continues from the last segment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    pub segments: Vec<RaySegment>,
    pub terminate: bool,
}

impl Interaction {
    pub fn pass() -> Self {
        Self::default()
    }

    /// Ray stops at `point`
    pub fn stop(point: DVec2, direction: DVec2) -> Self {
        Self {
            segments: vec![RaySegment::new(point, direction)],
            terminate: true,
        }
    }

    /// Ray leaves `point` heading along `direction`
    pub fn redirect(point: DVec2, direction: DVec2) -> Self {
        Self {
            segments: vec![RaySegment::new(point, direction)],
            terminate: false,
        }
    }

    pub fn passes_through(&self) -> bool {
        self.segments.is_empty() && !self.terminate
    }
}

/// Refractive index of a glass block per beam color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefractiveIndices {
    pub yellow: f64,
    pub red: f64,
    pub blue: f64,
}

impl Default for RefractiveIndices {
    fn default() -> Self {
        Self {
            yellow: GLASS_INDEX_YELLOW,
            red: GLASS_INDEX_RED,
            blue: GLASS_INDEX_BLUE,
        }
    }
}

impl RefractiveIndices {
    /// Same index for every color
    pub fn uniform(index: f64) -> Self {
        Self {
            yellow: index,
            red: index,
            blue: index,
        }
    }

    pub fn get(&self, color: BeamColor) -> f64 {
        match color {
            BeamColor::Yellow => self.yellow,
            BeamColor::Red => self.red,
            BeamColor::Blue => self.blue,
        }
    }
}

/// Cell type tag (for rendering, logging and level files)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Block,
    Target,
    FixedMirror,
    RotatableMirror,
    GlassBlock,
    Cross,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Empty => "Empty",
            CellKind::Block => "Block",
            CellKind::Target => "Target",
            CellKind::FixedMirror => "FixedMirror",
            CellKind::RotatableMirror => "RotatableMirror",
            CellKind::GlassBlock => "GlassBlock",
            CellKind::Cross => "Cross",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Empty" => Some(CellKind::Empty),
            "Block" => Some(CellKind::Block),
            "Target" => Some(CellKind::Target),
            "FixedMirror" => Some(CellKind::FixedMirror),
            "RotatableMirror" => Some(CellKind::RotatableMirror),
            "GlassBlock" => Some(CellKind::GlassBlock),
            "Cross" => Some(CellKind::Cross),
            _ => None,
        }
    }
}

/// One grid square's optical behavior
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Opaque except to beams of its own color (`None` stops everything)
    Block { color: Option<BeamColor> },
    /// Stops every beam and records that it was lit this pass
    Target { receive: bool },
    /// Reflects off the face the ray entered through
    FixedMirror,
    /// Mirror segment through the center, angle in radians
    RotatableMirror { rotation: f64 },
    GlassBlock { indices: RefractiveIndices },
    /// Round body with a cross-shaped slot; `width` is the slot half-width
    Cross { rotation: f64, width: f64 },
}

impl Cell {
    pub fn target() -> Self {
        Cell::Target { receive: false }
    }

    pub fn rotatable_mirror_degrees(degrees: f64) -> Self {
        Cell::RotatableMirror {
            rotation: degrees.to_radians(),
        }
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Block { .. } => CellKind::Block,
            Cell::Target { .. } => CellKind::Target,
            Cell::FixedMirror => CellKind::FixedMirror,
            Cell::RotatableMirror { .. } => CellKind::RotatableMirror,
            Cell::GlassBlock { .. } => CellKind::GlassBlock,
            Cell::Cross { .. } => CellKind::Cross,
        }
    }

    pub fn rotation(&self) -> Option<f64> {
        match self {
            Cell::RotatableMirror { rotation } | Cell::Cross { rotation, .. } => Some(*rotation),
            _ => None,
        }
    }

    pub fn color(&self) -> Option<BeamColor> {
        match self {
            Cell::Block { color } => *color,
            _ => None,
        }
    }

    /// Slot half-width of a cross
    pub fn slot_width(&self) -> Option<f64> {
        match self {
            Cell::Cross { width, .. } => Some(*width),
            _ => None,
        }
    }

    /// Whether the player may drag-rotate this cell
    pub fn is_rotatable(&self) -> bool {
        matches!(self, Cell::RotatableMirror { .. })
    }

    /// Set the rotation of a rotatable cell
    ///
    /// Returns false for other cells and for non-finite angles.
    pub fn set_rotation(&mut self, angle: f64) -> bool {
        match self {
            Cell::RotatableMirror { rotation } if angle.is_finite() => {
                *rotation = normalize_angle(angle);
                true
            }
            _ => false,
        }
    }

    pub fn is_target(&self) -> bool {
        matches!(self, Cell::Target { .. })
    }

    /// Lit flag of a target (false for other cells)
    pub fn is_lit(&self) -> bool {
        matches!(self, Cell::Target { receive: true })
    }

    pub fn reset_receive(&mut self) {
        if let Cell::Target { receive } = self {
            *receive = false;
        }
    }

    /// Trace a ray through this cell
    ///
    /// `normal` is the normal of the boundary the ray crossed to get here,
    /// facing back against the ray.
    pub fn interact(
        &mut self,
        local_pos: DVec2,
        direction: DVec2,
        normal: DVec2,
        color: BeamColor,
    ) -> Interaction {
        match self {
            Cell::Empty => Interaction::pass(),
            Cell::Block { color: own } => block_interact(*own == Some(color), local_pos, direction),
            Cell::Target { receive } => {
                *receive = true;
                block_interact(false, local_pos, direction)
            }
            Cell::FixedMirror => Interaction::redirect(local_pos, reflect(direction, normal)),
            Cell::RotatableMirror { rotation } => mirror_interact(*rotation, local_pos, direction),
            Cell::GlassBlock { indices } => {
                glass_interact(indices.get(color), local_pos, direction, normal)
            }
            Cell::Cross { rotation, width } => {
                cross_interact(*rotation, *width, local_pos, direction)
            }
        }
    }
}

/// Shared opaque-cell behavior: pass when transparent, otherwise stop at entry
fn block_interact(transparent: bool, local_pos: DVec2, direction: DVec2) -> Interaction {
    if transparent {
        Interaction::pass()
    } else {
        Interaction::stop(local_pos, direction)
    }
}

/// Reflect off a finite mirror segment through the cell center
fn mirror_interact(rotation: f64, local_pos: DVec2, direction: DVec2) -> Interaction {
    let half = DVec2::from_angle(rotation) * MIRROR_HALF_LENGTH;
    let Some(hit) = line_segment_intersection(local_pos, direction, -half, half) else {
        return Interaction::pass();
    };

    let mut normal = half.perp().normalize();
    if normal.dot(direction) > 0.0 {
        normal = -normal;
    }
    Interaction::redirect(hit, reflect(direction, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::geometry::dot;

    const ENTRY_TOP: DVec2 = DVec2::new(0.0, -0.5);

    #[test]
    fn test_empty_passes() {
        let mut cell = Cell::Empty;
        let result = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, BeamColor::Yellow);
        assert!(result.passes_through());
    }

    #[test]
    fn test_block_passes_own_color_only() {
        let mut cell = Cell::Block {
            color: Some(BeamColor::Red),
        };
        let same = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, BeamColor::Red);
        assert_eq!(same, Interaction::pass());

        for other in [BeamColor::Yellow, BeamColor::Blue] {
            let result = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, other);
            assert!(result.terminate);
            assert_eq!(result.segments, vec![RaySegment::new(ENTRY_TOP, DVec2::Y)]);
        }
    }

    #[test]
    fn test_colorless_block_stops_everything() {
        let mut cell = Cell::Block { color: None };
        for color in BeamColor::ALL {
            assert!(cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, color).terminate);
        }
    }

    #[test]
    fn test_target_stops_and_records() {
        let mut cell = Cell::target();
        assert!(!cell.is_lit());
        let result = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, BeamColor::Blue);
        assert!(result.terminate);
        assert!(cell.is_lit());

        cell.reset_receive();
        assert!(!cell.is_lit());
    }

    #[test]
    fn test_fixed_mirror_reflects_about_entry_normal() {
        let mut cell = Cell::FixedMirror;
        let d = DVec2::new(0.6, 0.8);
        let n = DVec2::NEG_Y;
        let result = cell.interact(ENTRY_TOP, d, n, BeamColor::Yellow);
        assert!(!result.terminate);
        let out = result.segments[0].direction;
        assert!((dot(out, n) + dot(d, n)).abs() < 1e-12);
        assert!((out.length() - d.length()).abs() < 1e-12);
        assert_eq!(result.segments[0].start, ENTRY_TOP);
    }

    #[test]
    fn test_rotatable_mirror_45_turns_down_to_horizontal() {
        let mut cell = Cell::rotatable_mirror_degrees(45.0);
        let result = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, BeamColor::Yellow);
        assert!(!result.terminate);
        let seg = result.segments[0];
        assert!(seg.start.abs_diff_eq(DVec2::ZERO, 1e-9));
        assert!((seg.direction.x.abs() - 1.0).abs() < 1e-6);
        assert!(seg.direction.y.abs() < 1e-6);
    }

    #[test]
    fn test_rotatable_mirror_normal_faces_ray_from_either_side() {
        let mut cell = Cell::rotatable_mirror_degrees(45.0);
        let down = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, BeamColor::Yellow);
        let up = cell.interact(DVec2::new(0.0, 0.5), DVec2::NEG_Y, DVec2::Y, BeamColor::Yellow);
        assert!(down.segments[0].direction.abs_diff_eq(DVec2::X, 1e-9));
        assert!(up.segments[0].direction.abs_diff_eq(DVec2::NEG_X, 1e-9));
    }

    #[test]
    fn test_rotatable_mirror_edge_on_passes() {
        let mut cell = Cell::RotatableMirror { rotation: 0.0 };
        let result = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, BeamColor::Yellow);
        assert!(!result.segments.is_empty());

        // Vertical mirror seen edge-on by a vertical ray
        let mut cell = Cell::RotatableMirror {
            rotation: std::f64::consts::FRAC_PI_2,
        };
        let result = cell.interact(ENTRY_TOP, DVec2::Y, DVec2::NEG_Y, BeamColor::Yellow);
        assert!(result.passes_through());
    }

    #[test]
    fn test_set_rotation_only_on_rotatable() {
        let mut mirror = Cell::rotatable_mirror_degrees(45.0);
        assert!(mirror.set_rotation(1.0));
        assert_eq!(mirror.rotation(), Some(1.0));

        let mut cross = Cell::Cross {
            rotation: 0.0,
            width: 0.1,
        };
        assert!(!cross.set_rotation(1.0));
        assert_eq!(cross.rotation(), Some(0.0));
        assert_eq!(cross.slot_width(), Some(0.1));
    }

    #[test]
    fn test_set_rotation_rejects_non_finite() {
        let mut mirror = Cell::rotatable_mirror_degrees(45.0);
        assert!(!mirror.set_rotation(f64::INFINITY));
        assert!(!mirror.set_rotation(f64::NEG_INFINITY));
        assert!(!mirror.set_rotation(f64::NAN));
        assert!((mirror.rotation().unwrap() - 45f64.to_radians()).abs() < 1e-12);

        assert!(mirror.set_rotation(7.0 * std::f64::consts::PI));
        assert!((mirror.rotation().unwrap().abs() - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn test_kind_round_trips_names() {
        for kind in [
            CellKind::Empty,
            CellKind::Block,
            CellKind::Target,
            CellKind::FixedMirror,
            CellKind::RotatableMirror,
            CellKind::GlassBlock,
            CellKind::Cross,
        ] {
            assert_eq!(CellKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(CellKind::from_str("Portal"), None);
    }
}
