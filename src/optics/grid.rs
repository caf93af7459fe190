//! Fixed-size grid of optical cells
//!
//! Grid space uses cell units: cell `(col, row)` covers
//! `[col, col + 1] x [row, row + 1]`, with `y` growing downward.

use glam::{DVec2, IVec2};
use serde::Serialize;

use super::beam::BeamColor;
use super::cell::{Cell, CellKind};

/// Render-facing snapshot of one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellView {
    pub col: usize,
    pub row: usize,
    pub kind: CellKind,
    pub rotation: Option<f64>,
    pub color: Option<BeamColor>,
    /// Cross slot half-width
    pub width: Option<f64>,
    pub lit: bool,
}

/// Row-major cell storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Grid of empty cells
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Build from rows; `None` if the rows differ in length
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub fn get(&self, cell: IVec2) -> Option<&Cell> {
        self.index(cell).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, cell: IVec2) -> Option<&mut Cell> {
        self.index(cell).map(|i| &mut self.cells[i])
    }

    /// Replace a cell; returns false when out of bounds
    pub fn set(&mut self, cell: IVec2, value: Cell) -> bool {
        match self.get_mut(cell) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Center of a cell in grid space
    #[inline]
    pub fn cell_center(cell: IVec2) -> DVec2 {
        cell.as_dvec2() + DVec2::splat(0.5)
    }

    /// Cell under a grid-space point
    pub fn cell_at(&self, point: DVec2) -> Option<IVec2> {
        let cell = point.floor().as_ivec2();
        self.contains(cell).then_some(cell)
    }

    /// Rotate a rotatable cell; false if out of bounds or not rotatable
    pub fn set_rotation(&mut self, cell: IVec2, angle: f64) -> bool {
        self.get_mut(cell).is_some_and(|c| c.set_rotation(angle))
    }

    /// Positions of every target, in row-major order
    pub fn target_positions(&self) -> Vec<IVec2> {
        self.iter()
            .filter(|(_, cell)| cell.is_target())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Clear every target's lit flag before a trace pass
    pub fn reset_targets(&mut self) {
        for cell in &mut self.cells {
            cell.reset_receive();
        }
    }

    /// True only when there is at least one target and all of them are lit
    pub fn all_lit(&self, targets: &[IVec2]) -> bool {
        !targets.is_empty()
            && targets
                .iter()
                .all(|&pos| self.get(pos).is_some_and(Cell::is_lit))
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Cell)> {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (IVec2::new((i % width) as i32, (i / width) as i32), cell)
        })
    }

    /// Snapshot of every non-empty cell for renderers
    pub fn views(&self) -> Vec<CellView> {
        self.iter()
            .filter(|(_, cell)| cell.kind() != CellKind::Empty)
            .map(|(pos, cell)| CellView {
                col: pos.x as usize,
                row: pos.y as usize,
                kind: cell.kind(),
                rotation: cell.rotation(),
                color: cell.color(),
                width: cell.slot_width(),
                lit: cell.is_lit(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(vec![
            vec![Cell::Empty, Cell::rotatable_mirror_degrees(45.0), Cell::Empty],
            vec![Cell::target(), Cell::FixedMirror, Cell::target()],
        ])
        .unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![Cell::Empty, Cell::Empty], vec![Cell::Empty]];
        assert!(Grid::from_rows(rows).is_none());
    }

    #[test]
    fn test_bounds_and_lookup() {
        let grid = sample();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.contains(IVec2::new(2, 1)));
        assert!(!grid.contains(IVec2::new(3, 0)));
        assert!(!grid.contains(IVec2::new(0, -1)));
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(&Cell::FixedMirror));
        assert!(grid.get(IVec2::new(-1, 0)).is_none());
    }

    #[test]
    fn test_cell_at_and_center() {
        let grid = sample();
        assert_eq!(grid.cell_at(DVec2::new(1.2, 0.9)), Some(IVec2::new(1, 0)));
        assert_eq!(grid.cell_at(DVec2::new(3.5, 0.5)), None);
        assert_eq!(grid.cell_at(DVec2::new(-0.1, 0.5)), None);
        assert_eq!(Grid::cell_center(IVec2::new(2, 1)), DVec2::new(2.5, 1.5));
    }

    #[test]
    fn test_set_rotation_goes_through_grid() {
        let mut grid = sample();
        assert!(grid.set_rotation(IVec2::new(1, 0), 0.25));
        assert_eq!(grid.get(IVec2::new(1, 0)).unwrap().rotation(), Some(0.25));
        assert!(!grid.set_rotation(IVec2::new(1, 1), 0.25));
        assert!(!grid.set_rotation(IVec2::new(9, 9), 0.25));
    }

    #[test]
    fn test_targets_and_lit_state() {
        let mut grid = sample();
        let targets = grid.target_positions();
        assert_eq!(targets, vec![IVec2::new(0, 1), IVec2::new(2, 1)]);
        assert!(!grid.all_lit(&targets));

        for &pos in &targets {
            grid.get_mut(pos)
                .unwrap()
                .interact(DVec2::ZERO, DVec2::Y, DVec2::NEG_Y, BeamColor::Yellow);
        }
        assert!(grid.all_lit(&targets));

        grid.reset_targets();
        assert!(!grid.all_lit(&targets));
    }

    #[test]
    fn test_no_targets_never_all_lit() {
        let grid = Grid::new(3, 3);
        assert!(!grid.all_lit(&grid.target_positions()));
    }

    #[test]
    fn test_views_skip_empty_cells() {
        let grid = sample();
        let views = grid.views();
        assert_eq!(views.len(), 4);
        assert_eq!(views[0].kind, CellKind::RotatableMirror);
        assert_eq!((views[0].col, views[0].row), (1, 0));
    }
}
