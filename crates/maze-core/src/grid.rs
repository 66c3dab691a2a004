//! The [`Maze`] type: a fixed `rows × cols` grid of [`Cell`]s.
//!
//! Cells are stored row-major in a flat `Vec`. Wall flags can only be changed
//! through [`Maze::remove_wall_between`], which updates both sides of a
//! shared wall together so adjacent cells never disagree.

use std::fmt;

use crate::cell::{Cell, Side, TerrainType};
use crate::geom::{Bounds, Pos};

/// A rectangular maze of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Maze {
    /// Allocate a `rows × cols` maze with every wall present and stone terrain.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let bounds = Bounds::new(rows, cols);
        Ok(Self {
            bounds,
            cells: bounds.iter().map(Cell::new).collect(),
        })
    }

    /// Restore every wall, reset terrain to stone and clear all flags.
    pub fn reset(&mut self) {
        for c in self.cells.iter_mut() {
            *c = Cell::new(c.pos());
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a constructed maze.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.bounds.contains(p)
    }

    /// Top-left cell, where searches start.
    #[inline]
    pub fn start(&self) -> Pos {
        self.bounds.first()
    }

    /// Bottom-right cell, where searches end.
    #[inline]
    pub fn goal(&self) -> Pos {
        self.bounds.last()
    }

    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.bounds.idx(p).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, p: Pos) -> Option<&mut Cell> {
        self.bounds.idx(p).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Terrain of the cell at `p`, if in bounds.
    pub fn terrain(&self, p: Pos) -> Option<TerrainType> {
        self.cell(p).map(|c| c.terrain)
    }

    /// Set the terrain of the cell at `p`. Does nothing if out of bounds.
    pub fn set_terrain(&mut self, p: Pos, terrain: TerrainType) {
        if let Some(c) = self.cell_mut(p) {
            c.terrain = terrain;
        }
    }

    /// Whether the wall on `side` of `p` is present. Out-of-bounds positions
    /// are treated as walled.
    pub fn has_wall(&self, p: Pos, side: Side) -> bool {
        self.cell(p).is_none_or(|c| c.has_wall(side))
    }

    /// Whether `a` and `b` are adjacent with no wall between them.
    pub fn is_open(&self, a: Pos, b: Pos) -> bool {
        if !self.contains(b) {
            return false;
        }
        match Side::between(a, b) {
            Some(side) => !self.has_wall(a, side),
            None => false,
        }
    }

    /// Remove the wall shared by two adjacent cells, on both sides.
    ///
    /// Returns `true` if a wall was actually removed, `false` if it was
    /// already open or the cells are not adjacent in-bounds neighbours.
    pub fn remove_wall_between(&mut self, a: Pos, b: Pos) -> bool {
        let (Some(ai), Some(bi)) = (self.bounds.idx(a), self.bounds.idx(b)) else {
            return false;
        };
        let Some(side) = Side::between(a, b) else {
            return false;
        };
        let was_closed = self.cells[ai].walls.has(side);
        self.cells[ai].walls = self.cells[ai].walls.without(side);
        self.cells[bi].walls = self.cells[bi].walls.without(side.opposite());
        was_closed
    }

    /// Every open wall edge, each listed once as `(cell, right or bottom
    /// neighbour)`, in row-major order.
    pub fn open_edges(&self) -> Vec<(Pos, Pos)> {
        self.edges(false)
    }

    /// Every closed wall between two in-bounds cells, each listed once as
    /// `(cell, right or bottom neighbour)`, in row-major order.
    pub fn closed_edges(&self) -> Vec<(Pos, Pos)> {
        self.edges(true)
    }

    fn edges(&self, closed: bool) -> Vec<(Pos, Pos)> {
        let mut out = Vec::new();
        for c in &self.cells {
            for side in [Side::Right, Side::Bottom] {
                let n = side.step(c.pos());
                if self.contains(n) && c.has_wall(side) == closed {
                    out.push((c.pos(), n));
                }
            }
        }
        out
    }

    /// Clear the `visited` and `on_path` flags of every cell.
    pub fn clear_search_flags(&mut self) {
        for c in self.cells.iter_mut() {
            c.visited = false;
            c.on_path = false;
        }
    }

    /// Flag the start and goal cells, clearing any previous endpoint flags.
    pub fn mark_endpoints(&mut self, start: Pos, goal: Pos) {
        for c in self.cells.iter_mut() {
            c.is_start = c.pos() == start;
            c.is_end = c.pos() == goal;
        }
    }
}

/// Errors raised when allocating a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows or columns were zero or negative.
    InvalidDimensions { rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "invalid maze dimensions {rows}x{cols}: both must be positive")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(m: &Maze) {
        for p in m.bounds().iter() {
            for side in Side::ALL {
                let n = side.step(p);
                if m.contains(n) {
                    assert_eq!(
                        m.has_wall(p, side),
                        m.has_wall(n, side.opposite()),
                        "asymmetric wall between {p} and {n}"
                    );
                }
            }
        }
    }

    #[test]
    fn new_rejects_bad_dimensions() {
        assert_eq!(
            Maze::new(0, 3),
            Err(GridError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert!(Maze::new(3, -1).is_err());
    }

    #[test]
    fn new_is_fully_walled_stone() {
        let m = Maze::new(3, 4).unwrap();
        assert_eq!(m.len(), 12);
        assert!(m.open_edges().is_empty());
        // 3 rows * 3 horizontal pairs + 2 * 4 vertical pairs
        assert_eq!(m.closed_edges().len(), 17);
        assert!(m.cells().iter().all(|c| c.terrain == TerrainType::Stone));
        assert_eq!(m.start(), Pos::new(0, 0));
        assert_eq!(m.goal(), Pos::new(2, 3));
    }

    #[test]
    fn remove_wall_updates_both_sides() {
        let mut m = Maze::new(2, 2).unwrap();
        assert!(m.remove_wall_between(Pos::new(0, 0), Pos::new(0, 1)));
        assert!(!m.has_wall(Pos::new(0, 0), Side::Right));
        assert!(!m.has_wall(Pos::new(0, 1), Side::Left));
        assert!(m.is_open(Pos::new(0, 1), Pos::new(0, 0)));

        // reversed argument order hits the same wall
        assert!(m.remove_wall_between(Pos::new(1, 1), Pos::new(0, 1)));
        assert!(!m.has_wall(Pos::new(0, 1), Side::Bottom));
        assert!(!m.has_wall(Pos::new(1, 1), Side::Top));

        assert!(!m.remove_wall_between(Pos::new(0, 0), Pos::new(0, 1)));
        assert!(!m.remove_wall_between(Pos::new(0, 0), Pos::new(1, 1)));
        assert!(!m.remove_wall_between(Pos::new(0, 0), Pos::new(-1, 0)));
        assert_eq!(m.open_edges().len(), 2);
        assert_symmetric(&m);
    }

    #[test]
    fn reset_restores_blank_slate() {
        let mut m = Maze::new(2, 3).unwrap();
        m.remove_wall_between(Pos::new(0, 0), Pos::new(1, 0));
        m.set_terrain(Pos::new(1, 1), TerrainType::Lava);
        m.mark_endpoints(m.start(), m.goal());
        if let Some(c) = m.cell_mut(Pos::new(0, 2)) {
            c.visited = true;
            c.on_path = true;
        }
        m.reset();
        assert_eq!(m, Maze::new(2, 3).unwrap());
    }

    #[test]
    fn clear_search_flags_keeps_endpoints() {
        let mut m = Maze::new(2, 2).unwrap();
        m.mark_endpoints(m.start(), m.goal());
        for p in m.bounds().iter() {
            let c = m.cell_mut(p).unwrap();
            c.visited = true;
            c.on_path = true;
        }
        m.clear_search_flags();
        assert!(m.cells().iter().all(|c| !c.visited && !c.on_path));
        assert!(m.cell(Pos::new(0, 0)).unwrap().is_start);
        assert!(m.cell(Pos::new(1, 1)).unwrap().is_end);
    }

    #[test]
    fn out_of_bounds_is_walled() {
        let m = Maze::new(1, 1).unwrap();
        assert!(m.has_wall(Pos::new(5, 5), Side::Top));
        assert!(!m.is_open(Pos::new(0, 0), Pos::new(0, 1)));
    }
}
