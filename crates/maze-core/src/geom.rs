//! Geometry primitives: [`Pos`] and [`Bounds`].
//!
//! Cells are addressed by `(row, col)`, rows growing down and columns growing
//! right. [`Bounds`] maps positions to row-major indices so that per-cell
//! data can live in flat arrays.

use std::fmt;

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell coordinate. Equality is by `(row, col)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a position shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in search order: up, down, left, right.
    ///
    /// The order matters for depth-first search, whose stack discipline
    /// follows it.
    #[inline]
    pub const fn neighbors_4(self) -> [Pos; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row, self.col + 1),
        ]
    }

    /// Whether `other` is orthogonally adjacent to `self`.
    #[inline]
    pub fn is_adjacent(self, other: Pos) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a `rows × cols` grid anchored at (0, 0).
///
/// Converts between [`Pos`] and flat row-major indices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Number of cells covered. Zero if either side is non-positive.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.rows as usize) * (self.cols as usize)
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Convert a position to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub fn pos(self, idx: usize) -> Pos {
        let cols = self.cols.max(1) as usize;
        Pos::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// The top-left corner, (0, 0).
    #[inline]
    pub const fn first(self) -> Pos {
        Pos::ZERO
    }

    /// The bottom-right corner, (rows - 1, cols - 1).
    #[inline]
    pub const fn last(self) -> Pos {
        Pos::new(self.rows - 1, self.cols - 1)
    }

    /// Iterate over all positions in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Pos> {
        let cols = self.cols.max(0);
        (0..self.rows.max(0)).flat_map(move |row| (0..cols).map(move |col| Pos::new(row, col)))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_order_is_up_down_left_right() {
        let p = Pos::new(2, 2);
        assert_eq!(
            p.neighbors_4(),
            [Pos::new(1, 2), Pos::new(3, 2), Pos::new(2, 1), Pos::new(2, 3)]
        );
    }

    #[test]
    fn ordering_is_row_then_col() {
        assert!(Pos::new(0, 5) < Pos::new(1, 0));
        assert!(Pos::new(1, 0) < Pos::new(1, 1));
    }

    #[test]
    fn idx_round_trip() {
        let b = Bounds::new(3, 4);
        assert_eq!(b.len(), 12);
        for (i, p) in b.iter().enumerate() {
            assert_eq!(b.idx(p), Some(i));
            assert_eq!(b.pos(i), p);
        }
        assert_eq!(b.idx(Pos::new(3, 0)), None);
        assert_eq!(b.idx(Pos::new(0, -1)), None);
    }

    #[test]
    fn empty_bounds() {
        assert!(Bounds::new(0, 5).is_empty());
        assert_eq!(Bounds::new(-1, 5).len(), 0);
        assert_eq!(Bounds::new(0, 5).iter().count(), 0);
    }

    #[test]
    fn adjacency() {
        let p = Pos::new(1, 1);
        assert!(p.is_adjacent(Pos::new(1, 2)));
        assert!(!p.is_adjacent(Pos::new(2, 2)));
        assert!(!p.is_adjacent(p));
    }
}
