use maze_core::Pos;

/// Minimal pathfinding interface: provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>);
}

/// Pather whose moves carry a cost.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` into the adjacent cell `to`. Must be >= 0.
    ///
    /// Only the destination is charged: leaving a cell is free.
    fn cost(&self, from: Pos, to: Pos) -> i32;
}

/// Weighted pather with a heuristic for A*.
pub trait AstarPather: WeightedPather {
    /// Estimated remaining cost from `from` to `to`.
    ///
    /// Not required to be admissible. With a non-admissible estimate A* still
    /// finds a path, but not necessarily the cheapest one.
    fn estimate(&self, from: Pos, to: Pos) -> i32;
}
