use maze_core::{Bounds, Maze, Pos};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Undirected adjacency derived from a maze's open walls.
///
/// Built once per maze shape. Terrain changes do not affect it; only a new
/// wall layout requires a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborGraph {
    bounds: Bounds,
    adjacency: Vec<Vec<Pos>>,
}

impl NeighborGraph {
    /// Scan every cell once and record its open neighbors in
    /// up, down, left, right order.
    pub fn build(maze: &Maze) -> Self {
        let bounds = maze.bounds();
        let adjacency = bounds
            .iter()
            .map(|p| {
                p.neighbors_4()
                    .into_iter()
                    .filter(|&n| maze.is_open(p, n))
                    .collect()
            })
            .collect();
        Self { bounds, adjacency }
    }

    /// Open neighbors of `p`. Empty for isolated or out-of-range cells.
    pub fn neighbors(&self, p: Pos) -> &[Pos] {
        match self.bounds.idx(p) {
            Some(i) => &self.adjacency[i],
            None => &[],
        }
    }

    /// Whether `a` and `b` are connected by an open wall.
    pub fn is_edge(&self, a: Pos, b: Pos) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

impl Pather for NeighborGraph {
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        buf.extend_from_slice(NeighborGraph::neighbors(self, p));
    }
}

/// A [`NeighborGraph`] paired with the maze whose terrain prices each move.
///
/// Moving into a cell costs that cell's terrain weight. The A* estimate is
/// the Manhattan distance.
#[derive(Clone, Copy)]
pub struct WeightedGraph<'a> {
    graph: &'a NeighborGraph,
    maze: &'a Maze,
}

impl<'a> WeightedGraph<'a> {
    pub fn new(graph: &'a NeighborGraph, maze: &'a Maze) -> Self {
        Self { graph, maze }
    }
}

impl Pather for WeightedGraph<'_> {
    fn neighbors(&self, p: Pos, buf: &mut Vec<Pos>) {
        Pather::neighbors(self.graph, p, buf);
    }
}

impl WeightedPather for WeightedGraph<'_> {
    fn cost(&self, _from: Pos, to: Pos) -> i32 {
        self.maze.terrain(to).map_or(0, |t| t.weight())
    }
}

impl AstarPather for WeightedGraph<'_> {
    fn estimate(&self, from: Pos, to: Pos) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::TerrainType;

    #[test]
    fn closed_maze_has_no_edges() {
        let m = Maze::new(3, 3).unwrap();
        let g = NeighborGraph::build(&m);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(Pos::new(1, 1)).is_empty());
        assert!(g.neighbors(Pos::new(9, 9)).is_empty());
    }

    #[test]
    fn neighbors_follow_open_walls() {
        let mut m = Maze::new(3, 3).unwrap();
        let c = Pos::new(1, 1);
        m.remove_wall_between(c, Pos::new(1, 2));
        m.remove_wall_between(c, Pos::new(0, 1));
        m.remove_wall_between(c, Pos::new(1, 0));
        let g = NeighborGraph::build(&m);
        assert_eq!(
            g.neighbors(c),
            &[Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 2)]
        );
        assert!(g.is_edge(Pos::new(1, 2), c));
        assert!(!g.is_edge(c, Pos::new(2, 1)));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn weighted_cost_is_entry_terrain() {
        let mut m = Maze::new(1, 2).unwrap();
        m.remove_wall_between(Pos::new(0, 0), Pos::new(0, 1));
        m.set_terrain(Pos::new(0, 0), TerrainType::Lava);
        m.set_terrain(Pos::new(0, 1), TerrainType::Sand);
        let g = NeighborGraph::build(&m);
        let w = WeightedGraph::new(&g, &m);
        assert_eq!(w.cost(Pos::new(0, 0), Pos::new(0, 1)), 5);
        assert_eq!(w.cost(Pos::new(0, 1), Pos::new(0, 0)), 10);
        assert_eq!(w.estimate(Pos::new(0, 0), Pos::new(0, 1)), 1);
    }
}
