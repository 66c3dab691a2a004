use maze_core::Pos;

use crate::search::{Frontier, NodeRef, Search};
use crate::traits::WeightedPather;

impl Search {
    /// One Dijkstra pop: priority is the accumulated cost.
    pub(crate) fn step_dijkstra<P: WeightedPather>(&mut self, pather: &P) -> Option<usize> {
        self.step_best_first(pather, |_| 0)
    }

    /// Shared best-first pop for Dijkstra and A*.
    ///
    /// Stale heap entries (cells already finalized) are discarded without
    /// counting as a step. Relaxation charges the cost of entering the
    /// neighbor; `estimate` is added to the queued priority only.
    pub(crate) fn step_best_first<P: WeightedPather>(
        &mut self,
        pather: &P,
        estimate: impl Fn(Pos) -> i32,
    ) -> Option<usize> {
        let bounds = self.bounds;
        let Frontier::Heap(open) = &mut self.frontier else {
            return None;
        };

        // Lazy deletion: skip entries for finalized cells.
        let ci = loop {
            let current = open.pop()?;
            if !self.closed[current.idx] {
                break current.idx;
            }
        };
        self.closed[ci] = true;
        if ci == self.goal_idx {
            return Some(ci);
        }

        let current_g = self.g[ci];
        let cp = bounds.pos(ci);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = bounds.idx(np) else {
                continue;
            };
            if self.closed[ni] {
                continue;
            }
            let tentative = current_g + pather.cost(cp, np);
            if tentative >= self.g[ni] {
                continue;
            }
            self.g[ni] = tentative;
            self.preds.set_idx(ni, ci);
            open.push(NodeRef {
                idx: ni,
                f: tentative + estimate(np),
            });
        }

        self.nbuf = nbuf;
        Some(ci)
    }
}

#[cfg(test)]
mod tests {
    use maze_core::{Maze, Pos, TerrainType};

    use crate::{Algorithm, NeighborGraph, Search, Step, WeightedGraph};

    #[test]
    fn prefers_cheap_detour_over_short_lava() {
        // 2x3, top row direct through lava, bottom row detour over stone.
        let mut m = Maze::new(2, 3).unwrap();
        for (a, b) in m.closed_edges() {
            m.remove_wall_between(a, b);
        }
        m.set_terrain(Pos::new(0, 1), TerrainType::Lava);
        let g = NeighborGraph::build(&m);
        let w = WeightedGraph::new(&g, &m);
        let goal = Pos::new(0, 2);
        let mut s = Search::new(Algorithm::Dijkstra, m.bounds(), m.start(), goal).unwrap();
        while s.step(&w).is_some() {}
        assert_eq!(s.cost_at(goal), 0);
        let preds = s.into_predecessors().unwrap();
        assert_eq!(preds.parent(goal), Some(Pos::new(1, 2)));
    }

    #[test]
    fn each_cell_expanded_once() {
        let mut m = Maze::new(3, 3).unwrap();
        for (a, b) in m.closed_edges() {
            m.remove_wall_between(a, b);
        }
        m.set_terrain(Pos::new(1, 1), TerrainType::Sand);
        let g = NeighborGraph::build(&m);
        let w = WeightedGraph::new(&g, &m);
        let mut s = Search::new(Algorithm::Dijkstra, m.bounds(), m.start(), m.goal()).unwrap();
        let mut seen = Vec::new();
        while let Some(step) = s.step(&w) {
            if let Step::Visit(p) | Step::Reached(p) = step {
                assert!(!seen.contains(&p), "{p} expanded twice");
                seen.push(p);
            }
        }
        assert_eq!(seen.first(), Some(&Pos::new(0, 0)));
        assert_eq!(seen.last(), Some(&Pos::new(2, 2)));
    }
}
