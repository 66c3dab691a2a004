use crate::search::Search;
use crate::traits::AstarPather;

impl Search {
    /// One A* pop: priority is the accumulated cost plus the pather's
    /// estimate from the neighbor to the goal.
    ///
    /// With zero-cost terrain the Manhattan estimate can overshoot, so the
    /// first path found is not always the cheapest one.
    pub(crate) fn step_astar<P: AstarPather>(&mut self, pather: &P) -> Option<usize> {
        let goal = self.goal();
        self.step_best_first(pather, |p| pather.estimate(p, goal))
    }
}

#[cfg(test)]
mod tests {
    use maze_core::{Maze, Pos, TerrainType};

    use crate::{Algorithm, NeighborGraph, Search, Step, WeightedGraph};

    #[test]
    fn heads_toward_goal_on_uniform_terrain() {
        let mut m = Maze::new(1, 4).unwrap();
        for (a, b) in m.closed_edges() {
            m.remove_wall_between(a, b);
        }
        for p in m.bounds().iter() {
            m.set_terrain(p, TerrainType::Grass);
        }
        let g = NeighborGraph::build(&m);
        let w = WeightedGraph::new(&g, &m);
        let mut s = Search::new(Algorithm::AStar, m.bounds(), m.start(), m.goal()).unwrap();
        let steps: Vec<Step> = std::iter::from_fn(|| s.step(&w)).collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(s.cost_at(m.goal()), 3);
    }

    #[test]
    fn start_equals_goal() {
        let m = Maze::new(1, 1).unwrap();
        let g = NeighborGraph::build(&m);
        let w = WeightedGraph::new(&g, &m);
        let mut s = Search::new(Algorithm::AStar, m.bounds(), m.start(), m.goal()).unwrap();
        assert_eq!(s.step(&w), Some(Step::Reached(Pos::new(0, 0))));
        assert_eq!(s.step(&w), None);
        assert!(s.into_predecessors().is_ok());
    }
}
