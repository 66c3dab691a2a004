//! Maze generation: carving, braiding and terrain.
//!
//! [`generate`] runs the whole pipeline: allocate the grid, carve a perfect
//! maze with randomized Prim, braid in extra loops, stamp terrain, flag the
//! endpoints and derive the [`NeighborGraph`] the solvers walk.

pub mod mapgen;
pub mod terrain;

pub use mapgen::{BRAID_FRACTION, BuildStats, MazeBuilder};
pub use terrain::{TerrainAssigner, terrain_for_roll};

use std::convert::Infallible;
use std::ops::ControlFlow;

use maze_core::{GridError, Maze};
use maze_paths::NeighborGraph;
use rand::Rng;

/// A freshly generated maze and its traversal graph.
#[derive(Debug, Clone)]
pub struct Generated {
    pub maze: Maze,
    pub graph: NeighborGraph,
    pub stats: BuildStats,
}

/// Generate a braided, terrain-stamped `rows × cols` maze.
///
/// Start is the top-left cell, goal the bottom-right one; both are stone.
/// Fails before allocating anything if either dimension is not positive.
pub fn generate<R: Rng>(rows: i32, cols: i32, rng: &mut R) -> Result<Generated, GridError> {
    let mut maze = Maze::new(rows, cols)?;

    let mut builder = MazeBuilder::new(&mut *rng);
    let ControlFlow::Continue(stats) =
        builder.build(&mut maze, |_, _| ControlFlow::<Infallible>::Continue(()));

    TerrainAssigner::new(&mut *rng).assign(&mut maze);
    maze.mark_endpoints(maze.start(), maze.goal());
    let graph = NeighborGraph::build(&maze);

    Ok(Generated { maze, graph, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Pos, TerrainType};
    use maze_paths::{Algorithm, solve};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_bad_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate(0, 4, &mut rng).err(),
            Some(GridError::InvalidDimensions { rows: 0, cols: 4 })
        );
    }

    #[test]
    fn single_cell() {
        let mut rng = StdRng::seed_from_u64(0);
        let Generated { mut maze, graph, stats } = generate(1, 1, &mut rng).unwrap();
        assert_eq!(stats, BuildStats::default());
        assert_eq!(maze.start(), maze.goal());
        let c = maze.cell(Pos::ZERO).unwrap();
        assert_eq!(c.walls().count(), 4);
        assert!(c.is_start && c.is_end);
        assert_eq!(c.terrain, TerrainType::Stone);

        let (start, goal) = (maze.start(), maze.goal());
        let s = solve(Algorithm::Dijkstra, &graph, &mut maze, start, goal)
            .outcome
            .unwrap();
        assert_eq!(s.path, vec![Pos::ZERO]);
        assert_eq!(s.total_cost, 0);
    }

    #[test]
    fn every_algorithm_solves_a_generated_maze() {
        let mut rng = StdRng::seed_from_u64(2024);
        let Generated { mut maze, graph, stats } = generate(12, 15, &mut rng).unwrap();
        assert_eq!(stats.carved, 12 * 15 - 1);
        assert_eq!(graph.edge_count(), stats.carved + stats.braided);
        assert!(maze.cell(maze.start()).unwrap().is_start);
        assert!(maze.cell(maze.goal()).unwrap().is_end);

        let (start, goal) = (maze.start(), maze.goal());
        let mut costs = Vec::new();
        for algorithm in Algorithm::ALL {
            let trace = solve(algorithm, &graph, &mut maze, start, goal);
            let s = trace.outcome.unwrap();
            assert_eq!(s.path.first(), Some(&start));
            assert_eq!(s.path.last(), Some(&goal));
            assert_eq!(trace.visits.last(), Some(&goal));
            costs.push((algorithm, s.total_cost, s.edges()));
        }
        let dijkstra = costs[2].1;
        assert!(costs.iter().all(|&(_, cost, _)| cost >= dijkstra));
        let bfs_edges = costs[0].2;
        assert!(costs.iter().all(|&(_, _, edges)| edges >= bfs_edges));
    }
}
