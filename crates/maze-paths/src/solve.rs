use maze_core::{Maze, Pos};

use crate::error::SearchError;
use crate::graph::{NeighborGraph, WeightedGraph};
use crate::reconstruct::{Solution, reconstruct};
use crate::search::{Algorithm, Search, Step};

/// Everything a finished run produced: the visitation trace and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveTrace {
    /// Cells in the order they were popped for expansion, goal included.
    pub visits: Vec<Pos>,
    /// The reconstructed route, or why there is none.
    pub outcome: Result<Solution, SearchError>,
}

/// Run `algorithm` from `start` to `goal` to completion.
///
/// Clears previous search flags, sets `visited` on every popped cell and
/// `on_path` on every cell of the returned route. Walls and terrain are
/// left untouched.
pub fn solve(
    algorithm: Algorithm,
    graph: &NeighborGraph,
    maze: &mut Maze,
    start: Pos,
    goal: Pos,
) -> SolveTrace {
    maze.clear_search_flags();

    let mut search = match Search::new(algorithm, maze.bounds(), start, goal) {
        Ok(s) => s,
        Err(e) => {
            return SolveTrace {
                visits: Vec::new(),
                outcome: Err(e),
            };
        }
    };

    let mut visits = Vec::new();
    loop {
        let step = search.step(&WeightedGraph::new(graph, maze));
        let Some(step) = step else {
            break;
        };
        if let Step::Visit(p) | Step::Reached(p) = step {
            if let Some(c) = maze.cell_mut(p) {
                c.visited = true;
            }
            visits.push(p);
        }
    }

    let expanded = search.expanded();
    let outcome = search
        .into_predecessors()
        .and_then(|preds| reconstruct(&preds, maze, start, goal));

    match &outcome {
        Ok(solution) => {
            for &p in &solution.path {
                if let Some(c) = maze.cell_mut(p) {
                    c.on_path = true;
                }
            }
            log::debug!(
                "{algorithm}: expanded {expanded} cells, path of {} cells costs {}",
                solution.path.len(),
                solution.total_cost
            );
        }
        Err(e) => log::warn!("{algorithm}: {e} after expanding {expanded} cells"),
    }

    SolveTrace { visits, outcome }
}
