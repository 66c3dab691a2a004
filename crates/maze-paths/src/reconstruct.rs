use maze_core::{Maze, Pos};

use crate::error::SearchError;
use crate::search::Predecessors;

/// A start-to-goal route and what it costs to walk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Cells from start to goal, both included.
    pub path: Vec<Pos>,
    /// Sum of terrain weights of every path cell except the start.
    pub total_cost: i32,
}

impl Solution {
    /// Number of moves along the path.
    pub fn edges(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Walk the predecessor chain from `goal` back to `start` and price it.
///
/// The chain must end at `start`: a chain that stops anywhere else, or
/// loops, yields [`SearchError::Reconstruction`]. The start cell's own
/// terrain is never charged.
pub fn reconstruct(
    preds: &Predecessors,
    maze: &Maze,
    start: Pos,
    goal: Pos,
) -> Result<Solution, SearchError> {
    if !maze.contains(goal) {
        return Err(SearchError::OutOfBounds(goal));
    }

    let limit = maze.len();
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = preds.parent(current) {
        if path.len() >= limit || parent == goal {
            return Err(SearchError::Reconstruction {
                goal,
                reached: parent,
            });
        }
        path.push(parent);
        current = parent;
    }
    if current != start {
        return Err(SearchError::Reconstruction {
            goal,
            reached: current,
        });
    }
    path.reverse();

    let total_cost = path
        .iter()
        .skip(1)
        .filter_map(|&p| maze.cell(p))
        .map(|c| c.weight())
        .sum();

    Ok(Solution { path, total_cost })
}
