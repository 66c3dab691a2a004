use std::fmt;

use maze_core::Pos;

/// Errors reported by a search run or by path reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The frontier emptied without ever popping the goal.
    PathNotFound { start: Pos, goal: Pos },
    /// The predecessor chain from `goal` stopped at `reached` instead of the
    /// start, or looped.
    Reconstruction { goal: Pos, reached: Pos },
    /// An endpoint lies outside the grid.
    OutOfBounds(Pos),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathNotFound { start, goal } => {
                write!(f, "no path from {start} to {goal}")
            }
            Self::Reconstruction { goal, reached } => {
                write!(
                    f,
                    "malformed predecessor chain: walking back from {goal} stopped at {reached}"
                )
            }
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the maze"),
        }
    }
}

impl std::error::Error for SearchError {}
