//! Step-wise graph search over maze neighbor graphs.
//!
//! This crate derives a [`NeighborGraph`] from a maze's open walls and runs
//! one of four strategies over it:
//!
//! - **Breadth-first** ([`Algorithm::Bfs`]): fewest edges
//! - **Depth-first** ([`Algorithm::Dfs`]): some path, no optimality
//! - **Dijkstra** ([`Algorithm::Dijkstra`]): cheapest terrain cost
//! - **A\*** ([`Algorithm::AStar`]): Dijkstra guided by Manhattan distance
//!
//! A [`Search`] advances one pop at a time so callers can animate or cancel
//! it between steps. [`solve`] runs one to completion, and [`reconstruct`]
//! turns a predecessor map into a priced [`Solution`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod error;
mod graph;
mod reconstruct;
mod search;
mod solve;
mod traits;

pub use distance::manhattan;
pub use error::SearchError;
pub use graph::{NeighborGraph, WeightedGraph};
pub use reconstruct::{Solution, reconstruct};
pub use search::{Algorithm, Predecessors, Search, Step, UNREACHABLE};
pub use solve::{SolveTrace, solve};
pub use traits::{AstarPather, Pather, WeightedPather};
