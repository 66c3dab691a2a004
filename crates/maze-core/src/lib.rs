//! **maze-core**: the grid underneath the maze generator and solvers.
//!
//! This crate provides geometry primitives, the [`Cell`] with its walls,
//! terrain and search flags, and the [`Maze`] grid that keeps shared walls
//! symmetric.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Side, TerrainType, Walls};
pub use geom::{Bounds, Pos};
pub use grid::{GridError, Maze};
