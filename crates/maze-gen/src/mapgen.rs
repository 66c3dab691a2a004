//! Maze carving.
//!
//! [`MazeBuilder`] grows a perfect maze with randomized Prim (a random
//! frontier of candidate walls), then braids it by knocking down a fixed
//! fraction of the walls that are still closed, adding loops.

use std::ops::ControlFlow;

use maze_core::{Bounds, Maze, Pos};
use rand::Rng;

/// Default share of closed walls removed by [`MazeBuilder::braid`].
pub const BRAID_FRACTION: f64 = 0.30;

/// What a [`MazeBuilder::build`] run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildStats {
    /// Walls opened while carving the spanning tree (`rows * cols - 1`).
    pub carved: usize,
    /// Walls opened by braiding.
    pub braided: usize,
}

/// Carves walls out of a [`Maze`] using an injected random source.
///
/// Every opened wall is reported to an `on_open` callback as the pair of
/// cells it separated. Returning [`ControlFlow::Break`] from the callback
/// stops the run right after that wall and hands the break value back;
/// nothing else is touched. A callback that never stops can break with
/// [`Infallible`](std::convert::Infallible).
pub struct MazeBuilder<R: Rng> {
    pub rng: R,
    braid_fraction: f64,
}

impl<R: Rng> MazeBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            braid_fraction: BRAID_FRACTION,
        }
    }

    /// Set the share of closed walls braiding removes, clamped to `[0, 1]`.
    pub fn with_braid_fraction(mut self, fraction: f64) -> Self {
        self.braid_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    #[inline]
    pub fn braid_fraction(&self) -> f64 {
        self.braid_fraction
    }

    /// Carve then braid.
    pub fn build<B>(
        &mut self,
        maze: &mut Maze,
        mut on_open: impl FnMut(Pos, Pos) -> ControlFlow<B>,
    ) -> ControlFlow<B, BuildStats> {
        let carved = self.carve(maze, &mut on_open)?;
        let braided = self.braid(maze, &mut on_open)?;
        log::debug!(
            "built {} maze: {carved} walls carved, {braided} braided",
            maze.bounds()
        );
        ControlFlow::Continue(BuildStats { carved, braided })
    }

    /// Grow a spanning tree over every cell with randomized Prim.
    ///
    /// 1. Pick a random seed cell, mark it in the maze, and put the walls to
    ///    its in-bounds neighbours on the frontier.
    /// 2. Repeatedly take a random wall off the frontier. If exactly one of
    ///    its cells is in the maze, open it, add the other cell and push that
    ///    cell's walls. Otherwise drop it.
    ///
    /// Expects a fully walled maze. Returns the number of walls opened,
    /// which is `rows * cols - 1`.
    pub fn carve<B>(
        &mut self,
        maze: &mut Maze,
        mut on_open: impl FnMut(Pos, Pos) -> ControlFlow<B>,
    ) -> ControlFlow<B, usize> {
        let bounds = maze.bounds();
        let mut in_maze = vec![false; bounds.len()];
        let mut frontier: Vec<(Pos, Pos)> = Vec::new();
        let mut opened = 0usize;

        let seed_idx = self.rng.random_range(0..bounds.len());
        in_maze[seed_idx] = true;
        push_walls(bounds, bounds.pos(seed_idx), &mut frontier);

        while !frontier.is_empty() {
            let pick = self.rng.random_range(0..frontier.len());
            let (a, b) = frontier.swap_remove(pick);
            let (Some(ai), Some(bi)) = (bounds.idx(a), bounds.idx(b)) else {
                continue;
            };
            if in_maze[ai] == in_maze[bi] {
                continue;
            }

            maze.remove_wall_between(a, b);
            let (fresh, fresh_idx) = if in_maze[ai] { (b, bi) } else { (a, ai) };
            in_maze[fresh_idx] = true;
            push_walls(bounds, fresh, &mut frontier);
            opened += 1;
            on_open(a, b)?;
        }

        ControlFlow::Continue(opened)
    }

    /// Open `floor(fraction * closed)` of the currently closed walls, each
    /// drawn uniformly without replacement. Never closes anything.
    ///
    /// Returns the number of walls opened.
    pub fn braid<B>(
        &mut self,
        maze: &mut Maze,
        mut on_open: impl FnMut(Pos, Pos) -> ControlFlow<B>,
    ) -> ControlFlow<B, usize> {
        let mut candidates = maze.closed_edges();
        let k = (candidates.len() as f64 * self.braid_fraction) as usize;

        for opened in 0..k {
            if candidates.is_empty() {
                return ControlFlow::Continue(opened);
            }
            let pick = self.rng.random_range(0..candidates.len());
            let (a, b) = candidates.swap_remove(pick);
            maze.remove_wall_between(a, b);
            on_open(a, b)?;
        }

        ControlFlow::Continue(k)
    }
}

/// Push the walls between `p` and each of its in-bounds neighbours.
fn push_walls(bounds: Bounds, p: Pos, frontier: &mut Vec<(Pos, Pos)>) {
    for n in p.neighbors_4() {
        if bounds.contains(n) {
            frontier.push((p, n));
        }
    }
}
