use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

use maze_core::{Bounds, Pos};

use crate::error::SearchError;
use crate::traits::AstarPather;

/// Sentinel value meaning "not reached yet" in cost arrays.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The four interchangeable search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Breadth-first: fewest edges.
    Bfs,
    /// Depth-first: some path, no optimality.
    Dfs,
    /// Uniform-cost: cheapest total terrain cost.
    Dijkstra,
    /// Best-first on cost plus Manhattan estimate.
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [Self::Bfs, Self::Dfs, Self::Dijkstra, Self::AStar];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Heap entries
// ---------------------------------------------------------------------------

/// Reference into the per-cell arrays, ordered by `f` for use in `BinaryHeap`.
///
/// Equal priorities pop the lower row-major index first, i.e. the lower row,
/// then the lower column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, idx) first.
        other.f.cmp(&self.f).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) enum Frontier {
    Queue(VecDeque<usize>),
    Stack(Vec<usize>),
    Heap(BinaryHeap<NodeRef>),
}

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// Predecessor map of a search run, indexed by row-major cell index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predecessors {
    bounds: Bounds,
    parent: Vec<usize>,
}

impl Predecessors {
    /// An empty map for a grid of the given size.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            parent: vec![NO_PARENT; bounds.len()],
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Recorded predecessor of `p`, if any.
    pub fn parent(&self, p: Pos) -> Option<Pos> {
        let i = self.bounds.idx(p)?;
        match self.parent[i] {
            NO_PARENT => None,
            pi => Some(self.bounds.pos(pi)),
        }
    }

    /// Record `parent` as the predecessor of `p`. Ignored if either is out
    /// of range.
    pub fn set(&mut self, p: Pos, parent: Pos) {
        if let (Some(i), Some(pi)) = (self.bounds.idx(p), self.bounds.idx(parent)) {
            self.parent[i] = pi;
        }
    }

    #[inline]
    pub(crate) fn set_idx(&mut self, idx: usize, parent: usize) {
        self.parent[idx] = parent;
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Outcome of a single [`Search::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A cell was popped and its neighbors expanded.
    Visit(Pos),
    /// The goal was popped. It is not expanded and the run is over.
    Reached(Pos),
    /// The frontier ran dry without popping the goal.
    Exhausted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Reached,
    Exhausted,
}

/// One search run from `start` to `goal`, advanced one pop at a time.
///
/// Each call to [`step`](Self::step) pops exactly one live frontier entry,
/// so a caller can pace, observe or abandon the run between steps. All
/// per-cell state lives in flat arrays indexed like the maze.
pub struct Search {
    algorithm: Algorithm,
    pub(crate) bounds: Bounds,
    start: Pos,
    goal: Pos,
    pub(crate) goal_idx: usize,
    pub(crate) frontier: Frontier,
    /// Discovered (BFS/DFS push time).
    pub(crate) seen: Vec<bool>,
    /// Popped and expanded, or finalized for Dijkstra/A*.
    pub(crate) closed: Vec<bool>,
    /// Accumulated cost for Dijkstra/A*.
    pub(crate) g: Vec<i32>,
    pub(crate) preds: Predecessors,
    // scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Pos>,
    expanded: usize,
    status: Status,
}

impl Search {
    /// Prepare a run over a grid of size `bounds`.
    ///
    /// Fails with [`SearchError::OutOfBounds`] if either endpoint lies
    /// outside the grid.
    pub fn new(
        algorithm: Algorithm,
        bounds: Bounds,
        start: Pos,
        goal: Pos,
    ) -> Result<Self, SearchError> {
        let start_idx = bounds.idx(start).ok_or(SearchError::OutOfBounds(start))?;
        let goal_idx = bounds.idx(goal).ok_or(SearchError::OutOfBounds(goal))?;
        let len = bounds.len();

        let mut seen = vec![false; len];
        let mut g = vec![UNREACHABLE; len];
        seen[start_idx] = true;
        g[start_idx] = 0;

        let frontier = match algorithm {
            Algorithm::Bfs => Frontier::Queue(VecDeque::from([start_idx])),
            Algorithm::Dfs => Frontier::Stack(vec![start_idx]),
            Algorithm::Dijkstra => Frontier::Heap(BinaryHeap::from([NodeRef {
                idx: start_idx,
                f: 0,
            }])),
            Algorithm::AStar => Frontier::Heap(BinaryHeap::from([NodeRef {
                idx: start_idx,
                f: crate::distance::manhattan(start, goal),
            }])),
        };

        Ok(Self {
            algorithm,
            bounds,
            start,
            goal,
            goal_idx,
            frontier,
            seen,
            closed: vec![false; len],
            g,
            preds: Predecessors::new(bounds),
            nbuf: Vec::with_capacity(4),
            expanded: 0,
            status: Status::Running,
        })
    }

    #[inline]
    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Number of cells popped so far, goal included.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Whether the run has reached the goal or exhausted its frontier.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status != Status::Running
    }

    /// Accumulated cost of `p` for Dijkstra/A*, [`UNREACHABLE`] if not
    /// reached. BFS and DFS only ever report the start at 0.
    pub fn cost_at(&self, p: Pos) -> i32 {
        match self.bounds.idx(p) {
            Some(i) => self.g[i],
            None => UNREACHABLE,
        }
    }

    /// The predecessor map built so far.
    #[inline]
    pub fn predecessors(&self) -> &Predecessors {
        &self.preds
    }

    /// Advance the run by one pop.
    ///
    /// Returns `None` once the run has finished; the terminal step
    /// ([`Step::Reached`] or [`Step::Exhausted`]) is reported exactly once.
    pub fn step<P: AstarPather>(&mut self, pather: &P) -> Option<Step> {
        if self.is_finished() {
            return None;
        }

        let goal = self.goal;
        let popped = match self.algorithm {
            Algorithm::Bfs => self.step_bfs(pather),
            Algorithm::Dfs => self.step_dfs(pather),
            Algorithm::Dijkstra => self.step_dijkstra(pather),
            Algorithm::AStar => self.step_astar(pather),
        };

        let step = match popped {
            None => {
                self.status = Status::Exhausted;
                Step::Exhausted
            }
            Some(ci) if ci == self.goal_idx => {
                self.expanded += 1;
                self.status = Status::Reached;
                Step::Reached(goal)
            }
            Some(ci) => {
                self.expanded += 1;
                Step::Visit(self.bounds.pos(ci))
            }
        };
        Some(step)
    }

    /// Finish the run and hand over its predecessor map.
    ///
    /// Fails with [`SearchError::PathNotFound`] unless the goal was reached.
    pub fn into_predecessors(self) -> Result<Predecessors, SearchError> {
        match self.status {
            Status::Reached => Ok(self.preds),
            _ => Err(SearchError::PathNotFound {
                start: self.start,
                goal: self.goal,
            }),
        }
    }
}
