//! The [`Session`]: one shared maze, serialized runs, paced workers.
//!
//! Each `generate` or `solve` call issues a new [`RunToken`] and spawns a
//! worker thread. Workers take the grid lock once per step, check their
//! token under it, mutate and report an [`Event`] while still holding it,
//! then release the lock and sleep for the configured delay. Tokens are
//! issued under the same lock, so starting a new run stops the previous one
//! at its next step and nothing it sends arrives after the newer run began.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use maze_core::{GridError, Maze, Pos};
use maze_gen::{MazeBuilder, TerrainAssigner};
use maze_paths::{Algorithm, NeighborGraph, Search, SearchError, Step, WeightedGraph, reconstruct};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SessionConfig;
use crate::context::{RunToken, RunTokens};
use crate::events::Event;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

struct Shared {
    maze: Maze,
    /// Present once a generate run has finished.
    graph: Option<Arc<NeighborGraph>>,
    /// Where the walker stands; back on the start cell after every reset.
    player: Pos,
}

impl Shared {
    fn new(maze: Maze) -> Self {
        let player = maze.start();
        Self {
            maze,
            graph: None,
            player,
        }
    }

    /// Wall everything back up and forget the graph, so solving is refused
    /// until a generation completes.
    fn blank(&mut self) {
        self.maze.reset();
        self.graph = None;
        self.player = self.maze.start();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    // Flag writes are idempotent, so state behind a poisoned lock is usable.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

// ---------------------------------------------------------------------------
// RunHandle
// ---------------------------------------------------------------------------

/// A spawned generate or solve run.
#[derive(Debug)]
pub struct RunHandle {
    id: u64,
    handle: JoinHandle<()>,
}

impl RunHandle {
    /// Id carried by every event of this run.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker to exit, finished or superseded.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Owns the maze that an observer draws and the runs that mutate it.
pub struct Session {
    config: SessionConfig,
    shared: Arc<Mutex<Shared>>,
    tokens: RunTokens,
    rng: Mutex<StdRng>,
    tx: Sender<Event>,
}

impl Session {
    /// Create a session with a blank maze of the configured size, and the
    /// receiving end of its event channel.
    pub fn new(config: SessionConfig) -> Result<(Self, Receiver<Event>), SessionError> {
        let maze = Maze::new(config.rows, config.cols)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (tx, rx) = mpsc::channel();
        let session = Self {
            config,
            shared: Arc::new(Mutex::new(Shared::new(maze))),
            tokens: RunTokens::new(),
            rng: Mutex::new(rng),
            tx,
        };
        Ok((session, rx))
    }

    /// Id of the newest run; events from older runs are stale.
    #[inline]
    pub fn current_run(&self) -> u64 {
        self.tokens.current()
    }

    /// A copy of the grid as it is right now, for drawing.
    pub fn snapshot(&self) -> Maze {
        lock(&self.shared).maze.clone()
    }

    /// The cell the walker currently stands on.
    pub fn player(&self) -> Pos {
        lock(&self.shared).player
    }

    /// The traversal graph of the last completed generation, if any.
    pub fn graph(&self) -> Option<Arc<NeighborGraph>> {
        lock(&self.shared).graph.clone()
    }

    /// Supersede any running work and wipe the grid to a blank slate.
    ///
    /// Returns a copy of the blank grid. Solving is refused until the next
    /// generation completes.
    pub fn reset(&self) -> Maze {
        let mut shared = lock(&self.shared);
        let run = self.tokens.issue().id();
        shared.blank();
        log::info!("run {run}: reset {} maze", shared.maze.bounds());
        self.tx.send(Event::Reset { run }).ok();
        shared.maze.clone()
    }

    /// Issue a new token and package it for a worker thread. Call with the
    /// grid lock held.
    fn worker(&self) -> Worker {
        Worker {
            token: self.tokens.issue(),
            shared: Arc::clone(&self.shared),
            tx: self.tx.clone(),
        }
    }

    /// Start generating a new maze, superseding any running work.
    ///
    /// The grid is blanked and a [`Event::Reset`] sent before this returns,
    /// so a `solve` issued right after is refused until the new maze is in
    /// place.
    pub fn generate(&self) -> RunHandle {
        let seed = self.rng.lock().unwrap_or_else(PoisonError::into_inner).random();
        let worker = {
            let mut s = lock(&self.shared);
            let worker = self.worker();
            s.blank();
            worker.send(Event::Reset { run: worker.run() });
            worker
        };
        let id = worker.run();
        let config = self.config.clone();

        let handle = thread::spawn(move || generate_worker(worker, config, seed));
        RunHandle { id, handle }
    }

    /// Start solving the current maze from its top-left to its bottom-right
    /// cell, superseding any running work.
    ///
    /// Fails with [`SessionError::NotGenerated`] if no generation has
    /// completed since the session started or was last reset.
    pub fn solve(&self, algorithm: Algorithm) -> Result<RunHandle, SessionError> {
        let (worker, graph) = {
            let s = lock(&self.shared);
            let graph = s.graph.clone().ok_or(SessionError::NotGenerated)?;
            (self.worker(), graph)
        };
        let id = worker.run();
        let config = self.config.clone();

        let handle = thread::spawn(move || solve_worker(worker, algorithm, graph, config));
        Ok(RunHandle { id, handle })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _s = lock(&self.shared);
        self.tokens.cancel_all();
    }
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

/// What a worker thread owns: its token, the grid and the event channel.
struct Worker {
    token: RunToken,
    shared: Arc<Mutex<Shared>>,
    tx: Sender<Event>,
}

impl Worker {
    #[inline]
    fn run(&self) -> u64 {
        self.token.id()
    }

    /// Lock the grid, or `None` if this run has been superseded.
    ///
    /// Tokens are only issued under the same lock, so the run stays current
    /// for as long as the guard is held.
    fn lock(&self) -> Option<MutexGuard<'_, Shared>> {
        let guard = lock(&self.shared);
        self.token.is_current().then_some(guard)
    }

    /// Send an event. Call with the guard from [`Worker::lock`] held.
    fn send(&self, event: Event) {
        // A dropped receiver only means nobody is watching.
        self.tx.send(event).ok();
    }
}

fn generate_worker(w: Worker, config: SessionConfig, seed: u64) {
    let run = w.run();
    let mut rng = StdRng::seed_from_u64(seed);

    // Carve on a private copy and mirror each opened wall into the shared
    // grid, so observers see the maze grow.
    let mut work = {
        let Some(s) = w.lock() else {
            log::trace!("run {run}: generation superseded before it started");
            return;
        };
        s.maze.clone()
    };
    log::info!("run {run}: generating {} maze", work.bounds());

    let mut builder = MazeBuilder::new(&mut rng).with_braid_fraction(config.braid_fraction);
    let flow = builder.build(&mut work, |a, b| {
        {
            let Some(mut s) = w.lock() else {
                return ControlFlow::Break(());
            };
            s.maze.remove_wall_between(a, b);
            w.send(Event::WallOpened { run, a, b });
        }
        pause(config.carve_delay);
        ControlFlow::Continue(())
    });
    let ControlFlow::Continue(stats) = flow else {
        log::trace!("run {run}: generation superseded");
        return;
    };

    TerrainAssigner::new(&mut rng).assign(&mut work);
    work.mark_endpoints(work.start(), work.goal());
    let graph = Arc::new(NeighborGraph::build(&work));

    let Some(mut s) = w.lock() else {
        log::trace!("run {run}: generation superseded");
        return;
    };
    s.maze = work;
    s.graph = Some(graph);
    log::info!(
        "run {run}: generated, {} walls carved, {} braided",
        stats.carved,
        stats.braided
    );
    w.send(Event::Generated { run, stats });
}

fn solve_worker(w: Worker, algorithm: Algorithm, graph: Arc<NeighborGraph>, config: SessionConfig) {
    let run = w.run();
    let superseded = || log::trace!("run {run}: {algorithm} superseded");
    // Call with the guard held.
    let fail = |error: SearchError| {
        log::warn!("run {run}: {algorithm} failed: {error}");
        w.send(Event::Failed {
            run,
            algorithm,
            error,
        });
    };

    let (start, goal, bounds) = {
        let Some(mut s) = w.lock() else {
            return superseded();
        };
        s.maze.clear_search_flags();
        s.player = s.maze.start();
        (s.maze.start(), s.maze.goal(), s.maze.bounds())
    };
    log::info!("run {run}: solving with {algorithm} from {start} to {goal}");

    let search = Search::new(algorithm, bounds, start, goal);
    let mut search = match search {
        Ok(search) => search,
        Err(e) => {
            if let Some(_s) = w.lock() {
                fail(e);
            }
            return;
        }
    };

    loop {
        {
            let Some(mut s) = w.lock() else {
                return superseded();
            };
            let Some(step) = search.step(&WeightedGraph::new(&graph, &s.maze)) else {
                break;
            };
            let (Step::Visit(p) | Step::Reached(p)) = step else {
                continue;
            };
            if let Some(c) = s.maze.cell_mut(p) {
                c.visited = true;
            }
            w.send(Event::Visit { run, pos: p });
        }
        pause(config.step_delay);
    }

    let expanded = search.expanded();
    let solution = {
        let Some(s) = w.lock() else {
            return superseded();
        };
        let solution = search
            .into_predecessors()
            .and_then(|preds| reconstruct(&preds, &s.maze, start, goal));
        match solution {
            Ok(solution) => solution,
            Err(e) => return fail(e),
        }
    };

    for &p in &solution.path {
        {
            let Some(mut s) = w.lock() else {
                return superseded();
            };
            if let Some(c) = s.maze.cell_mut(p) {
                c.on_path = true;
            }
            w.send(Event::PathCell { run, pos: p });
        }
        pause(config.path_delay);
    }

    for &p in &solution.path {
        {
            let Some(mut s) = w.lock() else {
                return superseded();
            };
            s.player = p;
            w.send(Event::PlayerMoved { run, pos: p });
        }
        pause(config.walk_delay);
    }

    let Some(_s) = w.lock() else {
        return superseded();
    };
    log::info!(
        "run {run}: {algorithm} expanded {expanded} cells, path of {} cells costs {}",
        solution.path.len(),
        solution.total_cost
    );
    w.send(Event::Solved {
        run,
        algorithm,
        solution,
    });
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by [`Session`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The configured size is not a valid grid.
    Grid(GridError),
    /// Solving was requested before any maze was generated.
    NotGenerated,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{e}"),
            Self::NotGenerated => f.write_str("no maze has been generated yet"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::NotGenerated => None,
        }
    }
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless(rows: i32, cols: i32) -> SessionConfig {
        SessionConfig::default()
            .with_size(rows, cols)
            .with_seed(1)
            .without_delays()
    }

    #[test]
    fn walled_off_goal_fails_the_run() {
        let (session, rx) = Session::new(headless(3, 3)).unwrap();
        {
            // Install the graph of the untouched, fully walled grid.
            let mut s = lock(&session.shared);
            let graph = NeighborGraph::build(&s.maze);
            s.graph = Some(Arc::new(graph));
        }

        let run = session.solve(Algorithm::Dijkstra).unwrap();
        let id = run.id();
        run.join().unwrap();
        let events: Vec<Event> = rx.try_iter().filter(|e| e.run() == id).collect();

        let start = Pos::new(0, 0);
        let goal = Pos::new(2, 2);
        assert_eq!(
            events,
            vec![
                Event::Visit { run: id, pos: start },
                Event::Failed {
                    run: id,
                    algorithm: Algorithm::Dijkstra,
                    error: SearchError::PathNotFound { start, goal },
                },
            ]
        );
        let maze = session.snapshot();
        assert!(maze.cells().iter().all(|c| !c.on_path));
        assert_eq!(session.player(), start);
    }

    #[test]
    fn generate_blanks_the_grid_before_returning() {
        let (session, rx) = Session::new(headless(4, 4)).unwrap();
        let first = session.generate();
        first.join().unwrap();
        assert!(session.graph().is_some());

        let second = session.generate();
        assert!(lock(&session.shared).graph.is_none());
        assert!(rx.try_iter().any(|e| e == Event::Reset { run: second.id() }));
        second.join().unwrap();
    }

    #[test]
    fn dropping_the_session_cancels_runs() {
        let config = headless(10, 10).with_carve_delay(Duration::from_millis(5));
        let (session, rx) = Session::new(config).unwrap();
        let run = session.generate();
        let id = run.id();
        drop(session);
        run.join().unwrap();
        assert!(rx.try_iter().all(|e| e.run() != id || !e.is_terminal()));
    }
}
