//! Messages a [`Session`](crate::Session) sends to its observer.

use maze_core::Pos;
use maze_gen::BuildStats;
use maze_paths::{Algorithm, SearchError, Solution};

/// Progress of a generate, solve or reset run.
///
/// Every event carries the id of the run that produced it. A superseded run
/// sends nothing further.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The grid was wiped back to fully walled, stone, no flags. Sent by
    /// `reset` and at the start of every generation.
    Reset { run: u64 },
    /// Generation opened the wall between `a` and `b`.
    WallOpened { run: u64, a: Pos, b: Pos },
    /// Generation finished; terrain and the neighbor graph are in place.
    Generated { run: u64, stats: BuildStats },
    /// A solver popped `pos` for expansion.
    Visit { run: u64, pos: Pos },
    /// `pos` was marked as part of the found path.
    PathCell { run: u64, pos: Pos },
    /// The walker stepped onto `pos`, following the revealed path.
    PlayerMoved { run: u64, pos: Pos },
    /// Terminal: a path was found.
    Solved {
        run: u64,
        algorithm: Algorithm,
        solution: Solution,
    },
    /// Terminal: no path, or the predecessor chain was malformed.
    Failed {
        run: u64,
        algorithm: Algorithm,
        error: SearchError,
    },
}

impl Event {
    /// Id of the run that sent this event.
    pub fn run(&self) -> u64 {
        match self {
            Self::Reset { run }
            | Self::WallOpened { run, .. }
            | Self::Generated { run, .. }
            | Self::Visit { run, .. }
            | Self::PathCell { run, .. }
            | Self::PlayerMoved { run, .. }
            | Self::Solved { run, .. }
            | Self::Failed { run, .. } => *run,
        }
    }

    /// Whether this event ends a generate or solve run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Generated { .. } | Self::Solved { .. } | Self::Failed { .. }
        )
    }
}
