//! **maze-run**: paced generate and solve runs over one shared maze.
//!
//! A [`Session`] holds the grid an observer draws. [`Session::generate`] and
//! [`Session::solve`] each start a worker thread that mutates the grid one
//! step at a time and reports [`Event`]s over a channel. Only the most
//! recently started run may touch the grid: starting another run, or
//! calling [`Session::reset`], supersedes it through its [`RunToken`].
//!
//! ```no_run
//! use maze_paths::Algorithm;
//! use maze_run::{Event, Session, SessionConfig};
//!
//! let (session, events) = Session::new(SessionConfig::default()).unwrap();
//! session.generate().join().unwrap();
//! let run = session.solve(Algorithm::AStar).unwrap();
//! for event in events.iter() {
//!     if event.run() == run.id() && event.is_terminal() {
//!         break;
//!     }
//! }
//! ```

mod config;
mod context;
mod events;
mod session;

pub use config::SessionConfig;
pub use context::{RunToken, RunTokens};
pub use events::Event;
pub use session::{RunHandle, Session, SessionError};
