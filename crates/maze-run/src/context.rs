//! Run tokens: cooperative cancellation for generate and solve runs.
//!
//! Every run is handed a [`RunToken`] when it starts. Issuing a new token
//! supersedes all earlier ones, and a superseded run stops at its next step
//! without touching the grid again.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Issues monotonically increasing run tokens. Clones share the counter.
#[derive(Clone, Debug, Default)]
pub struct RunTokens {
    current: Arc<AtomicU64>,
}

impl RunTokens {
    /// A fresh counter; no token is current yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every earlier one.
    pub fn issue(&self) -> RunToken {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RunToken {
            id,
            current: Arc::clone(&self.current),
        }
    }

    /// Supersede every outstanding token without starting a new run.
    pub fn cancel_all(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    /// Id of the newest token issued or cancelled.
    #[inline]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// The right of one run to keep mutating the shared grid.
#[derive(Clone, Debug)]
pub struct RunToken {
    id: u64,
    current: Arc<AtomicU64>,
}

impl RunToken {
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether no newer token has been issued since this one.
    #[inline]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}
