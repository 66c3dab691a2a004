use std::time::Duration;

use maze_gen::BRAID_FRACTION;

/// Configuration for a [`Session`](crate::Session).
///
/// Defaults match the classic 30×30 board animated at 15 ms per step.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub rows: i32,
    pub cols: i32,
    /// Pause after each cell a solver expands.
    pub step_delay: Duration,
    /// Pause after each path cell is revealed.
    pub path_delay: Duration,
    /// Pause after each step of the walk along the found path.
    pub walk_delay: Duration,
    /// Pause after each wall opened during generation.
    pub carve_delay: Duration,
    /// Share of closed walls removed after carving.
    pub braid_fraction: f64,
    /// Seed for reproducible generation; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 30,
            step_delay: Duration::from_millis(15),
            path_delay: Duration::from_millis(15),
            walk_delay: Duration::from_millis(100),
            carve_delay: Duration::ZERO,
            braid_fraction: BRAID_FRACTION,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_size(mut self, rows: i32, cols: i32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_path_delay(mut self, delay: Duration) -> Self {
        self.path_delay = delay;
        self
    }

    pub fn with_walk_delay(mut self, delay: Duration) -> Self {
        self.walk_delay = delay;
        self
    }

    pub fn with_carve_delay(mut self, delay: Duration) -> Self {
        self.carve_delay = delay;
        self
    }

    pub fn with_braid_fraction(mut self, fraction: f64) -> Self {
        self.braid_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Zero every delay, for tests and headless use.
    pub fn without_delays(self) -> Self {
        self.with_step_delay(Duration::ZERO)
            .with_path_delay(Duration::ZERO)
            .with_walk_delay(Duration::ZERO)
            .with_carve_delay(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SessionConfig::default();
        assert_eq!((c.rows, c.cols), (30, 30));
        assert_eq!(c.step_delay, Duration::from_millis(15));
        assert_eq!(c.walk_delay, Duration::from_millis(100));
        assert_eq!(c.carve_delay, Duration::ZERO);
        assert_eq!(c.braid_fraction, 0.30);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn builders() {
        let c = SessionConfig::default()
            .with_size(4, 5)
            .with_seed(9)
            .without_delays();
        assert_eq!((c.rows, c.cols), (4, 5));
        assert_eq!(c.seed, Some(9));
        assert_eq!(c.step_delay, Duration::ZERO);
        assert_eq!(c.path_delay, Duration::ZERO);
        assert_eq!(c.walk_delay, Duration::ZERO);
    }
}
