/// Generations run when a simulation is requested without an explicit count.
pub const SIMULATION_GENERATIONS: usize = 100;

/// Candidate count from which a generation is evaluated on the thread pool.
pub const PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub generations: usize,
    /// `None` lets rayon pick the thread count.
    pub thread_count: Option<usize>,
    pub parallel_threshold: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            generations: SIMULATION_GENERATIONS,
            thread_count: None,
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

impl SimConfig {
    pub fn generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    /// `0` evaluates every generation in parallel, `usize::MAX` never does.
    pub fn parallel_threshold(mut self, n: usize) -> Self {
        self.parallel_threshold = n;
        self
    }
}

#[test]
fn test_thread_count_is_at_least_one() {
    let config = SimConfig::default().thread_count(0);
    assert_eq!(config.thread_count, Some(1));
    assert_eq!(config.generations, SIMULATION_GENERATIONS);
}
