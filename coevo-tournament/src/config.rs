//! Configuration types for tournament evaluation
//!
//! Level 4 - Utilities and configuration

/// Evaluation configuration for one generation batch.
///
/// The fitness model itself is picked by calling the cumulative or ELO
/// entry point (the two models produce different fitness types); this
/// carries the knobs shared by both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Simultaneously in-flight matches
    pub concurrency: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { concurrency: 24 }
    }
}

impl EvalConfig {
    /// Create a config with the given worker count.
    pub fn new(concurrency: usize) -> Self {
        Self { concurrency }
    }

    /// Set the worker count.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}
