//! Match runner - concurrent batch execution of pairings
//!
//! Level 2 - Phase-level implementation

use std::time::{SystemTime, UNIX_EPOCH};

use coevo_core::Agent;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::executor::MatchExecutor;
use crate::outcome::{MatchOutcome, OutcomeMap};
use crate::pairing::Pairing;

/// Executes batches of pairings on a bounded worker pool.
///
/// Every pairing runs independently; a failed match is replaced by
/// [`MatchOutcome::failed`] and never aborts its siblings. `run_all` is a
/// barrier: it returns only once every submitted pairing has completed.
pub struct MatchRunner {
    pool: rayon::ThreadPool,
}

impl MatchRunner {
    /// Build a runner with the given number of simultaneously in-flight
    /// matches (clamped to at least one worker).
    pub fn new(concurrency: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency.max(1))
            .build()?;
        Ok(Self { pool })
    }

    /// Execute every pairing over `agents`, returning one outcome per
    /// pairing keyed by the normalized pairing.
    ///
    /// Agents are only ever borrowed; each dispatch carries a unique
    /// scratch tag so concurrent engine processes cannot collide on the
    /// filesystem. No pairing is retried.
    pub fn run_all<E: MatchExecutor>(
        &self,
        executor: &E,
        agents: &[Agent],
        pairings: &[Pairing],
    ) -> OutcomeMap {
        debug!(matches = pairings.len(), "dispatching match batch");

        let results: Vec<(Pairing, MatchOutcome)> = self.pool.install(|| {
            pairings
                .par_iter()
                .map(|&pairing| {
                    let outcome = run_one(executor, agents, pairing);
                    (pairing, outcome)
                })
                .collect()
        });

        results.into_iter().collect()
    }
}

/// Execute one pairing, substituting the failure sentinel on any error.
fn run_one<E: MatchExecutor>(executor: &E, agents: &[Agent], pairing: Pairing) -> MatchOutcome {
    let tag = scratch_tag(pairing);
    match executor.run_match(&agents[pairing.low()], &agents[pairing.high()], &tag) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(
                low = pairing.low(),
                high = pairing.high(),
                error = %err,
                "match failed, substituting empty outcome"
            );
            MatchOutcome::failed()
        }
    }
}

/// Unique scratch tag: pairing identity plus a microsecond timestamp.
fn scratch_tag(pairing: Pairing) -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or(0);
    format!("{}vs{}_{}", pairing.low(), pairing.high(), micros)
}
