//! CoEvo Tournament - Fitness evaluation through game playing
//!
//! This crate provides the tournament engine:
//! - Pairing generation (all-pairs and round-robin schedules)
//! - Concurrent match execution against an external game engine
//! - Fitness aggregation (cumulative lexicographic and sequential ELO)
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: evaluate a generation batch (orchestrated by coevo-evolve)
//! - Level 2: run_all (match phase), aggregate_cumulative / aggregate_elo
//! - Level 3: pairing enumeration, single-match execution, rating updates
//! - Level 4: configuration, artifact parsing, scratch-file handling

mod config;
mod elo;
mod executor;
mod fitness;
mod outcome;
mod pairing;
mod runner;

pub use config::EvalConfig;
pub use elo::{aggregate_elo, update_ratings, EloError, ELO_INITIAL, ELO_K};
pub use executor::{parse_artifact, ExecutorError, MatchExecutor, ProcessExecutor};
pub use fitness::aggregate_cumulative;
pub use outcome::{MatchOutcome, OutcomeMap};
pub use pairing::{cumulative_pairs, round_robin_schedule, Pairing, Round};
pub use runner::MatchRunner;
