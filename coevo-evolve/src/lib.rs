//! CoEvo Evolve - generational evaluation for the evolutionary loop
//!
//! This crate is the boundary between the tournament engine and an
//! external evolutionary-computation library:
//! - `Individual`: a genome plus its mutable fitness slot
//! - population bridge: in-place parent rescoring vs offspring fitness
//! - per-generation evaluation entry points for both fitness models

mod bridge;
mod evaluator;
mod population;

pub use bridge::split_results;
pub use evaluator::{evaluate_generation, evaluate_generation_elo, EvalError};
pub use population::Individual;
