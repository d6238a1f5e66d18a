//! CoEvo Core - Domain types for coevolutionary agent tournaments
//!
//! This crate provides the shared vocabulary of the system:
//! - Agent genomes (fixed-length strategy parameter vectors)
//! - Lexicographic fitness scores with a strict total order

pub mod agent;
pub mod score;

// Re-exports for convenient access
pub use agent::{Agent, GENOME_LEN, GENE_ATTACKERS, GENE_WORKERS};
pub use score::LexicoScore;
