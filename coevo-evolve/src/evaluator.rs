//! Generation evaluation - orchestration of the tournament phases
//!
//! Level 1 - Orchestration
//!
//! One call per generation: combine the live parents with the new
//! candidates into a single batch, play the scheduled matches
//! concurrently, reduce the outcomes with the chosen fitness model, and
//! split the scores back across the parent/offspring seam.

use coevo_core::{Agent, LexicoScore};
use coevo_tournament::{
    aggregate_cumulative, aggregate_elo, cumulative_pairs, round_robin_schedule, EloError,
    EvalConfig, MatchExecutor, MatchRunner, Pairing, ELO_INITIAL,
};
use tracing::info;

use crate::bridge::split_results;
use crate::population::Individual;

/// Failures that abort a whole generation (never caused by individual
/// match failures, which degrade to empty outcomes instead).
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("failed to build match worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Elo(#[from] EloError),
}

/// Evaluate a generation in cumulative mode.
///
/// Every distinct pair among parents ++ candidates plays once; scores are
/// lexicographic. Parents are rescored in place; the returned list holds
/// one fitness per new candidate, in submission order.
pub fn evaluate_generation<E: MatchExecutor>(
    executor: &E,
    config: &EvalConfig,
    parents: &mut [Individual<LexicoScore>],
    candidates: &[Agent],
) -> Result<Vec<LexicoScore>, EvalError> {
    let batch = collect_batch(parents.iter().map(|p| &p.candidate), candidates);
    let pairings = cumulative_pairs(batch.len());
    info!(
        agents = batch.len(),
        matches = pairings.len(),
        "evaluating generation (cumulative)"
    );

    let runner = MatchRunner::new(config.concurrency)?;
    let outcomes = runner.run_all(executor, &batch, &pairings);
    let scores = aggregate_cumulative(&outcomes, batch.len());

    Ok(split_results(scores, parents))
}

/// Evaluate a generation in ELO mode.
///
/// All unique pairings of the round-robin schedule are executed up front;
/// the schedule is then replayed in round order as a sequential rating
/// fold. Parents keep their previous rating as the starting point; new
/// candidates start at [`ELO_INITIAL`].
pub fn evaluate_generation_elo<E: MatchExecutor>(
    executor: &E,
    config: &EvalConfig,
    parents: &mut [Individual<f64>],
    candidates: &[Agent],
) -> Result<Vec<f64>, EvalError> {
    let batch = collect_batch(parents.iter().map(|p| &p.candidate), candidates);
    let schedule = round_robin_schedule(batch.len());
    // Each unordered pair appears in exactly one round, so flattening the
    // schedule is already the unique-pairing set.
    let pairings: Vec<Pairing> = schedule.iter().flatten().copied().collect();
    info!(
        agents = batch.len(),
        rounds = schedule.len(),
        matches = pairings.len(),
        "evaluating generation (elo)"
    );

    let runner = MatchRunner::new(config.concurrency)?;
    let outcomes = runner.run_all(executor, &batch, &pairings);

    let initial: Vec<f64> = parents
        .iter()
        .map(|p| p.fitness.unwrap_or(ELO_INITIAL))
        .chain(candidates.iter().map(|_| ELO_INITIAL))
        .collect();
    let ratings = aggregate_elo(&schedule, &outcomes, initial)?;

    Ok(split_results(ratings, parents))
}

fn collect_batch<'a>(
    parents: impl Iterator<Item = &'a Agent>,
    candidates: &[Agent],
) -> Vec<Agent> {
    parents.cloned().chain(candidates.iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coevo_tournament::{ExecutorError, MatchOutcome};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// The lower batch index sweeps two games, winning in time
    /// proportional to the opponent's index.
    struct LowerIndexSweeps;

    impl MatchExecutor for LowerIndexSweeps {
        fn run_match(
            &self,
            _left: &Agent,
            _right: &Agent,
            tag: &str,
        ) -> Result<MatchOutcome, ExecutorError> {
            // Tag is "<low>vs<high>_<timestamp>".
            let high: f64 = tag
                .split("vs")
                .nth(1)
                .and_then(|rest| rest.split('_').next())
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0);
            let time = 100.0 * high;
            Ok(MatchOutcome {
                wins: [2, 0],
                ties: 0,
                mean_win_time: [time, f64::INFINITY],
                mean_loss_time: [0.0, time],
                success: true,
            })
        }
    }

    /// Nothing ever runs: every match fails.
    struct AlwaysFails;

    impl MatchExecutor for AlwaysFails {
        fn run_match(
            &self,
            _left: &Agent,
            _right: &Agent,
            _tag: &str,
        ) -> Result<MatchOutcome, ExecutorError> {
            Err(ExecutorError::Malformed("engine unavailable".into()))
        }
    }

    fn genomes(n: usize) -> Vec<Agent> {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        (0..n).map(|_| Agent::random(&mut rng)).collect()
    }

    #[test]
    fn test_cumulative_generation_rescored_parents_and_offspring_order() {
        let g = genomes(4);
        let mut parents = vec![
            Individual::with_fitness(g[0].clone(), LexicoScore::worst()),
            Individual::with_fitness(g[1].clone(), LexicoScore::worst()),
        ];
        let candidates = vec![g[2].clone(), g[3].clone()];
        let config = EvalConfig::new(2);

        let offspring =
            evaluate_generation(&LowerIndexSweeps, &config, &mut parents, &candidates).unwrap();

        assert_eq!(offspring.len(), 2);

        // Batch index 0 swept all three opponents (times 100/200/300).
        let best = parents[0].fitness.unwrap();
        assert_eq!(best.primary, 6.0); // 3 matches * 2 wins
        assert_eq!(best.mean_win_time, 200.0);

        // Batch index 2 (first candidate) beat only index 3; index 3 lost
        // everything.
        assert_eq!(offspring[0].primary, 2.0);
        assert_eq!(offspring[1].primary, 0.0);
        assert!(!offspring[1].has_wins());
        assert!(offspring[0] > offspring[1]);
    }

    #[test]
    fn test_cumulative_generation_all_failures_degrades() {
        let g = genomes(3);
        let mut parents = vec![Individual::unevaluated(g[0].clone())];
        let candidates = vec![g[1].clone(), g[2].clone()];
        let config = EvalConfig::new(2);

        let offspring =
            evaluate_generation(&AlwaysFails, &config, &mut parents, &candidates).unwrap();

        assert_eq!(parents[0].fitness, Some(LexicoScore::worst()));
        assert_eq!(offspring, vec![LexicoScore::worst(); 2]);
    }

    #[test]
    fn test_elo_generation_carries_parent_ratings() {
        let g = genomes(3);
        let mut parents = vec![
            Individual::with_fitness(g[0].clone(), 1400.0),
            Individual::unevaluated(g[1].clone()),
        ];
        let candidates = vec![g[2].clone()];
        let config = EvalConfig::new(2);

        let offspring =
            evaluate_generation_elo(&LowerIndexSweeps, &config, &mut parents, &candidates)
                .unwrap();

        assert_eq!(offspring.len(), 1);

        // Batch index 0 swept both opponents: its rating rose above the
        // 1400 it carried in; everyone else fell below their 1200 seed.
        assert!(parents[0].fitness.unwrap() > 1400.0);
        assert!(parents[1].fitness.unwrap() < 1200.0);
        assert!(offspring[0] < 1200.0);

        // Rating mass is conserved by the update rule.
        let total = parents[0].fitness.unwrap() + parents[1].fitness.unwrap() + offspring[0];
        assert!((total - (1400.0 + 1200.0 + 1200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_elo_generation_failed_matches_leave_ratings_at_seed() {
        let g = genomes(2);
        let mut parents = vec![Individual::with_fitness(g[0].clone(), 1333.0)];
        let candidates = vec![g[1].clone()];
        let config = EvalConfig::new(1);

        let offspring =
            evaluate_generation_elo(&AlwaysFails, &config, &mut parents, &candidates).unwrap();

        assert_eq!(parents[0].fitness, Some(1333.0));
        assert_eq!(offspring, vec![ELO_INITIAL]);
    }

    #[test]
    fn test_single_agent_generation_is_a_no_op_tournament() {
        let g = genomes(1);
        let mut parents: Vec<Individual<LexicoScore>> = Vec::new();
        let candidates = vec![g[0].clone()];
        let config = EvalConfig::new(1);

        let offspring =
            evaluate_generation(&LowerIndexSweeps, &config, &mut parents, &candidates).unwrap();

        // No opponents: the lone candidate scores the empty reduction.
        assert_eq!(offspring, vec![LexicoScore::worst()]);
    }
}
