//! Population members as the external GA library sees them

use coevo_core::Agent;

/// One member of the live population: a candidate genome plus the
/// fitness slot the evolutionary loop reads and this crate rewrites.
///
/// Generic over the fitness type because the two evaluation models score
/// differently: lexicographic triples in cumulative mode, scalar ELO
/// ratings in ELO mode.
#[derive(Clone, Debug)]
pub struct Individual<F> {
    /// The genome
    pub candidate: Agent,
    /// Last computed fitness, if any
    pub fitness: Option<F>,
}

impl<F> Individual<F> {
    /// Wrap a genome that has not been evaluated yet.
    pub fn unevaluated(candidate: Agent) -> Self {
        Self {
            candidate,
            fitness: None,
        }
    }

    /// Wrap a genome with a known fitness.
    pub fn with_fitness(candidate: Agent, fitness: F) -> Self {
        Self {
            candidate,
            fitness: Some(fitness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_constructors() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let agent = Agent::random(&mut rng);

        let fresh: Individual<f64> = Individual::unevaluated(agent.clone());
        assert!(fresh.fitness.is_none());

        let rated = Individual::with_fitness(agent, 1250.0);
        assert_eq!(rated.fitness, Some(1250.0));
    }
}
