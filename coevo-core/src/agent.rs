//! Agent - strategy parameter genome

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of genes in an agent genome
pub const GENOME_LEN: usize = 10;

/// Gene index for worker count (integer-valued, 1..=10)
pub const GENE_WORKERS: usize = 3;

/// Gene index for attacking-worker count (integer-valued, 1..=20)
pub const GENE_ATTACKERS: usize = 4;

/// Inclusive bounds for the worker-count gene
pub const WORKERS_RANGE: (f64, f64) = (1.0, 10.0);

/// Inclusive bounds for the attacker-count gene
pub const ATTACKERS_RANGE: (f64, f64) = (1.0, 20.0);

/// Strategy parameter vector for one game-playing agent.
///
/// Genes 3 and 4 hold integer unit counts; every other gene is a real
/// weight in [0, 1]. Agents are immutable once entered into a match;
/// variation operators produce new values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    genes: [f64; GENOME_LEN],
}

impl Agent {
    /// Create an agent from raw genes, clamping each to its documented bounds.
    pub fn new(genes: [f64; GENOME_LEN]) -> Self {
        let mut agent = Self { genes };
        agent.clamp();
        agent
    }

    /// Sample a random agent within bounds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut genes = [0.0; GENOME_LEN];
        for gene in genes.iter_mut() {
            *gene = rng.gen::<f64>();
        }
        genes[GENE_WORKERS] = rng.gen_range(1..=10) as f64;
        genes[GENE_ATTACKERS] = rng.gen_range(1..=20) as f64;
        Self { genes }
    }

    /// Gene values in order.
    pub fn genes(&self) -> &[f64; GENOME_LEN] {
        &self.genes
    }

    /// Clamp every gene back into its documented range, rounding the
    /// integer-valued genes.
    pub fn clamp(&mut self) {
        for (i, gene) in self.genes.iter_mut().enumerate() {
            let (lo, hi) = match i {
                GENE_WORKERS => WORKERS_RANGE,
                GENE_ATTACKERS => ATTACKERS_RANGE,
                _ => (0.0, 1.0),
            };
            *gene = gene.clamp(lo, hi);
            if i == GENE_WORKERS || i == GENE_ATTACKERS {
                *gene = gene.round();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_agent_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let agent = Agent::random(&mut rng);
            for (i, &gene) in agent.genes().iter().enumerate() {
                match i {
                    GENE_WORKERS => {
                        assert!((1.0..=10.0).contains(&gene));
                        assert_eq!(gene, gene.round());
                    }
                    GENE_ATTACKERS => {
                        assert!((1.0..=20.0).contains(&gene));
                        assert_eq!(gene, gene.round());
                    }
                    _ => assert!((0.0..=1.0).contains(&gene)),
                }
            }
        }
    }

    #[test]
    fn test_new_clamps_out_of_range_genes() {
        let agent = Agent::new([2.0, -1.0, 0.5, 0.2, 99.0, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let genes = agent.genes();
        assert_eq!(genes[0], 1.0);
        assert_eq!(genes[1], 0.0);
        assert_eq!(genes[GENE_WORKERS], 1.0);
        assert_eq!(genes[GENE_ATTACKERS], 20.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let agent = Agent::random(&mut rng);
        let json = serde_json::to_string(&agent).unwrap();
        let back: Agent = serde_json::from_str(&json).unwrap();
        assert_eq!(agent, back);
    }
}
