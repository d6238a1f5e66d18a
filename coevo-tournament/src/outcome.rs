//! Match outcomes - per-pairing aggregate results
//!
//! Level 4 - Data types

use rustc_hash::FxHashMap;

use crate::pairing::Pairing;

/// Results of one executed pairing, keyed by the normalized pairing.
pub type OutcomeMap = FxHashMap<Pairing, MatchOutcome>;

/// Aggregate result of the games played between the two sides of a pairing.
///
/// Side 0 is the pairing's lower agent index, side 1 the higher one.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome {
    /// Games won by each side
    pub wins: [u32; 2],
    /// Drawn games (counted once; both sides share them)
    pub ties: u32,
    /// Mean in-game time of each side's victories (+inf if it never won)
    pub mean_win_time: [f64; 2],
    /// Mean in-game time of each side's defeats (0 if it never lost)
    pub mean_loss_time: [f64; 2],
    /// False when the match could not be executed or parsed
    pub success: bool,
}

impl MatchOutcome {
    /// Substitute outcome for a failed match: no games, never won, lost
    /// instantly, flagged unsuccessful.
    pub fn failed() -> Self {
        Self {
            wins: [0, 0],
            ties: 0,
            mean_win_time: [f64::INFINITY, f64::INFINITY],
            mean_loss_time: [0.0, 0.0],
            success: false,
        }
    }

    /// Total games recorded in this outcome.
    pub fn total_games(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.ties
    }

    /// Score of side 0 in [0, 1]: wins plus half the ties over total games.
    /// Zero-game outcomes score 0.
    pub fn score_for_low(&self) -> f64 {
        let total = self.total_games();
        if total == 0 {
            0.0
        } else {
            (self.wins[0] as f64 + 0.5 * self.ties as f64) / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_outcome_sentinels() {
        let outcome = MatchOutcome::failed();
        assert!(!outcome.success);
        assert_eq!(outcome.total_games(), 0);
        assert_eq!(outcome.wins, [0, 0]);
        assert!(outcome.mean_win_time[0].is_infinite());
        assert!(outcome.mean_win_time[1].is_infinite());
        assert_eq!(outcome.mean_loss_time, [0.0, 0.0]);
    }

    #[test]
    fn test_score_for_low() {
        let outcome = MatchOutcome {
            wins: [3, 1],
            ties: 2,
            mean_win_time: [100.0, 250.0],
            mean_loss_time: [250.0, 100.0],
            success: true,
        };
        assert_eq!(outcome.total_games(), 6);
        assert_eq!(outcome.score_for_low(), 4.0 / 6.0);
    }

    #[test]
    fn test_score_for_low_zero_games() {
        assert_eq!(MatchOutcome::failed().score_for_low(), 0.0);
    }
}
