//! Sequential ELO aggregation - path-dependent rating replay
//!
//! Level 2 - Phase-level implementation
//!
//! All match outcomes are computed up front by the match runner; this
//! phase then replays the round schedule in order as a pure fold over the
//! ratings vector. Round order is semantically significant (ratings are
//! path-dependent), so this reduction is strictly single-threaded.

use crate::outcome::OutcomeMap;
use crate::pairing::Round;

/// Rating every new candidate starts from.
pub const ELO_INITIAL: f64 = 1200.0;

/// Fixed K-factor for rating updates.
pub const ELO_K: f64 = 32.0;

/// Contract violations during rating aggregation.
#[derive(Debug, thiserror::Error)]
pub enum EloError {
    /// A scheduled pairing has no outcome. Unreachable when the runner
    /// executed the full schedule; reaching it is a programming error in
    /// the caller, not a recoverable match failure.
    #[error("no outcome recorded for scheduled pairing {0}vs{1}")]
    MissingOutcome(usize, usize),

    #[error("schedule references agent {agent} but only {n} ratings were seeded")]
    RatingsTooShort { agent: usize, n: usize },
}

/// Standard logistic ELO update for one pairing.
///
/// `score_a` is A's result in [0, 1] (1 = swept the match, 0.5 = even).
/// Returns the updated `(rating_a, rating_b)`.
pub fn update_ratings(rating_a: f64, rating_b: f64, score_a: f64) -> (f64, f64) {
    let expected_a = 1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0));
    let expected_b = 1.0 - expected_a;
    (
        rating_a + ELO_K * (score_a - expected_a),
        rating_b + ELO_K * ((1.0 - score_a) - expected_b),
    )
}

/// Replay a round schedule against precomputed outcomes, folding the
/// seeded ratings forward one round at a time.
///
/// Pairings whose outcome recorded zero games (both sides failed) leave
/// both ratings untouched. A scheduled pairing with no outcome at all is
/// a fatal contract violation.
pub fn aggregate_elo(
    schedule: &[Round],
    outcomes: &OutcomeMap,
    initial: Vec<f64>,
) -> Result<Vec<f64>, EloError> {
    schedule.iter().try_fold(initial, |ratings, round| {
        apply_round(ratings, round, outcomes)
    })
}

/// Apply one round's rating updates in pairing order.
fn apply_round(
    mut ratings: Vec<f64>,
    round: &Round,
    outcomes: &OutcomeMap,
) -> Result<Vec<f64>, EloError> {
    for &pairing in round {
        let (low, high) = (pairing.low(), pairing.high());
        if high >= ratings.len() {
            return Err(EloError::RatingsTooShort {
                agent: high,
                n: ratings.len(),
            });
        }

        let outcome = outcomes
            .get(&pairing)
            .ok_or(EloError::MissingOutcome(low, high))?;
        if outcome.total_games() == 0 {
            continue;
        }

        let (new_low, new_high) = update_ratings(ratings[low], ratings[high], outcome.score_for_low());
        ratings[low] = new_low;
        ratings[high] = new_high;
    }
    Ok(ratings)
}
