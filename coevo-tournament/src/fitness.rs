//! Cumulative fitness aggregation - lexicographic scores from raw outcomes
//!
//! Level 2 - Phase-level implementation

use coevo_core::LexicoScore;

use crate::outcome::OutcomeMap;

/// Reduce per-pairing outcomes into one lexicographic score per agent.
///
/// Assumes every distinct pairing among the `n` agents was executed
/// exactly once (cumulative mode always schedules the full all-pairs
/// set). Per agent: `primary = wins + 0.5 * ties` summed over all its
/// matches; the mean win/loss times average that agent's per-match mean
/// times, counting only matches it actually won (finite time) or lost
/// (nonzero time). Agents with no wins score +inf win time; agents with
/// no losses score 0 loss time — a batch where every match failed thus
/// degrades every agent to [`LexicoScore::worst`].
///
/// Pure reduction: identical outcome data always yields identical scores.
pub fn aggregate_cumulative(outcomes: &OutcomeMap, n: usize) -> Vec<LexicoScore> {
    let mut wins = vec![0u32; n];
    let mut ties = vec![0u32; n];
    let mut win_times: Vec<Vec<f64>> = vec![Vec::new(); n];
    let mut loss_times: Vec<Vec<f64>> = vec![Vec::new(); n];

    for (pairing, outcome) in outcomes {
        if !outcome.success {
            continue;
        }
        let sides = [pairing.low(), pairing.high()];
        for (side, &agent) in sides.iter().enumerate() {
            wins[agent] += outcome.wins[side];
            ties[agent] += outcome.ties;
            if outcome.mean_win_time[side].is_finite() {
                win_times[agent].push(outcome.mean_win_time[side]);
            }
            if outcome.mean_loss_time[side] != 0.0 {
                loss_times[agent].push(outcome.mean_loss_time[side]);
            }
        }
    }

    (0..n)
        .map(|agent| {
            let primary = wins[agent] as f64 + 0.5 * ties[agent] as f64;
            let mean_win = mean_or(&win_times[agent], f64::INFINITY);
            let mean_loss = mean_or(&loss_times[agent], 0.0);
            LexicoScore::new(primary, mean_win, mean_loss)
        })
        .collect()
}

fn mean_or(values: &[f64], empty: f64) -> f64 {
    if values.is_empty() {
        empty
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
