//! LexicoScore - lexicographic tournament fitness
//!
//! A three-field score compared field by field in fixed priority order.
//! Used both as GA fitness and as the tournament ranking key.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Lexicographic fitness: win-equivalents first, then speed of winning,
/// then survival time when losing.
///
/// Ordering (greater = better):
/// 1. `primary` - wins + 0.5 * ties, higher is better
/// 2. `mean_win_time` - smaller is better (`f64::INFINITY` = never won)
/// 3. `mean_loss_time` - larger is better (0.0 = never lost)
///
/// The order is a strict total order consistent with field-wise equality,
/// and survives serde round-trips: the possibly-infinite win time is
/// encoded through an `Option` so JSON output stays lossless.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LexicoScore {
    /// Win-equivalent count (wins + 0.5 * ties)
    pub primary: f64,
    /// Mean time to win, or +inf if the agent never won
    #[serde(with = "win_time_serde")]
    pub mean_win_time: f64,
    /// Mean time to lose, or 0 if the agent never lost
    pub mean_loss_time: f64,
}

impl LexicoScore {
    /// Create a score from its three fields.
    pub fn new(primary: f64, mean_win_time: f64, mean_loss_time: f64) -> Self {
        Self {
            primary,
            mean_win_time,
            mean_loss_time,
        }
    }

    /// The worst possible score: no wins, never won, lost instantly.
    pub fn worst() -> Self {
        Self::new(0.0, f64::INFINITY, 0.0)
    }

    /// Whether the agent won at least one game.
    pub fn has_wins(&self) -> bool {
        self.mean_win_time.is_finite()
    }
}

impl PartialEq for LexicoScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LexicoScore {}

impl PartialOrd for LexicoScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LexicoScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            // Smaller win time ranks higher, so compare reversed.
            .then_with(|| other.mean_win_time.total_cmp(&self.mean_win_time))
            .then_with(|| self.mean_loss_time.total_cmp(&other.mean_loss_time))
    }
}

/// Serde adapter: `f64::INFINITY` (never won) maps to `null`, since JSON
/// has no representation for infinity.
mod win_time_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.unwrap_or(f64::INFINITY))
    }
}
