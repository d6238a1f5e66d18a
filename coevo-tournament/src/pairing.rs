//! Pairing generation - all-pairs and round-robin schedules
//!
//! Level 3 - Step-level implementation

/// An unordered pair of agent indices scheduled to play one match.
///
/// Always stored normalized as (min, max) so the same match-up hashes to
/// the same key regardless of how it was submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pairing {
    low: usize,
    high: usize,
}

impl Pairing {
    /// Create a normalized pairing. The two indices must differ.
    pub fn new(i: usize, j: usize) -> Self {
        debug_assert!(i != j, "an agent cannot be paired with itself");
        Self {
            low: i.min(j),
            high: i.max(j),
        }
    }

    /// Smaller agent index.
    pub fn low(&self) -> usize {
        self.low
    }

    /// Larger agent index.
    pub fn high(&self) -> usize {
        self.high
    }

    /// Whether the given agent participates in this pairing.
    pub fn contains(&self, agent: usize) -> bool {
        self.low == agent || self.high == agent
    }
}

/// One tournament round: a batch of pairings in which no agent appears twice.
pub type Round = Vec<Pairing>;

/// Generate all C(n,2) distinct pairings for cumulative evaluation.
///
/// Fewer than two agents yields no pairings.
pub fn cumulative_pairs(n: usize) -> Vec<Pairing> {
    let mut pairings = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push(Pairing::new(i, j));
        }
    }
    pairings
}

/// Sentinel slot for the bye player when n is odd.
const BYE: usize = usize::MAX;

/// Generate a circle-method round-robin schedule for `n` agents.
///
/// Slot 0 stays fixed while the remaining slots rotate each round. Odd
/// agent counts are padded with a bye slot; pairings against the bye are
/// dropped, so one agent sits out per round. Every unordered pair appears
/// in exactly one round across the whole schedule. Fewer than two agents
/// yields an empty schedule.
pub fn round_robin_schedule(n: usize) -> Vec<Round> {
    if n < 2 {
        return Vec::new();
    }

    let mut slots: Vec<usize> = (0..n).collect();
    if n % 2 == 1 {
        slots.push(BYE);
    }
    let len = slots.len();

    let mut rounds = Vec::with_capacity(len - 1);
    for _ in 0..len - 1 {
        let mut round = Vec::with_capacity(len / 2);
        for i in 0..len / 2 {
            let a = slots[i];
            let b = slots[len - 1 - i];
            if a != BYE && b != BYE {
                round.push(Pairing::new(a, b));
            }
        }
        rounds.push(round);

        // Rotate everything but slot 0 one position clockwise.
        let last = slots[len - 1];
        slots.copy_within(1..len - 1, 2);
        slots[1] = last;
    }

    rounds
}
