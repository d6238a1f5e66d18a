//! Population bridge - splitting batch scores back across the P/C seam
//!
//! The generation batch is scored as one flat index range: parents first,
//! new candidates after. This module is the only place aware of that
//! split.

use crate::population::Individual;

/// Split a full batch of scores back into parent updates and offspring
/// fitness.
///
/// The first `parents.len()` scores overwrite the parents' fitness in
/// place, preserving their positions; the remainder is returned as the
/// offspring fitness list in original submission order. The score vector
/// must cover every parent.
pub fn split_results<F>(all_scores: Vec<F>, parents: &mut [Individual<F>]) -> Vec<F> {
    assert!(
        all_scores.len() >= parents.len(),
        "batch produced {} scores for {} parents",
        all_scores.len(),
        parents.len()
    );

    let mut scores = all_scores.into_iter();
    for parent in parents.iter_mut() {
        parent.fitness = scores.next();
    }
    scores.collect()
}
