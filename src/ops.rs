//! Fuzzy operators of a Mamdani system: minimum for AND and implication,
//! maximum for aggregation.

use num::Float;

/// Fuzzy AND of two degrees
#[inline]
pub fn and<F: Float>(u: F, v: F) -> F {
    F::min(u, v)
}

/// Fuzzy AND over any number of degrees. An empty conjunction holds fully.
pub fn and_all<F: Float>(degrees: impl IntoIterator<Item = F>) -> F {
    degrees.into_iter().fold(F::one(), and)
}

/// Clips a consequent membership curve at the rule's firing strength
pub fn implication<F: Float>(
    strength: F,
    membership: impl IntoIterator<Item = F>,
) -> impl Iterator<Item = F> {
    membership.into_iter().map(move |m| F::min(strength, m))
}

/// Point-wise maximum of `contribution` into `acc`
pub fn aggregate<F: Float>(acc: &mut [F], contribution: impl IntoIterator<Item = F>) {
    for (a, c) in acc.iter_mut().zip(contribution) {
        *a = F::max(*a, c);
    }
}

#[test]
fn test_ops() {
    assert_eq!(and(0.3, 0.7), 0.3);
    assert_eq!(and_all([0.9, 0.4, 0.6]), 0.4);
    assert_eq!(and_all(Vec::<f64>::new()), 1.);
    assert_eq!(
        implication(0.5, [0., 0.25, 0.75, 1.]).collect::<Vec<_>>(),
        vec![0., 0.25, 0.5, 0.5]
    );

    let mut acc = vec![0., 0.5, 0.2];
    aggregate(&mut acc, [0.1, 0.3, 0.9]);
    assert_eq!(acc, vec![0.1, 0.5, 0.9]);

    // Idempotent: folding the same contribution again changes nothing
    aggregate(&mut acc, [0.1, 0.3, 0.9]);
    assert_eq!(acc, vec![0.1, 0.5, 0.9]);
}
