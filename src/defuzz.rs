use std::iter::Sum;

use num::Float;
use tracing::warn;

use crate::inference::AggregatedFuzzySet;
use crate::outputs::CrispOutput;

/// Discrete center of gravity: `Σ x·μ(x) / Σ μ(x)`.
///
/// Returns `None` when the membership is zero everywhere.
pub fn centroid<F: Float + Sum>(universe: &[F], membership: &[F]) -> Option<F> {
    let den = membership.iter().copied().sum::<F>();

    if den == F::zero() {
        return None;
    }

    let num = universe
        .iter()
        .zip(membership)
        .map(|(x, m)| *x * *m)
        .sum::<F>();

    Some(num / den)
}

/// Crisp value of an aggregated set. An empty set falls back to the universe
/// midpoint and is flagged as degenerate.
pub fn defuzzify<T>(set: &AggregatedFuzzySet<'_, T>) -> CrispOutput {
    match centroid(set.points(), set.degrees()) {
        Some(value) => CrispOutput::new(value, false),
        None => {
            let midpoint = set.universe().midpoint();

            warn!(variable = set.name(), midpoint, "no rule fired, output is degenerate");

            CrispOutput::new(midpoint, true)
        },
    }
}

#[test]
fn test_centroid() {
    let xs = [0., 1., 2., 3., 4.];

    assert_eq!(centroid(&xs, &[0., 0., 1., 0., 0.]), Some(2.));
    assert_eq!(centroid(&xs, &[1., 0., 0., 0., 1.]), Some(2.));
    assert_eq!(centroid(&xs, &[0., 0., 0., 1., 1.]), Some(3.5));
    assert_eq!(centroid(&xs, &[0.; 5]), None);
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::centroid;
    use crate::membership::MembershipFunction;
    use crate::variable::Universe;

    proptest! {
        #[test]
        fn symmetric_triangle_centroid_is_peak(b in 10u32..=90, half in 1u32..=10) {
            let (b, half) = (b as f64, half as f64);
            let xs: Vec<f64> = Universe::new(0. ..=100., 1.).unwrap().points().collect();
            let mf = MembershipFunction::new(b - half, b, b + half).unwrap();
            let c = centroid(&xs, &mf.sample(&xs)).unwrap();

            prop_assert!((c - b).abs() < 1e-9);
        }
    }
}
