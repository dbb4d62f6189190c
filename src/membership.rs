use crate::error::{FuzzyError, Result};

/// Triangular membership function with breakpoints `a <= b <= c`.
///
/// The degree rises linearly from 0 at `a` to 1 at `b` and falls back to 0 at `c`.
/// Shoulders (`a == b` or `b == c`) are allowed and evaluate as a step at the peak.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MembershipFunction {
    a: f64,
    b: f64,
    c: f64,
}

impl MembershipFunction {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        // Also rejects NaN breakpoints since every comparison with NaN is false
        if !(a <= b && b <= c) {
            return Err(FuzzyError::MalformedTriangle { a, b, c });
        }

        Ok(Self { a, b, c })
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if !(a <= x && x <= c) {
            0.
        } else if x == b {
            1.
        } else if x < b {
            // a <= x < b, so b - a > 0
            (x - a) / (b - a)
        } else {
            // b < x <= c, so c - b > 0
            (c - x) / (c - b)
        }
    }

    /// Samples the function at every point of `universe`
    pub fn sample(&self, universe: &[f64]) -> Vec<f64> {
        universe.iter().map(|x| self.degree(*x)).collect()
    }
}

#[test]
fn test_triangle_breakpoints() {
    let warm = MembershipFunction::new(10., 25., 35.).unwrap();

    assert_eq!(warm.degree(10.), 0.);
    assert_eq!(warm.degree(25.), 1.);
    assert_eq!(warm.degree(35.), 0.);
    assert_eq!(warm.degree(17.5), 0.5);
    assert_eq!(warm.degree(30.), 0.5);
    assert_eq!(warm.degree(-3.), 0.);
    assert_eq!(warm.degree(36.), 0.);
}

#[test]
fn test_shoulders() {
    let cold = MembershipFunction::new(0., 0., 15.).unwrap();
    let hot = MembershipFunction::new(30., 50., 50.).unwrap();
    let spike = MembershipFunction::new(5., 5., 5.).unwrap();

    assert_eq!(cold.degree(0.), 1.);
    assert_eq!(cold.degree(3.), 0.8);
    assert_eq!(cold.degree(15.), 0.);
    assert_eq!(hot.degree(50.), 1.);
    assert_eq!(hot.degree(40.), 0.5);
    assert_eq!(hot.degree(30.), 0.);
    assert_eq!(spike.degree(5.), 1.);
    assert_eq!(spike.degree(5.5), 0.);
}

#[test]
fn test_malformed() {
    assert!(matches!(
        MembershipFunction::new(3., 1., 5.),
        Err(FuzzyError::MalformedTriangle { .. })
    ));
    assert!(MembershipFunction::new(0., 6., 5.).is_err());
    assert!(MembershipFunction::new(f64::NAN, 1., 2.).is_err());
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::MembershipFunction;

    proptest! {
        #[test]
        fn degree_is_bounded_and_pinned(
            a in -100.0f64..100.0,
            ab in 0.001f64..50.0,
            bc in 0.001f64..50.0,
            x in -200.0f64..300.0,
        ) {
            let (b, c) = (a + ab, a + ab + bc);
            let mf = MembershipFunction::new(a, b, c).unwrap();

            prop_assert_eq!(mf.degree(a), 0.);
            prop_assert_eq!(mf.degree(c), 0.);
            prop_assert_eq!(mf.degree(b), 1.);

            let d = mf.degree(x);
            prop_assert!((0. ..=1.).contains(&d));
        }
    }
}
