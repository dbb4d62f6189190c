use std::collections::HashMap;

use serde::Serialize;

use crate::classify::{classify, Category};
use crate::error::{FuzzyError, Result};
use crate::variable::{RegistryId, Variable, VariableKey};

/// Defuzzified value of one output variable.
///
/// `degenerate` is set when no rule contributed to the output; `value` is then
/// the universe midpoint rather than a centroid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CrispOutput {
    value: f64,
    degenerate: bool,
}

impl CrispOutput {
    pub(crate) fn new(value: f64, degenerate: bool) -> Self {
        Self { value, degenerate }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn category(&self) -> Category {
        classify(self.value)
    }

    /// The value, or [`FuzzyError::DegenerateResult`] for callers that treat a
    /// midpoint fallback as a failure
    pub fn require_crisp(&self, variable: &str) -> Result<f64> {
        if self.degenerate {
            return Err(FuzzyError::DegenerateResult {
                variable: variable.to_owned(),
            });
        }

        Ok(self.value)
    }
}

#[derive(Debug)]
pub struct Outputs {
    registry: RegistryId,
    defuzzified: HashMap<VariableKey, CrispOutput>,
}

impl Outputs {
    pub(crate) fn new(registry: RegistryId, defuzzified: HashMap<VariableKey, CrispOutput>) -> Self {
        Self { registry, defuzzified }
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<CrispOutput> {
        if var.1 != self.registry {
            return None;
        }

        self.defuzzified.get(&var.0).copied()
    }

    pub fn len(&self) -> usize {
        self.defuzzified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defuzzified.is_empty()
    }
}

#[test]
fn test_require_crisp() {
    assert_eq!(CrispOutput::new(63.2, false).require_crisp("cooling").unwrap(), 63.2);
    assert!(matches!(
        CrispOutput::new(50., true).require_crisp("cooling"),
        Err(FuzzyError::DegenerateResult { .. })
    ));
    assert_eq!(CrispOutput::new(63.2, false).category(), Category::Medium);
}
