use std::collections::HashMap;

use crate::variable::{RegistryId, Variable, VariableKey};

/// Crisp values for the input variables of one evaluation
#[derive(Clone, Debug, Default)]
pub struct Inputs(HashMap<(RegistryId, VariableKey), f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert((var.1, var.0), val);
    }

    pub fn with<I>(mut self, var: Variable<I>, val: f64) -> Self {
        self.add(var, val);
        self
    }

    pub(crate) fn get(&self, registry: RegistryId, key: VariableKey) -> Option<f64> {
        self.0.get(&(registry, key)).copied()
    }
}
