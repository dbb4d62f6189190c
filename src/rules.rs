use std::hash::Hash;

use crate::dsl::{Clause, Premise};
use crate::inference::Fuzzified;
use crate::ops::and_all;

/// IF every premise clause holds THEN each consequence clause receives the firing strength
#[derive(Clone, Debug)]
pub struct Rule<T> {
    pub(crate) premise: Vec<Clause<T>>,
    pub(crate) consequence: Vec<Clause<T>>,
}

impl<T: Eq + Hash> Rule<T> {
    pub fn premise(&self) -> &[Clause<T>] {
        &self.premise
    }

    pub fn consequence(&self) -> &[Clause<T>] {
        &self.consequence
    }

    /// Firing strength: the minimum premise degree. Labels missing from
    /// `fuzzified` count as zero membership.
    pub fn evaluate(&self, fuzzified: &Fuzzified<T>) -> f64 {
        and_all(
            self.premise
                .iter()
                .map(|clause| fuzzified.degree(clause.var, &clause.label)),
        )
    }
}

#[derive(Clone, Debug)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: impl Into<Premise<T>>, consequence: impl IntoIterator<Item = Clause<T>>) {
        self.0.push(Rule {
            premise: premise.into().0,
            consequence: consequence.into_iter().collect(),
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule<T>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::variable::{RegistryId, VariableKey};

    fn keys() -> (VariableKey, VariableKey) {
        let mut map = slotmap::SlotMap::<VariableKey, ()>::with_key();
        (map.insert(()), map.insert(()))
    }

    fn fuzzified(a: VariableKey, b: VariableKey, da: f64, db: f64) -> Fuzzified<&'static str> {
        let mut f = Fuzzified::new();
        f.insert(a, HashMap::from([("cold", da), ("warm", 1. - da)]));
        f.insert(b, HashMap::from([("dry", db)]));
        f
    }

    fn clause(var: VariableKey, label: &'static str) -> Clause<&'static str> {
        Clause {
            var,
            registry: RegistryId::next(),
            label,
        }
    }

    fn rule(a: VariableKey, b: VariableKey) -> Rule<&'static str> {
        let premise = clause(a, "cold").and(clause(b, "dry"));
        let mut rules = Rules::new();
        rules.add(premise, [clause(b, "out")]);
        rules.0.remove(0)
    }

    #[test]
    fn test_firing_strength_is_minimum() {
        let (a, b) = keys();
        let rule = rule(a, b);

        assert_eq!(rule.evaluate(&fuzzified(a, b, 0.7, 0.4)), 0.4);
        assert_eq!(rule.evaluate(&fuzzified(a, b, 0.2, 0.9)), 0.2);
        assert_eq!(rule.premise().len(), 2);
        assert_eq!(rule.consequence().len(), 1);
    }

    #[test]
    fn test_missing_label_is_zero() {
        let (a, b) = keys();
        let rule = rule(a, b);
        let mut f = Fuzzified::new();

        f.insert(a, HashMap::from([("cold", 1.)]));
        assert_eq!(rule.evaluate(&f), 0.);
        assert_eq!(rule.evaluate(&Fuzzified::new()), 0.);
    }

    proptest! {
        #[test]
        fn firing_strength_is_monotonic(
            da in 0.0f64..=1.0,
            db in 0.0f64..=1.0,
            bump in 0.0f64..=1.0,
        ) {
            let (a, b) = keys();
            let rule = rule(a, b);
            let base = rule.evaluate(&fuzzified(a, b, da, db));
            let raised_a = rule.evaluate(&fuzzified(a, b, (da + bump).min(1.), db));
            let raised_b = rule.evaluate(&fuzzified(a, b, da, (db + bump).min(1.)));

            prop_assert_eq!(base, da.min(db));
            prop_assert!(raised_a >= base);
            prop_assert!(raised_b >= base);
        }
    }
}
