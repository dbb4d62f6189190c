use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::defuzz;
use crate::dsl::Clause;
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::{aggregate, implication};
use crate::outputs::{CrispOutput, Outputs};
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, RegistryId, Role, Universe, Variable, VariableKey, Variables};

/// Membership degrees of every label of every input variable, for one evaluation
#[derive(Clone, Debug, Default)]
pub struct Fuzzified<T>(HashMap<VariableKey, HashMap<T, f64>>);

impl<T: Eq + Hash> Fuzzified<T> {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, key: VariableKey, degrees: HashMap<T, f64>) {
        self.0.insert(key, degrees);
    }

    /// Zero for variables or labels that were not fuzzified
    pub fn degree(&self, key: VariableKey, label: &T) -> f64 {
        self.0
            .get(&key)
            .and_then(|degrees| degrees.get(label))
            .copied()
            .unwrap_or(0.)
    }
}

/// Max-aggregated output membership over the output variable's universe
#[derive(Debug)]
pub struct AggregatedFuzzySet<'v, T> {
    variable: &'v LinguisticVariable<T>,
    degrees: Vec<f64>,
}

impl<'v, T> AggregatedFuzzySet<'v, T> {
    pub fn name(&self) -> &'v str {
        self.variable.name()
    }

    pub fn points(&self) -> &'v [f64] {
        self.variable.points()
    }

    pub fn universe(&self) -> &'v Universe {
        self.variable.universe()
    }

    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    pub fn defuzzify(&self) -> CrispOutput {
        defuzz::defuzzify(self)
    }
}

/// Aggregated sets of every output variable
#[derive(Debug)]
pub struct Aggregated<'v, T> {
    registry: RegistryId,
    sets: HashMap<VariableKey, AggregatedFuzzySet<'v, T>>,
}

impl<'v, T> Aggregated<'v, T> {
    pub fn get<I>(&self, var: Variable<I>) -> Option<&AggregatedFuzzySet<'v, T>> {
        if var.1 != self.registry {
            return None;
        }

        self.sets.get(&var.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &AggregatedFuzzySet<'v, T>)> {
        self.sets.iter().map(|(k, set)| (*k, set))
    }

    pub fn defuzzify(&self) -> Outputs {
        Outputs::new(self.registry, self.iter().map(|(k, set)| (k, set.defuzzify())).collect())
    }
}

/// Mamdani inference over an immutable variable registry and rule table.
///
/// Construction validates every rule reference once; evaluation only reads
/// shared state and keeps its scratch buffers local to the call.
pub struct InferenceEngine<T> {
    variables: Variables<T>,
    rules: Rules<T>,
}

impl<T: Copy + Debug + Eq + Hash> InferenceEngine<T> {
    pub fn new(variables: Variables<T>, rules: Rules<T>) -> Result<Self> {
        for (i, rule) in rules.iter().enumerate() {
            if rule.consequence.is_empty() {
                return Err(FuzzyError::EmptyConsequent { rule: i });
            }

            for clause in &rule.premise {
                check_clause(&variables, i, clause, Role::Input)?;
            }

            for clause in &rule.consequence {
                check_clause(&variables, i, clause, Role::Output)?;
            }
        }

        debug!(variables = variables.len(), rules = rules.len(), "inference engine ready");

        Ok(Self { variables, rules })
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.variables
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    /// Fuzzifies every input variable; each one must be present and within its universe
    pub fn fuzzify(&self, inputs: &Inputs) -> Result<Fuzzified<T>> {
        let mut fuzzified = Fuzzified::new();

        for (key, var) in self.variables.with_role(Role::Input) {
            let value = inputs.get(self.variables.id(), key).ok_or_else(|| FuzzyError::MissingInput {
                variable: var.name().to_owned(),
            })?;

            fuzzified.insert(key, var.fuzzify(value)?);
        }

        Ok(fuzzified)
    }

    /// Fires every rule against `fuzzified` and max-aggregates the clipped
    /// consequents of each output variable
    pub fn aggregate(&self, fuzzified: &Fuzzified<T>) -> Aggregated<'_, T> {
        let mut sets: HashMap<_, _> = self
            .variables
            .with_role(Role::Output)
            .map(|(key, variable)| {
                let degrees = vec![0.; variable.points().len()];

                (key, AggregatedFuzzySet { variable, degrees })
            })
            .collect();

        for (i, rule) in self.rules.iter().enumerate() {
            let strength = rule.evaluate(fuzzified);

            debug!(rule = i, strength, "rule fired");

            if strength <= 0. {
                continue;
            }

            for clause in &rule.consequence {
                // References were checked in new
                let Some(set) = sets.get_mut(&clause.var) else {
                    continue;
                };
                let variable = set.variable;
                let Some(curve) = variable.curve(&clause.label) else {
                    continue;
                };

                aggregate(&mut set.degrees, implication(strength, curve.iter().copied()));
            }
        }

        for set in sets.values() {
            debug!(
                variable = set.variable.name(),
                peak = set.degrees.iter().copied().fold(0., f64::max),
                "aggregated"
            );
        }

        Aggregated {
            registry: self.variables.id(),
            sets,
        }
    }

    pub fn evaluate(&self, inputs: &Inputs) -> Result<Aggregated<'_, T>> {
        let fuzzified = self.fuzzify(inputs)?;

        Ok(self.aggregate(&fuzzified))
    }

    /// Full pipeline down to crisp values
    pub fn infer(&self, inputs: &Inputs) -> Result<Outputs> {
        Ok(self.evaluate(inputs)?.defuzzify())
    }
}

fn check_clause<T: Copy + Debug + Eq + Hash>(
    variables: &Variables<T>,
    rule: usize,
    clause: &Clause<T>,
    role: Role,
) -> Result<()> {
    if clause.registry != variables.id() {
        return Err(FuzzyError::UnknownVariable { rule });
    }

    let var = variables
        .by_key(clause.var)
        .ok_or(FuzzyError::UnknownVariable { rule })?;

    if var.role() != role {
        return Err(FuzzyError::WrongVariableRole {
            rule,
            variable: var.name().to_owned(),
        });
    }

    if !var.has_label(&clause.label) {
        return Err(FuzzyError::UnknownLabel {
            rule,
            variable: var.name().to_owned(),
            label: format!("{:?}", clause.label),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MembershipFunction;
    use crate::terms::{Key, Terms};

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Level {
        Low,
        High,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    enum Term {
        Level(Level),
    }

    impl From<Level> for Term {
        fn from(l: Level) -> Self {
            Self::Level(l)
        }
    }

    fn mf(a: f64, b: f64, c: f64) -> MembershipFunction {
        MembershipFunction::new(a, b, c).unwrap()
    }

    fn low_only() -> Terms<Level> {
        let mut terms = Terms::new();
        terms.insert(Level::Low, mf(0., 0., 5.));
        terms
    }

    fn both() -> Terms<Level> {
        let mut terms = low_only();
        terms.insert(Level::High, mf(5., 10., 10.));
        terms
    }

    fn universe() -> Universe {
        Universe::new(0. ..=10., 1.).unwrap()
    }

    #[test]
    fn test_rejects_dangling_references() {
        let mut other = Variables::<Term>::new();
        other.add_input("a", universe(), both()).unwrap();
        // Second slot of another registry
        let foreign = other.add_input("foreign", universe(), both()).unwrap();

        let mut vars = Variables::<Term>::new();
        let x = vars.add_input("x", universe(), low_only()).unwrap();
        let y = vars.add_output("y", universe(), both()).unwrap();

        let mut rules = Rules::<Term>::new();
        rules.add(x.is(Level::High), [y.is(Level::Low)]);
        let err = InferenceEngine::new(vars, rules).err().unwrap();
        assert!(matches!(err, FuzzyError::UnknownLabel { rule: 0, .. }));
        assert!(err.is_configuration());

        let mut vars = Variables::<Term>::new();
        let x = vars.add_input("x", universe(), both()).unwrap();
        let y = vars.add_output("y", universe(), both()).unwrap();
        let mut rules = Rules::<Term>::new();
        rules.add(x.is(Level::Low), [y.is(Level::Low)]);
        rules.add(y.is(Level::Low), [x.is(Level::Low)]);
        let err = InferenceEngine::new(vars, rules).err().unwrap();
        assert!(matches!(err, FuzzyError::WrongVariableRole { rule: 1, .. }));

        let mut vars = Variables::<Term>::new();
        let x = vars.add_input("x", universe(), both()).unwrap();
        let mut rules = Rules::<Term>::new();
        rules.add(x.is(Level::Low), Vec::<Clause<Term>>::new());
        let err = InferenceEngine::new(vars, rules).err().unwrap();
        assert!(matches!(err, FuzzyError::EmptyConsequent { rule: 0 }));

        let mut vars = Variables::<Term>::new();
        let y = vars.add_output("y", universe(), both()).unwrap();
        let mut rules = Rules::<Term>::new();
        rules.add(foreign.is(Level::Low), [y.is(Level::Low)]);
        let err = InferenceEngine::new(vars, rules).err().unwrap();
        assert!(matches!(err, FuzzyError::UnknownVariable { rule: 0 }));
    }

    #[test]
    fn test_rejects_handles_from_another_registry() {
        let mut other = Variables::<Term>::new();
        let foreign_x = other.add_input("x2", universe(), both()).unwrap();
        let foreign_y = other.add_output("y", universe(), both()).unwrap();

        let mut vars = Variables::<Term>::new();
        let x = vars.add_input("x1", universe(), both()).unwrap();
        let y = vars.add_output("y", universe(), both()).unwrap();
        vars.add_input("x2", universe(), both()).unwrap();

        // Same slots, different registry
        assert_eq!(foreign_x.key(), x.key());
        assert_eq!(foreign_y.key(), y.key());

        let mut rules = Rules::<Term>::new();
        rules.add(foreign_x.is(Level::Low), [foreign_y.is(Level::High)]);
        let err = InferenceEngine::new(vars, rules).err().unwrap();
        assert!(matches!(err, FuzzyError::UnknownVariable { rule: 0 }));

        let (engine, x, y) = engine(false);
        assert!(matches!(
            engine.evaluate(&Inputs::new().with(foreign_x, 2.)),
            Err(FuzzyError::MissingInput { .. })
        ));

        let aggregated = engine.evaluate(&Inputs::new().with(x, 2.)).unwrap();
        assert!(aggregated.get(foreign_y).is_none());
        assert!(aggregated.get(y).is_some());
        assert!(aggregated.defuzzify().get(foreign_y).is_none());
    }

    #[test]
    fn test_duplicate_label_in_terms() {
        let mut terms = both();
        terms.insert(Level::High, mf(6., 8., 10.));

        let mut vars = Variables::<Term>::new();
        let err = vars.add_input("x", universe(), terms).err().unwrap();

        assert!(matches!(err, FuzzyError::DuplicateLabel { .. }));
        assert!(vars.is_empty());
    }

    fn engine(duplicate: bool) -> (InferenceEngine<Term>, Variable<Level>, Variable<Level>) {
        let mut vars = Variables::<Term>::new();
        let x = vars.add_input("x", universe(), both()).unwrap();
        let y = vars.add_output("y", universe(), both()).unwrap();
        let mut rules = Rules::<Term>::new();

        rules.add(x.is(Level::Low), [y.is(Level::Low)]);
        rules.add(x.is(Level::High), [y.is(Level::High)]);
        if duplicate {
            rules.add(x.is(Level::High), [y.is(Level::High)]);
        }

        (InferenceEngine::new(vars, rules).unwrap(), x, y)
    }

    #[test]
    fn test_aggregation_clips_and_maxes() {
        let (engine, x, y) = engine(false);
        let inputs = Inputs::new().with(x, 4.);
        let aggregated = engine.evaluate(&inputs).unwrap();
        let set = aggregated.get(y).unwrap();

        // Low fires at 0.2 and nothing else does
        assert_eq!(set.degrees(), &[0.2, 0.2, 0.2, 0.2, 0.2, 0., 0., 0., 0., 0., 0.]);
        assert_eq!(set.points().len(), 11);
        assert_eq!(set.name(), "y");

        assert_eq!(
            aggregated.iter().map(|(key, set)| (key, set.name())).collect::<Vec<_>>(),
            vec![(y.key(), "y")]
        );

        let outputs = aggregated.defuzzify();
        assert_eq!(outputs.len(), 1);

        let out = outputs.get(y).unwrap();
        assert!(!out.is_degenerate());
        assert!((out.value() - 2.).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_rules_do_not_double_count() {
        let (once, x1, y1) = engine(false);
        let (twice, x2, y2) = engine(true);

        for value in [0., 3., 5., 7.5, 10.] {
            let a = once.evaluate(&Inputs::new().with(x1, value)).unwrap();
            let b = twice.evaluate(&Inputs::new().with(x2, value)).unwrap();

            assert_eq!(a.get(y1).unwrap().degrees(), b.get(y2).unwrap().degrees());
        }
    }

    #[test]
    fn test_degenerate_output() {
        let mut vars = Variables::<Term>::new();
        let x = vars.add_input("x", universe(), both()).unwrap();
        let y = vars.add_output("y", universe(), both()).unwrap();
        let mut rules = Rules::<Term>::new();
        rules.add(x.is(Level::Low), [y.is(Level::High)]);
        let engine = InferenceEngine::new(vars, rules).unwrap();

        let out = engine.infer(&Inputs::new().with(x, 8.)).unwrap().get(y).unwrap();

        assert!(out.is_degenerate());
        assert_eq!(out.value(), 5.);
        assert!(out.require_crisp("y").is_err());
    }

    #[test]
    fn test_inputs_are_checked() {
        let (engine, x, _) = engine(false);

        assert!(matches!(
            engine.evaluate(&Inputs::new()),
            Err(FuzzyError::MissingInput { .. })
        ));
        assert!(matches!(
            engine.evaluate(&Inputs::new().with(x, 10.5)),
            Err(FuzzyError::InputOutOfRange { .. })
        ));
        assert!(engine.evaluate(&Inputs::new().with(x, 10.)).is_ok());
    }

    #[test]
    fn test_fuzzify_inputs() {
        let (engine, x, _) = engine(false);
        let fuzzified = engine.fuzzify(&Inputs::new().with(x, 2.)).unwrap();

        assert_eq!(fuzzified.degree(x.key(), &Term::Level(Level::Low)), 0.6);
        assert_eq!(fuzzified.degree(x.key(), &Term::Level(Level::High)), 0.);
    }
}
