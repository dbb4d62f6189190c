use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;
use crate::terms::{Term, Terms};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Identifies the [`Variables`] registry that issued a handle. Slotmap keys
/// are only meaningful inside the registry that created them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RegistryId(u64);

impl RegistryId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);

        RegistryId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Typed handle to a registered variable; `I` is the label enum of that variable.
pub struct Variable<I>(pub(crate) VariableKey, pub(crate) RegistryId, PhantomData<I>);

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        Variable(self.0, self.1, PhantomData)
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }

    pub fn registry(&self) -> RegistryId {
        self.1
    }
}

/// Upper bound on the points of one universe
pub const MAX_RESOLUTION: usize = 1_000_000;

/// Discretized closed domain of a variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    resolution: usize,
}

impl Universe {
    pub fn new(range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let (min, max) = (*range.start(), *range.end());

        if !(min.is_finite() && max.is_finite() && step.is_finite() && min < max && step > 0.) {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        // The float division can land a hair below an integer for fractional
        // steps, so nudge by a tiny epsilon before flooring
        let steps = (max - min) / step + 1e-9;

        if !steps.is_finite() || steps >= MAX_RESOLUTION as f64 {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        Ok(Self {
            min,
            max,
            step,
            resolution: steps.floor() as usize + 1,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Inclusive on both ends; NaN is never contained
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.
    }

    /// Number of discrete points, like numpy's `arange` length
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// `min, min + step, ...`; the last point may stop short of max
    pub fn points(&self) -> impl ExactSizeIterator<Item = f64> {
        let (min, step) = (self.min, self.step);

        (0..self.resolution).map(move |i| min + step * i as f64)
    }
}

/// Whether a variable is read from crisp inputs or produced by the rules
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Input,
    Output,
}

#[derive(Debug)]
struct FuzzySet<T> {
    label: T,
    mf: MembershipFunction,
    curve: Vec<f64>,
}

/// A named variable with labeled membership functions over its universe.
#[derive(Debug)]
pub struct LinguisticVariable<T> {
    name: String,
    role: Role,
    universe: Universe,
    points: Vec<f64>,
    sets: Vec<FuzzySet<T>>,
}

impl<T> LinguisticVariable<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The discretized universe, shared by every curve of this variable
    pub fn points(&self) -> &[f64] {
        &self.points
    }
}

impl<T: Copy + Debug + Eq + Hash> LinguisticVariable<T> {
    pub fn new(name: impl Into<String>, role: Role, universe: Universe) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            points: universe.points().collect(),
            sets: Vec::new(),
        }
    }

    pub fn add_set(&mut self, label: T, mf: MembershipFunction) -> Result<()> {
        if self.has_label(&label) {
            return Err(FuzzyError::DuplicateLabel {
                variable: self.name.clone(),
                label: format!("{label:?}"),
            });
        }

        let curve = mf.sample(&self.points);

        self.sets.push(FuzzySet { label, mf, curve });

        Ok(())
    }

    pub fn has_label(&self, label: &T) -> bool {
        self.sets.iter().any(|set| set.label == *label)
    }

    pub fn labels(&self) -> impl Iterator<Item = T> + '_ {
        self.sets.iter().map(|set| set.label)
    }

    pub fn membership_function(&self, label: &T) -> Option<&MembershipFunction> {
        self.sets.iter().find(|set| set.label == *label).map(|set| &set.mf)
    }

    /// Membership of `label` sampled over [`points`](Self::points)
    pub fn curve(&self, label: &T) -> Option<&[f64]> {
        self.sets
            .iter()
            .find(|set| set.label == *label)
            .map(|set| &*set.curve)
    }

    pub fn curves(&self) -> impl Iterator<Item = (T, &[f64])> + '_ {
        self.sets.iter().map(|set| (set.label, &*set.curve))
    }

    pub fn fuzzify(&self, value: f64) -> Result<HashMap<T, f64>> {
        if !self.universe.contains(value) {
            return Err(FuzzyError::InputOutOfRange {
                variable: self.name.clone(),
                value,
                min: self.universe.min,
                max: self.universe.max,
            });
        }

        let degrees: HashMap<_, _> = self
            .sets
            .iter()
            .map(|set| (set.label, set.mf.degree(value)))
            .collect();

        trace!(variable = %self.name, value, ?degrees, "fuzzified");

        Ok(degrees)
    }
}

/// Registry of every variable the rules may reference
pub struct Variables<T> {
    id: RegistryId,
    vars: SlotMap<VariableKey, LinguisticVariable<T>>,
}

impl<T: Copy + Debug + Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self {
            id: RegistryId::next(),
            vars: SlotMap::with_key(),
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    pub fn add_input<I: Into<T> + Term + Debug>(
        &mut self,
        name: &str,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        self.add(name, Role::Input, universe, terms)
    }

    pub fn add_output<I: Into<T> + Term + Debug>(
        &mut self,
        name: &str,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        self.add(name, Role::Output, universe, terms)
    }

    fn add<I: Into<T> + Term + Debug>(
        &mut self,
        name: &str,
        role: Role,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        if let Some(label) = terms.duplicates.first() {
            return Err(FuzzyError::DuplicateLabel {
                variable: name.to_owned(),
                label: format!("{label:?}"),
            });
        }

        let mut var = LinguisticVariable::new(name, role, universe);

        for (label, mf) in terms.sets.iter() {
            var.add_set(label.into(), *mf)?;
        }

        let key = self.vars.insert(var);

        Ok(Variable(key, self.id, PhantomData))
    }

    /// `None` for handles issued by another registry
    pub fn get<I>(&self, var: Variable<I>) -> Option<&LinguisticVariable<T>> {
        if var.1 != self.id {
            return None;
        }

        self.vars.get(var.0)
    }

    pub fn by_key(&self, key: VariableKey) -> Option<&LinguisticVariable<T>> {
        self.vars.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable<T>)> {
        self.vars.iter()
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = (VariableKey, &LinguisticVariable<T>)> {
        self.vars.iter().filter(move |(_, var)| var.role == role)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<T: Copy + Debug + Eq + Hash> Default for Variables<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_universe() {
    let u = Universe::new(0. ..=100., 1.).unwrap();

    assert_eq!(u.resolution(), 101);
    assert_eq!(u.step(), 1.);
    assert_eq!(u.midpoint(), 50.);
    assert!(u.contains(0.) && u.contains(100.));
    assert!(!u.contains(-0.5) && !u.contains(100.5) && !u.contains(f64::NAN));

    let fine = Universe::new(0. ..=1., 0.1).unwrap();
    assert_eq!(fine.resolution(), 11);

    let ragged = Universe::new(0. ..=10., 3.).unwrap();
    assert_eq!(ragged.points().collect::<Vec<_>>(), vec![0., 3., 6., 9.]);

    assert!(Universe::new(5. ..=5., 1.).is_err());
    assert!(Universe::new(0. ..=5., 0.).is_err());
    assert!(Universe::new(0. ..=f64::INFINITY, 1.).is_err());
}

#[test]
fn test_universe_resolution_is_bounded() {
    assert!(matches!(
        Universe::new(0. ..=1e300, 1e-300),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    // max - min overflows to infinity
    assert!(Universe::new(-1e308..=1e308, 1.).is_err());
    assert!(Universe::new(0. ..=MAX_RESOLUTION as f64, 1.).is_err());

    let largest = Universe::new(0. ..=(MAX_RESOLUTION - 2) as f64, 1.).unwrap();
    assert_eq!(largest.resolution(), MAX_RESOLUTION - 1);
    assert_eq!(largest.points().len(), MAX_RESOLUTION - 1);
}

#[test]
fn test_handles_are_scoped_to_their_registry() {
    use crate::terms::Key;

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Light {
        Dim,
    }

    fn terms() -> Terms<Light> {
        let mut terms = Terms::new();
        terms.insert(Light::Dim, MembershipFunction::new(0., 0., 5.).unwrap());
        terms
    }

    let universe = Universe::new(0. ..=10., 1.).unwrap();
    let mut a = Variables::<Light>::new();
    let mut b = Variables::<Light>::new();
    let x = a.add_input("x", universe, terms()).unwrap();
    let y = b.add_input("y", universe, terms()).unwrap();

    // Both handles sit in the first slot of their registry
    assert_eq!(x.key(), y.key());
    assert_ne!(a.id(), b.id());
    assert_eq!(x.registry(), a.id());
    assert_eq!(a.get(x).map(|var| var.name()), Some("x"));
    assert!(a.get(y).is_none());
}
