use std::fmt::Debug;

pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::MembershipFunction;

/// Labeled membership functions for one variable, keyed by that variable's label enum.
///
/// Inserting the same label twice is remembered and reported as a
/// [`DuplicateLabel`](crate::FuzzyError::DuplicateLabel) when the terms are registered.
pub struct Terms<K: Term> {
    pub(crate) sets: FixedMap<K, MembershipFunction>,
    pub(crate) duplicates: Vec<K>,
}

impl<K: Term + Debug> Terms<K> {
    pub fn new() -> Self {
        Self {
            sets: FixedMap::new(),
            duplicates: Vec::new(),
        }
    }

    pub fn insert(&mut self, label: K, mf: MembershipFunction) {
        if self.sets.insert(label, mf).is_some() {
            self.duplicates.push(label);
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<K: Term + Debug> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_duplicates_are_recorded() {
    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Light {
        Dim,
        Bright,
    }

    let mut terms = Terms::new();

    terms.insert(Light::Dim, MembershipFunction::new(0., 0., 5.).unwrap());
    terms.insert(Light::Bright, MembershipFunction::new(5., 10., 10.).unwrap());
    assert!(terms.duplicates.is_empty());

    terms.insert(Light::Dim, MembershipFunction::new(0., 1., 2.).unwrap());
    assert_eq!(terms.len(), 2);
    assert_eq!(terms.duplicates, vec![Light::Dim]);
}
