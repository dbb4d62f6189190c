use crate::variable::{RegistryId, Variable, VariableKey};

/// `variable is label`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Clause<T> {
    pub(crate) var: VariableKey,
    pub(crate) registry: RegistryId,
    pub(crate) label: T,
}

impl<T> Clause<T> {
    pub fn variable(&self) -> VariableKey {
        self.var
    }

    pub fn label(&self) -> &T {
        &self.label
    }

    pub fn and(self, rhs: Clause<T>) -> Premise<T> {
        Premise(vec![self, rhs])
    }
}

/// Conjunction of one or more clauses
#[derive(Clone, Debug, PartialEq)]
pub struct Premise<T>(pub(crate) Vec<Clause<T>>);

impl<T> Premise<T> {
    pub fn and(mut self, rhs: Clause<T>) -> Self {
        self.0.push(rhs);
        self
    }

    pub fn clauses(&self) -> &[Clause<T>] {
        &self.0
    }
}

impl<T> From<Clause<T>> for Premise<T> {
    fn from(clause: Clause<T>) -> Self {
        Premise(vec![clause])
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Clause<T>
    where
        I: Into<T>,
    {
        Clause {
            var: self.0,
            registry: self.1,
            label: rhs.into(),
        }
    }
}

#[test]
fn test_premise_builder() {
    use crate::membership::MembershipFunction;
    use crate::terms::{Key, Terms};
    use crate::variable::{Universe, Variables};

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
    enum Light {
        Dim,
        Bright,
    }

    let universe = Universe::new(0. ..=10., 1.).unwrap();
    let mut vars = Variables::<Light>::new();
    let mut add = |name| {
        let mut terms = Terms::new();
        terms.insert(Light::Dim, MembershipFunction::new(0., 0., 5.).unwrap());
        terms.insert(Light::Bright, MembershipFunction::new(5., 10., 10.).unwrap());
        vars.add_input(name, universe, terms).unwrap()
    };
    let (a, b, c) = (add("a"), add("b"), add("c"));

    let premise: Premise<Light> = a.is(Light::Dim).and(b.is(Light::Bright)).and(c.is(Light::Dim));
    let clauses = premise.clauses();

    assert_eq!(clauses.len(), 3);
    assert_eq!(clauses[1].variable(), b.key());
    assert_eq!(clauses[1].label(), &Light::Bright);
    assert_eq!(clauses[2].variable(), c.key());

    let single = Premise::<Light>::from(a.is(Light::Bright));
    assert_eq!(single.clauses(), &[a.is::<Light>(Light::Bright)]);
}
