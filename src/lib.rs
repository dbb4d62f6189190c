//! Mamdani fuzzy inference with triangular membership functions, and the
//! two-input, two-output greenhouse controller built on it.
//!
//! Variables, membership functions and rules are assembled once and are
//! read-only afterwards. Every evaluation is an independent
//! fuzzify → fire → aggregate → defuzzify pass with call-local buffers, so a
//! single [`ControlSession`] can be shared between threads.
//!
//! ```no_run
//! use greenhouse_fuzzy::{Category, ControlSession};
//!
//! let session = ControlSession::new()?;
//! let out = session.evaluate(25., 50.)?;
//!
//! assert_eq!(out.cooling_category, Category::Medium);
//! # Ok::<(), greenhouse_fuzzy::FuzzyError>(())
//! ```

mod classify;
mod defuzz;
mod dsl;
mod error;
mod inference;
mod inputs;
mod membership;
mod ops;
mod outputs;
mod rules;
mod session;
mod terms;
mod variable;

pub mod curves;
pub mod dataset;
pub mod greenhouse;
pub mod repl;

pub use classify::{classify, Category};
pub use defuzz::{centroid, defuzzify};
pub use dsl::{Clause, Premise};
pub use error::{FuzzyError, Result};
pub use inference::{Aggregated, AggregatedFuzzySet, Fuzzified, InferenceEngine};
pub use inputs::Inputs;
pub use membership::MembershipFunction;
pub use outputs::{CrispOutput, Outputs};
pub use rules::{Rule, Rules};
pub use session::{ControlSession, GreenhouseOutput};
pub use terms::{Key, Term, Terms};
pub use variable::{LinguisticVariable, RegistryId, Role, Universe, Variable, VariableKey, Variables, MAX_RESOLUTION};
