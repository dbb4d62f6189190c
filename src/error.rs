use thiserror::Error;

pub type Result<T> = std::result::Result<T, FuzzyError>;

#[derive(Error, Debug)]
pub enum FuzzyError {
    // === Configuration Errors ===
    #[error("Malformed triangle ({a}, {b}, {c}): breakpoints must satisfy a <= b <= c")]
    MalformedTriangle { a: f64, b: f64, c: f64 },

    #[error("Invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("Label '{label}' is already defined for variable '{variable}'")]
    DuplicateLabel { variable: String, label: String },

    #[error("Rule #{rule} references a variable that is not registered")]
    UnknownVariable { rule: usize },

    #[error("Rule #{rule} references label '{label}' which variable '{variable}' does not define")]
    UnknownLabel {
        rule: usize,
        variable: String,
        label: String,
    },

    #[error("Rule #{rule} uses variable '{variable}' on the wrong side of the rule")]
    WrongVariableRole { rule: usize, variable: String },

    #[error("Rule #{rule} has no consequent")]
    EmptyConsequent { rule: usize },

    // === Evaluation Errors ===
    #[error("Input {value} for '{variable}' is outside [{min}, {max}]")]
    InputOutOfRange {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("No input was supplied for '{variable}'")]
    MissingInput { variable: String },

    #[error("No crisp value was produced for '{variable}'")]
    MissingOutput { variable: String },

    #[error("Could not parse '{input}' as a number")]
    InputParse { input: String },

    #[error("No rule fired for '{variable}'; its crisp value is the universe midpoint")]
    DegenerateResult { variable: String },

    // === Boundary I/O Errors ===
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FuzzyError {
    /// Configuration errors are fatal: a system that produced one must not start.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MalformedTriangle { .. }
                | Self::InvalidUniverse { .. }
                | Self::DuplicateLabel { .. }
                | Self::UnknownVariable { .. }
                | Self::UnknownLabel { .. }
                | Self::WrongVariableRole { .. }
                | Self::EmptyConsequent { .. }
        )
    }
}

#[test]
fn test_configuration_kinds() {
    assert!(FuzzyError::MalformedTriangle { a: 2., b: 1., c: 3. }.is_configuration());
    assert!(FuzzyError::EmptyConsequent { rule: 0 }.is_configuration());
    assert!(!FuzzyError::InputParse { input: "abc".into() }.is_configuration());
    assert!(!FuzzyError::InputOutOfRange {
        variable: "temperature".into(),
        value: -1.,
        min: 0.,
        max: 50.,
    }
    .is_configuration());
}
