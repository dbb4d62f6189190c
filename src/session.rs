use serde::Serialize;
use tracing::debug;

use crate::classify::Category;
use crate::error::{FuzzyError, Result};
use crate::greenhouse::{self, Greenhouse, GreenhouseTerm};
use crate::inference::InferenceEngine;
use crate::inputs::Inputs;
use crate::outputs::{CrispOutput, Outputs};
use crate::variable::{Universe, Variable, Variables};

/// Crisp actuator commands for one pair of sensor readings
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GreenhouseOutput {
    pub cooling: CrispOutput,
    pub cooling_category: Category,
    pub watering: CrispOutput,
    pub watering_category: Category,
}

impl GreenhouseOutput {
    pub fn is_degenerate(&self) -> bool {
        self.cooling.is_degenerate() || self.watering.is_degenerate()
    }
}

/// Evaluates the greenhouse controller.
///
/// The configuration is built once in [`ControlSession::new`] and only read
/// afterwards, so one session can serve any number of threads.
pub struct ControlSession {
    greenhouse: Greenhouse,
}

impl ControlSession {
    pub fn new() -> Result<Self> {
        Ok(Self {
            greenhouse: greenhouse::build()?,
        })
    }

    pub fn engine(&self) -> &InferenceEngine<GreenhouseTerm> {
        &self.greenhouse.engine
    }

    pub fn variables(&self) -> &Variables<GreenhouseTerm> {
        self.greenhouse.engine.variables()
    }

    pub fn evaluate(&self, temperature: f64, humidity: f64) -> Result<GreenhouseOutput> {
        let gh = &self.greenhouse;

        // Reject before any inference work is done
        check_range("temperature", &gh.temperature_universe, temperature)?;
        check_range("humidity", &gh.humidity_universe, humidity)?;

        let inputs = Inputs::new()
            .with(gh.temperature, temperature)
            .with(gh.humidity, humidity);
        let outputs = gh.engine.evaluate(&inputs)?.defuzzify();
        let cooling = crisp(&outputs, gh.cooling, "cooling")?;
        let watering = crisp(&outputs, gh.watering, "watering")?;

        debug!(
            temperature,
            humidity,
            cooling = cooling.value(),
            watering = watering.value(),
            "evaluated"
        );

        Ok(GreenhouseOutput {
            cooling,
            cooling_category: cooling.category(),
            watering,
            watering_category: watering.category(),
        })
    }
}

fn check_range(variable: &str, universe: &Universe, value: f64) -> Result<()> {
    if !universe.contains(value) {
        return Err(FuzzyError::InputOutOfRange {
            variable: variable.to_owned(),
            value,
            min: universe.min(),
            max: universe.max(),
        });
    }

    Ok(())
}

fn crisp<I>(outputs: &Outputs, var: Variable<I>, name: &str) -> Result<CrispOutput> {
    outputs.get(var).ok_or_else(|| FuzzyError::MissingOutput {
        variable: name.to_owned(),
    })
}
