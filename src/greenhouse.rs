//! The greenhouse controller: temperature and humidity in, cooling and
//! watering levels out.

use std::fmt;

use crate::error::Result;
use crate::inference::InferenceEngine;
use crate::membership::MembershipFunction;
use crate::rules::Rules;
use crate::terms::{Key, Term, Terms};
use crate::variable::{Universe, Variable, Variables};

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Temperature {
    Cold,
    Warm,
    Hot,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Humidity {
    Low,
    Medium,
    High,
}

/// Labels shared by both actuator outputs
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq)]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GreenhouseTerm {
    Temperature(Temperature),
    Humidity(Humidity),
    Level(Level),
}

impl From<Temperature> for GreenhouseTerm {
    fn from(t: Temperature) -> Self {
        Self::Temperature(t)
    }
}

impl From<Humidity> for GreenhouseTerm {
    fn from(h: Humidity) -> Self {
        Self::Humidity(h)
    }
}

impl From<Level> for GreenhouseTerm {
    fn from(l: Level) -> Self {
        Self::Level(l)
    }
}

impl fmt::Display for GreenhouseTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature(t) => write!(f, "{t:?}"),
            Self::Humidity(h) => write!(f, "{h:?}"),
            Self::Level(l) => write!(f, "{l:?}"),
        }
    }
}

pub const TEMPERATURE_RANGE: (f64, f64) = (0., 50.);
pub const HUMIDITY_RANGE: (f64, f64) = (0., 100.);
pub const LEVEL_RANGE: (f64, f64) = (0., 100.);
pub const STEP: f64 = 1.;

const TEMPERATURE_TERMS: [(Temperature, [f64; 3]); 3] = [
    (Temperature::Cold, [0., 0., 15.]),
    (Temperature::Warm, [10., 25., 35.]),
    (Temperature::Hot, [30., 50., 50.]),
];

const HUMIDITY_TERMS: [(Humidity, [f64; 3]); 3] = [
    (Humidity::Low, [0., 0., 40.]),
    (Humidity::Medium, [30., 50., 70.]),
    (Humidity::High, [60., 100., 100.]),
];

const LEVEL_TERMS: [(Level, [f64; 3]); 3] = [
    (Level::Low, [0., 0., 50.]),
    (Level::Medium, [30., 50., 70.]),
    (Level::High, [60., 100., 100.]),
];

/// temperature × humidity → (cooling, watering)
pub const RULE_TABLE: [(Temperature, Humidity, Level, Level); 9] = [
    (Temperature::Cold, Humidity::Low, Level::Low, Level::High),
    (Temperature::Cold, Humidity::Medium, Level::Low, Level::Medium),
    (Temperature::Cold, Humidity::High, Level::Low, Level::Low),
    (Temperature::Warm, Humidity::Low, Level::Medium, Level::High),
    (Temperature::Warm, Humidity::Medium, Level::Medium, Level::Medium),
    (Temperature::Warm, Humidity::High, Level::Medium, Level::Low),
    (Temperature::Hot, Humidity::Low, Level::High, Level::High),
    (Temperature::Hot, Humidity::Medium, Level::High, Level::High),
    (Temperature::Hot, Humidity::High, Level::High, Level::Medium),
];

/// The configured engine plus typed handles to its four variables
pub struct Greenhouse {
    pub engine: InferenceEngine<GreenhouseTerm>,
    pub temperature: Variable<Temperature>,
    pub humidity: Variable<Humidity>,
    pub cooling: Variable<Level>,
    pub watering: Variable<Level>,
    pub temperature_universe: Universe,
    pub humidity_universe: Universe,
}

fn terms<K: Term + fmt::Debug>(table: &[(K, [f64; 3])]) -> Result<Terms<K>> {
    let mut terms = Terms::new();

    for (label, [a, b, c]) in table {
        terms.insert(*label, MembershipFunction::new(*a, *b, *c)?);
    }

    Ok(terms)
}

fn universe((min, max): (f64, f64)) -> Result<Universe> {
    Universe::new(min..=max, STEP)
}

pub fn build() -> Result<Greenhouse> {
    let mut vars = Variables::<GreenhouseTerm>::new();

    let temperature_universe = universe(TEMPERATURE_RANGE)?;
    let humidity_universe = universe(HUMIDITY_RANGE)?;

    let temperature = vars.add_input("temperature", temperature_universe, terms(&TEMPERATURE_TERMS)?)?;
    let humidity = vars.add_input("humidity", humidity_universe, terms(&HUMIDITY_TERMS)?)?;
    let cooling = vars.add_output("cooling", universe(LEVEL_RANGE)?, terms(&LEVEL_TERMS)?)?;
    let watering = vars.add_output("watering", universe(LEVEL_RANGE)?, terms(&LEVEL_TERMS)?)?;

    // One rule per output, cooling rules first
    let mut rules = Rules::<GreenhouseTerm>::with_capacity(RULE_TABLE.len() * 2);

    for (t, h, c, _) in RULE_TABLE {
        rules.add(temperature.is(t).and(humidity.is(h)), [cooling.is(c)]);
    }

    for (t, h, _, w) in RULE_TABLE {
        rules.add(temperature.is(t).and(humidity.is(h)), [watering.is(w)]);
    }

    let engine = InferenceEngine::new(vars, rules)?;

    Ok(Greenhouse {
        engine,
        temperature,
        humidity,
        cooling,
        watering,
        temperature_universe,
        humidity_universe,
    })
}

#[test]
fn test_build() {
    let greenhouse = build().unwrap();
    let vars = greenhouse.engine.variables();

    assert_eq!(vars.len(), 4);
    assert_eq!(greenhouse.engine.rules().len(), 18);

    let temperature = vars.get(greenhouse.temperature).unwrap();
    assert_eq!(temperature.name(), "temperature");
    assert_eq!(temperature.points().len(), 51);
    assert_eq!(
        temperature.labels().collect::<Vec<_>>(),
        vec![
            GreenhouseTerm::Temperature(Temperature::Cold),
            GreenhouseTerm::Temperature(Temperature::Warm),
            GreenhouseTerm::Temperature(Temperature::Hot),
        ]
    );

    let watering = vars.get(greenhouse.watering).unwrap();
    assert_eq!(watering.points().len(), 101);
    assert_eq!(
        watering
            .membership_function(&Level::Medium.into())
            .map(|mf| mf.breakpoints()),
        Some((30., 50., 70.))
    );
    assert_eq!(GreenhouseTerm::from(Humidity::High).to_string(), "High");
}
