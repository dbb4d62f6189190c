//! Offline validation against a labeled CSV dataset.

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::classify::Category;
use crate::error::{FuzzyError, Result};
use crate::session::{ControlSession, GreenhouseOutput};

/// One labeled reading. Header aliases match the reference greenhouse dataset.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Sample {
    #[serde(alias = "Suhu (°C)")]
    pub temperature: f64,
    #[serde(alias = "Kelembaban (%)")]
    pub humidity: f64,
    #[serde(alias = "Kategori Suhu", default)]
    pub temperature_category: Option<String>,
    #[serde(alias = "Kategori Kelembaban", default)]
    pub humidity_category: Option<String>,
    #[serde(alias = "Level Pendingin")]
    pub cooling_level: Category,
    #[serde(alias = "Level Penyiram")]
    pub watering_level: Category,
}

pub fn from_reader<R: Read>(rdr: R) -> Result<Vec<Sample>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut samples = Vec::new();

    for record in rdr.deserialize() {
        samples.push(record?);
    }

    Ok(samples)
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<Sample>> {
    let path = path.as_ref();
    let samples = from_reader(std::fs::File::open(path)?)?;

    info!(path = %path.display(), samples = samples.len(), "dataset loaded");

    Ok(samples)
}

#[derive(Debug)]
pub struct RowResult {
    pub sample: Sample,
    pub outcome: Result<GreenhouseOutput>,
}

impl RowResult {
    pub fn cooling_match(&self) -> Option<bool> {
        self.outcome
            .as_ref()
            .ok()
            .map(|out| out.cooling_category == self.sample.cooling_level)
    }

    pub fn watering_match(&self) -> Option<bool> {
        self.outcome
            .as_ref()
            .ok()
            .map(|out| out.watering_category == self.sample.watering_level)
    }
}

#[derive(Debug)]
pub struct ValidationReport {
    pub rows: Vec<RowResult>,
}

impl ValidationReport {
    pub fn evaluated(&self) -> usize {
        self.rows.iter().filter(|row| row.outcome.is_ok()).count()
    }

    pub fn skipped(&self) -> usize {
        self.rows.len() - self.evaluated()
    }

    pub fn degenerate(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(&row.outcome, Ok(out) if out.is_degenerate()))
            .count()
    }

    pub fn cooling_accuracy(&self) -> Option<f64> {
        self.accuracy(RowResult::cooling_match)
    }

    pub fn watering_accuracy(&self) -> Option<f64> {
        self.accuracy(RowResult::watering_match)
    }

    fn accuracy(&self, matched: impl Fn(&RowResult) -> Option<bool>) -> Option<f64> {
        let evaluated = self.evaluated();

        if evaluated == 0 {
            return None;
        }

        let hits = self.rows.iter().filter(|row| matched(row) == Some(true)).count();

        Some(hits as f64 / evaluated as f64)
    }
}

/// Evaluates every sample independently. Rows outside the input bounds are
/// kept with their error and excluded from the accuracy figures.
pub fn validate(session: &ControlSession, samples: &[Sample]) -> ValidationReport {
    let rows: Vec<RowResult> = samples
        .par_iter()
        .map(|sample| RowResult {
            sample: sample.clone(),
            outcome: session.evaluate(sample.temperature, sample.humidity),
        })
        .collect();

    for (i, row) in rows.iter().enumerate() {
        if let Err(err @ FuzzyError::InputOutOfRange { .. }) = &row.outcome {
            warn!(row = i, %err, "skipping sample");
        }
    }

    let report = ValidationReport { rows };

    info!(
        evaluated = report.evaluated(),
        skipped = report.skipped(),
        cooling_accuracy = report.cooling_accuracy(),
        watering_accuracy = report.watering_accuracy(),
        "validation finished"
    );

    report
}

#[test]
fn test_from_reader_with_source_headers() {
    let data = "\
Suhu (°C),Kelembaban (%),Kategori Suhu,Kategori Kelembaban,Level Pendingin,Level Penyiram
5,20,Dingin,Rendah,Rendah,Tinggi
45.5, 90 ,Panas,Tinggi,Tinggi,Sedang
";
    let samples = from_reader(data.as_bytes()).unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].temperature, 5.);
    assert_eq!(samples[0].watering_level, Category::High);
    assert_eq!(samples[0].temperature_category.as_deref(), Some("Dingin"));
    assert_eq!(samples[1].humidity_category.as_deref(), Some("Tinggi"));
    assert_eq!(samples[1].humidity, 90.);
    assert_eq!(samples[1].cooling_level, Category::High);
}

#[test]
fn test_bad_label_is_an_error() {
    let data = "temperature,humidity,cooling_level,watering_level\n5,20,Freezing,High\n";

    assert!(matches!(from_reader(data.as_bytes()), Err(FuzzyError::Csv(_))));
}

#[test]
fn test_category_columns_are_optional() {
    let data = "temperature,humidity,cooling_level,watering_level\n25,50,Medium,Medium\n";
    let samples = from_reader(data.as_bytes()).unwrap();

    assert_eq!(samples[0].temperature_category, None);
    assert_eq!(samples[0].humidity_category, None);
}
