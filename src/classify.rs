use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;

/// Upper bound (inclusive) of the Low band
pub const LOW_MAX: f64 = 40.;
/// Upper bound (inclusive) of the Medium band
pub const MEDIUM_MAX: f64 = 70.;

/// Coarse band of a crisp actuator level
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String")]
pub enum Category {
    Low,
    Medium,
    High,
}

/// Bands are fixed: `<= 40` Low, `<= 70` Medium, above that High.
pub fn classify(value: f64) -> Category {
    if value <= LOW_MAX {
        Category::Low
    } else if value <= MEDIUM_MAX {
        Category::Medium
    } else {
        Category::High
    }
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FuzzyError;

    /// Accepts the English names and the Indonesian labels used by the reference dataset
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "rendah" => Ok(Self::Low),
            "medium" | "sedang" => Ok(Self::Medium),
            "high" | "tinggi" => Ok(Self::High),
            _ => Err(FuzzyError::InputParse { input: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = FuzzyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[test]
fn test_bands() {
    assert_eq!(classify(0.), Category::Low);
    assert_eq!(classify(40.), Category::Low);
    assert_eq!(classify(40.0001), Category::Medium);
    assert_eq!(classify(70.), Category::Medium);
    assert_eq!(classify(70.5), Category::High);
    assert_eq!(classify(100.), Category::High);
}

#[test]
fn test_parse() {
    assert_eq!("High".parse::<Category>().unwrap(), Category::High);
    assert_eq!(" medium ".parse::<Category>().unwrap(), Category::Medium);
    assert_eq!("Rendah".parse::<Category>().unwrap(), Category::Low);
    assert_eq!("TINGGI".parse::<Category>().unwrap(), Category::High);
    assert!("hot".parse::<Category>().is_err());
    assert_eq!(Category::Medium.to_string(), "Medium");
}
