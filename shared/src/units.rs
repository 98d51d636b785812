//! Weight unit conversion.
//!
//! The log stores kilograms only. A request may carry lbs or stone and is
//! converted once on the way in; nothing downstream of the write boundary
//! ever sees a non-kg value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit a client may log weight in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

impl WeightUnit {
    /// Kilograms per one of this unit.
    fn kg_factor(self) -> f64 {
        match self {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lbs => 0.453592,
            WeightUnit::Stone => 6.35029,
        }
    }

    pub fn to_kg(self, value: f64) -> f64 {
        value * self.kg_factor()
    }

    pub fn from_kg(self, kg: f64) -> f64 {
        kg / self.kg_factor()
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            other => Err(format!("unrecognized weight unit '{}'", other)),
        }
    }
}
