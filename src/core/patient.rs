//! The request travelling through the chain

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Condition label carried by a patient.
///
/// Labels are flat: handlers compare them by equality only. Anything outside
/// the known set is kept verbatim as [`Condition::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Simple,
    Complex,
    Cardiovascular,
    Other(String),
}

impl Condition {
    pub fn as_str(&self) -> &str {
        match self {
            Condition::Simple => "simple",
            Condition::Complex => "complex",
            Condition::Cardiovascular => "cardiovascular",
            Condition::Other(label) => label,
        }
    }
}

impl From<&str> for Condition {
    fn from(label: &str) -> Self {
        match label {
            "simple" => Condition::Simple,
            "complex" => Condition::Complex,
            "cardiovascular" => Condition::Cardiovascular,
            other => Condition::Other(other.to_string()),
        }
    }
}

impl FromStr for Condition {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Condition::from(s))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Condition::from(label.as_str()))
    }
}

/// A patient record. The chain only ever sees it through a shared reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub name: String,
    pub condition: Condition,
}

impl Patient {
    pub fn new(name: impl Into<String>, condition: impl Into<Condition>) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
        }
    }
}
