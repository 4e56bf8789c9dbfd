//! Input event records
//!
//! One row of the clean public-health dataset: a count of admissions or deaths
//! for a cause in a city, split by sex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of health event a record counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    /// Hospital admission
    Admission,
    /// Death
    Death,
}

impl EventType {
    /// Parse an event type label as found in the dataset.
    ///
    /// Accepts the Portuguese labels with or without accents (`Internação`,
    /// `internacao`, `Óbito`, `obito`) and the English names, ignoring case
    /// and surrounding whitespace.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "internação" | "internacao" | "admission" => Some(Self::Admission),
            "óbito" | "obito" | "death" => Some(Self::Death),
            _ => None,
        }
    }

    /// Canonical dataset label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admission => "Internação",
            Self::Death => "Óbito",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admission => write!(f, "Admission"),
            Self::Death => write!(f, "Death"),
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("unknown event type label '{s}'"))
    }
}

/// A single admission or death count for one cause in one city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub city: String,
    pub cause: String,
    pub event_type: EventType,
    pub male_count: u64,
    pub female_count: u64,
    /// Reference year, when the dataset carries one
    pub year: Option<i32>,
}

impl EventRecord {
    /// Create a record, rejecting blank city or cause labels
    pub fn new(
        city: impl Into<String>,
        cause: impl Into<String>,
        event_type: EventType,
        male_count: u64,
        female_count: u64,
    ) -> Result<Self> {
        let city = city.into();
        let cause = cause.into();

        if city.trim().is_empty() {
            return Err(Error::InvalidRecord("city is empty".to_string()));
        }
        if cause.trim().is_empty() {
            return Err(Error::InvalidRecord("cause is empty".to_string()));
        }

        Ok(Self {
            city,
            cause,
            event_type,
            male_count,
            female_count,
            year: None,
        })
    }

    /// Attach the reference year
    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Combined count for both sexes
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.male_count.saturating_add(self.female_count)
    }
}
