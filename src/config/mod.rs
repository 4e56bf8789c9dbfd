//! Configuration for the risk pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default exclusion patterns: childbirth, contraception, childbirth-related
/// problems and chromosomal anomalies
pub const DEFAULT_EXCLUSION_PATTERNS: [&str; 4] = [
    "parto",
    "anticoncepção",
    "prob part",
    "anomalias cromossômicas",
];

/// Default number of causes in the ranked subset
pub const DEFAULT_TOP_N: usize = 10;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Which part of the dataset a pipeline run covers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Records from a single city
    City(String),
    /// The whole dataset
    #[default]
    AllCities,
}

impl Scope {
    /// Scope for one city
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    /// Whether a record from `city` falls in this scope
    #[must_use]
    pub fn contains(&self, city: &str) -> bool {
        match self {
            Self::City(name) => name == city,
            Self::AllCities => true,
        }
    }

    /// Human readable scope name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::City(name) => name,
            Self::AllCities => "all cities",
        }
    }
}

/// Weights of the three normalised indicators in the IRE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub frequency: f64,
    pub lethality: f64,
    pub sex_disparity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            frequency: 0.55,
            lethality: 0.35,
            sex_disparity: 0.10,
        }
    }
}

impl ScoreWeights {
    /// Sum of the three weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.frequency + self.lethality + self.sex_disparity
    }

    /// Check that the weights are non-negative and sum to 1.0
    pub fn validate(&self) -> Result<()> {
        if [self.frequency, self.lethality, self.sex_disparity]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(Error::invalid_config(format!(
                "weights must be finite and non-negative: {self:?}"
            )));
        }

        if (self.sum() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::invalid_config(format!(
                "weights must sum to 1.0, got {}",
                self.sum()
            )));
        }

        Ok(())
    }
}

/// Lower bounds of the Medium and High tiers (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium: 0.3,
            high: 0.6,
        }
    }
}

impl TierThresholds {
    /// Check that `0 <= medium <= high <= 1`
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.medium) || !in_unit(self.high) || self.medium > self.high {
            return Err(Error::invalid_config(format!(
                "tier thresholds must satisfy 0 <= medium <= high <= 1: {self:?}"
            )));
        }
        Ok(())
    }
}

/// What to do with a row that breaks the event record contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRowPolicy {
    /// Skip the row and log a warning
    #[default]
    Drop,
    /// Fail the read on the first bad row
    Reject,
}

/// Configuration for a risk pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Dataset subset to score
    pub scope: Scope,
    /// Case-insensitive substrings marking causes that are not epidemiological risks
    pub exclusion_patterns: Vec<String>,
    /// Indicator weights
    pub weights: ScoreWeights,
    /// Tier boundaries
    pub thresholds: TierThresholds,
    /// Size of the ranked subset
    pub top_n: usize,
    /// Handling of malformed input rows
    pub malformed_rows: MalformedRowPolicy,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            scope: Scope::AllCities,
            exclusion_patterns: DEFAULT_EXCLUSION_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            weights: ScoreWeights::default(),
            thresholds: TierThresholds::default(),
            top_n: DEFAULT_TOP_N,
            malformed_rows: MalformedRowPolicy::default(),
        }
    }
}

impl RiskConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Restrict the run to one city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.scope = Scope::City(city.into());
        self
    }

    /// Set the scope
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Replace the exclusion patterns
    #[must_use]
    pub fn with_exclusion_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusion_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the indicator weights
    #[must_use]
    pub const fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the tier thresholds
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the size of the ranked subset
    #[must_use]
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the malformed row policy
    #[must_use]
    pub const fn with_malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }

    /// Validate every configured value
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        self.thresholds.validate()?;

        if self.top_n == 0 {
            return Err(Error::invalid_config("top_n must be at least 1"));
        }

        if self.exclusion_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::invalid_config("exclusion patterns must not be blank"));
        }

        Ok(())
    }
}
