//! Configuration schema types for sweep grids
//!
//! A config file only overrides the steps it names; everything else keeps
//! the default grid.

use serde::{Deserialize, Serialize};

/// Step sizes along each axis of a property sweep.
///
/// Each axis is visited from its first value up to 255 (254 for the
/// monotonicity alpha axis) in increments of the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Steps {
    pub foreground: u8,
    pub alpha: u8,
    pub background: u8,
}

impl Steps {
    pub const fn new(foreground: u8, alpha: u8, background: u8) -> Self {
        Self { foreground, alpha, background }
    }

    /// Every value on every axis
    pub const fn dense() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Resolved grid for the four property sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepGrid {
    /// alpha = 0 identity
    pub transparency: Steps,
    /// alpha = 255 identity
    pub opacity: Steps,
    /// output stays within 0-255
    pub range: Steps,
    /// non-decreasing in background
    pub monotonic: Steps,
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self {
            transparency: Steps::new(51, 1, 51),
            opacity: Steps::new(51, 1, 51),
            range: Steps::new(1, 1, 17),
            monotonic: Steps::new(51, 51, 1),
        }
    }
}

impl SweepGrid {
    /// Grid that visits all 256^3 triples for range closure.
    pub fn exhaustive() -> Self {
        Self {
            transparency: Steps::dense(),
            opacity: Steps::dense(),
            range: Steps::dense(),
            monotonic: Steps::dense(),
        }
    }
}

/// Optional step overrides for one property, as written in TOML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepsConfig {
    pub foreground_step: Option<u8>,
    pub alpha_step: Option<u8>,
    pub background_step: Option<u8>,
}

impl StepsConfig {
    fn resolve(&self, defaults: Steps) -> Steps {
        Steps {
            foreground: self.foreground_step.unwrap_or(defaults.foreground),
            alpha: self.alpha_step.unwrap_or(defaults.alpha),
            background: self.background_step.unwrap_or(defaults.background),
        }
    }

    fn validate(&self, section: &str, errors: &mut Vec<ConfigValidationError>) {
        let fields = [
            ("foreground_step", self.foreground_step),
            ("alpha_step", self.alpha_step),
            ("background_step", self.background_step),
        ];
        for (name, value) in fields {
            if value == Some(0) {
                errors.push(ConfigValidationError {
                    field: format!("{}.{}", section, name),
                    message: "must be at least 1".to_string(),
                });
            }
        }
    }
}

/// Step overrides for the identity properties.
///
/// Their alpha is pinned at 0 or 255, so there is no alpha step to set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityStepsConfig {
    pub foreground_step: Option<u8>,
    pub background_step: Option<u8>,
}

impl IdentityStepsConfig {
    fn as_steps(&self) -> StepsConfig {
        StepsConfig {
            foreground_step: self.foreground_step,
            alpha_step: None,
            background_step: self.background_step,
        }
    }
}

/// Root of a sweep config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub transparency: IdentityStepsConfig,
    pub opacity: IdentityStepsConfig,
    pub range: StepsConfig,
    pub monotonic: StepsConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "range.background_step")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

impl SweepConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        self.transparency.as_steps().validate("transparency", &mut errors);
        self.opacity.as_steps().validate("opacity", &mut errors);
        self.range.validate("range", &mut errors);
        self.monotonic.validate("monotonic", &mut errors);
        errors
    }

    /// Fill unset steps from the default grid.
    pub fn grid(&self) -> SweepGrid {
        let defaults = SweepGrid::default();
        SweepGrid {
            transparency: self.transparency.as_steps().resolve(defaults.transparency),
            opacity: self.opacity.as_steps().resolve(defaults.opacity),
            range: self.range.resolve(defaults.range),
            monotonic: self.monotonic.resolve(defaults.monotonic),
        }
    }
}
