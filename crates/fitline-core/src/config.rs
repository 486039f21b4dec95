#![forbid(unsafe_code)]

//! Tunables for the fitting engine, with environment overrides.
//!
//! Supported environment variables:
//! - `FITLINE_MAX_REWRAP_ATTEMPTS` (u32, > 0)
//! - `FITLINE_FIT_EPSILON` (f32, >= 0)
//! - `FITLINE_SHRINK_STEP` (f32, > 0)
//! - `FITLINE_MEASURE_CACHE_CAPACITY` (usize, > 0)
//!
//! A value that fails to parse leaves the default in place and is reported
//! through [`FitConfig::from_env_with_diagnostics`].

use std::env;
use std::fmt;

const ENV_MAX_REWRAP_ATTEMPTS: &str = "FITLINE_MAX_REWRAP_ATTEMPTS";
const ENV_FIT_EPSILON: &str = "FITLINE_FIT_EPSILON";
const ENV_SHRINK_STEP: &str = "FITLINE_SHRINK_STEP";
const ENV_MEASURE_CACHE_CAPACITY: &str = "FITLINE_MEASURE_CACHE_CAPACITY";

/// Default cap on word-safe rewrap edits per layout session.
pub const DEFAULT_MAX_REWRAP_ATTEMPTS: u32 = 5;

/// Default rounding tolerance for the single-line fit check.
pub const DEFAULT_FIT_EPSILON: f32 = 0.5;

/// Default font-size decrement between auto-shrink probes.
pub const DEFAULT_SHRINK_STEP: f32 = 1.0;

/// Default number of natural-width measurements kept in the cache.
pub const DEFAULT_MEASURE_CACHE_CAPACITY: usize = 1024;

/// Engine tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// Maximum number of line-break edits the rewrap engine applies before
    /// it accepts a residual mid-word break.
    pub max_rewrap_attempts: u32,
    /// Slack added to the width budget when comparing measured widths.
    pub fit_epsilon: f32,
    /// Font-size decrement per auto-shrink probe.
    pub shrink_step: f32,
    /// Capacity of the natural-width measurement cache.
    pub measure_cache_capacity: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_rewrap_attempts: DEFAULT_MAX_REWRAP_ATTEMPTS,
            fit_epsilon: DEFAULT_FIT_EPSILON,
            shrink_step: DEFAULT_SHRINK_STEP,
            measure_cache_capacity: DEFAULT_MEASURE_CACHE_CAPACITY,
        }
    }
}

/// Result of parsing the environment: the effective config plus every
/// rejected value.
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: FitConfig,
    pub errors: Vec<ConfigError>,
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl FitConfig {
    /// Read overrides from the process environment, ignoring bad values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Read overrides from the process environment and report bad values.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Check every constraint and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.max_rewrap_attempts == 0 {
            errors.push(ConfigError::new(
                "max_rewrap_attempts",
                "0",
                "must be positive",
            ));
        }
        if !self.fit_epsilon.is_finite() || self.fit_epsilon < 0.0 {
            errors.push(ConfigError::new(
                "fit_epsilon",
                self.fit_epsilon.to_string(),
                "must be finite and non-negative",
            ));
        }
        if !self.shrink_step.is_finite() || self.shrink_step <= 0.0 {
            errors.push(ConfigError::new(
                "shrink_step",
                self.shrink_step.to_string(),
                "must be finite and positive",
            ));
        }
        if self.measure_cache_capacity == 0 {
            errors.push(ConfigError::new(
                "measure_cache_capacity",
                "0",
                "must be positive",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn from_env_with<F>(mut get: F) -> ConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = FitConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_MAX_REWRAP_ATTEMPTS) {
        match value.trim().parse::<u32>() {
            Ok(parsed) if parsed > 0 => config.max_rewrap_attempts = parsed,
            _ => errors.push(ConfigError::new(
                "max_rewrap_attempts",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Some(value) = get(ENV_FIT_EPSILON) {
        match parse_f32(&value) {
            Some(parsed) if parsed >= 0.0 => config.fit_epsilon = parsed,
            _ => errors.push(ConfigError::new(
                "fit_epsilon",
                value,
                "expected non-negative number",
            )),
        }
    }

    if let Some(value) = get(ENV_SHRINK_STEP) {
        match parse_f32(&value) {
            Some(parsed) if parsed > 0.0 => config.shrink_step = parsed,
            _ => errors.push(ConfigError::new(
                "shrink_step",
                value,
                "expected positive number",
            )),
        }
    }

    if let Some(value) = get(ENV_MEASURE_CACHE_CAPACITY) {
        match value.trim().parse::<usize>() {
            Ok(parsed) if parsed > 0 => config.measure_cache_capacity = parsed,
            _ => errors.push(ConfigError::new(
                "measure_cache_capacity",
                value,
                "expected positive integer",
            )),
        }
    }

    ConfigParse { config, errors }
}

fn parse_f32(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}
