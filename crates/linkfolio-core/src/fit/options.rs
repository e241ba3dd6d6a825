//! Tunables for the fit search.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::error::FitError;

/// Default output budget: 500 KiB.
pub const DEFAULT_MAX_BYTES: usize = 500 * 1024;

/// Scale factors tried in order, outer loop.
pub const DEFAULT_SCALES: [f64; 6] = [1.0, 0.9, 0.8, 0.7, 0.6, 0.5];

/// Quality levels tried in order at every scale, inner loop.
pub const DEFAULT_QUALITIES: [f32; 7] = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3];

/// Scale of the forced last-resort candidate.
pub const FALLBACK_SCALE: f64 = 0.4;

/// Quality of the forced last-resort candidate.
pub const FALLBACK_QUALITY: f32 = 0.3;

/// Options for one fit request.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitOptions {
    /// Largest accepted output in bytes.
    pub max_bytes: usize,
    /// Scale factors, strictly descending, starting at 1.0.
    pub scales: Vec<f64>,
    /// Quality levels in `(0, 1]`, strictly descending.
    pub qualities: Vec<f32>,
    /// Scale used when nothing in the search fits.
    pub fallback_scale: f64,
    /// Quality used when nothing in the search fits.
    pub fallback_quality: f32,
    /// Resampling filter.
    pub filter: FilterType,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            scales: DEFAULT_SCALES.to_vec(),
            qualities: DEFAULT_QUALITIES.to_vec(),
            fallback_scale: FALLBACK_SCALE,
            fallback_quality: FALLBACK_QUALITY,
            filter: FilterType::default(),
        }
    }
}

impl FitOptions {
    /// Default options with a different budget.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    /// Upper bound on encoder calls for one request.
    pub fn max_attempts(&self) -> usize {
        self.scales.len() * self.qualities.len() + 1
    }

    /// Check the ordering and range invariants.
    ///
    /// Any budget is accepted; one nothing can meet just ends in the forced
    /// fallback.
    pub fn validate(&self) -> Result<(), FitError> {
        check_sequence("scales", self.scales.iter().copied())?;
        check_sequence("qualities", self.qualities.iter().map(|&q| f64::from(q)))?;

        if self.scales[0] != 1.0 {
            return Err(invalid("scales must start at 1.0"));
        }
        if !in_unit_range(self.fallback_scale) {
            return Err(invalid("fallbackScale must be in (0, 1]"));
        }
        if !in_unit_range(f64::from(self.fallback_quality)) {
            return Err(invalid("fallbackQuality must be in (0, 1]"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> FitError {
    FitError::InvalidOptions(message.to_string())
}

fn in_unit_range(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn check_sequence(name: &str, values: impl Iterator<Item = f64>) -> Result<(), FitError> {
    let mut previous: Option<f64> = None;
    for value in values {
        if !in_unit_range(value) {
            return Err(FitError::InvalidOptions(format!(
                "{name} must be in (0, 1], got {value}"
            )));
        }
        if previous.is_some_and(|p| value >= p) {
            return Err(FitError::InvalidOptions(format!(
                "{name} must be strictly descending"
            )));
        }
        previous = Some(value);
    }

    if previous.is_none() {
        return Err(FitError::InvalidOptions(format!("{name} must not be empty")));
    }
    Ok(())
}
