//! Shared value types for the game math engine
//!
//! The round value is the single piece of entropy a round consumes. It is
//! produced outside this crate (seed exchange, VRF, ...) and only validated
//! here.

use crate::errors::{GameMathError, GameMathResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniform input value in `[0, 1)` for one round
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RoundValue(f64);

impl RoundValue {
    /// Validate a raw value
    pub fn new(value: f64) -> GameMathResult<Self> {
        if value.is_finite() && (0.0..1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GameMathError::InvalidInput { value })
        }
    }

    /// Raw value
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RoundValue {
    type Error = GameMathError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoundValue> for f64 {
    fn from(value: RoundValue) -> Self {
        value.0
    }
}

impl fmt::Display for RoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Round to two decimal places (multiplier display precision)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `floor(value * count) mod count` as an index into `0..count`
///
/// `count` must be non-zero.
pub fn scaled_index(value: f64, count: usize) -> usize {
    ((value * count as f64).floor() as usize) % count
}
