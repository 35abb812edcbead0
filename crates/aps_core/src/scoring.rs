//! Scoring functions for the optimizer.
//!
//! A score is any real number; the optimizer keeps only positive ones, so a
//! function rejects a candidate by returning zero or less.

use serde::{Deserialize, Serialize};

use crate::cannon::EvaluatedConfig;

/// Damage per second.
#[must_use]
pub fn dps(config: &EvaluatedConfig) -> f64 {
    config.dps
}

/// Damage per shot.
#[must_use]
pub fn alpha(config: &EvaluatedConfig) -> f64 {
    config.damage.total()
}

/// Damage per second, or `-1` for shells slower than `min_velocity`.
pub fn dps_above_velocity(min_velocity: f64) -> impl Fn(&EvaluatedConfig) -> f64 + Clone {
    move |config: &EvaluatedConfig| {
        if config.velocity < min_velocity {
            -1.0
        } else {
            config.dps
        }
    }
}

/// Named scoring functions for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ScoreKind {
    /// See [`dps`].
    #[default]
    Dps,
    /// See [`alpha`].
    Alpha,
    /// See [`dps_above_velocity`].
    DpsAboveVelocity(f64),
}

impl ScoreKind {
    /// Score `config`.
    #[must_use]
    pub fn score(self, config: &EvaluatedConfig) -> f64 {
        match self {
            ScoreKind::Dps => dps(config),
            ScoreKind::Alpha => alpha(config),
            ScoreKind::DpsAboveVelocity(min) => dps_above_velocity(min)(config),
        }
    }
}
