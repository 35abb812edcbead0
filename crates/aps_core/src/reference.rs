//! Comparison of computed shells against in-game measurements.

use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;
use crate::cannon::{evaluate, DamageKind, EvaluatedConfig};
use crate::context::CannonContext;
use crate::error::Result;

/// Relative tolerance, in percent, used when none is given.
pub const DEFAULT_TOLERANCE_PCT: f64 = 2.0;

/// Whether `a` and `b` differ by less than `tolerance_pct` percent of the larger.
#[must_use]
pub fn is_accurate(a: f64, b: f64, tolerance_pct: f64) -> bool {
    if a == b {
        return true;
    }
    let delta = (b - a).abs();
    let denominator = a.max(b);
    delta * 100.0 / denominator < tolerance_pct
}

/// A shell measured in game, fired from a default cannon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceShell {
    /// Measured blueprint.
    pub shell: Blueprint,
    /// Diameter in metres.
    pub diameter: f64,
    /// Reload period in seconds.
    #[serde(default)]
    pub reload: Option<f64>,
    /// Muzzle velocity.
    #[serde(default)]
    pub velocity: Option<f64>,
    /// Armor piercing.
    #[serde(default)]
    pub ap: Option<f64>,
    /// HE damage.
    #[serde(default)]
    pub explosive: Option<f64>,
    /// Kinetic damage.
    #[serde(default)]
    pub kinetic: Option<f64>,
}

/// A measured quantity outside tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    /// Quantity name.
    pub quantity: &'static str,
    /// In-game value.
    pub expected: f64,
    /// Computed value.
    pub actual: f64,
}

/// Outcome of checking one reference shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCheck {
    /// Checked blueprint.
    pub shell: Blueprint,
    /// Diameter in metres.
    pub diameter: f64,
    /// Quantities outside tolerance.
    pub mismatches: Vec<Mismatch>,
}

impl ReferenceCheck {
    /// Whether every measured quantity matched.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl ReferenceShell {
    /// Evaluate the shell in a default cannon and compare every measured quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be evaluated.
    pub fn check(&self, tolerance_pct: f64) -> Result<ReferenceCheck> {
        let config = evaluate(&self.shell, self.diameter, &CannonContext::default())?;
        let mismatches = self
            .comparisons(&config)
            .into_iter()
            .filter_map(|(quantity, expected, actual)| {
                let expected = expected?;
                (!is_accurate(expected, actual, tolerance_pct)).then_some(Mismatch {
                    quantity,
                    expected,
                    actual,
                })
            })
            .collect();
        Ok(ReferenceCheck {
            shell: self.shell.clone(),
            diameter: self.diameter,
            mismatches,
        })
    }

    fn comparisons(&self, config: &EvaluatedConfig) -> [(&'static str, Option<f64>, f64); 5] {
        let damage = |kind| config.damage.get(kind).map_or(0.0, |e| e.value);
        let ap = config.damage.get(DamageKind::Kinetic).map_or(0.0, |e| e.ap);
        [
            ("reload", self.reload, config.period),
            ("velocity", self.velocity, config.velocity),
            ("ap", self.ap, ap),
            ("kinetic damage", self.kinetic, damage(DamageKind::Kinetic)),
            ("HE damage", self.explosive, damage(DamageKind::Explosive)),
        ]
    }
}

/// Check every reference shell, logging each failure.
///
/// # Errors
///
/// Returns the first evaluation error.
pub fn verify(references: &[ReferenceShell], tolerance_pct: f64) -> Result<Vec<ReferenceCheck>> {
    let checks = references
        .iter()
        .map(|reference| reference.check(tolerance_pct))
        .collect::<Result<Vec<_>>>()?;
    for check in checks.iter().filter(|c| !c.passed()) {
        tracing::warn!(
            shell = %check.shell,
            diameter = check.diameter,
            mismatches = check.mismatches.len(),
            "Reference check failed"
        );
    }
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(text: &str) -> ReferenceShell {
        ReferenceShell {
            shell: text.parse().unwrap(),
            diameter: 0.5,
            reload: None,
            velocity: None,
            ap: None,
            explosive: None,
            kinetic: None,
        }
    }

    #[test]
    fn test_is_accurate() {
        assert!(is_accurate(100.0, 100.0, 2.0));
        assert!(is_accurate(100.0, 101.0, 2.0));
        assert!(!is_accurate(100.0, 103.0, 2.0));
        assert!(is_accurate(0.0, 0.0, 2.0));
        assert!(!is_accurate(0.0, 1.0, 2.0));
    }

    #[test]
    fn test_single_explosive_shell_matches_game() {
        let shell = ReferenceShell {
            reload: Some(22.16),
            velocity: Some(326.0),
            ap: Some(3.0),
            explosive: Some(2985.0),
            kinetic: Some(2842.0),
            ..reference("HE, gunpowder")
        };
        let check = shell.check(DEFAULT_TOLERANCE_PCT).unwrap();
        assert!(check.passed(), "{:?}", check.mismatches);
    }

    #[test]
    fn test_mismatch_is_reported() {
        let shell = ReferenceShell {
            velocity: Some(1000.0),
            ..reference("HE, gunpowder")
        };
        let check = shell.check(DEFAULT_TOLERANCE_PCT).unwrap();
        assert_eq!(check.mismatches.len(), 1);
        assert_eq!(check.mismatches[0].quantity, "velocity");
        assert_eq!(check.mismatches[0].expected, 1000.0);
    }

    #[test]
    fn test_unmeasured_quantities_are_skipped() {
        let checks = verify(&[reference("solid, gunpowder")], 0.1).unwrap();
        assert!(checks[0].passed());
    }
}
