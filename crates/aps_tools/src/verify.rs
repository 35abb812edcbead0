//! Verification of the formula set against in-game measurements.

use std::fmt::Write as _;

use aps_core::reference::{self, ReferenceCheck, ReferenceShell};

use crate::job::from_ron_str;
use crate::Result;

/// Measurements shipped with the tool.
pub const REFERENCE_SHELLS_RON: &str = include_str!("../data/reference_shells.ron");

/// Parse the shipped measurements.
///
/// # Errors
///
/// Returns a parse error if the embedded data is malformed.
pub fn reference_shells() -> Result<Vec<ReferenceShell>> {
    from_ron_str(REFERENCE_SHELLS_RON)
}

/// Outcome of a verification run.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// One entry per reference shell.
    pub checks: Vec<ReferenceCheck>,
}

impl VerifyReport {
    /// Checks with at least one mismatch.
    pub fn failures(&self) -> impl Iterator<Item = &ReferenceCheck> {
        self.checks.iter().filter(|c| !c.passed())
    }

    /// Whether every shell matched.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Human-readable summary.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for check in self.failures() {
            let _ = writeln!(
                out,
                "Check failed for shell={}, diameter={}",
                check.shell,
                (check.diameter * 1000.0).round()
            );
            for m in &check.mismatches {
                let _ = writeln!(out, " - {}: real={} vs {:.2}", m.quantity, m.expected, m.actual);
            }
        }
        if self.all_passed() {
            out.push_str("Calculations are fine so far\n");
        } else {
            let failed = self.failures().count();
            let _ = writeln!(out, "{failed} of {} reference shells differ", self.checks.len());
        }
        out
    }
}

/// Check `references` with a relative tolerance in percent.
///
/// # Errors
///
/// Returns an error if a reference shell cannot be evaluated.
pub fn run(references: &[ReferenceShell], tolerance_pct: f64) -> Result<VerifyReport> {
    let checks = reference::verify(references, tolerance_pct)?;
    tracing::info!(
        shells = checks.len(),
        failed = checks.iter().filter(|c| !c.passed()).count(),
        tolerance_pct,
        "Verification finished"
    );
    Ok(VerifyReport { checks })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_data_parses() {
        let shells = reference_shells().unwrap();
        assert_eq!(shells.len(), 7);
        assert!(shells.iter().all(|s| s.diameter == 0.5));
        assert_eq!(shells[0].shell.to_string(), "[HE, gunpowder]");
    }

    #[test]
    fn test_first_reference_matches() {
        let shells = reference_shells().unwrap();
        let report = run(&shells[..1], aps_core::reference::DEFAULT_TOLERANCE_PCT).unwrap();
        assert!(report.all_passed(), "{}", report.render());
        assert!(report.render().contains("fine"));
    }

    #[test]
    fn test_known_velocity_outliers() {
        // These two measurements disagree with the velocity formula; any other
        // failure at the default tolerance is a formula regression.
        let shells = reference_shells().unwrap();
        let report = run(&shells, aps_core::reference::DEFAULT_TOLERANCE_PCT).unwrap();
        let failed: Vec<String> = report.failures().map(|c| c.shell.to_string()).collect();
        assert_eq!(
            failed,
            vec![
                "[solid, solid, gunpowder, gunpowder]".to_string(),
                "[HE, HE, bleeder, gunpowder]".to_string(),
            ]
        );
        for check in report.failures() {
            assert!(check.mismatches.iter().any(|m| m.quantity == "velocity"));
        }
        assert!(report.render().contains("2 of 7 reference shells differ"));
    }

    #[test]
    fn test_zero_tolerance_reports_everything() {
        let shells = reference_shells().unwrap();
        let report = run(&shells, 0.0).unwrap();
        assert!(!report.all_passed());
        assert!(report.render().contains("Check failed for shell=[HE, gunpowder], diameter=500"));
    }
}
