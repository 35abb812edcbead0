//! Serializable optimizer jobs.

use serde::{Deserialize, Serialize};

use crate::cannon::EvaluatedConfig;
use crate::context::CannonContext;
use crate::error::{Result, ShellError};
use crate::generator::GeneratorConfig;
use crate::optimizer::{DiameterPolicy, SearchOutcome, ShellOptimizer};
use crate::scoring::ScoreKind;

/// Results kept when a job does not say.
pub const DEFAULT_MAX_RESULTS: usize = 4;

/// A complete optimizer run description, usually loaded from RON.
///
/// ```ron
/// (
///     loader_length: Some(2.0),
///     max_modules: Some(6),
///     context: (loaders: 2, barrel: 12.0),
///     score: DpsAboveVelocity(300.0),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeJob {
    /// Loader length in metres. Required unless the diameter is fixed.
    pub loader_length: Option<f64>,
    /// Longest blueprint to enumerate.
    pub max_modules: Option<u32>,
    /// Shells to keep.
    pub max_results: usize,
    /// How candidates are sized.
    pub diameter: DiameterPolicy,
    /// Cannon every candidate is fitted to.
    pub context: CannonContext,
    /// Ranking.
    pub score: ScoreKind,
    /// Enumerated part set.
    pub generator: GeneratorConfig,
    /// Report columns; empty selects the renderer's defaults.
    pub columns: Vec<String>,
}

impl Default for OptimizeJob {
    fn default() -> Self {
        Self {
            loader_length: None,
            max_modules: None,
            max_results: DEFAULT_MAX_RESULTS,
            diameter: DiameterPolicy::Auto,
            context: CannonContext::default(),
            score: ScoreKind::Dps,
            generator: GeneratorConfig::default(),
            columns: Vec::new(),
        }
    }
}

impl OptimizeJob {
    /// Loader length the search runs with.
    ///
    /// A fixed-diameter job without a loader length gets one long enough for
    /// its largest shell.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::MissingField`] for an `Auto` job without one.
    pub fn resolved_loader_length(&self) -> Result<f64> {
        match (self.loader_length, self.diameter, self.max_modules) {
            (Some(length), _, _) => Ok(length),
            (None, DiameterPolicy::Fixed(d), Some(modules)) => Ok(d * modules as f64),
            (None, _, _) => Err(ShellError::MissingField {
                field: "loader_length",
            }),
        }
    }

    /// Run the search.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::MissingField`] when `max_modules` or a needed
    /// `loader_length` is absent, and any error of the optimizer.
    pub fn run(&self) -> Result<SearchOutcome> {
        let max_modules = self.max_modules.ok_or(ShellError::MissingField {
            field: "max_modules",
        })?;
        let loader_length = self.resolved_loader_length()?;
        tracing::debug!(score = ?self.score, columns = self.columns.len(), "Running optimize job");

        let score = self.score;
        let score_fn = move |config: &EvaluatedConfig| score.score(config);
        ShellOptimizer::new(max_modules, self.max_results, score_fn)
            .with_context(self.context.clone())
            .with_diameter(self.diameter)
            .with_generator(self.generator.clone())
            .search(loader_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_job_from_ron() {
        let job: OptimizeJob = ron::from_str("(loader_length: Some(1.5), max_modules: Some(3))").unwrap();
        assert_eq!(job.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(job.diameter, DiameterPolicy::Auto);
        assert_eq!(job.score, ScoreKind::Dps);
        assert!(job.generator.require_casing);

        let outcome = job.run().unwrap();
        assert_eq!(outcome.shells.len(), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn test_missing_max_modules() {
        let job = OptimizeJob {
            loader_length: Some(1.0),
            ..OptimizeJob::default()
        };
        assert_eq!(
            job.run().unwrap_err(),
            ShellError::MissingField { field: "max_modules" }
        );
    }

    #[test]
    fn test_auto_needs_loader_length() {
        let job = OptimizeJob {
            max_modules: Some(3),
            ..OptimizeJob::default()
        };
        assert_eq!(
            job.run().unwrap_err(),
            ShellError::MissingField { field: "loader_length" }
        );
    }

    #[test]
    fn test_fixed_diameter_without_loader_length() {
        let job = OptimizeJob {
            max_modules: Some(3),
            diameter: DiameterPolicy::Fixed(0.2),
            ..OptimizeJob::default()
        };
        assert!((job.resolved_loader_length().unwrap() - 0.6).abs() < 1e-12);
        let outcome = job.run().unwrap();
        assert!(outcome.shells.iter().all(|s| s.item.diameter() == 0.2));
    }
}
