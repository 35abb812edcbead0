//! Exhaustive shell search with bounded top-k selection.
//!
//! Every blueprint within the module budget is sized, evaluated and scored.
//! Candidates scoring zero or less are dropped; the rest flow through a
//! [`TopK`] that keeps only the best `max_results` at any time.

use serde::{Deserialize, Serialize};

use crate::cannon::EvaluatedConfig;
use crate::context::CannonContext;
use crate::error::{Result, ShellError};
use crate::generator::{BlueprintGenerator, GeneratorConfig};
use crate::geometry::GeometricConfig;
use crate::stats::BulletStats;

/// Smallest shell diameter the game allows, in metres.
pub const MIN_DIAMETER: f64 = 0.018;

/// Largest shell diameter the game allows, in metres.
pub const MAX_DIAMETER: f64 = 0.5;

/// How each candidate's diameter is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum DiameterPolicy {
    /// Fill the loader: `loader_length / modules`, clamped to the valid range.
    #[default]
    Auto,
    /// Same diameter for every candidate.
    Fixed(f64),
}

impl DiameterPolicy {
    /// Diameter of a shell with `modules` modules in a loader of `loader_length`.
    ///
    /// Modules shorter than the diameter (bleeders) are ignored, so the
    /// shell may end up slightly shorter than the loader.
    #[must_use]
    pub fn diameter_for(self, loader_length: f64, modules: u32) -> f64 {
        match self {
            DiameterPolicy::Fixed(diameter) => diameter,
            DiameterPolicy::Auto => {
                (loader_length / modules.max(1) as f64).clamp(MIN_DIAMETER, MAX_DIAMETER)
            }
        }
    }
}

/// An item with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored<T> {
    /// Score assigned by the scoring function.
    pub score: f64,
    /// The scored item.
    pub item: T,
}

/// A scored cannon configuration.
pub type ScoredShell = Scored<EvaluatedConfig>;

/// Streaming selector for the `capacity` highest-scoring items.
///
/// Items are appended to a pending buffer. When the buffer holds more than
/// `capacity` items it is merged into the best set, which is sorted and cut
/// back to `capacity`. The buffer therefore never exceeds `capacity + 1`
/// items and a full sort happens once per `capacity + 1` pushes.
///
/// Sorting is stable, so equal scores keep their push order.
#[derive(Debug, Clone)]
pub struct TopK<T> {
    capacity: usize,
    best: Vec<Scored<T>>,
    pending: Vec<Scored<T>>,
    merges: usize,
}

impl<T> TopK<T> {
    /// Create a selector keeping `capacity` items.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            best: Vec::with_capacity(capacity),
            pending: Vec::with_capacity(capacity + 1),
            merges: 0,
        }
    }

    /// Offer an item.
    pub fn push(&mut self, score: f64, item: T) {
        self.pending.push(Scored { score, item });
        if self.pending.len() > self.capacity {
            self.merge();
        }
    }

    /// Items waiting for the next merge.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Merges performed so far.
    #[must_use]
    pub fn merges(&self) -> usize {
        self.merges
    }

    /// Finish selection: the best items, ascending by score.
    #[must_use]
    pub fn into_sorted(mut self) -> Vec<Scored<T>> {
        self.merge();
        self.best
    }

    fn merge(&mut self) {
        self.best.append(&mut self.pending);
        self.best.sort_by(|a, b| a.score.total_cmp(&b.score));
        let excess = self.best.len().saturating_sub(self.capacity);
        self.best.drain(..excess);
        self.merges += 1;
        tracing::trace!(
            merges = self.merges,
            retained = self.best.len(),
            "Merged pending candidates"
        );
    }
}

/// Result of a search with enumeration counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Best shells, ascending by score.
    pub shells: Vec<ScoredShell>,
    /// Blueprints enumerated.
    pub generated: usize,
    /// Blueprints with a positive score.
    pub accepted: usize,
}

/// Finds the highest-scoring shells for a loader.
///
/// # Example
///
/// ```
/// use aps_core::cannon::EvaluatedConfig;
/// use aps_core::optimizer::ShellOptimizer;
///
/// let optimizer = ShellOptimizer::new(4, 3, |config: &EvaluatedConfig| config.dps);
/// let best = optimizer.best_shells(2.0).unwrap();
/// assert!(best.len() <= 3);
/// assert!(best.windows(2).all(|w| w[0].score <= w[1].score));
/// ```
#[derive(Debug, Clone)]
pub struct ShellOptimizer<F> {
    max_modules: u32,
    max_results: usize,
    diameter: DiameterPolicy,
    context: CannonContext,
    generator: GeneratorConfig,
    score_fn: F,
}

impl<F> ShellOptimizer<F>
where
    F: Fn(&EvaluatedConfig) -> f64,
{
    /// Search shells of up to `max_modules` modules, keeping `max_results`.
    #[must_use]
    pub fn new(max_modules: u32, max_results: usize, score_fn: F) -> Self {
        Self {
            max_modules,
            max_results,
            diameter: DiameterPolicy::default(),
            context: CannonContext::default(),
            generator: GeneratorConfig::default(),
            score_fn,
        }
    }

    /// Builder method to set the cannon context.
    #[must_use]
    pub fn with_context(mut self, context: CannonContext) -> Self {
        self.context = context;
        self
    }

    /// Builder method to set the diameter policy.
    #[must_use]
    pub fn with_diameter(mut self, diameter: DiameterPolicy) -> Self {
        self.diameter = diameter;
        self
    }

    /// Builder method to set the enumerated part set.
    #[must_use]
    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    /// Best shells for a loader of `loader_length` metres, ascending by score.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is out of range.
    pub fn best_shells(&self, loader_length: f64) -> Result<Vec<ScoredShell>> {
        self.search(loader_length).map(|outcome| outcome.shells)
    }

    /// Like [`ShellOptimizer::best_shells`], with enumeration counters.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is out of range.
    pub fn search(&self, loader_length: f64) -> Result<SearchOutcome> {
        self.validate(loader_length)?;
        tracing::info!(
            loader_length,
            max_modules = self.max_modules,
            max_results = self.max_results,
            diameter = ?self.diameter,
            "Starting shell search"
        );

        let mut top = TopK::new(self.max_results);
        let mut generated = 0;
        let mut accepted = 0;
        for shell in BlueprintGenerator::new(self.max_modules, &self.generator) {
            generated += 1;
            let stats = BulletStats::from_blueprint(&shell);
            let diameter = self.diameter.diameter_for(loader_length, stats.modules);
            let geometry = GeometricConfig::new(stats, self.context.clone(), diameter);
            let config = EvaluatedConfig::assemble(geometry)?;
            let score = (self.score_fn)(&config);
            if score > 0.0 {
                accepted += 1;
                top.push(score, config);
            }
        }

        let shells = top.into_sorted();
        tracing::info!(
            generated,
            accepted,
            retained = shells.len(),
            best = ?shells.last().map(|s| s.score),
            "Shell search finished"
        );
        Ok(SearchOutcome {
            shells,
            generated,
            accepted,
        })
    }

    fn validate(&self, loader_length: f64) -> Result<()> {
        ShellError::require_positive("loader_length", loader_length)?;
        if self.max_modules == 0 {
            return Err(ShellError::InvalidParameter {
                name: "max_modules",
                value: 0.0,
            });
        }
        if self.max_results == 0 {
            return Err(ShellError::InvalidParameter {
                name: "max_results",
                value: 0.0,
            });
        }
        if let DiameterPolicy::Fixed(diameter) = self.diameter {
            ShellError::require_positive("diameter", diameter)?;
        }
        self.generator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_diameter_clamps() {
        assert_eq!(DiameterPolicy::Auto.diameter_for(2.0, 8), 0.25);
        assert_eq!(DiameterPolicy::Auto.diameter_for(4.0, 2), MAX_DIAMETER);
        assert_eq!(DiameterPolicy::Auto.diameter_for(0.05, 8), MIN_DIAMETER);
        assert_eq!(DiameterPolicy::Fixed(0.3).diameter_for(4.0, 2), 0.3);
    }

    #[test]
    fn test_topk_keeps_best_ascending() {
        let mut top = TopK::new(3);
        for (i, score) in [5.0, 1.0, 9.0, 3.0, 7.0, 2.0, 8.0].into_iter().enumerate() {
            top.push(score, i);
            assert!(top.pending_len() <= 4);
        }
        let scores: Vec<f64> = top.into_sorted().iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_topk_merges_once_per_capacity_plus_one() {
        let mut top = TopK::new(2);
        for i in 0..9 {
            top.push(i as f64, i);
        }
        assert_eq!(top.merges(), 3);
        assert_eq!(top.pending_len(), 0);
        let scores: Vec<f64> = top.into_sorted().iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![7.0, 8.0]);
    }

    #[test]
    fn test_topk_ties_keep_push_order() {
        let mut top = TopK::new(2);
        for item in ["a", "b", "c", "d"] {
            top.push(1.0, item);
        }
        let items: Vec<&str> = top.into_sorted().iter().map(|s| s.item).collect();
        assert_eq!(items, vec!["c", "d"]);
    }

    #[test]
    fn test_topk_fewer_items_than_capacity() {
        let mut top = TopK::new(10);
        top.push(2.0, 'x');
        top.push(1.0, 'y');
        let items: Vec<char> = top.into_sorted().iter().map(|s| s.item).collect();
        assert_eq!(items, vec!['y', 'x']);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let optimizer = ShellOptimizer::new(4, 2, |c: &EvaluatedConfig| c.dps);
        assert!(matches!(
            optimizer.best_shells(0.0),
            Err(ShellError::InvalidParameter { name: "loader_length", .. })
        ));
        let no_results = ShellOptimizer::new(4, 0, |c: &EvaluatedConfig| c.dps);
        assert!(no_results.best_shells(1.0).is_err());
        let no_modules = ShellOptimizer::new(0, 2, |c: &EvaluatedConfig| c.dps);
        assert!(no_modules.best_shells(1.0).is_err());
        let bad_diameter = ShellOptimizer::new(4, 2, |c: &EvaluatedConfig| c.dps)
            .with_diameter(DiameterPolicy::Fixed(-0.1));
        assert!(bad_diameter.best_shells(1.0).is_err());
    }

    #[test]
    fn test_search_counts() {
        let optimizer = ShellOptimizer::new(3, 5, |c: &EvaluatedConfig| c.dps);
        let outcome = optimizer.search(1.5).unwrap();
        assert_eq!(outcome.generated, 198);
        assert!(outcome.accepted <= outcome.generated);
        assert_eq!(outcome.shells.len(), 5);
        assert!(outcome.shells.iter().all(|s| s.score > 0.0));
    }

    #[test]
    fn test_negative_scores_never_retained() {
        let optimizer = ShellOptimizer::new(3, 5, |_: &EvaluatedConfig| -1.0);
        let outcome = optimizer.search(1.5).unwrap();
        assert_eq!(outcome.accepted, 0);
        assert!(outcome.shells.is_empty());
    }
}
