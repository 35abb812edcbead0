//! Job and context loading.

use std::path::Path;

use aps_core::job::OptimizeJob;
use aps_core::optimizer::DiameterPolicy;
use aps_core::scoring::ScoreKind;
use serde::de::DeserializeOwned;

use crate::{Result, ToolError};

/// Load any RON document from a file.
///
/// # Errors
///
/// Returns [`ToolError::FileNotFound`] for a missing path, or a read or
/// parse error.
pub fn load_ron<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Loaded RON file");
    from_ron_str(&contents)
}

/// Parse a RON document (useful for embedded data).
///
/// # Errors
///
/// Returns [`ToolError::ParseError`] on malformed input.
pub fn from_ron_str<T: DeserializeOwned>(ron: &str) -> Result<T> {
    Ok(ron::from_str(ron)?)
}

/// Command-line values that take precedence over a job file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobOverrides {
    /// Loader length in metres.
    pub loader_length: Option<f64>,
    /// Longest blueprint to enumerate.
    pub max_modules: Option<u32>,
    /// Shells to keep.
    pub max_results: Option<usize>,
    /// Fixed diameter in metres.
    pub diameter: Option<f64>,
    /// Rank by dps, rejecting shells slower than this.
    pub min_velocity: Option<f64>,
}

impl JobOverrides {
    /// Apply every set value to `job`.
    pub fn apply(&self, job: &mut OptimizeJob) {
        if let Some(length) = self.loader_length {
            job.loader_length = Some(length);
        }
        if let Some(modules) = self.max_modules {
            job.max_modules = Some(modules);
        }
        if let Some(results) = self.max_results {
            job.max_results = results;
        }
        if let Some(diameter) = self.diameter {
            job.diameter = DiameterPolicy::Fixed(diameter);
        }
        if let Some(velocity) = self.min_velocity {
            job.score = ScoreKind::DpsAboveVelocity(velocity);
        }
    }
}

/// Load a job file, or start from defaults, then apply overrides.
///
/// # Errors
///
/// Returns an error if the job file cannot be loaded.
pub fn resolve_job(path: Option<&Path>, overrides: &JobOverrides) -> Result<OptimizeJob> {
    let mut job = match path {
        Some(path) => load_ron(path)?,
        None => OptimizeJob::default(),
    };
    overrides.apply(&mut job);
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aps_core::context::CannonContext;

    #[test]
    fn test_overrides_replace_job_values() {
        let mut job: OptimizeJob =
            from_ron_str("(loader_length: Some(1.0), max_modules: Some(3), max_results: 2)").unwrap();
        JobOverrides {
            max_modules: Some(5),
            diameter: Some(0.2),
            min_velocity: Some(400.0),
            ..JobOverrides::default()
        }
        .apply(&mut job);
        assert_eq!(job.loader_length, Some(1.0));
        assert_eq!(job.max_modules, Some(5));
        assert_eq!(job.max_results, 2);
        assert_eq!(job.diameter, DiameterPolicy::Fixed(0.2));
        assert_eq!(job.score, ScoreKind::DpsAboveVelocity(400.0));
    }

    #[test]
    fn test_missing_file() {
        let result: Result<CannonContext> = load_ron("does/not/exist.ron");
        assert!(matches!(result, Err(ToolError::FileNotFound(_))));
    }

    #[test]
    fn test_parse_error() {
        let result: Result<OptimizeJob> = from_ron_str("(loader_length: ");
        assert!(matches!(result, Err(ToolError::ParseError(_))));
    }
}
