//! # APS Core
//!
//! Shell physics and design search for advanced cannons.
//!
//! This crate contains **only** calculation logic:
//! - No IO
//! - No threads
//! - No global state
//!
//! A candidate flows through three typed stages:
//! [`BulletStats`](stats::BulletStats) (part counts and modifiers),
//! [`GeometricConfig`](geometry::GeometricConfig) (sized to a diameter) and
//! [`EvaluatedConfig`](cannon::EvaluatedConfig) (velocity, damage, reload).
//!
//! ## Crate Structure
//!
//! - [`parts`] - Shell part vocabulary and coefficient tables
//! - [`generator`] - Enumeration of valid blueprints
//! - [`formulas`] - Cannon formula library
//! - [`optimizer`] - Exhaustive search with bounded top-k selection
//! - [`record`] - Named-field view used by reports

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod blueprint;
pub mod cannon;
pub mod context;
pub mod error;
pub mod formulas;
pub mod generator;
pub mod geometry;
pub mod job;
pub mod modifiers;
pub mod optimizer;
pub mod parts;
pub mod record;
pub mod reference;
pub mod scoring;
pub mod stats;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::blueprint::Blueprint;
    pub use crate::cannon::{evaluate, DamageKind, DamageProfile, EvaluatedConfig};
    pub use crate::context::CannonContext;
    pub use crate::error::{Result, ShellError};
    pub use crate::generator::{BlueprintGenerator, GeneratorConfig};
    pub use crate::geometry::GeometricConfig;
    pub use crate::job::OptimizeJob;
    pub use crate::optimizer::{DiameterPolicy, ScoredShell, SearchOutcome, ShellOptimizer, TopK};
    pub use crate::parts::ShellPart;
    pub use crate::record::{FieldValue, Record};
    pub use crate::scoring::ScoreKind;
    pub use crate::stats::BulletStats;
}
