//! Test fixtures and helpers.
//!
//! Shells, contexts and job files shared by the integration tests.

use aps_core::blueprint::Blueprint;
use aps_core::context::CannonContext;
use aps_core::generator::GeneratorConfig;
use aps_core::parts::ShellPart;

/// The two-HE, bleeder, single-gunpowder shell used throughout the docs.
#[must_use]
pub fn bleeder_he_shell() -> Blueprint {
    Blueprint::new(vec![
        ShellPart::Explosive,
        ShellPart::Explosive,
        ShellPart::Bleeder,
        ShellPart::Gunpowder,
    ])
}

/// Parse a comma-separated blueprint.
///
/// # Panics
///
/// Panics on an unknown part name.
#[must_use]
pub fn shell(text: &str) -> Blueprint {
    text.parse()
        .unwrap_or_else(|e| panic!("bad fixture shell {text:?}: {e}"))
}

/// One head, two body kinds: small enough to enumerate by hand.
#[must_use]
pub fn small_generator_config() -> GeneratorConfig {
    GeneratorConfig {
        heads: vec![ShellPart::Apcap],
        body: vec![ShellPart::Solid, ShellPart::Explosive],
        require_casing: true,
    }
}

/// A rail-assisted twin-loader cannon.
#[must_use]
pub fn railgun_context() -> CannonContext {
    CannonContext::default()
        .with_loaders(2, 2)
        .with_rail_charge(2000.0, 500.0)
}

/// A complete optimize job in RON.
pub const SAMPLE_JOB_RON: &str = r#"(
    loader_length: Some(2.0),
    max_modules: Some(4),
    max_results: 3,
    diameter: Auto,
    context: (loaders: 2, clips_per_loader: 2, barrel: 12.0),
    score: DpsAboveVelocity(200.0),
    columns: ["dps", "velocity", "shell"],
)"#;

/// A job that omits `max_modules`.
pub const INCOMPLETE_JOB_RON: &str = "(loader_length: Some(2.0))";
