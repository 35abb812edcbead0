//! Slow, obviously-correct references.
//!
//! The generator and the top-k selector are both optimized. The functions
//! here compute the same answers the naive way so tests can compare:
//!
//! - [`enumerate_all`] lists every sequence over the configured alphabet and
//!   keeps the ones [`is_valid_blueprint`] accepts.
//! - [`naive_top_k`] sorts everything and takes the tail.
//!
//! Both are exponential or quadratic in the worst case; keep inputs small.

use std::collections::BTreeSet;

use aps_core::generator::GeneratorConfig;
use aps_core::parts::ShellPart;

/// Every part the generator may emit for `config`, deduplicated.
#[must_use]
pub fn alphabet(config: &GeneratorConfig) -> Vec<ShellPart> {
    let mut parts = BTreeSet::new();
    parts.extend(config.heads.iter().copied());
    parts.extend(config.body.iter().copied());
    parts.extend(ShellPart::TAIL);
    parts.into_iter().collect()
}

fn tail_rank(part: ShellPart) -> Option<u8> {
    match part {
        ShellPart::Bleeder => Some(0),
        ShellPart::Gunpowder => Some(1),
        ShellPart::Rail => Some(2),
        _ => None,
    }
}

/// Check a blueprint against the shell grammar directly.
///
/// The shell is split at its first tail part. The front must be an optional
/// head followed by body kinds in configured order; the back must be at most
/// one bleeder, then gunpowder, then rails, with at least one casing.
#[must_use]
pub fn is_valid_blueprint(parts: &[ShellPart], limit: u32, config: &GeneratorConfig) -> bool {
    if parts.len() > limit as usize {
        return false;
    }
    let split = parts
        .iter()
        .position(|p| tail_rank(*p).is_some())
        .unwrap_or(parts.len());
    let (front, back) = parts.split_at(split);
    if front.is_empty() {
        return false;
    }

    let body = match front.split_first() {
        Some((first, rest)) if config.heads.contains(first) => rest,
        _ => front,
    };
    let mut last_index = 0;
    for part in body {
        let Some(index) = config.body.iter().position(|b| b == part) else {
            return false;
        };
        if index < last_index {
            return false;
        }
        last_index = index;
    }

    if back.is_empty() {
        return !config.require_casing;
    }
    let mut last_rank = 0;
    for part in back {
        let Some(rank) = tail_rank(*part) else {
            return false;
        };
        if rank < last_rank {
            return false;
        }
        last_rank = rank;
    }
    let bleeders = back.iter().filter(|p| **p == ShellPart::Bleeder).count();
    bleeders <= 1 && bleeders < back.len()
}

/// Every valid blueprint of at most `limit` parts, found by exhaustive search.
#[must_use]
pub fn enumerate_all(limit: u32, config: &GeneratorConfig) -> BTreeSet<Vec<ShellPart>> {
    let alphabet = alphabet(config);
    let mut found = BTreeSet::new();
    let mut layer: Vec<Vec<ShellPart>> = vec![Vec::new()];
    for _ in 0..limit {
        let mut next = Vec::with_capacity(layer.len() * alphabet.len());
        for prefix in &layer {
            for part in &alphabet {
                let mut candidate = prefix.clone();
                candidate.push(*part);
                if is_valid_blueprint(&candidate, limit, config) {
                    found.insert(candidate.clone());
                }
                next.push(candidate);
            }
        }
        layer = next;
    }
    tracing::debug!(limit, found = found.len(), "Brute-force enumeration done");
    found
}

/// The `n` highest scores with their items, ascending, ties in input order.
///
/// Scores that are not strictly positive are discarded first.
#[must_use]
pub fn naive_top_k<T: Clone>(scored: &[(f64, T)], n: usize) -> Vec<(f64, T)> {
    let mut kept: Vec<(f64, T)> = scored.iter().filter(|(s, _)| *s > 0.0).cloned().collect();
    kept.sort_by(|a, b| a.0.total_cmp(&b.0));
    let excess = kept.len().saturating_sub(n);
    kept.split_off(excess)
}

/// Proptest strategies for shell tests.
pub mod strategies {
    use aps_core::context::CannonContext;
    use aps_core::generator::GeneratorConfig;
    use aps_core::parts::ShellPart;
    use proptest::prelude::*;

    /// Any head part.
    pub fn arb_head() -> impl Strategy<Value = ShellPart> {
        proptest::sample::select(ShellPart::HEADS.to_vec())
    }

    /// Any default body kind.
    pub fn arb_body_kind() -> impl Strategy<Value = ShellPart> {
        proptest::sample::select(ShellPart::BODY.to_vec())
    }

    /// A small generator configuration: up to two heads and two body kinds.
    pub fn arb_generator_config() -> impl Strategy<Value = GeneratorConfig> {
        (
            proptest::collection::vec(arb_head(), 0..3),
            proptest::collection::vec(arb_body_kind(), 0..3),
            any::<bool>(),
        )
            .prop_map(|(heads, body, require_casing)| GeneratorConfig {
                heads,
                body,
                require_casing,
            })
    }

    /// A valid shell diameter in metres.
    pub fn arb_diameter() -> impl Strategy<Value = f64> {
        0.018f64..0.5f64
    }

    /// Cannon settings across the useful range.
    pub fn arb_context() -> impl Strategy<Value = CannonContext> {
        (1u32..6, 1u32..4, any::<bool>(), 0.0f64..5000.0, 4.0f64..20.0).prop_map(
            |(loaders, clips, belt, vel_charge, barrel)| CannonContext {
                belt,
                barrel,
                ..CannonContext::default()
                    .with_loaders(loaders, clips)
                    .with_rail_charge(vel_charge, 0.0)
            },
        )
    }

    /// Scores with repeats, negatives and zeros.
    pub fn arb_scores(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        let score = prop_oneof![
            4 => 0.0f64..100.0,
            1 => -10.0f64..0.0,
            1 => Just(0.0),
            1 => (1u8..4).prop_map(f64::from),
        ];
        proptest::collection::vec(score, 0..max_len)
    }
}
