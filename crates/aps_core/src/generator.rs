//! Blueprint enumeration.
//!
//! A blueprint is built from three zones:
//!
//! ```text
//! blueprint := [head]? body* tail
//! head      := one part of the head set, at most once
//! body      := each body kind repeated 0..n times, kinds grouped in order
//! tail      := bleeder{0,1} gunpowder{i} rail{j}, i + j >= 1
//! ```
//!
//! Generation is a chain of [`Stage`]s. Each stage takes a [`Partial`]
//! (remaining module budget plus the parts chosen so far) and lazily yields
//! every extension of it; the tail stage is last and yields finished shells.
//! Same-kind body parts are fungible, so only the grouped ordering of body
//! parts is produced.

use std::iter;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;
use crate::error::{Result, ShellError};
use crate::parts::ShellPart;

type PartialIter = Box<dyn Iterator<Item = Partial>>;

/// Which parts the generator combines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Mutually exclusive head parts, tried in order after the headless branch.
    pub heads: Vec<ShellPart>,
    /// Body kinds, each repeated 0..n times.
    pub body: Vec<ShellPart>,
    /// Only emit shells with at least one gunpowder or rail casing.
    pub require_casing: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            heads: ShellPart::HEADS.to_vec(),
            body: ShellPart::BODY.to_vec(),
            require_casing: true,
        }
    }
}

impl GeneratorConfig {
    /// Check that every configured part may occupy its zone.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidPartRole`] for the first misplaced part.
    pub fn validate(&self) -> Result<()> {
        if let Some(part) = self.heads.iter().find(|p| !p.is_head()) {
            return Err(ShellError::InvalidPartRole {
                part: part.to_string(),
                role: "head",
            });
        }
        if let Some(part) = self.body.iter().find(|p| p.is_head() || p.is_tail()) {
            return Err(ShellError::InvalidPartRole {
                part: part.to_string(),
                role: "body",
            });
        }
        Ok(())
    }

    /// Build the stage chain: head, one stage per distinct body kind, tail.
    #[must_use]
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = vec![Stage::Head(dedup(&self.heads).into())];
        stages.extend(dedup(&self.body).into_iter().map(Stage::Body));
        stages.push(Stage::Tail {
            require_casing: self.require_casing,
        });
        stages
    }
}

fn dedup(parts: &[ShellPart]) -> Vec<ShellPart> {
    let mut seen = Vec::with_capacity(parts.len());
    for part in parts {
        if !seen.contains(part) {
            seen.push(*part);
        }
    }
    seen
}

/// A shell under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial {
    /// Modules still available.
    pub remaining: u32,
    /// Parts chosen so far.
    pub parts: Vec<ShellPart>,
}

impl Partial {
    /// An empty shell with the full budget.
    #[must_use]
    pub fn empty(limit: u32) -> Self {
        Self {
            remaining: limit,
            parts: Vec::new(),
        }
    }

    fn extended(&self, part: ShellPart, count: u32) -> Self {
        let mut parts = Vec::with_capacity(self.parts.len() + count as usize);
        parts.extend_from_slice(&self.parts);
        parts.extend(iter::repeat(part).take(count as usize));
        Self {
            remaining: self.remaining - count,
            parts,
        }
    }
}

/// One step of blueprint generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// No head, then each head in order.
    Head(Arc<[ShellPart]>),
    /// 0..=remaining copies of one body kind.
    Body(ShellPart),
    /// Bleeder, gunpowder and rail combinations.
    Tail {
        /// Skip the casing-less variant.
        require_casing: bool,
    },
}

impl Stage {
    /// Lazily yield every extension of `partial`.
    #[must_use]
    pub fn extend(&self, partial: Partial) -> Box<dyn Iterator<Item = Partial>> {
        match self {
            Stage::Head(heads) => {
                let heads = Arc::clone(heads);
                let choices = if partial.remaining > 0 { heads.len() } else { 0 };
                let base = partial.clone();
                let headed = (0..choices).map(move |i| base.extended(heads[i], 1));
                Box::new(iter::once(partial).chain(headed))
            }
            Stage::Body(kind) => {
                let kind = *kind;
                Box::new((0..=partial.remaining).map(move |n| partial.extended(kind, n)))
            }
            Stage::Tail { require_casing } => tails(partial, *require_casing),
        }
    }
}

fn tails(partial: Partial, require_casing: bool) -> PartialIter {
    // A tail needs something to push.
    if partial.parts.is_empty() {
        return Box::new(iter::empty());
    }
    let budget = partial.remaining;
    let bare = (!require_casing).then(|| partial.clone());
    let prefix: Arc<[ShellPart]> = partial.parts.into();

    let cased = (0..=budget).flat_map(move |powder| {
        let prefix = Arc::clone(&prefix);
        (0..=budget - powder).flat_map(move |rails| {
            let prefix = Arc::clone(&prefix);
            let spare = budget - powder - rails;
            (0..=spare.min(1))
                .filter(move |_| powder + rails > 0)
                .map(move |bleeders| {
                    let mut parts = prefix.to_vec();
                    parts.extend(iter::repeat(ShellPart::Bleeder).take(bleeders as usize));
                    parts.extend(iter::repeat(ShellPart::Gunpowder).take(powder as usize));
                    parts.extend(iter::repeat(ShellPart::Rail).take(rails as usize));
                    Partial {
                        remaining: spare - bleeders,
                        parts,
                    }
                })
        })
    });
    Box::new(bare.into_iter().chain(cased))
}

/// Lazy, duplicate-free sequence of blueprints with at most `limit` modules.
pub struct BlueprintGenerator {
    inner: PartialIter,
}

impl BlueprintGenerator {
    /// Enumerate blueprints for `config` within `limit` modules.
    #[must_use]
    pub fn new(limit: u32, config: &GeneratorConfig) -> Self {
        let seed: PartialIter = Box::new(iter::once(Partial::empty(limit)));
        let inner = config
            .stages()
            .into_iter()
            .fold(seed, |partials, stage| {
                let next: PartialIter =
                    Box::new(partials.flat_map(move |partial| stage.extend(partial)));
                next
            });
        Self { inner }
    }

    /// Enumerate with the default part set.
    #[must_use]
    pub fn with_defaults(limit: u32) -> Self {
        Self::new(limit, &GeneratorConfig::default())
    }
}

impl Iterator for BlueprintGenerator {
    type Item = Blueprint;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|partial| Blueprint::new(partial.parts))
    }
}

impl std::fmt::Debug for BlueprintGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlueprintGenerator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use ShellPart::{Apcap, Bleeder, Explosive, Frag, Gunpowder, Rail, Solid};

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            heads: vec![Apcap],
            body: vec![Solid],
            require_casing: true,
        }
    }

    #[test]
    fn test_zero_limit_is_empty() {
        assert_eq!(BlueprintGenerator::with_defaults(0).count(), 0);
    }

    #[test]
    fn test_one_module_cannot_hold_a_casing() {
        assert_eq!(BlueprintGenerator::with_defaults(1).count(), 0);
    }

    #[test]
    fn test_default_counts() {
        // 14 single-part prefixes x {gunpowder, rail}
        assert_eq!(BlueprintGenerator::with_defaults(2).count(), 28);
        // 14 prefixes x 7 tails + 50 two-part prefixes x 2 tails
        assert_eq!(BlueprintGenerator::with_defaults(3).count(), 198);
    }

    #[test]
    fn test_first_blueprints_follow_stage_order() {
        let first: Vec<Blueprint> = BlueprintGenerator::with_defaults(2).take(2).collect();
        assert_eq!(first[0].parts(), &[Frag, Rail]);
        assert_eq!(first[1].parts(), &[Frag, Gunpowder]);
    }

    #[test]
    fn test_small_config_exact_output() {
        let all: Vec<Vec<ShellPart>> = BlueprintGenerator::new(3, &small_config())
            .map(|bp| bp.parts().to_vec())
            .collect();
        let expected: Vec<Vec<ShellPart>> = vec![
            vec![Solid, Rail],
            vec![Solid, Bleeder, Rail],
            vec![Solid, Rail, Rail],
            vec![Solid, Gunpowder],
            vec![Solid, Bleeder, Gunpowder],
            vec![Solid, Gunpowder, Rail],
            vec![Solid, Gunpowder, Gunpowder],
            vec![Solid, Solid, Rail],
            vec![Solid, Solid, Gunpowder],
            vec![Apcap, Rail],
            vec![Apcap, Bleeder, Rail],
            vec![Apcap, Rail, Rail],
            vec![Apcap, Gunpowder],
            vec![Apcap, Bleeder, Gunpowder],
            vec![Apcap, Gunpowder, Rail],
            vec![Apcap, Gunpowder, Gunpowder],
            vec![Apcap, Solid, Rail],
            vec![Apcap, Solid, Gunpowder],
        ];
        assert_eq!(all, expected);
    }

    #[test]
    fn test_casing_optional_adds_bare_prefixes_once() {
        let config = GeneratorConfig {
            require_casing: false,
            ..small_config()
        };
        let all: Vec<Blueprint> = BlueprintGenerator::new(3, &config).collect();
        let cased = BlueprintGenerator::new(3, &small_config()).count();
        // bare prefixes: solid, solid*2, solid*3, apcap, apcap+solid, apcap+solid*2
        assert_eq!(all.len(), cased + 6);
        let unique: HashSet<&Blueprint> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_duplicate_heads_are_ignored() {
        let config = GeneratorConfig {
            heads: vec![Apcap, Apcap],
            ..small_config()
        };
        let all: Vec<Blueprint> = BlueprintGenerator::new(4, &config).collect();
        let unique: HashSet<&Blueprint> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(all.len(), BlueprintGenerator::new(4, &small_config()).count());
    }

    #[test]
    fn test_validate_rejects_misplaced_parts() {
        let bad_head = GeneratorConfig {
            heads: vec![Explosive],
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            bad_head.validate(),
            Err(ShellError::InvalidPartRole { role: "head", .. })
        ));

        let bad_body = GeneratorConfig {
            body: vec![Gunpowder],
            ..GeneratorConfig::default()
        };
        assert!(bad_body.validate().is_err());
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_yielded_blueprints_are_independent() {
        let mut gen = BlueprintGenerator::new(4, &small_config());
        let first = gen.next().unwrap();
        let snapshot = first.parts().to_vec();
        for _ in gen.by_ref().take(10) {}
        assert_eq!(first.parts(), snapshot.as_slice());
    }
}
