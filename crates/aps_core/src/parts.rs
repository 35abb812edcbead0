//! Shell part vocabulary and per-part coefficient tables.
//!
//! Every part contributes three modifiers to a shell:
//! - speed (muzzle velocity multiplier)
//! - armor piercing
//! - kinetic damage
//!
//! Parts without a table entry use a neutral coefficient of 1.0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// A single shell module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellPart {
    /// Solid kinetic body.
    Solid,
    /// High-explosive body.
    #[serde(rename = "HE")]
    Explosive,
    /// Flak body.
    Flak,
    /// Fragmentation body.
    Frag,
    /// Stabilizer fin body.
    #[serde(rename = "stab")]
    Stabilizer,
    /// Sabot body.
    #[serde(rename = "bsabot")]
    SabotBody,
    /// Propellant casing.
    Gunpowder,
    /// Railgun casing.
    Rail,
    /// Base bleeder.
    Bleeder,
    /// Composite armor-piercing head.
    Composite,
    /// Armor-piercing capped head.
    Apcap,
    /// Hollow point head.
    Hollow,
    /// Shaped charge head.
    #[serde(rename = "scharge")]
    ShapedCharge,
    /// Sabot head.
    Sabot,
    /// Squash head.
    Squash,
    /// Fragmentation head.
    FragHead,
    /// Flak head.
    FlakHead,
    /// Skimmer tip.
    Skimmer,
    /// High-explosive head.
    #[serde(rename = "HEhead")]
    ExplosiveHead,
}

impl ShellPart {
    /// Every part in the vocabulary.
    pub const ALL: [ShellPart; 19] = [
        ShellPart::Solid,
        ShellPart::Explosive,
        ShellPart::Flak,
        ShellPart::Frag,
        ShellPart::Stabilizer,
        ShellPart::SabotBody,
        ShellPart::Gunpowder,
        ShellPart::Rail,
        ShellPart::Bleeder,
        ShellPart::Composite,
        ShellPart::Apcap,
        ShellPart::Hollow,
        ShellPart::ShapedCharge,
        ShellPart::Sabot,
        ShellPart::Squash,
        ShellPart::FragHead,
        ShellPart::FlakHead,
        ShellPart::Skimmer,
        ShellPart::ExplosiveHead,
    ];

    /// Parts that may only appear once, at the front of a shell.
    pub const HEADS: [ShellPart; 10] = [
        ShellPart::Composite,
        ShellPart::Apcap,
        ShellPart::Hollow,
        ShellPart::ShapedCharge,
        ShellPart::Sabot,
        ShellPart::Squash,
        ShellPart::FragHead,
        ShellPart::FlakHead,
        ShellPart::Skimmer,
        ShellPart::ExplosiveHead,
    ];

    /// Body kinds enumerated by default.
    pub const BODY: [ShellPart; 4] = [
        ShellPart::SabotBody,
        ShellPart::Solid,
        ShellPart::Explosive,
        ShellPart::Frag,
    ];

    /// Parts allowed in the tail section.
    pub const TAIL: [ShellPart; 3] = [ShellPart::Bleeder, ShellPart::Gunpowder, ShellPart::Rail];

    /// Name used in blueprints and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ShellPart::Solid => "solid",
            ShellPart::Explosive => "HE",
            ShellPart::Flak => "flak",
            ShellPart::Frag => "frag",
            ShellPart::Stabilizer => "stab",
            ShellPart::SabotBody => "bsabot",
            ShellPart::Gunpowder => "gunpowder",
            ShellPart::Rail => "rail",
            ShellPart::Bleeder => "bleeder",
            ShellPart::Composite => "composite",
            ShellPart::Apcap => "apcap",
            ShellPart::Hollow => "hollow",
            ShellPart::ShapedCharge => "scharge",
            ShellPart::Sabot => "sabot",
            ShellPart::Squash => "squash",
            ShellPart::FragHead => "fraghead",
            ShellPart::FlakHead => "flakhead",
            ShellPart::Skimmer => "skimmer",
            ShellPart::ExplosiveHead => "HEhead",
        }
    }

    /// Speed coefficient.
    #[must_use]
    pub const fn speed_modifier(self) -> f64 {
        match self {
            ShellPart::Bleeder => 1.1,
            ShellPart::SabotBody => 1.75,
            ShellPart::Solid => 1.3,
            ShellPart::Stabilizer => 0.95,
            ShellPart::Sabot => 2.05,
            ShellPart::ShapedCharge | ShellPart::Hollow => 1.4,
            ShellPart::Apcap => 1.5,
            ShellPart::Composite => 1.6,
            _ => 1.0,
        }
    }

    /// Armor-piercing coefficient.
    #[must_use]
    pub const fn ap_modifier(self) -> f64 {
        match self {
            ShellPart::SabotBody => 3.6,
            ShellPart::Explosive => 1.5,
            ShellPart::Solid => 2.0,
            ShellPart::Flak | ShellPart::Frag => 0.4,
            ShellPart::Stabilizer => 0.5,
            ShellPart::Squash => 0.3,
            ShellPart::Sabot => 6.75,
            ShellPart::ShapedCharge => 0.1,
            ShellPart::Hollow => 0.25,
            ShellPart::Apcap => 3.5,
            ShellPart::Composite => 4.5,
            _ => 1.0,
        }
    }

    /// Kinetic damage coefficient.
    #[must_use]
    pub const fn kinetic_modifier(self) -> f64 {
        match self {
            ShellPart::SabotBody => 2.7,
            ShellPart::Explosive => 2.5,
            ShellPart::Solid => 5.0,
            ShellPart::Flak | ShellPart::Squash => 0.4,
            ShellPart::Stabilizer => 0.7,
            ShellPart::Frag => 0.8,
            ShellPart::Sabot => 1.8,
            ShellPart::ShapedCharge => 0.5,
            ShellPart::Hollow => 1.2,
            ShellPart::Apcap => 10.0,
            ShellPart::Composite => 5.0,
            _ => 1.0,
        }
    }

    /// Maximum physical length of the module in metres.
    ///
    /// The actual length is `min(length_cap, diameter)`.
    #[must_use]
    pub const fn length_cap(self) -> f64 {
        match self {
            ShellPart::Bleeder => 0.1,
            _ => 1.0,
        }
    }

    /// Casing parts end the modifier scan and do not count towards shell length.
    #[must_use]
    pub const fn is_casing(self) -> bool {
        matches!(self, ShellPart::Gunpowder | ShellPart::Rail)
    }

    /// Whether the part belongs to the tail vocabulary.
    #[must_use]
    pub const fn is_tail(self) -> bool {
        matches!(
            self,
            ShellPart::Bleeder | ShellPart::Gunpowder | ShellPart::Rail
        )
    }

    /// Whether the part is a single-occurrence head.
    #[must_use]
    pub fn is_head(self) -> bool {
        Self::HEADS.contains(&self)
    }
}

impl fmt::Display for ShellPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellPart {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|part| part.name() == name)
            .ok_or_else(|| ShellError::UnknownPart(name.to_string()))
    }
}
