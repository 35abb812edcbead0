//! Cannon performance derived from a sized shell.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;
use crate::context::CannonContext;
use crate::error::{Result, ShellError};
use crate::formulas;
use crate::geometry::GeometricConfig;
use crate::stats::BulletStats;

/// Kind of damage a shell deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Impact damage of the shell body.
    Kinetic,
    /// HE payload.
    Explosive,
    /// Flak payload.
    Flak,
    /// Fragments.
    Frag,
    /// Squash head impact.
    Thump,
    /// Squash head spall particles.
    Spall,
}

impl DamageKind {
    /// Label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DamageKind::Kinetic => "kinetic",
            DamageKind::Explosive => "HE",
            DamageKind::Flak => "flak",
            DamageKind::Frag => "frag",
            DamageKind::Thump => "thump",
            DamageKind::Spall => "spall",
        }
    }
}

impl fmt::Display for DamageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One damage component: amount and armor piercing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageEntry {
    /// Damage type.
    pub kind: DamageKind,
    /// Damage dealt.
    pub value: f64,
    /// Armor piercing.
    pub ap: f64,
}

/// Damage components of one shot, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DamageProfile {
    entries: Vec<DamageEntry>,
}

impl DamageProfile {
    /// Create an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Replaces an existing entry of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidDamage`] unless both numbers are finite
    /// and non-negative.
    pub fn insert(&mut self, kind: DamageKind, value: f64, ap: f64) -> Result<()> {
        if !(value.is_finite() && ap.is_finite() && value >= 0.0 && ap >= 0.0) {
            return Err(ShellError::InvalidDamage {
                kind: kind.label().to_string(),
                value,
                ap,
            });
        }
        let entry = DamageEntry { kind, value, ap };
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    /// Look up a component.
    #[must_use]
    pub fn get(&self, kind: DamageKind) -> Option<&DamageEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// All components.
    pub fn iter(&self) -> impl Iterator<Item = &DamageEntry> {
        self.entries.iter()
    }

    /// Sum of every component.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the profile has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A shell fully evaluated in its cannon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedConfig {
    /// Sized shell.
    pub geometry: GeometricConfig,
    /// Reload period in seconds.
    pub period: f64,
    /// Damage per shot.
    pub damage: DamageProfile,
    /// Damage per second.
    pub dps: f64,
    /// Velocity from propellant, when non-zero.
    pub vp: Option<f64>,
    /// Velocity from rails, when non-zero.
    pub vr: Option<f64>,
    /// Muzzle velocity.
    pub velocity: f64,
    /// Inaccuracy in degrees.
    pub accuracy: f64,
    /// Barrel length needed to burn the propellant.
    pub barrel_p: Option<f64>,
    /// Coolers needed to keep up with the reload, when any.
    pub coolers: Option<f64>,
    /// Time to move a shell into a clip.
    pub clip_time: f64,
    /// Approximate block footprint of the cannon.
    pub blocks: u32,
}

impl EvaluatedConfig {
    /// Run the cannon formulas over a sized shell.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidDamage`] if a damage formula leaves the
    /// finite non-negative range.
    pub fn assemble(geometry: GeometricConfig) -> Result<Self> {
        let stats = &geometry.stats;
        let ctx = &geometry.context;
        let d = geometry.diameter;
        let shell_modules = stats.shell_modules();

        let period = formulas::reload_period(
            d,
            geometry.length,
            ctx.loaders,
            ctx.clips_per_loader,
            ctx.belt,
        );
        let vp = formulas::velocity_from_propellant(
            d,
            geometry.shell_length,
            stats.propellant,
            stats.modules,
            stats.speed_c,
        );
        let vr = formulas::velocity_from_rails(
            d,
            shell_modules,
            stats.rails,
            stats.speed_c,
            ctx.vel_charge,
        );
        let velocity = vp + vr;
        let ap = formulas::base_ap(stats.armor_c, velocity);

        let mut damage = DamageProfile::new();
        damage.insert(
            DamageKind::Kinetic,
            formulas::kinetic_damage(d, shell_modules, stats.kinetic_c, velocity),
            ap,
        )?;
        if stats.explosive > 0 {
            let value = formulas::explosive_damage(d, stats.explosive) * stats.exp_mod;
            damage.insert(DamageKind::Explosive, value, ap)?;
        }
        if stats.flak > 0 {
            let value = formulas::flak_damage(d, stats.flak) * stats.exp_mod;
            damage.insert(DamageKind::Flak, value, ap)?;
        }
        if stats.frag > 0 {
            let value = formulas::total_fragment_damage(d, stats.frag);
            damage.insert(DamageKind::Frag, value, formulas::FRAGMENT_AP)?;
        }
        if stats.squash && stats.explosive > 0 {
            let ((thump, thump_ap), (spall, spall_ap)) =
                formulas::squash_damage(d, stats.explosive, ctx.armor);
            damage.insert(DamageKind::Thump, thump, thump_ap)?;
            damage.insert(DamageKind::Spall, spall, spall_ap)?;
        }
        let dps = damage.total() / period;

        let barrel_p = (stats.propellant > 0)
            .then(|| formulas::barrel_for_propellant(stats.propellant, d));
        let coolers = Some(formulas::coolers_needed(d, stats.propellant, period))
            .filter(|c| *c > 0.0);
        let accuracy =
            formulas::accuracy(d, geometry.length, stats.propellant, ctx.barrel, ctx.acc_charge);
        let clip_time = formulas::clip_time(d, geometry.length);
        let blocks = formulas::block_count(
            geometry.length,
            ctx.loaders,
            ctx.effective_clips(),
            coolers.unwrap_or(0.0),
            ctx.barrel,
        );

        Ok(Self {
            geometry,
            period,
            damage,
            dps,
            vp: Some(vp).filter(|v| *v != 0.0),
            vr: Some(vr).filter(|v| *v != 0.0),
            velocity,
            accuracy,
            barrel_p,
            coolers,
            clip_time,
            blocks,
        })
    }

    /// The evaluated shell.
    #[must_use]
    pub fn shell(&self) -> &Blueprint {
        &self.geometry.stats.shell
    }

    /// Diameter-independent stats.
    #[must_use]
    pub fn stats(&self) -> &BulletStats {
        &self.geometry.stats
    }

    /// Shell diameter in metres.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        self.geometry.diameter
    }
}

/// Evaluate `shell` at `diameter` in the given cannon.
///
/// # Errors
///
/// Returns [`ShellError::EmptyShell`] for a shell without parts and
/// [`ShellError::InvalidParameter`] for a non-positive diameter.
pub fn evaluate(shell: &Blueprint, diameter: f64, context: &CannonContext) -> Result<EvaluatedConfig> {
    if shell.is_empty() {
        return Err(ShellError::EmptyShell);
    }
    let diameter = ShellError::require_positive("diameter", diameter)?;
    let stats = BulletStats::from_blueprint(shell);
    EvaluatedConfig::assemble(GeometricConfig::new(stats, context.clone(), diameter))
}
