//! Diameter-independent shell statistics.

use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;
use crate::modifiers;
use crate::parts::ShellPart;

/// Speed bonus of a base bleeder. Only one bleeder counts.
pub const BLEEDER_SPEED_BONUS: f64 = 0.2;

/// Explosive payload multiplier of shells carrying a sabot.
pub const SABOT_EXPLOSIVE_MOD: f64 = 0.25;

/// Part counts and modifiers derived from a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletStats {
    /// The shell itself.
    pub shell: Blueprint,
    /// Total modules.
    pub modules: u32,
    /// Gunpowder casings.
    pub propellant: u32,
    /// Rail casings.
    pub rails: u32,
    /// Explosive modules (bodies and heads).
    pub explosive: u32,
    /// Flak modules (bodies and heads).
    pub flak: u32,
    /// Fragmentation modules (bodies and heads).
    pub frag: u32,
    /// A squash head is fitted.
    pub squash: bool,
    /// Kinetic damage modifier.
    pub kinetic_c: f64,
    /// Velocity modifier, bleeder bonus included.
    pub speed_c: f64,
    /// Armor-piercing modifier.
    pub armor_c: f64,
    /// Multiplier for explosive and flak payloads.
    pub exp_mod: f64,
}

impl BulletStats {
    /// Count parts and compute the weighted modifiers of `shell`.
    #[must_use]
    pub fn from_blueprint(shell: &Blueprint) -> Self {
        let mut propellant = 0;
        let mut rails = 0;
        let mut explosive = 0;
        let mut flak = 0;
        let mut frag = 0;
        let mut bleeder = 0.0;
        let mut exp_mod = 1.0;
        let mut squash = false;

        for part in shell.iter() {
            match part {
                ShellPart::Bleeder => bleeder = BLEEDER_SPEED_BONUS,
                ShellPart::Explosive | ShellPart::ExplosiveHead => explosive += 1,
                ShellPart::Flak | ShellPart::FlakHead => flak += 1,
                ShellPart::Frag | ShellPart::FragHead => frag += 1,
                ShellPart::Gunpowder => propellant += 1,
                ShellPart::Rail => rails += 1,
                ShellPart::Sabot | ShellPart::SabotBody => exp_mod = SABOT_EXPLOSIVE_MOD,
                ShellPart::Squash => squash = true,
                _ => {}
            }
        }

        Self {
            shell: shell.clone(),
            modules: shell.len() as u32,
            propellant,
            rails,
            explosive,
            flak,
            frag,
            squash,
            kinetic_c: modifiers::kinetic_modifier(shell),
            speed_c: modifiers::speed_modifier(shell) * (1.0 + bleeder),
            armor_c: modifiers::ap_modifier(shell),
            exp_mod,
        }
    }

    /// Modules that are not casings.
    #[must_use]
    pub fn shell_modules(&self) -> u32 {
        self.modules - self.propellant - self.rails
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(text: &str) -> BulletStats {
        BulletStats::from_blueprint(&text.parse().unwrap())
    }

    #[test]
    fn test_counts() {
        let s = stats("HE, HE, bleeder, gunpowder");
        assert_eq!(s.modules, 4);
        assert_eq!(s.propellant, 1);
        assert_eq!(s.rails, 0);
        assert_eq!(s.explosive, 2);
        assert_eq!(s.shell_modules(), 3);
        assert_eq!(s.exp_mod, 1.0);
    }

    #[test]
    fn test_bleeder_bonus_counts_once() {
        let one = stats("HE, bleeder, gunpowder");
        let plain = stats("HE, gunpowder");
        let speed_one = crate::modifiers::speed_modifier(one.shell.parts());
        assert!((one.speed_c - speed_one * 1.2).abs() < 1e-12);
        assert_eq!(plain.speed_c, 1.0);
    }

    #[test]
    fn test_sabot_reduces_payload() {
        assert_eq!(stats("sabot, HE, gunpowder").exp_mod, SABOT_EXPLOSIVE_MOD);
        assert_eq!(stats("bsabot, gunpowder").exp_mod, SABOT_EXPLOSIVE_MOD);
    }

    #[test]
    fn test_heads_count_as_payload() {
        let s = stats("HEhead, HE, frag, gunpowder");
        assert_eq!(s.explosive, 2);
        assert_eq!(s.frag, 1);
        let f = stats("flakhead, flak, rail");
        assert_eq!(f.flak, 2);
        assert_eq!(f.rails, 1);
        assert!(stats("squash, HE, gunpowder").squash);
    }
}
