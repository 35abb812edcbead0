//! Fixed cannon configuration shared by every evaluated shell.

use serde::{Deserialize, Serialize};

/// Cannon-side settings that do not depend on the shell.
///
/// # Example RON
///
/// ```ron
/// CannonContext(
///     loaders: 2,
///     clips_per_loader: 3,
///     vel_charge: 1000.0,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonContext {
    /// Autoloaders feeding the cannon.
    pub loaders: u32,
    /// Ammo clips attached to each loader.
    pub clips_per_loader: u32,
    /// Belt-fed loaders instead of clip loaders.
    pub belt: bool,
    /// Rail energy spent on velocity per shot.
    pub vel_charge: f64,
    /// Rail energy spent on accuracy per shot.
    pub acc_charge: f64,
    /// Barrel length in metres.
    pub barrel: f64,
    /// Armor class of the expected target.
    pub armor: f64,
}

impl Default for CannonContext {
    fn default() -> Self {
        Self {
            loaders: 1,
            clips_per_loader: 1,
            belt: false,
            vel_charge: 0.0,
            acc_charge: 0.0,
            barrel: 10.0,
            armor: 8.0,
        }
    }
}

impl CannonContext {
    /// Builder method to set the loader count.
    #[must_use]
    pub fn with_loaders(mut self, loaders: u32, clips_per_loader: u32) -> Self {
        self.loaders = loaders;
        self.clips_per_loader = clips_per_loader;
        self
    }

    /// Builder method to set rail charges.
    #[must_use]
    pub fn with_rail_charge(mut self, velocity: f64, accuracy: f64) -> Self {
        self.vel_charge = velocity;
        self.acc_charge = accuracy;
        self
    }

    /// Clips that actually feed a loader (belt loaders have none).
    #[must_use]
    pub fn effective_clips(&self) -> u32 {
        if self.belt {
            0
        } else {
            self.clips_per_loader.max(1)
        }
    }
}
