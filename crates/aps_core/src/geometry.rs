//! Physical dimensions of a shell at a given diameter.

use serde::{Deserialize, Serialize};

use crate::context::CannonContext;
use crate::stats::BulletStats;

/// Shell stats sized to a diameter and merged with the cannon context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricConfig {
    /// Diameter-independent stats.
    pub stats: BulletStats,
    /// Cannon settings.
    pub context: CannonContext,
    /// Shell diameter in metres.
    pub diameter: f64,
    /// Length of the non-casing modules in metres.
    pub shell_length: f64,
    /// Total length in metres.
    pub length: f64,
}

impl GeometricConfig {
    /// Size `stats` to `diameter`. Each module is `min(cap, diameter)` long.
    #[must_use]
    pub fn new(stats: BulletStats, context: CannonContext, diameter: f64) -> Self {
        let mut shell_length = 0.0;
        let mut length = 0.0;
        for part in stats.shell.iter() {
            let part_length = part.length_cap().min(diameter);
            if !part.is_casing() {
                shell_length += part_length;
            }
            length += part_length;
        }
        Self {
            stats,
            context,
            diameter,
            shell_length,
            length,
        }
    }
}
