//! Named-field view over the evaluation stages.
//!
//! Reports select columns by name. Every stage answers for its own fields
//! and for the fields of the stage it was built from. Zero part counts and
//! unset optional values are reported as absent.

use std::fmt;

use serde::Serialize;

use crate::blueprint::Blueprint;
use crate::cannon::{DamageProfile, EvaluatedConfig};
use crate::context::CannonContext;
use crate::error::{Result, ShellError};
use crate::geometry::GeometricConfig;
use crate::stats::BulletStats;

/// Every field name any stage can provide.
pub const FIELD_NAMES: [&str; 32] = [
    "shell",
    "modules",
    "propellant",
    "rails",
    "explosive",
    "flak",
    "frag",
    "kinetic_c",
    "speed_c",
    "armor_c",
    "exp_mod",
    "diameter",
    "shell_length",
    "length",
    "loaders",
    "clips_per_loader",
    "belt",
    "vel_charge",
    "acc_charge",
    "barrel",
    "armor",
    "period",
    "damage",
    "dps",
    "vp",
    "vr",
    "velocity",
    "accuracy",
    "barrel_p",
    "coolers",
    "clip_time",
    "blocks",
];

/// Value of a single record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Counts.
    Int(u64),
    /// Measurements and modifiers.
    Real(f64),
    /// Switches.
    Flag(bool),
    /// The blueprint.
    Shell(Blueprint),
    /// The damage profile.
    Damage(DamageProfile),
}

impl FieldValue {
    /// Numeric value, if the field is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Real(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Real(v) => write!(f, "{v}"),
            FieldValue::Flag(v) => write!(f, "{v}"),
            FieldValue::Shell(shell) => write!(f, "{shell}"),
            FieldValue::Damage(damage) => {
                for (i, entry) in damage.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}={:.0}:{:.1}", entry.kind, entry.value, entry.ap)?;
                }
                Ok(())
            }
        }
    }
}

/// Whether `name` is a field of some stage.
#[must_use]
pub fn is_known_field(name: &str) -> bool {
    FIELD_NAMES.contains(&name)
}

/// A pipeline stage viewed as a set of named fields.
pub trait Record {
    /// Value of `name`, or `None` if this stage does not carry it.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Every field this stage carries, in [`FIELD_NAMES`] order.
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        FIELD_NAMES
            .iter()
            .filter_map(|name| self.field(name).map(|value| (*name, value)))
            .collect()
    }

    /// Like [`Record::field`], but unknown names are an error.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::UnknownField`] for a name no stage provides.
    fn lookup(&self, name: &str) -> Result<Option<FieldValue>> {
        if is_known_field(name) {
            Ok(self.field(name))
        } else {
            Err(ShellError::UnknownField(name.to_string()))
        }
    }
}

fn count(value: u32) -> Option<FieldValue> {
    (value > 0).then_some(FieldValue::Int(value as u64))
}

fn real(value: Option<f64>) -> Option<FieldValue> {
    value.map(FieldValue::Real)
}

impl Record for BulletStats {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "shell" => Some(FieldValue::Shell(self.shell.clone())),
            "modules" => Some(FieldValue::Int(self.modules as u64)),
            "propellant" => count(self.propellant),
            "rails" => count(self.rails),
            "explosive" => count(self.explosive),
            "flak" => count(self.flak),
            "frag" => count(self.frag),
            "kinetic_c" => Some(FieldValue::Real(self.kinetic_c)),
            "speed_c" => Some(FieldValue::Real(self.speed_c)),
            "armor_c" => Some(FieldValue::Real(self.armor_c)),
            "exp_mod" => Some(FieldValue::Real(self.exp_mod)),
            _ => None,
        }
    }
}

impl Record for CannonContext {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "loaders" => Some(FieldValue::Int(self.loaders as u64)),
            "clips_per_loader" => Some(FieldValue::Int(self.clips_per_loader as u64)),
            "belt" => Some(FieldValue::Flag(self.belt)),
            "vel_charge" => Some(FieldValue::Real(self.vel_charge)),
            "acc_charge" => Some(FieldValue::Real(self.acc_charge)),
            "barrel" => Some(FieldValue::Real(self.barrel)),
            "armor" => Some(FieldValue::Real(self.armor)),
            _ => None,
        }
    }
}

impl Record for GeometricConfig {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "diameter" => Some(FieldValue::Real(self.diameter)),
            "shell_length" => Some(FieldValue::Real(self.shell_length)),
            "length" => Some(FieldValue::Real(self.length)),
            _ => self
                .stats
                .field(name)
                .or_else(|| self.context.field(name)),
        }
    }
}

impl Record for EvaluatedConfig {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "period" => Some(FieldValue::Real(self.period)),
            "damage" => Some(FieldValue::Damage(self.damage.clone())),
            "dps" => Some(FieldValue::Real(self.dps)),
            "vp" => real(self.vp),
            "vr" => real(self.vr),
            "velocity" => Some(FieldValue::Real(self.velocity)),
            "accuracy" => Some(FieldValue::Real(self.accuracy)),
            "barrel_p" => real(self.barrel_p),
            "coolers" => real(self.coolers),
            "clip_time" => Some(FieldValue::Real(self.clip_time)),
            "blocks" => Some(FieldValue::Int(self.blocks as u64)),
            _ => self.geometry.field(name),
        }
    }
}
