//! Advanced cannon formulas.
//!
//! Pure functions of explicit scalars. Lengths are in metres, times in
//! seconds, velocities in metres per second. The approximations follow the
//! published game formulas and were checked against in-game measurements
//! (see [`crate::reference`]).

use std::f64::consts::PI;

/// Armor-piercing of fragments and squash-head thump.
pub const FRAGMENT_AP: f64 = 6.0;

/// Weight of the propellant velocity term.
const PROPELLANT_VELOCITY: f64 = 700.0;

/// Gauge scaling used by every damage formula: `(5d)^1.95`.
#[must_use]
pub fn gauge_factor(diameter: f64) -> f64 {
    (5.0 * diameter).powf(1.95)
}

/// Volume of a cylinder with the given diameter and length.
#[must_use]
pub fn shell_volume(diameter: f64, length: f64) -> f64 {
    0.25 * PI * diameter.powi(2) * length
}

/// Velocity contributed by gunpowder casings.
#[must_use]
pub fn velocity_from_propellant(
    diameter: f64,
    shell_length: f64,
    propellant: u32,
    modules: u32,
    speed_c: f64,
) -> f64 {
    if propellant == 0 || modules == 0 {
        return 0.0;
    }
    let volume_mod = shell_volume(diameter, shell_length).powf(0.03);
    PROPELLANT_VELOCITY * propellant as f64 * speed_c * volume_mod / modules as f64
}

/// Velocity contributed by rail casings.
///
/// Rail casings scale the charge as `6 - 5 * 0.9^rails`: 1.0, 1.5, 1.95, ...
#[must_use]
pub fn velocity_from_rails(
    diameter: f64,
    shell_modules: u32,
    rails: u32,
    speed_c: f64,
    vel_charge: f64,
) -> f64 {
    if vel_charge == 0.0 || shell_modules == 0 {
        return 0.0;
    }
    let rail_mod = 6.0 - 5.0 * 0.9_f64.powi(rails as i32);
    rail_mod * speed_c * (8.0 * vel_charge).sqrt()
        / ((shell_modules as f64).powf(0.25) * (5.0 * diameter).powf(0.75))
}

/// Barrel length needed to burn all propellant.
#[must_use]
pub fn barrel_for_propellant(propellant: u32, diameter: f64) -> f64 {
    16.0 * propellant as f64 * diameter
}

/// Time for an input feeder to move one shell into a clip.
#[must_use]
pub fn clip_time(diameter: f64, length: f64) -> f64 {
    100.0 * shell_volume(diameter, length).sqrt()
}

/// Time to load a shell from clips into the autoloader (the reload period).
#[must_use]
pub fn reload_period(diameter: f64, length: f64, loaders: u32, clips: u32, belt: bool) -> f64 {
    let loaders_mod = (loaders.max(1) as f64).powf(0.25);
    let volume = shell_volume(diameter, length);
    if belt {
        10.0 * loaders_mod * volume.sqrt()
    } else {
        50.0 * loaders_mod * (volume / clips.max(1) as f64).sqrt()
    }
}

/// Barrel cooldown after a shot with `coolers` cooling units attached.
#[must_use]
pub fn barrel_cooldown(diameter: f64, propellant: u32, coolers: f64) -> f64 {
    6.0 * (5.0 * diameter).powf(1.5) * (propellant as f64).sqrt() * 0.92_f64.powf(coolers)
}

/// Coolers needed for the barrel to keep up with `period`.
///
/// Zero without propellant; negative when no cooling is needed.
#[must_use]
pub fn coolers_needed(diameter: f64, propellant: u32, period: f64) -> f64 {
    if propellant == 0 {
        return 0.0;
    }
    (period / barrel_cooldown(diameter, propellant, 0.0)).log(0.92)
}

/// Total inaccuracy in degrees.
///
/// A barrel fully consumed by propellant gives 0.
#[must_use]
pub fn accuracy(diameter: f64, length: f64, propellant: u32, barrel: f64, acc_charge: f64) -> f64 {
    let free_barrel = barrel - propellant as f64 * diameter;
    let base = if free_barrel > 0.0 {
        4.0 * length * diameter.sqrt() / free_barrel
    } else {
        0.0
    };
    base / (1.0 + 0.001 * acc_charge / (length * diameter))
}

/// Armor piercing of the shell body at `velocity`.
#[must_use]
pub fn base_ap(armor_c: f64, velocity: f64) -> f64 {
    0.01 * armor_c * velocity
}

/// Kinetic damage.
#[must_use]
pub fn kinetic_damage(diameter: f64, shell_modules: u32, kinetic_c: f64, velocity: f64) -> f64 {
    1.25 * kinetic_c * velocity * gauge_factor(diameter) * (shell_modules as f64).powf(0.65)
}

/// Explosive damage of `explosive` HE modules.
#[must_use]
pub fn explosive_damage(diameter: f64, explosive: u32) -> f64 {
    500.0 * gauge_factor(diameter) * (explosive as f64).powf(0.65)
}

/// Flak damage of `flak` flak modules.
#[must_use]
pub fn flak_damage(diameter: f64, flak: u32) -> f64 {
    250.0 * gauge_factor(diameter) * (flak as f64).powf(0.65)
}

/// Fragments released per frag module.
#[must_use]
pub fn fragment_count(diameter: f64) -> f64 {
    10.0 * (diameter.powi(2) / 0.008).powf(0.65)
}

/// Damage of a single fragment.
#[must_use]
pub fn fragment_damage(diameter: f64) -> f64 {
    200.0 * (5.0 * diameter).sqrt()
}

/// Total fragment damage of `frags` frag modules.
#[must_use]
pub fn total_fragment_damage(diameter: f64, frags: u32) -> f64 {
    fragment_count(diameter) * fragment_damage(diameter) * frags as f64
}

/// Squash head damage: `(thump, spall)` as (value, armor-piercing) pairs.
///
/// Spall particles deal 200 each, their count is the spalling metric divided
/// by the armor passed through, and they pierce twice that armor.
#[must_use]
pub fn squash_damage(diameter: f64, explosive: u32, armor: f64) -> ((f64, f64), (f64, f64)) {
    let metric = gauge_factor(diameter) * (explosive as f64).powf(0.65);
    let thump = 400.0 * metric;
    let spalls = 15.0 * metric / armor;
    ((thump, FRAGMENT_AP), (spalls * 200.0, 2.0 * armor))
}

/// Rough block count of the whole cannon.
///
/// Each loader is `ceil(length)` blocks long plus the same again per clip;
/// coolers, barrel segments and the firing piece are added on top. Huge
/// cannons saturate at `u32::MAX`.
#[must_use]
pub fn block_count(length: f64, loaders: u32, clips: u32, coolers: f64, barrel: f64) -> u32 {
    let loader_blocks = length.ceil().max(1.0) as u32;
    let loading = loaders
        .max(1)
        .saturating_mul(loader_blocks)
        .saturating_mul(clips.saturating_add(1));
    let cooling = coolers.max(0.0).ceil() as u32;
    let barrel_blocks = barrel.max(0.0).ceil() as u32;
    loading
        .saturating_add(cooling)
        .saturating_add(barrel_blocks)
        .saturating_add(1)
}
