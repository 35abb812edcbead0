//! Position-weighted shell modifiers.
//!
//! Parts nearer the front of a shell dominate its modifiers. Each position
//! `i` before the first casing gets weight `ratio^i`; the modifier is the
//! weighted mean of the part coefficients. Short shells are padded with
//! virtual 0.5-coefficient modules, so a one-part shell never gets the full
//! coefficient of its only part.

use crate::parts::ShellPart;

/// Weight ratio between consecutive positions.
pub const DECAY_RATIO: f64 = 0.75;

/// Shells shorter than this are padded up to it.
pub const MIN_WEIGHTED_MODULES: usize = 3;

/// Coefficient of a padding position.
pub const PAD_COEFFICIENT: f64 = 0.5;

/// Number of modules in front of the first casing.
#[must_use]
pub fn effective_size(shell: &[ShellPart]) -> usize {
    shell
        .iter()
        .position(|p| p.is_casing())
        .unwrap_or(shell.len())
}

/// Weighted mean of `coefficient` over the non-casing front of `shell`.
///
/// `pad_to` is the minimum number of positions; missing ones use
/// [`PAD_COEFFICIENT`]. An empty sum yields 1.0.
#[must_use]
pub fn weighted_modifier(
    shell: &[ShellPart],
    coefficient: impl Fn(ShellPart) -> f64,
    ratio: f64,
    pad_to: usize,
) -> f64 {
    let size = effective_size(shell);
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    let mut weight = 1.0;
    for i in 0..size.max(pad_to) {
        let value = if i < size {
            coefficient(shell[i])
        } else {
            PAD_COEFFICIENT
        };
        numerator += value * weight;
        denominator += weight;
        weight *= ratio;
    }
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}

/// Speed modifier: decaying weights, no padding.
#[must_use]
pub fn speed_modifier(shell: &[ShellPart]) -> f64 {
    weighted_modifier(shell, ShellPart::speed_modifier, DECAY_RATIO, 0)
}

/// Armor-piercing modifier: decaying weights, padded to three positions.
#[must_use]
pub fn ap_modifier(shell: &[ShellPart]) -> f64 {
    weighted_modifier(
        shell,
        ShellPart::ap_modifier,
        DECAY_RATIO,
        MIN_WEIGHTED_MODULES,
    )
}

/// Kinetic modifier: flat weights, padded to three positions.
#[must_use]
pub fn kinetic_modifier(shell: &[ShellPart]) -> f64 {
    weighted_modifier(shell, ShellPart::kinetic_modifier, 1.0, MIN_WEIGHTED_MODULES)
}
