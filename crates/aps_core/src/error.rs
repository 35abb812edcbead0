//! Error types for shell evaluation and optimization.

use thiserror::Error;

/// Result type alias using [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;

/// Top-level error type for all shell calculation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShellError {
    /// A required input was not supplied.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// A numeric input is outside its valid range.
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A damage entry is not a finite, non-negative (value, armor-piercing) pair.
    #[error("Invalid data for damage type {kind}: ({value}, {ap})")]
    InvalidDamage {
        /// Damage type label.
        kind: String,
        /// Damage value.
        value: f64,
        /// Armor-piercing value.
        ap: f64,
    },

    /// Part name not in the shell part vocabulary.
    #[error("Unknown shell part: {0}")]
    UnknownPart(String),

    /// A shell with no parts.
    #[error("Shell has no parts")]
    EmptyShell,

    /// Part configured in a zone it cannot occupy (e.g. a casing as a head).
    #[error("Part {part} cannot be used as a {role} part")]
    InvalidPartRole {
        /// Part name.
        part: String,
        /// Zone the part was configured for.
        role: &'static str,
    },

    /// Record field name that no pipeline stage provides.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl ShellError {
    /// Reject `value` unless it is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidParameter`] naming `name`.
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::InvalidParameter { name, value })
        }
    }
}
