//! Immutable shell blueprints.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ShellError;
use crate::parts::ShellPart;

/// Ordered list of shell parts, front (head) to back (tail).
///
/// Blueprints are cheap to clone and cannot be mutated once built, so a
/// blueprint handed out by the generator can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<ShellPart>", into = "Vec<ShellPart>")]
pub struct Blueprint(Arc<[ShellPart]>);

impl Blueprint {
    /// Create a blueprint from parts.
    #[must_use]
    pub fn new(parts: Vec<ShellPart>) -> Self {
        Self(parts.into())
    }

    /// The parts in stacking order.
    #[must_use]
    pub fn parts(&self) -> &[ShellPart] {
        &self.0
    }
}

impl Deref for Blueprint {
    type Target = [ShellPart];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<ShellPart>> for Blueprint {
    fn from(parts: Vec<ShellPart>) -> Self {
        Self::new(parts)
    }
}

impl From<Blueprint> for Vec<ShellPart> {
    fn from(blueprint: Blueprint) -> Self {
        blueprint.0.to_vec()
    }
}

impl fmt::Display for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(part.name())?;
        }
        f.write_str("]")
    }
}

impl FromStr for Blueprint {
    type Err = ShellError;

    /// Parse a comma or whitespace separated part list, optionally in brackets.
    /// An empty list is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
        let parts = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if parts.is_empty() {
            return Err(ShellError::EmptyShell);
        }
        Ok(Self::new(parts))
    }
}
