//! Crystallization progress: how close a salon is to a synthesized result.

use serde::{Deserialize, Serialize};

/// Percentage in `[0, 100]` that only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crystallization(u8);

impl Crystallization {
    pub const COMPLETE: u8 = 100;

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Advance by `delta`, clamped to 100. Returns the new value.
    pub fn advance(&mut self, delta: u8) -> u8 {
        self.0 = self.0.saturating_add(delta).min(Self::COMPLETE);
        self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 >= Self::COMPLETE
    }
}

impl std::fmt::Display for Crystallization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
