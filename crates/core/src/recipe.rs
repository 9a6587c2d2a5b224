//! Reproducible description of an effect run.
//!
//! A [`Recipe`] records everything needed to replay a render: effect name,
//! surface dimensions, parameter overrides, PRNG seed, and frame count.
//! Two identical recipes fed to the same binary produce bit-identical
//! pixels.

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

/// Everything needed to replay one render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub effect: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
}

impl Recipe {
    /// Creates a recipe with empty params (`{}`) and zero frames.
    pub fn new(effect: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            effect: effect.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
        }
    }

    /// Validates that the recipe describes a real pixel area: non-zero
    /// dimensions whose product does not overflow.
    ///
    /// A live surface may collapse to zero mid-run; a capture of nothing
    /// is a user error.
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.width == 0 || self.height == 0 {
            return Err(EffectError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EffectError::InvalidDimensions)?;
        Ok(())
    }
}
