#![deny(unsafe_code)]
//! Effect registry and runtime for flowfield.
//!
//! This crate sits between `flowfield-core` (which defines the `Effect`
//! trait) and the individual effect crates. The CLI and tests both go
//! through [`EffectKind`] for name-based dispatch and through [`Player`]
//! for the frame loop, so neither duplicates the wiring.

pub mod player;

#[cfg(feature = "png")]
pub mod snapshot;

use flowfield_core::error::EffectError;
use flowfield_core::particle::Particle;
use flowfield_core::surface::Surface;
use flowfield_core::Effect;
use serde_json::Value;

pub use player::{activate, Player};

/// All available effect names.
const EFFECT_NAMES: &[&str] = &["flow", "drift"];

/// Enumeration of the available particle effects.
///
/// Wraps each implementation and delegates the `Effect` trait methods.
/// Use [`EffectKind::from_name`] for string-based construction.
pub enum EffectKind {
    /// Noise-field trail effect.
    Flow(flowfield_flow::Flow),
    /// Ambient floating-particle effect.
    Drift(flowfield_drift::Drift),
}

impl EffectKind {
    /// Constructs an effect by name.
    ///
    /// Returns `EffectError::UnknownEffect` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EffectError> {
        match name {
            "flow" => Ok(EffectKind::Flow(flowfield_flow::Flow::from_json(
                width, height, seed, params,
            )?)),
            "drift" => Ok(EffectKind::Drift(flowfield_drift::Drift::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EffectError::UnknownEffect(name.to_string())),
        }
    }

    /// Returns a slice of all recognized effect names.
    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }
}

impl Effect for EffectKind {
    fn tick(&mut self, surface: &mut Surface) -> Result<(), EffectError> {
        match self {
            EffectKind::Flow(e) => e.tick(surface),
            EffectKind::Drift(e) => e.tick(surface),
        }
    }

    fn params(&self) -> Value {
        match self {
            EffectKind::Flow(e) => e.params(),
            EffectKind::Drift(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EffectKind::Flow(e) => e.param_schema(),
            EffectKind::Drift(e) => e.param_schema(),
        }
    }

    fn particles(&self) -> &[Particle] {
        match self {
            EffectKind::Flow(e) => e.particles(),
            EffectKind::Drift(e) => e.particles(),
        }
    }
}
