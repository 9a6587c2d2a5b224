#![deny(unsafe_code)]
//! Core types and traits for the flowfield particle renderer.
//!
//! Provides the `Effect` trait, the `Surface` pixel target, `Particle` and
//! its wrap policy, the `NoiseOracle` trait with noise-crate-backed
//! implementations, `Rgba`/`ColorSet` color handling, the `Xorshift64` PRNG,
//! `Recipe` capture specs, and JSON parameter helpers.

pub mod color;
pub mod effect;
pub mod error;
pub mod oracle;
pub mod palette;
pub mod params;
pub mod particle;
pub mod prng;
pub mod recipe;
pub mod surface;

pub use color::Rgba;
pub use effect::Effect;
pub use error::EffectError;
pub use oracle::{NoiseOracle, OracleKind};
pub use palette::ColorSet;
pub use particle::Particle;
pub use prng::Xorshift64;
pub use recipe::Recipe;
pub use surface::Surface;
