//! Noise oracles: smooth pseudo-random scalar fields that steer particles.
//!
//! An oracle maps `(x, y, t)` to a value in [-1, 1]; the renderer turns the
//! value into a heading. Oracles are built once and never mutated, so they
//! are plain shared-read values. All implementations are deterministic:
//! same inputs produce the same output.

use std::f64::consts::TAU;

use noise::{NoiseFn, OpenSimplex, Perlin};

use crate::error::EffectError;

/// A deterministic, continuous pseudo-random scalar field.
pub trait NoiseOracle: Send + Sync {
    /// Samples the field at `(x, y)` and time `t`. Values lie in [-1, 1].
    fn sample(&self, x: f64, y: f64, t: f64) -> f64;

    /// Heading derived from the sample, normalized into [0, 2π).
    fn angle(&self, x: f64, y: f64, t: f64) -> f64 {
        (self.sample(x, y, t) * TAU).rem_euclid(TAU)
    }
}

/// OpenSimplex-backed oracle. The default: artifact-free and smooth.
pub struct SimplexOracle {
    noise: OpenSimplex,
}

impl SimplexOracle {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
        }
    }
}

impl NoiseOracle for SimplexOracle {
    fn sample(&self, x: f64, y: f64, t: f64) -> f64 {
        self.noise.get([x, y, t]).clamp(-1.0, 1.0)
    }
}

/// Perlin-backed oracle, for the classic gradient-noise look.
pub struct PerlinOracle {
    noise: Perlin,
}

impl PerlinOracle {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }
}

impl NoiseOracle for PerlinOracle {
    fn sample(&self, x: f64, y: f64, t: f64) -> f64 {
        self.noise.get([x, y, t]).clamp(-1.0, 1.0)
    }
}

/// Oracle returning a fixed value everywhere. Every particle moves along
/// the same heading, which makes single-step motion exactly predictable.
/// The wrap and step tests are written against this stub.
pub struct ConstantOracle {
    value: f64,
}

impl ConstantOracle {
    /// Oracle whose sample is `value`, clamped to [-1, 1].
    pub fn new(value: f64) -> Self {
        Self {
            value: value.clamp(-1.0, 1.0),
        }
    }

    /// Oracle whose derived heading is exactly `theta` (taken mod 2π).
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.rem_euclid(TAU) / TAU)
    }
}

impl NoiseOracle for ConstantOracle {
    fn sample(&self, _x: f64, _y: f64, _t: f64) -> f64 {
        self.value
    }
}

/// Names of all selectable oracles.
const ORACLE_NAMES: &[&str] = &["simplex", "perlin"];

/// Selectable oracle backends, for params and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OracleKind {
    #[default]
    Simplex,
    Perlin,
}

impl OracleKind {
    /// Resolves an oracle by name.
    pub fn from_name(name: &str) -> Result<Self, EffectError> {
        match name {
            "simplex" => Ok(OracleKind::Simplex),
            "perlin" => Ok(OracleKind::Perlin),
            _ => Err(EffectError::UnknownOracle(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OracleKind::Simplex => "simplex",
            OracleKind::Perlin => "perlin",
        }
    }

    /// Returns a slice of all recognized oracle names.
    pub fn list_names() -> &'static [&'static str] {
        ORACLE_NAMES
    }

    /// Builds the oracle, folding the 64-bit recipe seed into the 32-bit
    /// seed the noise crate takes.
    pub fn build(self, seed: u64) -> Box<dyn NoiseOracle> {
        let folded = (seed & 0xffff_ffff) as u32 ^ (seed >> 32) as u32;
        match self {
            OracleKind::Simplex => Box::new(SimplexOracle::new(folded)),
            OracleKind::Perlin => Box::new(PerlinOracle::new(folded)),
        }
    }
}
