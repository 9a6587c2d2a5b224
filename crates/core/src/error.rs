//! Error types shared across the flowfield crates.

use thiserror::Error;

/// Errors produced by effect construction, configuration, and snapshots.
#[derive(Debug, Error)]
pub enum EffectError {
    /// Width or height was zero, or `width * height` overflowed, where a
    /// real pixel area is required (recipes, snapshots).
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A requested effect name was not found in the registry.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// A requested noise oracle name was not recognized.
    #[error("unknown oracle: {0}")]
    UnknownOracle(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A color set could not be constructed from the given colors.
    #[error("invalid color set: {0}")]
    InvalidColorSet(String),

    /// An I/O failure while writing a snapshot.
    #[error("io error: {0}")]
    Io(String),
}
