//! Discrete color sets for particle tinting.
//!
//! The effects pick whole colors, they never blend between stops, so a set
//! is just a non-empty list sampled uniformly at spawn time.

use crate::color::Rgba;
use crate::error::EffectError;
use crate::prng::Xorshift64;

/// Names of all built-in color sets.
const SET_NAMES: &[&str] = &["mono", "indigo", "ember", "aurora"];

/// A non-empty set of colors sampled uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSet {
    colors: Vec<Rgba>,
}

impl ColorSet {
    /// Creates a color set. Requires at least one color.
    pub fn new(colors: Vec<Rgba>) -> Result<Self, EffectError> {
        if colors.is_empty() {
            return Err(EffectError::InvalidColorSet(
                "a color set requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Creates a color set by parsing hex strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, EffectError> {
        let colors: Result<Vec<Rgba>, EffectError> =
            hexes.iter().map(|h| Rgba::from_hex(h)).collect();
        Self::new(colors?)
    }

    /// Resolves a built-in set by name.
    pub fn from_name(name: &str) -> Result<Self, EffectError> {
        match name {
            "mono" => Ok(Self::mono()),
            "indigo" => Ok(Self::indigo()),
            "ember" => Ok(Self::ember()),
            "aurora" => Ok(Self::aurora()),
            _ => Err(EffectError::InvalidColorSet(format!(
                "unknown color set: {name}"
            ))),
        }
    }

    /// Returns a slice of all built-in set names.
    pub fn list_names() -> &'static [&'static str] {
        SET_NAMES
    }

    /// Plain white, the flow default.
    pub fn mono() -> Self {
        Self {
            colors: vec![Rgba::WHITE],
        }
    }

    /// The site accent and its neighbors.
    pub fn indigo() -> Self {
        Self::from_hex(&["#818cf8", "#a5b4fc", "#6366f1"])
            .expect("indigo color set hex values are valid")
    }

    pub fn ember() -> Self {
        Self::from_hex(&["#f97316", "#fb923c", "#fde68a"])
            .expect("ember color set hex values are valid")
    }

    pub fn aurora() -> Self {
        Self::from_hex(&["#34d399", "#22d3ee", "#818cf8"])
            .expect("aurora color set hex values are valid")
    }

    /// Number of colors in the set.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Read-only access to the colors.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Draws one color uniformly at random.
    pub fn pick(&self, rng: &mut Xorshift64) -> Rgba {
        self.colors[rng.next_usize(self.colors.len())]
    }
}
