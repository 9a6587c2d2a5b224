//! Particle state and the boundary policies that recycle it.
//!
//! A particle is plain data mutated in place by exactly one writer (the
//! frame tick), so there is no interior mutability and no locking anywhere.

use glam::DVec2;

use crate::color::Rgba;

/// A single moving dot.
///
/// `vel` is the per-frame displacement at speed 1; `speed` scales it.
/// Flow-style effects rewrite `vel` from a noise heading every frame,
/// drift-style effects fix it at spawn time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub speed: f64,
    pub size: f64,
    pub color: Rgba,
}

impl Particle {
    /// Points the particle along `theta` (unit displacement).
    pub fn set_heading(&mut self, theta: f64) {
        self.vel = DVec2::new(theta.cos(), theta.sin());
    }

    /// Advances one frame: `pos += vel * speed`.
    pub fn step(&mut self) {
        self.pos += self.vel * self.speed;
    }

    /// Applies the toroidal reset-to-edge policy on both axes.
    pub fn wrap(&mut self, bounds: DVec2) {
        self.pos.x = wrap_edge(self.pos.x, bounds.x);
        self.pos.y = wrap_edge(self.pos.y, bounds.y);
    }
}

/// Toroidal wrap with reset-to-edge semantics.
///
/// A coordinate reaching or passing `dim` resets to exactly `0.0`, not the
/// modulo remainder, so `800.5` on an 800-wide surface re-enters at `0.0`,
/// not `0.5`. A coordinate below `0.0` re-enters from the far side at
/// `rem_euclid(dim)`, which keeps the result inside the half-open interval
/// `[0, dim)`. A non-positive `dim` (collapsed surface) pins everything to
/// the origin.
pub fn wrap_edge(coord: f64, dim: f64) -> f64 {
    if dim <= 0.0 {
        0.0
    } else if coord >= dim {
        0.0
    } else if coord < 0.0 {
        coord.rem_euclid(dim)
    } else {
        coord
    }
}
