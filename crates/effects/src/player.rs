//! The frame loop: one cooperative tick per host frame callback.
//!
//! There is no timer and no thread here. The host (CLI, embedder) calls
//! [`Player::tick`] once per frame; between calls nothing runs, which is
//! the whole concurrency story: a single writer, suspended by simply not
//! being called. Pausing means skipping ticks; resuming means calling
//! again. A tick error retires the effect without touching the host.

use flowfield_core::error::EffectError;
use flowfield_core::surface::Surface;
use flowfield_core::{Effect, Recipe};

use crate::EffectKind;

/// Drives a boxed effect against an owned surface.
pub struct Player {
    surface: Surface,
    effect: Box<dyn Effect>,
    visible: bool,
    halted: bool,
    rendered: u64,
}

impl Player {
    /// Creates a player with a fresh surface of the given viewport size.
    pub fn new(effect: Box<dyn Effect>, width: usize, height: usize) -> Self {
        Self::with_surface(Surface::new(width, height), effect)
    }

    /// Creates a player around an existing surface.
    pub fn with_surface(surface: Surface, effect: Box<dyn Effect>) -> Self {
        Self {
            surface,
            effect,
            visible: true,
            halted: false,
            rendered: 0,
        }
    }

    /// Builds a player from a validated [`Recipe`]. The recipe's frame
    /// count is not run here; callers decide when to advance.
    pub fn from_recipe(recipe: &Recipe) -> Result<Self, EffectError> {
        recipe.validate()?;
        let effect = EffectKind::from_name(
            &recipe.effect,
            recipe.width,
            recipe.height,
            recipe.seed,
            &recipe.params,
        )?;
        Ok(Self::new(Box::new(effect), recipe.width, recipe.height))
    }

    /// Renders one frame.
    ///
    /// Returns `Ok(true)` when a frame was drawn, `Ok(false)` when the
    /// player is hidden or already halted (nothing moves in either case).
    /// A tick error halts the player permanently and is returned once.
    pub fn tick(&mut self) -> Result<bool, EffectError> {
        if !self.visible || self.halted {
            return Ok(false);
        }
        match self.effect.tick(&mut self.surface) {
            Ok(()) => {
                self.rendered += 1;
                Ok(true)
            }
            Err(e) => {
                self.halted = true;
                Err(e)
            }
        }
    }

    /// Issues `frames` ticks, stopping at the first error. Returns how
    /// many frames actually rendered (hidden ticks render nothing).
    pub fn run(&mut self, frames: usize) -> Result<usize, EffectError> {
        let mut rendered = 0;
        for _ in 0..frames {
            if self.tick()? {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Updates the surface to a new viewport size. Particle coordinates
    /// are left untouched; the wrap policy pulls them back in bounds on
    /// the next frame.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.surface.resize(width, height);
    }

    /// Pauses (`false`) or resumes (`true`) the loop. While hidden, ticks
    /// are no-ops, so positions cannot drift in the background.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// True once a tick error has retired the effect.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Frames rendered so far (hidden and halted ticks excluded).
    pub fn frames_rendered(&self) -> u64 {
        self.rendered
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }
}

/// Wires an effect to a surface when one exists.
///
/// A missing surface is not an error; the effect is simply inactive,
/// mirroring a page without the target element. No log, no loop.
pub fn activate(surface: Option<Surface>, effect: Box<dyn Effect>) -> Option<Player> {
    surface.map(|s| Player::with_surface(s, effect))
}
