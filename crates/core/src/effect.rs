//! The `Effect` trait every particle effect implements.
//!
//! The trait is object-safe so the frame loop can drive any effect as a
//! `Box<dyn Effect>` and the registry can switch implementations by name.

use serde_json::Value;

use crate::error::EffectError;
use crate::particle::Particle;
use crate::surface::Surface;

/// A frame-driven particle effect.
///
/// One `tick` is one animation frame: the effect repaints the surface and
/// advances its pool in place. The surface is passed in because the host
/// owns it: a viewport resize swaps the surface dimensions between ticks
/// without the effect's involvement, and the pool coordinates are expected
/// to re-enter the new bounds on their own.
pub trait Effect {
    /// Renders one frame onto `surface` and advances the pool.
    ///
    /// An error means the effect is broken and should stop being ticked;
    /// it must never take the host down with it.
    fn tick(&mut self, surface: &mut Surface) -> Result<(), EffectError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Read-only view of the particle pool. The pool has fixed cardinality:
    /// it is created once and never grows or shrinks.
    fn particles(&self) -> &[Particle];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use glam::DVec2;
    use serde_json::json;

    /// Minimal effect used to verify trait object safety.
    struct MockEffect {
        pool: Vec<Particle>,
        ticks: usize,
    }

    impl MockEffect {
        fn new() -> Self {
            Self {
                pool: vec![Particle {
                    pos: DVec2::ZERO,
                    vel: DVec2::new(1.0, 0.0),
                    speed: 1.0,
                    size: 1.0,
                    color: Rgba::WHITE,
                }],
                ticks: 0,
            }
        }
    }

    impl Effect for MockEffect {
        fn tick(&mut self, surface: &mut Surface) -> Result<(), EffectError> {
            self.ticks += 1;
            for p in &mut self.pool {
                p.step();
                surface.paint(p);
            }
            Ok(())
        }

        fn params(&self) -> Value {
            json!({"ticks": self.ticks})
        }

        fn param_schema(&self) -> Value {
            json!({
                "ticks": {
                    "type": "integer",
                    "default": 0,
                    "description": "Number of frames rendered"
                }
            })
        }

        fn particles(&self) -> &[Particle] {
            &self.pool
        }
    }

    #[test]
    fn effect_trait_is_object_safe() {
        let effect: Box<dyn Effect> = Box::new(MockEffect::new());
        assert_eq!(effect.particles().len(), 1);
    }

    #[test]
    fn tick_advances_state() {
        let mut effect = MockEffect::new();
        let mut surface = Surface::new(8, 8);
        effect.tick(&mut surface).unwrap();
        effect.tick(&mut surface).unwrap();
        assert_eq!(effect.params()["ticks"], 2);
        assert!((effect.particles()[0].pos.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn dyn_effect_mut_reference_works() {
        let mut effect = MockEffect::new();
        let effect_ref: &mut dyn Effect = &mut effect;
        let mut surface = Surface::new(4, 4);
        effect_ref.tick(&mut surface).unwrap();
        assert_eq!(effect_ref.params()["ticks"], 1);
    }

    #[test]
    fn schema_has_expected_structure() {
        let effect = MockEffect::new();
        let schema = effect.param_schema();
        assert!(schema.get("ticks").is_some());
        assert_eq!(schema["ticks"]["type"], "integer");
    }
}
