#![deny(unsafe_code)]
//! Ambient floating-particle effect.
//!
//! Soft translucent dots rise slowly with a slight horizontal sway. The
//! frame starts from an opaque clear, so there are no trails. A particle that
//! leaves the surface (plus a margin) is re-rolled in place by the same
//! spawn function that built the pool, so the pool never changes size.

use flowfield_core::error::EffectError;
use flowfield_core::params::{param_color, param_f64, param_usize};
use flowfield_core::particle::Particle;
use flowfield_core::prng::Xorshift64;
use flowfield_core::surface::Surface;
use flowfield_core::{Effect, Rgba};
use glam::DVec2;
use serde_json::{json, Value};

/// Default pool size.
const DEFAULT_COUNT: usize = 50;
/// Default dot radius range.
const DEFAULT_SIZE_MIN: f64 = 1.0;
const DEFAULT_SIZE_MAX: f64 = 3.0;
/// Default speed range: horizontal sway amplitude and upward drift.
const DEFAULT_SPEED_MIN: f64 = 0.2;
const DEFAULT_SPEED_MAX: f64 = 0.8;
/// Default per-particle opacity range.
const DEFAULT_OPACITY_MIN: f64 = 0.1;
const DEFAULT_OPACITY_MAX: f64 = 0.4;
/// Default dot color (the site accent).
const DEFAULT_COLOR: &str = "#818cf8";
/// How far past an edge a particle may wander before being re-rolled.
const DEFAULT_MARGIN: f64 = 10.0;

/// Tunables for the drift effect.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftParams {
    pub count: usize,
    pub size_min: f64,
    pub size_max: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    /// Base dot color; the spawn roll replaces its alpha.
    pub color: Rgba,
    /// Background painted by the per-frame clear.
    pub background: Rgba,
    /// Exit margin around the surface before a particle is re-rolled.
    pub margin: f64,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            size_min: DEFAULT_SIZE_MIN,
            size_max: DEFAULT_SIZE_MAX,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            opacity_min: DEFAULT_OPACITY_MIN,
            opacity_max: DEFAULT_OPACITY_MAX,
            color: Rgba::from_hex(DEFAULT_COLOR).expect("default color hex is valid"),
            background: Rgba::TRANSPARENT,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl DriftParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// Present-but-invalid colors are errors.
    pub fn from_json(params: &Value) -> Result<Self, EffectError> {
        let defaults = Self::default();
        Ok(Self {
            count: param_usize(params, "count", defaults.count),
            size_min: param_f64(params, "size_min", defaults.size_min),
            size_max: param_f64(params, "size_max", defaults.size_max),
            speed_min: param_f64(params, "speed_min", defaults.speed_min),
            speed_max: param_f64(params, "speed_max", defaults.speed_max),
            opacity_min: param_f64(params, "opacity_min", defaults.opacity_min),
            opacity_max: param_f64(params, "opacity_max", defaults.opacity_max),
            color: param_color(params, "color", defaults.color)?,
            background: param_color(params, "background", defaults.background)?,
            margin: param_f64(params, "margin", defaults.margin),
        })
    }
}

/// The floating ambient effect.
pub struct Drift {
    params: DriftParams,
    pool: Vec<Particle>,
    rng: Xorshift64,
}

impl Drift {
    /// Creates the effect and spawns the whole pool inside `width x height`.
    /// Zero dimensions are tolerated (everything spawns at the origin).
    pub fn new(width: usize, height: usize, seed: u64, params: DriftParams) -> Self {
        let mut rng = Xorshift64::new(seed);
        let bounds = DVec2::new(width as f64, height as f64);
        let pool = (0..params.count)
            .map(|_| spawn(bounds, &mut rng, &params))
            .collect();
        Self { params, pool, rng }
    }

    /// Creates the effect from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EffectError> {
        Ok(Self::new(width, height, seed, DriftParams::from_json(params)?))
    }
}

/// Rolls one particle: uniform position, size, opacity, upward velocity
/// with horizontal sway. The single spawn point for both initialization
/// and out-of-bounds recycling.
fn spawn(bounds: DVec2, rng: &mut Xorshift64, params: &DriftParams) -> Particle {
    let pos = DVec2::new(
        rng.next_range(0.0, bounds.x.max(0.0)),
        rng.next_range(0.0, bounds.y.max(0.0)),
    );
    let size = rng.next_range(params.size_min, params.size_max);
    let sway = (rng.next_f64() - 0.5) * params.speed_max;
    let rise = -params.speed_min - rng.next_f64() * (params.speed_max - params.speed_min);
    let alpha = rng.next_range(params.opacity_min, params.opacity_max);
    Particle {
        pos,
        vel: DVec2::new(sway, rise),
        speed: 1.0,
        size,
        color: params.color.with_alpha(alpha),
    }
}

/// True once a particle has wandered `margin` past the top or either side.
/// The bottom is open: the default velocity always rises.
fn out_of_bounds(pos: DVec2, bounds: DVec2, margin: f64) -> bool {
    pos.y < -margin || pos.x < -margin || pos.x > bounds.x + margin
}

impl Effect for Drift {
    fn tick(&mut self, surface: &mut Surface) -> Result<(), EffectError> {
        let bounds = DVec2::new(surface.width() as f64, surface.height() as f64);
        surface.fill(self.params.background);
        let Self { params, pool, rng } = self;
        for p in pool.iter_mut() {
            p.step();
            if out_of_bounds(p.pos, bounds, params.margin) {
                *p = spawn(bounds, rng, params);
            }
            surface.paint(p);
        }
        Ok(())
    }

    fn params(&self) -> Value {
        json!({
            "count": self.params.count,
            "size_min": self.params.size_min,
            "size_max": self.params.size_max,
            "speed_min": self.params.speed_min,
            "speed_max": self.params.speed_max,
            "opacity_min": self.params.opacity_min,
            "opacity_max": self.params.opacity_max,
            "color": self.params.color.to_hex(),
            "background": self.params.background.to_hex(),
            "margin": self.params.margin,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 1,
                "max": 1000,
                "description": "Number of particles in the pool"
            },
            "size_min": {
                "type": "number",
                "default": DEFAULT_SIZE_MIN,
                "min": 0.5,
                "max": 16.0,
                "description": "Lower bound of the dot radius range"
            },
            "size_max": {
                "type": "number",
                "default": DEFAULT_SIZE_MAX,
                "min": 0.5,
                "max": 16.0,
                "description": "Upper bound of the dot radius range"
            },
            "speed_min": {
                "type": "number",
                "default": DEFAULT_SPEED_MIN,
                "min": 0.0,
                "max": 10.0,
                "description": "Minimum upward drift per frame"
            },
            "speed_max": {
                "type": "number",
                "default": DEFAULT_SPEED_MAX,
                "min": 0.0,
                "max": 10.0,
                "description": "Maximum upward drift per frame; also the sway amplitude"
            },
            "opacity_min": {
                "type": "number",
                "default": DEFAULT_OPACITY_MIN,
                "min": 0.0,
                "max": 1.0,
                "description": "Lower bound of the per-particle opacity range"
            },
            "opacity_max": {
                "type": "number",
                "default": DEFAULT_OPACITY_MAX,
                "min": 0.0,
                "max": 1.0,
                "description": "Upper bound of the per-particle opacity range"
            },
            "color": {
                "type": "string",
                "default": DEFAULT_COLOR,
                "description": "Dot hex color; alpha is rolled per particle"
            },
            "background": {
                "type": "string",
                "default": "#00000000",
                "description": "Background hex color for the per-frame clear"
            },
            "margin": {
                "type": "number",
                "default": DEFAULT_MARGIN,
                "min": 0.0,
                "max": 100.0,
                "description": "Exit margin before a particle is re-rolled"
            }
        })
    }

    fn particles(&self) -> &[Particle] {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drift(width: usize, height: usize, seed: u64) -> Drift {
        Drift::new(width, height, seed, DriftParams::default())
    }

    // ---- Construction ----

    #[test]
    fn new_spawns_full_pool_with_rolled_attributes() {
        let d = drift(800, 600, 42);
        assert_eq!(d.particles().len(), DEFAULT_COUNT);
        for p in d.particles() {
            assert!((0.0..800.0).contains(&p.pos.x));
            assert!((0.0..600.0).contains(&p.pos.y));
            assert!((DEFAULT_SIZE_MIN..DEFAULT_SIZE_MAX).contains(&p.size));
            assert!(
                (DEFAULT_OPACITY_MIN..DEFAULT_OPACITY_MAX).contains(&p.color.a),
                "opacity = {}",
                p.color.a
            );
        }
    }

    #[test]
    fn spawned_particles_always_rise() {
        let d = drift(640, 480, 7);
        for p in d.particles() {
            assert!(p.vel.y <= -DEFAULT_SPEED_MIN, "vy = {}", p.vel.y);
            assert!(p.vel.y >= -DEFAULT_SPEED_MAX, "vy = {}", p.vel.y);
            assert!(p.vel.x.abs() <= DEFAULT_SPEED_MAX / 2.0, "vx = {}", p.vel.x);
        }
    }

    #[test]
    fn zero_size_bounds_spawn_at_origin() {
        let d = drift(0, 0, 42);
        assert!(d.particles().iter().all(|p| p.pos == DVec2::ZERO));
    }

    #[test]
    fn same_seed_same_pool() {
        assert_eq!(drift(320, 240, 5).particles(), drift(320, 240, 5).particles());
    }

    // ---- Params ----

    #[test]
    fn from_json_empty_uses_defaults() {
        let p = DriftParams::from_json(&json!({})).unwrap();
        assert_eq!(p, DriftParams::default());
    }

    #[test]
    fn from_json_extracts_custom_values() {
        let p = DriftParams::from_json(&json!({
            "count": 80,
            "size_min": 2.0,
            "size_max": 5.0,
            "color": "#34d399",
            "margin": 20.0,
        }))
        .unwrap();
        assert_eq!(p.count, 80);
        assert!((p.size_max - 5.0).abs() < f64::EPSILON);
        assert_eq!(p.color.to_hex(), "#34d399");
        assert!((p.margin - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_json_rejects_bad_color() {
        assert!(DriftParams::from_json(&json!({"color": "indigoish"})).is_err());
    }

    #[test]
    fn params_round_trip_through_from_json() {
        let d = drift(64, 64, 42);
        let p = DriftParams::from_json(&d.params()).unwrap();
        assert_eq!(p, DriftParams::default());
    }

    #[test]
    fn param_schema_covers_all_params_keys() {
        let d = drift(16, 16, 42);
        let schema = d.param_schema();
        for key in d.params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }

    // ---- Stepping ----

    #[test]
    fn tick_moves_every_particle_by_its_velocity() {
        let mut d = drift(400, 300, 42);
        let before: Vec<Particle> = d.particles().to_vec();
        let mut surface = Surface::new(400, 300);
        d.tick(&mut surface).unwrap();
        for (prev, now) in before.iter().zip(d.particles()) {
            if out_of_bounds(prev.pos + prev.vel, DVec2::new(400.0, 300.0), DEFAULT_MARGIN) {
                continue; // re-rolled
            }
            assert!((now.pos - (prev.pos + prev.vel)).length() < 1e-12);
        }
    }

    #[test]
    fn pool_cardinality_is_constant() {
        let mut d = drift(64, 64, 42);
        let mut surface = Surface::new(64, 64);
        for _ in 0..500 {
            d.tick(&mut surface).unwrap();
            assert_eq!(d.particles().len(), DEFAULT_COUNT);
        }
    }

    #[test]
    fn escaped_particle_is_rerolled_inside_bounds() {
        let mut d = drift(100, 100, 42);
        d.pool[0].pos = DVec2::new(50.0, -DEFAULT_MARGIN - 1.0);
        let mut surface = Surface::new(100, 100);
        d.tick(&mut surface).unwrap();
        let p = &d.particles()[0];
        assert!((0.0..100.0).contains(&p.pos.x), "x = {}", p.pos.x);
        assert!((0.0..100.0).contains(&p.pos.y), "y = {}", p.pos.y);
    }

    #[test]
    fn particles_inside_margin_are_kept() {
        let mut d = drift(100, 100, 42);
        d.pool[0].pos = DVec2::new(50.0, -1.0);
        d.pool[0].vel = DVec2::new(0.0, -0.5);
        let size_before = d.pool[0].size;
        let mut surface = Surface::new(100, 100);
        d.tick(&mut surface).unwrap();
        // still within the margin band: same particle, just higher
        assert_eq!(d.particles()[0].size, size_before);
        assert!((d.particles()[0].pos.y - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn frame_starts_from_a_clean_slate() {
        let params = DriftParams {
            count: 1,
            ..DriftParams::default()
        };
        let mut d = Drift::new(100, 100, 42, params);
        let mut surface = Surface::new(100, 100);
        surface.fill(Rgba::WHITE); // stale content from a previous owner
        d.tick(&mut surface).unwrap();
        // one dot of radius <= 3: everything else must be cleared
        let painted = surface
            .data()
            .chunks_exact(4)
            .filter(|px| px[3] != 0)
            .count();
        assert!(painted <= 64, "clear left {painted} stale pixels behind");
    }

    #[test]
    fn same_seed_identical_pixels_after_ten_frames() {
        let mut a = drift(64, 64, 99);
        let mut b = drift(64, 64, 99);
        let mut sa = Surface::new(64, 64);
        let mut sb = Surface::new(64, 64);
        for _ in 0..10 {
            a.tick(&mut sa).unwrap();
            b.tick(&mut sb).unwrap();
        }
        assert_eq!(sa.data(), sb.data());
    }

    #[test]
    fn zero_size_surface_tick_is_harmless() {
        let mut d = drift(0, 0, 42);
        let mut surface = Surface::new(0, 0);
        for _ in 0..10 {
            d.tick(&mut surface).unwrap();
        }
        assert_eq!(d.particles().len(), DEFAULT_COUNT);
    }

    // ---- Property-based ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(16))]

            #[test]
            fn pool_never_changes_size(seed: u64) {
                let mut d = drift(48, 48, seed);
                let mut surface = Surface::new(48, 48);
                for _ in 0..100 {
                    d.tick(&mut surface).unwrap();
                    prop_assert_eq!(d.particles().len(), DEFAULT_COUNT);
                }
            }

            #[test]
            fn particles_never_left_far_outside(seed: u64) {
                let mut d = drift(48, 48, seed);
                let mut surface = Surface::new(48, 48);
                for _ in 0..100 {
                    d.tick(&mut surface).unwrap();
                    for p in d.particles() {
                        // after recycling, nothing sits beyond margin + one step
                        prop_assert!(p.pos.y > -(DEFAULT_MARGIN + DEFAULT_SPEED_MAX));
                        prop_assert!(p.pos.x > -(DEFAULT_MARGIN + DEFAULT_SPEED_MAX));
                        prop_assert!(p.pos.x < 48.0 + DEFAULT_MARGIN + DEFAULT_SPEED_MAX);
                    }
                }
            }
        }
    }
}
