#![deny(unsafe_code)]
//! Noise-field trail effect.
//!
//! A fixed pool of particles drifts through a smooth noise field: each
//! frame a particle samples the field at its own (scaled) position, turns
//! the sample into a heading, and takes one step. Instead of clearing, the
//! frame starts with a low-alpha wash of the background so previous frames
//! linger as motion trails. Particles leaving the surface re-enter from
//! the opposite edge; nothing is ever spawned or destroyed after startup.

use flowfield_core::error::EffectError;
use flowfield_core::oracle::{NoiseOracle, OracleKind};
use flowfield_core::params::{param_bool, param_color, param_colors, param_f64, param_string, param_usize};
use flowfield_core::particle::Particle;
use flowfield_core::prng::Xorshift64;
use flowfield_core::surface::Surface;
use flowfield_core::{ColorSet, Effect, Rgba};
use glam::DVec2;
use serde_json::{json, Value};

/// Default pool size.
const DEFAULT_COUNT: usize = 400;
/// Default spatial frequency applied to particle coordinates before sampling.
const DEFAULT_FREQUENCY: f64 = 0.002;
/// Default wash opacity per frame.
const DEFAULT_FADE: f64 = 0.05;
/// Default per-particle speed range.
const DEFAULT_SPEED_MIN: f64 = 1.0;
const DEFAULT_SPEED_MAX: f64 = 1.0;
/// Default particle size (<= 1 paints a single pixel).
const DEFAULT_SIZE: f64 = 1.0;
/// Default time advance per frame (0 keeps the field static).
const DEFAULT_TIME_SCALE: f64 = 0.0;

/// Tunables for the flow effect.
///
/// [`Default`] gives the classic look: 400 white single-pixel particles on
/// black with a 0.05 trail wash and a static simplex field.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowParams {
    /// Pool size, fixed for the life of the effect.
    pub count: usize,
    /// Spatial frequency: positions are scaled by this before sampling.
    pub frequency: f64,
    /// Wash opacity per frame; lower values leave longer trails.
    pub fade: f64,
    /// Per-particle speed multiplier range.
    pub speed_min: f64,
    pub speed_max: f64,
    /// Particle size; values above 1 paint filled discs.
    pub size: f64,
    /// Time advance per frame for the oracle's third argument.
    pub time_scale: f64,
    /// Trail wash when true, opaque clear when false.
    pub trails: bool,
    /// Background color for the wash/clear.
    pub background: Rgba,
    /// Colors drawn per particle at spawn.
    pub colors: ColorSet,
    /// Which noise backend steers the field.
    pub oracle: OracleKind,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            frequency: DEFAULT_FREQUENCY,
            fade: DEFAULT_FADE,
            speed_min: DEFAULT_SPEED_MIN,
            speed_max: DEFAULT_SPEED_MAX,
            size: DEFAULT_SIZE,
            time_scale: DEFAULT_TIME_SCALE,
            trails: true,
            background: Rgba::BLACK,
            colors: ColorSet::mono(),
            oracle: OracleKind::Simplex,
        }
    }
}

impl FlowParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing keys. `colors` (hex array) wins over `color_set` (name) when
    /// both are present. Present-but-invalid colors, set names, and oracle
    /// names are errors.
    pub fn from_json(params: &Value) -> Result<Self, EffectError> {
        let defaults = Self::default();
        let colors = match param_colors(params, "colors")? {
            Some(list) => ColorSet::new(list)?,
            None => match params.get("color_set").and_then(Value::as_str) {
                Some(name) => ColorSet::from_name(name)?,
                None => defaults.colors,
            },
        };
        let oracle = OracleKind::from_name(&param_string(
            params,
            "oracle",
            defaults.oracle.name(),
        ))?;
        Ok(Self {
            count: param_usize(params, "count", defaults.count),
            frequency: param_f64(params, "frequency", defaults.frequency),
            fade: param_f64(params, "fade", defaults.fade).clamp(0.0, 1.0),
            speed_min: param_f64(params, "speed_min", defaults.speed_min),
            speed_max: param_f64(params, "speed_max", defaults.speed_max),
            size: param_f64(params, "size", defaults.size),
            time_scale: param_f64(params, "time_scale", defaults.time_scale),
            trails: param_bool(params, "trails", defaults.trails),
            background: param_color(params, "background", defaults.background)?,
            colors,
            oracle,
        })
    }
}

/// The noise-field trail effect.
pub struct Flow {
    params: FlowParams,
    oracle: Box<dyn NoiseOracle>,
    pool: Vec<Particle>,
    time: f64,
}

impl Flow {
    /// Creates the effect and spawns the whole pool inside `width x height`.
    ///
    /// Zero dimensions are tolerated: every particle lands at the origin
    /// and stays there until the surface grows.
    pub fn new(width: usize, height: usize, seed: u64, params: FlowParams) -> Self {
        let oracle = params.oracle.build(seed);
        Self::with_oracle(width, height, seed, params, oracle)
    }

    /// Like [`Flow::new`] but with a caller-supplied oracle. The seed still
    /// drives pool placement.
    pub fn with_oracle(
        width: usize,
        height: usize,
        seed: u64,
        params: FlowParams,
        oracle: Box<dyn NoiseOracle>,
    ) -> Self {
        let mut rng = Xorshift64::new(seed);
        let bounds = DVec2::new(width as f64, height as f64);
        let pool = (0..params.count)
            .map(|_| spawn(bounds, &mut rng, &params))
            .collect();
        Self {
            params,
            oracle,
            pool,
            time: 0.0,
        }
    }

    /// Creates the effect from a JSON params object.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EffectError> {
        Ok(Self::new(width, height, seed, FlowParams::from_json(params)?))
    }

    /// Current oracle time parameter.
    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Places one particle uniformly inside `bounds`, drawing speed and color
/// from the configured ranges. Used only at startup: the wrap policy
/// recycles particles without respawning them.
fn spawn(bounds: DVec2, rng: &mut Xorshift64, params: &FlowParams) -> Particle {
    let pos = DVec2::new(
        rng.next_range(0.0, bounds.x.max(0.0)),
        rng.next_range(0.0, bounds.y.max(0.0)),
    );
    let speed = rng.next_range(params.speed_min, params.speed_max);
    let color = params.colors.pick(rng);
    Particle {
        pos,
        vel: DVec2::ZERO,
        speed,
        size: params.size,
        color,
    }
}

impl Effect for Flow {
    fn tick(&mut self, surface: &mut Surface) -> Result<(), EffectError> {
        let bounds = DVec2::new(surface.width() as f64, surface.height() as f64);
        if self.params.trails {
            surface.wash(self.params.background.with_alpha(self.params.fade));
        } else {
            surface.fill(self.params.background);
        }
        let freq = self.params.frequency;
        for p in &mut self.pool {
            let theta = self
                .oracle
                .angle(p.pos.x * freq, p.pos.y * freq, self.time);
            p.set_heading(theta);
            p.step();
            p.wrap(bounds);
            surface.paint(p);
        }
        self.time += self.params.time_scale;
        Ok(())
    }

    fn params(&self) -> Value {
        json!({
            "count": self.params.count,
            "frequency": self.params.frequency,
            "fade": self.params.fade,
            "speed_min": self.params.speed_min,
            "speed_max": self.params.speed_max,
            "size": self.params.size,
            "time_scale": self.params.time_scale,
            "trails": self.params.trails,
            "background": self.params.background.to_hex(),
            "colors": self.params.colors.colors().iter().map(|c| c.to_hex()).collect::<Vec<_>>(),
            "oracle": self.params.oracle.name(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 1,
                "max": 10000,
                "description": "Number of particles in the pool"
            },
            "frequency": {
                "type": "number",
                "default": DEFAULT_FREQUENCY,
                "min": 0.0001,
                "max": 0.1,
                "description": "Spatial frequency applied to positions before sampling the field"
            },
            "fade": {
                "type": "number",
                "default": DEFAULT_FADE,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-frame wash opacity; lower leaves longer trails"
            },
            "speed_min": {
                "type": "number",
                "default": DEFAULT_SPEED_MIN,
                "min": 0.0,
                "max": 10.0,
                "description": "Lower bound of the per-particle speed range"
            },
            "speed_max": {
                "type": "number",
                "default": DEFAULT_SPEED_MAX,
                "min": 0.0,
                "max": 10.0,
                "description": "Upper bound of the per-particle speed range"
            },
            "size": {
                "type": "number",
                "default": DEFAULT_SIZE,
                "min": 0.5,
                "max": 16.0,
                "description": "Particle size; above 1 paints filled discs"
            },
            "time_scale": {
                "type": "number",
                "default": DEFAULT_TIME_SCALE,
                "min": 0.0,
                "max": 1.0,
                "description": "Oracle time advance per frame; 0 keeps the field static"
            },
            "trails": {
                "type": "boolean",
                "default": true,
                "description": "Trail wash when true, opaque clear when false"
            },
            "background": {
                "type": "string",
                "default": "#000000",
                "description": "Background hex color"
            },
            "colors": {
                "type": "array",
                "default": ["#ffffff"],
                "description": "Hex colors drawn per particle at spawn"
            },
            "oracle": {
                "type": "string",
                "default": "simplex",
                "description": "Noise backend: simplex or perlin"
            }
        })
    }

    fn particles(&self) -> &[Particle] {
        &self.pool
    }
}
