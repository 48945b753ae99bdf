//! Configuration types for loading animation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – which animation runs and which force terms are on
//! - [`ParametersConfig`] – step size, constants, window size, seed
//! - [`BodyConfig`]       – explicitly placed disks
//! - [`SpawnConfig`]      – randomly generated disks
//! - [`PointConfig`]      – attraction points present at startup
//! - [`ObstacleConfig`]   – static circles that bounce disks
//! - [`RopeConfig`]       – verlet spring chain
//! - [`EmitterConfig`] / [`SnowConfig`] – particle effects
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section except `engine` and `parameters` may be omitted.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   mode: disks               # disks | rope | particles
//!   collisions: true
//!   pairwise_gravity: false
//!   drag: { profile: sinusoidal }
//!
//! parameters:
//!   dt: 0.01
//!   G: 100.0
//!   width: 800
//!   height: 600
//!   seed: 7
//!
//! spawn:
//!   count: 200
//!
//! attraction_points:
//!   - x: [400.0, 300.0]
//! ```

use serde::Deserialize;

use crate::simulation::engine::{DragProfile, Mode};
use crate::simulation::emitter::EmitterStyle;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModeConfig {
    Disks,
    Rope,
    Particles,
}

impl From<ModeConfig> for Mode {
    fn from(m: ModeConfig) -> Self {
        match m {
            ModeConfig::Disks => Mode::Disks,
            ModeConfig::Rope => Mode::Rope,
            ModeConfig::Particles => Mode::Particles,
        }
    }
}

/// Drag profile, tagged by `profile`; omitted fields take the classic values
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "profile", rename_all = "lowercase")]
pub enum DragConfig {
    None,
    Constant {
        k: f64,
    },
    Vertical {
        #[serde(default = "default_drag_base")]
        base: f64,
        #[serde(default = "default_drag_span")]
        span: f64,
    },
    Sinusoidal {
        #[serde(default = "default_drag_base")]
        base: f64,
        #[serde(default = "default_drag_span")]
        amplitude: f64,
        #[serde(default = "default_drag_wavelength")]
        wavelength: f64,
    },
}

fn default_drag_base() -> f64 { 0.01 }
fn default_drag_span() -> f64 { 0.05 }
fn default_drag_wavelength() -> f64 { 100.0 }

impl From<DragConfig> for DragProfile {
    fn from(d: DragConfig) -> Self {
        match d {
            DragConfig::None => DragProfile::None,
            DragConfig::Constant { k } => DragProfile::Constant { k },
            DragConfig::Vertical { base, span } => DragProfile::Vertical { base, span },
            DragConfig::Sinusoidal { base, amplitude, wavelength } => {
                DragProfile::Sinusoidal { base, amplitude, wavelength }
            }
        }
    }
}

fn default_point_intensity() -> f64 { 100.0 }

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub mode: ModeConfig, // which animation to show
    #[serde(default)]
    pub collisions: bool, // elastic disk-disk collisions
    #[serde(default)]
    pub pairwise_gravity: bool, // bodies attract each other with G * m1 * m2
    pub drag: Option<DragConfig>, // velocity-proportional drag, none when absent
    #[serde(default = "default_point_intensity")]
    pub point_intensity: f64, // intensity of attraction points added by clicking
    pub font: Option<String>, // HUD font path relative to assets/
}

fn default_dt() -> f64 { 0.01 }
fn default_g() -> f64 { 100.0 }
fn default_min_distance() -> f64 { 1.0 }
fn default_width() -> f64 { 800.0 }
fn default_height() -> f64 { 600.0 }
fn default_one() -> f64 { 1.0 }

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    #[serde(default = "default_dt")]
    pub dt: f64, // fixed time step
    #[serde(default = "default_g")]
    pub G: f64, // attraction constant
    #[serde(default = "default_min_distance")]
    pub min_distance: f64, // force law clamp
    #[serde(default = "default_width")]
    pub width: f64, // window width
    #[serde(default = "default_height")]
    pub height: f64, // window height
    #[serde(default = "default_one")]
    pub wall_restitution: f64, // 1.0 keeps speed on wall bounces
    pub seed: Option<u64>, // makes runs reproducible
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // center position
    #[serde(default)]
    pub v: [f64; 2], // velocity
    pub m: f64, // mass
    pub radius: f64, // radius
    pub color: Option<[u8; 3]>, // random when absent
}

fn default_spawn_mass() -> [f64; 2] { [1.0, 5.0] }
fn default_spawn_diameter() -> [f64; 2] { [10.0, 40.0] }
fn default_spawn_speed() -> f64 { 50.0 }
fn default_spawn_margin() -> f64 { 100.0 }

/// Randomly generated disks
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub count: usize, // number of disks
    #[serde(default = "default_spawn_mass")]
    pub mass: [f64; 2], // uniform mass range [min, max)
    #[serde(default = "default_spawn_diameter")]
    pub diameter: [f64; 2], // uniform diameter range [min, max)
    #[serde(default = "default_spawn_speed")]
    pub speed: f64, // each velocity component uniform in [-speed, speed)
    #[serde(default = "default_spawn_margin")]
    pub margin: f64, // top-left corners are kept this far from the right/bottom edges
}

/// An attraction point present from the start
#[derive(Deserialize, Debug, Clone)]
pub struct PointConfig {
    pub x: [f64; 2],
    pub intensity: Option<f64>, // engine.point_intensity when absent
}

fn default_obstacle_restitution() -> f64 { 0.8 }

#[derive(Deserialize, Debug, Clone)]
pub struct ObstacleConfig {
    pub x: [f64; 2], // center
    pub radius: f64,
    #[serde(default = "default_obstacle_restitution")]
    pub restitution: f64,
}

fn default_rope_origin() -> [f64; 2] { [300.0, 300.0] }
fn default_rope_count() -> usize { 10 }
fn default_rope_spacing() -> f64 { 50.0 }
fn default_rope_stiffness() -> f64 { 0.1 }
fn default_true() -> bool { true }
fn default_rope_gravity() -> f64 { 500.0 }
fn default_pick_radius() -> f64 { 15.0 }

/// Verlet chain laid out horizontally from `origin`
#[derive(Deserialize, Debug, Clone)]
pub struct RopeConfig {
    #[serde(default = "default_rope_origin")]
    pub origin: [f64; 2],
    #[serde(default = "default_rope_count")]
    pub count: usize, // number of particles
    #[serde(default = "default_rope_spacing")]
    pub spacing: f64, // initial distance between neighbors
    #[serde(default = "default_rope_stiffness")]
    pub stiffness: f64, // spring stiffness in (0, 1]
    #[serde(default = "default_true")]
    pub pin_first: bool,
    #[serde(default = "default_rope_gravity")]
    pub gravity: f64, // downward acceleration
    #[serde(default = "default_pick_radius")]
    pub pick_radius: f64, // how close a click must be to grab a particle
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmitterStyleConfig {
    Spray,
    Fire,
    Smoke,
}

impl From<EmitterStyleConfig> for EmitterStyle {
    fn from(s: EmitterStyleConfig) -> Self {
        match s {
            EmitterStyleConfig::Spray => EmitterStyle::Spray,
            EmitterStyleConfig::Fire => EmitterStyle::Fire,
            EmitterStyleConfig::Smoke => EmitterStyle::Smoke,
        }
    }
}

fn default_emitter_rate() -> usize { 15 }

#[derive(Deserialize, Debug, Clone)]
pub struct EmitterConfig {
    pub x: [f64; 2], // emitter position
    pub style: EmitterStyleConfig,
    #[serde(default = "default_emitter_rate")]
    pub rate: usize, // particles per frame
}

#[derive(Deserialize, Debug, Clone)]
pub struct SnowConfig {
    pub count: usize, // number of flakes
}

fn default_wind_strength() -> f64 { 20.0 }
fn default_particle_attraction() -> f64 { 20.0 }

/// Settings shared by all emitters
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleFieldConfig {
    pub target: Option<[f64; 2]>, // spray attraction target, window center when absent
    #[serde(default = "default_particle_attraction")]
    pub attraction: f64, // constant pull toward the target
    #[serde(default = "default_wind_strength")]
    pub wind_strength: f64, // wind per held arrow key
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            target: None,
            attraction: default_particle_attraction(),
            wind_strength: default_wind_strength(),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // animation and force selection
    pub parameters: ParametersConfig, // numerical and physical parameters
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // explicitly placed disks
    pub spawn: Option<SpawnConfig>, // random disks added after `bodies`
    #[serde(default)]
    pub attraction_points: Vec<PointConfig>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
    pub rope: Option<RopeConfig>,
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,
    pub snow: Option<SnowConfig>,
    #[serde(default)]
    pub particles: ParticleFieldConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
