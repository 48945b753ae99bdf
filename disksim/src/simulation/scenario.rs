//! Build fully-initialized scenarios from configuration and advance them
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - disk state (`System`, bodies and attraction points at t = 0)
//! - active force set (`ForceSet`)
//! - obstacles, the verlet spring system, emitters and snow
//! - the scenario's own random source
//!
//! The scenario is inserted into Bevy as a `Resource` and advanced once per
//! frame by [`Scenario::step`]; headless runs call the same method in a loop

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{ScenarioConfig, BodyConfig, SpawnConfig};
use crate::simulation::boundary::{reflect_in_bounds, CircleObstacle};
use crate::simulation::collision::resolve_collisions;
use crate::simulation::emitter::{Emitter, ParticleForces, SnowField};
use crate::simulation::engine::{DragProfile, Engine, Mode};
use crate::simulation::forces::{ForceSet, LinearDrag, PairwiseGravity, PointAttraction};
use crate::simulation::integrator::{euler_integrator, verlet_integrator};
use crate::simulation::params::Parameters;
use crate::simulation::springs::{ChainSpec, SpringSystem};
use crate::simulation::states::{AttractionPoint, Body, NVec2, Rgba, SimError, System};

/// Half width of the square searched when recoloring particles
const RECOLOR_HALF_EXTENT: f64 = 5.0;

/// Bevy resource representing a fully-initialized scenario
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
    pub obstacles: Vec<CircleObstacle>,
    pub springs: SpringSystem,
    pub pick_radius: f64, // rope grab distance
    pub emitters: Vec<Emitter>,
    pub snow: Option<SnowField>,
    pub particle_forces: ParticleForces,
    pub wind_strength: f64, // wind per held arrow key
    pub rng: StdRng,
    pub steps: u64, // frames advanced so far
}

/// What one call to [`Scenario::step`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub wall_hits: usize,
    pub obstacle_hits: usize,
    pub collisions: usize,
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, range: [f64; 2]) -> Result<f64, SimError> {
    let [min, max] = range;
    if !(min < max) {
        return Err(SimError::EmptyRange { min, max });
    }
    Ok(rng.gen_range(min..max))
}

fn random_opaque<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
    [rng.gen(), rng.gen(), rng.gen(), 255]
}

/// Disks with random mass, size, velocity and color, placed so the whole
/// disk starts inside the window
pub fn spawn_random_bodies<R: Rng + ?Sized>(
    spawn: &SpawnConfig,
    params: &Parameters,
    drag: &DragProfile,
    rng: &mut R,
) -> Result<Vec<Body>, SimError> {
    let mut bodies = Vec::with_capacity(spawn.count);
    let speed = [-spawn.speed, spawn.speed];

    for _ in 0..spawn.count {
        let radius = uniform(rng, spawn.diameter)? / 2.0;

        // top-left corner keeps at least one diameter clear of the far edges
        let clearance = spawn.margin.max(2.0 * radius);
        let corner_x = [0.0, params.width - clearance];
        let corner_y = [0.0, params.height - clearance];
        let corner = NVec2::new(uniform(rng, corner_x)?, uniform(rng, corner_y)?);
        let x = corner + NVec2::new(radius, radius);

        let v = NVec2::new(uniform(rng, speed)?, uniform(rng, speed)?);
        let m = uniform(rng, spawn.mass)?;

        let body = Body::new(x, v, m, radius)?
            .with_drag(drag.coefficient(&x, params.height))
            .with_color(random_opaque(rng));
        bodies.push(body);
    }
    Ok(bodies)
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            G: p_cfg.G,
            min_distance: p_cfg.min_distance,
            width: p_cfg.width,
            height: p_cfg.height,
            wall_restitution: p_cfg.wall_restitution,
            seed: p_cfg.seed,
        };
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let e_cfg = &cfg.engine;
        let engine = Engine {
            mode: e_cfg.mode.into(),
            collisions: e_cfg.collisions,
            pairwise_gravity: e_cfg.pairwise_gravity,
            drag: e_cfg.drag.map(Into::into).unwrap_or(DragProfile::None),
            point_intensity: e_cfg.point_intensity,
            font: e_cfg.font.clone(),
        };

        let mut rng = match parameters.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // Bodies: explicit ones first, then the random batch
        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            bodies.push(body_from_config(bc, &engine.drag, &parameters, &mut rng)?);
        }
        if let Some(spawn) = &cfg.spawn {
            bodies.extend(spawn_random_bodies(spawn, &parameters, &engine.drag, &mut rng)?);
        }

        let mut system = System::new(bodies);
        for pc in &cfg.attraction_points {
            system.add_attraction_point(AttractionPoint::new(
                NVec2::new(pc.x[0], pc.x[1]),
                pc.intensity.unwrap_or(engine.point_intensity),
            ));
        }

        let forces = build_forces(&engine, &parameters);

        let obstacles = cfg
            .obstacles
            .iter()
            .map(|oc| CircleObstacle {
                center: NVec2::new(oc.x[0], oc.x[1]),
                radius: oc.radius,
                restitution: oc.restitution,
            })
            .collect();

        // Rope: chain of verlet particles
        let (springs, pick_radius) = match &cfg.rope {
            Some(rc) => {
                let spec = ChainSpec {
                    origin: NVec2::new(rc.origin[0], rc.origin[1]),
                    count: rc.count,
                    spacing: rc.spacing,
                    stiffness: rc.stiffness,
                    pin_first: rc.pin_first,
                };
                (SpringSystem::chain(&spec, NVec2::new(0.0, rc.gravity))?, rc.pick_radius)
            }
            None => (SpringSystem::default(), 15.0),
        };

        let emitters = cfg
            .emitters
            .iter()
            .map(|ec| Emitter::new(NVec2::new(ec.x[0], ec.x[1]), ec.style.into(), ec.rate))
            .collect();

        let snow = cfg
            .snow
            .as_ref()
            .map(|sc| SnowField::new(sc.count, parameters.width, parameters.height, &mut rng));

        let target = cfg
            .particles
            .target
            .map(|t| NVec2::new(t[0], t[1]))
            .unwrap_or_else(|| NVec2::new(parameters.width / 2.0, parameters.height / 2.0));
        let particle_forces = ParticleForces {
            wind: NVec2::zeros(),
            target,
            attraction: cfg.particles.attraction,
        };

        log::info!(
            "built {:?} scenario: {} bodies, {} attraction points, {} springs, {} emitters",
            engine.mode,
            system.bodies.len(),
            system.attractors.len(),
            springs.springs.len(),
            cfg.emitters.len(),
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            obstacles,
            springs,
            pick_radius,
            emitters,
            snow,
            particle_forces,
            wind_strength: cfg.particles.wind_strength,
            rng,
            steps: 0,
        })
    }

    /// Advance everything by one fixed step:
    /// forces -> integrate -> walls/obstacles -> collisions -> springs -> particles
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        let dt = self.parameters.dt;

        if !self.system.bodies.is_empty() {
            euler_integrator(&mut self.system, &self.forces, &self.parameters);

            let Parameters { width, height, wall_restitution, .. } = self.parameters;
            for b in self.system.bodies.iter_mut() {
                if reflect_in_bounds(b, width, height, wall_restitution) {
                    report.wall_hits += 1;
                }
                for o in &self.obstacles {
                    if o.resolve(b) {
                        report.obstacle_hits += 1;
                    }
                }
            }

            if self.engine.collisions {
                report.collisions = resolve_collisions(&mut self.system.bodies);
            }
        }

        if !self.springs.is_empty() {
            verlet_integrator(&mut self.springs, dt);
            self.springs.relax();
        }

        for e in self.emitters.iter_mut() {
            e.emit(e.rate, &mut self.rng);
            e.update(dt, &self.particle_forces);
        }
        if let Some(snow) = self.snow.as_mut() {
            snow.update(dt, &mut self.rng);
        }

        self.steps += 1;
        report
    }

    /// Append an attraction point with the engine's click intensity
    pub fn add_attraction_point(&mut self, x: NVec2) {
        let p = AttractionPoint::new(x, self.engine.point_intensity);
        self.system.add_attraction_point(p);
        log::info!(
            "attraction point {} at ({:.0}, {:.0})",
            self.system.attractors.len(),
            x.x,
            x.y
        );
    }

    /// Wind from the held direction keys, each axis -1, 0 or +1
    pub fn set_wind(&mut self, dir_x: f64, dir_y: f64) {
        self.particle_forces.wind = NVec2::new(dir_x, dir_y) * self.wind_strength;
    }

    pub fn set_particle_target(&mut self, x: NVec2) {
        self.particle_forces.target = x;
    }

    /// New random colors for emitter particles near `x`
    pub fn recolor_particles_near(&mut self, x: &NVec2) -> usize {
        let mut changed = 0;
        for e in self.emitters.iter_mut() {
            changed += e.recolor_near(x, RECOLOR_HALF_EXTENT, &mut self.rng);
        }
        changed
    }

    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(Emitter::len).sum()
    }

    /// One-line summary for the HUD and headless runs
    pub fn status_line(&self) -> String {
        match self.engine.mode {
            Mode::Disks => format!(
                "t = {:.2}  bodies: {}  attraction points: {}  kinetic energy: {:.0}",
                self.system.t,
                self.system.bodies.len(),
                self.system.attractors.len(),
                self.system.kinetic_energy(),
            ),
            Mode::Rope => format!(
                "particles: {}  springs: {}  max stretch: {:.2}",
                self.springs.particles.len(),
                self.springs.springs.len(),
                self.springs.max_stretch(),
            ),
            Mode::Particles => {
                let w = self.particle_forces.wind;
                format!(
                    "particles: {}  snowflakes: {}  wind: ({:.0}, {:.0})",
                    self.particle_count(),
                    self.snow.as_ref().map_or(0, |s| s.flakes.len()),
                    w.x,
                    w.y,
                )
            }
        }
    }
}

fn body_from_config<R: Rng + ?Sized>(
    bc: &BodyConfig,
    drag: &DragProfile,
    params: &Parameters,
    rng: &mut R,
) -> Result<Body, SimError> {
    let x = NVec2::new(bc.x[0], bc.x[1]);
    let color = match bc.color {
        Some([r, g, b]) => [r, g, b, 255],
        None => random_opaque(rng),
    };
    Ok(Body::new(x, NVec2::new(bc.v[0], bc.v[1]), bc.m, bc.radius)?
        .with_drag(drag.coefficient(&x, params.height))
        .with_color(color))
}

/// Forces: attraction points always, gravity and drag when enabled
pub fn build_forces(engine: &Engine, params: &Parameters) -> ForceSet {
    let mut forces = ForceSet::new().with(PointAttraction {
        min_distance: params.min_distance,
    });
    if engine.pairwise_gravity {
        forces = forces.with(PairwiseGravity {
            G: params.G,
            min_distance: params.min_distance,
        });
    }
    if engine.drag.is_active() {
        forces = forces.with(LinearDrag);
    }
    forces
}
