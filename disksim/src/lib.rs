pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, AttractionPoint, NVec2, Rgba, SimError};
pub use simulation::params::Parameters;
pub use simulation::engine::{Engine, Mode, DragProfile};
pub use simulation::forces::{Force, ForceSet, PointAttraction, PairwiseGravity, LinearDrag, attraction_force};
pub use simulation::integrator::{euler_integrator, verlet_integrator};
pub use simulation::boundary::{reflect_in_bounds, CircleObstacle};
pub use simulation::collision::{resolve_elastic_pair, resolve_collisions};
pub use simulation::springs::{SpringSystem, Spring, VerletParticle, ParticleHandle, ChainSpec};
pub use simulation::emitter::{Emitter, EmitterStyle, Particle, ParticleForces, SnowField};
pub use simulation::scenario::{Scenario, StepReport};

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, BodyConfig, SpawnConfig};

pub use visualization::run_window;

pub use benchmark::benchmark::{bench_gravity, bench_collisions, bench_step_curve};
