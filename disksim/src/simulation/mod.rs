pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod boundary;
pub mod collision;
pub mod arena;
pub mod springs;
pub mod emitter;
pub mod scenario;
