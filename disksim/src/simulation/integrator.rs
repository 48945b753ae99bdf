//! Fixed-step time integrators
//!
//! Provides the semi-implicit Euler step used by the disk system, driven by
//! `ForceSet` and `Parameters`, and the position-verlet step used by the
//! spring system

use super::states::{Body, System, NVec2};
use super::forces::ForceSet;
use super::params::Parameters;
use super::springs::SpringSystem;

/// v += F * (dt / m)
pub fn apply_force(b: &mut Body, f: &NVec2, dt: f64) {
    b.v += f * (dt / b.m);
}

/// x += v * dt
pub fn drift(b: &mut Body, dt: f64) {
    b.x += b.v * dt;
}

/// Advance the disk system by one step using semi-implicit Euler
/// Forces are evaluated once from the state at the start of the step, then
/// each body is kicked and drifted; `sys.t` advances by `params.dt`
pub fn euler_integrator(sys: &mut System, forces: &ForceSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.dt;

    // f[i] holds the net force on body i at time t
    let mut f = vec![NVec2::zeros(); n];
    forces.accumulate_forces(sys.t, &*sys, &mut f);

    // Kick, then drift with the updated velocity
    for (b, force) in sys.bodies.iter_mut().zip(f.iter()) {
        apply_force(b, force, dt);
        drift(b, dt);
    }

    sys.t += dt;
}

/// Advance every particle of the spring system by one verlet step
/// The system's gravity is applied as acceleration first; pinned particles
/// stay where they are
pub fn verlet_integrator(springs: &mut SpringSystem, dt: f64) {
    let g = springs.gravity;
    for p in springs.particles.values_mut() {
        p.apply_force(g);
        p.integrate(dt);
    }
}
