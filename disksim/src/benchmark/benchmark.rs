use std::time::Instant;
use crate::simulation::states::{AttractionPoint, Body, System, NVec2};
use crate::simulation::params::Parameters;
use crate::simulation::forces::{ForceSet, Force, PairwiseGravity, PointAttraction};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::collision::resolve_collisions;
use crate::simulation::boundary::reflect_in_bounds;

/// Helper to build a manual System of size `n`, spread over the window
fn make_system(n: usize, params: &Parameters) -> System {
    let mut bodies = Vec::with_capacity(n);
    let (cx, cy) = (params.width / 2.0, params.height / 2.0);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            cx + (i_f * 0.37).sin() * (cx - 20.0),
            cy + (i_f * 0.13).cos() * (cy - 20.0),
        );
        let v = NVec2::new((i_f * 0.07).sin() * 30.0, (i_f * 0.11).cos() * 30.0);

        bodies.push(Body {
            x,
            v,
            m: 1.0,
            radius: 5.0,
            drag: 0.0,
            color: [255, 255, 255, 255],
        });
    }

    let mut sys = System::new(bodies);
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(cx, cy), 100.0));
    sys
}

fn make_params() -> Parameters {
    Parameters {
        seed: Some(42),
        ..Parameters::default()
    }
}

/// Time one evaluation of the pairwise gravity sum for growing n
pub fn bench_gravity() {
    // Different system sizes to test
    let ns = [100, 200, 400, 800, 1600, 3200];
    let params = make_params();

    for n in ns {
        let sys = make_system(n, &params);
        let mut out = vec![NVec2::zeros(); n];

        let gravity = PairwiseGravity {
            G: params.G,
            min_distance: params.min_distance,
        };
        let points = PointAttraction {
            min_distance: params.min_distance,
        };

        // Warm up
        gravity.force(0.0, &sys, &mut out);

        let t0 = Instant::now();
        gravity.force(0.0, &sys, &mut out);
        let dt_gravity = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        points.force(0.0, &sys, &mut out);
        let dt_points = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, pairwise = {:8.6} s, points = {:8.6} s", dt_gravity, dt_points);
    }
}

/// Time the collision sweep on its own, after one step so some pairs touch
pub fn bench_collisions() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let steps = 5;
    let params = make_params();

    for n in ns {
        let mut sys = make_system(n, &params);
        let forces = ForceSet::new().with(PointAttraction {
            min_distance: params.min_distance,
        });
        euler_integrator(&mut sys, &forces, &params);

        let mut hits = 0;
        let t0 = Instant::now();
        for _ in 0..steps {
            hits += resolve_collisions(&mut sys.bodies);
        }
        let per_sweep = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {:5}, sweep = {:8.6} s, impulses = {}", n, per_sweep, hits);
    }
}

/// Full disk frame (forces, euler, walls, collisions) for a range of n
/// Output is CSV for graphing
pub fn bench_step_curve() {
    println!("N,gravity_ms,no_gravity_ms");

    let params = make_params();

    for n in (100..=3200).step_by(100) {
        // small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };

        let sys_template = make_system(n, &params);

        let with_gravity = ForceSet::new()
            .with(PointAttraction {
                min_distance: params.min_distance,
            })
            .with(PairwiseGravity {
                G: params.G,
                min_distance: params.min_distance,
            });
        let without_gravity = ForceSet::new().with(PointAttraction {
            min_distance: params.min_distance,
        });

        let ms_gravity = time_frames(sys_template.clone(), &with_gravity, &params, steps);
        let ms_plain = time_frames(sys_template, &without_gravity, &params, steps);

        println!("{},{:.6},{:.6}", n, ms_gravity, ms_plain);
    }
}

/// Average milliseconds per frame over `steps` frames
fn time_frames(mut sys: System, forces: &ForceSet, params: &Parameters, steps: usize) -> f64 {
    let t0 = Instant::now();
    for _ in 0..steps {
        euler_integrator(&mut sys, forces, params);
        for b in sys.bodies.iter_mut() {
            reflect_in_bounds(b, params.width, params.height, params.wall_restitution);
        }
        resolve_collisions(&mut sys.bodies);
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}
