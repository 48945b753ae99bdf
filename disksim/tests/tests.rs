use approx::assert_abs_diff_eq;

use disksim::simulation::states::{AttractionPoint, Body, NVec2, SimError, System};
use disksim::simulation::params::Parameters;
use disksim::simulation::engine::DragProfile;
use disksim::simulation::forces::{attraction_force, ForceSet, LinearDrag, PairwiseGravity, PointAttraction};
use disksim::simulation::integrator::{euler_integrator, verlet_integrator};
use disksim::simulation::boundary::{reflect_in_bounds, CircleObstacle};
use disksim::simulation::collision::{resolve_collisions, resolve_elastic_pair};
use disksim::simulation::springs::{ChainSpec, SpringSystem, VerletParticle};

/// Body with unit mass at rest
fn body_at(x: f64, y: f64) -> Body {
    Body::new(NVec2::new(x, y), NVec2::zeros(), 1.0, 5.0).unwrap()
}

fn moving_body(x: [f64; 2], v: [f64; 2], m: f64, radius: f64) -> Body {
    Body::new(NVec2::new(x[0], x[1]), NVec2::new(v[0], v[1]), m, radius).unwrap()
}

/// Two bodies separated along the x-axis
fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let b1 = moving_body([100.0, 100.0], [0.0, 0.0], m1, 1.0);
    let b2 = moving_body([100.0 + dist, 100.0], [0.0, 0.0], m2, 1.0);
    System::new(vec![b1, b2])
}

fn test_params() -> Parameters {
    Parameters {
        seed: Some(42),
        ..Parameters::default()
    }
}

fn gravity_set(p: &Parameters) -> ForceSet {
    ForceSet::new().with(PairwiseGravity {
        G: p.G,
        min_distance: p.min_distance,
    })
}

fn attraction_set(p: &Parameters) -> ForceSet {
    ForceSet::new().with(PointAttraction {
        min_distance: p.min_distance,
    })
}

// ==================================================================================
// Body construction
// ==================================================================================

#[test]
fn body_rejects_non_positive_mass_and_radius() {
    let x = NVec2::new(10.0, 10.0);
    let v = NVec2::zeros();

    assert_eq!(Body::new(x, v, 0.0, 1.0).unwrap_err(), SimError::InvalidMass(0.0));
    assert_eq!(Body::new(x, v, 1.0, -2.0).unwrap_err(), SimError::InvalidRadius(-2.0));
    assert!(Body::new(x, v, f64::NAN, 1.0).is_err());
}

#[test]
fn anchor_is_top_left_of_bounding_square() {
    let b = moving_body([50.0, 40.0], [0.0, 0.0], 1.0, 10.0);
    assert_eq!(b.anchor(), NVec2::new(40.0, 30.0));
    assert_eq!(b.diameter(), 20.0);
}

// ==================================================================================
// Attraction point tests
// ==================================================================================

#[test]
fn attraction_point_force_matches_inverse_square() {
    // body 100 away from a point of intensity 100 -> 100 / 100^2
    let p = test_params();
    let mut sys = System::new(vec![body_at(0.0, 0.0)]);
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(100.0, 0.0), 100.0));

    let mut out = vec![NVec2::zeros(); 1];
    attraction_set(&p).accumulate_forces(sys.t, &sys, &mut out);

    assert_abs_diff_eq!(out[0].x, 0.01, epsilon = 1e-12);
    assert_abs_diff_eq!(out[0].y, 0.0, epsilon = 1e-12);
}

#[test]
fn attraction_points_superpose() {
    let p = test_params();
    let mut sys = System::new(vec![body_at(0.0, 0.0)]);
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(10.0, 0.0), 100.0));
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(-10.0, 0.0), 100.0));
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(0.0, 20.0), 400.0));

    let mut out = vec![NVec2::zeros(); 1];
    attraction_set(&p).accumulate_forces(sys.t, &sys, &mut out);

    // left and right cancel, the third pulls down (+y) with 400 / 20^2
    assert_abs_diff_eq!(out[0].x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(out[0].y, 1.0, epsilon = 1e-12);
}

#[test]
fn attraction_is_bounded_below_min_distance() {
    let intensity = 100.0;
    let point = NVec2::new(0.0, 0.0);

    for d in [1.0, 0.5, 0.1, 1e-6] {
        let f = attraction_force(&NVec2::new(d, 0.0), &point, intensity, 1.0);
        assert!(f.norm().is_finite());
        assert!(f.norm() <= intensity + 1e-12, "d = {}: |f| = {}", d, f.norm());
        assert!(f.x < 0.0, "force must point toward the point");
    }

    // exactly on the point: no direction, no force
    let f = attraction_force(&point, &point, intensity, 1.0);
    assert_eq!(f, NVec2::zeros());
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(10.0, 2.0, 3.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out = vec![NVec2::zeros(); 2];
    forces.accumulate_forces(sys.t, &sys, &mut out);

    let net = out[0] + out[1];
    assert!(net.norm() < 1e-12, "Net force not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(20.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out = vec![NVec2::zeros(); 2];
    forces.accumulate_forces(sys.t, &sys, &mut out);

    let dx = sys.bodies[1].x - sys.bodies[0].x;
    assert!(out[0].dot(&dx) > 0.0, "Force is not toward second body");
    assert!(out[1].dot(&dx) < 0.0, "Force is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(10.0, 1.0, 1.0);
    let sys_2r = two_body_system(20.0, 1.0, 1.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut out_r = vec![NVec2::zeros(); 2];
    let mut out_2r = vec![NVec2::zeros(); 2];

    forces.accumulate_forces(sys_r.t, &sys_r, &mut out_r);
    forces.accumulate_forces(sys_2r.t, &sys_2r, &mut out_2r);

    let ratio = out_r[0].norm() / out_2r[0].norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn gravity_clamp_prevents_blowup() {
    let p = test_params();
    let sys = two_body_system(1e-9, 1.0, 1.0);
    let forces = gravity_set(&p);

    let mut out = vec![NVec2::zeros(); 2];
    forces.accumulate_forces(sys.t, &sys, &mut out);

    // G * m1 * m2 / min_distance^2 is the ceiling
    assert!(out[0].norm() <= p.G + 1e-9, "Clamp failed; force too large");
}

// ==================================================================================
// Drag tests
// ==================================================================================

#[test]
fn drag_opposes_velocity() {
    let b = moving_body([10.0, 10.0], [30.0, -40.0], 2.0, 1.0).with_drag(0.05);
    let sys = System::new(vec![b]);

    let mut out = vec![NVec2::zeros(); 1];
    ForceSet::new().with(LinearDrag).accumulate_forces(0.0, &sys, &mut out);

    assert_abs_diff_eq!(out[0].x, -1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(out[0].y, 2.0, epsilon = 1e-12);
}

#[test]
fn drag_profiles_give_documented_coefficients() {
    let h = 600.0;

    assert_eq!(DragProfile::None.coefficient(&NVec2::new(10.0, 10.0), h), 0.0);
    assert_eq!(DragProfile::Constant { k: 0.2 }.coefficient(&NVec2::new(10.0, 500.0), h), 0.2);

    // base + y / height * span
    let vertical = DragProfile::Vertical { base: 0.01, span: 0.05 };
    assert_abs_diff_eq!(vertical.coefficient(&NVec2::new(123.0, 300.0), h), 0.035, epsilon = 1e-12);
    assert_abs_diff_eq!(vertical.coefficient(&NVec2::new(0.0, 0.0), h), 0.01, epsilon = 1e-12);
    assert_abs_diff_eq!(vertical.coefficient(&NVec2::new(0.0, 600.0), h), 0.06, epsilon = 1e-12);

    // base + (sin(x / wavelength) + 1) * amplitude
    let bands = DragProfile::Sinusoidal { base: 0.01, amplitude: 0.05, wavelength: 100.0 };
    let peak = 50.0 * std::f64::consts::PI;
    assert_abs_diff_eq!(bands.coefficient(&NVec2::new(peak, 42.0), h), 0.11, epsilon = 1e-12);
    assert_abs_diff_eq!(bands.coefficient(&NVec2::new(0.0, 42.0), h), 0.06, epsilon = 1e-12);
    assert_abs_diff_eq!(bands.coefficient(&NVec2::new(3.0 * peak, 42.0), h), 0.01, epsilon = 1e-12);

    assert!(!DragProfile::None.is_active());
    assert!(vertical.is_active());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn zero_force_body_stays_at_rest() {
    let p = test_params();
    let mut sys = System::new(vec![body_at(123.0, 45.0)]);
    let forces = attraction_set(&p); // no points -> no force

    for _ in 0..100 {
        euler_integrator(&mut sys, &forces, &p);
    }

    assert_eq!(sys.bodies[0].x, NVec2::new(123.0, 45.0));
    assert_eq!(sys.bodies[0].v, NVec2::zeros());
    assert_abs_diff_eq!(sys.t, 1.0, epsilon = 1e-9);
}

#[test]
fn euler_drifts_with_updated_velocity() {
    let p = Parameters {
        dt: 1.0,
        ..test_params()
    };
    let mut sys = System::new(vec![body_at(0.0, 0.0)]);
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(100.0, 0.0), 100.0));

    euler_integrator(&mut sys, &attraction_set(&p), &p);

    // v = F / m * dt = 0.01, x = v * dt with the new v
    assert_abs_diff_eq!(sys.bodies[0].v.x, 0.01, epsilon = 1e-12);
    assert_abs_diff_eq!(sys.bodies[0].x.x, 0.01, epsilon = 1e-12);
}

#[test]
fn heavier_body_accelerates_less() {
    let p = test_params();
    let mut sys = System::new(vec![
        moving_body([0.0, 0.0], [0.0, 0.0], 1.0, 1.0),
        moving_body([0.0, 50.0], [0.0, 0.0], 4.0, 1.0),
    ]);
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(100.0, 0.0), 100.0));
    sys.add_attraction_point(AttractionPoint::new(NVec2::new(100.0, 50.0), 100.0));

    euler_integrator(&mut sys, &attraction_set(&p), &p);

    // each body mostly feels its own point; the cross pulls differ in y only
    let ratio = sys.bodies[0].v.x / sys.bodies[1].v.x;
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

// ==================================================================================
// Boundary tests
// ==================================================================================

#[test]
fn wall_reflection_preserves_speed() {
    let mut b = moving_body([5.0, 300.0], [-50.0, 20.0], 1.0, 10.0);
    let speed = b.v.norm();

    assert!(reflect_in_bounds(&mut b, 800.0, 600.0, 1.0));

    assert_eq!(b.x.x, 10.0, "center clamped one radius from the wall");
    assert_eq!(b.v, NVec2::new(50.0, 20.0));
    assert_abs_diff_eq!(b.v.norm(), speed, epsilon = 1e-12);
}

#[test]
fn wall_reflection_in_corner_flips_both_axes() {
    let mut b = moving_body([795.0, 598.0], [30.0, 40.0], 1.0, 10.0);

    assert!(reflect_in_bounds(&mut b, 800.0, 600.0, 1.0));

    assert_eq!(b.x, NVec2::new(790.0, 590.0));
    assert_eq!(b.v, NVec2::new(-30.0, -40.0));
}

#[test]
fn body_inside_bounds_is_untouched() {
    let mut b = moving_body([400.0, 300.0], [30.0, 40.0], 1.0, 10.0);
    assert!(!reflect_in_bounds(&mut b, 800.0, 600.0, 1.0));
    assert_eq!(b.v, NVec2::new(30.0, 40.0));
}

#[test]
fn obstacle_bounces_incoming_disk_with_damping() {
    let o = CircleObstacle::new(NVec2::new(100.0, 100.0), 20.0);
    let mut b = moving_body([125.0, 100.0], [-10.0, 0.0], 1.0, 10.0);

    assert!(o.resolve(&mut b));
    assert_abs_diff_eq!(b.v.x, 8.0, epsilon = 1e-12);

    // now moving away: no second bounce while still overlapping
    assert!(!o.resolve(&mut b));
    assert_abs_diff_eq!(b.v.x, 8.0, epsilon = 1e-12);
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn head_on_equal_masses_exchange_velocities() {
    let mut b1 = moving_body([100.0, 100.0], [10.0, 0.0], 1.0, 5.0);
    let mut b2 = moving_body([109.9, 100.0], [-10.0, 0.0], 1.0, 5.0);

    assert!(resolve_elastic_pair(&mut b1, &mut b2));

    assert_abs_diff_eq!(b1.v.x, -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b2.v.x, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(b1.v.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(b2.v.y, 0.0, epsilon = 1e-12);

    // exactly touching (distance == r1 + r2) is not a contact
    let mut b3 = moving_body([100.0, 100.0], [10.0, 0.0], 1.0, 5.0);
    let mut b4 = moving_body([110.0, 100.0], [-10.0, 0.0], 1.0, 5.0);
    assert!(!resolve_elastic_pair(&mut b3, &mut b4));
    assert_eq!(b3.v, NVec2::new(10.0, 0.0));
    assert_eq!(b4.v, NVec2::new(-10.0, 0.0));
}

#[test]
fn oblique_collision_conserves_momentum_and_energy() {
    let mut b1 = moving_body([0.0, 0.0], [30.0, 5.0], 2.0, 6.0);
    let mut b2 = moving_body([8.0, 6.0], [-10.0, -20.0], 5.0, 6.0);

    let p_before = b1.momentum() + b2.momentum();
    let e_before = b1.kinetic_energy() + b2.kinetic_energy();

    assert!(resolve_elastic_pair(&mut b1, &mut b2));

    let p_after = b1.momentum() + b2.momentum();
    let e_after = b1.kinetic_energy() + b2.kinetic_energy();

    assert!((p_after - p_before).norm() < 1e-9, "momentum changed: {:?} -> {:?}", p_before, p_after);
    assert_abs_diff_eq!(e_after, e_before, epsilon = 1e-9);

    // afterwards they separate along the normal
    let normal = (b1.x - b2.x).normalize();
    assert!((b1.v - b2.v).dot(&normal) > 0.0);
}

#[test]
fn separating_or_distant_pairs_are_ignored() {
    // overlapping but moving apart
    let mut b1 = moving_body([100.0, 100.0], [-10.0, 0.0], 1.0, 5.0);
    let mut b2 = moving_body([108.0, 100.0], [10.0, 0.0], 1.0, 5.0);
    assert!(!resolve_elastic_pair(&mut b1, &mut b2));
    assert_eq!(b1.v.x, -10.0);

    // exactly touching does not count as overlap
    let mut b3 = moving_body([0.0, 0.0], [10.0, 0.0], 1.0, 5.0);
    let mut b4 = moving_body([10.0, 0.0], [-10.0, 0.0], 1.0, 5.0);
    assert!(!resolve_elastic_pair(&mut b3, &mut b4));

    // coincident centers have no normal
    let mut b5 = moving_body([0.0, 0.0], [10.0, 0.0], 1.0, 5.0);
    let mut b6 = moving_body([0.0, 0.0], [-10.0, 0.0], 1.0, 5.0);
    assert!(!resolve_elastic_pair(&mut b5, &mut b6));
}

#[test]
fn collision_sweep_conserves_total_momentum() {
    let mut sys = System::new(vec![
        moving_body([100.0, 100.0], [20.0, 0.0], 1.0, 5.0),
        moving_body([108.0, 101.0], [-5.0, 3.0], 3.0, 5.0),
        moving_body([300.0, 300.0], [1.0, 1.0], 2.0, 5.0),
    ]);
    let before = sys.total_momentum();

    let hits = resolve_collisions(&mut sys.bodies);

    assert_eq!(hits, 1);
    assert!((sys.total_momentum() - before).norm() < 1e-9);
    assert_eq!(sys.bodies[2].v, NVec2::new(1.0, 1.0));
}

// ==================================================================================
// Spring tests
// ==================================================================================

/// Two free particles 60 apart joined by a spring whose rest length is 50
fn stretched_pair(stiffness: f64, pin_first: bool) -> SpringSystem {
    let mut springs = SpringSystem::new(NVec2::zeros());
    let first = if pin_first {
        VerletParticle::pinned(NVec2::new(0.0, 0.0))
    } else {
        VerletParticle::new(NVec2::new(0.0, 0.0))
    };
    let a = springs.add_particle(first);
    let b = springs.add_particle(VerletParticle::new(NVec2::new(50.0, 0.0)));
    springs.connect(a, b, stiffness).unwrap();

    let pb = springs.particle_mut(b).unwrap();
    pb.x = NVec2::new(60.0, 0.0);
    pb.prev_x = pb.x;
    springs
}

#[test]
fn spring_relaxation_converges_geometrically() {
    let mut springs = stretched_pair(0.1, false);
    let mut expected = 10.0;

    for _ in 0..20 {
        springs.relax();
        expected *= 0.8; // each free end moves k * error
        assert_abs_diff_eq!(springs.max_stretch(), expected, epsilon = 1e-9);
    }
    assert!(springs.max_stretch() < 0.2);
}

#[test]
fn pinned_endpoint_never_moves() {
    let mut springs = stretched_pair(0.1, true);
    let mut expected = 10.0;

    for _ in 0..10 {
        springs.relax();
        expected *= 0.9; // only one end corrects
        assert_abs_diff_eq!(springs.max_stretch(), expected, epsilon = 1e-9);
    }

    let pinned: Vec<_> = springs.particles.values().filter(|p| p.pinned).collect();
    assert_eq!(pinned.len(), 1);
    assert_eq!(pinned[0].x, NVec2::zeros());
}

#[test]
fn connect_rejects_bad_springs() {
    let mut springs = SpringSystem::new(NVec2::zeros());
    let a = springs.add_particle(VerletParticle::new(NVec2::new(0.0, 0.0)));
    let b = springs.add_particle(VerletParticle::new(NVec2::new(10.0, 0.0)));

    assert_eq!(springs.connect(a, b, 0.0), Err(SimError::InvalidStiffness(0.0)));
    assert_eq!(springs.connect(a, b, 1.5), Err(SimError::InvalidStiffness(1.5)));
    assert_eq!(springs.connect(a, a, 0.5), Err(SimError::SelfSpring));

    springs.remove_particle(b);
    assert_eq!(springs.connect(a, b, 0.5), Err(SimError::StaleHandle));
    assert!(springs.springs.is_empty());
}

#[test]
fn removing_particle_drops_its_springs() {
    let spec = ChainSpec {
        count: 5,
        ..ChainSpec::default()
    };
    let mut springs = SpringSystem::chain(&spec, NVec2::zeros()).unwrap();
    assert_eq!(springs.springs.len(), 4);

    // middle particle sits at origin + 2 * spacing
    let middle = springs.pick(&NVec2::new(400.0, 300.0), 15.0).unwrap();
    springs.remove_particle(middle);

    assert_eq!(springs.particles.len(), 4);
    assert_eq!(springs.springs.len(), 2);
    assert!(springs.particle(middle).is_none());

    // relaxing with the hole in the chain is fine
    springs.relax();
}

#[test]
fn chain_hangs_from_pinned_first_particle() {
    let spec = ChainSpec::default();
    let mut springs = SpringSystem::chain(&spec, NVec2::new(0.0, 500.0)).unwrap();

    for _ in 0..200 {
        verlet_integrator(&mut springs, 0.016);
        springs.relax();
    }

    let (_, first) = springs.particles.iter().next().unwrap();
    assert!(first.pinned);
    assert_eq!(first.x, spec.origin);

    // the free end has swung below the anchor and nothing blew up
    assert!(springs.particles.values().all(|p| p.x.x.is_finite() && p.x.y.is_finite()));
    let lowest = springs.particles.values().map(|p| p.x.y).fold(f64::MIN, f64::max);
    assert!(lowest > spec.origin.y);
}

#[test]
fn verlet_free_fall_matches_constant_acceleration() {
    let mut springs = SpringSystem::new(NVec2::new(0.0, 10.0));
    let h = springs.add_particle(VerletParticle::new(NVec2::zeros()));

    verlet_integrator(&mut springs, 0.1);
    verlet_integrator(&mut springs, 0.1);

    // x1 = g dt^2, x2 = 2 x1 + g dt^2
    let p = springs.particle(h).unwrap();
    assert_abs_diff_eq!(p.x.y, 0.3, epsilon = 1e-12);
    assert_abs_diff_eq!(p.velocity_raw().y, 0.2, epsilon = 1e-12);
}

#[test]
fn dragged_particle_follows_cursor_and_toggle_pin() {
    let mut springs = SpringSystem::chain(&ChainSpec::default(), NVec2::zeros()).unwrap();

    let grabbed = springs.begin_drag(&NVec2::new(352.0, 298.0), 15.0).unwrap();
    springs.drag_to(NVec2::new(360.0, 250.0));
    assert_eq!(springs.particle(grabbed).unwrap().x, NVec2::new(360.0, 250.0));

    springs.end_drag();
    springs.drag_to(NVec2::new(0.0, 0.0));
    assert_eq!(springs.particle(grabbed).unwrap().x, NVec2::new(360.0, 250.0));

    assert_eq!(springs.toggle_pin(grabbed), Some(true));
    assert_eq!(springs.toggle_pin(grabbed), Some(false));

    // nothing within reach
    assert!(springs.begin_drag(&NVec2::new(0.0, 0.0), 15.0).is_none());
}
