//! Pairwise elastic collisions between disks
//!
//! Every pair is checked once per step in fixed `i < j` order. Impulses are
//! applied only to approaching pairs and overlap is not corrected, so bodies
//! may stay visually interpenetrated and simultaneous multi-body contacts are
//! order dependent.

use crate::simulation::states::Body;

/// Resolve a possible contact between two disks. Returns true if an impulse
/// was applied.
pub fn resolve_elastic_pair(b1: &mut Body, b2: &mut Body) -> bool {
    let delta = b1.x - b2.x;
    let dist = delta.norm();
    if dist >= b1.radius + b2.radius || dist == 0.0 {
        return false;
    }

    // contact normal, pointing from b2 to b1
    let normal = delta / dist;
    let rel_v = b1.v - b2.v;
    let v_n = rel_v.dot(&normal);

    // separating or resting
    if v_n >= 0.0 {
        return false;
    }

    let impulse = 2.0 * v_n / (b1.m + b2.m);
    b1.v -= normal * (impulse * b2.m);
    b2.v += normal * (impulse * b1.m);
    true
}

/// O(n^2) sweep over all pairs; returns the number of impulses applied
pub fn resolve_collisions(bodies: &mut [Body]) -> usize {
    let n = bodies.len();
    let mut hits = 0;
    for i in 0..n {
        // split so bodies[i] and bodies[j] can be borrowed together
        let (head, tail) = bodies.split_at_mut(i + 1);
        let bi = &mut head[i];
        for bj in tail.iter_mut() {
            if resolve_elastic_pair(bi, bj) {
                hits += 1;
            }
        }
    }
    hits
}
