//! Force contributors for the disk engine
//!
//! Defines the `Force` trait and the `ForceSet` that sums every active term
//! into one force vector per body: attraction points, pairwise gravity and
//! velocity-proportional drag.

use crate::simulation::states::{System, NVec2};

/// Collection of force terms (attraction, gravity, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
#[derive(Default)]
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total forces at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        // Iterate over all force contributors
        for term in &self.terms {
            term.force(t, sys, out);
        }
    }
}

/// Trait for force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn force(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Pull of a point with the given intensity on something at `x`:
/// direction toward `point`, magnitude `intensity / d^2` with `d` clamped to
/// at least `min_distance`.
pub fn attraction_force(x: &NVec2, point: &NVec2, intensity: f64, min_distance: f64) -> NVec2 {
    let r = point - x;
    let dist = r.norm().max(min_distance);
    // below the clamp r / dist is shorter than unit length
    (r / dist) * (intensity / (dist * dist))
}

/// Attraction toward every [`AttractionPoint`](crate::simulation::states::AttractionPoint)
/// stored in the system
pub struct PointAttraction {
    pub min_distance: f64,
}

impl Force for PointAttraction {
    fn force(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (b, f) in sys.bodies.iter().zip(out.iter_mut()) {
            for p in &sys.attractors {
                *f += attraction_force(&b.x, &p.x, p.intensity, self.min_distance);
            }
        }
    }
}

/// Mutual attraction between all bodies, `G * m_i * m_j / d^2`
/// Direct O(n^2) sum, no spatial acceleration structure
#[allow(non_snake_case)]
pub struct PairwiseGravity {
    pub G: f64, // attraction constant
    pub min_distance: f64, // singularity clamp
}

impl Force for PairwiseGravity {
    fn force(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let bi = &sys.bodies[i];

            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                // force on i, pointing toward j
                let f = attraction_force(&bi.x, &bj.x, self.G * bi.m * bj.m, self.min_distance);

                // equal and opposite
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

/// Velocity-proportional drag, `-drag * v`, using each body's own coefficient
pub struct LinearDrag;

impl Force for LinearDrag {
    fn force(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (b, f) in sys.bodies.iter().zip(out.iter_mut()) {
            *f -= b.drag * b.v;
        }
    }
}
