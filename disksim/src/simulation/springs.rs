//! Verlet spring-mass system
//!
//! Particles integrate with position verlet (no explicit velocity) and are
//! held together by springs that are relaxed once per frame. Springs refer to
//! their endpoints through arena handles, so particles can be deleted while
//! the rope is being edited.

use crate::simulation::arena::{Arena, Handle};
use crate::simulation::states::{NVec2, SimError};

pub type ParticleHandle = Handle;

/// A verlet particle: velocity is implied by `x - prev_x`
#[derive(Debug, Clone)]
pub struct VerletParticle {
    pub x: NVec2, // current position
    pub prev_x: NVec2, // position one step ago
    pub acc: NVec2, // acceleration accumulated for the next step
    pub pinned: bool, // pinned particles ignore forces and constraints
}

impl VerletParticle {
    pub fn new(x: NVec2) -> Self {
        Self {
            x,
            prev_x: x,
            acc: NVec2::zeros(),
            pinned: false,
        }
    }

    pub fn pinned(x: NVec2) -> Self {
        Self {
            pinned: true,
            ..Self::new(x)
        }
    }

    pub fn apply_force(&mut self, f: NVec2) {
        if !self.pinned {
            self.acc += f;
        }
    }

    /// x_n+1 = x_n + (x_n - x_n-1) + a dt^2
    pub fn integrate(&mut self, dt: f64) {
        if self.pinned {
            return;
        }
        let prev = self.x;
        self.x += (self.x - self.prev_x) + self.acc * (dt * dt);
        self.prev_x = prev;
        self.acc = NVec2::zeros();
    }

    /// Displacement over the last step
    pub fn velocity_raw(&self) -> NVec2 {
        self.x - self.prev_x
    }
}

/// Distance constraint between two particles
#[derive(Debug, Clone)]
pub struct Spring {
    pub a: ParticleHandle,
    pub b: ParticleHandle,
    rest_length: f64, // fixed at creation
    pub stiffness: f64, // in (0, 1]
}

impl Spring {
    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    pub fn connects(&self, h: ParticleHandle) -> bool {
        self.a == h || self.b == h
    }
}

/// Settings for a straight chain of particles laid out along +x
#[derive(Debug, Clone)]
pub struct ChainSpec {
    pub origin: NVec2,
    pub count: usize,
    pub spacing: f64,
    pub stiffness: f64,
    pub pin_first: bool,
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self {
            origin: NVec2::new(300.0, 300.0),
            count: 10,
            spacing: 50.0,
            stiffness: 0.1,
            pin_first: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpringSystem {
    pub particles: Arena<VerletParticle>,
    pub springs: Vec<Spring>,
    pub gravity: NVec2, // acceleration applied to every particle each step
    pub dragged: Option<ParticleHandle>, // particle following the cursor
}

impl SpringSystem {
    pub fn new(gravity: NVec2) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    /// Build a chain with springs between neighbors
    pub fn chain(spec: &ChainSpec, gravity: NVec2) -> Result<Self, SimError> {
        let mut sys = Self::new(gravity);
        let mut prev: Option<ParticleHandle> = None;
        for i in 0..spec.count {
            let x = spec.origin + NVec2::new(i as f64 * spec.spacing, 0.0);
            let p = if i == 0 && spec.pin_first {
                VerletParticle::pinned(x)
            } else {
                VerletParticle::new(x)
            };
            let h = sys.add_particle(p);
            if let Some(ph) = prev {
                sys.connect(ph, h, spec.stiffness)?;
            }
            prev = Some(h);
        }
        Ok(sys)
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn add_particle(&mut self, p: VerletParticle) -> ParticleHandle {
        self.particles.insert(p)
    }

    pub fn particle(&self, h: ParticleHandle) -> Option<&VerletParticle> {
        self.particles.get(h)
    }

    pub fn particle_mut(&mut self, h: ParticleHandle) -> Option<&mut VerletParticle> {
        self.particles.get_mut(h)
    }

    /// Join two live particles; the rest length is their current distance
    pub fn connect(&mut self, a: ParticleHandle, b: ParticleHandle, stiffness: f64) -> Result<(), SimError> {
        if !(stiffness > 0.0 && stiffness <= 1.0) {
            return Err(SimError::InvalidStiffness(stiffness));
        }
        if a == b {
            return Err(SimError::SelfSpring);
        }
        let pa = self.particles.get(a).ok_or(SimError::StaleHandle)?;
        let pb = self.particles.get(b).ok_or(SimError::StaleHandle)?;
        let rest_length = (pb.x - pa.x).norm();

        self.springs.push(Spring { a, b, rest_length, stiffness });
        Ok(())
    }

    /// Delete a particle and every spring attached to it
    pub fn remove_particle(&mut self, h: ParticleHandle) -> Option<VerletParticle> {
        let p = self.particles.remove(h)?;
        let before = self.springs.len();
        self.springs.retain(|s| !s.connects(h));
        if self.dragged == Some(h) {
            self.dragged = None;
        }
        log::debug!(
            "removed particle {}, dropped {} spring(s)",
            h.index(),
            before - self.springs.len()
        );
        Some(p)
    }

    pub fn toggle_pin(&mut self, h: ParticleHandle) -> Option<bool> {
        let p = self.particles.get_mut(h)?;
        p.pinned = !p.pinned;
        p.prev_x = p.x;
        p.acc = NVec2::zeros();
        Some(p.pinned)
    }

    /// First particle (in slot order) within `radius` of `pos`
    pub fn pick(&self, pos: &NVec2, radius: f64) -> Option<ParticleHandle> {
        self.particles
            .iter()
            .find(|(_, p)| (p.x - pos).norm() <= radius)
            .map(|(h, _)| h)
    }

    pub fn begin_drag(&mut self, pos: &NVec2, radius: f64) -> Option<ParticleHandle> {
        self.dragged = self.pick(pos, radius);
        if let Some(h) = self.dragged {
            log::info!("dragging particle {} at ({:.1}, {:.1})", h.index(), pos.x, pos.y);
        }
        self.dragged
    }

    pub fn end_drag(&mut self) {
        self.dragged = None;
    }

    /// Move the dragged particle; previous position is kept so releasing
    /// it carries the drag velocity
    pub fn drag_to(&mut self, pos: NVec2) {
        if let Some(p) = self.dragged.and_then(|h| self.particles.get_mut(h)) {
            p.x = pos;
        }
    }

    /// One relaxation pass over every spring, in insertion order
    pub fn relax(&mut self) {
        for s in &self.springs {
            let Some((pa, pb)) = self.particles.get2_mut(s.a, s.b) else {
                continue;
            };
            let delta = pb.x - pa.x;
            let dist = delta.norm();
            if dist == 0.0 {
                continue; // no direction to correct along
            }
            let error = (dist - s.rest_length) / dist;
            let offset = delta * (s.stiffness * error);

            if !pa.pinned {
                pa.x += offset;
            }
            if !pb.pinned {
                pb.x -= offset;
            }
        }
    }

    /// Largest |length - rest_length| over all springs
    pub fn max_stretch(&self) -> f64 {
        self.springs
            .iter()
            .filter_map(|s| {
                let pa = self.particles.get(s.a)?;
                let pb = self.particles.get(s.b)?;
                Some(((pb.x - pa.x).norm() - s.rest_length).abs())
            })
            .fold(0.0, f64::max)
    }

    /// Segments (a, b) for drawing
    pub fn segments(&self) -> impl Iterator<Item = (NVec2, NVec2)> + '_ {
        self.springs.iter().filter_map(|s| {
            let pa = self.particles.get(s.a)?;
            let pb = self.particles.get(s.b)?;
            Some((pa.x, pb.x))
        })
    }
}
