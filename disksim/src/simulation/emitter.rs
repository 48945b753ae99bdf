//! Particle emitters and falling snow
//!
//! Emitters spawn short-lived particles every frame from a fixed point. The
//! random source is always supplied by the caller so a seeded scenario
//! replays identically.

use rand::Rng;

use crate::simulation::states::{NVec2, Rgba};

/// Life used to normalise the fire color ramp
const FIRE_RAMP_LIFE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterStyle {
    Spray, // random colors, pulled by wind and an attraction target
    Fire, // rises, eases from red to yellow
    Smoke, // drifts up slowly, fades out
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: NVec2,
    pub v: NVec2,
    pub color: Rgba,
    pub life: f64, // seconds left
    pub max_life: f64, // life at spawn
    pub size: f64, // drawn radius
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// 0 at spawn, 1 at death
    pub fn age_fraction(&self) -> f64 {
        if self.max_life <= 0.0 {
            return 1.0;
        }
        (1.0 - self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// External influences on emitted particles for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleForces {
    pub wind: NVec2,
    pub target: NVec2, // attraction target for spray particles
    pub attraction: f64, // constant pull toward the target
}

fn random_color<R: Rng + ?Sized>(rng: &mut R, alpha: u8) -> Rgba {
    [rng.gen(), rng.gen(), rng.gen(), alpha]
}

#[derive(Debug, Clone)]
pub struct Emitter {
    pub x: NVec2,
    pub style: EmitterStyle,
    pub rate: usize, // particles per frame
    pub particles: Vec<Particle>,
}

impl Emitter {
    pub fn new(x: NVec2, style: EmitterStyle, rate: usize) -> Self {
        Self {
            x,
            style,
            rate,
            particles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn `count` particles at the emitter position
    pub fn emit<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.particles.reserve(count);
        for _ in 0..count {
            let p = match self.style {
                EmitterStyle::Spray => {
                    let v = NVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)) * 50.0;
                    let life = rng.gen_range(3..=5) as f64;
                    Particle {
                        x: self.x,
                        v,
                        color: random_color(rng, 150),
                        life,
                        max_life: life,
                        size: rng.gen_range(1..=2) as f64,
                    }
                }
                EmitterStyle::Fire => {
                    let dx: f64 = rng.gen_range(-1.0..1.0);
                    let dy: f64 = rng.gen_range(-1.0..1.0);
                    let life = rng.gen_range(2..=4) as f64;
                    Particle {
                        x: self.x,
                        v: NVec2::new(dx, -dy.abs()) * 50.0, // always upward
                        color: [255, 0, 0, 150],
                        life,
                        max_life: life,
                        size: rng.gen_range(2..=3) as f64,
                    }
                }
                EmitterStyle::Smoke => {
                    let life = rng.gen_range(3.0..6.0);
                    let grey = rng.gen_range(90..=150);
                    Particle {
                        x: self.x + NVec2::new(rng.gen_range(-4.0..4.0), 0.0),
                        v: NVec2::new(rng.gen_range(-15.0..15.0), -rng.gen_range(20.0..40.0)),
                        color: [grey, grey, grey, 120],
                        life,
                        max_life: life,
                        size: 3.0,
                    }
                }
            };
            self.particles.push(p);
        }
    }

    /// Advance every particle by `dt`, then drop the dead ones
    pub fn update(&mut self, dt: f64, forces: &ParticleForces) {
        for p in self.particles.iter_mut() {
            match self.style {
                EmitterStyle::Spray => {
                    let pull = (forces.target - p.x).try_normalize(1e-12).unwrap_or_else(NVec2::zeros)
                        * forces.attraction;
                    p.v += (forces.wind + pull) * dt;
                    p.x += p.v * dt;
                }
                EmitterStyle::Fire => {
                    p.x += p.v * dt;
                    let progress = (1.0 - p.life / FIRE_RAMP_LIFE).clamp(0.0, 1.0);
                    p.color = [255, (progress * 255.0) as u8, 0, 150];
                }
                EmitterStyle::Smoke => {
                    p.v += forces.wind * dt;
                    p.x += p.v * dt;
                    let age = p.age_fraction();
                    p.color[3] = (120.0 * (1.0 - age)) as u8;
                    p.size = 3.0 + 6.0 * age;
                }
            }
            p.life -= dt;
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Give every particle within `half_extent` (per axis) of `point` a new
    /// random color; returns how many changed
    pub fn recolor_near<R: Rng + ?Sized>(&mut self, point: &NVec2, half_extent: f64, rng: &mut R) -> usize {
        let mut changed = 0;
        for p in self.particles.iter_mut() {
            if (p.x.x - point.x).abs() <= half_extent && (p.x.y - point.y).abs() <= half_extent {
                p.color = random_color(rng, p.color[3]);
                changed += 1;
            }
        }
        changed
    }
}

#[derive(Debug, Clone)]
pub struct Snowflake {
    pub x: NVec2,
    pub v: NVec2,
    pub size: f64,
}

/// Fixed population of flakes falling through the window and wrapping
#[derive(Debug, Clone)]
pub struct SnowField {
    pub flakes: Vec<Snowflake>,
    pub width: f64,
    pub height: f64,
}

impl SnowField {
    pub fn new<R: Rng + ?Sized>(count: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let flakes = (0..count)
            .map(|_| Snowflake {
                x: NVec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
                v: NVec2::new(0.0, rng.gen_range(10..40) as f64),
                size: rng.gen_range(1..=3) as f64,
            })
            .collect();
        Self { flakes, width, height }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) {
        for f in self.flakes.iter_mut() {
            f.x += f.v * dt;
            // past the bottom: restart just above the top at a random column
            if f.x.y > self.height {
                f.x.y = -f.size;
                f.x.x = rng.gen_range(0.0..self.width);
            }
        }
    }
}
