//! Core state types for the disk simulation.
//!
//! Defines the disk `Body`, the `System` that owns every body together with
//! the attraction points clicked into the scene, and the current time `t`.
//! Positions are disk centers in window pixels (origin top-left, y down).

use std::fmt;

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// RGBA color, 0–255 per channel.
pub type Rgba = [u8; 4];

/// Errors raised when constructing simulation objects from invalid data.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be positive and finite.
    InvalidMass(f64),
    /// Radius must be positive and finite.
    InvalidRadius(f64),
    /// Spring stiffness must lie in (0, 1].
    InvalidStiffness(f64),
    /// A handle refers to a particle that no longer exists.
    StaleHandle,
    /// A spring cannot connect a particle to itself.
    SelfSpring,
    /// A random range was empty (min >= max).
    EmptyRange { min: f64, max: f64 },
    /// A step size or window dimension that must be positive and finite.
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMass(m) => write!(f, "mass must be positive and finite, got {}", m),
            SimError::InvalidRadius(r) => write!(f, "radius must be positive and finite, got {}", r),
            SimError::InvalidStiffness(k) => write!(f, "stiffness must be in (0, 1], got {}", k),
            SimError::StaleHandle => write!(f, "handle refers to a removed particle"),
            SimError::SelfSpring => write!(f, "spring endpoints must be distinct particles"),
            SimError::EmptyRange { min, max } => write!(f, "empty range [{}, {})", min, max),
            SimError::InvalidParameter { name, value } => {
                write!(f, "{} must be positive and finite, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for SimError {}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position (center)
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub radius: f64, // radius
    pub drag: f64, // velocity-proportional drag coefficient
    pub color: Rgba, // fill color
}

impl Body {
    /// Create a body, rejecting non-positive mass or radius.
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64) -> Result<Self, SimError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::InvalidMass(m));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self {
            x,
            v,
            m,
            radius,
            drag: 0.0,
            color: [255, 255, 255, 255],
        })
    }

    pub fn with_drag(mut self, drag: f64) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn diameter(&self) -> f64 {
        2.0 * self.radius
    }

    /// Top-left corner of the disk's bounding square.
    pub fn anchor(&self) -> NVec2 {
        self.x - NVec2::new(self.radius, self.radius)
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// A fixed point pulling every body toward it with the given intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractionPoint {
    pub x: NVec2,
    pub intensity: f64,
}

impl AttractionPoint {
    pub fn new(x: NVec2, intensity: f64) -> Self {
        Self { x, intensity }
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // collection of disks
    pub attractors: Vec<AttractionPoint>, // only ever appended to
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            attractors: Vec::new(),
            t: 0.0,
        }
    }

    pub fn add_attraction_point(&mut self, point: AttractionPoint) {
        self.attractors.push(point);
    }

    /// Sum of m*v over every body.
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.momentum())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
