//! High-level runtime engine settings
//!
//! Selects which animation runs, which force terms are active and how drag
//! varies across the window, used when building and running a `Scenario`

use crate::simulation::states::NVec2;

/// Which animation the window shows and how input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Disks, // gravitating disks, clicks add attraction points
    Rope, // verlet spring chain, drag particles with the mouse
    Particles, // emitters and snow
}

/// Drag coefficient as a function of spawn position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragProfile {
    None,
    Constant { k: f64 },
    /// `base + y / height * span`, heavier drag lower in the window
    Vertical { base: f64, span: f64 },
    /// `base + (sin(x / wavelength) + 1) * amplitude`, bands across the window
    Sinusoidal { base: f64, amplitude: f64, wavelength: f64 },
}

impl DragProfile {
    pub fn coefficient(&self, x: &NVec2, height: f64) -> f64 {
        match *self {
            DragProfile::None => 0.0,
            DragProfile::Constant { k } => k,
            DragProfile::Vertical { base, span } => base + (x.y / height) * span,
            DragProfile::Sinusoidal { base, amplitude, wavelength } => {
                base + ((x.x / wavelength).sin() + 1.0) * amplitude
            }
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragProfile::None)
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub mode: Mode,
    pub collisions: bool, // resolve elastic disk collisions each step
    pub pairwise_gravity: bool, // false = attraction points only
    pub drag: DragProfile,
    pub point_intensity: f64, // intensity of attraction points added by clicking
    pub font: Option<String>, // HUD font, relative to the assets directory
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            mode: Mode::Disks,
            collisions: false,
            pairwise_gravity: false,
            drag: DragProfile::None,
            point_intensity: 100.0,
            font: None,
        }
    }
}
