//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size,
//! - attraction constant `G` and the singularity clamp,
//! - window bounds and wall restitution,
//! - optional random seed

use crate::simulation::states::SimError;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // fixed step size
    #[allow(non_snake_case)]
    pub G: f64, // attraction constant
    pub min_distance: f64, // distances below this are clamped in force laws
    pub width: f64, // window width in pixels
    pub height: f64, // window height in pixels
    pub wall_restitution: f64, // 1.0 preserves speed on wall bounces
    pub seed: Option<u64>, // deterministic seed, entropy when absent
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: 0.01,
            G: 100.0,
            min_distance: 1.0,
            width: 800.0,
            height: 600.0,
            wall_restitution: 1.0,
            seed: None,
        }
    }
}

impl Parameters {
    /// Reject a step or window size that would make spawning or stepping
    /// meaningless
    pub fn validate(&self) -> Result<(), SimError> {
        let checks = [
            ("dt", self.dt),
            ("min_distance", self.min_distance),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
