use crate::core::GravityType;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The fixed time step for the simulation
    pub time_step: f32,

    /// The maximum number of substeps for variable time step simulation
    pub max_substeps: u32,

    /// The type of gravity in the simulation
    pub gravity: GravityType,

    /// The number of iterations to run for solving velocity constraints
    pub velocity_iterations: u32,

    /// The linear velocity threshold below which bodies can sleep
    pub linear_sleep_threshold: f32,

    /// The angular velocity threshold below which bodies can sleep
    pub angular_sleep_threshold: f32,

    /// The time a body must be inactive before sleeping
    pub sleep_time_threshold: f32,

    /// Whether to allow sleeping bodies
    pub allow_sleeping: bool,

    /// Global damping factor for linear velocity
    pub linear_damping: f32,

    /// Global damping factor for angular velocity
    pub angular_damping: f32,
}

impl SimulationConfig {
    /// Default configuration without gravity, for horizontal oscillators
    pub fn weightless() -> Self {
        Self {
            gravity: GravityType::None,
            ..Self::default()
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            max_substeps: 10,
            gravity: GravityType::default(),
            velocity_iterations: 8,
            linear_sleep_threshold: 0.001,
            angular_sleep_threshold: 0.001,
            sleep_time_threshold: 1.0,
            allow_sleeping: true,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}
