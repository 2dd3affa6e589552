//! Physics-driven spring oscillators drawn as procedurally rebuilt curves.
//!
//! A [`PhysicsWorld`] simulates planar rigid bodies and damped springs; a
//! [`Scene`](scene::Scene) holds the drawable shapes and runs per-frame
//! updaters after every simulation step. The [`oscillator`] module couples
//! the two: it keeps a coiled spring curve glued to a simulated block and
//! manages the spring constraint through attach / start / stop / reset.

pub mod math;
pub mod core;
pub mod bodies;
pub mod constraints;
pub mod scene;
pub mod oscillator;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsWorld, SimulationConfig};
pub use crate::bodies::{RigidBody, RigidBodyType};
pub use crate::math::Vector2;
pub use crate::oscillator::{SpringBlockOscillator, OscillatorConfig, SpringStyle};

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        /// An operation was called before the object it needs was registered
        #[error("Not attached: {0}")]
        NotAttached(String),

        #[error("Internal error: {0}")]
        InternalError(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
