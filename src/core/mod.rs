pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::PhysicsWorld;
pub use self::config::SimulationConfig;
pub use self::storage::{BodyStorage, ConstraintStorage, HandleStorage, Storage, StorageHandle};
pub use self::events::{EventQueue, BodyEvent, BodyEventType, ConstraintEvent, ConstraintEventType};

use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A unique identifier for a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

/// A unique identifier for a constraint in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintHandle(pub(crate) u32);

/// A unique identifier for a drawable shape.
///
/// Shapes refer to their simulated body only through this key; the world
/// owns the mapping from shape to body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u32);

/// The gravity to apply to the physics world
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GravityType {
    /// No gravity
    None,

    /// Constant gravity in a direction (typically downward along y-axis)
    Constant(Vector2),
}

impl Default for GravityType {
    fn default() -> Self {
        // Default gravity is -9.81 in y direction
        Self::Constant(Vector2::new(0.0, -9.81))
    }
}
