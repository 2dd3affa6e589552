mod rigid_body;
mod body_type;
mod geometry;

pub use self::rigid_body::{RigidBody, BodyState};
pub use self::body_type::RigidBodyType;
pub use self::geometry::BodyGeometry;

use crate::math::Vector2;

/// Types of forces that can be applied to a body
#[derive(Debug, Clone, Copy)]
pub enum ForceType {
    /// Force applied at the center of mass
    Force(Vector2),

    /// Force applied at a specific point in world space (can cause torque)
    ForceAtPoint {
        /// The force to apply
        force: Vector2,

        /// The point to apply the force at, in world space
        point: Vector2,
    },

    /// Scalar torque about the body's center of mass
    Torque(f32),
}

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct BodyFlags: u32 {
            /// Body can go to sleep when inactive
            const CAN_SLEEP = 0x01;

            /// Body is currently sleeping
            const SLEEPING = 0x02;

            /// Body is affected by gravity
            const AFFECTED_BY_GRAVITY = 0x04;
        }
    }
}
