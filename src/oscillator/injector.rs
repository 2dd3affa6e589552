use crate::bodies::BodyState;
use crate::core::{BodyHandle, PhysicsWorld};
use crate::math::Vector2;
use crate::Result;

/// Displacement from the rest position along the spring axis, and velocity
/// along the same axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InitialCondition {
    pub displacement: f32,
    pub velocity: f32,
}

impl InitialCondition {
    pub fn new(displacement: f32, velocity: f32) -> Self {
        Self { displacement, velocity }
    }
}

/// Writes initial conditions into a simulated body.
///
/// The rest position is `anchor + axis * (rest_length + half_extent)`, the
/// block centre at which the spring is neither stretched nor compressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateInjector {
    axis: Vector2,
    rest_length: f32,
    half_extent: f32,
}

impl StateInjector {
    /// An injector for springs along +x
    pub fn new(rest_length: f32, half_extent: f32) -> Self {
        Self {
            axis: Vector2::unit_x(),
            rest_length,
            half_extent,
        }
    }

    pub fn axis(&self) -> Vector2 {
        self.axis
    }

    /// Centre of the body when the spring is at rest
    pub fn rest_position(&self, anchor_point: Vector2) -> Vector2 {
        anchor_point + self.axis * (self.rest_length + self.half_extent)
    }

    fn state_for(&self, anchor_point: Vector2, condition: InitialCondition) -> BodyState {
        BodyState {
            position: self.rest_position(anchor_point) + self.axis * condition.displacement,
            angle: 0.0,
            linear_velocity: self.axis * condition.velocity,
            angular_velocity: 0.0,
        }
    }

    /// Places the body at its displaced rest position with the given
    /// velocity, zero rotation and zero spin, then wakes it so the solver
    /// picks it up on the next step
    pub fn set_initial_condition(
        &self,
        world: &mut PhysicsWorld,
        body: BodyHandle,
        anchor_point: Vector2,
        condition: InitialCondition,
    ) -> Result<()> {
        let state = self.state_for(anchor_point, condition);
        world.set_body_state(body, state)?;
        world.wake_body(body)?;

        tracing::debug!(
            body = ?body,
            displacement = condition.displacement,
            velocity = condition.velocity,
            "initial condition injected"
        );
        Ok(())
    }

    /// Puts the body back at rest. Its sleep state is left as it was.
    pub fn reset(&self, world: &mut PhysicsWorld, body: BodyHandle, anchor_point: Vector2) -> Result<()> {
        let state = self.state_for(anchor_point, InitialCondition::default());
        world.set_body_state(body, state)?;
        tracing::debug!(body = ?body, "body reset to rest");
        Ok(())
    }
}
