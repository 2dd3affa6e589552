use crate::constraints::DampedSpring;
use crate::core::{ConstraintHandle, PhysicsWorld, ShapeId};
use crate::math::Vector2;
use crate::oscillator::resolve_anchor;
use crate::scene::ShapeStorage;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Physical parameters of a spring joint. Configuration, never derived from
/// the current state of the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SpringParams {
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            rest_length: 2.5,
            stiffness: 18.0,
            damping: 0.7,
        }
    }
}

/// The two shapes a spring connects and where it attaches to each, as
/// offsets in the shapes' own frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringEnds {
    pub anchor_shape: ShapeId,
    pub anchor_offset: Vector2,
    pub body_shape: ShapeId,
    pub body_offset: Vector2,
}

/// Outcome of a joint lifecycle call. Every call has one, so the lifecycle
/// is defined in every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointChange {
    /// A new constraint was registered with the world
    Created(ConstraintHandle),

    /// The active constraint was unregistered
    Removed(ConstraintHandle),

    /// Creation was skipped because a constraint is already active
    AlreadyActive(ConstraintHandle),

    /// Removal was skipped because no constraint is active
    NotActive,

    /// Creation was skipped because there is no world yet
    NotAttached,

    /// Creation was skipped because one of the ends has no body
    BodyUnbound,
}

impl JointChange {
    /// Whether the call changed the world
    pub fn is_change(&self) -> bool {
        matches!(self, JointChange::Created(_) | JointChange::Removed(_))
    }
}

/// Owns the lifecycle of at most one damped spring between two shapes
#[derive(Debug, Clone)]
pub struct SpringJoint {
    params: SpringParams,
    handle: Option<ConstraintHandle>,
}

impl SpringJoint {
    pub fn new(params: SpringParams) -> Self {
        Self { params, handle: None }
    }

    pub fn params(&self) -> SpringParams {
        self.params
    }

    /// The active constraint. A handle whose constraint was removed behind
    /// the joint's back (for instance with its body) does not count.
    pub fn active(&self, world: &PhysicsWorld) -> Option<ConstraintHandle> {
        self.handle.filter(|&h| world.has_constraint(h))
    }

    pub fn is_active(&self, world: &PhysicsWorld) -> bool {
        self.active(world).is_some()
    }

    /// Registers a spring with the joint's own parameters, unless one is
    /// already active or the ends are not both simulated.
    pub fn create(
        &mut self,
        world: Option<&mut PhysicsWorld>,
        shapes: &ShapeStorage,
        ends: &SpringEnds,
    ) -> Result<JointChange> {
        let params = self.params;
        self.create_with(world, shapes, ends, params)
    }

    /// Like [`create`](Self::create) with explicit parameters, which become
    /// the joint's parameters for later re-creation.
    pub fn create_with(
        &mut self,
        world: Option<&mut PhysicsWorld>,
        shapes: &ShapeStorage,
        ends: &SpringEnds,
        params: SpringParams,
    ) -> Result<JointChange> {
        let world = match world {
            Some(world) => world,
            None => return Ok(JointChange::NotAttached),
        };

        if let Some(handle) = self.active(world) {
            return Ok(JointChange::AlreadyActive(handle));
        }
        self.handle = None;

        let (anchor_body, body) = match (
            world.body_for_shape(ends.anchor_shape),
            world.body_for_shape(ends.body_shape),
        ) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(JointChange::BodyUnbound),
        };

        // Constraint anchors live in their body's local frame
        let anchor_world = resolve_anchor(shapes.get_checked(ends.anchor_shape)?, world, ends.anchor_offset)?;
        let anchor_local = world.get_transform(anchor_body)?.inverse_transform_point(anchor_world);

        self.params = params;
        let spring = DampedSpring::new(
            anchor_body,
            body,
            anchor_local,
            ends.body_offset,
            params.rest_length,
            params.stiffness,
            params.damping,
        );
        let handle = world.add_constraint(Box::new(spring));
        self.handle = Some(handle);

        tracing::debug!(
            constraint = ?handle,
            rest_length = params.rest_length,
            stiffness = params.stiffness,
            damping = params.damping,
            "spring joint created"
        );
        Ok(JointChange::Created(handle))
    }

    /// Unregisters the active spring. Safe to call repeatedly.
    pub fn remove(&mut self, world: &mut PhysicsWorld) -> Result<JointChange> {
        let handle = match self.handle.take() {
            Some(handle) if world.has_constraint(handle) => handle,
            _ => return Ok(JointChange::NotActive),
        };

        world.remove_constraint(handle)?;
        tracing::debug!(constraint = ?handle, "spring joint removed");
        Ok(JointChange::Removed(handle))
    }
}
