use crate::core::{BodyHandle, PhysicsWorld};
use crate::math::{Transform, Vector2};
use crate::scene::Shape;
use crate::Result;

/// How a shape is placed in the world this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment {
    /// The shape is simulated; its body's transform is authoritative
    Bound(BodyHandle),

    /// The shape is not simulated; its last drawn transform is used
    Unbound(Transform),
}

impl Attachment {
    /// Looks up how `shape` is placed, using the world's shape registry
    pub fn of(shape: &Shape, world: &PhysicsWorld) -> Self {
        match world.body_for_shape(shape.id()) {
            Some(body) => Attachment::Bound(body),
            None => Attachment::Unbound(shape.get_transform()),
        }
    }

    /// World-space position of `local_offset`, a point in the shape's own
    /// frame. Both variants rotate the offset by the current orientation,
    /// so the result does not jump when a body is first bound.
    pub fn resolve(&self, world: &PhysicsWorld, local_offset: Vector2) -> Result<Vector2> {
        let transform = match *self {
            Attachment::Bound(body) => world.get_transform(body)?,
            Attachment::Unbound(transform) => transform,
        };
        Ok(transform.transform_point(local_offset))
    }
}

/// Resolves the world-space attachment point of `shape` at `local_offset`
pub fn resolve_anchor(shape: &Shape, world: &PhysicsWorld, local_offset: Vector2) -> Result<Vector2> {
    Attachment::of(shape, world).resolve(world, local_offset)
}
