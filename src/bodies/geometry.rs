use crate::core::ShapeId;
use crate::math::Transform;

/// What the physics world needs to know about a drawable shape in order to
/// build a body for it.
pub trait BodyGeometry {
    /// Identifier of the drawable shape this geometry belongs to
    fn shape_id(&self) -> ShapeId;

    /// Current world transform of the shape (center and rotation)
    fn get_transform(&self) -> Transform;

    /// Planar area, used to derive mass from density
    fn get_area(&self) -> f32;

    /// Moment of inertia about the center for the given mass
    fn get_moment_of_inertia(&self, mass: f32) -> f32;
}
