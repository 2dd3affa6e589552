use crate::constraints::Constraint;
use crate::core::{BodyHandle, BodyStorage};
use crate::bodies::RigidBody;
use crate::math::{Vector2, EPSILON};
use std::any::Any;

/// A damped spring between an attachment point on each of two bodies.
///
/// Attachment points are stored in each body's local frame, so they follow
/// both translation and rotation of their body. The spring impulse is applied
/// once per step from Hooke's law; damping is applied in the velocity
/// iterations and drives the relative velocity along the spring axis toward
/// zero.
#[derive(Debug, Clone)]
pub struct DampedSpring {
    /// The first body (usually the static anchor)
    body_a: BodyHandle,

    /// The second body
    body_b: BodyHandle,

    /// The attachment point on the first body (in local space)
    anchor_a: Vector2,

    /// The attachment point on the second body (in local space)
    anchor_b: Vector2,

    /// The spring rest length
    rest_length: f32,

    /// The spring stiffness coefficient
    stiffness: f32,

    /// The spring damping coefficient
    damping: f32,

    /// The bodies involved in the constraint (cached for quick lookup)
    bodies: [BodyHandle; 2],

    // Per-step solver cache
    r1: Vector2,
    r2: Vector2,
    normal: Vector2,
    normal_mass: f32,
    velocity_coefficient: f32,
    target_normal_velocity: f32,
    current_length: f32,
}

impl DampedSpring {
    /// Creates a new damped spring between two bodies
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        anchor_a: Vector2,
        anchor_b: Vector2,
        rest_length: f32,
        stiffness: f32,
        damping: f32,
    ) -> Self {
        Self {
            body_a,
            body_b,
            anchor_a,
            anchor_b,
            rest_length: rest_length.max(0.0),
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
            bodies: [body_a, body_b],
            r1: Vector2::zero(),
            r2: Vector2::zero(),
            normal: Vector2::unit_x(),
            normal_mass: 0.0,
            velocity_coefficient: 0.0,
            target_normal_velocity: 0.0,
            current_length: 0.0,
        }
    }

    /// Gets the spring rest length
    pub fn get_rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Gets the spring stiffness coefficient
    pub fn get_stiffness(&self) -> f32 {
        self.stiffness
    }

    /// Gets the spring damping coefficient
    pub fn get_damping(&self) -> f32 {
        self.damping
    }

    /// Gets the local attachment point on body A
    pub fn get_anchor_a(&self) -> Vector2 {
        self.anchor_a
    }

    /// Gets the local attachment point on body B
    pub fn get_anchor_b(&self) -> Vector2 {
        self.anchor_b
    }

    /// Distance between the attachment points as of the last solver step
    pub fn get_current_length(&self) -> f32 {
        self.current_length
    }

    /// Relative velocity of the attachment points (B relative to A)
    fn relative_velocity(&self, a: &RigidBody, b: &RigidBody) -> Vector2 {
        let va = a.get_linear_velocity() + Vector2::cross_scalar(a.get_angular_velocity(), self.r1);
        let vb = b.get_linear_velocity() + Vector2::cross_scalar(b.get_angular_velocity(), self.r2);
        vb - va
    }

    /// Applies `impulse` to B and its opposite to A at the attachment points
    fn apply_impulses(&self, a: &mut RigidBody, b: &mut RigidBody, impulse: Vector2) {
        a.apply_impulse(-impulse, self.r1);
        b.apply_impulse(impulse, self.r2);
    }
}

/// Effective inverse mass of the pair along `n`
fn effective_inverse_mass(a: &RigidBody, b: &RigidBody, r1: Vector2, r2: Vector2, n: Vector2) -> f32 {
    let rcn_a = r1.cross(&n);
    let rcn_b = r2.cross(&n);
    a.get_inverse_mass()
        + b.get_inverse_mass()
        + a.get_inverse_inertia() * rcn_a * rcn_a
        + b.get_inverse_inertia() * rcn_b * rcn_b
}

impl Constraint for DampedSpring {
    fn constraint_type(&self) -> &'static str {
        "DampedSpring"
    }

    fn get_bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }

    fn pre_solve(&mut self, dt: f32, bodies: &mut BodyStorage<RigidBody>) {
        let (a, b) = match bodies.get_pair_mut(self.body_a, self.body_b) {
            Some(pair) => pair,
            None => return,
        };

        self.r1 = a.get_transform().transform_vector(self.anchor_a);
        self.r2 = b.get_transform().transform_vector(self.anchor_b);

        let delta = (b.get_position() + self.r2) - (a.get_position() + self.r1);
        let distance = delta.length();
        self.current_length = distance;
        self.normal = if distance > EPSILON {
            delta / distance
        } else {
            Vector2::unit_x()
        };

        let k = effective_inverse_mass(a, b, self.r1, self.r2, self.normal);
        if k <= EPSILON {
            // Both ends immovable
            self.normal_mass = 0.0;
            return;
        }
        self.normal_mass = 1.0 / k;
        self.target_normal_velocity = 0.0;
        self.velocity_coefficient = 1.0 - (-self.damping * dt * k).exp();

        // Hooke's law: positive when compressed, pushing B away from A
        let spring_force = self.stiffness * (self.rest_length - distance);
        self.apply_impulses(a, b, self.normal * (spring_force * dt));
    }

    fn solve_velocity(&mut self, _dt: f32, bodies: &mut BodyStorage<RigidBody>) {
        if self.normal_mass == 0.0 {
            return;
        }

        let (a, b) = match bodies.get_pair_mut(self.body_a, self.body_b) {
            Some(pair) => pair,
            None => return,
        };

        let normal_velocity = self.relative_velocity(a, b).dot(&self.normal);
        let velocity_damping = (self.target_normal_velocity - normal_velocity) * self.velocity_coefficient;
        self.target_normal_velocity = normal_velocity + velocity_damping;

        self.apply_impulses(a, b, self.normal * (velocity_damping * self.normal_mass));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::RigidBodyType;
    use crate::core::Storage;
    use crate::math::Transform;

    fn storage_with_pair(b_position: Vector2) -> (BodyStorage<RigidBody>, BodyHandle, BodyHandle) {
        let mut bodies: BodyStorage<RigidBody> = Storage::new();
        let a = bodies.add(RigidBody::new(Transform::identity(), RigidBodyType::Static, 0.0, 0.0));
        let b = bodies.add(RigidBody::new(
            Transform::from_position(b_position),
            RigidBodyType::Dynamic,
            1.0,
            1.0,
        ));
        (bodies, a, b)
    }

    #[test]
    fn stretched_spring_pulls_body_back() {
        let (mut bodies, a, b) = storage_with_pair(Vector2::new(3.0, 0.0));
        let mut spring = DampedSpring::new(a, b, Vector2::zero(), Vector2::zero(), 2.0, 10.0, 0.0);

        spring.pre_solve(0.1, &mut bodies);

        let velocity = bodies.get_body(b).unwrap().get_linear_velocity();
        assert!(velocity.x < 0.0);
        assert!(velocity.y.abs() < 1e-6);
        assert!((spring.get_current_length() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn spring_at_rest_length_applies_nothing() {
        let (mut bodies, a, b) = storage_with_pair(Vector2::new(2.0, 0.0));
        let mut spring = DampedSpring::new(a, b, Vector2::zero(), Vector2::zero(), 2.0, 10.0, 0.5);

        spring.pre_solve(0.1, &mut bodies);
        spring.solve_velocity(0.1, &mut bodies);

        assert!(bodies.get_body(b).unwrap().get_linear_velocity().is_zero());
    }

    #[test]
    fn damping_opposes_relative_motion() {
        let (mut bodies, a, b) = storage_with_pair(Vector2::new(2.0, 0.0));
        bodies.get_body_mut(b).unwrap().set_linear_velocity(Vector2::new(1.0, 0.0));
        let mut spring = DampedSpring::new(a, b, Vector2::zero(), Vector2::zero(), 2.0, 0.0, 5.0);

        spring.pre_solve(0.1, &mut bodies);
        spring.solve_velocity(0.1, &mut bodies);

        let vx = bodies.get_body(b).unwrap().get_linear_velocity().x;
        assert!(vx > 0.0 && vx < 1.0);
    }

    #[test]
    fn coincident_attachment_points_do_not_produce_nan() {
        let (mut bodies, a, b) = storage_with_pair(Vector2::zero());
        let mut spring = DampedSpring::new(a, b, Vector2::zero(), Vector2::zero(), 1.0, 10.0, 1.0);

        spring.pre_solve(0.1, &mut bodies);
        spring.solve_velocity(0.1, &mut bodies);

        assert!(bodies.get_body(b).unwrap().get_linear_velocity().is_finite());
    }
}
