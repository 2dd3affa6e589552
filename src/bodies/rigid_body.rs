use crate::bodies::{body_flags::BodyFlags, BodyGeometry, ForceType, RigidBodyType};
use crate::math::{Transform, Vector2};

/// A complete kinematic state that can be written to a body in one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vector2,
    pub angle: f32,
    pub linear_velocity: Vector2,
    pub angular_velocity: f32,
}

impl BodyState {
    /// A body at rest at the given position with zero rotation
    pub fn at_rest(position: Vector2) -> Self {
        Self {
            position,
            angle: 0.0,
            linear_velocity: Vector2::zero(),
            angular_velocity: 0.0,
        }
    }
}

/// A planar rigid body for physics simulation
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// The body's transform in world space
    transform: Transform,

    /// The body's linear velocity
    linear_velocity: Vector2,

    /// The body's angular velocity (radians per second, counter-clockwise)
    angular_velocity: f32,

    /// The body's type (dynamic or static)
    body_type: RigidBodyType,

    /// The body's mass
    mass: f32,

    /// Inverse of the body's mass (zero for static bodies)
    inv_mass: f32,

    /// Moment of inertia about the center of mass
    inertia: f32,

    /// Inverse moment of inertia (zero for static bodies)
    inv_inertia: f32,

    /// The body's linear damping
    linear_damping: f32,

    /// The body's angular damping
    angular_damping: f32,

    /// The body's flags
    flags: BodyFlags,

    /// How long the body has been "inactive" (for sleeping)
    sleeping_time: f32,

    /// Forces to be applied in the next integration step
    forces: Vec<ForceType>,
}

impl RigidBody {
    /// Creates a new body at the given transform with explicit mass properties
    pub fn new(transform: Transform, body_type: RigidBodyType, mass: f32, inertia: f32) -> Self {
        let mut body = Self {
            transform,
            linear_velocity: Vector2::zero(),
            angular_velocity: 0.0,
            body_type,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_inertia: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            flags: BodyFlags::CAN_SLEEP | BodyFlags::AFFECTED_BY_GRAVITY,
            sleeping_time: 0.0,
            forces: Vec::new(),
        };

        body.set_mass_properties(mass, inertia);

        body
    }

    /// Creates a static body at the geometry's current transform
    pub fn new_static(geometry: &dyn BodyGeometry) -> Self {
        Self::new(geometry.get_transform(), RigidBodyType::Static, 0.0, 0.0)
    }

    /// Creates a dynamic body whose mass is the geometry's area times `density`
    pub fn new_dynamic(geometry: &dyn BodyGeometry, density: f32) -> Self {
        let mut mass = geometry.get_area() * density;
        if !(mass > crate::math::EPSILON) {
            tracing::warn!(
                shape = ?geometry.shape_id(),
                density,
                "shape has no usable area, treating it as unit area"
            );
            mass = density.max(crate::math::EPSILON);
        }
        let inertia = geometry.get_moment_of_inertia(mass);

        Self::new(geometry.get_transform(), RigidBodyType::Dynamic, mass, inertia)
    }

    /// Returns the body's transform
    pub fn get_transform(&self) -> Transform {
        self.transform
    }

    /// Sets the body's transform
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Returns the body's position
    pub fn get_position(&self) -> Vector2 {
        self.transform.position
    }

    /// Sets the body's position
    pub fn set_position(&mut self, position: Vector2) {
        self.transform.position = position;
    }

    /// Returns the body's rotation in radians
    pub fn get_angle(&self) -> f32 {
        self.transform.angle
    }

    /// Sets the body's rotation in radians
    pub fn set_angle(&mut self, angle: f32) {
        self.transform.angle = angle;
    }

    /// Returns the body's linear velocity
    pub fn get_linear_velocity(&self) -> Vector2 {
        self.linear_velocity
    }

    /// Sets the body's linear velocity
    pub fn set_linear_velocity(&mut self, velocity: Vector2) {
        self.linear_velocity = velocity;
        self.wake_up();
    }

    /// Returns the body's angular velocity
    pub fn get_angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Sets the body's angular velocity
    pub fn set_angular_velocity(&mut self, velocity: f32) {
        self.angular_velocity = velocity;
        self.wake_up();
    }

    /// Writes position, rotation and both velocities at once.
    ///
    /// Pending forces are discarded so that the new state is exactly the
    /// initial condition of the next step.
    pub fn set_state(&mut self, state: BodyState) {
        self.transform = Transform::new(state.position, state.angle);
        self.linear_velocity = state.linear_velocity;
        self.angular_velocity = state.angular_velocity;
        self.forces.clear();
        self.sleeping_time = 0.0;
    }

    /// Returns the body's current kinematic state
    pub fn get_state(&self) -> BodyState {
        BodyState {
            position: self.transform.position,
            angle: self.transform.angle,
            linear_velocity: self.linear_velocity,
            angular_velocity: self.angular_velocity,
        }
    }

    /// Transforms a point from the body's local frame to world space
    pub fn local_to_world(&self, local_point: Vector2) -> Vector2 {
        self.transform.transform_point(local_point)
    }

    /// Velocity of a world-space point rigidly attached to the body
    pub fn velocity_at_point(&self, world_point: Vector2) -> Vector2 {
        let r = world_point - self.transform.position;
        self.linear_velocity + Vector2::cross_scalar(self.angular_velocity, r)
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Returns the body's inverse mass
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Returns the body's moment of inertia
    pub fn get_inertia(&self) -> f32 {
        self.inertia
    }

    /// Returns the body's inverse moment of inertia
    pub fn get_inverse_inertia(&self) -> f32 {
        self.inv_inertia
    }

    /// Sets mass and moment of inertia, updating the inverses
    pub fn set_mass_properties(&mut self, mass: f32, inertia: f32) {
        if self.body_type == RigidBodyType::Dynamic {
            self.mass = mass.max(0.0);
            self.inertia = inertia.max(0.0);
            self.inv_mass = if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 };
            self.inv_inertia = if self.inertia > 0.0 { 1.0 / self.inertia } else { 0.0 };
        } else {
            // Non-dynamic bodies have infinite mass and zero inverse mass/inertia
            self.mass = 0.0;
            self.inertia = 0.0;
            self.inv_mass = 0.0;
            self.inv_inertia = 0.0;
        }
    }

    /// Returns the body type
    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Returns true for dynamic bodies
    pub fn is_dynamic(&self) -> bool {
        self.body_type == RigidBodyType::Dynamic
    }

    /// Sets the body's linear damping
    pub fn set_linear_damping(&mut self, damping: f32) {
        self.linear_damping = damping.max(0.0);
    }

    /// Returns the body's linear damping
    pub fn get_linear_damping(&self) -> f32 {
        self.linear_damping
    }

    /// Sets the body's angular damping
    pub fn set_angular_damping(&mut self, damping: f32) {
        self.angular_damping = damping.max(0.0);
    }

    /// Returns whether the body is sleeping
    pub fn is_sleeping(&self) -> bool {
        self.flags.contains(BodyFlags::SLEEPING)
    }

    /// Puts the body to sleep
    pub fn put_to_sleep(&mut self) {
        if self.body_type == RigidBodyType::Dynamic && !self.is_sleeping() {
            self.flags.insert(BodyFlags::SLEEPING);
            self.linear_velocity = Vector2::zero();
            self.angular_velocity = 0.0;
            self.forces.clear();
        }
    }

    /// Wakes up the body
    pub fn wake_up(&mut self) {
        if self.is_sleeping() {
            self.flags.remove(BodyFlags::SLEEPING);
            self.sleeping_time = 0.0;
        }
    }

    /// Returns whether the body can sleep
    pub fn can_sleep(&self) -> bool {
        self.flags.contains(BodyFlags::CAN_SLEEP)
    }

    /// Sets whether the body can sleep
    pub fn set_can_sleep(&mut self, can_sleep: bool) {
        if can_sleep {
            self.flags.insert(BodyFlags::CAN_SLEEP);
        } else {
            self.flags.remove(BodyFlags::CAN_SLEEP);
            self.wake_up();
        }
    }

    /// Returns whether the body is affected by gravity
    pub fn is_affected_by_gravity(&self) -> bool {
        self.flags.contains(BodyFlags::AFFECTED_BY_GRAVITY)
    }

    /// Sets whether the body is affected by gravity
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.flags.set(BodyFlags::AFFECTED_BY_GRAVITY, affected);
    }

    /// Returns the time the body has been inactive
    pub fn get_sleeping_time(&self) -> f32 {
        self.sleeping_time
    }

    /// Sets the time the body has been inactive
    pub fn set_sleeping_time(&mut self, time: f32) {
        self.sleeping_time = time;
    }

    /// Applies a force to the body
    pub fn apply_force(&mut self, force: Vector2) {
        if self.body_type == RigidBodyType::Dynamic {
            self.wake_up();
            self.forces.push(ForceType::Force(force));
        }
    }

    /// Applies a force at a world-space point
    pub fn apply_force_at_point(&mut self, force: Vector2, point: Vector2) {
        if self.body_type == RigidBodyType::Dynamic {
            self.wake_up();
            self.forces.push(ForceType::ForceAtPoint { force, point });
        }
    }

    /// Applies a torque to the body
    pub fn apply_torque(&mut self, torque: f32) {
        if self.body_type == RigidBodyType::Dynamic {
            self.wake_up();
            self.forces.push(ForceType::Torque(torque));
        }
    }

    /// Applies an impulse at an offset `r` from the center of mass, changing
    /// velocities immediately. Used by the constraint solver.
    pub fn apply_impulse(&mut self, impulse: Vector2, r: Vector2) {
        if self.body_type != RigidBodyType::Dynamic {
            return;
        }
        self.linear_velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(&impulse) * self.inv_inertia;
    }

    /// Applies damping to the body's velocities
    pub fn apply_damping(&mut self, linear_damping: f32, angular_damping: f32) {
        if self.body_type != RigidBodyType::Dynamic || self.is_sleeping() {
            return;
        }

        let linear_damping_factor = 1.0 - (self.linear_damping + linear_damping).clamp(0.0, 1.0);
        self.linear_velocity *= linear_damping_factor;

        let angular_damping_factor = 1.0 - (self.angular_damping + angular_damping).clamp(0.0, 1.0);
        self.angular_velocity *= angular_damping_factor;
    }

    /// Integrates forces to update velocities
    pub fn integrate_forces(&mut self, dt: f32) {
        if self.body_type != RigidBodyType::Dynamic || self.is_sleeping() {
            return;
        }

        for force in &self.forces {
            match *force {
                ForceType::Force(force) => {
                    self.linear_velocity += force * (self.inv_mass * dt);
                }
                ForceType::ForceAtPoint { force, point } => {
                    self.linear_velocity += force * (self.inv_mass * dt);

                    // τ = r × F
                    let r = point - self.transform.position;
                    self.angular_velocity += r.cross(&force) * self.inv_inertia * dt;
                }
                ForceType::Torque(torque) => {
                    self.angular_velocity += torque * self.inv_inertia * dt;
                }
            }
        }

        self.forces.clear();
    }

    /// Integrates velocities to update position
    pub fn integrate_velocity(&mut self, dt: f32) {
        if self.body_type != RigidBodyType::Dynamic || self.is_sleeping() {
            return;
        }

        self.transform.position += self.linear_velocity * dt;
        self.transform.angle += self.angular_velocity * dt;
    }
}
