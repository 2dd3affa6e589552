use std::collections::BTreeMap;

use crate::core::{
    BodyHandle, ConstraintHandle, ShapeId, SimulationConfig, GravityType,
    EventQueue, BodyEvent, BodyEventType, ConstraintEvent, ConstraintEventType,
    BodyStorage, ConstraintStorage, Storage,
};
use crate::bodies::{BodyGeometry, BodyState, RigidBody};
use crate::constraints::Constraint;
use crate::math::Transform;
use crate::Result;

/// The physics world: owns every body and constraint, and the registry that
/// maps drawable shapes to the bodies simulating them.
pub struct PhysicsWorld {
    /// All rigid bodies in the world
    bodies: BodyStorage<RigidBody>,

    /// All constraints in the world
    constraints: ConstraintStorage<Box<dyn Constraint>>,

    /// Which body simulates which shape
    shape_bodies: BTreeMap<ShapeId, BodyHandle>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Queue of physics events
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            constraints: ConstraintStorage::new(),
            shape_bodies: BTreeMap::new(),
            config,
            events: EventQueue::new(),
            time: 0.0,
        }
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: GravityType) {
        self.config.gravity = gravity;
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> GravityType {
        self.config.gravity
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns a mutable reference to the simulation configuration
    pub fn get_config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Adds a rigid body to the world and returns its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.add(body);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Added,
            body: handle,
        });

        handle
    }

    /// Registers a shape as an immovable body. Registering the same shape
    /// twice returns the existing body.
    pub fn make_static(&mut self, geometry: &dyn BodyGeometry) -> BodyHandle {
        let shape = geometry.shape_id();
        if let Some(&handle) = self.shape_bodies.get(&shape) {
            return handle;
        }

        let handle = self.add_body(RigidBody::new_static(geometry));
        self.shape_bodies.insert(shape, handle);
        tracing::debug!(?shape, body = ?handle, "registered static body");
        handle
    }

    /// Registers a shape as a dynamic body with mass `area * density`.
    /// Registering the same shape twice returns the existing body.
    pub fn make_dynamic(&mut self, geometry: &dyn BodyGeometry, density: f32) -> BodyHandle {
        let shape = geometry.shape_id();
        if let Some(&handle) = self.shape_bodies.get(&shape) {
            return handle;
        }

        let body = RigidBody::new_dynamic(geometry, density);
        let mass = body.get_mass();
        let handle = self.add_body(body);
        self.shape_bodies.insert(shape, handle);
        tracing::debug!(?shape, body = ?handle, mass, "registered dynamic body");
        handle
    }

    /// Returns the body simulating the given shape, if any
    pub fn body_for_shape(&self, shape: ShapeId) -> Option<BodyHandle> {
        self.shape_bodies.get(&shape).copied()
    }

    /// Iterates over every shape binding in shape order
    pub fn shape_bindings(&self) -> impl Iterator<Item = (ShapeId, BodyHandle)> + '_ {
        self.shape_bodies.iter().map(|(s, b)| (*s, *b))
    }

    /// Removes a rigid body from the world, together with its constraints
    /// and its shape binding
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        // Fail before touching constraints if the body does not exist
        self.bodies.get_body(handle)?;

        let constraint_handles: Vec<ConstraintHandle> = self.constraints
            .iter()
            .filter(|(_, constraint)| constraint.involves_body(handle))
            .map(|(c_handle, _)| c_handle)
            .collect();

        for c_handle in constraint_handles {
            self.remove_constraint(c_handle)?;
        }

        self.shape_bodies.retain(|_, body| *body != handle);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Removed,
            body: handle,
        });

        self.bodies.remove(handle).ok_or_else(|| {
            crate::error::PhysicsError::InternalError(format!("Body {:?} vanished during removal", handle))
        })
    }

    /// Gets a reference to a rigid body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a rigid body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.bodies.get_body_mut(handle)
    }

    /// Gets the transform of a rigid body
    pub fn get_transform(&self, handle: BodyHandle) -> Result<Transform> {
        Ok(self.bodies.get_body(handle)?.get_transform())
    }

    /// Overwrites a body's position, rotation and velocities in one call.
    /// The sleep state is left alone; call [`wake_body`](Self::wake_body) to
    /// have the solver act on the new state.
    pub fn set_body_state(&mut self, handle: BodyHandle, state: BodyState) -> Result<()> {
        self.bodies.get_body_mut(handle)?.set_state(state);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::StateInjected,
            body: handle,
        });
        Ok(())
    }

    /// Puts a body to sleep: it keeps its transform but is excluded from
    /// integration and constraint solving until woken
    pub fn sleep_body(&mut self, handle: BodyHandle) -> Result<()> {
        let body = self.bodies.get_body_mut(handle)?;
        if body.is_dynamic() && !body.is_sleeping() {
            body.put_to_sleep();
            tracing::debug!(body = ?handle, "body put to sleep");

            self.events.add_body_event(BodyEvent {
                event_type: BodyEventType::Sleep,
                body: handle,
            });
        }
        Ok(())
    }

    /// Wakes a sleeping body
    pub fn wake_body(&mut self, handle: BodyHandle) -> Result<()> {
        let body = self.bodies.get_body_mut(handle)?;
        if body.is_sleeping() {
            body.wake_up();
            tracing::debug!(body = ?handle, "body woken");

            self.events.add_body_event(BodyEvent {
                event_type: BodyEventType::Awake,
                body: handle,
            });
        }
        Ok(())
    }

    /// Adds a constraint to the world and returns its handle
    pub fn add_constraint(&mut self, constraint: Box<dyn Constraint>) -> ConstraintHandle {
        // Wake up bodies involved in the constraint
        for &body_handle in constraint.get_bodies() {
            let _ = self.wake_body(body_handle);
        }

        let handle = self.constraints.add(constraint);
        self.events.add_constraint_event(ConstraintEvent {
            event_type: ConstraintEventType::Added,
            constraint: handle,
        });
        handle
    }

    /// Removes a constraint from the world
    pub fn remove_constraint(&mut self, handle: ConstraintHandle) -> Result<Box<dyn Constraint>> {
        self.constraints.get_constraint(handle)?;

        let constraint = self.constraints.remove(handle).ok_or_else(|| {
            crate::error::PhysicsError::InternalError(format!("Constraint {:?} vanished during removal", handle))
        })?;

        self.events.add_constraint_event(ConstraintEvent {
            event_type: ConstraintEventType::Removed,
            constraint: handle,
        });

        Ok(constraint)
    }

    /// Gets a reference to a constraint by its handle
    pub fn get_constraint(&self, handle: ConstraintHandle) -> Result<&dyn Constraint> {
        Ok(&**self.constraints.get_constraint(handle)?)
    }

    /// Returns whether the constraint is still registered
    pub fn has_constraint(&self, handle: ConstraintHandle) -> bool {
        self.constraints.get(handle).is_some()
    }

    /// Runs the physics simulation for the given time step
    pub fn step(&mut self, time_step: f32) {
        // Clear events from previous step
        self.events.clear();

        let fixed_step = self.config.time_step;
        let max_steps = self.config.max_substeps;

        let mut remaining_time = time_step;
        let mut steps = 0;

        while remaining_time > 0.0 && steps < max_steps {
            let dt = fixed_step.min(remaining_time);

            self.step_simulation(dt);

            remaining_time -= dt;
            steps += 1;
        }

        self.time += time_step;
    }

    /// Performs a single step of the physics simulation
    fn step_simulation(&mut self, dt: f32) {
        for (_, body) in self.bodies.iter_mut() {
            if !body.is_dynamic() || body.is_sleeping() {
                continue;
            }

            if let GravityType::Constant(gravity) = self.config.gravity {
                if body.is_affected_by_gravity() {
                    body.apply_force(gravity * body.get_mass());
                }
            }

            body.apply_damping(self.config.linear_damping, self.config.angular_damping);
            body.integrate_forces(dt);
        }

        let active = self.active_constraints();

        for &handle in &active {
            if let Some(constraint) = self.constraints.get_mut(handle) {
                constraint.pre_solve(dt, &mut self.bodies);
            }
        }

        for _ in 0..self.config.velocity_iterations {
            for &handle in &active {
                if let Some(constraint) = self.constraints.get_mut(handle) {
                    constraint.solve_velocity(dt, &mut self.bodies);
                }
            }
        }

        for (_, body) in self.bodies.iter_mut() {
            body.integrate_velocity(dt);
        }

        if self.config.allow_sleeping {
            self.update_sleeping(dt);
        }
    }

    /// Constraints with at least one awake dynamic body. A sleeping dynamic
    /// partner of such a constraint is woken so the pair is solved together.
    fn active_constraints(&mut self) -> Vec<ConstraintHandle> {
        let mut active = Vec::new();
        let mut to_wake = Vec::new();

        for (handle, constraint) in self.constraints.iter() {
            let mut awake = false;
            for &body_handle in constraint.get_bodies() {
                if let Some(body) = self.bodies.get(body_handle) {
                    if body.is_dynamic() && !body.is_sleeping() {
                        awake = true;
                    }
                }
            }

            if awake {
                active.push(handle);
                to_wake.extend(constraint.get_bodies().iter().copied());
            }
        }

        for body_handle in to_wake {
            let _ = self.wake_body(body_handle);
        }

        active
    }

    /// Accumulates rest time for slow bodies and puts them to sleep
    fn update_sleeping(&mut self, dt: f32) {
        let linear_threshold_sq = self.config.linear_sleep_threshold.powi(2);
        let angular_threshold = self.config.angular_sleep_threshold;
        let time_threshold = self.config.sleep_time_threshold;

        let mut fall_asleep = Vec::new();

        for (handle, body) in self.bodies.iter_mut() {
            if !body.is_dynamic() || body.is_sleeping() || !body.can_sleep() {
                continue;
            }

            let slow = body.get_linear_velocity().length_squared() <= linear_threshold_sq
                && body.get_angular_velocity().abs() <= angular_threshold;

            if slow {
                let idle = body.get_sleeping_time() + dt;
                body.set_sleeping_time(idle);
                if idle >= time_threshold {
                    fall_asleep.push(handle);
                }
            } else {
                body.set_sleeping_time(0.0);
            }
        }

        for handle in fall_asleep {
            let _ = self.sleep_body(handle);
        }
    }

    /// Returns a reference to the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Clears the world of all bodies, constraints and shape bindings
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.constraints.clear();
        self.shape_bodies.clear();
        self.events.clear();
        self.time = 0.0;
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns the number of constraints in the world
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
