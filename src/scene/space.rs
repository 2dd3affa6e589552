use crate::bodies::RigidBodyType;
use crate::core::{BodyHandle, HandleStorage, PhysicsWorld, ShapeId, SimulationConfig, Storage};
use crate::scene::{Shape, Updater, UpdaterHandle};
use crate::Result;

/// Storage for drawable shapes
pub type ShapeStorage = HandleStorage<ShapeId, Shape>;

/// A scene couples drawable shapes with a physics world and drives both,
/// frame by frame, in a fixed order: simulation step, shape sync, updaters.
pub struct Scene {
    shapes: ShapeStorage,
    world: PhysicsWorld,
    updaters: Vec<(UpdaterHandle, Box<dyn Updater>)>,
    next_updater: u32,
    frame: u64,
}

impl Scene {
    /// Creates an empty scene with a world using the given configuration
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            shapes: ShapeStorage::new(),
            world: PhysicsWorld::with_config(config),
            updaters: Vec::new(),
            next_updater: 1,
            frame: 0,
        }
    }

    /// Adds a shape and returns its id
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.add(shape);
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.set_id(id);
        }
        id
    }

    pub fn shape(&self, id: ShapeId) -> Result<&Shape> {
        self.shapes.get_checked(id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Result<&mut Shape> {
        self.shapes.get_checked_mut(id)
    }

    pub fn shapes(&self) -> &ShapeStorage {
        &self.shapes
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    /// Borrows the shapes and the world at the same time
    pub fn split_mut(&mut self) -> (&mut ShapeStorage, &mut PhysicsWorld) {
        (&mut self.shapes, &mut self.world)
    }

    /// Registers a shape with the world as an immovable body
    pub fn make_static_body(&mut self, id: ShapeId) -> Result<BodyHandle> {
        let shape = self.shapes.get_checked(id)?;
        Ok(self.world.make_static(shape))
    }

    /// Registers a shape with the world as a dynamic body of the given density
    pub fn make_rigid_body(&mut self, id: ShapeId, density: f32) -> Result<BodyHandle> {
        let shape = self.shapes.get_checked(id)?;
        Ok(self.world.make_dynamic(shape, density))
    }

    /// Registers a per-frame task
    pub fn add_updater(&mut self, updater: Box<dyn Updater>) -> UpdaterHandle {
        let handle = UpdaterHandle(self.next_updater);
        self.next_updater += 1;
        self.updaters.push((handle, updater));
        handle
    }

    /// Unregisters a per-frame task; returns whether it was registered
    pub fn remove_updater(&mut self, handle: UpdaterHandle) -> bool {
        let before = self.updaters.len();
        self.updaters.retain(|(h, _)| *h != handle);
        self.updaters.len() != before
    }

    pub fn updater_count(&self) -> usize {
        self.updaters.len()
    }

    /// Number of frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Advances one frame: steps the simulation by `dt`, copies dynamic body
    /// transforms onto their shapes, then runs every updater in
    /// registration order
    pub fn advance(&mut self, dt: f32) -> Result<()> {
        self.world.step(dt);
        self.sync_shapes()?;
        self.run_updaters()?;
        self.frame += 1;
        Ok(())
    }

    /// Runs every updater once without stepping the simulation
    pub fn run_updaters(&mut self) -> Result<()> {
        for (_, updater) in self.updaters.iter_mut() {
            tracing::trace!(updater = updater.name(), frame = self.frame, "running updater");
            updater.update(&mut self.shapes, &self.world)?;
        }
        Ok(())
    }

    /// Copies every dynamic body's transform onto the shape it simulates
    fn sync_shapes(&mut self) -> Result<()> {
        for (shape_id, body_handle) in self.world.shape_bindings() {
            let body = self.world.get_body(body_handle)?;
            if body.get_body_type() != RigidBodyType::Dynamic {
                continue;
            }
            self.shapes.get_checked_mut(shape_id)?.set_transform(body.get_transform());
        }
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
