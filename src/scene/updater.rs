use crate::core::PhysicsWorld;
use crate::scene::ShapeStorage;
use crate::Result;

/// Identifies a registered updater within its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdaterHandle(pub(crate) u32);

/// A task run once per frame, after the simulation step.
///
/// Updaters carry their own context explicitly; the scene lends them the
/// shape registry (mutably, to rewrite drawn geometry) and the world
/// (read-only).
pub trait Updater {
    /// Returns the name of the updater, for diagnostics
    fn name(&self) -> &str;

    /// Runs the task for the current frame
    fn update(&mut self, shapes: &mut ShapeStorage, world: &PhysicsWorld) -> Result<()>;
}
