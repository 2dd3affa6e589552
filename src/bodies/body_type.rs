/// Type of rigid body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RigidBodyType {
    /// Dynamic bodies are fully simulated (affected by forces and constraints)
    Dynamic,

    /// Static bodies don't move and act as infinite-mass anchors
    Static,
}
