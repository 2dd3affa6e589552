//! Spring-and-block oscillators whose spring curve tracks the simulation.
//!
//! The pieces, leaf first:
//!
//! - [`Attachment`] / [`resolve_anchor`]: where a shape's attachment point is
//!   this frame, from its body when simulated or from its drawn transform
//!   otherwise.
//! - [`CoilCurve`]: the sample points of a coiled spring between two points.
//! - [`SpringJoint`]: lifecycle of the damped-spring constraint.
//! - [`StateInjector`]: writes initial conditions into a live body.
//! - [`SpringRedraw`]: the per-frame task that rebuilds the spring curve.
//! - [`SpringBlockOscillator`]: all of the above behind attach / start /
//!   stop / reset.

mod anchor;
mod curve;
mod joint;
mod injector;
mod redraw;
mod harmonic;

pub use self::anchor::{Attachment, resolve_anchor};
pub use self::curve::{CoilCurve, SpringStyle, synthesize};
pub use self::joint::{JointChange, SpringEnds, SpringJoint, SpringParams};
pub use self::injector::{InitialCondition, StateInjector};
pub use self::redraw::SpringRedraw;
pub use self::harmonic::{OscillatorConfig, OscillatorState, SpringBlockOscillator};
