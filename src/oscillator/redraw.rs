use crate::core::{PhysicsWorld, ShapeId};
use crate::oscillator::{resolve_anchor, synthesize, SpringEnds, SpringStyle};
use crate::scene::{ShapeStorage, Updater};
use crate::Result;

/// Rebuilds a spring curve between its two ends. Registered with a scene
/// as a per-frame task; holds everything it reads as plain values.
#[derive(Debug, Clone)]
pub struct SpringRedraw {
    ends: SpringEnds,
    style: SpringStyle,
    curve: ShapeId,
}

impl SpringRedraw {
    pub fn new(ends: SpringEnds, style: SpringStyle, curve: ShapeId) -> Self {
        Self { ends, style, curve }
    }

    pub fn curve(&self) -> ShapeId {
        self.curve
    }

    /// Replaces the curve's points with a fresh coil between the current
    /// attachment points. Touches nothing but the curve.
    pub fn redraw(&self, shapes: &mut ShapeStorage, world: &PhysicsWorld) -> Result<()> {
        let anchor = resolve_anchor(shapes.get_checked(self.ends.anchor_shape)?, world, self.ends.anchor_offset)?;
        let far = resolve_anchor(shapes.get_checked(self.ends.body_shape)?, world, self.ends.body_offset)?;

        shapes
            .get_checked_mut(self.curve)?
            .set_points(synthesize(anchor, far, &self.style));
        Ok(())
    }
}

impl Updater for SpringRedraw {
    fn name(&self) -> &str {
        "spring redraw"
    }

    fn update(&mut self, shapes: &mut ShapeStorage, world: &PhysicsWorld) -> Result<()> {
        self.redraw(shapes, world)?;
        tracing::trace!(curve = ?self.curve, "spring redrawn");
        Ok(())
    }
}
