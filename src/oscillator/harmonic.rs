use crate::core::{BodyHandle, ShapeId};
use crate::error::PhysicsError;
use crate::math::{Vector2, EPSILON};
use crate::oscillator::{
    resolve_anchor, InitialCondition, JointChange, SpringEnds, SpringJoint, SpringParams, SpringRedraw,
    SpringStyle, StateInjector,
};
use crate::scene::{Scene, Shape, ShapeStyle, UpdaterHandle};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Half-height of the wall segment the spring hangs from
const ANCHOR_HALF_HEIGHT: f32 = 0.6;

/// Construction parameters of a [`SpringBlockOscillator`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct OscillatorConfig {
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub block_mass: f32,

    /// Block width and height
    pub block_size: (f32, f32),

    /// World position of the spring's fixed end
    pub anchor_point: Vector2,

    pub spring_style: SpringStyle,
    pub anchor_style: Option<ShapeStyle>,
    pub block_style: Option<ShapeStyle>,

    /// Whether the spring curve is redrawn every frame
    pub animate_spring: bool,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        let spring = SpringParams::default();
        Self {
            rest_length: spring.rest_length,
            stiffness: spring.stiffness,
            damping: spring.damping,
            block_mass: 1.5,
            block_size: (0.8, 0.8),
            anchor_point: Vector2::new(-4.0, 0.0),
            spring_style: SpringStyle::default(),
            anchor_style: None,
            block_style: None,
            animate_spring: true,
        }
    }
}

impl OscillatorConfig {
    pub fn with_rest_length(mut self, rest_length: f32) -> Self {
        self.rest_length = rest_length;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_block_mass(mut self, block_mass: f32) -> Self {
        self.block_mass = block_mass;
        self
    }

    pub fn with_block_size(mut self, width: f32, height: f32) -> Self {
        self.block_size = (width, height);
        self
    }

    pub fn with_anchor_point(mut self, anchor_point: Vector2) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    pub fn with_spring_style(mut self, style: SpringStyle) -> Self {
        self.spring_style = style;
        self
    }

    pub fn with_anchor_style(mut self, style: ShapeStyle) -> Self {
        self.anchor_style = Some(style);
        self
    }

    pub fn with_block_style(mut self, style: ShapeStyle) -> Self {
        self.block_style = Some(style);
        self
    }

    pub fn with_animate_spring(mut self, animate: bool) -> Self {
        self.animate_spring = animate;
        self
    }

    /// The spring's physical parameters
    pub fn spring_params(&self) -> SpringParams {
        SpringParams {
            rest_length: self.rest_length,
            stiffness: self.stiffness,
            damping: self.damping,
        }
    }

    /// Rejects negative or non-finite physical parameters. A zero-size block
    /// is allowed; its density falls back to 1 on attach.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.block_size;
        let non_negative = [
            ("rest length", self.rest_length),
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("block mass", self.block_mass),
            ("block width", width),
            ("block height", height),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidParameter(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !self.anchor_point.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "anchor point must be finite, got {:?}",
                self.anchor_point
            )));
        }

        Ok(())
    }
}

/// Lifecycle state of an oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorState {
    /// Not yet registered with the simulation
    Unattached,

    /// Bodies are simulated but no spring is active
    Attached,

    /// The spring constraint is active
    Oscillating,
}

/// A block tied to a fixed wall by a spring: three shapes (wall segment,
/// spring curve, block) and the simulation objects behind them.
///
/// The oscillator holds only ids; every operation borrows the [`Scene`] that
/// owns the shapes and the world.
#[derive(Debug)]
pub struct SpringBlockOscillator {
    config: OscillatorConfig,
    anchor: ShapeId,
    block: ShapeId,
    spring: ShapeId,
    ends: SpringEnds,
    joint: SpringJoint,
    injector: StateInjector,
    redraw: SpringRedraw,
    updater: Option<UpdaterHandle>,
    attached: bool,
}

impl SpringBlockOscillator {
    /// Adds the oscillator's shapes to `scene` with the block at rest and
    /// draws the spring once. The simulation is not touched until
    /// [`attach`](Self::attach).
    pub fn new(scene: &mut Scene, config: OscillatorConfig) -> Result<Self> {
        config.validate()?;

        let (width, height) = config.block_size;
        let anchor_point = config.anchor_point;
        let injector = StateInjector::new(config.rest_length, width * 0.5);

        let half = Vector2::new(0.0, ANCHOR_HALF_HEIGHT);
        let anchor_shape = Shape::line(anchor_point + half, anchor_point - half)
            .with_style(config.anchor_style.clone().unwrap_or_default());
        // The spring hangs from the midpoint of the wall segment
        let anchor_offset = anchor_shape
            .get_transform()
            .inverse_transform_point(anchor_shape.point_from_proportion(0.5));

        let mut block_shape = Shape::rectangle(width, height)
            .with_style(config.block_style.clone().unwrap_or_default());
        block_shape.move_to(injector.rest_position(anchor_point));

        let spring_shape = Shape::curve().with_style(ShapeStyle {
            stroke_width: config.spring_style.stroke_width(),
            stroke_color: config.spring_style.color(),
            ..ShapeStyle::default()
        });

        let anchor = scene.add_shape(anchor_shape);
        let spring = scene.add_shape(spring_shape);
        let block = scene.add_shape(block_shape);

        let ends = SpringEnds {
            anchor_shape: anchor,
            anchor_offset,
            body_shape: block,
            body_offset: Vector2::new(-width * 0.5, 0.0),
        };
        let redraw = SpringRedraw::new(ends, config.spring_style, spring);
        {
            let (shapes, world) = scene.split_mut();
            redraw.redraw(shapes, world)?;
        }

        let updater = if config.animate_spring {
            Some(scene.add_updater(Box::new(redraw.clone())))
        } else {
            None
        };

        Ok(Self {
            joint: SpringJoint::new(config.spring_params()),
            config,
            anchor,
            block,
            spring,
            ends,
            injector,
            redraw,
            updater,
            attached: false,
        })
    }

    /// Registers the wall as a static body and the block as a dynamic body,
    /// then creates the spring. Once attached, further calls leave the world
    /// alone and only report whether a spring is active; after
    /// [`stop`](Self::stop) only [`start`](Self::start) brings the spring back.
    pub fn attach(&mut self, scene: &mut Scene) -> Result<JointChange> {
        if self.attached {
            return Ok(match self.joint.active(scene.world()) {
                Some(handle) => JointChange::AlreadyActive(handle),
                None => JointChange::NotActive,
            });
        }

        let (width, height) = self.config.block_size;
        let area = width * height;
        let density = if area > EPSILON {
            self.config.block_mass / area
        } else {
            tracing::warn!(width, height, "block has no area, using density 1");
            1.0
        };

        scene.make_static_body(self.anchor)?;
        scene.make_rigid_body(self.block, density)?;
        self.attached = true;

        let (shapes, world) = scene.split_mut();
        let change = self.joint.create(Some(world), shapes, &self.ends)?;
        tracing::debug!(block = ?self.block, density, "oscillator attached");
        Ok(change)
    }

    /// Starts oscillating from `displacement` off the rest position with
    /// `velocity` along the spring, re-creating the spring if it was
    /// stopped. Fails with [`PhysicsError::NotAttached`] before
    /// [`attach`](Self::attach), leaving everything untouched.
    pub fn start(&mut self, scene: &mut Scene, displacement: f32, velocity: f32) -> Result<JointChange> {
        if !self.attached {
            return Err(PhysicsError::NotAttached(
                "attach must be called before starting motion".to_string(),
            ));
        }

        let body = self.require_body(scene)?;
        let anchor_point = self.anchor_point(scene)?;

        let (shapes, world) = scene.split_mut();
        let change = self.joint.create(Some(&mut *world), shapes, &self.ends)?;
        self.injector.set_initial_condition(
            world,
            body,
            anchor_point,
            InitialCondition::new(displacement, velocity),
        )?;
        Ok(change)
    }

    /// Removes the spring and puts the block to sleep. A no-op before
    /// [`attach`](Self::attach); safe to repeat.
    pub fn stop(&mut self, scene: &mut Scene) -> Result<JointChange> {
        if !self.attached {
            return Ok(JointChange::NotActive);
        }

        let world = scene.world_mut();
        let change = self.joint.remove(world)?;
        if let Some(body) = world.body_for_shape(self.block) {
            world.sleep_body(body)?;
        }
        Ok(change)
    }

    /// Puts the block back at rest with zero velocity. The spring and the
    /// block's sleep state are left as they are; without a body this does
    /// nothing.
    pub fn reset(&mut self, scene: &mut Scene) -> Result<()> {
        let body = match self.block_body(scene) {
            Some(body) => body,
            None => return Ok(()),
        };
        let anchor_point = self.anchor_point(scene)?;
        self.injector.reset(scene.world_mut(), body, anchor_point)
    }

    /// Redraws the spring curve now, for oscillators built without a
    /// per-frame redraw
    pub fn redraw_spring(&self, scene: &mut Scene) -> Result<()> {
        let (shapes, world) = scene.split_mut();
        self.redraw.redraw(shapes, world)
    }

    pub fn state(&self, scene: &Scene) -> OscillatorState {
        if !self.attached {
            OscillatorState::Unattached
        } else if self.joint.is_active(scene.world()) {
            OscillatorState::Oscillating
        } else {
            OscillatorState::Attached
        }
    }

    pub fn is_oscillating(&self, scene: &Scene) -> bool {
        self.state(scene) == OscillatorState::Oscillating
    }

    /// World position of the spring's fixed end
    pub fn anchor_point(&self, scene: &Scene) -> Result<Vector2> {
        resolve_anchor(scene.shape(self.anchor)?, scene.world(), self.ends.anchor_offset)
    }

    /// World position where the spring meets the block
    pub fn block_anchor_point(&self, scene: &Scene) -> Result<Vector2> {
        resolve_anchor(scene.shape(self.block)?, scene.world(), self.ends.body_offset)
    }

    /// Block centre at which the spring exerts no force
    pub fn rest_center(&self, scene: &Scene) -> Result<Vector2> {
        Ok(self.injector.rest_position(self.anchor_point(scene)?))
    }

    pub fn block_body(&self, scene: &Scene) -> Option<BodyHandle> {
        scene.world().body_for_shape(self.block)
    }

    pub fn anchor_shape(&self) -> ShapeId {
        self.anchor
    }

    pub fn block_shape(&self) -> ShapeId {
        self.block
    }

    pub fn spring_shape(&self) -> ShapeId {
        self.spring
    }

    /// The per-frame redraw task, if the spring is animated
    pub fn updater(&self) -> Option<UpdaterHandle> {
        self.updater
    }

    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }

    fn require_body(&self, scene: &Scene) -> Result<BodyHandle> {
        self.block_body(scene).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("No body simulates block shape {:?}", self.block))
        })
    }
}
