use crate::bodies::BodyGeometry;
use crate::core::ShapeId;
use crate::math::{Transform, Vector2};
use crate::scene::ShapeStyle;

/// Geometric primitive behind a [`Shape`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// A straight segment
    Line,

    /// An axis-aligned rectangle in local space
    Rectangle { width: f32, height: f32 },

    /// A free polyline whose points are replaced wholesale by [`Shape::set_points`]
    Curve,
}

/// A cubic Bézier segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: Vector2,
    pub control_a: Vector2,
    pub control_b: Vector2,
    pub end: Vector2,
}

impl CubicSegment {
    /// Evaluates the segment at `t` in `[0, 1]`
    pub fn point_at(&self, t: f32) -> Vector2 {
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.control_a * (3.0 * u * u * t)
            + self.control_b * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

/// A drawable vector shape: an ordered point list in local space placed in
/// the world by a transform.
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    local_points: Vec<Vector2>,
    transform: Transform,
    style: ShapeStyle,
}

impl Shape {
    fn with_points(kind: ShapeKind, local_points: Vec<Vector2>, transform: Transform) -> Self {
        Self {
            // Replaced with the real id when the shape is added to a scene
            id: ShapeId(0),
            kind,
            local_points,
            transform,
            style: ShapeStyle::default(),
        }
    }

    /// A segment from `start` to `end`, positioned at its midpoint
    pub fn line(start: Vector2, end: Vector2) -> Self {
        let center = (start + end) * 0.5;
        Self::with_points(
            ShapeKind::Line,
            vec![start - center, end - center],
            Transform::from_position(center),
        )
    }

    /// A rectangle centered on the origin
    pub fn rectangle(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self::with_points(
            ShapeKind::Rectangle { width, height },
            vec![
                Vector2::new(-hw, -hh),
                Vector2::new(hw, -hh),
                Vector2::new(hw, hh),
                Vector2::new(-hw, hh),
                Vector2::new(-hw, -hh),
            ],
            Transform::identity(),
        )
    }

    /// An empty curve
    pub fn curve() -> Self {
        Self::with_points(ShapeKind::Curve, Vec::new(), Transform::identity())
    }

    /// Replaces the style, builder-style
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ShapeId) {
        self.id = id;
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Replaces the point list with world-space points and resets the transform
    pub fn set_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Vector2>,
    {
        self.local_points.clear();
        self.local_points.extend(points);
        self.transform = Transform::identity();
    }

    /// The point list in world space
    pub fn points(&self) -> Vec<Vector2> {
        self.local_points
            .iter()
            .map(|p| self.transform.transform_point(*p))
            .collect()
    }

    pub fn point_count(&self) -> usize {
        self.local_points.len()
    }

    pub fn get_transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn get_angle(&self) -> f32 {
        self.transform.angle
    }

    /// Center of the world-space bounding box, or the transform origin for an empty shape
    pub fn get_center(&self) -> Vector2 {
        let mut points = self.points().into_iter();
        let first = match points.next() {
            Some(p) => p,
            None => return self.transform.position,
        };

        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Vector2::new(min.x.min(p.x), min.y.min(p.y)),
                Vector2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        (min + max) * 0.5
    }

    /// Translates the shape so that its center lands on `point`
    pub fn move_to(&mut self, point: Vector2) {
        let shift = point - self.get_center();
        self.transform.position += shift;
    }

    /// The point at fraction `alpha` of the polyline's arc length
    pub fn point_from_proportion(&self, alpha: f32) -> Vector2 {
        let points = self.points();
        match points.len() {
            0 => return self.transform.position,
            1 => return points[0],
            _ => {}
        }

        let lengths: Vec<f32> = points.windows(2).map(|w| w[0].distance(&w[1])).collect();
        let total: f32 = lengths.iter().sum();
        if total <= crate::math::EPSILON {
            return points[0];
        }

        let mut remaining = alpha.clamp(0.0, 1.0) * total;
        for (segment, &length) in points.windows(2).zip(lengths.iter()) {
            if remaining <= length {
                let t = if length > 0.0 { remaining / length } else { 0.0 };
                return segment[0].lerp(&segment[1], t);
            }
            remaining -= length;
        }

        points[points.len() - 1]
    }

    /// Smooth cubic segments passing through every point (Catmull-Rom)
    pub fn cubic_segments(&self) -> Vec<CubicSegment> {
        let points = self.points();
        if points.len() < 2 {
            return Vec::new();
        }

        let last = points.len() - 1;
        (0..last)
            .map(|i| {
                let p0 = points[i.saturating_sub(1)];
                let p1 = points[i];
                let p2 = points[i + 1];
                let p3 = points[(i + 2).min(last)];
                CubicSegment {
                    start: p1,
                    control_a: p1 + (p2 - p0) / 6.0,
                    control_b: p2 - (p3 - p1) / 6.0,
                    end: p2,
                }
            })
            .collect()
    }

    /// Width and height for rectangles
    pub fn dimensions(&self) -> Option<(f32, f32)> {
        match self.kind {
            ShapeKind::Rectangle { width, height } => Some((width, height)),
            _ => None,
        }
    }
}

impl BodyGeometry for Shape {
    fn shape_id(&self) -> ShapeId {
        self.id
    }

    fn get_transform(&self) -> Transform {
        self.transform
    }

    fn get_area(&self) -> f32 {
        match self.kind {
            ShapeKind::Rectangle { width, height } => (width * height).abs(),
            ShapeKind::Line | ShapeKind::Curve => 0.0,
        }
    }

    fn get_moment_of_inertia(&self, mass: f32) -> f32 {
        match self.kind {
            ShapeKind::Rectangle { width, height } => mass * (width * width + height * height) / 12.0,
            ShapeKind::Line => {
                let length = match self.local_points.as_slice() {
                    [a, b] => a.distance(b),
                    _ => 0.0,
                };
                mass * length * length / 12.0
            }
            ShapeKind::Curve => 0.0,
        }
    }
}
