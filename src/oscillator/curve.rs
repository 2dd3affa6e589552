use std::f32::consts::TAU;
use std::iter::FusedIterator;

use crate::math::{Vector2, EPSILON};
use crate::scene::Color;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Appearance of a coiled spring. Built once and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SpringStyle {
    coils: u32,
    amplitude: f32,
    stroke_width: f32,
    color: Option<Color>,
}

impl SpringStyle {
    pub fn new(coils: u32, amplitude: f32) -> Self {
        Self::default().with_coils(coils).with_amplitude(amplitude)
    }

    pub fn with_coils(mut self, coils: u32) -> Self {
        self.coils = coils;
        self
    }

    /// Sets the coil amplitude, clamped to be non-negative
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude.max(0.0);
        self
    }

    /// Sets the stroke width, clamped to be non-negative
    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width.max(0.0);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn coils(&self) -> u32 {
        self.coils
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Number of sample points per curve. Grows with the coil count and
    /// never drops below 8.
    pub fn resolution(&self) -> usize {
        (self.coils as usize).saturating_mul(4).max(8)
    }
}

impl Default for SpringStyle {
    fn default() -> Self {
        Self {
            coils: 12,
            amplitude: 0.1,
            stroke_width: 4.0,
            color: None,
        }
    }
}

/// Sample points of a coiled spring, produced lazily in order from the
/// anchor to the far end. Consumed once per redraw.
#[derive(Debug, Clone)]
pub struct CoilCurve {
    anchor: Vector2,
    far: Vector2,
    axis: Vector2,
    normal: Vector2,
    amplitude: f32,
    coils: f32,
    resolution: usize,
    next: usize,
}

impl CoilCurve {
    fn sample(&self, index: usize) -> Vector2 {
        // `resolution` is at least 8, so the divisor is never zero
        let t = index as f32 / (self.resolution - 1) as f32;
        let sine = (TAU * self.coils * t).sin();
        self.anchor + self.axis * t + self.normal * (sine * self.amplitude)
    }
}

impl Iterator for CoilCurve {
    type Item = Vector2;

    fn next(&mut self) -> Option<Vector2> {
        if self.next >= self.resolution {
            return None;
        }
        let point = if self.next == self.resolution - 1 {
            // sin(2πc) and anchor + axis both round, so emit the far end as given
            self.far
        } else {
            self.sample(self.next)
        };
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.resolution - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CoilCurve {}

impl FusedIterator for CoilCurve {}

/// Builds the coil curve from `anchor` to `far`.
///
/// Points are `anchor + axis * t + normal * amplitude * sin(2π * coils * t)`
/// for `t` uniform in `[0, 1]`, where `axis = far - anchor` and `normal` is
/// the axis direction turned a quarter turn counter-clockwise. When the two
/// points coincide the axis becomes one unit along +x, so the curve is
/// still well defined.
pub fn synthesize(anchor: Vector2, mut far: Vector2, style: &SpringStyle) -> CoilCurve {
    let mut axis = far - anchor;
    let mut length = axis.length();
    if length <= EPSILON {
        axis = Vector2::unit_x();
        length = 1.0;
        far = anchor + axis;
    }
    let direction = axis / length;

    CoilCurve {
        anchor,
        far,
        axis,
        normal: direction.perpendicular(),
        amplitude: style.amplitude(),
        coils: style.coils() as f32,
        resolution: style.resolution(),
        next: 0,
    }
}
