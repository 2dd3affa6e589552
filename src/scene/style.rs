use crate::error::PhysicsError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// An RGB colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const GREY: Color = Color { r: 0.5, g: 0.5, b: 0.5 };
    pub const BLUE: Color = Color { r: 0.345, g: 0.769, b: 0.867 };
    pub const ORANGE: Color = Color { r: 1.0, g: 0.525, b: 0.184 };

    /// Creates a colour, clamping each component to `[0, 1]`
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PhysicsError::InvalidParameter(format!("Invalid hex colour: {}", hex)));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| PhysicsError::InvalidParameter(format!("Invalid hex colour: {}", hex)))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats the colour as `#RRGGBB`
    pub fn to_hex(&self) -> String {
        let to_byte = |c: f32| (c * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }
}

/// Appearance of a drawable shape
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ShapeStyle {
    pub stroke_width: f32,
    pub stroke_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub fill_opacity: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_width: 4.0,
            stroke_color: None,
            fill_color: None,
            fill_opacity: 0.0,
        }
    }
}
