//! Draw primitives handed to the rendering surface.
//!
//! Coordinates are canvas pixels with the origin at the top-left corner and
//! y growing downward.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    White,
    /// Light gray used for the aiming black.
    Gray75,
    Red,
    Yellow,
    Blue,
}

/// Filled circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub center: [f64; 2],
    pub radius: f64,
    pub fill: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<Color>,
}

/// Unfilled circle outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: [f64; 2],
    pub radius: f64,
    pub stroke: Color,
}

/// Axis-aligned rectangle from `min` to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: [f64; 2],
    pub max: [f64; 2],
    pub fill: Color,
    pub outline: Color,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min[0] && x <= self.max[0] && y >= self.min[1] && y <= self.max[1]
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }
}

/// Text centered on `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub position: [f64; 2],
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Disc(Disc),
    Circle(Circle),
    Rect(Rect),
    Label(Label),
}

impl From<Disc> for Primitive {
    fn from(d: Disc) -> Self {
        Self::Disc(d)
    }
}

impl From<Circle> for Primitive {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Rect> for Primitive {
    fn from(r: Rect) -> Self {
        Self::Rect(r)
    }
}

impl From<Label> for Primitive {
    fn from(l: Label) -> Self {
        Self::Label(l)
    }
}
