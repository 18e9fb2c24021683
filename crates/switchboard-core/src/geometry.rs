//! Logical-unit geometry used for window placement

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A screen rectangle, typically a monitor's visible work area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left position that centers a window of `size` inside this rect.
    /// Windows larger than the rect are pinned to its origin.
    pub fn center(&self, size: Size) -> Position {
        let x = self.x + ((self.width - size.width) / 2.0).max(0.0);
        let y = self.y + ((self.height - size.height) / 2.0).max(0.0);
        Position::new(x.round(), y.round())
    }
}
