//! Geometric primitives exchanged with the sheet context, in pixels.
//! The y axis points down.

use serde::{Deserialize, Serialize};

/// Integer pixel location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Sub-pixel location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        PointF::new(p.x as f64, p.y as f64)
    }
}

/// Axis-aligned rectangle: `x` and `y` locate the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First abscissa past the right side.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// First ordinate past the bottom side.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Integer center, rounded toward the top-left.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn center_f(&self) -> PointF {
        PointF::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Copy enlarged by `dx` on left and right and `dy` on top and bottom.
    pub fn grow(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + 2 * dx,
            self.height + 2 * dy,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the two rectangles share some interior area.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether the point lies inside (left and top sides included).
    pub fn contains(&self, p: PointF) -> bool {
        p.x >= self.x as f64
            && p.x < self.right() as f64
            && p.y >= self.y as f64
            && p.y < self.bottom() as f64
    }
}

/// Straight segment, used for stem medians and staff lines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub p1: PointF,
    pub p2: PointF,
}

impl Line {
    pub const fn new(p1: PointF, p2: PointF) -> Self {
        Self { p1, p2 }
    }

    /// Abscissa where the (infinite) line crosses ordinate `y`.
    /// A horizontal line has no such point.
    pub fn x_at_y(&self, y: f64) -> Option<f64> {
        let dy = self.p2.y - self.p1.y;
        if dy == 0.0 {
            return None;
        }
        Some(self.p1.x + (y - self.p1.y) * (self.p2.x - self.p1.x) / dy)
    }

    /// Ordinate where the (infinite) line crosses abscissa `x`.
    /// A vertical line has no such point.
    pub fn y_at_x(&self, x: f64) -> Option<f64> {
        let dx = self.p2.x - self.p1.x;
        if dx == 0.0 {
            return None;
        }
        Some(self.p1.y + (x - self.p1.x) * (self.p2.y - self.p1.y) / dx)
    }
}
