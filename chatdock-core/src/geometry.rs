//! Panel rectangles and viewport clamping

use serde::{Deserialize, Serialize};

/// A point in viewport coordinates (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset of `self` relative to `origin`
    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn offset_by(self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Raise each dimension to at least the matching floor.
    pub fn at_least(self, floor: Size) -> Size {
        Size::new(self.width.max(floor.width), self.height.max(floor.height))
    }
}

/// The panel's bounding box: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `rect` lies fully inside the viewport minus `margin` on every side.
    pub fn contains(&self, rect: &Rect, margin: f64) -> bool {
        rect.left >= margin
            && rect.top >= margin
            && rect.right() <= self.width - margin
            && rect.bottom() <= self.height - margin
    }
}

/// Pull `rect` back inside the viewport, keeping `margin` pixels free on
/// every side. Size is never changed. When the viewport is too small for the
/// panel the origin is pinned to the top-left margin.
pub fn clamp_to_viewport(rect: Rect, viewport: Viewport, margin: f64) -> Rect {
    let max_left = viewport.width - rect.width - margin;
    let max_top = viewport.height - rect.height - margin;
    Rect {
        left: rect.left.min(max_left).max(margin),
        top: rect.top.min(max_top).max(margin),
        ..rect
    }
}
