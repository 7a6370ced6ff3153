//! Mouse and touch input folded into a single viewport point

use crate::geometry::Point;

/// The coordinates carried by one pointer-family event.
///
/// Hosts fill `touches` from the event's active touch list (empty for mouse
/// events) and `client` from the mouse coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerInput {
    pub client: Point,
    pub touches: Vec<Point>,
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            client: Point::new(x, y),
            touches: Vec::new(),
        }
    }

    pub fn touch(touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            client: Point::default(),
            touches: touches.into_iter().collect(),
        }
    }
}

/// First touch point when any touch is active, otherwise the mouse position.
pub fn current_point(input: &PointerInput) -> Point {
    input.touches.first().copied().unwrap_or(input.client)
}
