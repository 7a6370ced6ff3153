//! Corner-handle resize gesture

use tracing::debug;

use crate::geometry::{Point, Rect, Size, clamp_to_viewport};
use crate::surface::PanelSurface;

/// Size for a pointer that moved `delta` since the gesture began.
/// The floor is hard: smaller requests are clamped, never rejected.
pub fn resized(start: Size, delta: Point, floor: Size) -> Size {
    Size::new(start.width + delta.x, start.height + delta.y).at_least(floor)
}

#[derive(Debug)]
pub struct ResizeSession<G> {
    start_pointer: Point,
    start_size: Size,
    _listeners: G,
}

impl<G> ResizeSession<G> {
    pub fn start_size(&self) -> Size {
        self.start_size
    }
}

#[derive(Debug)]
pub struct ResizeController<G> {
    session: Option<ResizeSession<G>>,
    floor: Size,
}

impl<G> ResizeController<G> {
    pub fn new(floor: Size) -> Self {
        Self {
            session: None,
            floor,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn floor(&self) -> Size {
        self.floor
    }

    pub fn begin<S>(&mut self, surface: &mut S, pointer: Point, listeners: G)
    where
        S: PanelSurface + ?Sized,
    {
        let start_size = surface.panel_rect().size();
        surface.set_selection_suppressed(true);
        debug!(
            width = start_size.width,
            height = start_size.height,
            "Resize started"
        );
        self.session = Some(ResizeSession {
            start_pointer: pointer,
            start_size,
            _listeners: listeners,
        });
    }

    /// Apply the size for the current pointer. `None` outside a session.
    pub fn update<S>(&mut self, surface: &mut S, pointer: Point) -> Option<Size>
    where
        S: PanelSurface + ?Sized,
    {
        let session = self.session.as_ref()?;
        let size = resized(
            session.start_size,
            pointer.delta_from(session.start_pointer),
            self.floor,
        );
        surface.set_size(size);
        Some(size)
    }

    /// Release listeners and clamp the resized panel into the viewport.
    /// A no-op returning `None` when no gesture is running.
    pub fn end<S>(&mut self, surface: &mut S, margin: f64) -> Option<Rect>
    where
        S: PanelSurface + ?Sized,
    {
        drop(self.session.take()?);

        surface.set_selection_suppressed(false);
        let clamped = clamp_to_viewport(surface.panel_rect(), surface.viewport(), margin);
        surface.place_at(clamped.origin());
        debug!(
            width = clamped.width,
            height = clamped.height,
            "Resize ended"
        );
        Some(clamped)
    }
}
