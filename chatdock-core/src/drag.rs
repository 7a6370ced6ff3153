//! Header drag gesture
//!
//! A [`DragSession`] exists only between pointer-down and pointer-up. It owns
//! the host's listener guard `G`, so ending the session (or replacing it)
//! releases the temporary move/end listeners on every path.

use tracing::debug;

use crate::geometry::{Point, Rect, clamp_to_viewport};
use crate::surface::PanelSurface;

#[derive(Debug)]
pub struct DragSession<G> {
    start_pointer: Point,
    start_origin: Point,
    moves: u32,
    _listeners: G,
}

impl<G> DragSession<G> {
    pub fn start_pointer(&self) -> Point {
        self.start_pointer
    }

    pub fn start_origin(&self) -> Point {
        self.start_origin
    }
}

#[derive(Debug)]
pub struct DragController<G> {
    session: Option<DragSession<G>>,
}

impl<G> Default for DragController<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> DragController<G> {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession<G>> {
        self.session.as_ref()
    }

    /// Capture the panel's top-left and the pointer, and hold `listeners`
    /// until the gesture ends.
    pub fn begin<S>(&mut self, surface: &mut S, pointer: Point, listeners: G)
    where
        S: PanelSurface + ?Sized,
    {
        let start_origin = surface.panel_rect().origin();
        surface.set_selection_suppressed(true);
        debug!(x = start_origin.x, y = start_origin.y, "Drag started");
        self.session = Some(DragSession {
            start_pointer: pointer,
            start_origin,
            moves: 0,
            _listeners: listeners,
        });
    }

    /// Follow the pointer. Returns the new origin, or `None` outside a session.
    pub fn update<S>(&mut self, surface: &mut S, pointer: Point) -> Option<Point>
    where
        S: PanelSurface + ?Sized,
    {
        let session = self.session.as_mut()?;
        let origin = session
            .start_origin
            .offset_by(pointer.delta_from(session.start_pointer));
        session.moves += 1;
        surface.place_at(origin);
        Some(origin)
    }

    /// Release listeners, restore selection and clamp into the viewport.
    ///
    /// Safe to call without a matching [`begin`](Self::begin); it then does
    /// nothing and returns `None`.
    pub fn end<S>(&mut self, surface: &mut S, margin: f64) -> Option<Rect>
    where
        S: PanelSurface + ?Sized,
    {
        let session = self.session.take()?;
        let moves = session.moves;
        drop(session);

        surface.set_selection_suppressed(false);
        let clamped = clamp_to_viewport(surface.panel_rect(), surface.viewport(), margin);
        surface.place_at(clamped.origin());
        debug!(x = clamped.left, y = clamped.top, moves, "Drag ended");
        Some(clamped)
    }
}
