//! The host side of the panel: trigger button, panel shell and compose row.

use crate::config::WidgetConfig;
use crate::geometry::{Point, Rect, Size, Viewport};

/// Everything the engine needs to do to the panel's visual shell.
///
/// Implementations own the host nodes (DOM elements, terminal state, test
/// doubles). All operations are infallible from the engine's point of view;
/// hosts log and ignore their own failures.
pub trait PanelSurface {
    /// Create the trigger and the panel shell and insert them into the host.
    /// Called exactly once per widget.
    fn build_shell(&mut self, config: &WidgetConfig);

    fn set_panel_visible(&mut self, visible: bool);
    fn set_trigger_visible(&mut self, visible: bool);

    /// Current bounding box of the panel in viewport coordinates.
    fn panel_rect(&self) -> Rect;
    fn viewport(&self) -> Viewport;

    /// Position the panel by its top-left corner, leaving the default
    /// right/bottom anchor if it was still in use.
    fn place_at(&mut self, origin: Point);
    /// Return to the default right/bottom corner anchor.
    fn place_default(&mut self);
    fn set_size(&mut self, size: Size);

    /// Block text selection on the page while a gesture runs.
    fn set_selection_suppressed(&mut self, suppressed: bool);

    fn set_send_enabled(&mut self, enabled: bool);
    fn clear_input(&mut self);
    fn focus_input(&mut self);
}
