//! Temporary window listeners for drag and resize gestures

use chatdock_core::{Point, PointerInput};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, MouseEvent, TouchEvent, Window};

use super::{WebWidget, schedule_restick, with_widget};

const MOVE_EVENTS: [&str; 2] = ["mousemove", "touchmove"];
const END_EVENTS: [&str; 3] = ["mouseup", "touchend", "touchcancel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GestureKind {
    Drag,
    Resize,
}

/// Move/end listeners on the window, removed when dropped.
///
/// The widget keeps this inside the gesture session, so the listeners go
/// away exactly when the session ends.
pub(super) struct GestureListeners {
    window: Window,
    on_move: Closure<dyn FnMut(Event)>,
    on_end: Closure<dyn FnMut(Event)>,
}

impl GestureListeners {
    pub(super) fn attach(window: &Window, kind: GestureKind) -> Self {
        let on_move = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
            handle_move(kind, &event);
        }));
        // Ending drops these closures, which must not happen while one of
        // them is still on the stack.
        let on_end = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
            spawn_local(async move { finish(kind) });
        }));

        for name in MOVE_EVENTS {
            let _ = window.add_event_listener_with_callback(name, on_move.as_ref().unchecked_ref());
        }
        for name in END_EVENTS {
            let _ = window.add_event_listener_with_callback(name, on_end.as_ref().unchecked_ref());
        }

        Self {
            window: window.clone(),
            on_move,
            on_end,
        }
    }
}

impl Drop for GestureListeners {
    fn drop(&mut self) {
        for name in MOVE_EVENTS {
            let _ = self
                .window
                .remove_event_listener_with_callback(name, self.on_move.as_ref().unchecked_ref());
        }
        for name in END_EVENTS {
            let _ = self
                .window
                .remove_event_listener_with_callback(name, self.on_end.as_ref().unchecked_ref());
        }
    }
}

/// Mouse or touch coordinates of a DOM pointer event.
pub(super) fn pointer_input(event: &Event) -> PointerInput {
    if event.type_().starts_with("touch") {
        let touches = event.unchecked_ref::<TouchEvent>().touches();
        return PointerInput::touch(
            (0..touches.length())
                .filter_map(|index| touches.get(index))
                .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y()))),
        );
    }
    let mouse = event.unchecked_ref::<MouseEvent>();
    PointerInput::mouse(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
}

fn handle_move(kind: GestureKind, event: &Event) {
    let input = pointer_input(event);
    match kind {
        GestureKind::Drag => {
            with_widget(|widget| widget.drag_move(&input));
        }
        GestureKind::Resize => {
            if with_widget(|widget| widget.resize_move(&input)).unwrap_or(false) {
                schedule_restick();
            }
        }
    }
}

fn finish(kind: GestureKind) {
    let ended = with_widget(|widget: &mut WebWidget| match kind {
        GestureKind::Drag => widget.drag_end(),
        GestureKind::Resize => widget.resize_end(),
    })
    .flatten();
    if let Some(rect) = ended {
        debug!(?kind, left = rect.left, top = rect.top, "Gesture finished");
    }
}
