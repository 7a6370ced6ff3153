//! Resize gesture tests

#[path = "../support/mod.rs"]
mod support;

use chatdock_core::resize::resized;
use chatdock_core::{Point, PointerInput, Size};
use support::{ListenerProbe, default_widget, persisted};

#[test]
fn test_resize_follows_pointer() {
    let (mut widget, surface, _log) = default_widget();
    let probe = ListenerProbe::default();

    widget.resize_start(&PointerInput::mouse(100.0, 100.0), probe.guard());
    widget.resize_move(&PointerInput::mouse(140.0, 130.0));

    assert_eq!(surface.doc().size, Size::new(400.0, 550.0));
}

#[test]
fn test_resize_below_floor_is_clamped() {
    let (mut widget, surface, _log) = default_widget();
    let probe = ListenerProbe::default();

    // Ask for a 50x50 panel
    widget.resize_start(&PointerInput::mouse(400.0, 600.0), probe.guard());
    widget.resize_move(&PointerInput::mouse(400.0 - 310.0, 600.0 - 470.0));
    assert_eq!(surface.doc().size, Size::new(300.0, 380.0));

    let rect = widget.resize_end().unwrap();
    assert_eq!(rect.size(), Size::new(300.0, 380.0));
    assert_eq!(widget.state().w, 300.0);
    assert_eq!(widget.state().h, 380.0);
}

#[test]
fn test_resized_floor_is_per_dimension() {
    let floor = Size::new(300.0, 380.0);
    assert_eq!(
        resized(Size::new(360.0, 520.0), Point::new(-500.0, 40.0), floor),
        Size::new(300.0, 560.0)
    );
    assert_eq!(
        resized(Size::new(360.0, 520.0), Point::new(10.0, -500.0), floor),
        Size::new(370.0, 380.0)
    );
}

#[test]
fn test_resize_end_clamps_and_persists() {
    let (mut widget, _surface, _log) = default_widget();
    let probe = ListenerProbe::default();
    widget.set_position(700.0, 200.0);

    widget.resize_start(&PointerInput::mouse(0.0, 0.0), probe.guard());
    widget.resize_move(&PointerInput::mouse(400.0, 300.0));
    let rect = widget.resize_end().unwrap();

    assert_eq!(rect.size(), Size::new(760.0, 820.0));
    assert_eq!(rect.left, 1280.0 - 760.0 - 8.0);
    // Taller than the viewport: pinned to the top margin
    assert_eq!(rect.top, 8.0);

    let saved = persisted(&widget);
    assert_eq!(saved["w"], 760.0);
    assert_eq!(saved["h"], 820.0);
    assert_eq!(saved["x"], rect.left);
    assert_eq!(probe.active(), 0);
}

#[test]
fn test_resize_end_without_start_is_noop() {
    let (mut widget, _surface, _log) = default_widget();
    assert!(widget.resize_end().is_none());
    assert!(!widget.is_resizing());
}

#[test]
fn test_resize_resticks_transcript_when_at_bottom() {
    let (mut widget, _surface, log) = default_widget();
    let probe = ListenerProbe::default();
    assert!(widget.transcript().stick_bottom());

    widget.resize_start(&PointerInput::mouse(0.0, 0.0), probe.guard());
    assert!(widget.resize_move(&PointerInput::mouse(20.0, 20.0)));

    let scrolls = log.state.borrow().bottom_scrolls;
    widget.flush_restick();
    assert_eq!(log.state.borrow().bottom_scrolls, scrolls + 1);

    // Nothing pending any more
    widget.flush_restick();
    assert_eq!(log.state.borrow().bottom_scrolls, scrolls + 1);
}

#[test]
fn test_resize_leaves_scrolled_up_transcript_alone() {
    let (mut widget, surface, log) = default_widget();
    let probe = ListenerProbe::default();
    widget.open();
    for i in 0..10 {
        surface.type_text(&format!("message {i}"));
        let pending = widget.begin_send(&format!("message {i}")).unwrap();
        widget.finish_send(pending, Ok(chatdock_core::TransportResponse::new(200, "{}")));
    }
    log.user_scroll_to(0.0);
    widget.on_log_scroll();
    assert!(!widget.transcript().stick_bottom());

    widget.resize_start(&PointerInput::mouse(0.0, 0.0), probe.guard());
    assert!(!widget.resize_move(&PointerInput::mouse(30.0, 30.0)));
    widget.flush_restick();
    assert_eq!(log.scroll_top(), 0.0);
}
