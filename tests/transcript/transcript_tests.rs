//! Transcript renderer tests

#[path = "../support/mod.rs"]
mod support;

use chatdock_core::{Role, ScrollMetrics, TranscriptRenderer};
use support::FakeLog;

fn filled(rows: usize) -> (TranscriptRenderer<FakeLog>, FakeLog) {
    let log = FakeLog::new();
    let mut transcript = TranscriptRenderer::new(log.clone());
    for i in 0..rows {
        transcript.append_bot(&format!("row {i}"));
    }
    (transcript, log)
}

#[test]
fn test_append_user_escapes_markup_and_keeps_newlines() {
    let log = FakeLog::new();
    let mut transcript = TranscriptRenderer::new(log.clone());

    transcript.append_user("<script>alert('x')</script>\nline & two");

    let (role, markup) = log.last().unwrap();
    assert_eq!(role, Role::You);
    assert_eq!(
        markup,
        "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;<br>line &amp; two"
    );
}

#[test]
fn test_append_bot_keeps_markup() {
    let log = FakeLog::new();
    let mut transcript = TranscriptRenderer::new(log.clone());

    transcript.append_bot("<b>A</b>");

    assert_eq!(log.last(), Some((Role::Bot, "<b>A</b>".to_string())));
}

#[test]
fn test_rows_keep_append_order() {
    let (mut transcript, log) = filled(0);
    transcript.append_user("one");
    transcript.append_bot("two");
    transcript.append_user("three");

    let roles: Vec<Role> = log.rows().into_iter().map(|(_, role, _)| role).collect();
    assert_eq!(roles, vec![Role::You, Role::Bot, Role::You]);
}

#[test]
fn test_typing_handle_removes_exactly_its_row() {
    let (mut transcript, log) = filled(2);
    let typing = transcript.show_typing();
    transcript.append_bot("late");
    assert_eq!(log.len(), 4);

    assert!(transcript.clear_typing(typing));
    let rows = log.rows();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|(_, _, markup)| !markup.contains("cd-typing")));
    assert_eq!(rows[2].2, "late");
}

#[test]
fn test_stick_bottom_defaults_to_true() {
    let (transcript, log) = filled(10);
    assert!(transcript.stick_bottom());
    assert!(log.is_at_bottom());
}

#[test]
fn test_stick_bottom_within_threshold() {
    let (mut transcript, log) = filled(10);
    let bottom = log.state.borrow().max_scroll_top();

    log.user_scroll_to(bottom - 4.0);
    transcript.on_scroll();
    assert!(transcript.stick_bottom());

    log.user_scroll_to(bottom - 4.5);
    transcript.on_scroll();
    assert!(!transcript.stick_bottom());

    log.user_scroll_to(bottom);
    transcript.on_scroll();
    assert!(transcript.stick_bottom());
}

#[test]
fn test_append_follows_only_when_stuck() {
    let (mut transcript, log) = filled(10);

    log.user_scroll_to(100.0);
    transcript.on_scroll();
    transcript.append_bot("quiet arrival");
    assert_eq!(log.scroll_top(), 100.0);
    assert!(!log.is_at_bottom());

    let bottom = log.state.borrow().max_scroll_top();
    log.user_scroll_to(bottom);
    transcript.on_scroll();
    transcript.append_bot("followed");
    assert!(log.is_at_bottom());
}

#[test]
fn test_forced_scroll_resets_intent() {
    let (mut transcript, log) = filled(10);
    log.user_scroll_to(0.0);
    transcript.on_scroll();
    assert!(!transcript.stick_bottom());

    transcript.scroll_to_bottom();
    assert!(transcript.stick_bottom());
    assert!(log.is_at_bottom());
}

#[test]
fn test_scroll_metrics_distance() {
    let metrics = ScrollMetrics {
        scroll_top: 296.0,
        scroll_height: 500.0,
        client_height: 200.0,
    };
    assert_eq!(metrics.distance_from_bottom(), 4.0);
    assert!(metrics.is_near_bottom());
}
