//! wasm-bindgen entry points and event wiring
//!
//! The widget lives in a thread-local slot. Every DOM callback borrows it
//! for the duration of one synchronous step; the send cycle releases the
//! borrow before awaiting the network and takes it again to finish.

use std::cell::RefCell;
use std::sync::Once;

use chatdock_core::input::KeyIntent;
use chatdock_core::{ChatTransport, ChatWidget, ConfigError, PAGE_MARKER, WidgetConfig};
use thiserror::Error;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, MouseEvent, Window};

use crate::style::{CLOSE_CLASS, PANEL_ID};

mod dom;
mod gestures;
mod network;
mod storage;

use dom::{DomLog, DomShell, DomSurface};
use gestures::{GestureKind, GestureListeners, pointer_input};
use network::FetchTransport;
use storage::LocalStorage;

type WebWidget = ChatWidget<DomSurface, DomLog, LocalStorage, GestureListeners>;

thread_local! {
    static APP: RefCell<Option<WebWidget>> = const { RefCell::new(None) };
    static HANDLERS: RefCell<Vec<Closure<dyn FnMut(Event)>>> = const { RefCell::new(Vec::new()) };
    static RESTICK_FRAME: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
}

static TRACING: Once = Once::new();

/// Errors raised while booting the browser host
#[derive(Debug, Error)]
pub(crate) enum WebError {
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    #[error("failed to create <{tag}> element")]
    CreateElement { tag: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn init_tracing() {
    TRACING.call_once(|| {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(tracing::Level::INFO)
                .build(),
        );
    });
}

/// Mount the widget. `config_json` is an optional JSON object of overrides.
/// Only the first call on a page does anything.
#[wasm_bindgen]
pub fn boot(config_json: Option<String>) -> Result<(), JsValue> {
    init_tracing();
    let config = WidgetConfig::from_json(config_json.as_deref().unwrap_or_default())
        .map_err(WebError::from)?;
    start(config)?;
    Ok(())
}

#[wasm_bindgen]
pub fn open() {
    ensure_booted();
    with_widget(WebWidget::open);
}

#[wasm_bindgen]
pub fn close() {
    ensure_booted();
    with_widget(WebWidget::close);
}

#[wasm_bindgen(js_name = setPosition)]
pub fn set_position(x: f64, y: f64) {
    ensure_booted();
    with_widget(|widget| widget.set_position(x, y));
}

fn ensure_booted() {
    if APP.with(|slot| slot.borrow().is_some()) {
        return;
    }
    init_tracing();
    if let Err(err) = start(WidgetConfig::default()) {
        warn!(error = %err, "Failed to boot chat widget");
    }
}

fn start(config: WidgetConfig) -> Result<(), WebError> {
    let window = web_sys::window().ok_or(WebError::Unavailable("window"))?;
    let document = window
        .document()
        .ok_or(WebError::Unavailable("document"))?;

    // Another bundle on the page already mounted a panel
    if document.get_element_by_id(PANEL_ID).is_some() {
        debug!("Chat panel already present, skipping boot");
        return Ok(());
    }

    let shell = DomShell::create(&document)?;
    let log = DomLog::new(document.clone(), shell.log.clone());
    let storage = LocalStorage::open(&window);
    let surface = DomSurface::new(window.clone(), document, shell);

    let Some(widget) = ChatWidget::init(&PAGE_MARKER, config, surface, log, storage) else {
        return Ok(());
    };
    bind_events(&window, widget.surface().shell());
    APP.with(|slot| *slot.borrow_mut() = Some(widget));
    info!("Chat widget mounted");
    Ok(())
}

/// Run `f` against the mounted widget. `None` if nothing is mounted or the
/// widget is already borrowed further up the stack.
fn with_widget<R>(f: impl FnOnce(&mut WebWidget) -> R) -> Option<R> {
    APP.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            debug!("Chat widget busy, dropping event");
            return None;
        };
        slot.as_mut().map(f)
    })
}

fn listen(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    let _ = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
    HANDLERS.with(|slot| slot.borrow_mut().push(callback));
}

fn bind_events(window: &Window, shell: &DomShell) {
    listen(&shell.trigger, "click", |_event| {
        with_widget(WebWidget::open);
    });
    listen(&shell.close, "click", |_event| {
        with_widget(WebWidget::close);
    });
    listen(&shell.send, "click", |_event| submit_from_input());

    listen(&shell.input, "keydown", |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let intent = with_widget(|widget| {
            widget.on_key(&key.key(), key.shift_key(), key.is_composing())
        });
        match intent {
            Some(KeyIntent::Submit) => {
                event.prevent_default();
                submit_from_input();
            }
            Some(KeyIntent::Close) => event.prevent_default(),
            _ => {}
        }
    });

    for name in ["mousedown", "touchstart"] {
        let win = window.clone();
        listen(&shell.header, name, move |event| {
            if started_on_close_button(&event) {
                return;
            }
            begin_gesture(&win, GestureKind::Drag, &event);
        });

        let win = window.clone();
        listen(&shell.resize, name, move |event| {
            event.stop_propagation();
            begin_gesture(&win, GestureKind::Resize, &event);
        });
    }

    listen(&shell.log, "scroll", |_event| {
        with_widget(WebWidget::on_log_scroll);
    });
    listen(window, "resize", |_event| {
        with_widget(WebWidget::on_viewport_resize);
    });
}

fn started_on_close_button(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(&format!(".{CLOSE_CLASS}")).ok().flatten())
        .is_some()
}

fn begin_gesture(window: &Window, kind: GestureKind, event: &Event) {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        if mouse.button() != 0 {
            return;
        }
        event.prevent_default();
    }

    let input = pointer_input(event);
    let listeners = GestureListeners::attach(window, kind);
    with_widget(move |widget| match kind {
        GestureKind::Drag => widget.drag_start(&input, listeners),
        GestureKind::Resize => widget.resize_start(&input, listeners),
    });
}

/// Re-stick the transcript once the browser has laid out the new size.
fn schedule_restick() {
    let Some(window) = web_sys::window() else {
        return;
    };
    RESTICK_FRAME.with(|slot| {
        let mut slot = slot.borrow_mut();
        let callback = slot.get_or_insert_with(|| {
            Closure::<dyn FnMut()>::wrap(Box::new(|| {
                with_widget(WebWidget::flush_restick);
            }))
        });
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    });
}

fn submit_from_input() {
    let started = with_widget(|widget| {
        let text = widget.surface().input_value();
        let endpoint = widget.dispatcher().endpoint().to_string();
        widget.begin_send(&text).map(|pending| (pending, endpoint))
    })
    .flatten();
    let Some((pending, endpoint)) = started else {
        return;
    };

    spawn_local(async move {
        let result = FetchTransport.post(&endpoint, pending.request()).await;
        if with_widget(|widget| widget.finish_send(pending, result)).is_none() {
            warn!("Chat widget unavailable when the reply arrived");
        }
    });
}
