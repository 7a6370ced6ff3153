//! The assembled overlay
//!
//! [`ChatWidget`] is built once at startup and owns every component: the
//! surface, the persisted state and its store, both gesture controllers,
//! the transcript and the dispatcher. Hosts forward their events to it.
//! Persisted state changes only at gesture ends, open, close and explicit
//! repositioning, never mid-gesture.

use tracing::{debug, info};

use crate::config::WidgetConfig;
use crate::dispatch::{ChatTransport, MessageDispatcher, PendingSend, ReplyKind, TransportResponse};
use crate::drag::DragController;
use crate::error::TransportError;
use crate::geometry::{Point, Rect, clamp_to_viewport};
use crate::input::{KeyIntent, classify_key};
use crate::lifecycle::{InitMarker, InitToken, PanelLifecycle, PanelPhase};
use crate::markup::text_to_markup;
use crate::pointer::{PointerInput, current_point};
use crate::resize::ResizeController;
use crate::state::{KeyValueStorage, PanelState, StateStore};
use crate::surface::PanelSurface;
use crate::transcript::{LogRegion, TranscriptRenderer};

/// `S`: panel surface, `L`: log region, `K`: storage, `G`: gesture listener guard.
pub struct ChatWidget<S, L, K, G> {
    config: WidgetConfig,
    surface: S,
    store: StateStore<K>,
    state: PanelState,
    lifecycle: PanelLifecycle,
    drag: DragController<G>,
    resize: ResizeController<G>,
    transcript: TranscriptRenderer<L>,
    dispatcher: MessageDispatcher,
    restick_pending: bool,
    _token: InitToken,
}

impl<S, L, K, G> ChatWidget<S, L, K, G>
where
    S: PanelSurface,
    L: LogRegion,
    K: KeyValueStorage,
{
    /// Build the widget unless `marker` was already claimed, in which case
    /// nothing is constructed and `None` is returned.
    pub fn init(
        marker: &InitMarker,
        config: WidgetConfig,
        surface: S,
        log: L,
        storage: K,
    ) -> Option<Self> {
        let Some(token) = marker.try_claim() else {
            debug!("Widget already initialised, skipping");
            return None;
        };

        let store = StateStore::new(storage, config.storage_key.clone())
            .with_defaults(config.default_state());
        let state = store.load();
        let floor = config.min_size();
        let dispatcher = MessageDispatcher::new(config.endpoint.clone());

        let mut widget = Self {
            config,
            surface,
            store,
            state,
            lifecycle: PanelLifecycle::new(),
            drag: DragController::new(),
            resize: ResizeController::new(floor),
            transcript: TranscriptRenderer::new(log),
            dispatcher,
            restick_pending: false,
            _token: token,
        };

        widget.ensure_shell();
        if widget.state.open {
            widget.open();
        } else {
            widget.close();
        }
        info!(
            endpoint = widget.config.endpoint.as_str(),
            open = widget.state.open,
            "Chat widget initialised"
        );
        Some(widget)
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn phase(&self) -> PanelPhase {
        self.lifecycle.phase()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn transcript(&self) -> &TranscriptRenderer<L> {
        &self.transcript
    }

    pub fn store(&self) -> &StateStore<K> {
        &self.store
    }

    pub fn dispatcher(&self) -> &MessageDispatcher {
        &self.dispatcher
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_active()
    }

    pub fn open(&mut self) {
        self.ensure_shell();
        self.lifecycle
            .open(&mut self.surface, &mut self.store, &mut self.state);
        self.transcript.scroll_to_bottom();
    }

    pub fn close(&mut self) {
        self.ensure_shell();
        self.lifecycle
            .close(&mut self.surface, &mut self.store, &mut self.state);
    }

    pub fn toggle(&mut self) {
        match self.phase() {
            PanelPhase::Open => self.close(),
            _ => self.open(),
        }
    }

    /// Move the panel without a gesture. The result is clamped like a drag
    /// end and persisted.
    pub fn set_position(&mut self, x: f64, y: f64) -> Rect {
        self.ensure_shell();
        let size = self.surface.panel_rect().size();
        let rect = clamp_to_viewport(
            Rect::from_parts(Point::new(x, y), size),
            self.surface.viewport(),
            self.config.margin,
        );
        self.surface.place_at(rect.origin());
        self.persist_rect(rect);
        rect
    }

    pub fn drag_start(&mut self, input: &PointerInput, listeners: G) {
        self.drag
            .begin(&mut self.surface, current_point(input), listeners);
    }

    pub fn drag_move(&mut self, input: &PointerInput) -> Option<Point> {
        self.drag.update(&mut self.surface, current_point(input))
    }

    /// Idempotent; `None` when no drag was running.
    pub fn drag_end(&mut self) -> Option<Rect> {
        let rect = self.drag.end(&mut self.surface, self.config.margin)?;
        self.persist_rect(rect);
        Some(rect)
    }

    pub fn resize_start(&mut self, input: &PointerInput, listeners: G) {
        self.resize
            .begin(&mut self.surface, current_point(input), listeners);
    }

    /// Apply the new size. Returns `true` when the host should call
    /// [`flush_restick`](Self::flush_restick) once layout has settled.
    pub fn resize_move(&mut self, input: &PointerInput) -> bool {
        if self
            .resize
            .update(&mut self.surface, current_point(input))
            .is_none()
        {
            return false;
        }
        if self.transcript.stick_bottom() {
            self.restick_pending = true;
        }
        self.restick_pending
    }

    /// Idempotent; `None` when no resize was running.
    pub fn resize_end(&mut self) -> Option<Rect> {
        let rect = self.resize.end(&mut self.surface, self.config.margin)?;
        self.persist_rect(rect);
        Some(rect)
    }

    /// Re-stick the transcript to its bottom after a resize relayout.
    pub fn flush_restick(&mut self) {
        if std::mem::take(&mut self.restick_pending) {
            self.transcript.scroll_to_bottom();
        }
    }

    pub fn on_log_scroll(&mut self) {
        self.transcript.on_scroll();
    }

    /// Keep an absolutely positioned panel inside a viewport that changed size.
    pub fn on_viewport_resize(&mut self) -> Option<Rect> {
        self.state.origin()?;
        if self.drag.is_active() || self.resize.is_active() {
            return None;
        }
        let current = self.surface.panel_rect();
        let rect = clamp_to_viewport(current, self.surface.viewport(), self.config.margin);
        if rect == current {
            return None;
        }
        self.surface.place_at(rect.origin());
        self.persist_rect(rect);
        Some(rect)
    }

    /// Route a key pressed in the compose box. Returns the intent so the
    /// host knows whether to suppress the default action.
    pub fn on_key(&mut self, key: &str, shift: bool, composing: bool) -> KeyIntent {
        let intent = classify_key(key, shift, composing);
        if intent == KeyIntent::Close {
            self.close();
        }
        intent
    }

    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        self.dispatcher
            .begin(text, &mut self.surface, &mut self.transcript)
    }

    pub fn finish_send(
        &mut self,
        pending: PendingSend,
        result: Result<TransportResponse, TransportError>,
    ) -> ReplyKind {
        self.dispatcher
            .finish(pending, result, &mut self.surface, &mut self.transcript)
    }

    pub async fn send<T>(&mut self, text: &str, transport: &T) -> Option<ReplyKind>
    where
        T: ChatTransport + ?Sized,
    {
        self.dispatcher
            .send(text, transport, &mut self.surface, &mut self.transcript)
            .await
    }

    fn ensure_shell(&mut self) {
        if self
            .lifecycle
            .ensure_shell(&mut self.surface, &self.config, &mut self.state)
        {
            if let Some(greeting) = &self.config.greeting {
                self.transcript.append_bot(&text_to_markup(greeting));
            }
        }
    }

    fn persist_rect(&mut self, rect: Rect) {
        self.state.set_rect(rect);
        self.store.save(&self.state);
    }
}
