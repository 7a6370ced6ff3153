//! Panel lifecycle: `Uninitialized -> Closed <-> Open`
//!
//! Startup is guarded by an [`InitMarker`]: the first claim yields the
//! [`InitToken`] a widget must own, every later claim on the same marker
//! fails, so loading the embedding script twice builds one widget.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::config::WidgetConfig;
use crate::geometry::{Rect, clamp_to_viewport};
use crate::state::{KeyValueStorage, PanelState, StateStore};
use crate::surface::PanelSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Uninitialized,
    Closed,
    Open,
}

/// Process-wide "already initialised" marker
#[derive(Debug)]
pub struct InitMarker {
    claimed: AtomicBool,
}

/// Marker shared by every widget entry point in this process
pub static PAGE_MARKER: InitMarker = InitMarker::new();

/// Proof that this caller won the initialisation race
#[derive(Debug)]
pub struct InitToken {
    _private: (),
}

impl Default for InitMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl InitMarker {
    pub const fn new() -> Self {
        Self {
            claimed: AtomicBool::new(false),
        }
    }

    /// Atomically check-and-set. Only the first caller gets a token.
    pub fn try_claim(&self) -> Option<InitToken> {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InitToken { _private: () })
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct PanelLifecycle {
    phase: PanelPhase,
}

impl Default for PanelLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelLifecycle {
    pub fn new() -> Self {
        Self {
            phase: PanelPhase::Uninitialized,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    /// Build the trigger and panel shell if that has not happened yet and
    /// apply the persisted geometry. Returns `true` if it built now.
    pub fn ensure_shell<S>(
        &mut self,
        surface: &mut S,
        config: &WidgetConfig,
        state: &mut PanelState,
    ) -> bool
    where
        S: PanelSurface + ?Sized,
    {
        if self.phase != PanelPhase::Uninitialized {
            return false;
        }

        surface.build_shell(config);
        surface.set_size(state.size());
        match state.origin() {
            Some(origin) => {
                // The viewport may have shrunk since the position was saved
                let rect = clamp_to_viewport(
                    Rect::from_parts(origin, state.size()),
                    surface.viewport(),
                    config.margin,
                );
                surface.place_at(rect.origin());
                state.x = Some(rect.left);
                state.y = Some(rect.top);
            }
            None => surface.place_default(),
        }
        surface.set_panel_visible(false);
        surface.set_trigger_visible(true);
        self.phase = PanelPhase::Closed;
        debug!(width = state.w, height = state.h, "Panel shell built");
        true
    }

    pub fn open<S, K>(&mut self, surface: &mut S, store: &mut StateStore<K>, state: &mut PanelState)
    where
        S: PanelSurface + ?Sized,
        K: KeyValueStorage,
    {
        surface.set_panel_visible(true);
        surface.set_trigger_visible(false);
        state.open = true;
        store.save(state);
        surface.focus_input();
        if self.phase != PanelPhase::Open {
            info!("Panel opened");
        }
        self.phase = PanelPhase::Open;
    }

    pub fn close<S, K>(&mut self, surface: &mut S, store: &mut StateStore<K>, state: &mut PanelState)
    where
        S: PanelSurface + ?Sized,
        K: KeyValueStorage,
    {
        surface.set_panel_visible(false);
        surface.set_trigger_visible(true);
        state.open = false;
        store.save(state);
        if self.phase != PanelPhase::Closed {
            info!("Panel closed");
        }
        self.phase = PanelPhase::Closed;
    }
}
