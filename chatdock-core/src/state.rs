//! Persisted panel state
//!
//! The whole [`PanelState`] lives in one namespaced record of a durable
//! key-value slot. Loading never fails: a missing or undecodable record
//! yields the defaults. Saving never fails either: write errors are logged
//! and dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use crate::error::StorageError;
use crate::geometry::{Point, Rect, Size};

/// Geometry and visibility of the panel.
///
/// `x`/`y` stay `None` until the panel has been positioned absolutely at
/// least once; until then it sits at its default corner anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelState {
    pub open: bool,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: f64,
    pub h: f64,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            open: false,
            x: None,
            y: None,
            w: DEFAULT_WIDTH,
            h: DEFAULT_HEIGHT,
        }
    }
}

impl PanelState {
    /// Absolute origin, if the panel has left its default anchor.
    pub fn origin(&self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Record a settled rectangle (after clamping).
    pub fn set_rect(&mut self, rect: Rect) {
        self.x = Some(rect.left);
        self.y = Some(rect.top);
        self.w = rect.width;
        self.h = rect.height;
    }
}

/// Record as found in storage; every field optional so partial records merge.
#[derive(Debug, Default, Deserialize)]
struct RawPanelState {
    open: Option<bool>,
    x: Option<f64>,
    y: Option<f64>,
    w: Option<f64>,
    h: Option<f64>,
}

/// A durable string slot scoped to the embedding origin
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage, used by headless hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load/save of [`PanelState`] under one key
#[derive(Debug)]
pub struct StateStore<S> {
    storage: S,
    key: String,
    defaults: PanelState,
    floor: Size,
}

impl<S: KeyValueStorage> StateStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            defaults: PanelState::default(),
            floor: Size::new(MIN_WIDTH, MIN_HEIGHT),
        }
    }

    /// Replace the defaults used when nothing decodable is stored.
    pub fn with_defaults(mut self, defaults: PanelState) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn defaults(&self) -> &PanelState {
        &self.defaults
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Defaults merged with whatever the stored record provides.
    pub fn load(&self) -> PanelState {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = self.key.as_str(), "No persisted panel state, using defaults");
                return self.defaults.clone();
            }
            Err(err) => {
                warn!(key = self.key.as_str(), error = %err, "Panel state unreadable, using defaults");
                return self.defaults.clone();
            }
        };

        match serde_json::from_str::<Option<RawPanelState>>(&raw) {
            Ok(Some(record)) => self.merge(record),
            Ok(None) => self.defaults.clone(),
            Err(err) => {
                warn!(key = self.key.as_str(), error = %err, "Panel state corrupt, using defaults");
                self.defaults.clone()
            }
        }
    }

    /// Overwrite the whole record. Failures are logged and swallowed.
    pub fn save(&mut self, state: &PanelState) {
        let mut record = state.clone();
        record.w = record.w.max(self.floor.width);
        record.h = record.h.max(self.floor.height);

        let encoded = match serde_json::to_string(&record) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "Failed to encode panel state");
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.key, &encoded) {
            warn!(key = self.key.as_str(), error = %err, "Failed to persist panel state");
        }
    }

    fn merge(&self, record: RawPanelState) -> PanelState {
        let finite = |v: Option<f64>| v.filter(|n| n.is_finite());
        let mut state = self.defaults.clone();
        if let Some(open) = record.open {
            state.open = open;
        }
        if let (Some(x), Some(y)) = (finite(record.x), finite(record.y)) {
            state.x = Some(x);
            state.y = Some(y);
        }
        if let Some(w) = finite(record.w) {
            state.w = w.max(self.floor.width);
        }
        if let Some(h) = finite(record.h) {
            state.h = h.max(self.floor.height);
        }
        state
    }
}
