//! `localStorage` as the panel state slot

use chatdock_core::{KeyValueStorage, StorageError};
use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

/// `None` when the page may not use storage (privacy mode, sandboxed frame).
pub(super) struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub(super) fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                warn!("localStorage is not available, panel state will not persist");
                None
            }
            Err(err) => {
                warn!(error = %js_reason(&err), "localStorage access denied, panel state will not persist");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::read(key, js_reason(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::write(key, js_reason(&err)))
    }
}

/// Best-effort text for a thrown JS value.
pub(super) fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| js_sys::JSON::stringify(value).ok().map(String::from))
        .unwrap_or_else(|| "unknown error".to_string())
}
