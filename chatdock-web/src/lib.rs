//! Browser host for the chatdock overlay.
//!
//! The DOM, localStorage and fetch adapters only exist on `wasm32`; the ids,
//! class names and stylesheet are shared so they can be checked natively.

pub mod style;

#[cfg(target_arch = "wasm32")]
mod wasm;
