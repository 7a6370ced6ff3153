//! Host-independent engine behind the chatdock floating chat panel.
//!
//! The crate owns every decision the overlay makes: where the panel sits,
//! how it is dragged and resized, when the transcript follows new rows,
//! how a send cycle runs and how a bot reply becomes markup. Hosts plug in
//! through the [`surface::PanelSurface`], [`transcript::LogRegion`],
//! [`state::KeyValueStorage`] and [`dispatch::ChatTransport`] seams.

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod markup;
pub mod pointer;
pub mod render;
pub mod resize;
pub mod state;
pub mod surface;
pub mod transcript;
pub mod widget;

pub use config::WidgetConfig;
pub use dispatch::{
    ChatRequest, ChatTransport, MessageDispatcher, PendingSend, ReplyKind, SendPhase,
    TransportResponse,
};
pub use error::{ConfigError, StorageError, TransportError};
pub use geometry::{Point, Rect, Size, Viewport, clamp_to_viewport};
pub use lifecycle::{InitMarker, InitToken, PAGE_MARKER, PanelPhase};
pub use pointer::{PointerInput, current_point};
pub use render::{BotPayload, render_payload};
pub use state::{KeyValueStorage, MemoryStorage, PanelState, StateStore};
pub use surface::PanelSurface;
pub use transcript::{LogRegion, Role, RowId, ScrollMetrics, TranscriptRenderer, TypingHandle};
pub use widget::ChatWidget;
