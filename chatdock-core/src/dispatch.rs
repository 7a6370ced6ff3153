//! One send/receive cycle against the chat endpoint
//!
//! `Idle -> Sending -> Idle`. The cycle is split around its single await
//! point so hosts that keep the widget behind a `RefCell` can release the
//! borrow while the request is in flight:
//!
//! 1. [`MessageDispatcher::begin`] echoes the text, clears and locks the
//!    compose row and shows the typing row.
//! 2. The host awaits [`ChatTransport::post`].
//! 3. [`MessageDispatcher::finish`] renders the outcome and unlocks the UI.
//!
//! [`MessageDispatcher::send`] runs all three for hosts that own the widget.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::SERVER_ERROR_TEXT;
use crate::error::TransportError;
use crate::markup::escape;
use crate::render::BotPayload;
use crate::surface::PanelSurface;
use crate::transcript::{LogRegion, TranscriptRenderer, TypingHandle};

/// JSON body posted to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Status and raw body of a response that did arrive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single POST. No retries, no timeout, no cancellation.
#[async_trait(?Send)]
pub trait ChatTransport {
    async fn post(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
}

/// How a finished cycle was rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyKind {
    Rendered { shape: &'static str },
    ServerError { status: u16 },
    NetworkError,
}

/// A cycle between `begin` and `finish`
#[derive(Debug)]
#[must_use = "a pending send keeps the compose row locked until finished"]
pub struct PendingSend {
    request: ChatRequest,
    typing: TypingHandle,
}

impl PendingSend {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

/// Markup for the outcome of a request.
pub fn reply_markup(result: &Result<TransportResponse, TransportError>) -> (ReplyKind, String) {
    match result {
        Ok(response) if response.is_success() => {
            let payload = BotPayload::parse(&response.body);
            (
                ReplyKind::Rendered {
                    shape: payload.kind(),
                },
                payload.to_markup(),
            )
        }
        Ok(response) => (
            ReplyKind::ServerError {
                status: response.status,
            },
            escape(SERVER_ERROR_TEXT),
        ),
        Err(err) => (ReplyKind::NetworkError, escape(err.user_message())),
    }
}

#[derive(Debug)]
pub struct MessageDispatcher {
    endpoint: String,
    phase: SendPhase,
}

impl MessageDispatcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            phase: SendPhase::Idle,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    /// Start a cycle. `None` for blank text, or while a cycle is in flight
    /// (the send control is disabled then).
    pub fn begin<S, L>(
        &mut self,
        text: &str,
        surface: &mut S,
        transcript: &mut TranscriptRenderer<L>,
    ) -> Option<PendingSend>
    where
        S: PanelSurface + ?Sized,
        L: LogRegion,
    {
        let message = text.trim();
        if message.is_empty() {
            return None;
        }
        if self.phase == SendPhase::Sending {
            debug!("Send ignored while a request is in flight");
            return None;
        }

        transcript.append_user(message);
        surface.clear_input();
        surface.set_send_enabled(false);
        let typing = transcript.show_typing();
        self.phase = SendPhase::Sending;

        info!(
            endpoint = self.endpoint.as_str(),
            chars = message.chars().count(),
            "Sending chat message"
        );
        Some(PendingSend {
            request: ChatRequest {
                message: message.to_string(),
            },
            typing,
        })
    }

    /// Render the outcome and return the UI to an interactive idle state.
    pub fn finish<S, L>(
        &mut self,
        pending: PendingSend,
        result: Result<TransportResponse, TransportError>,
        surface: &mut S,
        transcript: &mut TranscriptRenderer<L>,
    ) -> ReplyKind
    where
        S: PanelSurface + ?Sized,
        L: LogRegion,
    {
        let (kind, markup) = reply_markup(&result);
        match (&kind, &result) {
            (ReplyKind::ServerError { status }, _) => {
                warn!(status, "Chat endpoint returned an error status");
            }
            (ReplyKind::NetworkError, Err(err)) => {
                warn!(error = %err, "Chat request failed");
            }
            (ReplyKind::Rendered { shape }, _) => {
                debug!(shape, "Rendering bot reply");
            }
            _ => {}
        }

        transcript.clear_typing(pending.typing);
        transcript.append_bot(&markup);
        surface.set_send_enabled(true);
        surface.focus_input();
        self.phase = SendPhase::Idle;
        kind
    }

    /// A whole cycle for hosts that can hold the widget across the await.
    pub async fn send<T, S, L>(
        &mut self,
        text: &str,
        transport: &T,
        surface: &mut S,
        transcript: &mut TranscriptRenderer<L>,
    ) -> Option<ReplyKind>
    where
        T: ChatTransport + ?Sized,
        S: PanelSurface + ?Sized,
        L: LogRegion,
    {
        let pending = self.begin(text, surface, transcript)?;
        let result = transport.post(&self.endpoint, pending.request()).await;
        Some(self.finish(pending, result, surface, transcript))
    }
}
