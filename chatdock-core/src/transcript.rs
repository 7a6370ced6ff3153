//! Transcript rows and the stick-to-bottom scroll policy
//!
//! The log region itself is the ordered, append-only record of messages; the
//! renderer keeps no backing list. The only row ever removed is a typing
//! placeholder, through the [`TypingHandle`] returned when it was shown.

use tracing::debug;

use crate::constants::{STICK_THRESHOLD, TYPING_TEXT};
use crate::markup::{escape, text_to_markup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    You,
    Bot,
}

impl Role {
    /// Class name hosts use for the row
    pub fn as_str(self) -> &'static str {
        match self {
            Role::You => "you",
            Role::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn distance_from_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    pub fn is_near_bottom(&self) -> bool {
        self.distance_from_bottom() <= STICK_THRESHOLD
    }
}

/// The scrollable element that holds transcript rows.
pub trait LogRegion {
    /// Append one row holding already-safe inline markup.
    fn append_row(&mut self, role: Role, markup: &str) -> RowId;
    /// Remove a row; `false` if it no longer exists.
    fn remove_row(&mut self, id: RowId) -> bool;
    fn scroll_metrics(&self) -> ScrollMetrics;
    fn scroll_to_bottom(&mut self);
}

/// Removes exactly the typing row it was issued for.
#[must_use = "a typing row stays visible until its handle is cleared"]
#[derive(Debug, PartialEq, Eq)]
pub struct TypingHandle {
    row: RowId,
}

impl TypingHandle {
    pub fn row(&self) -> RowId {
        self.row
    }
}

#[derive(Debug)]
pub struct TranscriptRenderer<L> {
    log: L,
    stick_bottom: bool,
}

impl<L: LogRegion> TranscriptRenderer<L> {
    pub fn new(log: L) -> Self {
        Self {
            log,
            stick_bottom: true,
        }
    }

    pub fn stick_bottom(&self) -> bool {
        self.stick_bottom
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut L {
        &mut self.log
    }

    /// Append user-typed text: fully escaped, newlines kept as breaks.
    pub fn append_user(&mut self, text: &str) -> RowId {
        let markup = text_to_markup(text);
        self.append(Role::You, &markup)
    }

    /// Append bot markup as-is. Callers escape untrusted parts.
    pub fn append_bot(&mut self, markup: &str) -> RowId {
        self.append(Role::Bot, markup)
    }

    pub fn show_typing(&mut self) -> TypingHandle {
        let row = self.append(
            Role::Bot,
            &format!("<span class=\"cd-typing\">{}</span>", escape(TYPING_TEXT)),
        );
        TypingHandle { row }
    }

    pub fn clear_typing(&mut self, handle: TypingHandle) -> bool {
        self.log.remove_row(handle.row)
    }

    /// Re-evaluate the scroll intent after the user scrolled the log.
    pub fn on_scroll(&mut self) {
        let stick = self.log.scroll_metrics().is_near_bottom();
        if stick != self.stick_bottom {
            debug!(stick_bottom = stick, "Transcript scroll intent changed");
        }
        self.stick_bottom = stick;
    }

    /// Jump to the newest row unconditionally.
    pub fn scroll_to_bottom(&mut self) {
        self.log.scroll_to_bottom();
        self.stick_bottom = true;
    }

    fn append(&mut self, role: Role, markup: &str) -> RowId {
        let id = self.log.append_row(role, markup);
        if self.stick_bottom {
            self.log.scroll_to_bottom();
        }
        id
    }
}
