//! Terminal stand-ins for the browser panel and transcript log

use chatdock_core::{
    LogRegion, PanelSurface, Point, Rect, Role, RowId, ScrollMetrics, Size, Viewport, WidgetConfig,
};
use tracing::debug;

/// Corner anchor offsets of the default panel placement
const ANCHOR_RIGHT: f64 = 16.0;
const ANCHOR_BOTTOM: f64 = 88.0;

/// Tracks what a browser would show, for status lines.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    viewport: Viewport,
    title: String,
    origin: Option<Point>,
    size: Size,
    panel_visible: bool,
    send_enabled: bool,
}

impl TerminalSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            title: String::new(),
            origin: None,
            size: Size::default(),
            panel_visible: false,
            send_enabled: true,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn status_line(&self) -> String {
        let rect = self.panel_rect();
        format!(
            "[{}: {} at ({}, {}) {}x{}{}{}]",
            self.title,
            if self.panel_visible { "open" } else { "closed" },
            rect.left,
            rect.top,
            rect.width,
            rect.height,
            if self.origin.is_none() { ", anchored" } else { "" },
            if self.send_enabled { "" } else { ", sending" },
        )
    }
}

impl PanelSurface for TerminalSurface {
    fn build_shell(&mut self, config: &WidgetConfig) {
        self.title = config.title.clone();
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    fn set_trigger_visible(&mut self, _visible: bool) {}

    fn panel_rect(&self) -> Rect {
        let origin = self.origin.unwrap_or(Point::new(
            self.viewport.width - self.size.width - ANCHOR_RIGHT,
            self.viewport.height - self.size.height - ANCHOR_BOTTOM,
        ));
        Rect::from_parts(origin, self.size)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn place_at(&mut self, origin: Point) {
        self.origin = Some(origin);
    }

    fn place_default(&mut self) {
        self.origin = None;
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn set_selection_suppressed(&mut self, _suppressed: bool) {}

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}
}

/// Transcript rows as plain text, optionally echoed to stdout as they arrive.
#[derive(Debug)]
pub struct TerminalLog {
    rows: Vec<(RowId, Role, String)>,
    next_id: u64,
    echo: bool,
}

impl TerminalLog {
    pub fn new(echo: bool) -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
            echo,
        }
    }

    /// Plain text of the most recent bot row.
    pub fn last_bot_text(&self) -> Option<&str> {
        self.rows
            .iter()
            .rev()
            .find(|(_, role, _)| *role == Role::Bot)
            .map(|(_, _, text)| text.as_str())
    }
}

impl LogRegion for TerminalLog {
    fn append_row(&mut self, role: Role, markup: &str) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        let text = markup_to_text(markup);
        if self.echo {
            println!("{}> {}", role.as_str(), text.replace('\n', "\n     "));
        }
        self.rows.push((id, role, text));
        id
    }

    fn remove_row(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|(row, _, _)| *row != id);
        let removed = self.rows.len() != before;
        if removed {
            debug!(row = id.0, "Transcript row removed");
        }
        removed
    }

    /// A terminal is always scrolled to its last line.
    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::default()
    }

    fn scroll_to_bottom(&mut self) {}
}

/// Flatten row markup to terminal text: `<br>` and block tags become line
/// breaks, list items get a bullet, other tags are dropped and entities
/// decoded.
pub fn markup_to_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('>') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let tag = &rest[start + 1..start + len];
        rest = &rest[start + len + 1..];

        let closing = tag.starts_with('/');
        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match (name.as_str(), closing) {
            ("br", _) => out.push('\n'),
            ("li", false) => out.push_str("\n- "),
            ("div" | "ul" | "ol", false) if !out.is_empty() => out.push('\n'),
            _ => {}
        }
    }
    out.push_str(rest);

    html_escape::decode_html_entities(&out).trim().to_string()
}
